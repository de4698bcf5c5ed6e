use is_terminal::IsTerminal;
use owo_colors::OwoColorize;

pub const LOGO: &str = r"
    _                    _            _
   / \   ___ ___  _ __ | |_ _____  _| |_
  / _ \ / __/ _ \| '_ \| __/ _ \ \/ / __|
 / ___ \ (_| (_) | | | | ||  __/>  <| |_
/_/   \_\___\___/|_| |_|\__\___/_/\_\\__|
";

fn colored() -> bool {
    std::io::stdout().is_terminal()
}

pub fn print_logo() {
    if colored() {
        println!("{}", LOGO.cyan().bold());
    } else {
        println!("{}", LOGO);
    }
}

pub fn print_welcome() {
    print_logo();
    println!();
    if colored() {
        println!("{}", "Welcome to Acontext CLI!".bold());
    } else {
        println!("Welcome to Acontext CLI!");
    }
    println!();
    println!("Quick Commands:");
    println!("  acontext create     Create a new project");
    println!("  acontext docker     Manage Docker services (up/down/status/logs/env)");
    println!("  acontext version    Show version information");
    println!("  acontext help       Show help information");
    println!();
    println!("Get started: acontext create");
}

pub fn print_created(path: &std::path::Path, template: &str) {
    let shown = path.display().to_string();
    if colored() {
        println!("{} {} ({})", "✓ Created".green().bold(), shown, template);
    } else {
        println!("✓ Created {} ({})", shown, template);
    }
}
