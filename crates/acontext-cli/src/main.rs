use acontext::{VERSION, run_blocking, telemetry};
use acontext_telemetry::{Config, init_tracing};

fn main() {
    // Reset SIGPIPE to default behavior to prevent panic on broken pipe
    // (e.g., when piping to `head` or `less` that exits early)
    #[cfg(unix)]
    reset_sigpipe();

    init_tracing();

    let config = Config::load()
        .unwrap_or_else(|e| {
            tracing::debug!(error = %e, "failed to load config, using defaults");
            Config::default()
        })
        .with_env_overrides();

    let argv: Vec<String> = std::env::args_os()
        .map(|arg| arg.to_string_lossy().into_owned())
        .collect();

    let code = match run_blocking(argv, || telemetry::dispatcher(&config, VERSION)) {
        Ok(code) => code,
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(1);
        }
    };

    if code != 0 {
        std::process::exit(code);
    }
}

#[cfg(unix)]
fn reset_sigpipe() {
    unsafe {
        libc::signal(libc::SIGPIPE, libc::SIG_DFL);
    }
}
