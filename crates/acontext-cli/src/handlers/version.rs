use anyhow::Result;

pub fn handle(version: &str) -> Result<()> {
    println!("Acontext CLI version {}", version);
    Ok(())
}
