use crate::presentation;
use anyhow::Result;

pub fn handle() -> Result<()> {
    presentation::print_welcome();
    Ok(())
}
