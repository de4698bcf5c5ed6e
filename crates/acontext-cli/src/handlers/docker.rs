use crate::args::DockerCommand;
use anyhow::{Context, Result, bail};
use std::process::Command;

pub const DEFAULT_PROJECT_NAME: &str = "acontext";
pub const DEFAULT_COMPOSE_FILE: &str = "docker-compose.yaml";

const COMPOSE_ENV: [(&str, &str); 2] = [
    ("COMPOSE_PROJECT_NAME", DEFAULT_PROJECT_NAME),
    ("COMPOSE_FILE", DEFAULT_COMPOSE_FILE),
];

/// Arguments passed to `docker compose` for each subcommand.
pub fn compose_args(command: &DockerCommand) -> Option<Vec<String>> {
    let args = match command {
        DockerCommand::Up => vec!["up".to_string(), "-d".to_string()],
        DockerCommand::Down => vec!["down".to_string()],
        DockerCommand::Status => vec!["ps".to_string()],
        DockerCommand::Logs { service, follow } => {
            let mut args = vec!["logs".to_string()];
            if *follow {
                args.push("--follow".to_string());
            }
            args.extend(service.iter().cloned());
            args
        }
        DockerCommand::Env => return None,
    };
    Some(args)
}

/// Effective compose environment: process values, falling back to defaults.
pub fn compose_env() -> Vec<(&'static str, String)> {
    COMPOSE_ENV
        .iter()
        .map(|(key, default)| {
            let value = std::env::var(key)
                .ok()
                .filter(|v| !v.is_empty())
                .unwrap_or_else(|| default.to_string());
            (*key, value)
        })
        .collect()
}

pub fn handle(command: DockerCommand) -> Result<()> {
    let Some(args) = compose_args(&command) else {
        for (key, value) in compose_env() {
            println!("{}={}", key, value);
        }
        return Ok(());
    };

    tracing::debug!(?args, "running docker compose");

    let mut compose = Command::new("docker");
    compose.arg("compose").args(&args);
    for (key, value) in compose_env() {
        compose.env(key, value);
    }

    let status = compose
        .status()
        .context("failed to run docker compose (is Docker installed?)")?;

    if !status.success() {
        match status.code() {
            Some(code) => bail!("docker compose {} exited with status {}", args[0], code),
            None => bail!("docker compose {} was terminated by a signal", args[0]),
        }
    }
    Ok(())
}
