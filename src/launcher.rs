//! URL launcher
//!
//! Hands trailer links to the platform's default opener.

use std::process::Stdio;
use thiserror::Error;
use tokio::process::Command;
use tracing::debug;

#[derive(Debug, Error)]
pub enum LaunchError {
    #[error("Opener '{0}' not found")]
    NotFound(String),
    #[error("Failed to start opener: {0}")]
    StartFailed(#[from] std::io::Error),
    #[error("Refusing to open non-http URL: {0}")]
    UnsupportedUrl(String),
}

/// Program and leading arguments for the platform opener
pub fn opener() -> (&'static str, &'static [&'static str]) {
    #[cfg(target_os = "macos")]
    return ("open", &[]);

    #[cfg(target_os = "windows")]
    return ("cmd", &["/C", "start", ""]);

    #[cfg(not(any(target_os = "macos", target_os = "windows")))]
    return ("xdg-open", &[]);
}

/// Open `url` in the default browser without waiting for it
pub async fn open_url(url: &str) -> Result<(), LaunchError> {
    if !(url.starts_with("https://") || url.starts_with("http://")) {
        return Err(LaunchError::UnsupportedUrl(url.to_string()));
    }

    let (program, args) = opener();
    debug!(program, url, "opening url");

    Command::new(program)
        .args(args)
        .arg(url)
        .stdin(Stdio::null())
        .stdout(Stdio::null())
        .stderr(Stdio::null())
        .spawn()
        .map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                LaunchError::NotFound(program.to_string())
            } else {
                LaunchError::StartFailed(e)
            }
        })?;
    Ok(())
}
