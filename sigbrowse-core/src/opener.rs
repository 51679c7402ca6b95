//! Launching URLs in the host's default handler.

use crate::error::{ReconError, Result};
use std::process::{Command, Stdio};
use tracing::debug;

/// Capability for handing a URL to something that will open it.
///
/// Implementations report launch failures; deciding whether a failure
/// ends the run is up to the caller.
pub trait Opener: Send + Sync {
    fn open(&self, url: &str) -> Result<()>;
}

/// Starts the platform's URL handler and does not wait for it.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemOpener;

impl SystemOpener {
    fn command(url: &str) -> Result<Command> {
        let mut command = match std::env::consts::OS {
            "linux" | "freebsd" | "openbsd" | "netbsd" => {
                let mut c = Command::new("xdg-open");
                c.arg(url);
                c
            }
            "macos" => {
                let mut c = Command::new("open");
                c.arg(url);
                c
            }
            "windows" => {
                let mut c = Command::new("rundll32");
                c.arg("url.dll,FileProtocolHandler").arg(url);
                c
            }
            other => return Err(ReconError::UnsupportedPlatform(other.to_string())),
        };
        command
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::null());
        Ok(command)
    }
}

impl Opener for SystemOpener {
    fn open(&self, url: &str) -> Result<()> {
        debug!("Opening {}", url);
        // The child is detached: dropping the handle neither waits nor kills.
        Self::command(url)?
            .spawn()
            .map(drop)
            .map_err(|source| ReconError::Launch {
                url: url.to_string(),
                source,
            })
    }
}

/// Prints each URL instead of opening it.
#[derive(Debug, Default, Clone, Copy)]
pub struct DryRunOpener;

impl Opener for DryRunOpener {
    fn open(&self, url: &str) -> Result<()> {
        println!("[+] {}", url);
        Ok(())
    }
}
