//! `sessionctl inhibit`: add an inhibitor, optionally for the lifetime of a command.

use std::process::Command;

use anyhow::{Context, Result as AnyResult};
use log::{debug, warn};

use sessiond_dbus::Session;

/// Adds an inhibitor. With no command, prints the new inhibitor's ID and leaves it running.
/// Otherwise runs the command, removes the inhibitor once the command exits and returns the
/// command's exit code.
pub fn inhibit(
    session: &Session,
    who: &str,
    why: Option<String>,
    command: &[String],
) -> AnyResult<i32> {
    let why = why.unwrap_or_else(|| command.join(" "));
    let id = session.inhibit(who, &why).context("Could not add inhibitor")?;

    if command.is_empty() {
        println!("{}", id);
        return Ok(0);
    }

    debug!("Running {:?} with inhibitor {}", command, id);
    let status = Command::new(&command[0]).args(&command[1..]).status();

    // Always release the inhibitor, even if the command could not be started
    let released = session
        .uninhibit(&id)
        .with_context(|| format!("Could not remove inhibitor {}", id));

    let status = status.with_context(|| format!("Could not run {}", command[0]))?;
    released?;

    match status.code() {
        Some(code) => Ok(code),
        None => {
            warn!("{} was terminated by a signal", command[0]);
            Ok(1)
        }
    }
}
