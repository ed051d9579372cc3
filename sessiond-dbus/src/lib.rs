//! `sessiond` client library
//!
//! Blocking bindings for the session, backlight and audio sink objects that the
//! [sessiond](https://github.com/jcrd/sessiond) daemon exports on the session bus.
//!
//! ```no_run
//! use dbus::blocking::Connection;
//! use sessiond_dbus::Sessiond;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let conn = Connection::new_session()?;
//! let sessiond = Sessiond::new(&conn);
//! let session = sessiond.session();
//! let id = session.inhibit("backup", "copying files")?;
//! // ...
//! session.uninhibit(&id)?;
//! # Ok(())
//! # }
//! ```
use std::fmt::Display;
use std::time::Duration;

use dbus::blocking::Connection;

pub use crate::audiosink::{audiosink_path, AudioSink};
pub use crate::backlight::{backlight_path, Backlight};
pub use crate::error::SessiondError;
pub use crate::inhibitor::{Inhibitor, InhibitorId};
pub use crate::object::{ObjectProxy, RemoteObject};
pub use crate::session::Session;
pub use crate::value::Value;

mod api;
mod audiosink;
mod backlight;
mod error;
mod inhibitor;
mod object;
mod session;
mod value;

/// Well-known bus name of the daemon
pub const SERVICE_NAME: &str = "org.sessiond.session1";

/// Object path of the session; device paths are nested below it
pub const SESSION_PATH: &str = "/org/sessiond/session1";

/// Per-call timeout used unless one is given explicitly. Matches libdbus' default.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_millis(25_000);

/// A sessiond client. This is a thin wrapper over a borrowed bus connection that creates object
/// handles sharing one call timeout.
pub struct Sessiond<'a> {
    conn: &'a Connection,
    timeout: Duration,
}

impl<'a> Sessiond<'a> {
    pub fn new(conn: &'a Connection) -> Sessiond<'a> {
        Sessiond::with_timeout(conn, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(conn: &'a Connection, timeout: Duration) -> Sessiond<'a> {
        Sessiond { conn, timeout }
    }

    pub fn connection(&self) -> &'a Connection {
        self.conn
    }

    /// Get a handle to the session.
    pub fn session(&self) -> Session<'a> {
        Session::with_timeout(self.conn, self.timeout)
    }

    /// Get a handle to a backlight by name.
    pub fn backlight(&self, name: &str) -> Result<Backlight<'a>, SessiondError> {
        Backlight::with_timeout(self.conn, name, self.timeout)
    }

    /// Get a handle to an audio sink by ID.
    pub fn audiosink<I: Display>(&self, id: I) -> Result<AudioSink<'a>, SessiondError> {
        AudioSink::with_timeout(self.conn, id, self.timeout)
    }

    /// Get handles to every backlight the session currently knows about.
    pub fn backlights(&self) -> Result<Vec<Backlight<'a>>, SessiondError> {
        self.session()
            .backlights()?
            .iter()
            .map(|path| Backlight::from_path(self.conn, path, self.timeout))
            .collect()
    }

    /// Get handles to every audio sink the session currently knows about.
    pub fn audiosinks(&self) -> Result<Vec<AudioSink<'a>>, SessiondError> {
        self.session()
            .audiosinks()?
            .iter()
            .map(|path| AudioSink::from_path(self.conn, path, self.timeout))
            .collect()
    }

    /// Get a handle to the default audio sink, if the daemon reports one.
    pub fn default_audiosink(&self) -> Result<Option<AudioSink<'a>>, SessiondError> {
        match self.session().default_audiosink()? {
            // An unset object path property reads as "/"
            Some(path) if path != "/" => {
                Ok(Some(AudioSink::from_path(self.conn, &path, self.timeout)?))
            }
            _ => Ok(None),
        }
    }
}
