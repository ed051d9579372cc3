//! sessiond client error type
use dbus::Error as DBusError;
use thiserror::Error;

use crate::value::Value;

/// D-Bus error names a daemon uses to report a property it does not have.
const UNKNOWN_PROPERTY_ERRORS: &[&str] = &[
    "org.freedesktop.DBus.Error.UnknownProperty",
    "org.freedesktop.DBus.Error.InvalidArgs",
];

#[derive(Error, Debug)]
pub enum SessiondError {
    #[error("Invalid object path {path}: {message}")]
    InvalidPath {
        path: String,
        message: String,
    },

    #[error("Property {property} is not {expected} (got {found})")]
    UnexpectedType {
        property: String,
        expected: &'static str,
        found: Value,
    },

    #[error("Could not subscribe to {signal}")]
    MatchFailed {
        signal: &'static str,
        #[source]
        source: DBusError,
    },

    #[error("D-Bus operation failed: {}", .source.message().unwrap_or("no error message"))]
    DBusError {
        #[from]
        #[source]
        source: DBusError,
    },
}

impl SessiondError {
    pub fn invalid_path(path: String, message: String) -> SessiondError {
        SessiondError::InvalidPath {
            path,
            message,
        }
    }

    pub fn unexpected_type(property: &str, expected: &'static str, found: Value) -> SessiondError {
        SessiondError::UnexpectedType {
            property: property.to_string(),
            expected,
            found,
        }
    }

    pub fn match_failed(signal: &'static str, error: DBusError) -> SessiondError {
        SessiondError::MatchFailed {
            signal,
            source: error,
        }
    }

    /// The D-Bus error name, if this error came from the bus
    /// (for example `org.sessiond.session1.Error.Lock`).
    pub fn name(&self) -> Option<&str> {
        self.dbus_error().and_then(|e| e.name())
    }

    /// The diagnostic text the daemon or bus attached to the error, if any.
    pub fn message(&self) -> Option<&str> {
        self.dbus_error().and_then(|e| e.message())
    }

    pub(crate) fn is_unknown_property(&self) -> bool {
        match self {
            SessiondError::DBusError { source, .. } => source
                .name()
                .map_or(false, |name| UNKNOWN_PROPERTY_ERRORS.contains(&name)),
            _ => false,
        }
    }

    fn dbus_error(&self) -> Option<&DBusError> {
        match self {
            SessiondError::DBusError { source, .. } | SessiondError::MatchFailed { source, .. } => {
                Some(source)
            }
            _ => None,
        }
    }
}
