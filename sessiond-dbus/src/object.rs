//! Base proxy shared by all sessiond objects.
use std::collections::HashMap;
use std::time::Duration;

use dbus::arg::{AppendAll, ReadAll, RefArg};
use dbus::blocking::stdintf::org_freedesktop_dbus::Properties;
use dbus::blocking::{Connection, Proxy};
use dbus::message::SignalArgs;
use dbus::{Message, Path};
use log::{debug, trace};

use crate::error::SessiondError;
use crate::value::{FromValue, Value};
use crate::SERVICE_NAME;

/// A sessiond object on the bus: an object path on the sessiond service plus the
/// `org.sessiond.session1.*` interface it implements.
///
/// Property reads go through `org.freedesktop.DBus.Properties`, scoped to the object's own
/// interface. Method calls go to the object's own interface. Nothing is cached: every read is a
/// round trip to the daemon.
pub struct RemoteObject<'a> {
    proxy: Proxy<'a, &'a Connection>,
    interface: String,
}

impl<'a> RemoteObject<'a> {
    /// Creates a proxy for `path` implementing `org.sessiond.session1.<interface_suffix>`.
    ///
    /// # Errors
    /// Returns [`SessiondError::InvalidPath`] if `path` is not a valid D-Bus object path.
    pub fn new(
        conn: &'a Connection,
        path: &str,
        interface_suffix: &str,
        timeout: Duration,
    ) -> Result<RemoteObject<'a>, SessiondError> {
        let object_path = Path::new(path.to_string())
            .map_err(|message| SessiondError::invalid_path(path.to_string(), message))?;
        Ok(RemoteObject::from_path(
            conn,
            object_path,
            interface_suffix,
            timeout,
        ))
    }

    pub(crate) fn from_path(
        conn: &'a Connection,
        path: Path<'static>,
        interface_suffix: &str,
        timeout: Duration,
    ) -> RemoteObject<'a> {
        let interface = format!("{}.{}", SERVICE_NAME, interface_suffix);
        debug!("Creating proxy for {} at {}", interface, path);
        RemoteObject {
            proxy: Proxy::new(SERVICE_NAME, path, timeout, conn),
            interface,
        }
    }

    /// The object path this proxy points at.
    pub fn path(&self) -> &str {
        &self.proxy.path
    }

    /// The full interface name, such as `org.sessiond.session1.Backlight`.
    pub fn interface(&self) -> &str {
        &self.interface
    }

    /// Reads a single property of the object's interface.
    pub fn get_property(&self, name: &str) -> Result<Value, SessiondError> {
        trace!("Reading {}.{} on {}", self.interface, name, self.path());
        // `Get` unwraps the reply's variant itself
        let value: Box<dyn RefArg + 'static> = self.proxy.get(&self.interface, name)?;
        Ok(Value::from_ref_arg(&*value))
    }

    /// Reads every property of the object's interface.
    pub fn get_properties(&self) -> Result<HashMap<String, Value>, SessiondError> {
        trace!("Reading all {} properties on {}", self.interface, self.path());
        let props = self.proxy.get_all(&self.interface)?;
        Ok(props
            .into_iter()
            .map(|(name, value)| (name, Value::from_ref_arg(&*value.0)))
            .collect())
    }

    /// Reads a property and narrows it to `T`.
    pub(crate) fn property<T: FromValue>(&self, name: &str) -> Result<T, SessiondError> {
        let value = self.get_property(name)?;
        match T::from_value(&value) {
            Some(v) => Ok(v),
            None => Err(SessiondError::unexpected_type(name, T::EXPECTED, value)),
        }
    }

    /// Like [`RemoteObject::property`], but a property the daemon does not expose reads as
    /// `None`. Used for capabilities older daemons lack.
    pub(crate) fn optional_property<T: FromValue>(
        &self,
        name: &str,
    ) -> Result<Option<T>, SessiondError> {
        match self.property(name) {
            Ok(v) => Ok(Some(v)),
            Err(e) if e.is_unknown_property() => {
                debug!("{} does not expose {}", self.interface, name);
                Ok(None)
            }
            Err(e) => Err(e),
        }
    }

    /// Calls a method on the object's interface.
    pub(crate) fn call<A: AppendAll, R: ReadAll>(
        &self,
        method: &str,
        args: A,
    ) -> Result<R, SessiondError> {
        let reply = self
            .proxy
            .method_call(self.interface.as_str(), method, args)?;
        Ok(reply)
    }

    /// Registers `f` to run whenever this object emits the signal `S`. Callbacks run from
    /// `Connection::process`.
    pub(crate) fn watch<S, F>(&self, mut f: F) -> Result<(), SessiondError>
    where
        S: SignalArgs + ReadAll + 'static,
        F: FnMut(S) + Send + 'static,
    {
        let rule = S::match_rule(None, Some(&self.proxy.path)).static_clone();
        match self
            .proxy
            .connection
            .add_match(rule, move |signal: S, _: &Connection, _: &Message| {
                f(signal);
                true
            }) {
            Ok(_) => Ok(()),
            Err(e) => Err(SessiondError::match_failed(S::NAME, e)),
        }
    }
}

/// Generic property access shared by [`Session`](crate::Session),
/// [`Backlight`](crate::Backlight) and [`AudioSink`](crate::AudioSink).
pub trait ObjectProxy {
    fn object(&self) -> &RemoteObject<'_>;

    fn path(&self) -> &str {
        self.object().path()
    }

    fn interface(&self) -> &str {
        self.object().interface()
    }

    fn get_property(&self, name: &str) -> Result<Value, SessiondError> {
        self.object().get_property(name)
    }

    fn get_properties(&self) -> Result<HashMap<String, Value>, SessiondError> {
        self.object().get_properties()
    }
}
