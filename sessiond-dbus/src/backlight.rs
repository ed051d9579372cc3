use std::time::Duration;

use dbus::blocking::Connection;
use log::debug;

use crate::error::SessiondError;
use crate::object::{ObjectProxy, RemoteObject};
use crate::{DEFAULT_TIMEOUT, SESSION_PATH};

/// Object path of the backlight called `name`.
pub fn backlight_path(name: &str) -> String {
    format!("{}/backlight/{}", SESSION_PATH, name)
}

/// Handle to a sessiond backlight
pub struct Backlight<'a> {
    name: String,
    object: RemoteObject<'a>,
}

impl<'a> Backlight<'a> {
    pub fn new(conn: &'a Connection, name: &str) -> Result<Backlight<'a>, SessiondError> {
        Backlight::with_timeout(conn, name, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(
        conn: &'a Connection,
        name: &str,
        timeout: Duration,
    ) -> Result<Backlight<'a>, SessiondError> {
        let object = RemoteObject::new(conn, &backlight_path(name), "Backlight", timeout)?;
        Ok(Backlight {
            name: name.to_string(),
            object,
        })
    }

    /// Creates a handle from an object path reported by the daemon, such as an entry of
    /// [`Session::backlights`](crate::Session::backlights).
    pub fn from_path(
        conn: &'a Connection,
        path: &str,
        timeout: Duration,
    ) -> Result<Backlight<'a>, SessiondError> {
        let object = RemoteObject::new(conn, path, "Backlight", timeout)?;
        let name = path.rsplit('/').next().unwrap_or(path).to_string();
        Ok(Backlight { name, object })
    }

    /// The last element of the handle's object path. No call is made; see
    /// [`Backlight::device_name`] for the name the daemon reports.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sets the brightness. Fails if the daemon rejects the value.
    pub fn set_brightness(&self, v: u32) -> Result<(), SessiondError> {
        let () = self.object.call("SetBrightness", (v,))?;
        debug!("Set brightness of {} to {}", self.name, v);
        Ok(())
    }

    /// Changes the brightness by `v`, returning the new brightness.
    pub fn inc_brightness(&self, v: i32) -> Result<u32, SessiondError> {
        let (brightness,): (u32,) = self.object.call("IncBrightness", (v,))?;
        debug!("Changed brightness of {} by {} to {}", self.name, v, brightness);
        Ok(brightness)
    }

    /// The device name reported by the daemon (the `Name` property).
    pub fn device_name(&self) -> Result<String, SessiondError> {
        self.object.property("Name")
    }

    pub fn online(&self) -> Result<bool, SessiondError> {
        self.object.property("Online")
    }

    pub fn subsystem(&self) -> Result<String, SessiondError> {
        self.object.property("Subsystem")
    }

    /// Path to the device via the sys mount point.
    pub fn sys_path(&self) -> Result<String, SessiondError> {
        self.object.property("SysPath")
    }

    /// Path to the device without the sys mount point.
    pub fn dev_path(&self) -> Result<String, SessiondError> {
        self.object.property("DevPath")
    }

    pub fn max_brightness(&self) -> Result<u64, SessiondError> {
        self.object.property("MaxBrightness")
    }

    pub fn brightness(&self) -> Result<u64, SessiondError> {
        self.object.property("Brightness")
    }
}

impl<'a> ObjectProxy for Backlight<'a> {
    fn object(&self) -> &RemoteObject<'_> {
        &self.object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_derived_from_name() {
        assert_eq!(
            backlight_path("panel0"),
            "/org/sessiond/session1/backlight/panel0"
        );
        assert_eq!(
            backlight_path("intel_backlight"),
            "/org/sessiond/session1/backlight/intel_backlight"
        );
    }
}
