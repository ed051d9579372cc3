use std::fmt::Display;
use std::time::Duration;

use dbus::blocking::Connection;
use log::debug;

use crate::api::audiosink::{
    OrgSessiondSession1AudioSinkChangeMute, OrgSessiondSession1AudioSinkChangeVolume,
};
use crate::error::SessiondError;
use crate::object::{ObjectProxy, RemoteObject};
use crate::{DEFAULT_TIMEOUT, SESSION_PATH};

/// Object path of the audio sink with the given ID.
pub fn audiosink_path<I: Display>(id: I) -> String {
    format!("{}/audiosink/{}", SESSION_PATH, id)
}

/// Handle to a sessiond audio sink
///
/// Audio sinks are only exported by daemons built with audio support; on other daemons every
/// call fails with a D-Bus error for the unknown object.
pub struct AudioSink<'a> {
    object: RemoteObject<'a>,
}

impl<'a> AudioSink<'a> {
    pub fn new<I: Display>(conn: &'a Connection, id: I) -> Result<AudioSink<'a>, SessiondError> {
        AudioSink::with_timeout(conn, id, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout<I: Display>(
        conn: &'a Connection,
        id: I,
        timeout: Duration,
    ) -> Result<AudioSink<'a>, SessiondError> {
        AudioSink::from_path(conn, &audiosink_path(id), timeout)
    }

    /// Creates a handle from an object path reported by the daemon, such as
    /// [`Session::default_audiosink`](crate::Session::default_audiosink).
    pub fn from_path(
        conn: &'a Connection,
        path: &str,
        timeout: Duration,
    ) -> Result<AudioSink<'a>, SessiondError> {
        let object = RemoteObject::new(conn, path, "AudioSink", timeout)?;
        Ok(AudioSink { object })
    }

    /// Sets the volume.
    pub fn set_volume(&self, v: f64) -> Result<(), SessiondError> {
        let () = self.object.call("SetVolume", (v,))?;
        debug!("Set volume of {} to {}", self.object.path(), v);
        Ok(())
    }

    /// Changes the volume by `v`, returning the new volume.
    pub fn inc_volume(&self, v: f64) -> Result<f64, SessiondError> {
        let (volume,): (f64,) = self.object.call("IncVolume", (v,))?;
        debug!("Changed volume of {} by {} to {}", self.object.path(), v, volume);
        Ok(volume)
    }

    pub fn set_mute(&self, m: bool) -> Result<(), SessiondError> {
        let () = self.object.call("SetMute", (m,))?;
        debug!("Set mute state of {} to {}", self.object.path(), m);
        Ok(())
    }

    /// Toggles the mute state, returning the new state.
    pub fn toggle_mute(&self) -> Result<bool, SessiondError> {
        let (mute,): (bool,) = self.object.call("ToggleMute", ())?;
        debug!("Toggled mute state of {} to {}", self.object.path(), mute);
        Ok(mute)
    }

    /// The sink's ID, as assigned by the audio server.
    pub fn id(&self) -> Result<u64, SessiondError> {
        self.object.property("Id")
    }

    pub fn name(&self) -> Result<String, SessiondError> {
        self.object.property("Name")
    }

    pub fn mute(&self) -> Result<bool, SessiondError> {
        self.object.property("Mute")
    }

    pub fn volume(&self) -> Result<f64, SessiondError> {
        self.object.property("Volume")
    }

    /// Register a callback to run when the mute state changes.
    pub fn on_change_mute<F: FnMut(bool) + Send + 'static>(
        &self,
        mut cb: F,
    ) -> Result<(), SessiondError> {
        self.object
            .watch(move |s: OrgSessiondSession1AudioSinkChangeMute| cb(s.mute))
    }

    /// Register a callback to run when the volume changes.
    pub fn on_change_volume<F: FnMut(f64) + Send + 'static>(
        &self,
        mut cb: F,
    ) -> Result<(), SessiondError> {
        self.object
            .watch(move |s: OrgSessiondSession1AudioSinkChangeVolume| cb(s.volume))
    }
}

impl<'a> ObjectProxy for AudioSink<'a> {
    fn object(&self) -> &RemoteObject<'_> {
        &self.object
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn path_is_derived_from_id() {
        assert_eq!(audiosink_path("sink1"), "/org/sessiond/session1/audiosink/sink1");
        assert_eq!(audiosink_path(48u32), "/org/sessiond/session1/audiosink/48");
    }
}
