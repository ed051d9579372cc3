use std::collections::HashMap;
use std::time::Duration;

use dbus::blocking::Connection;
use dbus::Path;
use log::debug;

use crate::api::session::{
    OrgSessiondSession1SessionActive, OrgSessiondSession1SessionAddAudioSink,
    OrgSessiondSession1SessionAddBacklight, OrgSessiondSession1SessionChangeDefaultAudioSink,
    OrgSessiondSession1SessionIdle, OrgSessiondSession1SessionInactive,
    OrgSessiondSession1SessionLock, OrgSessiondSession1SessionPrepareForShutdown,
    OrgSessiondSession1SessionPrepareForSleep, OrgSessiondSession1SessionRemoveAudioSink,
    OrgSessiondSession1SessionRemoveBacklight, OrgSessiondSession1SessionUnlock,
};
use crate::error::SessiondError;
use crate::inhibitor::{Inhibitor, InhibitorId};
use crate::object::{ObjectProxy, RemoteObject};
use crate::{DEFAULT_TIMEOUT, SESSION_PATH};

/// Handle to the sessiond session
pub struct Session<'a> {
    object: RemoteObject<'a>,
}

impl<'a> Session<'a> {
    pub fn new(conn: &'a Connection) -> Session<'a> {
        Session::with_timeout(conn, DEFAULT_TIMEOUT)
    }

    pub fn with_timeout(conn: &'a Connection, timeout: Duration) -> Session<'a> {
        Session {
            object: RemoteObject::from_path(conn, Path::from(SESSION_PATH), "Session", timeout),
        }
    }

    /// Adds an inhibitor, returning its ID. `who` and `why` may be empty.
    pub fn inhibit(&self, who: &str, why: &str) -> Result<InhibitorId, SessiondError> {
        let (id,): (String,) = self.object.call("Inhibit", (who, why))?;
        debug!("Added inhibitor {} (who: {:?}, why: {:?})", id, who, why);
        Ok(InhibitorId::new(id))
    }

    /// Removes an inhibitor. Fails if the ID is unknown or was already removed.
    pub fn uninhibit(&self, id: &InhibitorId) -> Result<(), SessiondError> {
        let () = self.object.call("Uninhibit", (id.as_str(),))?;
        debug!("Removed inhibitor {}", id);
        Ok(())
    }

    /// Stops every running inhibitor, returning how many were stopped.
    pub fn stop_inhibitors(&self) -> Result<u32, SessiondError> {
        let (count,): (u32,) = self.object.call("StopInhibitors", ())?;
        debug!("Stopped {} inhibitors", count);
        Ok(count)
    }

    /// Lists running inhibitors by ID.
    pub fn list_inhibitors(&self) -> Result<HashMap<InhibitorId, Inhibitor>, SessiondError> {
        let (inhibitors,): (HashMap<String, (u64, String, String)>,) =
            self.object.call("ListInhibitors", ())?;
        Ok(inhibitors
            .into_iter()
            .map(|(id, entry)| (InhibitorId::new(id), Inhibitor::from(entry)))
            .collect())
    }

    /// Locks the session. Fails if the session is already locked.
    pub fn lock(&self) -> Result<(), SessiondError> {
        let () = self.object.call("Lock", ())?;
        debug!("Locked session");
        Ok(())
    }

    /// Unlocks the session.
    pub fn unlock(&self) -> Result<(), SessiondError> {
        let () = self.object.call("Unlock", ())?;
        debug!("Unlocked session");
        Ok(())
    }

    /// Object paths of the session's backlights.
    pub fn backlights(&self) -> Result<Vec<String>, SessiondError> {
        self.object.property("Backlights")
    }

    /// Object paths of the session's audio sinks. Empty if the daemon has no audio sink support.
    pub fn audiosinks(&self) -> Result<Vec<String>, SessiondError> {
        Ok(self
            .object
            .optional_property("AudioSinks")?
            .unwrap_or_default())
    }

    /// Object path of the default audio sink, if the daemon has audio sink support.
    pub fn default_audiosink(&self) -> Result<Option<String>, SessiondError> {
        self.object.optional_property("DefaultAudioSink")
    }

    pub fn idle_hint(&self) -> Result<bool, SessiondError> {
        self.object.property("IdleHint")
    }

    pub fn inhibited_hint(&self) -> Result<bool, SessiondError> {
        self.object.property("InhibitedHint")
    }

    pub fn locked_hint(&self) -> Result<bool, SessiondError> {
        self.object.property("LockedHint")
    }

    /// Timestamp of the last change to the idle hint.
    pub fn idle_since_hint(&self) -> Result<u64, SessiondError> {
        self.object.property("IdleSinceHint")
    }

    /// Timestamp of the last change to the idle hint, in monotonic time.
    pub fn idle_since_hint_monotonic(&self) -> Result<u64, SessiondError> {
        self.object.property("IdleSinceHintMonotonic")
    }

    /// The daemon's version string.
    pub fn version(&self) -> Result<String, SessiondError> {
        self.object.property("Version")
    }

    /// Register a callback to run when the session is locked.
    pub fn on_lock<F: FnMut() + Send + 'static>(&self, mut cb: F) -> Result<(), SessiondError> {
        self.object
            .watch(move |_: OrgSessiondSession1SessionLock| cb())
    }

    /// Register a callback to run when the session is unlocked.
    pub fn on_unlock<F: FnMut() + Send + 'static>(&self, mut cb: F) -> Result<(), SessiondError> {
        self.object
            .watch(move |_: OrgSessiondSession1SessionUnlock| cb())
    }

    /// Register a callback to run when the session becomes idle.
    pub fn on_idle<F: FnMut() + Send + 'static>(&self, mut cb: F) -> Result<(), SessiondError> {
        self.object
            .watch(move |_: OrgSessiondSession1SessionIdle| cb())
    }

    /// Register a callback to run when the session becomes active again.
    pub fn on_active<F: FnMut() + Send + 'static>(&self, mut cb: F) -> Result<(), SessiondError> {
        self.object
            .watch(move |_: OrgSessiondSession1SessionActive| cb())
    }

    /// Register a callback to run each time an inactivity timeout elapses. The callback receives
    /// the number of seconds the session has been inactive.
    pub fn on_inactive<F: FnMut(u32) + Send + 'static>(
        &self,
        mut cb: F,
    ) -> Result<(), SessiondError> {
        self.object
            .watch(move |s: OrgSessiondSession1SessionInactive| cb(s.seconds))
    }

    /// Register a callback to run before (`true`) and after (`false`) the system sleeps.
    pub fn on_prepare_for_sleep<F: FnMut(bool) + Send + 'static>(
        &self,
        mut cb: F,
    ) -> Result<(), SessiondError> {
        self.object
            .watch(move |s: OrgSessiondSession1SessionPrepareForSleep| cb(s.state))
    }

    /// Register a callback to run before (`true`) and after (`false`) the system shuts down.
    pub fn on_prepare_for_shutdown<F: FnMut(bool) + Send + 'static>(
        &self,
        mut cb: F,
    ) -> Result<(), SessiondError> {
        self.object
            .watch(move |s: OrgSessiondSession1SessionPrepareForShutdown| cb(s.state))
    }

    pub fn on_add_backlight<F: FnMut(String) + Send + 'static>(
        &self,
        mut cb: F,
    ) -> Result<(), SessiondError> {
        self.object
            .watch(move |s: OrgSessiondSession1SessionAddBacklight| cb(s.path.to_string()))
    }

    pub fn on_remove_backlight<F: FnMut(String) + Send + 'static>(
        &self,
        mut cb: F,
    ) -> Result<(), SessiondError> {
        self.object
            .watch(move |s: OrgSessiondSession1SessionRemoveBacklight| cb(s.path.to_string()))
    }

    pub fn on_add_audiosink<F: FnMut(String) + Send + 'static>(
        &self,
        mut cb: F,
    ) -> Result<(), SessiondError> {
        self.object
            .watch(move |s: OrgSessiondSession1SessionAddAudioSink| cb(s.path.to_string()))
    }

    pub fn on_remove_audiosink<F: FnMut(String) + Send + 'static>(
        &self,
        mut cb: F,
    ) -> Result<(), SessiondError> {
        self.object
            .watch(move |s: OrgSessiondSession1SessionRemoveAudioSink| cb(s.path.to_string()))
    }

    pub fn on_change_default_audiosink<F: FnMut(String) + Send + 'static>(
        &self,
        mut cb: F,
    ) -> Result<(), SessiondError> {
        self.object.watch(move |s: OrgSessiondSession1SessionChangeDefaultAudioSink| {
            cb(s.path.to_string())
        })
    }
}

impl<'a> ObjectProxy for Session<'a> {
    fn object(&self) -> &RemoteObject<'_> {
        &self.object
    }
}
