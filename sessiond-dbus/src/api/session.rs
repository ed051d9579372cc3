use dbus::Path;

const INTERFACE: &str = "org.sessiond.session1.Session";

signal!(
    /// The session was locked
    OrgSessiondSession1SessionLock, INTERFACE, "Lock" {}
);

signal!(
    /// The session was unlocked
    OrgSessiondSession1SessionUnlock, INTERFACE, "Unlock" {}
);

signal!(
    /// The session became idle
    OrgSessiondSession1SessionIdle, INTERFACE, "Idle" {}
);

signal!(
    /// The session became active after being idle
    OrgSessiondSession1SessionActive, INTERFACE, "Active" {}
);

signal!(
    /// The session has been inactive for `seconds`
    OrgSessiondSession1SessionInactive, INTERFACE, "Inactive" { seconds: u32 }
);

signal!(OrgSessiondSession1SessionPrepareForSleep, INTERFACE, "PrepareForSleep" { state: bool });

signal!(OrgSessiondSession1SessionPrepareForShutdown, INTERFACE, "PrepareForShutdown" { state: bool });

signal!(OrgSessiondSession1SessionAddBacklight, INTERFACE, "AddBacklight" { path: Path<'static> });

signal!(OrgSessiondSession1SessionRemoveBacklight, INTERFACE, "RemoveBacklight" { path: Path<'static> });

signal!(OrgSessiondSession1SessionAddAudioSink, INTERFACE, "AddAudioSink" { path: Path<'static> });

signal!(OrgSessiondSession1SessionRemoveAudioSink, INTERFACE, "RemoveAudioSink" { path: Path<'static> });

signal!(
    OrgSessiondSession1SessionChangeDefaultAudioSink, INTERFACE, "ChangeDefaultAudioSink" { path: Path<'static> }
);
