const INTERFACE: &str = "org.sessiond.session1.AudioSink";

signal!(OrgSessiondSession1AudioSinkChangeMute, INTERFACE, "ChangeMute" { mute: bool });

signal!(OrgSessiondSession1AudioSinkChangeVolume, INTERFACE, "ChangeVolume" { volume: f64 });
