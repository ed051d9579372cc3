//! A private bus with a mock sessiond daemon, for exercising the bindings end to end.
#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::mpsc;
use std::thread;
use std::time::{Duration, Instant, SystemTime, UNIX_EPOCH};

use dbus::blocking::Connection;
use dbus::channel::{Channel, Sender};
use dbus::{Message, Path};
use dbus_crossroads::{Crossroads, IfaceBuilder, MethodErr};
use dbus_launch::{Daemon, Launcher};

use sessiond_dbus::{audiosink_path, backlight_path, SERVICE_NAME, SESSION_PATH};

pub const VERSION: &str = "0.6.1";
pub const IDLE_SINCE: u64 = 1_600_000_000_000_000;
pub const IDLE_SINCE_MONOTONIC: u64 = 3_600_000_000;

/// Starts a test bus with a mock daemon, or returns early from the test if `dbus-daemon` is not
/// installed.
macro_rules! mock_bus {
    () => {
        mock_bus!(common::Features::default())
    };
    ($features:expr) => {
        match common::MockBus::start($features) {
            Some(bus) => bus,
            None => return,
        }
    };
}

#[derive(Clone, Copy)]
pub struct Features {
    /// Export audio sinks and the related session properties
    pub audio: bool,
}

impl Default for Features {
    fn default() -> Features {
        Features { audio: true }
    }
}

impl Features {
    pub fn without_audio() -> Features {
        Features { audio: false }
    }
}

pub struct MockBus {
    daemon: Daemon,
}

impl MockBus {
    pub fn start(features: Features) -> Option<MockBus> {
        let daemon = match Launcher::daemon().launch() {
            Ok(daemon) => daemon,
            Err(e) => {
                eprintln!("skipping test, could not launch dbus-daemon: {}", e);
                return None;
            }
        };

        let address = daemon.address().to_string();
        let (ready_tx, ready_rx) = mpsc::channel();
        thread::spawn(move || {
            let conn = connect(&address);
            let cr = mock_daemon(&conn, features);
            ready_tx.send(()).unwrap();
            // Fails once the bus goes away at the end of the test
            let _ = cr.serve(&conn);
        });
        ready_rx
            .recv_timeout(Duration::from_secs(10))
            .expect("mock daemon did not start");

        Some(MockBus { daemon })
    }

    /// Opens a new client connection to the test bus.
    pub fn connect(&self) -> Connection {
        connect(self.daemon.address())
    }

    /// Address of the test bus, for handing to child processes.
    pub fn address(&self) -> &str {
        self.daemon.address()
    }

    /// Broadcasts a session signal from its own connection, the way the daemon announces events
    /// the mock does not model.
    pub fn emit_session_signal<F>(&self, member: &str, append: F)
    where
        F: FnOnce(Message) -> Message,
    {
        let signal = Message::new_signal(SESSION_PATH, "org.sessiond.session1.Session", member)
            .expect("invalid signal");
        let conn = self.connect();
        conn.send(append(signal)).expect("could not send signal");
        conn.channel().flush();
    }
}

fn connect(address: &str) -> Connection {
    let mut channel = Channel::open_private(address).expect("could not connect to test bus");
    channel.register().expect("could not register on test bus");
    Connection::from(channel)
}

/// Dispatches incoming messages until `done` returns true, panicking after a few seconds.
pub fn process_until<F: Fn() -> bool>(conn: &Connection, done: F) {
    let deadline = Instant::now() + Duration::from_secs(5);
    while !done() {
        assert!(Instant::now() < deadline, "timed out waiting for signal");
        conn.process(Duration::from_millis(100))
            .expect("could not process messages");
    }
}

#[derive(Default)]
struct MockSession {
    locked: bool,
    inhibitors: HashMap<String, (u64, String, String)>,
    next_id: u64,
}

struct MockBacklight {
    name: String,
    brightness: u32,
    max_brightness: u32,
}

impl MockBacklight {
    fn new(name: &str, brightness: u32, max_brightness: u32) -> MockBacklight {
        MockBacklight {
            name: name.to_string(),
            brightness,
            max_brightness,
        }
    }
}

struct MockAudioSink {
    id: u32,
    name: String,
    mute: bool,
    volume: f64,
}

fn now() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_micros() as u64)
        .unwrap_or(0)
}

fn error(name: &'static str, message: &str) -> MethodErr {
    MethodErr::from((name, message.to_string()))
}

fn mock_daemon(conn: &Connection, features: Features) -> Crossroads {
    conn.request_name(SERVICE_NAME, false, true, false)
        .expect("could not acquire sessiond name");

    let backlights = vec![
        MockBacklight::new("intel_backlight", 937, 1200),
        MockBacklight::new("panel0", 40, 100),
    ];
    let sinks = if features.audio {
        vec![
            MockAudioSink {
                id: 48,
                name: "Built-in Audio Analog Stereo".to_string(),
                mute: false,
                volume: 0.5,
            },
            MockAudioSink {
                id: 52,
                name: "USB Headset".to_string(),
                mute: true,
                volume: 0.25,
            },
        ]
    } else {
        Vec::new()
    };

    let backlight_paths: Vec<Path<'static>> = backlights
        .iter()
        .map(|bl| Path::from(backlight_path(&bl.name)))
        .collect();
    let sink_paths: Vec<Path<'static>> = sinks
        .iter()
        .map(|sink| Path::from(audiosink_path(sink.id)))
        .collect();
    let default_sink = Path::from(audiosink_path(48));

    let mut cr = Crossroads::new();

    let session = cr.register(
        "org.sessiond.session1.Session",
        move |b: &mut IfaceBuilder<MockSession>| {
            b.property::<Vec<Path<'static>>, _>("Backlights")
                .get(move |_, _| Ok(backlight_paths.clone()));
            if features.audio {
                b.property::<Vec<Path<'static>>, _>("AudioSinks")
                    .get(move |_, _| Ok(sink_paths.clone()));
                b.property::<Path<'static>, _>("DefaultAudioSink")
                    .get(move |_, _| Ok(default_sink.clone()));
            }
            b.property::<bool, _>("IdleHint").get(|_, _| Ok(false));
            b.property::<bool, _>("InhibitedHint")
                .get(|_, s| Ok(!s.inhibitors.is_empty()));
            b.property::<bool, _>("LockedHint").get(|_, s| Ok(s.locked));
            b.property::<u64, _>("IdleSinceHint").get(|_, _| Ok(IDLE_SINCE));
            b.property::<u64, _>("IdleSinceHintMonotonic")
                .get(|_, _| Ok(IDLE_SINCE_MONOTONIC));
            b.property::<String, _>("Version").get(|_, _| Ok(VERSION.to_string()));

            b.signal::<(), _>("Lock", ());
            b.signal::<(), _>("Unlock", ());

            b.method(
                "Inhibit",
                ("who", "why"),
                ("id",),
                |_, s, (who, why): (String, String)| {
                    s.next_id += 1;
                    let id = format!("inhibitor-{}", s.next_id);
                    s.inhibitors.insert(id.clone(), (now(), who, why));
                    Ok((id,))
                },
            );
            b.method("Uninhibit", ("id",), (), |_, s, (id,): (String,)| {
                match s.inhibitors.remove(&id) {
                    Some(_) => Ok(()),
                    None => Err(error(
                        "org.sessiond.session1.Error.Uninhibit",
                        &format!("Inhibitor {} does not exist", id),
                    )),
                }
            });
            b.method("StopInhibitors", (), ("num",), |_, s, ()| {
                let num = s.inhibitors.len() as u32;
                s.inhibitors.clear();
                Ok((num,))
            });
            b.method("ListInhibitors", (), ("inhibitors",), |_, s, ()| {
                Ok((s.inhibitors.clone(),))
            });
            b.method("Lock", (), (), |ctx, s, ()| {
                if s.locked {
                    return Err(error(
                        "org.sessiond.session1.Error.Lock",
                        "Session is already locked",
                    ));
                }
                s.locked = true;
                let signal = ctx.make_signal("Lock", ());
                ctx.push_msg(signal);
                Ok(())
            });
            b.method("Unlock", (), (), |ctx, s, ()| {
                s.locked = false;
                let signal = ctx.make_signal("Unlock", ());
                ctx.push_msg(signal);
                Ok(())
            });
        },
    );
    cr.insert(SESSION_PATH, &[session], MockSession::default());

    let backlight = cr.register(
        "org.sessiond.session1.Backlight",
        |b: &mut IfaceBuilder<MockBacklight>| {
            b.property::<String, _>("Name").get(|_, bl| Ok(bl.name.clone()));
            b.property::<bool, _>("Online").get(|_, _| Ok(true));
            b.property::<String, _>("Subsystem")
                .get(|_, _| Ok("backlight".to_string()));
            b.property::<String, _>("SysPath")
                .get(|_, bl| Ok(format!("/sys/devices/pci0000:00/backlight/{}", bl.name)));
            b.property::<String, _>("DevPath")
                .get(|_, bl| Ok(format!("/devices/pci0000:00/backlight/{}", bl.name)));
            b.property::<u32, _>("MaxBrightness")
                .get(|_, bl| Ok(bl.max_brightness));
            b.property::<u32, _>("Brightness").get(|_, bl| Ok(bl.brightness));

            b.method("SetBrightness", ("value",), (), |_, bl, (v,): (u32,)| {
                if v > bl.max_brightness {
                    return Err(error(
                        "org.sessiond.session1.Backlight.Error.SetBrightness",
                        "Failed to set brightness",
                    ));
                }
                bl.brightness = v;
                Ok(())
            });
            b.method(
                "IncBrightness",
                ("value",),
                ("brightness",),
                |_, bl, (v,): (i32,)| {
                    let target = (i64::from(bl.brightness) + i64::from(v)).max(0);
                    if target > i64::from(bl.max_brightness) {
                        return Err(error(
                            "org.sessiond.session1.Backlight.Error.IncBrightness",
                            "Failed to increment brightness",
                        ));
                    }
                    bl.brightness = target as u32;
                    Ok((bl.brightness,))
                },
            );
        },
    );
    for bl in backlights {
        cr.insert(backlight_path(&bl.name), &[backlight], bl);
    }

    let audiosink = cr.register(
        "org.sessiond.session1.AudioSink",
        |b: &mut IfaceBuilder<MockAudioSink>| {
            b.property::<u32, _>("Id").get(|_, sink| Ok(sink.id));
            b.property::<String, _>("Name").get(|_, sink| Ok(sink.name.clone()));
            b.property::<bool, _>("Mute").get(|_, sink| Ok(sink.mute));
            b.property::<f64, _>("Volume").get(|_, sink| Ok(sink.volume));

            b.signal::<(bool,), _>("ChangeMute", ("mute",));
            b.signal::<(f64,), _>("ChangeVolume", ("volume",));

            b.method("SetVolume", ("value",), (), |ctx, sink, (v,): (f64,)| {
                sink.volume = v;
                let signal = ctx.make_signal("ChangeVolume", (v,));
                ctx.push_msg(signal);
                Ok(())
            });
            b.method("IncVolume", ("value",), ("volume",), |ctx, sink, (v,): (f64,)| {
                sink.volume = (sink.volume + v).max(0.0).min(1.0);
                let signal = ctx.make_signal("ChangeVolume", (sink.volume,));
                ctx.push_msg(signal);
                Ok((sink.volume,))
            });
            b.method("SetMute", ("mute",), (), |ctx, sink, (m,): (bool,)| {
                sink.mute = m;
                let signal = ctx.make_signal("ChangeMute", (m,));
                ctx.push_msg(signal);
                Ok(())
            });
            b.method("ToggleMute", (), ("mute",), |ctx, sink, ()| {
                sink.mute = !sink.mute;
                let signal = ctx.make_signal("ChangeMute", (sink.mute,));
                ctx.push_msg(signal);
                Ok((sink.mute,))
            });
        },
    );
    for sink in sinks {
        cr.insert(audiosink_path(sink.id), &[audiosink], sink);
    }

    cr
}
