//! Implementations of the sessionctl subcommands that talk to sessiond directly.

use std::collections::BTreeMap;
use std::time::Duration;

use anyhow::{anyhow, bail, Context, Result as AnyResult};
use log::debug;

use sessiond_dbus::{AudioSink, Backlight, InhibitorId, ObjectProxy, Sessiond, Value};

fn yes_no(b: bool) -> &'static str {
    if b {
        "yes"
    } else {
        "no"
    }
}

pub fn status(sessiond: &Sessiond) -> AnyResult<()> {
    let session = sessiond.session();
    let version = session.version().context("Could not read sessiond version")?;
    let locked = session.locked_hint().context("Could not read lock state")?;
    let idle = session.idle_hint().context("Could not read idle state")?;
    let idle_since = session
        .idle_since_hint()
        .context("Could not read idle timestamp")?;
    let idle_since_monotonic = session
        .idle_since_hint_monotonic()
        .context("Could not read monotonic idle timestamp")?;
    let inhibited = session
        .inhibited_hint()
        .context("Could not read inhibited state")?;
    let inhibitors = session
        .list_inhibitors()
        .context("Could not list inhibitors")?;

    println!("sessiond {}", version);
    println!("  Locked: {}", yes_no(locked));
    println!(
        "  Idle: {} (since {}, monotonic {})",
        yes_no(idle),
        idle_since,
        idle_since_monotonic
    );
    println!(
        "  Inhibited: {} ({} inhibitors)",
        yes_no(inhibited),
        inhibitors.len()
    );

    let backlights = sessiond.backlights().context("Could not list backlights")?;
    println!("  Backlights: {}", backlights.len());
    for backlight in &backlights {
        let context = || format!("Could not read brightness of {}", backlight.name());
        println!(
            "    {}: {}/{}",
            backlight.name(),
            backlight.brightness().with_context(context)?,
            backlight.max_brightness().with_context(context)?
        );
    }

    let sinks = sessiond.audiosinks().context("Could not list audio sinks")?;
    if !sinks.is_empty() {
        let default = session
            .default_audiosink()
            .context("Could not read default audio sink")?;
        println!("  Audio sinks: {}", sinks.len());
        for sink in &sinks {
            let context = || format!("Could not read audio sink {}", sink.path());
            let marker = if default.as_deref() == Some(sink.path()) {
                " (default)"
            } else {
                ""
            };
            println!(
                "    {} {}{}: volume {:.2}, muted {}",
                sink.id().with_context(context)?,
                sink.name().with_context(context)?,
                marker,
                sink.volume().with_context(context)?,
                yes_no(sink.mute().with_context(context)?)
            );
        }
    }

    Ok(())
}

pub fn properties(
    sessiond: &Sessiond,
    backlight: Option<&str>,
    audiosink: Option<&str>,
) -> AnyResult<()> {
    let props = match (backlight, audiosink) {
        (Some(name), _) => sessiond.backlight(name)?.get_properties(),
        (None, Some(id)) => sessiond.audiosink(id)?.get_properties(),
        (None, None) => sessiond.session().get_properties(),
    }
    .context("Could not read properties")?;

    // Sorted for stable output
    let props: BTreeMap<String, Value> = props.into_iter().collect();
    for (name, value) in props {
        println!("{}: {}", name, value);
    }
    Ok(())
}

pub fn uninhibit(sessiond: &Sessiond, id: &str) -> AnyResult<()> {
    sessiond
        .session()
        .uninhibit(&InhibitorId::from(id))
        .with_context(|| format!("Could not remove inhibitor {}", id))
}

pub fn stop_inhibitors(sessiond: &Sessiond) -> AnyResult<()> {
    let count = sessiond
        .session()
        .stop_inhibitors()
        .context("Could not stop inhibitors")?;
    println!("Stopped {} inhibitors", count);
    Ok(())
}

pub fn list_inhibitors(sessiond: &Sessiond) -> AnyResult<()> {
    let inhibitors = sessiond
        .session()
        .list_inhibitors()
        .context("Could not list inhibitors")?;

    let mut inhibitors: Vec<_> = inhibitors.into_iter().collect();
    inhibitors.sort_by_key(|(_, inhibitor)| inhibitor.created_at);
    for (id, inhibitor) in inhibitors {
        println!(
            "{} {} who={:?} why={:?}",
            id, inhibitor.created_at, inhibitor.who, inhibitor.why
        );
    }
    Ok(())
}

/// Picks the named backlight, or the first one sessiond knows about.
fn find_backlight<'a>(sessiond: &Sessiond<'a>, name: Option<&str>) -> AnyResult<Backlight<'a>> {
    match name {
        Some(name) => Ok(sessiond.backlight(name)?),
        None => sessiond
            .backlights()
            .context("Could not list backlights")?
            .into_iter()
            .next()
            .ok_or_else(|| anyhow!("No backlights found")),
    }
}

pub fn backlight(
    sessiond: &Sessiond,
    name: Option<&str>,
    set: Option<u32>,
    inc: Option<i32>,
) -> AnyResult<()> {
    let backlight = find_backlight(sessiond, name)?;
    debug!("Using backlight {}", backlight.path());

    let brightness = match (set, inc) {
        (Some(v), _) => {
            backlight
                .set_brightness(v)
                .with_context(|| format!("Could not set brightness of {}", backlight.name()))?;
            u64::from(v)
        }
        (None, Some(v)) => u64::from(
            backlight
                .inc_brightness(v)
                .with_context(|| format!("Could not change brightness of {}", backlight.name()))?,
        ),
        (None, None) => backlight
            .brightness()
            .with_context(|| format!("Could not read brightness of {}", backlight.name()))?,
    };
    println!("{}", brightness);
    Ok(())
}

/// Requested changes to an audio sink. Volume and mute changes may be combined.
#[derive(Debug, Default)]
pub struct AudioChange {
    pub set: Option<f64>,
    pub inc: Option<f64>,
    pub mute: Option<bool>,
    pub toggle_mute: bool,
}

/// Picks the given audio sink, or sessiond's default one.
fn find_audiosink<'a>(sessiond: &Sessiond<'a>, id: Option<&str>) -> AnyResult<AudioSink<'a>> {
    match id {
        Some(id) => Ok(sessiond.audiosink(id)?),
        None => sessiond
            .default_audiosink()
            .context("Could not find default audio sink")?
            .ok_or_else(|| anyhow!("sessiond has no default audio sink")),
    }
}

pub fn audiosink(sessiond: &Sessiond, id: Option<&str>, change: &AudioChange) -> AnyResult<()> {
    let sink = find_audiosink(sessiond, id)?;
    debug!("Using audio sink {}", sink.path());

    if change.set.is_some() && change.inc.is_some() {
        bail!("Cannot both set and change the volume");
    }

    let volume = match (change.set, change.inc) {
        (Some(v), _) => {
            sink.set_volume(v).context("Could not set volume")?;
            v
        }
        (None, Some(v)) => sink.inc_volume(v).context("Could not change volume")?,
        (None, None) => sink.volume().context("Could not read volume")?,
    };

    let mute = match (change.mute, change.toggle_mute) {
        (Some(m), _) => {
            sink.set_mute(m).context("Could not set mute state")?;
            m
        }
        (None, true) => sink.toggle_mute().context("Could not toggle mute state")?,
        (None, false) => sink.mute().context("Could not read mute state")?,
    };

    println!("volume {:.2}, muted {}", volume, yes_no(mute));
    Ok(())
}

pub fn monitor(sessiond: &Sessiond) -> AnyResult<()> {
    let session = sessiond.session();

    session.on_lock(|| println!("Lock"))?;
    session.on_unlock(|| println!("Unlock"))?;
    session.on_idle(|| println!("Idle"))?;
    session.on_active(|| println!("Active"))?;
    session.on_inactive(|seconds| println!("Inactive {}", seconds))?;
    session.on_prepare_for_sleep(|state| println!("PrepareForSleep {}", state))?;
    session.on_prepare_for_shutdown(|state| println!("PrepareForShutdown {}", state))?;
    session.on_add_backlight(|path| println!("AddBacklight {}", path))?;
    session.on_remove_backlight(|path| println!("RemoveBacklight {}", path))?;
    session.on_add_audiosink(|path| println!("AddAudioSink {}", path))?;
    session.on_remove_audiosink(|path| println!("RemoveAudioSink {}", path))?;
    session.on_change_default_audiosink(|path| println!("ChangeDefaultAudioSink {}", path))?;

    let conn = sessiond.connection();
    loop {
        conn.process(Duration::from_millis(1000))
            .context("Lost connection to D-Bus")?;
    }
}
