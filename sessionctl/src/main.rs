use std::path::PathBuf;
use std::process;

use anyhow::{Context, Result as AnyResult};
use dbus::blocking::Connection;
use env_logger::Env;
use structopt::StructOpt;

use sessiond_dbus::Sessiond;

use crate::config::Config;

mod commands;
mod config;
mod inhibit;

/// Control a running sessiond session
#[derive(Debug, StructOpt)]
#[structopt(name = "sessionctl")]
struct Opt {
    /// Config file to use instead of $XDG_CONFIG_HOME/sessionctl/config.toml
    #[structopt(long, parse(from_os_str))]
    config: Option<PathBuf>,

    #[structopt(subcommand)]
    command: Cmd,
}

#[derive(Debug, StructOpt, PartialEq)]
enum Cmd {
    /// Show session status
    Status,

    /// Show all D-Bus properties of the session, a backlight or an audio sink
    Properties {
        /// Show the properties of this backlight
        #[structopt(long, conflicts_with = "audiosink")]
        backlight: Option<String>,

        /// Show the properties of this audio sink
        #[structopt(long)]
        audiosink: Option<String>,
    },

    /// Lock the session
    Lock,

    /// Unlock the session
    Unlock,

    /// Add an inhibitor, or run a command while inhibited
    Inhibit {
        /// Who is inhibiting (defaults to the configured `who`)
        #[structopt(long, short)]
        who: Option<String>,

        /// Why the session is inhibited (defaults to the command line)
        #[structopt(long, short = "y")]
        why: Option<String>,

        /// Command to run; the inhibitor is removed when it exits
        command: Vec<String>,
    },

    /// Remove an inhibitor
    Uninhibit { id: String },

    /// Stop all running inhibitors
    StopInhibitors,

    /// List running inhibitors
    ListInhibitors,

    /// Show or change a backlight's brightness
    Backlight {
        /// Backlight name (defaults to the configured backlight, then the first one)
        name: Option<String>,

        /// Set the brightness
        #[structopt(long, short, conflicts_with = "inc")]
        set: Option<u32>,

        /// Change the brightness by this amount
        #[structopt(long, short, allow_hyphen_values = true)]
        inc: Option<i32>,
    },

    /// Show or change an audio sink's volume and mute state
    Audiosink {
        /// Audio sink ID (defaults to the configured sink, then sessiond's default sink)
        id: Option<String>,

        /// Set the volume
        #[structopt(long, short, conflicts_with = "inc")]
        set: Option<f64>,

        /// Change the volume by this amount
        #[structopt(long, short, allow_hyphen_values = true)]
        inc: Option<f64>,

        /// Set the mute state (on or off)
        #[structopt(long, short, parse(try_from_str = parse_switch), conflicts_with = "toggle-mute")]
        mute: Option<bool>,

        /// Toggle the mute state
        #[structopt(long, short)]
        toggle_mute: bool,
    },

    /// Print session events as they happen
    Monitor,

    /// Show sessiond's version
    Version,
}

fn parse_switch(s: &str) -> Result<bool, String> {
    match s {
        "on" | "true" | "yes" => Ok(true),
        "off" | "false" | "no" => Ok(false),
        _ => Err(format!("expected on or off, got {}", s)),
    }
}

/// Runs the command, returning the exit code to use.
fn run(opt: Opt) -> AnyResult<i32> {
    let config = Config::load(opt.config.as_deref())?;
    let conn = Connection::new_session().context("Could not connect to D-Bus session bus")?;
    let sessiond = Sessiond::with_timeout(&conn, config.timeout());

    match opt.command {
        Cmd::Status => commands::status(&sessiond)?,
        Cmd::Properties {
            backlight,
            audiosink,
        } => commands::properties(&sessiond, backlight.as_deref(), audiosink.as_deref())?,
        Cmd::Lock => sessiond.session().lock().context("Could not lock session")?,
        Cmd::Unlock => sessiond
            .session()
            .unlock()
            .context("Could not unlock session")?,
        Cmd::Inhibit { who, why, command } => {
            let who = who.unwrap_or_else(|| config.who.clone());
            return inhibit::inhibit(&sessiond.session(), &who, why, &command);
        }
        Cmd::Uninhibit { id } => commands::uninhibit(&sessiond, &id)?,
        Cmd::StopInhibitors => commands::stop_inhibitors(&sessiond)?,
        Cmd::ListInhibitors => commands::list_inhibitors(&sessiond)?,
        Cmd::Backlight { name, set, inc } => {
            let name = name.or_else(|| config.backlight.clone());
            commands::backlight(&sessiond, name.as_deref(), set, inc)?
        }
        Cmd::Audiosink {
            id,
            set,
            inc,
            mute,
            toggle_mute,
        } => {
            let id = id.or_else(|| config.audiosink.clone());
            let change = commands::AudioChange {
                set,
                inc,
                mute,
                toggle_mute,
            };
            commands::audiosink(&sessiond, id.as_deref(), &change)?
        }
        Cmd::Monitor => commands::monitor(&sessiond)?,
        Cmd::Version => println!(
            "{}",
            sessiond
                .session()
                .version()
                .context("Could not read sessiond version")?
        ),
    }

    Ok(0)
}

fn main() {
    let env = Env::new()
        .filter_or("SESSIONCTL_LOG", "warn")
        .write_style("SESSIONCTL_LOG_STYLE");
    env_logger::init_from_env(env);

    let opt = Opt::from_args();
    match run(opt) {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("Error: {:#}", e);
            process::exit(1);
        }
    }
}
