//! airlock-sim: console host for the airlock controller.
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │                 Adapters (outer ring)                    │
//! │                                                          │
//! │   SimGrid (BlockInventory + simulated blocks)            │
//! │   LogEventSink (EventSink)        stdin console          │
//! │                                                          │
//! │   ─────────────── Port Trait Boundary ───────────────    │
//! │                                                          │
//! │   ┌──────────────────────────────────────────────────┐   │
//! │   │          CoreSystem (pure logic)                 │   │
//! │   │   Airlock × zones · CycleFsm · DoorGroup         │   │
//! │   └──────────────────────────────────────────────────┘   │
//! └──────────────────────────────────────────────────────────┘
//! ```
//!
//! Usage: `airlock-sim [CONFIG]`.  Log level follows `RUST_LOG`
//! (default `info`).
#![deny(unused_must_use)]

use std::io::{self, BufRead, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::Parser;
use log::{info, warn};

use airlock::adapters::log_sink::LogEventSink;
use airlock::adapters::sim::SimGrid;
use airlock::app::commands::UpdateSource;
use airlock::app::service::CoreSystem;
use airlock::config::SystemConfig;
use airlock::fsm::Side;

// ── Command line ──────────────────────────────────────────────

#[derive(Parser, Debug)]
#[command(name = "airlock-sim", version)]
#[command(about = "Console simulator for the airlock controller")]
struct Args {
    /// JSON configuration file; defaults apply when omitted
    config: Option<PathBuf>,
}

// ── Console commands ──────────────────────────────────────────

#[derive(Debug, PartialEq)]
enum ConsoleCommand {
    Tick(u32),
    Trigger(String),
    Oxygen { block: String, ratio: f32 },
    Presence { block: String, present: bool },
    Status,
    Blocks(String),
    Quit,
}

impl ConsoleCommand {
    fn parse(line: &str) -> Result<Self> {
        let line = line.trim();
        let (word, rest) = line.split_once(char::is_whitespace).unwrap_or((line, ""));
        let rest = rest.trim();
        match word.to_lowercase().as_str() {
            "tick" if rest.is_empty() => Ok(Self::Tick(1)),
            "tick" => Ok(Self::Tick(
                rest.parse().with_context(|| format!("bad tick count '{rest}'"))?,
            )),
            "trigger" if !rest.is_empty() => Ok(Self::Trigger(rest.to_string())),
            "oxygen" => {
                let (block, ratio) = split_last(rest)?;
                let ratio = ratio
                    .parse()
                    .with_context(|| format!("bad oxygen ratio '{ratio}'"))?;
                Ok(Self::Oxygen { block, ratio })
            }
            "presence" => {
                let (block, flag) = split_last(rest)?;
                let present = match flag.to_lowercase().as_str() {
                    "on" => true,
                    "off" => false,
                    other => bail!("expected on|off, got '{other}'"),
                };
                Ok(Self::Presence { block, present })
            }
            "status" => Ok(Self::Status),
            "blocks" if !rest.is_empty() => Ok(Self::Blocks(rest.to_string())),
            "quit" | "exit" => Ok(Self::Quit),
            _ => bail!("unknown command '{line}'"),
        }
    }
}

/// Split `"<name with spaces> <value>"` at the last word.
fn split_last(rest: &str) -> Result<(String, &str)> {
    match rest.rsplit_once(char::is_whitespace) {
        Some((name, value)) if !name.trim().is_empty() => Ok((name.trim().to_string(), value)),
        _ => bail!("expected '<block name> <value>'"),
    }
}

// ── Main ──────────────────────────────────────────────────────

fn load_config(path: Option<&Path>) -> Result<SystemConfig> {
    match path {
        Some(path) => {
            let text = std::fs::read_to_string(path)
                .with_context(|| format!("reading config '{}'", path.display()))?;
            let config = SystemConfig::from_json(&text)
                .with_context(|| format!("loading config '{}'", path.display()))?;
            info!("Config loaded from {}", path.display());
            Ok(config)
        }
        None => {
            info!("No config given, using defaults");
            Ok(SystemConfig::default())
        }
    }
}

fn main() -> Result<()> {
    let args = Args::parse();
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    info!("airlock-sim v{}", env!("CARGO_PKG_VERSION"));

    // ── 1. Config ─────────────────────────────────────────────
    let config = load_config(args.config.as_deref())?;
    let source = UpdateSource::from(config.update_frequency);

    // ── 2. Simulated grid ─────────────────────────────────────
    let mut grid = SimGrid::new();
    for zone in &config.zones {
        grid.add_standard_zone(zone);
    }

    // ── 3. Core system ────────────────────────────────────────
    let mut sink = LogEventSink::new();
    let mut core = CoreSystem::new(&mut grid, config).context("building core system")?;
    core.start(&mut sink);

    // ── 4. Console loop ───────────────────────────────────────
    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        write!(stdout, "> ")?;
        stdout.flush()?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }
        if line.trim().is_empty() {
            continue;
        }

        let cmd = match ConsoleCommand::parse(&line) {
            Ok(cmd) => cmd,
            Err(e) => {
                println!("{e:#}");
                continue;
            }
        };

        match cmd {
            ConsoleCommand::Tick(n) => {
                for _ in 0..n {
                    core.run("", source, &mut sink)?;
                    grid.advance();
                }
                println!("tick {}", core.tick_count());
            }
            ConsoleCommand::Trigger(arg) => match core.run(&arg, UpdateSource::Trigger, &mut sink) {
                Ok(Some(outcome)) => println!("{outcome:?}"),
                Ok(None) => {}
                Err(e) => warn!("trigger rejected: {}", e),
            },
            ConsoleCommand::Oxygen { block, ratio } => match grid.vent(&block) {
                Some(vent) => vent.set_oxygen(ratio),
                None => println!("no vent named '{block}'"),
            },
            ConsoleCommand::Presence { block, present } => match grid.sensor(&block) {
                Some(sensor) => sensor.set_presence(present),
                None => println!("no sensor named '{block}'"),
            },
            ConsoleCommand::Status => {
                for zone in core.zones() {
                    println!(
                        "[{}] state={} doors: external={:?} internal={:?}",
                        zone.name(),
                        zone.state().name(),
                        zone.doors(Side::External).aggregate_status(),
                        zone.doors(Side::Internal).aggregate_status(),
                    );
                    println!("{}", zone.status_payload());
                }
            }
            ConsoleCommand::Blocks(name) => match core.zone(&name) {
                Some(zone) => println!("{zone}"),
                None => println!("no zone named '{name}'"),
            },
            ConsoleCommand::Quit => break,
        }
    }

    info!("airlock-sim stopped after {} ticks", core.tick_count());
    Ok(())
}
