//! Interactive timer runs.
//!
//! Each subcommand compiles its arguments into a [`RunPlan`], spawns the
//! timer service, and drives it from the terminal until the run finishes
//! or the user quits.

use std::error::Error;
use std::io::Write;
use std::sync::Arc;
use std::time::Duration;

use chrono::Local;
use clap::Args;
use tokio::io::{AsyncBufReadExt, BufReader};
use tokio::sync::broadcast::error::RecvError;
use tracing::warn;

use ringside_core::catalog;
use ringside_core::{
    parse_duration_secs, AlertService, Command, ConsoleAlerts, Event, IntervalConfig, IntervalStep,
    Phase, RunPlan, Settings, SilentAlerts, TimerConfig, TimerService, TimerSnapshot,
};

/// Options shared by every timer run.
#[derive(Args)]
pub struct RunOpts {
    /// Print snapshots and events as JSON lines instead of a countdown
    #[arg(long)]
    pub json: bool,

    /// Print the compiled segment plan as JSON and exit without running
    #[arg(long)]
    pub plan: bool,

    /// Do not ring the terminal bell when the run completes
    #[arg(long)]
    pub quiet: bool,

    /// Acknowledge the completion alert automatically and exit
    #[arg(long)]
    pub auto_ack: bool,

    /// Milliseconds per engine tick (1000 = real time)
    #[arg(long, default_value_t = 1000, hide = true)]
    pub tick_ms: u64,
}

#[derive(Args)]
pub struct StandardArgs {
    /// Countdown length (e.g. "90", "5:00", "1m30s")
    #[arg(long, default_value = "60")]
    pub duration: String,

    #[command(flatten)]
    pub opts: RunOpts,
}

#[derive(Args)]
pub struct RoundArgs {
    /// Length of one round
    #[arg(long, default_value = "3m")]
    pub duration: String,

    /// Number of rounds
    #[arg(long, default_value_t = 5)]
    pub rounds: u32,

    /// Rest between rounds
    #[arg(long, default_value = "1m")]
    pub rest: String,

    /// Run rounds back to back with no rest
    #[arg(long)]
    pub no_rest: bool,

    #[command(flatten)]
    pub opts: RunOpts,
}

#[derive(Args)]
pub struct IntervalArgs {
    /// Interval step as "label:duration" or "label:duration:rest"; repeatable
    #[arg(long = "step", required = true)]
    pub steps: Vec<String>,

    /// How many times to repeat the whole set
    #[arg(long, default_value_t = 1)]
    pub repeats: u32,

    #[command(flatten)]
    pub opts: RunOpts,
}

pub async fn standard(args: StandardArgs) -> Result<(), Box<dyn Error>> {
    let duration = parse_duration_secs(&args.duration)?;
    let plan = RunPlan::standard(duration)?;
    execute(plan, args.opts).await
}

pub async fn round(args: RoundArgs) -> Result<(), Box<dyn Error>> {
    let duration = parse_duration_secs(&args.duration)?;
    let rest = parse_duration_secs(&args.rest)?;
    let config = TimerConfig::new(duration, args.rounds, rest, !args.no_rest)?;
    let plan = RunPlan::rounds(&config)?;
    execute(plan, args.opts).await
}

pub async fn interval(args: IntervalArgs) -> Result<(), Box<dyn Error>> {
    let steps = args
        .steps
        .iter()
        .map(|spec| IntervalStep::parse(spec))
        .collect::<Result<Vec<_>, _>>()?;
    let config = IntervalConfig::new(steps, args.repeats)?;
    let plan = RunPlan::intervals(&config)?;
    execute(plan, args.opts).await
}

async fn execute(plan: RunPlan, opts: RunOpts) -> Result<(), Box<dyn Error>> {
    if opts.plan {
        println!("{}", serde_json::to_string_pretty(&plan)?);
        return Ok(());
    }

    let settings = Settings::load().unwrap_or_else(|e| {
        warn!("settings unavailable, using defaults: {e}");
        Settings::default()
    });
    let alerts: Arc<dyn AlertService> = if opts.quiet {
        Arc::new(SilentAlerts)
    } else {
        Arc::new(ConsoleAlerts::new(
            settings.alerts.sound,
            settings.alerts.vibration,
        ))
    };

    if !opts.json {
        println!(
            "{} timer, {} total. p pause, r resume, s start, x reset, q quit. Enter silences the alert.",
            catalog::entry(plan.kind()).name,
            format_clock(plan.total_secs()),
        );
    }

    let handle = TimerService::new(plan, alerts)
        .with_pattern(settings.vibration_pattern())
        .with_tick_period(Duration::from_millis(opts.tick_ms.max(1)))
        .spawn();

    // Subscribe before starting so the first events cannot slip past us.
    let mut states = handle.watch();
    let mut events = handle.subscribe();
    if opts.json {
        println!("{}", serde_json::to_string(&handle.snapshot())?);
    }
    handle.send(Command::Start).await;

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut stdin_open = true;

    loop {
        tokio::select! {
            changed = states.changed() => {
                if changed.is_err() {
                    break;
                }
                let snap = states.borrow_and_update().clone();
                if opts.json {
                    println!("{}", serde_json::to_string(&snap)?);
                } else {
                    render(&snap)?;
                }
            }
            event = events.recv() => {
                match event {
                    Ok(event) => {
                        if opts.json {
                            println!("{}", serde_json::to_string(&event)?);
                        } else {
                            announce(&event);
                        }
                        match event {
                            Event::TimerCompleted { .. } => {
                                if opts.auto_ack {
                                    handle.send(Command::Acknowledge).await;
                                } else if !opts.json {
                                    println!("Press Enter to silence the alert.");
                                }
                            }
                            Event::AlertAcknowledged { .. } => break,
                            _ => {}
                        }
                    }
                    Err(RecvError::Lagged(skipped)) => {
                        warn!(skipped, "event stream lagged");
                    }
                    Err(RecvError::Closed) => break,
                }
            }
            // Piped stdin hits EOF immediately; the run keeps going on the
            // clock alone once the input side is gone.
            line = lines.next_line(), if stdin_open => {
                match line {
                    Ok(Some(input)) => {
                        let command = match input.trim() {
                            "" => Some(Command::Acknowledge),
                            "p" => Some(Command::Pause),
                            "r" => Some(Command::Resume),
                            "s" => Some(Command::Start),
                            "x" => Some(Command::Reset),
                            "q" => break,
                            _ => None,
                        };
                        if let Some(command) = command {
                            handle.send(command).await;
                        }
                    }
                    Ok(None) => stdin_open = false,
                    Err(e) => {
                        warn!("stdin unavailable: {e}");
                        stdin_open = false;
                    }
                }
            }
            _ = tokio::signal::ctrl_c() => {
                handle.send(Command::Reset).await;
                break;
            }
        }
    }

    handle.send(Command::Quit).await;
    if !opts.json {
        println!();
    }
    Ok(())
}

/// Overwrite the countdown line in place.
fn render(snap: &TimerSnapshot) -> std::io::Result<()> {
    let paused = if !snap.running && matches!(snap.phase, Phase::RoundActive | Phase::Resting) {
        "  (paused)"
    } else {
        ""
    };
    print!(
        "\r  {:<12} {}  round {}/{}{paused}    ",
        snap.segment_label,
        format_clock(u64::from(snap.remaining_secs)),
        snap.current_round,
        snap.total_rounds,
    );
    std::io::stdout().flush()
}

fn announce(event: &Event) {
    match event {
        Event::RoundStarted { round, total_rounds, .. } => {
            println!("\nRound {round}/{total_rounds}");
        }
        Event::RestStarted { duration_secs, .. } => {
            println!("\nRest ({})", format_clock(u64::from(*duration_secs)));
        }
        Event::TimerCompleted { at, .. } => {
            println!("\nTime's up! ({})", at.with_timezone(&Local).format("%H:%M:%S"));
        }
        Event::AlertAcknowledged { rang_ms, .. } => {
            println!("Alert silenced after {rang_ms} ms.");
        }
        Event::TimerReset { .. } => {
            println!("\nReset.");
        }
        _ => {}
    }
}

fn format_clock(secs: u64) -> String {
    format!("{:02}:{:02}", secs / 60, secs % 60)
}
