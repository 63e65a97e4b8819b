//! Integration tests for the clock service.
//!
//! Tests the full command loop: a spawned service task driving the engine,
//! publishing snapshots, broadcasting boundary events, and firing the
//! completion alert through an injected recording service.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::time::timeout;

use ringside_core::{
    AlertService, Command, Event, Phase, RunPlan, TimerConfig, TimerService, VibrationPattern,
};

#[derive(Debug, Clone, PartialEq, Eq)]
enum Call {
    Play,
    Stop,
    Vibrate(Vec<u64>),
    CancelVibration,
}

#[derive(Default)]
struct RecordingAlerts {
    calls: Mutex<Vec<Call>>,
}

impl RecordingAlerts {
    fn calls(&self) -> Vec<Call> {
        self.calls.lock().unwrap().clone()
    }
}

impl AlertService for RecordingAlerts {
    fn play_alert(&self) {
        self.calls.lock().unwrap().push(Call::Play);
    }
    fn stop_alert(&self) {
        self.calls.lock().unwrap().push(Call::Stop);
    }
    fn vibrate(&self, pattern: &VibrationPattern) {
        self.calls.lock().unwrap().push(Call::Vibrate(pattern.0.clone()));
    }
    fn cancel_vibration(&self) {
        self.calls.lock().unwrap().push(Call::CancelVibration);
    }
}

fn round_plan(duration: u32, rounds: u32, rest: u32) -> RunPlan {
    let config = TimerConfig::new(duration, rounds, rest, rest > 0).unwrap();
    RunPlan::rounds(&config).unwrap()
}

const WAIT: Duration = Duration::from_secs(5);

#[tokio::test]
async fn snapshots_track_the_command_sequence() {
    let alerts = Arc::new(RecordingAlerts::default());
    // An hour-long tick period keeps the clock out of the picture: every
    // observed change comes from a command.
    let handle = TimerService::new(round_plan(180, 3, 60), alerts.clone())
        .with_tick_period(Duration::from_secs(3600))
        .spawn();
    let mut states = handle.watch();

    assert_eq!(handle.snapshot().phase, Phase::Idle);

    handle.send(Command::Start).await;
    timeout(WAIT, states.wait_for(|s| s.running)).await.unwrap().unwrap();
    let snap = handle.snapshot();
    assert_eq!(snap.phase, Phase::RoundActive);
    assert_eq!(snap.current_round, 1);
    assert_eq!(snap.remaining_secs, 180);

    handle.send(Command::Pause).await;
    timeout(WAIT, states.wait_for(|s| !s.running)).await.unwrap().unwrap();
    assert_eq!(handle.snapshot().phase, Phase::RoundActive);

    handle.send(Command::Resume).await;
    timeout(WAIT, states.wait_for(|s| s.running)).await.unwrap().unwrap();

    handle.send(Command::Reset).await;
    timeout(WAIT, states.wait_for(|s| s.phase == Phase::Idle))
        .await
        .unwrap()
        .unwrap();
    let snap = handle.snapshot();
    assert_eq!(snap.current_round, 0);
    assert_eq!(snap.remaining_secs, 180);

    // Nothing completed, so the alert hardware was only ever silenced.
    assert!(!alerts.calls().contains(&Call::Play));
    handle.send(Command::Quit).await;
}

#[tokio::test]
async fn completion_arms_the_alert_until_acknowledged() {
    let alerts = Arc::new(RecordingAlerts::default());
    let handle = TimerService::new(round_plan(2, 1, 0), alerts.clone())
        .with_pattern(VibrationPattern(vec![200, 100]))
        .with_tick_period(Duration::from_millis(10))
        .spawn();
    let mut states = handle.watch();
    let mut events = handle.subscribe();

    handle.send(Command::Start).await;
    timeout(WAIT, states.wait_for(|s| s.phase == Phase::Completed))
        .await
        .unwrap()
        .unwrap();

    let calls = alerts.calls();
    assert_eq!(calls[0], Call::Play);
    assert_eq!(calls[1], Call::Vibrate(vec![200, 100]));

    handle.send(Command::Acknowledge).await;
    let acknowledged = timeout(WAIT, async {
        loop {
            if let Ok(Event::AlertAcknowledged { .. }) = events.recv().await {
                break true;
            }
        }
    })
    .await
    .unwrap();
    assert!(acknowledged);

    let calls = alerts.calls();
    assert_eq!(calls[calls.len() - 2..], [Call::Stop, Call::CancelVibration]);

    // The run stays completed until an explicit reset.
    assert_eq!(handle.snapshot().phase, Phase::Completed);
    handle.send(Command::Quit).await;
}

#[tokio::test]
async fn reset_cancels_a_ringing_alert() {
    let alerts = Arc::new(RecordingAlerts::default());
    let handle = TimerService::new(round_plan(1, 1, 0), alerts.clone())
        .with_tick_period(Duration::from_millis(10))
        .spawn();
    let mut states = handle.watch();

    handle.send(Command::Start).await;
    timeout(WAIT, states.wait_for(|s| s.phase == Phase::Completed))
        .await
        .unwrap()
        .unwrap();
    assert!(alerts.calls().contains(&Call::Play));

    handle.send(Command::Reset).await;
    timeout(WAIT, states.wait_for(|s| s.phase == Phase::Idle))
        .await
        .unwrap()
        .unwrap();
    assert!(alerts.calls().contains(&Call::Stop));
    assert!(alerts.calls().contains(&Call::CancelVibration));

    // Acknowledging after the reset finds nothing armed: no further
    // acknowledgment event is possible, but the service stays up.
    handle.send(Command::Acknowledge).await;
    assert_eq!(handle.snapshot().phase, Phase::Idle);
    handle.send(Command::Quit).await;
}

#[tokio::test]
async fn boundary_events_arrive_in_run_order() {
    let alerts = Arc::new(RecordingAlerts::default());
    let handle = TimerService::new(round_plan(1, 2, 1), alerts.clone())
        .with_tick_period(Duration::from_millis(10))
        .spawn();
    let mut events = handle.subscribe();

    handle.send(Command::Start).await;

    let collected = timeout(WAIT, async {
        let mut seen = Vec::new();
        loop {
            match events.recv().await.unwrap() {
                event @ Event::TimerCompleted { .. } => {
                    seen.push(event);
                    break seen;
                }
                event => seen.push(event),
            }
        }
    })
    .await
    .unwrap();

    assert!(matches!(collected[0], Event::TimerStarted { total_rounds: 2, .. }));
    assert!(matches!(collected[1], Event::RestStarted { after_round: 1, .. }));
    assert!(matches!(collected[2], Event::RoundStarted { round: 2, .. }));
    assert!(matches!(collected[3], Event::TimerCompleted { total_rounds: 2, .. }));
    assert_eq!(collected.len(), 4);

    handle.send(Command::Quit).await;
}

#[tokio::test]
async fn pause_freezes_the_countdown() {
    let alerts = Arc::new(RecordingAlerts::default());
    let handle = TimerService::new(round_plan(1000, 1, 0), alerts.clone())
        .with_tick_period(Duration::from_millis(20))
        .spawn();
    let mut states = handle.watch();

    handle.send(Command::Start).await;
    timeout(WAIT, states.wait_for(|s| s.remaining_secs <= 997))
        .await
        .unwrap()
        .unwrap();

    handle.send(Command::Pause).await;
    timeout(WAIT, states.wait_for(|s| !s.running)).await.unwrap().unwrap();
    let frozen = handle.snapshot().remaining_secs;

    // Long enough for many ticks, were the clock still live.
    tokio::time::sleep(Duration::from_millis(200)).await;
    assert_eq!(handle.snapshot().remaining_secs, frozen);
    assert!(!handle.snapshot().running);

    handle.send(Command::Quit).await;
}
