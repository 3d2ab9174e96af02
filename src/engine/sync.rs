use super::controller::Inner;
use super::events::EngineEvent;
use super::state::EngineState;
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::{mpsc, Mutex};
use tokio::task::JoinHandle;
use tokio::time::{Instant, MissedTickBehavior};
use tracing::info;

/// Spawn the sync clock for one playback session.
///
/// The clock free-runs on the tick interval: each tick it reads the
/// session's arithmetic elapsed time under the engine lock, maps it to the
/// active segment, and reports index changes. It exits on its own when the
/// session is gone, when playback is stopped, or when its generation no
/// longer matches the engine's (a newer session has its own clock).
pub(super) fn spawn_clock(
    inner: Arc<Mutex<Inner>>,
    events: mpsc::UnboundedSender<EngineEvent>,
    tick: Duration,
    generation: u64,
) -> JoinHandle<()> {
    tokio::spawn(async move {
        let mut interval = tokio::time::interval(tick);
        interval.set_missed_tick_behavior(MissedTickBehavior::Skip);
        // The first interval tick completes immediately; consume it so the
        // first report lands one full period after playback starts.
        interval.tick().await;

        loop {
            interval.tick().await;

            let mut inner = inner.lock().await;

            // A newer play() owns its own clock now.
            if inner.playback_generation != generation {
                return;
            }

            let (elapsed_ms, duration_ms, playing) = match &inner.playback {
                Some(session) => (
                    session.elapsed_ms(Instant::now()),
                    session.duration_ms(),
                    session.is_playing(),
                ),
                None => return,
            };

            if !playing {
                return;
            }

            if elapsed_ms > duration_ms {
                // Natural end: one final PlaybackEnded, then halt.
                if let Some(mut session) = inner.playback.take() {
                    session.stop();
                }
                info!("Playback reached end of audio");
                // Only playback-owned state may be settled here; a job
                // that moved the engine to Transcribing keeps it there.
                if inner.state == EngineState::Playing {
                    let rest = inner.rest_state();
                    inner.transition(rest, &events);
                }
                let _ = events.send(EngineEvent::PlaybackEnded);
                return;
            }

            let active = inner.store.find_active(elapsed_ms as f64 / 1000.0);
            if active != inner.last_segment_index {
                inner.last_segment_index = active;
                if let Some(index) = active {
                    let _ = events.send(EngineEvent::SegmentChanged { index });
                }
            }
        }
    })
}
