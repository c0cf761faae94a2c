//! Periodic live-data simulation.
//!
//! This module stands in for a realtime feed that the engine does not
//! have: on a fixed cadence it draws a small random delta and shifts the
//! active-facility display counter. Entity data (beds, zones) is never
//! touched by the default loop; zone updates plug in through the
//! [`ZoneChurn`] extension trait.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use parking_lot::Mutex;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tokio::time::{self, MissedTickBehavior};
use tracing::{debug, info, warn};

use crate::store::{GeoEntityStore, StoreError};

/// Configuration for the live-update loop.
#[derive(Debug, Clone)]
pub struct SimulatorConfig {
    /// Time between ticks
    pub interval: Duration,
    /// Inclusive bounds for the per-tick counter delta
    pub delta_range: (i64, i64),
    /// Deterministic seed. `None` uses OS entropy.
    pub seed: Option<u64>,
}

impl Default for SimulatorConfig {
    fn default() -> Self {
        Self {
            interval: Duration::from_millis(30_000),
            delta_range: (-1, 2),
            seed: None,
        }
    }
}

/// Outcome of a single tick.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TickReport {
    /// Delta applied to the active-facility counter
    pub delta: i64,
    /// Counter value after the tick
    pub active_facility_count: u32,
}

/// Extension point for per-tick zone updates.
///
/// The engine installs none by default, so zone case counts and the
/// alert counter hold their seeded values while the facility counter
/// random-walks. A churn error never stops the loop; it is logged and
/// the next tick fires on schedule.
pub trait ZoneChurn: Send {
    fn apply(&mut self, store: &GeoEntityStore, now: DateTime<Utc>) -> Result<(), StoreError>;
}

/// Apply one live tick to the store: draw a delta from the inclusive
/// range and shift the facility display counter.
///
/// This is the whole per-tick mutation, separated from the timer so it
/// can be driven directly by tests or an external scheduler. The bounds
/// must be ordered (`min <= max`); configuration validation enforces
/// that before a range reaches this point.
pub fn run_tick<R: Rng + ?Sized>(
    store: &GeoEntityStore,
    rng: &mut R,
    delta_range: (i64, i64),
    now: DateTime<Utc>,
) -> TickReport {
    let (min, max) = delta_range;
    let delta = rng.gen_range(min..=max);
    store.apply_live_tick(delta, now);

    TickReport {
        delta,
        active_facility_count: store.counters().active_facility_count,
    }
}

struct RunningTimer {
    shutdown: watch::Sender<bool>,
    handle: JoinHandle<()>,
}

/// Handle to the periodic live-update task.
///
/// At most one timer runs per handle: starting replaces any running
/// timer, stopping is idempotent, and dropping the handle aborts a timer
/// that was never stopped.
pub struct RealtimeSimulator {
    store: GeoEntityStore,
    config: SimulatorConfig,
    churn: Option<Arc<Mutex<dyn ZoneChurn>>>,
    running: Option<RunningTimer>,
    ticks: Arc<AtomicU64>,
}

impl RealtimeSimulator {
    pub fn new(store: GeoEntityStore, config: SimulatorConfig) -> Self {
        Self {
            store,
            config,
            churn: None,
            running: None,
            ticks: Arc::new(AtomicU64::new(0)),
        }
    }

    /// Install a zone churn hook, replacing any previous one. Takes
    /// effect from the next `start`.
    pub fn set_zone_churn<C: ZoneChurn + 'static>(&mut self, churn: C) {
        self.churn = Some(Arc::new(Mutex::new(churn)));
    }

    /// Number of ticks applied since this handle was created. Survives
    /// restarts.
    pub fn ticks_completed(&self) -> u64 {
        self.ticks.load(Ordering::Relaxed)
    }

    /// Whether a timer task is currently live.
    pub fn is_running(&self) -> bool {
        self.running
            .as_ref()
            .map(|r| !r.handle.is_finished())
            .unwrap_or(false)
    }

    /// Start the periodic timer. A timer that is already running is
    /// stopped first, so there is never more than one per handle.
    ///
    /// The first tick fires one full interval after this call; missed
    /// ticks are delayed rather than bursted, so at most one tick is ever
    /// in flight. Must be called from within a Tokio runtime.
    pub fn start(&mut self) {
        self.stop();

        let (shutdown_tx, mut shutdown_rx) = watch::channel(false);
        let store = self.store.clone();
        let config = self.config.clone();
        let churn = self.churn.clone();
        let ticks = Arc::clone(&self.ticks);

        let handle = tokio::spawn(async move {
            let mut rng = match config.seed {
                Some(seed) => StdRng::seed_from_u64(seed),
                None => StdRng::from_entropy(),
            };

            let mut interval = time::interval_at(time::Instant::now() + config.interval, config.interval);
            interval.set_missed_tick_behavior(MissedTickBehavior::Delay);

            info!(
                interval_ms = config.interval.as_millis() as u64,
                "live update loop started"
            );

            loop {
                tokio::select! {
                    _ = interval.tick() => {
                        // The stop signal may land while the timer branch
                        // is already ready; never apply a tick after it.
                        if *shutdown_rx.borrow() {
                            break;
                        }

                        let now = Utc::now();
                        let report = run_tick(&store, &mut rng, config.delta_range, now);
                        debug!(
                            delta = report.delta,
                            active_facility_count = report.active_facility_count,
                            "applied live tick"
                        );

                        if let Some(churn) = &churn {
                            if let Err(e) = churn.lock().apply(&store, now) {
                                warn!(error = %e, "zone churn failed; live updates continue");
                            }
                        }

                        ticks.fetch_add(1, Ordering::Relaxed);
                    }
                    _ = shutdown_rx.changed() => {
                        break;
                    }
                }
            }

            info!("live update loop stopped");
        });

        self.running = Some(RunningTimer {
            shutdown: shutdown_tx,
            handle,
        });
    }

    /// Stop the timer. Safe to call any number of times, running or not;
    /// once it returns, no further tick is applied.
    pub fn stop(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.shutdown.send(true);
        }
    }
}

impl Drop for RealtimeSimulator {
    fn drop(&mut self) {
        if let Some(running) = self.running.take() {
            let _ = running.shutdown.send(true);
            running.handle.abort();
        }
    }
}
