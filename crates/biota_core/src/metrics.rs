//! Metrics collection and logging setup.
//!
//! Counters are atomic so a host can read them from a reporting thread while
//! the tick loop keeps writing.

use crate::notify::NotificationSink;
use biota_data::{ChangeKind, Notification, PredationOutcome};
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::{Duration, Instant};

/// Simulation-wide counters.
#[derive(Debug)]
pub struct Metrics {
    tick_count: AtomicU64,
    births: AtomicU64,
    mutations: AtomicU64,
    crossovers: AtomicU64,
    predation_attempts: AtomicU64,
    predation_successes: AtomicU64,
    cascade_effects: AtomicU64,
    log_interval: u64,
    start_time: Instant,
}

impl Default for Metrics {
    fn default() -> Self {
        Self::new(1000)
    }
}

impl Metrics {
    #[must_use]
    pub fn new(log_interval: u64) -> Self {
        Self {
            tick_count: AtomicU64::new(0),
            births: AtomicU64::new(0),
            mutations: AtomicU64::new(0),
            crossovers: AtomicU64::new(0),
            predation_attempts: AtomicU64::new(0),
            predation_successes: AtomicU64::new(0),
            cascade_effects: AtomicU64::new(0),
            log_interval: log_interval.max(1),
            start_time: Instant::now(),
        }
    }

    /// Records a completed tick and logs a summary every `log_interval` ticks.
    pub fn record_tick(&self, duration: Duration, population: usize) {
        let tick = self.tick_count.fetch_add(1, Ordering::Relaxed) + 1;
        if tick % self.log_interval == 0 {
            tracing::info!(
                tick,
                population,
                births = self.births(),
                mutations = self.mutations(),
                predation_successes = self.predation_successes(),
                cascade_effects = self.cascade_effects(),
                duration_us = duration.as_micros() as u64,
                "Simulation tick"
            );
        }
    }

    pub fn record_predation(&self, outcome: &PredationOutcome) {
        self.predation_attempts.fetch_add(1, Ordering::Relaxed);
        if outcome.success {
            self.predation_successes.fetch_add(1, Ordering::Relaxed);
        }
    }

    pub fn observe(&self, notification: &Notification) {
        let counter = match notification {
            Notification::Reproduction { .. } => &self.births,
            Notification::Mutation(event) => match event.kind {
                ChangeKind::Mutation(_) => &self.mutations,
                ChangeKind::Crossover => &self.crossovers,
            },
            Notification::CascadeEffect(_) => &self.cascade_effects,
        };
        counter.fetch_add(1, Ordering::Relaxed);
    }

    #[must_use]
    pub fn tick_count(&self) -> u64 {
        self.tick_count.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn births(&self) -> u64 {
        self.births.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn mutations(&self) -> u64 {
        self.mutations.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn crossovers(&self) -> u64 {
        self.crossovers.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn predation_attempts(&self) -> u64 {
        self.predation_attempts.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn predation_successes(&self) -> u64 {
        self.predation_successes.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn cascade_effects(&self) -> u64 {
        self.cascade_effects.load(Ordering::Relaxed)
    }

    #[must_use]
    pub fn elapsed(&self) -> Duration {
        self.start_time.elapsed()
    }
}

impl NotificationSink for Metrics {
    fn emit(&mut self, notification: Notification) {
        self.observe(&notification);
    }
}

/// Initialize the global tracing subscriber. Later calls are ignored.
pub fn init_logging(level: tracing::Level) {
    tracing::subscriber::set_global_default(
        tracing_subscriber::FmtSubscriber::builder()
            .with_max_level(level)
            .finish(),
    )
    .ok();
}
