use anyhow::Result;
use std::time::Instant;

use crate::model::config::AppConfig;
use crate::model::world::{PopulationSummary, World};

/// Headless driver that advances a [`World`] for a fixed number of ticks.
pub struct App {
    pub running: bool,
    pub world: World,
    pub target_ticks: u64,
    started: Instant,
}

impl App {
    pub fn new(config: AppConfig) -> Result<Self> {
        let target_ticks = config.simulation.ticks;
        let world = World::new(config)?;
        Ok(Self {
            running: target_ticks > 0,
            world,
            target_ticks,
            started: Instant::now(),
        })
    }

    /// Advances one tick and stops once the target is reached or nothing is
    /// left alive.
    pub fn step(&mut self) {
        if !self.running {
            return;
        }
        self.world.update();
        if self.world.organisms.is_empty() {
            tracing::warn!(tick = self.world.tick, "Every organism has died");
            self.running = false;
        } else if self.world.tick >= self.target_ticks {
            self.running = false;
        }
    }

    pub fn run(&mut self) -> PopulationSummary {
        while self.running {
            self.step();
        }
        tracing::info!(
            ticks = self.world.tick,
            elapsed_ms = self.started.elapsed().as_millis() as u64,
            "Simulation finished"
        );
        self.world.summary()
    }
}
