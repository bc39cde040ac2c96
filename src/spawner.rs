use rand::Rng;
use tracing::{debug, trace};

use crate::difficulty::{spawn_cap, spawn_interval};
use crate::target::Target;
use crate::words::WordPool;
use crate::world::{Arena, MIN_SEPARATION};

/// Decides when a new target enters the playfield
#[derive(Debug, Clone, Default)]
pub struct Spawner {
    last_spawn_ms: Option<f64>,
    next_id: u64,
}

impl Spawner {
    pub fn new() -> Self {
        Self::default()
    }

    /// Forgets the last spawn so the next session spawns on its first tick
    pub fn reset(&mut self) {
        self.last_spawn_ms = None;
    }

    pub fn last_spawn_ms(&self) -> Option<f64> {
        self.last_spawn_ms
    }

    /// Whether the interval and the concurrent cap both allow a spawn
    pub fn is_due(&self, now_ms: f64, elapsed_ms: f64, live_count: usize) -> bool {
        let interval_passed = match self.last_spawn_ms {
            Some(last) => now_ms - last > spawn_interval(elapsed_ms),
            None => true,
        };
        interval_passed && live_count < spawn_cap(elapsed_ms)
    }

    pub fn maybe_spawn<R: Rng + ?Sized>(
        &mut self,
        now_ms: f64,
        elapsed_ms: f64,
        live: &[Target],
        pool: &WordPool,
        arena: &Arena,
        rng: &mut R,
    ) -> Option<Target> {
        if !self.is_due(now_ms, elapsed_ms, live.len()) {
            return None;
        }

        let candidate = Target::create(self.next_id, now_ms, pool, arena, rng);
        if !is_clear(&candidate, live) {
            trace!(word = candidate.text(), "Spawn skipped, too close to a live target");
            return None;
        }

        self.next_id += 1;
        self.last_spawn_ms = Some(now_ms);
        debug!(
            id = candidate.id,
            word = candidate.text(),
            x = candidate.position.x,
            y = candidate.position.y,
            live = live.len() + 1,
            "Spawned target"
        );
        Some(candidate)
    }
}

/// True when `candidate` keeps the minimum separation from every live target
pub fn is_clear(candidate: &Target, live: &[Target]) -> bool {
    live.iter()
        .all(|t| t.position.distance(candidate.position) >= MIN_SEPARATION)
}
