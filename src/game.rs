use rand::{rngs::StdRng, SeedableRng};
use tracing::{debug, info};

use crate::matcher::{self, InputBuffer, KeyInput, MatchOutcome};
use crate::session::{FinalStats, SessionPhase, SessionState};
use crate::spawner::Spawner;
use crate::target::Target;
use crate::words::WordPool;
use crate::world::{Arena, WorldState};

/// What happened during one frame
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct TickReport {
    pub spawned: bool,
    pub collisions: usize,
    pub ended: bool,
}

/// Owns the whole simulation; the presentation layer only reads from it
#[derive(Debug)]
pub struct Game {
    arena: Arena,
    session: SessionState,
    world: WorldState,
    spawner: Spawner,
    input: InputBuffer,
    pool: WordPool,
    rng: StdRng,
    last_outcome: Option<MatchOutcome>,
}

impl Game {
    pub fn new(arena: Arena, seed: Option<u64>) -> Self {
        let rng = match seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_entropy(),
        };

        Self {
            arena,
            session: SessionState::default(),
            world: WorldState::default(),
            spawner: Spawner::new(),
            input: InputBuffer::default(),
            pool: WordPool::fallback(),
            rng,
            last_outcome: None,
        }
    }

    /// Parks the game while a new word pool is fetched
    pub fn begin_loading(&mut self) {
        debug!(from = %self.session.phase, "Loading word pool");
        self.world.clear();
        self.input.clear();
        self.last_outcome = None;
        self.session.begin_loading();
    }

    /// Starts a fresh session with `pool`. Used for the first start and every restart.
    pub fn start(&mut self, pool: WordPool, now_ms: f64) {
        self.pool = pool;
        self.world.clear();
        self.input.clear();
        self.spawner.reset();
        self.last_outcome = None;
        self.session.begin(now_ms);
        info!(words = self.pool.len(), "Session started");
    }

    pub fn tick(&mut self, now_ms: f64) -> TickReport {
        let mut report = TickReport::default();
        if !self.session.is_running() {
            return report;
        }

        self.session.set_clock(now_ms);
        let elapsed_ms = self.session.elapsed_ms;

        if let Some(target) = self.spawner.maybe_spawn(
            now_ms,
            elapsed_ms,
            &self.world.targets,
            &self.pool,
            &self.arena,
            &mut self.rng,
        ) {
            self.world.targets.push(target);
            report.spawned = true;
        }

        report.collisions = self.world.advance(elapsed_ms, self.arena.base());
        for _ in 0..report.collisions {
            if self.session.record_base_collision() {
                report.ended = true;
            }
        }
        if report.collisions > 0 {
            debug!(
                collisions = report.collisions,
                lives = self.session.life_points,
                "Targets reached the base"
            );
        }

        report
    }

    /// Applies one key press. Ignored unless a session is running.
    pub fn key(&mut self, key: KeyInput) -> Option<MatchOutcome> {
        if !self.session.is_running() {
            return None;
        }

        let outcome = matcher::on_key(
            key,
            &mut self.input,
            &mut self.world.targets,
            &mut self.session,
        );
        self.last_outcome = Some(outcome.clone());
        Some(outcome)
    }

    pub fn summary(&self, now_ms: f64) -> Option<FinalStats> {
        self.session
            .has_ended()
            .then(|| self.session.final_stats(now_ms))
    }

    pub fn phase(&self) -> SessionPhase {
        self.session.phase
    }

    pub fn arena(&self) -> &Arena {
        &self.arena
    }

    pub fn session(&self) -> &SessionState {
        &self.session
    }

    pub fn targets(&self) -> &[Target] {
        &self.world.targets
    }

    pub fn input(&self) -> &InputBuffer {
        &self.input
    }

    pub fn pool(&self) -> &WordPool {
        &self.pool
    }

    pub fn last_outcome(&self) -> Option<&MatchOutcome> {
        self.last_outcome.as_ref()
    }

    /// Whether the input line should be drawn as valid
    pub fn input_is_valid(&self) -> bool {
        self.last_outcome.as_ref().map_or(true, MatchOutcome::is_valid)
    }

    pub fn focus(&self) -> Option<usize> {
        matcher::focus(&self.input, &self.world.targets)
    }

    /// Adds a target directly, bypassing the spawner
    pub fn push_target(&mut self, target: Target) {
        self.world.targets.push(target);
    }
}
