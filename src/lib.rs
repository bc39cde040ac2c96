// Library surface for headless/integration tests and reuse.
// Keep this lean to avoid coupling to bin-only types in main.rs.
pub mod app_dirs;
pub mod config;
pub mod difficulty;
pub mod game;
pub mod logging;
pub mod matcher;
pub mod runtime;
pub mod session;
pub mod share;
pub mod spawner;
pub mod target;
pub mod words;
pub mod world;

pub use game::{Game, TickReport};
pub use matcher::{KeyInput, MatchOutcome};
pub use session::{FinalStats, SessionPhase};
