/// Speed bonus reaches its ceiling after five minutes of play.
pub const MAX_SPEED_BONUS: f64 = 0.3;
pub const MIN_SPAWN_CAP: usize = 5;
pub const MAX_SPAWN_CAP: usize = 15;
pub const MAX_SPAWN_INTERVAL_MS: f64 = 2000.0;
pub const MIN_SPAWN_INTERVAL_MS: f64 = 500.0;

fn non_negative(elapsed_ms: f64) -> f64 {
    if elapsed_ms.is_nan() {
        0.0
    } else {
        elapsed_ms.max(0.0)
    }
}

/// Extra units per update added on top of a target's base speed
pub fn speed_bonus(elapsed_ms: f64) -> f64 {
    (non_negative(elapsed_ms) / 60_000.0 * 0.1).min(MAX_SPEED_BONUS)
}

/// Maximum number of live targets, growing from 5 to 15 over the first two minutes
pub fn spawn_cap(elapsed_ms: f64) -> usize {
    let cap = 5.0 + (non_negative(elapsed_ms) / 120_000.0) * 10.0;
    cap.clamp(MIN_SPAWN_CAP as f64, MAX_SPAWN_CAP as f64) as usize
}

/// Minimum spacing between two spawns in milliseconds
pub fn spawn_interval(elapsed_ms: f64) -> f64 {
    (MAX_SPAWN_INTERVAL_MS - non_negative(elapsed_ms) / 100.0).max(MIN_SPAWN_INTERVAL_MS)
}
