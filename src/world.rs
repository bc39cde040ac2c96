use glam::DVec2;
use tracing::warn;

use crate::target::Target;

/// Targets closer than this to the base have reached it
pub const COLLISION_RADIUS: f64 = 40.0;
/// A new target may not appear this close to a live one
pub const MIN_SEPARATION: f64 = 100.0;

pub const DEFAULT_WIDTH: f64 = 800.0;
pub const DEFAULT_HEIGHT: f64 = 600.0;

/// Logical playfield, in world units. The base sits at the middle of the bottom edge.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Arena {
    pub width: f64,
    pub height: f64,
}

impl Arena {
    /// Sizes that are not finite and positive fall back to the defaults
    pub fn new(width: f64, height: f64) -> Self {
        Self {
            width: usable_size(width, DEFAULT_WIDTH),
            height: usable_size(height, DEFAULT_HEIGHT),
        }
    }

    pub fn base(&self) -> DVec2 {
        DVec2::new(self.width / 2.0, self.height)
    }

    /// Largest spawn radius around the top-center point
    pub fn max_spawn_radius(&self) -> f64 {
        (self.width / 2.0 - 50.0).max(50.0)
    }
}

fn usable_size(size: f64, fallback: f64) -> f64 {
    if size.is_finite() && size > 0.0 {
        size
    } else {
        warn!(size, fallback, "Unusable arena size");
        fallback
    }
}

impl Default for Arena {
    fn default() -> Self {
        Self::new(DEFAULT_WIDTH, DEFAULT_HEIGHT)
    }
}

/// Live targets in creation order
#[derive(Debug, Clone, Default)]
pub struct WorldState {
    pub targets: Vec<Target>,
}

impl WorldState {
    pub fn clear(&mut self) {
        self.targets.clear();
    }

    /// Advances every target and drops the ones that reached the base.
    /// Returns the number of targets removed this way.
    pub fn advance(&mut self, elapsed_ms: f64, base: DVec2) -> usize {
        let before = self.targets.len();
        self.targets.retain_mut(|t| !t.update(elapsed_ms, base));
        before - self.targets.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arena_base() {
        let arena = Arena::default();
        assert_eq!(arena.base(), DVec2::new(400.0, 600.0));
        assert_eq!(arena.max_spawn_radius(), 350.0);
    }

    #[test]
    fn test_narrow_arena_radius_floor() {
        assert_eq!(Arena::new(60.0, 100.0).max_spawn_radius(), 50.0);
    }

    #[test]
    fn test_unusable_sizes_fall_back() {
        assert_eq!(Arena::new(0.0, 600.0), Arena::default());
        assert_eq!(Arena::new(-40.0, -1.0), Arena::default());
        assert_eq!(Arena::new(f64::NAN, f64::INFINITY), Arena::default());
        assert_eq!(Arena::new(0.5, 300.0), Arena { width: 0.5, height: 300.0 });
    }

    #[test]
    fn test_advance_removes_only_arrived_targets() {
        let arena = Arena::default();
        let mut world = WorldState {
            targets: vec![
                Target::at(1, "near", arena.base() - DVec2::new(0.0, 10.0)),
                Target::at(2, "far", DVec2::new(400.0, 100.0)),
                Target::at(3, "close", arena.base() - DVec2::new(20.0, 20.0)),
            ],
        };

        let removed = world.advance(0.0, arena.base());

        assert_eq!(removed, 2);
        assert_eq!(world.targets.len(), 1);
        assert_eq!(world.targets[0].text(), "far");
    }
}
