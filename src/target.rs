use glam::DVec2;
use rand::Rng;

use crate::difficulty::speed_bonus;
use crate::words::WordPool;
use crate::world::{Arena, COLLISION_RADIUS};

pub const BASE_SPEED: f64 = 0.2;
pub const HUE_COUNT: usize = 6;

/// An incoming word carrier
#[derive(Debug, Clone, PartialEq)]
pub struct Target {
    pub id: u64,
    text: String,
    pub position: DVec2,
    pub origin_angle: f64,
    pub origin_radius: f64,
    pub base_speed: f64,
    pub current_speed: f64,
    pub spawned_at_ms: f64,
    /// Palette index for the renderer
    pub hue: usize,
}

impl Target {
    /// Places a new target on the arc above the base, at a random angle in
    /// [30°, 150°] and a random radius from the top-center point
    pub fn create<R: Rng + ?Sized>(
        id: u64,
        now_ms: f64,
        pool: &WordPool,
        arena: &Arena,
        rng: &mut R,
    ) -> Self {
        let angle = rng.gen_range(30.0_f64..=150.0).to_radians();
        let radius = rng.gen_range(50.0..=arena.max_spawn_radius());
        let position = DVec2::new(
            arena.width / 2.0 + angle.cos() * radius,
            angle.sin() * radius,
        );

        Self {
            id,
            text: pool.choose(rng).to_string(),
            position,
            origin_angle: angle,
            origin_radius: radius,
            base_speed: BASE_SPEED,
            current_speed: BASE_SPEED,
            spawned_at_ms: now_ms,
            hue: rng.gen_range(0..HUE_COUNT),
        }
    }

    /// A target at a fixed position, mostly useful for tests and replays
    pub fn at(id: u64, text: impl Into<String>, position: DVec2) -> Self {
        Self {
            id,
            text: text.into(),
            position,
            origin_angle: 0.0,
            origin_radius: 0.0,
            base_speed: BASE_SPEED,
            current_speed: BASE_SPEED,
            spawned_at_ms: 0.0,
            hue: 0,
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn distance_to(&self, point: DVec2) -> f64 {
        self.position.distance(point)
    }

    /// Moves one step toward `base`. Returns true once the target is within
    /// the collision radius, in which case it does not move.
    ///
    /// The distance is checked before the step, so a target that crosses the
    /// radius on this call is only reported on the next one.
    pub fn update(&mut self, elapsed_ms: f64, base: DVec2) -> bool {
        self.current_speed = self.base_speed + speed_bonus(elapsed_ms);

        let offset = base - self.position;
        let distance = offset.length();
        // also covers distance == 0
        if distance < COLLISION_RADIUS {
            return true;
        }

        self.position += offset / distance * self.current_speed;
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::{rngs::StdRng, SeedableRng};

    fn pool() -> WordPool {
        WordPool::new(["alien", "space"]).unwrap()
    }

    #[test]
    fn test_create_places_target_on_arc() {
        let arena = Arena::default();
        let mut rng = StdRng::seed_from_u64(42);
        let top_center = DVec2::new(arena.width / 2.0, 0.0);

        for id in 0..200 {
            let t = Target::create(id, 0.0, &pool(), &arena, &mut rng);
            let degrees = t.origin_angle.to_degrees();
            assert!((30.0 - 1e-9..=150.0 + 1e-9).contains(&degrees));
            assert!((50.0..=350.0).contains(&t.origin_radius));
            assert!((t.position.distance(top_center) - t.origin_radius).abs() < 1e-9);
            assert!(t.position.y > 0.0);
            assert!(t.text() == "alien" || t.text() == "space");
            assert_eq!(t.current_speed, BASE_SPEED);
            assert!(t.hue < HUE_COUNT);
        }
    }

    #[test]
    fn test_update_moves_toward_base() {
        let base = DVec2::new(400.0, 600.0);
        let mut t = Target::at(1, "nebula", DVec2::new(400.0, 100.0));

        assert!(!t.update(0.0, base));
        assert!((t.position.y - 100.2).abs() < 1e-9);
        assert_eq!(t.position.x, 400.0);
    }

    #[test]
    fn test_update_speed_grows_with_elapsed_time() {
        let base = DVec2::new(400.0, 600.0);
        let mut t = Target::at(1, "nebula", DVec2::new(400.0, 100.0));

        t.update(60_000.0, base);
        assert!((t.current_speed - 0.3).abs() < 1e-12);

        t.update(3_600_000.0, base);
        assert!((t.current_speed - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_update_reports_collision_below_threshold() {
        let base = DVec2::new(400.0, 600.0);
        let mut t = Target::at(1, "ufo", DVec2::new(400.0, 560.1));

        // 39.9 units away, already inside the radius
        assert!(t.update(0.0, base));
    }

    #[test]
    fn test_update_crossing_threshold() {
        let base = DVec2::new(400.0, 600.0);
        let mut t = Target::at(1, "ufo", DVec2::new(400.0, 559.9));

        assert!(!t.update(0.0, base));
        assert!(t.distance_to(base) < COLLISION_RADIUS);
        assert!(t.update(0.0, base));
    }

    #[test]
    fn test_update_at_base_does_not_divide_by_zero() {
        let base = DVec2::new(400.0, 600.0);
        let mut t = Target::at(1, "ufo", base);

        assert!(t.update(0.0, base));
        assert!(t.position.is_finite());
    }
}
