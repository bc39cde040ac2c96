use rand::Rng;
use typestrike::world::Arena;

const STAR_COUNT: usize = 100;

/// Background star drifting down the playfield
#[derive(Debug, Clone)]
pub struct Star {
    pub x: f64,
    pub y: f64,
    pub size: f64,
    pub speed: f64,
}

// gen_range panics on an empty range
fn extent(size: f64) -> f64 {
    size.max(1.0)
}

impl Star {
    fn new<R: Rng>(arena: &Arena, rng: &mut R) -> Self {
        Self {
            x: rng.gen_range(0.0..extent(arena.width)),
            y: rng.gen_range(0.0..extent(arena.height)),
            size: rng.gen_range(0.0..2.0),
            speed: rng.gen_range(0.1..0.6),
        }
    }

    fn update<R: Rng>(&mut self, arena: &Arena, rng: &mut R) {
        self.y += self.speed;
        if self.y > arena.height {
            self.y = 0.0;
            self.x = rng.gen_range(0.0..extent(arena.width));
        }
    }

    pub fn glyph(&self) -> &'static str {
        if self.size > 1.5 {
            "*"
        } else if self.size > 0.8 {
            "·"
        } else {
            "."
        }
    }
}

/// Decoration only; never touches game state
#[derive(Debug, Clone)]
pub struct Starfield {
    pub stars: Vec<Star>,
    arena: Arena,
}

impl Starfield {
    pub fn new(arena: &Arena) -> Self {
        let mut rng = rand::thread_rng();
        Self {
            stars: (0..STAR_COUNT).map(|_| Star::new(arena, &mut rng)).collect(),
            arena: *arena,
        }
    }

    pub fn update(&mut self) {
        let mut rng = rand::thread_rng();
        for star in &mut self.stars {
            star.update(&self.arena, &mut rng);
        }
    }
}
