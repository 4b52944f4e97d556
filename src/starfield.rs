//! Falling stars behind the title screen

use glam::Vec2;
use rand::{Rng, SeedableRng};
use rand_pcg::Pcg32;

use crate::consts::{HEIGHT, STAR_COUNT, STAR_SPEED, WIDTH};

#[derive(Debug, Clone)]
pub struct Starfield {
    stars: Vec<Vec2>,
    rng: Pcg32,
}

impl Starfield {
    /// `STAR_COUNT` stars scattered over the playfield
    pub fn new(seed: u64) -> Self {
        let mut rng = Pcg32::seed_from_u64(seed);
        let stars = (0..STAR_COUNT)
            .map(|_| Vec2::new(rng.random_range(0.0..=WIDTH), rng.random_range(0.0..=HEIGHT)))
            .collect();
        Self { stars, rng }
    }

    pub fn stars(&self) -> &[Vec2] {
        &self.stars
    }

    /// Move every star down one frame. Stars that fall off the bottom come
    /// back at the top in a new column.
    pub fn advance(&mut self) {
        for star in &mut self.stars {
            star.y += STAR_SPEED;
            if star.y > HEIGHT {
                star.x = self.rng.random_range(0.0..=WIDTH);
                star.y = 0.0;
            }
        }
    }
}
