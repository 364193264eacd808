use ::rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use crate::camera::Camera;
use crate::config::{self, Tuning};
use crate::entity::{Galaxy, Star};
use crate::proximity::{self, ConsumeEvent, DetectionEvent};
use crate::snake::Snake;
use crate::spawner;
use crate::world::Viewport;

/// Everything that happened during one tick, for the audio bridge and HUD.
#[derive(Clone, Debug, Default)]
pub struct TickOutcome {
    pub detections: Vec<DetectionEvent>,
    pub consumed: Vec<ConsumeEvent>,
    pub spawned: usize,
    pub despawned: usize,
    pub galaxies_recycled: usize,
}

/// Running totals since startup.
#[derive(Clone, Copy, Debug, Default)]
pub struct SessionStats {
    pub stars_consumed: u64,
    pub stars_detected: u64,
    pub stars_spawned: u64,
    pub stars_despawned: u64,
    pub galaxies_recycled: u64,
}

/// The whole mutable world, owned by the host loop and advanced by `tick`.
pub struct WorldState {
    pub tuning: Tuning,
    pub viewport: Viewport,
    pub camera: Camera,
    pub snake: Snake,
    pub stars: Vec<Star>,
    pub galaxies: Vec<Galaxy>,
    pub rng: ChaCha8Rng,
    pub hue: f32,
    pub stripe_hue: f32,
    pub tick_count: u64,
    pub stats: SessionStats,
    pub verbose: bool,
}

impl WorldState {
    pub fn new(viewport: Viewport, tuning: Tuning, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let snake = Snake::new(viewport.center(), tuning.initial_length);
        let camera = Camera::from_head(snake.head(), &viewport);
        let galaxies = spawner::seed_galaxies(&mut rng, &tuning);
        let stripe_hue = rng.gen_range(0.0..360.0);

        let mut stars = Vec::with_capacity(tuning.max_stars);
        let spawned = spawner::top_up_stars(&mut stars, &camera, &viewport, &mut rng, &tuning);

        Self {
            tuning,
            viewport,
            camera,
            snake,
            stars,
            galaxies,
            rng,
            hue: 0.0,
            stripe_hue,
            tick_count: 0,
            stats: SessionStats {
                stars_spawned: spawned as u64,
                ..SessionStats::default()
            },
            verbose: false,
        }
    }

    /// Simulation clock in seconds.
    pub fn clock(&self) -> f64 {
        self.tick_count as f64 * config::FIXED_DT as f64
    }

    /// Apply a new surface size; the camera follows immediately.
    pub fn set_viewport(&mut self, viewport: Viewport) {
        if viewport != self.viewport {
            self.viewport = viewport;
            self.camera.track(self.snake.head(), &self.viewport);
        }
    }

    /// Advance one fixed step: locomotion, camera, stars, spawning, background.
    pub fn tick(&mut self) -> TickOutcome {
        self.tick_count += 1;
        self.hue = (self.hue + config::HUE_STEP) % 360.0;
        self.stripe_hue = (self.stripe_hue + config::STRIPE_HUE_STEP) % 360.0;

        self.snake.update(&mut self.rng, &self.tuning);

        // Everything below reads screen space, so the camera must be current first.
        self.camera.track(self.snake.head(), &self.viewport);

        let report =
            proximity::resolve_stars(&mut self.stars, &self.camera, &self.viewport, &self.tuning);
        self.snake.grow(report.growth());

        if self.verbose {
            for c in &report.consumed {
                eprintln!(
                    "[STARSNAKE] Star consumed (value {}) at ({:.0}, {:.0}), target length {}",
                    c.value, c.screen.x, c.screen.y, self.snake.target_length
                );
            }
            for d in &report.detections {
                eprintln!(
                    "[STARSNAKE] Star detected (value {}) at distance {:.1}",
                    d.value, d.distance
                );
            }
        }

        let spawned = spawner::top_up_stars(
            &mut self.stars,
            &self.camera,
            &self.viewport,
            &mut self.rng,
            &self.tuning,
        );
        let galaxies_recycled = spawner::recycle_far_galaxies(
            &mut self.galaxies,
            &self.camera,
            &self.viewport,
            &mut self.rng,
            &self.tuning,
        );

        self.stats.stars_consumed += report.consumed.len() as u64;
        self.stats.stars_detected += report.detections.len() as u64;
        self.stats.stars_spawned += spawned as u64;
        self.stats.stars_despawned += report.despawned as u64;
        self.stats.galaxies_recycled += galaxies_recycled as u64;

        TickOutcome {
            detections: report.detections,
            consumed: report.consumed,
            spawned,
            despawned: report.despawned,
            galaxies_recycled,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::audio;
    use crate::entity::StarPhase;
    use macroquad::prelude::*;

    fn world(seed: u64) -> WorldState {
        WorldState::new(Viewport::new(1280.0, 800.0), Tuning::default(), seed)
    }

    #[test]
    fn star_floor_holds_after_every_tick() {
        let mut sim = world(42);
        assert!(sim.stars.len() >= sim.tuning.min_stars);
        for _ in 0..3000 {
            sim.tick();
            assert!(sim.stars.len() >= sim.tuning.min_stars);
            assert!(sim.stars.len() <= sim.tuning.max_stars);
        }
    }

    #[test]
    fn camera_and_star_screens_are_current_after_tick() {
        let mut sim = world(7);
        for _ in 0..200 {
            sim.tick();
            assert_eq!(sim.camera.offset, sim.snake.head() - sim.viewport.half());
        }
        // Stars that went through the proximity pass carry the current transform.
        for star in sim.stars.iter().filter(|s| s.seen) {
            let expected = star.world - sim.camera.offset + sim.viewport.half();
            assert!((star.screen - expected).length() < 1e-3);
        }
    }

    #[test]
    fn star_under_the_head_is_eaten_next_tick() {
        let mut sim = world(3);
        let world_pos = sim.camera.screen_to_world(sim.viewport.center(), &sim.viewport);
        let mut star = Star::new(world_pos, Vec2::ZERO, 50).unwrap();
        star.phase = StarPhase::Idle;
        sim.stars.push(star);
        let length_before = sim.snake.target_length;

        let outcome = sim.tick();

        assert_eq!(outcome.consumed.len(), 1);
        assert_eq!(outcome.consumed[0].value, 50);
        assert_eq!(sim.snake.target_length, length_before + 50);
        assert_eq!(outcome.detections.len(), 1);
        let freq = audio::frequency_for(outcome.detections[0].value, &sim.tuning);
        assert!((freq - 1046.50).abs() < 1e-3);
        assert!(sim.stars.iter().any(|s| s.value == 50 && s.is_consumed()));
    }

    #[test]
    fn consumed_stars_never_revert() {
        let mut sim = world(99);
        let world_pos = sim.camera.screen_to_world(sim.viewport.center(), &sim.viewport);
        let mut star = Star::new(world_pos, Vec2::ZERO, 20).unwrap();
        star.phase = StarPhase::Idle;
        sim.stars.push(star);
        sim.tick();

        let is_ours = |s: &&Star| s.world == world_pos && s.velocity == Vec2::ZERO;
        assert!(sim.stars.iter().find(is_ours).unwrap().is_consumed());
        for _ in 0..60 {
            sim.tick();
            match sim.stars.iter().find(is_ours) {
                Some(s) => assert!(s.is_consumed()),
                None => break,
            }
        }
        assert!(sim.stars.iter().find(is_ours).is_none());
    }

    #[test]
    fn snake_grows_gradually_after_a_meal() {
        let mut sim = world(5);
        sim.snake.grow(10);
        let start = sim.snake.len();
        for i in 1..=10 {
            sim.tick();
            assert_eq!(sim.snake.len(), (start + i).min(sim.snake.target_length));
        }
    }

    #[test]
    fn same_seed_gives_same_run() {
        let mut a = world(1234);
        let mut b = world(1234);
        for _ in 0..500 {
            a.tick();
            b.tick();
        }
        assert_eq!(a.snake.head(), b.snake.head());
        assert_eq!(a.stars.len(), b.stars.len());
        assert_eq!(a.stats.stars_consumed, b.stats.stars_consumed);
    }

    #[test]
    fn hue_cycles_within_range() {
        let mut sim = world(0);
        for _ in 0..5000 {
            sim.tick();
            assert!((0.0..360.0).contains(&sim.hue));
            assert!((0.0..360.0).contains(&sim.stripe_hue));
        }
    }
}
