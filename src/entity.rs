use macroquad::prelude::*;
use ::rand::Rng;
use std::f32::consts::PI;

use crate::config::Tuning;

/// Lifecycle phase of a star. `Consumed` is terminal.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum StarPhase {
    /// Growing in; `progress` runs 0 -> 1.
    Newborn { progress: f32 },
    Idle,
    /// Fading out after being eaten; `fade` runs 1 -> 0.
    Consumed { fade: f32 },
}

/// Detection flash layered on top of the phase.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Flash {
    pub progress: f32,
    pub rate: f32,
}

impl Flash {
    /// Rises then falls over the flash lifetime.
    pub fn intensity(&self) -> f32 {
        (self.progress.clamp(0.0, 1.0) * PI).sin()
    }
}

#[derive(Clone, Debug)]
pub struct Star {
    pub world: Vec2,
    pub velocity: Vec2,
    /// Cached screen position from the last proximity pass.
    pub screen: Vec2,
    pub value: u32,
    pub phase: StarPhase,
    pub flash: Option<Flash>,
    /// Set once the star has been inside the on-screen bounds.
    pub seen: bool,
}

impl Star {
    /// Returns `None` for non-finite input so invalid stars never enter the pool.
    pub fn new(world: Vec2, velocity: Vec2, value: u32) -> Option<Self> {
        if !world.is_finite() || !velocity.is_finite() {
            return None;
        }
        Some(Self {
            world,
            velocity,
            screen: world,
            value,
            phase: StarPhase::Newborn { progress: 0.0 },
            flash: None,
            seen: false,
        })
    }

    /// Random value and drift, newborn phase.
    pub fn random_at(world: Vec2, rng: &mut impl Rng, tuning: &Tuning) -> Option<Self> {
        let value = rng.gen_range(tuning.value_min..=tuning.value_max);
        let velocity = if tuning.star_drift > 0.0 {
            vec2(
                rng.gen_range(-tuning.star_drift..tuning.star_drift),
                rng.gen_range(-tuning.star_drift..tuning.star_drift),
            )
        } else {
            Vec2::ZERO
        };
        Self::new(world, velocity, value)
    }

    pub fn size(&self) -> f32 {
        self.value as f32 / 2.0
    }

    pub fn halo_size(&self) -> f32 {
        self.size() * 2.0
    }

    pub fn is_consumed(&self) -> bool {
        matches!(self.phase, StarPhase::Consumed { .. })
    }

    pub fn is_flashing(&self) -> bool {
        self.flash.is_some()
    }

    pub fn is_newborn(&self) -> bool {
        matches!(self.phase, StarPhase::Newborn { .. })
    }

    /// Scale applied while the star grows in.
    pub fn birth_scale(&self) -> f32 {
        match self.phase {
            StarPhase::Newborn { progress } => progress.clamp(0.0, 1.0),
            _ => 1.0,
        }
    }

    pub fn fade(&self) -> Option<f32> {
        match self.phase {
            StarPhase::Consumed { fade } => Some(fade),
            _ => None,
        }
    }

    /// Start the detection flash. No-op on consumed or already-flashing stars.
    pub fn detect(&mut self, rate: f32) -> bool {
        if self.is_consumed() || self.is_flashing() {
            return false;
        }
        self.phase = StarPhase::Idle;
        self.flash = Some(Flash { progress: 0.0, rate });
        true
    }

    /// Mark as eaten. Returns false if it already was.
    pub fn consume(&mut self) -> bool {
        if self.is_consumed() {
            return false;
        }
        self.phase = StarPhase::Consumed { fade: 1.0 };
        true
    }

    /// Drift and advance animations. Returns true once a consumed star has fully faded.
    pub fn update(&mut self, tuning: &Tuning) -> bool {
        self.world += self.velocity;

        if let Some(flash) = self.flash.as_mut() {
            flash.progress += flash.rate;
            if flash.progress >= 1.0 {
                self.flash = None;
            }
        }

        match &mut self.phase {
            StarPhase::Newborn { progress } => {
                *progress += tuning.birth_rate;
                if *progress >= 1.0 {
                    self.phase = StarPhase::Idle;
                }
                false
            }
            StarPhase::Idle => false,
            StarPhase::Consumed { fade } => {
                *fade = (*fade - tuning.fade_rate).max(0.0);
                *fade <= 0.0
            }
        }
    }
}

/// Static background point.
#[derive(Clone, Debug)]
pub struct Galaxy {
    pub pos: Vec2,
    pub size: f32,
    pub brightness: f32,
}

impl Galaxy {
    pub fn random_at(pos: Vec2, rng: &mut impl Rng) -> Self {
        Self {
            pos,
            size: rng.gen_range(1.0..4.0),
            brightness: rng.gen_range(0.5..1.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    fn idle_star(value: u32) -> Star {
        let mut s = Star::new(Vec2::ZERO, Vec2::ZERO, value).unwrap();
        s.phase = StarPhase::Idle;
        s
    }

    #[test]
    fn non_finite_stars_are_rejected() {
        assert!(Star::new(vec2(f32::NAN, 0.0), Vec2::ZERO, 20).is_none());
        assert!(Star::new(Vec2::ZERO, vec2(0.0, f32::INFINITY), 20).is_none());
    }

    #[test]
    fn random_values_stay_in_range_and_size_is_half() {
        let tuning = Tuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(5);
        for _ in 0..500 {
            let s = Star::random_at(Vec2::ZERO, &mut rng, &tuning).unwrap();
            assert!((10..=50).contains(&s.value));
            assert_eq!(s.size(), s.value as f32 / 2.0);
            assert!(s.velocity.x.abs() <= 0.25 && s.velocity.y.abs() <= 0.25);
            assert!(s.is_newborn());
        }
    }

    #[test]
    fn consumption_is_one_way() {
        let tuning = Tuning::default();
        let mut star = idle_star(30);
        assert!(star.consume());
        assert!(!star.consume());
        assert!(!star.detect(0.05));
        for _ in 0..10 {
            star.update(&tuning);
            assert!(star.is_consumed());
        }
    }

    #[test]
    fn consumed_star_fades_out_in_bounded_time() {
        let tuning = Tuning::default();
        let mut star = idle_star(30);
        star.consume();
        let mut ticks = 0;
        while !star.update(&tuning) {
            ticks += 1;
            assert!(ticks < 100);
        }
        assert_eq!(star.fade(), Some(0.0));
    }

    #[test]
    fn flash_ramps_up_then_down_and_terminates() {
        let tuning = Tuning::default();
        let mut star = idle_star(10);
        assert!(star.detect(tuning.flash_rate(star.value)));
        assert!(!star.detect(tuning.flash_rate(star.value)));

        let mut peak = 0.0f32;
        let mut ticks = 0;
        while let Some(flash) = star.flash {
            peak = peak.max(flash.intensity());
            star.update(&tuning);
            ticks += 1;
            assert!(ticks < 100);
        }
        assert!(peak > 0.9);
        assert!(!star.is_flashing());
    }

    #[test]
    fn detecting_a_newborn_completes_its_birth() {
        let mut star = Star::new(Vec2::ZERO, Vec2::ZERO, 20).unwrap();
        assert!(star.is_newborn());
        star.detect(0.05);
        assert_eq!(star.phase, StarPhase::Idle);
        assert!(star.is_flashing());
    }

    #[test]
    fn birth_completes_into_idle() {
        let tuning = Tuning::default();
        let mut star = Star::new(Vec2::ZERO, vec2(0.1, 0.0), 20).unwrap();
        for _ in 0..30 {
            star.update(&tuning);
        }
        assert_eq!(star.phase, StarPhase::Idle);
        assert!((star.world.x - 3.0).abs() < 1e-3);
    }
}
