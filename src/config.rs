// All tunable constants in one place. `Tuning` mirrors them so a JSON file
// can override any subset at startup.

use serde::Deserialize;
use std::f32::consts::PI;

// Simulation
pub const FIXED_DT: f32 = 1.0 / 60.0;

// Snake
pub const SNAKE_SPEED: f32 = 2.0;
pub const SNAKE_TURN_RATE: f32 = 0.02;
pub const SNAKE_WANDER_CHANCE: f32 = 0.025;
pub const SNAKE_WANDER_SPAN: f32 = PI * 0.4; // total span, delta is ±half
pub const SNAKE_INITIAL_LENGTH: usize = 30;

// Stars
pub const MIN_STARS: usize = 30;
pub const MAX_STARS: usize = 100;
pub const STAR_TOP_UP_CHANCE: f32 = 0.5;
pub const STAR_VALUE_MIN: u32 = 10;
pub const STAR_VALUE_MAX: u32 = 50;
pub const STAR_DRIFT: f32 = 0.25;
pub const STAR_BIRTH_RATE: f32 = 0.04;
pub const STAR_FADE_RATE: f32 = 0.02;
pub const FLASH_RATE_SMALL: f32 = 0.05;
pub const FLASH_RATE_MEDIUM: f32 = 0.035;
pub const FLASH_RATE_LARGE: f32 = 0.025;
pub const FLASH_TIER_MEDIUM: u32 = 25;
pub const FLASH_TIER_LARGE: u32 = 40;

// Streaming / proximity
pub const VISIBLE_RANGE: f32 = 1000.0;
pub const DETECTION_RADIUS: f32 = 150.0;
pub const COLLISION_PAD: f32 = 25.0;
pub const SCREEN_MARGIN: f32 = 100.0;

// Galaxies
pub const GALAXY_COUNT: usize = 100;

// Audio
pub const TONE_FREQ_MIN: f32 = 261.63; // C4
pub const TONE_FREQ_MAX: f32 = 1046.50; // C6
pub const TONE_GAIN: f32 = 0.5;
pub const TONE_DURATION: f32 = 0.3;
pub const MIN_TIME_BETWEEN_SOUNDS: f64 = 0.1;

// Colour cycling
pub const HUE_STEP: f32 = 0.1;
pub const STRIPE_HUE_STEP: f32 = 0.5;

/// Runtime view of the constants above.
#[derive(Clone, Debug, Deserialize, PartialEq)]
#[serde(default)]
pub struct Tuning {
    pub snake_speed: f32,
    pub turn_rate: f32,
    pub wander_chance: f32,
    pub wander_span: f32,
    pub initial_length: usize,
    pub min_stars: usize,
    pub max_stars: usize,
    pub top_up_chance: f32,
    pub value_min: u32,
    pub value_max: u32,
    pub star_drift: f32,
    pub birth_rate: f32,
    pub fade_rate: f32,
    pub flash_rate_small: f32,
    pub flash_rate_medium: f32,
    pub flash_rate_large: f32,
    pub visible_range: f32,
    pub detection_radius: f32,
    pub collision_pad: f32,
    pub screen_margin: f32,
    pub galaxy_count: usize,
    pub tone_freq_min: f32,
    pub tone_freq_max: f32,
    pub tone_gain: f32,
    pub tone_duration: f32,
    pub min_time_between_sounds: f64,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            snake_speed: SNAKE_SPEED,
            turn_rate: SNAKE_TURN_RATE,
            wander_chance: SNAKE_WANDER_CHANCE,
            wander_span: SNAKE_WANDER_SPAN,
            initial_length: SNAKE_INITIAL_LENGTH,
            min_stars: MIN_STARS,
            max_stars: MAX_STARS,
            top_up_chance: STAR_TOP_UP_CHANCE,
            value_min: STAR_VALUE_MIN,
            value_max: STAR_VALUE_MAX,
            star_drift: STAR_DRIFT,
            birth_rate: STAR_BIRTH_RATE,
            fade_rate: STAR_FADE_RATE,
            flash_rate_small: FLASH_RATE_SMALL,
            flash_rate_medium: FLASH_RATE_MEDIUM,
            flash_rate_large: FLASH_RATE_LARGE,
            visible_range: VISIBLE_RANGE,
            detection_radius: DETECTION_RADIUS,
            collision_pad: COLLISION_PAD,
            screen_margin: SCREEN_MARGIN,
            galaxy_count: GALAXY_COUNT,
            tone_freq_min: TONE_FREQ_MIN,
            tone_freq_max: TONE_FREQ_MAX,
            tone_gain: TONE_GAIN,
            tone_duration: TONE_DURATION,
            min_time_between_sounds: MIN_TIME_BETWEEN_SOUNDS,
        }
    }
}

impl Tuning {
    /// Parse a JSON tuning file. Missing fields keep their defaults.
    pub fn from_json(text: &str) -> Result<Self, String> {
        let tuning: Tuning =
            serde_json::from_str(text).map_err(|e| format!("Parse error: {e}"))?;
        tuning.validate()?;
        Ok(tuning)
    }

    pub fn load(path: &str) -> Result<Self, String> {
        let text = std::fs::read_to_string(path).map_err(|e| format!("Read error: {e}"))?;
        Self::from_json(&text)
    }

    pub fn validate(&self) -> Result<(), String> {
        let positive = [
            ("snake_speed", self.snake_speed),
            ("turn_rate", self.turn_rate),
            ("birth_rate", self.birth_rate),
            ("fade_rate", self.fade_rate),
            ("flash_rate_small", self.flash_rate_small),
            ("flash_rate_medium", self.flash_rate_medium),
            ("flash_rate_large", self.flash_rate_large),
            ("visible_range", self.visible_range),
            ("detection_radius", self.detection_radius),
            ("tone_duration", self.tone_duration),
        ];
        for (name, value) in positive {
            if !value.is_finite() || value <= 0.0 {
                return Err(format!("{name} must be a positive number (got {value})"));
            }
        }

        let non_negative = [
            ("wander_span", self.wander_span),
            ("star_drift", self.star_drift),
            ("collision_pad", self.collision_pad),
            ("screen_margin", self.screen_margin),
            ("tone_gain", self.tone_gain),
        ];
        for (name, value) in non_negative {
            if !value.is_finite() || value < 0.0 {
                return Err(format!("{name} must be finite and >= 0 (got {value})"));
            }
        }

        for (name, p) in [
            ("wander_chance", self.wander_chance),
            ("top_up_chance", self.top_up_chance),
        ] {
            if !(0.0..=1.0).contains(&p) {
                return Err(format!("{name} must be a probability in [0, 1] (got {p})"));
            }
        }
        if self.min_stars > self.max_stars {
            return Err(format!(
                "min_stars ({}) exceeds max_stars ({})",
                self.min_stars, self.max_stars
            ));
        }
        if self.value_min == 0 || self.value_min > self.value_max {
            return Err(format!(
                "invalid star value range [{}, {}]",
                self.value_min, self.value_max
            ));
        }
        if !(self.tone_freq_min > 0.0 && self.tone_freq_min < self.tone_freq_max) {
            return Err(format!(
                "invalid tone range [{}, {}]",
                self.tone_freq_min, self.tone_freq_max
            ));
        }
        if self.initial_length == 0 {
            return Err("initial_length must be at least 1".to_string());
        }
        if !self.min_time_between_sounds.is_finite() || self.min_time_between_sounds < 0.0 {
            return Err("min_time_between_sounds must be finite and >= 0".to_string());
        }
        Ok(())
    }

    /// Flash envelope speed for a star of the given value. Larger stars flash longer.
    pub fn flash_rate(&self, value: u32) -> f32 {
        if value < FLASH_TIER_MEDIUM {
            self.flash_rate_small
        } else if value < FLASH_TIER_LARGE {
            self.flash_rate_medium
        } else {
            self.flash_rate_large
        }
    }
}
