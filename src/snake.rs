use macroquad::prelude::*;
use ::rand::Rng;
use std::collections::VecDeque;

use crate::config::Tuning;

/// The wandering snake. Segment 0 is the head; the body trails behind it.
#[derive(Clone, Debug)]
pub struct Snake {
    pub segments: VecDeque<Vec2>,
    pub heading: f32,
    pub target_heading: f32,
    pub target_length: usize,
}

impl Snake {
    /// All `length` segments start stacked on `start` and unfurl as the snake moves.
    pub fn new(start: Vec2, length: usize) -> Self {
        let length = length.max(1);
        Self {
            segments: std::iter::repeat(start).take(length).collect(),
            heading: 0.0,
            target_heading: 0.0,
            target_length: length,
        }
    }

    pub fn head(&self) -> Vec2 {
        self.segments.front().copied().unwrap_or(Vec2::ZERO)
    }

    pub fn len(&self) -> usize {
        self.segments.len()
    }

    /// Raise the target length. The body converges one segment per tick.
    pub fn grow(&mut self, amount: u32) {
        self.target_length = self.target_length.saturating_add(amount as usize);
    }

    /// Occasionally nudge the target heading.
    pub fn wander(&mut self, rng: &mut impl Rng, tuning: &Tuning) {
        if rng.gen::<f32>() < tuning.wander_chance {
            let half = tuning.wander_span * 0.5;
            if half > 0.0 {
                self.target_heading += rng.gen_range(-half..half);
            }
        }
    }

    /// Ease the heading toward the target. Working on the sine of the
    /// difference keeps the step bounded by `turn_rate` and wrap-free.
    pub fn turn(&mut self, turn_rate: f32) {
        self.heading += (self.target_heading - self.heading).sin() * turn_rate;
    }

    /// Step the head forward and trim the tail down to the target length.
    pub fn advance(&mut self, speed: f32) {
        let next = self.head() + Vec2::from_angle(self.heading) * speed;
        self.segments.push_front(next);
        while self.segments.len() > self.target_length {
            self.segments.pop_back();
        }
    }

    /// One locomotion tick: wander, turn, advance.
    pub fn update(&mut self, rng: &mut impl Rng, tuning: &Tuning) {
        self.wander(rng, tuning);
        self.turn(tuning.turn_rate);
        self.advance(tuning.snake_speed);
    }
}
