use macroquad::prelude::*;

/// Output surface dimensions. Fixed for the duration of a frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Viewport {
    pub width: f32,
    pub height: f32,
}

impl Viewport {
    /// Non-finite or non-positive sizes collapse to a 1x1 surface so that
    /// downstream screen-space math always stays finite.
    pub fn new(width: f32, height: f32) -> Self {
        let sanitize = |v: f32| if v.is_finite() && v >= 1.0 { v } else { 1.0 };
        Self {
            width: sanitize(width),
            height: sanitize(height),
        }
    }

    pub fn half(&self) -> Vec2 {
        vec2(self.width * 0.5, self.height * 0.5)
    }

    /// Screen centre, where the snake head is always drawn.
    pub fn center(&self) -> Vec2 {
        self.half()
    }

    /// Half the diagonal: any point farther than this from the centre is off screen.
    pub fn radius(&self) -> f32 {
        self.half().length()
    }

    /// Whether a screen position lies inside the surface grown by `margin` on every side.
    pub fn contains(&self, screen: Vec2, margin: f32) -> bool {
        screen.x >= -margin
            && screen.x <= self.width + margin
            && screen.y >= -margin
            && screen.y <= self.height + margin
    }

    /// Distance from a screen position to the centre.
    pub fn distance_to_center(&self, screen: Vec2) -> f32 {
        (screen - self.center()).length()
    }
}
