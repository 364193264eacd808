use macroquad::prelude::*;

use crate::world::Viewport;

/// Scrolling offset derived from the snake head. Holds no state beyond the
/// two offset scalars; rebuilt once per tick after locomotion.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Camera {
    pub offset: Vec2,
}

impl Camera {
    pub fn from_head(head: Vec2, viewport: &Viewport) -> Self {
        Self {
            offset: head - viewport.half(),
        }
    }

    /// Recompute the offset in place.
    pub fn track(&mut self, head: Vec2, viewport: &Viewport) {
        *self = Self::from_head(head, viewport);
    }

    pub fn world_to_screen(&self, world: Vec2, viewport: &Viewport) -> Vec2 {
        world - self.offset + viewport.half()
    }

    pub fn screen_to_world(&self, screen: Vec2, viewport: &Viewport) -> Vec2 {
        screen + self.offset - viewport.half()
    }
}
