use macroquad::prelude::*;

use crate::camera::Camera;
use crate::config::Tuning;
use crate::entity::Star;
use crate::spawner;
use crate::world::Viewport;

/// A star came within detection range of the head this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DetectionEvent {
    pub value: u32,
    pub distance: f32,
    pub screen: Vec2,
}

/// A star was eaten this tick.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ConsumeEvent {
    pub value: u32,
    pub screen: Vec2,
}

#[derive(Clone, Debug, Default)]
pub struct ProximityReport {
    pub detections: Vec<DetectionEvent>,
    pub consumed: Vec<ConsumeEvent>,
    pub despawned: usize,
}

impl ProximityReport {
    /// Total length the snake should gain from this tick's meals.
    pub fn growth(&self) -> u32 {
        self.consumed.iter().map(|c| c.value).sum()
    }
}

/// Advance every star, then test it against the head at the screen centre.
///
/// Detection runs before collision, and both only apply to stars that were
/// not already consumed when the pass reached them, so a star produces its
/// chime on the tick it is eaten and never afterwards. Stars that have
/// scrolled off screen (or never arrived and drifted past the streaming
/// horizon) are dropped, as are consumed stars whose fade has finished.
pub fn resolve_stars(
    stars: &mut Vec<Star>,
    camera: &Camera,
    viewport: &Viewport,
    tuning: &Tuning,
) -> ProximityReport {
    let mut report = ProximityReport::default();
    let horizon = spawner::star_horizon(viewport, tuning);
    let before = stars.len();

    stars.retain_mut(|star| {
        let faded = star.update(tuning);

        star.screen = camera.world_to_screen(star.world, viewport);
        let on_screen = viewport.contains(star.screen, tuning.screen_margin);
        if on_screen {
            star.seen = true;
        }
        let distance = viewport.distance_to_center(star.screen);

        if !star.is_consumed() && on_screen {
            if distance < tuning.detection_radius && star.detect(tuning.flash_rate(star.value)) {
                report.detections.push(DetectionEvent {
                    value: star.value,
                    distance,
                    screen: star.screen,
                });
            }

            let collision_radius = star.size() + tuning.collision_pad;
            if distance < collision_radius && star.consume() {
                report.consumed.push(ConsumeEvent {
                    value: star.value,
                    screen: star.screen,
                });
            }
        }

        match star.fade() {
            Some(fade) => !faded && fade > 0.0,
            None if star.seen => on_screen,
            None => distance <= horizon,
        }
    });

    report.despawned = before - stars.len();
    report
}
