use macroquad::prelude::*;
use ::rand::Rng;
use std::f32::consts::TAU;

use crate::camera::Camera;
use crate::config::Tuning;
use crate::entity::{Galaxy, Star};
use crate::world::Viewport;

/// Screen distance beyond which a never-seen star is dropped from the pool.
pub fn star_horizon(viewport: &Viewport, tuning: &Tuning) -> f32 {
    viewport.radius() + tuning.visible_range * 0.5 + tuning.screen_margin
}

/// Screen distance beyond which a galaxy is recycled.
pub fn galaxy_horizon(viewport: &Viewport, tuning: &Tuning) -> f32 {
    viewport.width + tuning.visible_range + tuning.screen_margin
}

/// Place a new star just outside the view, inside the streaming horizon.
pub fn spawn_star_ahead(
    stars: &mut Vec<Star>,
    camera: &Camera,
    viewport: &Viewport,
    rng: &mut impl Rng,
    tuning: &Tuning,
) -> bool {
    let angle = rng.gen_range(0.0..TAU);
    let reach = (tuning.visible_range * 0.5).max(1.0);
    let distance = viewport.radius() + rng.gen_range(1.0..=reach);
    let screen = viewport.center() + Vec2::from_angle(angle) * distance;
    let world = camera.screen_to_world(screen, viewport);

    match Star::random_at(world, rng, tuning) {
        Some(mut star) => {
            star.screen = screen;
            stars.push(star);
            true
        }
        None => false,
    }
}

/// Fill up to the floor, then keep adding with `top_up_chance` per roll until the ceiling.
pub fn top_up_stars(
    stars: &mut Vec<Star>,
    camera: &Camera,
    viewport: &Viewport,
    rng: &mut impl Rng,
    tuning: &Tuning,
) -> usize {
    let mut spawned = 0;
    while stars.len() < tuning.min_stars
        || (stars.len() < tuning.max_stars && rng.gen::<f32>() < tuning.top_up_chance)
    {
        if !spawn_star_ahead(stars, camera, viewport, rng, tuning) {
            break;
        }
        spawned += 1;
    }
    spawned
}

/// Scatter the initial galaxies over a square around the world origin.
pub fn seed_galaxies(rng: &mut impl Rng, tuning: &Tuning) -> Vec<Galaxy> {
    let r = tuning.visible_range;
    let mut galaxies = Vec::with_capacity(tuning.galaxy_count);
    for _ in 0..tuning.galaxy_count {
        let pos = vec2(rng.gen_range(-r..r), rng.gen_range(-r..r));
        galaxies.push(Galaxy::random_at(pos, rng));
    }
    galaxies
}

/// Add one galaxy on a ring around the camera, beyond the viewport.
pub fn spawn_far_galaxy(
    galaxies: &mut Vec<Galaxy>,
    camera: &Camera,
    viewport: &Viewport,
    rng: &mut impl Rng,
    tuning: &Tuning,
) {
    let angle = rng.gen_range(0.0..TAU);
    let distance = viewport.width + rng.gen_range(0.0..tuning.visible_range);
    let screen = viewport.center() + Vec2::from_angle(angle) * distance;
    galaxies.push(Galaxy::random_at(camera.screen_to_world(screen, viewport), rng));
}

/// Replace galaxies left behind past the horizon so the far background never thins out.
pub fn recycle_far_galaxies(
    galaxies: &mut Vec<Galaxy>,
    camera: &Camera,
    viewport: &Viewport,
    rng: &mut impl Rng,
    tuning: &Tuning,
) -> usize {
    let horizon = galaxy_horizon(viewport, tuning);
    let before = galaxies.len();
    galaxies.retain(|g| {
        let screen = camera.world_to_screen(g.pos, viewport);
        viewport.distance_to_center(screen) <= horizon
    });
    let removed = before - galaxies.len();
    for _ in 0..removed {
        spawn_far_galaxy(galaxies, camera, viewport, rng, tuning);
    }
    removed
}

#[cfg(test)]
mod tests {
    use super::*;
    use ::rand::SeedableRng;
    use rand_chacha::ChaCha8Rng;

    #[test]
    fn spawned_stars_start_outside_the_view() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(1280.0, 800.0);
        let camera = Camera::from_head(vec2(340.0, -1200.0), &viewport);
        let mut rng = ChaCha8Rng::seed_from_u64(2024);
        let mut stars = Vec::new();

        for _ in 0..1000 {
            assert!(spawn_star_ahead(&mut stars, &camera, &viewport, &mut rng, &tuning));
        }
        for star in &stars {
            let screen = camera.world_to_screen(star.world, &viewport);
            let d = viewport.distance_to_center(screen);
            assert!(d > viewport.radius());
            assert!(d <= star_horizon(&viewport, &tuning));
            assert!((screen - star.screen).length() < 1e-2);
        }
    }

    #[test]
    fn top_up_reaches_floor_and_respects_ceiling() {
        let tuning = Tuning {
            top_up_chance: 1.0,
            ..Tuning::default()
        };
        let viewport = Viewport::new(800.0, 600.0);
        let camera = Camera::default();
        let mut rng = ChaCha8Rng::seed_from_u64(3);
        let mut stars = Vec::new();

        top_up_stars(&mut stars, &camera, &viewport, &mut rng, &tuning);
        assert_eq!(stars.len(), tuning.max_stars);

        let no_chance = Tuning {
            top_up_chance: 0.0,
            ..Tuning::default()
        };
        stars.clear();
        top_up_stars(&mut stars, &camera, &viewport, &mut rng, &no_chance);
        assert_eq!(stars.len(), no_chance.min_stars);
    }

    #[test]
    fn galaxies_seed_inside_square() {
        let tuning = Tuning::default();
        let mut rng = ChaCha8Rng::seed_from_u64(11);
        let galaxies = seed_galaxies(&mut rng, &tuning);
        assert_eq!(galaxies.len(), tuning.galaxy_count);
        for g in &galaxies {
            assert!(g.pos.x.abs() <= tuning.visible_range);
            assert!(g.pos.y.abs() <= tuning.visible_range);
            assert!((1.0..4.0).contains(&g.size));
            assert!((0.5..1.0).contains(&g.brightness));
        }
    }

    #[test]
    fn recycling_keeps_galaxy_count_and_moves_them_near_camera() {
        let tuning = Tuning::default();
        let viewport = Viewport::new(1000.0, 700.0);
        let mut rng = ChaCha8Rng::seed_from_u64(8);
        let mut galaxies = seed_galaxies(&mut rng, &tuning);

        let camera = Camera::from_head(vec2(50_000.0, 0.0), &viewport);
        let removed = recycle_far_galaxies(&mut galaxies, &camera, &viewport, &mut rng, &tuning);

        assert_eq!(removed, tuning.galaxy_count);
        assert_eq!(galaxies.len(), tuning.galaxy_count);
        let horizon = galaxy_horizon(&viewport, &tuning);
        for g in &galaxies {
            let d = viewport.distance_to_center(camera.world_to_screen(g.pos, &viewport));
            assert!(d >= viewport.width - 0.1 && d <= horizon);
        }
    }
}
