use macroquad::prelude::*;

use crate::entity::Star;
use crate::simulation::WorldState;
use crate::visual::{self, Twinkle, VisualQuality, VisualSettings};

const SNAKE_LINE_WIDTH: f32 = 10.0;
const SNAKE_GLOW_RADIUS: f32 = 15.0;
const HEAD_RADIUS: f32 = 8.0;
const HEAD_GLOW_RADIUS: f32 = 20.0;
const EYE_OFFSET: f32 = 3.0;
const EYE_RADIUS: f32 = 2.0;
const DEBUG_FONT_SIZE: f32 = 14.0;

const HALO_INNER: Color = Color::new(1.0, 100.0 / 255.0, 100.0 / 255.0, 0.3);
const HALO_OUTER: Color = Color::new(1.0, 100.0 / 255.0, 100.0 / 255.0, 0.0);
const CORE_INNER: Color = Color::new(1.0, 50.0 / 255.0, 50.0 / 255.0, 1.0);
const CORE_OUTER: Color = Color::new(1.0, 100.0 / 255.0, 100.0 / 255.0, 0.5);
const EYE_COLOR: Color = Color::new(0.0, 0.0, 1.0, 1.0);

/// Screen-space drawing primitive. The composer only emits these; the
/// executor turns them into macroquad calls.
#[derive(Clone, Debug, PartialEq)]
pub enum DrawCommand {
    /// Radial gradient filling the whole surface.
    Background {
        size: Vec2,
        center: Vec2,
        radius: f32,
        inner: Color,
        outer: Color,
    },
    Circle {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    RadialGradient {
        center: Vec2,
        radius: f32,
        inner: Color,
        outer: Color,
    },
    /// Soft additive halo.
    Glow {
        center: Vec2,
        radius: f32,
        color: Color,
    },
    /// Stroked line with round caps and an optional glow underlay.
    Stroke {
        from: Vec2,
        to: Vec2,
        width: f32,
        color: Color,
        glow: Option<Color>,
    },
    Text {
        text: String,
        pos: Vec2,
        size: f32,
        color: Color,
    },
}

/// Project the world into a frame: background, galaxies, stars, snake, head, overlay.
pub fn compose(
    state: &WorldState,
    settings: &VisualSettings,
    twinkle: Option<&Twinkle>,
) -> Vec<DrawCommand> {
    let mut out = Vec::with_capacity(state.galaxies.len() + state.stars.len() * 3 + state.snake.len() + 8);
    let vp = &state.viewport;
    let hue = state.hue;
    let time = state.tick_count as f32;

    out.push(DrawCommand::Background {
        size: vec2(vp.width, vp.height),
        center: vp.center(),
        radius: vp.width * 0.5,
        inner: visual::hsl(hue, 0.5, 0.2),
        outer: visual::hsl(hue, 0.5, 0.05),
    });

    for galaxy in &state.galaxies {
        let screen = state.camera.world_to_screen(galaxy.pos, vp);
        if !screen.is_finite() || !vp.contains(screen, galaxy.size) {
            continue;
        }
        let shimmer = match twinkle {
            Some(t) if settings.galaxy_twinkle => t.factor(galaxy.pos.x, galaxy.pos.y, time),
            _ => 1.0,
        };
        out.push(DrawCommand::Circle {
            center: screen,
            radius: galaxy.size,
            color: visual::hsla(hue, 1.0, 0.8, galaxy.brightness * shimmer),
        });
    }

    for star in &state.stars {
        compose_star(&mut out, star, state, settings);
    }

    compose_snake(&mut out, state, settings);

    if settings.show_debug {
        let head = state.snake.head();
        let offset = state.camera.offset;
        let lines = [
            format!("Snake Head: ({}, {})", head.x.round(), head.y.round()),
            format!("Camera Offset: ({}, {})", offset.x.round(), offset.y.round()),
            format!("Stars: {}", state.stars.len()),
        ];
        for (i, text) in lines.into_iter().enumerate() {
            out.push(DrawCommand::Text {
                text,
                pos: vec2(10.0, 20.0 + 20.0 * i as f32),
                size: DEBUG_FONT_SIZE,
                color: WHITE,
            });
        }
    }

    out
}

fn compose_star(out: &mut Vec<DrawCommand>, star: &Star, state: &WorldState, settings: &VisualSettings) {
    let pos = star.screen;
    // Skip the draw only; the star stays in the pool until it despawns.
    if !pos.is_finite() {
        return;
    }
    if !state.viewport.contains(pos, star.halo_size() * 2.0) {
        return;
    }

    if let Some(flash) = star.flash {
        out.push(DrawCommand::Circle {
            center: pos,
            radius: star.size() * 2.0,
            color: Color::new(1.0, 1.0, 1.0, flash.intensity()),
        });
    }

    if let Some(fade) = star.fade() {
        out.push(DrawCommand::Circle {
            center: pos,
            radius: star.halo_size() * 2.0,
            color: Color::new(1.0, 1.0, 1.0, fade),
        });
        return;
    }

    let scale = star.birth_scale();
    if star.is_newborn() && settings.glow_enabled {
        out.push(DrawCommand::Glow {
            center: pos,
            radius: star.halo_size() * (2.0 - scale),
            color: visual::hsla(state.stripe_hue, 1.0, 0.7, 0.4 * (1.0 - scale)),
        });
    }
    out.push(DrawCommand::RadialGradient {
        center: pos,
        radius: star.halo_size() * scale,
        inner: HALO_INNER,
        outer: HALO_OUTER,
    });
    out.push(DrawCommand::RadialGradient {
        center: pos,
        radius: star.size() * scale,
        inner: CORE_INNER,
        outer: CORE_OUTER,
    });
}

fn compose_snake(out: &mut Vec<DrawCommand>, state: &WorldState, settings: &VisualSettings) {
    let segments = &state.snake.segments;
    let Some(&head) = segments.front() else {
        return;
    };
    let center = state.viewport.center();
    let time = state.tick_count as f32;
    let to_screen = |p: Vec2| center + (p - head);

    // Tail first so the head end paints on top.
    for i in (0..segments.len()).rev() {
        let to = to_screen(segments[i]);
        let from = segments.get(i + 1).map(|&p| to_screen(p)).unwrap_or(to);
        if !from.is_finite() || !to.is_finite() {
            continue;
        }
        let segment_hue = (state.hue + i as f32 * 2.0) % 360.0;
        let intensity = ((time * 0.1 + i as f32 * 0.1).sin() + 1.0) / 2.0;
        out.push(DrawCommand::Stroke {
            from,
            to,
            width: SNAKE_LINE_WIDTH,
            color: visual::hsl(segment_hue, 1.0, 0.5 + intensity * 0.5),
            glow: settings
                .glow_enabled
                .then(|| visual::hsla(segment_hue, 1.0, 0.7, 1.0)),
        });
    }

    if settings.glow_enabled {
        out.push(DrawCommand::Glow {
            center,
            radius: HEAD_GLOW_RADIUS,
            color: Color::new(1.0, 1.0, 1.0, 0.8),
        });
    }
    out.push(DrawCommand::Circle {
        center,
        radius: HEAD_RADIUS,
        color: WHITE,
    });

    let dir = Vec2::from_angle(state.snake.heading);
    let perp = vec2(-dir.y, dir.x);
    for side in [1.0, -1.0] {
        out.push(DrawCommand::Circle {
            center: center + dir * EYE_OFFSET + perp * EYE_OFFSET * side,
            radius: EYE_RADIUS,
            color: EYE_COLOR,
        });
    }
}

/// Replay a composed frame through macroquad. Gradients and glows are
/// approximated with stacked translucent rings.
pub fn execute(commands: &[DrawCommand], quality: VisualQuality) {
    let steps = quality.gradient_steps();
    for cmd in commands {
        match cmd {
            DrawCommand::Background {
                size,
                center,
                radius,
                inner,
                outer,
            } => {
                draw_rectangle(0.0, 0.0, size.x, size.y, *outer);
                let rings = steps * 2;
                for k in 0..rings {
                    let t = (k + 1) as f32 / rings as f32;
                    let r = radius * (1.0 - k as f32 / rings as f32);
                    draw_circle(center.x, center.y, r, visual::mix(*outer, *inner, t));
                }
            }
            DrawCommand::Circle {
                center,
                radius,
                color,
            } => draw_circle(center.x, center.y, *radius, *color),
            DrawCommand::RadialGradient {
                center,
                radius,
                inner,
                outer,
            } => {
                for k in 0..steps {
                    let t = k as f32 / steps as f32;
                    let r = radius * (1.0 - t);
                    let c = visual::mix(*outer, *inner, t);
                    // Rings stack, so spread the target alpha across them.
                    draw_circle(center.x, center.y, r, visual::with_alpha(c, c.a / steps as f32 * 2.0));
                }
            }
            DrawCommand::Glow {
                center,
                radius,
                color,
            } => {
                for k in 0..steps {
                    let t = k as f32 / steps as f32;
                    let r = radius * (1.0 - t * 0.8);
                    draw_circle(center.x, center.y, r, visual::with_alpha(*color, color.a / steps as f32));
                }
            }
            DrawCommand::Stroke {
                from,
                to,
                width,
                color,
                glow,
            } => {
                if let Some(g) = glow {
                    let w = width + SNAKE_GLOW_RADIUS;
                    draw_line(from.x, from.y, to.x, to.y, w, visual::with_alpha(*g, 0.12));
                    draw_circle(to.x, to.y, w * 0.5, visual::with_alpha(*g, 0.06));
                }
                draw_line(from.x, from.y, to.x, to.y, *width, *color);
                draw_circle(from.x, from.y, width * 0.5, *color);
                draw_circle(to.x, to.y, width * 0.5, *color);
            }
            DrawCommand::Text {
                text,
                pos,
                size,
                color,
            } => {
                draw_text(text, pos.x, pos.y, *size, *color);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Tuning;
    use crate::entity::StarPhase;
    use crate::world::Viewport;

    fn world() -> WorldState {
        WorldState::new(Viewport::new(800.0, 600.0), Tuning::default(), 21)
    }

    fn star_on_screen(state: &WorldState, at: Vec2) -> Star {
        let world = state.camera.screen_to_world(at, &state.viewport);
        let mut star = Star::new(world, Vec2::ZERO, 30).unwrap();
        star.screen = at;
        star.phase = StarPhase::Idle;
        star
    }

    #[test]
    fn frame_starts_with_background_and_ends_with_head_and_eyes() {
        let state = world();
        let frame = compose(&state, &VisualSettings::default(), None);

        assert!(matches!(frame.first(), Some(DrawCommand::Background { .. })));
        let tail: Vec<_> = frame.iter().rev().take(3).collect();
        let center = state.viewport.center();
        assert!(matches!(tail[2], DrawCommand::Circle { center: c, radius, .. } if *c == center && *radius == HEAD_RADIUS));
        assert!(matches!(tail[0], DrawCommand::Circle { radius, .. } if *radius == EYE_RADIUS));
        assert!(matches!(tail[1], DrawCommand::Circle { radius, .. } if *radius == EYE_RADIUS));
    }

    #[test]
    fn debug_overlay_only_when_enabled() {
        let state = world();
        let quiet = compose(&state, &VisualSettings::default(), None);
        assert!(!quiet.iter().any(|c| matches!(c, DrawCommand::Text { .. })));

        let settings = VisualSettings {
            show_debug: true,
            ..VisualSettings::default()
        };
        let frame = compose(&state, &settings, None);
        let texts: Vec<&str> = frame
            .iter()
            .filter_map(|c| match c {
                DrawCommand::Text { text, .. } => Some(text.as_str()),
                _ => None,
            })
            .collect();
        assert_eq!(texts.len(), 3);
        assert!(texts[0].starts_with("Snake Head: ("));
        assert!(texts[1].starts_with("Camera Offset: ("));
        assert_eq!(texts[2], format!("Stars: {}", state.stars.len()));
    }

    #[test]
    fn non_finite_star_is_skipped() {
        let mut state = world();
        state.stars.clear();
        let mut star = star_on_screen(&state, vec2(400.0, 300.0));
        star.screen = vec2(f32::NAN, 10.0);
        state.stars.push(star);

        let frame = compose(&state, &VisualSettings::default(), None);
        assert!(!frame
            .iter()
            .any(|c| matches!(c, DrawCommand::RadialGradient { .. })));
    }

    #[test]
    fn consumed_star_draws_fading_white_disc_only() {
        let mut state = world();
        state.stars.clear();
        let mut star = star_on_screen(&state, vec2(200.0, 200.0));
        star.phase = StarPhase::Consumed { fade: 0.4 };
        let halo = star.halo_size();
        state.stars.push(star);

        let frame = compose(&state, &VisualSettings::default(), None);
        assert!(!frame
            .iter()
            .any(|c| matches!(c, DrawCommand::RadialGradient { .. })));
        assert!(frame.iter().any(|c| matches!(
            c,
            DrawCommand::Circle { center, radius, color }
                if *center == vec2(200.0, 200.0) && *radius == halo * 2.0 && (color.a - 0.4).abs() < 1e-6
        )));
    }

    #[test]
    fn snake_draws_one_stroke_per_segment() {
        let state = world();
        let frame = compose(&state, &VisualSettings::default(), None);
        let strokes = frame
            .iter()
            .filter(|c| matches!(c, DrawCommand::Stroke { .. }))
            .count();
        assert_eq!(strokes, state.snake.len());
    }

    #[test]
    fn glow_can_be_disabled() {
        let state = world();
        let settings = VisualSettings {
            glow_enabled: false,
            ..VisualSettings::default()
        };
        let frame = compose(&state, &settings, None);
        assert!(!frame.iter().any(|c| matches!(c, DrawCommand::Glow { .. })));
        assert!(frame
            .iter()
            .all(|c| !matches!(c, DrawCommand::Stroke { glow: Some(_), .. })));
    }
}
