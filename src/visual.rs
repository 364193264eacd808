use macroquad::prelude::Color;
use noise::{Fbm, NoiseFn, Perlin};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum VisualQuality {
    Low,
    Medium,
    High,
}

impl VisualQuality {
    pub const ALL: [Self; 3] = [Self::Low, Self::Medium, Self::High];

    pub fn label(self) -> &'static str {
        match self {
            Self::Low => "Low",
            Self::Medium => "Medium",
            Self::High => "High",
        }
    }

    pub fn parse_cli(value: &str) -> Option<Self> {
        match value.to_ascii_lowercase().as_str() {
            "low" => Some(Self::Low),
            "med" | "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            _ => None,
        }
    }

    /// Concentric rings used to fake radial gradients and glow.
    pub fn gradient_steps(self) -> usize {
        match self {
            Self::Low => 4,
            Self::Medium => 8,
            Self::High => 14,
        }
    }
}

#[derive(Clone, Copy, Debug)]
pub struct VisualSettings {
    pub quality: VisualQuality,
    pub show_debug: bool,
    pub glow_enabled: bool,
    pub galaxy_twinkle: bool,
}

impl Default for VisualSettings {
    fn default() -> Self {
        Self {
            quality: VisualQuality::High,
            show_debug: false,
            glow_enabled: true,
            galaxy_twinkle: true,
        }
    }
}

/// CSS-style `hsla(h, s%, l%, a)` with `s` and `l` in [0, 1].
pub fn hsla(hue: f32, saturation: f32, lightness: f32, alpha: f32) -> Color {
    let h = hue.rem_euclid(360.0) / 60.0;
    let s = saturation.clamp(0.0, 1.0);
    let l = lightness.clamp(0.0, 1.0);

    let c = (1.0 - (2.0 * l - 1.0).abs()) * s;
    let x = c * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (c, x, 0.0),
        1 => (x, c, 0.0),
        2 => (0.0, c, x),
        3 => (0.0, x, c),
        4 => (x, 0.0, c),
        _ => (c, 0.0, x),
    };
    let m = l - c * 0.5;
    Color::new(r + m, g + m, b + m, alpha.clamp(0.0, 1.0))
}

pub fn hsl(hue: f32, saturation: f32, lightness: f32) -> Color {
    hsla(hue, saturation, lightness, 1.0)
}

pub fn with_alpha(color: Color, alpha: f32) -> Color {
    Color::new(color.r, color.g, color.b, alpha.clamp(0.0, 1.0))
}

/// Linear blend from `a` (t = 0) to `b` (t = 1).
pub fn mix(a: Color, b: Color, t: f32) -> Color {
    let t = t.clamp(0.0, 1.0);
    Color::new(
        a.r + (b.r - a.r) * t,
        a.g + (b.g - a.g) * t,
        a.b + (b.b - a.b) * t,
        a.a + (b.a - a.a) * t,
    )
}

/// Slow brightness shimmer for background galaxies.
pub struct Twinkle {
    fbm: Fbm<Perlin>,
}

impl Twinkle {
    pub fn new(seed: u32) -> Self {
        Self {
            fbm: Fbm::new(seed),
        }
    }

    /// Multiplier in [0.7, 1.0] that drifts with time and differs per position.
    pub fn factor(&self, x: f32, y: f32, time: f32) -> f32 {
        let n = self
            .fbm
            .get([x as f64 * 0.01, y as f64 * 0.01, time as f64 * 0.01]) as f32;
        0.85 + 0.15 * n.clamp(-1.0, 1.0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: Color, b: Color) -> bool {
        (a.r - b.r).abs() < 1e-3
            && (a.g - b.g).abs() < 1e-3
            && (a.b - b.b).abs() < 1e-3
            && (a.a - b.a).abs() < 1e-3
    }

    #[test]
    fn primary_hues_convert() {
        assert!(close(hsl(0.0, 1.0, 0.5), Color::new(1.0, 0.0, 0.0, 1.0)));
        assert!(close(hsl(120.0, 1.0, 0.5), Color::new(0.0, 1.0, 0.0, 1.0)));
        assert!(close(hsl(240.0, 1.0, 0.5), Color::new(0.0, 0.0, 1.0, 1.0)));
        assert!(close(hsl(360.0, 1.0, 0.5), hsl(0.0, 1.0, 0.5)));
    }

    #[test]
    fn lightness_extremes_are_black_and_white() {
        assert!(close(hsl(200.0, 0.5, 0.0), Color::new(0.0, 0.0, 0.0, 1.0)));
        assert!(close(hsl(200.0, 0.5, 1.0), Color::new(1.0, 1.0, 1.0, 1.0)));
    }

    #[test]
    fn twinkle_stays_in_band() {
        let t = Twinkle::new(4);
        for i in 0..200 {
            let f = t.factor(i as f32 * 13.0, i as f32 * -7.0, i as f32);
            assert!((0.7..=1.0).contains(&f));
        }
    }

    #[test]
    fn quality_parses_cli_names() {
        assert_eq!(VisualQuality::parse_cli("MED"), Some(VisualQuality::Medium));
        assert_eq!(VisualQuality::parse_cli("ultra"), None);
    }
}
