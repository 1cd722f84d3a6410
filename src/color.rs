use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Mix, Srgb};

use crate::data::model::Tier;

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Generates `n` visually distinct colours using evenly spaced hues.
pub fn generate_palette(n: usize) -> Vec<Color32> {
    if n == 0 {
        return Vec::new();
    }
    (0..n)
        .map(|i| {
            let hue = (i as f32 / n as f32) * 360.0;
            let hsl = Hsl::new(hue, 0.75, 0.55);
            let rgb: Srgb = hsl.into_color();
            to_color32(rgb)
        })
        .collect()
}

fn to_color32(rgb: Srgb) -> Color32 {
    Color32::from_rgb(
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    )
}

/// Sequential blue scale: `t = 0` is pale, `t = 1` is deep blue.
pub fn blues(t: f64) -> Color32 {
    let t = if t.is_finite() { t.clamp(0.0, 1.0) } else { 0.0 };
    let pale = Srgb::new(0.87_f32, 0.92, 0.97).into_linear();
    let deep = Srgb::new(0.03_f32, 0.19, 0.42).into_linear();
    let mixed: Srgb = Srgb::from_linear(pale.mix(deep, t as f32));
    to_color32(mixed)
}

// ---------------------------------------------------------------------------
// Tier colours
// ---------------------------------------------------------------------------

/// One fixed colour per tier, assigned along the ladder.
#[derive(Debug, Clone)]
pub struct TierColors {
    colors: Vec<Color32>,
}

impl Default for TierColors {
    fn default() -> Self {
        Self {
            colors: generate_palette(Tier::COUNT),
        }
    }
}

impl TierColors {
    pub fn color_for(&self, tier: Tier) -> Color32 {
        self.colors
            .get(tier.ordinal())
            .copied()
            .unwrap_or(Color32::GRAY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_has_requested_size() {
        assert!(generate_palette(0).is_empty());
        assert_eq!(generate_palette(10).len(), 10);
    }

    #[test]
    fn every_tier_gets_a_distinct_colour() {
        let colors = TierColors::default();
        let mut seen: Vec<Color32> = Tier::ALL.iter().map(|&t| colors.color_for(t)).collect();
        seen.dedup();
        assert_eq!(seen.len(), Tier::COUNT);
    }

    #[test]
    fn blue_scale_darkens() {
        let light = blues(0.0);
        let dark = blues(1.0);
        assert!(dark.b() < light.b() || dark.r() < light.r());
        assert_eq!(blues(f64::NAN), light);
        assert_eq!(blues(7.0), dark);
    }
}
