use eframe::egui::Color32;
use palette::{Hsl, IntoColor, LinSrgb, Mix, Srgb};

// ---------------------------------------------------------------------------
// Dashboard palette (carried over from the original Superstore report)
// ---------------------------------------------------------------------------

pub const BACKGROUND: Color32 = Color32::from_rgb(0xf5, 0xee, 0xe7);
pub const PRIMARY: Color32 = Color32::from_rgb(0x9e, 0xb9, 0x44);
pub const SECONDARY: Color32 = Color32::from_rgb(0xe6, 0xc2, 0x3e);
pub const TERTIARY: Color32 = Color32::from_rgb(0x4b, 0x79, 0x1c);
pub const TEXT: Color32 = Color32::from_rgb(0x27, 0x4e, 0x13);
pub const NEUTRAL: Color32 = Color32::from_rgb(0xcc, 0xcc, 0xcc);

// ---------------------------------------------------------------------------
// Categorical series colours (ship modes)
// ---------------------------------------------------------------------------

/// Colours for a categorical series: the dashboard palette covers the first
/// four entries (enough for the four Superstore ship modes), evenly spaced
/// hues fill in beyond that.
pub fn series_colors(n: usize) -> Vec<Color32> {
    const FIXED: [Color32; 4] = [PRIMARY, SECONDARY, TERTIARY, NEUTRAL];
    if n <= FIXED.len() {
        return FIXED[..n].to_vec();
    }
    let mut colors = FIXED.to_vec();
    colors.extend(generate_palette(n - FIXED.len()));
    colors
}

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
            Color32::from_rgb(
                (rgb.red * 255.0).round() as u8,
                (rgb.green * 255.0).round() as u8,
                (rgb.blue * 255.0).round() as u8,
            )
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Heatmap gradient
// ---------------------------------------------------------------------------

/// Heatmap cell colour: white → dark green ramp, `t` clamped to `[0, 1]`.
/// Mixing happens in linear RGB so the midtones stay even.
pub fn heatmap_color(t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    let white: LinSrgb = Srgb::new(1.0_f32, 1.0, 1.0).into_linear();
    let green: LinSrgb = Srgb::new(
        TERTIARY.r() as f32 / 255.0,
        TERTIARY.g() as f32 / 255.0,
        TERTIARY.b() as f32 / 255.0,
    )
    .into_linear();

    let srgb: Srgb = Srgb::from_linear(white.mix(green, t));
    Color32::from_rgb(
        (srgb.red * 255.0).round() as u8,
        (srgb.green * 255.0).round() as u8,
        (srgb.blue * 255.0).round() as u8,
    )
}
