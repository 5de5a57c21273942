use eframe::egui::Color32;
use palette::{Hsl, IntoColor, Srgb};

// ---------------------------------------------------------------------------
// Color palette generator
// ---------------------------------------------------------------------------

/// Colour of slot `slot` in a palette of `n` evenly spaced hues.
pub fn hue_color(slot: usize, n: usize) -> [u8; 3] {
    let n = n.max(1);
    let hue = ((slot % n) as f32 / n as f32) * 360.0;
    let hsl = Hsl::new(hue, 0.75, 0.55);
    let rgb: Srgb = hsl.into_color();
    [
        (rgb.red * 255.0) as u8,
        (rgb.green * 255.0) as u8,
        (rgb.blue * 255.0) as u8,
    ]
}

/// egui colour for a dataset slot; `translucent` halves the opacity.
pub fn slot_color32(slot: usize, n: usize, translucent: bool) -> Color32 {
    let [r, g, b] = hue_color(slot, n);
    let alpha = if translucent { 128 } else { 255 };
    Color32::from_rgba_unmultiplied(r, g, b, alpha)
}

/// Blend `rgb` halfway towards white; stands in for 50 % opacity on media
/// without alpha compositing.
pub fn lighten(rgb: [u8; 3]) -> [u8; 3] {
    rgb.map(|c| ((c as u16 + 255) / 2) as u8)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_colors_are_distinct() {
        let colors: Vec<[u8; 3]> = (0..4).map(|i| hue_color(i, 4)).collect();
        assert_eq!(colors.len(), 4);
        for (i, a) in colors.iter().enumerate() {
            for b in &colors[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn slots_wrap_around_the_palette() {
        assert_eq!(hue_color(5, 3), hue_color(2, 3));
        assert_eq!(hue_color(0, 0), hue_color(0, 1));
    }

    #[test]
    fn lighten_moves_towards_white() {
        assert_eq!(lighten([0, 255, 100]), [127, 255, 177]);
    }
}
