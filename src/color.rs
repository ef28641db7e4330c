/*
 * Color Module
 *
 * Small color helpers shared by the scenes and the overlay panels:
 * HSL to RGB conversion for randomized particle tints, and parsing of
 * the hex color strings found in the planet and era data.
 */

use nannou::prelude::*;

// Convert HSL (all components in 0..1) to an RGB color
pub fn hsl_to_rgb(h: f32, s: f32, l: f32) -> Rgb {
    let h = h.rem_euclid(1.0);
    let s = s.clamp(0.0, 1.0);
    let l = l.clamp(0.0, 1.0);

    if s == 0.0 {
        return Rgb::new(l, l, l);
    }

    let q = if l < 0.5 { l * (1.0 + s) } else { l + s - l * s };
    let p = 2.0 * l - q;

    Rgb::new(
        hue_to_channel(p, q, h + 1.0 / 3.0),
        hue_to_channel(p, q, h),
        hue_to_channel(p, q, h - 1.0 / 3.0),
    )
}

fn hue_to_channel(p: f32, q: f32, t: f32) -> f32 {
    let t = t.rem_euclid(1.0);
    if t < 1.0 / 6.0 {
        p + (q - p) * 6.0 * t
    } else if t < 0.5 {
        q
    } else if t < 2.0 / 3.0 {
        p + (q - p) * (2.0 / 3.0 - t) * 6.0
    } else {
        p
    }
}

// Build a color from a packed 0xRRGGBB value
pub fn from_hex(hex: u32) -> Rgb {
    let r = ((hex >> 16) & 0xff) as f32 / 255.0;
    let g = ((hex >> 8) & 0xff) as f32 / 255.0;
    let b = (hex & 0xff) as f32 / 255.0;
    Rgb::new(r, g, b)
}

// Parse "#RRGGBB" (leading '#' optional)
pub fn parse_hex(text: &str) -> Option<Rgb> {
    let digits = text.trim().trim_start_matches('#');
    if digits.len() != 6 {
        return None;
    }
    u32::from_str_radix(digits, 16).ok().map(from_hex)
}

// Scale a color toward white by `amount` (0 = unchanged, 1 = white)
pub fn brighten(color: Rgb, amount: f32) -> Rgb {
    let amount = amount.clamp(0.0, 1.0);
    Rgb::new(
        color.red + (1.0 - color.red) * amount,
        color.green + (1.0 - color.green) * amount,
        color.blue + (1.0 - color.blue) * amount,
    )
}

pub fn with_alpha(color: Rgb, alpha: f32) -> Rgba {
    rgba(color.red, color.green, color.blue, alpha.clamp(0.0, 1.0))
}

pub fn to_egui(color: Rgb) -> nannou_egui::egui::Color32 {
    let channel = |c: f32| (c.clamp(0.0, 1.0) * 255.0).round() as u8;
    nannou_egui::egui::Color32::from_rgb(channel(color.red), channel(color.green), channel(color.blue))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn close(a: f32, b: f32) -> bool {
        (a - b).abs() < 1e-3
    }

    #[test]
    fn hsl_primaries() {
        let red = hsl_to_rgb(0.0, 1.0, 0.5);
        assert!(close(red.red, 1.0) && close(red.green, 0.0) && close(red.blue, 0.0));

        let green = hsl_to_rgb(1.0 / 3.0, 1.0, 0.5);
        assert!(close(green.red, 0.0) && close(green.green, 1.0) && close(green.blue, 0.0));

        let white = hsl_to_rgb(0.42, 1.0, 1.0);
        assert!(close(white.red, 1.0) && close(white.green, 1.0) && close(white.blue, 1.0));
    }

    #[test]
    fn hsl_grey_when_unsaturated() {
        let grey = hsl_to_rgb(0.7, 0.0, 0.25);
        assert!(close(grey.red, 0.25) && close(grey.green, 0.25) && close(grey.blue, 0.25));
    }

    #[test]
    fn parses_hex_strings() {
        let c = parse_hex("#4A90E2").unwrap();
        assert!(close(c.red, 0x4a as f32 / 255.0));
        assert!(close(c.green, 0x90 as f32 / 255.0));
        assert!(close(c.blue, 0xe2 as f32 / 255.0));
        assert!(parse_hex("4a90e2").is_some());
        assert!(parse_hex("#4A90").is_none());
        assert!(parse_hex("#GGGGGG").is_none());
    }

    #[test]
    fn brighten_moves_toward_white() {
        let c = brighten(Rgb::new(0.2, 0.4, 1.0), 0.5);
        assert!(close(c.red, 0.6) && close(c.green, 0.7) && close(c.blue, 1.0));
    }
}
