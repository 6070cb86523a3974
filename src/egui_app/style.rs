use egui::{Color32, CornerRadius, Stroke, Visuals, style::WidgetVisuals};

use crate::support_api::Branding;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    pub bg_page: Color32,
    pub bg_panel: Color32,
    pub bg_field: Color32,
    pub border: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub error: Color32,
    pub primary: Color32,
    pub accent: Color32,
}

const FALLBACK_PRIMARY: Color32 = Color32::from_rgb(0x25, 0x63, 0xeb);
const FALLBACK_ACCENT: Color32 = Color32::from_rgb(0x10, 0xb9, 0x81);

/// Host palette with the backend's branding colours when they parse.
pub fn palette(branding: Option<&Branding>) -> Palette {
    let primary = branding
        .and_then(|branding| parse_hex_color(&branding.primary_color))
        .unwrap_or(FALLBACK_PRIMARY);
    let accent = branding
        .and_then(|branding| parse_hex_color(&branding.accent_color))
        .unwrap_or(FALLBACK_ACCENT);
    Palette {
        bg_page: Color32::from_rgb(243, 244, 246),
        bg_panel: Color32::WHITE,
        bg_field: Color32::from_rgb(249, 250, 251),
        border: Color32::from_rgb(209, 213, 219),
        text_primary: Color32::from_rgb(31, 41, 55),
        text_muted: Color32::from_rgb(107, 114, 128),
        error: Color32::from_rgb(220, 38, 38),
        primary,
        accent,
    }
}

/// Parse `#rgb` or `#rrggbb`.
pub fn parse_hex_color(raw: &str) -> Option<Color32> {
    let hex = raw.trim().strip_prefix('#')?;
    if !hex.chars().all(|ch| ch.is_ascii_hexdigit()) {
        return None;
    }
    let channel = |range: std::ops::Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    match hex.len() {
        3 => {
            let short = |index: usize| channel(index..index + 1).map(|value| value * 17);
            Some(Color32::from_rgb(short(0)?, short(1)?, short(2)?))
        }
        6 => Some(Color32::from_rgb(channel(0..2)?, channel(2..4)?, channel(4..6)?)),
        _ => None,
    }
}

pub fn apply_visuals(visuals: &mut Visuals, palette: Palette) {
    *visuals = Visuals::light();
    visuals.window_fill = palette.bg_panel;
    visuals.panel_fill = palette.bg_page;
    visuals.override_text_color = Some(palette.text_primary);
    visuals.extreme_bg_color = palette.bg_field;
    visuals.error_fg_color = palette.error;
    visuals.selection.bg_fill = palette.primary.linear_multiply(0.25);
    visuals.selection.stroke = Stroke::new(1.0, palette.primary);
    visuals.window_corner_radius = CornerRadius::same(12);
    set_rounded(&mut visuals.widgets.inactive, palette);
    set_rounded(&mut visuals.widgets.hovered, palette);
    set_rounded(&mut visuals.widgets.active, palette);
    visuals.widgets.hovered.bg_stroke = Stroke::new(1.0, palette.primary);
}

fn set_rounded(vis: &mut WidgetVisuals, palette: Palette) {
    vis.corner_radius = CornerRadius::same(8);
    vis.bg_stroke = Stroke::new(1.0, palette.border);
}
