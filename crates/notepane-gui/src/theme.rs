/// Colour scheme and visual theme for Notepane.
///
/// Two Ayu palettes: Mirage for dark mode and Light for light mode. All
/// colours live here so widgets refer to semantic names, never hex codes.
use crate::state::StatusKind;
use egui::{Color32, Stroke, Visuals};

/// Which theme is active.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ThemeMode {
    Dark,
    Light,
}

impl ThemeMode {
    pub fn from_dark(dark: bool) -> Self {
        if dark {
            Self::Dark
        } else {
            Self::Light
        }
    }

    pub fn is_dark(self) -> bool {
        self == Self::Dark
    }

    /// Toggle between dark and light.
    pub fn toggle(&mut self) {
        *self = match self {
            Self::Dark => Self::Light,
            Self::Light => Self::Dark,
        };
    }

    /// Glyph for the toggle button: the mode you would switch *to*.
    pub fn toggle_icon(self) -> &'static str {
        match self {
            Self::Dark => "☀",
            Self::Light => "🌙",
        }
    }
}

/// Semantic colour palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NotepaneTheme {
    pub background: Color32,
    pub surface: Color32,
    pub surface_hover: Color32,
    pub text_primary: Color32,
    pub text_muted: Color32,
    pub selection: Color32,
    /// Buttons, links, directory labels.
    pub accent: Color32,
    pub error: Color32,
    pub success: Color32,
    pub warning: Color32,
}

impl NotepaneTheme {
    /// Ayu Mirage -- the default.
    pub fn dark() -> Self {
        let surface = Color32::from_rgb(0x23, 0x29, 0x36);
        let selection = Color32::from_rgb(0x34, 0x3f, 0x4c);
        Self {
            background: Color32::from_rgb(0x1f, 0x24, 0x30),
            surface,
            surface_hover: lerp_color(surface, selection, 0.5),
            text_primary: Color32::from_rgb(0xcb, 0xcc, 0xc6),
            text_muted: Color32::from_rgb(0x5c, 0x67, 0x73),
            selection,
            accent: Color32::from_rgb(0x73, 0xd0, 0xff),
            error: Color32::from_rgb(0xf2, 0x8b, 0x82),
            success: Color32::from_rgb(0xba, 0xe6, 0x7e),
            warning: Color32::from_rgb(0xff, 0xd5, 0x80),
        }
    }

    /// Ayu Light.
    pub fn light() -> Self {
        let surface = Color32::from_rgb(0xff, 0xff, 0xff);
        let selection = Color32::from_rgb(0xd1, 0xe4, 0xf4);
        Self {
            background: Color32::from_rgb(0xfa, 0xfa, 0xfa),
            surface,
            surface_hover: lerp_color(surface, selection, 0.5),
            text_primary: Color32::from_rgb(0x57, 0x5f, 0x66),
            text_muted: Color32::from_rgb(0xab, 0xb0, 0xb6),
            selection,
            accent: Color32::from_rgb(0x39, 0x9e, 0xe6),
            error: Color32::from_rgb(0xf0, 0x71, 0x71),
            success: Color32::from_rgb(0x86, 0xb3, 0x00),
            warning: Color32::from_rgb(0xf2, 0xae, 0x49),
        }
    }

    /// Get the theme for the given mode.
    pub fn for_mode(mode: ThemeMode) -> Self {
        match mode {
            ThemeMode::Dark => Self::dark(),
            ThemeMode::Light => Self::light(),
        }
    }

    /// Colour of a status-line message.
    pub fn status_color(&self, kind: StatusKind) -> Color32 {
        match kind {
            StatusKind::Success => self.success,
            StatusKind::Warning => self.warning,
            StatusKind::Error => self.error,
        }
    }

    /// Apply this theme to an egui context.
    pub fn apply(&self, ctx: &egui::Context) {
        let mut style = (*ctx.style()).clone();

        let mut visuals = if self.background.r() < 128 {
            Visuals::dark()
        } else {
            Visuals::light()
        };

        visuals.panel_fill = self.background;
        visuals.window_fill = self.surface;
        visuals.extreme_bg_color = self.surface;
        visuals.faint_bg_color = self.surface;
        visuals.code_bg_color = self.selection;
        visuals.hyperlink_color = self.accent;
        visuals.selection.bg_fill = self.selection;
        visuals.selection.stroke = Stroke::new(1.0, self.accent);

        visuals.widgets.noninteractive.bg_fill = self.surface;
        visuals.widgets.noninteractive.bg_stroke = Stroke::new(1.0, self.selection);
        visuals.widgets.noninteractive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.inactive.bg_fill = self.surface;
        visuals.widgets.inactive.weak_bg_fill = self.surface;
        visuals.widgets.inactive.fg_stroke = Stroke::new(1.0, self.text_primary);

        visuals.widgets.hovered.bg_fill = self.surface_hover;
        visuals.widgets.hovered.weak_bg_fill = self.surface_hover;
        visuals.widgets.hovered.fg_stroke = Stroke::new(1.0, self.accent);

        visuals.widgets.active.bg_fill = self.accent;
        visuals.widgets.active.weak_bg_fill = self.accent;
        visuals.widgets.active.fg_stroke = Stroke::new(1.0, self.background);

        visuals.window_stroke = Stroke::new(1.0, self.selection);

        style.visuals = visuals;
        style.spacing.item_spacing = egui::vec2(8.0, 4.0);
        style.spacing.button_padding = egui::vec2(8.0, 4.0);

        ctx.set_style(style);
    }
}

/// Linear interpolation between two colours.
fn lerp_color(a: Color32, b: Color32, t: f32) -> Color32 {
    let t = t.clamp(0.0, 1.0);
    Color32::from_rgb(
        (a.r() as f32 * (1.0 - t) + b.r() as f32 * t) as u8,
        (a.g() as f32 * (1.0 - t) + b.g() as f32 * t) as u8,
        (a.b() as f32 * (1.0 - t) + b.b() as f32 * t) as u8,
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_toggle_round_trips() {
        let mut mode = ThemeMode::from_dark(true);
        mode.toggle();
        assert_eq!(mode, ThemeMode::Light);
        assert_eq!(mode.toggle_icon(), "🌙");
        mode.toggle();
        assert!(mode.is_dark());
    }

    #[test]
    fn test_palettes_differ_in_brightness() {
        assert!(NotepaneTheme::dark().background.r() < 128);
        assert!(NotepaneTheme::light().background.r() >= 128);
    }

    #[test]
    fn test_status_colors() {
        for theme in [NotepaneTheme::dark(), NotepaneTheme::light()] {
            assert_eq!(theme.status_color(StatusKind::Success), theme.success);
            assert_eq!(theme.status_color(StatusKind::Warning), theme.warning);
            assert_eq!(theme.status_color(StatusKind::Error), theme.error);
            assert_ne!(theme.success, theme.error);
        }
    }

    #[test]
    fn test_lerp_endpoints() {
        let a = Color32::from_rgb(0, 0, 0);
        let b = Color32::from_rgb(200, 100, 50);
        assert_eq!(lerp_color(a, b, 0.0), a);
        assert_eq!(lerp_color(a, b, 1.0), b);
        assert_eq!(lerp_color(a, b, 0.5), Color32::from_rgb(100, 50, 25));
    }
}
