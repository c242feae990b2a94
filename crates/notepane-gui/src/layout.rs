/// Responsive layout selection.
///
/// Narrow windows (phones, split screens) get the single-pane mobile
/// layout with a bottom navigation bar; everything else gets the desktop
/// layout with a fixed-width tree panel beside the editor.

/// Below this logical width (points) the mobile layout is used.
pub const MOBILE_BREAKPOINT_PT: f32 = 600.0;

/// Below this physical width (pixels) the mobile layout is used regardless
/// of scale factor.
pub const MOBILE_BREAKPOINT_PX: f32 = 800.0;

/// Width of the desktop tree panel in points.
pub const TREE_PANEL_WIDTH: f32 = 280.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LayoutMode {
    /// Tree or editor, one at a time, with a bottom navigation bar.
    Mobile,
    /// Tree panel and editor side by side.
    Desktop,
}

impl LayoutMode {
    /// Pick the layout for a window `width_pt` points wide.
    pub fn for_width(width_pt: f32, pixels_per_point: f32) -> Self {
        if width_pt < MOBILE_BREAKPOINT_PT || width_pt * pixels_per_point < MOBILE_BREAKPOINT_PX {
            Self::Mobile
        } else {
            Self::Desktop
        }
    }

    /// Layout for the current frame.
    pub fn from_ctx(ctx: &egui::Context) -> Self {
        Self::for_width(ctx.screen_rect().width(), ctx.pixels_per_point())
    }

    pub fn is_mobile(self) -> bool {
        self == Self::Mobile
    }
}
