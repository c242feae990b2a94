/// Main `eframe::App` implementation for notepane.
///
/// Composes the tree panel, the editor panel and, on narrow windows, the
/// mobile navigation bar.
use crate::keymap;
use crate::layout::{LayoutMode, TREE_PANEL_WIDTH};
use crate::panels;
use crate::state::{AppPhase, AppState};
use crate::theme::NotepaneTheme;
use crate::widgets;
use notepane_core::access::ContentAccess;
use notepane_core::config::Settings;
use std::sync::Arc;
use std::time::Duration;

/// Pre-built application state.
///
/// Construct this before calling `eframe::run_native` so the initial vault
/// scan is already running when the window appears.
pub struct NotepaneState {
    pub(crate) inner: AppState,
}

impl NotepaneState {
    pub fn build(settings: &Settings, access: Arc<dyn ContentAccess>) -> Self {
        Self {
            inner: AppState::from_settings(access, settings),
        }
    }
}

/// The notepane application.
pub struct NotepaneApp {
    state: AppState,
    title: String,
}

impl NotepaneApp {
    /// Create the application from state built by [`NotepaneState::build()`].
    pub fn with_state(cc: &eframe::CreationContext<'_>, state: NotepaneState) -> Self {
        NotepaneTheme::for_mode(state.inner.theme).apply(&cc.egui_ctx);
        Self {
            state: state.inner,
            title: String::new(),
        }
    }
}

impl eframe::App for NotepaneApp {
    /// Match the GPU clear colour to the theme background so there is no
    /// flash between frames.
    fn clear_color(&self, visuals: &egui::Visuals) -> [f32; 4] {
        let [r, g, b, a] = visuals.panel_fill.to_array();
        [
            r as f32 / 255.0,
            g as f32 / 255.0,
            b as f32 / 255.0,
            a as f32 / 255.0,
        ]
    }

    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // Every frame, so a theme toggle shows on the next one.
        NotepaneTheme::for_mode(self.state.theme).apply(ctx);
        self.state.layout = LayoutMode::from_ctx(ctx);

        // ── Background results ─────────────────────────
        self.state.process_scan_messages();
        self.state.process_picker();

        for action in keymap::collect(ctx, self.state.tree_focused) {
            self.state.apply_action(action);
        }

        if self.state.phase == AppPhase::Scanning || self.state.picker.is_open() {
            ctx.request_repaint_after(Duration::from_millis(100));
        }

        let title = self.state.window_title();
        if title != self.title {
            ctx.send_viewport_cmd(egui::ViewportCommand::Title(title.clone()));
            self.title = title;
        }

        if self.state.layout.is_mobile() {
            self.mobile(ctx);
        } else {
            self.desktop(ctx);
        }
    }
}

impl NotepaneApp {
    /// Fixed-width tree on the left, editor filling the rest.
    fn desktop(&mut self, ctx: &egui::Context) {
        egui::SidePanel::left("tree_panel")
            .exact_width(TREE_PANEL_WIDTH)
            .resizable(false)
            .show(ctx, |ui| {
                panels::tree_panel::tree_panel(ui, &mut self.state);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            panels::editor_panel::editor_panel(ui, &mut self.state);
        });
    }

    /// One pane at a time with a navigation bar along the bottom.
    fn mobile(&mut self, ctx: &egui::Context) {
        egui::TopBottomPanel::bottom("mobile_nav")
            .min_height(40.0)
            .show(ctx, |ui| {
                ui.add_space(4.0);
                widgets::mobile_nav::mobile_nav(ui, &mut self.state);
                ui.add_space(4.0);
            });

        egui::CentralPanel::default().show(ctx, |ui| {
            if self.state.showing_editor {
                panels::editor_panel::editor_panel(ui, &mut self.state);
            } else {
                panels::tree_panel::tree_panel(ui, &mut self.state);
            }
        });
    }
}
