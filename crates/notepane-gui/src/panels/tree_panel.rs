/// Vault tree panel: the tree view with the vault toolbar beneath it.
use crate::state::AppState;
use crate::widgets;
use egui::Ui;

/// Draw the tree panel. On desktop the toolbar sits at the bottom; the
/// mobile layout puts it on top so it stays clear of the navigation bar.
pub fn tree_panel(ui: &mut Ui, state: &mut AppState) {
    if state.layout.is_mobile() {
        widgets::toolbar::toolbar(ui, state);
        ui.separator();
        widgets::tree_view::tree_view(ui, state);
        return;
    }

    egui::TopBottomPanel::bottom("vault_toolbar")
        .show_separator_line(true)
        .show_inside(ui, |ui| {
            ui.add_space(4.0);
            widgets::toolbar::toolbar(ui, state);
            ui.add_space(2.0);
        });

    egui::CentralPanel::default()
        .frame(egui::Frame::new())
        .show_inside(ui, |ui| {
            widgets::tree_view::tree_view(ui, state);
        });
}
