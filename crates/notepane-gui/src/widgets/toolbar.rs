/// Vault toolbar -- vault name / path editor, open button, theme toggle.
///
/// Sits at the bottom of the desktop tree panel and at the top of the
/// mobile tree view.
use crate::keymap::{shortcut_label, Action};
use crate::state::{AppPhase, AppState};
use crate::theme::NotepaneTheme;
use egui::Ui;

/// Draw the toolbar.
pub fn toolbar(ui: &mut Ui, state: &mut AppState) {
    let theme = NotepaneTheme::for_mode(state.theme);

    if state.path_editor_open {
        path_editor(ui, state);
        ui.add_space(4.0);
    }

    ui.horizontal(|ui| {
        // Vault name doubles as the path editor toggle.
        let name = egui::RichText::new(format!("📁 {}", state.vault_name()))
            .strong()
            .color(theme.accent);
        if ui
            .add(egui::Button::new(name).frame(false))
            .on_hover_text(tooltip("Edit vault path", Action::TogglePathEditor))
            .clicked()
        {
            state.toggle_path_editor();
        }

        if state.phase == AppPhase::Scanning {
            ui.spinner();
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            let mode = state.theme;
            let theme_tip = if mode.is_dark() {
                "Switch to light mode"
            } else {
                "Switch to dark mode"
            };
            if ui
                .button(mode.toggle_icon())
                .on_hover_text(tooltip(theme_tip, Action::ToggleTheme))
                .clicked()
            {
                state.toggle_theme();
            }

            if ui
                .add_enabled(!state.picker.is_open(), egui::Button::new("Open"))
                .on_hover_text(tooltip("Open a vault folder", Action::OpenVault))
                .clicked()
            {
                state.picker.open_vault();
            }

            if state.tree.is_some()
                && ui
                    .add_enabled(state.phase != AppPhase::Scanning, egui::Button::new("⟳"))
                    .on_hover_text("Rescan vault")
                    .clicked()
            {
                state.rescan();
            }
        });
    });

    if let Some(status) = &state.status {
        ui.label(
            egui::RichText::new(&status.text)
                .size(11.0)
                .color(theme.status_color(status.kind)),
        );
    }
}

/// Single-line vault path input. Enter opens the vault, Escape closes.
fn path_editor(ui: &mut Ui, state: &mut AppState) {
    let response = ui.add(
        egui::TextEdit::singleline(&mut state.path_input)
            .hint_text("/path/to/vault")
            .desired_width(f32::INFINITY),
    );

    if response.lost_focus() {
        if ui.input(|i| i.key_pressed(egui::Key::Enter)) {
            state.submit_vault_path();
        } else if ui.input(|i| i.key_pressed(egui::Key::Escape)) {
            state.path_editor_open = false;
        }
    } else if std::mem::take(&mut state.focus_path_editor) {
        response.request_focus();
    }
}

fn tooltip(text: &str, action: Action) -> String {
    match shortcut_label(action) {
        Some(shortcut) => format!("{text} ({shortcut})"),
        None => text.to_string(),
    }
}
