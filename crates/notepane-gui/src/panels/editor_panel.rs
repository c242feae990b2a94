/// Editor panel: the open document in view or edit mode.
use crate::keymap::{shortcut_label, Action};
use crate::state::AppState;
use crate::theme::NotepaneTheme;
use crate::widgets::markdown_view::{markdown_view, BODY_SIZE};
use egui::Ui;

pub fn editor_panel(ui: &mut Ui, state: &mut AppState) {
    let theme = NotepaneTheme::for_mode(state.theme);

    if state.document.is_none() {
        ui.centered_and_justified(|ui| {
            ui.label(
                egui::RichText::new("Select a file")
                    .size(16.0)
                    .color(theme.text_muted),
            );
        });
        return;
    }

    header(ui, state, &theme);
    ui.separator();

    let Some(document) = &mut state.document else {
        return;
    };

    if document.is_editing() {
        let response = egui::ScrollArea::vertical()
            .auto_shrink([false, false])
            .show(ui, |ui| {
                ui.add_sized(
                    ui.available_size(),
                    egui::TextEdit::multiline(document.buffer_mut())
                        .font(egui::FontId::monospace(BODY_SIZE))
                        .frame(false)
                        .lock_focus(true),
                )
            })
            .inner;
        if response.has_focus() {
            state.tree_focused = false;
        }
        return;
    }

    let response = egui::ScrollArea::vertical()
        .auto_shrink([false, false])
        .show(ui, |ui| {
            if document.content().trim().is_empty() {
                ui.label(egui::RichText::new("(empty file)").color(theme.text_muted));
            } else {
                markdown_view(ui, document.blocks(), &theme);
            }
            ui.interact(ui.min_rect(), ui.id().with("viewer_bg"), egui::Sense::click())
        })
        .inner;
    if response.clicked() {
        state.tree_focused = false;
    }
}

/// File name, dirty marker, last save time and the Edit / Save buttons.
fn header(ui: &mut Ui, state: &mut AppState, theme: &NotepaneTheme) {
    let Some(document) = &state.document else {
        return;
    };
    let title = if document.is_dirty() {
        format!("{}*", document.name())
    } else {
        document.name().to_string()
    };
    let editing = document.is_editing();
    let can_save = document.is_dirty() || editing;
    let read_only = document.is_read_only();
    let saved_at = document
        .last_saved()
        .map(|t| format!("saved {}", t.format("%H:%M")));

    let mut toggle = false;
    let mut save = false;

    ui.horizontal(|ui| {
        ui.label(
            egui::RichText::new(title)
                .size(16.0)
                .strong()
                .color(theme.text_primary),
        );
        if let Some(saved_at) = saved_at {
            ui.label(egui::RichText::new(saved_at).size(11.0).color(theme.text_muted));
        }

        ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
            save = ui
                .add_enabled(can_save, egui::Button::new("Save"))
                .on_hover_text(shortcut_label(Action::Save).unwrap_or_default())
                .clicked();
            let label = if editing { "View" } else { "Edit" };
            toggle = ui
                .add_enabled(!read_only, egui::Button::new(label))
                .on_hover_text(shortcut_label(Action::ToggleEdit).unwrap_or_default())
                .on_disabled_hover_text("Not valid UTF-8; read-only")
                .clicked();
        });
    });

    if toggle {
        state.toggle_edit();
    }
    if save {
        state.save();
    }
}
