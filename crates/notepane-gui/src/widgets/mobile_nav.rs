/// Bottom navigation bar for the mobile layout.
use crate::state::AppState;
use crate::theme::NotepaneTheme;
use egui::Ui;

pub fn mobile_nav(ui: &mut Ui, state: &mut AppState) {
    let theme = NotepaneTheme::for_mode(state.theme);
    let tab = |label: &str, active: bool| {
        let text = egui::RichText::new(label).size(15.0);
        if active {
            text.strong().color(theme.accent)
        } else {
            text.color(theme.text_primary)
        }
    };

    ui.columns(4, |columns| {
        if columns[0]
            .add(egui::Button::new(tab("Files", !state.showing_editor)).frame(false))
            .clicked()
        {
            state.showing_editor = false;
            state.tree_focused = true;
        }

        if columns[1]
            .add(egui::Button::new(tab("Editor", state.showing_editor)).frame(false))
            .clicked()
        {
            state.showing_editor = true;
            state.tree_focused = false;
        }

        if columns[2]
            .add_enabled(
                !state.picker.is_open(),
                egui::Button::new(tab("Open", false)).frame(false),
            )
            .clicked()
        {
            state.picker.open_vault();
        }

        let theme_label = if state.dark_mode() { "Light" } else { "Dark" };
        if columns[3]
            .add(egui::Button::new(tab(theme_label, false)).frame(false))
            .clicked()
        {
            state.toggle_theme();
        }
    });
}
