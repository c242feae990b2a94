/// Keyboard shortcuts.
///
/// Global bindings use `Modifiers::COMMAND` (Ctrl, or Cmd on macOS). The
/// tree takes bare arrow keys, Enter and Space, but only while it has
/// focus and no text field wants the keyboard.
use crate::state::TreeKey;
use egui::{Key, KeyboardShortcut, Modifiers};

/// Something a key press asks the application to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ToggleEdit,
    Save,
    FocusTree,
    FocusEditor,
    ToggleTheme,
    TogglePathEditor,
    OpenFile,
    OpenVault,
    Tree(TreeKey),
}

/// Global bindings, checked in order. Shifted variants come first because
/// shortcut matching ignores extra Shift.
pub const GLOBAL_BINDINGS: &[(Modifiers, Key, Action)] = &[
    (
        Modifiers::COMMAND.plus(Modifiers::SHIFT),
        Key::O,
        Action::OpenVault,
    ),
    (Modifiers::COMMAND, Key::O, Action::OpenFile),
    (Modifiers::COMMAND, Key::E, Action::ToggleEdit),
    (Modifiers::COMMAND, Key::S, Action::Save),
    (Modifiers::COMMAND, Key::ArrowLeft, Action::FocusTree),
    (Modifiers::COMMAND, Key::ArrowRight, Action::FocusEditor),
    (Modifiers::COMMAND, Key::T, Action::ToggleTheme),
    (Modifiers::COMMAND, Key::D, Action::TogglePathEditor),
];

/// Bare keys the focused tree responds to.
pub const TREE_BINDINGS: &[(Key, TreeKey)] = &[
    (Key::ArrowDown, TreeKey::Down),
    (Key::ArrowUp, TreeKey::Up),
    (Key::Enter, TreeKey::Toggle),
    (Key::Space, TreeKey::Toggle),
    (Key::ArrowRight, TreeKey::Expand),
    (Key::ArrowLeft, TreeKey::Collapse),
];

/// Consume this frame's key presses and return the matching actions.
pub fn collect(ctx: &egui::Context, tree_focused: bool) -> Vec<Action> {
    let tree_keys_active = tree_focused && !ctx.wants_keyboard_input();

    ctx.input_mut(|input| {
        let mut actions = Vec::new();
        for &(modifiers, key, action) in GLOBAL_BINDINGS {
            if input.consume_shortcut(&KeyboardShortcut::new(modifiers, key)) {
                actions.push(action);
            }
        }
        if tree_keys_active {
            for &(key, tree_key) in TREE_BINDINGS {
                if input.consume_key(Modifiers::NONE, key) {
                    actions.push(Action::Tree(tree_key));
                }
            }
        }
        actions
    })
}

/// Human-readable label for a global binding, for tooltips.
pub fn shortcut_label(action: Action) -> Option<String> {
    GLOBAL_BINDINGS
        .iter()
        .find(|(_, _, a)| *a == action)
        .map(|&(modifiers, key, _)| {
            let mut label = String::from("Ctrl+");
            if modifiers.shift {
                label.push_str("Shift+");
            }
            label.push_str(key.name());
            label
        })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_every_action_bound_once() {
        let actions = [
            Action::ToggleEdit,
            Action::Save,
            Action::FocusTree,
            Action::FocusEditor,
            Action::ToggleTheme,
            Action::TogglePathEditor,
            Action::OpenFile,
            Action::OpenVault,
        ];
        for action in actions {
            let count = GLOBAL_BINDINGS.iter().filter(|(_, _, a)| *a == action).count();
            assert_eq!(count, 1, "{action:?}");
        }
    }

    #[test]
    fn test_shifted_open_precedes_plain_open() {
        let vault = GLOBAL_BINDINGS
            .iter()
            .position(|(_, _, a)| *a == Action::OpenVault)
            .unwrap();
        let file = GLOBAL_BINDINGS
            .iter()
            .position(|(_, _, a)| *a == Action::OpenFile)
            .unwrap();
        assert!(vault < file);
    }

    #[test]
    fn test_shortcut_labels() {
        assert_eq!(shortcut_label(Action::Save).as_deref(), Some("Ctrl+S"));
        assert_eq!(
            shortcut_label(Action::OpenVault).as_deref(),
            Some("Ctrl+Shift+O")
        );
        assert_eq!(shortcut_label(Action::Tree(TreeKey::Down)), None);
    }
}
