/// Notepane GUI -- egui frontend.
///
/// All UI code lives here: the vault tree, the markdown viewer and editor,
/// theming and layout. Vault access and scanning live in `notepane-core`.
pub mod app;
pub mod document;
pub mod icon;
pub mod keymap;
pub mod layout;
pub mod markdown;
pub mod panels;
pub mod picker;
pub mod state;
pub mod theme;
pub mod widgets;

pub use app::{NotepaneApp, NotepaneState};
