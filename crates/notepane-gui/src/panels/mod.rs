/// Top-level panels composed by `app.rs`.
pub mod editor_panel;
pub mod tree_panel;
