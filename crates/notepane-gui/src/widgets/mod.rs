/// Reusable widgets.
pub mod markdown_view;
pub mod mobile_nav;
pub mod toolbar;
pub mod tree_view;
