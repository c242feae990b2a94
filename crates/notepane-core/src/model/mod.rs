/// Data model for the scanned vault tree.
pub mod node;

pub use node::Node;
