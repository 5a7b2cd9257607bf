//! Terminal output for the command line front end.

mod render;

pub use render::{render_tree, stdout_supports_color};
