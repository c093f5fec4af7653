pub mod file_tree;
pub mod split_view;
pub mod styles;

pub use file_tree::render_items;
pub use split_view::render_rows;
