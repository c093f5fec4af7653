//! Side-by-side line diffs with lexical highlighting and line-range comments.
//!
//! The crate is a backend for review front-ends: [`diff`] aligns two
//! versions of a file, [`syntax`] colors each line, [`annotations`] keeps the
//! comment list in a [`persistence::KeyValueStore`], and [`app::App`] ties them
//! together behind pointer-driven line selection. [`ui`] lays the result out
//! as ratatui lines.

pub mod annotations;
pub mod app;
pub mod changes;
pub mod config;
pub mod diff;
pub mod error;
pub mod model;
pub mod persistence;
pub mod syntax;
pub mod theme;
pub mod tree;
pub mod ui;

pub use annotations::AnnotationStore;
pub use app::App;
pub use error::{Result, ReviewError};
