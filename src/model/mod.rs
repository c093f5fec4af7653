pub mod comment;
pub mod diff_types;

pub use comment::{Comment, CommentDraft, LineRange, LineSide};
pub use diff_types::{DiffRow, FileStatus, RowKind};
