use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Which side of the diff a line comment belongs to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum LineSide {
    /// Pre-image lines (keyed by old line numbers)
    Old,
    /// Post-image lines (keyed by new line numbers)
    #[default]
    New,
}

impl LineSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            LineSide::Old => "old",
            LineSide::New => "new",
        }
    }
}

/// Inclusive, 1-based span of lines on one side.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct LineRange {
    pub start: u32,
    pub end: u32,
}

impl LineRange {
    /// Bounds may be given in either order (a drag can go upwards).
    pub fn new(a: u32, b: u32) -> Self {
        Self {
            start: a.min(b),
            end: a.max(b),
        }
    }

    pub fn single(line: u32) -> Self {
        Self::new(line, line)
    }

    pub fn contains(&self, line: u32) -> bool {
        (self.start..=self.end).contains(&line)
    }

    /// False for ranges touching line 0.
    pub fn is_valid(&self) -> bool {
        self.start >= 1 && self.start <= self.end
    }

    /// Whether every line of the range exists on a side with `line_count` lines.
    pub fn fits_within(&self, line_count: usize) -> bool {
        self.end as usize <= line_count
    }
}

/// A note anchored to a line range on one side of a file's diff.
///
/// Line numbers live in the side's own numbering space, not in diff row
/// indices, so a comment keeps pointing at the same content when the diff is
/// recomputed. Comments are never edited in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Comment {
    pub id: String,
    pub side: LineSide,
    pub file_path: String,
    pub line_range: LineRange,
    pub content: String,
    pub created_at: DateTime<Utc>,
}

impl Comment {
    pub fn new(draft: CommentDraft) -> Self {
        Self {
            id: uuid::Uuid::new_v4().to_string(),
            side: draft.side,
            file_path: draft.file_path,
            line_range: draft.line_range,
            content: draft.content,
            created_at: Utc::now(),
        }
    }

    pub fn covers(&self, file_path: &str, side: LineSide, line: u32) -> bool {
        self.side == side && self.file_path == file_path && self.line_range.contains(line)
    }
}

/// Everything a user supplies when submitting a comment; id and timestamp are
/// assigned by the store.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommentDraft {
    pub side: LineSide,
    pub file_path: String,
    pub line_range: LineRange,
    pub content: String,
}
