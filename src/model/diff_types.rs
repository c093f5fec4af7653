use serde::{Deserialize, Serialize};

use super::comment::LineSide;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FileStatus {
    Added,
    Modified,
    Deleted,
    Renamed,
    Copied,
    Untracked,
    /// Any status code we do not recognize; displayed generically.
    Unknown,
}

impl FileStatus {
    /// Classify a status code such as `M`, `??` or `AM` by its first letter.
    pub fn from_code(code: &str) -> Self {
        match code.trim().chars().next() {
            Some('M') => FileStatus::Modified,
            Some('A') => FileStatus::Added,
            Some('D') => FileStatus::Deleted,
            Some('R') => FileStatus::Renamed,
            Some('C') => FileStatus::Copied,
            Some('?') => FileStatus::Untracked,
            _ => FileStatus::Unknown,
        }
    }

    pub fn as_char(&self) -> char {
        match self {
            FileStatus::Added => 'A',
            FileStatus::Modified => 'M',
            FileStatus::Deleted => 'D',
            FileStatus::Renamed => 'R',
            FileStatus::Copied => 'C',
            FileStatus::Untracked => '?',
            FileStatus::Unknown => '*',
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RowKind {
    Unchanged,
    Added,
    Removed,
    /// Placeholder opposite an added or removed line.
    Spacer,
}

/// One display line on one side of a side-by-side diff.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffRow {
    pub kind: RowKind,
    pub text: String,
    pub old_line: Option<u32>,
    pub new_line: Option<u32>,
}

impl DiffRow {
    pub fn unchanged(text: &str, old_line: u32, new_line: u32) -> Self {
        Self {
            kind: RowKind::Unchanged,
            text: text.to_string(),
            old_line: Some(old_line),
            new_line: Some(new_line),
        }
    }

    pub fn added(text: &str, new_line: u32) -> Self {
        Self {
            kind: RowKind::Added,
            text: text.to_string(),
            old_line: None,
            new_line: Some(new_line),
        }
    }

    pub fn removed(text: &str, old_line: u32) -> Self {
        Self {
            kind: RowKind::Removed,
            text: text.to_string(),
            old_line: Some(old_line),
            new_line: None,
        }
    }

    pub fn spacer() -> Self {
        Self {
            kind: RowKind::Spacer,
            text: String::new(),
            old_line: None,
            new_line: None,
        }
    }

    pub fn is_spacer(&self) -> bool {
        self.kind == RowKind::Spacer
    }

    /// The line number this row carries in the given side's numbering.
    pub fn line_for(&self, side: LineSide) -> Option<u32> {
        match side {
            LineSide::Old => self.old_line,
            LineSide::New => self.new_line,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_classify_status_codes() {
        assert_eq!(FileStatus::from_code("M"), FileStatus::Modified);
        assert_eq!(FileStatus::from_code("A"), FileStatus::Added);
        assert_eq!(FileStatus::from_code("D"), FileStatus::Deleted);
        assert_eq!(FileStatus::from_code("??"), FileStatus::Untracked);
        assert_eq!(FileStatus::from_code("?"), FileStatus::Untracked);
        assert_eq!(FileStatus::from_code("AM"), FileStatus::Added);
        assert_eq!(FileStatus::from_code(" M"), FileStatus::Modified);
    }

    #[test]
    fn should_degrade_unknown_codes() {
        assert_eq!(FileStatus::from_code("U"), FileStatus::Unknown);
        assert_eq!(FileStatus::from_code(""), FileStatus::Unknown);
        assert_eq!(FileStatus::Unknown.as_char(), '*');
    }

    #[test]
    fn spacer_has_no_line_numbers() {
        let row = DiffRow::spacer();
        assert!(row.is_spacer());
        assert_eq!(row.line_for(LineSide::Old), None);
        assert_eq!(row.line_for(LineSide::New), None);
    }

    #[test]
    fn line_for_picks_the_side_numbering() {
        let row = DiffRow::unchanged("x", 3, 5);
        assert_eq!(row.line_for(LineSide::Old), Some(3));
        assert_eq!(row.line_for(LineSide::New), Some(5));
    }
}
