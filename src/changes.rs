//! Change list records and `git status --porcelain` parsing.

use serde::{Deserialize, Serialize};

use crate::model::FileStatus;

/// One changed path as reported by the host's VCS poller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChangedFile {
    #[serde(with = "status_code")]
    pub status: FileStatus,
    pub path: String,
}

impl ChangedFile {
    pub fn new(status: FileStatus, path: impl Into<String>) -> Self {
        Self {
            status,
            path: path.into(),
        }
    }
}

/// Statuses travel as their single-letter code (`M`, `A`, `D`, `?`, ...).
mod status_code {
    use serde::{Deserialize, Deserializer, Serializer};

    use crate::model::FileStatus;

    pub fn serialize<S: Serializer>(status: &FileStatus, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&status.as_char().to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<FileStatus, D::Error> {
        let code = String::deserialize(deserializer)?;
        Ok(FileStatus::from_code(&code))
    }
}

/// Parse `git status --porcelain` (v1) output.
///
/// Renames and copies (`R  old -> new`) report the new path.
pub fn parse_porcelain(output: &str) -> Vec<ChangedFile> {
    output
        .lines()
        .filter(|line| !line.trim().is_empty())
        .map(|line| {
            let code = line.get(..2).unwrap_or("??");
            let raw_path = line.get(2..).unwrap_or("").trim_start();
            let path = match raw_path.rsplit_once(" -> ") {
                Some((_, new_path)) => new_path,
                None => raw_path,
            };
            ChangedFile::new(FileStatus::from_code(code), path)
        })
        .collect()
}
