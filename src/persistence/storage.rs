use base64::Engine;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use directories::ProjectDirs;
use sha2::{Digest, Sha256};
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::AppConfig;
use crate::error::{Result, ReviewError};
use crate::model::Comment;

/// Opaque blob storage addressed by session key.
///
/// Implementations must replace a key's value wholesale so an interrupted
/// write leaves the previous value readable.
pub trait KeyValueStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()>;

    /// `Ok(None)` when nothing was ever saved under `key`.
    fn load(&self, key: &str) -> Result<Option<String>>;
}

/// In-process store, handy for tests and for hosts without persistence.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        Ok(self.entries.get(key).cloned())
    }
}

/// One JSON file per session key inside a data directory.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Store under the platform data directory (e.g. `~/.local/share/sidenote/comments`).
    pub fn open_default() -> Result<Self> {
        let proj_dirs = ProjectDirs::from("", "", "sidenote").ok_or(ReviewError::NoDataDir)?;
        Ok(Self::new(proj_dirs.data_dir().join("comments")))
    }

    /// Honor `store_dir` from the config, falling back to the default location.
    pub fn from_config(config: &AppConfig) -> Result<Self> {
        match &config.store_dir {
            Some(dir) => Ok(Self::new(dir.clone())),
            None => Self::open_default(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        self.dir.join(format!("{}.json", file_stem(key)))
    }
}

impl KeyValueStore for FileStore {
    fn save(&mut self, key: &str, value: &str) -> Result<()> {
        fs::create_dir_all(&self.dir)?;
        let path = self.path_for(key);
        let tmp = path.with_extension("json.tmp");
        fs::write(&tmp, value)?;
        fs::rename(&tmp, &path)?;
        Ok(())
    }

    fn load(&self, key: &str) -> Result<Option<String>> {
        let path = self.path_for(key);
        match fs::read_to_string(&path) {
            Ok(contents) => Ok(Some(contents)),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }
}

/// Longest base64 stem used as-is; leaves room for the extensions within
/// the usual 255-byte file name limit.
const MAX_ENCODED_STEM: usize = 160;
const HASHED_PREFIX: usize = 32;

/// File name stem for a session key.
///
/// Short keys map to their URL-safe base64 encoding. Longer keys keep a
/// readable prefix of that encoding followed by `.` and the key's SHA-256;
/// `.` never occurs in base64 output, so the two forms cannot collide.
fn file_stem(key: &str) -> String {
    let encoded = URL_SAFE_NO_PAD.encode(key.as_bytes());
    if encoded.len() <= MAX_ENCODED_STEM {
        return encoded;
    }
    let digest = Sha256::digest(key.as_bytes());
    format!("{}.{digest:x}", &encoded[..HASHED_PREFIX])
}

pub fn parse_comments(blob: &str) -> Result<Vec<Comment>> {
    serde_json::from_str(blob).map_err(|e| ReviewError::CorruptedStore(e.to_string()))
}

/// Rewrite the full comment list for a session.
pub fn save_comments(store: &mut dyn KeyValueStore, key: &str, comments: &[Comment]) -> Result<()> {
    let json = serde_json::to_string_pretty(comments)?;
    store.save(key, &json)
}

/// Load a session's comments. Missing, unreadable or corrupt data yields an
/// empty list.
pub fn load_comments(store: &dyn KeyValueStore, key: &str) -> Vec<Comment> {
    match store.load(key) {
        Ok(Some(blob)) => parse_comments(&blob).unwrap_or_else(|err| {
            log::warn!("discarding comments for {key}: {err}");
            Vec::new()
        }),
        Ok(None) => Vec::new(),
        Err(err) => {
            log::warn!("failed to load comments for {key}: {err}");
            Vec::new()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{CommentDraft, LineRange, LineSide};
    use tempfile::tempdir;

    fn comment(path: &str, start: u32, end: u32) -> Comment {
        Comment::new(CommentDraft {
            side: LineSide::New,
            file_path: path.to_string(),
            line_range: LineRange::new(start, end),
            content: format!("note on {path}"),
        })
    }

    #[test]
    fn should_roundtrip_comments_through_memory_store() {
        // given
        let mut store = MemoryStore::new();
        let comments = vec![comment("a.ts", 1, 2), comment("b.ts", 4, 4)];

        // when
        save_comments(&mut store, "/repo", &comments).unwrap();
        let loaded = load_comments(&store, "/repo");

        // then
        assert_eq!(loaded, comments);
    }

    #[test]
    fn should_preserve_order_after_mutation() {
        let mut store = MemoryStore::new();
        save_comments(&mut store, "k", &[comment("a", 1, 1), comment("b", 2, 2)]).unwrap();

        let mut list = load_comments(&store, "k");
        list.remove(0);
        list.push(comment("c", 3, 3));
        save_comments(&mut store, "k", &list).unwrap();

        assert_eq!(load_comments(&store, "k"), list);
    }

    #[test]
    fn should_load_empty_list_for_unknown_key() {
        let store = MemoryStore::new();
        assert!(load_comments(&store, "missing").is_empty());
    }

    #[test]
    fn should_degrade_corrupt_payload_to_empty_list() {
        let mut store = MemoryStore::new();
        store.save("k", "{not json").unwrap();
        assert!(load_comments(&store, "k").is_empty());
    }

    #[test]
    fn parse_comments_reports_corruption() {
        let err = parse_comments("[1, 2]").unwrap_err();
        assert!(matches!(err, ReviewError::CorruptedStore(_)));
    }

    #[test]
    fn should_roundtrip_comments_through_file_store() {
        let dir = tempdir().expect("failed to create temp dir");
        let mut store = FileStore::new(dir.path().join("comments"));
        let comments = vec![comment("src/main.rs", 3, 5)];

        save_comments(&mut store, "/home/me/project", &comments).unwrap();
        let loaded = load_comments(&store, "/home/me/project");

        assert_eq!(loaded, comments);
    }

    #[test]
    fn file_store_keeps_keys_apart() {
        let dir = tempdir().expect("failed to create temp dir");
        let mut store = FileStore::new(dir.path());

        store.save("/a/b", "first").unwrap();
        store.save("/a_b", "second").unwrap();

        assert_eq!(store.load("/a/b").unwrap().as_deref(), Some("first"));
        assert_eq!(store.load("/a_b").unwrap().as_deref(), Some("second"));
    }

    #[test]
    fn file_store_handles_keys_longer_than_a_file_name() {
        // given
        let dir = tempdir().expect("failed to create temp dir");
        let mut store = FileStore::new(dir.path());
        let deep = format!("/home/me/{}/project", "nested-directory/".repeat(14));
        let sibling = format!("{deep}-fork");
        assert!(deep.len() > 200);

        // when
        store.save(&deep, "deep").unwrap();
        store.save(&sibling, "sibling").unwrap();

        // then
        assert_eq!(store.load(&deep).unwrap().as_deref(), Some("deep"));
        assert_eq!(store.load(&sibling).unwrap().as_deref(), Some("sibling"));
        for entry in fs::read_dir(dir.path()).unwrap() {
            assert!(entry.unwrap().file_name().len() < 255);
        }
    }

    #[test]
    fn short_keys_keep_plain_encoding() {
        assert_eq!(file_stem("/repo"), URL_SAFE_NO_PAD.encode("/repo"));
        assert_eq!(file_stem(&"k".repeat(400)).len(), HASHED_PREFIX + 1 + 64);
    }

    #[test]
    fn file_store_overwrite_leaves_no_temp_file() {
        let dir = tempdir().expect("failed to create temp dir");
        let mut store = FileStore::new(dir.path());

        store.save("k", "one").unwrap();
        store.save("k", "two").unwrap();

        assert_eq!(store.load("k").unwrap().as_deref(), Some("two"));
        let files: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(files.len(), 1);
    }

    #[test]
    fn file_store_returns_none_before_first_save() {
        let dir = tempdir().expect("failed to create temp dir");
        let store = FileStore::new(dir.path().join("never-created"));
        assert_eq!(store.load("k").unwrap(), None);
    }

    #[test]
    fn from_config_uses_store_dir_override() {
        let config = AppConfig {
            store_dir: Some(PathBuf::from("/tmp/sidenote-test")),
            ..AppConfig::default()
        };
        let store = FileStore::from_config(&config).unwrap();
        assert_eq!(store.dir(), Path::new("/tmp/sidenote-test"));
    }
}
