//! Per-session comment list backed by a key-value store.

use crate::error::{Result, ReviewError};
use crate::model::{Comment, CommentDraft, LineSide};
use crate::persistence::{KeyValueStore, load_comments, save_comments};

/// Ordered comments for one review session (keyed by project path).
///
/// Every mutation rewrites the whole list in the backing store before it is
/// applied in memory, so a failed write leaves both copies unchanged.
pub struct AnnotationStore {
    session_key: String,
    comments: Vec<Comment>,
    storage: Box<dyn KeyValueStore>,
}

impl AnnotationStore {
    /// Open a session, loading whatever the storage holds for it.
    pub fn open(session_key: impl Into<String>, storage: Box<dyn KeyValueStore>) -> Self {
        let session_key = session_key.into();
        let comments = load_comments(storage.as_ref(), &session_key);
        log::debug!("loaded {} comments for {session_key}", comments.len());
        Self {
            session_key,
            comments,
            storage,
        }
    }

    pub fn session_key(&self) -> &str {
        &self.session_key
    }

    pub fn comments(&self) -> &[Comment] {
        &self.comments
    }

    pub fn len(&self) -> usize {
        self.comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.comments.is_empty()
    }

    pub fn storage(&self) -> &dyn KeyValueStore {
        self.storage.as_ref()
    }

    /// Validate and append a comment, returning the stored record.
    pub fn add(&mut self, draft: CommentDraft) -> Result<&Comment> {
        let content = draft.content.trim();
        if content.is_empty() {
            return Err(ReviewError::EmptyComment);
        }
        if !draft.line_range.is_valid() {
            return Err(ReviewError::InvalidRange {
                start: draft.line_range.start,
                end: draft.line_range.end,
            });
        }

        let comment = Comment::new(CommentDraft {
            content: content.to_string(),
            ..draft
        });

        let mut next = self.comments.clone();
        next.push(comment);
        self.commit(next)?;
        Ok(&self.comments[self.comments.len() - 1])
    }

    /// Delete a comment by id. Unknown ids are ignored.
    pub fn remove(&mut self, id: &str) -> Result<()> {
        if !self.comments.iter().any(|c| c.id == id) {
            return Ok(());
        }
        let next = self
            .comments
            .iter()
            .filter(|c| c.id != id)
            .cloned()
            .collect();
        self.commit(next)
    }

    /// First comment in list order covering `line` on `side` of `file_path`.
    pub fn find_at(&self, file_path: &str, side: LineSide, line: u32) -> Option<&Comment> {
        self.comments.iter().find(|c| c.covers(file_path, side, line))
    }

    /// All comments on a file, both sides, in list order.
    pub fn list_for(&self, file_path: &str) -> Vec<&Comment> {
        self.comments
            .iter()
            .filter(|c| c.file_path == file_path)
            .collect()
    }

    /// Re-read the list from storage, dropping in-memory state.
    pub fn reload(&mut self) {
        self.comments = load_comments(self.storage.as_ref(), &self.session_key);
    }

    fn commit(&mut self, next: Vec<Comment>) -> Result<()> {
        if let Err(err) = save_comments(self.storage.as_mut(), &self.session_key, &next) {
            log::warn!("failed to persist comments for {}: {err}", self.session_key);
            return Err(err);
        }
        self.comments = next;
        Ok(())
    }
}

impl std::fmt::Debug for AnnotationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnnotationStore")
            .field("session_key", &self.session_key)
            .field("comments", &self.comments)
            .finish_non_exhaustive()
    }
}
