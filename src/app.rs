//! Review coordinator: combines diff rows, tokens and comments into display
//! rows, and turns pointer selections into new comments.

use serde::Serialize;

use crate::annotations::AnnotationStore;
use crate::changes::ChangedFile;
use crate::diff::{self, SideBySideDiff};
use crate::error::{Result, ReviewError};
use crate::model::{Comment, CommentDraft, DiffRow, LineRange, LineSide, RowKind};
use crate::syntax::{Language, Token, TokenCache, detect};
use crate::tree::{TreeNode, build_tree};

/// File contents as fetched by the host. `None` means the file does not exist
/// on that side (or could not be read).
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileContents {
    pub old: Option<String>,
    pub new: Option<String>,
}

/// Identifies one content request so late results can be recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadTicket {
    pub request_id: u64,
    pub path: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LoadedContent {
    Diff(SideBySideDiff),
    /// File present on one side only
    Plain { side: LineSide, rows: Vec<DiffRow> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FileView {
    Empty,
    Loaded {
        path: String,
        language: Option<Language>,
        content: LoadedContent,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Selection {
    Idle,
    Dragging {
        side: LineSide,
        anchor_line: u32,
        current_line: u32,
    },
    /// Pointer released; waiting for comment text
    PendingSubmit { side: LineSide, range: LineRange },
}

impl Selection {
    pub fn range(&self) -> Option<(LineSide, LineRange)> {
        match *self {
            Selection::Idle => None,
            Selection::Dragging {
                side,
                anchor_line,
                current_line,
            } => Some((side, LineRange::new(anchor_line, current_line))),
            Selection::PendingSubmit { side, range } => Some((side, range)),
        }
    }

    pub fn contains(&self, side: LineSide, line: u32) -> bool {
        self.range()
            .is_some_and(|(sel_side, range)| sel_side == side && range.contains(line))
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommentMark {
    pub id: String,
    pub is_first: bool,
    pub is_last: bool,
}

/// One side of a display row.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ViewCell {
    pub kind: RowKind,
    pub line: Option<u32>,
    pub tokens: Vec<Token>,
    pub comment: Option<CommentMark>,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ViewRow {
    /// `None` when the side is not displayed (one-sided files)
    pub old: Option<ViewCell>,
    pub new: Option<ViewCell>,
    /// Comments whose range ends on this row, to be shown beneath it
    pub notes: Vec<Comment>,
}

pub struct App {
    pub store: AnnotationStore,
    pub changed_files: Vec<ChangedFile>,
    pub tree: Vec<TreeNode>,
    pub view: FileView,
    pub selection: Selection,
    pub comment_buffer: String,
    selected_path: Option<String>,
    pending: Option<LoadTicket>,
    next_request_id: u64,
    token_cache: TokenCache,
}

impl App {
    pub fn new(store: AnnotationStore) -> Self {
        Self {
            store,
            changed_files: Vec::new(),
            tree: Vec::new(),
            view: FileView::Empty,
            selection: Selection::Idle,
            comment_buffer: String::new(),
            selected_path: None,
            pending: None,
            next_request_id: 0,
            token_cache: TokenCache::new(),
        }
    }

    /// Replace the change list and rebuild the navigation tree.
    pub fn set_changed_files(&mut self, files: Vec<ChangedFile>) {
        self.tree = build_tree(&files);
        self.changed_files = files;
    }

    pub fn selected_path(&self) -> Option<&str> {
        self.selected_path.as_deref()
    }

    /// Switch to a file. The returned ticket must accompany its contents.
    pub fn open_file(&mut self, path: impl Into<String>) -> LoadTicket {
        let path = path.into();
        self.reset_selection();
        self.view = FileView::Empty;
        self.token_cache.clear();
        self.selected_path = Some(path.clone());
        self.issue_ticket(path)
    }

    /// Request fresh contents for the open file, e.g. after the host noticed
    /// a change on disk. The selection survives unless the new contents no
    /// longer have its lines.
    pub fn refresh(&mut self) -> Option<LoadTicket> {
        let path = self.selected_path.clone()?;
        Some(self.issue_ticket(path))
    }

    fn issue_ticket(&mut self, path: String) -> LoadTicket {
        self.next_request_id += 1;
        let ticket = LoadTicket {
            request_id: self.next_request_id,
            path,
        };
        self.pending = Some(ticket.clone());
        ticket
    }

    /// Apply fetched contents. Results for anything but the latest request
    /// are dropped; returns whether the contents were applied.
    pub fn apply_contents(&mut self, ticket: &LoadTicket, contents: FileContents) -> bool {
        if self.pending.as_ref() != Some(ticket) {
            log::debug!(
                "dropping stale contents for {} (request {})",
                ticket.path,
                ticket.request_id
            );
            return false;
        }
        self.pending = None;

        let content = match (contents.old, contents.new) {
            (Some(old), Some(new)) => LoadedContent::Diff(diff::diff(&old, &new)),
            (None, Some(new)) => LoadedContent::Plain {
                side: LineSide::New,
                rows: diff::plain_rows(&new, LineSide::New),
            },
            (Some(old), None) => LoadedContent::Plain {
                side: LineSide::Old,
                rows: diff::plain_rows(&old, LineSide::Old),
            },
            (None, None) => {
                log::warn!("no contents for {}; showing nothing", ticket.path);
                self.view = FileView::Empty;
                self.token_cache.clear();
                self.selection = Selection::Idle;
                return true;
            }
        };

        self.view = FileView::Loaded {
            language: detect(&ticket.path),
            path: ticket.path.clone(),
            content,
        };
        self.token_cache.clear();
        if !self.selection_is_live() {
            log::debug!("selection no longer fits {}; dropping it", ticket.path);
            self.selection = Selection::Idle;
        }
        true
    }

    pub fn row_count(&self) -> usize {
        match &self.view {
            FileView::Empty => 0,
            FileView::Loaded { content, .. } => match content {
                LoadedContent::Diff(diff) => diff.len(),
                LoadedContent::Plain { rows, .. } => rows.len(),
            },
        }
    }

    /// Rows shown for a side, if that side is displayed.
    fn side_rows(&self, side: LineSide) -> Option<&[DiffRow]> {
        match &self.view {
            FileView::Empty => None,
            FileView::Loaded { content, .. } => match content {
                LoadedContent::Diff(diff) => Some(diff.rows(side)),
                LoadedContent::Plain {
                    side: shown, rows, ..
                } => (*shown == side).then_some(rows.as_slice()),
            },
        }
    }

    /// Number of content lines shown on a side, spacers excluded.
    fn side_line_count(&self, side: LineSide) -> Option<usize> {
        let rows = self.side_rows(side)?;
        Some(rows.iter().filter(|row| row.line_for(side).is_some()).count())
    }

    /// Idle, or a selection whose lines all exist in the loaded contents.
    fn selection_is_live(&self) -> bool {
        match self.selection.range() {
            None => true,
            Some((side, range)) => self
                .side_line_count(side)
                .is_some_and(|count| range.fits_within(count)),
        }
    }

    /// The side's own line number at a display row; `None` for spacers.
    pub fn line_at(&self, side: LineSide, row: usize) -> Option<u32> {
        self.side_rows(side)?.get(row)?.line_for(side)
    }

    pub fn pointer_down(&mut self, side: LineSide, row: usize) {
        if let Some(line) = self.line_at(side, row) {
            self.selection = Selection::Dragging {
                side,
                anchor_line: line,
                current_line: line,
            };
        }
    }

    /// Extend a drag. Rows on the other side or without a line are ignored.
    pub fn pointer_move(&mut self, side: LineSide, row: usize) {
        let Selection::Dragging {
            side: drag_side,
            anchor_line,
            ..
        } = self.selection
        else {
            return;
        };
        if drag_side != side {
            return;
        }
        if let Some(line) = self.line_at(side, row) {
            self.selection = Selection::Dragging {
                side,
                anchor_line,
                current_line: line,
            };
        }
    }

    pub fn pointer_up(&mut self) {
        if let Selection::Dragging { .. } = self.selection
            && let Some((side, range)) = self.selection.range()
        {
            self.selection = Selection::PendingSubmit { side, range };
        }
    }

    pub fn escape(&mut self) {
        self.reset_selection();
    }

    pub fn cancel_comment(&mut self) {
        self.reset_selection();
    }

    fn reset_selection(&mut self) {
        self.selection = Selection::Idle;
        self.comment_buffer.clear();
    }

    /// Turn the pending selection and the comment buffer into a comment.
    ///
    /// On a validation error nothing changes, so the user can fix the text.
    pub fn submit_comment(&mut self) -> Result<String> {
        let Selection::PendingSubmit { side, range } = self.selection else {
            return Err(ReviewError::NoSelection);
        };
        if !self.selection_is_live() {
            return Err(ReviewError::NoSelection);
        }
        let Some(path) = self.loaded_path().map(str::to_string) else {
            return Err(ReviewError::NoSelection);
        };
        if self.comment_buffer.trim().is_empty() {
            return Err(ReviewError::EmptyComment);
        }

        let id = self
            .store
            .add(CommentDraft {
                side,
                file_path: path,
                line_range: range,
                content: self.comment_buffer.clone(),
            })?
            .id
            .clone();
        self.reset_selection();
        Ok(id)
    }

    pub fn delete_comment(&mut self, id: &str) -> Result<()> {
        self.store.remove(id)
    }

    fn loaded_path(&self) -> Option<&str> {
        match &self.view {
            FileView::Loaded { path, .. } => Some(path),
            FileView::Empty => None,
        }
    }

    pub fn current_comments(&self) -> Vec<&Comment> {
        self.loaded_path()
            .map(|path| self.store.list_for(path))
            .unwrap_or_default()
    }

    /// Comments on the open file whose range runs past the current end of
    /// their side.
    pub fn orphaned_comments(&self) -> Vec<&Comment> {
        self.current_comments()
            .into_iter()
            .filter(|comment| {
                !self
                    .side_line_count(comment.side)
                    .is_some_and(|count| comment.line_range.fits_within(count))
            })
            .collect()
    }

    /// Build the display rows for the open file.
    pub fn build_rows(&mut self) -> Vec<ViewRow> {
        let FileView::Loaded { path, language, .. } = &self.view else {
            return Vec::new();
        };
        let (path, language) = (path.clone(), *language);
        let old_rows = self.side_rows(LineSide::Old).map(<[DiffRow]>::to_vec);
        let new_rows = self.side_rows(LineSide::New).map(<[DiffRow]>::to_vec);

        (0..self.row_count())
            .map(|idx| {
                let old = old_rows
                    .as_ref()
                    .map(|rows| self.cell(&path, language, LineSide::Old, &rows[idx]));
                let new = new_rows
                    .as_ref()
                    .map(|rows| self.cell(&path, language, LineSide::New, &rows[idx]));
                let notes = [(&old, LineSide::Old), (&new, LineSide::New)]
                    .into_iter()
                    .filter_map(|(cell, side)| {
                        let cell = cell.as_ref()?;
                        let mark = cell.comment.as_ref().filter(|m| m.is_last)?;
                        let line = cell.line?;
                        self.store
                            .find_at(&path, side, line)
                            .filter(|c| c.id == mark.id)
                            .cloned()
                    })
                    .collect();
                ViewRow { old, new, notes }
            })
            .collect()
    }

    fn cell(
        &mut self,
        path: &str,
        language: Option<Language>,
        side: LineSide,
        row: &DiffRow,
    ) -> ViewCell {
        let line = row.line_for(side);
        let tokens = if row.is_spacer() {
            Vec::new()
        } else {
            self.token_cache.tokens(&row.text, language)
        };
        let comment = line.and_then(|line| {
            self.store.find_at(path, side, line).map(|c| CommentMark {
                id: c.id.clone(),
                is_first: c.line_range.start == line,
                is_last: c.line_range.end == line,
            })
        });
        let selected = line.is_some_and(|line| self.selection.contains(side, line));

        ViewCell {
            kind: row.kind,
            line,
            tokens,
            comment,
            selected,
        }
    }
}
