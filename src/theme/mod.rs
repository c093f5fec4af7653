//! Color themes for rendering diff rows, tokens and the file tree.

use ratatui::style::{Color, Modifier, Style};

use crate::config::ThemeName;
use crate::model::{FileStatus, RowKind};
use crate::syntax::TokenColor;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Theme {
    // Base colors
    pub fg_primary: Color,
    pub fg_dim: Color,
    pub gutter_fg: Color,
    pub divider: Color,

    // Diff rows
    pub diff_add_bg: Color,
    pub diff_del_bg: Color,
    pub spacer_bg: Color,

    // Selection and comments
    pub selection_bg: Color,
    pub comment_marker: Color,

    // File status
    pub file_added: Color,
    pub file_modified: Color,
    pub file_deleted: Color,
    pub file_renamed: Color,
    pub file_untracked: Color,

    // Syntax
    pub syn_keyword: Color,
    pub syn_string: Color,
    pub syn_comment: Color,
    pub syn_number: Color,
    pub syn_constant: Color,
    pub syn_type: Color,
    pub syn_function: Color,
    pub syn_macro: Color,
    pub syn_attribute: Color,
    pub syn_property: Color,
    pub syn_operator: Color,
    pub syn_punctuation: Color,
}

impl Default for Theme {
    fn default() -> Self {
        Self::dark()
    }
}

impl Theme {
    pub fn from_name(name: ThemeName) -> Self {
        match name {
            ThemeName::Dark => Self::dark(),
            ThemeName::Light => Self::light(),
        }
    }

    pub fn dark() -> Self {
        Self {
            fg_primary: Color::Rgb(210, 210, 210),
            fg_dim: Color::Rgb(140, 140, 140),
            gutter_fg: Color::Rgb(110, 110, 110),
            divider: Color::Rgb(70, 70, 70),

            diff_add_bg: Color::Rgb(0, 45, 16),
            diff_del_bg: Color::Rgb(60, 0, 0),
            spacer_bg: Color::Rgb(32, 32, 36),

            selection_bg: Color::Rgb(40, 60, 100),
            comment_marker: Color::Rgb(90, 170, 255),

            file_added: Color::Rgb(80, 220, 120),
            file_modified: Color::Rgb(255, 210, 90),
            file_deleted: Color::Rgb(240, 90, 90),
            file_renamed: Color::Rgb(255, 140, 220),
            file_untracked: Color::Rgb(90, 200, 255),

            syn_keyword: Color::Rgb(204, 153, 204),
            syn_string: Color::Rgb(153, 204, 153),
            syn_comment: Color::Rgb(116, 115, 105),
            syn_number: Color::Rgb(249, 145, 87),
            syn_constant: Color::Rgb(249, 145, 87),
            syn_type: Color::Rgb(255, 204, 102),
            syn_function: Color::Rgb(102, 153, 204),
            syn_macro: Color::Rgb(102, 204, 204),
            syn_attribute: Color::Rgb(210, 123, 83),
            syn_property: Color::Rgb(102, 153, 204),
            syn_operator: Color::Rgb(102, 204, 204),
            syn_punctuation: Color::Rgb(160, 160, 160),
        }
    }

    /// Dark text on light backgrounds
    pub fn light() -> Self {
        Self {
            fg_primary: Color::Rgb(20, 20, 20),
            fg_dim: Color::Rgb(90, 90, 90),
            gutter_fg: Color::Rgb(130, 130, 130),
            divider: Color::Rgb(190, 190, 190),

            diff_add_bg: Color::Rgb(220, 255, 220),
            diff_del_bg: Color::Rgb(255, 230, 230),
            spacer_bg: Color::Rgb(240, 240, 240),

            selection_bg: Color::Rgb(200, 215, 245),
            comment_marker: Color::Rgb(0, 60, 140),

            file_added: Color::Rgb(0, 100, 0),
            file_modified: Color::Rgb(140, 80, 0),
            file_deleted: Color::Rgb(160, 0, 0),
            file_renamed: Color::Rgb(100, 0, 100),
            file_untracked: Color::Rgb(0, 80, 160),

            syn_keyword: Color::Rgb(150, 40, 140),
            syn_string: Color::Rgb(40, 110, 40),
            syn_comment: Color::Rgb(120, 120, 110),
            syn_number: Color::Rgb(170, 80, 0),
            syn_constant: Color::Rgb(170, 80, 0),
            syn_type: Color::Rgb(140, 100, 0),
            syn_function: Color::Rgb(30, 80, 170),
            syn_macro: Color::Rgb(0, 120, 120),
            syn_attribute: Color::Rgb(160, 70, 30),
            syn_property: Color::Rgb(30, 80, 170),
            syn_operator: Color::Rgb(0, 110, 110),
            syn_punctuation: Color::Rgb(80, 80, 80),
        }
    }

    pub fn token_style(&self, color: TokenColor) -> Style {
        let fg = match color {
            TokenColor::Plain => self.fg_primary,
            TokenColor::Keyword => self.syn_keyword,
            TokenColor::String => self.syn_string,
            TokenColor::Comment => self.syn_comment,
            TokenColor::Number => self.syn_number,
            TokenColor::Constant => self.syn_constant,
            TokenColor::Type => self.syn_type,
            TokenColor::Function => self.syn_function,
            TokenColor::Macro => self.syn_macro,
            TokenColor::Attribute => self.syn_attribute,
            TokenColor::Property => self.syn_property,
            TokenColor::Operator => self.syn_operator,
            TokenColor::Punctuation => self.syn_punctuation,
        };
        let style = Style::default().fg(fg);
        match color {
            TokenColor::Comment => style.add_modifier(Modifier::ITALIC),
            TokenColor::Keyword => style.add_modifier(Modifier::BOLD),
            _ => style,
        }
    }

    /// Background for a row; unchanged rows use the terminal's own.
    pub fn row_background(&self, kind: RowKind) -> Option<Color> {
        match kind {
            RowKind::Unchanged => None,
            RowKind::Added => Some(self.diff_add_bg),
            RowKind::Removed => Some(self.diff_del_bg),
            RowKind::Spacer => Some(self.spacer_bg),
        }
    }

    pub fn status_color(&self, status: FileStatus) -> Color {
        match status {
            FileStatus::Added => self.file_added,
            FileStatus::Modified => self.file_modified,
            FileStatus::Deleted => self.file_deleted,
            FileStatus::Renamed | FileStatus::Copied => self.file_renamed,
            FileStatus::Untracked => self.file_untracked,
            FileStatus::Unknown => self.fg_dim,
        }
    }
}
