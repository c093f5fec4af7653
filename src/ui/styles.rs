use ratatui::style::{Modifier, Style};

use crate::model::{FileStatus, RowKind};
use crate::theme::Theme;

pub fn gutter_style(theme: &Theme) -> Style {
    Style::default().fg(theme.gutter_fg)
}

pub fn divider_style(theme: &Theme) -> Style {
    Style::default().fg(theme.divider)
}

pub fn dim_style(theme: &Theme) -> Style {
    Style::default().fg(theme.fg_dim)
}

/// Base style of a cell before token colors are applied.
pub fn cell_style(theme: &Theme, kind: RowKind, selected: bool) -> Style {
    let bg = if selected {
        Some(theme.selection_bg)
    } else {
        theme.row_background(kind)
    };
    match bg {
        Some(bg) => Style::default().bg(bg),
        None => Style::default(),
    }
}

pub fn comment_marker_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.comment_marker)
        .add_modifier(Modifier::BOLD)
}

pub fn note_style(theme: &Theme) -> Style {
    Style::default().fg(theme.comment_marker)
}

pub fn file_status_style(theme: &Theme, status: FileStatus) -> Style {
    Style::default().fg(theme.status_color(status))
}

pub fn dir_style(theme: &Theme) -> Style {
    Style::default()
        .fg(theme.fg_primary)
        .add_modifier(Modifier::BOLD)
}
