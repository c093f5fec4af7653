//! Lays out view rows as side-by-side terminal lines.

use ratatui::style::Style;
use ratatui::text::{Line, Span};
use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

use crate::app::{ViewCell, ViewRow};
use crate::theme::Theme;
use crate::ui::styles;

const DIVIDER: &str = "│";
const COMMENT_MARK: &str = "▌";
const MIN_GUTTER: usize = 3;
const TAB_WIDTH: usize = 4;
const NOTE_INDENT: &str = "    ";

/// Render rows to exactly `width` columns each.
///
/// Rows showing both sides get two equal columns around a divider; one-sided
/// files use the full width. Comments ending on a row are printed beneath it.
pub fn render_rows(rows: &[ViewRow], theme: &Theme, width: u16) -> Vec<Line<'static>> {
    let width = width as usize;
    let gutter = gutter_width(rows);
    let two_sided = rows.iter().any(|row| row.old.is_some() && row.new.is_some());
    let column = if two_sided {
        width.saturating_sub(DIVIDER.width()) / 2
    } else {
        width
    };

    let mut lines = Vec::with_capacity(rows.len());
    for row in rows {
        let mut spans = Vec::new();
        if two_sided {
            spans.extend(render_cell(row.old.as_ref(), theme, gutter, column));
            spans.push(Span::styled(DIVIDER, styles::divider_style(theme)));
            let right = width.saturating_sub(column + DIVIDER.width());
            spans.extend(render_cell(row.new.as_ref(), theme, gutter, right));
        } else {
            let cell = row.new.as_ref().or(row.old.as_ref());
            spans.extend(render_cell(cell, theme, gutter, column));
        }
        lines.push(Line::from(spans));

        for note in &row.notes {
            for (idx, segment) in note.content.lines().enumerate() {
                let text = if idx == 0 {
                    format!("  └ [{}] {segment}", note.side.as_str())
                } else {
                    format!("{NOTE_INDENT}{segment}")
                };
                let (mut spans, used) = fit(&text, styles::note_style(theme), width);
                spans.push(pad(width - used, Style::default()));
                lines.push(Line::from(spans));
            }
        }
    }
    lines
}

fn gutter_width(rows: &[ViewRow]) -> usize {
    let max_line = rows
        .iter()
        .flat_map(|row| [row.old.as_ref(), row.new.as_ref()])
        .flatten()
        .filter_map(|cell| cell.line)
        .max()
        .unwrap_or(0);
    max_line.to_string().len().max(MIN_GUTTER)
}

/// Marker, line number, a space, then content, padded to `width`.
fn render_cell(
    cell: Option<&ViewCell>,
    theme: &Theme,
    gutter: usize,
    width: usize,
) -> Vec<Span<'static>> {
    let Some(cell) = cell else {
        return vec![pad(width, Style::default())];
    };
    let base = styles::cell_style(theme, cell.kind, cell.selected);

    let marker = match &cell.comment {
        Some(_) => Span::styled(COMMENT_MARK, styles::comment_marker_style(theme).patch(base)),
        None => Span::styled(" ", base),
    };
    let number = match cell.line {
        Some(line) => format!("{line:>gutter$} "),
        None => " ".repeat(gutter + 1),
    };

    let prefix_width = 1 + gutter + 1;
    if width <= prefix_width {
        let (mut spans, used) = fit(&format!(" {number}"), styles::gutter_style(theme), width);
        spans.push(pad(width - used, base));
        return spans;
    }

    let mut spans = vec![marker, Span::styled(number, styles::gutter_style(theme).patch(base))];
    let mut remaining = width - prefix_width;
    for token in &cell.tokens {
        if remaining == 0 {
            break;
        }
        let style = base.patch(theme.token_style(token.color));
        let (token_spans, used) = fit(&token.text, style, remaining);
        spans.extend(token_spans);
        remaining -= used;
    }
    spans.push(pad(remaining, base));
    spans
}

/// Cut `text` to at most `width` display columns; returns spans and columns used.
///
/// Tabs expand to spaces and other control characters are dropped, so the
/// columns used always match what the terminal draws.
fn fit(text: &str, style: Style, width: usize) -> (Vec<Span<'static>>, usize) {
    let mut out = String::new();
    let mut used = 0;
    for ch in text.chars() {
        if ch == '\t' {
            let spaces = TAB_WIDTH.min(width - used);
            out.extend(std::iter::repeat_n(' ', spaces));
            used += spaces;
            if used == width {
                break;
            }
            continue;
        }
        if ch.is_control() {
            continue;
        }
        let w = ch.width().unwrap_or(0);
        if used + w > width {
            break;
        }
        used += w;
        out.push(ch);
    }
    if out.is_empty() {
        return (Vec::new(), 0);
    }
    (vec![Span::styled(out, style)], used)
}

fn pad(width: usize, style: Style) -> Span<'static> {
    Span::styled(" ".repeat(width), style)
}
