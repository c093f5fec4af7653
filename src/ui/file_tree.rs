use ratatui::style::Style;
use ratatui::text::{Line, Span};

use crate::theme::Theme;
use crate::tree::TreeItem;
use crate::ui::styles;

const INDENT: &str = "  ";

/// One line per visible tree item. `selected` is the path of the open file.
pub fn render_items(
    items: &[TreeItem],
    selected: Option<&str>,
    theme: &Theme,
) -> Vec<Line<'static>> {
    items
        .iter()
        .map(|item| {
            let indent = INDENT.repeat(item.depth());
            match item {
                TreeItem::Directory { name, expanded, .. } => {
                    let arrow = if *expanded { "▾" } else { "▸" };
                    Line::from(vec![
                        Span::raw(indent),
                        Span::styled(format!("{arrow} "), styles::dim_style(theme)),
                        Span::styled(format!("{name}/"), styles::dir_style(theme)),
                    ])
                }
                TreeItem::File {
                    path, name, status, ..
                } => {
                    let is_current = selected == Some(path.as_str());
                    let pointer = if is_current { "▶" } else { " " };
                    let name_style = if is_current {
                        Style::default().bg(theme.selection_bg)
                    } else {
                        Style::default()
                    };
                    Line::from(vec![
                        Span::raw(indent),
                        Span::styled(pointer, styles::comment_marker_style(theme)),
                        Span::styled(
                            format!("{} ", status.as_char()),
                            styles::file_status_style(theme, *status),
                        ),
                        Span::styled(name.clone(), name_style),
                    ])
                }
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use std::collections::HashSet;

    use super::*;
    use crate::changes::ChangedFile;
    use crate::model::FileStatus;
    use crate::tree::{build_tree, visible_items};

    fn text(line: &Line) -> String {
        line.spans.iter().map(|s| s.content.as_ref()).collect()
    }

    fn items() -> Vec<TreeItem> {
        let files = vec![
            ChangedFile::new(FileStatus::Modified, "src/main.rs"),
            ChangedFile::new(FileStatus::Untracked, "README.md"),
        ];
        visible_items(&build_tree(&files), &HashSet::new())
    }

    #[test]
    fn should_indent_by_depth_and_show_status() {
        let lines = render_items(&items(), None, &Theme::dark());

        let rendered: Vec<_> = lines.iter().map(text).collect();
        assert_eq!(rendered, vec!["▾ src/", "   M main.rs", " ? README.md"]);
    }

    #[test]
    fn should_point_at_selected_file() {
        let lines = render_items(&items(), Some("src/main.rs"), &Theme::dark());

        assert_eq!(text(&lines[1]), "  ▶M main.rs");
        assert_eq!(text(&lines[2]), " ? README.md");
    }

    #[test]
    fn collapsed_directory_shows_closed_arrow() {
        let files = vec![ChangedFile::new(FileStatus::Added, "docs/a.md")];
        let collapsed = HashSet::from(["docs".to_string()]);
        let items = visible_items(&build_tree(&files), &collapsed);

        let lines = render_items(&items, None, &Theme::light());

        assert_eq!(lines.len(), 1);
        assert_eq!(text(&lines[0]), "▸ docs/");
    }

    #[test]
    fn status_badge_uses_theme_color() {
        let theme = Theme::dark();
        let lines = render_items(&items(), None, &theme);

        assert_eq!(lines[1].spans[2].style.fg, Some(theme.file_modified));
    }
}
