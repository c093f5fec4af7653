//! Nested directory/file hierarchy built from the flat change list.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::changes::ChangedFile;
use crate::model::FileStatus;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TreeNode {
    pub name: String,
    pub full_path: String,
    pub is_file: bool,
    /// Set on file nodes only
    pub status: Option<FileStatus>,
    /// Empty for file nodes
    pub children: Vec<TreeNode>,
}

impl TreeNode {
    fn directory(name: &str, full_path: String) -> Self {
        Self {
            name: name.to_string(),
            full_path,
            is_file: false,
            status: None,
            children: Vec::new(),
        }
    }

    fn file(name: &str, full_path: String, status: FileStatus) -> Self {
        Self {
            name: name.to_string(),
            full_path,
            is_file: true,
            status: Some(status),
            children: Vec::new(),
        }
    }
}

/// Build the forest for a change list.
///
/// Nodes are matched per level by `(name, is_file)`, so a file and a directory
/// may share a name. Children keep the order in which the input first
/// mentions them. Empty path segments (`a//b`, leading `/`) are skipped.
pub fn build_tree(files: &[ChangedFile]) -> Vec<TreeNode> {
    let mut roots: Vec<TreeNode> = Vec::new();

    for file in files {
        let segments: Vec<&str> = file.path.split('/').filter(|s| !s.is_empty()).collect();
        let Some((file_name, dirs)) = segments.split_last() else {
            continue;
        };

        let mut level: &mut Vec<TreeNode> = &mut roots;
        let mut full_path = String::new();
        for dir in dirs {
            if !full_path.is_empty() {
                full_path.push('/');
            }
            full_path.push_str(dir);

            let idx = match level.iter().position(|n| !n.is_file && n.name == *dir) {
                Some(idx) => idx,
                None => {
                    level.push(TreeNode::directory(dir, full_path.clone()));
                    level.len() - 1
                }
            };
            level = &mut level[idx].children;
        }

        if !full_path.is_empty() {
            full_path.push('/');
        }
        full_path.push_str(file_name);

        match level.iter_mut().find(|n| n.is_file && n.name == *file_name) {
            Some(existing) => existing.status = Some(file.status),
            None => level.push(TreeNode::file(file_name, full_path, file.status)),
        }
    }

    roots
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeItem {
    Directory {
        path: String,
        name: String,
        depth: usize,
        expanded: bool,
    },
    File {
        path: String,
        name: String,
        depth: usize,
        status: FileStatus,
    },
}

impl TreeItem {
    pub fn path(&self) -> &str {
        match self {
            TreeItem::Directory { path, .. } | TreeItem::File { path, .. } => path,
        }
    }

    pub fn depth(&self) -> usize {
        match self {
            TreeItem::Directory { depth, .. } | TreeItem::File { depth, .. } => *depth,
        }
    }
}

/// Flatten the forest depth-first for display, hiding the contents of
/// collapsed directories.
pub fn visible_items(roots: &[TreeNode], collapsed: &HashSet<String>) -> Vec<TreeItem> {
    let mut items = Vec::new();
    push_visible(roots, 0, collapsed, &mut items);
    items
}

fn push_visible(
    nodes: &[TreeNode],
    depth: usize,
    collapsed: &HashSet<String>,
    items: &mut Vec<TreeItem>,
) {
    for node in nodes {
        if node.is_file {
            items.push(TreeItem::File {
                path: node.full_path.clone(),
                name: node.name.clone(),
                depth,
                status: node.status.unwrap_or(FileStatus::Unknown),
            });
        } else {
            let expanded = !collapsed.contains(&node.full_path);
            items.push(TreeItem::Directory {
                path: node.full_path.clone(),
                name: node.name.clone(),
                depth,
                expanded,
            });
            if expanded {
                push_visible(&node.children, depth + 1, collapsed, items);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn changes(entries: &[(FileStatus, &str)]) -> Vec<ChangedFile> {
        entries
            .iter()
            .map(|(status, path)| ChangedFile::new(*status, *path))
            .collect()
    }

    #[test]
    fn should_return_empty_forest_for_no_changes() {
        assert!(build_tree(&[]).is_empty());
    }

    #[test]
    fn should_group_files_under_shared_directory_in_input_order() {
        // given
        let files = changes(&[
            (FileStatus::Modified, "src/a.ts"),
            (FileStatus::Added, "src/b.ts"),
        ]);

        // when
        let tree = build_tree(&files);

        // then
        assert_eq!(tree.len(), 1);
        let src = &tree[0];
        assert_eq!(src.name, "src");
        assert!(!src.is_file);
        assert_eq!(src.status, None);
        let children: Vec<_> = src
            .children
            .iter()
            .map(|c| (c.name.as_str(), c.full_path.as_str(), c.status))
            .collect();
        assert_eq!(
            children,
            vec![
                ("a.ts", "src/a.ts", Some(FileStatus::Modified)),
                ("b.ts", "src/b.ts", Some(FileStatus::Added)),
            ]
        );
    }

    #[test]
    fn should_not_sort_children() {
        let files = changes(&[
            (FileStatus::Modified, "z.rs"),
            (FileStatus::Modified, "a.rs"),
        ]);
        let names: Vec<_> = build_tree(&files).into_iter().map(|n| n.name).collect();
        assert_eq!(names, vec!["z.rs", "a.rs"]);
    }

    #[test]
    fn should_materialize_every_ancestor() {
        let tree = build_tree(&changes(&[(FileStatus::Added, "a/b/c/file.rs")]));

        let b = &tree[0].children[0];
        let c = &b.children[0];
        assert_eq!(tree[0].full_path, "a");
        assert_eq!(b.full_path, "a/b");
        assert_eq!(c.full_path, "a/b/c");
        assert_eq!(c.children[0].full_path, "a/b/c/file.rs");
        assert!(c.children[0].is_file);
    }

    #[test]
    fn should_keep_file_and_directory_with_same_name_apart() {
        let tree = build_tree(&changes(&[
            (FileStatus::Modified, "docs"),
            (FileStatus::Added, "docs/readme.md"),
        ]));

        assert_eq!(tree.len(), 2);
        assert!(tree[0].is_file);
        assert!(!tree[1].is_file);
        assert_eq!(tree[1].children[0].name, "readme.md");
    }

    #[test]
    fn should_skip_empty_segments() {
        let tree = build_tree(&changes(&[(FileStatus::Modified, "/src//main.rs")]));
        assert_eq!(tree[0].name, "src");
        assert_eq!(tree[0].children[0].full_path, "src/main.rs");
    }

    #[test]
    fn should_update_status_of_repeated_path() {
        let tree = build_tree(&changes(&[
            (FileStatus::Added, "a.rs"),
            (FileStatus::Modified, "a.rs"),
        ]));
        assert_eq!(tree.len(), 1);
        assert_eq!(tree[0].status, Some(FileStatus::Modified));
    }

    #[test]
    fn visible_items_hide_collapsed_directories() {
        let tree = build_tree(&changes(&[
            (FileStatus::Modified, "src/ui/app.rs"),
            (FileStatus::Modified, "src/main.rs"),
            (FileStatus::Added, "README.md"),
        ]));

        let all = visible_items(&tree, &HashSet::new());
        let paths: Vec<_> = all.iter().map(|i| (i.path(), i.depth())).collect();
        assert_eq!(
            paths,
            vec![
                ("src", 0),
                ("src/ui", 1),
                ("src/ui/app.rs", 2),
                ("src/main.rs", 1),
                ("README.md", 0),
            ]
        );

        let collapsed: HashSet<String> = ["src/ui".to_string()].into_iter().collect();
        let items = visible_items(&tree, &collapsed);
        assert_eq!(items.len(), 4);
        assert!(matches!(
            &items[1],
            TreeItem::Directory { expanded: false, path, .. } if path == "src/ui"
        ));
    }
}
