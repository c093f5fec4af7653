//! Line-level two-file diff.
//!
//! The edit script comes from a longest-common-subsequence table over the two
//! line sequences. The table costs O(m·n) time and memory for m old and n new
//! lines; inputs are not bounded, so very large files are expensive. A
//! linear-space variant would change the tie-breaking and therefore the row
//! ordering, which callers rely on.

use serde::{Deserialize, Serialize};

use crate::model::{DiffRow, LineSide, RowKind};

/// Two index-aligned row sequences: `old_rows[i]` renders beside `new_rows[i]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SideBySideDiff {
    pub old_rows: Vec<DiffRow>,
    pub new_rows: Vec<DiffRow>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DiffStats {
    pub added: usize,
    pub removed: usize,
    pub unchanged: usize,
}

impl SideBySideDiff {
    pub fn len(&self) -> usize {
        self.old_rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.old_rows.is_empty()
    }

    pub fn rows(&self, side: LineSide) -> &[DiffRow] {
        match side {
            LineSide::Old => &self.old_rows,
            LineSide::New => &self.new_rows,
        }
    }

    pub fn stats(&self) -> DiffStats {
        let mut stats = DiffStats::default();
        for row in &self.old_rows {
            match row.kind {
                RowKind::Unchanged => stats.unchanged += 1,
                RowKind::Removed => stats.removed += 1,
                _ => {}
            }
        }
        stats.added = self
            .new_rows
            .iter()
            .filter(|row| row.kind == RowKind::Added)
            .count();
        stats
    }

    /// Number of content lines on a side (spacers excluded).
    pub fn line_count(&self, side: LineSide) -> usize {
        self.rows(side).iter().filter(|row| !row.is_spacer()).count()
    }
}

/// Split text into lines on `\n`.
///
/// An empty string is one empty line, and a trailing newline yields a final
/// empty line, so `split_lines(t).join("\n") == t` for every input.
pub fn split_lines(text: &str) -> Vec<&str> {
    text.split('\n').collect()
}

/// Compute the side-by-side diff of two texts.
///
/// Backtracking prefers an addition over a removal when both keep the LCS
/// length, so a replaced block renders its removals above its additions.
pub fn diff(old_text: &str, new_text: &str) -> SideBySideDiff {
    let old_lines = split_lines(old_text);
    let new_lines = split_lines(new_text);
    let m = old_lines.len();
    let n = new_lines.len();

    let mut dp = vec![vec![0u32; n + 1]; m + 1];
    for i in 1..=m {
        for j in 1..=n {
            dp[i][j] = if old_lines[i - 1] == new_lines[j - 1] {
                dp[i - 1][j - 1] + 1
            } else {
                dp[i - 1][j].max(dp[i][j - 1])
            };
        }
    }

    let mut old_rows = Vec::with_capacity(m.max(n));
    let mut new_rows = Vec::with_capacity(m.max(n));
    let mut i = m;
    let mut j = n;

    while i > 0 || j > 0 {
        if i > 0 && j > 0 && old_lines[i - 1] == new_lines[j - 1] {
            let line = old_lines[i - 1];
            old_rows.push(DiffRow::unchanged(line, i as u32, j as u32));
            new_rows.push(DiffRow::unchanged(line, i as u32, j as u32));
            i -= 1;
            j -= 1;
        } else if j > 0 && (i == 0 || dp[i][j - 1] >= dp[i - 1][j]) {
            old_rows.push(DiffRow::spacer());
            new_rows.push(DiffRow::added(new_lines[j - 1], j as u32));
            j -= 1;
        } else {
            old_rows.push(DiffRow::removed(old_lines[i - 1], i as u32));
            new_rows.push(DiffRow::spacer());
            i -= 1;
        }
    }

    old_rows.reverse();
    new_rows.reverse();

    SideBySideDiff { old_rows, new_rows }
}

/// Rows for a file that exists on one side only, numbered on that side.
pub fn plain_rows(text: &str, side: LineSide) -> Vec<DiffRow> {
    split_lines(text)
        .into_iter()
        .enumerate()
        .map(|(idx, line)| {
            let lineno = idx as u32 + 1;
            match side {
                LineSide::Old => DiffRow {
                    kind: RowKind::Unchanged,
                    text: line.to_string(),
                    old_line: Some(lineno),
                    new_line: None,
                },
                LineSide::New => DiffRow {
                    kind: RowKind::Unchanged,
                    text: line.to_string(),
                    old_line: None,
                    new_line: Some(lineno),
                },
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    fn side_text(rows: &[DiffRow]) -> String {
        rows.iter()
            .filter(|row| !row.is_spacer())
            .map(|row| row.text.as_str())
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn kinds(rows: &[DiffRow]) -> Vec<RowKind> {
        rows.iter().map(|row| row.kind).collect()
    }

    #[test]
    fn should_mark_single_line_replacement() {
        // given
        let old = "a\nb\nc";
        let new = "a\nx\nc";

        // when
        let result = diff(old, new);

        // then
        assert_eq!(
            result.old_rows,
            vec![
                DiffRow::unchanged("a", 1, 1),
                DiffRow::removed("b", 2),
                DiffRow::spacer(),
                DiffRow::unchanged("c", 3, 3),
            ]
        );
        assert_eq!(
            result.new_rows,
            vec![
                DiffRow::unchanged("a", 1, 1),
                DiffRow::spacer(),
                DiffRow::added("x", 2),
                DiffRow::unchanged("c", 3, 3),
            ]
        );
    }

    #[test]
    fn should_group_removals_before_additions_in_replaced_block() {
        let result = diff("a\nb1\nb2\nc", "a\nx1\nx2\nc");

        assert_eq!(
            kinds(&result.old_rows),
            vec![
                RowKind::Unchanged,
                RowKind::Removed,
                RowKind::Removed,
                RowKind::Spacer,
                RowKind::Spacer,
                RowKind::Unchanged,
            ]
        );
        assert_eq!(
            kinds(&result.new_rows),
            vec![
                RowKind::Unchanged,
                RowKind::Spacer,
                RowKind::Spacer,
                RowKind::Added,
                RowKind::Added,
                RowKind::Unchanged,
            ]
        );
    }

    #[test]
    fn should_treat_empty_input_as_one_empty_line() {
        let result = diff("", "");
        assert_eq!(result.old_rows, vec![DiffRow::unchanged("", 1, 1)]);
        assert_eq!(result.new_rows, vec![DiffRow::unchanged("", 1, 1)]);
    }

    #[test]
    fn empty_old_text_is_one_removed_empty_line() {
        let result = diff("", "x\ny");

        // the lone empty old line has no match and is removed
        assert_eq!(result.stats().added, 2);
        assert_eq!(result.stats().removed, 1);
        assert!(
            result
                .new_rows
                .iter()
                .all(|row| matches!(row.kind, RowKind::Added | RowKind::Spacer))
        );
    }

    #[test]
    fn should_keep_trailing_newline_consistent() {
        let result = diff("a\nb\n", "a\nb\n");
        assert_eq!(result.len(), 3);
        assert!(
            result
                .old_rows
                .iter()
                .all(|row| row.kind == RowKind::Unchanged)
        );
    }

    #[test]
    fn should_report_added_trailing_newline_as_one_line() {
        let result = diff("a", "a\n");
        assert_eq!(
            result.new_rows,
            vec![DiffRow::unchanged("a", 1, 1), DiffRow::added("", 2)]
        );
    }

    #[test]
    fn should_mirror_roles_when_inputs_swap() {
        let forward = diff("a\nb\nc", "a\nx\nc");
        let backward = diff("a\nx\nc", "a\nb\nc");

        assert_eq!(forward.stats().added, backward.stats().removed);
        assert_eq!(forward.stats().removed, backward.stats().added);
        let unchanged = |rows: &[DiffRow]| {
            rows.iter()
                .filter(|row| row.kind == RowKind::Unchanged)
                .map(|row| (row.old_line, row.new_line, row.text.clone()))
                .collect::<Vec<_>>()
        };
        let swapped: Vec<_> = unchanged(&backward.old_rows)
            .into_iter()
            .map(|(old, new, text)| (new, old, text))
            .collect();
        assert_eq!(unchanged(&forward.old_rows), swapped);
    }

    #[test]
    fn should_count_stats() {
        let stats = diff("a\nb\nc", "a\nc\nd\ne").stats();
        assert_eq!(
            stats,
            DiffStats {
                added: 2,
                removed: 1,
                unchanged: 2,
            }
        );
    }

    #[test]
    fn plain_rows_number_only_their_side() {
        let rows = plain_rows("x\ny", LineSide::New);
        assert_eq!(rows.len(), 2);
        assert_eq!(rows[1].new_line, Some(2));
        assert_eq!(rows[1].old_line, None);

        let rows = plain_rows("x", LineSide::Old);
        assert_eq!(rows[0].old_line, Some(1));
        assert_eq!(rows[0].new_line, None);
    }

    proptest! {
        #[test]
        fn identical_texts_diff_to_unchanged_rows(text in "[abc\n]{0,40}") {
            let result = diff(&text, &text);
            let line_count = split_lines(&text).len();
            prop_assert_eq!(result.len(), line_count);
            for (idx, (old, new)) in result.old_rows.iter().zip(&result.new_rows).enumerate() {
                prop_assert_eq!(old.kind, RowKind::Unchanged);
                prop_assert_eq!(new.kind, RowKind::Unchanged);
                prop_assert_eq!(old.old_line, Some(idx as u32 + 1));
                prop_assert_eq!(new.new_line, Some(idx as u32 + 1));
            }
        }

        #[test]
        fn each_side_reconstructs_its_input(old in "[abc\n]{0,40}", new in "[abc\n]{0,40}") {
            let result = diff(&old, &new);
            prop_assert_eq!(result.old_rows.len(), result.new_rows.len());
            prop_assert_eq!(side_text(&result.old_rows), old);
            prop_assert_eq!(side_text(&result.new_rows), new);
        }

        #[test]
        fn line_numbers_increase_monotonically(old in "[ab\n]{0,30}", new in "[ab\n]{0,30}") {
            let result = diff(&old, &new);
            for side in [LineSide::Old, LineSide::New] {
                let numbers: Vec<u32> = result
                    .rows(side)
                    .iter()
                    .filter_map(|row| row.line_for(side))
                    .collect();
                let expected: Vec<u32> = (1..=numbers.len() as u32).collect();
                prop_assert_eq!(numbers, expected);
            }
        }

        #[test]
        fn swapped_inputs_swap_added_and_removed(a in "[abc\n]{0,30}", b in "[abc\n]{0,30}") {
            let forward = diff(&a, &b).stats();
            let backward = diff(&b, &a).stats();
            prop_assert_eq!(forward.added, backward.removed);
            prop_assert_eq!(forward.removed, backward.added);
            prop_assert_eq!(forward.unchanged, backward.unchanged);
        }

        #[test]
        fn diff_is_deterministic(a in "[abc\n]{0,30}", b in "[abc\n]{0,30}") {
            prop_assert_eq!(diff(&a, &b), diff(&a, &b));
        }
    }
}
