use std::collections::BTreeSet;

use crate::report::issue::{IssueRecord, SeverityRank};

/// Joins the "source: description" entries of a segment tooltip
pub const TOOLTIP_SEPARATOR: &str = "\n";

/// A maximal run of lines covered by exactly the same issues.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment<'a> {
    pub line_start: usize,
    pub line_end: usize,
    /// Covering issues in input order
    pub covering: Vec<&'a IssueRecord>,
    /// Highest severity among `covering`
    pub highlight: SeverityRank,
    pub tooltip: String,
}

impl Segment<'_> {
    pub fn contains(&self, line: usize) -> bool {
        self.line_start <= line && line <= self.line_end
    }
}

/// Partition the lines touched by `issues` into ordered, non-overlapping
/// segments. Lines outside every issue produce no segment.
///
/// The sweep visits each distinct boundary (`line_start` and `line_end + 1`
/// of every issue) once, keeping the set of issues active between two
/// consecutive boundaries.
pub fn merge_segments(issues: &[IssueRecord]) -> Vec<Segment<'_>> {
    if issues.is_empty() {
        return Vec::new();
    }

    let mut boundaries: Vec<u128> = issues
        .iter()
        .flat_map(|i| [i.line_start() as u128, exclusive_end(i)])
        .collect();
    boundaries.sort_unstable();
    boundaries.dedup();

    let mut by_start: Vec<usize> = (0..issues.len()).collect();
    by_start.sort_by_key(|&i| issues[i].line_start());
    let starts_at = |i: usize| issues[i].line_start() as u128;
    let mut by_end: Vec<usize> = (0..issues.len()).collect();
    by_end.sort_by_key(|&i| exclusive_end(&issues[i]));

    let mut active: BTreeSet<usize> = BTreeSet::new();
    let (mut next_start, mut next_end) = (0, 0);
    // (first line, one past the last line, covering issue indices)
    let mut runs: Vec<(u128, u128, Vec<usize>)> = Vec::new();

    for window in boundaries.windows(2) {
        let (lo, hi) = (window[0], window[1]);

        while next_end < by_end.len() && exclusive_end(&issues[by_end[next_end]]) <= lo {
            active.remove(&by_end[next_end]);
            next_end += 1;
        }
        while next_start < by_start.len() && starts_at(by_start[next_start]) <= lo {
            active.insert(by_start[next_start]);
            next_start += 1;
        }

        if active.is_empty() {
            continue;
        }

        let covering: Vec<usize> = active.iter().copied().collect();
        if let Some((_, end, prev)) = runs.last_mut() {
            if *end == lo && *prev == covering {
                *end = hi;
                continue;
            }
        }
        runs.push((lo, hi, covering));
    }

    // Every boundary is a line number or one past one, so both ends fit.
    runs.into_iter()
        .map(|(lo, hi, indices)| build_segment(issues, lo as usize, (hi - 1) as usize, &indices))
        .collect()
}

/// Widened so a range ending on `usize::MAX` still has an end boundary.
fn exclusive_end(issue: &IssueRecord) -> u128 {
    issue.line_end() as u128 + 1
}

fn build_segment<'a>(
    issues: &'a [IssueRecord],
    line_start: usize,
    line_end: usize,
    indices: &[usize],
) -> Segment<'a> {
    let highlight = indices
        .iter()
        .map(|&i| issues[i].severity())
        .max()
        .unwrap_or(SeverityRank::Info);

    // Severity first, then tool, then text; input order only separates
    // entries that render identically.
    let mut ordered = indices.to_vec();
    ordered.sort_by(|&a, &b| {
        let (ia, ib) = (&issues[a], &issues[b]);
        ib.severity()
            .cmp(&ia.severity())
            .then_with(|| ia.source().cmp(ib.source()))
            .then_with(|| ia.description().cmp(ib.description()))
            .then_with(|| a.cmp(&b))
    });
    let tooltip = ordered
        .iter()
        .map(|&i| format!("{}: {}", issues[i].source(), issues[i].description()))
        .collect::<Vec<_>>()
        .join(TOOLTIP_SEPARATOR);

    Segment {
        line_start,
        line_end,
        covering: indices.iter().map(|&i| &issues[i]).collect(),
        highlight,
        tooltip,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issue(start: usize, end: usize, source: &str, desc: &str, sev: SeverityRank) -> IssueRecord {
        IssueRecord::new("src/a.php", start, end, source, desc, sev).unwrap()
    }

    fn ranges(segments: &[Segment<'_>]) -> Vec<(usize, usize)> {
        segments.iter().map(|s| (s.line_start, s.line_end)).collect()
    }

    #[test]
    fn nested_issue_splits_into_three_segments() {
        let issues = vec![
            issue(3, 5, "PMD", "Unused variable", SeverityRank::Warning),
            issue(4, 4, "Checkstyle", "Null deref", SeverityRank::Error),
        ];
        let segments = merge_segments(&issues);

        assert_eq!(ranges(&segments), vec![(3, 3), (4, 4), (5, 5)]);
        assert_eq!(segments[0].covering, vec![&issues[0]]);
        assert_eq!(segments[1].covering, vec![&issues[0], &issues[1]]);
        assert_eq!(segments[2].covering, vec![&issues[0]]);

        assert_eq!(segments[1].highlight, SeverityRank::Error);
        assert_eq!(
            segments[1].tooltip,
            "Checkstyle: Null deref\nPMD: Unused variable"
        );
        assert_eq!(segments[0].highlight, SeverityRank::Warning);
    }

    #[test]
    fn whole_file_issue_is_one_segment() {
        let issues = vec![issue(1, 400, "Coverage", "Not covered", SeverityRank::Info)];
        let segments = merge_segments(&issues);
        assert_eq!(ranges(&segments), vec![(1, 400)]);
    }

    #[test]
    fn identical_ranges_share_one_segment() {
        let issues = vec![
            issue(10, 12, "PMD", "Long method", SeverityRank::Warning),
            issue(10, 12, "Padawan", "Deep nesting", SeverityRank::Info),
        ];
        let segments = merge_segments(&issues);
        assert_eq!(ranges(&segments), vec![(10, 12)]);
        assert_eq!(segments[0].covering.len(), 2);
    }

    #[test]
    fn duplicates_are_kept() {
        let issues = vec![
            issue(2, 2, "PMD", "Same", SeverityRank::Warning),
            issue(2, 2, "PMD", "Same", SeverityRank::Warning),
        ];
        let segments = merge_segments(&issues);
        assert_eq!(segments.len(), 1);
        assert_eq!(segments[0].covering.len(), 2);
        assert_eq!(segments[0].tooltip, "PMD: Same\nPMD: Same");
    }

    #[test]
    fn gaps_between_issues_produce_no_segment() {
        let issues = vec![
            issue(1, 2, "PMD", "a", SeverityRank::Info),
            issue(6, 7, "PMD", "b", SeverityRank::Info),
        ];
        assert_eq!(ranges(&merge_segments(&issues)), vec![(1, 2), (6, 7)]);
    }

    #[test]
    fn touching_issues_stay_separate() {
        let issues = vec![
            issue(1, 3, "PMD", "a", SeverityRank::Info),
            issue(4, 6, "PMD", "b", SeverityRank::Info),
        ];
        assert_eq!(ranges(&merge_segments(&issues)), vec![(1, 3), (4, 6)]);
    }

    #[test]
    fn staggered_overlap() {
        let issues = vec![
            issue(1, 5, "PMD", "a", SeverityRank::Info),
            issue(3, 8, "PMD", "b", SeverityRank::Blocker),
        ];
        let segments = merge_segments(&issues);
        assert_eq!(ranges(&segments), vec![(1, 2), (3, 5), (6, 8)]);
        assert_eq!(segments[1].highlight, SeverityRank::Blocker);
        assert_eq!(segments[2].covering, vec![&issues[1]]);
    }

    #[test]
    fn input_order_does_not_change_output_text() {
        let a = issue(3, 9, "PMD", "first", SeverityRank::Warning);
        let b = issue(5, 6, "PMD", "second", SeverityRank::Warning);
        let c = issue(5, 12, "Checkstyle", "third", SeverityRank::Error);

        let forward = vec![a.clone(), b.clone(), c.clone()];
        let backward = vec![c, b, a];
        let one = merge_segments(&forward);
        let two = merge_segments(&backward);

        assert_eq!(ranges(&one), ranges(&two));
        let tips_one: Vec<_> = one.iter().map(|s| s.tooltip.clone()).collect();
        let tips_two: Vec<_> = two.iter().map(|s| s.tooltip.clone()).collect();
        assert_eq!(tips_one, tips_two);
    }

    #[test]
    fn ranges_reaching_the_last_line_number() {
        let issues = vec![
            issue(1, usize::MAX, "PMD", "a", SeverityRank::Info),
            issue(usize::MAX, usize::MAX, "PMD", "b", SeverityRank::Error),
        ];
        let segments = merge_segments(&issues);
        assert_eq!(ranges(&segments), vec![(1, usize::MAX - 1), (usize::MAX, usize::MAX)]);
        assert_eq!(segments[1].highlight, SeverityRank::Error);
    }

    #[test]
    fn no_issues_no_segments() {
        assert!(merge_segments(&[]).is_empty());
    }
}
