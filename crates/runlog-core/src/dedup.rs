// ABOUTME: Collapses near-duplicate export rows reported by two source devices into one per run
// ABOUTME: Linear scan over first-seen groups; a duplicate only replaces a kept row lacking elevation
//
// SPDX-License-Identifier: MIT OR Apache-2.0
// Copyright (c) 2025 Pierre Fitness Intelligence

//! Deduplication
//!
//! The phone export and the fitness tracker both report the same run a
//! few seconds apart. Rows join the first group whose representative
//! timestamp lies within [`DUPLICATE_WINDOW_SECS`]; otherwise they start a
//! new group. The representative is fixed by the first row seen, and
//! output keeps group creation order.

use tracing::debug;

use crate::constants::DUPLICATE_WINDOW_SECS;
use crate::models::RawRow;

/// One run as seen so far during the scan
#[derive(Debug)]
struct DuplicateGroup {
    representative: i64,
    kept: RawRow,
}

impl DuplicateGroup {
    fn new(row: RawRow) -> Self {
        Self {
            representative: row.started_at,
            kept: row,
        }
    }

    const fn covers(&self, timestamp: i64) -> bool {
        (timestamp - self.representative).abs() <= DUPLICATE_WINDOW_SECS
    }

    /// Keep the baseline unless it lacks elevation and the duplicate has it
    fn offer(&mut self, row: RawRow) {
        if !self.kept.has_ascended_elevation() && row.has_ascended_elevation() {
            debug!(
                representative = self.representative,
                replaced = self.kept.started_at,
                replacement = row.started_at,
                "Duplicate with elevation replaces kept row"
            );
            self.kept = row;
        } else {
            debug!(
                representative = self.representative,
                dropped = row.started_at,
                "Dropping duplicate row"
            );
        }
    }
}

/// Collapse near-duplicate rows, one row per run
#[must_use]
pub fn deduplicate(rows: impl IntoIterator<Item = RawRow>) -> Vec<RawRow> {
    rows.into_iter()
        .fold(Vec::<DuplicateGroup>::new(), |mut groups, row| {
            match groups.iter_mut().find(|group| group.covers(row.started_at)) {
                Some(group) => group.offer(row),
                None => groups.push(DuplicateGroup::new(row)),
            }
            groups
        })
        .into_iter()
        .map(|group| group.kept)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(start: &str, ascended: Option<f64>) -> RawRow {
        RawRow {
            elevation_ascended_m: ascended,
            ..RawRow::new(format!("{start} - 2021-10-04 09:00:00"), "Running", 5.2, 1966.0)
                .unwrap()
        }
    }

    #[test]
    fn test_rows_five_seconds_apart_collapse() {
        let rows = vec![
            row("2021-10-04 08:07:18", Some(36.58)),
            row("2021-10-04 08:07:23", None),
        ];
        let deduped = deduplicate(rows);

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].elevation_ascended_m, Some(36.58));
    }

    #[test]
    fn test_rows_fifteen_seconds_apart_stay_separate() {
        let rows = vec![
            row("2021-10-04 08:07:18", None),
            row("2021-10-04 08:07:33", None),
        ];
        assert_eq!(deduplicate(rows).len(), 2);
    }

    #[test]
    fn test_window_edge_is_inclusive() {
        let rows = vec![
            row("2021-10-04 08:07:18", None),
            row("2021-10-04 08:07:28", None),
        ];
        assert_eq!(deduplicate(rows).len(), 1);
    }

    #[test]
    fn test_duplicate_with_elevation_replaces_baseline() {
        let rows = vec![
            row("2021-10-04 08:07:18", None),
            row("2021-10-04 08:07:20", Some(36.58)),
        ];
        let deduped = deduplicate(rows);

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].started_at, 1_633_334_840);
        assert_eq!(deduped[0].elevation_ascended_m, Some(36.58));
    }

    #[test]
    fn test_zero_elevation_baseline_is_replaced() {
        let rows = vec![
            row("2021-10-04 08:07:18", Some(0.0)),
            row("2021-10-04 08:07:20", Some(12.0)),
        ];
        assert_eq!(deduplicate(rows)[0].elevation_ascended_m, Some(12.0));
    }

    #[test]
    fn test_baseline_with_elevation_is_never_downgraded() {
        let rows = vec![
            row("2021-10-04 08:07:18", Some(10.0)),
            row("2021-10-04 08:07:20", Some(50.0)),
            row("2021-10-04 08:07:21", None),
        ];
        let deduped = deduplicate(rows);

        assert_eq!(deduped.len(), 1);
        assert_eq!(deduped[0].elevation_ascended_m, Some(10.0));
    }

    #[test]
    fn test_output_keeps_group_creation_order() {
        let rows = vec![
            row("2021-10-09 12:33:18", None),
            row("2021-10-04 08:07:18", None),
            row("2021-10-09 12:33:20", Some(3.0)),
            row("2021-10-07 08:20:09", None),
        ];
        let starts: Vec<i64> = deduplicate(rows).iter().map(|r| r.started_at).collect();

        assert_eq!(starts, vec![1_633_782_800, 1_633_334_838, 1_633_594_809]);
    }

    #[test]
    fn test_deduplication_is_idempotent() {
        let rows = vec![
            row("2021-10-04 08:07:18", None),
            row("2021-10-04 08:07:21", Some(36.58)),
            row("2021-10-07 08:20:09", Some(20.0)),
            row("2021-10-07 08:20:12", None),
            row("2021-10-09 12:33:18", None),
        ];
        let once = deduplicate(rows);
        let twice = deduplicate(once.clone());

        assert_eq!(once, twice);
        assert_eq!(once.len(), 3);
    }

    #[test]
    fn test_replacement_near_window_edge_regroups_on_second_pass() {
        // The group keeps its first representative after replacement, so a
        // row outside that window but inside the replacement's joins later.
        let rows = vec![
            row("2021-10-04 08:07:18", None),
            row("2021-10-04 08:07:28", Some(36.58)),
            row("2021-10-04 08:07:36", None),
        ];
        let once = deduplicate(rows);
        let twice = deduplicate(once.clone());

        let starts: Vec<i64> = once.iter().map(|r| r.started_at).collect();
        assert_eq!(starts, vec![1_633_334_848, 1_633_334_856]);
        assert_eq!(twice.len(), 1);
        assert_eq!(twice[0].started_at, 1_633_334_848);
        assert_eq!(deduplicate(twice.clone()), twice);
    }
}
