// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//
//! Relative timeline: every known relative of a target person, labeled
//! and ordered chronologically by birth date.
//!
//! Ordering is strictly by date; the generational display priority is
//! computed and carried on every entry but is not the sort key. Callers
//! that want generation-first ordering can re-sort with [`sort_grouped`].

use chrono::NaiveDate;
use serde::Serialize;

use crate::kinship::{classify, Kinship};
use crate::types::{Person, Relationship};

/// Sort placeholder for entries with no recorded birth date.
///
/// Undated entries must sort before all dated ones, and the fallback is
/// an explicit constant rather than a parsing default so reimplementing
/// date handling cannot shift it.
pub const UNDATED_PLACEHOLDER: NaiveDate = match NaiveDate::from_ymd_opt(1900, 1, 1) {
    Some(date) => date,
    None => panic!("1900-01-01 is a valid date"),
};

/// One entry in a relative timeline
#[derive(Debug, Clone, Serialize)]
pub struct TimelineEntry {
    /// The relative's person record
    pub person: Person,
    /// How this person relates to the target
    pub kinship: Kinship,
    /// Fixed display priority of the kinship (metadata, not the sort key)
    pub priority: u8,
    /// Birth date, if recorded
    pub birth_date: Option<NaiveDate>,
}

impl TimelineEntry {
    fn new(person: &Person, kinship: Kinship) -> Self {
        Self {
            person: person.clone(),
            kinship,
            priority: kinship.priority(),
            birth_date: person.birth_date,
        }
    }

    /// The date this entry sorts under
    #[must_use]
    pub fn sort_date(&self) -> NaiveDate {
        self.birth_date.unwrap_or(UNDATED_PLACEHOLDER)
    }
}

/// Build the relative timeline for `target_id`.
///
/// Classifies every other person on record against the target, drops the
/// unrelated, includes the target itself as `self`, and sorts ascending
/// by birth date (undated entries first, via [`UNDATED_PLACEHOLDER`]).
/// Returns an empty timeline when the target id is not on record. The
/// whole timeline is materialized per call; nothing is cached.
#[must_use]
pub fn build_timeline(
    target_id: &str,
    persons: &[Person],
    relationships: &[Relationship],
) -> Vec<TimelineEntry> {
    let Some(target) = persons.iter().find(|p| p.id == target_id) else {
        return Vec::new();
    };

    let mut entries = Vec::with_capacity(persons.len());
    entries.push(TimelineEntry::new(target, Kinship::Myself));

    for person in persons {
        if person.id == target_id {
            continue;
        }
        let kin = classify(target_id, &person.id, persons, relationships);
        if kin == Kinship::Unrelated {
            continue;
        }
        entries.push(TimelineEntry::new(person, kin));
    }

    // Stable, so same-day relatives keep record order.
    entries.sort_by_key(TimelineEntry::sort_date);
    entries
}

/// Re-sort a timeline by generation priority, then chronologically
/// within each generation.
pub fn sort_grouped(entries: &mut [TimelineEntry]) {
    entries.sort_by_key(|e| (e.priority, e.sort_date()));
}
