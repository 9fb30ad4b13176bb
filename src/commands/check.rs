// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//! Check command - audit the record data for inconsistencies
//!
//! The classifier is total and tolerates all of these defects; this
//! command exists so they can be found and fixed at the source.

use crate::graph::FamilyGraph;
use anyhow::{Context, Result};
use owo_colors::OwoColorize;

/// Run the check command. Fails with a summary when issues are found.
pub fn run() -> Result<()> {
    let data_dir = super::data_dir()?;
    let graph = FamilyGraph::load(&data_dir)
        .with_context(|| format!("Failed to load family tree from {}", data_dir.display()))?;

    let mut issues = 0;

    let dangling = graph.dangling_relationships();
    for rel in &dangling {
        issues += 1;
        println!(
            "{} relationship {} references a person not on record ({} -> {})",
            "dangling:".yellow(),
            rel.id,
            rel.person_a,
            rel.person_b
        );
    }

    for cycle in graph.parent_cycles() {
        issues += 1;
        if cycle.len() == 1 {
            println!(
                "{} {} is recorded as their own parent",
                "cycle:".red(),
                cycle[0]
            );
        } else {
            println!(
                "{} parent relation loops through: {}",
                "cycle:".red(),
                cycle.join(" -> ")
            );
        }
    }

    for (person, count) in graph.overfull_parentage() {
        issues += 1;
        println!(
            "{} {} has {} recorded parents",
            "overfull:".yellow(),
            person.display_name(),
            count
        );
    }

    if issues == 0 {
        println!(
            "Checked {} person(s), {} relationship(s): no issues found",
            graph.person_count(),
            graph.relationship_count()
        );
        Ok(())
    } else {
        anyhow::bail!("{} issue(s) found", issues);
    }
}
