// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//! Import command - merge a family store snapshot into the live store

use crate::graph::FamilyGraph;
use crate::types::FamilyStore;
use anyhow::{Context, Result};
use std::fs;
use std::path::Path;
use tracing::{info, warn};

/// Run the import command
pub fn run(file: &Path) -> Result<()> {
    let data_dir = super::data_dir()?;
    let mut graph = FamilyGraph::load(&data_dir)
        .with_context(|| format!("Failed to load family tree from {}", data_dir.display()))?;

    let content = fs::read_to_string(file)
        .with_context(|| format!("Failed to read {}", file.display()))?;
    let snapshot: FamilyStore = serde_json::from_str(&content)
        .with_context(|| format!("Failed to parse {}", file.display()))?;

    info!(
        "Importing {} person(s), {} relationship(s)",
        snapshot.persons.len(),
        snapshot.relationships.len()
    );

    let mut added_persons = 0;
    for person in snapshot.persons {
        if graph.get_person(&person.id).is_none() {
            added_persons += 1;
        }
        graph.add_person(person);
    }

    // Relationships merge at store level: snapshots may be partial, so
    // dangling endpoints are kept and surfaced by `check` rather than
    // rejected.
    let mut added_relationships = 0;
    for rel in snapshot.relationships {
        if graph.store.relationships.iter().any(|r| r.id == rel.id) {
            continue;
        }
        graph.store.relationships.push(rel);
        added_relationships += 1;
    }

    let dangling = graph.dangling_relationships().len();
    if dangling > 0 {
        warn!(
            "{} relationship(s) reference people not on record; run 'kintree check'",
            dangling
        );
    }

    graph.save(&data_dir)?;

    println!(
        "Imported {added_persons} new person(s) and {added_relationships} new relationship(s)"
    );

    Ok(())
}
