// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//! Classify command - label how a candidate relates to a target person

use crate::graph::FamilyGraph;
use crate::kinship;
use anyhow::{Context, Result};

/// Run the classify command
pub fn run(target: &str, candidate: &str, json: bool) -> Result<()> {
    let data_dir = super::data_dir()?;
    let graph = FamilyGraph::load(&data_dir)
        .with_context(|| format!("Failed to load family tree from {}", data_dir.display()))?;

    let target_id = graph.resolve_person_id(target)?;
    let candidate_id = graph.resolve_person_id(candidate)?;

    let label = kinship::classify(
        &target_id,
        &candidate_id,
        graph.persons(),
        graph.relationships(),
    );

    let target_name = graph
        .get_person(&target_id)
        .map_or(target_id.clone(), |p| p.display_name());
    let candidate_name = graph
        .get_person(&candidate_id)
        .map_or(candidate_id.clone(), |p| p.display_name());

    if json {
        let out = serde_json::json!({
            "target": target_id,
            "candidate": candidate_id,
            "kinship": label,
            "priority": label.priority(),
        });
        println!("{}", serde_json::to_string_pretty(&out)?);
    } else {
        println!("{candidate_name} is {target_name}'s: {label}");
    }

    Ok(())
}
