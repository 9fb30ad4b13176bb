// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//! Relationship management commands - record parent and spouse links

use crate::graph::FamilyGraph;
use crate::types::{RecordMeta, RelationKind, Relationship};
use anyhow::{Context, Result};
use chrono::Utc;

/// Run relate command
pub fn run(action: &str, from: Option<String>, to: Option<String>, rel: &str) -> Result<()> {
    let data_dir = super::data_dir()?;
    let mut graph = FamilyGraph::load(&data_dir)
        .with_context(|| format!("Failed to load family tree from {}", data_dir.display()))?;

    match action {
        "add" | "create" => {
            let from = from.ok_or_else(|| anyhow::anyhow!("--from is required"))?;
            let to = to.ok_or_else(|| anyhow::anyhow!("--to is required"))?;

            let rel_kind: RelationKind = rel.parse()?;

            // Resolve person IDs (allow names)
            let from_id = graph.resolve_person_id(&from)?;
            let to_id = graph.resolve_person_id(&to)?;

            if from_id == to_id {
                anyhow::bail!("Cannot relate a person to themself");
            }

            let rel_id = Relationship::generate_id(rel_kind, &from_id, &to_id);
            let relationship = Relationship {
                kind: "Relationship".into(),
                id: rel_id.clone(),
                rel: rel_kind,
                person_a: from_id.clone(),
                person_b: to_id.clone(),
                meta: RecordMeta {
                    created_by: "manual".into(),
                    created_at: Utc::now(),
                },
            };

            graph.add_relationship(relationship)?;
            graph.save(&data_dir)?;

            match rel_kind {
                RelationKind::Parent => {
                    println!("Recorded: {from_id} is a parent of {to_id}");
                }
                RelationKind::Spouse => {
                    println!("Recorded: {from_id} is married to {to_id}");
                }
            }
            println!("  id: {rel_id}");
        }

        "remove" | "delete" | "rm" => {
            let from = from.ok_or_else(|| anyhow::anyhow!("--from is required"))?;
            let to = to.ok_or_else(|| anyhow::anyhow!("--to is required"))?;

            let from_id = graph.resolve_person_id(&from)?;
            let to_id = graph.resolve_person_id(&to)?;

            // Remove matching relationships in either direction; spouse
            // records are symmetric and parent records may have been
            // entered either way round by mistake.
            let initial_count = graph.store.relationships.len();
            graph.store.relationships.retain(|r| {
                !((r.person_a == from_id && r.person_b == to_id)
                    || (r.person_a == to_id && r.person_b == from_id))
            });
            let removed = initial_count - graph.store.relationships.len();

            if removed > 0 {
                graph.save(&data_dir)?;
                println!("Removed {removed} relationship(s) between {from_id} and {to_id}");
            } else {
                println!("No relationships found between {from_id} and {to_id}");
            }
        }

        "list" | "ls" => {
            if graph.relationships().is_empty() {
                println!("No relationships recorded. Use 'kintree relate add' to create one.");
                return Ok(());
            }

            println!("Relationships ({}):", graph.relationship_count());
            for rel in graph.relationships() {
                let a_name = graph
                    .get_person(&rel.person_a)
                    .map_or(rel.person_a.clone(), |p| p.display_name());
                let b_name = graph
                    .get_person(&rel.person_b)
                    .map_or(rel.person_b.clone(), |p| p.display_name());
                match rel.rel {
                    RelationKind::Parent => {
                        println!("  {a_name} --[parent of]--> {b_name}");
                    }
                    RelationKind::Spouse => {
                        println!("  {a_name} <--[married]--> {b_name}");
                    }
                }
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: add, remove, list", other);
        }
    }

    Ok(())
}
