// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//! Person management commands - add, remove, and inspect person records

use crate::graph::FamilyGraph;
use crate::types::{Person, RecordMeta};
use anyhow::{Context, Result};
use chrono::{NaiveDate, Utc};

/// Run person command
pub fn run(
    action: &str,
    name: Option<String>,
    first: Option<String>,
    last: Option<String>,
    born: Option<String>,
    tags: Vec<String>,
) -> Result<()> {
    let data_dir = super::data_dir()?;
    let mut graph = FamilyGraph::load(&data_dir)
        .with_context(|| format!("Failed to load family tree from {}", data_dir.display()))?;

    match action {
        "add" | "create" => {
            // A positional "First Last" is a shortcut for --first/--last.
            let (mut first_name, mut last_name) = (first, last);
            if let Some(full) = name {
                let mut parts = full.split_whitespace();
                if first_name.is_none() {
                    first_name = parts.next().map(String::from);
                }
                if last_name.is_none() {
                    let rest = parts.collect::<Vec<_>>().join(" ");
                    if !rest.is_empty() {
                        last_name = Some(rest);
                    }
                }
            }
            if first_name.is_none() && last_name.is_none() {
                anyhow::bail!("A name is required: pass \"First Last\" or --first/--last");
            }

            let birth_date: Option<NaiveDate> = match born {
                Some(b) => Some(
                    b.parse()
                        .with_context(|| format!("Invalid birth date: {b} (expected YYYY-MM-DD)"))?,
                ),
                None => None,
            };

            let created_at = Utc::now();
            let id = Person::generate_id(
                first_name.as_deref(),
                last_name.as_deref(),
                birth_date,
                created_at,
            );
            let person = Person {
                kind: "Person".into(),
                id: id.clone(),
                first_name,
                last_name,
                birth_date,
                tags,
                meta: RecordMeta {
                    created_by: "manual".into(),
                    created_at,
                },
            };

            let display = person.display_name();
            graph.add_person(person);
            graph.save(&data_dir)?;

            println!("Added {display}");
            println!("  id: {id}");
        }

        "remove" | "delete" | "rm" => {
            let name = name.ok_or_else(|| anyhow::anyhow!("A person name or ID is required"))?;
            let id = graph.resolve_person_id(&name)?;
            let display = graph
                .get_person(&id)
                .map(Person::display_name)
                .unwrap_or_else(|| id.clone());

            graph.remove_person(&id);
            graph.save(&data_dir)?;

            println!("Removed {display} ({id}) and their relationships");
        }

        "list" | "ls" => {
            if graph.is_empty() {
                println!("No people on record. Use 'kintree person add' to create one.");
                return Ok(());
            }

            println!("People ({}):", graph.person_count());
            for person in graph.persons() {
                let born = person
                    .birth_date
                    .map(|d| d.to_string())
                    .unwrap_or_else(|| "unknown".into());
                println!("  {}  b. {}  ({})", person.display_name(), born, person.id);
            }
        }

        "show" | "info" => {
            let name = name.ok_or_else(|| anyhow::anyhow!("A person name or ID is required"))?;
            let id = graph.resolve_person_id(&name)?;
            let person = graph
                .get_person(&id)
                .ok_or_else(|| anyhow::anyhow!("Person not found: {id}"))?;

            println!("{}", person.display_name());
            println!("  id: {}", person.id);
            match person.birth_date {
                Some(d) => println!("  born: {d}"),
                None => println!("  born: unknown"),
            }
            if !person.tags.is_empty() {
                println!("  tags: {}", person.tags.join(", "));
            }

            let names = |people: Vec<&Person>| -> String {
                people
                    .iter()
                    .map(|p| p.display_name())
                    .collect::<Vec<_>>()
                    .join(", ")
            };
            let parents = graph.parents_of(&id);
            if !parents.is_empty() {
                println!("  parents: {}", names(parents));
            }
            let children = graph.children_of(&id);
            if !children.is_empty() {
                println!("  children: {}", names(children));
            }
            let spouses = graph.spouses_of(&id);
            if !spouses.is_empty() {
                println!("  spouses: {}", names(spouses));
            }
        }

        other => {
            anyhow::bail!("Unknown action: {}. Valid: add, remove, list, show", other);
        }
    }

    Ok(())
}
