// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//! Timeline command - render a person's relatives in chronological order

use crate::graph::FamilyGraph;
use crate::kinship::Kinship;
use crate::timeline::{build_timeline, sort_grouped, TimelineEntry};
use anyhow::{Context, Result};
use owo_colors::{AnsiColors, OwoColorize};

/// Run the timeline command
pub fn run(target: &str, group: bool, only: Option<String>, json: bool) -> Result<()> {
    let data_dir = super::data_dir()?;
    let graph = FamilyGraph::load(&data_dir)
        .with_context(|| format!("Failed to load family tree from {}", data_dir.display()))?;

    let target_id = graph.resolve_person_id(target)?;

    let mut entries = build_timeline(&target_id, graph.persons(), graph.relationships());

    if let Some(label) = only {
        let wanted: Kinship = label.parse()?;
        entries.retain(|e| e.kinship == wanted || e.kinship == Kinship::Myself);
    }

    if group {
        sort_grouped(&mut entries);
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }

    if entries.is_empty() {
        println!("No timeline for {target_id}: person not on record.");
        return Ok(());
    }

    let target_name = graph
        .get_person(&target_id)
        .map_or(target_id.clone(), |p| p.display_name());
    println!("Timeline of {target_name}'s relatives:");
    for entry in &entries {
        println!("  {}", render(entry));
    }

    Ok(())
}

/// One line per relative: birth year, name, colored label
fn render(entry: &TimelineEntry) -> String {
    let born = entry
        .birth_date
        .map(|d| d.format("%Y-%m-%d").to_string())
        .unwrap_or_else(|| "----------".to_string());
    let label_text = entry.kinship.label();
    let label = label_text.color(label_color(entry.kinship));
    format!("{born}  {}  [{label}]", entry.person.display_name())
}

/// Color keyed by label, one hue per generation band
fn label_color(kinship: Kinship) -> AnsiColors {
    match kinship {
        Kinship::Myself => AnsiColors::White,
        Kinship::Grandparent | Kinship::Parent => AnsiColors::Blue,
        Kinship::AuntUncle => AnsiColors::Cyan,
        Kinship::Sibling | Kinship::HalfSibling => AnsiColors::Green,
        Kinship::Spouse => AnsiColors::Magenta,
        Kinship::Child | Kinship::NieceNephew | Kinship::Grandchild => AnsiColors::Yellow,
        Kinship::Unrelated => AnsiColors::Default,
    }
}
