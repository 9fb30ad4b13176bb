// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//
//! Graph data structures and persistence for the family tree

use crate::types::{FamilyStore, Person, RelationKind, Relationship};
use anyhow::{Context, Result};
use petgraph::graph::{DiGraph, NodeIndex};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// The family graph with petgraph backing for structural audits.
///
/// The petgraph edges model the ancestry relation only (parent -> child);
/// spouse records are symmetric and stay in the store.
pub struct FamilyGraph {
    /// The underlying directed ancestry graph
    graph: DiGraph<String, String>,
    /// Map from person ID to node index
    node_indices: HashMap<String, NodeIndex>,
    /// The record store (persons, relationships)
    pub store: FamilyStore,
}

impl Default for FamilyGraph {
    fn default() -> Self {
        Self::new()
    }
}

impl FamilyGraph {
    /// Create a new empty family graph
    #[must_use]
    pub fn new() -> Self {
        Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            store: FamilyStore::default(),
        }
    }

    /// Load the graph from a directory containing tree.json
    pub fn load(dir: &Path) -> Result<Self> {
        let tree_path = dir.join("tree.json");

        let store: FamilyStore = if tree_path.exists() {
            let content = fs::read_to_string(&tree_path)
                .with_context(|| format!("Failed to read {}", tree_path.display()))?;
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse {}", tree_path.display()))?
        } else {
            FamilyStore::default()
        };

        let mut family = Self {
            graph: DiGraph::new(),
            node_indices: HashMap::new(),
            store,
        };

        family.rebuild_graph();

        Ok(family)
    }

    /// Save the graph to a directory
    pub fn save(&self, dir: &Path) -> Result<()> {
        fs::create_dir_all(dir)
            .with_context(|| format!("Failed to create directory {}", dir.display()))?;

        let tree_path = dir.join("tree.json");
        let tree_json =
            serde_json::to_string_pretty(&self.store).context("Failed to serialize family store")?;
        fs::write(&tree_path, tree_json)
            .with_context(|| format!("Failed to write {}", tree_path.display()))?;

        Ok(())
    }

    /// Rebuild the petgraph backing from the store.
    ///
    /// Parent edges with an endpoint missing from the person records are
    /// left out of the backing; they remain in the store for `check` to
    /// report.
    fn rebuild_graph(&mut self) {
        self.graph.clear();
        self.node_indices.clear();

        for person in &self.store.persons {
            let idx = self.graph.add_node(person.id.clone());
            self.node_indices.insert(person.id.clone(), idx);
        }

        for rel in &self.store.relationships {
            if rel.rel != RelationKind::Parent {
                continue;
            }
            if let (Some(&parent_idx), Some(&child_idx)) = (
                self.node_indices.get(&rel.person_a),
                self.node_indices.get(&rel.person_b),
            ) {
                self.graph.add_edge(parent_idx, child_idx, rel.id.clone());
            }
        }
    }

    /// Add a person to the graph, updating in place if the id exists
    pub fn add_person(&mut self, person: Person) {
        if self.node_indices.contains_key(&person.id) {
            if let Some(existing) = self.store.persons.iter_mut().find(|p| p.id == person.id) {
                *existing = person;
            }
        } else {
            let idx = self.graph.add_node(person.id.clone());
            self.node_indices.insert(person.id.clone(), idx);
            self.store.persons.push(person);
        }
    }

    /// Remove a person and every relationship touching them.
    ///
    /// Returns false when the id is not on record.
    pub fn remove_person(&mut self, id: &str) -> bool {
        if !self.node_indices.contains_key(id) {
            return false;
        }
        self.store.persons.retain(|p| p.id != id);
        self.store
            .relationships
            .retain(|r| r.person_a != id && r.person_b != id);
        self.rebuild_graph();
        true
    }

    /// Add a relationship to the graph.
    ///
    /// Both endpoints must be on record; adding an existing relationship
    /// id is a no-op.
    pub fn add_relationship(&mut self, rel: Relationship) -> Result<()> {
        let a_idx = self
            .node_indices
            .get(&rel.person_a)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Person not found: {}", rel.person_a))?;
        let b_idx = self
            .node_indices
            .get(&rel.person_b)
            .copied()
            .ok_or_else(|| anyhow::anyhow!("Person not found: {}", rel.person_b))?;

        if self.store.relationships.iter().any(|r| r.id == rel.id) {
            return Ok(()); // Idempotent
        }

        if rel.rel == RelationKind::Parent {
            self.graph.add_edge(a_idx, b_idx, rel.id.clone());
        }
        self.store.relationships.push(rel);

        Ok(())
    }

    /// Get a person by ID
    #[must_use]
    pub fn get_person(&self, id: &str) -> Option<&Person> {
        self.store.persons.iter().find(|p| p.id == id)
    }

    /// Get all persons
    #[must_use]
    pub fn persons(&self) -> &[Person] {
        &self.store.persons
    }

    /// Get all relationships
    #[must_use]
    pub fn relationships(&self) -> &[Relationship] {
        &self.store.relationships
    }

    /// Get the recorded parents of a person
    #[must_use]
    pub fn parents_of(&self, id: &str) -> Vec<&Person> {
        self.store
            .relationships
            .iter()
            .filter(|r| r.rel == RelationKind::Parent && r.person_b == id)
            .filter_map(|r| self.get_person(&r.person_a))
            .collect()
    }

    /// Get the recorded children of a person
    #[must_use]
    pub fn children_of(&self, id: &str) -> Vec<&Person> {
        self.store
            .relationships
            .iter()
            .filter(|r| r.rel == RelationKind::Parent && r.person_a == id)
            .filter_map(|r| self.get_person(&r.person_b))
            .collect()
    }

    /// Get the recorded spouses of a person
    #[must_use]
    pub fn spouses_of(&self, id: &str) -> Vec<&Person> {
        self.store
            .relationships
            .iter()
            .filter(|r| r.rel == RelationKind::Spouse)
            .filter_map(|r| {
                if r.person_a == id {
                    self.get_person(&r.person_b)
                } else if r.person_b == id {
                    self.get_person(&r.person_a)
                } else {
                    None
                }
            })
            .collect()
    }

    /// Get person count
    #[must_use]
    pub fn person_count(&self) -> usize {
        self.store.persons.len()
    }

    /// Get relationship count
    #[must_use]
    pub fn relationship_count(&self) -> usize {
        self.store.relationships.len()
    }

    /// Check if the graph is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.store.persons.is_empty()
    }

    // =========================================================================
    // Audits
    // =========================================================================

    /// Relationships with an endpoint missing from the person records.
    ///
    /// These can enter via hand-edited or imported files; the classifier
    /// skips them, this surfaces them.
    #[must_use]
    pub fn dangling_relationships(&self) -> Vec<&Relationship> {
        self.store
            .relationships
            .iter()
            .filter(|r| {
                !self.node_indices.contains_key(&r.person_a)
                    || !self.node_indices.contains_key(&r.person_b)
            })
            .collect()
    }

    /// Cycles in the parent relation, including self-parenting.
    ///
    /// Each cycle is reported as the list of person ids involved. The
    /// classifier terminates on cyclic data regardless; this is a data
    /// quality report.
    #[must_use]
    pub fn parent_cycles(&self) -> Vec<Vec<String>> {
        let mut cycles = Vec::new();

        for scc in petgraph::algo::tarjan_scc(&self.graph) {
            if scc.len() > 1 {
                cycles.push(scc.iter().map(|&idx| self.graph[idx].clone()).collect());
            }
        }

        // Self-parenting is a single-node cycle tarjan reports as a
        // trivial component, so catch the self-loop edge directly.
        for edge in self.graph.edge_indices() {
            if let Some((a, b)) = self.graph.edge_endpoints(edge) {
                if a == b {
                    cycles.push(vec![self.graph[a].clone()]);
                }
            }
        }

        cycles
    }

    /// Persons with more than two recorded parents
    #[must_use]
    pub fn overfull_parentage(&self) -> Vec<(&Person, usize)> {
        self.store
            .persons
            .iter()
            .filter_map(|p| {
                let count = self.parents_of(&p.id).len();
                (count > 2).then_some((p, count))
            })
            .collect()
    }

    // =========================================================================
    // Name Resolution & Export
    // =========================================================================

    /// Resolve a person name or ID to a full ID
    pub fn resolve_person_id(&self, name_or_id: &str) -> Result<String> {
        // If it looks like a full ID, use it directly
        if name_or_id.starts_with("person:") {
            if self.get_person(name_or_id).is_some() {
                return Ok(name_or_id.to_string());
            }
            anyhow::bail!("Person not found: {}", name_or_id);
        }

        // Otherwise, search by name
        let needle = name_or_id.to_lowercase();
        let matches: Vec<&Person> = self
            .store
            .persons
            .iter()
            .filter(|p| {
                let display = p.display_name().to_lowercase();
                display == needle || display.contains(&needle)
            })
            .collect();

        match matches.len() {
            0 => anyhow::bail!("No person found matching: {}", name_or_id),
            1 => Ok(matches[0].id.clone()),
            _ => {
                eprintln!("Multiple people match '{}':", name_or_id);
                for p in &matches {
                    eprintln!("  {} ({})", p.display_name(), p.id);
                }
                anyhow::bail!("Ambiguous person name. Use full ID.");
            }
        }
    }

    /// Export to DOT format for Graphviz
    #[must_use]
    pub fn to_dot(&self) -> String {
        let mut dot = String::from("digraph family {\n");
        dot.push_str("  rankdir=TB;\n");
        dot.push_str("  node [shape=box, style=rounded];\n\n");

        for person in &self.store.persons {
            let born = person
                .birth_date
                .map(|d| d.format("%Y").to_string())
                .unwrap_or_else(|| "?".to_string());
            let label = format!("{}\\nb. {}", person.display_name(), born);
            dot.push_str(&format!("  \"{}\" [label=\"{}\"];\n", person.id, label));
        }

        dot.push('\n');

        for rel in &self.store.relationships {
            match rel.rel {
                RelationKind::Parent => {
                    dot.push_str(&format!(
                        "  \"{}\" -> \"{}\";\n",
                        rel.person_a, rel.person_b
                    ));
                }
                RelationKind::Spouse => {
                    dot.push_str(&format!(
                        "  \"{}\" -> \"{}\" [dir=none, style=dashed];\n",
                        rel.person_a, rel.person_b
                    ));
                }
            }
        }

        dot.push_str("}\n");
        dot
    }

    /// Export to JSON
    pub fn to_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self.store).context("Failed to serialize family store to JSON")
    }

    /// Export to TOML
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(&self.store).context("Failed to serialize family store to TOML")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::RecordMeta;
    use chrono::Utc;

    fn make_test_person(id: &str, first: &str) -> Person {
        Person {
            kind: "Person".into(),
            id: format!("person:{id}"),
            first_name: Some(first.into()),
            last_name: Some("Test".into()),
            birth_date: None,
            tags: vec![],
            meta: RecordMeta {
                created_by: "test".into(),
                created_at: Utc::now(),
            },
        }
    }

    fn make_test_relationship(rel: RelationKind, a: &str, b: &str) -> Relationship {
        Relationship {
            kind: "Relationship".into(),
            id: Relationship::generate_id(rel, a, b),
            rel,
            person_a: a.into(),
            person_b: b.into(),
            meta: RecordMeta {
                created_by: "test".into(),
                created_at: Utc::now(),
            },
        }
    }

    #[test]
    fn test_add_person() {
        let mut graph = FamilyGraph::new();
        let person = make_test_person("ada", "Ada");

        graph.add_person(person.clone());

        assert_eq!(graph.person_count(), 1);
        assert!(graph.get_person(&person.id).is_some());
    }

    #[test]
    fn test_add_person_upserts() {
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("ada", "Ada"));
        let mut updated = make_test_person("ada", "Adelaide");
        updated.tags.push("updated".into());
        graph.add_person(updated);

        assert_eq!(graph.person_count(), 1);
        let stored = graph.get_person("person:ada").unwrap();
        assert_eq!(stored.first_name.as_deref(), Some("Adelaide"));
    }

    #[test]
    fn test_add_relationship_requires_endpoints() {
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("ada", "Ada"));

        let rel =
            make_test_relationship(RelationKind::Parent, "person:ada", "person:missing");
        assert!(graph.add_relationship(rel).is_err());
        assert_eq!(graph.relationship_count(), 0);
    }

    #[test]
    fn test_add_relationship_idempotent() {
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("ada", "Ada"));
        graph.add_person(make_test_person("byron", "Byron"));

        let rel = make_test_relationship(RelationKind::Parent, "person:byron", "person:ada");
        graph.add_relationship(rel.clone()).unwrap();
        graph.add_relationship(rel).unwrap();

        assert_eq!(graph.relationship_count(), 1);
    }

    #[test]
    fn test_spouse_id_symmetric() {
        let id_ab = Relationship::generate_id(RelationKind::Spouse, "person:a", "person:b");
        let id_ba = Relationship::generate_id(RelationKind::Spouse, "person:b", "person:a");
        assert_eq!(id_ab, id_ba);

        // Parent ids stay directional
        let p_ab = Relationship::generate_id(RelationKind::Parent, "person:a", "person:b");
        let p_ba = Relationship::generate_id(RelationKind::Parent, "person:b", "person:a");
        assert_ne!(p_ab, p_ba);
    }

    #[test]
    fn test_accessors() {
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("ada", "Ada"));
        graph.add_person(make_test_person("byron", "Byron"));
        graph.add_person(make_test_person("anne", "Anne"));

        graph
            .add_relationship(make_test_relationship(
                RelationKind::Parent,
                "person:byron",
                "person:ada",
            ))
            .unwrap();
        graph
            .add_relationship(make_test_relationship(
                RelationKind::Spouse,
                "person:byron",
                "person:anne",
            ))
            .unwrap();

        assert_eq!(graph.parents_of("person:ada").len(), 1);
        assert_eq!(graph.children_of("person:byron").len(), 1);
        assert_eq!(graph.spouses_of("person:anne").len(), 1);
        assert_eq!(graph.spouses_of("person:byron").len(), 1);
    }

    #[test]
    fn test_remove_person_drops_relationships() {
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("ada", "Ada"));
        graph.add_person(make_test_person("byron", "Byron"));
        graph
            .add_relationship(make_test_relationship(
                RelationKind::Parent,
                "person:byron",
                "person:ada",
            ))
            .unwrap();

        assert!(graph.remove_person("person:byron"));
        assert_eq!(graph.person_count(), 1);
        assert_eq!(graph.relationship_count(), 0);
        assert!(!graph.remove_person("person:byron"));
    }

    #[test]
    fn test_parent_cycles_detected() {
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("a", "A"));
        graph.add_person(make_test_person("b", "B"));
        graph
            .add_relationship(make_test_relationship(
                RelationKind::Parent,
                "person:a",
                "person:b",
            ))
            .unwrap();
        graph
            .add_relationship(make_test_relationship(
                RelationKind::Parent,
                "person:b",
                "person:a",
            ))
            .unwrap();

        let cycles = graph.parent_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0].len(), 2);
    }

    #[test]
    fn test_self_parent_is_a_cycle() {
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("a", "A"));
        graph
            .add_relationship(make_test_relationship(
                RelationKind::Parent,
                "person:a",
                "person:a",
            ))
            .unwrap();

        let cycles = graph.parent_cycles();
        assert_eq!(cycles.len(), 1);
        assert_eq!(cycles[0], vec!["person:a".to_string()]);
    }

    #[test]
    fn test_dangling_relationships_survive_load() {
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("ada", "Ada"));
        // Dangling records can only enter through the store (imports,
        // hand-edited files), not add_relationship.
        graph.store.relationships.push(make_test_relationship(
            RelationKind::Parent,
            "person:ghost",
            "person:ada",
        ));

        assert_eq!(graph.dangling_relationships().len(), 1);
    }

    #[test]
    fn test_to_dot() {
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("ada", "Ada"));

        let dot = graph.to_dot();

        assert!(dot.contains("digraph family"));
        assert!(dot.contains("Ada Test"));
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("ada", "Ada"));
        graph.add_person(make_test_person("byron", "Byron"));
        graph
            .add_relationship(make_test_relationship(
                RelationKind::Parent,
                "person:byron",
                "person:ada",
            ))
            .unwrap();
        graph.save(dir.path()).unwrap();

        let loaded = FamilyGraph::load(dir.path()).unwrap();
        assert_eq!(loaded.person_count(), 2);
        assert_eq!(loaded.relationship_count(), 1);
        assert_eq!(loaded.parents_of("person:ada").len(), 1);
    }

    #[test]
    fn test_resolve_person_id() {
        let mut graph = FamilyGraph::new();
        graph.add_person(make_test_person("ada", "Ada"));
        graph.add_person(make_test_person("byron", "Byron"));

        assert_eq!(graph.resolve_person_id("Ada").unwrap(), "person:ada");
        assert_eq!(
            graph.resolve_person_id("person:byron").unwrap(),
            "person:byron"
        );
        assert!(graph.resolve_person_id("nobody").is_err());
        // "Test" matches both last names
        assert!(graph.resolve_person_id("Test").is_err());
    }
}
