// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//
//! Kinship classification over person and relationship records.
//!
//! [`classify`] labels how a candidate person relates to a target person
//! using only direct parent and spouse edges. Predicates are evaluated in
//! a fixed precedence order and every lookup is bounded to one or two hops
//! of direct adjacency, so malformed data (cycles, a person recorded as
//! their own ancestor) cannot cause unbounded traversal. The function is
//! total: dangling edge endpoints are skipped and unknown ids degrade to
//! [`Kinship::Unrelated`] instead of failing.

use std::collections::{HashMap, HashSet};
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::types::{Person, RelationKind, Relationship};

// =============================================================================
// Kinship Vocabulary
// =============================================================================

/// How a candidate person relates to a target person.
///
/// A closed vocabulary: classification never produces anything outside
/// this set. Each label carries a fixed display priority used for
/// generational grouping in presentation; lower sorts earlier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kinship {
    /// The target person themself
    #[serde(rename = "self")]
    Myself,
    /// Direct parent
    #[serde(rename = "parent")]
    Parent,
    /// Direct child
    #[serde(rename = "child")]
    Child,
    /// Married to the target
    #[serde(rename = "spouse")]
    Spouse,
    /// Shares the exact same set of recorded parents
    #[serde(rename = "sibling")]
    Sibling,
    /// Shares at least one, but not all, recorded parents
    #[serde(rename = "half-sibling")]
    HalfSibling,
    /// Parent of a parent
    #[serde(rename = "grandparent")]
    Grandparent,
    /// Child of a child
    #[serde(rename = "grandchild")]
    Grandchild,
    /// Full or half sibling of a parent
    #[serde(rename = "aunt/uncle")]
    AuntUncle,
    /// Child of a full or half sibling
    #[serde(rename = "niece/nephew")]
    NieceNephew,
    /// No relationship within the two-generation window
    #[serde(rename = "unrelated")]
    Unrelated,
}

impl Kinship {
    /// Fixed display priority for generational ordering.
    ///
    /// Sibling and half-sibling deliberately tie. Unrelated is never
    /// emitted in a timeline but still sorts last if compared.
    #[must_use]
    pub fn priority(&self) -> u8 {
        match self {
            Self::Myself => 0,
            Self::Grandparent => 1,
            Self::Parent => 2,
            Self::AuntUncle => 3,
            Self::Sibling | Self::HalfSibling => 5,
            Self::Spouse => 6,
            Self::Child => 7,
            Self::NieceNephew => 8,
            Self::Grandchild => 9,
            Self::Unrelated => 10,
        }
    }

    /// The human-readable label for this kinship
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Myself => "self",
            Self::Parent => "parent",
            Self::Child => "child",
            Self::Spouse => "spouse",
            Self::Sibling => "sibling",
            Self::HalfSibling => "half-sibling",
            Self::Grandparent => "grandparent",
            Self::Grandchild => "grandchild",
            Self::AuntUncle => "aunt/uncle",
            Self::NieceNephew => "niece/nephew",
            Self::Unrelated => "unrelated",
        }
    }
}

impl std::fmt::Display for Kinship {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Error returned when parsing an unknown kinship label
#[derive(Debug, Error)]
#[error("unknown kinship label: {0}")]
pub struct ParseKinshipError(pub String);

impl FromStr for Kinship {
    type Err = ParseKinshipError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "self" => Ok(Self::Myself),
            "parent" => Ok(Self::Parent),
            "child" => Ok(Self::Child),
            "spouse" => Ok(Self::Spouse),
            "sibling" => Ok(Self::Sibling),
            "half-sibling" => Ok(Self::HalfSibling),
            "grandparent" => Ok(Self::Grandparent),
            "grandchild" => Ok(Self::Grandchild),
            "aunt/uncle" | "aunt" | "uncle" => Ok(Self::AuntUncle),
            "niece/nephew" | "niece" | "nephew" => Ok(Self::NieceNephew),
            "unrelated" => Ok(Self::Unrelated),
            other => Err(ParseKinshipError(other.to_string())),
        }
    }
}

// =============================================================================
// Adjacency
// =============================================================================

/// Direct adjacency over the relationship records.
///
/// Built once per classification from edges whose endpoints are both on
/// record; dangling references are dropped here, which is what makes the
/// downstream predicates total.
struct Adjacency<'a> {
    known: HashSet<&'a str>,
    parents: HashMap<&'a str, HashSet<&'a str>>,
    children: HashMap<&'a str, HashSet<&'a str>>,
    spouses: HashSet<(&'a str, &'a str)>,
    empty: HashSet<&'a str>,
}

impl<'a> Adjacency<'a> {
    fn build(persons: &'a [Person], relationships: &'a [Relationship]) -> Self {
        let known: HashSet<&str> = persons.iter().map(|p| p.id.as_str()).collect();
        let mut parents: HashMap<&str, HashSet<&str>> = HashMap::new();
        let mut children: HashMap<&str, HashSet<&str>> = HashMap::new();
        let mut spouses: HashSet<(&str, &str)> = HashSet::new();

        for rel in relationships {
            let (a, b) = (rel.person_a.as_str(), rel.person_b.as_str());
            if !known.contains(a) || !known.contains(b) {
                continue;
            }
            match rel.rel {
                RelationKind::Parent => {
                    parents.entry(b).or_default().insert(a);
                    children.entry(a).or_default().insert(b);
                }
                RelationKind::Spouse => {
                    spouses.insert((a, b));
                }
            }
        }

        Self {
            known,
            parents,
            children,
            spouses,
            empty: HashSet::new(),
        }
    }

    fn parents_of(&self, id: &str) -> &HashSet<&'a str> {
        self.parents.get(id).unwrap_or(&self.empty)
    }

    fn children_of(&self, id: &str) -> &HashSet<&'a str> {
        self.children.get(id).unwrap_or(&self.empty)
    }

    fn married(&self, a: &str, b: &str) -> bool {
        self.spouses.contains(&(a, b)) || self.spouses.contains(&(b, a))
    }

    /// Full-or-half sibling test: distinct people sharing at least one
    /// recorded parent. The distinctness check matters for the two-hop
    /// rules, where the parent-set intersection alone would make a person
    /// their own sibling.
    fn are_siblings(&self, a: &str, b: &str) -> bool {
        a != b && !self.parents_of(a).is_disjoint(self.parents_of(b))
    }
}

// =============================================================================
// Classification
// =============================================================================

/// Classify how `candidate_id` relates to `target_id`.
///
/// Pure and deterministic: same inputs, same label, no I/O. If either id
/// is absent from `persons` the result is [`Kinship::Unrelated`].
///
/// Predicates are checked in fixed precedence order, first match wins:
/// self, parent, child, spouse, sibling/half-sibling, grandparent,
/// grandchild, aunt/uncle, niece/nephew, unrelated. The sibling split is
/// by parent set: identical sets make a sibling, partial overlap a
/// half-sibling.
#[must_use]
pub fn classify(
    target_id: &str,
    candidate_id: &str,
    persons: &[Person],
    relationships: &[Relationship],
) -> Kinship {
    let adj = Adjacency::build(persons, relationships);

    if !adj.known.contains(target_id) || !adj.known.contains(candidate_id) {
        return Kinship::Unrelated;
    }
    if target_id == candidate_id {
        return Kinship::Myself;
    }

    let target_parents = adj.parents_of(target_id);
    if target_parents.contains(candidate_id) {
        return Kinship::Parent;
    }
    if adj.parents_of(candidate_id).contains(target_id) {
        return Kinship::Child;
    }
    if adj.married(target_id, candidate_id) {
        return Kinship::Spouse;
    }

    let candidate_parents = adj.parents_of(candidate_id);
    if !target_parents.is_disjoint(candidate_parents) {
        return if target_parents == candidate_parents {
            Kinship::Sibling
        } else {
            Kinship::HalfSibling
        };
    }

    // Grandparent: a parent of a parent.
    if target_parents
        .iter()
        .any(|p| adj.parents_of(p).contains(candidate_id))
    {
        return Kinship::Grandparent;
    }

    // Grandchild: a child of a child.
    if adj
        .children_of(target_id)
        .iter()
        .any(|c| adj.children_of(c).contains(candidate_id))
    {
        return Kinship::Grandchild;
    }

    // Aunt/uncle: a full or half sibling of a parent.
    if target_parents
        .iter()
        .any(|p| adj.are_siblings(p, candidate_id))
    {
        return Kinship::AuntUncle;
    }

    // Niece/nephew: a child of a full or half sibling, i.e. some parent
    // of the candidate is a sibling of the target.
    if candidate_parents
        .iter()
        .any(|q| adj.are_siblings(target_id, q))
    {
        return Kinship::NieceNephew;
    }

    Kinship::Unrelated
}

// =============================================================================
// Tests
// =============================================================================
