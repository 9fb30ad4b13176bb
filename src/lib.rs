// SPDX-License-Identifier: AGPL-3.0-or-later
// SPDX-FileCopyrightText: 2026 Kintree Contributors
//
//! Kintree library - kinship classifier and record keeper for family trees
//!
//! This crate provides the core functionality for keeping person and
//! relationship records, classifying how any two people on record are
//! related, and building a chronological timeline of a person's relatives.

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

pub mod commands;
pub mod config;
pub mod graph;
pub mod kinship;
pub mod timeline;

/// Core record types persisted in the family store
pub mod types {
    use chrono::{DateTime, NaiveDate, Utc};
    use serde::{Deserialize, Serialize};
    use sha2::{Digest, Sha256};
    use std::str::FromStr;
    use thiserror::Error;

    // =========================================================================
    // Record Metadata
    // =========================================================================

    /// Provenance metadata attached to every record
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct RecordMeta {
        /// Who created this record (manual, import)
        pub created_by: String,
        /// When the record was created
        pub created_at: DateTime<Utc>,
    }

    // =========================================================================
    // Person (Node)
    // =========================================================================

    /// Person record in the family tree
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Person {
        /// Always "Person"
        pub kind: String,
        /// Unique identifier: person:<12-hex content hash>
        pub id: String,
        /// Given name
        pub first_name: Option<String>,
        /// Family name
        pub last_name: Option<String>,
        /// Date of birth, if known
        pub birth_date: Option<NaiveDate>,
        /// Tags for classification
        #[serde(default)]
        pub tags: Vec<String>,
        /// Record metadata
        pub meta: RecordMeta,
    }

    impl Person {
        /// Generate an identifier for a person record.
        ///
        /// Hashes the name, birth date, and creation instant so that two
        /// same-named people added at different times get distinct ids.
        #[must_use]
        pub fn generate_id(
            first_name: Option<&str>,
            last_name: Option<&str>,
            birth_date: Option<NaiveDate>,
            created_at: DateTime<Utc>,
        ) -> String {
            let mut hasher = Sha256::new();
            hasher.update(first_name.unwrap_or_default().as_bytes());
            hasher.update([0x1f]);
            hasher.update(last_name.unwrap_or_default().as_bytes());
            hasher.update([0x1f]);
            if let Some(born) = birth_date {
                hasher.update(born.to_string().as_bytes());
            }
            hasher.update([0x1f]);
            hasher.update(
                created_at
                    .timestamp_nanos_opt()
                    .unwrap_or_default()
                    .to_le_bytes(),
            );
            let hash = hex::encode(hasher.finalize());
            format!("person:{}", &hash[..12])
        }

        /// Display name: "First Last", falling back to whichever half is
        /// recorded, then to the id.
        #[must_use]
        pub fn display_name(&self) -> String {
            match (self.first_name.as_deref(), self.last_name.as_deref()) {
                (Some(f), Some(l)) => format!("{f} {l}"),
                (Some(f), None) => f.to_string(),
                (None, Some(l)) => l.to_string(),
                (None, None) => self.id.clone(),
            }
        }
    }

    // =========================================================================
    // Relationship (Edge)
    // =========================================================================

    /// Relationship kinds recorded between two people
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
    #[serde(rename_all = "lowercase")]
    pub enum RelationKind {
        /// Directed: `person_a` is a parent of `person_b`
        Parent,
        /// Symmetric: `person_a` and `person_b` are married; order carries
        /// no meaning
        Spouse,
    }

    impl RelationKind {
        /// Short code used in output and serialized form
        #[must_use]
        pub fn code(&self) -> &'static str {
            match self {
                Self::Parent => "parent",
                Self::Spouse => "spouse",
            }
        }
    }

    impl std::fmt::Display for RelationKind {
        fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
            f.write_str(self.code())
        }
    }

    /// Error returned when parsing an unknown relation kind
    #[derive(Debug, Error)]
    #[error("unknown relation kind: {0} (valid: parent, spouse)")]
    pub struct ParseRelationKindError(pub String);

    impl FromStr for RelationKind {
        type Err = ParseRelationKindError;

        fn from_str(s: &str) -> Result<Self, Self::Err> {
            match s.to_lowercase().as_str() {
                "parent" => Ok(Self::Parent),
                "spouse" | "married" => Ok(Self::Spouse),
                other => Err(ParseRelationKindError(other.to_string())),
            }
        }
    }

    /// Relationship record between two people
    #[derive(Debug, Clone, Serialize, Deserialize)]
    pub struct Relationship {
        /// Always "Relationship"
        pub kind: String,
        /// Content-hash ID: rel:<hash of (rel, person_a, person_b)>
        pub id: String,
        /// Relationship kind
        pub rel: RelationKind,
        /// First endpoint (the parent when `rel` is `Parent`)
        pub person_a: String,
        /// Second endpoint (the child when `rel` is `Parent`)
        pub person_b: String,
        /// Record metadata
        pub meta: RecordMeta,
    }

    impl Relationship {
        /// Generate a deterministic ID for a relationship.
        ///
        /// Spouse edges are symmetric, so the endpoint pair is normalized
        /// before hashing: adding (a, b) and (b, a) yields the same id.
        #[must_use]
        pub fn generate_id(rel: RelationKind, person_a: &str, person_b: &str) -> String {
            let (a, b) = match rel {
                RelationKind::Spouse if person_b < person_a => (person_b, person_a),
                _ => (person_a, person_b),
            };
            let mut hasher = Sha256::new();
            hasher.update(rel.code().as_bytes());
            hasher.update([0x1f]);
            hasher.update(a.as_bytes());
            hasher.update([0x1f]);
            hasher.update(b.as_bytes());
            let hash = hex::encode(hasher.finalize());
            format!("rel:{}", &hash[..8])
        }
    }

    // =========================================================================
    // Family Store
    // =========================================================================

    /// The complete persisted family store
    #[derive(Debug, Clone, Default, Serialize, Deserialize)]
    pub struct FamilyStore {
        /// All person records
        #[serde(default)]
        pub persons: Vec<Person>,
        /// All relationship records
        #[serde(default)]
        pub relationships: Vec<Relationship>,
    }
}

/// Prelude for common imports
pub mod prelude {
    pub use crate::kinship::Kinship;
    pub use crate::timeline::TimelineEntry;
    pub use crate::types::*;
    pub use anyhow::{Context, Result};
}
