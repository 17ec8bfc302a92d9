//! Trust metadata attached to every knowledge entry.
//!
//! Confidence is authored per entry, never computed, and is the only
//! signal used for ranking and tiering. Provenance (sources, review date,
//! votes, edit history) travels with the entry so that a UI can explain
//! why a piece of guidance was surfaced.

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::ValidationError;

/// Entries at or above this confidence are treated as official standards.
pub const OFFICIAL_CONFIDENCE: f32 = 0.85;

/// Default confidence floor for guidance surfaced to users and prompts.
pub const DEFAULT_MIN_CONFIDENCE: f32 = 0.5;

/// Kind of publication a citation points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceType {
    /// Standards body publication (RFC, NIST, ISO, CIS).
    Rfc,
    /// NIST publication.
    Nist,
    /// CIS benchmark.
    Cis,
    /// OWASP guidance.
    Owasp,
    /// Vendor documentation or well-architected framework.
    Vendor,
    /// Peer-reviewed or industry research.
    Research,
    /// Post-mortem or incident write-up.
    Incident,
    /// Contributed by a user of the system.
    UserContributed,
}

impl fmt::Display for SourceType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Self::Rfc => "RFC",
            Self::Nist => "NIST",
            Self::Cis => "CIS",
            Self::Owasp => "OWASP",
            Self::Vendor => "vendor",
            Self::Research => "research",
            Self::Incident => "incident",
            Self::UserContributed => "user",
        };
        f.write_str(s)
    }
}

/// A citation backing a knowledge entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SourceCitation {
    /// Publication kind.
    #[serde(rename = "type")]
    pub source_type: SourceType,

    /// Human-readable title.
    pub title: String,

    /// Link to the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,

    /// Section or control within the source.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub section: Option<String>,
}

impl SourceCitation {
    /// Creates a citation without URL or section.
    #[must_use]
    pub fn new(source_type: SourceType, title: impl Into<String>) -> Self {
        Self {
            source_type,
            title: title.into(),
            url: None,
            section: None,
        }
    }

    /// Sets the URL.
    #[must_use]
    pub fn with_url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Sets the section reference.
    #[must_use]
    pub fn with_section(mut self, section: impl Into<String>) -> Self {
        self.section = Some(section.into());
        self
    }
}

/// One edit in an entry's modification history.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ModificationRecord {
    /// When the edit was made.
    pub modified_at: DateTime<Utc>,
    /// Who made it.
    pub modified_by: String,
    /// What changed.
    pub summary: String,

    /// Confidence before the edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub previous_confidence: Option<f32>,
}

/// Provenance and confidence for a knowledge entry.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrustMetadata {
    /// Authored confidence in (0.0, 1.0].
    pub confidence: f32,

    /// Ordered, non-empty citation list.
    pub sources: Vec<SourceCitation>,

    /// Last time a maintainer reviewed the entry.
    pub last_reviewed_at: DateTime<Utc>,

    /// Community votes in favour.
    #[serde(default)]
    pub upvotes: u32,

    /// Community votes against.
    #[serde(default)]
    pub downvotes: u32,

    /// Id of the entry this one was derived from.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub derived_from: Option<String>,

    /// Author of the latest edit.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_modified_by: Option<String>,

    /// Recorded edits.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub modification_history: Vec<ModificationRecord>,
}

impl TrustMetadata {
    /// Creates trust metadata with a single citation, validating confidence.
    ///
    /// # Errors
    ///
    /// Returns `ValidationError::ConfidenceOutOfRange` if the value is not in (0.0, 1.0].
    pub fn new(
        confidence: f32,
        source: SourceCitation,
        last_reviewed_at: DateTime<Utc>,
    ) -> Result<Self, ValidationError> {
        validate_confidence("<new>", confidence)?;
        Ok(Self {
            confidence,
            sources: vec![source],
            last_reviewed_at,
            upvotes: 0,
            downvotes: 0,
            derived_from: None,
            last_modified_by: None,
            modification_history: Vec::new(),
        })
    }

    /// Adds another citation.
    #[must_use]
    pub fn with_source(mut self, source: SourceCitation) -> Self {
        self.sources.push(source);
        self
    }

    /// Sets community votes.
    #[must_use]
    pub fn with_votes(mut self, upvotes: u32, downvotes: u32) -> Self {
        self.upvotes = upvotes;
        self.downvotes = downvotes;
        self
    }

    /// Tier this entry falls into for a given confidence floor.
    #[must_use]
    pub fn tier(&self, min_confidence: f32) -> ConfidenceTier {
        ConfidenceTier::classify(self.confidence, min_confidence)
    }

    /// Net community score (upvotes minus downvotes).
    #[must_use]
    pub fn net_votes(&self) -> i64 {
        i64::from(self.upvotes) - i64::from(self.downvotes)
    }

    /// Checks the authored invariants for the entry `id`.
    ///
    /// # Errors
    ///
    /// Returns the first violated invariant.
    pub fn validate(&self, id: &str) -> Result<(), ValidationError> {
        validate_confidence(id, self.confidence)?;
        if self.sources.is_empty() {
            return Err(ValidationError::MissingSources { id: id.to_string() });
        }
        Ok(())
    }
}

fn validate_confidence(id: &str, value: f32) -> Result<(), ValidationError> {
    if value.is_nan() || value <= 0.0 || value > 1.0 {
        return Err(ValidationError::ConfidenceOutOfRange {
            id: id.to_string(),
            value,
        });
    }
    Ok(())
}

/// Confidence tier used when rendering guidance.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ConfidenceTier {
    /// At or above both the floor and [`OFFICIAL_CONFIDENCE`].
    Official,
    /// At or above the floor, below [`OFFICIAL_CONFIDENCE`].
    Verified,
    /// Below the floor, whatever the confidence.
    UserContributed,
}

impl ConfidenceTier {
    /// Classifies a confidence value against a floor.
    ///
    /// The floor is checked first: with a floor above
    /// [`OFFICIAL_CONFIDENCE`], a 0.95 entry is still user-contributed.
    #[must_use]
    pub fn classify(confidence: f32, min_confidence: f32) -> Self {
        if confidence < min_confidence {
            Self::UserContributed
        } else if confidence >= OFFICIAL_CONFIDENCE {
            Self::Official
        } else {
            Self::Verified
        }
    }
}
