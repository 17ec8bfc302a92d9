//! # InfraSage - Knowledge-Driven Infrastructure Analysis
//!
//! InfraSage checks a declarative infrastructure topology against a curated,
//! trust-scored knowledge base. It surfaces missing dependencies, conflicting
//! components, known anti-patterns, failure risks and capacity bottlenecks,
//! and renders the findings as a tiered prompt section for LLM generation.
//!
//! ## Core Concepts
//!
//! - **Topology**: nodes of ~50 component kinds joined by directed connections
//! - **Knowledge record**: a relationship, pattern, anti-pattern, failure
//!   scenario, performance profile, vulnerability or cloud service, each
//!   carrying confidence and source citations
//! - **Detection registry**: rule id to executable predicate, so stored
//!   anti-patterns can be re-armed after a round trip through a database
//! - **Enriched context**: the subset of the knowledge base that applies to
//!   one topology
//!
//! ## Usage
//!
//! ```rust,ignore
//! use infrasage::{catalog, enrich_context, build_knowledge_prompt_section, EnrichOptions, InfraSpec};
//!
//! let spec = InfraSpec::from_json(r#"{"nodes":[{"id":"db-1","type":"db-server"}],"connections":[]}"#)?;
//! let options = EnrichOptions::new()
//!     .with_anti_patterns(catalog::anti_patterns())
//!     .with_failures(catalog::failures());
//! let enriched = enrich_context(&spec, catalog::relationships(), options);
//! let prompt = build_knowledge_prompt_section(&enriched, 0.5);
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::module_name_repetitions)]

// Core model
pub mod component;
pub mod error;
pub mod knowledge;
pub mod topology;
pub mod trust;

// Built-in knowledge
pub mod catalog;

// Analysis
pub mod capacity;
pub mod enrich;
pub mod evaluator;
pub mod registry;

// Knowledge access
pub mod config;
pub mod source;

pub use capacity::{
    estimate_capacity, find_bottlenecks, recommend_sizing, Bottleneck, CanHandle, CapacityEstimate,
    SizingEntry, SizingRecommendation, SizingTable, TrafficTier,
};
pub use component::ComponentType;
pub use config::KnowledgeConfig;
pub use enrich::{
    build_knowledge_prompt_section, enrich_context, EnrichOptions, EnrichedContext, PromptSection,
};
pub use error::{DataSourceError, KnowledgeError, KnowledgeResult, ValidationError};
pub use evaluator::detect_anti_patterns;
pub use knowledge::{
    AntiPattern, ArchitecturePattern, CloudService, ComponentRelationship, Detection,
    FailureScenario, KnowledgeKind, KnowledgeRecord, Locale, LocalizedText, PerformanceProfile,
    Severity, Vulnerability,
};
pub use registry::{detection_registry, DetectionRegistry};
#[cfg(feature = "sqlite")]
pub use source::SqliteDataSource;
pub use source::{
    create_data_source, data_source, reset_data_source, DataSourceProvider, KnowledgeDataSource,
    KnowledgeFilter, SourceKind, StaticDataSource,
};
pub use topology::{Connection, FlowType, InfraNode, InfraSpec};
pub use trust::{ConfidenceTier, SourceCitation, SourceType, TrustMetadata};
