//! Renders an [`EnrichedContext`] as a tiered, bilingual prompt section.
//!
//! Entries are split by confidence into official, verified and
//! user-contributed tiers. Only the first two count toward deciding whether
//! anything is worth emitting; the user-contributed tier is drawn from the
//! unfiltered entries and exists to show what the floor excluded.

use std::fmt::Write as _;

use crate::knowledge::{
    AntiPattern, ComponentRelationship, FailureScenario, KnowledgeRecord, Locale, RelationshipType,
};
use crate::trust::{ConfidenceTier, DEFAULT_MIN_CONFIDENCE};

use super::EnrichedContext;

/// Risks listed in the failure section.
pub const MAX_RISKS: usize = 5;

const HEADER: &str = "## Infrastructure Knowledge / 인프라 지식";
const OFFICIAL: &str = "### Official Standards / 공식 표준";
const VERIFIED: &str = "### Verified Practices / 검증된 사례";
const USER_CONTRIBUTED: &str = "### User-Contributed / 사용자 기여 (advisory, below confidence floor)";
const VIOLATIONS: &str = "### Violations / 위반 사항";
const RISKS: &str = "### Failure Risks / 장애 위험";
const PRIORITY: &str = "### Priority Rules / 우선순위 규칙";

const PRIORITY_RULES: [&str; 4] = [
    "1. Fix critical violations before anything else. / 치명적 위반을 가장 먼저 해결하세요.",
    "2. Add missing mandatory components. / 누락된 필수 구성 요소를 추가하세요.",
    "3. Official standards override verified practices. / 공식 표준이 검증된 사례보다 우선합니다.",
    "4. Treat user-contributed entries as hints only. / 사용자 기여 항목은 참고로만 사용하세요.",
];

/// Builder for the prompt section.
#[derive(Debug, Clone, Copy)]
pub struct PromptSection<'a> {
    enriched: &'a EnrichedContext,
    min_confidence: f32,
    locale: Locale,
}

impl<'a> PromptSection<'a> {
    /// Starts a section over `enriched` at the default floor, in English.
    #[must_use]
    pub fn new(enriched: &'a EnrichedContext) -> Self {
        Self {
            enriched,
            min_confidence: DEFAULT_MIN_CONFIDENCE,
            locale: Locale::default(),
        }
    }

    /// Confidence floor; entries below it land in the user-contributed tier.
    #[must_use]
    pub fn min_confidence(mut self, min_confidence: f32) -> Self {
        self.min_confidence = min_confidence;
        self
    }

    /// Language of entry text. Headers are always bilingual.
    #[must_use]
    pub fn locale(mut self, locale: Locale) -> Self {
        self.locale = locale;
        self
    }

    fn entries(&self) -> impl Iterator<Item = &'a ComponentRelationship> {
        self.enriched
            .relationships
            .iter()
            .chain(self.enriched.suggestions.iter())
    }

    fn tier(&self, tier: ConfidenceTier) -> Vec<&'a ComponentRelationship> {
        self.entries()
            .filter(|r| ConfidenceTier::classify(r.confidence(), self.min_confidence) == tier)
            .collect()
    }

    fn relationship_line(&self, rel: &ComponentRelationship) -> String {
        format!("- {}", self.relationship_body(rel))
    }

    fn relationship_body(&self, rel: &ComponentRelationship) -> String {
        let source = rel
            .meta
            .trust
            .sources
            .first()
            .map(|s| format!(", {}", s.title))
            .unwrap_or_default();
        format!(
            "[{}] {} {} {}: {} ({:.2}{})",
            rel.meta.id,
            rel.source,
            rel.relationship_type.as_str(),
            rel.target,
            rel.reason.get(self.locale),
            rel.confidence(),
            source
        )
    }

    fn anti_pattern_line(&self, ap: &AntiPattern) -> String {
        format!(
            "- [{}] {} {}: {} -> {}",
            ap.severity.as_str().to_uppercase(),
            ap.meta.id,
            ap.name.get(self.locale),
            ap.problem.get(self.locale),
            ap.solution.get(self.locale)
        )
    }

    fn violation_lines(&self) -> Vec<String> {
        let mut anti_patterns: Vec<&AntiPattern> = self.enriched.violations.iter().collect();
        anti_patterns.sort_by_key(|ap| ap.severity);

        let floor = self.min_confidence;
        let conflicts = self
            .enriched
            .conflicts
            .iter()
            .filter(|r| r.confidence() >= floor)
            .map(|r| format!("- [CONFLICT] {}", self.relationship_body(r)));
        let missing = self
            .enriched
            .suggestions
            .iter()
            .filter(|r| r.relationship_type == RelationshipType::Requires && r.confidence() >= floor)
            .map(|r| format!("- [MISSING] {}", self.relationship_body(r)));

        anti_patterns
            .into_iter()
            .map(|ap| self.anti_pattern_line(ap))
            .chain(conflicts)
            .chain(missing)
            .collect()
    }

    fn risk_line(&self, risk: &FailureScenario) -> String {
        let tip = risk
            .prevention
            .first()
            .map(|t| format!(" Prevention: {}", t.get(self.locale)))
            .unwrap_or_default();
        format!(
            "- [{}] {} {}: {}{}",
            risk.impact,
            risk.meta.id,
            risk.title.get(self.locale),
            risk.description.get(self.locale),
            tip
        )
    }

    /// Renders the section, or an empty string when nothing at or above the
    /// floor applies and there are no violations or risks.
    #[must_use]
    pub fn render(&self) -> String {
        let official = self.tier(ConfidenceTier::Official);
        let verified = self.tier(ConfidenceTier::Verified);
        let user = self.tier(ConfidenceTier::UserContributed);
        let violations = self.violation_lines();
        let risks: Vec<&FailureScenario> = self.enriched.risks.iter().take(MAX_RISKS).collect();

        if official.is_empty() && verified.is_empty() && violations.is_empty() && risks.is_empty() {
            return String::new();
        }

        let mut out = String::new();
        let _ = writeln!(out, "{HEADER}");
        for (header, entries) in [(OFFICIAL, &official), (VERIFIED, &verified), (USER_CONTRIBUTED, &user)] {
            if entries.is_empty() {
                continue;
            }
            let _ = writeln!(out, "\n{header}");
            for rel in entries {
                let _ = writeln!(out, "{}", self.relationship_line(rel));
            }
        }
        if !violations.is_empty() {
            let _ = writeln!(out, "\n{VIOLATIONS}");
            for line in &violations {
                let _ = writeln!(out, "{line}");
            }
        }
        if !risks.is_empty() {
            let _ = writeln!(out, "\n{RISKS}");
            for risk in risks {
                let _ = writeln!(out, "{}", self.risk_line(risk));
            }
        }
        let _ = writeln!(out, "\n{PRIORITY}");
        for rule in PRIORITY_RULES {
            let _ = writeln!(out, "{rule}");
        }
        out
    }
}

/// Renders `enriched` with the given confidence floor and English entry text.
#[must_use]
pub fn build_knowledge_prompt_section(enriched: &EnrichedContext, min_confidence: f32) -> String {
    PromptSection::new(enriched)
        .min_confidence(min_confidence)
        .render()
}
