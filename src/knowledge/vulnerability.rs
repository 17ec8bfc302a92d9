//! Known vulnerabilities affecting component kinds.

use serde::{Deserialize, Serialize};

use crate::component::ComponentType;

use super::{EntryMeta, KnowledgeKind, KnowledgeRecord, LocalizedText};

/// Severity of a vulnerability.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum VulnerabilitySeverity {
    /// Exploitable remotely with severe impact.
    Critical,
    /// Serious.
    High,
    /// Moderate.
    Medium,
    /// Minor.
    Low,
}

/// A known vulnerability affecting one or more component types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Vulnerability {
    /// Shared header.
    #[serde(flatten)]
    pub meta: EntryMeta,

    /// CVE identifier, when one exists.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cve_id: Option<String>,

    /// Short title.
    pub title: LocalizedText,
    /// What the flaw is.
    pub description: LocalizedText,
    /// Severity.
    pub severity: VulnerabilitySeverity,

    /// CVSS base score.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cvss_score: Option<f32>,

    /// Component types exposed.
    pub affected_components: Vec<ComponentType>,
    /// How to remediate.
    pub mitigation: LocalizedText,
    /// Publication date, `YYYY-MM-DD`.
    pub published_date: String,
}

impl KnowledgeRecord for Vulnerability {
    const KIND: KnowledgeKind = KnowledgeKind::Vulnerability;

    fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    fn text_fields(&self) -> Vec<&str> {
        let mut out: Vec<&str> = [&self.title, &self.description, &self.mitigation]
            .into_iter()
            .flat_map(|t| [t.en.as_str(), t.ko.as_str()])
            .collect();
        if let Some(cve) = &self.cve_id {
            out.push(cve.as_str());
        }
        out
    }

    fn components(&self) -> Vec<ComponentType> {
        self.affected_components.clone()
    }
}

/// Vulnerabilities that list the component as affected.
#[must_use]
pub fn vulnerabilities_for_component(vulns: &[Vulnerability], ty: ComponentType) -> Vec<&Vulnerability> {
    vulns
        .iter()
        .filter(|v| v.affected_components.contains(&ty))
        .collect()
}

/// Vulnerabilities of the given severity.
#[must_use]
pub fn vulnerabilities_by_severity(vulns: &[Vulnerability], severity: VulnerabilitySeverity) -> Vec<&Vulnerability> {
    vulns.iter().filter(|v| v.severity == severity).collect()
}

#[cfg(test)]
mod tests {
    use super::super::test_support::meta;
    use super::*;

    #[test]
    fn test_cve_is_searchable() {
        let v = Vulnerability {
            meta: meta("VULN-001", KnowledgeKind::Vulnerability, 0.95),
            cve_id: Some("CVE-2021-44228".into()),
            title: LocalizedText::new("Log4Shell", "Log4Shell"),
            description: LocalizedText::new("JNDI lookup RCE", "JNDI 원격 코드 실행"),
            severity: VulnerabilitySeverity::Critical,
            cvss_score: Some(10.0),
            affected_components: vec![ComponentType::AppServer],
            mitigation: LocalizedText::new("Upgrade", "업그레이드"),
            published_date: "2021-12-10".into(),
        };
        assert!(v.text_fields().contains(&"CVE-2021-44228"));
        let list = vec![v];
        assert_eq!(vulnerabilities_for_component(&list, ComponentType::AppServer).len(), 1);
        assert_eq!(vulnerabilities_by_severity(&list, VulnerabilitySeverity::Critical).len(), 1);
        assert!(vulnerabilities_by_severity(&list, VulnerabilitySeverity::Low).is_empty());
    }
}
