//! Managed cloud services and the component kinds they implement.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::component::ComponentType;

use super::{EntryMeta, KnowledgeKind, KnowledgeRecord, LocalizedText};

/// Public cloud vendor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CloudProvider {
    /// Amazon Web Services.
    Aws,
    /// Microsoft Azure.
    Azure,
    /// Google Cloud.
    Gcp,
}

impl fmt::Display for CloudProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Aws => "AWS",
            Self::Azure => "Azure",
            Self::Gcp => "GCP",
        })
    }
}

/// A managed service that can stand in for a component kind.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CloudService {
    /// Shared header.
    #[serde(flatten)]
    pub meta: EntryMeta,

    /// Vendor.
    pub provider: CloudProvider,
    /// Vendor's product name.
    pub service_name: String,

    /// Component kind the service maps to.
    pub component_type: ComponentType,
    /// What the service provides.
    pub description: LocalizedText,
    /// How it is billed.
    pub pricing_model: String,

    /// Capability or SKU notes.
    #[serde(default)]
    pub features: Vec<String>,
}

impl KnowledgeRecord for CloudService {
    const KIND: KnowledgeKind = KnowledgeKind::CloudService;

    fn meta(&self) -> &EntryMeta {
        &self.meta
    }

    fn text_fields(&self) -> Vec<&str> {
        let mut out = vec![
            self.service_name.as_str(),
            self.description.en.as_str(),
            self.description.ko.as_str(),
        ];
        out.extend(self.features.iter().map(String::as_str));
        out
    }

    fn components(&self) -> Vec<ComponentType> {
        vec![self.component_type]
    }
}

/// Services implementing the component kind.
#[must_use]
pub fn services_for_component(services: &[CloudService], ty: ComponentType) -> Vec<&CloudService> {
    services.iter().filter(|s| s.component_type == ty).collect()
}

/// Services offered by a provider.
#[must_use]
pub fn services_by_provider(services: &[CloudService], provider: CloudProvider) -> Vec<&CloudService> {
    services.iter().filter(|s| s.provider == provider).collect()
}
