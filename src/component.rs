//! Infrastructure component kinds.
//!
//! Every node in a topology carries a [`ComponentType`]. The wire format is
//! the kebab-case name (`"db-server"`, `"load-balancer"`); strings that do
//! not name a known kind deserialize to [`ComponentType::Unknown`] so that a
//! topology produced by a newer parser still loads.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

macro_rules! component_types {
    ($( $(#[$doc:meta])* $variant:ident => $name:literal ),+ $(,)?) => {
        /// Kind of infrastructure component a topology node represents.
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub enum ComponentType {
            $(
                $(#[$doc])*
                #[doc = concat!("Wire name `", $name, "`.")]
                #[serde(rename = $name)]
                $variant,
            )+
            /// A kind this crate does not know about.
            #[serde(other, rename = "unknown")]
            Unknown,
        }

        impl ComponentType {
            /// All known component kinds, excluding [`ComponentType::Unknown`].
            pub const ALL: &'static [ComponentType] = &[$(ComponentType::$variant),+];

            /// Wire name of the component kind.
            #[must_use]
            pub const fn as_str(self) -> &'static str {
                match self {
                    $(ComponentType::$variant => $name,)+
                    ComponentType::Unknown => "unknown",
                }
            }
        }

        impl FromStr for ComponentType {
            type Err = UnknownComponent;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                match s.trim() {
                    $($name => Ok(ComponentType::$variant),)+
                    other => Err(UnknownComponent(other.to_string())),
                }
            }
        }
    };
}

component_types! {
    /// End user or client device.
    User => "user",
    /// The public internet.
    Internet => "internet",
    Dns => "dns",
    Cdn => "cdn",
    LoadBalancer => "load-balancer",
    Firewall => "firewall",
    /// Web application firewall.
    Waf => "waf",
    DdosProtection => "ddos-protection",
    VpnGateway => "vpn-gateway",
    IdsIps => "ids-ips",
    /// Network access control.
    Nac => "nac",
    /// Data loss prevention.
    Dlp => "dlp",
    SaseGateway => "sase-gateway",
    ZtnaBroker => "ztna-broker",
    Casb => "casb",
    Siem => "siem",
    Soar => "soar",
    Router => "router",
    SwitchL2 => "switch-l2",
    SwitchL3 => "switch-l3",
    NatGateway => "nat-gateway",
    ApiGateway => "api-gateway",
    WebServer => "web-server",
    AppServer => "app-server",
    DbServer => "db-server",
    Cache => "cache",
    MessageQueue => "message-queue",
    SearchEngine => "search-engine",
    Storage => "storage",
    Nas => "nas",
    San => "san",
    ObjectStorage => "object-storage",
    Backup => "backup",
    Container => "container",
    Kubernetes => "kubernetes",
    Vm => "vm",
    Serverless => "serverless",
    AuthServer => "auth-server",
    LdapAd => "ldap-ad",
    Sso => "sso",
    Mfa => "mfa",
    Iam => "iam",
    CertificateAuthority => "certificate-authority",
    SecretsManager => "secrets-manager",
    Monitoring => "monitoring",
    Logging => "logging",
    AwsVpc => "aws-vpc",
    AzureVnet => "azure-vnet",
    GcpNetwork => "gcp-network",
    PrivateCloud => "private-cloud",
}

impl ComponentType {
    /// Returns true for kinds that hold durable data.
    #[must_use]
    pub const fn is_data_store(self) -> bool {
        matches!(
            self,
            Self::DbServer
                | Self::Storage
                | Self::Nas
                | Self::San
                | Self::ObjectStorage
                | Self::Cache
                | Self::SearchEngine
        )
    }

    /// Returns true for kinds that filter or inspect traffic at a boundary.
    #[must_use]
    pub const fn is_security_boundary(self) -> bool {
        matches!(
            self,
            Self::Firewall
                | Self::Waf
                | Self::IdsIps
                | Self::SaseGateway
                | Self::ZtnaBroker
                | Self::DdosProtection
        )
    }

    /// Returns true for kinds that represent a cloud network boundary.
    #[must_use]
    pub const fn is_cloud_network(self) -> bool {
        matches!(self, Self::AwsVpc | Self::AzureVnet | Self::GcpNetwork | Self::PrivateCloud)
    }
}

impl fmt::Display for ComponentType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error returned when parsing a component name that is not recognized.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown component type: '{0}'")]
pub struct UnknownComponent(pub String);
