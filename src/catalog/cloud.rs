use crate::component::ComponentType::{self, *};
use crate::knowledge::{CloudProvider, CloudService, KnowledgeKind};
use crate::trust::SourceType;

use super::{meta, text, trust};

fn service(
    id: &str,
    provider: CloudProvider,
    (service_name, component_type): (&str, ComponentType),
    (en, ko): (&str, &str),
    pricing_model: &str,
    features: &[&str],
) -> CloudService {
    let tag = match provider {
        CloudProvider::Aws => "aws",
        CloudProvider::Azure => "azure",
        CloudProvider::Gcp => "gcp",
    };
    CloudService {
        meta: meta(
            id,
            KnowledgeKind::CloudService,
            &["cloud", tag],
            trust(0.9, SourceType::Vendor, &format!("{service_name} documentation")),
        ),
        provider,
        service_name: service_name.to_string(),
        component_type,
        description: text(en, ko),
        pricing_model: pricing_model.to_string(),
        features: features.iter().map(|f| (*f).to_string()).collect(),
    }
}

pub(super) fn build() -> Vec<CloudService> {
    use CloudProvider::{Aws, Azure, Gcp};

    vec![
        service(
            "CLOUD-AWS-ELB",
            Aws,
            ("Elastic Load Balancing", LoadBalancer),
            ("Managed layer 4 and layer 7 load balancing", "관리형 L4/L7 로드 밸런싱"),
            "per hour plus LCU",
            &["ALB", "NLB", "cross-zone"],
        ),
        service(
            "CLOUD-AWS-RDS",
            Aws,
            ("Amazon RDS", DbServer),
            ("Managed relational database", "관리형 관계형 데이터베이스"),
            "per instance-hour plus storage",
            &["Multi-AZ", "read replicas", "automated backups"],
        ),
        service(
            "CLOUD-AWS-ELASTICACHE",
            Aws,
            ("Amazon ElastiCache", Cache),
            ("Managed Redis and Memcached", "관리형 Redis 및 Memcached"),
            "per node-hour",
            &["cluster mode", "auto failover"],
        ),
        service(
            "CLOUD-AWS-WAF",
            Aws,
            ("AWS WAF", Waf),
            ("Web application firewall for CloudFront and ALB", "CloudFront 및 ALB용 웹 방화벽"),
            "per web ACL plus requests",
            &["managed rule groups", "rate-based rules"],
        ),
        service(
            "CLOUD-AZURE-FIREWALL",
            Azure,
            ("Azure Firewall", Firewall),
            ("Stateful managed network firewall", "상태 기반 관리형 네트워크 방화벽"),
            "per deployment-hour plus data processed",
            &["threat intelligence", "FQDN filtering"],
        ),
        service(
            "CLOUD-AZURE-FRONTDOOR",
            Azure,
            ("Azure Front Door", Cdn),
            ("Global edge delivery with load balancing", "로드 밸런싱을 포함한 글로벌 엣지 전송"),
            "per request plus egress",
            &["WAF integration", "anycast"],
        ),
        service(
            "CLOUD-GCP-ARMOR",
            Gcp,
            ("Cloud Armor", DdosProtection),
            ("DDoS protection and WAF for Google load balancers", "Google 로드 밸런서용 DDoS 방어 및 WAF"),
            "per policy plus requests",
            &["adaptive protection", "preconfigured WAF rules"],
        ),
        service(
            "CLOUD-GCP-CLOUDSQL",
            Gcp,
            ("Cloud SQL", DbServer),
            ("Managed MySQL, PostgreSQL and SQL Server", "관리형 MySQL, PostgreSQL, SQL Server"),
            "per vCPU and memory hour",
            &["high availability", "point-in-time recovery"],
        ),
    ]
}
