use crate::component::ComponentType::{self, *};
use crate::knowledge::{
    ComponentRelationship, Direction, KnowledgeKind, RelationshipStrength, RelationshipType,
};
use crate::trust::{SourceType, TrustMetadata};

use super::{meta, text, trust};

fn rel(
    id: &str,
    (source, target): (ComponentType, ComponentType),
    relationship_type: RelationshipType,
    direction: Direction,
    tags: &[&str],
    trust: TrustMetadata,
    (en, ko): (&str, &str),
) -> ComponentRelationship {
    let strength = if relationship_type == RelationshipType::Requires {
        RelationshipStrength::Mandatory
    } else {
        RelationshipStrength::Optional
    };
    ComponentRelationship {
        meta: meta(id, KnowledgeKind::Relationship, tags, trust),
        source,
        target,
        relationship_type,
        strength,
        direction,
        reason: text(en, ko),
    }
}

pub(super) fn build() -> Vec<ComponentRelationship> {
    use Direction::{Bidirectional, Downstream, Upstream};
    use RelationshipType::{Conflicts, Enhances, Protects, Recommends, Requires};

    vec![
        rel(
            "REL-001",
            (WebServer, Firewall),
            Requires,
            Upstream,
            &["security", "network"],
            trust(0.95, SourceType::Nist, "NIST SP 800-41 Rev.1 Guidelines on Firewalls"),
            (
                "Public web servers must be placed behind a network firewall.",
                "공개 웹 서버는 네트워크 방화벽 뒤에 배치해야 합니다.",
            ),
        ),
        rel(
            "REL-002",
            (DbServer, Firewall),
            Requires,
            Upstream,
            &["security", "database"],
            trust(0.95, SourceType::Cis, "CIS Controls v8, Control 12"),
            (
                "Databases must only be reachable through a filtering firewall.",
                "데이터베이스는 필터링 방화벽을 통해서만 접근 가능해야 합니다.",
            ),
        ),
        rel(
            "REL-003",
            (WebServer, Waf),
            Recommends,
            Upstream,
            &["security", "web"],
            trust(0.9, SourceType::Owasp, "OWASP Top 10 2021"),
            (
                "A WAF blocks injection and XSS attempts before they reach the web tier.",
                "WAF는 인젝션과 XSS 공격이 웹 계층에 도달하기 전에 차단합니다.",
            ),
        ),
        rel(
            "REL-004",
            (LoadBalancer, WebServer),
            Requires,
            Downstream,
            &["availability", "web"],
            trust(0.9, SourceType::Vendor, "AWS Well-Architected Reliability Pillar"),
            (
                "A load balancer needs backend targets to distribute traffic to.",
                "로드 밸런서는 트래픽을 분산할 백엔드 대상이 필요합니다.",
            ),
        ),
        rel(
            "REL-005",
            (AppServer, Cache),
            Recommends,
            Downstream,
            &["performance"],
            trust(0.8, SourceType::Vendor, "AWS Caching Best Practices"),
            (
                "A cache in front of the data tier cuts read latency and database load.",
                "데이터 계층 앞의 캐시는 읽기 지연과 데이터베이스 부하를 줄입니다.",
            ),
        ),
        rel(
            "REL-006",
            (DbServer, Backup),
            Requires,
            Downstream,
            &["resilience", "database"],
            trust(0.93, SourceType::Nist, "NIST SP 800-34 Contingency Planning"),
            (
                "Every database needs an independent backup target.",
                "모든 데이터베이스는 독립적인 백업 대상이 필요합니다.",
            ),
        ),
        rel(
            "REL-007",
            (WebServer, Cdn),
            Recommends,
            Upstream,
            &["performance", "web"],
            trust(0.7, SourceType::Vendor, "Cloudflare Learning Center: What is a CDN"),
            (
                "A CDN offloads static assets and absorbs traffic spikes.",
                "CDN은 정적 자산을 분담하고 트래픽 급증을 흡수합니다.",
            ),
        ),
        rel(
            "REL-008",
            (Internet, DdosProtection),
            Recommends,
            Downstream,
            &["security", "availability"],
            trust(0.75, SourceType::Vendor, "AWS Shield Best Practices"),
            (
                "Internet-facing entry points should be shielded from volumetric DDoS.",
                "인터넷에 노출된 진입점은 대규모 DDoS로부터 보호되어야 합니다.",
            ),
        ),
        rel(
            "REL-009",
            (Kubernetes, Monitoring),
            Recommends,
            Downstream,
            &["operations", "kubernetes"],
            trust(0.85, SourceType::Vendor, "Kubernetes Docs: Resource Metrics Pipeline"),
            (
                "Clusters need metrics and alerting to catch pod and node failures.",
                "클러스터는 파드와 노드 장애를 감지하기 위한 메트릭과 알림이 필요합니다.",
            ),
        ),
        rel(
            "REL-010",
            (VpnGateway, Mfa),
            Requires,
            Downstream,
            &["security", "identity"],
            trust(0.88, SourceType::Nist, "NIST SP 800-63B Digital Identity Guidelines"),
            (
                "Remote access must be protected by multi-factor authentication.",
                "원격 접속은 다중 인증으로 보호되어야 합니다.",
            ),
        ),
        rel(
            "REL-011",
            (AppServer, MessageQueue),
            Recommends,
            Downstream,
            &["scalability"],
            trust(0.6, SourceType::Research, "Enterprise Integration Patterns"),
            (
                "Queues decouple slow work from request handling.",
                "큐는 느린 작업을 요청 처리와 분리합니다.",
            ),
        ),
        rel(
            "REL-012",
            (Waf, WebServer),
            Protects,
            Downstream,
            &["security", "web"],
            trust(0.9, SourceType::Owasp, "OWASP ModSecurity Core Rule Set"),
            (
                "The WAF inspects HTTP traffic destined for the web tier.",
                "WAF는 웹 계층으로 향하는 HTTP 트래픽을 검사합니다.",
            ),
        ),
        rel(
            "REL-013",
            (Firewall, DbServer),
            Protects,
            Downstream,
            &["security", "database"],
            trust(0.95, SourceType::Cis, "CIS Controls v8, Control 4"),
            (
                "The firewall restricts database ports to trusted application hosts.",
                "방화벽은 데이터베이스 포트를 신뢰된 애플리케이션 호스트로 제한합니다.",
            ),
        ),
        rel(
            "REL-014",
            (Cache, DbServer),
            Enhances,
            Downstream,
            &["performance", "database"],
            trust(0.8, SourceType::Vendor, "Redis Documentation: Caching Patterns"),
            (
                "Read-through caching shields the database from hot keys.",
                "읽기 캐싱은 핫 키로부터 데이터베이스를 보호합니다.",
            ),
        ),
        rel(
            "REL-015",
            (Siem, Logging),
            Requires,
            Bidirectional,
            &["security", "operations"],
            trust(0.87, SourceType::Nist, "NIST SP 800-92 Log Management"),
            (
                "A SIEM is only as good as the centralized logs feeding it.",
                "SIEM의 효과는 이를 공급하는 중앙 로그에 달려 있습니다.",
            ),
        ),
        rel(
            "REL-016",
            (IdsIps, Siem),
            Recommends,
            Downstream,
            &["security", "operations"],
            trust(0.8, SourceType::Nist, "NIST SP 800-94 Intrusion Detection"),
            (
                "IDS alerts should be correlated in a SIEM.",
                "IDS 경보는 SIEM에서 상관 분석되어야 합니다.",
            ),
        ),
        rel(
            "REL-017",
            (ApiGateway, AuthServer),
            Requires,
            Downstream,
            &["security", "api"],
            trust(0.86, SourceType::Owasp, "OWASP API Security Top 10 2023"),
            (
                "APIs exposed through a gateway need a token issuer for authentication.",
                "게이트웨이로 노출되는 API는 인증을 위한 토큰 발급자가 필요합니다.",
            ),
        ),
        rel(
            "REL-018",
            (Sso, Mfa),
            Recommends,
            Bidirectional,
            &["security", "identity"],
            trust(0.82, SourceType::Nist, "NIST SP 800-63B Digital Identity Guidelines"),
            (
                "Single sign-on concentrates risk; pair it with a second factor.",
                "SSO는 위험을 집중시키므로 2차 인증과 함께 사용해야 합니다.",
            ),
        ),
        rel(
            "REL-019",
            (SaseGateway, VpnGateway),
            Conflicts,
            Bidirectional,
            &["security", "remote-access"],
            trust(0.7, SourceType::Research, "Gartner: The Future of Network Security Is in the Cloud"),
            (
                "A legacy VPN beside SASE creates a policy bypass path.",
                "SASE와 함께 남아 있는 레거시 VPN은 정책 우회 경로를 만듭니다.",
            ),
        ),
        rel(
            "REL-020",
            (ZtnaBroker, VpnGateway),
            Conflicts,
            Bidirectional,
            &["security", "remote-access"],
            trust(0.6, SourceType::Research, "NIST SP 800-207 Zero Trust Architecture"),
            (
                "Network-level VPN access undermines per-application zero trust policy.",
                "네트워크 수준 VPN 접속은 애플리케이션별 제로 트러스트 정책을 약화시킵니다.",
            ),
        ),
        rel(
            "REL-021",
            (ObjectStorage, Cdn),
            Recommends,
            Downstream,
            &["performance", "storage"],
            trust(0.55, SourceType::UserContributed, "Community contribution"),
            (
                "Serve public objects through a CDN instead of the bucket endpoint.",
                "공개 객체는 버킷 엔드포인트 대신 CDN을 통해 제공하세요.",
            ),
        ),
        rel(
            "REL-022",
            (DbServer, Monitoring),
            Recommends,
            Downstream,
            &["operations", "database"],
            trust(0.75, SourceType::Vendor, "PostgreSQL Documentation: Monitoring Database Activity"),
            (
                "Track replication lag, connections and slow queries.",
                "복제 지연, 연결 수, 느린 쿼리를 추적하세요.",
            ),
        ),
        rel(
            "REL-023",
            (Container, Kubernetes),
            Recommends,
            Upstream,
            &["operations", "containers"],
            trust(0.5, SourceType::UserContributed, "Community contribution"),
            (
                "Running many containers by hand does not scale; use an orchestrator.",
                "컨테이너를 수동으로 운영하면 확장되지 않으므로 오케스트레이터를 사용하세요.",
            ),
        ),
        rel(
            "REL-024",
            (Dns, DdosProtection),
            Recommends,
            Downstream,
            &["security", "dns"],
            trust(0.45, SourceType::UserContributed, "Community contribution"),
            (
                "Authoritative DNS is a frequent DDoS target.",
                "권한 DNS는 DDoS 공격의 빈번한 대상입니다.",
            ),
        ),
        rel(
            "REL-025",
            (LoadBalancer, Firewall),
            Recommends,
            Upstream,
            &["security", "network"],
            trust(0.78, SourceType::Vendor, "F5 Security Best Practices"),
            (
                "Filter traffic before it reaches the load balancer listeners.",
                "로드 밸런서 리스너에 도달하기 전에 트래픽을 필터링하세요.",
            ),
        ),
    ]
}
