use crate::component::ComponentType::*;
use crate::knowledge::{ArchitecturePattern, KnowledgeKind, PatternComplexity};
use crate::trust::SourceType;

use super::{meta, text, trust};

pub(super) fn build() -> Vec<ArchitecturePattern> {
    vec![
        ArchitecturePattern {
            meta: meta(
                "PAT-001",
                KnowledgeKind::Pattern,
                &["web", "architecture"],
                trust(0.95, SourceType::Vendor, "AWS Well-Architected Framework"),
            ),
            name: text("Three-tier web application", "3계층 웹 애플리케이션"),
            description: text(
                "Presentation, application and data tiers separated by firewalls.",
                "표현, 애플리케이션, 데이터 계층을 방화벽으로 분리합니다.",
            ),
            required_components: vec![LoadBalancer, WebServer, AppServer, DbServer],
            optional_components: vec![Cache, Cdn, Waf, Firewall],
            best_for: vec![
                text("Traditional line-of-business applications", "전통적인 업무용 애플리케이션"),
                text("Teams new to distributed systems", "분산 시스템 경험이 적은 팀"),
            ],
            not_for: vec![text("Independently deployed services", "독립 배포 서비스")],
            complexity: PatternComplexity::Low,
        },
        ArchitecturePattern {
            meta: meta(
                "PAT-002",
                KnowledgeKind::Pattern,
                &["kubernetes", "architecture"],
                trust(0.85, SourceType::Vendor, "CNCF Cloud Native Definition"),
            ),
            name: text("Microservices on Kubernetes", "쿠버네티스 기반 마이크로서비스"),
            description: text(
                "Containerized services behind an API gateway with asynchronous messaging.",
                "API 게이트웨이 뒤의 컨테이너 서비스와 비동기 메시징 구성입니다.",
            ),
            required_components: vec![ApiGateway, Kubernetes, Container, MessageQueue],
            optional_components: vec![Monitoring, Logging, Cache, AuthServer],
            best_for: vec![
                text("Many teams shipping independently", "독립적으로 배포하는 여러 팀"),
                text("Uneven scaling across features", "기능별로 다른 확장 요구"),
            ],
            not_for: vec![
                text("Small teams", "소규모 팀"),
                text("Strong cross-service transactions", "강한 서비스 간 트랜잭션"),
            ],
            complexity: PatternComplexity::High,
        },
        ArchitecturePattern {
            meta: meta(
                "PAT-003",
                KnowledgeKind::Pattern,
                &["security", "architecture"],
                trust(0.9, SourceType::Nist, "NIST SP 800-207 Zero Trust Architecture"),
            ),
            name: text("Zero trust access", "제로 트러스트 접근"),
            description: text(
                "Every request is authenticated and authorized per application, not per network.",
                "모든 요청을 네트워크가 아닌 애플리케이션 단위로 인증하고 인가합니다.",
            ),
            required_components: vec![ZtnaBroker, Iam, Mfa, Siem],
            optional_components: vec![Casb, SaseGateway, Dlp],
            best_for: vec![text("Remote workforces", "원격 근무 조직")],
            not_for: vec![text("Isolated operational networks", "격리된 운영 네트워크")],
            complexity: PatternComplexity::High,
        },
        ArchitecturePattern {
            meta: meta(
                "PAT-004",
                KnowledgeKind::Pattern,
                &["cloud", "architecture"],
                trust(0.7, SourceType::Vendor, "Azure Architecture Center: Hybrid Networking"),
            ),
            name: text("Hybrid cloud", "하이브리드 클라우드"),
            description: text(
                "On-premises workloads linked to a public cloud network over VPN.",
                "온프레미스 워크로드를 VPN으로 퍼블릭 클라우드 네트워크와 연결합니다.",
            ),
            required_components: vec![PrivateCloud, VpnGateway, Firewall],
            optional_components: vec![AwsVpc, AzureVnet, GcpNetwork, Dns],
            best_for: vec![text("Gradual cloud migration", "점진적 클라우드 전환")],
            not_for: vec![text("Latency-critical chatty workloads", "지연에 민감한 빈번한 통신 워크로드")],
            complexity: PatternComplexity::Medium,
        },
    ]
}
