use crate::component::ComponentType;
use crate::knowledge::{AntiPattern, Detection, KnowledgeKind, LocalizedText, Severity};
use crate::topology::InfraSpec;
use crate::trust::{SourceType, TrustMetadata};

use super::{meta, text, trust};

/// Database reachable directly from the internet.
pub const DB_INTERNET_EXPOSURE: &str = "AP-SEC-001";
/// Internet traffic reaches a server with no firewall in the topology.
pub const INTERNET_FACING_WITHOUT_FIREWALL: &str = "AP-SEC-002";
/// One load balancer fronting several web servers.
pub const SINGLE_LOAD_BALANCER: &str = "AP-AVL-001";
/// Data store present with no backup target.
pub const DATA_STORE_WITHOUT_BACKUP: &str = "AP-OPS-002";

struct Texts {
    name: LocalizedText,
    problem: LocalizedText,
    impact: LocalizedText,
    solution: LocalizedText,
}

fn anti(
    id: &str,
    severity: Severity,
    tags: &[&str],
    trust: TrustMetadata,
    texts: Texts,
    detection: impl Fn(&InfraSpec) -> bool + Send + Sync + 'static,
) -> AntiPattern {
    AntiPattern {
        meta: meta(id, KnowledgeKind::Antipattern, tags, trust),
        name: texts.name,
        severity,
        detection: Detection::new(detection),
        problem: texts.problem,
        impact: texts.impact,
        solution: texts.solution,
    }
}

fn web_or_app_count(spec: &InfraSpec) -> usize {
    spec.count_of(ComponentType::WebServer) + spec.count_of(ComponentType::AppServer)
}

pub(super) fn build() -> Vec<AntiPattern> {
    use ComponentType::*;

    vec![
        anti(
            DB_INTERNET_EXPOSURE,
            Severity::Critical,
            &["security", "db-server", "internet"],
            trust(0.98, SourceType::Cis, "CIS Controls v8, Control 12.2"),
            Texts {
                name: text("Database directly exposed to the internet", "데이터베이스 인터넷 직접 노출"),
                problem: text(
                    "A database server has a direct connection to the internet.",
                    "데이터베이스 서버가 인터넷과 직접 연결되어 있습니다.",
                ),
                impact: text(
                    "Credential stuffing and exploit scans hit the database directly; a breach exposes all data.",
                    "자격 증명 대입과 취약점 스캔이 데이터베이스를 직접 공격하며, 침해 시 모든 데이터가 노출됩니다.",
                ),
                solution: text(
                    "Move the database to a private subnet reachable only from the application tier.",
                    "데이터베이스를 애플리케이션 계층에서만 접근 가능한 사설 서브넷으로 옮기세요.",
                ),
            },
            |spec| spec.types_directly_connected(DbServer, Internet),
        ),
        anti(
            INTERNET_FACING_WITHOUT_FIREWALL,
            Severity::High,
            &["security", "web-server", "app-server", "firewall"],
            trust(0.95, SourceType::Nist, "NIST SP 800-41 Rev.1"),
            Texts {
                name: text("Internet-facing server without firewall", "방화벽 없는 인터넷 노출 서버"),
                problem: text(
                    "Internet traffic reaches web or application servers and no firewall exists.",
                    "인터넷 트래픽이 웹/애플리케이션 서버에 도달하지만 방화벽이 없습니다.",
                ),
                impact: text(
                    "Every open port on the server is reachable by attackers.",
                    "서버의 모든 열린 포트가 공격자에게 노출됩니다.",
                ),
                solution: text(
                    "Place a firewall between the internet and the server tier.",
                    "인터넷과 서버 계층 사이에 방화벽을 배치하세요.",
                ),
            },
            |spec| {
                !spec.has_type(Firewall)
                    && (spec.types_directly_connected(Internet, WebServer)
                        || spec.types_directly_connected(Internet, AppServer))
            },
        ),
        anti(
            "AP-SEC-003",
            Severity::Medium,
            &["security", "web-server", "waf"],
            trust(0.85, SourceType::Owasp, "OWASP Top 10 2021"),
            Texts {
                name: text("Public web tier without WAF", "WAF 없는 공개 웹 계층"),
                problem: text(
                    "Web servers are exposed to the internet without a web application firewall.",
                    "웹 서버가 웹 방화벽 없이 인터넷에 노출되어 있습니다.",
                ),
                impact: text(
                    "Application-layer attacks such as SQL injection pass network firewalls untouched.",
                    "SQL 인젝션 같은 애플리케이션 계층 공격은 네트워크 방화벽을 그대로 통과합니다.",
                ),
                solution: text(
                    "Add a WAF in front of the web tier.",
                    "웹 계층 앞에 WAF를 추가하세요.",
                ),
            },
            |spec| spec.has_type(Internet) && spec.has_type(WebServer) && !spec.has_type(Waf),
        ),
        anti(
            "AP-SEC-004",
            Severity::Critical,
            &["security", "db-server", "user"],
            trust(0.95, SourceType::Owasp, "OWASP Application Security Verification Standard"),
            Texts {
                name: text("Users connect directly to the database", "사용자의 데이터베이스 직접 접속"),
                problem: text(
                    "Clients talk to the database without an application tier in between.",
                    "클라이언트가 애플리케이션 계층 없이 데이터베이스와 직접 통신합니다.",
                ),
                impact: text(
                    "Authorization cannot be enforced and credentials live on client devices.",
                    "권한 검사를 강제할 수 없고 자격 증명이 클라이언트 기기에 남습니다.",
                ),
                solution: text(
                    "Route all data access through an application or API tier.",
                    "모든 데이터 접근을 애플리케이션 또는 API 계층을 통해 처리하세요.",
                ),
            },
            |spec| spec.types_directly_connected(User, DbServer),
        ),
        anti(
            "AP-SEC-005",
            Severity::High,
            &["security", "vpn-gateway", "mfa"],
            trust(0.9, SourceType::Nist, "NIST SP 800-63B"),
            Texts {
                name: text("Remote access without MFA", "MFA 없는 원격 접속"),
                problem: text(
                    "A VPN gateway is present but no multi-factor authentication is.",
                    "VPN 게이트웨이는 있지만 다중 인증이 없습니다.",
                ),
                impact: text(
                    "A single phished password grants network-level access.",
                    "피싱된 비밀번호 하나로 네트워크 수준 접근 권한을 얻을 수 있습니다.",
                ),
                solution: text(
                    "Require MFA on the VPN, or replace it with ZTNA.",
                    "VPN에 MFA를 적용하거나 ZTNA로 대체하세요.",
                ),
            },
            |spec| spec.has_type(VpnGateway) && !spec.has_type(Mfa),
        ),
        anti(
            "AP-SEC-006",
            Severity::Critical,
            &["security", "ldap-ad", "auth-server", "internet"],
            trust(0.92, SourceType::Cis, "CIS Microsoft Windows Server Benchmark"),
            Texts {
                name: text("Directory service exposed to the internet", "디렉터리 서비스 인터넷 노출"),
                problem: text(
                    "A directory or authentication server is directly connected to the internet.",
                    "디렉터리 또는 인증 서버가 인터넷에 직접 연결되어 있습니다.",
                ),
                impact: text(
                    "Password spraying against the identity store compromises every account.",
                    "아이덴티티 저장소에 대한 패스워드 스프레이 공격으로 모든 계정이 침해될 수 있습니다.",
                ),
                solution: text(
                    "Keep identity services internal and federate through an SSO provider.",
                    "아이덴티티 서비스는 내부에 두고 SSO 제공자를 통해 연동하세요.",
                ),
            },
            |spec| {
                spec.types_directly_connected(Internet, LdapAd)
                    || spec.types_directly_connected(Internet, AuthServer)
            },
        ),
        anti(
            SINGLE_LOAD_BALANCER,
            Severity::Medium,
            &["availability", "load-balancer"],
            trust(0.8, SourceType::Vendor, "AWS Well-Architected Reliability Pillar"),
            Texts {
                name: text("Single load balancer", "단일 로드 밸런서"),
                problem: text(
                    "Several web servers sit behind exactly one load balancer.",
                    "여러 웹 서버가 단 하나의 로드 밸런서 뒤에 있습니다.",
                ),
                impact: text(
                    "The load balancer is a single point of failure for the whole web tier.",
                    "로드 밸런서가 웹 계층 전체의 단일 장애 지점이 됩니다.",
                ),
                solution: text(
                    "Run load balancers as an active-standby or active-active pair.",
                    "로드 밸런서를 액티브-스탠바이 또는 액티브-액티브 쌍으로 운영하세요.",
                ),
            },
            |spec| spec.count_of(LoadBalancer) == 1 && spec.count_of(WebServer) >= 2,
        ),
        anti(
            "AP-AVL-002",
            Severity::High,
            &["availability", "db-server"],
            trust(0.85, SourceType::Vendor, "AWS Well-Architected Reliability Pillar"),
            Texts {
                name: text("Single database instance", "단일 데이터베이스 인스턴스"),
                problem: text(
                    "A horizontally scaled server tier depends on one database instance.",
                    "수평 확장된 서버 계층이 하나의 데이터베이스 인스턴스에 의존합니다.",
                ),
                impact: text(
                    "Adding servers does not help availability while the database can take everything down.",
                    "데이터베이스 장애가 전체를 중단시키므로 서버를 늘려도 가용성이 개선되지 않습니다.",
                ),
                solution: text(
                    "Add a standby replica with automatic failover.",
                    "자동 장애 조치가 가능한 대기 복제본을 추가하세요.",
                ),
            },
            |spec| spec.count_of(DbServer) == 1 && web_or_app_count(spec) >= 2,
        ),
        anti(
            "AP-AVL-003",
            Severity::Medium,
            &["availability", "load-balancer", "web-server"],
            trust(0.75, SourceType::Vendor, "Google SRE Book: Load Balancing in the Datacenter"),
            Texts {
                name: text("Load balancer with a single backend", "백엔드가 하나뿐인 로드 밸런서"),
                problem: text(
                    "A load balancer fronts only one web server.",
                    "로드 밸런서 뒤에 웹 서버가 하나뿐입니다.",
                ),
                impact: text(
                    "The balancer adds latency without removing the single point of failure.",
                    "로드 밸런서가 지연만 늘리고 단일 장애 지점은 그대로 남습니다.",
                ),
                solution: text(
                    "Run at least two web servers across availability zones.",
                    "가용 영역에 걸쳐 최소 두 대의 웹 서버를 운영하세요.",
                ),
            },
            |spec| spec.has_type(LoadBalancer) && spec.count_of(WebServer) == 1,
        ),
        anti(
            "AP-PERF-001",
            Severity::Medium,
            &["performance", "db-server", "cache"],
            trust(0.7, SourceType::Vendor, "AWS Database Caching Strategies"),
            Texts {
                name: text("Database without cache", "캐시 없는 데이터베이스"),
                problem: text(
                    "Three or more servers read from the database with no cache layer.",
                    "세 대 이상의 서버가 캐시 계층 없이 데이터베이스를 읽습니다.",
                ),
                impact: text(
                    "Read load grows linearly with the server tier and saturates the database.",
                    "읽기 부하가 서버 계층에 비례해 증가하여 데이터베이스가 포화됩니다.",
                ),
                solution: text(
                    "Introduce a cache for hot reads.",
                    "자주 읽는 데이터를 위한 캐시를 도입하세요.",
                ),
            },
            |spec| spec.has_type(DbServer) && web_or_app_count(spec) >= 3 && !spec.has_type(Cache),
        ),
        anti(
            "AP-PERF-002",
            Severity::Medium,
            &["performance", "web-server", "db-server"],
            trust(0.65, SourceType::Research, "Patterns of Enterprise Application Architecture"),
            Texts {
                name: text("Web tier bypasses the application tier", "애플리케이션 계층을 우회하는 웹 계층"),
                problem: text(
                    "Web servers query the database directly although an application tier exists.",
                    "애플리케이션 계층이 있는데도 웹 서버가 데이터베이스를 직접 조회합니다.",
                ),
                impact: text(
                    "Business rules are duplicated and database connections multiply.",
                    "비즈니스 규칙이 중복되고 데이터베이스 연결이 늘어납니다.",
                ),
                solution: text(
                    "Route data access through the application servers.",
                    "데이터 접근을 애플리케이션 서버를 통해 처리하세요.",
                ),
            },
            |spec| spec.has_type(AppServer) && spec.has_edge_between_types(WebServer, DbServer),
        ),
        anti(
            "AP-OPS-001",
            Severity::Medium,
            &["operations", "monitoring"],
            trust(0.8, SourceType::Vendor, "Google SRE Book: Monitoring Distributed Systems"),
            Texts {
                name: text("No monitoring", "모니터링 부재"),
                problem: text(
                    "A topology of five or more nodes has no monitoring component.",
                    "다섯 개 이상의 노드로 구성된 토폴로지에 모니터링 구성 요소가 없습니다.",
                ),
                impact: text(
                    "Failures are discovered by users instead of alerts.",
                    "장애를 알림이 아닌 사용자가 먼저 발견합니다.",
                ),
                solution: text(
                    "Add metrics collection and alerting.",
                    "메트릭 수집과 알림을 추가하세요.",
                ),
            },
            |spec| spec.nodes.len() >= 5 && !spec.has_type(Monitoring),
        ),
        anti(
            DATA_STORE_WITHOUT_BACKUP,
            Severity::High,
            &["resilience", "db-server", "storage", "backup"],
            trust(0.9, SourceType::Nist, "NIST SP 800-34 Rev.1"),
            Texts {
                name: text("Data store without backup", "백업 없는 데이터 저장소"),
                problem: text(
                    "Databases or storage systems exist but no backup target does.",
                    "데이터베이스나 스토리지는 있지만 백업 대상이 없습니다.",
                ),
                impact: text(
                    "Ransomware, corruption or operator error means permanent data loss.",
                    "랜섬웨어, 손상 또는 운영 실수가 영구적인 데이터 손실로 이어집니다.",
                ),
                solution: text(
                    "Add backups following the 3-2-1 rule and test restores.",
                    "3-2-1 규칙에 따라 백업을 추가하고 복구를 테스트하세요.",
                ),
            },
            |spec| {
                !spec.has_type(Backup)
                    && [DbServer, Storage, Nas, San]
                        .into_iter()
                        .any(|ty| spec.has_type(ty))
            },
        ),
    ]
}
