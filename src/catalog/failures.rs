use crate::component::ComponentType::{self, *};
use crate::knowledge::{FailureScenario, Impact, KnowledgeKind, Likelihood, LocalizedText};
use crate::trust::{SourceType, TrustMetadata};

use super::{meta, text, trust};

struct Playbook {
    title: LocalizedText,
    description: LocalizedText,
    prevention: Vec<LocalizedText>,
    mitigation: Vec<LocalizedText>,
    mttr: &'static str,
}

fn failure(
    id: &str,
    component: ComponentType,
    affected: &[ComponentType],
    (impact, likelihood): (Impact, Likelihood),
    tags: &[&str],
    trust: TrustMetadata,
    playbook: Playbook,
) -> FailureScenario {
    FailureScenario {
        meta: meta(id, KnowledgeKind::Failure, tags, trust),
        component,
        title: playbook.title,
        description: playbook.description,
        affected_components: affected.to_vec(),
        impact,
        likelihood,
        prevention: playbook.prevention,
        mitigation: playbook.mitigation,
        estimated_mttr: playbook.mttr.to_string(),
    }
}

pub(super) fn build() -> Vec<FailureScenario> {
    vec![
        failure(
            "FAIL-DB-001",
            DbServer,
            &[AppServer, WebServer],
            (Impact::ServiceDown, Likelihood::Medium),
            &["database", "availability"],
            trust(0.9, SourceType::Incident, "GitLab.com database outage post-mortem (2017)"),
            Playbook {
                title: text("Primary database crash", "주 데이터베이스 장애"),
                description: text(
                    "The primary database stops accepting connections.",
                    "주 데이터베이스가 연결을 받지 못합니다.",
                ),
                prevention: vec![
                    text("Run a synchronous standby with automatic failover", "자동 장애 조치가 되는 동기 대기 서버 운영"),
                    text("Alert on replication lag and disk usage", "복제 지연과 디스크 사용량 알림 설정"),
                    text("Rehearse failover quarterly", "분기별 장애 조치 훈련"),
                ],
                mitigation: vec![
                    text("Promote the standby", "대기 서버 승격"),
                    text("Put the application in read-only mode", "애플리케이션을 읽기 전용 모드로 전환"),
                    text("Restore from the latest backup if no standby exists", "대기 서버가 없으면 최신 백업에서 복구"),
                ],
                mttr: "15-60 minutes",
            },
        ),
        failure(
            "FAIL-DB-002",
            DbServer,
            &[Backup, Storage],
            (Impact::DataLoss, Likelihood::Low),
            &["database", "resilience"],
            trust(0.88, SourceType::Nist, "NIST SP 800-34 Rev.1"),
            Playbook {
                title: text("Silent data corruption", "무증상 데이터 손상"),
                description: text(
                    "Storage faults or bad writes corrupt tables without immediate errors.",
                    "스토리지 결함이나 잘못된 쓰기가 즉각적인 오류 없이 테이블을 손상시킵니다.",
                ),
                prevention: vec![
                    text("Enable page checksums", "페이지 체크섬 활성화"),
                    text("Keep point-in-time recovery logs", "특정 시점 복구 로그 보관"),
                    text("Test restores regularly", "정기적인 복구 테스트"),
                ],
                mitigation: vec![
                    text("Stop writes to the affected tables", "영향받은 테이블 쓰기 중지"),
                    text("Restore to the last consistent point", "마지막 일관된 시점으로 복구"),
                    text("Replay valid transactions from logs", "로그에서 유효한 트랜잭션 재적용"),
                ],
                mttr: "2-8 hours",
            },
        ),
        failure(
            "FAIL-LB-001",
            LoadBalancer,
            &[WebServer],
            (Impact::ServiceDown, Likelihood::Low),
            &["availability", "network"],
            trust(0.85, SourceType::Vendor, "AWS Well-Architected Reliability Pillar"),
            Playbook {
                title: text("Load balancer failure", "로드 밸런서 장애"),
                description: text(
                    "The only load balancer fails and all inbound traffic stops.",
                    "유일한 로드 밸런서가 장애로 모든 인바운드 트래픽이 중단됩니다.",
                ),
                prevention: vec![
                    text("Deploy load balancers in a redundant pair", "로드 밸런서 이중화"),
                    text("Use health checks on both tiers", "양 계층 헬스 체크 사용"),
                    text("Spread across availability zones", "가용 영역 분산"),
                ],
                mitigation: vec![
                    text("Fail over the virtual IP", "가상 IP 장애 조치"),
                    text("Point DNS at the standby", "DNS를 대기 장비로 전환"),
                    text("Scale out replacement instances", "대체 인스턴스 확장"),
                ],
                mttr: "5-30 minutes",
            },
        ),
        failure(
            "FAIL-FW-001",
            Firewall,
            &[WebServer, DbServer, AppServer],
            (Impact::SecurityBreach, Likelihood::Medium),
            &["security", "network"],
            trust(0.87, SourceType::Nist, "NIST SP 800-41 Rev.1"),
            Playbook {
                title: text("Firewall rule misconfiguration", "방화벽 규칙 오설정"),
                description: text(
                    "An overly broad rule opens internal services to the internet.",
                    "과도하게 넓은 규칙이 내부 서비스를 인터넷에 노출시킵니다.",
                ),
                prevention: vec![
                    text("Review rules through change management", "변경 관리 절차로 규칙 검토"),
                    text("Default-deny inbound policy", "인바운드 기본 거부 정책"),
                    text("Continuously scan the external attack surface", "외부 공격 표면 상시 스캔"),
                ],
                mitigation: vec![
                    text("Revert to the last approved rule set", "마지막 승인 규칙으로 복원"),
                    text("Review access logs for intrusion", "침입 여부 접근 로그 검토"),
                    text("Rotate exposed credentials", "노출된 자격 증명 교체"),
                ],
                mttr: "1-4 hours",
            },
        ),
        failure(
            "FAIL-CACHE-001",
            Cache,
            &[DbServer, AppServer],
            (Impact::Degraded, Likelihood::High),
            &["performance", "cache"],
            trust(0.8, SourceType::Research, "Facebook: Scaling Memcache at Facebook (NSDI 2013)"),
            Playbook {
                title: text("Cache stampede", "캐시 스탬피드"),
                description: text(
                    "Mass expiry sends every request to the database at once.",
                    "대량 만료로 모든 요청이 한꺼번에 데이터베이스로 향합니다.",
                ),
                prevention: vec![
                    text("Jitter expiry times", "만료 시간에 지터 적용"),
                    text("Use request coalescing", "요청 병합 사용"),
                    text("Warm the cache before deploys", "배포 전 캐시 예열"),
                ],
                mitigation: vec![
                    text("Rate-limit cache misses", "캐시 미스 속도 제한"),
                    text("Serve stale entries temporarily", "일시적으로 만료 항목 제공"),
                    text("Scale database read replicas", "데이터베이스 읽기 복제본 확장"),
                ],
                mttr: "10-30 minutes",
            },
        ),
        failure(
            "FAIL-WEB-001",
            WebServer,
            &[LoadBalancer],
            (Impact::Degraded, Likelihood::High),
            &["performance", "web"],
            trust(0.75, SourceType::Vendor, "NGINX Tuning Guide"),
            Playbook {
                title: text("Traffic spike saturates web tier", "트래픽 급증으로 인한 웹 계층 포화"),
                description: text(
                    "Worker pools are exhausted and response times climb.",
                    "워커 풀이 고갈되어 응답 시간이 증가합니다.",
                ),
                prevention: vec![
                    text("Configure autoscaling", "오토스케일링 구성"),
                    text("Offload static content to a CDN", "정적 콘텐츠를 CDN으로 분리"),
                    text("Load-test to known limits", "알려진 한계까지 부하 테스트"),
                ],
                mitigation: vec![
                    text("Scale out web servers", "웹 서버 확장"),
                    text("Shed non-critical traffic", "중요하지 않은 트래픽 차단"),
                    text("Enable a waiting room", "대기실 기능 활성화"),
                ],
                mttr: "5-20 minutes",
            },
        ),
        failure(
            "FAIL-DNS-001",
            Dns,
            &[WebServer, Cdn, LoadBalancer],
            (Impact::ServiceDown, Likelihood::Low),
            &["network", "dns"],
            trust(0.82, SourceType::Incident, "Dyn DNS DDoS incident report (2016)"),
            Playbook {
                title: text("DNS resolution outage", "DNS 해석 장애"),
                description: text(
                    "The authoritative DNS provider is unreachable.",
                    "권한 DNS 제공자에 접근할 수 없습니다.",
                ),
                prevention: vec![
                    text("Use two DNS providers", "두 개의 DNS 제공자 사용"),
                    text("Keep sensible TTLs", "적절한 TTL 유지"),
                    text("Monitor resolution from several regions", "여러 지역에서 해석 모니터링"),
                ],
                mitigation: vec![
                    text("Shift NS delegation to the secondary provider", "보조 제공자로 NS 위임 전환"),
                    text("Publish status through a separate domain", "별도 도메인으로 상태 공지"),
                    text("Extend TTLs once resolved", "복구 후 TTL 연장"),
                ],
                mttr: "30 minutes - 4 hours",
            },
        ),
        failure(
            "FAIL-AUTH-001",
            AuthServer,
            &[ApiGateway, AppServer, Sso],
            (Impact::ServiceDown, Likelihood::Medium),
            &["identity", "availability"],
            trust(0.78, SourceType::Vendor, "Okta Architecture Guide"),
            Playbook {
                title: text("Identity provider outage", "인증 제공자 장애"),
                description: text(
                    "Token issuance fails and no user can sign in.",
                    "토큰 발급이 실패하여 어떤 사용자도 로그인할 수 없습니다.",
                ),
                prevention: vec![
                    text("Run the identity provider in multiple zones", "인증 제공자 다중 영역 운영"),
                    text("Cache signing keys at the gateway", "게이트웨이에 서명 키 캐시"),
                    text("Use long enough token lifetimes", "충분한 토큰 유효 기간 설정"),
                ],
                mitigation: vec![
                    text("Extend existing session lifetimes", "기존 세션 유효 기간 연장"),
                    text("Fail over to the secondary region", "보조 리전으로 장애 조치"),
                    text("Enable break-glass accounts", "비상 계정 활성화"),
                ],
                mttr: "15-90 minutes",
            },
        ),
        failure(
            "FAIL-K8S-001",
            Kubernetes,
            &[Container],
            (Impact::Degraded, Likelihood::Medium),
            &["kubernetes", "operations"],
            trust(0.7, SourceType::Vendor, "Kubernetes Docs: Operating etcd clusters"),
            Playbook {
                title: text("Control plane degradation", "컨트롤 플레인 성능 저하"),
                description: text(
                    "etcd latency stalls scheduling and rollouts.",
                    "etcd 지연으로 스케줄링과 배포가 멈춥니다.",
                ),
                prevention: vec![
                    text("Run etcd on dedicated SSD-backed nodes", "전용 SSD 노드에서 etcd 실행"),
                    text("Keep a three-member control plane", "3개 멤버 컨트롤 플레인 유지"),
                    text("Defragment etcd on schedule", "정기적인 etcd 조각 모음"),
                ],
                mitigation: vec![
                    text("Freeze deployments", "배포 동결"),
                    text("Restore etcd from snapshot", "스냅샷에서 etcd 복구"),
                    text("Drain and replace unhealthy control plane nodes", "비정상 컨트롤 플레인 노드 교체"),
                ],
                mttr: "30 minutes - 2 hours",
            },
        ),
    ]
}
