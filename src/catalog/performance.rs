use crate::component::ComponentType::{self, *};
use crate::knowledge::{
    KnowledgeKind, LatencyRange, LatencyUnit, LocalizedText, PerformanceProfile, ScalingStrategy,
    ThroughputRange,
};
use crate::trust::{SourceType, TrustMetadata};

use super::{meta, text, trust};

fn profile(
    id: &str,
    component: ComponentType,
    (min, max): (f64, f64),
    (typical, peak): (&str, &str),
    scaling_strategy: ScalingStrategy,
    trust: TrustMetadata,
    (bottleneck_indicators, optimization_tips): (Vec<LocalizedText>, Vec<LocalizedText>),
) -> PerformanceProfile {
    PerformanceProfile {
        meta: meta(id, KnowledgeKind::Performance, &["performance"], trust),
        component,
        latency_range: LatencyRange {
            min,
            max,
            unit: LatencyUnit::Ms,
        },
        throughput_range: ThroughputRange {
            typical: typical.to_string(),
            max: peak.to_string(),
        },
        scaling_strategy,
        bottleneck_indicators,
        optimization_tips,
    }
}

pub(super) fn build() -> Vec<PerformanceProfile> {
    use ScalingStrategy::{Both, Horizontal, Vertical};

    vec![
        profile(
            "PERF-WEB-001",
            WebServer,
            (1.0, 50.0),
            ("500 RPS", "10K RPS"),
            Horizontal,
            trust(0.8, SourceType::Vendor, "NGINX Tuning Guide"),
            (
                vec![
                    text("CPU above 80%", "CPU 80% 초과"),
                    text("Worker connections exhausted", "워커 연결 고갈"),
                ],
                vec![
                    text("Enable keep-alive and gzip", "keep-alive 및 gzip 활성화"),
                    text("Serve static files from a CDN", "정적 파일을 CDN에서 제공"),
                ],
            ),
        ),
        profile(
            "PERF-APP-001",
            AppServer,
            (5.0, 200.0),
            ("300 RPS", "5K RPS"),
            Horizontal,
            trust(0.75, SourceType::Research, "The Art of Scalability"),
            (
                vec![
                    text("Thread pool saturation", "스레드 풀 포화"),
                    text("Long GC pauses", "긴 GC 일시 정지"),
                ],
                vec![
                    text("Keep services stateless", "서비스를 무상태로 유지"),
                    text("Move slow work to a queue", "느린 작업을 큐로 이동"),
                ],
            ),
        ),
        profile(
            "PERF-DB-001",
            DbServer,
            (1.0, 100.0),
            ("1K QPS", "20K QPS"),
            Vertical,
            trust(0.85, SourceType::Vendor, "PostgreSQL Documentation: Performance Tips"),
            (
                vec![
                    text("Connection count near the limit", "연결 수가 한계에 근접"),
                    text("Disk IOPS saturated", "디스크 IOPS 포화"),
                    text("Rising slow query count", "느린 쿼리 증가"),
                ],
                vec![
                    text("Add read replicas", "읽기 복제본 추가"),
                    text("Use a connection pooler", "커넥션 풀러 사용"),
                    text("Index hot query paths", "자주 쓰는 쿼리 경로 인덱싱"),
                ],
            ),
        ),
        profile(
            "PERF-CACHE-001",
            Cache,
            (0.1, 2.0),
            ("50K ops/s", "500K ops/s"),
            Both,
            trust(0.85, SourceType::Vendor, "Redis Documentation: Benchmarks"),
            (
                vec![
                    text("Eviction rate climbing", "축출 비율 증가"),
                    text("Hit ratio below 80%", "적중률 80% 미만"),
                ],
                vec![
                    text("Size memory for the working set", "작업 집합에 맞게 메모리 산정"),
                    text("Shard hot keys", "핫 키 샤딩"),
                ],
            ),
        ),
        profile(
            "PERF-LB-001",
            LoadBalancer,
            (0.5, 5.0),
            ("10K RPS", "500K RPS"),
            Horizontal,
            trust(0.85, SourceType::Vendor, "AWS Elastic Load Balancing Documentation"),
            (
                vec![
                    text("Surge queue growing", "서지 큐 증가"),
                    text("Backend 5xx rate rising", "백엔드 5xx 비율 증가"),
                ],
                vec![
                    text("Pre-warm before known peaks", "예상 피크 전 사전 예열"),
                    text("Tune health check intervals", "헬스 체크 주기 조정"),
                ],
            ),
        ),
        profile(
            "PERF-MQ-001",
            MessageQueue,
            (1.0, 20.0),
            ("5K msg/s", "100K msg/s"),
            Horizontal,
            trust(0.7, SourceType::Vendor, "Apache Kafka Documentation: Operations"),
            (
                vec![
                    text("Consumer lag growing", "컨슈머 지연 증가"),
                    text("Broker disk near full", "브로커 디스크 부족"),
                ],
                vec![
                    text("Add partitions and consumers", "파티션과 컨슈머 추가"),
                    text("Batch producer writes", "프로듀서 쓰기 배치 처리"),
                ],
            ),
        ),
        profile(
            "PERF-CDN-001",
            Cdn,
            (5.0, 50.0),
            ("100K RPS", "10M RPS"),
            Horizontal,
            trust(0.8, SourceType::Vendor, "Cloudflare Learning Center: CDN Performance"),
            (
                vec![
                    text("Cache hit ratio dropping", "캐시 적중률 하락"),
                    text("Origin egress spiking", "오리진 송신 트래픽 급증"),
                ],
                vec![
                    text("Set long cache TTLs on static assets", "정적 자산에 긴 캐시 TTL 설정"),
                    text("Enable origin shielding", "오리진 실드 활성화"),
                ],
            ),
        ),
        profile(
            "PERF-APIGW-001",
            ApiGateway,
            (2.0, 30.0),
            ("2K RPS", "50K RPS"),
            Horizontal,
            trust(0.72, SourceType::Vendor, "Kong Gateway Performance Benchmarks"),
            (
                vec![
                    text("Plugin latency dominating requests", "플러그인 지연이 요청을 지배"),
                    text("Rate limiter rejecting legitimate traffic", "속도 제한기가 정상 트래픽 거부"),
                ],
                vec![
                    text("Cache auth decisions", "인증 결정 캐싱"),
                    text("Trim plugin chains on hot routes", "주요 경로의 플러그인 체인 축소"),
                ],
            ),
        ),
        profile(
            "PERF-FW-001",
            Firewall,
            (0.1, 1.0),
            ("1 Gbps", "40 Gbps"),
            Vertical,
            trust(0.7, SourceType::Vendor, "Palo Alto Networks Sizing Guide"),
            (
                vec![
                    text("Session table near capacity", "세션 테이블 용량 근접"),
                    text("Dataplane CPU above 70%", "데이터플레인 CPU 70% 초과"),
                ],
                vec![
                    text("Disable unused inspection profiles", "사용하지 않는 검사 프로파일 비활성화"),
                    text("Order rules by hit count", "적중 횟수 순으로 규칙 정렬"),
                ],
            ),
        ),
    ]
}
