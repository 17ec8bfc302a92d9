use crate::capacity::{InstanceSpec, SizingEntry, SizingTable, TrafficTier};
use crate::component::ComponentType::{self, *};

use super::text;

/// One tier row: (recommended count, minimum count, spec, monthly cost, maxRPS).
type Row = (u32, u32, &'static str, &'static str, u64);

fn rows(table: &mut SizingTable, component: ComponentType, (en, ko): (&str, &str), tiers: [Row; 4]) {
    for (tier, (recommended, minimum, spec, cost, max_rps)) in TrafficTier::ALL.into_iter().zip(tiers) {
        table.insert(
            component,
            tier,
            SizingEntry {
                recommended: InstanceSpec::new(recommended, spec),
                minimum: InstanceSpec::new(minimum, spec),
                scaling_notes: text(en, ko),
                estimated_monthly_cost: cost.to_string(),
                max_rps,
            },
        );
    }
}

pub(super) fn build() -> SizingTable {
    let mut t = SizingTable::new();
    rows(
        &mut t,
        WebServer,
        ("Stateless; scale out behind the load balancer.", "무상태이므로 로드 밸런서 뒤에서 수평 확장합니다."),
        [
            (2, 1, "2 vCPU / 4 GB", "$50-100", 500),
            (4, 2, "4 vCPU / 8 GB", "$300-600", 2_000),
            (8, 4, "8 vCPU / 16 GB", "$1,500-3,000", 10_000),
            (20, 10, "16 vCPU / 32 GB", "$10,000+", 50_000),
        ],
    );
    rows(
        &mut t,
        AppServer,
        ("Keep sessions external so instances stay interchangeable.", "세션을 외부에 두어 인스턴스를 교체 가능하게 유지합니다."),
        [
            (2, 1, "2 vCPU / 4 GB", "$60-120", 300),
            (4, 2, "4 vCPU / 16 GB", "$400-800", 1_500),
            (10, 4, "8 vCPU / 32 GB", "$2,000-4,000", 8_000),
            (24, 12, "16 vCPU / 64 GB", "$12,000+", 30_000),
        ],
    );
    rows(
        &mut t,
        DbServer,
        ("Scale up first; add read replicas for read-heavy load.", "먼저 수직 확장하고 읽기 부하에는 읽기 복제본을 추가합니다."),
        [
            (1, 1, "2 vCPU / 8 GB", "$100-200", 1_000),
            (2, 1, "8 vCPU / 32 GB", "$800-1,500", 5_000),
            (3, 2, "16 vCPU / 128 GB", "$4,000-8,000", 20_000),
            (6, 3, "64 vCPU / 512 GB", "$25,000+", 80_000),
        ],
    );
    rows(
        &mut t,
        Cache,
        ("Size memory to the working set; shard hot keys.", "작업 집합에 맞게 메모리를 산정하고 핫 키를 샤딩합니다."),
        [
            (1, 1, "2 GB", "$30-60", 10_000),
            (2, 1, "8 GB", "$200-400", 50_000),
            (3, 2, "32 GB cluster", "$1,000-2,000", 200_000),
            (6, 3, "128 GB cluster", "$5,000+", 1_000_000),
        ],
    );
    rows(
        &mut t,
        LoadBalancer,
        ("Deploy as a redundant pair across zones.", "가용 영역에 걸쳐 이중화로 배치합니다."),
        [
            (1, 1, "managed L7", "$20-40", 5_000),
            (2, 1, "managed L7", "$100-200", 20_000),
            (2, 2, "managed L7 + L4", "$500-1,000", 100_000),
            (4, 2, "dedicated appliance pair", "$5,000+", 500_000),
        ],
    );
    rows(
        &mut t,
        Firewall,
        ("Size for inspected throughput, not line rate.", "회선 속도가 아닌 검사 처리량 기준으로 산정합니다."),
        [
            (1, 1, "1 Gbps NGFW", "$100-300", 10_000),
            (2, 1, "5 Gbps NGFW", "$500-1,000", 40_000),
            (2, 2, "20 Gbps NGFW", "$3,000-6,000", 150_000),
            (4, 2, "100 Gbps NGFW cluster", "$20,000+", 600_000),
        ],
    );
    rows(
        &mut t,
        Waf,
        ("Managed rule sets add latency; tune exclusions.", "관리형 규칙은 지연을 더하므로 예외를 조정합니다."),
        [
            (1, 1, "managed WAF", "$20-50", 3_000),
            (1, 1, "managed WAF", "$100-300", 15_000),
            (2, 1, "managed WAF + bot control", "$1,000-2,000", 80_000),
            (2, 2, "enterprise WAF", "$5,000+", 400_000),
        ],
    );
    rows(
        &mut t,
        ApiGateway,
        ("Cache auth decisions and keep plugin chains short.", "인증 결과를 캐시하고 플러그인 체인을 짧게 유지합니다."),
        [
            (1, 1, "managed gateway", "$30-80", 2_000),
            (2, 1, "2 vCPU / 4 GB", "$200-400", 10_000),
            (4, 2, "4 vCPU / 8 GB", "$1,000-2,500", 50_000),
            (8, 4, "8 vCPU / 16 GB", "$6,000+", 200_000),
        ],
    );
    rows(
        &mut t,
        MessageQueue,
        ("Partition count caps consumer parallelism.", "파티션 수가 컨슈머 병렬성의 상한입니다."),
        [
            (1, 1, "2 vCPU / 4 GB", "$50-100", 5_000),
            (3, 3, "4 vCPU / 16 GB", "$500-1,000", 30_000),
            (5, 3, "8 vCPU / 32 GB", "$2,500-5,000", 150_000),
            (9, 5, "16 vCPU / 64 GB", "$15,000+", 800_000),
        ],
    );
    rows(
        &mut t,
        Cdn,
        ("Throughput is bounded by cache hit ratio, not edge capacity.", "처리량은 엣지 용량이 아닌 캐시 적중률에 의해 제한됩니다."),
        [
            (1, 1, "pay-as-you-go", "$20-50", 50_000),
            (1, 1, "pay-as-you-go", "$200-500", 200_000),
            (1, 1, "committed tier", "$2,000-5,000", 1_000_000),
            (1, 1, "enterprise contract", "$20,000+", 10_000_000),
        ],
    );
    t
}
