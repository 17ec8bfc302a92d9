use crate::component::ComponentType::*;
use crate::knowledge::{KnowledgeKind, Vulnerability, VulnerabilitySeverity};
use crate::trust::SourceType;

use super::{meta, text, trust};

pub(super) fn build() -> Vec<Vulnerability> {
    vec![
        Vulnerability {
            meta: meta(
                "VULN-001",
                KnowledgeKind::Vulnerability,
                &["security", "java"],
                trust(0.98, SourceType::Nist, "NVD CVE-2021-44228"),
            ),
            cve_id: Some("CVE-2021-44228".into()),
            title: text("Log4Shell remote code execution", "Log4Shell 원격 코드 실행"),
            description: text(
                "JNDI lookups in Log4j 2 log messages allow remote code execution.",
                "Log4j 2 로그 메시지의 JNDI 조회로 원격 코드 실행이 가능합니다.",
            ),
            severity: VulnerabilitySeverity::Critical,
            cvss_score: Some(10.0),
            affected_components: vec![AppServer, WebServer, SearchEngine],
            mitigation: text("Upgrade Log4j to 2.17.1 or later", "Log4j 2.17.1 이상으로 업그레이드"),
            published_date: "2021-12-10".into(),
        },
        Vulnerability {
            meta: meta(
                "VULN-002",
                KnowledgeKind::Vulnerability,
                &["security", "tls"],
                trust(0.95, SourceType::Nist, "NVD CVE-2014-0160"),
            ),
            cve_id: Some("CVE-2014-0160".into()),
            title: text("Heartbleed", "하트블리드"),
            description: text(
                "OpenSSL heartbeat over-read leaks server memory including private keys.",
                "OpenSSL 하트비트 과다 읽기로 개인 키를 포함한 서버 메모리가 유출됩니다.",
            ),
            severity: VulnerabilitySeverity::High,
            cvss_score: Some(7.5),
            affected_components: vec![WebServer, LoadBalancer, VpnGateway],
            mitigation: text(
                "Upgrade OpenSSL and reissue certificates",
                "OpenSSL 업그레이드 후 인증서 재발급",
            ),
            published_date: "2014-04-07".into(),
        },
        Vulnerability {
            meta: meta(
                "VULN-003",
                KnowledgeKind::Vulnerability,
                &["security", "vpn"],
                trust(0.92, SourceType::Nist, "NVD CVE-2023-46805"),
            ),
            cve_id: Some("CVE-2023-46805".into()),
            title: text("VPN gateway authentication bypass", "VPN 게이트웨이 인증 우회"),
            description: text(
                "An authentication bypass in Ivanti Connect Secure web components.",
                "Ivanti Connect Secure 웹 구성 요소의 인증 우회 취약점입니다.",
            ),
            severity: VulnerabilitySeverity::High,
            cvss_score: Some(8.2),
            affected_components: vec![VpnGateway],
            mitigation: text(
                "Apply vendor mitigation and run the integrity checker",
                "벤더 완화 조치 적용 후 무결성 검사 실행",
            ),
            published_date: "2024-01-12".into(),
        },
        Vulnerability {
            meta: meta(
                "VULN-004",
                KnowledgeKind::Vulnerability,
                &["security", "cache"],
                trust(0.8, SourceType::Vendor, "Redis Security Documentation"),
            ),
            cve_id: None,
            title: text("Unauthenticated cache exposure", "인증 없는 캐시 노출"),
            description: text(
                "Redis bound to a public interface without auth accepts arbitrary commands.",
                "인증 없이 공개 인터페이스에 바인딩된 Redis는 임의 명령을 수락합니다.",
            ),
            severity: VulnerabilitySeverity::Medium,
            cvss_score: None,
            affected_components: vec![Cache],
            mitigation: text(
                "Bind to private addresses and require ACL auth",
                "사설 주소에 바인딩하고 ACL 인증 요구",
            ),
            published_date: "2015-11-01".into(),
        },
    ]
}
