//! 캠페인 오케스트레이션 -- 포트 집계, 포트별 리포트, 잘못된 사용자 리포트, 출발지 IP 로그
//!
//! [`CampaignRunner`]는 로그 파일 경로 외의 상태를 갖지 않습니다.
//! 각 단계는 서로 독립적이며, 한 단계가 실패해도 다음 단계는 계속 실행됩니다.
//! 실패한 단계는 [`CampaignSummary::failures`]에 기록되고
//! [`CampaignSummary::ensure_success`]가 [`LogScanError::Campaign`]으로 보고합니다.
//!
//! # 실행 순서
//! ```text
//! 1. tally DPT=(\d+)                      -> Tally
//! 2. count >= threshold 인 포트마다       -> destination_port_<port>_report.csv
//! 3. Invalid user <name> from <ip>        -> invalid_users.csv
//! 4. SRC=<source_ip>                      -> source_ip_<ip>.log
//! ```

use std::path::PathBuf;

use serde::Serialize;
use tracing::{info, warn};

use crate::config::CampaignConfig;
use crate::error::LogScanError;
use crate::matcher::{CaseMode, PatternMatcher};
use crate::report::{
    Derivation, ReportBuilder, ReportSpec, TabularWriter, port_report_file_name,
    source_ip_log_file_name, write_filtered_log,
};
use crate::scanner;
use crate::tally::{self, Tally};

/// 목적지 포트 추출 패턴
pub const DESTINATION_PORT_PATTERN: &str = r"DPT=(\d+)";

/// 선행 타임스탬프 토큰 (`Mar  1 12:00:00`)
const TIMESTAMP: &str = r"(\w+\s+\d+\s+\d+:\d+:\d+)";

/// 잘못된 사용자 로그인 시도 패턴
///
/// 터미네이터를 제거한 뒤 매칭하므로 IP가 라인 끝에 오는 경우도 `$`로 받습니다.
pub const INVALID_USER_PATTERN: &str =
    r"(\w+\s+\d+\s+\d+:\d+:\d+)\s+.*Invalid user (\w+) from (.*?)(?:\s|$)";

/// 포트 리포트 컬럼
pub const PORT_REPORT_COLUMNS: [&str; 6] = [
    "Date",
    "Time",
    "Source IP",
    "Destination IP",
    "Source Port",
    "Destination Port",
];

/// 잘못된 사용자 리포트 컬럼
pub const INVALID_USER_COLUMNS: [&str; 4] = ["Date", "Time", "Username", "IP Address"];

/// 잘못된 사용자 리포트 파일명
pub const INVALID_USER_FILE_NAME: &str = "invalid_users.csv";

/// 타임스탬프 필드를 날짜와 시각으로 나누는 규칙
const SPLIT_TIMESTAMP: Derivation = Derivation::SplitFirst {
    field: 0,
    delimiter: ' ',
};

/// 특정 목적지 포트의 리포트 스펙을 생성합니다.
///
/// 포트 값은 이스케이프한 리터럴로 삽입하고 단어 경계로 닫기 때문에
/// `80` 리포트가 `DPT=8080` 라인을 포함하지 않습니다.
/// IP/포트 필드는 공백 전까지만 캡처하므로 `DST=`와 `SPT=` 사이의
/// `LEN=`, `PROTO=` 등은 필드에 섞이지 않습니다.
/// `DST=(.*?) SPT=` 형태였다면 목적지 IP 열에 `LEN=.. PROTO=..`가 함께 들어갔을 것이고,
/// 이 리포트는 의도적으로 IP 값만 기록합니다.
pub fn port_report_spec(port: &str) -> Result<ReportSpec, LogScanError> {
    let pattern = format!(
        r"{TIMESTAMP}\s+.*SRC=(\S*) DST=(\S*)\s.*?SPT=(\S*) DPT=({})\b",
        regex::escape(port)
    );
    ReportSpec::new(
        format!("destination_port_{port}"),
        PatternMatcher::new(&pattern, CaseMode::Sensitive)?,
        &PORT_REPORT_COLUMNS,
        SPLIT_TIMESTAMP,
        port_report_file_name(port),
    )
}

/// 잘못된 사용자 리포트 스펙을 생성합니다.
pub fn invalid_user_spec() -> Result<ReportSpec, LogScanError> {
    ReportSpec::new(
        "invalid_users",
        PatternMatcher::new(INVALID_USER_PATTERN, CaseMode::Sensitive)?,
        &INVALID_USER_COLUMNS,
        SPLIT_TIMESTAMP,
        INVALID_USER_FILE_NAME,
    )
}

/// 리포트 한 건의 결과
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ReportOutcome {
    /// 리포트 이름
    pub name: String,
    /// 기록된 행 수
    pub rows: usize,
    /// 기록된 파일 경로
    pub path: PathBuf,
}

/// 포트별 카운트 (정렬된 표시용)
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PortCount {
    /// 목적지 포트
    pub port: String,
    /// 레코드 수
    pub count: u64,
}

/// 실패한 단계
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StepFailure {
    /// 단계 이름
    pub step: String,
    /// 에러 메시지
    pub error: String,
}

/// 캠페인 실행 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CampaignSummary {
    /// 분석한 로그 파일
    pub log_path: PathBuf,
    /// 포트 리포트 임계값
    pub threshold: u64,
    /// 포트별 카운트 (포트 순)
    pub port_tally: Vec<PortCount>,
    /// 생성된 포트 리포트
    pub port_reports: Vec<ReportOutcome>,
    /// 잘못된 사용자 리포트
    pub invalid_users: Option<ReportOutcome>,
    /// 출발지 IP 로그
    pub source_ip_log: Option<ReportOutcome>,
    /// 실패한 단계
    pub failures: Vec<StepFailure>,
}

impl CampaignSummary {
    /// 모든 단계가 성공했는지 확인합니다.
    pub fn ensure_success(&self) -> Result<(), LogScanError> {
        if self.failures.is_empty() {
            return Ok(());
        }
        Err(LogScanError::Campaign {
            failed: self
                .failures
                .iter()
                .map(|f| format!("{}: {}", f.step, f.error))
                .collect(),
        })
    }

    fn record_failure(&mut self, step: impl Into<String>, err: &LogScanError) {
        let step = step.into();
        warn!(step = %step, error = %err, "campaign step failed");
        self.failures.push(StepFailure {
            step,
            error: err.to_string(),
        });
    }
}

/// 캠페인 실행기
///
/// # 사용 예시
/// ```ignore
/// use logsift_log_scan::{CampaignConfig, CampaignRunner, CsvWriter};
///
/// let runner = CampaignRunner::new("/var/log/gateway.log", CampaignConfig::default(), CsvWriter)?;
/// let summary = runner.run()?;
/// summary.ensure_success()?;
/// ```
pub struct CampaignRunner<W: TabularWriter> {
    log_path: PathBuf,
    config: CampaignConfig,
    writer: W,
}

impl<W: TabularWriter> CampaignRunner<W> {
    /// 설정을 검증하고 실행기를 생성합니다.
    pub fn new(
        log_path: impl Into<PathBuf>,
        config: CampaignConfig,
        writer: W,
    ) -> Result<Self, LogScanError> {
        config.validate()?;
        Ok(Self {
            log_path: log_path.into(),
            config,
            writer,
        })
    }

    /// 모든 단계를 순서대로 실행합니다.
    ///
    /// 출력 디렉토리를 만들 수 없으면 어떤 단계도 실행하지 않고 에러를 반환합니다.
    /// 그 외 단계별 실패는 요약에 기록됩니다.
    pub fn run(&self) -> Result<CampaignSummary, LogScanError> {
        let out_dir = &self.config.output_dir;
        std::fs::create_dir_all(out_dir).map_err(|e| LogScanError::write(out_dir, e))?;

        info!(
            log = %self.log_path.display(),
            out_dir = %out_dir.display(),
            threshold = self.config.port_threshold,
            "campaign starting"
        );

        let mut summary = CampaignSummary {
            log_path: self.log_path.clone(),
            threshold: self.config.port_threshold,
            ..Default::default()
        };

        match self.tally_ports() {
            Ok(ports) => {
                summary.port_tally = ports
                    .sorted()
                    .into_iter()
                    .map(|(port, count)| PortCount {
                        port: port.to_owned(),
                        count,
                    })
                    .collect();

                for (port, count) in ports.at_least(self.config.port_threshold) {
                    info!(port, count, "port over threshold");
                    match self.port_report(port) {
                        Ok(outcome) => summary.port_reports.push(outcome),
                        Err(e) => summary.record_failure(format!("port {port} report"), &e),
                    }
                }
            }
            Err(e) => summary.record_failure("port tally", &e),
        }

        match self.invalid_user_report() {
            Ok(outcome) => summary.invalid_users = Some(outcome),
            Err(e) => summary.record_failure("invalid user report", &e),
        }

        match self.source_ip_log(&self.config.source_ip) {
            Ok(outcome) => summary.source_ip_log = Some(outcome),
            Err(e) => summary.record_failure("source ip log", &e),
        }

        info!(
            port_reports = summary.port_reports.len(),
            failures = summary.failures.len(),
            "campaign finished"
        );
        Ok(summary)
    }

    /// 목적지 포트별 트래픽을 집계합니다.
    pub fn tally_ports(&self) -> Result<Tally, LogScanError> {
        let matcher = PatternMatcher::new(DESTINATION_PORT_PATTERN, CaseMode::Sensitive)?;
        tally::tally(&self.log_path, &matcher)
    }

    /// 특정 목적지 포트의 리포트를 생성합니다.
    pub fn port_report(&self, port: &str) -> Result<ReportOutcome, LogScanError> {
        let spec = port_report_spec(port)?;
        self.build_and_emit(&spec)
    }

    /// 잘못된 사용자 로그인 시도 리포트를 생성합니다.
    pub fn invalid_user_report(&self) -> Result<ReportOutcome, LogScanError> {
        let spec = invalid_user_spec()?;
        self.build_and_emit(&spec)
    }

    /// 특정 출발지 IP의 레코드만 모은 로그 파일을 생성합니다.
    pub fn source_ip_log(&self, ip: &str) -> Result<ReportOutcome, LogScanError> {
        let matcher = PatternMatcher::literal(&format!("SRC={ip}"), CaseMode::Sensitive)?;
        let outcome = scanner::scan(&self.log_path, &matcher)?;

        let path = self.config.output_dir.join(source_ip_log_file_name(ip));
        write_filtered_log(&outcome.matched_lines, &path)?;

        info!(ip, lines = outcome.match_count(), path = %path.display(), "source ip log written");
        Ok(ReportOutcome {
            name: format!("source_ip_{ip}"),
            rows: outcome.match_count(),
            path,
        })
    }

    fn build_and_emit(&self, spec: &ReportSpec) -> Result<ReportOutcome, LogScanError> {
        let rows = ReportBuilder::build(&self.log_path, spec)?;
        let path = ReportBuilder::emit(&rows, spec, &self.config.output_dir, &self.writer)?;
        Ok(ReportOutcome {
            name: spec.name().to_owned(),
            rows: rows.len(),
            path,
        })
    }
}
