//! 리포트 생성 -- 캡처 결과를 컬럼 스키마에 맞춘 행으로 변환하여 기록
//!
//! [`ReportSpec`]은 리포트 한 종류의 패턴, 컬럼 스키마, 파생 규칙, 출력 파일명을 묶습니다.
//! [`ReportBuilder`]는 스펙에 따라 로그 파일을 스캔해 행을 만들고([`ReportBuilder::build`]),
//! [`TabularWriter`]로 기록합니다([`ReportBuilder::emit`]).
//!
//! # 흐름
//! ```text
//! log file -> PatternMatcher -> CaptureTuple -> Derivation -> ReportRow -> TabularWriter
//! ```

pub mod writer;

pub use writer::{CsvWriter, TabularWriter, write_filtered_log};

use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::LogScanError;
use crate::matcher::PatternMatcher;
use crate::scanner;
use crate::types::{CaptureTuple, ReportRow};

/// 원시 필드에 적용하는 리포트별 파생 규칙
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Derivation {
    /// 캡처 필드를 그대로 사용
    None,
    /// `field`번째 필드를 `delimiter`의 첫 번째 위치에서 두 필드로 나눕니다.
    ///
    /// 구분자가 없으면 뒤쪽 필드는 빈 문자열이 됩니다.
    SplitFirst {
        /// 분할할 원시 필드 위치
        field: usize,
        /// 구분자
        delimiter: char,
    },
}

impl Derivation {
    /// 파생 규칙이 추가하는 필드 수
    fn extra_fields(&self) -> usize {
        match self {
            Self::None => 0,
            Self::SplitFirst { .. } => 1,
        }
    }

    /// 원시 필드 목록에 규칙을 적용합니다.
    fn apply(&self, mut fields: Vec<String>) -> ReportRow {
        match *self {
            Self::None => fields,
            Self::SplitFirst { field, delimiter } => {
                let composite = std::mem::take(&mut fields[field]);
                let (head, tail) = match composite.split_once(delimiter) {
                    Some((head, tail)) => (head.to_owned(), tail.to_owned()),
                    None => (composite, String::new()),
                };
                fields[field] = head;
                fields.insert(field + 1, tail);
                fields
            }
        }
    }
}

/// 리포트 한 종류의 정의
///
/// 생성 시 `패턴 그룹 수 + 파생 필드 수 == 컬럼 수`를 검증하므로,
/// 이 스펙으로 만든 모든 행은 컬럼 스키마와 길이가 같습니다.
#[derive(Debug, Clone)]
pub struct ReportSpec {
    name: String,
    matcher: PatternMatcher,
    columns: Vec<String>,
    derivation: Derivation,
    file_name: String,
}

impl ReportSpec {
    /// 리포트 스펙을 생성합니다.
    pub fn new(
        name: impl Into<String>,
        matcher: PatternMatcher,
        columns: &[&str],
        derivation: Derivation,
        file_name: impl Into<String>,
    ) -> Result<Self, LogScanError> {
        let name = name.into();
        let groups = matcher.group_count();

        if let Derivation::SplitFirst { field, .. } = derivation {
            if field >= groups {
                return Err(LogScanError::Pattern {
                    pattern: matcher.pattern().to_owned(),
                    reason: format!(
                        "report '{name}' splits field {field} but pattern has {groups} groups"
                    ),
                });
            }
        }

        let actual = groups + derivation.extra_fields();
        if actual != columns.len() {
            return Err(LogScanError::Schema {
                report: name,
                expected: columns.len(),
                actual,
            });
        }

        Ok(Self {
            name,
            matcher,
            columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            derivation,
            file_name: file_name.into(),
        })
    }

    /// 리포트 이름
    pub fn name(&self) -> &str {
        &self.name
    }

    /// 컬럼 스키마
    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// 라인 패턴
    pub fn matcher(&self) -> &PatternMatcher {
        &self.matcher
    }

    /// 출력 파일명 (디렉토리 제외)
    pub fn file_name(&self) -> &str {
        &self.file_name
    }

    /// 캡처 튜플을 리포트 행으로 변환합니다.
    ///
    /// 튜플 길이가 패턴 그룹 수와 다르면 빈 필드로 채우거나 잘라내므로
    /// 결과 행의 길이는 항상 컬럼 수와 같습니다.
    pub fn to_row(&self, captures: CaptureTuple) -> ReportRow {
        let mut fields = captures.into_fields();
        fields.resize(self.matcher.group_count(), String::new());
        self.derivation.apply(fields)
    }
}

/// 리포트 빌더
pub struct ReportBuilder;

impl ReportBuilder {
    /// 로그 파일을 스캔하여 파일 순서대로 리포트 행을 만듭니다.
    pub fn build(path: impl AsRef<Path>, spec: &ReportSpec) -> Result<Vec<ReportRow>, LogScanError> {
        let path = path.as_ref();
        let reader = scanner::open(path)?;
        let mut rows = Vec::new();

        scanner::for_each_line(reader, |line| {
            let result = spec.matcher.match_line(line);
            if result.matched {
                rows.push(spec.to_row(result.captures));
            }
        })
        .map_err(|e| LogScanError::io(path, e))?;

        debug!(report = spec.name(), rows = rows.len(), "report rows built");
        Ok(rows)
    }

    /// 행을 `out_dir` 아래 스펙의 파일명으로 기록하고 기록한 경로를 반환합니다.
    ///
    /// 행이 없어도 헤더만 있는 파일을 생성합니다.
    pub fn emit(
        rows: &[ReportRow],
        spec: &ReportSpec,
        out_dir: impl AsRef<Path>,
        writer: &dyn TabularWriter,
    ) -> Result<PathBuf, LogScanError> {
        let destination = out_dir.as_ref().join(spec.file_name());
        writer.write_tabular(rows, spec.columns(), &destination)?;

        info!(
            report = spec.name(),
            rows = rows.len(),
            path = %destination.display(),
            "report written"
        );
        Ok(destination)
    }
}

/// 목적지 포트별 리포트 파일명
pub fn port_report_file_name(port: &str) -> String {
    format!("destination_port_{port}_report.csv")
}

/// 출발지 IP 로그 파일명 (`.`을 `_`로 치환)
pub fn source_ip_log_file_name(ip: &str) -> String {
    format!("source_ip_{}.log", ip.replace('.', "_"))
}
