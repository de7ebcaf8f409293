//! logsift 로그 스캔 엔진
//!
//! 평문 시스템/방화벽 로그를 라인 단위로 한 번 스캔하여 패턴으로 필드를 추출하고,
//! 키별 집계와 필터링된 리포트(CSV, 로그 부분집합)를 생성합니다.
//!
//! # 모듈 구성
//!
//! - [`matcher`]: 단일 라인 패턴 매칭 및 캡처 추출
//! - [`scanner`]: 파일 순차 스캔, 매칭 라인/캡처 수집
//! - [`tally`]: 추출 필드 키 기반 카운터
//! - [`report`]: 컬럼 스키마 기반 리포트 행 생성 및 기록
//! - [`campaign`]: 포트 집계 -> 포트 리포트 -> 로그인 실패 리포트 -> IP 로그 오케스트레이션
//! - [`config`]: 캠페인 설정
//! - [`error`]: 도메인 에러 타입
//!
//! # 아키텍처
//!
//! ```text
//! log file -> LineScanner(+PatternMatcher) -> rows / Tally -> ReportBuilder -> TabularWriter
//!                                                  |
//!                                           CampaignRunner
//! ```

pub mod campaign;
pub mod config;
pub mod error;
pub mod matcher;
pub mod report;
pub mod scanner;
pub mod tally;
pub mod types;

// --- 주요 타입 re-export ---

// 캠페인
pub use campaign::{CampaignRunner, CampaignSummary, ReportOutcome};

// 설정
pub use config::{CampaignConfig, CampaignConfigBuilder};

// 에러
pub use error::LogScanError;

// 매칭/스캔
pub use matcher::{CaseMode, PatternMatcher};
pub use scanner::{ScanOutcome, ScanSummary, scan};

// 집계
pub use tally::{Tally, tally};

// 리포트
pub use report::{CsvWriter, Derivation, ReportBuilder, ReportSpec, TabularWriter};

// 도메인 타입
pub use types::{CaptureTuple, MatchResult, ReportRow};
