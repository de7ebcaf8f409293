//! 로그 스캔 에러 타입
//!
//! [`LogScanError`]는 패턴 컴파일, 파일 스캔, 리포트 생성/기록, 캠페인 실행 중
//! 발생하는 모든 치명적 에러를 표현합니다.
//!
//! 라인이 패턴에 매칭되지 않거나 캡처가 비정상인 경우는 에러가 아닙니다.
//! 해당 라인은 결과에서 조용히 제외됩니다.

use std::path::{Path, PathBuf};

/// 로그 스캔 도메인 에러
#[derive(Debug, thiserror::Error)]
pub enum LogScanError {
    /// 파일 열기/읽기 실패
    #[error("io error: {path}: {source}")]
    Io {
        /// 대상 파일 경로
        path: PathBuf,
        /// 원인 I/O 에러
        #[source]
        source: std::io::Error,
    },

    /// 패턴 컴파일 실패 또는 캡처 그룹 개수 불일치
    #[error("pattern error: '{pattern}': {reason}")]
    Pattern {
        /// 문제가 된 패턴 원문
        pattern: String,
        /// 실패 사유
        reason: String,
    },

    /// 리포트 컬럼 스키마와 캡처 구성이 맞지 않음
    #[error("schema error: report '{report}': expected {expected} fields, pattern yields {actual}")]
    Schema {
        /// 리포트 이름
        report: String,
        /// 컬럼 스키마 길이
        expected: usize,
        /// 패턴/파생 규칙이 만들어내는 필드 수
        actual: usize,
    },

    /// 출력 파일 기록 실패
    #[error("write error: {path}: {reason}")]
    Write {
        /// 출력 파일 경로
        path: PathBuf,
        /// 실패 사유
        reason: String,
    },

    /// 설정 에러
    #[error("config error: {field}: {reason}")]
    Config {
        /// 설정 필드명
        field: String,
        /// 에러 사유
        reason: String,
    },

    /// 캠페인 단계 중 하나 이상이 실패
    #[error("campaign failed: {} step(s) failed: {}", .failed.len(), .failed.join("; "))]
    Campaign {
        /// 실패한 단계별 메시지
        failed: Vec<String>,
    },
}

impl LogScanError {
    /// 경로 정보를 붙여 I/O 에러를 감쌉니다.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.as_ref().to_path_buf(),
            source,
        }
    }

    /// 경로 정보를 붙여 기록 에러를 만듭니다.
    pub fn write(path: impl AsRef<Path>, reason: impl ToString) -> Self {
        Self::Write {
            path: path.as_ref().to_path_buf(),
            reason: reason.to_string(),
        }
    }
}
