//! 캠페인 설정
//!
//! 설정 파일은 없습니다. [`CampaignConfig`]의 기본값이 고정 동작(임계값 100,
//! 출발지 IP `220.195.35.40`, 현재 디렉토리 출력)이며, CLI 인자로만 덮어씁니다.
//!
//! # 사용 예시
//! ```ignore
//! use logsift_log_scan::config::CampaignConfigBuilder;
//!
//! let config = CampaignConfigBuilder::new()
//!     .port_threshold(50)
//!     .output_dir("/tmp/reports")
//!     .build()?;
//! ```

use std::net::IpAddr;
use std::path::PathBuf;

use serde::Serialize;

use crate::error::LogScanError;

/// 포트 리포트 생성 기준 레코드 수
pub const DEFAULT_PORT_THRESHOLD: u64 = 100;

/// 로그를 추출할 기본 출발지 IP
pub const DEFAULT_SOURCE_IP: &str = "220.195.35.40";

/// 캠페인 설정
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CampaignConfig {
    /// 포트 리포트를 생성할 최소 레코드 수 (이상)
    pub port_threshold: u64,
    /// 로그를 추출할 출발지 IP
    pub source_ip: String,
    /// 리포트/로그 출력 디렉토리
    pub output_dir: PathBuf,
}

impl Default for CampaignConfig {
    fn default() -> Self {
        Self {
            port_threshold: DEFAULT_PORT_THRESHOLD,
            source_ip: DEFAULT_SOURCE_IP.to_owned(),
            output_dir: PathBuf::from("."),
        }
    }
}

impl CampaignConfig {
    /// 설정값의 유효성을 검증합니다.
    pub fn validate(&self) -> Result<(), LogScanError> {
        if self.port_threshold == 0 {
            return Err(LogScanError::Config {
                field: "port_threshold".to_owned(),
                reason: "must be greater than 0".to_owned(),
            });
        }

        if self.source_ip.parse::<IpAddr>().is_err() {
            return Err(LogScanError::Config {
                field: "source_ip".to_owned(),
                reason: format!("'{}' is not a valid IP address", self.source_ip),
            });
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(LogScanError::Config {
                field: "output_dir".to_owned(),
                reason: "must not be empty".to_owned(),
            });
        }

        if self.output_dir.exists() && !self.output_dir.is_dir() {
            return Err(LogScanError::Config {
                field: "output_dir".to_owned(),
                reason: format!("'{}' is not a directory", self.output_dir.display()),
            });
        }

        Ok(())
    }
}

/// 캠페인 설정 빌더
#[derive(Default)]
pub struct CampaignConfigBuilder {
    config: CampaignConfig,
}

impl CampaignConfigBuilder {
    /// 새 빌더를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 포트 리포트 임계값을 설정합니다.
    pub fn port_threshold(mut self, threshold: u64) -> Self {
        self.config.port_threshold = threshold;
        self
    }

    /// 출발지 IP를 설정합니다.
    pub fn source_ip(mut self, ip: impl Into<String>) -> Self {
        self.config.source_ip = ip.into();
        self
    }

    /// 출력 디렉토리를 설정합니다.
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.config.output_dir = dir.into();
        self
    }

    /// 설정을 검증하고 `CampaignConfig`를 생성합니다.
    pub fn build(self) -> Result<CampaignConfig, LogScanError> {
        self.config.validate()?;
        Ok(self.config)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_valid() {
        let config = CampaignConfig::default();
        config.validate().unwrap();
        assert_eq!(config.port_threshold, 100);
        assert_eq!(config.source_ip, "220.195.35.40");
    }

    #[test]
    fn validate_rejects_zero_threshold() {
        let config = CampaignConfig {
            port_threshold: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_bad_ip() {
        let config = CampaignConfig {
            source_ip: "220.195.35".to_owned(),
            ..Default::default()
        };
        assert!(matches!(
            config.validate(),
            Err(LogScanError::Config { ref field, .. }) if field == "source_ip"
        ));
    }

    #[test]
    fn validate_rejects_file_as_output_dir() {
        let file = tempfile::NamedTempFile::new().unwrap();
        let config = CampaignConfig {
            output_dir: file.path().to_path_buf(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn builder_creates_valid_config() {
        let config = CampaignConfigBuilder::new()
            .port_threshold(50)
            .source_ip("10.0.0.1")
            .output_dir("/tmp/reports")
            .build()
            .unwrap();
        assert_eq!(config.port_threshold, 50);
        assert_eq!(config.source_ip, "10.0.0.1");
        assert_eq!(config.output_dir, PathBuf::from("/tmp/reports"));
    }

    #[test]
    fn builder_rejects_invalid_config() {
        assert!(CampaignConfigBuilder::new().port_threshold(0).build().is_err());
    }
}
