//! 패턴 매처 -- 단일 라인에 정규식 적용 및 캡처 추출
//!
//! [`PatternMatcher`]는 생성 시 한 번만 정규식을 컴파일하고,
//! 이후 [`match_line`](PatternMatcher::match_line)으로 라인마다 매칭을 수행합니다.
//!
//! 매칭은 전체 라인 앵커가 아닌 검색(search) 방식입니다.
//! 라인의 어느 위치에서든 매칭되면 성공으로 봅니다.

use std::fmt;

use regex::{Regex, RegexBuilder};

use crate::error::LogScanError;
use crate::types::{CaptureTuple, MatchResult};

/// 대소문자 구분 방식
///
/// 매칭에만 영향을 주며, 반환되는 텍스트의 대소문자는 바꾸지 않습니다.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum CaseMode {
    /// 대소문자 무시 (기본값)
    #[default]
    Insensitive,
    /// 대소문자 구분
    Sensitive,
}

impl fmt::Display for CaseMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Insensitive => f.write_str("case-insensitive"),
            Self::Sensitive => f.write_str("case-sensitive"),
        }
    }
}

/// 컴파일된 라인 패턴
#[derive(Debug, Clone)]
pub struct PatternMatcher {
    /// 컴파일된 정규식
    regex: Regex,
    /// 사용자가 지정한 패턴 원문
    pattern: String,
    /// 대소문자 구분 방식
    case_mode: CaseMode,
}

impl PatternMatcher {
    /// 패턴을 컴파일합니다.
    pub fn new(pattern: &str, case_mode: CaseMode) -> Result<Self, LogScanError> {
        let regex = RegexBuilder::new(pattern)
            .case_insensitive(case_mode == CaseMode::Insensitive)
            .build()
            .map_err(|e| LogScanError::Pattern {
                pattern: pattern.to_owned(),
                reason: e.to_string(),
            })?;

        Ok(Self {
            regex,
            pattern: pattern.to_owned(),
            case_mode,
        })
    }

    /// 리터럴 조각(예: `SRC=10.0.0.1`)을 이스케이프하여 포함 여부 매처를 생성합니다.
    pub fn literal(fragment: &str, case_mode: CaseMode) -> Result<Self, LogScanError> {
        Self::new(&regex::escape(fragment), case_mode)
    }

    /// 패턴 원문
    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// 대소문자 구분 방식
    pub fn case_mode(&self) -> CaseMode {
        self.case_mode
    }

    /// 패턴에 선언된 캡처 그룹 수 (전체 매치 그룹 제외)
    pub fn group_count(&self) -> usize {
        self.regex.captures_len() - 1
    }

    /// 라인에 패턴이 존재하는지만 확인합니다.
    pub fn is_match(&self, line: &str) -> bool {
        self.regex.is_match(line)
    }

    /// 라인에 패턴을 적용합니다.
    ///
    /// 그룹이 있는 패턴이 매칭되면 선언 순서대로 모든 그룹을 담은 캡처 튜플을 반환합니다.
    /// 그룹이 없는 패턴은 매칭되더라도 캡처가 비어 있습니다.
    pub fn match_line<'a>(&self, line: &'a str) -> MatchResult<'a> {
        if self.group_count() == 0 {
            return MatchResult {
                matched: self.regex.is_match(line),
                raw_line: line,
                captures: CaptureTuple::default(),
            };
        }

        let Some(caps) = self.regex.captures(line) else {
            return MatchResult::no_match(line);
        };

        let fields = caps
            .iter()
            .skip(1) // 0번은 전체 매치
            .map(|m| m.map(|m| m.as_str().to_owned()))
            .collect();

        MatchResult {
            matched: true,
            raw_line: line,
            captures: CaptureTuple::new(fields),
        }
    }
}
