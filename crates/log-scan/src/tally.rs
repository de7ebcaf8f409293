//! 키 기반 카운터 -- 추출 필드별 레코드 수 집계
//!
//! [`tally`]는 캡처 그룹이 정확히 하나인 패턴으로 파일을 한 번 스캔하여,
//! 캡처된 값(예: 목적지 포트)을 키로 하는 [`Tally`]를 만듭니다.
//! 임계값 판단은 [`Tally::at_least`]로 수행합니다.

use std::cmp::Ordering;
use std::collections::HashMap;
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::LogScanError;
use crate::matcher::PatternMatcher;
use crate::scanner;

/// 키별 카운트
///
/// 한 번의 스캔으로 만들어진 뒤에는 읽기 전용으로 사용합니다.
/// 순회 순서는 보장하지 않습니다. 결정적인 순서가 필요하면 [`Tally::sorted`]를 사용하세요.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Tally {
    counts: HashMap<String, u64>,
}

impl Tally {
    /// 빈 카운터를 생성합니다.
    pub fn new() -> Self {
        Self::default()
    }

    /// 키의 카운트를 1 증가시킵니다. 처음 보는 키는 1로 시작합니다.
    pub fn increment(&mut self, key: &str) {
        match self.counts.get_mut(key) {
            Some(count) => *count += 1,
            None => {
                self.counts.insert(key.to_owned(), 1);
            }
        }
    }

    /// 키의 카운트 (관측되지 않은 키는 0)
    pub fn get(&self, key: &str) -> u64 {
        self.counts.get(key).copied().unwrap_or(0)
    }

    /// 서로 다른 키의 수
    pub fn len(&self) -> usize {
        self.counts.len()
    }

    /// 관측된 키가 없는지 여부
    pub fn is_empty(&self) -> bool {
        self.counts.is_empty()
    }

    /// 모든 키의 카운트 합계
    pub fn total(&self) -> u64 {
        self.counts.values().sum()
    }

    /// (키, 카운트) 순회 -- 순서 보장 없음
    pub fn iter(&self) -> impl Iterator<Item = (&str, u64)> {
        self.counts.iter().map(|(k, v)| (k.as_str(), *v))
    }

    /// 키 순서로 정렬된 (키, 카운트) 목록
    pub fn sorted(&self) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().collect();
        entries.sort_by(|a, b| compare_keys(a.0, b.0));
        entries
    }

    /// 카운트가 `threshold` 이상인 키를 정렬하여 반환합니다.
    pub fn at_least(&self, threshold: u64) -> Vec<(&str, u64)> {
        let mut entries: Vec<_> = self.iter().filter(|(_, count)| *count >= threshold).collect();
        entries.sort_by(|a, b| compare_keys(a.0, b.0));
        entries
    }
}

impl<'a> FromIterator<&'a str> for Tally {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        let mut tally = Self::new();
        for key in iter {
            tally.increment(key);
        }
        tally
    }
}

/// 숫자 키는 수치 순서로, 나머지는 사전 순서로 비교합니다.
fn compare_keys(a: &str, b: &str) -> Ordering {
    let numeric = |s: &str| !s.is_empty() && s.bytes().all(|b| b.is_ascii_digit());
    if numeric(a) && numeric(b) {
        let (a, b) = (a.trim_start_matches('0'), b.trim_start_matches('0'));
        a.len().cmp(&b.len()).then_with(|| a.cmp(b))
    } else {
        a.cmp(b)
    }
}

/// 파일을 한 번 스캔하여 캡처 값별 라인 수를 집계합니다.
///
/// 패턴의 캡처 그룹은 정확히 하나여야 합니다. 매칭되지 않는 라인과,
/// 매칭되었지만 캡처가 비어 있는 라인은 무시합니다.
pub fn tally(path: impl AsRef<Path>, field_pattern: &PatternMatcher) -> Result<Tally, LogScanError> {
    if field_pattern.group_count() != 1 {
        return Err(LogScanError::Pattern {
            pattern: field_pattern.pattern().to_owned(),
            reason: format!(
                "tally pattern must define exactly one capture group, found {}",
                field_pattern.group_count()
            ),
        });
    }

    let path = path.as_ref();
    let reader = scanner::open(path)?;
    let mut counts = Tally::new();

    let lines = scanner::for_each_line(reader, |line| {
        let result = field_pattern.match_line(line);
        match result.captures.get(0) {
            Some(key) if result.matched && !key.is_empty() => counts.increment(key),
            _ => {}
        }
    })
    .map_err(|e| LogScanError::io(path, e))?;

    debug!(
        path = %path.display(),
        pattern = field_pattern.pattern(),
        lines,
        keys = counts.len(),
        "tally complete"
    );

    Ok(counts)
}
