//! 파일 라인 스캐너
//!
//! 로그 파일을 처음부터 끝까지 한 번 순차적으로 읽으며 라인마다 [`PatternMatcher`]를 적용합니다.
//! 파일 핸들은 스캔 범위 안에서만 유지되며, 읽기 에러로 중단되는 경우에도 해제됩니다.
//!
//! 출력(매칭 라인 인쇄, 요약 문장)은 이 모듈의 책임이 아닙니다.
//! 호출자가 [`ScanOutcome`]과 [`ScanSummary`]로 직접 표시합니다.

use std::fmt;
use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use serde::Serialize;
use tracing::debug;

use crate::error::LogScanError;
use crate::matcher::{CaseMode, PatternMatcher};
use crate::types::CaptureTuple;

/// 스캔 결과
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ScanOutcome {
    /// 매칭된 라인 (종결자 제거, 파일 순서)
    pub matched_lines: Vec<String>,
    /// 캡처 튜플 (그룹이 있는 패턴에서만 채워짐, 파일 순서)
    pub captures: Vec<CaptureTuple>,
    /// 읽은 전체 라인 수
    pub lines_read: u64,
}

impl ScanOutcome {
    /// 매칭된 레코드 수
    pub fn match_count(&self) -> usize {
        self.matched_lines.len()
    }
}

/// 한 줄 요약 -- 표시 전용
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ScanSummary {
    /// 매칭된 레코드 수
    pub records: usize,
    /// 사용한 패턴 원문
    pub pattern: String,
    /// 대소문자 구분 여부
    pub case_sensitive: bool,
}

impl ScanSummary {
    /// 스캔 결과와 매처로부터 요약을 만듭니다.
    pub fn new(outcome: &ScanOutcome, matcher: &PatternMatcher) -> Self {
        Self {
            records: outcome.match_count(),
            pattern: matcher.pattern().to_owned(),
            case_sensitive: matcher.case_mode() == CaseMode::Sensitive,
        }
    }
}

impl fmt::Display for ScanSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mode = if self.case_sensitive {
            CaseMode::Sensitive
        } else {
            CaseMode::Insensitive
        };
        write!(
            f,
            "The log file contains {} records that {} match the regex \"{}\".",
            self.records, mode, self.pattern
        )
    }
}

/// 파일을 스캔하여 매칭 라인과 캡처 튜플을 수집합니다.
pub fn scan(path: impl AsRef<Path>, matcher: &PatternMatcher) -> Result<ScanOutcome, LogScanError> {
    let path = path.as_ref();
    let reader = open(path)?;
    let outcome = scan_reader(reader, matcher).map_err(|e| LogScanError::io(path, e))?;

    debug!(
        path = %path.display(),
        pattern = matcher.pattern(),
        lines = outcome.lines_read,
        matched = outcome.match_count(),
        "scan complete"
    );

    Ok(outcome)
}

/// 임의의 `BufRead`에서 라인을 읽어 스캔합니다.
pub fn scan_reader<R: BufRead>(
    reader: R,
    matcher: &PatternMatcher,
) -> std::io::Result<ScanOutcome> {
    let mut outcome = ScanOutcome::default();
    let has_groups = matcher.group_count() > 0;

    let lines_read = for_each_line(reader, |line| {
        let result = matcher.match_line(line);
        if !result.matched {
            return;
        }
        outcome.matched_lines.push(line.to_owned());
        if has_groups {
            outcome.captures.push(result.captures);
        }
    })?;
    outcome.lines_read = lines_read;

    Ok(outcome)
}

/// 로그 파일을 순차 읽기용으로 엽니다.
pub(crate) fn open(path: &Path) -> Result<BufReader<File>, LogScanError> {
    let file = File::open(path).map_err(|e| LogScanError::io(path, e))?;
    Ok(BufReader::new(file))
}

/// 라인마다 콜백을 호출하고 읽은 라인 수를 반환합니다.
///
/// 라인 길이에 상한은 없습니다. 종결자(`\n`, `\r\n`)는 콜백에 전달하기 전에 제거하며,
/// UTF-8이 아닌 바이트는 대체 문자로 바꿔 스캔을 계속합니다.
pub(crate) fn for_each_line<R, F>(mut reader: R, mut visit: F) -> std::io::Result<u64>
where
    R: BufRead,
    F: FnMut(&str),
{
    let mut buf = Vec::with_capacity(512);
    let mut count = 0u64;

    loop {
        buf.clear();
        let read = reader.read_until(b'\n', &mut buf)?;
        if read == 0 {
            break;
        }
        count += 1;

        let line = String::from_utf8_lossy(strip_terminator(&buf));
        visit(&*line);
    }

    Ok(count)
}

fn strip_terminator(line: &[u8]) -> &[u8] {
    let line = line.strip_suffix(b"\n").unwrap_or(line);
    line.strip_suffix(b"\r").unwrap_or(line)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::{Cursor, Write};

    fn matcher(pattern: &str, case_mode: CaseMode) -> PatternMatcher {
        PatternMatcher::new(pattern, case_mode).unwrap()
    }

    #[test]
    fn strips_terminators() {
        let input = "first error\r\nsecond ok\nthird error";
        let outcome = scan_reader(Cursor::new(input), &matcher("error", CaseMode::Insensitive))
            .unwrap();
        assert_eq!(outcome.matched_lines, vec!["first error", "third error"]);
        assert_eq!(outcome.lines_read, 3);
    }

    #[test]
    fn captures_only_collected_for_grouped_patterns() {
        let input = "a error\nb error\n";
        let plain = scan_reader(Cursor::new(input), &matcher("error", CaseMode::Insensitive))
            .unwrap();
        assert_eq!(plain.match_count(), 2);
        assert!(plain.captures.is_empty());

        let grouped = scan_reader(Cursor::new(input), &matcher(r"(\w) error", CaseMode::Insensitive))
            .unwrap();
        assert_eq!(grouped.captures.len(), 2);
        assert_eq!(grouped.captures[1].get(0), Some("b"));
    }

    #[test]
    fn case_insensitive_vs_sensitive() {
        let input = "Error: one\nERROR: two\nall good\n";
        let insensitive =
            scan_reader(Cursor::new(input), &matcher("error", CaseMode::Insensitive)).unwrap();
        assert_eq!(insensitive.match_count(), 2);

        let sensitive =
            scan_reader(Cursor::new(input), &matcher("error", CaseMode::Sensitive)).unwrap();
        assert_eq!(sensitive.match_count(), 0);
    }

    #[test]
    fn invalid_utf8_does_not_abort_scan() {
        let input: &[u8] = b"bad \xff\xfe bytes error\nnext error\n";
        let outcome = scan_reader(Cursor::new(input), &matcher("error", CaseMode::Insensitive))
            .unwrap();
        assert_eq!(outcome.match_count(), 2);
        assert!(outcome.matched_lines[0].starts_with("bad "));
    }

    #[test]
    fn empty_input_yields_nothing() {
        let outcome =
            scan_reader(Cursor::new(""), &matcher("x", CaseMode::Insensitive)).unwrap();
        assert_eq!(outcome, ScanOutcome::default());
    }

    #[test]
    fn scan_missing_file_is_io_error() {
        let err = scan(
            "/nonexistent/logsift/test.log",
            &matcher("x", CaseMode::Insensitive),
        )
        .unwrap_err();
        assert!(matches!(err, LogScanError::Io { .. }));
    }

    #[test]
    fn scan_reads_file_from_disk() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "Jan 1 00:00:00 gw kernel: DPT=22").unwrap();
        writeln!(file, "Jan 1 00:00:01 gw kernel: DPT=80").unwrap();

        let outcome = scan(file.path(), &matcher(r"DPT=(\d+)", CaseMode::Sensitive)).unwrap();
        assert_eq!(outcome.match_count(), 2);
        assert_eq!(outcome.captures[0].get(0), Some("22"));
        assert_eq!(outcome.captures[1].get(0), Some("80"));
    }

    #[test]
    fn summary_names_case_mode() {
        let m = matcher("error", CaseMode::Insensitive);
        let outcome = scan_reader(Cursor::new("error\nerror\n"), &m).unwrap();
        let summary = ScanSummary::new(&outcome, &m);
        assert_eq!(
            summary.to_string(),
            "The log file contains 2 records that case-insensitive match the regex \"error\"."
        );

        let m = matcher("error", CaseMode::Sensitive);
        let summary = ScanSummary::new(&ScanOutcome::default(), &m);
        assert!(summary.to_string().contains("0 records that case-sensitive"));
    }
}
