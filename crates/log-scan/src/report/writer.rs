//! 리포트 기록기
//!
//! [`TabularWriter`]는 행 목록과 컬럼 스키마를 받아 출력 파일로 기록하는 경계입니다.
//! 기본 구현인 [`CsvWriter`]는 헤더 행 + 쉼표 구분 + 필요한 경우에만 따옴표를 사용합니다.
//! 기존 파일은 병합하지 않고 덮어씁니다.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use crate::error::LogScanError;
use crate::types::ReportRow;

/// 표 형식 출력 기록기
pub trait TabularWriter {
    /// `rows`를 `columns` 헤더와 함께 `destination`에 기록합니다.
    ///
    /// 행이 비어 있어도 헤더가 있는 파일을 생성해야 합니다.
    fn write_tabular(
        &self,
        rows: &[ReportRow],
        columns: &[String],
        destination: &Path,
    ) -> Result<(), LogScanError>;
}

/// CSV 기록기
#[derive(Debug, Clone, Copy, Default)]
pub struct CsvWriter;

impl TabularWriter for CsvWriter {
    fn write_tabular(
        &self,
        rows: &[ReportRow],
        columns: &[String],
        destination: &Path,
    ) -> Result<(), LogScanError> {
        let mut wtr =
            csv::Writer::from_path(destination).map_err(|e| LogScanError::write(destination, e))?;

        wtr.write_record(columns)
            .map_err(|e| LogScanError::write(destination, e))?;
        for row in rows {
            wtr.write_record(row)
                .map_err(|e| LogScanError::write(destination, e))?;
        }
        wtr.flush().map_err(|e| LogScanError::write(destination, e))?;

        Ok(())
    }
}

/// 필터링된 로그 라인을 한 줄에 하나씩 `\n`으로 끝맺어 기록합니다.
pub fn write_filtered_log<S: AsRef<str>>(
    lines: &[S],
    destination: &Path,
) -> Result<(), LogScanError> {
    let file = File::create(destination).map_err(|e| LogScanError::write(destination, e))?;
    let mut out = BufWriter::new(file);

    for line in lines {
        writeln!(out, "{}", line.as_ref()).map_err(|e| LogScanError::write(destination, e))?;
    }
    out.flush().map_err(|e| LogScanError::write(destination, e))?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn columns(names: &[&str]) -> Vec<String> {
        names.iter().map(|c| (*c).to_owned()).collect()
    }

    #[test]
    fn empty_rows_still_write_header() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("empty.csv");

        CsvWriter
            .write_tabular(&[], &columns(&["Date", "Time", "Username", "IP Address"]), &path)
            .unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        assert_eq!(content, "Date,Time,Username,IP Address\n");
    }

    #[test]
    fn csv_round_trip_preserves_fields() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("rows.csv");
        let rows: Vec<ReportRow> = vec![
            vec!["Mar".into(), "1 12:00:00".into(), "bob".into(), "10.0.0.5".into()],
            vec!["Mar".into(), "2 01:02:03".into(), "a,b".into(), "\"quoted\"".into()],
            vec!["Apr".into(), "".into(), "".into(), "".into()],
        ];
        let cols = columns(&["Date", "Time", "Username", "IP Address"]);

        CsvWriter.write_tabular(&rows, &cols, &path).unwrap();

        let mut reader = csv::Reader::from_path(&path).unwrap();
        let header: Vec<String> = reader.headers().unwrap().iter().map(str::to_owned).collect();
        assert_eq!(header, cols);

        let read_back: Vec<ReportRow> = reader
            .records()
            .map(|r| r.unwrap().iter().map(str::to_owned).collect())
            .collect();
        assert_eq!(read_back, rows);
    }

    #[test]
    fn existing_file_is_overwritten() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("over.csv");
        std::fs::write(&path, "stale,content\n1,2\n3,4\n").unwrap();

        CsvWriter.write_tabular(&[], &columns(&["A"]), &path).unwrap();
        assert_eq!(std::fs::read_to_string(&path).unwrap(), "A\n");
    }

    #[test]
    fn filtered_log_reterminates_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("subset.log");

        write_filtered_log(&["first SRC=1.2.3.4", "second SRC=1.2.3.4"], &path).unwrap();
        assert_eq!(
            std::fs::read_to_string(&path).unwrap(),
            "first SRC=1.2.3.4\nsecond SRC=1.2.3.4\n"
        );
    }

    #[test]
    fn unwritable_destination_is_write_error() {
        let err = CsvWriter
            .write_tabular(&[], &columns(&["A"]), Path::new("/nonexistent/dir/out.csv"))
            .unwrap_err();
        assert!(matches!(err, LogScanError::Write { .. }));
    }
}
