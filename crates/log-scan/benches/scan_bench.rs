//! 스캔 엔진 벤치마크
//!
//! 라인 매칭, 파일 스캔, 포트 집계의 처리량을 측정합니다.

use std::io::{Cursor, Write};

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use logsift_log_scan::campaign::{DESTINATION_PORT_PATTERN, invalid_user_spec, port_report_spec};
use logsift_log_scan::scanner::scan_reader;
use logsift_log_scan::{CaseMode, PatternMatcher, tally};

/// UFW 차단 로그 한 줄
const FIREWALL_LINE: &str = "Dec 12 09:15:42 myth kernel: [UFW BLOCK] IN=enp0s3 OUT= MAC=08:00:27:a4:1b:2c SRC=220.195.35.40 DST=192.168.0.10 LEN=40 TOS=0x00 PREC=0x00 TTL=240 ID=54321 PROTO=TCP SPT=44444 DPT=80 WINDOW=1024 RES=0x00 SYN URGP=0";

/// sshd 로그인 실패 로그 한 줄
const SSHD_LINE: &str =
    "Dec 12 10:00:01 myth sshd[1201]: Invalid user admin from 203.0.113.7 port 50522";

fn sample_log(lines: usize) -> Vec<u8> {
    let mut buf = Vec::new();
    for i in 0..lines {
        let line = if i % 10 == 0 { SSHD_LINE } else { FIREWALL_LINE };
        writeln!(buf, "{line}").unwrap();
    }
    buf
}

fn bench_match_line(c: &mut Criterion) {
    let mut group = c.benchmark_group("match_line");
    group.throughput(Throughput::Elements(1));

    let dpt = PatternMatcher::new(DESTINATION_PORT_PATTERN, CaseMode::Sensitive).unwrap();
    group.bench_function("destination_port", |b| {
        b.iter(|| dpt.match_line(black_box(FIREWALL_LINE)))
    });

    let port_spec = port_report_spec("80").unwrap();
    group.bench_function("port_report_row", |b| {
        b.iter(|| port_spec.matcher().match_line(black_box(FIREWALL_LINE)))
    });

    let user_spec = invalid_user_spec().unwrap();
    group.bench_function("invalid_user_row", |b| {
        b.iter(|| user_spec.matcher().match_line(black_box(SSHD_LINE)))
    });

    let insensitive = PatternMatcher::new("error", CaseMode::Insensitive).unwrap();
    group.bench_function("case_insensitive_miss", |b| {
        b.iter(|| insensitive.match_line(black_box(FIREWALL_LINE)))
    });

    group.finish();
}

fn bench_scan(c: &mut Criterion) {
    let mut group = c.benchmark_group("scan_reader");
    let matcher = PatternMatcher::new(r"SRC=(.*?) DST=(.*?) LEN=(\d+)", CaseMode::Insensitive)
        .unwrap();

    for lines in [1_000usize, 10_000] {
        let log = sample_log(lines);
        group.throughput(Throughput::Elements(lines as u64));
        group.bench_with_input(BenchmarkId::from_parameter(lines), &log, |b, log| {
            b.iter(|| scan_reader(Cursor::new(black_box(log.as_slice())), &matcher).unwrap())
        });
    }

    group.finish();
}

fn bench_tally(c: &mut Criterion) {
    let mut group = c.benchmark_group("tally");
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("gateway.log");
    std::fs::write(&path, sample_log(10_000)).unwrap();
    let dpt = PatternMatcher::new(DESTINATION_PORT_PATTERN, CaseMode::Sensitive).unwrap();

    group.throughput(Throughput::Elements(10_000));
    group.bench_function("destination_port_10000", |b| {
        b.iter(|| tally(black_box(&path), &dpt).unwrap())
    });

    group.finish();
}

criterion_group!(benches, bench_match_line, bench_scan, bench_tally);
criterion_main!(benches);
