//! 스캔 도메인 타입
//!
//! 캡처 튜플, 라인 매칭 결과, 리포트 행을 정의합니다.
//! 캡처 값은 숫자처럼 보이더라도(포트 번호 등) 모두 문자열로 유지합니다.

use serde::Serialize;

/// 하나의 로그 라인에서 캡처 그룹으로 추출한 필드 목록
///
/// 길이는 패턴의 캡처 그룹 수와 항상 같습니다.
/// 매칭에 참여하지 않은 그룹은 생략하지 않고 `None`으로 표현합니다.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CaptureTuple(Vec<Option<String>>);

impl CaptureTuple {
    /// 필드 목록으로 캡처 튜플을 생성합니다.
    pub fn new(fields: Vec<Option<String>>) -> Self {
        Self(fields)
    }

    /// 필드 수 (패턴의 캡처 그룹 수)
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// 캡처 그룹이 없는 패턴의 결과인지 여부
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// `index`번째 필드를 반환합니다. 매칭되지 않은 그룹이면 `None`입니다.
    pub fn get(&self, index: usize) -> Option<&str> {
        self.0.get(index).and_then(|f| f.as_deref())
    }

    /// 문자열 필드 목록으로 변환합니다. 매칭되지 않은 그룹은 빈 문자열이 됩니다.
    pub fn into_fields(self) -> Vec<String> {
        self.0.into_iter().map(Option::unwrap_or_default).collect()
    }
}

/// 단일 라인에 대한 패턴 매칭 결과
///
/// 라인 원문은 매칭 동안에만 빌려 쓰며, 스캐너가 즉시 소비합니다.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchResult<'a> {
    /// 매칭 여부
    pub matched: bool,
    /// 종결자를 제외한 라인 원문
    pub raw_line: &'a str,
    /// 캡처 필드 (그룹이 없거나 매칭 실패 시 비어 있음)
    pub captures: CaptureTuple,
}

impl<'a> MatchResult<'a> {
    /// 매칭되지 않은 결과
    pub fn no_match(raw_line: &'a str) -> Self {
        Self {
            matched: false,
            raw_line,
            captures: CaptureTuple::default(),
        }
    }
}

/// 리포트 한 행
///
/// 필드 수는 해당 리포트의 컬럼 스키마 길이와 같습니다.
pub type ReportRow = Vec<String>;
