//! # 데이터 모델 모듈
//!
//! 애플리케이션에서 사용하는 데이터 구조체(struct)들을 정의합니다.
//! 각 하위 모듈은 특정 도메인의 데이터 타입을 담당합니다:
//! - `review`: 과목 리뷰와 리뷰 작성/수정/삭제 요청
//! - `subject`: 과목(Subject)
//! - `user`: 사용자(User). 이 서비스에서는 표시 이름 조회에만 씁니다.
//! - `version`: 세 종류의 버전 로그, 통합 이력 항목, 동작(action) 태그
//!
//! `pub use X::*;`로 하위 모듈의 항목을 재공개하므로
//! `crate::models::version::PageVersion` 대신 `crate::models::PageVersion`으로 접근할 수 있습니다.

pub mod review;
pub mod subject;
pub mod user;
pub mod version;

pub use review::*;
pub use subject::*;
pub use user::*;
pub use version::*;
