//! 도메인 모델.
//!
//! 주식(Equity), 부동산 펀드(Fund), 사용자, 즐겨찾기, 화면 레이아웃과
//! 갱신 파이프라인에서 사용하는 순수 계산(밸류에이션, 정규화, 랭킹)을 포함합니다.

/// 패치에 값이 있는 필드만 대상에 덮어씁니다.
macro_rules! merge_present {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if $patch.$field.is_some() {
                $target.$field = $patch.$field.clone();
            }
        )+
    };
}

/// `Option<Option<T>>` 패치 필드를 병합합니다. `Some(None)`은 값을 지웁니다.
macro_rules! merge_nullable {
    ($target:expr, $patch:expr; $($field:ident),+ $(,)?) => {
        $(
            if let Some(value) = &$patch.$field {
                $target.$field = value.clone();
            }
        )+
    };
}

mod asset;
mod equity;
mod favorite;
mod fund;
mod lenient;
mod normalize;
mod ranking;
mod user;
mod user_layout;
mod valuation;

pub use asset::*;
pub use equity::*;
pub use favorite::*;
pub use fund::*;
pub use normalize::*;
pub use ranking::*;
pub use user::*;
pub use user_layout::*;
pub use valuation::*;
