//! 단위 정의 및 변환 모듈 모음.

pub mod pressure;
pub mod temperature;

pub use pressure::PressureUnit;
pub use temperature::TemperatureUnit;

/// 알 수 없는 단위 문자열.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnitParseError(pub String);

impl std::fmt::Display for UnitParseError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "알 수 없는 단위: {}", self.0)
    }
}

impl std::error::Error for UnitParseError {}
