//! 습공기(건구온도·상대습도·고도) 물성 계산 모듈을 모아둔다.
//! 기압 → 포화수증기압 → 습도비 → 비체적/엔탈피 → 이슬점 → 습구온도 순으로 계산한다.

pub mod atmosphere;
pub mod dew_point;
pub mod error;
pub mod humid_air;
pub mod moisture;
pub mod saturation;
pub mod wet_bulb;

pub use error::PsychroError;
pub use humid_air::*;
pub use wet_bulb::{WetBulbMethod, WetBulbOptions, WetBulbSolution};
