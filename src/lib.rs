//! 습공기 물성 계산 로직을 라이브러리로 분리하여 CLI 뿐 아니라 일괄 처리·선도 생성에서도 재사용한다.

pub mod air;
pub mod app;
pub mod batch;
pub mod chart;
pub mod config;
pub mod units;

pub use air::{derive_state, derive_state_from_wet_bulb, DerivationError, DerivedState};
