use super::error::PsychroError;
use crate::units::pressure::{kpa_to_pa, pa_to_kpa};

/// 수증기/건공기 분자량 비
pub const MOLAR_MASS_RATIO: f64 = 0.621945;
/// 건공기 기체상수 [J/(kg·K)]
pub const R_DRY_AIR: f64 = 287.055;

/// 실제 수증기 분압(Pa) = 상대습도(분율) × 포화수증기압(Pa)
pub fn vapor_pressure_pa(relative_humidity: f64, saturation_pressure_pa: f64) -> f64 {
    relative_humidity * saturation_pressure_pa
}

/// 수증기압 부족량(Pa)
pub fn vapor_pressure_deficit_pa(saturation_pressure_pa: f64, vapor_pressure_pa: f64) -> f64 {
    saturation_pressure_pa - vapor_pressure_pa
}

/// 습도비 W [kg수증기/kg건공기].
///
/// W = 0.621945 * pv / (P - pv), pv는 Pa로 받아 kPa로 환산한다.
/// pv ≥ P 이면 분모가 0 이하가 되므로 오류를 반환한다.
pub fn humidity_ratio(
    vapor_pressure_pa: f64,
    atmospheric_pressure_kpa: f64,
) -> Result<f64, PsychroError> {
    let pv_kpa = pa_to_kpa(vapor_pressure_pa);
    if pv_kpa >= atmospheric_pressure_kpa {
        return Err(PsychroError::VaporPressureAtOrAboveAtmospheric {
            vapor_pressure_kpa: pv_kpa,
            atmospheric_pressure_kpa,
        });
    }
    Ok(MOLAR_MASS_RATIO * (pv_kpa / (atmospheric_pressure_kpa - pv_kpa)))
}

/// 습도비로부터 수증기 분압(Pa)을 역산한다.
pub fn vapor_pressure_from_humidity_ratio_pa(
    humidity_ratio: f64,
    atmospheric_pressure_kpa: f64,
) -> f64 {
    kpa_to_pa(atmospheric_pressure_kpa * humidity_ratio / (MOLAR_MASS_RATIO + humidity_ratio))
}

/// 포화도 μ = W / Ws. Ws가 0이면 `None`.
pub fn degree_of_saturation(humidity_ratio: f64, saturation_humidity_ratio: f64) -> Option<f64> {
    if saturation_humidity_ratio == 0.0 {
        None
    } else {
        Some(humidity_ratio / saturation_humidity_ratio)
    }
}

/// 습공기 비체적 [m³/kg건공기]
pub fn specific_volume(
    absolute_temperature_k: f64,
    atmospheric_pressure_kpa: f64,
    humidity_ratio: f64,
) -> f64 {
    (R_DRY_AIR * absolute_temperature_k) / kpa_to_pa(atmospheric_pressure_kpa)
        * ((1.0 + 1.6087 * humidity_ratio) / (1.0 + humidity_ratio))
}

/// 습공기 비엔탈피 [kJ/kg건공기]
pub fn enthalpy_kj_per_kg(dry_bulb_c: f64, humidity_ratio: f64) -> f64 {
    1.006 * dry_bulb_c + humidity_ratio * (2501.0 + 1.805 * dry_bulb_c)
}
