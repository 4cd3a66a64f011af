use super::error::PsychroError;
use crate::units::temperature;

/// 해수면 표준 대기압 [kPa]
pub const SEA_LEVEL_PRESSURE_KPA: f64 = 101.325;
const LAPSE_COEFF_PER_M: f64 = 2.25577e-5;
const BAROMETRIC_EXPONENT: f64 = 5.2529;

/// 고도(m)로부터 대기압(kPa)을 구한다.
///
/// P = 101.325 * (1 - 2.25577e-5 * z)^5.2529
/// 약 44.3 km 이상에서는 밑이 0 이하가 되므로 오류를 반환한다.
pub fn atmospheric_pressure_kpa(elevation_m: f64) -> Result<f64, PsychroError> {
    let base = 1.0 - LAPSE_COEFF_PER_M * elevation_m;
    if !elevation_m.is_finite() || base <= 0.0 {
        return Err(PsychroError::ElevationOutOfRange { elevation_m });
    }
    Ok(SEA_LEVEL_PRESSURE_KPA * base.powf(BAROMETRIC_EXPONENT))
}

/// 건구온도(°C)를 절대온도(K)로 바꾼다.
pub fn absolute_temperature_k(dry_bulb_c: f64) -> f64 {
    temperature::celsius_to_kelvin(dry_bulb_c)
}
