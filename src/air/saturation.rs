//! 포화수증기압(Hyland-Wexler 형) 상관식.
//! 입력: 온도(°C), 출력: 포화수증기압(Pa)

use super::atmosphere::absolute_temperature_k;
use super::error::PsychroError;

/// 얼음 포화 상관식 하한 [°C]
pub const ICE_RANGE_MIN_C: f64 = -100.0;
/// 얼음/물 경계 [°C]. 0°C는 물 쪽에 속한다.
pub const FREEZING_POINT_C: f64 = 0.0;
/// 물 포화 상관식 상한(미포함) [°C]
pub const LIQUID_RANGE_MAX_C: f64 = 200.0;

// ln(pws) = C1/T + C2 + C3*T + C4*T^2 + C5*T^3 + C6*T^4 + C7*ln(T)
const ICE_C: [f64; 7] = [
    -5.674_535_9e3,
    6.392_524_7,
    -9.677_843_0e-3,
    6.221_570_1e-7,
    2.074_782_5e-9,
    -9.484_024e-13,
    4.163_501_9,
];

// ln(pws) = C8/T + C9 + C10*T + C11*T^2 + C12*T^3 + C13*ln(T)
const LIQUID_C: [f64; 6] = [
    -5.800_220_6e3,
    1.391_499_3,
    -4.864_023_9e-2,
    4.176_476_8e-5,
    -1.445_209_3e-8,
    6.545_967_3,
];

/// 포화 상관식 선택 영역.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaturationRegime {
    /// -100 ≤ T < 0 °C, 얼음 포화
    Ice,
    /// 0 ≤ T < 200 °C, 물 포화
    Liquid,
}

impl SaturationRegime {
    /// 온도가 속하는 영역을 반환한다. 범위 밖이면 `None`.
    pub fn for_temperature(t_c: f64) -> Option<Self> {
        if (ICE_RANGE_MIN_C..FREEZING_POINT_C).contains(&t_c) {
            Some(SaturationRegime::Ice)
        } else if (FREEZING_POINT_C..LIQUID_RANGE_MAX_C).contains(&t_c) {
            Some(SaturationRegime::Liquid)
        } else {
            None
        }
    }

    fn ln_pressure_pa(self, t_k: f64) -> f64 {
        match self {
            SaturationRegime::Ice => {
                let c = &ICE_C;
                c[0] / t_k
                    + c[1]
                    + c[2] * t_k
                    + c[3] * t_k.powi(2)
                    + c[4] * t_k.powi(3)
                    + c[5] * t_k.powi(4)
                    + c[6] * t_k.ln()
            }
            SaturationRegime::Liquid => {
                let c = &LIQUID_C;
                c[0] / t_k
                    + c[1]
                    + c[2] * t_k
                    + c[3] * t_k.powi(2)
                    + c[4] * t_k.powi(3)
                    + c[5] * t_k.ln()
            }
        }
    }
}

/// 온도(°C)에서의 포화수증기압(Pa).
///
/// 시료 자신의 건구온도와 습구온도 탐색 중의 시험 온도 모두 같은 함수로 계산한다.
pub fn saturation_vapor_pressure_pa(t_c: f64) -> Result<f64, PsychroError> {
    let regime =
        SaturationRegime::for_temperature(t_c).ok_or(PsychroError::TemperatureOutOfRange {
            temperature_c: t_c,
            min_c: ICE_RANGE_MIN_C,
            max_c: LIQUID_RANGE_MAX_C,
        })?;
    Ok(regime.ln_pressure_pa(absolute_temperature_k(t_c)).exp())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn freezing_point_uses_liquid_branch() {
        assert_eq!(
            SaturationRegime::for_temperature(0.0),
            Some(SaturationRegime::Liquid)
        );
        assert_eq!(
            SaturationRegime::for_temperature(-1e-9),
            Some(SaturationRegime::Ice)
        );
    }

    #[test]
    fn range_is_half_open() {
        assert_eq!(
            SaturationRegime::for_temperature(-100.0),
            Some(SaturationRegime::Ice)
        );
        assert_eq!(SaturationRegime::for_temperature(200.0), None);
        assert_eq!(SaturationRegime::for_temperature(f64::NAN), None);
        assert!(saturation_vapor_pressure_pa(200.0).is_err());
        assert!(saturation_vapor_pressure_pa(-100.5).is_err());
    }

    #[test]
    fn triple_point_value() {
        // ASHRAE: 0°C에서 약 611.2 Pa
        let p = saturation_vapor_pressure_pa(0.0).unwrap();
        assert!((p - 611.21).abs() < 0.1, "p={p}");
        let p20 = saturation_vapor_pressure_pa(20.0).unwrap();
        assert!((p20 - 2338.8).abs() < 0.5, "p20={p20}");
    }
}
