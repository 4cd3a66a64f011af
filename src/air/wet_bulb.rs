//! 습구온도 계산.
//!
//! 습공기 열수지식에서 얻은 습도비가 시료의 실제 습도비와 같아지는 습구온도를
//! [하한, 건구온도] 구간 이분법으로 찾는다. 부호 변화가 없으면 경험식으로 대체한다.

use serde::{Deserialize, Serialize};

use super::error::PsychroError;
use super::moisture::{humidity_ratio, vapor_pressure_from_humidity_ratio_pa};
use super::saturation::saturation_vapor_pressure_pa;

/// 수렴 판정 허용오차(습도비 차이, kg/kg)
pub const DEFAULT_TOLERANCE: f64 = 0.001;
pub const DEFAULT_MAX_ITERATIONS: usize = 100;
/// 탐색 구간 하한 [°C]
pub const DEFAULT_LOWER_BOUND_C: f64 = -50.0;

// 구간 끝점 자체가 근인지 판단하는 기준. 상대습도 100%에서 f(Tdb)는 반올림 오차 수준이다.
const ENDPOINT_ROOT_EPS: f64 = 1e-12;

/// 이분법 설정.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WetBulbOptions {
    pub tolerance: f64,
    pub max_iterations: usize,
    pub lower_bound_c: f64,
}

impl Default for WetBulbOptions {
    fn default() -> Self {
        Self {
            tolerance: DEFAULT_TOLERANCE,
            max_iterations: DEFAULT_MAX_ITERATIONS,
            lower_bound_c: DEFAULT_LOWER_BOUND_C,
        }
    }
}

/// 습구온도를 얻은 경로.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WetBulbMethod {
    /// |f| < 허용오차로 수렴
    Converged { iterations: usize },
    /// 탐색 구간 끝점이 곧 근 (상대습도 100% 등)
    EndpointRoot,
    /// 반복 한도 도달, 마지막 구간의 중점
    IterationLimit,
    /// 부호 변화가 없어 경험식 Twb ≈ Tdb − (1−HR)(Tdb−14)/3 사용
    EmpiricalFallback,
    /// 입력으로 받은 측정값
    Measured,
}

/// 습구온도 계산 결과.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WetBulbSolution {
    pub temperature_c: f64,
    pub method: WetBulbMethod,
}

impl WetBulbSolution {
    /// 이분법(또는 끝점 근)으로 얻은 값인지 여부. 경험식 값은 근사치이다.
    pub fn is_iterative(&self) -> bool {
        matches!(
            self.method,
            WetBulbMethod::Converged { .. }
                | WetBulbMethod::EndpointRoot
                | WetBulbMethod::IterationLimit
        )
    }
}

/// 습구온도 Twb에서 열수지식이 주는 습도비.
///
/// W = [(2501 − 2.326·Twb)·Ws(Twb) − 1.006·(Tdb − Twb)] / (2501 + 1.86·Tdb − 4.186·Twb)
pub fn humidity_ratio_at_wet_bulb(
    dry_bulb_c: f64,
    wet_bulb_c: f64,
    atmospheric_pressure_kpa: f64,
) -> Result<f64, PsychroError> {
    let pvs_wb = saturation_vapor_pressure_pa(wet_bulb_c)?;
    let ws_wb = humidity_ratio(pvs_wb, atmospheric_pressure_kpa)?;
    let numerator = (2501.0 - 2.326 * wet_bulb_c) * ws_wb - 1.006 * (dry_bulb_c - wet_bulb_c);
    let denominator = 2501.0 + 1.86 * dry_bulb_c - 4.186 * wet_bulb_c;
    Ok(numerator / denominator)
}

/// 목적함수 f(Twb) = W(Twb) − W
pub fn balance_residual(
    dry_bulb_c: f64,
    wet_bulb_c: f64,
    atmospheric_pressure_kpa: f64,
    humidity_ratio: f64,
) -> Result<f64, PsychroError> {
    Ok(humidity_ratio_at_wet_bulb(dry_bulb_c, wet_bulb_c, atmospheric_pressure_kpa)? - humidity_ratio)
}

/// 부호 변화가 없을 때 쓰는 경험식.
pub fn empirical_wet_bulb_c(dry_bulb_c: f64, relative_humidity: f64) -> f64 {
    dry_bulb_c - (1.0 - relative_humidity) * (dry_bulb_c - 14.0) / 3.0
}

/// 이분법으로 습구온도를 구한다.
pub fn solve_wet_bulb(
    dry_bulb_c: f64,
    relative_humidity: f64,
    humidity_ratio: f64,
    atmospheric_pressure_kpa: f64,
    options: &WetBulbOptions,
) -> Result<WetBulbSolution, PsychroError> {
    let f = |t: f64| balance_residual(dry_bulb_c, t, atmospheric_pressure_kpa, humidity_ratio);

    let mut lo = options.lower_bound_c;
    let mut hi = dry_bulb_c;
    let f_lo = f(lo)?;
    let f_hi = f(hi)?;

    if f_hi.abs() < ENDPOINT_ROOT_EPS {
        return Ok(WetBulbSolution {
            temperature_c: hi,
            method: WetBulbMethod::EndpointRoot,
        });
    }
    if f_lo.abs() < ENDPOINT_ROOT_EPS {
        return Ok(WetBulbSolution {
            temperature_c: lo,
            method: WetBulbMethod::EndpointRoot,
        });
    }
    if f_lo * f_hi > 0.0 {
        let temperature_c = empirical_wet_bulb_c(dry_bulb_c, relative_humidity);
        log::debug!(
            "습구온도 근이 [{lo}, {hi}] 구간에 없음, 경험식 사용: Tdb={dry_bulb_c} → {temperature_c:.3}"
        );
        return Ok(WetBulbSolution {
            temperature_c,
            method: WetBulbMethod::EmpiricalFallback,
        });
    }

    for iteration in 1..=options.max_iterations {
        let trial = (lo + hi) / 2.0;
        let error = f(trial)?;
        if error.abs() < options.tolerance {
            return Ok(WetBulbSolution {
                temperature_c: trial,
                method: WetBulbMethod::Converged {
                    iterations: iteration,
                },
            });
        }
        // f는 Twb에 대해 증가한다
        if error > 0.0 {
            hi = trial;
        } else {
            lo = trial;
        }
    }

    log::debug!(
        "습구온도 이분법이 {}회 안에 수렴하지 않음: Tdb={dry_bulb_c}",
        options.max_iterations
    );
    Ok(WetBulbSolution {
        temperature_c: (lo + hi) / 2.0,
        method: WetBulbMethod::IterationLimit,
    })
}

/// 측정 습구온도로부터 역산한 습도 상태.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct WetBulbReading {
    pub humidity_ratio: f64,
    pub vapor_pressure_pa: f64,
    /// 상대습도(분율)
    pub relative_humidity: f64,
}

/// 건구/습구온도로부터 습도비와 상대습도를 구한다.
pub fn humidity_from_wet_bulb(
    dry_bulb_c: f64,
    wet_bulb_c: f64,
    atmospheric_pressure_kpa: f64,
) -> Result<WetBulbReading, PsychroError> {
    if wet_bulb_c > dry_bulb_c {
        return Err(PsychroError::WetBulbAboveDryBulb {
            dry_bulb_c,
            wet_bulb_c,
        });
    }
    let w = humidity_ratio_at_wet_bulb(dry_bulb_c, wet_bulb_c, atmospheric_pressure_kpa)?;
    if w < 0.0 {
        return Err(PsychroError::NegativeHumidityRatio { humidity_ratio: w });
    }
    let pv = vapor_pressure_from_humidity_ratio_pa(w, atmospheric_pressure_kpa);
    let pvs = saturation_vapor_pressure_pa(dry_bulb_c)?;
    Ok(WetBulbReading {
        humidity_ratio: w,
        vapor_pressure_pa: pv,
        relative_humidity: pv / pvs,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::air::atmosphere::atmospheric_pressure_kpa;

    fn sample_w(t: f64, rh: f64, p: f64) -> f64 {
        let pvs = saturation_vapor_pressure_pa(t).unwrap();
        humidity_ratio(rh * pvs, p).unwrap()
    }

    #[test]
    fn saturated_air_returns_dry_bulb() {
        let p = atmospheric_pressure_kpa(2250.0).unwrap();
        let w = sample_w(13.76, 1.0, p);
        let sol = solve_wet_bulb(13.76, 1.0, w, p, &WetBulbOptions::default()).unwrap();
        assert_eq!(sol.method, WetBulbMethod::EndpointRoot);
        assert_eq!(sol.temperature_c, 13.76);
    }

    #[test]
    fn bracketed_case_converges_within_tolerance() {
        let p = 101.325;
        let w = sample_w(25.0, 0.5, p);
        let opts = WetBulbOptions::default();
        let sol = solve_wet_bulb(25.0, 0.5, w, p, &opts).unwrap();
        assert!(matches!(sol.method, WetBulbMethod::Converged { .. }));
        let residual = balance_residual(25.0, sol.temperature_c, p, w).unwrap();
        assert!(residual.abs() < opts.tolerance);
    }

    #[test]
    fn iteration_cap_returns_bracket_midpoint() {
        let p = 101.325;
        let w = sample_w(25.0, 0.5, p);
        let opts = WetBulbOptions {
            tolerance: 0.0,
            max_iterations: 3,
            lower_bound_c: -50.0,
        };
        let sol = solve_wet_bulb(25.0, 0.5, w, p, &opts).unwrap();
        assert_eq!(sol.method, WetBulbMethod::IterationLimit);
        // 중점: -12.5 → 6.25 → 15.625, 모두 근보다 낮으므로 구간 [15.625, 25]
        assert!((sol.temperature_c - 20.3125).abs() < 1e-12);
    }

    #[test]
    fn unbracketed_search_uses_empirical_estimate() {
        let p = 101.325;
        let w = sample_w(-60.0, 0.5, p);
        let sol = solve_wet_bulb(-60.0, 0.5, w, p, &WetBulbOptions::default()).unwrap();
        assert_eq!(sol.method, WetBulbMethod::EmpiricalFallback);
        assert!(!sol.is_iterative());
        assert!((sol.temperature_c - empirical_wet_bulb_c(-60.0, 0.5)).abs() < 1e-12);
    }

    #[test]
    fn wet_bulb_reading_rejects_wet_above_dry() {
        let err = humidity_from_wet_bulb(20.0, 21.0, 101.325).unwrap_err();
        assert!(matches!(err, PsychroError::WetBulbAboveDryBulb { .. }));
    }

    #[test]
    fn wet_bulb_equal_to_dry_bulb_is_saturated() {
        let reading = humidity_from_wet_bulb(20.0, 20.0, 101.325).unwrap();
        assert!((reading.relative_humidity - 1.0).abs() < 1e-9);
    }
}
