/// 이슬점 상관식 선택 영역. 건구온도 기준으로 고른다.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DewPointRange {
    /// -60 ≤ Tdb < 0 °C
    BelowFreezing,
    /// 0 ≤ Tdb < 70 °C
    AboveFreezing,
}

impl DewPointRange {
    pub fn for_dry_bulb(dry_bulb_c: f64) -> Option<Self> {
        if (-60.0..0.0).contains(&dry_bulb_c) {
            Some(DewPointRange::BelowFreezing)
        } else if (0.0..70.0).contains(&dry_bulb_c) {
            Some(DewPointRange::AboveFreezing)
        } else {
            None
        }
    }

    fn evaluate(self, ln_pv: f64) -> f64 {
        match self {
            DewPointRange::BelowFreezing => -60.450 + 7.0322 * ln_pv + 0.3700 * ln_pv.powi(2),
            DewPointRange::AboveFreezing => -35.957 - 1.8726 * ln_pv + 1.1689 * ln_pv.powi(2),
        }
    }
}

/// 이슬점 온도(°C).
///
/// 건구온도가 두 범위 밖이거나 수증기 분압이 0 이하(ln 정의 불가)이면 `None`을 반환하며
/// 전체 계산은 계속 진행된다.
pub fn dew_point_c(dry_bulb_c: f64, vapor_pressure_pa: f64) -> Option<f64> {
    if vapor_pressure_pa <= 0.0 {
        return None;
    }
    DewPointRange::for_dry_bulb(dry_bulb_c).map(|range| range.evaluate(vapor_pressure_pa.ln()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outside_ranges_yields_none() {
        assert_eq!(dew_point_c(70.0, 1000.0), None);
        assert_eq!(dew_point_c(-60.5, 1.0), None);
        assert_eq!(dew_point_c(25.0, 0.0), None);
    }

    #[test]
    fn boundaries_pick_expected_range() {
        assert_eq!(
            DewPointRange::for_dry_bulb(0.0),
            Some(DewPointRange::AboveFreezing)
        );
        assert_eq!(
            DewPointRange::for_dry_bulb(-60.0),
            Some(DewPointRange::BelowFreezing)
        );
    }
}
