//! 습공기 선도용 격자 데이터.
//!
//! 상대습도 곡선(행) × 건구온도 축(열)으로 물성을 계산해 둔다. 그리기는 하지 않으며
//! 외부 도구가 등엔탈피/등습구/등비체적 선을 그릴 수 있도록 계열 데이터만 제공한다.

use std::io::Write;

use serde::{Deserialize, Serialize};

use crate::air::{self, DerivedState, InputSample, WetBulbOptions};
use crate::batch::{BatchError, ResultRow, COLUMNS};

/// 격자 축 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ChartAxes {
    pub dry_bulb_start_c: f64,
    pub dry_bulb_end_c: f64,
    pub dry_bulb_step_c: f64,
    pub relative_humidity_start_pct: f64,
    pub relative_humidity_end_pct: f64,
    pub relative_humidity_step_pct: f64,
}

impl Default for ChartAxes {
    fn default() -> Self {
        Self {
            dry_bulb_start_c: 0.0,
            dry_bulb_end_c: 40.0,
            dry_bulb_step_c: 5.0,
            relative_humidity_start_pct: 10.0,
            relative_humidity_end_pct: 100.0,
            relative_humidity_step_pct: 10.0,
        }
    }
}

/// 축 하나가 가질 수 있는 최대 점 수
pub const MAX_AXIS_POINTS: usize = 10_000;

/// 축 설정 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum ChartError {
    /// 시작/끝/간격 중 유한하지 않은 값
    NonFiniteAxis(&'static str),
    /// 간격이 너무 작아 점이 지나치게 많음
    TooManyPoints { axis: &'static str, points: f64 },
}

impl std::fmt::Display for ChartError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ChartError::NonFiniteAxis(axis) => {
                write!(f, "{axis} 축 설정에 유한하지 않은 값이 있습니다")
            }
            ChartError::TooManyPoints { axis, points } => write!(
                f,
                "{axis} 축의 점 수({points:.0})가 최대 {MAX_AXIS_POINTS}개를 넘습니다"
            ),
        }
    }
}

impl std::error::Error for ChartError {}

/// start부터 end까지(포함) step 간격 값. step이 0 이하이면 start만 반환한다.
pub fn axis_values(
    axis: &'static str,
    start: f64,
    end: f64,
    step: f64,
) -> Result<Vec<f64>, ChartError> {
    if !(start.is_finite() && end.is_finite() && step.is_finite()) {
        return Err(ChartError::NonFiniteAxis(axis));
    }
    if step <= 0.0 || end < start {
        return Ok(vec![start]);
    }
    let intervals = ((end - start) / step + 1e-9).floor();
    if !intervals.is_finite() || intervals + 1.0 > MAX_AXIS_POINTS as f64 {
        return Err(ChartError::TooManyPoints {
            axis,
            points: intervals + 1.0,
        });
    }
    let n = intervals as usize;
    Ok((0..=n).map(|i| start + step * i as f64).collect())
}

/// 선도에 표시할 물성.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartProperty {
    HumidityRatio,
    Enthalpy,
    SpecificVolume,
    WetBulb,
}

impl ChartProperty {
    pub fn value(&self, state: &DerivedState) -> f64 {
        match self {
            ChartProperty::HumidityRatio => state.humidity_ratio,
            ChartProperty::Enthalpy => state.enthalpy_kj_per_kg,
            ChartProperty::SpecificVolume => state.specific_volume_m3_per_kg,
            ChartProperty::WetBulb => state.wet_bulb_c,
        }
    }
}

/// 상대습도 하나에 대한 계열.
#[derive(Debug, Clone, PartialEq)]
pub struct IsoLine {
    /// 상대습도(분율)
    pub relative_humidity: f64,
    /// 건구온도 축 순서의 값. 계산 실패 칸은 `None`.
    pub values: Vec<Option<f64>>,
}

/// 선도 격자.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartGrid {
    pub elevation_m: f64,
    pub dry_bulb_c: Vec<f64>,
    /// 상대습도(분율)
    pub relative_humidity: Vec<f64>,
    /// `cells[rh][tdb]`
    pub cells: Vec<Vec<Option<DerivedState>>>,
}

impl ChartGrid {
    /// 축 설정이 유효하지 않으면 오류. 개별 칸의 계산 실패는 `None`으로 남긴다.
    pub fn generate(
        elevation_m: f64,
        axes: &ChartAxes,
        options: &WetBulbOptions,
    ) -> Result<Self, ChartError> {
        let dry_bulb_c = axis_values(
            "건구온도",
            axes.dry_bulb_start_c,
            axes.dry_bulb_end_c,
            axes.dry_bulb_step_c,
        )?;
        let relative_humidity: Vec<f64> = axis_values(
            "상대습도",
            axes.relative_humidity_start_pct,
            axes.relative_humidity_end_pct,
            axes.relative_humidity_step_pct,
        )?
        .into_iter()
        .map(|pct| pct / 100.0)
        .collect();

        let cells = relative_humidity
            .iter()
            .map(|&rh| {
                dry_bulb_c
                    .iter()
                    .map(|&t| {
                        let state = InputSample::from_fraction(elevation_m, t, rh)
                            .map_err(air::DerivationError::from)
                            .and_then(|s| air::derive_state_with(&s, options));
                        match state {
                            Ok(s) => Some(s),
                            Err(err) => {
                                log::warn!("선도 격자 ({t}°C, {rh}) 계산 실패: {err}");
                                None
                            }
                        }
                    })
                    .collect()
            })
            .collect();

        Ok(Self {
            elevation_m,
            dry_bulb_c,
            relative_humidity,
            cells,
        })
    }

    /// 상대습도별 계열을 만든다.
    pub fn iso_lines(&self, property: ChartProperty) -> Vec<IsoLine> {
        self.relative_humidity
            .iter()
            .zip(&self.cells)
            .map(|(&rh, row)| IsoLine {
                relative_humidity: rh,
                values: row
                    .iter()
                    .map(|cell| cell.as_ref().map(|s| property.value(s)))
                    .collect(),
            })
            .collect()
    }

    /// 격자를 긴 형식 CSV(칸당 한 행)로 쓴다.
    pub fn write_csv<W: Write>(&self, sink: W) -> Result<usize, BatchError> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .from_writer(sink);
        writer.write_record(COLUMNS)?;
        let mut written = 0;
        for state in self.cells.iter().flatten().flatten() {
            writer.serialize(ResultRow::from(state))?;
            written += 1;
        }
        writer.flush()?;
        Ok(written)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn axis_includes_end_point() {
        assert_eq!(axis_values("t", 0.0, 40.0, 5.0).unwrap().len(), 9);
        assert_eq!(
            axis_values("rh", 10.0, 100.0, 10.0).unwrap().last(),
            Some(&100.0)
        );
        assert_eq!(axis_values("t", 5.0, 5.0, 0.0).unwrap(), vec![5.0]);
    }

    #[test]
    fn tiny_step_is_rejected() {
        let axes = ChartAxes {
            dry_bulb_step_c: 1e-300,
            ..ChartAxes::default()
        };
        let err = ChartGrid::generate(0.0, &axes, &WetBulbOptions::default()).unwrap_err();
        assert!(matches!(err, ChartError::TooManyPoints { .. }));
    }

    #[test]
    fn non_finite_axis_is_rejected() {
        let axes = ChartAxes {
            relative_humidity_end_pct: f64::INFINITY,
            ..ChartAxes::default()
        };
        let err = ChartGrid::generate(0.0, &axes, &WetBulbOptions::default()).unwrap_err();
        assert_eq!(err, ChartError::NonFiniteAxis("상대습도"));
        assert!(axis_values("t", f64::NAN, 1.0, 1.0).is_err());
    }

    #[test]
    fn saturation_line_wet_bulb_equals_dry_bulb() {
        let grid =
            ChartGrid::generate(0.0, &ChartAxes::default(), &WetBulbOptions::default()).unwrap();
        assert_eq!(grid.cells.len(), 10);
        assert!(grid.cells.iter().all(|row| row.len() == 9));

        let lines = grid.iso_lines(ChartProperty::WetBulb);
        let saturated = lines.last().unwrap();
        assert_eq!(saturated.relative_humidity, 1.0);
        for (value, &t) in saturated.values.iter().zip(&grid.dry_bulb_c) {
            assert_eq!(*value, Some(t));
        }
    }

    #[test]
    fn humidity_ratio_grows_along_each_line() {
        let grid = ChartGrid::generate(2250.0, &ChartAxes::default(), &WetBulbOptions::default())
            .unwrap();
        for line in grid.iso_lines(ChartProperty::HumidityRatio) {
            let values: Vec<f64> = line.values.iter().flatten().copied().collect();
            assert_eq!(values.len(), grid.dry_bulb_c.len());
            assert!(values.windows(2).all(|w| w[1] > w[0]));
        }
    }

    #[test]
    fn failed_cells_are_left_empty() {
        let axes = ChartAxes {
            dry_bulb_start_c: 190.0,
            dry_bulb_end_c: 210.0,
            dry_bulb_step_c: 10.0,
            ..ChartAxes::default()
        };
        let grid = ChartGrid::generate(0.0, &axes, &WetBulbOptions::default()).unwrap();
        assert!(grid.cells.iter().all(|row| row[2].is_none()));
    }
}
