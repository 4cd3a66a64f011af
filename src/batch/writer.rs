use std::fs::File;
use std::io::Write;
use std::path::Path;

use serde::Serialize;

use super::{BatchError, BatchRecord};
use crate::air::DerivedState;

/// 출력 열 이름. [`ResultRow`] 필드 순서와 같다.
pub const COLUMNS: [&str; 13] = [
    "Tbs_C", "HR_frac", "patm_kPa", "pv_Pa", "pvs_Pa", "dpva_Pa", "W_kgkg", "Ws_kgkg", "mu",
    "veh_m3kg", "h_kJkg", "Tpr_C", "Tbh_C",
];

/// 출력 파일의 한 행. 값이 없는 항목은 빈 칸으로 쓴다.
#[derive(Debug, Clone, Serialize)]
pub struct ResultRow {
    pub dry_bulb_c: f64,
    pub relative_humidity: f64,
    pub atmospheric_pressure_kpa: f64,
    pub vapor_pressure_pa: f64,
    pub saturation_vapor_pressure_pa: f64,
    pub vapor_pressure_deficit_pa: f64,
    pub humidity_ratio: f64,
    pub saturation_humidity_ratio: f64,
    pub degree_of_saturation: Option<f64>,
    pub specific_volume_m3_per_kg: f64,
    pub enthalpy_kj_per_kg: f64,
    pub dew_point_c: Option<f64>,
    pub wet_bulb_c: f64,
}

impl From<&DerivedState> for ResultRow {
    fn from(s: &DerivedState) -> Self {
        Self {
            dry_bulb_c: s.sample.dry_bulb_c,
            relative_humidity: s.sample.relative_humidity,
            atmospheric_pressure_kpa: s.atmospheric_pressure_kpa,
            vapor_pressure_pa: s.vapor_pressure_pa,
            saturation_vapor_pressure_pa: s.saturation_vapor_pressure_pa,
            vapor_pressure_deficit_pa: s.vapor_pressure_deficit_pa,
            humidity_ratio: s.humidity_ratio,
            saturation_humidity_ratio: s.saturation_humidity_ratio,
            degree_of_saturation: s.degree_of_saturation,
            specific_volume_m3_per_kg: s.specific_volume_m3_per_kg,
            enthalpy_kj_per_kg: s.enthalpy_kj_per_kg,
            dew_point_c: s.dew_point_c,
            wet_bulb_c: s.wet_bulb_c,
        }
    }
}

/// 성공한 행만 CSV로 쓴다. 쓴 행 수를 반환한다.
pub fn write_results<W: Write>(sink: W, records: &[BatchRecord]) -> Result<usize, BatchError> {
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(sink);
    writer.write_record(COLUMNS)?;
    let mut written = 0;
    for record in records {
        match &record.outcome {
            Ok(state) => {
                writer.serialize(ResultRow::from(state))?;
                written += 1;
            }
            Err(err) => log::warn!("{}행 결과 생략: {err}", record.input.line),
        }
    }
    writer.flush()?;
    Ok(written)
}

/// 결과를 파일로 쓴다.
pub fn write_results_to_path(path: &Path, records: &[BatchRecord]) -> Result<usize, BatchError> {
    write_results(File::create(path)?, records)
}
