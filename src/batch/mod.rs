//! 측정 파일 일괄 처리: 읽기 → 시료별 물성 계산 → CSV 쓰기.
//! 한 행의 실패는 그 행에만 기록되며 전체 처리를 멈추지 않는다.

pub mod reader;
pub mod writer;

use std::path::Path;

pub use reader::{
    read_samples, read_samples_from_path, ColumnLayout, ColumnSynonyms, HumidityInput, InputMode,
    MeasuredRow, ReadOutcome,
};
pub use writer::{write_results, write_results_to_path, ResultRow, COLUMNS};

use crate::air::{self, DerivationError, DerivedState, InputSample, WetBulbOptions};

/// 파일 단위로 처리를 멈추게 하는 오류.
#[derive(Debug)]
pub enum BatchError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// CSV 처리 오류
    Csv(csv::Error),
}

impl std::fmt::Display for BatchError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BatchError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            BatchError::Csv(e) => write!(f, "CSV 처리 오류: {e}"),
        }
    }
}

impl std::error::Error for BatchError {}

impl From<std::io::Error> for BatchError {
    fn from(value: std::io::Error) -> Self {
        BatchError::Io(value)
    }
}

impl From<csv::Error> for BatchError {
    fn from(value: csv::Error) -> Self {
        BatchError::Csv(value)
    }
}

/// 입력 행과 그 계산 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchRecord {
    pub input: MeasuredRow,
    pub outcome: Result<DerivedState, DerivationError>,
}

/// 파일 처리 결과 요약.
#[derive(Debug, Clone, PartialEq)]
pub struct BatchReport {
    /// 입력 순서를 유지한다
    pub records: Vec<BatchRecord>,
    /// 읽기 단계에서 건너뛴 행 수
    pub skipped_rows: usize,
}

impl BatchReport {
    pub fn succeeded(&self) -> usize {
        self.records.iter().filter(|r| r.outcome.is_ok()).count()
    }

    pub fn failed(&self) -> usize {
        self.records.len() - self.succeeded()
    }

    /// 성공한 상태만 입력 순서대로.
    pub fn states(&self) -> impl Iterator<Item = &DerivedState> {
        self.records.iter().filter_map(|r| r.outcome.as_ref().ok())
    }
}

/// 한 행을 계산한다.
pub fn derive_row(
    row: &MeasuredRow,
    elevation_m: f64,
    options: &WetBulbOptions,
) -> Result<DerivedState, DerivationError> {
    match row.humidity {
        HumidityInput::RelativeHumidity(rh) => {
            let sample = InputSample::new(elevation_m, row.dry_bulb_c, rh)?;
            air::derive_state_with(&sample, options)
        }
        HumidityInput::WetBulb(twb) => {
            air::derive_state_from_wet_bulb(elevation_m, row.dry_bulb_c, twb).map(|d| d.state)
        }
    }
}

/// 모든 행을 순서대로 계산한다.
pub fn run_batch(
    rows: &[MeasuredRow],
    elevation_m: f64,
    options: &WetBulbOptions,
) -> Vec<BatchRecord> {
    rows.iter()
        .map(|row| {
            let outcome = derive_row(row, elevation_m, options);
            if let Err(err) = &outcome {
                log::warn!("{}행 계산 실패: {err}", row.line);
            }
            BatchRecord {
                input: *row,
                outcome,
            }
        })
        .collect()
}

/// 파일 설정 묶음.
#[derive(Debug, Clone)]
pub struct BatchSettings<'a> {
    pub elevation_m: f64,
    pub mode: InputMode,
    pub synonyms: &'a ColumnSynonyms,
    pub delimiter: Option<u8>,
    pub options: WetBulbOptions,
}

/// 파일을 읽어 계산하고, 출력 경로가 있으면 결과를 쓴다.
pub fn process_file(
    input: &Path,
    output: Option<&Path>,
    settings: &BatchSettings<'_>,
) -> Result<BatchReport, BatchError> {
    let outcome = read_samples_from_path(
        input,
        settings.mode,
        settings.synonyms,
        settings.delimiter,
    )?;
    let records = run_batch(&outcome.rows, settings.elevation_m, &settings.options);
    let report = BatchReport {
        records,
        skipped_rows: outcome.skipped,
    };
    log::info!(
        "{}: 계산 {}건, 실패 {}건, 건너뜀 {}행",
        input.display(),
        report.succeeded(),
        report.failed(),
        report.skipped_rows
    );
    if let Some(path) = output {
        write_results_to_path(path, &report.records)?;
    }
    Ok(report)
}
