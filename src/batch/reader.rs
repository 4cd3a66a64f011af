//! 측정 데이터(CSV/TXT) 읽기.
//!
//! 구분자는 앞부분 샘플로 판정하고, 헤더 이름을 동의어 목록과 대소문자 무시로 비교해
//! 열을 찾는다. 필요한 열을 모두 찾지 못하면 0/1번 열을 위치 기준으로 쓴다.
//! 짧거나 숫자가 아닌 행은 건너뛴다.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use serde::{Deserialize, Serialize};

use super::BatchError;

const SNIFF_BYTES: usize = 2048;

/// 열 이름 동의어 목록.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ColumnSynonyms {
    pub dry_bulb: Vec<String>,
    pub relative_humidity: Vec<String>,
    pub wet_bulb: Vec<String>,
}

fn names(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

impl Default for ColumnSynonyms {
    fn default() -> Self {
        Self {
            dry_bulb: names(&[
                "tbs",
                "t_bulbo_sec",
                "t_bulbo_seco",
                "tbulbo",
                "t_seca",
                "temp",
                "t",
                "tdb",
                "dry_bulb",
            ]),
            relative_humidity: names(&[
                "hr", "humedad", "phi", "phi%", "hum%", "rh", "humidity",
            ]),
            wet_bulb: names(&[
                "tbh",
                "t_humeda",
                "t_bulbo_humedo",
                "wet",
                "tw",
                "twb",
                "wet_bulb",
            ]),
        }
    }
}

/// 두 번째 열이 무엇을 뜻하는지.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InputMode {
    /// 건구온도 + 상대습도
    RelativeHumidity,
    /// 건구온도 + 습구온도
    WetBulb,
}

/// 두 번째 측정값.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum HumidityInput {
    /// 상대습도 (분율 또는 백분율, 계산 시 정규화)
    RelativeHumidity(f64),
    /// 습구온도 [°C]
    WetBulb(f64),
}

/// 파일에서 읽은 한 행.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MeasuredRow {
    /// 원본 파일의 줄 번호 (1부터)
    pub line: u64,
    pub dry_bulb_c: f64,
    pub humidity: HumidityInput,
}

/// 열 위치를 결정한 방식.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnLayout {
    /// 헤더 이름으로 찾음. 헤더 행은 데이터에서 제외한다.
    Named { dry_bulb: usize, humidity: usize },
    /// 0/1번 열 사용. 모든 행을 데이터로 본다.
    Positional,
}

impl ColumnLayout {
    fn indices(&self) -> (usize, usize) {
        match *self {
            ColumnLayout::Named { dry_bulb, humidity } => (dry_bulb, humidity),
            ColumnLayout::Positional => (0, 1),
        }
    }
}

/// 읽기 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct ReadOutcome {
    pub rows: Vec<MeasuredRow>,
    pub layout: ColumnLayout,
    pub delimiter: u8,
    /// 건너뛴 행 수
    pub skipped: usize,
}

/// 샘플에서 구분자를 추정한다: `,` → `;` → 탭 순, 없으면 `,`.
pub fn sniff_delimiter(sample: &[u8]) -> u8 {
    [b',', b';', b'\t']
        .into_iter()
        .find(|d| sample.contains(d))
        .unwrap_or(b',')
}

fn find_column(header: &[String], synonyms: &[String]) -> Option<usize> {
    header
        .iter()
        .position(|col| synonyms.iter().any(|s| s.trim().eq_ignore_ascii_case(col)))
}

/// 헤더 행으로 열 배치를 결정한다.
pub fn resolve_layout(
    header: &csv::StringRecord,
    mode: InputMode,
    synonyms: &ColumnSynonyms,
) -> ColumnLayout {
    let header: Vec<String> = header.iter().map(|h| h.trim().to_string()).collect();
    let humidity_names = match mode {
        InputMode::RelativeHumidity => &synonyms.relative_humidity,
        InputMode::WetBulb => &synonyms.wet_bulb,
    };
    match (
        find_column(&header, &synonyms.dry_bulb),
        find_column(&header, humidity_names),
    ) {
        (Some(dry_bulb), Some(humidity)) => ColumnLayout::Named { dry_bulb, humidity },
        _ => ColumnLayout::Positional,
    }
}

fn parse_row(
    record: &csv::StringRecord,
    layout: ColumnLayout,
    mode: InputMode,
) -> Option<(f64, HumidityInput)> {
    let (i_db, i_h) = layout.indices();
    let dry_bulb = record.get(i_db)?.trim().parse::<f64>().ok()?;
    let value = record.get(i_h)?.trim().parse::<f64>().ok()?;
    let humidity = match mode {
        InputMode::RelativeHumidity => HumidityInput::RelativeHumidity(value),
        InputMode::WetBulb => HumidityInput::WetBulb(value),
    };
    Some((dry_bulb, humidity))
}

/// 구분 텍스트를 읽어 측정 행 목록을 만든다.
pub fn read_samples<R: Read>(
    mut source: R,
    mode: InputMode,
    synonyms: &ColumnSynonyms,
    delimiter: Option<u8>,
) -> Result<ReadOutcome, BatchError> {
    let mut content = Vec::new();
    source.read_to_end(&mut content)?;
    let delimiter =
        delimiter.unwrap_or_else(|| sniff_delimiter(&content[..content.len().min(SNIFF_BYTES)]));

    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .has_headers(false)
        .flexible(true)
        .from_reader(content.as_slice());

    let mut rows = Vec::new();
    let mut skipped = 0;
    let mut layout = None;

    for result in reader.records() {
        let record = match result {
            Ok(r) => r,
            Err(err) => {
                log::warn!("행을 읽지 못해 건너뜀: {err}");
                skipped += 1;
                continue;
            }
        };
        let line = record.position().map(|p| p.line()).unwrap_or(0);

        let current = match layout {
            Some(l) => l,
            None => {
                let resolved = resolve_layout(&record, mode, synonyms);
                layout = Some(resolved);
                log::debug!("열 배치: {resolved:?}");
                if matches!(resolved, ColumnLayout::Named { .. }) {
                    continue;
                }
                resolved
            }
        };

        match parse_row(&record, current, mode) {
            Some((dry_bulb_c, humidity)) => rows.push(MeasuredRow {
                line,
                dry_bulb_c,
                humidity,
            }),
            None => {
                log::warn!("{line}행: 숫자로 읽을 수 없어 건너뜀");
                skipped += 1;
            }
        }
    }

    Ok(ReadOutcome {
        rows,
        layout: layout.unwrap_or(ColumnLayout::Positional),
        delimiter,
        skipped,
    })
}

/// 파일 경로에서 측정 행을 읽는다.
pub fn read_samples_from_path(
    path: &Path,
    mode: InputMode,
    synonyms: &ColumnSynonyms,
    delimiter: Option<u8>,
) -> Result<ReadOutcome, BatchError> {
    let file = File::open(path)?;
    read_samples(BufReader::new(file), mode, synonyms, delimiter)
}
