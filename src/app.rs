use std::fs::File;
use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

use crate::air::{self, DerivationError, DerivedState, InputSample, WetBulbMethod};
use crate::batch::{self, BatchError, BatchSettings, InputMode};
use crate::chart::{ChartError, ChartGrid};
use crate::config::{self, Config, ConfigError, DEFAULT_CONFIG_FILE};
use crate::units::{pressure, temperature, PressureUnit, TemperatureUnit};

/// 애플리케이션 실행 중 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum AppError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// 설정 저장/로드 오류
    Config(ConfigError),
    /// 일괄 처리 오류
    Batch(BatchError),
    /// 물성 계산 오류
    Derivation(DerivationError),
    /// 선도 축 설정 오류
    Chart(ChartError),
    /// 잘못된 명령행 인자
    InvalidArgument(String),
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AppError::Io(e) => write!(f, "입출력 오류: {e}"),
            AppError::Config(e) => write!(f, "설정 오류: {e}"),
            AppError::Batch(e) => write!(f, "일괄 처리 오류: {e}"),
            AppError::Derivation(e) => write!(f, "{e}"),
            AppError::Chart(e) => write!(f, "선도 설정 오류: {e}"),
            AppError::InvalidArgument(msg) => write!(f, "잘못된 인자: {msg}"),
        }
    }
}

impl std::error::Error for AppError {}

impl From<std::io::Error> for AppError {
    fn from(value: std::io::Error) -> Self {
        AppError::Io(value)
    }
}

impl From<ConfigError> for AppError {
    fn from(value: ConfigError) -> Self {
        AppError::Config(value)
    }
}

impl From<BatchError> for AppError {
    fn from(value: BatchError) -> Self {
        AppError::Batch(value)
    }
}

impl From<ChartError> for AppError {
    fn from(value: ChartError) -> Self {
        AppError::Chart(value)
    }
}

impl From<DerivationError> for AppError {
    fn from(value: DerivationError) -> Self {
        AppError::Derivation(value)
    }
}

/// 입력 파일의 두 번째 열 종류.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    /// 건구온도 + 상대습도
    Rh,
    /// 건구온도 + 습구온도
    WetBulb,
}

impl From<ModeArg> for InputMode {
    fn from(value: ModeArg) -> Self {
        match value {
            ModeArg::Rh => InputMode::RelativeHumidity,
            ModeArg::WetBulb => InputMode::WetBulb,
        }
    }
}

#[derive(Debug, Parser)]
#[command(name = "psychrometric_toolbox")]
#[command(version)]
#[command(about = "습공기 물성(습공기 선도) 계산기", long_about = None)]
pub struct Cli {
    /// 설정 파일 경로 (없으면 기본값으로 생성)
    #[arg(long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    pub config: PathBuf,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// 건구온도와 상대습도로 한 시료를 계산
    State {
        /// 해발고도 [m] (생략 시 설정값)
        #[arg(short = 'z', long)]
        elevation: Option<f64>,
        /// 건구온도
        #[arg(short = 't', long, allow_negative_numbers = true)]
        dry_bulb: f64,
        /// 상대습도 (0~1 또는 0~100)
        #[arg(short = 'r', long)]
        rh: f64,
        /// 입력 온도 단위 (c, k, f)
        #[arg(long, default_value = "c")]
        unit: TemperatureUnit,
    },
    /// 건구온도와 측정 습구온도로 계산
    WetBulb {
        #[arg(short = 'z', long)]
        elevation: Option<f64>,
        #[arg(short = 't', long, allow_negative_numbers = true)]
        dry_bulb: f64,
        #[arg(short = 'w', long, allow_negative_numbers = true)]
        wet_bulb: f64,
        #[arg(long, default_value = "c")]
        unit: TemperatureUnit,
    },
    /// CSV/TXT 측정 파일 일괄 계산
    Batch {
        /// 입력 파일
        input: PathBuf,
        /// 결과 CSV 경로
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short = 'z', long)]
        elevation: Option<f64>,
        #[arg(long, value_enum, default_value_t = ModeArg::Rh)]
        mode: ModeArg,
        /// 구분자 (생략 시 자동 판정)
        #[arg(long)]
        delimiter: Option<char>,
    },
    /// 습공기 선도 격자를 CSV로 출력
    Chart {
        #[arg(short, long)]
        output: Option<PathBuf>,
        #[arg(short = 'z', long)]
        elevation: Option<f64>,
    },
}

/// 설정을 로드한 뒤 명령을 실행한다.
pub fn run(cli: Cli) -> Result<(), AppError> {
    let cfg = config::load_or_default(&cli.config)?;
    execute(cli.command, &cfg, &mut io::stdout().lock())
}

/// 명령 하나를 실행하고 결과를 `out`에 쓴다.
pub fn execute<W: Write>(command: Command, cfg: &Config, out: &mut W) -> Result<(), AppError> {
    match command {
        Command::State {
            elevation,
            dry_bulb,
            rh,
            unit,
        } => {
            let z = elevation.unwrap_or(cfg.site.elevation_m);
            let sample = InputSample::new(z, temperature::to_celsius(dry_bulb, unit), rh)
                .map_err(DerivationError::from)?;
            let state = air::derive_state_with(&sample, &cfg.solver)?;
            print_state(out, &state, cfg.output.temperature_unit, cfg.output.pressure_unit)?;
        }
        Command::WetBulb {
            elevation,
            dry_bulb,
            wet_bulb,
            unit,
        } => {
            let z = elevation.unwrap_or(cfg.site.elevation_m);
            let result = air::derive_state_from_wet_bulb(
                z,
                temperature::to_celsius(dry_bulb, unit),
                temperature::to_celsius(wet_bulb, unit),
            )?;
            writeln!(
                out,
                "역산 습도비: {:.6} kg/kg, 상대습도: {:.2} %",
                result.reading.humidity_ratio,
                result.reading.relative_humidity * 100.0
            )?;
            print_state(
                out,
                &result.state,
                cfg.output.temperature_unit,
                cfg.output.pressure_unit,
            )?;
        }
        Command::Batch {
            input,
            output,
            elevation,
            mode,
            delimiter,
        } => {
            let delimiter = delimiter
                .map(ascii_delimiter)
                .transpose()?;
            let settings = BatchSettings {
                elevation_m: elevation.unwrap_or(cfg.site.elevation_m),
                mode: mode.into(),
                synonyms: &cfg.columns,
                delimiter,
                options: cfg.solver,
            };
            let report = batch::process_file(&input, output.as_deref(), &settings)?;
            writeln!(
                out,
                "계산 {}건, 실패 {}건, 건너뛴 행 {}개",
                report.succeeded(),
                report.failed(),
                report.skipped_rows
            )?;
            if output.is_none() {
                batch::write_results(&mut *out, &report.records)?;
            }
        }
        Command::Chart { output, elevation } => {
            let z = elevation.unwrap_or(cfg.site.elevation_m);
            let grid = ChartGrid::generate(z, &cfg.chart, &cfg.solver)?;
            let written = match output {
                Some(path) => grid.write_csv(File::create(path)?)?,
                None => grid.write_csv(&mut *out)?,
            };
            log::info!("선도 격자 {written}칸 출력");
        }
    }
    Ok(())
}

/// 구분자 문자를 바이트로 바꾼다. ASCII가 아니면 거부한다.
pub fn ascii_delimiter(c: char) -> Result<u8, AppError> {
    if c.is_ascii() {
        Ok(c as u8)
    } else {
        Err(AppError::InvalidArgument(format!(
            "구분자는 ASCII 문자여야 합니다: {c}"
        )))
    }
}

fn method_label(method: WetBulbMethod) -> String {
    match method {
        WetBulbMethod::Converged { iterations } => format!("이분법 {iterations}회 수렴"),
        WetBulbMethod::EndpointRoot => "구간 끝점".into(),
        WetBulbMethod::IterationLimit => "반복 한도 도달".into(),
        WetBulbMethod::EmpiricalFallback => "경험식(근사)".into(),
        WetBulbMethod::Measured => "측정값".into(),
    }
}

/// 계산된 상태를 사람이 읽는 형식으로 출력한다.
pub fn print_state<W: Write>(
    out: &mut W,
    state: &DerivedState,
    t_unit: TemperatureUnit,
    p_unit: PressureUnit,
) -> io::Result<()> {
    let t = |c: f64| temperature::from_celsius(c, t_unit);
    let ts = t_unit.symbol();
    let ps = p_unit.symbol();
    writeln!(
        out,
        "건구온도: {:.2} {ts}, 상대습도: {:.2} %",
        t(state.sample.dry_bulb_c),
        state.sample.relative_humidity * 100.0
    )?;
    writeln!(
        out,
        "대기압: {:.4} {ps}",
        pressure::from_kpa(state.atmospheric_pressure_kpa, p_unit)
    )?;
    writeln!(
        out,
        "포화수증기압: {:.4} {ps}, 수증기 분압: {:.4} {ps}, 부족량: {:.2} Pa",
        pressure::from_kpa(pressure::pa_to_kpa(state.saturation_vapor_pressure_pa), p_unit),
        pressure::from_kpa(pressure::pa_to_kpa(state.vapor_pressure_pa), p_unit),
        state.vapor_pressure_deficit_pa
    )?;
    writeln!(
        out,
        "습도비: {:.6} kg/kg, 포화 습도비: {:.6} kg/kg",
        state.humidity_ratio, state.saturation_humidity_ratio
    )?;
    match state.degree_of_saturation {
        Some(mu) => writeln!(out, "포화도: {mu:.6}")?,
        None => writeln!(out, "포화도: -")?,
    }
    writeln!(
        out,
        "비체적: {:.6} m3/kg, 비엔탈피: {:.3} kJ/kg",
        state.specific_volume_m3_per_kg, state.enthalpy_kj_per_kg
    )?;
    match state.dew_point_c {
        Some(tdp) => writeln!(out, "이슬점: {:.3} {ts}", t(tdp))?,
        None => writeln!(out, "이슬점: - (상관식 범위 밖)")?,
    }
    writeln!(
        out,
        "습구온도: {:.3} {ts} ({})",
        t(state.wet_bulb_c),
        method_label(state.wet_bulb_method)
    )
}
