use super::atmosphere::{absolute_temperature_k, atmospheric_pressure_kpa};
use super::dew_point::dew_point_c;
use super::error::PsychroError;
use super::moisture;
use super::saturation::saturation_vapor_pressure_pa;
use super::wet_bulb::{self, WetBulbMethod, WetBulbOptions, WetBulbReading, WetBulbSolution};

/// 한 시료의 입력값. 생성 시 상대습도를 분율로 정규화한다.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InputSample {
    /// 해발고도 [m]
    pub elevation_m: f64,
    /// 건구온도 [°C]
    pub dry_bulb_c: f64,
    /// 상대습도 [분율, 0~1]
    pub relative_humidity: f64,
}

impl InputSample {
    /// 상대습도가 1보다 크면 백분율로 보고 100으로 나눈다.
    pub fn new(
        elevation_m: f64,
        dry_bulb_c: f64,
        relative_humidity: f64,
    ) -> Result<Self, PsychroError> {
        let rh = if relative_humidity > 1.0 {
            relative_humidity / 100.0
        } else {
            relative_humidity
        };
        Self::from_fraction(elevation_m, dry_bulb_c, rh)
    }

    /// 이미 분율인 상대습도로 생성한다(정규화 없음).
    pub fn from_fraction(
        elevation_m: f64,
        dry_bulb_c: f64,
        relative_humidity: f64,
    ) -> Result<Self, PsychroError> {
        if !elevation_m.is_finite() {
            return Err(PsychroError::NonFiniteInput("elevation_m"));
        }
        if !dry_bulb_c.is_finite() {
            return Err(PsychroError::NonFiniteInput("dry_bulb_c"));
        }
        if !relative_humidity.is_finite() {
            return Err(PsychroError::NonFiniteInput("relative_humidity"));
        }
        Ok(Self {
            elevation_m,
            dry_bulb_c,
            relative_humidity,
        })
    }
}

/// 시료 하나에 대한 습공기 물성 전체.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivedState {
    pub sample: InputSample,
    /// 대기압 [kPa]
    pub atmospheric_pressure_kpa: f64,
    /// 절대온도 [K]
    pub absolute_temperature_k: f64,
    /// 포화수증기압 [Pa]
    pub saturation_vapor_pressure_pa: f64,
    /// 수증기 분압 [Pa]
    pub vapor_pressure_pa: f64,
    /// 수증기압 부족량 [Pa]
    pub vapor_pressure_deficit_pa: f64,
    /// 습도비 [kg/kg]
    pub humidity_ratio: f64,
    /// 포화 습도비 [kg/kg]
    pub saturation_humidity_ratio: f64,
    /// 포화도 [-]
    pub degree_of_saturation: Option<f64>,
    /// 비체적 [m³/kg건공기]
    pub specific_volume_m3_per_kg: f64,
    /// 비엔탈피 [kJ/kg건공기]
    pub enthalpy_kj_per_kg: f64,
    /// 이슬점 [°C]
    pub dew_point_c: Option<f64>,
    /// 습구온도 [°C]
    pub wet_bulb_c: f64,
    pub wet_bulb_method: WetBulbMethod,
}

/// 물성 계산 실패. 실패한 단계의 오류를 그대로 담으며 부분 결과는 버린다.
#[derive(Debug, Clone, PartialEq)]
pub struct DerivationError {
    pub source: PsychroError,
}

impl std::fmt::Display for DerivationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "습공기 물성 계산 실패: {}", self.source)
    }
}

impl std::error::Error for DerivationError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.source)
    }
}

impl From<PsychroError> for DerivationError {
    fn from(value: PsychroError) -> Self {
        DerivationError { source: value }
    }
}

/// 고도, 건구온도, 상대습도로부터 전체 물성을 계산한다.
pub fn derive_state(
    elevation_m: f64,
    dry_bulb_c: f64,
    relative_humidity: f64,
) -> Result<DerivedState, DerivationError> {
    let sample = InputSample::new(elevation_m, dry_bulb_c, relative_humidity)?;
    derive_state_with(&sample, &WetBulbOptions::default())
}

/// 정규화된 시료와 이분법 설정으로 전체 물성을 계산한다.
pub fn derive_state_with(
    sample: &InputSample,
    options: &WetBulbOptions,
) -> Result<DerivedState, DerivationError> {
    Ok(run_stages(sample, WetBulbSource::Solve(options))?)
}

/// 습구온도를 어디서 얻는지.
enum WetBulbSource<'a> {
    Solve(&'a WetBulbOptions),
    /// 측정값을 그대로 쓴다
    Measured(f64),
}

fn run_stages(
    sample: &InputSample,
    source: WetBulbSource<'_>,
) -> Result<DerivedState, PsychroError> {
    let t = sample.dry_bulb_c;
    let patm = atmospheric_pressure_kpa(sample.elevation_m)?;
    let t_k = absolute_temperature_k(t);
    let pvs = saturation_vapor_pressure_pa(t)?;
    let pv = moisture::vapor_pressure_pa(sample.relative_humidity, pvs);
    let deficit = moisture::vapor_pressure_deficit_pa(pvs, pv);
    let w = moisture::humidity_ratio(pv, patm)?;
    let ws = moisture::humidity_ratio(pvs, patm)?;
    let mu = moisture::degree_of_saturation(w, ws);
    let v = moisture::specific_volume(t_k, patm, w);
    let h = moisture::enthalpy_kj_per_kg(t, w);
    let tdp = dew_point_c(t, pv);
    let wet = match source {
        WetBulbSource::Solve(options) => {
            wet_bulb::solve_wet_bulb(t, sample.relative_humidity, w, patm, options)?
        }
        WetBulbSource::Measured(temperature_c) => WetBulbSolution {
            temperature_c,
            method: WetBulbMethod::Measured,
        },
    };

    Ok(DerivedState {
        sample: *sample,
        atmospheric_pressure_kpa: patm,
        absolute_temperature_k: t_k,
        saturation_vapor_pressure_pa: pvs,
        vapor_pressure_pa: pv,
        vapor_pressure_deficit_pa: deficit,
        humidity_ratio: w,
        saturation_humidity_ratio: ws,
        degree_of_saturation: mu,
        specific_volume_m3_per_kg: v,
        enthalpy_kj_per_kg: h,
        dew_point_c: tdp,
        wet_bulb_c: wet.temperature_c,
        wet_bulb_method: wet.method,
    })
}

/// 건구온도와 측정 습구온도로 계산한 결과.
#[derive(Debug, Clone, PartialEq)]
pub struct WetBulbDerivation {
    pub reading: WetBulbReading,
    pub state: DerivedState,
}

/// 상대습도 대신 습구온도를 받는 보조 진입점.
///
/// 열수지식으로 습도비와 상대습도를 역산한 뒤 같은 파이프라인을 돌린다.
/// 결과의 습구온도는 다시 풀지 않고 측정값을 그대로 둔다 ([`WetBulbMethod::Measured`]).
pub fn derive_state_from_wet_bulb(
    elevation_m: f64,
    dry_bulb_c: f64,
    wet_bulb_c: f64,
) -> Result<WetBulbDerivation, DerivationError> {
    if !wet_bulb_c.is_finite() {
        return Err(PsychroError::NonFiniteInput("wet_bulb_c").into());
    }
    let patm = atmospheric_pressure_kpa(elevation_m)?;
    let reading = wet_bulb::humidity_from_wet_bulb(dry_bulb_c, wet_bulb_c, patm)?;
    let sample = InputSample::from_fraction(elevation_m, dry_bulb_c, reading.relative_humidity)?;
    let state = run_stages(&sample, WetBulbSource::Measured(wet_bulb_c))?;
    Ok(WetBulbDerivation { reading, state })
}
