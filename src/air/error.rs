/// 습공기 물성 단계에서 발생 가능한 오류.
#[derive(Debug, Clone, PartialEq)]
pub enum PsychroError {
    /// 포화수증기압 상관식의 유효 온도 범위를 벗어남
    TemperatureOutOfRange {
        temperature_c: f64,
        min_c: f64,
        max_c: f64,
    },
    /// 수증기 분압이 대기압 이상이라 습도비를 정의할 수 없음
    VaporPressureAtOrAboveAtmospheric {
        vapor_pressure_kpa: f64,
        atmospheric_pressure_kpa: f64,
    },
    /// 기압식의 밑이 0 이하가 되는 고도
    ElevationOutOfRange { elevation_m: f64 },
    /// 습구온도가 건구온도보다 높음
    WetBulbAboveDryBulb { dry_bulb_c: f64, wet_bulb_c: f64 },
    /// 습구온도가 너무 낮아 역산 습도비가 음수
    NegativeHumidityRatio { humidity_ratio: f64 },
    /// NaN/무한대 입력
    NonFiniteInput(&'static str),
}

impl std::fmt::Display for PsychroError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PsychroError::TemperatureOutOfRange {
                temperature_c,
                min_c,
                max_c,
            } => write!(
                f,
                "온도 {temperature_c}°C가 유효 범위({min_c} ~ {max_c}°C)를 벗어났습니다"
            ),
            PsychroError::VaporPressureAtOrAboveAtmospheric {
                vapor_pressure_kpa,
                atmospheric_pressure_kpa,
            } => write!(
                f,
                "수증기 분압 {vapor_pressure_kpa:.4} kPa가 대기압 {atmospheric_pressure_kpa:.4} kPa 이상입니다"
            ),
            PsychroError::ElevationOutOfRange { elevation_m } => {
                write!(f, "고도 {elevation_m} m에서는 기압을 계산할 수 없습니다")
            }
            PsychroError::WetBulbAboveDryBulb {
                dry_bulb_c,
                wet_bulb_c,
            } => write!(
                f,
                "습구온도 {wet_bulb_c}°C가 건구온도 {dry_bulb_c}°C보다 높습니다"
            ),
            PsychroError::NegativeHumidityRatio { humidity_ratio } => write!(
                f,
                "습구온도로 역산한 습도비가 음수입니다 (W={humidity_ratio:.6})"
            ),
            PsychroError::NonFiniteInput(name) => write!(f, "유한하지 않은 입력값: {name}"),
        }
    }
}

impl std::error::Error for PsychroError {}
