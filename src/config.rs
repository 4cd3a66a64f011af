use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

use crate::air::WetBulbOptions;
use crate::batch::ColumnSynonyms;
use crate::chart::ChartAxes;
use crate::units::{PressureUnit, TemperatureUnit};

/// 기본 설정 파일 이름.
pub const DEFAULT_CONFIG_FILE: &str = "psychro.toml";

/// 측정 지점 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    /// 해발고도 [m]
    pub elevation_m: f64,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            elevation_m: 2250.0,
        }
    }
}

/// 출력 단위 설정.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub temperature_unit: TemperatureUnit,
    pub pressure_unit: PressureUnit,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            temperature_unit: TemperatureUnit::Celsius,
            pressure_unit: PressureUnit::KiloPascal,
        }
    }
}

/// 애플리케이션 설정을 표현한다.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub site: SiteConfig,
    pub solver: WetBulbOptions,
    pub columns: ColumnSynonyms,
    pub chart: ChartAxes,
    pub output: OutputConfig,
}

/// 설정 로드/저장 시 발생 가능한 오류를 표현한다.
#[derive(Debug)]
pub enum ConfigError {
    /// 파일 입출력 오류
    Io(std::io::Error),
    /// TOML 역직렬화 오류
    Serde(toml::de::Error),
    /// TOML 직렬화 오류
    Serialize(toml::ser::Error),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "파일 입출력 오류: {e}"),
            ConfigError::Serde(e) => write!(f, "설정 파싱 오류: {e}"),
            ConfigError::Serialize(e) => write!(f, "설정 직렬화 오류: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<std::io::Error> for ConfigError {
    fn from(value: std::io::Error) -> Self {
        ConfigError::Io(value)
    }
}

impl From<toml::de::Error> for ConfigError {
    fn from(value: toml::de::Error) -> Self {
        ConfigError::Serde(value)
    }
}

impl From<toml::ser::Error> for ConfigError {
    fn from(value: toml::ser::Error) -> Self {
        ConfigError::Serialize(value)
    }
}

/// TOML 문자열을 설정으로 해석한다. 빠진 항목은 기본값을 쓴다.
pub fn parse(content: &str) -> Result<Config, ConfigError> {
    Ok(toml::from_str(content)?)
}

/// 설정 파일을 읽는다. 파일을 새로 만들지는 않는다.
pub fn load_from(path: &Path) -> Result<Config, ConfigError> {
    let content = fs::read_to_string(path)?;
    parse(&content)
}

/// 설정 파일을 로드하거나 없으면 기본 설정을 생성한다.
pub fn load_or_default(path: &Path) -> Result<Config, ConfigError> {
    if path.exists() {
        load_from(path)
    } else {
        let cfg = Config::default();
        cfg.save(path)?;
        log::info!("기본 설정 파일 생성: {}", path.display());
        Ok(cfg)
    }
}

impl Config {
    /// 설정을 파일에 저장한다.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = toml::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn partial_file_keeps_defaults() {
        let cfg = parse("[site]\nelevation_m = 0.0\n").unwrap();
        assert_eq!(cfg.site.elevation_m, 0.0);
        assert_eq!(cfg.solver, WetBulbOptions::default());
        assert_eq!(cfg.output.pressure_unit, PressureUnit::KiloPascal);
    }

    #[test]
    fn default_config_roundtrips_through_toml() {
        let cfg = Config::default();
        let text = toml::to_string_pretty(&cfg).unwrap();
        assert_eq!(parse(&text).unwrap(), cfg);
    }
}
