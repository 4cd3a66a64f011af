use serde::{Deserialize, Serialize};

const PA_PER_KPA: f64 = 1000.0;
const KPA_PER_BAR: f64 = 100.0;
const KPA_PER_ATM: f64 = 101.325;
const MMHG_PER_KPA: f64 = 7.500_62;
const KPA_PER_PSI: f64 = 6.894_76;

/// 압력 단위. 모두 절대압이며 내부 기준은 kPa이다.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PressureUnit {
    Pascal,
    HectoPascal,
    KiloPascal,
    Bar,
    Atm,
    MmHg,
    Psi,
}

impl PressureUnit {
    pub fn symbol(&self) -> &'static str {
        match self {
            PressureUnit::Pascal => "Pa",
            PressureUnit::HectoPascal => "hPa",
            PressureUnit::KiloPascal => "kPa",
            PressureUnit::Bar => "bar",
            PressureUnit::Atm => "atm",
            PressureUnit::MmHg => "mmHg",
            PressureUnit::Psi => "psi",
        }
    }
}

pub fn pa_to_kpa(value_pa: f64) -> f64 {
    value_pa / PA_PER_KPA
}

pub fn kpa_to_pa(value_kpa: f64) -> f64 {
    value_kpa * PA_PER_KPA
}

/// kPa 값을 원하는 단위로 변환한다.
pub fn from_kpa(value_kpa: f64, unit: PressureUnit) -> f64 {
    match unit {
        PressureUnit::Pascal => kpa_to_pa(value_kpa),
        PressureUnit::HectoPascal => value_kpa * 10.0,
        PressureUnit::KiloPascal => value_kpa,
        PressureUnit::Bar => value_kpa / KPA_PER_BAR,
        PressureUnit::Atm => value_kpa / KPA_PER_ATM,
        PressureUnit::MmHg => value_kpa * MMHG_PER_KPA,
        PressureUnit::Psi => value_kpa / KPA_PER_PSI,
    }
}
