use serde::{Deserialize, Serialize};

/// 原始表單的預設值
pub const DEFAULT_TARGET_CONCENTRATION: f64 = 1300.0;
pub const DEFAULT_TARGET_RECOVERY: f64 = 20_000.0;
pub const DEFAULT_BASE_VOLUME: f64 = 100.0;

/// One cell suspension to be diluted and pooled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Sample {
    pub name: String,
    pub cell_count: u64,
}

impl Sample {
    pub fn new(name: impl Into<String>, cell_count: u64) -> Self {
        Self {
            name: name.into(),
            cell_count,
        }
    }

    /// Positional default name used when a sheet leaves the name blank (`S1`, `S2`, ...).
    pub fn default_name(index: usize) -> String {
        format!("S{}", index + 1)
    }
}

/// How each sample's final volume is chosen.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DilutionPolicy {
    /// Every sample starts from the same final volume; diluent is whatever exceeds it.
    FixedFinalVolume { final_volume: f64 },
    /// Samples are diluted to target unless that would leave less than `min_volume`.
    MinimumVolume { min_volume: f64 },
}

impl DilutionPolicy {
    pub fn from_kind(kind: PolicyKind, volume: f64) -> Self {
        match kind {
            PolicyKind::Fixed => DilutionPolicy::FixedFinalVolume {
                final_volume: volume,
            },
            PolicyKind::MinVolume => DilutionPolicy::MinimumVolume { min_volume: volume },
        }
    }

    pub fn kind(&self) -> PolicyKind {
        match self {
            DilutionPolicy::FixedFinalVolume { .. } => PolicyKind::Fixed,
            DilutionPolicy::MinimumVolume { .. } => PolicyKind::MinVolume,
        }
    }

    /// The fixed final volume or the minimum volume, depending on the variant.
    pub fn base_volume(&self) -> f64 {
        match *self {
            DilutionPolicy::FixedFinalVolume { final_volume } => final_volume,
            DilutionPolicy::MinimumVolume { min_volume } => min_volume,
        }
    }

    pub fn base_volume_field(&self) -> &'static str {
        match self {
            DilutionPolicy::FixedFinalVolume { .. } => "final_volume",
            DilutionPolicy::MinimumVolume { .. } => "min_volume",
        }
    }
}

impl Default for DilutionPolicy {
    fn default() -> Self {
        DilutionPolicy::FixedFinalVolume {
            final_volume: DEFAULT_BASE_VOLUME,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "kebab-case")]
pub enum PolicyKind {
    Fixed,
    MinVolume,
}

impl std::fmt::Display for PolicyKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PolicyKind::Fixed => write!(f, "fixed final volume"),
            PolicyKind::MinVolume => write!(f, "minimum volume"),
        }
    }
}

/// Immutable inputs shared by every sample in a run.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PlanConfig {
    #[serde(default = "default_target_concentration")]
    pub target_concentration: f64,
    #[serde(default = "default_target_recovery")]
    pub target_recovery: f64,
    #[serde(default)]
    pub policy: DilutionPolicy,
}

fn default_target_concentration() -> f64 {
    DEFAULT_TARGET_CONCENTRATION
}

fn default_target_recovery() -> f64 {
    DEFAULT_TARGET_RECOVERY
}

impl Default for PlanConfig {
    fn default() -> Self {
        Self {
            target_concentration: DEFAULT_TARGET_CONCENTRATION,
            target_recovery: DEFAULT_TARGET_RECOVERY,
            policy: DilutionPolicy::default(),
        }
    }
}

/// Per-sample dilution result. Reported figures are rounded to 2 decimals.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SampleRow {
    pub sample_name: String,
    pub cell_count: u64,
    pub diluent_volume: f64,
    pub final_volume: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub actual_concentration: Option<f64>,
    // 彙總時使用的未四捨五入體積
    #[serde(skip)]
    pub(crate) pooled_volume: f64,
    #[serde(skip)]
    pub(crate) held_at_base: bool,
}

impl SampleRow {
    /// True when the sample needed less than the base volume and was left without diluent.
    pub fn held_at_base_volume(&self) -> bool {
        self.held_at_base
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PoolSummary {
    pub total_pool_volume: f64,
    pub total_cells: u64,
    pub final_pool_concentration: f64,
    pub withdraw_volume: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Plan {
    pub rows: Vec<SampleRow>,
    pub summary: PoolSummary,
}

impl Plan {
    /// `(sample_name, diluent_volume)` pairs in input order, for charting.
    pub fn diluent_series(&self) -> Vec<(&str, f64)> {
        self.rows
            .iter()
            .map(|row| (row.sample_name.as_str(), row.diluent_volume))
            .collect()
    }

    pub fn held_at_base(&self) -> impl Iterator<Item = &SampleRow> {
        self.rows.iter().filter(|row| row.held_at_base)
    }

    pub fn reports_concentration(&self) -> bool {
        self.rows.iter().any(|row| row.actual_concentration.is_some())
    }
}
