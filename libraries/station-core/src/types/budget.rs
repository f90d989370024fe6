//! Playlist duration budget presets

use crate::error::StationError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Maximum airtime a playlist may hold, chosen from a fixed table
///
/// | key     | seconds |
/// |---------|---------|
/// | `30min` | 1800    |
/// | `1h`    | 3600    |
/// | `1h30`  | 5400    |
/// | `2h`    | 7200    |
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BudgetPreset {
    /// 30 minutes
    #[serde(rename = "30min")]
    ThirtyMinutes,
    /// 1 hour
    #[serde(rename = "1h")]
    OneHour,
    /// 1 hour 30 minutes
    #[serde(rename = "1h30")]
    NinetyMinutes,
    /// 2 hours
    #[serde(rename = "2h")]
    TwoHours,
}

impl BudgetPreset {
    /// Every preset, shortest first
    pub const ALL: [BudgetPreset; 4] = [
        BudgetPreset::ThirtyMinutes,
        BudgetPreset::OneHour,
        BudgetPreset::NinetyMinutes,
        BudgetPreset::TwoHours,
    ];

    /// Key used to select the preset
    pub const fn key(self) -> &'static str {
        match self {
            BudgetPreset::ThirtyMinutes => "30min",
            BudgetPreset::OneHour => "1h",
            BudgetPreset::NinetyMinutes => "1h30",
            BudgetPreset::TwoHours => "2h",
        }
    }

    /// Budget in seconds
    pub const fn seconds(self) -> u32 {
        match self {
            BudgetPreset::ThirtyMinutes => 30 * 60,
            BudgetPreset::OneHour => 60 * 60,
            BudgetPreset::NinetyMinutes => 90 * 60,
            BudgetPreset::TwoHours => 120 * 60,
        }
    }

    /// Look up a preset by key. Keys are exact; there is no fallback preset.
    pub fn from_key(key: &str) -> Result<Self, StationError> {
        let trimmed = key.trim();
        Self::ALL
            .into_iter()
            .find(|preset| preset.key() == trimmed)
            .ok_or_else(|| StationError::InvalidBudgetKey(key.to_string()))
    }
}

impl FromStr for BudgetPreset {
    type Err = StationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::from_key(s)
    }
}

impl fmt::Display for BudgetPreset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}
