//! Command implementations; each returns the text to print

pub mod import;
pub mod playlist;
pub mod search;

use crate::format;
use serde::Serialize;
use station_core::BudgetPreset;

#[derive(Serialize)]
struct PresetRow {
    key: &'static str,
    seconds: u32,
}

/// The budget preset table
pub fn presets(json: bool) -> crate::Result<String> {
    let rows: Vec<PresetRow> = BudgetPreset::ALL
        .iter()
        .map(|p| PresetRow {
            key: p.key(),
            seconds: p.seconds(),
        })
        .collect();

    format::emit(json, &rows, |_| format::presets(&BudgetPreset::ALL))
}
