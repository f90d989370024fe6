//! The admission rule, free of any I/O

use serde::{Deserialize, Serialize};
use station_core::{DurationTally, PlaylistEntryView, Rejection, RejectionReason};

/// What a song with an unknown duration costs against a budget
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(tag = "mode", rename_all = "snake_case")]
pub enum UnknownDurationPolicy {
    /// Refuse candidates whose duration is unknown
    #[default]
    Reject,
    /// Unknown durations cost nothing
    Free,
    /// Unknown durations cost a fixed estimate
    Estimate {
        /// Seconds charged per unknown song
        seconds: u32,
    },
}

impl UnknownDurationPolicy {
    /// Seconds charged for an entry already in the playlist whose
    /// duration is unknown
    ///
    /// Under `Reject` such entries can only predate the policy; they are
    /// charged nothing so old playlists stay readable.
    pub fn existing_entry_cost(self) -> u64 {
        match self {
            Self::Reject | Self::Free => 0,
            Self::Estimate { seconds } => u64::from(seconds),
        }
    }
}

/// Outcome of the admission rule
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    /// The candidate fits; `cost` is what it adds to the total
    Admit { cost: u32 },
    Reject(Rejection),
}

/// Accumulated seconds charged against the budget
pub fn current_total(tally: DurationTally, policy: UnknownDurationPolicy) -> u64 {
    tally
        .known_seconds
        .saturating_add(tally.unknown_entries.saturating_mul(policy.existing_entry_cost()))
}

/// Tally of an already-fetched entry list
pub fn tally_entries(entries: &[PlaylistEntryView]) -> DurationTally {
    entries
        .iter()
        .fold(DurationTally::default(), |mut tally, entry| {
            match entry.duration_seconds {
                Some(seconds) => tally.known_seconds += u64::from(seconds),
                None => tally.unknown_entries += 1,
            }
            tally
        })
}

/// Decide whether a candidate song fits the remaining budget
///
/// A total exactly equal to the budget is admitted.
pub fn evaluate(
    budget_seconds: u32,
    tally: DurationTally,
    candidate_seconds: Option<u32>,
    policy: UnknownDurationPolicy,
) -> Decision {
    let current_seconds = current_total(tally, policy);

    let cost = match (candidate_seconds, policy) {
        (Some(seconds), _) => seconds,
        (None, UnknownDurationPolicy::Free) => 0,
        (None, UnknownDurationPolicy::Estimate { seconds }) => seconds,
        (None, UnknownDurationPolicy::Reject) => {
            return Decision::Reject(Rejection {
                reason: RejectionReason::UnknownDuration,
                budget_seconds,
                current_seconds,
                song_seconds: None,
            });
        }
    };

    if current_seconds.saturating_add(u64::from(cost)) > u64::from(budget_seconds) {
        return Decision::Reject(Rejection {
            reason: RejectionReason::ExceedsBudget,
            budget_seconds,
            current_seconds,
            song_seconds: Some(cost),
        });
    }

    Decision::Admit { cost }
}
