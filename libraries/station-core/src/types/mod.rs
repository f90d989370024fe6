mod budget;
mod ids;
mod playlist;
mod song;

pub use budget::BudgetPreset;
pub use ids::{PlaylistId, SongId, TagId};
pub use playlist::{
    AdmissionResult, DurationTally, Playlist, PlaylistEntryView, PlaylistState, PlaylistSummary,
    Rejection, RejectionReason,
};
pub use song::{split_genres, NewSong, Song, SongFile, SongQuery, SongView, YearRange};
