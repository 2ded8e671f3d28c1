//! Error types for playback management
//!
//! None of these escape a [`Player`](crate::Player) command: the player logs
//! them, queues a notice where the user should see one, and falls back to an
//! idle or paused state.

use crate::engine::PlayRejection;
use thiserror::Error;

/// Playback errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PlaybackError {
    /// The engine refused to start playback
    #[error("Playback rejected for track #{index}: {reason}")]
    PlaybackRejected {
        /// Catalog index of the track that failed to start
        index: usize,
        /// What the engine reported
        reason: PlayRejection,
    },

    /// A command referenced a track outside the catalog
    #[error("Track index {index} out of range (catalog has {len} tracks)")]
    InvalidIndex {
        /// Requested index
        index: usize,
        /// Catalog length at the time of the request
        len: usize,
    },

    /// Seek requested before the track duration is known
    #[error("Seek unavailable: track duration unknown")]
    SeekUnavailable,

    /// A track-changing command on an empty catalog
    #[error("Catalog is empty")]
    EmptyCatalog,
}

/// Result type for playback operations
pub type Result<T> = std::result::Result<T, PlaybackError>;
