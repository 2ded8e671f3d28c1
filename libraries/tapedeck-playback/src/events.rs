//! Playback Events
//!
//! Outbound notifications for the rendering layer. The player queues them as
//! it handles commands and engine events; the host drains the queue with
//! [`Player::drain_events`](crate::Player::drain_events) and forwards them to
//! whatever draws the surfaces.

use crate::engine::PlayRejection;
use crate::view::ViewPayload;
use serde::{Deserialize, Serialize};
use tapedeck_core::TrackId;

/// Events emitted by the player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlaybackEvent {
    /// State changed; the payload is a full projection, not a diff
    StateChanged {
        /// Display fields for every surface
        payload: ViewPayload,
    },

    /// The engine refused to start a track (transient notice)
    PlaybackRejected {
        /// Track that failed to start
        track_id: TrackId,
        /// Engine's reason
        reason: PlayRejection,
    },
}

impl PlaybackEvent {
    /// Payload of a `StateChanged` event
    pub fn payload(&self) -> Option<&ViewPayload> {
        match self {
            Self::StateChanged { payload } => Some(payload),
            Self::PlaybackRejected { .. } => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_serializes_with_type_tag() {
        let event = PlaybackEvent::PlaybackRejected {
            track_id: TrackId::new(3),
            reason: PlayRejection::AutoplayBlocked,
        };

        let json = serde_json::to_value(&event).unwrap();
        assert_eq!(json["type"], "playback_rejected");
        assert_eq!(json["track_id"], 3);
        assert_eq!(json["reason"]["kind"], "autoplay_blocked");
        assert!(event.payload().is_none());
    }
}
