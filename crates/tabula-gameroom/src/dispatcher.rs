//! Fan-out Dispatcher: audience computation per frame class (§4.3).
//!
//! This module is pure — it only maps a [`Frame`] to the slots it should
//! reach. Applying that to the current [`crate::Membership`] and actually
//! writing to channels happens in [`crate::Room`].

use tabula_protocol::{Frame, SoundScope};

/// Which membership slots a frame should reach.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    HostOnly,
    ControllerOnly,
    ControllerAndSpectators,
    HostAndSpectators,
    /// Not broadcast at all (§4.3: local-scope sound preference, and raw
    /// `Reaction` frames, which are buffered by the Coalescer instead).
    None,
}

/// Maps a frame to its audience, following the §4.3 table.
pub fn audience_for(frame: &Frame) -> Audience {
    match frame {
        Frame::StateUpdate { .. } => Audience::ControllerAndSpectators,
        Frame::DrawCard
        | Frame::PauseGame
        | Frame::ResumeGame
        | Frame::ResetGame
        | Frame::FlipCard { .. }
        | Frame::ToggleDetailed { .. } => Audience::HostOnly,
        Frame::SoundPreference { scope, .. } => match scope {
            SoundScope::HostOnly | SoundScope::Both => Audience::HostOnly,
            SoundScope::Local => Audience::None,
        },
        Frame::SoundPreferenceAck { .. } => Audience::ControllerOnly,
        Frame::Reaction { .. } => Audience::None,
        Frame::ReactionBurst { .. } => Audience::HostAndSpectators,
        Frame::SpectatorCount { .. } => Audience::HostOnly,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_protocol::{Emoji, GameStatus, SoundSource};

    #[test]
    fn state_update_goes_to_controller_and_spectators() {
        let frame = Frame::StateUpdate {
            current_item: None,
            current_index: -1,
            total_items: 0,
            status: GameStatus::Ready,
            history_count: 0,
            history: vec![],
            is_flipped: false,
            is_detailed_expanded: false,
        };
        assert_eq!(audience_for(&frame), Audience::ControllerAndSpectators);
    }

    #[test]
    fn local_scope_sound_preference_is_not_broadcast() {
        let frame = Frame::SoundPreference {
            enabled: true,
            source: SoundSource::Controller,
            scope: SoundScope::Local,
        };
        assert_eq!(audience_for(&frame), Audience::None);
    }

    #[test]
    fn host_only_and_both_scope_reach_host() {
        for scope in [SoundScope::HostOnly, SoundScope::Both] {
            let frame = Frame::SoundPreference {
                enabled: true,
                source: SoundSource::Controller,
                scope,
            };
            assert_eq!(audience_for(&frame), Audience::HostOnly);
        }
    }

    #[test]
    fn reaction_is_buffered_not_broadcast() {
        let frame = Frame::Reaction { emoji: Emoji::Fire };
        assert_eq!(audience_for(&frame), Audience::None);
    }

    #[test]
    fn reaction_burst_reaches_host_and_spectators() {
        let frame = Frame::ReactionBurst { reactions: vec![] };
        assert_eq!(audience_for(&frame), Audience::HostAndSpectators);
    }
}
