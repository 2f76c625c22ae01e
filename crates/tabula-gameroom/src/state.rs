//! The authoritative game-status machine (§3, §4.4).

use tabula_deck::{Deck, Item};
use tabula_protocol::{Frame, GameStatus};

/// A command was illegal in the current state, or the deck was empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RoomError {
    /// `Draw` from `ready` with an empty deck (§4.4 edge case).
    EmptyDeck,
    /// Command not permitted from the current `status` (§4.4, §7
    /// `StateTransitionError`).
    IllegalTransition { status: GameStatus, command: &'static str },
}

impl std::fmt::Display for RoomError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RoomError::EmptyDeck => write!(f, "deck is empty"),
            RoomError::IllegalTransition { status, command } => {
                write!(f, "{command} is illegal while status is {status:?}")
            }
        }
    }
}
impl std::error::Error for RoomError {}

/// Authoritative state for one room (§3 `RoomState`).
#[derive(Debug, Clone)]
pub struct RoomState {
    deck: Deck,
    shuffled_ids: Vec<String>,
    seed: i32,
    current_index: i64,
    history: Vec<Item>,
    status: GameStatus,
    is_flipped: bool,
    is_detailed_expanded: bool,
}

impl RoomState {
    /// `status = ready`, `currentIndex = -1`, `history = ∅` (§3 invariant).
    pub fn new(deck: Deck, seed: i32) -> Self {
        let shuffled_ids = tabula_shuffle::shuffle(&deck.item_ids(), seed);
        Self {
            deck,
            shuffled_ids,
            seed,
            current_index: -1,
            history: Vec::new(),
            status: GameStatus::Ready,
            is_flipped: false,
            is_detailed_expanded: false,
        }
    }

    pub fn status(&self) -> GameStatus {
        self.status
    }

    pub fn seed(&self) -> i32 {
        self.seed
    }

    pub fn current_index(&self) -> i64 {
        self.current_index
    }

    pub fn current_item(&self) -> Option<&Item> {
        if self.current_index < 0 || self.current_index as usize >= self.shuffled_ids.len() {
            return None;
        }
        self.deck.find(&self.shuffled_ids[self.current_index as usize])
    }

    /// `Draw` (§4.4): rejected in `paused`/`finished`; rejected with
    /// `EmptyDeck` from `ready` when the deck has nothing to give.
    pub fn draw(&mut self) -> Result<(), RoomError> {
        match self.status {
            GameStatus::Paused | GameStatus::Finished | GameStatus::Waiting => {
                return Err(RoomError::IllegalTransition {
                    status: self.status,
                    command: "DRAW_CARD",
                });
            }
            GameStatus::Ready | GameStatus::Playing => {}
        }
        if self.shuffled_ids.is_empty() {
            return Err(RoomError::EmptyDeck);
        }
        if let Some(item) = self.current_item().cloned() {
            self.history.push(item);
        }
        self.current_index += 1;
        self.is_flipped = false;
        self.is_detailed_expanded = false;
        self.status = if self.current_index as usize == self.shuffled_ids.len() - 1 {
            GameStatus::Finished
        } else {
            GameStatus::Playing
        };
        Ok(())
    }

    /// `Pause` (§4.4): only legal while `playing`.
    pub fn pause(&mut self) -> Result<(), RoomError> {
        if self.status != GameStatus::Playing {
            return Err(RoomError::IllegalTransition {
                status: self.status,
                command: "PAUSE_GAME",
            });
        }
        self.status = GameStatus::Paused;
        Ok(())
    }

    /// `Resume` (§4.4): only legal while `paused`.
    pub fn resume(&mut self) -> Result<(), RoomError> {
        if self.status != GameStatus::Paused {
            return Err(RoomError::IllegalTransition {
                status: self.status,
                command: "RESUME_GAME",
            });
        }
        self.status = GameStatus::Playing;
        Ok(())
    }

    /// `Reset` (§4.4): legal from any status; picks a new seed, reshuffles,
    /// and returns to the initial `ready` state.
    pub fn reset(&mut self, new_seed: i32) {
        self.seed = new_seed;
        self.shuffled_ids = tabula_shuffle::shuffle(&self.deck.item_ids(), new_seed);
        self.current_index = -1;
        self.history.clear();
        self.status = GameStatus::Ready;
        self.is_flipped = false;
        self.is_detailed_expanded = false;
    }

    /// `FlipCard`: no status gating — a client may flip while paused too.
    pub fn set_flipped(&mut self, is_flipped: bool) {
        self.is_flipped = is_flipped;
    }

    /// `ToggleDetailed`: no status gating.
    pub fn set_detailed_expanded(&mut self, is_expanded: bool) {
        self.is_detailed_expanded = is_expanded;
    }

    /// Forces `status = finished` for the Host-departure notification
    /// (§4.5: "notify all remaining connections via StateUpdate carrying
    /// `status = finished` marker"). The room is destroyed right after.
    pub fn force_finished(&mut self) {
        self.status = GameStatus::Finished;
    }

    /// Build the `STATE_UPDATE` snapshot for the current state (§4.5
    /// sync-after-join, §4.4 post-mutation broadcast).
    pub fn to_state_update(&self) -> Frame {
        Frame::StateUpdate {
            current_item: self.current_item().cloned(),
            current_index: self.current_index,
            total_items: self.deck.items.len(),
            status: self.status,
            history_count: self.history.len(),
            history: self.history.clone(),
            is_flipped: self.is_flipped,
            is_detailed_expanded: self.is_detailed_expanded,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str) -> Item {
        Item {
            id: id.to_string(),
            name: id.to_string(),
            short_text: String::new(),
            long_text: None,
            detailed_text: None,
            category: None,
            theme_color: None,
            image_url: None,
        }
    }

    fn deck(n: usize) -> Deck {
        Deck {
            id: "d".into(),
            items: (0..n).map(|i| item(&format!("i{i}"))).collect(),
            theme: None,
        }
    }

    #[test]
    fn solo_host_draw_sequence_p3() {
        let mut state = RoomState::new(deck(3), 1);
        assert_eq!(state.status(), GameStatus::Ready);
        assert_eq!(state.current_index(), -1);

        state.draw().unwrap();
        assert_eq!(state.history.len(), 0);
        assert_eq!(state.status(), GameStatus::Playing);

        state.draw().unwrap();
        assert_eq!(state.history.len(), 1);
        assert_eq!(state.current_index(), 1);

        state.draw().unwrap();
        assert_eq!(state.history.len(), 2);
        assert_eq!(state.status(), GameStatus::Finished);

        let err = state.draw().unwrap_err();
        assert!(matches!(err, RoomError::IllegalTransition { .. }));
        assert_eq!(state.status(), GameStatus::Finished);
    }

    #[test]
    fn draw_from_empty_deck_is_empty_deck_error() {
        let mut state = RoomState::new(deck(0), 1);
        assert_eq!(state.draw().unwrap_err(), RoomError::EmptyDeck);
        assert_eq!(state.status(), GameStatus::Ready);
    }

    #[test]
    fn pause_resume_cycle() {
        let mut state = RoomState::new(deck(3), 1);
        state.draw().unwrap();
        assert!(state.pause().is_ok());
        assert_eq!(state.status(), GameStatus::Paused);
        assert!(state.draw().is_err());
        assert!(state.resume().is_ok());
        assert_eq!(state.status(), GameStatus::Playing);
    }

    #[test]
    fn reset_returns_to_ready() {
        let mut state = RoomState::new(deck(3), 1);
        state.draw().unwrap();
        state.draw().unwrap();
        state.reset(99);
        assert_eq!(state.status(), GameStatus::Ready);
        assert_eq!(state.current_index(), -1);
        assert_eq!(state.history.len(), 0);
        assert_eq!(state.seed(), 99);
    }

    #[test]
    fn history_length_invariant_p3() {
        let mut state = RoomState::new(deck(5), 3);
        for _ in 0..4 {
            state.draw().unwrap();
            assert_eq!(state.history.len() as i64, state.current_index().max(0));
        }
    }
}
