//! Process-wide room registry (§5 "the `RoomId → Room` registry is
//! protected by a single mutex; it is touched only at room
//! creation/destruction"). Named `Casino` after the reference
//! workspace's own room-table type.

use std::collections::HashMap;
use std::sync::Arc;
use tabula_core::{CloseReason, ParticipantId, Role, RoomCode};
use tabula_deck::DeckCatalog;
use tabula_gameroom::{JoinOutcome, Room, RoomHandle};
use tabula_protocol::Frame;
use tokio::sync::{mpsc::UnboundedSender, RwLock};

/// A Host join attempt failed before a room could be created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostJoinError {
    /// `deckId` did not resolve through the [`DeckCatalog`].
    DeckNotFound,
    /// The resolved deck has nothing to draw (§3: `|items| ≥ S` is
    /// enforced before use in a room; a room's minimum playable size is
    /// one item).
    EmptyDeck,
    /// The requested `roomId` is already claimed by a live room (§3:
    /// "Rooms are created on the first successful Host join for an
    /// unused roomId").
    RoomCodeTaken,
}

/// Central registry of live rooms. Cheap to clone (an `Arc` around the
/// actual map); the lock is only ever held for the brief insert/remove at
/// room creation/destruction, matching §5's low-contention expectation.
#[derive(Clone)]
pub struct Casino {
    rooms: Arc<RwLock<HashMap<RoomCode, RoomHandle>>>,
    catalog: Arc<dyn DeckCatalog>,
}

impl Casino {
    pub fn new(catalog: Arc<dyn DeckCatalog>) -> Self {
        Self {
            rooms: Arc::new(RwLock::new(HashMap::new())),
            catalog,
        }
    }

    /// §4.5 "On Host join to an unclaimed roomId: create Room, store
    /// Host". Adopts the `code` the Host connected with (the `{roomId}`
    /// path segment) rather than minting one of its own: rejects with
    /// `RoomCodeTaken` if a room is already registered under it,
    /// otherwise resolves `deck_id` through the catalog, spawns the room
    /// under `participant_id` as its Host, and registers a reaper that
    /// removes the entry once the room's own run loop ends (Host
    /// departure, §4.5). The insert happens while still holding the
    /// write lock so a concurrent host_join for the same code can never
    /// race past the `contains_key` check.
    pub async fn host_join(
        &self,
        code: RoomCode,
        participant_id: ParticipantId,
        deck_id: &str,
        seed: i32,
        outbound: UnboundedSender<Frame>,
    ) -> Result<RoomHandle, HostJoinError> {
        let deck = self.catalog.find(deck_id).ok_or(HostJoinError::DeckNotFound)?;
        deck.ensure_capacity(1).map_err(|_| HostJoinError::EmptyDeck)?;

        let mut rooms = self.rooms.write().await;
        if rooms.contains_key(&code) {
            return Err(HostJoinError::RoomCodeTaken);
        }

        let (handle, run) = Room::spawn(code, participant_id, outbound, deck, seed);
        rooms.insert(code, handle.clone());
        drop(rooms);

        let rooms = Arc::clone(&self.rooms);
        tokio::spawn(async move {
            run.await;
            rooms.write().await.remove(&code);
        });

        Ok(handle)
    }

    /// §4.5 Controller/Spectator join: look the room up and hand off to
    /// its actor. A missing room is `RoomNotFound` regardless of role —
    /// the per-role rejection rules inside [`Room`] only apply once a
    /// room actually exists.
    pub async fn join(
        &self,
        code: RoomCode,
        role: Role,
        participant_id: ParticipantId,
        outbound: UnboundedSender<Frame>,
    ) -> (JoinOutcome, Option<RoomHandle>) {
        let handle = self.rooms.read().await.get(&code).cloned();
        let Some(handle) = handle else {
            return (JoinOutcome::Rejected(CloseReason::RoomNotFound), None);
        };
        let outcome = handle.join(role, participant_id, outbound).await;
        (outcome, Some(handle))
    }

    pub async fn room_count(&self) -> usize {
        self.rooms.read().await.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tabula_deck::{Deck, Item, StaticCatalog};
    use tokio::sync::mpsc::unbounded_channel;

    fn deck() -> Deck {
        Deck {
            id: "d1".into(),
            items: vec![Item {
                id: "i1".into(),
                name: "One".into(),
                short_text: String::new(),
                long_text: None,
                detailed_text: None,
                category: None,
                theme_color: None,
                image_url: None,
            }],
            theme: None,
        }
    }

    fn catalog() -> Arc<dyn DeckCatalog> {
        Arc::new(StaticCatalog::new().with_deck(deck()))
    }

    fn code(s: &str) -> RoomCode {
        RoomCode::try_from(s).unwrap()
    }

    #[tokio::test]
    async fn empty_deck_is_rejected() {
        let catalog: Arc<dyn DeckCatalog> = Arc::new(StaticCatalog::new().with_deck(Deck {
            id: "empty".into(),
            items: vec![],
            theme: None,
        }));
        let casino = Casino::new(catalog);
        let (tx, _rx) = unbounded_channel();
        let err = casino
            .host_join(code("ABCD"), ParticipantId::default(), "empty", 1, tx)
            .await
            .unwrap_err();
        assert_eq!(err, HostJoinError::EmptyDeck);
        assert_eq!(casino.room_count().await, 0);
    }

    #[tokio::test]
    async fn unknown_deck_is_rejected() {
        let casino = Casino::new(catalog());
        let (tx, _rx) = unbounded_channel();
        let err = casino
            .host_join(code("ABCD"), ParticipantId::default(), "missing", 1, tx)
            .await
            .unwrap_err();
        assert_eq!(err, HostJoinError::DeckNotFound);
        assert_eq!(casino.room_count().await, 0);
    }

    #[tokio::test]
    async fn host_join_registers_a_room_under_the_requested_code() {
        let casino = Casino::new(catalog());
        let (tx, _rx) = unbounded_channel();
        let requested = code("ABCD");
        let _handle = casino
            .host_join(requested, ParticipantId::default(), "d1", 1, tx)
            .await
            .unwrap();
        assert_eq!(casino.room_count().await, 1);
        let (outcome, handle) = casino
            .join(requested, Role::Controller, ParticipantId::default(), unbounded_channel().0)
            .await;
        assert_eq!(outcome, JoinOutcome::Accepted);
        assert!(handle.is_some());
    }

    #[tokio::test]
    async fn second_host_join_to_a_claimed_code_is_rejected() {
        let casino = Casino::new(catalog());
        let requested = code("ABCD");
        let (tx1, _rx1) = unbounded_channel();
        casino
            .host_join(requested, ParticipantId::default(), "d1", 1, tx1)
            .await
            .unwrap();

        let (tx2, _rx2) = unbounded_channel();
        let err = casino
            .host_join(requested, ParticipantId::default(), "d1", 2, tx2)
            .await
            .unwrap_err();
        assert_eq!(err, HostJoinError::RoomCodeTaken);
        assert_eq!(casino.room_count().await, 1);
    }

    #[tokio::test]
    async fn join_to_unknown_room_is_room_not_found() {
        let casino = Casino::new(catalog());
        let (outcome, handle) = casino
            .join(
                RoomCode::try_from("ABCD").unwrap(),
                Role::Spectator,
                ParticipantId::default(),
                unbounded_channel().0,
            )
            .await;
        assert_eq!(outcome, JoinOutcome::Rejected(CloseReason::RoomNotFound));
        assert!(handle.is_none());
    }

    #[tokio::test]
    async fn room_is_reaped_after_host_leaves() {
        let casino = Casino::new(catalog());
        let (tx, _rx) = unbounded_channel();
        let requested = code("ABCD");
        let host_id = ParticipantId::default();
        let handle = casino
            .host_join(requested, host_id, "d1", 1, tx)
            .await
            .unwrap();
        assert_eq!(casino.room_count().await, 1);
        handle.leave(host_id);
        // Give the room's run loop a moment to observe the departure and
        // the reaper task a moment to remove the registry entry.
        tokio::time::sleep(std::time::Duration::from_millis(50)).await;
        let (outcome, _) = casino
            .join(requested, Role::Spectator, ParticipantId::default(), unbounded_channel().0)
            .await;
        assert_eq!(outcome, JoinOutcome::Rejected(CloseReason::RoomNotFound));
    }
}
