//! Per-room participant set with role slots (§3, §4.5).

use std::collections::HashMap;
use tabula_core::ParticipantId;
use tabula_protocol::Frame;
use tokio::sync::mpsc::UnboundedSender;

type Outbound = UnboundedSender<Frame>;

/// A join attempt was rejected by capacity rules (§7 `CapacityError`).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinError {
    AlreadyConnected,
}

/// Exactly one Host slot, at most one Controller slot, any number of
/// Spectators (§3). Each slot carries the participant's stable identity
/// and its outbound frame channel.
#[derive(Default)]
pub struct Membership {
    host: Option<(ParticipantId, Outbound)>,
    controller: Option<(ParticipantId, Outbound)>,
    spectators: HashMap<ParticipantId, Outbound>,
}

impl Membership {
    pub fn with_host(host_id: ParticipantId, outbound: Outbound) -> Self {
        Self {
            host: Some((host_id, outbound)),
            controller: None,
            spectators: HashMap::new(),
        }
    }

    pub fn host_present(&self) -> bool {
        self.host.is_some()
    }

    pub fn host_sender(&self) -> Option<&Outbound> {
        self.host.as_ref().map(|(_, tx)| tx)
    }

    pub fn controller_sender(&self) -> Option<&Outbound> {
        self.controller.as_ref().map(|(_, tx)| tx)
    }

    pub fn spectator_count(&self) -> usize {
        self.spectators.len()
    }

    pub fn spectator_senders(&self) -> impl Iterator<Item = &Outbound> {
        self.spectators.values()
    }

    /// §4.5 Controller join, steps 2–3 (step 1, host-absent, is checked by
    /// the caller against `RoomState`/`host_present`).
    pub fn join_controller(&mut self, id: ParticipantId, outbound: Outbound) -> Result<(), JoinError> {
        if self.controller.is_some() {
            return Err(JoinError::AlreadyConnected);
        }
        self.controller = Some((id, outbound));
        Ok(())
    }

    /// §4.5 Spectator join, step 3 (no cap by default — §7 `CapacityError`
    /// notes spectator cap is implementation-chosen; this workspace leaves
    /// it unlimited).
    pub fn join_spectator(&mut self, id: ParticipantId, outbound: Outbound) {
        self.spectators.insert(id, outbound);
    }

    /// Which role, if any, `id` currently holds.
    pub fn role_of(&self, id: ParticipantId) -> Option<tabula_core::Role> {
        if self.host.as_ref().is_some_and(|(h, _)| *h == id) {
            return Some(tabula_core::Role::Host);
        }
        if self.controller.as_ref().is_some_and(|(c, _)| *c == id) {
            return Some(tabula_core::Role::Controller);
        }
        if self.spectators.contains_key(&id) {
            return Some(tabula_core::Role::Spectator);
        }
        None
    }

    /// Remove a participant from whichever slot it occupies. Returns the
    /// role it was removed from, if any (§4.5 "On any departure").
    pub fn remove(&mut self, id: ParticipantId) -> Option<tabula_core::Role> {
        if self.host.as_ref().is_some_and(|(h, _)| *h == id) {
            self.host = None;
            return Some(tabula_core::Role::Host);
        }
        if self.controller.as_ref().is_some_and(|(c, _)| *c == id) {
            self.controller = None;
            return Some(tabula_core::Role::Controller);
        }
        if self.spectators.remove(&id).is_some() {
            return Some(tabula_core::Role::Spectator);
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio::sync::mpsc::unbounded_channel;

    fn channel() -> Outbound {
        let (tx, _rx) = unbounded_channel();
        tx
    }

    #[test]
    fn controller_uniqueness_p6() {
        let host = ParticipantId::default();
        let mut membership = Membership::with_host(host, channel());
        let c1 = ParticipantId::default();
        let c2 = ParticipantId::default();
        assert!(membership.join_controller(c1, channel()).is_ok());
        assert_eq!(
            membership.join_controller(c2, channel()).unwrap_err(),
            JoinError::AlreadyConnected
        );
    }

    #[test]
    fn controller_slot_reopens_after_departure() {
        let host = ParticipantId::default();
        let mut membership = Membership::with_host(host, channel());
        let c1 = ParticipantId::default();
        membership.join_controller(c1, channel()).unwrap();
        membership.remove(c1);
        let c2 = ParticipantId::default();
        assert!(membership.join_controller(c2, channel()).is_ok());
    }

    #[test]
    fn spectators_are_uncapped_by_default() {
        let host = ParticipantId::default();
        let mut membership = Membership::with_host(host, channel());
        for _ in 0..50 {
            membership.join_spectator(ParticipantId::default(), channel());
        }
        assert_eq!(membership.spectator_count(), 50);
    }

    #[test]
    fn role_of_reports_correctly() {
        let host = ParticipantId::default();
        let mut membership = Membership::with_host(host, channel());
        let spectator = ParticipantId::default();
        membership.join_spectator(spectator, channel());
        assert_eq!(membership.role_of(host), Some(tabula_core::Role::Host));
        assert_eq!(
            membership.role_of(spectator),
            Some(tabula_core::Role::Spectator)
        );
        assert_eq!(membership.role_of(ParticipantId::default()), None);
    }
}
