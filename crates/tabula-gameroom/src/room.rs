//! The per-room actor (§5): a single inbox worker owns `RoomState`,
//! `Membership`, and the `Coalescer`, giving total ordering of events
//! within a room with no locks beyond the inbox itself.

use crate::{audience_for, Audience, Coalescer, JoinError, Membership, RoomState};
use tabula_core::{CloseReason, ParticipantId, Role, RoomCode};
use tabula_deck::Deck;
use tabula_protocol::Frame;
use tokio::sync::{mpsc, oneshot};

/// Result of a join attempt, delivered back through a oneshot reply.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum JoinOutcome {
    Accepted,
    Rejected(CloseReason),
}

/// A message posted into a room's inbox. Participants never touch
/// `RoomState`/`Membership` directly — everything funnels through here.
pub enum Command {
    Join {
        role: Role,
        participant_id: ParticipantId,
        outbound: mpsc::UnboundedSender<Frame>,
        reply: oneshot::Sender<JoinOutcome>,
    },
    Inbound {
        participant_id: ParticipantId,
        frame: Frame,
    },
    Leave {
        participant_id: ParticipantId,
    },
}

/// External handle to a running room. Cheap to clone; all methods post to
/// the room's inbox and return once the room has processed the message.
#[derive(Clone)]
pub struct RoomHandle {
    code: RoomCode,
    tx: mpsc::UnboundedSender<Command>,
}

impl RoomHandle {
    pub fn code(&self) -> RoomCode {
        self.code
    }

    pub async fn join(
        &self,
        role: Role,
        participant_id: ParticipantId,
        outbound: mpsc::UnboundedSender<Frame>,
    ) -> JoinOutcome {
        let (reply, rx) = oneshot::channel();
        if self
            .tx
            .send(Command::Join {
                role,
                participant_id,
                outbound,
                reply,
            })
            .is_err()
        {
            return JoinOutcome::Rejected(CloseReason::RoomNotFound);
        }
        rx.await.unwrap_or(JoinOutcome::Rejected(CloseReason::InternalError))
    }

    pub fn send_inbound(&self, participant_id: ParticipantId, frame: Frame) {
        let _ = self.tx.send(Command::Inbound { participant_id, frame });
    }

    pub fn leave(&self, participant_id: ParticipantId) {
        let _ = self.tx.send(Command::Leave { participant_id });
    }
}

/// Threshold of dropped (`AuthorizationError`) frames before a connection
/// is closed with `BadFrame` (§7).
const AUTH_VIOLATION_LIMIT: u32 = 5;

/// The room itself. Constructed with its founding Host, then run to
/// completion by [`Room::run`].
pub struct Room {
    code: RoomCode,
    state: RoomState,
    membership: Membership,
    coalescer: Coalescer,
    sound_enabled: bool,
    sound_scope: tabula_protocol::SoundScope,
    violations: std::collections::HashMap<ParticipantId, u32>,
}

impl Room {
    /// Spawn a new room with its founding Host already attached (§4.5:
    /// "On Host join to an unclaimed roomId: create Room, store Host").
    /// Returns the handle the caller uses to interact with it and the
    /// future that must be spawned to actually run it.
    pub fn spawn(
        code: RoomCode,
        host_id: ParticipantId,
        host_outbound: mpsc::UnboundedSender<Frame>,
        deck: Deck,
        seed: i32,
    ) -> (RoomHandle, impl std::future::Future<Output = ()>) {
        let (tx, rx) = mpsc::unbounded_channel();
        let room = Room {
            code,
            state: RoomState::new(deck, seed),
            membership: Membership::with_host(host_id, host_outbound),
            coalescer: Coalescer::new(),
            sound_enabled: true,
            sound_scope: tabula_protocol::SoundScope::Both,
            violations: std::collections::HashMap::new(),
        };
        let handle = RoomHandle { code, tx };
        (handle, room.run(rx))
    }

    pub async fn run(mut self, mut inbox: mpsc::UnboundedReceiver<Command>) {
        let mut window = tokio::time::interval(tabula_core::COALESCER_WINDOW);
        log::info!("room {} created", self.code);
        loop {
            tokio::select! {
                biased;
                _ = window.tick() => {
                    if let Some(reactions) = self.coalescer.take_if_nonempty() {
                        self.fanout(&Frame::ReactionBurst { reactions });
                    }
                }
                cmd = inbox.recv() => {
                    match cmd {
                        Some(cmd) => {
                            if self.handle(cmd) {
                                break;
                            }
                        }
                        None => break,
                    }
                }
            }
        }
        log::info!("room {} destroyed", self.code);
    }

    /// Returns `true` if the room should shut down after this command.
    fn handle(&mut self, cmd: Command) -> bool {
        match cmd {
            Command::Join {
                role,
                participant_id,
                outbound,
                reply,
            } => {
                self.handle_join(role, participant_id, outbound, reply);
                false
            }
            Command::Inbound { participant_id, frame } => {
                self.handle_inbound(participant_id, frame)
            }
            Command::Leave { participant_id } => self.handle_leave(participant_id),
        }
    }

    fn handle_join(
        &mut self,
        role: Role,
        participant_id: ParticipantId,
        outbound: mpsc::UnboundedSender<Frame>,
        reply: oneshot::Sender<JoinOutcome>,
    ) {
        let outcome = match role {
            Role::Host => JoinOutcome::Rejected(CloseReason::AlreadyConnected),
            Role::Controller => {
                if !self.membership.host_present() {
                    JoinOutcome::Rejected(CloseReason::RoomNotFound)
                } else {
                    match self.membership.join_controller(participant_id, outbound.clone()) {
                        Ok(()) => {
                            let _ = outbound.send(self.state.to_state_update());
                            let _ = outbound.send(Frame::SoundPreferenceAck {
                                enabled: self.sound_enabled,
                                scope: self.sound_scope,
                            });
                            JoinOutcome::Accepted
                        }
                        Err(JoinError::AlreadyConnected) => {
                            JoinOutcome::Rejected(CloseReason::AlreadyConnected)
                        }
                    }
                }
            }
            Role::Spectator => {
                if !self.membership.host_present() {
                    JoinOutcome::Rejected(CloseReason::RoomNotFound)
                } else if self.state.status() == tabula_protocol::GameStatus::Finished {
                    JoinOutcome::Rejected(CloseReason::GameEnded)
                } else {
                    self.membership.join_spectator(participant_id, outbound.clone());
                    let _ = outbound.send(self.state.to_state_update());
                    self.fanout_spectator_count();
                    JoinOutcome::Accepted
                }
            }
        };
        let _ = reply.send(outcome);
    }

    fn handle_inbound(&mut self, participant_id: ParticipantId, frame: Frame) -> bool {
        let role = self.membership.role_of(participant_id);
        match (&frame, role) {
            (Frame::Reaction { emoji }, Some(Role::Spectator)) => {
                self.coalescer.record(*emoji);
                false
            }
            (
                Frame::DrawCard
                | Frame::PauseGame
                | Frame::ResumeGame
                | Frame::ResetGame
                | Frame::FlipCard { .. }
                | Frame::ToggleDetailed { .. },
                Some(Role::Controller),
            ) => {
                self.handle_game_command(frame);
                false
            }
            (Frame::SoundPreference { enabled, scope, .. }, Some(Role::Controller | Role::Host)) => {
                self.sound_enabled = *enabled;
                self.sound_scope = *scope;
                if let Audience::HostOnly = audience_for(&frame) {
                    if let Some(tx) = self.membership.host_sender() {
                        let _ = tx.send(frame);
                    }
                }
                false
            }
            (Frame::SoundPreferenceAck { .. }, Some(Role::Host)) => {
                if let Some(tx) = self.membership.controller_sender() {
                    let _ = tx.send(frame);
                }
                false
            }
            _ => self.note_violation(participant_id),
        }
    }

    fn handle_game_command(&mut self, frame: Frame) {
        let result = match &frame {
            Frame::DrawCard => self.state.draw(),
            Frame::PauseGame => self.state.pause(),
            Frame::ResumeGame => self.state.resume(),
            Frame::ResetGame => {
                self.state.reset(tabula_shuffle::random_seed());
                Ok(())
            }
            Frame::FlipCard { is_flipped } => {
                self.state.set_flipped(*is_flipped);
                Ok(())
            }
            Frame::ToggleDetailed { is_expanded } => {
                self.state.set_detailed_expanded(*is_expanded);
                Ok(())
            }
            _ => unreachable!("only game commands reach this branch"),
        };
        match result {
            Ok(()) => {
                if let Some(tx) = self.membership.host_sender() {
                    let _ = tx.send(frame);
                }
                self.fanout_state_update();
            }
            Err(err) => {
                log::debug!("rejected {}: {err}", frame.label());
                if let Some(tx) = self.membership.controller_sender() {
                    let _ = tx.send(self.state.to_state_update());
                }
            }
        }
    }

    /// §7 `AuthorizationError`: drop silently, count, close past a
    /// threshold.
    fn note_violation(&mut self, participant_id: ParticipantId) -> bool {
        let count = self.violations.entry(participant_id).or_insert(0);
        *count += 1;
        if *count >= AUTH_VIOLATION_LIMIT {
            log::warn!("closing {participant_id} after repeated protocol violations");
            self.handle_leave(participant_id);
        }
        false
    }

    /// Returns `true` if this departure ends the room (Host left).
    fn handle_leave(&mut self, participant_id: ParticipantId) -> bool {
        let Some(role) = self.membership.remove(participant_id) else {
            return false;
        };
        self.violations.remove(&participant_id);
        self.fanout_spectator_count();
        if role == Role::Host {
            self.state_mark_finished_and_notify();
            return true;
        }
        false
    }

    fn state_mark_finished_and_notify(&mut self) {
        self.state.force_finished();
        self.fanout(&self.state.to_state_update());
    }

    fn fanout_state_update(&mut self) {
        let frame = self.state.to_state_update();
        self.fanout(&frame);
    }

    fn fanout_spectator_count(&self) {
        let frame = Frame::SpectatorCount {
            count: self.membership.spectator_count(),
        };
        self.fanout(&frame);
    }

    /// Writes `frame` to every slot in its audience. Best-effort: a closed
    /// channel for one target never affects another (§4.3).
    fn fanout(&self, frame: &Frame) {
        match audience_for(frame) {
            Audience::HostOnly => {
                if let Some(tx) = self.membership.host_sender() {
                    let _ = tx.send(frame.clone());
                }
            }
            Audience::ControllerOnly => {
                if let Some(tx) = self.membership.controller_sender() {
                    let _ = tx.send(frame.clone());
                }
            }
            Audience::ControllerAndSpectators => {
                if let Some(tx) = self.membership.controller_sender() {
                    let _ = tx.send(frame.clone());
                }
                for tx in self.membership.spectator_senders() {
                    let _ = tx.send(frame.clone());
                }
            }
            Audience::HostAndSpectators => {
                if let Some(tx) = self.membership.host_sender() {
                    let _ = tx.send(frame.clone());
                }
                for tx in self.membership.spectator_senders() {
                    let _ = tx.send(frame.clone());
                }
            }
            Audience::None => {}
        }
    }
}
