//! Per-connection read/write pumps, heartbeat, and disconnect detection
//! (§4.8).

use futures::StreamExt;
use tabula_core::{
    CloseReason, ParticipantId, Role, HEARTBEAT_INTERVAL, HEARTBEAT_MISS_LIMIT, WRITE_QUEUE_DEPTH,
};
use tabula_gameroom::RoomHandle;
use tabula_protocol::Frame;
use tokio::sync::mpsc::UnboundedReceiver;

fn actix_close(reason: CloseReason) -> actix_ws::CloseReason {
    use actix_ws::{CloseCode, CloseReason as WsReason};
    let code = match reason {
        CloseReason::RoomNotFound
        | CloseReason::AlreadyConnected
        | CloseReason::GameEnded
        | CloseReason::BadFrame => CloseCode::Policy,
        CloseReason::SlowConsumer => CloseCode::Size,
        CloseReason::HeartbeatLost => CloseCode::Away,
        CloseReason::InternalError => CloseCode::Error,
    };
    WsReason {
        code,
        description: Some(reason.to_string()),
    }
}

/// Runs a connection's read/write pumps to completion (until the peer
/// disconnects, a heartbeat is lost, the outbound queue backs up past
/// [`WRITE_QUEUE_DEPTH`], or the room itself closes the channel). Always
/// calls [`RoomHandle::leave`] on the way out (§4.8 "On read error or
/// peer close: remove participant, notify Room").
pub async fn run(
    room: RoomHandle,
    participant_id: ParticipantId,
    role: Role,
    mut session: actix_ws::Session,
    mut stream: actix_ws::MessageStream,
    mut outbound: UnboundedReceiver<Frame>,
) {
    let mut heartbeat = tokio::time::interval(HEARTBEAT_INTERVAL);
    heartbeat.tick().await; // first tick fires immediately; skip it
    let mut missed_pongs: u32 = 0;

    let close_reason = 'pump: loop {
        tokio::select! {
            biased;

            _ = heartbeat.tick() => {
                if missed_pongs >= HEARTBEAT_MISS_LIMIT {
                    break 'pump Some(CloseReason::HeartbeatLost);
                }
                missed_pongs += 1;
                if session.ping(b"").await.is_err() {
                    break 'pump Some(CloseReason::InternalError);
                }
            }

            frame = outbound.recv() => {
                match frame {
                    Some(frame) => {
                        if outbound.len() > WRITE_QUEUE_DEPTH {
                            break 'pump Some(CloseReason::SlowConsumer);
                        }
                        let text = tabula_protocol::encode(&frame);
                        if session.text(text).await.is_err() {
                            break 'pump None;
                        }
                    }
                    None => break 'pump None,
                }
            }

            msg = stream.next() => {
                match msg {
                    Some(Ok(actix_ws::Message::Text(text))) => {
                        match tabula_protocol::decode(&text) {
                            Ok(frame) => room.send_inbound(participant_id, frame),
                            Err(err) => {
                                log::debug!("{participant_id} ({role}) sent a bad frame: {err}");
                                break 'pump Some(CloseReason::BadFrame);
                            }
                        }
                    }
                    Some(Ok(actix_ws::Message::Pong(_))) => {
                        missed_pongs = 0;
                    }
                    Some(Ok(actix_ws::Message::Close(_))) => break 'pump None,
                    Some(Ok(_)) => {}
                    Some(Err(_)) | None => break 'pump None,
                }
            }
        }
    };

    room.leave(participant_id);

    let _ = match close_reason {
        Some(reason) => session.close(Some(actix_close(reason))).await,
        None => session.close(None).await,
    };
}
