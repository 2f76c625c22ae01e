//! HTTP/WebSocket handlers: `GET /ws/{roomId}` and `POST /generate` (§6).

use crate::casino::{Casino, HostJoinError};
use crate::connection;
use actix_web::{web, HttpRequest, HttpResponse, Responder};
use serde::Deserialize;
use tabula_core::{CloseReason, ParticipantId, Role, RoomCode};
use tabula_gameroom::JoinOutcome;
use tokio::sync::mpsc::unbounded_channel;

/// Query parameters on `GET /ws/{roomId}` (§6, SPEC_FULL §6 addendum).
/// `deckId` and `seed` only matter for a Host join; Controller/Spectator
/// joins ignore them.
#[derive(Debug, Deserialize)]
pub struct WsQuery {
    pub role: String,
    #[serde(rename = "deckId")]
    pub deck_id: Option<String>,
    pub seed: Option<i32>,
}

pub async fn ws_connect(
    casino: web::Data<Casino>,
    path: web::Path<String>,
    query: web::Query<WsQuery>,
    req: HttpRequest,
    body: web::Payload,
) -> impl Responder {
    let Ok(code) = RoomCode::try_from(path.into_inner().as_str()) else {
        return HttpResponse::BadRequest().body("roomId must be a 4-character tabula room code");
    };
    let Ok(role) = query.role.parse::<Role>() else {
        return HttpResponse::BadRequest().body("role must be one of host, controller, spectator");
    };

    if role == Role::Host && query.deck_id.is_none() {
        return HttpResponse::BadRequest().body("host joins require a deckId query parameter");
    }

    let (response, session, stream) = match actix_ws::handle(&req, body) {
        Ok(parts) => parts,
        Err(err) => return HttpResponse::InternalServerError().body(err.to_string()),
    };

    let participant_id = ParticipantId::default();
    let (outbound_tx, outbound_rx) = unbounded_channel();

    let join = match role {
        Role::Host => {
            let deck_id = query.deck_id.clone().expect("checked above");
            let seed = query.seed.unwrap_or_else(tabula_shuffle::random_seed);
            match casino
                .host_join(code, participant_id, &deck_id, seed, outbound_tx)
                .await
            {
                Ok(handle) => (JoinOutcome::Accepted, Some(handle)),
                Err(HostJoinError::RoomCodeTaken) => {
                    (JoinOutcome::Rejected(CloseReason::AlreadyConnected), None)
                }
                Err(HostJoinError::DeckNotFound | HostJoinError::EmptyDeck) => {
                    (JoinOutcome::Rejected(CloseReason::RoomNotFound), None)
                }
            }
        }
        Role::Controller | Role::Spectator => {
            casino.join(code, role, participant_id, outbound_tx).await
        }
    };

    match join {
        (JoinOutcome::Accepted, Some(handle)) => {
            log::info!("{participant_id} joined room {code} as {role}");
            actix_web::rt::spawn(connection::run(
                handle,
                participant_id,
                role,
                session,
                stream,
                outbound_rx,
            ));
            response
        }
        (JoinOutcome::Rejected(reason), _) => {
            log::info!("{participant_id} rejected joining room {code} as {role}: {reason}");
            actix_web::rt::spawn(async move {
                let _ = session
                    .close(Some(actix_ws::CloseReason {
                        code: actix_ws::CloseCode::Policy,
                        description: Some(reason.to_string()),
                    }))
                    .await;
            });
            response
        }
        (JoinOutcome::Accepted, None) => {
            log::error!("join accepted with no room handle for {code}; closing");
            actix_web::rt::spawn(async move {
                let _ = session.close(None).await;
            });
            response
        }
    }
}

pub async fn generate(
    request: web::Json<tabula_boardgen::BoardGenRequest>,
) -> impl Responder {
    let budget = crate::config::board_gen_time_budget();
    match tabula_boardgen::generate(&request, budget) {
        Ok(result) => HttpResponse::Ok().json(result),
        Err(err) => {
            log::warn!("board generation rejected: {err}");
            let reasons = match err {
                tabula_boardgen::GeneratorError::Infeasible(reasons) => reasons,
                tabula_boardgen::GeneratorError::ConstructionFailed(reason) => vec![reason],
                tabula_boardgen::GeneratorError::DuplicateBoards => {
                    vec![err.to_string()]
                }
            };
            HttpResponse::UnprocessableEntity()
                .json(tabula_boardgen::BoardGenResult::infeasible(reasons))
        }
    }
}

pub async fn health() -> impl Responder {
    HttpResponse::Ok().body("ok")
}
