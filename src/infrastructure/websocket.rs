//! WebSocket handler for sheet clients
//!
//! A client gets a full snapshot on connect and then every store event. Edits
//! sent by any client go through the store, so all clients see them.

use std::sync::Arc;

use axum::{
    extract::{
        ws::{Message, WebSocket, WebSocketUpgrade},
        State,
    },
    response::IntoResponse,
};
use futures_util::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::{broadcast::error::RecvError, mpsc};

use crate::application::dto::{
    parse_score, AbilityRollDto, CharacterSheetDto, SessionSnapshotDto, ThemeDto, ValidationError,
};
use crate::domain::events::DomainEvent;
use crate::domain::value_objects::{Ability, ClientId};
use crate::infrastructure::state::AppState;

/// WebSocket upgrade handler
pub async fn ws_handler(
    ws: WebSocketUpgrade,
    State(state): State<Arc<AppState>>,
) -> impl IntoResponse {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

/// Handle an individual WebSocket connection
async fn handle_socket(socket: WebSocket, state: Arc<AppState>) {
    let (mut ws_sender, mut ws_receiver) = socket.split();
    let client_id = ClientId::new();
    let (tx, mut rx) = mpsc::unbounded_channel::<ServerMessage>();

    tracing::info!("New WebSocket connection established: {}", client_id);

    // Subscribe before taking the snapshot so no change falls in between
    let mut events = state.events.subscribe();
    let _ = tx.send(snapshot(&state).await);

    let send_task = tokio::spawn(async move {
        while let Some(msg) = rx.recv().await {
            if let Ok(json) = serde_json::to_string(&msg) {
                if ws_sender.send(Message::Text(json.into())).await.is_err() {
                    break;
                }
            }
        }
    });

    let event_tx = tx.clone();
    let event_task = tokio::spawn(async move {
        loop {
            match events.recv().await {
                Ok(event) => {
                    if event_tx.send(ServerMessage::from(event)).is_err() {
                        break;
                    }
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::warn!("Client {} lagged, skipped {} events", client_id, skipped);
                }
                Err(RecvError::Closed) => break,
            }
        }
    });

    while let Some(result) = ws_receiver.next().await {
        match result {
            Ok(Message::Text(text)) => match serde_json::from_str::<ClientMessage>(&text) {
                Ok(msg) => {
                    if let Some(response) = handle_message(msg, &state, &tx).await {
                        if tx.send(response).is_err() {
                            break;
                        }
                    }
                }
                Err(e) => {
                    tracing::warn!("Failed to parse message: {}", e);
                    let error = ServerMessage::error(
                        "PARSE_ERROR",
                        format!("Invalid message format: {}", e),
                    );
                    if tx.send(error).is_err() {
                        break;
                    }
                }
            },
            Ok(Message::Close(_)) => {
                tracing::info!("WebSocket connection closed by client: {}", client_id);
                break;
            }
            Err(e) => {
                tracing::error!("WebSocket error for client {}: {}", client_id, e);
                break;
            }
            _ => {}
        }
    }

    event_task.abort();
    send_task.abort();

    tracing::info!("WebSocket connection terminated: {}", client_id);
}

async fn snapshot(state: &AppState) -> ServerMessage {
    let store = state.store.read().await;
    let snapshot = SessionSnapshotDto {
        sheet: CharacterSheetDto::from(&store.character()),
        theme: ThemeDto::from(&store.theme()),
        auto_fill: store.auto_fill_enabled(),
    };
    ServerMessage::Snapshot(snapshot)
}

fn parse_ability(raw: &str) -> Result<Ability, ServerMessage> {
    raw.parse::<Ability>()
        .map_err(|e| ServerMessage::error("INVALID_ABILITY", e.to_string()))
}

/// Apply one client message. State changes reach every client through the
/// event channel, so only errors, pongs and roll results are answered here.
async fn handle_message(
    msg: ClientMessage,
    state: &Arc<AppState>,
    tx: &mpsc::UnboundedSender<ServerMessage>,
) -> Option<ServerMessage> {
    match msg {
        ClientMessage::Heartbeat => Some(ServerMessage::Pong),

        ClientMessage::SetAbilityScore { ability, score } => {
            let ability = match parse_ability(&ability) {
                Ok(ability) => ability,
                Err(error) => return Some(error),
            };
            match parse_score(ability, &score) {
                Ok(score) => {
                    state.store.write().await.set_ability_score(ability, score);
                    None
                }
                Err(e) => Some(ServerMessage::error("INVALID_SCORE", e.to_string())),
            }
        }

        ClientMessage::SetProficiencyBonus { bonus } => {
            state.store.write().await.set_proficiency_bonus(bonus);
            None
        }

        ClientMessage::ToggleSkillProficiency { name } => {
            match state.store.write().await.toggle_skill_proficiency(&name) {
                Ok(_) => None,
                Err(e) => Some(ServerMessage::error("SKILL_NOT_FOUND", e.to_string())),
            }
        }

        ClientMessage::ToggleSavingThrowProficiency { ability } => match parse_ability(&ability) {
            Ok(ability) => {
                state
                    .store
                    .write()
                    .await
                    .toggle_saving_throw_proficiency(ability);
                None
            }
            Err(error) => Some(error),
        },

        ClientMessage::RollAbility { ability } => {
            let ability = match parse_ability(&ability) {
                Ok(ability) => ability,
                Err(error) => return Some(error),
            };
            // The roll is paced; run it off the read loop
            let state = state.clone();
            let tx = tx.clone();
            tokio::spawn(async move {
                let outcome = state.dice.roll_animated(&state.store, Some(ability)).await;
                let _ = tx.send(ServerMessage::AbilityRolled {
                    roll: outcome.to_dto(),
                });
            });
            None
        }

        ClientMessage::ToggleAutoFill => {
            state.store.write().await.toggle_auto_fill();
            None
        }

        ClientMessage::SelectTheme { theme_id } => {
            let mut themes = state.themes.write().await;
            let mut store = state.store.write().await;
            match themes.select_by_id(&mut store, &theme_id) {
                Ok(_) => None,
                Err(e @ ValidationError::UnknownTheme(_)) => {
                    Some(ServerMessage::error("UNKNOWN_THEME", e.to_string()))
                }
                Err(e) => Some(ServerMessage::error("INVALID_THEME", e.to_string())),
            }
        }
    }
}

// ============================================================================
// Message Types
// ============================================================================

/// Messages from client to server
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ClientMessage {
    /// Set an ability score; the score may be a number or numeric string
    SetAbilityScore {
        ability: String,
        score: serde_json::Value,
    },
    ToggleSkillProficiency {
        name: String,
    },
    ToggleSavingThrowProficiency {
        ability: String,
    },
    SetProficiencyBonus {
        bonus: i32,
    },
    /// Roll 4d6-drop-lowest for an ability (auto-filled when enabled)
    RollAbility {
        ability: String,
    },
    ToggleAutoFill,
    SelectTheme {
        theme_id: String,
    },
    Heartbeat,
}

/// Messages from server to client
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all_fields = "camelCase")]
pub enum ServerMessage {
    /// Full session state, sent once on connect
    Snapshot(SessionSnapshotDto),
    CharacterUpdated {
        sheet: CharacterSheetDto,
    },
    ThemeChanged {
        theme: ThemeDto,
    },
    AutoFillChanged {
        enabled: bool,
    },
    /// Result of this client's RollAbility
    AbilityRolled {
        roll: AbilityRollDto,
    },
    Pong,
    Error {
        code: String,
        message: String,
    },
}

impl ServerMessage {
    fn error(code: &str, message: impl Into<String>) -> Self {
        ServerMessage::Error {
            code: code.to_string(),
            message: message.into(),
        }
    }
}

impl From<DomainEvent> for ServerMessage {
    fn from(event: DomainEvent) -> Self {
        match event {
            DomainEvent::CharacterChanged { sheet, .. } => ServerMessage::CharacterUpdated {
                sheet: CharacterSheetDto::from(&sheet),
            },
            DomainEvent::ThemeChanged { theme, .. } => ServerMessage::ThemeChanged {
                theme: ThemeDto::from(&theme),
            },
            DomainEvent::AutoFillChanged { enabled, .. } => {
                ServerMessage::AutoFillChanged { enabled }
            }
        }
    }
}
