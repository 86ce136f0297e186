// rest_api/src/realtime.rs
//
// The "data changed" channel. Every successful mutation broadcasts an event
// to every connected WebSocket client, which refetches whatever it is
// showing. No per-entity targeting, no delivery guarantee, no backpressure:
// a lagged subscriber just skips ahead and misses updates.

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::State;
use axum::response::Response;
use futures::{SinkExt, StreamExt};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, info, warn};
use uuid::Uuid;

use models::{NewPatient, Visit};

use crate::AppState;

/// Outbound events. The adjacent tagging mirrors the event-name/payload
/// shape SPA clients subscribe to.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "data")]
pub enum RealtimeEvent {
    #[serde(rename = "health_data_update")]
    HealthDataUpdate,
    #[serde(rename = "visit:added")]
    VisitAdded {
        #[serde(rename = "patientId")]
        patient_id: i64,
        visit: Visit,
    },
    #[serde(rename = "vaccination:updated")]
    VaccinationUpdated {
        #[serde(rename = "patientId")]
        patient_id: i64,
        #[serde(rename = "vaccineId")]
        vaccine_id: i64,
    },
}

/// Inbound registration payload (the `new_patient` event): the abbreviated
/// field names the registration wizard emits.
#[derive(Debug, Clone, Deserialize)]
pub struct RealtimePatient {
    pub id: Option<String>,
    pub name: String,
    pub age: Option<i64>,
    pub gender: Option<String>,
    pub mobile: Option<String>,
    #[serde(rename = "abhaId")]
    pub abha_id: Option<String>,
    pub origin: Option<String>,
    pub district: Option<String>,
    pub housing: Option<String>,
    pub occupants: Option<i64>,
}

impl From<RealtimePatient> for NewPatient {
    fn from(p: RealtimePatient) -> Self {
        NewPatient {
            patient_id: p.id,
            full_name: p.name,
            age: p.age,
            gender: p.gender,
            mobile: p.mobile,
            abha_id: p.abha_id,
            origin_state: p.origin,
            current_location: p.district,
            accommodation_type: p.housing,
            room_occupancy: p.occupants,
            ..Default::default()
        }
    }
}

pub async fn ws_handler(ws: WebSocketUpgrade, State(state): State<AppState>) -> Response {
    ws.on_upgrade(move |socket| handle_socket(socket, state))
}

async fn handle_socket(socket: WebSocket, state: AppState) {
    let client_id = Uuid::new_v4();
    info!(%client_id, "realtime client connected");

    let mut events = state.events.subscribe();
    let (mut sink, mut stream) = socket.split();

    loop {
        tokio::select! {
            event = events.recv() => match event {
                Ok(event) => {
                    let text = match serde_json::to_string(&event) {
                        Ok(text) => text,
                        Err(e) => {
                            warn!(%client_id, error = %e, "failed to encode event");
                            continue;
                        }
                    };
                    if sink.send(Message::Text(text)).await.is_err() {
                        break;
                    }
                }
                // A slow client skips ahead; missed updates are acceptable.
                Err(broadcast::error::RecvError::Lagged(skipped)) => {
                    debug!(%client_id, skipped, "client lagged behind broadcast");
                }
                Err(broadcast::error::RecvError::Closed) => break,
            },
            incoming = stream.next() => match incoming {
                Some(Ok(Message::Text(text))) => {
                    handle_client_message(&state, &text).await;
                }
                Some(Ok(Message::Close(_))) | None => break,
                Some(Ok(_)) => {}
                Some(Err(e)) => {
                    debug!(%client_id, error = %e, "realtime receive error");
                    break;
                }
            },
        }
    }

    info!(%client_id, "realtime client disconnected");
}

/// Registration sync: a client-side wizard can push `new_patient` over the
/// socket instead of the REST endpoint. Errors are logged, never returned —
/// there is no reply channel to speak of.
async fn handle_client_message(state: &AppState, text: &str) {
    let value: serde_json::Value = match serde_json::from_str(text) {
        Ok(value) => value,
        Err(_) => return,
    };
    if value.get("event").and_then(|e| e.as_str()) != Some("new_patient") {
        return;
    }
    let payload = match value.get("data") {
        Some(data) => data.clone(),
        None => return,
    };
    let patient: RealtimePatient = match serde_json::from_value(payload) {
        Ok(patient) => patient,
        Err(e) => {
            warn!(error = %e, "malformed new_patient payload");
            return;
        }
    };

    match storage::patients::insert_patient(&state.pool, &patient.into()).await {
        Ok(created) => {
            info!(patient_id = %created.patient_id, "realtime registration synced");
            state.broadcast(RealtimeEvent::HealthDataUpdate);
        }
        Err(e) => warn!(error = %e, "realtime registration failed"),
    }
}
