//! Server-Sent Events stream of table changes.

use std::convert::Infallible;
use std::time::Duration;

use axum::extract::State;
use axum::response::sse::{Event, KeepAlive, Sse};
use futures::stream::Stream;
use serde::Serialize;
use tokio::sync::broadcast;
use tracing::warn;

use crate::state::{AppState, ChangeEvent};

#[derive(Debug, Serialize, PartialEq, Eq)]
struct SsePayload {
    #[serde(rename = "type")]
    event_type: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    partition: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    generation: Option<u64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    text: Option<String>,
}

impl SsePayload {
    fn of_type(event_type: &'static str) -> Self {
        Self {
            event_type,
            partition: None,
            generation: None,
            text: None,
        }
    }
}

impl From<&ChangeEvent> for SsePayload {
    fn from(event: &ChangeEvent) -> Self {
        match event {
            ChangeEvent::LoadStarted { generation } => SsePayload {
                generation: Some(*generation),
                ..SsePayload::of_type("load_started")
            },
            ChangeEvent::TablesChanged => SsePayload::of_type("tables_changed"),
            ChangeEvent::SelectionChanged { partition } => SsePayload {
                partition: Some(partition.as_str()),
                ..SsePayload::of_type("selection_changed")
            },
            ChangeEvent::StatusMessage { text } => SsePayload {
                text: Some(text.clone()),
                ..SsePayload::of_type("status_message")
            },
        }
    }
}

/// SSE endpoint handler.
pub async fn events_handler(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let mut rx = state.event_tx.subscribe();

    let stream = async_stream::stream! {
        yield Ok(Event::default().event("connected").data("{}"));

        loop {
            match rx.recv().await {
                Ok(change_event) => {
                    let payload = SsePayload::from(&change_event);
                    if let Ok(json) = serde_json::to_string(&payload) {
                        yield Ok(Event::default().event("change").data(json));
                    }
                }
                Err(broadcast::error::RecvError::Lagged(n)) => {
                    warn!(skipped = n, "SSE client lagged, some events dropped");
                }
                Err(broadcast::error::RecvError::Closed) => {
                    break;
                }
            }
        }
    };

    Sse::new(stream).keep_alive(KeepAlive::new().interval(Duration::from_secs(15)).text("ping"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use roster::core::types::Partition;

    #[test]
    fn selection_payload_names_partition() {
        let payload = SsePayload::from(&ChangeEvent::SelectionChanged {
            partition: Partition::Instructors,
        });
        let json = serde_json::to_value(&payload).expect("serialize");
        assert_eq!(
            json,
            serde_json::json!({"type": "selection_changed", "partition": "instructors"})
        );
    }

    #[test]
    fn status_payload_carries_message_text() {
        let payload = SsePayload::from(&ChangeEvent::StatusMessage {
            text: "server down".to_string(),
        });
        assert_eq!(payload.event_type, "status_message");
        assert_eq!(payload.text.as_deref(), Some("server down"));
        assert_eq!(payload.partition, None);
    }

    #[test]
    fn plain_events_serialize_type_only() {
        let json = serde_json::to_string(&SsePayload::from(&ChangeEvent::TablesChanged))
            .expect("serialize");
        assert_eq!(json, r#"{"type":"tables_changed"}"#);
    }
}
