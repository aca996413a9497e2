//! Shared application state for the UI server.

use std::sync::Arc;

use roster::core::types::Partition;
use roster::io::source::JsonFileSource;
use roster::io::status::StatusReporter;
use roster::loader::RecipientLoader;
use roster::table::RecipientTable;
use tokio::sync::{Mutex, broadcast};
use tracing::warn;

/// Events broadcast to SSE clients when the tables change.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChangeEvent {
    /// A load was dispatched; the tables are loading.
    LoadStarted { generation: u64 },
    /// Rows were (re)loaded or a table was re-sorted.
    TablesChanged,
    /// Checkbox state changed in one partition.
    SelectionChanged { partition: Partition },
    /// A load failed; `text` is shown to the user.
    StatusMessage { text: String },
}

/// Status reporter that logs and forwards failures to SSE clients.
#[derive(Debug, Clone)]
pub struct BroadcastReporter {
    event_tx: Arc<broadcast::Sender<ChangeEvent>>,
}

impl StatusReporter for BroadcastReporter {
    fn show_error_message(&self, text: &str) {
        warn!(error = text, "recipient load failed");
        let _ = self.event_tx.send(ChangeEvent::StatusMessage {
            text: text.to_string(),
        });
    }
}

pub type Loader = RecipientLoader<JsonFileSource, BroadcastReporter>;

/// Shared state accessible from all request handlers.
#[derive(Clone)]
pub struct AppState {
    /// The single table instance this server presents.
    pub table: Arc<Mutex<RecipientTable>>,
    /// Fetches recipient lists; reports failures to SSE clients.
    pub loader: Arc<Loader>,
    /// Broadcast sender for table change events.
    pub event_tx: Arc<broadcast::Sender<ChangeEvent>>,
}

impl AppState {
    pub fn new(table: RecipientTable, source: JsonFileSource, fetch_path: String) -> Self {
        let (event_tx, _) = broadcast::channel(64);
        let event_tx = Arc::new(event_tx);
        let reporter = BroadcastReporter {
            event_tx: event_tx.clone(),
        };
        Self {
            table: Arc::new(Mutex::new(table)),
            loader: Arc::new(RecipientLoader::new(source, reporter, fetch_path)),
            event_tx,
        }
    }

    pub fn notify(&self, event: ChangeEvent) {
        let _ = self.event_tx.send(event);
    }
}
