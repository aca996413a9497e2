//! Recipient loader: fetch from a source and hand the result to the table.

use tracing::debug;

use crate::core::types::RecipientRecord;
use crate::io::config::RosterConfig;
use crate::io::source::{FetchError, QueryParams, RecipientSource};
use crate::io::status::StatusReporter;
use crate::table::{LoadOutcome, RecipientTable};

pub struct RecipientLoader<S, R> {
    source: S,
    reporter: R,
    fetch_path: String,
}

impl<S: RecipientSource, R: StatusReporter> RecipientLoader<S, R> {
    pub fn new(source: S, reporter: R, fetch_path: impl Into<String>) -> Self {
        Self {
            source,
            reporter,
            fetch_path: fetch_path.into(),
        }
    }

    pub fn from_config(source: S, reporter: R, cfg: &RosterConfig) -> Self {
        Self::new(source, reporter, cfg.fetch_path.clone())
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn reporter(&self) -> &R {
        &self.reporter
    }

    /// Fetch the flat recipient list without touching any table.
    pub async fn fetch(&self, params: &QueryParams) -> Result<Vec<RecipientRecord>, FetchError> {
        debug!(path = %self.fetch_path, ?params, "fetching recipients");
        let response = self.source.get(&self.fetch_path, params).await?;
        Ok(response.students_response)
    }

    /// Dispatch, fetch and complete one load against `table`.
    ///
    /// Holds `table` for the whole fetch; hosts that share a table across
    /// tasks call [`RecipientTable::begin_load`], [`Self::fetch`] and
    /// [`RecipientTable::finish_load`] themselves.
    pub async fn load(&self, table: &mut RecipientTable, params: &QueryParams) -> LoadOutcome {
        let ticket = table.begin_load();
        let result = self.fetch(params).await;
        table.finish_load(ticket, result, &self.reporter)
    }
}
