//! HTTP route handlers for the UI API.

use axum::Router;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::{get, post};
use roster::core::types::{Partition, RemindRequest, SortKey, TableState};
use roster::io::source::QueryParams;
use roster::table::LoadOutcome;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, error};

use crate::state::{AppState, ChangeEvent};

/// Build the API router.
pub fn api_router() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/load", post(load))
        .route("/tables", get(get_tables))
        .route("/tables/{partition}/sort", post(sort_table))
        .route("/tables/{partition}/select-all", post(select_all))
        .route("/tables/{partition}/rows/{index}/select", post(select_row))
        .route("/remind/{scope}", get(remind))
}

async fn health() -> &'static str {
    "ok"
}

#[derive(Debug, Default, Deserialize)]
struct LoadBody {
    #[serde(default)]
    params: QueryParams,
}

/// POST /api/load - fetch recipients and merge them into the tables.
///
/// The table lock is released while the fetch is in flight; a newer load
/// dispatched meanwhile wins and this one reports `superseded`. The load runs
/// in its own task, so it completes even when the client goes away.
async fn load(
    State(state): State<AppState>,
    Json(body): Json<LoadBody>,
) -> Result<Json<LoadOutcome>, StatusCode> {
    let task = tokio::spawn(run_load(state, body.params));
    match task.await {
        Ok(outcome) => Ok(Json(outcome)),
        Err(err) => {
            error!(error = %err, "load task failed");
            Err(StatusCode::INTERNAL_SERVER_ERROR)
        }
    }
}

async fn run_load(state: AppState, params: QueryParams) -> LoadOutcome {
    let ticket = state.table.lock().await.begin_load();
    state.notify(ChangeEvent::LoadStarted {
        generation: ticket.generation(),
    });

    let result = state.loader.fetch(&params).await;

    let outcome = state
        .table
        .lock()
        .await
        .finish_load(ticket, result, state.loader.reporter());
    if matches!(outcome, LoadOutcome::Applied { .. }) {
        state.notify(ChangeEvent::TablesChanged);
    }
    outcome
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct TablesView<'a> {
    loading: bool,
    last_load_succeeded: bool,
    locale: &'a str,
    students: &'a TableState,
    instructors: &'a TableState,
}

/// GET /api/tables - both partitions with sort and checkbox state.
async fn get_tables(State(state): State<AppState>) -> Result<Json<Value>, StatusCode> {
    let table = state.table.lock().await;
    let view = TablesView {
        loading: table.is_loading(),
        last_load_succeeded: table.last_load_succeeded(),
        locale: table.locale(),
        students: table.students(),
        instructors: table.instructors(),
    };
    let value = serde_json::to_value(view).map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?;
    Ok(Json(value))
}

#[derive(Debug, Deserialize)]
struct SortBody {
    key: String,
}

/// POST /api/tables/:partition/sort - toggle-sort one partition.
///
/// Unknown key names sort as `none`.
async fn sort_table(
    State(state): State<AppState>,
    Path(partition): Path<String>,
    Json(body): Json<SortBody>,
) -> Result<Json<Value>, StatusCode> {
    let partition = parse_partition(&partition)?;
    let key = SortKey::from_name(&body.key);
    let value = {
        let mut table = state.table.lock().await;
        table.sort(partition, key);
        serde_json::to_value(table.table(partition))
            .map_err(|_| StatusCode::INTERNAL_SERVER_ERROR)?
    };
    state.notify(ChangeEvent::TablesChanged);
    Ok(Json(value))
}

#[derive(Debug, Deserialize)]
struct SelectBody {
    selected: bool,
}

/// POST /api/tables/:partition/select-all - set every checkbox in a partition.
async fn select_all(
    State(state): State<AppState>,
    Path(partition): Path<String>,
    Json(body): Json<SelectBody>,
) -> Result<StatusCode, StatusCode> {
    let partition = parse_partition(&partition)?;
    state.table.lock().await.set_all(partition, body.selected);
    state.notify(ChangeEvent::SelectionChanged { partition });
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/tables/:partition/rows/:index/select - set one checkbox.
async fn select_row(
    State(state): State<AppState>,
    Path((partition, index)): Path<(String, usize)>,
    Json(body): Json<SelectBody>,
) -> Result<StatusCode, StatusCode> {
    let partition = parse_partition(&partition)?;
    let found = state
        .table
        .lock()
        .await
        .set_selected(partition, index, body.selected);
    if !found {
        debug!(%partition, index, "select on missing row");
        return Err(StatusCode::NOT_FOUND);
    }
    state.notify(ChangeEvent::SelectionChanged { partition });
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/remind/:scope - remind request for `students`, `instructors` or `both`.
async fn remind(
    State(state): State<AppState>,
    Path(scope): Path<String>,
) -> Result<Json<RemindRequest>, StatusCode> {
    let table = state.table.lock().await;
    let request = match scope.as_str() {
        "both" => table.collate_both(),
        other => table.collate_one(parse_partition(other)?),
    };
    Ok(Json(request))
}

fn parse_partition(raw: &str) -> Result<Partition, StatusCode> {
    raw.parse().map_err(|_| StatusCode::NOT_FOUND)
}
