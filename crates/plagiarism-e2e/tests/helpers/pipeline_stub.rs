// crates/plagiarism-e2e/tests/helpers/pipeline_stub.rs
// ============================================================================
// Module: Pipeline Stub
// Description: In-process stand-in for the file store, checker, and public API.
// Purpose: Drive the orchestrator against a conforming or faulty pipeline.
// Dependencies: axum, serde_json, tokio
// ============================================================================

use std::collections::HashMap;
use std::net::TcpListener as StdTcpListener;
use std::sync::Arc;
use std::sync::Mutex;
use std::thread;

use axum::Json;
use axum::Router;
use axum::extract::Multipart;
use axum::extract::Path;
use axum::extract::State;
use axum::http::StatusCode;
use axum::http::header::CONTENT_TYPE;
use axum::response::IntoResponse;
use axum::response::Response;
use axum::routing::get;
use axum::routing::post;
use serde_json::Value;
use serde_json::json;
use tokio::runtime::Builder;
use tokio::sync::oneshot;

/// PNG file signature served as the word-cloud body.
const PNG_SIGNATURE: [u8; 8] = [0x89, b'P', b'N', b'G', b'\r', b'\n', 0x1a, b'\n'];

/// Deviation from the pipeline contract injected by the stub.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Fault {
    /// Behave according to the contract.
    None,
    /// Match duplicates across assignments instead of within one.
    CrossAssignmentFlagging,
    /// Never flag duplicates.
    NeverFlag,
    /// Omit `fileId` from the submission response.
    MissingFileId,
    /// Answer 404 for the reports of every work.
    NoReportsForWork,
    /// Answer the reports of a work with an object instead of a list.
    ReportsNotAList,
    /// Answer 404 for the summary of every assignment.
    SummaryNotFound,
    /// Echo a different assignment id in the summary.
    SummaryWrongAssignment,
    /// Count a single work in every summary.
    SummaryUndercount,
    /// Count more plagiarised works than submitted works.
    SummaryOvercount,
    /// Answer 200 with zero counts for unknown assignments.
    SummaryForUnknownAssignment,
    /// Leave `sourceWorkId` out of plagiarism reports.
    MissingSourceWork,
    /// Point plagiarism reports at an unrelated work.
    WrongSourceWork,
    /// Report a plagiarism score below the threshold.
    LowScore,
    /// Serve the word cloud as plain text.
    WrongContentType,
    /// Answer 200 with an empty list for unknown works.
    EmptyListForUnknownWork,
}

/// A work accepted by the stub.
#[derive(Clone, Debug)]
struct StoredWork {
    /// Work identifier.
    work_id: String,
    /// Report identifier.
    report_id: String,
    /// File identifier.
    file_id: String,
    /// Submitting student.
    student_id: String,
    /// Submitting student's display name.
    student_name: String,
    /// Assignment the work belongs to.
    assignment_id: String,
    /// Raw file bytes.
    content: Vec<u8>,
    /// Earlier work this one duplicates, if any.
    source_work_id: Option<String>,
}

/// Shared handler state.
#[derive(Clone)]
struct StubState {
    /// Injected fault.
    fault: Fault,
    /// Accepted works in submission order.
    works: Arc<Mutex<Vec<StoredWork>>>,
}

/// Handle for the stub pipeline server.
pub struct PipelineStubHandle {
    /// Root URL of the stub (`http://127.0.0.1:<port>`).
    root_url: String,
    /// Shutdown signal for the server thread.
    shutdown: Option<oneshot::Sender<()>>,
    /// Server thread.
    join: Option<thread::JoinHandle<()>>,
    /// Accepted works, for assertions.
    works: Arc<Mutex<Vec<StoredWork>>>,
}

impl PipelineStubHandle {
    /// Returns a TOML config document pointing every service at the stub.
    pub fn config_toml(&self) -> String {
        format!(
            "public_api_url = \"{root}/public-api\"\nchecker_url = \"{root}/checker/\"\n\
             file_storage_url = \"{root}/file-storage\"\nrequest_timeout_sec = 5\n",
            root = self.root_url
        )
    }

    /// Returns the number of works the stub accepted.
    pub fn submitted_count(&self) -> usize {
        self.works.lock().map_or(0, |works| works.len())
    }
}

impl Drop for PipelineStubHandle {
    fn drop(&mut self) {
        if let Some(shutdown) = self.shutdown.take() {
            let _ = shutdown.send(());
        }
        if let Some(join) = self.join.take() {
            let _ = join.join();
        }
    }
}

/// Spawns a stub pipeline with the given fault on an ephemeral loopback port.
pub fn spawn_pipeline_stub(fault: Fault) -> Result<PipelineStubHandle, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("pipeline stub bind failed: {err}"))?;
    listener
        .set_nonblocking(true)
        .map_err(|err| format!("pipeline stub listener nonblocking failed: {err}"))?;
    let addr =
        listener.local_addr().map_err(|err| format!("pipeline stub local addr failed: {err}"))?;
    let root_url = format!("http://{addr}");

    let works = Arc::new(Mutex::new(Vec::new()));
    let state = StubState {
        fault,
        works: Arc::clone(&works),
    };
    let public_api = Router::new()
        .route("/status", get(|| async { "PublicApi OK" }))
        .route("/api/works/submit", post(submit_work))
        .route("/api/works/{work_id}/reports", get(work_reports))
        .route("/api/assignments/{assignment_id}/reports", get(assignment_summary))
        .route("/api/files/{file_id}/wordCloud", get(word_cloud))
        .with_state(state);
    let app = Router::new()
        .route("/file-storage/status", get(|| async { "FileStorage OK" }))
        .route("/checker/status", get(|| async { "Checker OK" }))
        .nest("/public-api", public_api);

    let (shutdown_tx, shutdown_rx) = oneshot::channel();
    let join = thread::spawn(move || {
        let Ok(runtime) = Builder::new_current_thread().enable_all().build() else {
            return;
        };
        runtime.block_on(async move {
            let Ok(listener) = tokio::net::TcpListener::from_std(listener) else {
                return;
            };
            let server = axum::serve(listener, app).with_graceful_shutdown(async move {
                let _ = shutdown_rx.await;
            });
            let _ = server.await;
        });
    });
    Ok(PipelineStubHandle {
        root_url,
        shutdown: Some(shutdown_tx),
        join: Some(join),
        works,
    })
}

/// Returns a loopback base URL nothing listens on.
pub fn unreachable_config_toml() -> Result<String, String> {
    let listener = StdTcpListener::bind("127.0.0.1:0")
        .map_err(|err| format!("unreachable bind failed: {err}"))?;
    let addr = listener.local_addr().map_err(|err| format!("unreachable local addr failed: {err}"))?;
    drop(listener);
    Ok(format!(
        "public_api_url = \"http://{addr}\"\nchecker_url = \"http://{addr}\"\n\
         file_storage_url = \"http://{addr}\"\nrequest_timeout_sec = 5\n"
    ))
}

/// Accepts a multipart submission and runs the per-assignment duplicate check.
async fn submit_work(State(state): State<StubState>, mut multipart: Multipart) -> Response {
    let mut texts: HashMap<String, String> = HashMap::new();
    let mut content = None;
    while let Ok(Some(field)) = multipart.next_field().await {
        let name = field.name().unwrap_or_default().to_string();
        if name == "File" {
            content = field.bytes().await.ok().map(|bytes| bytes.to_vec());
        } else if let Ok(text) = field.text().await {
            texts.insert(name, text);
        }
    }
    let (Some(content), Some(student_id), Some(student_name), Some(assignment_id)) = (
        content,
        texts.remove("StudentId"),
        texts.remove("StudentName"),
        texts.remove("AssignmentId"),
    ) else {
        return (StatusCode::BAD_REQUEST, "missing multipart field").into_response();
    };

    let Ok(mut works) = state.works.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let cross_assignment = state.fault == Fault::CrossAssignmentFlagging;
    let source_work_id = works
        .iter()
        .find(|work| {
            work.content == content
                && work.student_id != student_id
                && (cross_assignment || work.assignment_id == assignment_id)
        })
        .filter(|_| state.fault != Fault::NeverFlag)
        .map(|work| work.work_id.clone());
    let index = works.len() + 1;
    let work = StoredWork {
        work_id: format!("work-{index}"),
        report_id: format!("report-{index}"),
        file_id: format!("file-{index}"),
        student_id,
        student_name,
        assignment_id,
        content,
        source_work_id,
    };
    let mut body = json!({
        "workId": work.work_id,
        "reportId": work.report_id,
        "isPlagiarism": work.source_work_id.is_some(),
        "fileId": work.file_id,
    });
    if state.fault == Fault::MissingFileId
        && let Some(object) = body.as_object_mut()
    {
        object.remove("fileId");
    }
    works.push(work);
    Json(body).into_response()
}

/// Lists the reports of one work.
async fn work_reports(State(state): State<StubState>, Path(work_id): Path<String>) -> Response {
    let Ok(works) = state.works.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    if state.fault == Fault::NoReportsForWork {
        return StatusCode::NOT_FOUND.into_response();
    }
    let Some(work) = works.iter().find(|work| work.work_id == work_id) else {
        if state.fault == Fault::EmptyListForUnknownWork {
            return Json(json!([])).into_response();
        }
        return StatusCode::NOT_FOUND.into_response();
    };
    if state.fault == Fault::ReportsNotAList {
        return Json(report_json(work, state.fault)).into_response();
    }
    Json(json!([report_json(work, state.fault)])).into_response()
}

/// Renders the single report the stub keeps per work.
fn report_json(work: &StoredWork, fault: Fault) -> Value {
    let source = work.source_work_id.as_ref().and_then(|source| match fault {
        Fault::WrongSourceWork => Some("work-unrelated".to_string()),
        Fault::MissingSourceWork => None,
        _ => Some(source.clone()),
    });
    let score = match (&work.source_work_id, fault) {
        (None, _) => 0.0,
        (Some(_), Fault::LowScore) => 42.5,
        (Some(_), _) => 100.0,
    };
    json!({
        "reportId": work.report_id,
        "workId": work.work_id,
        "studentId": work.student_id,
        "studentName": work.student_name,
        "assignmentId": work.assignment_id,
        "isPlagiarism": work.source_work_id.is_some(),
        "sourceWorkId": source,
        "plagiarismScore": score,
        "createdAt": "2026-10-19T12:00:00Z",
    })
}

/// Summarizes one assignment.
async fn assignment_summary(
    State(state): State<StubState>,
    Path(assignment_id): Path<String>,
) -> Response {
    let Ok(works) = state.works.lock() else {
        return StatusCode::INTERNAL_SERVER_ERROR.into_response();
    };
    let scoped: Vec<&StoredWork> =
        works.iter().filter(|work| work.assignment_id == assignment_id).collect();
    if state.fault == Fault::SummaryNotFound
        || (scoped.is_empty() && state.fault != Fault::SummaryForUnknownAssignment)
    {
        return (StatusCode::NOT_FOUND, "assignment not found").into_response();
    }
    let mut total = scoped.len();
    let mut plagiarised = scoped.iter().filter(|work| work.source_work_id.is_some()).count();
    match state.fault {
        Fault::SummaryUndercount => {
            total = 1;
            plagiarised = plagiarised.min(1);
        }
        Fault::SummaryOvercount => plagiarised = total + 1,
        _ => {}
    }
    let echoed = if state.fault == Fault::SummaryWrongAssignment {
        "assignment-unrelated".to_string()
    } else {
        assignment_id
    };
    Json(json!({
        "assignmentId": echoed,
        "totalWorks": total,
        "plagiarisedCount": plagiarised,
    }))
    .into_response()
}

/// Serves an opaque word-cloud rendering for a stored file.
async fn word_cloud(State(state): State<StubState>, Path(file_id): Path<String>) -> Response {
    let known = state
        .works
        .lock()
        .map(|works| works.iter().any(|work| work.file_id == file_id))
        .unwrap_or(false);
    if !known {
        return StatusCode::NOT_FOUND.into_response();
    }
    let media_type = if state.fault == Fault::WrongContentType { "text/plain" } else { "image/png" };
    ([(CONTENT_TYPE, media_type)], PNG_SIGNATURE.to_vec()).into_response()
}
