// crates/plagiarism-e2e/src/client.rs
// ============================================================================
// Module: Pipeline Client
// Description: Thin request builders for each consumed service operation.
// Purpose: Perform one HTTP call, apply the status contract, decode the body.
// Dependencies: reqwest, serde_json, url
// ============================================================================

//! ## Overview
//! One [`reqwest::Client`] is shared by every call in a run so connections are
//! reused. Each exchange is fully buffered into an [`ObservedResponse`] before
//! any assertion runs, which keeps method, URL, status, and body available for
//! diagnostics. Transport failures surface as [`UnexpectedFailure`]; contract
//! violations as [`VerificationError`](crate::verify::VerificationError).

// ============================================================================
// SECTION: Imports
// ============================================================================

use std::error::Error as StdError;
use std::sync::Arc;
use std::time::Instant;

use reqwest::Client;
use reqwest::Method;
use reqwest::StatusCode;
use reqwest::header::CONTENT_TYPE;
use reqwest::multipart::Form;
use reqwest::multipart::Part;
use serde::Serialize;
use url::Url;

use crate::config::Endpoints;
use crate::config::HarnessConfig;
use crate::events::EventSink;
use crate::events::RequestEvent;
use crate::events::RequestEventParams;
use crate::events::duration_millis;
use crate::ids::AssignmentId;
use crate::ids::FileId;
use crate::ids::WorkId;
use crate::model::ASSIGNMENT_SUMMARY_FIELDS;
use crate::model::AssignmentSummary;
use crate::model::Lookup;
use crate::model::SUBMITTED_WORK_FIELDS;
use crate::model::SubmittedWork;
use crate::model::WorkReport;
use crate::model::WorkSubmission;
use crate::verify::HarnessResult;
use crate::verify::ObservedResponse;
use crate::verify::UnexpectedFailure;
use crate::verify::VerificationError;
use crate::verify::assert_fields_present;
use crate::verify::assert_status;
use crate::verify::decode_shape;

// ============================================================================
// SECTION: Constants
// ============================================================================

/// File name attached to every submission.
pub const SUBMISSION_FILE_NAME: &str = "work.txt";
/// Media type attached to every submission.
pub const SUBMISSION_MEDIA_TYPE: &str = "text/plain";

// ============================================================================
// SECTION: Services
// ============================================================================

/// The three services under test.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Service {
    /// Content blob store.
    FileStorage,
    /// Plagiarism checker.
    Checker,
    /// Public-facing API composing the other two.
    PublicApi,
}

impl Service {
    /// Order in which liveness is checked.
    pub const HEALTH_ORDER: [Self; 3] = [Self::FileStorage, Self::Checker, Self::PublicApi];

    /// Returns the display name of the service.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::FileStorage => "FileStorage",
            Self::Checker => "Checker",
            Self::PublicApi => "PublicApi",
        }
    }
}

// ============================================================================
// SECTION: Client
// ============================================================================

/// HTTP client for the plagiarism pipeline.
#[derive(Clone)]
pub struct PipelineClient {
    /// Shared HTTP session for the whole run.
    http: Client,
    /// Service base URLs.
    endpoints: Endpoints,
    /// Structured event sink.
    events: Arc<dyn EventSink>,
}

impl PipelineClient {
    /// Builds a client from the harness configuration.
    ///
    /// # Errors
    ///
    /// Returns [`UnexpectedFailure::Client`] when the HTTP client cannot be built.
    pub fn new(config: &HarnessConfig, events: Arc<dyn EventSink>) -> Result<Self, UnexpectedFailure> {
        let mut builder = Client::builder();
        if let Some(timeout) = config.request_timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| UnexpectedFailure::Client(format!("failed to build http client: {err}")))?;
        Ok(Self {
            http,
            endpoints: config.endpoints.clone(),
            events,
        })
    }

    /// Returns the configured service base URLs.
    #[must_use]
    pub const fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }

    /// Resolves `segments` under the base URL of `service`.
    ///
    /// Segments are percent-encoded individually.
    ///
    /// # Errors
    ///
    /// Returns [`UnexpectedFailure::Client`] when the base URL cannot carry a path.
    pub fn url_for(&self, service: Service, segments: &[&str]) -> Result<Url, UnexpectedFailure> {
        let mut url = match service {
            Service::FileStorage => self.endpoints.file_storage_url.clone(),
            Service::Checker => self.endpoints.checker_url.clone(),
            Service::PublicApi => self.endpoints.public_api_url.clone(),
        };
        url.path_segments_mut()
            .map_err(|()| {
                UnexpectedFailure::Client(format!("{} base url cannot carry a path", service.name()))
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// Issues a GET and returns the buffered exchange without assertions.
    ///
    /// # Errors
    ///
    /// Returns [`UnexpectedFailure`] on transport failure.
    pub async fn get(
        &self,
        service: Service,
        segments: &[&str],
    ) -> Result<ObservedResponse, UnexpectedFailure> {
        let url = self.url_for(service, segments)?;
        self.send(Method::GET, url, None).await
    }

    /// Checks `GET /status`; returns the trimmed free-form body.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`](crate::verify::HarnessError) on transport
    /// failure or a non-200 status.
    pub async fn check_status(&self, service: Service) -> HarnessResult<String> {
        let response = self.get(service, &["status"]).await?;
        assert_status(&response, StatusCode::OK)?;
        Ok(response.text().trim().to_string())
    }

    /// Submits a work as multipart form data and returns the decoded result.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`](crate::verify::HarnessError) on transport
    /// failure, non-200 status, missing fields, or a mistyped body.
    pub async fn submit_work(&self, submission: &WorkSubmission) -> HarnessResult<SubmittedWork> {
        let url = self.url_for(Service::PublicApi, &["api", "works", "submit"])?;
        let file = Part::bytes(submission.content.as_bytes().to_vec())
            .file_name(SUBMISSION_FILE_NAME)
            .mime_str(SUBMISSION_MEDIA_TYPE)
            .map_err(|err| UnexpectedFailure::Client(format!("invalid submission part: {err}")))?;
        let form = Form::new()
            .part("File", file)
            .text("StudentId", submission.student_id.clone())
            .text("StudentName", submission.student_name.clone())
            .text("AssignmentId", submission.assignment_id.as_str().to_string());
        let response = self.send(Method::POST, url, Some(form)).await?;
        assert_status(&response, StatusCode::OK)?;
        let body = response.json()?;
        assert_fields_present(&body, &SUBMITTED_WORK_FIELDS, "/api/works/submit")?;
        Ok(decode_shape(body, "/api/works/submit", "a submitted work record")?)
    }

    /// Fetches the reports of a work; 404 is [`Lookup::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`](crate::verify::HarnessError) on transport
    /// failure, any status other than 200/404, or a body that is not a list of
    /// report records.
    pub async fn work_reports(&self, work_id: &WorkId) -> HarnessResult<Lookup<Vec<WorkReport>>> {
        let response =
            self.get(Service::PublicApi, &["api", "works", work_id.as_str(), "reports"]).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        assert_status(&response, StatusCode::OK)?;
        let context = format!("/api/works/{work_id}/reports");
        let body = response.json()?;
        if !body.is_array() {
            return Err(VerificationError::UnexpectedShape {
                context,
                expected: "a list of reports".to_string(),
                body: body.to_string(),
            }
            .into());
        }
        Ok(Lookup::Found(decode_shape(body, &context, "a list of report records")?))
    }

    /// Fetches the plagiarism summary of an assignment; 404 is [`Lookup::NotFound`].
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`](crate::verify::HarnessError) on transport
    /// failure, any status other than 200/404, missing fields, or a mistyped body.
    pub async fn assignment_summary(
        &self,
        assignment_id: &AssignmentId,
    ) -> HarnessResult<Lookup<AssignmentSummary>> {
        let response = self.get_assignment_summary(assignment_id).await?;
        if response.status == StatusCode::NOT_FOUND {
            return Ok(Lookup::NotFound);
        }
        Ok(Lookup::Found(decode_summary(&response, assignment_id)?))
    }

    /// Fetches the plagiarism summary of an assignment that must exist.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`](crate::verify::HarnessError) on transport
    /// failure, any status other than 200 (404 included), missing fields, or a
    /// mistyped body.
    pub async fn required_assignment_summary(
        &self,
        assignment_id: &AssignmentId,
    ) -> HarnessResult<AssignmentSummary> {
        let response = self.get_assignment_summary(assignment_id).await?;
        decode_summary(&response, assignment_id)
    }

    /// Issues `GET /api/assignments/{id}/reports` without assertions.
    async fn get_assignment_summary(
        &self,
        assignment_id: &AssignmentId,
    ) -> Result<ObservedResponse, UnexpectedFailure> {
        self.get(Service::PublicApi, &["api", "assignments", assignment_id.as_str(), "reports"])
            .await
    }

    /// Fetches the word-cloud rendering of a file; the body is opaque.
    ///
    /// # Errors
    ///
    /// Returns [`HarnessError`](crate::verify::HarnessError) on transport
    /// failure or a non-200 status.
    pub async fn word_cloud(&self, file_id: &FileId) -> HarnessResult<ObservedResponse> {
        let response =
            self.get(Service::PublicApi, &["api", "files", file_id.as_str(), "wordCloud"]).await?;
        assert_status(&response, StatusCode::OK)?;
        Ok(response)
    }

    /// Sends one request, buffers the response, and records an event.
    async fn send(
        &self,
        method: Method,
        url: Url,
        form: Option<Form>,
    ) -> Result<ObservedResponse, UnexpectedFailure> {
        let started = Instant::now();
        let mut request = self.http.request(method.clone(), url.clone());
        if let Some(form) = form {
            request = request.multipart(form);
        }
        let outcome = async {
            let response = request.send().await?;
            let status = response.status();
            let content_type = response
                .headers()
                .get(CONTENT_TYPE)
                .and_then(|value| value.to_str().ok())
                .map(str::to_string);
            let body = response.bytes().await?;
            Ok::<_, reqwest::Error>((status, content_type, body.to_vec()))
        }
        .await;
        let elapsed_ms = duration_millis(started.elapsed());
        match outcome {
            Ok((status, content_type, body)) => {
                self.events.record_request(&RequestEvent::new(RequestEventParams {
                    method: method.to_string(),
                    url: url.to_string(),
                    status: Some(status.as_u16()),
                    response_bytes: body.len(),
                    elapsed_ms,
                    error: None,
                }));
                Ok(ObservedResponse {
                    method,
                    url: url.to_string(),
                    status,
                    content_type,
                    body,
                })
            }
            Err(err) => {
                let detail = error_chain(&err);
                self.events.record_request(&RequestEvent::new(RequestEventParams {
                    method: method.to_string(),
                    url: url.to_string(),
                    status: None,
                    response_bytes: 0,
                    elapsed_ms,
                    error: Some(detail.clone()),
                }));
                Err(UnexpectedFailure::Transport {
                    method: method.to_string(),
                    url: url.to_string(),
                    detail,
                })
            }
        }
    }
}

/// Asserts 200 and decodes an assignment summary body.
fn decode_summary(
    response: &ObservedResponse,
    assignment_id: &AssignmentId,
) -> HarnessResult<AssignmentSummary> {
    assert_status(response, StatusCode::OK)?;
    let context = format!("/api/assignments/{assignment_id}/reports");
    let body = response.json()?;
    assert_fields_present(&body, &ASSIGNMENT_SUMMARY_FIELDS, &context)?;
    Ok(decode_shape(body, &context, "an assignment summary")?)
}

/// Renders an error and its source chain on one line.
fn error_chain(err: &(dyn StdError + 'static)) -> String {
    let mut rendered = err.to_string();
    let mut source = err.source();
    while let Some(cause) = source {
        rendered.push_str(": ");
        rendered.push_str(&cause.to_string());
        source = cause.source();
    }
    rendered
}

// ============================================================================
// SECTION: Tests
// ============================================================================
