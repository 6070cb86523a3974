//! HTTP client for the three support endpoints.

use serde::de::DeserializeOwned;
use serde_json::Value;
use url::Url;

use super::types::{SubmitResponse, TicketSubmission, TicketSummary, WidgetConfig};
use crate::http_client;

/// Base address used when the host does not provide one.
pub const DEFAULT_API_URL: &str = "https://apim-terprint-dev.azure-api.net/support";
/// Fixed page size for the past-requests query.
pub const TICKET_PAGE_SIZE: usize = 25;

/// Banner shown when a submission never got a response.
pub const NETWORK_ERROR_MESSAGE: &str = "Network error. Please try again.";
/// Banner shown when a rejection body carries nothing usable.
pub const GENERIC_ERROR_MESSAGE: &str = "Something went wrong. Please try again.";

const MAX_CONFIG_RESPONSE_BYTES: usize = 256 * 1024;
const MAX_SUBMIT_RESPONSE_BYTES: usize = 256 * 1024;
const MAX_TICKETS_RESPONSE_BYTES: usize = 1024 * 1024;

#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum SupportApiError {
    /// The backend answered with a non-success status.
    #[error("Request rejected (HTTP {status}): {message}")]
    Rejected { status: u16, message: String },
    /// No response was received.
    #[error("HTTP error: {0}")]
    Transport(String),
    /// A success response carried a body that could not be decoded.
    #[error("JSON error: {0}")]
    Json(String),
    #[error("Invalid API URL: {0}")]
    InvalidUrl(String),
}

impl SupportApiError {
    /// Text suitable for the submission error banner.
    pub fn banner_message(&self) -> String {
        match self {
            Self::Rejected { message, .. } => message.clone(),
            Self::Transport(_) | Self::InvalidUrl(_) => NETWORK_ERROR_MESSAGE.to_string(),
            Self::Json(_) => GENERIC_ERROR_MESSAGE.to_string(),
        }
    }
}

/// Filters for the past-requests query.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct TicketQuery {
    pub app_id: Option<String>,
    pub email: Option<String>,
    pub limit: usize,
}

impl TicketQuery {
    /// Build a query from session values, dropping blank filters.
    pub fn for_session(app_id: &str, email: &str) -> Self {
        Self {
            app_id: non_blank(app_id),
            email: non_blank(email),
            limit: TICKET_PAGE_SIZE,
        }
    }
}

fn non_blank(value: &str) -> Option<String> {
    let trimmed = value.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

/// Remote collaborator behind the widget.
///
/// Each call takes the base address explicitly since the host may change
/// `api-url` at any time after activation.
pub trait SupportApi: Send + Sync {
    /// `GET {api_url}/config/{app_id}`
    fn fetch_config(&self, api_url: &str, app_id: &str) -> Result<WidgetConfig, SupportApiError>;

    /// `POST {api_url}/submit`
    fn submit_ticket(
        &self,
        api_url: &str,
        submission: &TicketSubmission,
    ) -> Result<SubmitResponse, SupportApiError>;

    /// `GET {api_url}/tickets?app_id=&email=&limit=`
    fn list_tickets(
        &self,
        api_url: &str,
        query: &TicketQuery,
    ) -> Result<Vec<TicketSummary>, SupportApiError>;
}

/// [`SupportApi`] backed by the shared blocking HTTP agent.
#[derive(Clone, Copy, Debug, Default)]
pub struct HttpSupportApi;

impl SupportApi for HttpSupportApi {
    fn fetch_config(&self, api_url: &str, app_id: &str) -> Result<WidgetConfig, SupportApiError> {
        let url = endpoint(api_url, &["config", app_id])?;
        let request = http_client::agent()
            .get(url.as_str())
            .set("Accept", "application/json");
        parse_json(request.call(), MAX_CONFIG_RESPONSE_BYTES)
    }

    fn submit_ticket(
        &self,
        api_url: &str,
        submission: &TicketSubmission,
    ) -> Result<SubmitResponse, SupportApiError> {
        let url = endpoint(api_url, &["submit"])?;
        let request = http_client::agent()
            .post(url.as_str())
            .set("Accept", "application/json")
            .set("Content-Type", "application/json");
        parse_json(request.send_json(submission), MAX_SUBMIT_RESPONSE_BYTES)
    }

    fn list_tickets(
        &self,
        api_url: &str,
        query: &TicketQuery,
    ) -> Result<Vec<TicketSummary>, SupportApiError> {
        let mut url = endpoint(api_url, &["tickets"])?;
        {
            let mut pairs = url.query_pairs_mut();
            if let Some(app_id) = query.app_id.as_deref() {
                pairs.append_pair("app_id", app_id);
            }
            if let Some(email) = query.email.as_deref() {
                pairs.append_pair("email", email);
            }
            pairs.append_pair("limit", &query.limit.to_string());
        }
        let request = http_client::agent()
            .get(url.as_str())
            .set("Accept", "application/json");
        parse_json(request.call(), MAX_TICKETS_RESPONSE_BYTES)
    }
}

/// Join path segments onto the base address, encoding each segment.
pub(crate) fn endpoint(api_url: &str, segments: &[&str]) -> Result<Url, SupportApiError> {
    let mut url =
        Url::parse(api_url.trim()).map_err(|err| SupportApiError::InvalidUrl(err.to_string()))?;
    url.path_segments_mut()
        .map_err(|()| SupportApiError::InvalidUrl(format!("{api_url} cannot be a base")))?
        .pop_if_empty()
        .extend(segments);
    Ok(url)
}

fn parse_json<T: DeserializeOwned>(
    outcome: Result<ureq::Response, ureq::Error>,
    max_bytes: usize,
) -> Result<T, SupportApiError> {
    let response = match outcome {
        Ok(response) => response,
        Err(ureq::Error::Status(status, response)) => {
            let body = http_client::read_body(response, max_bytes).unwrap_or_default();
            return Err(SupportApiError::Rejected {
                status,
                message: describe_rejection(&body),
            });
        }
        Err(ureq::Error::Transport(err)) => {
            return Err(SupportApiError::Transport(err.to_string()));
        }
    };
    let body = http_client::read_body(response, max_bytes)
        .map_err(|err| SupportApiError::Json(err.to_string()))?;
    serde_json::from_str(body.trim()).map_err(|err| SupportApiError::Json(err.to_string()))
}

/// Turn an error body into a single banner line.
///
/// Field-level `detail` lists become `"<field>: <msg>"` joined with `"; "`,
/// a string `detail` is used verbatim and a `message` member is used as-is.
pub fn describe_rejection(body: &str) -> String {
    let Ok(value) = serde_json::from_str::<Value>(body.trim()) else {
        return GENERIC_ERROR_MESSAGE.to_string();
    };
    if let Some(detail) = value.get("detail") {
        match detail {
            Value::String(text) if !text.trim().is_empty() => return text.clone(),
            Value::Array(items) => {
                let parts = items
                    .iter()
                    .filter_map(describe_field_error)
                    .collect::<Vec<_>>();
                if !parts.is_empty() {
                    return parts.join("; ");
                }
            }
            Value::Object(_) => {
                if let Some(message) = message_member(detail) {
                    return message;
                }
            }
            _ => {}
        }
    }
    if let Some(message) = message_member(&value) {
        return message;
    }
    match value {
        Value::String(text) if !text.trim().is_empty() => text,
        _ => GENERIC_ERROR_MESSAGE.to_string(),
    }
}

fn describe_field_error(item: &Value) -> Option<String> {
    let message = item.get("msg")?.as_str()?;
    let field = item
        .get("loc")
        .and_then(Value::as_array)
        .and_then(|loc| loc.last())
        .map(|segment| match segment {
            Value::String(name) => name.clone(),
            other => other.to_string(),
        });
    Some(match field {
        Some(field) => format!("{field}: {message}"),
        None => message.to_string(),
    })
}

fn message_member(value: &Value) -> Option<String> {
    value
        .get("message")
        .and_then(Value::as_str)
        .filter(|message| !message.trim().is_empty())
        .map(str::to_string)
}
