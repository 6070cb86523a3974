//! Wire types exchanged with the support backend.

use serde::{Deserialize, Serialize};

/// Priority used when the form value is missing or out of range.
pub const DEFAULT_PRIORITY: u8 = 3;

/// Display configuration for one embedding application.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct WidgetConfig {
    pub app_id: String,
    pub app_name: String,
    #[serde(default)]
    pub categories: Vec<Category>,
    #[serde(default)]
    pub branding: Branding,
    #[serde(default)]
    pub fields: FieldToggles,
}

impl WidgetConfig {
    /// Look up a category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|category| category.id == id)
    }
}

/// A backend-defined classification of support request.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Category {
    pub id: String,
    pub label: String,
    #[serde(default)]
    pub icon: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct Branding {
    #[serde(default = "default_primary_color")]
    pub primary_color: String,
    #[serde(default = "default_accent_color")]
    pub accent_color: String,
}

impl Default for Branding {
    fn default() -> Self {
        Self {
            primary_color: default_primary_color(),
            accent_color: default_accent_color(),
        }
    }
}

fn default_primary_color() -> String {
    "#2563eb".to_string()
}

fn default_accent_color() -> String {
    "#10b981".to_string()
}

/// Optional form fields the backend can switch off per app.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct FieldToggles {
    #[serde(default = "default_true")]
    pub priority: bool,
}

impl Default for FieldToggles {
    fn default() -> Self {
        Self { priority: true }
    }
}

fn default_true() -> bool {
    true
}

/// Outbound create-ticket payload.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TicketSubmission {
    pub app_id: String,
    pub category: String,
    pub subject: String,
    pub description: String,
    pub user_email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    pub priority: u8,
    pub context: SubmitContext,
}

/// Informational client telemetry attached to a submission.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct SubmitContext {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub browser: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub screen_resolution: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub os: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub app_version: Option<String>,
}

/// Successful create-ticket response.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct SubmitResponse {
    pub ticket_id: String,
    #[serde(default)]
    pub devops_work_item_id: Option<i64>,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub message: String,
}

/// One row of the past-requests list.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
pub struct TicketSummary {
    pub ticket_id: String,
    #[serde(default)]
    pub app_id: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub status: TicketStatus,
    #[serde(default)]
    pub priority: Option<i64>,
    #[serde(default)]
    pub created_at: Option<String>,
    #[serde(default)]
    pub devops_work_item_id: Option<i64>,
}

/// Ticket lifecycle status; unknown strings are preserved and a missing
/// status is an empty `Other`.
#[derive(Clone, Debug, PartialEq, Eq, Deserialize)]
#[serde(from = "Option<String>")]
pub enum TicketStatus {
    Created,
    InProgress,
    Resolved,
    Closed,
    Other(String),
}

impl Default for TicketStatus {
    fn default() -> Self {
        Self::Other(String::new())
    }
}

impl From<Option<String>> for TicketStatus {
    fn from(value: Option<String>) -> Self {
        let Some(value) = value else {
            return Self::default();
        };
        match value.as_str() {
            "created" => Self::Created,
            "in-progress" => Self::InProgress,
            "resolved" => Self::Resolved,
            "closed" => Self::Closed,
            _ => Self::Other(value),
        }
    }
}

impl TicketStatus {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Created => "created",
            Self::InProgress => "in-progress",
            Self::Resolved => "resolved",
            Self::Closed => "closed",
            Self::Other(value) => value,
        }
    }
}

/// Ticket priority, 1 (critical) to 4 (low).
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum Priority {
    Critical = 1,
    High = 2,
    Normal = 3,
    Low = 4,
}

impl Priority {
    pub const ALL: [Priority; 4] = [Self::Critical, Self::High, Self::Normal, Self::Low];

    pub fn from_level(level: i64) -> Option<Self> {
        match level {
            1 => Some(Self::Critical),
            2 => Some(Self::High),
            3 => Some(Self::Normal),
            4 => Some(Self::Low),
            _ => None,
        }
    }

    /// Parse a raw form value, falling back to the default priority.
    pub fn parse_or_default(raw: &str) -> Self {
        raw.trim()
            .parse::<i64>()
            .ok()
            .and_then(Self::from_level)
            .unwrap_or(Self::Normal)
    }

    pub fn level(self) -> u8 {
        self as u8
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Critical => "Critical",
            Self::High => "High",
            Self::Normal => "Normal",
            Self::Low => "Low",
        }
    }
}
