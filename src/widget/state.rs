//! Screen state for the support widget.

use crate::support_api::{SubmitResponse, TicketSummary};

use super::validation;

/// Mutually exclusive views the widget can show.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Screen {
    /// Waiting for the display config.
    Loading,
    Home,
    Form(FormState),
    /// The form with its submit control disabled while the POST is in flight.
    Submitting(FormState),
    Success(SubmitResponse),
    PastRequests(TicketList),
    /// Config load failed; only re-activation recovers.
    Error(String),
}

impl Screen {
    pub fn kind(&self) -> ScreenKind {
        match self {
            Self::Loading => ScreenKind::Loading,
            Self::Home => ScreenKind::Home,
            Self::Form(_) => ScreenKind::Form,
            Self::Submitting(_) => ScreenKind::Submitting,
            Self::Success(_) => ScreenKind::Success,
            Self::PastRequests(_) => ScreenKind::PastRequests,
            Self::Error(_) => ScreenKind::Error,
        }
    }

    /// Form shown on this screen, submitting or not.
    pub fn form(&self) -> Option<&FormState> {
        match self {
            Self::Form(form) | Self::Submitting(form) => Some(form),
            _ => None,
        }
    }
}

/// Payload-free discriminant of [`Screen`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ScreenKind {
    Loading,
    Home,
    Form,
    Submitting,
    Success,
    PastRequests,
    Error,
}

/// Progress of the past-requests fetch.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TicketList {
    Loading,
    Loaded(Vec<TicketSummary>),
    Failed(String),
}

/// Raw field values as typed by the user.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FormInput {
    pub subject: String,
    pub description: String,
    pub email: String,
    /// Raw priority selector value; parsed at submission.
    pub priority: String,
}

/// Validated form fields.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormField {
    Subject,
    Description,
    Email,
}

impl FormField {
    pub const ALL: [FormField; 3] = [Self::Subject, Self::Description, Self::Email];

    pub fn name(self) -> &'static str {
        match self {
            Self::Subject => "subject",
            Self::Description => "description",
            Self::Email => "email",
        }
    }
}

/// Per-field validation annotations.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct FieldErrors {
    subject: Option<String>,
    description: Option<String>,
    email: Option<String>,
}

impl FieldErrors {
    pub fn get(&self, field: FormField) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: FormField, message: impl Into<String>) {
        *self.slot_mut(field) = Some(message.into());
    }

    pub fn is_empty(&self) -> bool {
        FormField::ALL.iter().all(|field| self.slot(*field).is_none())
    }

    pub fn len(&self) -> usize {
        FormField::ALL
            .iter()
            .filter(|field| self.slot(**field).is_some())
            .count()
    }

    fn slot(&self, field: FormField) -> &Option<String> {
        match field {
            FormField::Subject => &self.subject,
            FormField::Description => &self.description,
            FormField::Email => &self.email,
        }
    }

    fn slot_mut(&mut self, field: FormField) -> &mut Option<String> {
        match field {
            FormField::Subject => &mut self.subject,
            FormField::Description => &mut self.description,
            FormField::Email => &mut self.email,
        }
    }
}

/// A form for one category, with its annotations.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct FormState {
    pub category_id: String,
    pub input: FormInput,
    pub errors: FieldErrors,
    /// Submission failure shown above the actions.
    pub banner: Option<String>,
}

impl FormState {
    /// Fresh form pre-filled with the known email.
    pub fn new(category_id: impl Into<String>, email: &str) -> Self {
        Self {
            category_id: category_id.into(),
            input: FormInput {
                email: email.to_string(),
                ..FormInput::default()
            },
            errors: FieldErrors::default(),
            banner: None,
        }
    }

    /// Replace all field annotations with a fresh validation pass.
    pub fn validate(&mut self) -> bool {
        self.errors = validation::validate_form(&self.input);
        self.errors.is_empty()
    }
}
