//! Client side of the support backend: wire types and the HTTP collaborator.

pub mod api;
pub mod types;

pub use api::{HttpSupportApi, SupportApi, SupportApiError, TicketQuery};
pub use types::{
    Branding, Category, FieldToggles, Priority, SubmitContext, SubmitResponse, TicketStatus,
    TicketSubmission, TicketSummary, WidgetConfig,
};
