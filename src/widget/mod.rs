//! Embeddable support component: session state, screens, rendering.

pub mod attributes;
pub mod controller;
pub mod embed;
pub mod events;
pub mod format;
pub(crate) mod jobs;
pub mod markup;
pub mod render;
pub mod state;
pub mod validation;


pub use attributes::{OBSERVED_ATTRIBUTES, Position, SessionAttributes};
pub use controller::SupportWidget;
pub use events::{Action, WidgetEvent};
pub use markup::{Element, Region};
pub use state::{FieldErrors, FormField, FormInput, FormState, Screen, ScreenKind, TicketList};
