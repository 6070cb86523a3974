//! User interactions the widget reacts to.

use super::state::FormInput;

#[derive(Clone, Debug, PartialEq, Eq)]
pub enum WidgetEvent {
    /// Launcher button clicked.
    TogglePanel,
    ClosePanel,
    SelectCategory(String),
    Back,
    /// Replace the form's field values (markup hosts send this before `Submit`).
    EditForm(FormInput),
    Submit,
    ShowPastRequests,
    DismissSuccess,
}

/// Value of the `data-action` attribute on rendered controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Action {
    TogglePanel,
    ClosePanel,
    SelectCategory,
    Back,
    Submit,
    ShowPastRequests,
    DismissSuccess,
}

impl Action {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::TogglePanel => "toggle-panel",
            Self::ClosePanel => "close-panel",
            Self::SelectCategory => "select-category",
            Self::Back => "back",
            Self::Submit => "submit",
            Self::ShowPastRequests => "show-past-requests",
            Self::DismissSuccess => "dismiss-success",
        }
    }

    pub fn parse(raw: &str) -> Option<Self> {
        [
            Self::TogglePanel,
            Self::ClosePanel,
            Self::SelectCategory,
            Self::Back,
            Self::Submit,
            Self::ShowPastRequests,
            Self::DismissSuccess,
        ]
        .into_iter()
        .find(|action| action.as_str() == raw)
    }
}

impl WidgetEvent {
    /// Map a clicked control's `data-action` / `data-id` pair to an event.
    pub fn from_action(action: &str, data_id: Option<&str>) -> Option<Self> {
        let event = match Action::parse(action)? {
            Action::TogglePanel => Self::TogglePanel,
            Action::ClosePanel => Self::ClosePanel,
            Action::SelectCategory => Self::SelectCategory(data_id?.to_string()),
            Action::Back => Self::Back,
            Action::Submit => Self::Submit,
            Action::ShowPastRequests => Self::ShowPastRequests,
            Action::DismissSuccess => Self::DismissSuccess,
        };
        Some(event)
    }
}
