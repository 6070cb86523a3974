//! Session state: the host-supplied attributes governing one activation.

use crate::support_api::api::DEFAULT_API_URL;

/// Attribute names the component reacts to.
pub const OBSERVED_ATTRIBUTES: [&str; 5] =
    ["app-id", "api-url", "position", "user-email", "user-name"];

/// Where the panel is anchored in the host.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    BottomRight,
    BottomLeft,
    /// Rendered in the host's flow, always open, without a launcher button.
    Inline,
}

impl Position {
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim() {
            "bottom-right" => Some(Self::BottomRight),
            "bottom-left" => Some(Self::BottomLeft),
            "inline" => Some(Self::Inline),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::BottomRight => "bottom-right",
            Self::BottomLeft => "bottom-left",
            Self::Inline => "inline",
        }
    }

    pub fn is_inline(self) -> bool {
        self == Self::Inline
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionAttributes {
    /// Routing identifier; empty disables config loading.
    pub app_id: String,
    pub api_url: String,
    pub position: Position,
    pub user_email: String,
    pub user_name: String,
}

impl Default for SessionAttributes {
    fn default() -> Self {
        Self {
            app_id: String::new(),
            api_url: DEFAULT_API_URL.to_string(),
            position: Position::default(),
            user_email: String::new(),
            user_name: String::new(),
        }
    }
}

impl SessionAttributes {
    /// Build session state from `(name, value)` pairs, applying defaults.
    pub fn from_attributes<'a, I>(attributes: I) -> Self
    where
        I: IntoIterator<Item = (&'a str, &'a str)>,
    {
        let mut session = Self::default();
        for (name, value) in attributes {
            session.set_attribute(name, Some(value));
        }
        session
    }

    /// Apply one attribute change; `None` means the attribute was removed.
    ///
    /// Returns `false` for names outside [`OBSERVED_ATTRIBUTES`].
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) -> bool {
        let value = value.map(str::trim).unwrap_or_default();
        match name {
            "app-id" => self.app_id = value.to_string(),
            "api-url" => {
                self.api_url = if value.is_empty() {
                    DEFAULT_API_URL.to_string()
                } else {
                    value.to_string()
                };
            }
            "position" => {
                self.position = Position::parse(value).unwrap_or_else(|| {
                    if !value.is_empty() {
                        tracing::debug!("Unknown widget position {value:?}; using bottom-right");
                    }
                    Position::default()
                });
            }
            "user-email" => self.user_email = value.to_string(),
            "user-name" => self.user_name = value.to_string(),
            _ => {
                tracing::debug!("Ignoring unobserved widget attribute {name:?}");
                return false;
            }
        }
        true
    }

    pub fn has_app_id(&self) -> bool {
        !self.app_id.is_empty()
    }
}
