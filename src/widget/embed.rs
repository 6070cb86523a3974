//! Standalone page embedding the component inline, for iframe hosts.

use crate::support_api::api::DEFAULT_API_URL;

use super::markup::Element;

/// Custom element name the component registers under.
pub const ELEMENT_NAME: &str = "support-widget";
/// App id used when the embedding page does not name one.
pub const DEFAULT_EMBED_APP_ID: &str = "support-embed";
pub const DEFAULT_SCRIPT_SRC: &str = "/api/widget.js";

/// Placeholders some hosts leave in URLs when they cannot resolve the user.
const UNRESOLVED_PLACEHOLDERS: [&str; 3] = ["{loginHint}", "{userPrincipalName}", "{upn}"];

const PAGE_STYLE: &str = "body { margin: 0; padding: 0; font-family: system-ui, -apple-system, sans-serif; background: transparent; }";

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct EmbedParams {
    pub app_id: String,
    pub api_url: String,
    pub script_src: String,
    pub user_email: Option<String>,
    pub user_name: Option<String>,
}

impl Default for EmbedParams {
    fn default() -> Self {
        Self {
            app_id: DEFAULT_EMBED_APP_ID.to_string(),
            api_url: DEFAULT_API_URL.to_string(),
            script_src: DEFAULT_SCRIPT_SRC.to_string(),
            user_email: None,
            user_name: None,
        }
    }
}

/// Full HTML document hosting one inline component.
pub fn embed_page(params: &EmbedParams) -> String {
    let app_id = match params.app_id.trim() {
        "" => DEFAULT_EMBED_APP_ID,
        app_id => app_id,
    };
    let mut widget = Element::new(ELEMENT_NAME)
        .attr("id", ELEMENT_NAME)
        .attr("app-id", app_id)
        .attr("api-url", params.api_url.trim())
        .attr("position", "inline");
    if let Some(email) = resolved(params.user_email.as_deref()) {
        widget = widget.attr("user-email", email);
    }
    if let Some(name) = resolved(params.user_name.as_deref()) {
        widget = widget.attr("user-name", name);
    }
    let head = Element::new("head")
        .child(Element::new("meta").attr("charset", "UTF-8"))
        .child(
            Element::new("meta")
                .attr("name", "viewport")
                .attr("content", "width=device-width, initial-scale=1.0"),
        )
        .child(Element::new("title").text("Support"))
        .child(Element::new("style").raw(PAGE_STYLE));
    let body = Element::new("body")
        .child(widget)
        .child(Element::new("script").attr("src", params.script_src.as_str()));
    let html = Element::new("html")
        .attr("lang", "en")
        .child(head)
        .child(body);
    format!("<!DOCTYPE html>\n{}\n", html.to_html())
}

/// A user hint, or `None` when blank or an unresolved placeholder.
fn resolved(value: Option<&str>) -> Option<&str> {
    value
        .map(str::trim)
        .filter(|value| !value.is_empty() && !UNRESOLVED_PLACEHOLDERS.contains(value))
}
