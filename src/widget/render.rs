//! Pure screen renderer: (screen, session, config) to an element tree.
//!
//! Rendering the same inputs twice yields equal trees; hosts replace the
//! previous markup wholesale.

use crate::support_api::{Branding, Priority, SubmitResponse, TicketSummary, WidgetConfig};

use super::attributes::{Position, SessionAttributes};
use super::events::Action;
use super::format;
use super::markup::{Element, Region};
use super::state::{FormField, FormState, Screen, TicketList};

/// Bundled stylesheet emitted with every rendered widget.
pub const STYLESHEET: &str = include_str!("../../assets/widget.css");

pub const EMPTY_TICKETS_MESSAGE: &str = "You haven't submitted any requests yet.";

/// Inputs the renderer reads; nothing else influences the output.
#[derive(Clone, Copy, Debug)]
pub struct RenderContext<'a> {
    pub session: &'a SessionAttributes,
    pub config: Option<&'a WidgetConfig>,
    pub screen: &'a Screen,
    pub panel_open: bool,
}

/// Whole component: stylesheet, launcher button and panel.
pub fn render_widget(ctx: &RenderContext<'_>) -> Element {
    let position = ctx.session.position;
    let default_branding = Branding::default();
    let branding = ctx
        .config
        .map(|config| &config.branding)
        .unwrap_or(&default_branding);
    Element::new("div")
        .class("support-widget")
        .attr("data-position", position.as_str())
        .attr("style", branding_style(branding, &default_branding))
        .child(Element::new("style").raw(STYLESHEET))
        .child_if((!position.is_inline()).then(|| launcher(position)))
        .child(panel(ctx))
}

fn launcher(position: Position) -> Element {
    Element::new("button")
        .region(Region::Launcher)
        .class(format!("fab fab-{}", position.as_str()))
        .attr("aria-label", "Get Support")
        .attr("data-action", Action::TogglePanel.as_str())
        .text("💬")
}

fn panel(ctx: &RenderContext<'_>) -> Element {
    let position = ctx.session.position;
    let mut classes = format!("panel panel-{}", position.as_str());
    if ctx.panel_open || position.is_inline() {
        classes.push_str(" open");
    }
    let header = Element::new("div")
        .class("panel-header")
        .child(
            Element::new("span")
                .class("panel-title")
                .text("Support")
                .child_if(ctx.config.map(|config| {
                    Element::new("span")
                        .class("panel-subtitle")
                        .text(config.app_name.as_str())
                })),
        )
        .child_if((!position.is_inline()).then(|| {
            Element::new("button")
                .class("close-btn")
                .attr("aria-label", "Close")
                .attr("data-action", Action::ClosePanel.as_str())
                .text("×")
        }));
    Element::new("div")
        .region(Region::Panel)
        .class(classes)
        .child(header)
        .child(
            Element::new("div")
                .region(Region::Body)
                .class("panel-body")
                .child(render_screen(ctx)),
        )
}

/// Contents of the panel body for the current screen.
pub fn render_screen(ctx: &RenderContext<'_>) -> Element {
    match ctx.screen {
        Screen::Loading => Element::new("div")
            .region(Region::Categories)
            .class("categories")
            .child(Element::new("p").class("loading").text("Loading...")),
        Screen::Home => home(ctx),
        Screen::Form(form) => form_view(ctx, form, false),
        Screen::Submitting(form) => form_view(ctx, form, true),
        Screen::Success(response) => success(response),
        Screen::PastRequests(list) => past_requests(list),
        Screen::Error(message) => Element::new("div")
            .class("error-state")
            .child(Element::new("p").class("error-msg").text(message.as_str())),
    }
}

fn home(ctx: &RenderContext<'_>) -> Element {
    let categories = ctx
        .config
        .map(|config| config.categories.as_slice())
        .unwrap_or_default()
        .iter()
        .map(|category| {
            Element::new("button")
                .class("category-btn")
                .attr("data-action", Action::SelectCategory.as_str())
                .attr("data-id", category.id.as_str())
                .child(
                    Element::new("span")
                        .class("cat-icon")
                        .text(category.icon.as_str()),
                )
                .child(
                    Element::new("span")
                        .class("cat-label")
                        .text(category.label.as_str()),
                )
        });
    Element::new("div")
        .class("home")
        .child_if(greeting(ctx.session))
        .child(
            Element::new("div")
                .region(Region::Categories)
                .class("categories")
                .children(categories),
        )
        .child(
            Element::new("div").class("past-requests-link").child(
                Element::new("button")
                    .class("link-btn")
                    .attr("data-action", Action::ShowPastRequests.as_str())
                    .text("View past requests"),
            ),
        )
}

fn greeting(session: &SessionAttributes) -> Option<Element> {
    let name = session.user_name.trim();
    if name.is_empty() {
        return None;
    }
    Some(
        Element::new("div").class("context-bar").child(
            Element::new("span")
                .class("context-user")
                .text(format!("Hi {name}!")),
        ),
    )
}

fn form_view(ctx: &RenderContext<'_>, form: &FormState, submitting: bool) -> Element {
    let category = ctx
        .config
        .and_then(|config| config.category(&form.category_id));
    let category_bar = Element::new("div").class("context-bar").child(
        Element::new("span").class("context-cat").text(match category {
            Some(category) => format!("{} {}", category.icon, category.label),
            None => form.category_id.clone(),
        }),
    );
    let show_priority = ctx.config.is_none_or(|config| config.fields.priority);

    let subject = Element::new("input")
        .attr("type", "text")
        .attr("id", "subject")
        .attr("name", "subject")
        .attr("maxlength", "200")
        .attr("placeholder", "Brief summary")
        .attr("value", form.input.subject.as_str());
    let description = Element::new("textarea")
        .attr("id", "description")
        .attr("name", "description")
        .attr("rows", "4")
        .attr("maxlength", "5000")
        .attr("placeholder", "Tell us more...")
        .text(form.input.description.as_str());
    let email = Element::new("input")
        .attr("type", "email")
        .attr("id", "email")
        .attr("name", "email")
        .attr("placeholder", "you@example.com")
        .attr("value", form.input.email.as_str());

    let submit_label = if submitting { "Submitting..." } else { "Submit" };
    let actions = Element::new("div")
        .class("actions")
        .child(
            Element::new("button")
                .attr("type", "button")
                .class("btn-back")
                .attr("data-action", Action::Back.as_str())
                .flag_if("disabled", submitting)
                .text("← Back"),
        )
        .child(
            Element::new("button")
                .attr("type", "submit")
                .class("btn-submit")
                .attr("data-action", Action::Submit.as_str())
                .flag_if("disabled", submitting)
                .text(submit_label),
        );
    let status = Element::new("div")
        .region(Region::FormStatus)
        .class("form-status")
        .child_if(
            form.banner
                .as_deref()
                .map(|banner| Element::new("p").class("error").text(banner)),
        );

    Element::new("form")
        .region(Region::Form)
        .class("support-form")
        .attr("data-category", form.category_id.as_str())
        .flag("novalidate")
        .child(category_bar)
        .child(field(form, FormField::Subject, "Subject", subject))
        .child(field(form, FormField::Description, "Description", description))
        .child(field(form, FormField::Email, "Your Email", email))
        .child_if(show_priority.then(|| priority_field(form)))
        .child(actions)
        .child(status)
}

fn field(form: &FormState, which: FormField, label: &str, control: Element) -> Element {
    let error = form.errors.get(which);
    let control = if error.is_some() {
        control.class("invalid")
    } else {
        control
    };
    Element::new("div")
        .class(if error.is_some() { "field has-error" } else { "field" })
        .child(Element::new("label").attr("for", which.name()).text(label))
        .child(control)
        .child_if(error.map(|message| Element::new("p").class("field-error").text(message)))
}

fn priority_field(form: &FormState) -> Element {
    let selected = Priority::parse_or_default(&form.input.priority);
    let options = Priority::ALL.into_iter().map(|priority| {
        Element::new("option")
            .attr("value", priority.level().to_string())
            .flag_if("selected", priority == selected)
            .text(priority.label())
    });
    Element::new("div")
        .class("field")
        .child(Element::new("label").attr("for", "priority").text("Priority"))
        .child(
            Element::new("select")
                .attr("id", "priority")
                .attr("name", "priority")
                .children(options),
        )
}

fn success(response: &SubmitResponse) -> Element {
    Element::new("div")
        .region(Region::Success)
        .class("success")
        .child(Element::new("div").class("success-icon").text("✅"))
        .child(Element::new("h3").text("Submitted!"))
        .child(Element::new("p").class("success-message").text(response.message.as_str()))
        .child(
            Element::new("p")
                .class("ticket-id")
                .text("Ticket: ")
                .child(Element::new("strong").text(response.ticket_id.as_str())),
        )
        .child(
            Element::new("button")
                .class("btn-submit")
                .attr("data-action", Action::DismissSuccess.as_str())
                .text("Done"),
        )
}

fn past_requests(list: &TicketList) -> Element {
    let header = Element::new("div")
        .class("section-header")
        .child(
            Element::new("button")
                .attr("type", "button")
                .class("btn-back")
                .attr("data-action", Action::Back.as_str())
                .text("← Back"),
        )
        .child(Element::new("span").class("section-title").text("Past requests"));
    let content = match list {
        TicketList::Loading => Element::new("p").class("loading").text("Loading..."),
        TicketList::Failed(message) => {
            Element::new("p").class("error-msg").text(message.as_str())
        }
        TicketList::Loaded(tickets) if tickets.is_empty() => {
            Element::new("p").class("empty-msg").text(EMPTY_TICKETS_MESSAGE)
        }
        TicketList::Loaded(tickets) => Element::new("ul")
            .class("tickets-list")
            .children(tickets.iter().map(ticket_row)),
    };
    Element::new("div").class("past-requests").child(header).child(
        Element::new("div")
            .region(Region::TicketList)
            .class("tickets")
            .child(content),
    )
}

fn ticket_row(ticket: &TicketSummary) -> Element {
    let priority = format::priority_label(ticket.priority);
    Element::new("li")
        .class("ticket-row")
        .attr("data-status", ticket.status.as_str())
        .child(
            Element::new("div")
                .class("ticket-main")
                .child(
                    Element::new("span")
                        .class("ticket-status")
                        .attr("title", ticket.status.as_str())
                        .text(format::status_glyph(&ticket.status)),
                )
                .child(
                    Element::new("span")
                        .class("ticket-subject")
                        .text(ticket.subject.as_str()),
                ),
        )
        .child(
            Element::new("div")
                .class("ticket-meta")
                .child(
                    Element::new("span")
                        .class("ticket-id-label")
                        .text(ticket.ticket_id.as_str()),
                )
                .child(
                    Element::new("span")
                        .class(format!("ticket-priority {}", priority.to_ascii_lowercase()))
                        .text(priority),
                )
                .child(
                    Element::new("span")
                        .class("ticket-date")
                        .text(format::created_date(ticket.created_at.as_deref())),
                ),
        )
}

fn branding_style(branding: &Branding, fallback: &Branding) -> String {
    let primary = css_color(&branding.primary_color).unwrap_or(&fallback.primary_color);
    let accent = css_color(&branding.accent_color).unwrap_or(&fallback.accent_color);
    format!("--primary: {primary}; --accent: {accent};")
}

/// Accept `#rgb`-style hex colours and bare colour names only.
fn css_color(value: &str) -> Option<&str> {
    let value = value.trim();
    let valid = match value.strip_prefix('#') {
        Some(hex) => matches!(hex.len(), 3 | 4 | 6 | 8) && hex.chars().all(|ch| ch.is_ascii_hexdigit()),
        None => !value.is_empty() && value.chars().all(|ch| ch.is_ascii_alphabetic()),
    };
    valid.then_some(value)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::support_api::{Category, FieldToggles, TicketStatus};

    fn config() -> WidgetConfig {
        WidgetConfig {
            app_id: "a".into(),
            app_name: "App".into(),
            categories: vec![Category {
                id: "bug".into(),
                label: "Bug".into(),
                icon: "🐛".into(),
            }],
            branding: Branding::default(),
            fields: FieldToggles::default(),
        }
    }

    fn render(session: &SessionAttributes, config: Option<&WidgetConfig>, screen: &Screen) -> Element {
        render_widget(&RenderContext {
            session,
            config,
            screen,
            panel_open: false,
        })
    }

    #[test]
    fn home_lists_one_button_per_category() {
        let config = config();
        let tree = render(&SessionAttributes::default(), Some(&config), &Screen::Home);
        let buttons = tree.find_by_class("category-btn");
        assert_eq!(buttons.len(), 1);
        assert_eq!(buttons[0].get_attr("data-id"), Some("bug"));
        assert_eq!(buttons[0].find_by_class("cat-label")[0].text_content(), "Bug");
        assert_eq!(tree.find_by_class("link-btn").len(), 1);
    }

    #[test]
    fn rendering_is_idempotent() {
        let config = config();
        let session = SessionAttributes::default();
        let screen = Screen::Form(FormState::new("bug", "me@example.com"));
        assert_eq!(
            render(&session, Some(&config), &screen).to_html(),
            render(&session, Some(&config), &screen).to_html()
        );
    }

    #[test]
    fn config_strings_are_escaped() {
        let mut config = config();
        config.app_name = "<b>App</b>".into();
        config.categories[0].label = "<img src=x onerror=alert(1)>".into();
        let html = render(&SessionAttributes::default(), Some(&config), &Screen::Home).to_html();
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=alert(1)&gt;"));
        assert!(html.contains("&lt;b&gt;App&lt;/b&gt;"));
    }

    #[test]
    fn inline_panel_has_no_launcher_or_close_button() {
        let session = SessionAttributes::from_attributes([("position", "inline")]);
        let tree = render(&session, None, &Screen::Loading);
        assert!(tree.find_region(Region::Launcher).is_none());
        assert!(tree.find_by_class("close-btn").is_empty());
        let panel = tree.find_region(Region::Panel).unwrap();
        assert!(panel.has_class("open"));
        assert!(panel.has_class("panel-inline"));

        let floating = render(&SessionAttributes::default(), None, &Screen::Loading);
        let launcher = floating.find_region(Region::Launcher).unwrap();
        assert!(launcher.has_class("fab-bottom-right"));
        assert!(!floating.find_region(Region::Panel).unwrap().has_class("open"));
    }

    #[test]
    fn form_shows_field_errors_and_banner() {
        let config = config();
        let mut form = FormState::new("bug", "");
        form.validate();
        form.banner = Some("email: invalid format".into());
        let tree = render(&SessionAttributes::default(), Some(&config), &Screen::Form(form));
        assert_eq!(tree.find_by_class("field-error").len(), 3);
        assert_eq!(tree.find_by_class("invalid").len(), 3);
        let status = tree.find_region(Region::FormStatus).unwrap();
        assert_eq!(status.text_content(), "email: invalid format");
        assert_eq!(tree.find_by_class("context-cat")[0].text_content(), "🐛 Bug");
    }

    #[test]
    fn submitting_disables_controls() {
        let config = config();
        let screen = Screen::Submitting(FormState::new("bug", "me@example.com"));
        let tree = render(&SessionAttributes::default(), Some(&config), &screen);
        let submit = tree.find_by_class("btn-submit")[0];
        assert_eq!(submit.get_attr("disabled"), Some(""));
        assert_eq!(submit.text_content(), "Submitting...");
        let email = tree.find_by_class("field")[2].child_elements().nth(1).unwrap();
        assert_eq!(email.get_attr("value"), Some("me@example.com"));
    }

    #[test]
    fn priority_selector_follows_field_toggle() {
        let mut config = config();
        let mut form = FormState::new("bug", "");
        form.input.priority = "2".into();
        let screen = Screen::Form(form);
        let tree = render(&SessionAttributes::default(), Some(&config), &screen);
        let html = tree.to_html();
        assert!(html.contains("<option value=\"2\" selected>High</option>"));

        config.fields.priority = false;
        let tree = render(&SessionAttributes::default(), Some(&config), &screen);
        assert!(!tree.to_html().contains("<select"));
    }

    #[test]
    fn success_shows_ticket_and_message_verbatim() {
        let screen = Screen::Success(SubmitResponse {
            ticket_id: "T-100".into(),
            devops_work_item_id: Some(7),
            status: "created".into(),
            message: "Thanks!".into(),
        });
        let tree = render(&SessionAttributes::default(), None, &screen);
        let success = tree.find_region(Region::Success).unwrap();
        let text = success.text_content();
        assert!(text.contains("T-100"));
        assert!(text.contains("Thanks!"));
    }

    #[test]
    fn ticket_list_states() {
        let session = SessionAttributes::default();
        let empty = render(&session, None, &Screen::PastRequests(TicketList::Loaded(Vec::new())));
        let list = empty.find_region(Region::TicketList).unwrap();
        assert_eq!(list.text_content(), EMPTY_TICKETS_MESSAGE);
        assert!(list.find_by_class("ticket-row").is_empty());

        let ticket = TicketSummary {
            ticket_id: "SUP-1".into(),
            app_id: Some("a".into()),
            category: Some("bug".into()),
            subject: "<Broken> save".into(),
            status: TicketStatus::Resolved,
            priority: Some(3),
            created_at: None,
            devops_work_item_id: None,
        };
        let tree = render(&session, None, &Screen::PastRequests(TicketList::Loaded(vec![ticket])));
        let rows = tree.find_by_class("ticket-row");
        assert_eq!(rows.len(), 1);
        assert_eq!(rows[0].find_by_class("ticket-status")[0].text_content(), "✅");
        assert_eq!(rows[0].find_by_class("ticket-priority")[0].text_content(), "Normal");
        assert_eq!(rows[0].find_by_class("ticket-date")[0].text_content(), "");
        assert!(tree.to_html().contains("&lt;Broken&gt; save"));

        let failed = render(
            &session,
            None,
            &Screen::PastRequests(TicketList::Failed("Could not load".into())),
        );
        assert_eq!(failed.find_by_class("error-msg")[0].text_content(), "Could not load");
    }

    #[test]
    fn branding_colours_are_sanitised() {
        let mut config = config();
        config.branding.primary_color = "#112233".into();
        config.branding.accent_color = "red; background: url(x)".into();
        let tree = render(&SessionAttributes::default(), Some(&config), &Screen::Home);
        assert_eq!(
            tree.get_attr("style"),
            Some("--primary: #112233; --accent: #10b981;")
        );
    }
}
