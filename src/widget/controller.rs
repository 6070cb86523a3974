//! View-controller deciding which screen is shown and reacting to input.

use std::sync::Arc;

use tracing::{debug, info, warn};

use crate::support_api::{
    HttpSupportApi, Priority, SubmitContext, SupportApi, TicketQuery, TicketSubmission,
    WidgetConfig,
};

use super::attributes::SessionAttributes;
use super::events::WidgetEvent;
use super::jobs::{
    ConfigLoadJob, ConfigLoadResult, JobMessage, SubmitJob, SubmitResult, TicketListJob,
    TicketListResult, WidgetJobs,
};
use super::markup::Element;
use super::render::{self, RenderContext};
use super::state::{FormInput, FormState, Screen, ScreenKind, TicketList};

/// Full-screen message shown when the display config cannot be loaded.
pub const CONFIG_ERROR_MESSAGE: &str =
    "Support is unavailable right now. Please try again later.";
/// Inline message shown when past requests cannot be loaded.
pub const TICKETS_ERROR_MESSAGE: &str = "Could not load your past requests.";

/// The embeddable support component.
pub struct SupportWidget {
    session: SessionAttributes,
    config: Option<WidgetConfig>,
    screen: Screen,
    panel_open: bool,
    client_context: SubmitContext,
    /// Bumped on every (de)activation so late results from an earlier one are dropped.
    activation: u64,
    active: bool,
    jobs: WidgetJobs,
}

impl SupportWidget {
    pub fn new(session: SessionAttributes, api: Arc<dyn SupportApi>) -> Self {
        Self {
            session,
            config: None,
            screen: Screen::Loading,
            panel_open: false,
            client_context: SubmitContext::default(),
            activation: 0,
            active: false,
            jobs: WidgetJobs::new(api),
        }
    }

    /// Widget talking to the real backend over HTTP.
    pub fn with_http(session: SessionAttributes) -> Self {
        Self::new(session, Arc::new(HttpSupportApi))
    }

    /// Attach to the host: reset to `Loading` and request the display config.
    pub fn activate(&mut self) {
        self.activation += 1;
        self.active = true;
        self.config = None;
        self.screen = Screen::Loading;
        self.panel_open = self.session.position.is_inline();
        info!(
            app_id = %self.session.app_id,
            position = self.session.position.as_str(),
            "Support widget activated"
        );
        self.load_config();
    }

    /// Detach from the host; in-flight results are discarded when they land.
    pub fn deactivate(&mut self) {
        self.activation += 1;
        self.active = false;
        self.config = None;
        self.screen = Screen::Loading;
        self.panel_open = false;
    }

    fn load_config(&mut self) {
        if !self.session.has_app_id() {
            debug!("No app-id set; skipping config load");
            return;
        }
        let started = self.jobs.begin_config_load(ConfigLoadJob {
            activation: self.activation,
            api_url: self.session.api_url.clone(),
            app_id: self.session.app_id.clone(),
        });
        if !started {
            debug!("Config load already in flight");
        }
    }

    /// Apply a live attribute change from the host.
    pub fn set_attribute(&mut self, name: &str, value: Option<&str>) {
        if !self.session.set_attribute(name, value) {
            return;
        }
        if name == "position" && self.session.position.is_inline() {
            self.panel_open = true;
        }
    }

    pub fn session(&self) -> &SessionAttributes {
        &self.session
    }

    pub fn config(&self) -> Option<&WidgetConfig> {
        self.config.as_ref()
    }

    pub fn screen(&self) -> &Screen {
        &self.screen
    }

    pub fn screen_kind(&self) -> ScreenKind {
        self.screen.kind()
    }

    pub fn is_active(&self) -> bool {
        self.active
    }

    pub fn is_panel_open(&self) -> bool {
        self.panel_open
    }

    /// True while any request is still outstanding.
    pub fn has_pending_jobs(&self) -> bool {
        self.jobs.any_in_progress()
    }

    /// Telemetry attached to every submission.
    pub fn set_client_context(&mut self, context: SubmitContext) {
        self.client_context = context;
    }

    pub fn client_context(&self) -> &SubmitContext {
        &self.client_context
    }

    pub fn handle(&mut self, event: WidgetEvent) {
        match event {
            WidgetEvent::TogglePanel => self.toggle_panel(),
            WidgetEvent::ClosePanel => self.close_panel(),
            WidgetEvent::SelectCategory(id) => self.select_category(&id),
            WidgetEvent::Back => self.back(),
            WidgetEvent::EditForm(input) => {
                if let Some(current) = self.form_input_mut() {
                    *current = input;
                }
            }
            WidgetEvent::Submit => self.submit(),
            WidgetEvent::ShowPastRequests => self.show_past_requests(),
            WidgetEvent::DismissSuccess => self.dismiss_success(),
        }
    }

    pub fn open_panel(&mut self) {
        self.panel_open = true;
    }

    /// Close the panel; inline panels stay open.
    pub fn close_panel(&mut self) {
        if self.session.position.is_inline() {
            return;
        }
        self.panel_open = false;
    }

    pub fn toggle_panel(&mut self) {
        if self.panel_open {
            self.close_panel();
        } else {
            self.open_panel();
        }
    }

    /// Home → Form for a known category.
    pub fn select_category(&mut self, category_id: &str) {
        if !matches!(self.screen, Screen::Home) {
            debug!(screen = ?self.screen.kind(), "Ignoring category selection");
            return;
        }
        let known = self
            .config
            .as_ref()
            .is_some_and(|config| config.category(category_id).is_some());
        if !known {
            debug!("Ignoring unknown support category {category_id:?}");
            return;
        }
        self.screen = Screen::Form(FormState::new(category_id, &self.session.user_email));
    }

    /// Form or past requests → Home. Ignored while a submission is in flight.
    pub fn back(&mut self) {
        match self.screen {
            Screen::Form(_) | Screen::PastRequests(_) => self.screen = Screen::Home,
            _ => debug!(screen = ?self.screen.kind(), "Ignoring back"),
        }
    }

    /// Editable form fields, unavailable while submitting.
    pub fn form_input_mut(&mut self) -> Option<&mut FormInput> {
        match &mut self.screen {
            Screen::Form(form) => Some(&mut form.input),
            _ => None,
        }
    }

    /// Validate the form and, when it passes, POST the ticket.
    pub fn submit(&mut self) {
        let Screen::Form(form) = &mut self.screen else {
            debug!("Ignoring submit outside the form");
            return;
        };
        form.banner = None;
        if !form.validate() {
            debug!(errors = form.errors.len(), "Support form failed validation");
            return;
        }
        let submission = build_submission(&self.session, &self.client_context, form);
        let job = SubmitJob {
            activation: self.activation,
            api_url: self.session.api_url.clone(),
            submission,
        };
        info!(
            app_id = %job.submission.app_id,
            category = %job.submission.category,
            priority = job.submission.priority,
            "Submitting support ticket"
        );
        if !self.jobs.begin_submit(job) {
            debug!("Submission already in flight");
            return;
        }
        if let Screen::Form(form) = std::mem::replace(&mut self.screen, Screen::Loading) {
            self.screen = Screen::Submitting(form);
        }
    }

    /// Home → past requests, fetching the first page.
    pub fn show_past_requests(&mut self) {
        if !matches!(self.screen, Screen::Home) {
            debug!(screen = ?self.screen.kind(), "Ignoring past requests");
            return;
        }
        self.screen = Screen::PastRequests(TicketList::Loading);
        if self.jobs.ticket_list_in_progress(self.activation) {
            return;
        }
        self.jobs.begin_ticket_list(TicketListJob {
            activation: self.activation,
            api_url: self.session.api_url.clone(),
            query: TicketQuery::for_session(&self.session.app_id, &self.session.user_email),
        });
    }

    /// Success → Home, closing the panel unless it is inline.
    pub fn dismiss_success(&mut self) {
        if !matches!(self.screen, Screen::Success(_)) {
            debug!(screen = ?self.screen.kind(), "Ignoring dismiss");
            return;
        }
        self.screen = Screen::Home;
        self.close_panel();
    }

    /// Apply every finished job. Returns true when anything changed.
    pub fn poll_jobs(&mut self) -> bool {
        let mut applied = false;
        while let Ok(message) = self.jobs.try_recv_message() {
            applied = true;
            match message {
                JobMessage::ConfigLoaded(message) => self.apply_config_loaded(message),
                JobMessage::TicketSubmitted(message) => self.apply_ticket_submitted(message),
                JobMessage::TicketsListed(message) => self.apply_tickets_listed(message),
            }
        }
        applied
    }

    fn is_current(&self, activation: u64) -> bool {
        self.active && activation == self.activation
    }

    fn apply_config_loaded(&mut self, message: ConfigLoadResult) {
        self.jobs.clear_config_load(message.activation);
        if !self.is_current(message.activation) {
            debug!("Dropping config from a previous activation");
            return;
        }
        match message.result {
            Ok(config) => {
                info!(
                    app_id = %config.app_id,
                    categories = config.categories.len(),
                    "Loaded support widget config"
                );
                self.config = Some(config);
                if matches!(self.screen, Screen::Loading) {
                    self.screen = Screen::Home;
                }
            }
            Err(err) => {
                warn!("Failed to load support config for {}: {err}", self.session.app_id);
                self.screen = Screen::Error(CONFIG_ERROR_MESSAGE.to_string());
            }
        }
    }

    fn apply_ticket_submitted(&mut self, message: SubmitResult) {
        self.jobs.clear_submit(message.activation);
        if !self.is_current(message.activation) {
            debug!("Dropping submission result from a previous activation");
            return;
        }
        let Screen::Submitting(mut form) = std::mem::replace(&mut self.screen, Screen::Loading)
        else {
            return;
        };
        match message.result {
            Ok(response) => {
                info!(ticket_id = %response.ticket_id, "Support ticket created");
                self.screen = Screen::Success(response);
            }
            Err(err) => {
                warn!("Support ticket submission failed: {err}");
                form.banner = Some(err.banner_message());
                self.screen = Screen::Form(form);
            }
        }
    }

    fn apply_tickets_listed(&mut self, message: TicketListResult) {
        self.jobs.clear_ticket_list(message.activation);
        if !self.is_current(message.activation) {
            debug!("Dropping ticket list from a previous activation");
            return;
        }
        let Screen::PastRequests(list) = &mut self.screen else {
            debug!("Dropping ticket list; past requests no longer shown");
            return;
        };
        *list = match message.result {
            Ok(tickets) => TicketList::Loaded(tickets),
            Err(err) => {
                warn!("Failed to load past requests: {err}");
                TicketList::Failed(TICKETS_ERROR_MESSAGE.to_string())
            }
        };
    }

    fn render_context(&self) -> RenderContext<'_> {
        RenderContext {
            session: &self.session,
            config: self.config.as_ref(),
            screen: &self.screen,
            panel_open: self.panel_open,
        }
    }

    /// Element tree for the whole component.
    pub fn render(&self) -> Element {
        render::render_widget(&self.render_context())
    }

    /// Serialized markup for the whole component.
    pub fn render_html(&self) -> String {
        self.render().to_html()
    }
}

fn build_submission(
    session: &SessionAttributes,
    context: &SubmitContext,
    form: &FormState,
) -> TicketSubmission {
    let user_name = session.user_name.trim();
    TicketSubmission {
        app_id: session.app_id.clone(),
        category: form.category_id.clone(),
        subject: form.input.subject.trim().to_string(),
        description: form.input.description.trim().to_string(),
        user_email: form.input.email.trim().to_string(),
        user_name: (!user_name.is_empty()).then(|| user_name.to_string()),
        priority: Priority::parse_or_default(&form.input.priority).level(),
        context: context.clone(),
    }
}
