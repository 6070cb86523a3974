use egui::{Align2, RichText};

use super::style::Palette;
use crate::support_api::{Priority, SubmitResponse, TicketSummary, WidgetConfig};
use crate::widget::format;
use crate::widget::render::EMPTY_TICKETS_MESSAGE;
use crate::widget::{FormField, FormState, Position, Screen, SupportWidget, TicketList, WidgetEvent};

const PANEL_WIDTH: f32 = 360.0;
const FAB_SIZE: f32 = 56.0;
const EDGE_MARGIN: f32 = 24.0;

/// Draw the launcher and panel; returns the events raised this frame.
pub(super) fn show(ctx: &egui::Context, widget: &SupportWidget, palette: Palette) -> Vec<WidgetEvent> {
    let mut events = Vec::new();
    let position = widget.session().position;
    if position.is_inline() {
        egui::CentralPanel::default().show(ctx, |ui| {
            egui::Frame::window(ui.style()).show(ui, |ui| {
                ui.set_max_width(PANEL_WIDTH);
                header(ui, widget.config(), palette);
                ui.separator();
                body(ui, widget, palette, &mut events);
            });
        });
        return events;
    }

    egui::CentralPanel::default().show(ctx, |ui| {
        ui.label(RichText::new("Host application").color(palette.text_muted));
    });
    launcher(ctx, position, palette, &mut events);
    if widget.is_panel_open() {
        floating_panel(ctx, widget, position, palette, &mut events);
    }
    events
}

fn anchor(position: Position) -> (Align2, f32) {
    match position {
        Position::BottomLeft => (Align2::LEFT_BOTTOM, 1.0),
        Position::BottomRight | Position::Inline => (Align2::RIGHT_BOTTOM, -1.0),
    }
}

fn launcher(
    ctx: &egui::Context,
    position: Position,
    palette: Palette,
    events: &mut Vec<WidgetEvent>,
) {
    let (align, direction) = anchor(position);
    egui::Area::new(egui::Id::new("support_widget_fab"))
        .anchor(align, egui::vec2(direction * EDGE_MARGIN, -EDGE_MARGIN))
        .order(egui::Order::Foreground)
        .show(ctx, |ui| {
            let button = egui::Button::new(RichText::new("💬").size(24.0).color(egui::Color32::WHITE))
                .fill(palette.primary)
                .corner_radius(FAB_SIZE / 2.0)
                .min_size(egui::vec2(FAB_SIZE, FAB_SIZE));
            if ui.add(button).on_hover_text("Get Support").clicked() {
                events.push(WidgetEvent::TogglePanel);
            }
        });
}

fn floating_panel(
    ctx: &egui::Context,
    widget: &SupportWidget,
    position: Position,
    palette: Palette,
    events: &mut Vec<WidgetEvent>,
) {
    let (align, direction) = anchor(position);
    let mut open = true;
    egui::Window::new("Support")
        .title_bar(false)
        .anchor(
            align,
            egui::vec2(direction * EDGE_MARGIN, -(EDGE_MARGIN + FAB_SIZE + 16.0)),
        )
        .collapsible(false)
        .resizable(false)
        .default_width(PANEL_WIDTH)
        .open(&mut open)
        .show(ctx, |ui| {
            ui.set_width(PANEL_WIDTH);
            ui.horizontal(|ui| {
                header(ui, widget.config(), palette);
                ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                    if ui.small_button("×").on_hover_text("Close").clicked() {
                        events.push(WidgetEvent::ClosePanel);
                    }
                });
            });
            ui.separator();
            egui::ScrollArea::vertical()
                .max_height(480.0)
                .show(ui, |ui| body(ui, widget, palette, events));
        });
    if !open {
        events.push(WidgetEvent::ClosePanel);
    }
}

fn header(ui: &mut egui::Ui, config: Option<&WidgetConfig>, palette: Palette) {
    ui.vertical(|ui| {
        ui.label(RichText::new("Support").strong().size(16.0).color(palette.primary));
        if let Some(config) = config {
            ui.label(RichText::new(&config.app_name).small().color(palette.text_muted));
        }
    });
}

fn body(ui: &mut egui::Ui, widget: &SupportWidget, palette: Palette, events: &mut Vec<WidgetEvent>) {
    match widget.screen() {
        Screen::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading...").color(palette.text_muted));
            });
        }
        Screen::Home => home(ui, widget, palette, events),
        Screen::Form(form) => form_view(ui, widget.config(), form, false, palette, events),
        Screen::Submitting(form) => form_view(ui, widget.config(), form, true, palette, events),
        Screen::Success(response) => success(ui, response, palette, events),
        Screen::PastRequests(list) => past_requests(ui, list, palette, events),
        Screen::Error(message) => {
            ui.colored_label(palette.error, message);
        }
    }
}

fn home(ui: &mut egui::Ui, widget: &SupportWidget, palette: Palette, events: &mut Vec<WidgetEvent>) {
    let user_name = widget.session().user_name.trim();
    if !user_name.is_empty() {
        ui.label(RichText::new(format!("Hi {user_name}!")).color(palette.text_muted));
        ui.add_space(6.0);
    }
    let categories = widget
        .config()
        .map(|config| config.categories.as_slice())
        .unwrap_or_default();
    for category in categories {
        let label = format!("{}  {}", category.icon, category.label);
        let button = egui::Button::new(RichText::new(label).size(14.0))
            .min_size(egui::vec2(ui.available_width(), 36.0));
        if ui.add(button).clicked() {
            events.push(WidgetEvent::SelectCategory(category.id.clone()));
        }
    }
    ui.add_space(8.0);
    ui.vertical_centered(|ui| {
        if ui.link("View past requests").clicked() {
            events.push(WidgetEvent::ShowPastRequests);
        }
    });
}

fn form_view(
    ui: &mut egui::Ui,
    config: Option<&WidgetConfig>,
    form: &FormState,
    submitting: bool,
    palette: Palette,
    events: &mut Vec<WidgetEvent>,
) {
    let category = config.and_then(|config| config.category(&form.category_id));
    let title = match category {
        Some(category) => format!("{} {}", category.icon, category.label),
        None => form.category_id.clone(),
    };
    ui.label(RichText::new(title).strong());
    ui.add_space(6.0);

    let mut draft = form.input.clone();
    ui.add_enabled_ui(!submitting, |ui| {
        field_label(ui, "Subject");
        ui.add(
            egui::TextEdit::singleline(&mut draft.subject)
                .hint_text("Brief summary")
                .char_limit(200)
                .desired_width(f32::INFINITY),
        );
        field_error(ui, form, FormField::Subject, palette);

        field_label(ui, "Description");
        ui.add(
            egui::TextEdit::multiline(&mut draft.description)
                .hint_text("Tell us more...")
                .char_limit(5000)
                .desired_rows(4)
                .desired_width(f32::INFINITY),
        );
        field_error(ui, form, FormField::Description, palette);

        field_label(ui, "Your Email");
        ui.add(
            egui::TextEdit::singleline(&mut draft.email)
                .hint_text("you@example.com")
                .desired_width(f32::INFINITY),
        );
        field_error(ui, form, FormField::Email, palette);

        if config.is_none_or(|config| config.fields.priority) {
            field_label(ui, "Priority");
            let selected = Priority::parse_or_default(&draft.priority);
            egui::ComboBox::from_id_salt("support_widget_priority")
                .selected_text(selected.label())
                .show_ui(ui, |ui| {
                    for priority in Priority::ALL {
                        if ui
                            .selectable_label(priority == selected, priority.label())
                            .clicked()
                        {
                            draft.priority = priority.level().to_string();
                        }
                    }
                });
        }
    });
    if draft != form.input {
        events.push(WidgetEvent::EditForm(draft));
    }

    ui.add_space(10.0);
    ui.horizontal(|ui| {
        if ui.add_enabled(!submitting, egui::Button::new("← Back")).clicked() {
            events.push(WidgetEvent::Back);
        }
        let label = if submitting { "Submitting..." } else { "Submit" };
        let submit = egui::Button::new(RichText::new(label).color(egui::Color32::WHITE))
            .fill(palette.primary);
        if ui.add_enabled(!submitting, submit).clicked() {
            events.push(WidgetEvent::Submit);
        }
        if submitting {
            ui.spinner();
        }
    });
    if let Some(banner) = form.banner.as_deref() {
        ui.add_space(6.0);
        ui.colored_label(palette.error, banner);
    }
}

fn field_label(ui: &mut egui::Ui, text: &str) {
    ui.add_space(4.0);
    ui.label(RichText::new(text).small().strong());
}

fn field_error(ui: &mut egui::Ui, form: &FormState, field: FormField, palette: Palette) {
    if let Some(message) = form.errors.get(field) {
        ui.label(RichText::new(message).small().color(palette.error));
    }
}

fn success(
    ui: &mut egui::Ui,
    response: &SubmitResponse,
    palette: Palette,
    events: &mut Vec<WidgetEvent>,
) {
    ui.vertical_centered(|ui| {
        ui.label(RichText::new("✅").size(32.0));
        ui.label(RichText::new("Submitted!").strong().size(16.0));
        ui.label(&response.message);
        ui.horizontal(|ui| {
            ui.label(RichText::new("Ticket:").color(palette.text_muted));
            ui.label(RichText::new(&response.ticket_id).strong().color(palette.accent));
        });
        ui.add_space(8.0);
        if ui.button("Done").clicked() {
            events.push(WidgetEvent::DismissSuccess);
        }
    });
}

fn past_requests(
    ui: &mut egui::Ui,
    list: &TicketList,
    palette: Palette,
    events: &mut Vec<WidgetEvent>,
) {
    ui.horizontal(|ui| {
        if ui.button("← Back").clicked() {
            events.push(WidgetEvent::Back);
        }
        ui.label(RichText::new("Past requests").strong());
    });
    ui.add_space(6.0);
    match list {
        TicketList::Loading => {
            ui.horizontal(|ui| {
                ui.spinner();
                ui.label(RichText::new("Loading...").color(palette.text_muted));
            });
        }
        TicketList::Failed(message) => {
            ui.colored_label(palette.error, message);
        }
        TicketList::Loaded(tickets) if tickets.is_empty() => {
            ui.label(RichText::new(EMPTY_TICKETS_MESSAGE).color(palette.text_muted));
        }
        TicketList::Loaded(tickets) => {
            for ticket in tickets {
                ticket_row(ui, ticket, palette);
                ui.separator();
            }
        }
    }
}

fn ticket_row(ui: &mut egui::Ui, ticket: &TicketSummary, palette: Palette) {
    ui.horizontal(|ui| {
        ui.label(format::status_glyph(&ticket.status))
            .on_hover_text(ticket.status.as_str());
        ui.label(RichText::new(&ticket.subject).strong());
    });
    ui.horizontal(|ui| {
        ui.label(RichText::new(&ticket.ticket_id).small().color(palette.text_muted));
        let priority = format::priority_label(ticket.priority);
        if !priority.is_empty() {
            ui.label(RichText::new(priority).small());
        }
        ui.label(
            RichText::new(format::created_date(ticket.created_at.as_deref()))
                .small()
                .color(palette.text_muted),
        );
    });
}
