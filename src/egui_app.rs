//! Native egui host for the support component.

mod panel;
pub mod style;

use std::time::Duration;

use crate::widget::SupportWidget;

/// Initial window size for the host.
pub const DEFAULT_VIEWPORT_SIZE: [f32; 2] = [960.0, 720.0];

/// Repaint cadence while requests are in flight.
const JOB_POLL_INTERVAL: Duration = Duration::from_millis(50);

pub struct SupportHostApp {
    widget: SupportWidget,
    applied_palette: Option<style::Palette>,
}

impl SupportHostApp {
    /// Wrap an already configured component, activating it if needed.
    pub fn new(mut widget: SupportWidget) -> Self {
        if !widget.is_active() {
            widget.activate();
        }
        Self {
            widget,
            applied_palette: None,
        }
    }

    pub fn widget(&self) -> &SupportWidget {
        &self.widget
    }

    fn sync_visuals(&mut self, ctx: &egui::Context) -> style::Palette {
        let palette = style::palette(self.widget.config().map(|config| &config.branding));
        if self.applied_palette != Some(palette) {
            ctx.style_mut(|egui_style| style::apply_visuals(&mut egui_style.visuals, palette));
            self.applied_palette = Some(palette);
        }
        palette
    }
}

impl eframe::App for SupportHostApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.widget.poll_jobs();
        let palette = self.sync_visuals(ctx);
        let events = panel::show(ctx, &self.widget, palette);
        if !events.is_empty() {
            ctx.request_repaint();
        }
        for event in events {
            self.widget.handle(event);
        }
        if self.widget.has_pending_jobs() {
            ctx.request_repaint_after(JOB_POLL_INTERVAL);
        }
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        self.widget.deactivate();
    }
}
