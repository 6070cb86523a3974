#![deny(missing_docs)]

//! Entry point for the native support widget host.
use eframe::egui;
use support_widget::egui_app::{DEFAULT_VIEWPORT_SIZE, SupportHostApp};
use support_widget::host_config;
use support_widget::logging;
use support_widget::widget::SupportWidget;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    if let Err(err) = logging::init() {
        eprintln!("Logging disabled: {err}");
    }

    let config = match host_config::load_or_default() {
        Ok(config) => config,
        Err(err) => {
            tracing::warn!("Using default host config: {err}");
            host_config::HostConfig::default()
        }
    };
    let mut widget = SupportWidget::with_http(config.session());
    widget.set_client_context(config.submit_context());
    widget.activate();

    let native_options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default()
            .with_inner_size(DEFAULT_VIEWPORT_SIZE)
            .with_title("Support"),
        ..Default::default()
    };
    eframe::run_native(
        "Support",
        native_options,
        Box::new(move |_cc| Ok(Box::new(SupportHostApp::new(widget)))),
    )?;
    Ok(())
}
