//! Background request jobs for the widget.
//!
//! Each request runs on its own thread and reports back over a channel; the
//! controller applies results on the UI thread in `poll_jobs`. Each activation
//! may have one job per request kind in flight.

use std::{
    sync::{
        Arc,
        mpsc::{Receiver, Sender, TryRecvError},
    },
    thread,
};

use crate::support_api::{
    SubmitResponse, SupportApi, SupportApiError, TicketQuery, TicketSubmission, TicketSummary,
    WidgetConfig,
};

pub(crate) enum JobMessage {
    ConfigLoaded(ConfigLoadResult),
    TicketSubmitted(SubmitResult),
    TicketsListed(TicketListResult),
}

#[derive(Debug)]
pub(crate) struct ConfigLoadJob {
    pub(crate) activation: u64,
    pub(crate) api_url: String,
    pub(crate) app_id: String,
}

#[derive(Debug)]
pub(crate) struct SubmitJob {
    pub(crate) activation: u64,
    pub(crate) api_url: String,
    pub(crate) submission: TicketSubmission,
}

#[derive(Debug)]
pub(crate) struct TicketListJob {
    pub(crate) activation: u64,
    pub(crate) api_url: String,
    pub(crate) query: TicketQuery,
}

#[derive(Debug)]
pub(crate) struct ConfigLoadResult {
    pub(crate) activation: u64,
    pub(crate) result: Result<WidgetConfig, SupportApiError>,
}

#[derive(Debug)]
pub(crate) struct SubmitResult {
    pub(crate) activation: u64,
    pub(crate) result: Result<SubmitResponse, SupportApiError>,
}

#[derive(Debug)]
pub(crate) struct TicketListResult {
    pub(crate) activation: u64,
    pub(crate) result: Result<Vec<TicketSummary>, SupportApiError>,
}

/// Activation that started the in-flight job of each kind, if any.
///
/// A job left over from an earlier activation never blocks the current one;
/// its result is dropped by the controller when it lands.
pub(crate) struct WidgetJobs {
    api: Arc<dyn SupportApi>,
    message_tx: Sender<JobMessage>,
    message_rx: Receiver<JobMessage>,
    config_load: Option<u64>,
    submit: Option<u64>,
    ticket_list: Option<u64>,
}

impl WidgetJobs {
    pub(crate) fn new(api: Arc<dyn SupportApi>) -> Self {
        let (message_tx, message_rx) = std::sync::mpsc::channel::<JobMessage>();
        Self {
            api,
            message_tx,
            message_rx,
            config_load: None,
            submit: None,
            ticket_list: None,
        }
    }

    pub(crate) fn try_recv_message(&self) -> Result<JobMessage, TryRecvError> {
        self.message_rx.try_recv()
    }

    pub(crate) fn any_in_progress(&self) -> bool {
        self.config_load.is_some() || self.submit.is_some() || self.ticket_list.is_some()
    }

    pub(crate) fn ticket_list_in_progress(&self, activation: u64) -> bool {
        self.ticket_list == Some(activation)
    }

    /// Returns `false` when this activation already has a config load running.
    pub(crate) fn begin_config_load(&mut self, job: ConfigLoadJob) -> bool {
        if !claim(&mut self.config_load, job.activation) {
            return false;
        }
        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.fetch_config(&job.api_url, &job.app_id);
            let _ = tx.send(JobMessage::ConfigLoaded(ConfigLoadResult {
                activation: job.activation,
                result,
            }));
        });
        true
    }

    pub(crate) fn clear_config_load(&mut self, activation: u64) {
        release(&mut self.config_load, activation);
    }

    /// Returns `false` when this activation already has a submission running.
    pub(crate) fn begin_submit(&mut self, job: SubmitJob) -> bool {
        if !claim(&mut self.submit, job.activation) {
            return false;
        }
        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.submit_ticket(&job.api_url, &job.submission);
            let _ = tx.send(JobMessage::TicketSubmitted(SubmitResult {
                activation: job.activation,
                result,
            }));
        });
        true
    }

    pub(crate) fn clear_submit(&mut self, activation: u64) {
        release(&mut self.submit, activation);
    }

    /// Returns `false` when this activation already has a ticket list fetch running.
    pub(crate) fn begin_ticket_list(&mut self, job: TicketListJob) -> bool {
        if !claim(&mut self.ticket_list, job.activation) {
            return false;
        }
        let api = Arc::clone(&self.api);
        let tx = self.message_tx.clone();
        thread::spawn(move || {
            let result = api.list_tickets(&job.api_url, &job.query);
            let _ = tx.send(JobMessage::TicketsListed(TicketListResult {
                activation: job.activation,
                result,
            }));
        });
        true
    }

    pub(crate) fn clear_ticket_list(&mut self, activation: u64) {
        release(&mut self.ticket_list, activation);
    }
}

fn claim(slot: &mut Option<u64>, activation: u64) -> bool {
    if *slot == Some(activation) {
        return false;
    }
    *slot = Some(activation);
    true
}

// A newer activation's job keeps its slot when an older result lands.
fn release(slot: &mut Option<u64>, activation: u64) {
    if *slot == Some(activation) {
        *slot = None;
    }
}
