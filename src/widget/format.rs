//! Display helpers for past-request rows.

use time::{
    OffsetDateTime, PrimitiveDateTime, UtcOffset,
    format_description::{
        FormatItem,
        well_known::{Iso8601, Rfc3339},
    },
    macros::format_description,
};

use crate::support_api::{Priority, TicketStatus};

const DATE_FORMAT: &[FormatItem<'static>] =
    format_description!("[month repr:short] [day padding:none], [year]");

pub fn status_glyph(status: &TicketStatus) -> &'static str {
    match status {
        TicketStatus::Created => "🆕",
        TicketStatus::InProgress => "🔄",
        TicketStatus::Resolved => "✅",
        TicketStatus::Closed => "🔒",
        TicketStatus::Other(_) => "📋",
    }
}

/// Label for a 1–4 priority; blank when missing or out of range.
pub fn priority_label(priority: Option<i64>) -> &'static str {
    priority
        .and_then(Priority::from_level)
        .map(Priority::label)
        .unwrap_or("")
}

/// `created_at` as a short date in the local offset; blank when unparsable.
pub fn created_date(created_at: Option<&str>) -> String {
    let offset = UtcOffset::current_local_offset().unwrap_or(UtcOffset::UTC);
    created_date_in(created_at, offset)
}

pub fn created_date_in(created_at: Option<&str>, offset: UtcOffset) -> String {
    let Some(raw) = created_at.map(str::trim).filter(|raw| !raw.is_empty()) else {
        return String::new();
    };
    parse_timestamp(raw)
        .and_then(|stamp| stamp.to_offset(offset).format(DATE_FORMAT).ok())
        .unwrap_or_default()
}

fn parse_timestamp(raw: &str) -> Option<OffsetDateTime> {
    OffsetDateTime::parse(raw, &Rfc3339)
        .or_else(|_| OffsetDateTime::parse(raw, &Iso8601::DEFAULT))
        .ok()
        .or_else(|| {
            PrimitiveDateTime::parse(raw, &Iso8601::DEFAULT)
                .ok()
                .map(PrimitiveDateTime::assume_utc)
        })
}
