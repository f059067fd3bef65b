use std::io::Write;

use tracing::debug;

use crate::error::Result;
use crate::models::{Event, Row};

/// Column names Google Calendar expects, in import order.
pub const HEADER: [&str; 9] = [
    "Subject",
    "Start Date",
    "Start Time",
    "End Date",
    "End Time",
    "All Day Event",
    "Description",
    "Location",
    "Private",
];

const FALSE: &str = "False";

/// Converts one infoboard event into a Google Calendar import row.
///
/// Events are single-day, so start and end share the same date.
pub fn format_row(event: &Event) -> Result<Row> {
    let session = event.session()?;
    let date = session.date.format("%m/%d/%Y").to_string();

    Ok(Row {
        subject: session.course_name.to_string(),
        start_date: date.clone(),
        start_time: session.start.format("%I:%M %p").to_string(),
        end_date: date,
        end_time: session.end.format("%I:%M %p").to_string(),
        all_day_event: FALSE,
        description: session.description(),
        location: session.room.to_string(),
        private: FALSE,
    })
}

/// Writes the header followed by one row per event, in input order.
///
/// Stops at the first event that cannot be formatted. Rows already written
/// stay in the sink. Returns the number of rows written.
pub fn write_all<'a, W, I>(events: I, sink: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Event>,
{
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .terminator(csv::Terminator::CRLF)
        .from_writer(sink);

    writer.write_record(HEADER)?;

    let mut count = 0;
    for event in events {
        let row = format_row(event)?;
        debug!(subject = %row.subject, date = %row.start_date, "writing row");
        writer.serialize(&row)?;
        count += 1;
    }

    writer.flush()?;
    Ok(count)
}
