//! ICS rendering of infoboard events.
//!
//! Times are written as local wall-clock times tagged with `TZID=Europe/Vienna`
//! and are never converted.

use std::io::Write;

use chrono::{NaiveDate, NaiveTime};
use icalendar::{Calendar, Component, EventLike, Property};
use tracing::debug;

use crate::error::Result;
use crate::models::Event;

pub const TIMEZONE: &str = "Europe/Vienna";

fn local_datetime_property(name: &str, date: NaiveDate, time: NaiveTime) -> Property {
    let mut prop = Property::new(name, date.and_time(time).format("%Y%m%dT%H%M%S").to_string());
    prop.add_parameter("TZID", TIMEZONE);
    prop
}

/// Converts one infoboard event into a VEVENT.
pub fn to_ics_event(event: &Event) -> Result<icalendar::Event> {
    let session = event.session()?;

    let uid = format!(
        "{}T{}_{}",
        session.date.format("%Y%m%d"),
        session.start.format("%H%M"),
        session.course_name.replace(' ', "-")
    );

    let mut ics_event = icalendar::Event::new();
    ics_event.uid(&uid);
    ics_event.summary(session.course_name);
    ics_event.description(&session.description());
    ics_event.append_property(local_datetime_property("DTSTART", session.date, session.start));
    ics_event.append_property(local_datetime_property("DTEND", session.date, session.end));

    if !session.room.is_empty() {
        ics_event.location(session.room);
    }

    Ok(ics_event.done())
}

/// Builds a calendar named `name` holding one VEVENT per event, in input order.
///
/// Fails on the first event that cannot be converted.
pub fn build_calendar<'a, I>(events: I, name: &str) -> Result<Calendar>
where
    I: IntoIterator<Item = &'a Event>,
{
    let mut calendar = Calendar::new();
    calendar.name(name);
    calendar.timezone(TIMEZONE);

    for event in events {
        let ics_event = to_ics_event(event)?;
        debug!(summary = ?ics_event.get_summary(), "adding event");
        calendar.push(ics_event);
    }

    Ok(calendar.done())
}

/// Renders the calendar into `sink`. Returns the number of events written.
///
/// Nothing is written when any event fails to convert.
pub fn write_all<'a, W, I>(events: I, name: &str, mut sink: W) -> Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Event>,
{
    let events: Vec<&Event> = events.into_iter().collect();
    let calendar = build_calendar(events.iter().copied(), name)?;
    let count = events.len();

    sink.write_all(calendar.to_string().as_bytes())?;
    sink.flush()?;
    Ok(count)
}

/// Calendar name used for a PKZ feed.
pub fn calendar_name(pkz: &str) -> String {
    format!("FH Kufstein ({pkz})")
}
