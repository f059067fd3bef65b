use chrono::{NaiveDate, NaiveTime};
use serde::{de, Deserialize, Deserializer, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};

/// Accepts strings, numbers and booleans as text; `null` counts as absent.
fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Option<String>, D::Error> {
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other) => Err(de::Error::custom(format!("expected text, found {other}"))),
    }
}

/// One course session as returned in the infoboard `data` array.
///
/// Every field is optional at the decoding stage so a missing key surfaces
/// as a `MissingField` error when the event is validated, not as a decode
/// failure of the whole response.
#[derive(Deserialize, Debug, Clone, Default, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub date: Option<String>,
    pub start_time: Option<String>,
    pub end_time: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub course_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub lecturer: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub info: Option<String>,
    #[serde(default, deserialize_with = "lenient_text")]
    pub room: Option<String>,
}

/// An event whose required fields are present and whose date and times parsed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Session<'a> {
    pub date: NaiveDate,
    pub start: NaiveTime,
    pub end: NaiveTime,
    pub course_name: &'a str,
    pub lecturer: &'a str,
    pub info: &'a str,
    pub room: &'a str,
}

fn required<'a>(value: &'a Option<String>, field: &'static str) -> Result<&'a str> {
    value.as_deref().ok_or(Error::MissingField(field))
}

fn parse_time(value: &str, field: &'static str) -> Result<NaiveTime> {
    NaiveTime::parse_from_str(value, "%H:%M").map_err(|source| Error::Parse {
        field,
        value: value.to_string(),
        source,
    })
}

impl Event {
    /// Checks required fields first, then parses `date` (`YYYY-MM-DD`) and
    /// the two `HH:MM` times.
    pub fn session(&self) -> Result<Session<'_>> {
        let date = required(&self.date, "date")?;
        let start_time = required(&self.start_time, "startTime")?;
        let end_time = required(&self.end_time, "endTime")?;
        let course_name = required(&self.course_name, "courseName")?;
        let lecturer = required(&self.lecturer, "lecturer")?;

        let date = NaiveDate::parse_from_str(date, "%Y-%m-%d").map_err(|source| Error::Parse {
            field: "date",
            value: date.to_string(),
            source,
        })?;

        Ok(Session {
            date,
            start: parse_time(start_time, "startTime")?,
            end: parse_time(end_time, "endTime")?,
            course_name,
            lecturer,
            info: self.info.as_deref().unwrap_or_default(),
            room: self.room.as_deref().unwrap_or_default(),
        })
    }
}

impl Session<'_> {
    pub fn description(&self) -> String {
        format!(
            "{} | Lecturer: {} | Info: {}",
            self.course_name, self.lecturer, self.info
        )
    }
}

/// One line of the Google Calendar import file.
#[derive(Serialize, Debug, Clone, PartialEq, Eq)]
pub struct Row {
    #[serde(rename = "Subject")]
    pub subject: String,
    #[serde(rename = "Start Date")]
    pub start_date: String,
    #[serde(rename = "Start Time")]
    pub start_time: String,
    #[serde(rename = "End Date")]
    pub end_date: String,
    #[serde(rename = "End Time")]
    pub end_time: String,
    #[serde(rename = "All Day Event")]
    pub all_day_event: &'static str,
    #[serde(rename = "Description")]
    pub description: String,
    #[serde(rename = "Location")]
    pub location: String,
    #[serde(rename = "Private")]
    pub private: &'static str,
}
