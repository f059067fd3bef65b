//! Calendar subscription endpoint: `GET /calendar/{pkz}.ics`.
//!
//! Each request fetches the next twelve months of events for the PKZ and
//! renders them as an iCalendar feed.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::{header, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Router,
};
use chrono::{Local, Months, NaiveDate};
use tracing::{error, info};

use crate::error::Result;
use crate::{ics, infoboard};

#[derive(Clone)]
pub struct AppState {
    api_url: Arc<str>,
}

impl AppState {
    pub fn new(api_url: impl Into<Arc<str>>) -> Self {
        Self {
            api_url: api_url.into(),
        }
    }
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/calendar/{file}", get(calendar_feed))
        .with_state(state)
}

/// Date range of a feed starting on `today`, formatted the way the infoboard expects.
pub fn feed_range(today: NaiveDate) -> (String, String) {
    let until = today
        .checked_add_months(Months::new(12))
        .unwrap_or(NaiveDate::MAX);
    (
        today.format("%d.%m.%Y").to_string(),
        until.format("%d.%m.%Y").to_string(),
    )
}

fn render_feed(api_url: &str, pkz: &str, today: NaiveDate) -> Result<String> {
    let (from, until) = feed_range(today);
    let events = infoboard::fetch_events(api_url, &from, &until, pkz)?;

    let mut body = Vec::new();
    let count = ics::write_all(&events, &ics::calendar_name(pkz), &mut body)?;
    info!(%pkz, count, "rendered calendar feed");

    Ok(String::from_utf8_lossy(&body).into_owned())
}

async fn calendar_feed(State(state): State<AppState>, Path(file): Path<String>) -> Response {
    let Some(pkz) = file.strip_suffix(".ics").filter(|pkz| !pkz.is_empty()) else {
        return StatusCode::NOT_FOUND.into_response();
    };
    let pkz = pkz.to_string();

    let api_url = Arc::clone(&state.api_url);
    let today = Local::now().date_naive();
    let feed_pkz = pkz.clone();
    let rendered =
        tokio::task::spawn_blocking(move || render_feed(&api_url, &feed_pkz, today)).await;

    match rendered {
        Ok(Ok(body)) => (
            [
                (header::CONTENT_TYPE, "text/calendar; charset=utf-8".to_string()),
                (
                    header::CONTENT_DISPOSITION,
                    format!("attachment; filename=\"{pkz}.ics\""),
                ),
            ],
            body,
        )
            .into_response(),
        Ok(Err(e)) => {
            error!(%pkz, "failed to generate calendar: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate calendar").into_response()
        }
        Err(e) => {
            error!(%pkz, "calendar task failed: {e}");
            (StatusCode::INTERNAL_SERVER_ERROR, "Failed to generate calendar").into_response()
        }
    }
}
