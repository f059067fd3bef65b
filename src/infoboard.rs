use reqwest::blocking::Client;
use serde::Deserialize;
use tracing::debug;
use url::Url;

use crate::error::{Error, Result};
use crate::models::Event;

pub const DEFAULT_API_URL: &str = "https://fhapp.fh-kufstein.ac.at/api/infoboard";

#[derive(Deserialize, Debug)]
struct InfoboardResponse {
    data: Vec<Event>,
}

/// Builds the infoboard query for one PKZ and date range.
pub fn infoboard_url(base_url: &str, start_date: &str, end_date: &str, pkz: &str) -> Result<Url> {
    let ending = format!("pkz={pkz}");
    let url = Url::parse_with_params(
        base_url,
        &[
            ("from", start_date),
            ("until", end_date),
            ("ending", ending.as_str()),
            ("impersonating", "null"),
        ],
    )?;
    Ok(url)
}

pub fn fetch_events(base_url: &str, start_date: &str, end_date: &str, pkz: &str) -> Result<Vec<Event>> {
    let url = infoboard_url(base_url, start_date, end_date, pkz)?;
    debug!(%url, "requesting infoboard");

    let response = Client::new().get(url).send()?;

    let status = response.status();
    if !status.is_success() {
        return Err(Error::Status(status));
    }

    let body: InfoboardResponse = serde_json::from_str(&response.text()?)?;
    Ok(body.data)
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;

    const BODY: &str = r#"{
        "data": [
            {
                "date": "2024-03-05",
                "startTime": "09:00",
                "endTime": "10:30",
                "courseName": "Algorithms",
                "lecturer": "Dr. Smith",
                "room": "A1",
                "info": "Midterm"
            },
            {
                "date": "2024-03-06",
                "startTime": "13:00",
                "endTime": "14:00",
                "courseName": "Databases",
                "lecturer": "Prof. Berger",
                "room": null
            }
        ]
    }"#;

    fn query_matcher() -> Matcher {
        Matcher::AllOf(vec![
            Matcher::UrlEncoded("from".into(), "01.03.2024".into()),
            Matcher::UrlEncoded("until".into(), "31.03.2024".into()),
            Matcher::UrlEncoded("ending".into(), "pkz=12345".into()),
            Matcher::UrlEncoded("impersonating".into(), "null".into()),
        ])
    }

    #[test]
    fn test_infoboard_url() {
        let url = infoboard_url(DEFAULT_API_URL, "01.03.2024", "31.03.2024", "12345").unwrap();
        assert_eq!(url.host_str(), Some("fhapp.fh-kufstein.ac.at"));
        assert_eq!(url.path(), "/api/infoboard");

        let pairs: Vec<(String, String)> = url
            .query_pairs()
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();
        assert_eq!(
            pairs,
            vec![
                ("from".to_string(), "01.03.2024".to_string()),
                ("until".to_string(), "31.03.2024".to_string()),
                ("ending".to_string(), "pkz=12345".to_string()),
                ("impersonating".to_string(), "null".to_string()),
            ]
        );
    }

    #[test]
    fn test_infoboard_url_rejects_garbage_base() {
        let result = infoboard_url("not a url", "01.03.2024", "31.03.2024", "12345");
        assert!(matches!(result, Err(Error::Url(_))));
    }

    #[test]
    fn test_fetch_events() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/infoboard")
            .match_query(query_matcher())
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(BODY)
            .create();

        let base_url = format!("{}/api/infoboard", server.url());
        let events = fetch_events(&base_url, "01.03.2024", "31.03.2024", "12345")
            .expect("Failed to fetch events");

        mock.assert();

        assert_eq!(events.len(), 2);
        assert_eq!(events[0].course_name.as_deref(), Some("Algorithms"));
        assert_eq!(events[0].start_time.as_deref(), Some("09:00"));
        assert_eq!(events[0].info.as_deref(), Some("Midterm"));
        assert_eq!(events[1].course_name.as_deref(), Some("Databases"));
        assert_eq!(events[1].room, None);
        assert_eq!(events[1].info, None);
    }

    #[test]
    fn test_fetch_events_http_error() {
        let mut server = mockito::Server::new();
        let mock = server
            .mock("GET", "/api/infoboard")
            .match_query(Matcher::Any)
            .with_status(503)
            .create();

        let base_url = format!("{}/api/infoboard", server.url());
        let result = fetch_events(&base_url, "01.03.2024", "31.03.2024", "12345");

        mock.assert();
        assert!(
            matches!(result, Err(Error::Status(status)) if status.as_u16() == 503),
            "{result:?}"
        );
    }

    #[test]
    fn test_fetch_events_body_without_data() {
        let mut server = mockito::Server::new();
        let _mock = server
            .mock("GET", "/api/infoboard")
            .match_query(Matcher::Any)
            .with_status(200)
            .with_body(r#"{"message": "no events"}"#)
            .create();

        let base_url = format!("{}/api/infoboard", server.url());
        let result = fetch_events(&base_url, "01.03.2024", "31.03.2024", "12345");
        assert!(matches!(result, Err(Error::Decode(_))), "{result:?}");
    }
}
