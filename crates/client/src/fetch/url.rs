//! URL canonicalization and query-parameter merging.

use chrono::NaiveDate;
use serde_json::Value;

/// Error type for URL canonicalization failures.
#[derive(Debug, Clone, thiserror::Error)]
pub enum UrlError {
    #[error("empty URL")]
    Empty,

    #[error("unsupported scheme: {0}")]
    UnsupportedScheme(String),

    #[error("invalid URL: {0}")]
    InvalidUrl(String),
}

impl From<UrlError> for rozklad_core::Error {
    fn from(err: UrlError) -> Self {
        rozklad_core::Error::InvalidUrl(err.to_string())
    }
}

/// Canonicalize a URL string before fetching.
///
/// Normalization steps:
/// 1. Trim leading/trailing whitespace
/// 2. Default scheme to https:// if missing
/// 3. Lowercase the host
/// 4. Remove fragment (#...)
/// 5. Keep query string intact (do not reorder)
pub fn canonicalize(input: &str) -> Result<url::Url, UrlError> {
    let trimmed = input.trim();

    if trimmed.is_empty() {
        return Err(UrlError::Empty);
    }

    let url_str = if trimmed.contains("://") { trimmed.to_string() } else { format!("https://{trimmed}") };

    let mut parsed = url::Url::parse(&url_str).map_err(|e| UrlError::InvalidUrl(e.to_string()))?;

    match parsed.scheme() {
        "http" | "https" => {}
        scheme => return Err(UrlError::UnsupportedScheme(scheme.to_string())),
    }

    if let Some(host) = parsed.host_str() {
        let host = host.to_lowercase();
        parsed
            .set_host(Some(&host))
            .map_err(|e| UrlError::InvalidUrl(e.to_string()))?;
    }

    parsed.set_fragment(None);

    Ok(parsed)
}

/// Merge query parameters into a URL, keeping the ones already present.
///
/// Existing keys keep their position; a new value for an existing key
/// replaces it in place, other new keys are appended in the given order.
/// Strings are used verbatim, booleans and objects are written as JSON text,
/// arrays expand into one pair per element.
///
/// ```
/// use rozklad_client::fetch::add_query_params;
/// use serde_json::json;
///
/// let url = add_query_params(
///     "http://example.com/test?answers=true",
///     &[("answers", json!(false)), ("data", json!(["some", "values"]))],
/// )
/// .unwrap();
/// assert_eq!(url.as_str(), "http://example.com/test?answers=false&data=some&data=values");
/// ```
pub fn add_query_params(url: &str, params: &[(&str, Value)]) -> Result<url::Url, UrlError> {
    let mut parsed = canonicalize(url)?;

    let mut merged: Vec<(String, Value)> = Vec::new();
    for (key, value) in parsed.query_pairs() {
        upsert(&mut merged, &key, Value::String(value.into_owned()));
    }
    for (key, value) in params {
        upsert(&mut merged, key, value.clone());
    }

    if merged.is_empty() {
        parsed.set_query(None);
        return Ok(parsed);
    }

    parsed.set_query(None);
    {
        let mut query = parsed.query_pairs_mut();
        for (key, value) in &merged {
            match value {
                Value::Array(items) => {
                    for item in items {
                        query.append_pair(key, &query_scalar(item));
                    }
                }
                other => {
                    query.append_pair(key, &query_scalar(other));
                }
            }
        }
    }

    Ok(parsed)
}

fn upsert(pairs: &mut Vec<(String, Value)>, key: &str, value: Value) {
    match pairs.iter_mut().find(|(k, _)| k == key) {
        Some((_, existing)) => *existing = value,
        None => pairs.push((key.to_string(), value)),
    }
}

fn query_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Listing URL for one channel and day: `{base}{path}?date=YYYY-MM-DD`.
pub fn dated_url(base: &str, path: &str, date: NaiveDate) -> Result<url::Url, UrlError> {
    let date = date.format("%Y-%m-%d").to_string();
    add_query_params(&format!("{base}{path}"), &[("date", Value::String(date))])
}

/// Timetable URL for one stop and line on the timetable CMS.
pub fn bus_url(base: &str, stop: &str, line: &str, client_id: &str, cmd: &str) -> Result<url::Url, UrlError> {
    add_query_params(
        base,
        &[
            ("ID", Value::from(stop)),
            ("IDLinii", Value::from(line)),
            ("IDKlienta", Value::from(client_id)),
            ("cmd", Value::from(cmd)),
        ],
    )
}
