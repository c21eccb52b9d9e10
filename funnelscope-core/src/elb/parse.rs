use crate::elb::{Latency, LogRecord};
use thiserror::Error;

pub const FIELD_COUNT: usize = 16;

/// Marks a latency that was not measured.
const UNMEASURED: &str = "-1";
/// Marks an absent host, status, byte count or TLS field.
const ABSENT: &str = "-";

const KIND: usize = 0;
const TIMESTAMP: usize = 1;
const BALANCER: usize = 2;
const CLIENT: usize = 3;
const BACKEND: usize = 4;
const REQUEST_LATENCY: usize = 5;
const BACKEND_LATENCY: usize = 6;
const RESPONSE_LATENCY: usize = 7;
const FRONTEND_STATUS: usize = 8;
const BACKEND_STATUS: usize = 9;
const BYTES_RECEIVED: usize = 10;
const BYTES_SENT: usize = 11;
const REQUEST: usize = 12;
const USER_AGENT: usize = 13;
const SSL_CIPHER: usize = 14;
const SSL_PROTOCOL: usize = 15;

const FIELD_NAMES: [&str; FIELD_COUNT] = [
    "type",
    "timestamp",
    "elb",
    "client:port",
    "target:port",
    "request_processing_time",
    "target_processing_time",
    "response_processing_time",
    "elb_status_code",
    "target_status_code",
    "received_bytes",
    "sent_bytes",
    "request",
    "user_agent",
    "ssl_cipher",
    "ssl_protocol",
];

/// Why a line could not be turned into a [`LogRecord`].
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("expected {FIELD_COUNT} fields, found {found}")]
    FieldCount { found: usize },

    #[error("field '{field}' must be quoted")]
    ExpectedQuote { field: &'static str },

    #[error("unterminated quote in field '{field}'")]
    UnterminatedQuote { field: &'static str },

    #[error("missing separator after field '{field}'")]
    MissingSeparator { field: &'static str },

    #[error("invalid value for '{field}': {value:?}")]
    InvalidNumber { field: &'static str, value: String },
}

impl ParseError {
    fn invalid(index: usize, value: &str) -> Self {
        Self::InvalidNumber {
            field: FIELD_NAMES[index],
            value: value.to_string(),
        }
    }
}

/// Parses one access log line.
///
/// Never panics; any malformed input comes back as a [`ParseError`] so a
/// truncated or corrupt line costs exactly that line.
///
/// # Example
///
/// ```
/// use funnelscope_core::elb::parse_line;
///
/// let line = r#"https 2024-03-01T10:15:00.000Z app/shop 10.0.0.1:5123 10.0.1.7:80 0.001 0.250 0.000 200 200 120 512 "GET https://shop.example:443/cart/ HTTP/1.1" "Mozilla/5.0" ECDHE-RSA-AES128-GCM-SHA256 TLSv1.2"#;
/// let record = parse_line(line).unwrap();
/// assert_eq!(record.backend_status, Some(200));
/// assert_eq!(record.url().as_deref(), Some("/cart/"));
/// ```
pub fn parse_line(raw: &str) -> Result<LogRecord, ParseError> {
    let fields = split_fields(raw)?;

    Ok(LogRecord {
        kind: fields[KIND].to_string(),
        timestamp: fields[TIMESTAMP].to_string(),
        balancer: fields[BALANCER].to_string(),
        client_host: host_of(fields[CLIENT]).to_string(),
        backend_host: optional(fields[BACKEND]).map(|v| host_of(v).to_string()),
        request_latency: parse_latency(REQUEST_LATENCY, fields[REQUEST_LATENCY])?,
        backend_latency: parse_latency(BACKEND_LATENCY, fields[BACKEND_LATENCY])?,
        response_latency: parse_latency(RESPONSE_LATENCY, fields[RESPONSE_LATENCY])?,
        frontend_status: parse_status(FRONTEND_STATUS, fields[FRONTEND_STATUS])?,
        backend_status: parse_status(BACKEND_STATUS, fields[BACKEND_STATUS])?,
        bytes_received: parse_bytes(BYTES_RECEIVED, fields[BYTES_RECEIVED])?,
        bytes_sent: parse_bytes(BYTES_SENT, fields[BYTES_SENT])?,
        request_line: fields[REQUEST].to_string(),
        user_agent: fields[USER_AGENT].to_string(),
        ssl_cipher: optional(fields[SSL_CIPHER]).map(str::to_string),
        ssl_protocol: optional(fields[SSL_PROTOCOL]).map(str::to_string),
    })
}

/// Splits a line into its sixteen raw fields. Anything after the last field
/// is ignored.
fn split_fields(line: &str) -> Result<Vec<&str>, ParseError> {
    let mut fields = Vec::with_capacity(FIELD_COUNT);
    let mut rest = line;

    for index in 0..FIELD_COUNT {
        rest = rest.trim_start();
        if rest.is_empty() {
            return Err(ParseError::FieldCount { found: index });
        }

        if index == REQUEST || index == USER_AGENT {
            let field = FIELD_NAMES[index];
            let body = rest
                .strip_prefix('"')
                .ok_or(ParseError::ExpectedQuote { field })?;
            let end = body
                .find('"')
                .ok_or(ParseError::UnterminatedQuote { field })?;

            fields.push(&body[..end]);
            rest = &body[end + 1..];

            if !rest.is_empty() && !rest.starts_with(char::is_whitespace) {
                return Err(ParseError::MissingSeparator { field });
            }
        } else {
            let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
            fields.push(&rest[..end]);
            rest = &rest[end..];
        }
    }

    Ok(fields)
}

fn optional(value: &str) -> Option<&str> {
    (value != ABSENT).then_some(value)
}

/// `host:port` to `host`, splitting on the last colon.
fn host_of(value: &str) -> &str {
    value.rsplit_once(':').map_or(value, |(host, _)| host)
}

fn parse_latency(index: usize, value: &str) -> Result<Latency, ParseError> {
    if value == UNMEASURED {
        return Ok(Latency::Unmeasured);
    }

    let seconds: f64 = value
        .parse()
        .map_err(|_| ParseError::invalid(index, value))?;

    if !seconds.is_finite() {
        return Err(ParseError::invalid(index, value));
    }

    // Other negative values carry no more information than the sentinel.
    if seconds < 0.0 {
        Ok(Latency::Unmeasured)
    } else {
        Ok(Latency::Measured(seconds))
    }
}

fn parse_status(index: usize, value: &str) -> Result<Option<u16>, ParseError> {
    optional(value)
        .map(|v| v.parse().map_err(|_| ParseError::invalid(index, value)))
        .transpose()
}

fn parse_bytes(index: usize, value: &str) -> Result<u64, ParseError> {
    match optional(value) {
        Some(v) => v.parse().map_err(|_| ParseError::invalid(index, value)),
        None => Ok(0),
    }
}
