/// One of the three processing-time fields of a log line.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Latency {
    /// Seconds spent in the phase, never negative.
    Measured(f64),
    /// Logged as `-1`: the phase never ran (e.g. the backend was not reached).
    Unmeasured,
}

impl Latency {
    pub fn seconds(self) -> Option<f64> {
        match self {
            Latency::Measured(s) => Some(s),
            Latency::Unmeasured => None,
        }
    }
}

/// A typed view of one access log line.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    /// Connection type, e.g. `http` or `h2`.
    pub kind: String,
    pub timestamp: String,
    pub balancer: String,
    /// Client address with the port stripped.
    pub client_host: String,
    /// `None` when the request never reached a backend.
    pub backend_host: Option<String>,
    pub request_latency: Latency,
    pub backend_latency: Latency,
    pub response_latency: Latency,
    /// Status produced by the load balancer itself.
    pub frontend_status: Option<u16>,
    pub backend_status: Option<u16>,
    pub bytes_received: u64,
    pub bytes_sent: u64,
    /// Raw `METHOD URL PROTOCOL` text, without the surrounding quotes.
    pub request_line: String,
    pub user_agent: String,
    pub ssl_cipher: Option<String>,
    pub ssl_protocol: Option<String>,
}

impl LogRecord {
    /// `YYYY-MM-DD` part of the timestamp.
    pub fn date(&self) -> &str {
        char_slice(&self.timestamp, 0, 10)
    }

    /// Two-digit hour of the timestamp.
    pub fn hour(&self) -> &str {
        char_slice(&self.timestamp, 11, 13)
    }

    /// Only records carrying a backend status take part in checkout accounting.
    pub fn is_analyzable(&self) -> bool {
        self.backend_status.is_some()
    }

    /// Second space-separated token of the request line, quotes trimmed.
    pub fn request_target(&self) -> Option<&str> {
        self.request_line
            .split(' ')
            .nth(1)
            .map(|target| target.trim_matches('"'))
    }

    /// Path and query of the request target.
    ///
    /// Load balancers log absolute targets (`https://shop.example:443/cart/`)
    /// for most listeners; the scheme and authority are dropped so that host
    /// names never take part in URL classification. The rest is kept byte for
    /// byte, so an absolute and a relative target for the same path agree.
    pub fn url(&self) -> Option<&str> {
        self.request_target().map(path_and_query)
    }

    /// Sum of the three latencies, or `None` if any phase is unmeasured.
    pub fn combined_latency(&self) -> Option<f64> {
        Some(
            self.request_latency.seconds()?
                + self.backend_latency.seconds()?
                + self.response_latency.seconds()?,
        )
    }
}

fn path_and_query(target: &str) -> &str {
    match target.split_once("://") {
        Some((_, rest)) => rest.find('/').map_or("/", |i| &rest[i..]),
        None => target,
    }
}

fn char_offset(s: &str, n: usize) -> usize {
    s.char_indices().nth(n).map_or(s.len(), |(i, _)| i)
}

/// Slices by character position, clamping to the end of the string.
fn char_slice(s: &str, start: usize, end: usize) -> &str {
    let from = char_offset(s, start);
    let to = char_offset(s, end).max(from);
    &s[from..to]
}
