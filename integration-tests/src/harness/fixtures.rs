use std::fs;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// One access log line, defaulting to a fast 200 for `/` from a desktop browser.
#[derive(Debug, Clone)]
pub struct Entry {
    timestamp: String,
    path: String,
    status: Option<u16>,
    latencies: [String; 3],
    user_agent: String,
}

impl Default for Entry {
    fn default() -> Self {
        Self {
            timestamp: "2024-03-01T10:15:00.000000Z".to_string(),
            path: "/".to_string(),
            status: Some(200),
            latencies: ["0.001".into(), "0.100".into(), "0.000".into()],
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
        }
    }
}

impl Entry {
    pub fn get(path: &str) -> Self {
        Self {
            path: path.to_string(),
            ..Self::default()
        }
    }

    pub fn at(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    pub fn status(mut self, status: u16) -> Self {
        self.status = Some(status);
        self
    }

    /// The load balancer never reached a target.
    pub fn unanswered(mut self) -> Self {
        self.status = None;
        self.latencies = ["-1".into(), "-1".into(), "-1".into()];
        self
    }

    pub fn latencies(mut self, request: f64, backend: f64, response: f64) -> Self {
        self.latencies = [
            request.to_string(),
            backend.to_string(),
            response.to_string(),
        ];
        self
    }

    pub fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = ua.to_string();
        self
    }

    pub fn line(&self) -> String {
        let (target, elb_status, backend_status) = match self.status {
            Some(code) => ("10.0.1.7:80".to_string(), code.to_string(), code.to_string()),
            None => ("-".to_string(), "503".to_string(), "-".to_string()),
        };
        format!(
            "https {} app/shop/50dc6c495c0c9188 192.168.131.39:2817 {} {} {} {} {} {} 34 366 \"GET https://shop.example:443{} HTTP/1.1\" \"{}\" ECDHE-RSA-AES128-GCM-SHA256 TLSv1.2",
            self.timestamp,
            target,
            self.latencies[0],
            self.latencies[1],
            self.latencies[2],
            elb_status,
            backend_status,
            self.path,
            self.user_agent,
        )
    }
}

/// Temporary log directory, removed on drop.
pub struct LogDir {
    dir: TempDir,
}

impl LogDir {
    pub fn new() -> Self {
        Self {
            dir: TempDir::new().expect("failed to create temp log dir"),
        }
    }

    pub fn path(&self) -> &Path {
        self.dir.path()
    }

    /// Writes `entries` as one file. Use an ELB-style name such as
    /// `shop_20240301T1000Z_a.log` to give the report a date range.
    pub fn write(&self, name: &str, entries: &[Entry]) -> PathBuf {
        let body: String = entries.iter().map(|e| e.line() + "\n").collect();
        self.write_raw(name, &body)
    }

    pub fn write_raw(&self, name: &str, body: &str) -> PathBuf {
        let path = self.dir.path().join(name);
        fs::write(&path, body).expect("failed to write log fixture");
        path
    }
}

impl Default for LogDir {
    fn default() -> Self {
        Self::new()
    }
}
