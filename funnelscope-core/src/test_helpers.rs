//! Builders for access log lines used across module tests.

pub(crate) struct LineBuilder {
    timestamp: String,
    latencies: [String; 3],
    frontend_status: String,
    backend_status: String,
    method: String,
    target: String,
    user_agent: String,
}

impl Default for LineBuilder {
    fn default() -> Self {
        Self {
            timestamp: "2024-03-01T10:15:00.000000Z".to_string(),
            latencies: ["0.001".into(), "0.100".into(), "0.000".into()],
            frontend_status: "200".to_string(),
            backend_status: "200".to_string(),
            method: "GET".to_string(),
            target: "https://shop.example:443/".to_string(),
            user_agent: "Mozilla/5.0 (Windows NT 10.0; Win64; x64)".to_string(),
        }
    }
}

impl LineBuilder {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn at(mut self, timestamp: &str) -> Self {
        self.timestamp = timestamp.to_string();
        self
    }

    pub(crate) fn path(mut self, path: &str) -> Self {
        self.target = format!("https://shop.example:443{path}");
        self
    }

    pub(crate) fn target(mut self, target: &str) -> Self {
        self.target = target.to_string();
        self
    }

    pub(crate) fn status(mut self, status: u16) -> Self {
        self.frontend_status = status.to_string();
        self.backend_status = status.to_string();
        self
    }

    pub(crate) fn no_backend(mut self) -> Self {
        self.backend_status = "-".to_string();
        self.latencies = ["-1".into(), "-1".into(), "-1".into()];
        self
    }

    pub(crate) fn latencies(mut self, request: &str, backend: &str, response: &str) -> Self {
        self.latencies = [request.into(), backend.into(), response.into()];
        self
    }

    pub(crate) fn user_agent(mut self, ua: &str) -> Self {
        self.user_agent = ua.to_string();
        self
    }

    pub(crate) fn build(&self) -> String {
        let backend = if self.backend_status == "-" {
            "-"
        } else {
            "10.0.1.7:80"
        };
        format!(
            "https {} app/shop/50dc6c495c0c9188 192.168.131.39:2817 {} {} {} {} {} {} 34 366 \"{} {} HTTP/1.1\" \"{}\" ECDHE-RSA-AES128-GCM-SHA256 TLSv1.2",
            self.timestamp,
            backend,
            self.latencies[0],
            self.latencies[1],
            self.latencies[2],
            self.frontend_status,
            self.backend_status,
            self.method,
            self.target,
            self.user_agent,
        )
    }
}
