use std::path::PathBuf;

/// Read-only configuration snapshot shared by every concurrent probe task.
///
/// Built once from the parsed command line and never mutated afterwards;
/// tasks receive it behind an `Arc`, so all of them observe the identical
/// snapshot.
#[derive(Debug, Clone)]
pub struct ProbeConfig {
    /// URL scheme used by the HTTP probe ("http" or "https").
    pub protocol: String,
    /// Global port override; wins over any per-line port.
    pub port: Option<u16>,
    /// Request path for the HTTP probe.
    pub path: String,
    /// HTTP method name.
    pub method: String,
    /// Raw `user:pass` string sent as HTTP Basic Authorization. The probe
    /// base64-encodes it verbatim; it is independent of credential
    /// resolution.
    pub basic_auth: String,
    /// Content-Type header value; empty means the header is not sent.
    pub content_type: String,
    /// Name of a single custom request header; empty means none.
    pub header_name: String,
    pub header_value: String,
    /// HTTP request body.
    pub data: String,
    /// Body substring marking a successful HTTP login.
    pub success_marker: String,
    /// Label written next to each finding.
    pub alert: String,
    /// Findings are appended here; `None` keeps them console-only.
    pub output_file: Option<PathBuf>,
    /// Global default credential token (`user:pass`) applied to every
    /// target that carries none of its own.
    pub credentials: String,
    /// Username override; either override being non-empty beats all tokens.
    pub username: String,
    /// Password override.
    pub password: String,
    /// Force the SSH probe regardless of port.
    pub force_ssh: bool,
    /// Force the Telnet probe regardless of port.
    pub force_telnet: bool,
    /// Ceiling on in-flight probe tasks.
    pub concurrency: usize,
}

impl Default for ProbeConfig {
    fn default() -> Self {
        Self {
            protocol: "http".to_string(),
            port: None,
            path: "/".to_string(),
            method: "GET".to_string(),
            basic_auth: String::new(),
            content_type: String::new(),
            header_name: String::new(),
            header_value: String::new(),
            data: String::new(),
            success_marker: String::new(),
            alert: "default credentials".to_string(),
            output_file: None,
            credentials: String::new(),
            username: String::new(),
            password: String::new(),
            force_ssh: false,
            force_telnet: false,
            concurrency: 100,
        }
    }
}
