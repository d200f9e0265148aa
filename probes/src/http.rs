//! HTTP(S) login probe.
//!
//! Builds one request from the configuration snapshot (method, path,
//! optional custom header, optional Basic Authorization, body) and decides
//! success from the response. Certificate validation stays off: scan
//! targets are routinely self-signed.

use std::time::Duration;

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::Method;
use tracing::debug;

use credsweep_common::config::ProbeConfig;
use credsweep_common::creds::Credential;

use crate::{Outcome, Probe};

const DIAL_TIMEOUT: Duration = Duration::from_secs(10);
const RESPONSE_TIMEOUT: Duration = Duration::from_secs(10);

pub struct HttpProbe;

#[async_trait]
impl Probe for HttpProbe {
    fn default_port(&self, cfg: &ProbeConfig) -> u16 {
        if cfg.protocol == "https" { 443 } else { 80 }
    }

    async fn attempt(
        &self,
        host: &str,
        port: u16,
        _cred: &Credential,
        cfg: &ProbeConfig,
    ) -> Outcome {
        match try_http_login(host, port, cfg).await {
            Ok(true) => Outcome::Hit,
            Ok(false) => Outcome::Miss,
            Err(e) => {
                debug!("{host}:{port}: {e}");
                Outcome::Miss
            }
        }
    }
}

async fn try_http_login(host: &str, port: u16, cfg: &ProbeConfig) -> anyhow::Result<bool> {
    let client = reqwest::Client::builder()
        .connect_timeout(DIAL_TIMEOUT)
        .timeout(RESPONSE_TIMEOUT)
        .danger_accept_invalid_certs(true)
        .build()?;

    let url = format!("{}://{}:{}{}", cfg.protocol, host, port, cfg.path);
    let method = Method::from_bytes(cfg.method.as_bytes())?;

    let mut request = client.request(method, &url).body(cfg.data.clone());
    if !cfg.header_name.is_empty() {
        request = request.header(&cfg.header_name, &cfg.header_value);
    }
    if !cfg.content_type.is_empty() {
        request = request.header("Content-Type", &cfg.content_type);
    }
    let basic_auth = !cfg.basic_auth.is_empty();
    if basic_auth {
        let encoded = BASE64.encode(cfg.basic_auth.as_bytes());
        request = request.header("Authorization", format!("Basic {encoded}"));
    }

    let response = request.send().await?;
    let status = response.status().as_u16();
    let body = response.text().await?;

    Ok(decide(status, &body, &cfg.success_marker, basic_auth))
}

/// The success decision, kept free of I/O: a configured marker must appear
/// in a 200 body; without a marker, any 200 counts when Basic auth was
/// sent. Non-200 responses and empty bodies never match.
fn decide(status: u16, body: &str, marker: &str, basic_auth: bool) -> bool {
    if status != 200 || body.is_empty() {
        return false;
    }
    if !marker.is_empty() {
        return body.contains(marker);
    }
    basic_auth
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn marker_in_body_is_a_hit() {
        assert!(decide(200, "<html>Welcome back</html>", "Welcome", false));
    }

    #[test]
    fn marker_missing_from_body_is_a_miss() {
        assert!(!decide(200, "<html>Forbidden</html>", "Welcome", false));
    }

    #[test]
    fn basic_auth_accepts_any_200_without_a_marker() {
        assert!(decide(200, "<html>ok</html>", "", true));
        assert!(!decide(200, "<html>ok</html>", "", false));
    }

    #[test]
    fn non_200_never_matches() {
        assert!(!decide(401, "Welcome", "Welcome", true));
        assert!(!decide(302, "Welcome", "Welcome", false));
    }

    #[test]
    fn empty_body_never_matches() {
        assert!(!decide(200, "", "", true));
        assert!(!decide(200, "", "Welcome", false));
    }
}
