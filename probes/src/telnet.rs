use async_trait::async_trait;

use credsweep_common::config::ProbeConfig;
use credsweep_common::creds::Credential;

use crate::{Outcome, Probe, TELNET_PORT, line_login};

/// Telnet login attempt: username and password prompts answered in turn,
/// the shell prompt after submission counting as the hit.
pub struct TelnetProbe;

#[async_trait]
impl Probe for TelnetProbe {
    fn default_port(&self, _cfg: &ProbeConfig) -> u16 {
        TELNET_PORT
    }

    async fn attempt(
        &self,
        host: &str,
        port: u16,
        cred: &Credential,
        _cfg: &ProbeConfig,
    ) -> Outcome {
        line_login::attempt_line_login(host, port, cred).await
    }
}
