use async_trait::async_trait;

use credsweep_common::config::ProbeConfig;
use credsweep_common::creds::Credential;

use crate::{Outcome, Probe, SSH_PORT, line_login};

/// Password login against the SSH service port, driven as a classified
/// line exchange.
pub struct SshProbe;

#[async_trait]
impl Probe for SshProbe {
    fn default_port(&self, _cfg: &ProbeConfig) -> u16 {
        SSH_PORT
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
