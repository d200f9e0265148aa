//! The protocol probe **abstraction** and its dispatch table.
//!
//! One implementation exists per protocol (HTTP, SSH, Telnet). Each probe
//! attempts exactly one login against one target and reports a hit or a
//! miss; every network failure along the way collapses into a miss so that
//! a single unreachable host never disturbs the batch.
//!
//! High-level modules select a probe through [`select_protocol`] and
//! [`probe_for`] instead of depending on concrete submodules.

pub mod classify;
pub mod http;
pub mod line_login;
pub mod ssh;
pub mod telnet;

use async_trait::async_trait;
use credsweep_common::config::ProbeConfig;
use credsweep_common::creds::Credential;
use credsweep_common::network::target::{Protocol, Target};

pub const SSH_PORT: u16 = 22;
pub const TELNET_PORT: u16 = 23;

/// Outcome of a single login attempt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The target accepted the submitted credentials.
    Hit,
    /// Wrong credentials, a timeout, or any transport error.
    Miss,
}

/// One protocol-specific login attempt.
#[async_trait]
pub trait Probe: Send + Sync {
    /// Port used when neither the target line nor the configuration names
    /// one.
    fn default_port(&self, cfg: &ProbeConfig) -> u16;

    async fn attempt(
        &self,
        host: &str,
        port: u16,
        cred: &Credential,
        cfg: &ProbeConfig,
    ) -> Outcome;
}

/// Dispatch table: resolved protocol to probe implementation.
pub fn probe_for(protocol: Protocol) -> &'static dyn Probe {
    match protocol {
        Protocol::Http => &http::HttpProbe,
        Protocol::Ssh => &ssh::SshProbe,
        Protocol::Telnet => &telnet::TelnetProbe,
    }
}

/// Selection policy: explicit flags first, then the target's own hint, then
/// the resolved port number. HTTP is the default.
pub fn select_protocol(cfg: &ProbeConfig, target: &Target) -> Protocol {
    if cfg.force_ssh {
        return Protocol::Ssh;
    }
    if cfg.force_telnet {
        return Protocol::Telnet;
    }
    if let Some(hint) = target.hint {
        return hint;
    }
    match target.resolved_port(cfg.port) {
        Some(SSH_PORT) => Protocol::Ssh,
        Some(TELNET_PORT) => Protocol::Telnet,
        _ => Protocol::Http,
    }
}
