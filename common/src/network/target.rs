//! # Scan target model
//!
//! Defines the unit a probe task consumes: one host, an optional port and an
//! optional embedded credential token.
//!
//! Targets come from three sources:
//! * A CIDR block, expanded host by host.
//! * A list line (file or stdin) of the form `host[:port] [user:pass]`.
//! * A passive-search match.
//!
//! Each target is consumed exactly once by exactly one probe task.

use std::net::Ipv4Addr;
use std::str::FromStr;

/// Protocols a probe can speak.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Protocol {
    Http,
    Ssh,
    Telnet,
}

/// A single host to probe.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub host: String,
    /// Port taken from the target's own list line, if any.
    pub port: Option<u16>,
    /// Credential token embedded in the list line; empty when absent.
    pub cred_token: String,
    /// Protocol hint attached by the source; `None` leaves selection to the
    /// configured flags and the resolved port.
    pub hint: Option<Protocol>,
}

impl Target {
    pub fn from_addr(addr: Ipv4Addr) -> Self {
        Self::from_host(addr.to_string())
    }

    pub fn from_host(host: String) -> Self {
        Self {
            host,
            port: None,
            cred_token: String::new(),
            hint: None,
        }
    }

    /// Port after applying precedence: the global override beats the
    /// per-line port. `None` leaves the choice to the selected probe's
    /// protocol default.
    pub fn resolved_port(&self, override_port: Option<u16>) -> Option<u16> {
        override_port.or(self.port)
    }
}

impl FromStr for Target {
    type Err = String;

    /// Parses one list line: an IPv4 address, optionally `:port`, optionally
    /// followed by whitespace and a credential token. Anything else is a
    /// formatting error the caller reports and skips.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut parts = s.split_whitespace();
        let host_port = parts
            .next()
            .ok_or_else(|| format!("line formatted incorrectly: {s}"))?;
        let cred_token = parts.next().unwrap_or("").to_string();

        let (host, port) = match host_port.split_once(':') {
            Some((host, port_str)) => {
                let port: u16 = port_str
                    .parse()
                    .map_err(|_| format!("line formatted incorrectly: {s}"))?;
                (host, Some(port))
            }
            None => (host_port, None),
        };

        host.parse::<Ipv4Addr>()
            .map_err(|_| format!("line formatted incorrectly: {s}"))?;

        Ok(Self {
            host: host.to_string(),
            port,
            cred_token,
            hint: None,
        })
    }
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
