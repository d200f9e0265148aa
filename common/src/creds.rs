//! # Credential resolution
//!
//! Pure, no I/O. Decides which username/password pair a probe submits for a
//! given target, from three sources in strict precedence order:
//!
//! 1. Global username/password overrides (either side non-empty wins).
//! 2. The global default credential token from the configuration.
//! 3. The credential token embedded in the target's own list line.
//!
//! A token side left empty is meaningful: `admin:` is an explicit
//! no-password login, `:secret` an explicit no-username one. When nothing
//! yields a pair, both fields resolve empty and the probe attempts
//! anonymous/blank authentication.

use crate::config::ProbeConfig;

/// A username/password pair. Either side may be the empty string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Credential {
    pub username: String,
    pub password: String,
}

impl Credential {
    pub fn new(username: &str, password: &str) -> Self {
        Self {
            username: username.to_string(),
            password: password.to_string(),
        }
    }
}

/// Splits a `user:pass` token. Tokens without a colon carry no usable pair
/// and fall through to the next resolution source.
fn split_token(token: &str) -> Option<Credential> {
    let (user, pass) = token.split_once(':')?;
    Some(Credential::new(user, pass))
}

/// Resolves the credential pair for one target.
pub fn resolve(cfg: &ProbeConfig, target_token: &str) -> Credential {
    if !cfg.username.is_empty() || !cfg.password.is_empty() {
        return Credential::new(&cfg.username, &cfg.password);
    }
    if let Some(cred) = split_token(&cfg.credentials) {
        return cred;
    }
    if let Some(cred) = split_token(target_token) {
        return cred;
    }
    Credential::default()
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
    fn token_with_no_password() {
        let cfg = ProbeConfig::default();
        assert_eq!(resolve(&cfg, "admin:"), Credential::new("admin", ""));
    }

    #[test]
    fn token_with_no_username() {
        let cfg = ProbeConfig::default();
        assert_eq!(resolve(&cfg, ":secret"), Credential::new("", "secret"));
    }

    #[test]
    fn overrides_win_over_any_token() {
        let cfg = ProbeConfig {
            username: "root".to_string(),
            password: "toor".to_string(),
            ..ProbeConfig::default()
        };
        assert_eq!(resolve(&cfg, "admin:admin"), Credential::new("root", "toor"));
    }

    #[test]
    fn single_override_still_wins() {
        let cfg = ProbeConfig {
            username: "root".to_string(),
            ..ProbeConfig::default()
        };
        // The empty password override is taken as-is.
        assert_eq!(resolve(&cfg, "admin:admin"), Credential::new("root", ""));
    }

    #[test]
    fn global_credentials_beat_target_token() {
        let cfg = ProbeConfig {
            credentials: "svc:hunter2".to_string(),
            ..ProbeConfig::default()
        };
        assert_eq!(resolve(&cfg, "admin:admin"), Credential::new("svc", "hunter2"));
    }

    #[test]
    fn colonless_global_falls_through_to_token() {
        let cfg = ProbeConfig {
            credentials: "admin".to_string(),
            ..ProbeConfig::default()
        };
        assert_eq!(resolve(&cfg, "pi:raspberry"), Credential::new("pi", "raspberry"));
    }

    #[test]
    fn nothing_resolves_to_empty_pair() {
        let cfg = ProbeConfig::default();
        assert_eq!(resolve(&cfg, ""), Credential::default());
        assert_eq!(resolve(&cfg, "justaword"), Credential::default());
    }
}
