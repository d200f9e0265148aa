//! # Line classification
//!
//! A fixed, ordered rule table for line-oriented login exchanges, evaluated
//! top to bottom; the first matching rule decides the line. Pure and
//! independent of any socket, so it is testable on bare strings.
//!
//! Order is load-bearing: denial outranks everything, so a line like
//! `Login incorrect` is a denial even though it also mentions a login
//! prompt. A bare password prompt is *not* a denial here; whether a second
//! prompt means "rejected, try again" depends on exchange state, which the
//! login driver tracks.

use std::sync::OnceLock;

use regex::Regex;

/// What one received line means to the exchange.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineClass {
    /// Authentication denied; terminal for the attempt.
    Denied,
    /// Shell/command prompt; success once credentials were submitted.
    ShellPrompt,
    /// The peer is asking for a password.
    PasswordPrompt,
    /// The peer is asking for a username.
    LoginPrompt,
}

struct Rule {
    class: LineClass,
    pattern: Regex,
}

fn rules() -> &'static [Rule; 4] {
    static RULES: OnceLock<[Rule; 4]> = OnceLock::new();
    RULES.get_or_init(|| {
        [
            Rule {
                class: LineClass::Denied,
                pattern: Regex::new(r"(?i:denied|incorrect)|Using username").unwrap(),
            },
            Rule {
                class: LineClass::ShellPrompt,
                pattern: Regex::new(r"[#$>]\s*$").unwrap(),
            },
            Rule {
                class: LineClass::PasswordPrompt,
                pattern: Regex::new(r"(?i)password").unwrap(),
            },
            Rule {
                class: LineClass::LoginPrompt,
                pattern: Regex::new(r"(?i)login|username").unwrap(),
            },
        ]
    })
}

/// Classifies one received line. `None` means the line matched no rule and
/// the exchange simply continues.
pub fn classify(line: &str) -> Option<LineClass> {
    rules()
        .iter()
        .find(|rule| rule.pattern.is_match(line))
        .map(|rule| rule.class)
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
