//! Shared driver for line-oriented login exchanges (SSH and Telnet probes).
//!
//! Opens a raw TCP connection and walks a prompt/response exchange: every
//! received line goes through the classifier, and the driver answers
//! username and password prompts with the resolved credential. The exchange
//! ends at the first terminal verdict, a timeout, or when the turn budget
//! runs out; everything but a confirmed shell prompt is a miss.

use std::time::Duration;

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::TcpStream;
use tokio::net::tcp::OwnedWriteHalf;
use tokio::time::timeout;
use tracing::debug;

use credsweep_common::creds::Credential;

use crate::Outcome;
use crate::classify::{self, LineClass};

const DIAL_TIMEOUT: Duration = Duration::from_secs(10);
const READ_TIMEOUT: Duration = Duration::from_secs(2);
const WRITE_TIMEOUT: Duration = Duration::from_secs(2);

/// Upper bound on read turns; a peer that never reaches a terminal verdict
/// within it is a miss, not an error.
const MAX_TURNS: usize = 12;

pub(crate) async fn attempt_line_login(host: &str, port: u16, cred: &Credential) -> Outcome {
    let addr = format!("{host}:{port}");
    let stream = match timeout(DIAL_TIMEOUT, TcpStream::connect(&addr)).await {
        Ok(Ok(stream)) => stream,
        _ => return Outcome::Miss,
    };

    let (mut reader, mut writer) = stream.into_split();
    let mut buf = vec![0u8; 1024];
    let mut sent_user = false;
    let mut sent_pass = false;

    for _ in 0..MAX_TURNS {
        let n = match timeout(READ_TIMEOUT, reader.read(&mut buf)).await {
            Ok(Ok(0)) | Ok(Err(_)) | Err(_) => return Outcome::Miss,
            Ok(Ok(n)) => n,
        };

        let chunk = String::from_utf8_lossy(&buf[..n]);
        for line in chunk.lines() {
            match classify::classify(line) {
                Some(LineClass::Denied) => {
                    debug!("{addr}: denied: {line}");
                    return Outcome::Miss;
                }
                Some(LineClass::ShellPrompt) if sent_pass => return Outcome::Hit,
                Some(LineClass::PasswordPrompt) => {
                    // A second password prompt is the peer rejecting us.
                    if sent_pass {
                        return Outcome::Miss;
                    }
                    if write_line(&mut writer, &cred.password).await.is_err() {
                        return Outcome::Miss;
                    }
                    sent_pass = true;
                }
                Some(LineClass::LoginPrompt) => {
                    if sent_user {
                        return Outcome::Miss;
                    }
                    if write_line(&mut writer, &cred.username).await.is_err() {
                        return Outcome::Miss;
                    }
                    sent_user = true;
                }
                _ => {}
            }
        }
    }

    Outcome::Miss
}

async fn write_line(writer: &mut OwnedWriteHalf, value: &str) -> anyhow::Result<()> {
    let line = format!("{value}\r\n");
    timeout(WRITE_TIMEOUT, writer.write_all(line.as_bytes())).await??;
    Ok(())
}

// ╔════════════════════════════════════════════╗
// ║ ████████╗███████╗███████╗████████╗███████╗ ║
// ║ ╚══██╔══╝██╔════╝██╔════╝╚══██╔══╝██╔════╝ ║
// ║    ██║   █████╗  ███████╗   ██║   ███████╗ ║
// ║    ██║   ██╔══╝  ╚════██║   ██║   ╚════██║ ║
// ║    ██║   ███████╗███████║   ██║   ███████║ ║
// ║    ╚═╝   ╚══════╝╚══════╝   ╚═╝   ╚══════╝ ║
// ╚════════════════════════════════════════════╝
