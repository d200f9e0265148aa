//! Append-only findings log.

use std::path::Path;

use anyhow::Context;
use tokio::fs::{File, OpenOptions};
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;

use credsweep_common::success;

/// A confirmed hit: the target's identity plus the configured alert label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Finding {
    pub host: String,
    pub alert: String,
}

impl Finding {
    pub fn line(&self) -> String {
        format!("{}\t{}", self.host, self.alert)
    }
}

/// Serializes findings to the console and, when configured, to an
/// append-only file.
///
/// Every write is flushed and fsynced so partial results survive an
/// interrupted scan, and file access is held exclusively for the duration
/// of one line. The log is not deduplicated: a target matched twice is
/// recorded twice.
pub struct ResultSink {
    file: Option<Mutex<File>>,
}

impl ResultSink {
    pub async fn open(path: Option<&Path>) -> anyhow::Result<Self> {
        let file = match path {
            Some(path) => {
                let file = OpenOptions::new()
                    .create(true)
                    .append(true)
                    .open(path)
                    .await
                    .with_context(|| format!("opening output file {}", path.display()))?;
                Some(Mutex::new(file))
            }
            None => None,
        };
        Ok(Self { file })
    }

    pub async fn record(&self, finding: &Finding) -> anyhow::Result<()> {
        self.record_line(&finding.line()).await
    }

    /// Appends one newline-terminated line.
    pub async fn record_line(&self, line: &str) -> anyhow::Result<()> {
        success!("{line}");
        if let Some(file) = &self.file {
            let mut file = file.lock().await;
            file.write_all(format!("{line}\n").as_bytes()).await?;
            file.flush().await?;
            file.sync_all().await?;
        }
        Ok(())
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
