use std::sync::Arc;

use tokio::io::AsyncBufReadExt;

use credsweep_common::config::ProbeConfig;
use credsweep_common::error::StartupError;
use credsweep_common::network::range;
use credsweep_common::network::target::Target;
use credsweep_common::{info, warn};
use credsweep_core::dispatch;
use credsweep_core::sink::ResultSink;

/// Expands the CIDR block and probes every usable host as one batch.
pub async fn cidr(cidr: &str, cfg: Arc<ProbeConfig>, sink: Arc<ResultSink>) -> anyhow::Result<()> {
    let hosts = range::cidr_hosts(cidr)?;
    info!("{} hosts enumerated from {cidr}", hosts.len());

    let targets: Vec<Target> = hosts.into_iter().map(Target::from_addr).collect();
    dispatch::run_batch(targets, cfg, sink).await;
    Ok(())
}

/// Reads `host[:port] [credential]` lines from a file or standard input and
/// probes them as one batch. Malformed lines are reported and skipped; an
/// unreadable list aborts before anything is probed.
pub async fn list(list: &str, cfg: Arc<ProbeConfig>, sink: Arc<ResultSink>) -> anyhow::Result<()> {
    let lines = read_lines(list).await?;
    let targets = parse_lines(&lines);
    info!("{} targets parsed from the list", targets.len());

    dispatch::run_batch(targets, cfg, sink).await;
    Ok(())
}

async fn read_lines(list: &str) -> Result<Vec<String>, StartupError> {
    // A single-character list value is the historical shorthand for stdin.
    if list == "stdin" || list.len() == 1 {
        let mut lines = Vec::new();
        let mut reader = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        while let Ok(Some(line)) = reader.next_line().await {
            lines.push(line);
        }
        return Ok(lines);
    }

    let content = tokio::fs::read_to_string(list)
        .await
        .map_err(|_| StartupError::ListUnreadable(list.to_string()))?;
    Ok(content.lines().map(str::to_string).collect())
}

fn parse_lines(lines: &[String]) -> Vec<Target> {
    let mut targets = Vec::new();
    for line in lines {
        if line.trim().is_empty() {
            continue;
        }
        match line.parse::<Target>() {
            Ok(target) => targets.push(target),
            Err(e) => warn!("{e}"),
        }
    }
    targets
}
