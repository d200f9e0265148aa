use std::sync::Arc;

use credsweep_common::config::ProbeConfig;
use credsweep_common::info;
use credsweep_common::network::target::Target;
use credsweep_core::dispatch;
use credsweep_core::passive::{PassiveSource, ShodanClient};
use credsweep_core::sink::ResultSink;

/// Lists passive matches without probing: `host<TAB>country` per line, or
/// bare addresses with `--ips-only`.
pub async fn listing(
    query: &str,
    pages: u32,
    ips_only: bool,
    sink: &ResultSink,
) -> anyhow::Result<()> {
    let source = ShodanClient::from_env()?;

    if !ips_only {
        print_credits(&source).await?;
    }

    for page in 1..=pages {
        let results = source.host_search(query, page).await?;
        if results.is_exhausted() {
            break;
        }
        for m in &results.matches {
            let line = if ips_only {
                m.ip.clone()
            } else {
                format!("{}\t{}", m.ip, m.location.country_name)
            };
            sink.record_line(&line).await?;
        }
    }
    Ok(())
}

/// Probes every passive match, one dispatcher barrier per result page.
pub async fn probe(
    query: &str,
    pages: u32,
    cfg: Arc<ProbeConfig>,
    sink: Arc<ResultSink>,
) -> anyhow::Result<()> {
    let source = ShodanClient::from_env()?;
    print_credits(&source).await?;

    for page in 1..=pages {
        let results = source.host_search(query, page).await?;
        if results.is_exhausted() {
            break;
        }

        let targets: Vec<Target> = results
            .matches
            .into_iter()
            .map(|m| Target::from_host(m.ip))
            .collect();
        info!("page {page}: probing {} matches", targets.len());
        dispatch::run_batch(targets, cfg.clone(), sink.clone()).await;
    }
    Ok(())
}

async fn print_credits(source: &impl PassiveSource) -> anyhow::Result<()> {
    let credits = source.api_info().await?;
    info!("Query credits: {}", credits.query_credits);
    info!("Scan credits: {}", credits.scan_credits);
    Ok(())
}
