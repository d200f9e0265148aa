//! Concurrent scan dispatch.
//!
//! Fans one probe task out per target against a shared, read-only
//! configuration snapshot, then waits for the whole batch: one barrier per
//! CIDR expansion, list, or passive page. The number of probes doing
//! network work at once is capped by a counting semaphore sized from the
//! configuration, so the ceiling is explicit instead of being left to the
//! scheduler.
//!
//! There is no mid-batch cancellation; each task is bounded by the probes'
//! per-operation timeouts and every per-target failure is absorbed where it
//! happens.

use std::sync::Arc;

use tracing::error;

use credsweep_common::config::ProbeConfig;
use credsweep_common::creds;
use credsweep_common::info;
use credsweep_common::network::target::Target;
use credsweep_probes::{self as probes, Outcome};
use tokio::sync::Semaphore;

use crate::sink::{Finding, ResultSink};

/// Probes every target and returns once all spawned tasks have finished.
pub async fn run_batch(targets: Vec<Target>, cfg: Arc<ProbeConfig>, sink: Arc<ResultSink>) {
    let semaphore = Arc::new(Semaphore::new(cfg.concurrency.max(1)));
    let mut handles = Vec::with_capacity(targets.len());

    for target in targets {
        let cfg = cfg.clone();
        let sink = sink.clone();
        let semaphore = semaphore.clone();

        handles.push(tokio::spawn(async move {
            let Ok(_permit) = semaphore.acquire_owned().await else {
                return;
            };
            probe_target(target, &cfg, &sink).await;
        }));
    }

    for handle in handles {
        if let Err(e) = handle.await {
            error!("probe task failed: {e}");
        }
    }
}

/// One target's whole lifecycle: credential resolution, protocol selection,
/// the login attempt, and recording of at most one finding.
async fn probe_target(target: Target, cfg: &ProbeConfig, sink: &ResultSink) {
    let cred = creds::resolve(cfg, &target.cred_token);
    let protocol = probes::select_protocol(cfg, &target);
    let probe = probes::probe_for(protocol);
    let port = target
        .resolved_port(cfg.port)
        .unwrap_or_else(|| probe.default_port(cfg));

    info!("Trying {} ...", target.host);
    match probe.attempt(&target.host, port, &cred, cfg).await {
        Outcome::Hit => {
            let finding = Finding {
                host: target.host,
                alert: cfg.alert.clone(),
            };
            if let Err(e) = sink.record(&finding).await {
                error!("failed to record finding: {e}");
            }
        }
        Outcome::Miss => {}
    }
}
