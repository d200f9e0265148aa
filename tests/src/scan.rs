use std::path::PathBuf;
use std::sync::Arc;
use std::time::{Duration, Instant};

use tokio::io::{AsyncReadExt, AsyncWriteExt};
use tokio::net::{TcpListener, TcpStream};

use credsweep_common::config::ProbeConfig;
use credsweep_common::creds::{self, Credential};
use credsweep_common::network::target::{Protocol, Target};
use credsweep_core::dispatch;
use credsweep_core::sink::ResultSink;
use credsweep_probes::select_protocol;

fn scratch_file(name: &str) -> PathBuf {
    std::env::temp_dir().join(format!("credsweep-it-{}-{}", std::process::id(), name))
}

async fn read_line(stream: &mut TcpStream) -> String {
    let mut buf = [0u8; 256];
    let n = stream.read(&mut buf).await.unwrap();
    String::from_utf8_lossy(&buf[..n]).trim().to_string()
}

/// A fake line-login service: prompts for username and password, hands out
/// a shell prompt when the expected pair arrives, a denial otherwise.
async fn spawn_login_server(expect_user: &'static str, expect_pass: &'static str) -> u16 {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let port = listener.local_addr().unwrap().port();

    tokio::spawn(async move {
        let (mut stream, _) = listener.accept().await.unwrap();
        stream.write_all(b"login: ").await.unwrap();
        let user = read_line(&mut stream).await;
        stream.write_all(b"Password: ").await.unwrap();
        let pass = read_line(&mut stream).await;

        if user == expect_user && pass == expect_pass {
            stream.write_all(b"user@host:~$ ").await.unwrap();
        } else {
            stream.write_all(b"Login incorrect\r\n").await.unwrap();
        }
    });

    port
}

/// The two-line list scenario end to end: both targets go through the SSH
/// probe with their own resolved credentials, the dispatcher waits for both,
/// and both hits land in the output file.
#[tokio::test]
async fn list_scenario_probes_both_targets_before_returning() {
    let port_a = spawn_login_server("root", "toor").await;
    let port_b = spawn_login_server("admin", "").await;

    let lines = [
        format!("127.0.0.1:{port_a} root:toor"),
        format!("127.0.0.1:{port_b} admin:"),
    ];
    let targets: Vec<Target> = lines.iter().map(|l| l.parse().unwrap()).collect();

    let cfg = ProbeConfig {
        force_ssh: true,
        alert: "weak ssh login".to_string(),
        ..ProbeConfig::default()
    };

    // Credential resolution per target, straight from the line tokens.
    assert_eq!(
        creds::resolve(&cfg, &targets[0].cred_token),
        Credential::new("root", "toor")
    );
    assert_eq!(
        creds::resolve(&cfg, &targets[1].cred_token),
        Credential::new("admin", "")
    );
    for target in &targets {
        assert_eq!(select_protocol(&cfg, target), Protocol::Ssh);
    }

    let output = scratch_file("list.log");
    let _ = std::fs::remove_file(&output);
    let cfg = Arc::new(ProbeConfig {
        output_file: Some(output.clone()),
        ..cfg
    });
    let sink = Arc::new(ResultSink::open(cfg.output_file.as_deref()).await.unwrap());

    dispatch::run_batch(targets, cfg, sink).await;

    let content = std::fs::read_to_string(&output).unwrap();
    let mut lines: Vec<&str> = content.lines().collect();
    lines.sort_unstable();
    assert_eq!(
        lines,
        vec![
            "127.0.0.1\tweak ssh login",
            "127.0.0.1\tweak ssh login"
        ]
    );
    let _ = std::fs::remove_file(&output);
}

/// Wrong credentials take the denial path and record nothing.
#[tokio::test]
async fn denied_login_records_no_finding() {
    let port = spawn_login_server("root", "toor").await;

    let cfg = Arc::new(ProbeConfig {
        force_ssh: true,
        credentials: "root:wrong".to_string(),
        ..ProbeConfig::default()
    });
    let target: Target = format!("127.0.0.1:{port}").parse().unwrap();

    let output = scratch_file("denied.log");
    let _ = std::fs::remove_file(&output);
    let sink = Arc::new(ResultSink::open(Some(output.as_path())).await.unwrap());

    dispatch::run_batch(vec![target], cfg, sink).await;

    assert!(std::fs::read_to_string(&output).unwrap_or_default().is_empty());
    let _ = std::fs::remove_file(&output);
}

/// A batch of unreachable targets finishes in roughly one timeout, not one
/// timeout per target: the tasks really do run in parallel.
#[tokio::test]
async fn unreachable_batch_completes_in_bounded_time() {
    // TEST-NET-1 addresses are guaranteed unroutable.
    let targets: Vec<Target> = (1..=16)
        .map(|n| format!("203.0.113.{n}:23").parse().unwrap())
        .collect();

    let cfg = Arc::new(ProbeConfig {
        force_telnet: true,
        concurrency: 16,
        ..ProbeConfig::default()
    });
    let sink = Arc::new(ResultSink::open(None).await.unwrap());

    let start = Instant::now();
    dispatch::run_batch(targets, cfg, sink).await;

    // One dial timeout is 10s; a serialized batch would need ~160s.
    assert!(
        start.elapsed() < Duration::from_secs(25),
        "batch took {:?}, tasks are not running in parallel",
        start.elapsed()
    );
}
