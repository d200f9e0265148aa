pub mod passive;
pub mod scan;

use std::path::PathBuf;
use std::sync::Arc;

use clap::Parser;

use credsweep_common::config::ProbeConfig;
use credsweep_core::sink::ResultSink;

#[derive(Parser)]
#[command(name = "credsweep")]
#[command(about = "Sweeps network targets for weak or default credentials.")]
pub struct CommandLine {
    /// CIDR block to enumerate and probe (e.g. 192.168.1.0/24)
    #[arg(long)]
    pub cidr: Option<String>,

    /// Target list: a file path, or "stdin"
    #[arg(long)]
    pub list: Option<String>,

    /// Passive search query
    #[arg(long)]
    pub search: Option<String>,

    /// List passive matches instead of probing them
    #[arg(long)]
    pub passive: bool,

    /// Print bare addresses in passive mode
    #[arg(long)]
    pub ips_only: bool,

    /// Passive result pages to walk
    #[arg(long, default_value_t = 1)]
    pub pages: u32,

    /// URL scheme for HTTP probes (http or https)
    #[arg(long, default_value = "http")]
    pub protocol: String,

    /// Port override applied to every target
    #[arg(long)]
    pub port: Option<u16>,

    /// Request path for HTTP probes
    #[arg(long, default_value = "/")]
    pub path: String,

    /// HTTP method
    #[arg(long, default_value = "GET")]
    pub method: String,

    /// user:pass sent as HTTP Basic Authorization
    #[arg(long, default_value = "")]
    pub basic_auth: String,

    /// Content-Type header value
    #[arg(long, default_value = "")]
    pub content_type: String,

    /// Name of a single custom request header
    #[arg(long, default_value = "")]
    pub header_name: String,

    /// Value of the custom request header
    #[arg(long, default_value = "")]
    pub header_value: String,

    /// HTTP request body
    #[arg(long, default_value = "")]
    pub data: String,

    /// Body substring marking a successful HTTP login
    #[arg(long, default_value = "")]
    pub success: String,

    /// Label written next to each finding
    #[arg(long, default_value = "default credentials")]
    pub alert: String,

    /// Append findings to this file
    #[arg(long)]
    pub output: Option<PathBuf>,

    /// Default credential token (user:pass) for targets without one
    #[arg(long, default_value = "")]
    pub credentials: String,

    /// Username override; beats every credential token
    #[arg(long, default_value = "")]
    pub username: String,

    /// Password override; beats every credential token
    #[arg(long, default_value = "")]
    pub password: String,

    /// Force the SSH probe regardless of port
    #[arg(long)]
    pub ssh: bool,

    /// Force the Telnet probe regardless of port
    #[arg(long)]
    pub telnet: bool,

    /// Ceiling on in-flight probe tasks
    #[arg(long, default_value_t = 100)]
    pub concurrency: usize,
}

impl CommandLine {
    pub fn parse_args() -> Self {
        Self::parse()
    }

    /// Freezes the probe-relevant flags into the immutable snapshot every
    /// task shares.
    fn to_config(&self) -> ProbeConfig {
        ProbeConfig {
            protocol: self.protocol.clone(),
            port: self.port,
            path: self.path.clone(),
            method: self.method.clone(),
            basic_auth: self.basic_auth.clone(),
            content_type: self.content_type.clone(),
            header_name: self.header_name.clone(),
            header_value: self.header_value.clone(),
            data: self.data.clone(),
            success_marker: self.success.clone(),
            alert: self.alert.clone(),
            output_file: self.output.clone(),
            credentials: self.credentials.clone(),
            username: self.username.clone(),
            password: self.password.clone(),
            force_ssh: self.ssh,
            force_telnet: self.telnet,
            concurrency: self.concurrency,
        }
    }
}

/// Mode precedence: CIDR, then list, then passive listing, then
/// search-and-probe.
pub async fn run(commands: CommandLine) -> anyhow::Result<()> {
    let cfg = Arc::new(commands.to_config());
    let sink = Arc::new(ResultSink::open(cfg.output_file.as_deref()).await?);

    if let Some(cidr) = &commands.cidr {
        return scan::cidr(cidr, cfg, sink).await;
    }
    if let Some(list) = &commands.list {
        return scan::list(list, cfg, sink).await;
    }
    if commands.passive {
        let query = commands
            .search
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("--passive needs a --search query"))?;
        return passive::listing(query, commands.pages, commands.ips_only, &sink).await;
    }
    if let Some(query) = &commands.search {
        return passive::probe(query, commands.pages, cfg, sink).await;
    }

    anyhow::bail!("no target source given; use --cidr, --list, --search or --passive")
}
