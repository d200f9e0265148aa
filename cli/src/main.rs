mod commands;
mod terminal;

use commands::CommandLine;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let commands = CommandLine::parse_args();

    terminal::logging::init();

    commands::run(commands).await
}
