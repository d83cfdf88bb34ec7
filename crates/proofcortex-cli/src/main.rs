use std::{io::Write, time::Duration};

use clap::Parser;
use env_logger::Env;
use tokio::signal::unix::{signal, SignalKind};

use proofcortex_cli::{
    cli::{Cli, Command},
    commands, get_client, Config,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // .env must be loaded before clap reads the env fallbacks
    dotenv::dotenv().ok();
    env_logger::Builder::from_env(Env::default().default_filter_or("info")).init();
    let cli = Cli::parse();
    let mut stdout = std::io::stdout();

    match cli.command {
        Command::Read { proof_id, rpc } => {
            let config = Config::from_args(&rpc)?;
            let client = match get_client(&config).await {
                Ok(client) => client,
                Err(e) => {
                    writeln!(stdout, "Error fetching proof: {e}")?;
                    return Ok(());
                }
            };
            commands::read(client.as_ref(), &proof_id, &mut stdout).await?;
        }
        Command::Listen { rpc, poll_interval } => {
            let config =
                Config::from_args(&rpc)?.with_poll_interval(Duration::from_millis(poll_interval));
            // Installed before connecting so SIGINT during the connect is caught too
            let mut sigint = signal(SignalKind::interrupt())?;
            let shutdown = async move {
                sigint.recv().await;
            };
            let reason = commands::connect_and_listen(
                get_client(&config),
                config.poll_interval,
                shutdown,
                &mut stdout,
            )
            .await?;
            log::info!("Listener stopped: {reason:?}");
        }
        Command::ProofId {
            model_id,
            input_hash,
            output_hash,
            submitter,
        } => {
            commands::proof_id(&mut stdout, &model_id, &input_hash, &output_hash, &submitter)?;
        }
    }
    Ok(())
}
