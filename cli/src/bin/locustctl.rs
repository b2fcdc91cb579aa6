use anyhow::{bail, Context};
use clap::Parser;
use tabled::Table;

use cli::args::{Args, Command};
use cli::table::{ErrorTableEntry, SummaryTableEntry};
use control::{ActionResult, Client, StatsResult};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    env_logger::init();

    let args = Args::parse();
    let client = Client::with_config(&args.base_url, args.client_config())
        .context("Could not create the client")?;

    log::info!("Talking to {} ...", client.base_url());

    match args.command {
        Command::Start { users, spawn_rate } => {
            let res = client
                .generate_load(users, spawn_rate)
                .await
                .context("Failed to start the swarm")?;
            print_action(&res)
        }
        Command::Stop => {
            let res = client.stop_load().await.context("Failed to stop the test")?;
            print_action(&res)
        }
        Command::Stats => {
            let stats = client.stats().await.context("Failed to fetch statistics")?;
            print_stats(&stats);
            Ok(())
        }
    }
}

fn print_action(res: &ActionResult) -> anyhow::Result<()> {
    if !res.success {
        bail!("Locust refused the request: {}", res.message);
    }
    println!("{}", res.message);
    Ok(())
}

fn print_stats(stats: &StatsResult) {
    println!("{}", Table::new([SummaryTableEntry::new(stats)]));
    if !stats.errors.is_empty() {
        println!("{}", Table::new(stats.errors.iter().map(ErrorTableEntry::from)));
    }
}
