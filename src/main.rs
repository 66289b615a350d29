use clap::Parser;
use std::sync::Arc;

use bizconsole::cli::{run_audit, run_contact, run_lead, run_link, run_org, run_unlink, Cli, Commands};
use bizconsole::config::Config;
use bizconsole::store::SqliteStore;
use bizconsole::{telemetry, Database, RelationshipCoordinator};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let config = Config::from_env()?;
    telemetry::init(&config);

    let store = SqliteStore::open_at(&config.db_path)?;
    let db = Database::new(Arc::new(store));
    let coord = RelationshipCoordinator::with_priorities(db, config.priorities);

    match cli.command {
        Commands::Org(cmd) => run_org(&coord, &config, cmd).await?,
        Commands::Contact(cmd) => run_contact(&coord, &config, cmd).await?,
        Commands::Lead(cmd) => run_lead(&coord, cmd).await?,
        Commands::Link(cmd) => run_link(&coord, cmd).await?,
        Commands::Unlink(cmd) => run_unlink(&coord, cmd).await?,
        Commands::Audit(args) => run_audit(&coord, args.json).await?,
    }

    Ok(())
}
