use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::{error, info, Level};
use tracing_subscriber::EnvFilter;

use catalog::config::{AppConfig, DEFAULT_CONFIG_FILE};
use catalog::database::{
    establish_connection, migrate_database, seed_data, setup_database, MigrateDirection,
};
use catalog::queries::{run_demos, QueryDemo, QueryParams};
use catalog::report::{render_run, OutputFormat};
use catalog::session::with_session;

#[derive(Parser)]
#[clap(author, version, about)]
struct Cli {
    #[clap(short, long, global = true)]
    log_level: Option<String>,
    /// TOML file with database settings; defaults apply when it is missing
    #[clap(short, long, global = true, default_value = DEFAULT_CONFIG_FILE)]
    config: PathBuf,
    /// SQLite file to use instead of the configured one (`:memory:` allowed)
    #[clap(short, long, global = true)]
    database: Option<String>,
    #[clap(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run one or more demo queries inside a single session
    Run {
        #[clap(value_enum)]
        demos: Vec<QueryDemo>,
        #[clap(long, value_enum, default_value_t)]
        format: OutputFormat,
        #[clap(flatten)]
        params: QueryParams,
    },
    /// Print the available demo queries
    ListDemos,
    /// Create the schema and insert the demo dataset
    Seed,
    Db {
        #[clap(subcommand)]
        command: DbCommands,
    },
}

#[derive(Subcommand, Debug)]
enum DbCommands {
    Init,
    Migrate {
        #[clap(subcommand)]
        direction: MigrateDirection,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let args = Cli::parse();
    setup_logging(&args.log_level);

    let config = AppConfig::load(&args.config)
        .with_context(|| format!("loading {}", args.config.display()))?
        .with_database_path(args.database.clone());

    match args.command {
        Commands::Run {
            demos,
            format,
            params,
        } => {
            // Without explicit demos only the date range query runs
            let demos = if demos.is_empty() {
                vec![QueryDemo::DateRange]
            } else {
                demos
            };

            let db = establish_connection(&config.database)
                .await
                .context("connecting to the catalog database")?;

            let result = with_session(&db, |txn| {
                Box::pin(async move { run_demos(txn, &demos, &params).await })
            })
            .await;

            let outputs = match result {
                Ok(outputs) => outputs,
                Err(err) => {
                    if let Some(kind) = err.db_kind() {
                        error!(kind = %kind, "Query run failed");
                    }
                    return Err(err).context("running demo queries");
                }
            };

            let rendered = render_run(&outputs, format).context("rendering query results")?;
            if !rendered.is_empty() {
                println!("{}", rendered);
            }
        }
        Commands::ListDemos => {
            for demo in QueryDemo::all() {
                println!("{:<12} {}", demo.name(), demo.description());
            }
        }
        Commands::Seed => {
            let db = establish_connection(&config.database).await?;
            setup_database(&db).await?;
            let summary = seed_data::seed_catalog(&db).await?;
            if summary.is_empty() {
                info!("Nothing to seed");
            }
        }
        Commands::Db { command } => {
            let db = establish_connection(&config.database).await?;
            match command {
                DbCommands::Init => {
                    info!("Initializing database: {}", config.database.database_url());
                    migrate_database(&db, MigrateDirection::Up).await?;
                }
                DbCommands::Migrate { direction } => {
                    info!("Running database migration: {:?}", direction);
                    migrate_database(&db, direction).await?;
                }
            }
        }
    }

    Ok(())
}

fn setup_logging(log_level: &Option<String>) {
    let log_level = match log_level
        .as_ref()
        .unwrap_or(&"info".to_string())
        .to_lowercase()
        .as_str()
    {
        "trace" => Level::TRACE,
        "debug" => Level::DEBUG,
        "info" => Level::INFO,
        "warn" => Level::WARN,
        "error" => Level::ERROR,
        _ => Level::INFO,
    };

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::new(format!("sea_orm_migration=warn,{}", log_level)))
        .with_writer(std::io::stderr)
        .without_time()
        .init();
}
