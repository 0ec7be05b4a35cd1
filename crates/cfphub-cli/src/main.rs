//! CLI entry point.
//!
//! Parses arguments, sets up logging and dispatches to handlers. Errors are
//! printed once and mapped to an exit code.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use cfphub_cli::{
    Cli, CliConfig, CliError, Commands, EventsCommand, PortalsCommand, bootstrap, handlers,
    load_app_config,
};

fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let config = CliConfig::from_cli(&cli);
    let Some(command) = cli.command else {
        Cli::command().print_help()?;
        return Ok(());
    };

    match command {
        // The server composes its own context.
        Commands::Serve {
            port,
            no_reload,
            allowed_origins,
        } => {
            let app_config = load_app_config(config.config_path.as_deref())?;
            handlers::serve::execute(
                app_config,
                &config.database_path,
                port,
                no_reload,
                allowed_origins,
            )
            .await
        }
        Commands::Aggregate {
            keywords,
            companies,
            reload,
        } => {
            let ctx = bootstrap(&config).await?;
            handlers::aggregate::execute(&ctx, &keywords, &companies, reload).await
        }
        Commands::Portals(cmd) => {
            let ctx = bootstrap(&config).await?;
            match cmd {
                PortalsCommand::List => handlers::portals::list(&ctx).await,
                PortalsCommand::Add {
                    name,
                    base_url,
                    portal_type,
                    description,
                } => handlers::portals::add(&ctx, name, base_url, portal_type, description).await,
                PortalsCommand::Remove { name } => handlers::portals::remove(&ctx, &name).await,
                PortalsCommand::Speakers { name, company } => {
                    handlers::portals::speakers(&ctx, &name, company.as_deref()).await
                }
            }
        }
        Commands::Events(cmd) => {
            let ctx = bootstrap(&config).await?;
            match cmd {
                EventsCommand::List { sort } => handlers::events::list(&ctx, sort.into()).await,
                EventsCommand::Show { portal } => handlers::events::show(&ctx, &portal).await,
                EventsCommand::Export { output } => {
                    handlers::events::export(&ctx, output.as_deref()).await
                }
            }
        }
    }
}

#[tokio::main]
async fn main() {
    // Load environment variables
    dotenvy::dotenv().ok();

    let cli = Cli::parse();
    init_logging(cli.verbose);

    if let Err(err) = run(cli).await {
        let classified = CliError::classify(&err);
        eprintln!("Error: {err:#}");
        std::process::exit(classified.exit_code());
    }
}
