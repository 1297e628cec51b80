//! Explore CLI - record like/pass decisions and query who liked whom

use clap::{Parser, Subcommand, ValueEnum};
use explore::config::{self, ExploreConfig, Settings};
use explore::ui;
use explore::server::routes::ListLikedYouResponse;
use explore::{Database, ExploreService};
use std::path::PathBuf;
use std::sync::Arc;
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

#[derive(Parser)]
#[command(name = "explore")]
#[command(version)]
#[command(about = "Like/pass decision store with mutual-like detection")]
#[command(long_about = r#"
Explore records directional like/pass decisions and answers:
  • Who liked a user (newest first, paginated)
  • Who liked a user without being liked back
  • How many users like a user

Example usage:
  explore decide alice bob
  explore liked-you bob --new
  explore serve --port 8080
"#)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to the config file
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Path to the database file (overrides config and EXPLORE_DATABASE)
    #[arg(short, long, global = true)]
    database: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Clone, Copy, Debug, ValueEnum)]
enum Format {
    Text,
    Json,
}

#[derive(Subcommand)]
enum Commands {
    /// Write a starter config file
    Init {
        /// Overwrite an existing config
        #[arg(long)]
        force: bool,
    },

    /// Run the HTTP server
    Serve {
        /// Port to listen on (overrides config and PORT)
        #[arg(short, long)]
        port: Option<u16>,
    },

    /// Record a like (or a pass) from one user to another
    Decide {
        /// User making the decision
        actor: String,

        /// User being liked or passed on
        recipient: String,

        /// Record a pass instead of a like
        #[arg(long)]
        pass: bool,
    },

    /// List users who liked a recipient
    LikedYou {
        /// Recipient user id
        recipient: String,

        /// Only likes the recipient has not returned
        #[arg(short, long)]
        new: bool,

        /// Pagination token from a previous page
        #[arg(short, long)]
        token: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },

    /// Count users who liked a recipient
    Count {
        /// Recipient user id
        recipient: String,

        /// Output format
        #[arg(short, long, value_enum, default_value = "text")]
        format: Format,
    },
}

fn main() {
    if let Err(e) = run() {
        ui::error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();

    let mut file_config = config::load_config(cli.config.as_deref())?.unwrap_or_default();
    file_config.apply_env()?;
    if let Some(database) = &cli.database {
        file_config.database = Some(database.display().to_string());
    }
    if let Commands::Serve { port: Some(port) } = cli.command {
        file_config.port = Some(port);
    }
    let settings = file_config.resolve();
    tracing::debug!(?settings, "Resolved settings");

    match cli.command {
        Commands::Init { force } => {
            let path = cli.config.unwrap_or_else(config::default_config_path);
            config::write_config(&path, &ExploreConfig::starter(), force)?;
            ui::success(&format!("Wrote {}", path.display()));
        }

        Commands::Serve { .. } => {
            let service = open_service(&settings)?;
            ui::header(&format!("Explore listening on port {}", settings.port));
            ui::info("Database", &settings.database.display().to_string());
            ui::info("Page size", &settings.page_size.to_string());
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(explore::server::start_server(settings.port, service))?;
        }

        Commands::Decide { actor, recipient, pass } => {
            let service = open_service(&settings)?;
            let liked = !pass;
            let mutual = service.put_decision(&actor, &recipient, liked)?;
            ui::decision_outcome(&actor, &recipient, liked, mutual);
        }

        Commands::LikedYou { recipient, new, token, format } => {
            let service = open_service(&settings)?;
            let page = if new {
                service.list_new_liked_you(&recipient, token.as_deref())?
            } else {
                service.list_liked_you(&recipient, token.as_deref())?
            };

            match format {
                Format::Json => {
                    let body = ListLikedYouResponse::from(page);
                    println!("{}", serde_json::to_string_pretty(&body)?);
                }
                Format::Text => {
                    let title = if new { "New likes for" } else { "Likes for" };
                    ui::section(&format!("{} {}", title, recipient));
                    if page.is_empty() {
                        ui::empty("No likes found.");
                    } else {
                        println!("{}", ui::LikerTable::new(&page.likers, page.offset.offset()).build());
                    }
                    let next = page.next_token.map(|t| t.to_string());
                    ui::next_page_hint(next.as_deref());
                }
            }
        }

        Commands::Count { recipient, format } => {
            let service = open_service(&settings)?;
            let count = service.count_liked_you(&recipient)?;
            match format {
                Format::Json => println!("{}", serde_json::json!({ "count": count })),
                Format::Text => println!("{} {} liked {}", ui::Icons::STATS, count, recipient),
            }
        }
    }

    Ok(())
}

fn open_service(settings: &Settings) -> anyhow::Result<ExploreService> {
    config::ensure_db_dir(&settings.database)?;
    let db = Database::open_with_pool_size(&settings.database, settings.pool_size)?;
    tracing::info!("Opened database {:?}", settings.database);
    Ok(ExploreService::new(Arc::new(db), settings.page_size).with_token_policy(settings.token_policy))
}
