//! Marquee - cinema seat booking backend

use std::net::SocketAddr;

use clap::{Parser, Subcommand};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use marquee::{
    api::{api_router, AppState},
    auth,
    config::{get_data_dir, load_config, Config},
    db::init_database,
    domain::{CreateUserRequest, Role},
};

#[derive(Parser)]
#[command(name = "marquee")]
#[command(version = "0.1.0")]
#[command(about = "Cinema seat booking backend")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Host to bind to
    #[arg(short = 'H', long)]
    host: Option<String>,

    /// Port to listen on
    #[arg(short, long)]
    port: Option<u16>,

    /// Database path (defaults to the data directory)
    #[arg(short, long)]
    database: Option<String>,
}

#[derive(Subcommand)]
enum Commands {
    /// Start the Marquee server
    Serve,
    /// Initialize the database
    Init,
    /// Show configuration info
    Config,
    /// Create an admin account
    CreateAdmin {
        #[arg(long)]
        name: String,
        #[arg(long)]
        email: String,
        #[arg(long, default_value = "")]
        phone: String,
        #[arg(long)]
        password: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "marquee=info,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let cli = Cli::parse();
    let config = load_config();

    let db_path = cli
        .database
        .clone()
        .or(config.database.path.clone())
        .unwrap_or_else(|| config.database.get_path().to_string_lossy().to_string());

    let host = cli.host.clone().unwrap_or_else(|| config.server.host.clone());
    let port = cli.port.unwrap_or(config.server.port);

    match cli.command {
        Some(Commands::Init) => {
            println!("Initializing database at: {}", db_path);
            let _pool = init_database(&db_path).await?;
            println!("Database initialized successfully!");
            return Ok(());
        }
        Some(Commands::Config) => {
            println!("Marquee Configuration");
            println!("=====================");
            println!("Data directory: {}", get_data_dir().display());
            println!("Database path: {}", db_path);
            println!("Server: {}:{}", host, port);
            println!("Token TTL: {}s", config.auth.token_ttl_secs);
            return Ok(());
        }
        Some(Commands::CreateAdmin {
            name,
            email,
            phone,
            password,
        }) => {
            let pool = init_database(&db_path).await?;
            let hash = auth::hash_password(&password)
                .map_err(|e| anyhow::anyhow!("password hashing failed: {}", e))?;
            let req = CreateUserRequest {
                name,
                phone,
                email,
                password: String::new(),
            };
            let user = marquee::db::create_user(&pool, &req, &hash, Role::Admin).await?;
            println!("Created admin {} ({})", user.id, user.email);
            return Ok(());
        }
        _ => {}
    }

    run_server(&host, port, &db_path, config).await
}

async fn run_server(host: &str, port: u16, db_path: &str, config: Config) -> anyhow::Result<()> {
    tracing::info!("Initializing database at: {}", db_path);
    let pool = init_database(db_path).await?;

    let cors_enabled = config.server.cors_enabled;
    let state = AppState::new(pool, config);

    let mut app = api_router(state).layer(TraceLayer::new_for_http());

    if cors_enabled {
        let cors = CorsLayer::new()
            .allow_origin(Any)
            .allow_methods(Any)
            .allow_headers(Any);
        app = app.layer(cors);
    }

    let addr: SocketAddr = format!("{}:{}", host, port).parse()?;

    print_banner(host, port, db_path);

    tracing::info!("Starting server on {}", addr);
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

fn print_banner(host: &str, port: u16, db_path: &str) {
    println!();
    println!("  Marquee v{}", env!("CARGO_PKG_VERSION"));
    println!("  API:      http://{}:{}/api/v1", host, port);
    println!("  Health:   http://{}:{}/health", host, port);
    println!("  Database: {}", db_path);
    println!();
}
