//! Gateway Console CLI
//!
//! Terminal front-end for the Intelligent API Gateway:
//! - Sign in and out
//! - Register an account
//! - Show the dashboard (profile + gateway health)
//! - Probe gateway health

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::io::{BufRead, IsTerminal};
use gateway_console::api::{ApiClient, NewUser};
use gateway_console::config::{generate_default_config, Config};
use gateway_console::session::{FileStore, Session};
use gateway_console::views::{Dashboard, HistoryNavigator, LoginView, RegisterView};
use std::path::PathBuf;
use std::sync::Arc;

/// Password source when `--password` is not given
const PASSWORD_ENV: &str = "GATEWAY_CONSOLE_PASSWORD";

#[derive(Parser)]
#[command(name = "gateway-console")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Terminal dashboard for the Intelligent API Gateway")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Config file (default: search standard locations)
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Gateway base URL, overrides the config file
    #[arg(long, global = true)]
    pub api_url: Option<String>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Sign in and store the issued token
    Login {
        /// Username
        username: String,
        /// Password (visible to other users; prefer GATEWAY_CONSOLE_PASSWORD or the prompt)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Create an account
    Register {
        /// Email address
        #[arg(short, long)]
        email: String,
        /// Username
        #[arg(short, long)]
        username: String,
        /// Password (visible to other users; prefer GATEWAY_CONSOLE_PASSWORD or the prompt)
        #[arg(short, long)]
        password: Option<String>,
    },

    /// Show profile and gateway health
    Dashboard,

    /// Probe gateway health
    Health,

    /// Forget the stored token
    Logout,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

/// Pick the password from the flag, then the environment, then the prompt
fn resolve_password<V, P>(flag: Option<String>, var: V, prompt: P) -> anyhow::Result<String>
where
    V: Fn(&str) -> Option<String>,
    P: FnOnce() -> std::io::Result<String>,
{
    let password = match flag.or_else(|| var(PASSWORD_ENV)) {
        Some(password) => password,
        None => prompt().context("Failed to read password")?,
    };
    if password.is_empty() {
        anyhow::bail!("Password must not be empty");
    }
    Ok(password)
}

/// First line of `input` without its line ending
fn read_password_line(mut input: impl BufRead) -> std::io::Result<String> {
    let mut line = String::new();
    input.read_line(&mut line)?;
    Ok(line.trim_end_matches(['\r', '\n']).to_string())
}

/// Hidden prompt on a terminal, one line from piped stdin otherwise
fn prompt_password() -> std::io::Result<String> {
    if std::io::stdin().is_terminal() {
        rpassword::prompt_password("Password: ")
    } else {
        read_password_line(std::io::stdin().lock())
    }
}

/// Drop the stored token; no view is involved
fn forget_token(session: &Session) -> anyhow::Result<()> {
    session.clear().context("Failed to clear stored token")
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    if let Commands::Config { output } = &cli.command {
        let content = generate_default_config();
        match output {
            Some(path) => {
                std::fs::write(path, content)
                    .with_context(|| format!("Failed to write config to {:?}", path))?;
                println!("Config written to {:?}", path);
            }
            None => print!("{}", content),
        }
        return Ok(());
    }

    let (mut config, source, skipped) = match &cli.config {
        Some(path) => (Config::load_with_env(path)?, Some(path.clone()), Vec::new()),
        None => {
            let loaded = Config::load_default();
            (loaded.config, loaded.source, loaded.errors)
        }
    };
    if let Some(url) = cli.api_url {
        config.api.base_url = url;
    }

    gateway_console::logging::init(&config.logging).context("Failed to initialise logging")?;
    tracing::debug!(base_url = %config.api.base_url, "Gateway Console v{}", env!("CARGO_PKG_VERSION"));

    for error in &skipped {
        tracing::warn!(error = %error, "Skipping config file");
    }
    match &source {
        Some(path) => tracing::info!("Loaded config from {:?}", path),
        None => tracing::info!("Using default config with environment overrides"),
    }

    let store = FileStore::new(config.session.token_path());
    let session = Session::with_key(Arc::new(store), config.session.storage_key.clone());
    let client = Arc::new(
        ApiClient::new(config.api.client_config(), session.clone())
            .context("Failed to create HTTP client")?,
    );
    let navigator = Arc::new(HistoryNavigator::new());

    match cli.command {
        Commands::Login { username, password } => {
            let password = resolve_password(password, |k| std::env::var(k).ok(), prompt_password)?;
            let view = LoginView::new(client, session, navigator);
            match view.submit(&username, &password).await {
                Ok(token) => println!("Logged in as {} ({} token stored)", username, token.token_type),
                Err(e) => {
                    eprintln!("Login failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Register {
            email,
            username,
            password,
        } => {
            let password = resolve_password(password, |k| std::env::var(k).ok(), prompt_password)?;
            let view = RegisterView::new(client, navigator);
            match view.submit(&NewUser::new(email, username, password)).await {
                Ok(user) => println!(
                    "Registered {} <{}>. Sign in with: gateway-console login {}",
                    user.username, user.email, user.username
                ),
                Err(e) => {
                    eprintln!("Registration failed: {}", e);
                    std::process::exit(1);
                }
            }
        }

        Commands::Dashboard => {
            let dashboard = Dashboard::new(client, session, navigator);
            let state = dashboard.mount().await;
            print!("{}", dashboard.render().await);

            if state.is_redirecting() {
                eprintln!("Not signed in. Run: gateway-console login <username>");
                std::process::exit(1);
            }
        }

        Commands::Health => match client.check_health().await {
            Ok(health) => {
                println!("Status: {}", health.status);
                println!("Timestamp: {}", health.display_timestamp());
            }
            Err(e) => {
                eprintln!("Health check failed ({}): {}", e.kind(), e);
                std::process::exit(1);
            }
        },

        Commands::Logout => {
            forget_token(&session)?;
            println!("Logged out");
        }

        // Handled before config load
        Commands::Config { .. } => {}
    }

    Ok(())
}
