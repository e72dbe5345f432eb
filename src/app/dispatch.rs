use crate::cli::commands::{Cli, Commands, ProfileCommands};
use anyhow::{Result, bail};
use std::sync::Arc;
use tracing::info;
use tweetly::Config;
use tweetly::config::StoreBackend;
use tweetly::generation::GenerationRequest;
use tweetly::store::{SqliteStore, UserPreferences};

async fn run_generate(
    config: &Config,
    progress: String,
    user: Option<String>,
    tone: Option<String>,
    length: Option<String>,
) -> Result<()> {
    let request = GenerationRequest::new(progress)?
        .with_requester(user)
        .with_tone(tone)
        .with_length(length);

    let state = tweetly::gateway::build_state(config).await?;
    let generated = state.generator.generate(request).await;
    println!("{}", generated.tweet);
    Ok(())
}

async fn run_profile_set(config: &Config, user: &str, preferences: UserPreferences) -> Result<()> {
    if config.store.backend != StoreBackend::Sqlite {
        bail!(
            "`profile set` needs the sqlite store (current backend: {})",
            config.store.backend
        );
    }
    if user.trim().is_empty() {
        bail!("--user must not be empty");
    }

    let path = config.sqlite_path();
    let store = SqliteStore::open(&path).await?;
    store.upsert_preferences(user, &preferences).await?;

    info!(user, db = %path.display(), "profile updated");
    println!("Updated profile for {user}");
    Ok(())
}

fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

pub async fn dispatch(cli: Cli, config: Config) -> Result<()> {
    let config = Arc::new(config);

    match cli.command {
        Commands::Serve { port, host } => {
            let port = port.unwrap_or(config.gateway.port);
            let host = host.unwrap_or_else(|| config.gateway.host.clone());
            if port == 0 {
                info!("Starting Tweetly gateway on {host} (random port)");
            } else {
                info!("Starting Tweetly gateway on {host}:{port}");
            }
            tweetly::gateway::run_gateway(&host, port, Arc::clone(&config)).await
        }

        Commands::Generate {
            progress,
            user,
            tone,
            length,
        } => run_generate(&config, progress, user, tone, length).await,

        Commands::Profile {
            profile_command:
                ProfileCommands::Set {
                    user,
                    tone,
                    length,
                    emoji,
                },
        } => {
            let preferences = UserPreferences {
                default_tone: non_empty(tone),
                default_length: non_empty(length),
                emoji_style: non_empty(emoji),
            };
            run_profile_set(&config, &user, preferences).await
        }
    }
}
