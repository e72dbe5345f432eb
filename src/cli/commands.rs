use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// `Tweetly` - turn project progress notes into tweets.
#[derive(Parser, Debug)]
#[command(name = "tweetly")]
#[command(version)]
#[command(about = "Generate tweet-style posts from project progress updates.", long_about = None)]
pub struct Cli {
    /// Path to config.toml (default: ~/.tweetly/config.toml)
    #[arg(long, global = true)]
    pub config: Option<PathBuf>,

    /// Log at debug level
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the HTTP gateway
    Serve {
        /// Port to listen on (use 0 for random available port)
        #[arg(short, long)]
        port: Option<u16>,

        /// Host to bind to
        #[arg(long)]
        host: Option<String>,
    },

    /// Generate one tweet and print it
    Generate {
        /// What you worked on
        #[arg(long)]
        progress: String,

        /// Requester id used for stored preferences and history
        #[arg(long)]
        user: Option<String>,

        /// Tone override (e.g. Professional, Funny)
        #[arg(long)]
        tone: Option<String>,

        /// Length override (e.g. Short, Medium, Thread)
        #[arg(long)]
        length: Option<String>,
    },

    /// Manage stored user preferences
    Profile {
        #[command(subcommand)]
        profile_command: ProfileCommands,
    },
}

#[derive(Subcommand, Debug)]
pub enum ProfileCommands {
    /// Create or update a user's default tone, length and emoji style
    Set {
        #[arg(long)]
        user: String,

        #[arg(long)]
        tone: Option<String>,

        #[arg(long)]
        length: Option<String>,

        #[arg(long)]
        emoji: Option<String>,
    },
}
