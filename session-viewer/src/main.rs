use std::sync::Arc;

use anyhow::Result;
use avatar_sdk::LiveKitConnector;
use clap::{Parser, Subcommand};
use session_viewer::{
    backend::client::BackendClient,
    config::AppConfig,
    surface::TerminalSurface,
    viewer::SessionViewer,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "session-viewer", about = "View avatar streaming sessions")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// View an active streaming session
    View {
        /// Session id, or a viewer URL carrying local_session_id / session_id
        session: Option<String>,
    },
    /// List active sessions known to the backend
    Sessions,
    /// Create and start a new streaming session
    Start {
        #[arg(long, default_value = "Marianne_Chair_Sitting_public")]
        avatar_id: String,
        #[arg(long, default_value = "medium")]
        quality: String,
    },
    /// Send text for the avatar to speak
    Speak {
        session: String,
        text: String,
    },
    /// Stop a streaming session
    Stop {
        session: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // 加载配置
    let config = AppConfig::load()?;

    // 初始化日志
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        format!(
            "session_viewer={level},avatar_sdk={level},livekit=warn",
            level = config.logging.level
        )
        .into()
    });

    let fmt_layer = tracing_subscriber::fmt::layer().with_target(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .init();

    let backend = BackendClient::new(config.backend.clone())?;

    match cli.command {
        Command::View { session } => {
            let mut viewer = SessionViewer::new(
                backend,
                Arc::new(LiveKitConnector),
                TerminalSurface::new(),
                config.stream.clone(),
            );
            viewer.run(session.as_deref()).await?;
        }
        Command::Sessions => {
            let list = backend.list_sessions().await?;
            println!("{} active session(s)", list.active_sessions.len());
            for session in &list.active_sessions {
                println!(
                    "  {}  token={}  created={}",
                    session.display_id(),
                    if session.access_token.is_some() { "yes" } else { "no" },
                    session
                        .created_at
                        .map(|t| t.to_rfc3339())
                        .unwrap_or_else(|| "-".to_string()),
                );
            }
        }
        Command::Start { avatar_id, quality } => {
            let started = backend.start_session(avatar_id, quality).await?;
            println!("Session started: {}", started.local_session_id);
            println!("View it with: session-viewer view {}", started.local_session_id);
        }
        Command::Speak { session, text } => {
            backend.speak(session, text).await?;
        }
        Command::Stop { session } => {
            backend.stop_session(session).await?;
        }
    }

    Ok(())
}
