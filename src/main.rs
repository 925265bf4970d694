use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};

use kindling::config::Config;
use kindling::discord::{self, ChatSink, Webhook};
use kindling::hn::{self, HnClient};
use kindling::sn::{self, Destination, SnClient};
use kindling::{poster, scheduler, Error};

/// Kindling: cross-posts trending Hacker News stories to Stacker News.
///
/// Fetches the HN front page every hour, posts the selected stories to
/// Stacker News with a provenance comment, and mirrors activity and
/// errors to a Discord channel.
#[derive(Parser)]
#[command(name = "kindling", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the orchestrator (hourly cross-post cycle, notification
    /// watcher, session keep-alive)
    Run,

    /// Cross-post a single story by HN item id or link
    Post {
        /// Item id (8863) or item link (https://news.ycombinator.com/item?id=8863)
        story: String,

        /// Post even when dupes exist for the URL
        #[arg(long)]
        skip_dupes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    // Load .env file if present (silently ignore if missing)
    let _ = dotenvy::dotenv();

    // Set up structured logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("kindling=info")),
        )
        .init();

    let cli = Cli::parse();

    let config = Config::load()?;
    config.require_sn()?;
    config.require_discord()?;

    let hn_client = Arc::new(HnClient::new(&config.hn_firebase_url)?);
    let sn_client = Arc::new(SnClient::new(&config.sn_url, config.sn_auth_cookie.clone())?);
    let webhook = Arc::new(Webhook::new(&config.discord_webhook)?);

    match cli.command {
        Commands::Run => {
            let dest: Arc<dyn Destination> = sn_client;
            let chat: Arc<dyn ChatSink> = webhook;
            scheduler::run(hn_client, dest, chat, config.sn_sub).await?;
        }

        Commands::Post { story, skip_dupes } => {
            let id = hn::parse_item_link(&story)
                .or_else(|| story.parse().ok())
                .context("expected an HN item id or item link")?;
            let story = hn_client.item(id).await?;

            let result = poster::post_story(
                sn_client.as_ref(),
                webhook.as_ref(),
                &story,
                &config.sn_sub,
                skip_dupes,
            )
            .await;

            match result {
                Ok(item_id) => println!("posted: {}", sn::item_link(item_id)),
                Err(Error::Dupes { url, dupes }) => {
                    webhook
                        .send_embed(discord::dupes_embed(&url, &dupes))
                        .await;
                    println!(
                        "{} dupe(s) found for {url}, rerun with --skip-dupes to post anyway",
                        dupes.len()
                    );
                }
                Err(Error::CommentFailed { item_id, source }) => {
                    // The post is committed; retrying would duplicate it.
                    println!(
                        "posted: {} (provenance comment failed: {source})",
                        sn::item_link(item_id)
                    );
                }
                Err(e) => return Err(e.into()),
            }
        }
    }

    Ok(())
}
