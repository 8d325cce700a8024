//! CLI module for snoolink.
//!
//! Subcommands:
//! - `show`: Print a submission's main fields
//! - `resolve`: Print the id, fullname and short link of a URL
//! - `comments`: Print a submission's comment tree
//! - `moderate`: Apply a moderator action

mod comments;
mod moderate;
mod resolve;
mod show;

use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;
use crate::models::{id_from_url, Submission, SubmissionId};
use crate::transport::backends::{MemoryTransport, Method};
use crate::transport::endpoints;

pub use moderate::ModerateAction;

/// snoolink - lazily loaded Reddit submissions
#[derive(Parser)]
#[command(name = "snoolink")]
#[command(about = "Inspect and moderate Reddit submissions")]
#[command(version)]
pub struct App {
    /// Run in verbose mode
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Answer the comment-page request from a recorded JSON reply instead
    /// of the network. Writes are accepted and only logged.
    #[arg(long, global = true, value_name = "FILE")]
    pub replay: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Subcommand)]
pub enum Command {
    /// Print a submission's main fields
    Show {
        /// Submission id or URL
        reference: String,

        /// Print every attribute instead of the summary
        #[arg(long)]
        all: bool,
    },

    /// Print the id, fullname and short link for a URL (no request is made)
    Resolve {
        /// Comment-page or short link
        url: String,
    },

    /// Print a submission's comment tree
    Comments {
        /// Submission id or URL
        reference: String,

        /// Number of comments to request
        #[arg(long)]
        limit: Option<u32>,

        /// Comment order to request (best, top, new, controversial, old, qa)
        #[arg(long)]
        sort: Option<String>,

        /// Maximum reply depth to print
        #[arg(long, default_value = "8")]
        depth: usize,
    },

    /// Apply a moderator action
    Moderate {
        /// Submission id or URL
        reference: String,

        #[command(subcommand)]
        action: ModerateAction,
    },
}

impl App {
    /// Run the CLI application.
    pub async fn run(self) -> Result<()> {
        match &self.command {
            Command::Show { reference, all } => self.run_show(reference, *all).await,
            Command::Resolve { url } => self.run_resolve(url),
            Command::Comments {
                reference,
                limit,
                sort,
                depth,
            } => {
                self.run_comments(reference, *limit, sort.as_deref(), *depth)
                    .await
            }
            Command::Moderate { reference, action } => {
                self.run_moderate(reference, action).await
            }
        }
    }

    /// Opens a lazy submission from an id or URL.
    ///
    /// With `--replay` the returned transport handle records every request
    /// so callers can report what would have been sent.
    fn open(&self, reference: &str) -> Result<(Submission, Option<Arc<MemoryTransport>>)> {
        let config = Config::load()?;
        let id = if reference.contains("://") {
            id_from_url(reference)?
        } else {
            SubmissionId::new(reference)
        };

        let (ctx, replay) = match &self.replay {
            Some(file) => {
                let transport = MemoryTransport::new()
                    .with_reply_file(&endpoints::submission(id.as_str()), file)?;
                for path in WRITE_ENDPOINTS {
                    transport.reply(Method::Post, path, serde_json::json!({}));
                }
                tracing::info!(file = %file.display(), "Replaying recorded reply");
                let transport = Arc::new(transport);
                (Context::new(transport.clone(), config), Some(transport))
            }
            None => (Context::connect(config)?, None),
        };

        Ok((ctx.submission(id.as_str())?, replay))
    }
}

/// Writes accepted without a network in replay mode.
const WRITE_ENDPOINTS: &[&str] = &[
    endpoints::CONTEST_MODE,
    endpoints::MARK_NSFW,
    endpoints::UNMARK_NSFW,
    endpoints::STICKY_SUBMISSION,
    endpoints::SUGGESTED_SORT,
    endpoints::HIDE,
    endpoints::UNHIDE,
];
