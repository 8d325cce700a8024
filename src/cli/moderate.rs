//! Moderate command handler.

use clap::Subcommand;
use color_eyre::Result;
use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::models::SubmissionModeration;

use super::App;

/// Moderator actions on a submission.
#[derive(Subcommand, Debug, Clone)]
pub enum ModerateAction {
    /// Turn contest mode on (or off with --off)
    ContestMode {
        #[arg(long)]
        off: bool,
    },

    /// Mark as not safe for work
    Nsfw,

    /// Mark as safe for work
    Sfw,

    /// Sticky the submission in the bottom slot (or unsticky with --off)
    Sticky {
        /// Use the top sticky slot
        #[arg(long)]
        top: bool,

        #[arg(long)]
        off: bool,
    },

    /// Set the suggested comment sort ("blank" clears it)
    SuggestedSort {
        #[arg(default_value = "blank")]
        sort: String,
    },
}

impl App {
    /// Apply a moderator action. Never fetches the submission.
    pub async fn run_moderate(&self, reference: &str, action: &ModerateAction) -> Result<()> {
        let (submission, replay) = self.open(reference)?;
        let reply = apply(&submission.moderation(), action).await?;

        if let Some(transport) = replay {
            for request in transport.requests() {
                tracing::info!(
                    method = %request.method,
                    path = %request.path,
                    params = ?request.params,
                    "Replay: request not sent"
                );
            }
        }

        println!("{}", serde_json::to_string_pretty(&reply)?);
        Ok(())
    }
}


async fn apply(
    moderation: &SubmissionModeration<'_>,
    action: &ModerateAction,
) -> Result<JsonValue, AppError> {
    match action {
        ModerateAction::ContestMode { off } => moderation.contest_mode(!off).await,
        ModerateAction::Nsfw => moderation.nsfw().await,
        ModerateAction::Sfw => moderation.sfw().await,
        ModerateAction::Sticky { top, off } => moderation.sticky(!off, !top).await,
        ModerateAction::SuggestedSort { sort } => moderation.suggested_sort(sort).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cli::Command;
    use crate::config::Config;
    use crate::context::Context;
    use crate::transport::backends::{MemoryTransport, Method};
    use crate::transport::endpoints;
    use clap::Parser;
    use serde_json::json;
    use std::sync::Arc;

    fn parse(args: &[&str]) -> ModerateAction {
        let argv = ["snoolink", "moderate", "2gmzqe"].into_iter().chain(args.iter().copied());
        match App::try_parse_from(argv).unwrap().command {
            Command::Moderate { action, .. } => action,
            _ => panic!("expected the moderate command"),
        }
    }

    #[test]
    fn test_sticky_parses_top_flag() {
        assert!(matches!(
            parse(&["sticky"]),
            ModerateAction::Sticky { top: false, off: false }
        ));
        assert!(matches!(
            parse(&["sticky", "--top", "--off"]),
            ModerateAction::Sticky { top: true, off: true }
        ));
    }

    #[test]
    fn test_suggested_sort_defaults_to_blank() {
        match parse(&["suggested-sort"]) {
            ModerateAction::SuggestedSort { sort } => assert_eq!(sort, "blank"),
            other => panic!("unexpected action {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_plain_sticky_uses_bottom_slot() {
        let transport = Arc::new(MemoryTransport::new());
        transport.reply(Method::Post, endpoints::STICKY_SUBMISSION, json!({}));
        let ctx = Context::new(transport.clone(), Config::default());
        let submission = ctx.submission("2gmzqe").unwrap();

        apply(&submission.moderation(), &parse(&["sticky"])).await.unwrap();
        apply(&submission.moderation(), &parse(&["sticky", "--top"])).await.unwrap();

        let requests = transport.requests();
        assert_eq!(requests[0].params.get("num"), None);
        assert_eq!(requests[0].params["state"], json!(true));
        assert_eq!(requests[1].params.get("num"), Some(&json!(1)));
    }
}
