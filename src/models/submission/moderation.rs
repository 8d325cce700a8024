//! Moderator controls.

use serde_json::Value as JsonValue;

use crate::api_request;
use crate::error::AppError;
use crate::transport::endpoints;

use super::Submission;

/// Moderation operations on a borrowed submission.
///
/// Every call is a single write keyed by the submission's fullname; the
/// submission's cached attributes are neither read nor updated.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionModeration<'a> {
    submission: &'a Submission,
}

impl<'a> SubmissionModeration<'a> {
    pub(crate) fn new(submission: &'a Submission) -> Self {
        Self { submission }
    }

    pub fn submission(&self) -> &'a Submission {
        self.submission
    }

    /// Turns contest mode on or off.
    pub async fn contest_mode(&self, state: bool) -> Result<JsonValue, AppError> {
        api_request!(
            self.submission.context().transport,
            endpoints::CONTEST_MODE,
            id = self.submission.fullname(),
            state = state
        )
        .post()
        .await
    }

    /// Marks the submission not safe for work.
    pub async fn nsfw(&self) -> Result<JsonValue, AppError> {
        api_request!(
            self.submission.context().transport,
            endpoints::MARK_NSFW,
            id = self.submission.fullname()
        )
        .post()
        .await
    }

    /// Marks the submission safe for work.
    pub async fn sfw(&self) -> Result<JsonValue, AppError> {
        api_request!(
            self.submission.context().transport,
            endpoints::UNMARK_NSFW,
            id = self.submission.fullname()
        )
        .post()
        .await
    }

    /// Stickies or unstickies the submission.
    ///
    /// With `bottom` false the submission takes the top slot (`num=1`);
    /// otherwise the server places it in the bottom slot.
    pub async fn sticky(&self, state: bool, bottom: bool) -> Result<JsonValue, AppError> {
        let mut request = api_request!(
            self.submission.context().transport,
            endpoints::STICKY_SUBMISSION,
            id = self.submission.fullname(),
            state = state
        );
        if !bottom {
            request = request.param("num", 1);
        }
        request.post().await
    }

    /// Sets the suggested comment sort. `"blank"` clears it.
    pub async fn suggested_sort(&self, sort: &str) -> Result<JsonValue, AppError> {
        api_request!(
            self.submission.context().transport,
            endpoints::SUGGESTED_SORT,
            id = self.submission.fullname(),
            sort = sort
        )
        .post()
        .await
    }
}

#[cfg(test)]
mod tests {
    use crate::config::Config;
    use crate::context::Context;
    use crate::transport::backends::{MemoryTransport, Method};
    use crate::transport::Params;
    use serde_json::json;
    use std::sync::Arc;

    fn context() -> (Arc<MemoryTransport>, Context) {
        let transport = Arc::new(MemoryTransport::new());
        for path in [
            "api/set_contest_mode/",
            "api/marknsfw/",
            "api/unmarknsfw/",
            "api/set_subreddit_sticky/",
            "api/set_suggested_sort/",
        ] {
            transport.reply(Method::Post, path, json!({}));
        }
        let ctx = Context::new(transport.clone(), Config::default());
        (transport, ctx)
    }

    fn last_params(transport: &MemoryTransport) -> Params {
        transport.requests().pop().unwrap().params
    }

    #[tokio::test]
    async fn test_contest_mode() {
        let (transport, ctx) = context();
        let submission = ctx.submission("abc").unwrap();
        submission.moderation().contest_mode(true).await.unwrap();

        let params = last_params(&transport);
        assert_eq!(params["id"], json!("t3_abc"));
        assert_eq!(params["state"], json!(true));
        assert!(!submission.is_fetched());
    }

    #[tokio::test]
    async fn test_nsfw_and_sfw() {
        let (transport, ctx) = context();
        let submission = ctx.submission("abc").unwrap();
        submission.moderation().nsfw().await.unwrap();
        submission.moderation().sfw().await.unwrap();

        assert_eq!(transport.count(Method::Post, "api/marknsfw/"), 1);
        assert_eq!(transport.count(Method::Post, "api/unmarknsfw/"), 1);
        assert_eq!(last_params(&transport)["id"], json!("t3_abc"));
    }

    #[tokio::test]
    async fn test_sticky_top_sends_num() {
        let (transport, ctx) = context();
        let submission = ctx.submission("abc").unwrap();
        submission.moderation().sticky(true, false).await.unwrap();

        let params = last_params(&transport);
        assert_eq!(params["num"], json!(1));
        assert_eq!(params["state"], json!(true));
    }

    #[tokio::test]
    async fn test_sticky_bottom_omits_num() {
        let (transport, ctx) = context();
        let submission = ctx.submission("abc").unwrap();
        submission.moderation().sticky(true, true).await.unwrap();

        assert!(!last_params(&transport).contains_key("num"));
    }

    #[tokio::test]
    async fn test_suggested_sort_passes_value_through() {
        let (transport, ctx) = context();
        let submission = ctx.submission("abc").unwrap();
        submission.moderation().suggested_sort("blank").await.unwrap();

        assert_eq!(last_params(&transport)["sort"], json!("blank"));
    }
}
