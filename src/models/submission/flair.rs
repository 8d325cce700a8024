//! Flair controls.

use serde_json::Value as JsonValue;

use crate::api_request;
use crate::error::AppError;
use crate::models::AttrValue;
use crate::transport::endpoints;

use super::Submission;

/// Flair operations on a borrowed submission. Never fetches.
#[derive(Debug, Clone, Copy)]
pub struct SubmissionFlair<'a> {
    submission: &'a Submission,
}

impl<'a> SubmissionFlair<'a> {
    pub(crate) fn new(submission: &'a Submission) -> Self {
        Self { submission }
    }

    pub fn submission(&self) -> &'a Submission {
        self.submission
    }

    /// Returns the flair templates available for this submission.
    ///
    /// Uses the subreddit-scoped endpoint when the subreddit is already
    /// known, and the site-wide one otherwise.
    pub async fn choices(&self) -> Result<Vec<JsonValue>, AppError> {
        let path = match self.submission.cached("subreddit") {
            Some(AttrValue::Subreddit(subreddit)) => {
                endpoints::flair_selector(subreddit.display_name())
            }
            _ => endpoints::FLAIR_SELECTOR.to_string(),
        };

        let reply = api_request!(
            self.submission.context().transport,
            &path,
            link = self.submission.fullname()
        )
        .post()
        .await?;

        match reply.get("choices") {
            Some(JsonValue::Array(choices)) => Ok(choices.clone()),
            _ => Err(AppError::malformed(&path, "flair selector reply without 'choices'")),
        }
    }

    /// Applies a flair template, optionally with custom text.
    pub async fn select(
        &self,
        template_id: &str,
        text: Option<&str>,
    ) -> Result<JsonValue, AppError> {
        let path = match self.submission.cached("subreddit") {
            Some(AttrValue::Subreddit(subreddit)) => {
                endpoints::select_flair(subreddit.display_name())
            }
            _ => endpoints::SELECT_FLAIR.to_string(),
        };

        let mut request = api_request!(
            self.submission.context().transport,
            &path,
            link = self.submission.fullname(),
            flair_template_id = template_id
        );
        if let Some(text) = text {
            request = request.param("text", text);
        }
        request.post().await
    }
}
