//! Submission repository: the comment-page fetch and one-shot writes.

use crate::api_request;
use crate::context::{AppTransport, Context};
use crate::di::FromContext;
use crate::error::AppError;
use crate::models::{Kind, Submission};
use crate::transport::{endpoints, RequestExt};

/// Repository for remote submission operations.
#[derive(FromContext, Clone)]
pub struct SubmissionRepository {
    transport: AppTransport,
}

impl SubmissionRepository {
    /// Loads the comment page of `submission` and merges it in.
    ///
    /// The request carries the submission's current `comment_limit` and
    /// `comment_sort`. The reply's first listing must hold exactly one
    /// submission record; its fields are merged through the interceptor.
    /// The second listing is merged into the submission's existing comment
    /// forest. Comments are merged before fields, so a malformed comment
    /// listing leaves the attributes untouched.
    ///
    /// Does not touch the fetch state; [`Submission::fetch`] owns that.
    pub async fn fetch(&self, submission: &Submission) -> Result<(), AppError> {
        let path = endpoints::submission(submission.id().as_str());

        let mut request = self.transport.request(&path);
        for (param, attribute) in [("limit", "comment_limit"), ("sort", "comment_sort")] {
            if let Some(value) = submission.cached(attribute) {
                request = request.param_raw(param, value.to_json());
            }
        }
        let (primary, secondary) = request.fetch_listings().await?;

        let record = primary.into_single(&path)?;
        if record.kind != Kind::Submission.prefix() {
            return Err(AppError::malformed(
                &path,
                format!("expected a submission record, got kind '{}'", record.kind),
            ));
        }

        let forest = submission.comment_forest();
        let merged = forest.update(secondary.children)?;

        let mut fields = record.into_data();
        fields.remove("comments");
        let field_count = fields.len();
        submission.merge(fields, forest);

        tracing::info!(
            submission = %submission.id(),
            fields = field_count,
            comments = merged,
            "Fetched submission"
        );
        Ok(())
    }

    /// Hides `submission` for the authenticated user.
    pub async fn hide(&self, submission: &Submission) -> Result<(), AppError> {
        api_request!(self.transport, endpoints::HIDE, id = submission.fullname())
            .post()
            .await?;
        tracing::debug!(submission = %submission.id(), "Hid submission");
        Ok(())
    }

    pub async fn unhide(&self, submission: &Submission) -> Result<(), AppError> {
        api_request!(self.transport, endpoints::UNHIDE, id = submission.fullname())
            .post()
            .await?;
        tracing::debug!(submission = %submission.id(), "Unhid submission");
        Ok(())
    }
}
