//! Submission ids from URLs.

use ::url::Url;

use crate::error::AppError;

use super::SubmissionId;

/// Extracts the submission id from a link.
///
/// Accepts both comment-page links
/// (`https://www.reddit.com/r/redditdev/comments/2gmzqe/praw_https/`) and
/// short links (`https://redd.it/2gmzqe`). The id is the path segment that
/// follows `comments`, or the last segment when there is none.
///
/// # Errors
///
/// Returns [`AppError::InvalidReference`] if the URL does not parse, has no
/// host, or the derived segment is empty or not alphanumeric.
pub fn id_from_url(url: &str) -> Result<SubmissionId, AppError> {
    let invalid = || AppError::InvalidReference {
        url: url.to_string(),
    };

    let parsed = Url::parse(url).map_err(|_| invalid())?;
    if parsed.host_str().map_or(true, str::is_empty) {
        return Err(invalid());
    }

    let segments: Vec<&str> = parsed.path().split('/').collect();
    let candidate = match segments.iter().position(|s| *s == "comments") {
        Some(index) => segments.get(index + 1).copied(),
        None => segments.last().copied(),
    }
    .unwrap_or_default();

    if candidate.is_empty() || !candidate.chars().all(|c| c.is_ascii_alphanumeric()) {
        return Err(invalid());
    }
    Ok(SubmissionId::new(candidate))
}
