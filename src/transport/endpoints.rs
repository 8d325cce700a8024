//! API paths used by the object model.

/// Comment page of a submission: primary record plus its comment listing.
pub fn submission(id: &str) -> String {
    format!("comments/{}/", id)
}

/// Flair choices scoped to a subreddit.
pub fn flair_selector(subreddit: &str) -> String {
    format!("r/{}/api/flairselector/", subreddit)
}

/// Flair choices resolved server-side from the `link` parameter.
pub const FLAIR_SELECTOR: &str = "api/flairselector/";

/// Flair assignment scoped to a subreddit.
pub fn select_flair(subreddit: &str) -> String {
    format!("r/{}/api/selectflair/", subreddit)
}

pub const SELECT_FLAIR: &str = "api/selectflair/";

pub const HIDE: &str = "api/hide/";
pub const UNHIDE: &str = "api/unhide/";
pub const CONTEST_MODE: &str = "api/set_contest_mode/";
pub const MARK_NSFW: &str = "api/marknsfw/";
pub const UNMARK_NSFW: &str = "api/unmarknsfw/";
pub const STICKY_SUBMISSION: &str = "api/set_subreddit_sticky/";
pub const SUGGESTED_SORT: &str = "api/set_suggested_sort/";

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_formatted_paths() {
        assert_eq!(submission("2gmzqe"), "comments/2gmzqe/");
        assert_eq!(flair_selector("redditdev"), "r/redditdev/api/flairselector/");
        assert_eq!(select_flair("redditdev"), "r/redditdev/api/selectflair/");
    }
}
