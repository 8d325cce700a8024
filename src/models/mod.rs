//! Object model: the lazy submission and the records it refers to.

mod comment;
mod comment_forest;
pub mod interceptor;
mod kind;
mod redditor;
mod submission;
mod subreddit;
mod value;

pub use comment::{Comment, MoreComments};
pub use comment_forest::CommentForest;
pub use kind::{split_fullname, Kind};
pub use redditor::Redditor;
pub use submission::{
    id_from_url, FetchState, Submission, SubmissionBuilder, SubmissionFlair, SubmissionId,
    SubmissionModeration,
};
pub use subreddit::Subreddit;
pub use value::AttrValue;
