//! Lazily materialized submissions.
//!
//! A [`Submission`] starts out knowing little more than its id. Reading an
//! attribute that is not cached triggers a single fetch of the comment page,
//! which fills in every field and merges the comment tree. Concurrent
//! readers share that one fetch.

mod flair;
mod link;
mod moderation;

use std::collections::HashMap;
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use chrono::{DateTime, Utc};
use serde::de::DeserializeOwned;
use serde_json::{json, Value as JsonValue};

use crate::context::Context;
use crate::di::FromRef;
use crate::error::AppError;
use crate::repositories::SubmissionRepository;
use crate::transport::Fields;

use super::interceptor::intercept;
use super::{AttrValue, CommentForest, Kind, Redditor, Subreddit};

pub use flair::SubmissionFlair;
pub use link::id_from_url;
pub use moderation::SubmissionModeration;

/// Short id of a submission, e.g. `2gmzqe`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SubmissionId(String);

impl SubmissionId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SubmissionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl AsRef<str> for SubmissionId {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

/// Where a submission is in its one-time fetch.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FetchState {
    Unfetched,
    Fetching,
    Fetched,
}

#[derive(Debug)]
struct EntityState {
    attributes: HashMap<String, AttrValue>,
    /// Forest handed out before the fetch; published as `comments` by it.
    forest: Option<CommentForest>,
    fetch: FetchState,
}

/// A link or text post.
///
/// Equality and hashing use the id only.
pub struct Submission {
    id: SubmissionId,
    ctx: Context,
    state: RwLock<EntityState>,
    /// Serializes fetches; the attribute lock is never held across a request.
    fetch_gate: tokio::sync::Mutex<()>,
}

impl Submission {
    /// Starts building a submission bound to `ctx`.
    pub fn builder(ctx: &Context) -> SubmissionBuilder<'_> {
        SubmissionBuilder {
            ctx,
            id: None,
            url: None,
            data: None,
        }
    }

    pub fn id(&self) -> &SubmissionId {
        &self.id
    }

    /// Returns the fullname (`t3_<id>`).
    pub fn fullname(&self) -> String {
        Kind::Submission.fullname(self.id.as_str())
    }

    /// Returns the short link, built from the configured short-link base.
    pub fn shortlink(&self) -> String {
        format!(
            "{}/{}",
            self.ctx.config.reddit.short_url.trim_end_matches('/'),
            self.id
        )
    }

    pub fn context(&self) -> &Context {
        &self.ctx
    }

    // ------------------------------------------------------------------
    // Reads
    // ------------------------------------------------------------------

    /// Returns a cached attribute without fetching.
    pub fn cached(&self, name: &str) -> Option<AttrValue> {
        self.read_state().attributes.get(name).cloned()
    }

    /// Returns an attribute, fetching the submission on a miss.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::AttributeNotFound`] if the attribute is still
    /// absent once the submission has been fetched, or the fetch error.
    pub async fn attr(&self, name: &str) -> Result<AttrValue, AppError> {
        if let Some(value) = self.cached(name) {
            return Ok(value);
        }
        if !self.is_fetched() {
            self.fetch().await?;
            if let Some(value) = self.cached(name) {
                return Ok(value);
            }
        }
        Err(AppError::AttributeNotFound {
            name: name.to_string(),
        })
    }

    /// Reads an attribute and deserializes its JSON form into `T`.
    pub async fn get<T: DeserializeOwned>(&self, name: &str) -> Result<T, AppError> {
        let value = self.attr(name).await?;
        serde_json::from_value(value.to_json()).map_err(|e| AppError::AttributeType {
            name: name.to_string(),
            reason: e.to_string(),
        })
    }

    pub async fn title(&self) -> Result<String, AppError> {
        self.get("title").await
    }

    /// Returns the author, or `None` when the account was deleted.
    pub async fn author(&self) -> Result<Option<Redditor>, AppError> {
        match self.attr("author").await? {
            AttrValue::Author(redditor) => Ok(Some(redditor)),
            AttrValue::Raw(JsonValue::Null) => Ok(None),
            other => Err(unexpected("author", &other)),
        }
    }

    pub async fn subreddit(&self) -> Result<Subreddit, AppError> {
        match self.attr("subreddit").await? {
            AttrValue::Subreddit(subreddit) => Ok(subreddit),
            other => Err(unexpected("subreddit", &other)),
        }
    }

    /// Returns the comment forest, fetching first if needed.
    pub async fn comments(&self) -> Result<CommentForest, AppError> {
        self.fetch().await?;
        Ok(self.comment_forest())
    }

    /// Returns the comment forest without fetching.
    ///
    /// The forest is created empty on first use and is the same handle the
    /// fetch later fills in. It is not visible as the `comments` attribute
    /// until the fetch publishes it.
    pub fn comment_forest(&self) -> CommentForest {
        let mut state = self.write_state();
        if let Some(forest) = &state.forest {
            return forest.clone();
        }
        let forest = match state.attributes.get("comments") {
            Some(AttrValue::Comments(forest)) => forest.clone(),
            _ => CommentForest::new(self.id.as_str()),
        };
        state.forest = Some(forest.clone());
        forest
    }

    pub async fn num_comments(&self) -> Result<u64, AppError> {
        self.get("num_comments").await
    }

    pub async fn score(&self) -> Result<i64, AppError> {
        self.get("score").await
    }

    /// Creation time, from `created_utc`.
    pub async fn created(&self) -> Result<DateTime<Utc>, AppError> {
        let secs: f64 = self.get("created_utc").await?;
        DateTime::from_timestamp(secs as i64, 0).ok_or_else(|| AppError::AttributeType {
            name: "created_utc".to_string(),
            reason: format!("timestamp {} out of range", secs),
        })
    }

    /// Names of all cached attributes, sorted.
    pub fn attribute_names(&self) -> Vec<String> {
        let mut names: Vec<String> = self.read_state().attributes.keys().cloned().collect();
        names.sort();
        names
    }

    // ------------------------------------------------------------------
    // Writes
    // ------------------------------------------------------------------

    /// Stores an attribute. Typed fields are converted on the way in.
    pub fn set_attr(&self, name: &str, value: impl Into<AttrValue>) {
        write(&mut self.write_state().attributes, name, value.into());
    }

    /// Sets how many comments the next fetch requests.
    pub fn set_comment_limit(&self, limit: u32) {
        self.set_attr("comment_limit", json!(limit));
    }

    /// Sets the comment order the next fetch requests.
    pub fn set_comment_sort(&self, sort: &str) {
        self.set_attr("comment_sort", sort);
    }

    /// Stores every field of a fetched record under one lock, then
    /// publishes the comment forest as `comments`.
    pub(crate) fn merge(&self, fields: Fields, forest: CommentForest) {
        let mut state = self.write_state();
        for (name, value) in fields {
            write(&mut state.attributes, &name, value.into());
        }
        write(&mut state.attributes, "comments", forest.into());
    }

    // ------------------------------------------------------------------
    // Fetch
    // ------------------------------------------------------------------

    /// Fetches the submission once.
    ///
    /// Later calls return immediately. Concurrent callers wait for the
    /// in-flight fetch and then observe its result; if it failed, the next
    /// caller retries.
    pub async fn fetch(&self) -> Result<(), AppError> {
        if self.is_fetched() {
            return Ok(());
        }
        let _gate = self.fetch_gate.lock().await;
        if self.is_fetched() {
            return Ok(());
        }

        self.set_fetch_state(FetchState::Fetching);
        // Reverts to Unfetched on error or if this future is dropped mid-request.
        let mut in_flight = InFlight {
            submission: self,
            completed: false,
        };

        let repository = SubmissionRepository::from_ref(&self.ctx);
        match repository.fetch(self).await {
            Ok(()) => {
                self.set_fetch_state(FetchState::Fetched);
                in_flight.completed = true;
                Ok(())
            }
            Err(e) => {
                tracing::debug!(submission = %self.id, error = %e, "Fetch failed");
                Err(e)
            }
        }
    }

    pub fn fetch_state(&self) -> FetchState {
        self.read_state().fetch
    }

    pub fn is_fetched(&self) -> bool {
        self.fetch_state() == FetchState::Fetched
    }

    fn set_fetch_state(&self, fetch: FetchState) {
        self.write_state().fetch = fetch;
    }

    // ------------------------------------------------------------------
    // Companions and one-shot actions
    // ------------------------------------------------------------------

    /// Flair controls for this submission.
    pub fn flair(&self) -> SubmissionFlair<'_> {
        SubmissionFlair::new(self)
    }

    /// Moderator controls for this submission.
    pub fn moderation(&self) -> SubmissionModeration<'_> {
        SubmissionModeration::new(self)
    }

    /// Hides the submission from the authenticated user's listings.
    pub async fn hide(&self) -> Result<(), AppError> {
        SubmissionRepository::from_ref(&self.ctx).hide(self).await
    }

    pub async fn unhide(&self) -> Result<(), AppError> {
        SubmissionRepository::from_ref(&self.ctx).unhide(self).await
    }

    fn read_state(&self) -> RwLockReadGuard<'_, EntityState> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, EntityState> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

struct InFlight<'a> {
    submission: &'a Submission,
    completed: bool,
}

impl Drop for InFlight<'_> {
    fn drop(&mut self) {
        if !self.completed {
            self.submission.set_fetch_state(FetchState::Unfetched);
        }
    }
}

fn unexpected(name: &str, value: &AttrValue) -> AppError {
    AppError::AttributeType {
        name: name.to_string(),
        reason: format!("unexpected value {}", value.to_json()),
    }
}

impl PartialEq for Submission {
    fn eq(&self, other: &Self) -> bool {
        self.id == other.id
    }
}

impl Eq for Submission {}

impl Hash for Submission {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.id.hash(state);
    }
}

impl fmt::Display for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.id.as_str())
    }
}

impl fmt::Debug for Submission {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let state = self.read_state();
        f.debug_struct("Submission")
            .field("id", &self.id)
            .field("fetch", &state.fetch)
            .field("attributes", &state.attributes.len())
            .finish()
    }
}

/// Builder for [`Submission`]. Exactly one of id, URL or data is required.
pub struct SubmissionBuilder<'a> {
    ctx: &'a Context,
    id: Option<String>,
    url: Option<String>,
    data: Option<Fields>,
}

impl<'a> SubmissionBuilder<'a> {
    pub fn id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Takes the id from a comment-page or short link.
    pub fn url(mut self, url: impl Into<String>) -> Self {
        self.url = Some(url.into());
        self
    }

    /// Seeds the attributes from a record already in hand. The record must
    /// carry an `id` string.
    pub fn data(mut self, data: Fields) -> Self {
        self.data = Some(data);
        self
    }

    /// Builds the submission without any request.
    ///
    /// Comment defaults from the configuration are stored first, so seeded
    /// data may override them.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::InvalidArgument`] unless exactly one non-empty
    /// input was given, and [`AppError::InvalidReference`] for a URL without
    /// an id.
    pub fn build(self) -> Result<Submission, AppError> {
        let id = self.id.filter(|id| !id.is_empty());
        let url = self.url.filter(|url| !url.is_empty());
        let data = self.data.filter(|data| !data.is_empty());

        let defaults = &self.ctx.config.submission;
        let mut attributes = HashMap::new();
        write(&mut attributes, "comment_limit", json!(defaults.comment_limit).into());
        write(&mut attributes, "comment_sort", defaults.comment_sort.as_str().into());

        let id = match (id, url, data) {
            (Some(id), None, None) => SubmissionId::new(id),
            (None, Some(url), None) => id_from_url(&url)?,
            (None, None, Some(data)) => {
                let id = data
                    .get("id")
                    .and_then(JsonValue::as_str)
                    .filter(|id| !id.is_empty())
                    .map(SubmissionId::new)
                    .ok_or_else(|| {
                        AppError::InvalidArgument("submission data has no 'id'".to_string())
                    })?;
                for (name, value) in data {
                    write(&mut attributes, &name, value.into());
                }
                id
            }
            _ => {
                return Err(AppError::InvalidArgument(
                    "exactly one of id, url or data is required".to_string(),
                ))
            }
        };
        write(&mut attributes, "id", id.as_str().into());

        Ok(Submission {
            id,
            ctx: self.ctx.clone(),
            state: RwLock::new(EntityState {
                attributes,
                forest: None,
                fetch: FetchState::Unfetched,
            }),
            fetch_gate: tokio::sync::Mutex::new(()),
        })
    }
}

/// The single write path for attributes: every value passes the interceptor.
fn write(attributes: &mut HashMap<String, AttrValue>, name: &str, value: AttrValue) {
    attributes.insert(name.to_string(), intercept(name, value));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;
    use crate::transport::backends::{MemoryTransport, Method};
    use std::collections::HashSet;
    use std::sync::Arc;
    use std::time::Duration;

    fn context() -> (Arc<MemoryTransport>, Context) {
        let transport = Arc::new(MemoryTransport::new());
        let ctx = Context::new(transport.clone(), Config::default());
        (transport, ctx)
    }

    fn page(fields: JsonValue) -> JsonValue {
        json!([
            {"kind": "Listing", "data": {"children": [{"kind": "t3", "data": fields}]}},
            {"kind": "Listing", "data": {"children": []}}
        ])
    }

    fn fields(value: JsonValue) -> Fields {
        match value {
            JsonValue::Object(map) => map,
            _ => panic!("expected an object"),
        }
    }

    #[test]
    fn test_requires_exactly_one_input() {
        let (_, ctx) = context();
        for builder in [
            Submission::builder(&ctx),
            Submission::builder(&ctx).id("abc").url("https://redd.it/abc"),
            Submission::builder(&ctx).id("").url(""),
        ] {
            assert!(matches!(builder.build(), Err(AppError::InvalidArgument(_))));
        }
    }

    #[test]
    fn test_defaults_are_written() {
        let (transport, ctx) = context();
        let submission = ctx.submission("abc").unwrap();

        assert_eq!(submission.cached("comment_limit"), Some(json!(2048).into()));
        assert_eq!(submission.cached("comment_sort"), Some("best".into()));
        assert_eq!(submission.cached("id"), Some("abc".into()));
        assert_eq!(submission.fetch_state(), FetchState::Unfetched);
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_data_construction_types_fields() {
        let (transport, ctx) = context();
        let submission = Submission::builder(&ctx)
            .data(fields(json!({"id": "abc", "author": "bboe", "subreddit": "redditdev"})))
            .build()
            .unwrap();

        assert_eq!(submission.id().as_str(), "abc");
        assert_eq!(
            submission.cached("author").unwrap().as_author(),
            Some(&Redditor::new("bboe"))
        );
        assert_eq!(
            submission.cached("subreddit").unwrap().as_subreddit(),
            Some(&Subreddit::new("redditdev"))
        );
        assert!(!submission.is_fetched());
        assert!(transport.requests().is_empty());
    }

    #[test]
    fn test_data_without_id_is_rejected() {
        let (_, ctx) = context();
        let err = Submission::builder(&ctx)
            .data(fields(json!({"title": "x"})))
            .build()
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidArgument(_)));
    }

    #[test]
    fn test_equality_and_hash_use_id() {
        let (_, ctx) = context();
        let a = ctx.submission("abc").unwrap();
        let b = ctx.submission("abc").unwrap();
        b.set_attr("title", "different");

        assert_eq!(a, b);
        let set: HashSet<_> = [a, b].into_iter().collect();
        assert_eq!(set.len(), 1);
    }

    #[test]
    fn test_fullname_and_shortlink() {
        let (_, ctx) = context();
        let submission = ctx.submission("2gmzqe").unwrap();
        assert_eq!(submission.fullname(), "t3_2gmzqe");
        assert_eq!(submission.shortlink(), "https://redd.it/2gmzqe");
    }

    #[tokio::test]
    async fn test_cached_attribute_does_not_fetch() {
        let (transport, ctx) = context();
        let submission = ctx.submission("abc").unwrap();
        submission.set_attr("title", "local");

        assert_eq!(submission.title().await.unwrap(), "local");
        assert!(transport.requests().is_empty());
    }

    #[tokio::test]
    async fn test_miss_fetches_then_reports_absent() {
        let (transport, ctx) = context();
        transport.reply(
            Method::Get,
            "comments/abc/",
            page(json!({"id": "abc", "title": "Hello", "author": "bboe"})),
        );
        let submission = ctx.submission("abc").unwrap();

        assert_eq!(submission.title().await.unwrap(), "Hello");
        assert!(submission.is_fetched());

        let err = submission.attr("selftext").await.unwrap_err();
        assert!(matches!(err, AppError::AttributeNotFound { name } if name == "selftext"));
        assert_eq!(transport.count(Method::Get, "comments/abc/"), 1);
    }

    #[tokio::test]
    async fn test_deleted_author_is_none() {
        let (transport, ctx) = context();
        transport.reply(
            Method::Get,
            "comments/abc/",
            page(json!({"id": "abc", "author": "[deleted]"})),
        );
        let submission = ctx.submission("abc").unwrap();
        assert_eq!(submission.author().await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_type_mismatch_is_reported() {
        let (_, ctx) = context();
        let submission = ctx.submission("abc").unwrap();
        submission.set_attr("num_comments", "many");

        let err = submission.num_comments().await.unwrap_err();
        assert!(matches!(err, AppError::AttributeType { name, .. } if name == "num_comments"));
    }

    #[test]
    fn test_comment_forest_is_created_once() {
        let (_, ctx) = context();
        let submission = ctx.submission("abc").unwrap();
        assert_eq!(submission.comment_forest(), submission.comment_forest());
        assert!(submission.cached("comments").is_none());
    }

    #[tokio::test]
    async fn test_comments_attribute_fetches_after_early_forest() {
        let (transport, ctx) = context();
        transport.reply(
            Method::Get,
            "comments/abc/",
            json!([
                {"kind": "Listing", "data": {"children": [{"kind": "t3", "data": {"id": "abc"}}]}},
                {"kind": "Listing", "data": {"children": [
                    {"kind": "t1", "data": {"id": "c1", "parent_id": "t3_abc"}}
                ]}}
            ]),
        );
        let submission = ctx.submission("abc").unwrap();
        let early = submission.comment_forest();

        let value = submission.attr("comments").await.unwrap();
        assert_eq!(transport.count(Method::Get, "comments/abc/"), 1);
        assert!(submission.is_fetched());
        assert_eq!(value.as_comments(), Some(&early));
        assert_eq!(early.len(), 1);
    }

    #[test]
    fn test_every_write_path_types_author() {
        let (_, ctx) = context();
        let seeded = Submission::builder(&ctx)
            .data(fields(json!({"id": "abc", "author": "bboe"})))
            .build()
            .unwrap();
        let merged = ctx.submission("abc").unwrap();
        merged.merge(fields(json!({"author": "bboe"})), merged.comment_forest());
        let set = ctx.submission("abc").unwrap();
        set.set_attr("author", "bboe");

        let expected = Some(AttrValue::Author(Redditor::new("bboe")));
        for submission in [&seeded, &merged, &set] {
            assert_eq!(submission.cached("author"), expected);
        }
    }

    #[tokio::test]
    async fn test_dropped_fetch_reverts_state() {
        let transport = Arc::new(MemoryTransport::new().with_latency(Duration::from_millis(200)));
        transport.reply(Method::Get, "comments/abc/", page(json!({"id": "abc", "title": "t"})));
        let ctx = Context::new(transport.clone(), Config::default());
        let submission = ctx.submission("abc").unwrap();

        let read = tokio::time::timeout(Duration::from_millis(10), submission.title()).await;
        assert!(read.is_err());
        assert_eq!(submission.fetch_state(), FetchState::Unfetched);

        assert_eq!(submission.title().await.unwrap(), "t");
        assert_eq!(submission.fetch_state(), FetchState::Fetched);
    }
}
