//! Comment tree of a submission.
//!
//! The forest is an index keyed by comment id. Merging new items inserts or
//! replaces by key and never clears the index, so comments attached earlier
//! (by a previous merge or programmatically) survive later merges. The
//! forest is a shared handle: clones see the same index, and a reference
//! taken before a fetch observes the fetched comments.

use std::collections::{HashMap, VecDeque};
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use serde_json::Value as JsonValue;

use crate::error::AppError;
use crate::transport::{endpoints, Thing};

use super::{Comment, Kind, MoreComments};

#[derive(Debug, Default)]
struct ForestIndex {
    comments: HashMap<String, Comment>,
    /// Ids of comments replying directly to the submission, in arrival order.
    top_level: Vec<String>,
    /// Reply ids per parent comment id, in arrival order.
    children: HashMap<String, Vec<String>>,
    more: Vec<MoreComments>,
}

/// Hierarchical comments rooted at a submission.
#[derive(Debug, Clone)]
pub struct CommentForest {
    submission_id: Arc<str>,
    inner: Arc<RwLock<ForestIndex>>,
}

/// Items decoded from a reply, flattened depth-first.
enum ForestItem {
    Comment(Comment),
    More(MoreComments),
}

impl CommentForest {
    /// Creates an empty forest for the submission with short id `submission_id`.
    pub fn new(submission_id: &str) -> Self {
        Self {
            submission_id: Arc::from(submission_id),
            inner: Arc::new(RwLock::new(ForestIndex::default())),
        }
    }

    /// Returns the short id of the submission this forest belongs to.
    pub fn submission_id(&self) -> &str {
        &self.submission_id
    }

    /// Merges a reply's items into the forest.
    ///
    /// `t1` items are indexed together with their nested replies; `more`
    /// items are kept as placeholders. Items already present are replaced
    /// in place; nothing absent from `things` is removed. The whole batch is
    /// decoded before anything is merged, so a malformed item leaves the
    /// forest untouched.
    ///
    /// Returns the number of comments merged.
    pub fn update(&self, things: Vec<Thing>) -> Result<usize, AppError> {
        let path = endpoints::submission(&self.submission_id);
        let mut items = Vec::new();
        flatten(&path, things, &mut items)?;

        let mut index = self.write();
        let mut merged = 0;
        for item in items {
            match item {
                ForestItem::Comment(comment) => {
                    self.insert_into(&mut index, comment);
                    merged += 1;
                }
                ForestItem::More(more) => {
                    match index.more.iter_mut().find(|m| m.id == more.id) {
                        Some(existing) => *existing = more,
                        None => index.more.push(more),
                    }
                }
            }
        }
        tracing::debug!(
            submission = %self.submission_id,
            merged,
            total = index.comments.len(),
            "Merged comments"
        );
        Ok(merged)
    }

    /// Attaches a single comment, replacing any comment with the same id.
    ///
    /// Returns `true` if the comment was not present before.
    pub fn insert(&self, comment: Comment) -> bool {
        let mut index = self.write();
        self.insert_into(&mut index, comment)
    }

    fn insert_into(&self, index: &mut ForestIndex, comment: Comment) -> bool {
        let id = comment.id().to_string();
        let previous = index.comments.remove(&id);
        let is_new = previous.is_none();

        match previous {
            Some(old) if old.parent_id() == comment.parent_id() => {}
            Some(old) => {
                detach(index, &id, &old);
                self.attach(index, &id, &comment);
            }
            None => self.attach(index, &id, &comment),
        }
        index.comments.insert(id, comment);
        is_new
    }

    /// Lists `id` under the parent named by `comment`.
    fn attach(&self, index: &mut ForestIndex, id: &str, comment: &Comment) {
        match comment.parent_comment_id() {
            Some(parent) => index
                .children
                .entry(parent.to_string())
                .or_default()
                .push(id.to_string()),
            None => {
                if comment.parent_id() != Kind::Submission.fullname(&self.submission_id) {
                    tracing::warn!(
                        comment = %id,
                        parent = comment.parent_id(),
                        "Comment parent is not this submission; treating as top-level"
                    );
                }
                index.top_level.push(id.to_string());
            }
        }
    }

    /// Returns the comment with the given short id.
    pub fn get(&self, id: &str) -> Option<Comment> {
        self.read().comments.get(id).cloned()
    }

    pub fn contains(&self, id: &str) -> bool {
        self.read().comments.contains_key(id)
    }

    /// Number of comments in the forest, at any depth.
    pub fn len(&self) -> usize {
        self.read().comments.len()
    }

    pub fn is_empty(&self) -> bool {
        self.read().comments.is_empty()
    }

    /// Comments replying directly to the submission.
    pub fn top_level(&self) -> Vec<Comment> {
        let index = self.read();
        collect(&index, &index.top_level)
    }

    /// Direct replies to the comment with the given short id.
    pub fn replies(&self, id: &str) -> Vec<Comment> {
        let index = self.read();
        match index.children.get(id) {
            Some(ids) => collect(&index, ids),
            None => Vec::new(),
        }
    }

    /// All comments reachable from the top level, breadth-first.
    pub fn list(&self) -> Vec<Comment> {
        let index = self.read();
        let mut queue: VecDeque<&String> = index.top_level.iter().collect();
        let mut out = Vec::with_capacity(index.comments.len());
        while let Some(id) = queue.pop_front() {
            if let Some(comment) = index.comments.get(id) {
                out.push(comment.clone());
            }
            if let Some(children) = index.children.get(id) {
                queue.extend(children.iter());
            }
        }
        out
    }

    /// Placeholders for comments not included in any reply so far.
    pub fn more(&self) -> Vec<MoreComments> {
        self.read().more.clone()
    }

    /// Renders the tree as nested JSON: each comment's fields plus a
    /// `replies` array.
    pub fn to_json(&self) -> JsonValue {
        let index = self.read();
        JsonValue::Array(
            index
                .top_level
                .iter()
                .filter_map(|id| render(&index, id, 0))
                .collect(),
        )
    }

    fn read(&self) -> RwLockReadGuard<'_, ForestIndex> {
        self.inner.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, ForestIndex> {
        self.inner.write().unwrap_or_else(PoisonError::into_inner)
    }
}

/// Two forests are equal when they are the same shared tree.
impl PartialEq for CommentForest {
    fn eq(&self, other: &Self) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

fn flatten(path: &str, things: Vec<Thing>, out: &mut Vec<ForestItem>) -> Result<(), AppError> {
    for thing in things {
        if thing.kind == Kind::Comment.prefix() {
            let (comment, replies) = Comment::from_thing(path, thing)?;
            out.push(ForestItem::Comment(comment));
            flatten(path, replies.children, out)?;
        } else if thing.kind == MoreComments::KIND {
            out.push(ForestItem::More(MoreComments::from_thing(path, thing)?));
        } else {
            tracing::warn!(kind = %thing.kind, "Skipping unexpected item in comment listing");
        }
    }
    Ok(())
}

/// Removes `id` from the list of the parent named by `comment`.
fn detach(index: &mut ForestIndex, id: &str, comment: &Comment) {
    let siblings = match comment.parent_comment_id() {
        Some(parent) => index.children.get_mut(parent),
        None => Some(&mut index.top_level),
    };
    if let Some(siblings) = siblings {
        siblings.retain(|sibling| sibling != id);
    }
}

fn collect(index: &ForestIndex, ids: &[String]) -> Vec<Comment> {
    ids.iter()
        .filter_map(|id| index.comments.get(id).cloned())
        .collect()
}

// Depth guard: parent links come from the server and are not trusted to be acyclic.
const MAX_RENDER_DEPTH: usize = 256;

fn render(index: &ForestIndex, id: &str, depth: usize) -> Option<JsonValue> {
    if depth > MAX_RENDER_DEPTH {
        return None;
    }
    let comment = index.comments.get(id)?;
    let mut data = comment.data().clone();
    let replies = index
        .children
        .get(id)
        .map(|ids| {
            ids.iter()
                .filter_map(|child| render(index, child, depth + 1))
                .collect()
        })
        .unwrap_or_default();
    data.insert("replies".to_string(), JsonValue::Array(replies));
    Some(JsonValue::Object(data))
}
