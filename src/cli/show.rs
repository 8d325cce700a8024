//! Show command handler.

use color_eyre::Result;
use serde_json::{json, Map, Value as JsonValue};

use super::App;

impl App {
    /// Print a submission's summary, or every attribute with `--all`.
    pub async fn run_show(&self, reference: &str, all: bool) -> Result<()> {
        let (submission, _) = self.open(reference)?;

        let output = if all {
            submission.fetch().await?;
            let fields: Map<String, JsonValue> = submission
                .attribute_names()
                .into_iter()
                .filter(|name| name != "comments")
                .filter_map(|name| {
                    let value = submission.cached(&name)?.to_json();
                    Some((name, value))
                })
                .collect();
            JsonValue::Object(fields)
        } else {
            // Concurrent reads share one fetch.
            let (title, author, subreddit, score, num_comments, created) = futures::try_join!(
                submission.title(),
                submission.author(),
                submission.subreddit(),
                submission.score(),
                submission.num_comments(),
                submission.created(),
            )?;
            json!({
                "id": submission.id().as_str(),
                "title": title,
                "author": author.map(|a| a.name().to_string()),
                "subreddit": subreddit.display_name(),
                "score": score,
                "num_comments": num_comments,
                "created": created.to_rfc3339(),
                "shortlink": submission.shortlink(),
            })
        };

        println!("{}", serde_json::to_string_pretty(&output)?);
        Ok(())
    }
}
