//! Comments command handler.

use color_eyre::Result;

use crate::models::{Comment, CommentForest};

use super::App;

impl App {
    /// Fetch a submission and print its comment tree.
    pub async fn run_comments(
        &self,
        reference: &str,
        limit: Option<u32>,
        sort: Option<&str>,
        depth: usize,
    ) -> Result<()> {
        let (submission, _) = self.open(reference)?;
        if let Some(limit) = limit {
            submission.set_comment_limit(limit);
        }
        if let Some(sort) = sort {
            submission.set_comment_sort(sort);
        }

        let forest = submission.comments().await?;
        println!("{} ({} comments loaded)", submission.title().await?, forest.len());
        for comment in forest.top_level() {
            print_comment(&forest, &comment, 0, depth);
        }

        let hidden: u64 = forest.more().iter().map(|more| more.count).sum();
        if hidden > 0 {
            println!("... {} more comments not loaded", hidden);
        }
        Ok(())
    }
}

fn print_comment(forest: &CommentForest, comment: &Comment, level: usize, max_depth: usize) {
    if level > max_depth {
        return;
    }
    let author = comment
        .author()
        .map(|a| a.name().to_string())
        .unwrap_or_else(|| "[deleted]".to_string());
    let body = comment.body().unwrap_or_default();
    let first_line = body.lines().next().unwrap_or_default();
    println!(
        "{}{} ({}): {}",
        "  ".repeat(level),
        author,
        comment.score().unwrap_or(0),
        first_line
    );

    for reply in forest.replies(comment.id()) {
        print_comment(forest, &reply, level + 1, max_depth);
    }
}
