//! Resolve command handler.

use color_eyre::Result;

use crate::config::Config;
use crate::context::Context;

use super::App;

impl App {
    /// Print the id, fullname and short link for a URL.
    pub fn run_resolve(&self, url: &str) -> Result<()> {
        let ctx = Context::connect(Config::load()?)?;
        let submission = ctx.submission_from_url(url)?;
        tracing::debug!(url, id = %submission.id(), "Resolved URL");

        println!("id:        {}", submission.id());
        println!("fullname:  {}", submission.fullname());
        println!("shortlink: {}", submission.shortlink());
        Ok(())
    }
}
