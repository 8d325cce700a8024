//! Application context providing dependency injection root.

use std::sync::Arc;

use crate::config::Config;
use crate::di::Context as ContextDerive;
use crate::error::AppError;
use crate::models::Submission;
use crate::transport::backends::HttpTransport;
use crate::transport::Transport;

/// Shared transport handle.
pub type AppTransport = Arc<dyn Transport>;

/// Root application context for dependency injection.
///
/// Holds the shared transport and configuration. `#[derive(Context)]`
/// generates `FromRef` implementations for each field, so repositories
/// resolve their dependencies at compile time.
#[derive(ContextDerive, Clone)]
pub struct Context {
    /// Transport used for every remote call.
    pub transport: AppTransport,
    /// Application configuration.
    pub config: Arc<Config>,
}

impl Context {
    /// Creates a new context with the given dependencies.
    pub fn new<T: Transport + 'static>(transport: T, config: Config) -> Self {
        Self {
            transport: Arc::new(transport),
            config: Arc::new(config),
        }
    }

    /// Creates a context talking to the live API described by `config`.
    pub fn connect(config: Config) -> Result<Self, AppError> {
        let transport = HttpTransport::new(&config.reddit)?;
        tracing::debug!(base_url = %transport.base_url(), "Created HTTP transport");
        Ok(Self::new(transport, config))
    }

    /// Returns a lazy submission for `id`. No request is made.
    pub fn submission(&self, id: &str) -> Result<Submission, AppError> {
        Submission::builder(self).id(id).build()
    }

    /// Returns a lazy submission for the id contained in `url`.
    pub fn submission_from_url(&self, url: &str) -> Result<Submission, AppError> {
        Submission::builder(self).url(url).build()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::di::FromRef;
    use crate::transport::backends::MemoryTransport;

    #[test]
    fn test_fields_resolve_from_context() {
        let ctx = Context::new(MemoryTransport::new(), Config::default());
        let config = <Arc<Config> as FromRef<Context>>::from_ref(&ctx);
        assert!(Arc::ptr_eq(&config, &ctx.config));

        let transport = <AppTransport as FromRef<Context>>::from_ref(&ctx);
        assert!(Arc::ptr_eq(&transport, &ctx.transport));
    }

    #[test]
    fn test_submission_from_url() {
        let ctx = Context::new(MemoryTransport::new(), Config::default());
        let submission = ctx
            .submission_from_url("https://redd.it/2gmzqe")
            .unwrap();
        assert_eq!(submission.id().as_str(), "2gmzqe");
        assert!(!submission.is_fetched());
    }

    #[test]
    fn test_connect_with_default_config() {
        let ctx = Context::connect(Config::default()).unwrap();
        assert_eq!(ctx.config.reddit.short_url, "https://redd.it");
    }
}
