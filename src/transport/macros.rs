//! Macro for convenient request construction.

/// Macro for inline API requests with optional parameters.
///
/// This macro provides a shorthand for creating and parameterizing requests.
///
/// # Usage
///
/// ```ignore
/// use snoolink::api_request;
///
/// // Request without parameters
/// let request = api_request!(transport, "api/v1/me");
///
/// // Request with parameters
/// let request = api_request!(transport, "api/marknsfw/", id = fullname);
///
/// // Multiple parameters
/// let request = api_request!(
///     transport,
///     "api/set_contest_mode/",
///     id = fullname,
///     state = true
/// );
///
/// // Execute the request
/// let reply = request.post().await?;
/// ```
#[macro_export]
macro_rules! api_request {
    // Request without parameters
    ($transport:expr, $path:expr) => {
        $crate::transport::RequestExt::request(&$transport, $path)
    };
    // Request with parameters
    ($transport:expr, $path:expr, $($name:ident = $value:expr),+ $(,)?) => {
        $crate::transport::RequestExt::request(&$transport, $path)$(.param(stringify!($name), $value))+
    };
}
