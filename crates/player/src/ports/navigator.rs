//! Browser location boundary.

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait NavigatorPort: Send + Sync {
    /// Leave the current page for `url`.
    fn navigate(&self, url: &str);

    /// Value of a query-string parameter of the current location.
    fn query_param(&self, name: &str) -> Option<String>;
}
