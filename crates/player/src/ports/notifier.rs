//! Toast notifications.

#[cfg_attr(any(test, feature = "testing"), mockall::automock)]
pub trait NotifierPort: Send + Sync {
    fn success(&self, message: &str);
    fn error(&self, message: &str);
}
