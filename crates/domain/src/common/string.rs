//! String helpers.

/// Turns a display name into a lowercase, dash-separated identifier.
///
/// Runs of non-alphanumeric characters collapse into a single dash and
/// leading/trailing dashes are dropped.
///
/// # Examples
///
/// ```
/// use notiflow_domain::common::slugify;
///
/// assert_eq!(slugify("Welcome Email!"), "welcome-email");
/// assert_eq!(slugify("  Order -- Shipped  "), "order-shipped");
/// ```
pub fn slugify(value: &str) -> String {
    let mut slug = String::with_capacity(value.len());
    let mut pending_dash = false;

    for ch in value.chars() {
        if ch.is_alphanumeric() {
            if pending_dash && !slug.is_empty() {
                slug.push('-');
            }
            pending_dash = false;
            slug.extend(ch.to_lowercase());
        } else {
            pending_dash = true;
        }
    }

    slug
}
