//! Navigator backed by the page location.

use std::sync::Mutex;

use url::Url;

use crate::ports::NavigatorPort;

type NavigateFn = Box<dyn Fn(&str) + Send + Sync>;

/// Reads query parameters from the current location and hands navigation
/// to a platform callback.
pub struct LocationNavigator {
    location: Mutex<Url>,
    on_navigate: NavigateFn,
}

impl LocationNavigator {
    pub fn new(location: Url, on_navigate: impl Fn(&str) + Send + Sync + 'static) -> Self {
        Self {
            location: Mutex::new(location),
            on_navigate: Box::new(on_navigate),
        }
    }

    pub fn location(&self) -> Url {
        self.location
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .clone()
    }
}

impl NavigatorPort for LocationNavigator {
    fn navigate(&self, url: &str) {
        match Url::parse(url) {
            Ok(parsed) => {
                tracing::info!(url = %parsed, "Navigating away");
                *self.location.lock().unwrap_or_else(|p| p.into_inner()) = parsed;
                (self.on_navigate)(url);
            }
            Err(e) => tracing::warn!(url, error = %e, "Refusing to navigate to invalid URL"),
        }
    }

    fn query_param(&self, name: &str) -> Option<String> {
        self.location
            .lock()
            .unwrap_or_else(|p| p.into_inner())
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    fn url(s: &str) -> Url {
        Url::parse(s).unwrap()
    }

    #[test]
    fn reads_query_parameter() {
        let nav = LocationNavigator::new(url("https://app.example/billing?result=success"), |_| {});
        assert_eq!(nav.query_param("result").as_deref(), Some("success"));
        assert_eq!(nav.query_param("missing"), None);
    }

    #[test]
    fn navigate_invokes_callback_and_updates_location() {
        let visited = Arc::new(Mutex::new(Vec::<String>::new()));
        let sink = Arc::clone(&visited);
        let nav = LocationNavigator::new(url("https://app.example/billing"), move |u| {
            sink.lock().unwrap().push(u.to_string());
        });

        nav.navigate("https://checkout.example/s1?result=pending");

        assert_eq!(*visited.lock().unwrap(), vec!["https://checkout.example/s1?result=pending"]);
        assert_eq!(nav.query_param("result").as_deref(), Some("pending"));
    }

    #[test]
    fn invalid_url_is_not_followed() {
        let visited = Arc::new(Mutex::new(0usize));
        let sink = Arc::clone(&visited);
        let nav = LocationNavigator::new(url("https://app.example/billing"), move |_| {
            *sink.lock().unwrap() += 1;
        });

        nav.navigate("not a url");

        assert_eq!(*visited.lock().unwrap(), 0);
        assert_eq!(nav.location(), url("https://app.example/billing"));
    }
}
