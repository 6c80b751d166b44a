use std::cell::RefCell;

/// Page location: where the visitor is and where to send them.
pub trait Navigator {
    /// Path of the page currently shown, e.g. `/tv/player.html`.
    fn current_path(&self) -> String;

    /// Leave the current page for `destination`.
    fn navigate(&self, destination: &str);
}

impl<T: Navigator + ?Sized> Navigator for &T {
    fn current_path(&self) -> String {
        (**self).current_path()
    }

    fn navigate(&self, destination: &str) {
        (**self).navigate(destination);
    }
}

/// Last `/`-separated segment of a path; empty for paths ending in `/`.
#[must_use]
pub fn page_identifier(path: &str) -> &str {
    path.rsplit('/').next().unwrap_or(path)
}

/// Marks `encodeURIComponent` leaves as-is but `urlencoding` escapes.
const UNRESERVED_MARKS: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encodes a URI component the way browsers do with
/// `encodeURIComponent`.
fn encode_component(component: &str) -> String {
    let mut encoded = urlencoding::encode(component).into_owned();
    // A literal `%` is always written as `%25`, so only real escapes match.
    for (escape, mark) in UNRESERVED_MARKS {
        encoded = encoded.replace(escape, mark);
    }
    encoded
}

/// Login destination carrying the page to return to after login.
#[must_use]
pub fn redirect_destination(login_page: &str, current_path: &str) -> String {
    format!(
        "{login_page}?redirect={}",
        encode_component(page_identifier(current_path))
    )
}

/// Navigator that stays on a fixed path and records every navigation.
#[derive(Debug, Default)]
pub struct RecordingNavigator {
    path: String,
    visits: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    #[must_use]
    pub fn new(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            visits: RefCell::default(),
        }
    }

    /// Every destination navigated to, oldest first.
    #[must_use]
    pub fn visits(&self) -> Vec<String> {
        self.visits.borrow().clone()
    }

    #[must_use]
    pub fn last_visit(&self) -> Option<String> {
        self.visits.borrow().last().cloned()
    }
}

impl Navigator for RecordingNavigator {
    fn current_path(&self) -> String {
        self.path.clone()
    }

    fn navigate(&self, destination: &str) {
        self.visits.borrow_mut().push(destination.to_string());
    }
}
