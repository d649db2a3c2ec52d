use std::collections::HashSet;

/// URLs confirmed alive during one run, in the order they were first verified.
///
/// The set only grows: there is no removal API.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VerifiedSet {
    urls: Vec<String>,
    seen: HashSet<String>,
}

impl VerifiedSet {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `url` unless it is already present. Returns whether it was new.
    pub fn insert(&mut self, url: &str) -> bool {
        if self.seen.contains(url) {
            return false;
        }
        self.seen.insert(url.to_string());
        self.urls.push(url.to_string());
        true
    }

    pub fn contains(&self, url: &str) -> bool {
        self.seen.contains(url)
    }

    pub fn len(&self) -> usize {
        self.urls.len()
    }

    pub fn is_empty(&self) -> bool {
        self.urls.is_empty()
    }

    pub fn as_slice(&self) -> &[String] {
        &self.urls
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insert_skips_duplicates_and_keeps_order() {
        let mut set = VerifiedSet::new();

        assert!(set.insert("https://b.org/"));
        assert!(set.insert("https://a.org/"));
        assert!(!set.insert("https://b.org/"));

        assert_eq!(set.len(), 2);
        assert_eq!(set.as_slice(), &["https://b.org/", "https://a.org/"]);
        assert!(set.contains("https://a.org/"));
    }

    #[test]
    fn new_set_is_empty() {
        let set = VerifiedSet::new();
        assert!(set.is_empty());
        assert!(set.as_slice().is_empty());
    }
}
