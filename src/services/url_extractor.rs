use std::collections::HashSet;

use once_cell::sync::Lazy;
use regex::Regex;
use reqwest::Url;

static BARE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"https?://[^\s)>\]]+").expect("BARE_URL is a valid regex pattern")
});

static MARKDOWN_TARGET: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\((https?://[^)\s]+)\)").expect("MARKDOWN_TARGET is a valid regex pattern")
});

const TRAILING_PUNCTUATION: &[char] = &['.', ',', ')', ';', ']'];

/// Pulls HTTP(S) URLs out of free-form text.
///
/// Matches bare URLs and markdown link targets, strips trailing punctuation,
/// drops anything that does not parse as an `http`/`https` URL with a host,
/// and returns at most `cap` unique URLs in first-seen order.
pub fn extract_urls(text: &str, cap: usize) -> Vec<String> {
    let mut candidates: Vec<(usize, &str)> = BARE_URL
        .find_iter(text)
        .map(|m| (m.start(), m.as_str()))
        .collect();
    candidates.extend(
        MARKDOWN_TARGET
            .captures_iter(text)
            .filter_map(|caps| caps.get(1))
            .map(|m| (m.start(), m.as_str())),
    );
    candidates.sort_by_key(|(start, _)| *start);

    let mut seen = HashSet::new();
    let mut urls = Vec::new();
    for (_, raw) in candidates {
        if urls.len() >= cap {
            break;
        }
        let candidate = raw.trim().trim_end_matches(TRAILING_PUNCTUATION);
        if !is_http_url(candidate) {
            continue;
        }
        if seen.insert(candidate) {
            urls.push(candidate.to_string());
        }
    }
    urls
}

fn is_http_url(candidate: &str) -> bool {
    match Url::parse(candidate) {
        Ok(url) => {
            matches!(url.scheme(), "http" | "https")
                && url.host_str().is_some_and(|host| !host.is_empty())
        }
        Err(_) => false,
    }
}
