//! Host classification for fetch eligibility
//!
//! Two static sets are consulted during selection and fetching: hosts known
//! to block automated extraction (or to sit behind auth/paywalls), and
//! low-traffic blog hosts that qualify for a reduced score threshold.

use url::Url;

/// Hosts that are never fetched. Membership is exact, no subdomain matching.
const DENY_DOMAINS: &[&str] = &[
    "twitter.com",
    "x.com",
    "reddit.com",
    "old.reddit.com",
    "github.com",
    "youtube.com",
    "youtu.be",
    "nytimes.com",
    "bloomberg.com",
    "wsj.com",
    "ft.com",
    "arxiv.org",
];

/// Blog hosts eligible at the reduced score floor.
const BLOG_DOMAINS: &[&str] = &[
    "simonwillison.net",
    "overreacted.io",
    "eli.thegreenplace.net",
    "matklad.github.io",
    "lucumr.pocoo.org",
    "devblogs.microsoft.com",
    "rachelbythebay.com",
    "xeiaso.net",
    "pluralistic.net",
    "lcamtuf.substack.com",
    "hillelwayne.com",
    "dynomight.net",
    "geoffreylitt.com",
    "fabiensanglard.net",
    "blog.cloudflare.com",
    "antirez.com",
    "paulgraham.com",
    "danluu.com",
    "latent.space",
    "www.latent.space",
];

/// Extract the normalized host from a URL string.
///
/// Lowercased, with a single leading `www.` label stripped. Returns the
/// empty string when the URL cannot be parsed or has no host.
pub fn host_for_url(url: &str) -> String {
    let Ok(parsed) = Url::parse(url) else {
        return String::new();
    };
    let Some(host) = parsed.host_str() else {
        return String::new();
    };
    let host = host.to_ascii_lowercase();
    match host.strip_prefix("www.") {
        Some(stripped) => stripped.to_string(),
        None => host,
    }
}

/// True if the host is excluded from fetching.
pub fn is_denied(host: &str) -> bool {
    DENY_DOMAINS.iter().any(|d| *d == host)
}

/// True if the host qualifies for the reduced blog score floor.
pub fn is_blog(host: &str) -> bool {
    BLOG_DOMAINS.iter().any(|d| *d == host)
}
