//! Best-effort cookie expiry by domain/path enumeration.
//!
//! Deleting a cookie from script requires repeating the exact `domain` and
//! `path` it was set with, and the client cannot read those attributes back.
//! `ScrubPlan` therefore writes an expiry for every plausible combination.
//! The cross-product is finite and de-duplicated; `HttpOnly` cookies stay out
//! of reach regardless.

#[cfg(test)]
#[path = "cookies_test.rs"]
mod cookies_test;

use crate::error::StorageError;

/// Expiry timestamp that makes the browser drop a cookie immediately.
pub const EXPIRED: &str = "Thu, 01 Jan 1970 00:00:00 GMT";

/// Paths the auth backend has been observed to scope cookies to.
pub const COOKIE_PATHS: [&str; 4] = ["/", "/api", "/auth", "/api/auth"];

/// Tried on every host, for cookies left behind by local development.
pub const LOCAL_COOKIE_DOMAIN: &str = "localhost";

/// Script access to the cookies of the current document.
pub trait CookieJar: Send + Sync {
    /// Hostname of the current document (`location.hostname`).
    fn host(&self) -> String;
    /// Raw `document.cookie` string.
    fn cookie_string(&self) -> Result<String, StorageError>;
    /// Assign one `Set-Cookie`-style directive to `document.cookie`.
    fn write(&self, directive: &str) -> Result<(), StorageError>;
}

/// Cookie names present in a raw `document.cookie` string, in order, without
/// duplicates.
pub fn cookie_names(raw: &str) -> Vec<String> {
    let mut names: Vec<String> = Vec::new();
    for pair in raw.split(';') {
        let name = pair.split('=').next().unwrap_or_default().trim();
        if name.is_empty() || names.iter().any(|n| n == name) {
            continue;
        }
        names.push(name.to_owned());
    }
    names
}

/// Domain attributes to try for `host`; `None` means "omit the attribute".
///
/// Order: exact host, host without `www.`, last two labels, `localhost`,
/// no domain.
pub fn domain_variants(host: &str) -> Vec<Option<String>> {
    let host = host.trim().trim_end_matches('.');
    let mut candidates: Vec<String> = Vec::new();
    if !host.is_empty() {
        let bare = host.strip_prefix("www.").unwrap_or(host);
        let labels: Vec<&str> = bare.split('.').collect();
        let parent = if labels.len() > 1 { labels[labels.len() - 2..].join(".") } else { bare.to_owned() };
        candidates.extend([host.to_owned(), bare.to_owned(), parent]);
    }
    candidates.push(LOCAL_COOKIE_DOMAIN.to_owned());

    let mut variants: Vec<Option<String>> = Vec::new();
    for candidate in candidates {
        let candidate = Some(candidate);
        if !variants.contains(&candidate) {
            variants.push(candidate);
        }
    }
    variants.push(None);
    variants
}

/// The full set of expiry directives to write for one host.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ScrubPlan {
    domains: Vec<Option<String>>,
    paths: Vec<Option<String>>,
}

impl ScrubPlan {
    pub fn for_host(host: &str) -> Self {
        let mut paths: Vec<Option<String>> = COOKIE_PATHS.iter().map(|p| Some((*p).to_owned())).collect();
        paths.push(None);
        Self { domains: domain_variants(host), paths }
    }

    pub fn domains(&self) -> &[Option<String>] {
        &self.domains
    }

    pub fn paths(&self) -> &[Option<String>] {
        &self.paths
    }

    /// Number of directives written per cookie name.
    pub fn directives_per_cookie(&self) -> usize {
        self.domains.len() * self.paths.len() * 2
    }

    /// Every expiry directive for `name`, plain and `secure`.
    pub fn directives(&self, name: &str) -> Vec<String> {
        let mut out = Vec::with_capacity(self.directives_per_cookie());
        for domain in &self.domains {
            for path in &self.paths {
                let mut directive = format!("{name}=; expires={EXPIRED}");
                if let Some(path) = path {
                    directive.push_str("; path=");
                    directive.push_str(path);
                }
                if let Some(domain) = domain {
                    directive.push_str("; domain=");
                    directive.push_str(domain);
                }
                out.push(directive.clone());
                directive.push_str("; secure");
                out.push(directive);
            }
        }
        out
    }
}
