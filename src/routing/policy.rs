//! Host classification logic.
//!
//! # Responsibilities
//! - Classify the Host header as canonical, sandbox, or unknown
//! - Normalize hosts (case, surrounding whitespace, port)
//!
//! # Design Decisions
//! - Host matching is case-insensitive (per HTTP spec)
//! - Sandbox detection uses exact dot-boundary suffix matching, never
//!   substring containment: a Host header that merely contains a sandbox
//!   domain must not be classified as sandbox
//! - Absent or garbled hosts classify as Unknown; the caller fails open

/// Outcome of classifying a request's Host header.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostClass {
    /// The single production host that search engines treat as authoritative.
    Canonical,
    /// A preview/staging deployment on a known provider suffix.
    Sandbox,
    /// Anything else, including absent or malformed headers.
    Unknown,
}

/// Pure host classifier. Immutable after construction, safe to share.
#[derive(Debug, Clone)]
pub struct HostPolicy {
    /// Canonical hostname, lowercase, without port.
    canonical_host: String,
    /// Sandbox domain suffixes, lowercase, each with a leading dot.
    sandbox_suffixes: Vec<String>,
}

impl HostPolicy {
    /// Build a policy from a canonical hostname and sandbox suffixes.
    ///
    /// Suffixes are normalized to lowercase with a leading dot; empty
    /// entries are dropped.
    pub fn new(canonical_host: impl Into<String>, sandbox_suffixes: &[String]) -> Self {
        let suffixes = sandbox_suffixes
            .iter()
            .map(|s| s.trim().to_ascii_lowercase())
            .filter(|s| !s.trim_matches('.').is_empty())
            .map(|s| {
                if s.starts_with('.') {
                    s
                } else {
                    format!(".{s}")
                }
            })
            .collect();

        Self {
            canonical_host: canonical_host.into().to_ascii_lowercase(),
            sandbox_suffixes: suffixes,
        }
    }

    /// Classify a raw Host header value.
    ///
    /// Total over all inputs: anything that does not cleanly match the
    /// canonical host or a sandbox suffix is `Unknown`.
    pub fn classify(&self, host: Option<&str>) -> HostClass {
        let Some(raw) = host else {
            return HostClass::Unknown;
        };

        let normalized = raw.trim().to_ascii_lowercase();
        let Some(hostname) = strip_port(&normalized) else {
            return HostClass::Unknown;
        };
        if hostname.is_empty() {
            return HostClass::Unknown;
        }

        if hostname == self.canonical_host {
            return HostClass::Canonical;
        }

        let is_sandbox = self.sandbox_suffixes.iter().any(|suffix| {
            hostname.ends_with(suffix.as_str()) || hostname == &suffix[1..]
        });
        if is_sandbox {
            HostClass::Sandbox
        } else {
            HostClass::Unknown
        }
    }
}

/// Strip an optional `:port` from a Host header value.
///
/// Returns `None` for values that cannot be a DNS hostname (IPv6 literals,
/// multiple colons); those classify as Unknown upstream.
fn strip_port(host: &str) -> Option<&str> {
    match host.matches(':').count() {
        0 => Some(host),
        1 => host.split(':').next(),
        _ => None,
    }
}
