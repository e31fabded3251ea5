//! Edge routing decisions.
//!
//! # Responsibilities
//! - Decide, per request, whether to pass, redirect, or serve crawler policy
//! - Preserve path and query verbatim when redirecting to the canonical origin
//! - Skip a configured set of static/internal asset prefixes
//!
//! # Design Decisions
//! - `decide` is a pure function of (host, path, query) and the immutable
//!   policy snapshot: deterministic, idempotent, total
//! - Redirects are always 301 so search engines transfer ranking to the
//!   canonical origin instead of indexing sandbox copies
//! - Unknown hosts pass through untouched; failing open avoids redirect
//!   loops when the Host header is missing or garbled

use url::Url;

use crate::config::schema::PolicyConfig;
use crate::routing::policy::{HostClass, HostPolicy};

/// Which robots.txt body the responder should synthesize.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RobotsProfile {
    /// Disallow-all: sandbox deployments must never be indexed.
    Sandbox,
    /// Allow-all except merchant and API surfaces, with a sitemap.
    Canonical,
}

/// Outcome of edge routing for a single request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RoutingDecision {
    /// Forward the request to the application unmodified.
    Pass,
    /// Permanent redirect (301) to the canonical origin.
    Redirect(Url),
    /// Serve a synthesized robots.txt body for the given profile.
    Robots(RobotsProfile),
}

impl RoutingDecision {
    /// Stable label for logs and metrics.
    pub fn label(&self) -> &'static str {
        match self {
            RoutingDecision::Pass => "pass",
            RoutingDecision::Redirect(_) => "redirect",
            RoutingDecision::Robots(_) => "robots",
        }
    }
}

/// Per-request router over an immutable policy snapshot.
#[derive(Debug, Clone)]
pub struct EdgeRouter {
    policy: HostPolicy,
    canonical_origin: Url,
    excluded_prefixes: Vec<String>,
}

impl EdgeRouter {
    /// Compile a router from validated policy configuration.
    ///
    /// Fails only if the canonical origin does not parse as an http(s) URL
    /// with a host; `validate_config` rejects such configs earlier.
    pub fn from_config(config: &PolicyConfig) -> Result<Self, url::ParseError> {
        let canonical_origin = Url::parse(&config.canonical_origin)?;
        let canonical_host = canonical_origin
            .host_str()
            .ok_or(url::ParseError::EmptyHost)?
            .to_string();

        Ok(Self {
            policy: HostPolicy::new(canonical_host, &config.sandbox_suffixes),
            canonical_origin,
            excluded_prefixes: config.excluded_prefixes.clone(),
        })
    }

    /// The canonical origin this router redirects to.
    pub fn canonical_origin(&self) -> &Url {
        &self.canonical_origin
    }

    /// Decide what to do with a request before application routing runs.
    pub fn decide(&self, host: Option<&str>, path: &str, query: Option<&str>) -> RoutingDecision {
        if self.is_excluded(path) {
            return RoutingDecision::Pass;
        }

        match self.policy.classify(host) {
            HostClass::Sandbox => {
                if path == "/robots.txt" {
                    // Crawlers that reach a sandbox host must still be able
                    // to read the disallow-all directive instead of being
                    // bounced into a redirect before seeing it.
                    RoutingDecision::Robots(RobotsProfile::Sandbox)
                } else {
                    RoutingDecision::Redirect(self.canonical_target(path, query))
                }
            }
            HostClass::Canonical => {
                if path == "/robots.txt" {
                    RoutingDecision::Robots(RobotsProfile::Canonical)
                } else {
                    RoutingDecision::Pass
                }
            }
            HostClass::Unknown => RoutingDecision::Pass,
        }
    }

    fn is_excluded(&self, path: &str) -> bool {
        self.excluded_prefixes
            .iter()
            .any(|prefix| path.starts_with(prefix.as_str()))
    }

    /// Build the redirect target: canonical origin + original path + query.
    ///
    /// Only the configured origin contributes scheme and authority; nothing
    /// from the request can change the target host.
    fn canonical_target(&self, path: &str, query: Option<&str>) -> Url {
        let mut target = self.canonical_origin.clone();
        target.set_path(path);
        target.set_query(query);
        target
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn router() -> EdgeRouter {
        EdgeRouter::from_config(&PolicyConfig::default()).unwrap()
    }

    #[test]
    fn sandbox_request_redirects_to_canonical() {
        let decision = router().decide(
            Some("preview123.sandboxhost.example"),
            "/merchant/places",
            None,
        );
        match decision {
            RoutingDecision::Redirect(target) => {
                assert_eq!(
                    target.as_str(),
                    "https://www.travelhub.example/merchant/places"
                );
            }
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn redirect_preserves_query() {
        let decision = router().decide(
            Some("preview123.sandboxhost.example"),
            "/merchant/coupons",
            Some("page=2&sort=asc"),
        );
        match decision {
            RoutingDecision::Redirect(target) => {
                assert_eq!(
                    target.as_str(),
                    "https://www.travelhub.example/merchant/coupons?page=2&sort=asc"
                );
            }
            other => panic!("expected redirect, got {other:?}"),
        }
    }

    #[test]
    fn redirect_target_origin_is_always_canonical() {
        // No path or query content may change the target host.
        let hostile_paths = [
            "//attacker.net/phish",
            "/..//attacker.net",
            "/merchant/@attacker.net",
        ];
        for path in hostile_paths {
            let decision =
                router().decide(Some("preview.sandboxhost.example"), path, Some("u=//x.y"));
            match decision {
                RoutingDecision::Redirect(target) => {
                    assert_eq!(target.host_str(), Some("www.travelhub.example"));
                    assert_eq!(target.scheme(), "https");
                }
                other => panic!("expected redirect for {path:?}, got {other:?}"),
            }
        }
    }

    #[test]
    fn sandbox_robots_serves_disallow_profile() {
        let decision = router().decide(Some("preview123.sandboxhost.example"), "/robots.txt", None);
        assert_eq!(decision, RoutingDecision::Robots(RobotsProfile::Sandbox));
    }

    #[test]
    fn canonical_robots_serves_allow_profile() {
        let decision = router().decide(Some("www.travelhub.example"), "/robots.txt", None);
        assert_eq!(decision, RoutingDecision::Robots(RobotsProfile::Canonical));
    }

    #[test]
    fn canonical_and_unknown_hosts_pass() {
        assert_eq!(
            router().decide(Some("www.travelhub.example"), "/merchant/places", None),
            RoutingDecision::Pass
        );
        assert_eq!(
            router().decide(Some("unrelated.example"), "/merchant/places", None),
            RoutingDecision::Pass
        );
        assert_eq!(router().decide(None, "/merchant/places", None), RoutingDecision::Pass);
    }

    #[test]
    fn host_containing_suffix_substring_passes() {
        assert_eq!(
            router().decide(Some("evilsandboxhost.example"), "/merchant/places", None),
            RoutingDecision::Pass
        );
    }

    #[test]
    fn excluded_prefixes_bypass_interception() {
        assert_eq!(
            router().decide(Some("preview.sandboxhost.example"), "/assets/app.css", None),
            RoutingDecision::Pass
        );
        assert_eq!(
            router().decide(Some("preview.sandboxhost.example"), "/favicon.ico", None),
            RoutingDecision::Pass
        );
    }

    #[test]
    fn decisions_are_deterministic() {
        let cases = [
            (Some("preview.sandboxhost.example"), "/a/b", Some("q=1")),
            (Some("www.travelhub.example"), "/robots.txt", None),
            (None, "/", None),
        ];
        let r = router();
        for (host, path, query) in cases {
            assert_eq!(r.decide(host, path, query), r.decide(host, path, query));
        }
    }
}
