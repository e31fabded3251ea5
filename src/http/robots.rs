//! Crawler-policy responder.
//!
//! # Responsibilities
//! - Synthesize robots.txt bodies for sandbox and canonical hosts
//!
//! # Design Decisions
//! - Sandbox deployments disallow all crawling and reference no sitemap;
//!   only the canonical origin should accumulate search presence
//! - The canonical body allows crawling except the merchant-management and
//!   machine API surfaces, and points at the canonical sitemap

use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use url::Url;

use crate::routing::RobotsProfile;

/// Render the robots.txt body for a profile.
pub fn robots_body(profile: RobotsProfile, canonical_origin: &Url) -> String {
    match profile {
        RobotsProfile::Sandbox => "User-agent: *\nDisallow: /\n".to_string(),
        RobotsProfile::Canonical => {
            let mut sitemap = canonical_origin.clone();
            sitemap.set_path("/sitemap.xml");
            format!(
                "User-agent: *\nAllow: /\nDisallow: /merchant/\nDisallow: /api/\n\nSitemap: {sitemap}\n"
            )
        }
    }
}

/// Build the full HTTP response for a robots decision.
pub fn robots_response(profile: RobotsProfile, canonical_origin: &Url) -> Response {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; charset=utf-8")],
        robots_body(profile, canonical_origin),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn origin() -> Url {
        Url::parse("https://www.travelhub.example").unwrap()
    }

    #[test]
    fn sandbox_body_disallows_everything() {
        let body = robots_body(RobotsProfile::Sandbox, &origin());
        assert_eq!(body, "User-agent: *\nDisallow: /\n");
        assert!(!body.contains("Sitemap:"));
    }

    #[test]
    fn canonical_body_allows_with_carveouts() {
        let body = robots_body(RobotsProfile::Canonical, &origin());
        assert!(body.contains("Allow: /\n"));
        assert!(body.contains("Disallow: /merchant/\n"));
        assert!(body.contains("Disallow: /api/\n"));
        assert!(body.contains("Sitemap: https://www.travelhub.example/sitemap.xml\n"));
    }
}
