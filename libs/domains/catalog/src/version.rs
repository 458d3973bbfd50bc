//! API version resolution.
//!
//! The version travels as a URL path segment (`/api/v2/products`). Resolution
//! is pure parsing plus the implicit-default rule; everything the version
//! *means* (shapes, gating, operation availability) lives elsewhere.

use axum::{
    extract::{FromRequestParts, Path, Request},
    http::{HeaderValue, request::Parts},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::collections::HashMap;
use std::fmt;

use crate::error::CatalogError;

/// The closed set of supported major API versions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum ApiVersion {
    V1,
    V2,
    V3,
}

impl ApiVersion {
    /// Version assumed when a request carries no version segment.
    pub const DEFAULT: ApiVersion = ApiVersion::V1;

    pub fn major(self) -> u8 {
        match self {
            ApiVersion::V1 => 1,
            ApiVersion::V2 => 2,
            ApiVersion::V3 => 3,
        }
    }

    /// `X-API-Version` response header value.
    pub fn header_value(self) -> &'static str {
        match self {
            ApiVersion::V1 => "1.0",
            ApiVersion::V2 => "2.0",
            ApiVersion::V3 => "3.0",
        }
    }

    /// `X-Version-Features` response header value.
    pub fn feature_tier(self) -> &'static str {
        match self {
            ApiVersion::V1 => "basic",
            ApiVersion::V2 => "enhanced",
            ApiVersion::V3 => "advanced",
        }
    }

    /// Parse a path token: optional leading `v`/`V`, then `major[.minor]`.
    /// Only `.0` minors exist; anything else is an unsupported version.
    pub fn from_segment(segment: &str) -> Result<Self, CatalogError> {
        let unsupported = || CatalogError::UnsupportedVersion(segment.to_string());

        let number = segment
            .strip_prefix(['v', 'V'])
            .unwrap_or(segment);

        let (major, minor) = match number.split_once('.') {
            Some((major, minor)) => (major, Some(minor)),
            None => (number, None),
        };

        if let Some(minor) = minor {
            if minor.parse::<u32>().map_err(|_| unsupported())? != 0 {
                return Err(unsupported());
            }
        }

        match major.parse::<u8>().map_err(|_| unsupported())? {
            1 => Ok(ApiVersion::V1),
            2 => Ok(ApiVersion::V2),
            3 => Ok(ApiVersion::V3),
            _ => Err(unsupported()),
        }
    }

    /// Resolve an optional path token, applying the implicit default.
    pub fn resolve(segment: Option<&str>) -> Result<Self, CatalogError> {
        match segment {
            Some(token) => Self::from_segment(token),
            None => Ok(Self::DEFAULT),
        }
    }
}

impl fmt::Display for ApiVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "v{}", self.major())
    }
}

/// Extractor for the `{version}` path parameter.
///
/// Routes without a `{version}` parameter resolve to the default version, so
/// the unversioned aliases share handlers with the versioned routes.
pub struct ResolvedVersion(pub ApiVersion);

impl<S> FromRequestParts<S> for ResolvedVersion
where
    S: Send + Sync,
{
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Path(params) = Path::<HashMap<String, String>>::from_request_parts(parts, state)
            .await
            .map_err(|e| e.into_response())?;

        ApiVersion::resolve(params.get("version").map(String::as_str))
            .map(ResolvedVersion)
            .map_err(|e| e.into_response())
    }
}

/// Resolve the version a request path addresses, for response headers.
///
/// Returns `None` when the path carries a version token that does not parse;
/// such requests fail resolution anyway and get no version headers.
fn resolve_path_version(path: &str) -> Option<ApiVersion> {
    let mut prior: Option<&str> = None;
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        if segment == "products" {
            return match prior {
                None | Some("api") => Some(ApiVersion::DEFAULT),
                Some(token) => ApiVersion::from_segment(token).ok(),
            };
        }
        prior = Some(segment);
    }
    None
}

/// Middleware stamping `X-API-Version` and `X-Version-Features` onto every
/// response whose request resolved to a version.
pub async fn version_headers(req: Request, next: Next) -> Response {
    let version = resolve_path_version(req.uri().path());
    let mut response = next.run(req).await;

    if let Some(version) = version {
        let headers = response.headers_mut();
        headers.insert(
            "x-api-version",
            HeaderValue::from_static(version.header_value()),
        );
        headers.insert(
            "x-version-features",
            HeaderValue::from_static(version.feature_tier()),
        );
    }

    response
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parses_plain_major() {
        assert_eq!(ApiVersion::from_segment("v1").unwrap(), ApiVersion::V1);
        assert_eq!(ApiVersion::from_segment("v2").unwrap(), ApiVersion::V2);
        assert_eq!(ApiVersion::from_segment("v3").unwrap(), ApiVersion::V3);
    }

    #[test]
    fn test_parses_major_minor_and_bare_digits() {
        assert_eq!(ApiVersion::from_segment("v2.0").unwrap(), ApiVersion::V2);
        assert_eq!(ApiVersion::from_segment("3.0").unwrap(), ApiVersion::V3);
        assert_eq!(ApiVersion::from_segment("1").unwrap(), ApiVersion::V1);
        assert_eq!(ApiVersion::from_segment("V3").unwrap(), ApiVersion::V3);
    }

    #[test]
    fn test_rejects_unknown_majors_and_garbage() {
        assert!(ApiVersion::from_segment("v4").is_err());
        assert!(ApiVersion::from_segment("v0").is_err());
        assert!(ApiVersion::from_segment("vx").is_err());
        assert!(ApiVersion::from_segment("").is_err());
        assert!(ApiVersion::from_segment("v2.5").is_err());
        assert!(ApiVersion::from_segment("v1.0.0").is_err());
    }

    #[test]
    fn test_resolve_defaults_to_v1_when_absent() {
        assert_eq!(ApiVersion::resolve(None).unwrap(), ApiVersion::V1);
        assert_eq!(ApiVersion::resolve(Some("v2")).unwrap(), ApiVersion::V2);
    }

    #[test]
    fn test_path_version_resolution() {
        assert_eq!(
            resolve_path_version("/api/v2/products/abc"),
            Some(ApiVersion::V2)
        );
        assert_eq!(resolve_path_version("/api/products"), Some(ApiVersion::V1));
        assert_eq!(resolve_path_version("/v3/products"), Some(ApiVersion::V3));
        assert_eq!(resolve_path_version("/api/v9/products"), None);
        assert_eq!(resolve_path_version("/health"), None);
    }

    #[test]
    fn test_display_uses_major_only() {
        assert_eq!(ApiVersion::V2.to_string(), "v2");
    }
}
