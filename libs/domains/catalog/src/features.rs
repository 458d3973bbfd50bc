//! Feature flags with per-caller targeting.
//!
//! Older API versions stay reachable only while their flag is on for the
//! calling user. Evaluation is a pure function of (flag, targeting context)
//! and static rollout configuration; callers treat evaluator failures as
//! "disabled" so flag-store trouble can never take the gated surface down.

use async_trait::async_trait;
use axum::{
    extract::FromRequestParts,
    http::{HeaderMap, request::Parts},
};
use sha2::{Digest, Sha256};
use std::convert::Infallible;
use strum::{Display, EnumString};
use thiserror::Error;

use crate::version::ApiVersion;

/// Named feature flags. v3 is the unconditionally-enabled version and has no
/// flag.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString)]
pub enum FeatureFlag {
    UseV1ProductApi,
    UseV2ProductApi,
}

impl FeatureFlag {
    /// The flag gating a version's endpoints, if any.
    pub fn for_version(version: ApiVersion) -> Option<FeatureFlag> {
        match version {
            ApiVersion::V1 => Some(FeatureFlag::UseV1ProductApi),
            ApiVersion::V2 => Some(FeatureFlag::UseV2ProductApi),
            ApiVersion::V3 => None,
        }
    }
}

/// Per-request identity used for personalized flag evaluation. Derived from
/// request headers, resolved once per request, never persisted.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TargetingContext {
    pub user_id: String,
    pub groups: Vec<String>,
}

impl TargetingContext {
    /// Pure function of the inbound headers: `X-User-Id` plus the
    /// comma-separated `X-User-Groups` (trimmed, empties dropped).
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let user_id = headers
            .get("x-user-id")
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();

        let groups = headers
            .get("x-user-groups")
            .and_then(|v| v.to_str().ok())
            .map(|raw| {
                raw.split(',')
                    .map(str::trim)
                    .filter(|s| !s.is_empty())
                    .map(String::from)
                    .collect()
            })
            .unwrap_or_default();

        Self { user_id, groups }
    }
}

impl<S> FromRequestParts<S> for TargetingContext
where
    S: Send + Sync,
{
    type Rejection = Infallible;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        Ok(TargetingContext::from_headers(&parts.headers))
    }
}

#[derive(Debug, Error)]
pub enum FeatureError {
    #[error("Flag store unavailable: {0}")]
    Unavailable(String),
}

pub type FeatureResult<T> = Result<T, FeatureError>;

/// Feature flag evaluator.
///
/// Implementations must be side-effect-free and reentrant; evaluation happens
/// per request because targeting varies per caller. Callers are expected to
/// fail closed on `Err` (`.unwrap_or(false)`).
#[async_trait]
pub trait FeatureGate: Send + Sync {
    async fn is_enabled(&self, flag: FeatureFlag, ctx: &TargetingContext) -> FeatureResult<bool>;
}

/// Rollout policy for one flag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlagSettings {
    pub enabled: bool,
    /// Share of the default audience the flag is on for, 0..=100
    pub percentage: u8,
    /// Groups the flag is always on for
    pub groups: Vec<String>,
    /// User ids the flag is always on for
    pub users: Vec<String>,
}

impl Default for FlagSettings {
    fn default() -> Self {
        Self {
            enabled: true,
            percentage: 100,
            groups: Vec::new(),
            users: Vec::new(),
        }
    }
}

/// Rollout policy for the whole flag set.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RolloutConfig {
    pub v1: FlagSettings,
    pub v2: FlagSettings,
}

/// The shipped evaluator: allow-lists first, then a deterministic percentage
/// rollout over the default audience.
#[derive(Debug, Clone)]
pub struct RolloutFeatureGate {
    config: RolloutConfig,
}

impl RolloutFeatureGate {
    pub fn new(config: RolloutConfig) -> Self {
        Self { config }
    }
}

#[async_trait]
impl FeatureGate for RolloutFeatureGate {
    async fn is_enabled(&self, flag: FeatureFlag, ctx: &TargetingContext) -> FeatureResult<bool> {
        let settings = match flag {
            FeatureFlag::UseV1ProductApi => &self.config.v1,
            FeatureFlag::UseV2ProductApi => &self.config.v2,
        };

        Ok(evaluate(settings, flag, ctx))
    }
}

fn evaluate(settings: &FlagSettings, flag: FeatureFlag, ctx: &TargetingContext) -> bool {
    if !settings.enabled {
        return false;
    }

    if !ctx.user_id.is_empty() && settings.users.iter().any(|u| u == &ctx.user_id) {
        return true;
    }

    if ctx.groups.iter().any(|g| settings.groups.contains(g)) {
        return true;
    }

    rollout_bucket(flag, &ctx.user_id) < settings.percentage
}

/// Deterministic audience bucket in 0..=99. The same (flag, user) pair lands
/// in the same bucket on every evaluation, so a percentage rollout is stable
/// per caller rather than a coin flip per request.
fn rollout_bucket(flag: FeatureFlag, user_id: &str) -> u8 {
    let mut hasher = Sha256::new();
    hasher.update(flag.to_string().as_bytes());
    hasher.update(b"\n");
    hasher.update(user_id.as_bytes());
    let digest = hasher.finalize();

    let word = u32::from_be_bytes([digest[0], digest[1], digest[2], digest[3]]);
    (word % 100) as u8
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ctx(user_id: &str, groups: &[&str]) -> TargetingContext {
        TargetingContext {
            user_id: user_id.to_string(),
            groups: groups.iter().map(|g| g.to_string()).collect(),
        }
    }

    #[tokio::test]
    async fn test_disabled_flag_is_off_for_everyone() {
        let gate = RolloutFeatureGate::new(RolloutConfig {
            v1: FlagSettings {
                enabled: false,
                users: vec!["alice".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });

        let enabled = gate
            .is_enabled(FeatureFlag::UseV1ProductApi, &ctx("alice", &[]))
            .await
            .unwrap();
        assert!(!enabled);
    }

    #[tokio::test]
    async fn test_user_allow_list_bypasses_percentage() {
        let gate = RolloutFeatureGate::new(RolloutConfig {
            v1: FlagSettings {
                percentage: 0,
                users: vec!["alice".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });

        assert!(gate
            .is_enabled(FeatureFlag::UseV1ProductApi, &ctx("alice", &[]))
            .await
            .unwrap());
        assert!(!gate
            .is_enabled(FeatureFlag::UseV1ProductApi, &ctx("bob", &[]))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_group_allow_list_bypasses_percentage() {
        let gate = RolloutFeatureGate::new(RolloutConfig {
            v2: FlagSettings {
                percentage: 0,
                groups: vec!["beta-testers".to_string()],
                ..Default::default()
            },
            ..Default::default()
        });

        assert!(gate
            .is_enabled(FeatureFlag::UseV2ProductApi, &ctx("bob", &["beta-testers"]))
            .await
            .unwrap());
        assert!(!gate
            .is_enabled(FeatureFlag::UseV2ProductApi, &ctx("bob", &["interns"]))
            .await
            .unwrap());
    }

    #[tokio::test]
    async fn test_full_percentage_is_on_for_anonymous_callers() {
        let gate = RolloutFeatureGate::new(RolloutConfig::default());

        assert!(gate
            .is_enabled(FeatureFlag::UseV1ProductApi, &TargetingContext::default())
            .await
            .unwrap());
    }

    #[test]
    fn test_rollout_bucket_is_deterministic() {
        let a = rollout_bucket(FeatureFlag::UseV1ProductApi, "alice");
        let b = rollout_bucket(FeatureFlag::UseV1ProductApi, "alice");
        assert_eq!(a, b);
        assert!(a < 100);
    }

    #[test]
    fn test_rollout_bucket_varies_by_flag() {
        // Same user, different flags: buckets are independent so a user in
        // the v1 audience is not automatically in the v2 audience.
        let buckets: Vec<u8> = (0..32)
            .map(|i| {
                let user = format!("user-{}", i);
                rollout_bucket(FeatureFlag::UseV1ProductApi, &user)
                    ^ rollout_bucket(FeatureFlag::UseV2ProductApi, &user)
            })
            .collect();
        assert!(buckets.iter().any(|&b| b != 0));
    }

    #[test]
    fn test_targeting_context_from_headers() {
        let mut headers = HeaderMap::new();
        headers.insert("x-user-id", "alice".parse().unwrap());
        headers.insert("x-user-groups", " beta-testers, staff ,,".parse().unwrap());

        let ctx = TargetingContext::from_headers(&headers);
        assert_eq!(ctx.user_id, "alice");
        assert_eq!(ctx.groups, vec!["beta-testers", "staff"]);
    }

    #[test]
    fn test_targeting_context_tolerates_missing_headers() {
        let ctx = TargetingContext::from_headers(&HeaderMap::new());
        assert_eq!(ctx, TargetingContext::default());
    }

    #[test]
    fn test_flag_for_version() {
        assert_eq!(
            FeatureFlag::for_version(ApiVersion::V1),
            Some(FeatureFlag::UseV1ProductApi)
        );
        assert_eq!(
            FeatureFlag::for_version(ApiVersion::V2),
            Some(FeatureFlag::UseV2ProductApi)
        );
        assert_eq!(FeatureFlag::for_version(ApiVersion::V3), None);
    }
}
