// SPDX-License-Identifier: AGPL-3.0-or-later
//
// Copyright (C) 2026 Relational Network

//! Public route classification.
//!
//! Decides which request paths bypass authentication. Rules are evaluated in
//! configured order and the first match wins.
//!
//! ## Matching
//!
//! - **Exact** rules match by strict equality only. An exact `/courses` rule
//!   does not match `/courses/enrolled-courses` or `/courses/`.
//! - **Prefix** rules match any path starting with the prefix string.
//! - `OPTIONS` requests are always public (CORS preflight).
//!
//! The rule set is validated once at startup; see [`ClassifierError`].

use axum::http::Method;

use super::ClassifierError;

/// How a rule's pattern is compared against a request path.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatchKind {
    Exact,
    Prefix,
}

/// A single public-route rule.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RouteRule {
    pub pattern: String,
    pub kind: MatchKind,
}

impl RouteRule {
    pub fn exact(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: MatchKind::Exact,
        }
    }

    pub fn prefix(pattern: impl Into<String>) -> Self {
        Self {
            pattern: pattern.into(),
            kind: MatchKind::Prefix,
        }
    }

    pub fn matches(&self, path: &str) -> bool {
        match self.kind {
            MatchKind::Exact => path == self.pattern,
            MatchKind::Prefix => path.starts_with(&self.pattern),
        }
    }
}

/// Outcome of classifying a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Bypasses the gate; forwarded anonymously
    Public,
    /// Goes through token extraction and validation
    Private,
}

/// The public endpoints of the e-learning API, in evaluation order.
pub fn default_public_rules() -> Vec<RouteRule> {
    vec![
        RouteRule::exact("/auth/login"),
        RouteRule::exact("/auth/signup"),
        RouteRule::exact("/auth/check-username"),
        RouteRule::exact("/auth/check-email"),
        RouteRule::exact("/courses"),
        RouteRule::exact("/courses/highest-enrolled-users-count"),
        RouteRule::exact("/health"),
        RouteRule::prefix("/instructor/"),
        RouteRule::prefix("/feedback/"),
        RouteRule::prefix("/swagger-ui/"),
        RouteRule::prefix("/v3/api-docs/"),
    ]
}

/// Ordered, immutable set of public-route rules.
#[derive(Debug, Clone)]
pub struct RouteClassifier {
    rules: Vec<RouteRule>,
}

impl RouteClassifier {
    /// Build a classifier, rejecting rule sets that cannot behave as written.
    pub fn new(rules: Vec<RouteRule>) -> Result<Self, ClassifierError> {
        for (idx, rule) in rules.iter().enumerate() {
            if rule.pattern.is_empty() {
                return Err(ClassifierError::EmptyPattern(idx));
            }
            if !rule.pattern.starts_with('/') {
                return Err(ClassifierError::NotAbsolute(rule.pattern.clone()));
            }

            for earlier in &rules[..idx] {
                if earlier == rule {
                    return Err(ClassifierError::Duplicate(rule.pattern.clone()));
                }
                if rule.kind == MatchKind::Exact
                    && earlier.kind == MatchKind::Prefix
                    && rule.pattern.starts_with(&earlier.pattern)
                {
                    return Err(ClassifierError::Shadowed {
                        exact: rule.pattern.clone(),
                        prefix: earlier.pattern.clone(),
                    });
                }
            }
        }

        Ok(Self { rules })
    }

    /// Classifier over [`default_public_rules`].
    pub fn with_defaults() -> Self {
        Self {
            rules: default_public_rules(),
        }
    }

    pub fn rules(&self) -> &[RouteRule] {
        &self.rules
    }

    /// Whether `path` bypasses authentication.
    pub fn is_public(&self, path: &str) -> bool {
        self.rules.iter().any(|rule| rule.matches(path))
    }

    /// Classify a request by method and path.
    pub fn classify(&self, method: &Method, path: &str) -> RouteClass {
        if *method == Method::OPTIONS || self.is_public(path) {
            RouteClass::Public
        } else {
            RouteClass::Private
        }
    }
}

impl Default for RouteClassifier {
    fn default() -> Self {
        Self::with_defaults()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_rules_are_valid() {
        assert!(RouteClassifier::new(default_public_rules()).is_ok());
    }

    #[test]
    fn exact_rule_does_not_match_sub_resources() {
        let classifier = RouteClassifier::with_defaults();
        assert!(classifier.is_public("/courses"));
        assert!(!classifier.is_public("/courses/enrolled-courses"));
        assert!(!classifier.is_public("/courses/"));
        assert!(!classifier.is_public("/courses/my-courses"));
        assert!(classifier.is_public("/courses/highest-enrolled-users-count"));
    }

    #[test]
    fn prefix_rule_matches_everything_below() {
        let classifier = RouteClassifier::with_defaults();
        assert!(classifier.is_public("/swagger-ui/index.html"));
        assert!(classifier.is_public("/v3/api-docs/openapi.json"));
        assert!(classifier.is_public("/feedback/course/7/average-rating"));
        assert!(!classifier.is_public("/swagger-ui"));
    }

    #[test]
    fn private_paths() {
        let classifier = RouteClassifier::with_defaults();
        assert!(!classifier.is_public("/users"));
        assert!(!classifier.is_public("/users/me"));
        assert!(!classifier.is_public("/auth/login/extra"));
        assert!(!classifier.is_public("/"));
        assert!(!classifier.is_public(""));
    }

    #[test]
    fn options_is_always_public() {
        let classifier = RouteClassifier::with_defaults();
        assert_eq!(classifier.classify(&Method::OPTIONS, "/users"), RouteClass::Public);
        assert_eq!(classifier.classify(&Method::GET, "/users"), RouteClass::Private);
        assert_eq!(classifier.classify(&Method::GET, "/courses"), RouteClass::Public);
        assert_eq!(
            classifier.classify(&Method::POST, "/courses/enrolled-courses"),
            RouteClass::Private
        );
    }

    #[test]
    fn exact_rule_after_covering_prefix_is_rejected() {
        let err = RouteClassifier::new(vec![
            RouteRule::prefix("/courses"),
            RouteRule::exact("/courses/enrolled-courses"),
        ])
        .unwrap_err();
        assert_eq!(
            err,
            ClassifierError::Shadowed {
                exact: "/courses/enrolled-courses".to_string(),
                prefix: "/courses".to_string(),
            }
        );
    }

    #[test]
    fn exact_rule_before_prefix_is_allowed() {
        let classifier = RouteClassifier::new(vec![
            RouteRule::exact("/docs"),
            RouteRule::prefix("/docs/"),
        ])
        .unwrap();
        assert!(classifier.is_public("/docs"));
        assert!(classifier.is_public("/docs/intro"));
    }

    #[test]
    fn invalid_patterns_are_rejected() {
        assert_eq!(
            RouteClassifier::new(vec![RouteRule::exact("")]).unwrap_err(),
            ClassifierError::EmptyPattern(0)
        );
        assert_eq!(
            RouteClassifier::new(vec![RouteRule::prefix("swagger-ui/")]).unwrap_err(),
            ClassifierError::NotAbsolute("swagger-ui/".to_string())
        );
        assert_eq!(
            RouteClassifier::new(vec![RouteRule::exact("/a"), RouteRule::exact("/a")]).unwrap_err(),
            ClassifierError::Duplicate("/a".to_string())
        );
    }
}
