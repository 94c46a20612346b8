use serde::{Deserialize, Serialize};

/// The closed set of legal-document categories the index partitions on.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "lowercase")]
pub enum PolicyType {
    Terms,
    Cookie,
    Privacy,
}

impl PolicyType {
    /// Display label used in prompt context blocks and source citations.
    pub fn label(self) -> &'static str {
        match self {
            PolicyType::Terms => "Terms & Conditions",
            PolicyType::Cookie => "Cookie Policy",
            PolicyType::Privacy => "Privacy Policy",
        }
    }

    pub fn tag(self) -> &'static str {
        match self {
            PolicyType::Terms => "terms",
            PolicyType::Cookie => "cookie",
            PolicyType::Privacy => "privacy",
        }
    }

    /// Decodes an untyped tag, defaulting unrecognized values to `Terms`.
    pub fn from_tag(tag: &str) -> PolicyType {
        match tag {
            "cookie" => PolicyType::Cookie,
            "privacy" => PolicyType::Privacy,
            _ => PolicyType::Terms,
        }
    }
}

#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Low,
    Medium,
    High,
}

/// A single concern surfaced by risk analysis of a document.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Risk {
    pub title: String,
    pub description: String,
    pub severity: Severity,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn policy_type_round_trips_through_tag() {
        for policy in [PolicyType::Terms, PolicyType::Cookie, PolicyType::Privacy] {
            assert_eq!(PolicyType::from_tag(policy.tag()), policy);
        }
    }

    #[test]
    fn unrecognized_tag_defaults_to_terms() {
        assert_eq!(PolicyType::from_tag("eula"), PolicyType::Terms);
        assert_eq!(PolicyType::from_tag(""), PolicyType::Terms);
    }

    #[test]
    fn severity_serializes_lowercase() {
        assert_eq!(
            serde_json::to_string(&Severity::Medium).unwrap(),
            "\"medium\""
        );
    }
}
