//! Bundle and drop policy values.

use std::fmt;

use serde::{Deserialize, Serialize};

/// What a build declares for one policy (`bundle` or `drop`).
///
/// In `Gemcut.toml` the value is the string `"all"` or `"none"`, an array of
/// gem names, or absent (`Unspecified`).
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "RawPolicy", into = "RawPolicy")]
pub enum PolicyValue {
    /// Every gem not otherwise excluded.
    All,
    /// No gems.
    None,
    /// Not declared; resolves like `None` but can pick up a default.
    #[default]
    Unspecified,
    /// Gem names; duplicates allowed, order irrelevant.
    Explicit(Vec<String>),
}

impl PolicyValue {
    pub fn explicit<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        PolicyValue::Explicit(names.into_iter().map(Into::into).collect())
    }

    pub fn is_all(&self) -> bool {
        matches!(self, PolicyValue::All)
    }

    pub fn is_unspecified(&self) -> bool {
        matches!(self, PolicyValue::Unspecified)
    }

    /// Fall back to `default` when this value was never declared.
    pub fn or_default_from(&self, default: &PolicyValue) -> PolicyValue {
        if self.is_unspecified() {
            default.clone()
        } else {
            self.clone()
        }
    }
}

impl fmt::Display for PolicyValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PolicyValue::All => f.write_str("all"),
            PolicyValue::None => f.write_str("none"),
            PolicyValue::Unspecified => f.write_str("unspecified"),
            PolicyValue::Explicit(names) => write!(f, "[{}]", names.join(", ")),
        }
    }
}

/// On-disk shape of a policy value.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
enum RawPolicy {
    Keyword(String),
    List(Vec<String>),
}

impl TryFrom<RawPolicy> for PolicyValue {
    type Error = String;

    fn try_from(raw: RawPolicy) -> Result<Self, Self::Error> {
        match raw {
            RawPolicy::Keyword(word) => match word.as_str() {
                "all" => Ok(PolicyValue::All),
                "none" => Ok(PolicyValue::None),
                "unspecified" => Ok(PolicyValue::Unspecified),
                other => Err(format!(
                    "invalid policy '{other}': expected \"all\", \"none\" or a list of gem names"
                )),
            },
            RawPolicy::List(names) => Ok(PolicyValue::Explicit(names)),
        }
    }
}

impl From<PolicyValue> for RawPolicy {
    fn from(value: PolicyValue) -> Self {
        match value {
            PolicyValue::All => RawPolicy::Keyword("all".to_string()),
            PolicyValue::None => RawPolicy::Keyword("none".to_string()),
            PolicyValue::Unspecified => RawPolicy::Keyword("unspecified".to_string()),
            PolicyValue::Explicit(names) => RawPolicy::List(names),
        }
    }
}
