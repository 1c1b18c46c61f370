//! Text editor settings.

use serde::{Deserialize, Serialize};

/// How `view` treats a `view_range` that falls outside the file.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ViewRangePolicy {
    /// Out-of-range values are reported as errors.
    #[default]
    Strict,
    /// Out-of-range values are pulled back inside the file.
    Clamp,
}

impl ViewRangePolicy {
    /// Returns the policy name as used in configuration files.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Strict => "strict",
            Self::Clamp => "clamp",
        }
    }
}

/// Settings for [`TextEditor`](crate::TextEditor).
///
/// # Examples
///
/// ```
/// use agent_vfs_tools::{EditorConfig, ViewRangePolicy};
///
/// let config = EditorConfig::default()
///     .with_view_range_policy(ViewRangePolicy::Clamp)
///     .with_max_view_lines(200);
/// assert_eq!(config.max_view_lines, Some(200));
/// ```
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct EditorConfig {
    /// Out-of-range handling for `view_range`.
    pub view_range_policy: ViewRangePolicy,
    /// Longest file shown by a `view` without a range; longer output is cut.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_view_lines: Option<usize>,
}

impl EditorConfig {
    /// Sets the `view_range` policy.
    #[must_use]
    pub const fn with_view_range_policy(mut self, policy: ViewRangePolicy) -> Self {
        self.view_range_policy = policy;
        self
    }

    /// Limits the number of lines a rangeless `view` returns.
    #[must_use]
    pub const fn with_max_view_lines(mut self, lines: usize) -> Self {
        self.max_view_lines = Some(lines);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_strict_and_unlimited() {
        let config = EditorConfig::default();
        assert_eq!(config.view_range_policy, ViewRangePolicy::Strict);
        assert_eq!(config.max_view_lines, None);
    }

    #[test]
    fn test_deserialize_partial() {
        let config: EditorConfig =
            serde_json::from_str(r#"{"view_range_policy": "clamp"}"#).unwrap();
        assert_eq!(config.view_range_policy, ViewRangePolicy::Clamp);
        assert_eq!(config.max_view_lines, None);
    }

    #[test]
    fn test_policy_as_str() {
        assert_eq!(ViewRangePolicy::Strict.as_str(), "strict");
        assert_eq!(ViewRangePolicy::Clamp.as_str(), "clamp");
    }
}
