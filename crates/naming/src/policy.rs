use std::fmt;
use std::str::FromStr;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// How object names are scoped within a document.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum NamingPolicy {
	/// Every name is unique across the whole document.
	#[default]
	#[cfg_attr(feature = "serde", serde(rename = "project-wide"))]
	ProjectWide,
	/// Names are unique within their top-level subtree only; top-level
	/// names remain unique across the whole document.
	#[cfg_attr(feature = "serde", serde(rename = "toplevel-contextual"))]
	TopLevelContextual,
}

impl NamingPolicy {
	/// The string form persisted in project files.
	pub fn as_str(self) -> &'static str {
		match self {
			Self::ProjectWide => "project-wide",
			Self::TopLevelContextual => "toplevel-contextual",
		}
	}
}

impl fmt::Display for NamingPolicy {
	fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
		f.write_str(self.as_str())
	}
}

/// Error parsing a [`NamingPolicy`] from its persisted string form.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown naming policy {0:?}, expected \"project-wide\" or \"toplevel-contextual\"")]
pub struct ParsePolicyError(String);

impl FromStr for NamingPolicy {
	type Err = ParsePolicyError;

	fn from_str(s: &str) -> Result<Self, Self::Err> {
		match s {
			"project-wide" => Ok(Self::ProjectWide),
			"toplevel-contextual" => Ok(Self::TopLevelContextual),
			other => Err(ParsePolicyError(other.to_owned())),
		}
	}
}
