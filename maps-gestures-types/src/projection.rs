//! Projection of the map as reported by the style.

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use crate::error::TypesError;

/// Projection the map is currently rendered with.
///
/// A style without an explicit projection is rendered in mercator, so hosts report `None`
/// rather than guessing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum ProjectionName {
    /// Flat web mercator.
    Mercator,
    /// 3d globe.
    Globe,
}

impl ProjectionName {
    /// Name used in style documents.
    pub fn as_str(&self) -> &'static str {
        match self {
            ProjectionName::Mercator => "mercator",
            ProjectionName::Globe => "globe",
        }
    }
}

impl Display for ProjectionName {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ProjectionName {
    type Err = TypesError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "mercator" => Ok(ProjectionName::Mercator),
            "globe" => Ok(ProjectionName::Globe),
            other => Err(TypesError::UnknownProjection(other.to_string())),
        }
    }
}
