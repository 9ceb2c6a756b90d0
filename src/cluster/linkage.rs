use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::anchor::AnchorGrouping;
use super::transitive::TransitiveGrouping;
use super::traits::Grouping;
use crate::error::Error;

/// Which grouping strategy a run uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Linkage {
    /// Compare candidates with the group's anchor only ([`AnchorGrouping`]).
    #[default]
    Anchor,
    /// Merge connected components of the similarity graph ([`TransitiveGrouping`]).
    Transitive,
}

impl Linkage {
    /// Lowercase name, as used in configuration.
    pub fn as_str(self) -> &'static str {
        match self {
            Linkage::Anchor => "anchor",
            Linkage::Transitive => "transitive",
        }
    }
}

impl fmt::Display for Linkage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Linkage {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "anchor" => Ok(Linkage::Anchor),
            "transitive" => Ok(Linkage::Transitive),
            _ => Err(Error::InvalidParameter {
                name: "linkage",
                message: "expected `anchor` or `transitive`",
            }),
        }
    }
}

impl Grouping for Linkage {
    fn group(&self, n: usize, similar: &mut dyn FnMut(usize, usize) -> bool) -> Vec<Vec<usize>> {
        match self {
            Linkage::Anchor => AnchorGrouping.group(n, similar),
            Linkage::Transitive => TransitiveGrouping.group(n, similar),
        }
    }
}
