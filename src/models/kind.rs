//! Type prefixes used to build fullnames.

use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// Kinds of remote objects that carry a fullname.
///
/// A fullname is `<prefix>_<id>`, e.g. `t3_2gmzqe` for a submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Kind {
    Comment,
    Redditor,
    Submission,
    Subreddit,
}

impl Kind {
    /// Returns the fullname prefix of this kind.
    pub fn prefix(&self) -> &'static str {
        match self {
            Kind::Comment => "t1",
            Kind::Redditor => "t2",
            Kind::Submission => "t3",
            Kind::Subreddit => "t5",
        }
    }

    /// Builds the fullname of an object of this kind.
    pub fn fullname(&self, id: &str) -> String {
        format!("{}_{}", self.prefix(), id)
    }
}

impl std::fmt::Display for Kind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.prefix())
    }
}

impl FromStr for Kind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "t1" => Ok(Kind::Comment),
            "t2" => Ok(Kind::Redditor),
            "t3" => Ok(Kind::Submission),
            "t5" => Ok(Kind::Subreddit),
            _ => Err(format!("Unknown kind prefix: {}", s)),
        }
    }
}

/// Splits a fullname into its kind and id.
pub fn split_fullname(fullname: &str) -> Option<(Kind, &str)> {
    let (prefix, id) = fullname.split_once('_')?;
    let kind = prefix.parse().ok()?;
    Some((kind, id))
}
