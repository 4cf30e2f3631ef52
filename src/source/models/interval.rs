use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::source::Error;

/// How often a random photo changes.
///
/// Converting from a string is lenient: only `"daily"` and `"weekly"` are
/// recognised and anything else falls back to [`Interval::PerRequest`].
/// Use [`str::parse`] for a conversion that rejects unknown names.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Interval {
    #[default]
    PerRequest,
    Daily,
    Weekly,
}

impl Interval {
    /// Path segment of the interval, without the leading slash.
    pub fn segment(self) -> &'static str {
        match self {
            Self::PerRequest => "random",
            Self::Daily => "daily",
            Self::Weekly => "weekly",
        }
    }

    pub fn is_pinned(self) -> bool {
        !matches!(self, Self::PerRequest)
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.segment())
    }
}

impl From<&str> for Interval {
    fn from(value: &str) -> Self {
        match value {
            "daily" => Self::Daily,
            "weekly" => Self::Weekly,
            _ => Self::PerRequest,
        }
    }
}

impl From<String> for Interval {
    fn from(value: String) -> Self {
        value.as_str().into()
    }
}

impl From<Interval> for String {
    fn from(value: Interval) -> Self {
        value.segment().to_owned()
    }
}

impl FromStr for Interval {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "random" => Ok(Self::PerRequest),
            "daily" => Ok(Self::Daily),
            "weekly" => Ok(Self::Weekly),
            _ => Err(Error::UnknownInterval(s.to_owned())),
        }
    }
}
