use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::fmt;
use std::str::FromStr;

/// WCAG conformance level of a success criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum Level {
    A,
    AA,
    AAA,
    /// Criteria with no level in the source data (for example obsolete ones).
    #[serde(other)]
    Unspecified,
}

impl Level {
    pub const ALL: [Level; 3] = [Level::A, Level::AA, Level::AAA];

    pub fn as_str(&self) -> &'static str {
        match self {
            Level::A => "A",
            Level::AA => "AA",
            Level::AAA => "AAA",
            Level::Unspecified => "",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Level {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_uppercase().as_str() {
            "A" => Ok(Level::A),
            "AA" => Ok(Level::AA),
            "AAA" => Ok(Level::AAA),
            other => Err(format!("unknown WCAG level '{other}' (expected A, AA or AAA)")),
        }
    }
}

/// Set of levels a schedule is generated for. Never holds
/// [`Level::Unspecified`]; level names are parsed like [`Level::from_str`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "Vec<String>", into = "Vec<String>")]
pub struct LevelFilter(BTreeSet<Level>);

impl LevelFilter {
    pub fn new<I>(levels: I) -> Self
    where
        I: IntoIterator<Item = Level>,
    {
        Self(
            levels
                .into_iter()
                .filter(|level| *level != Level::Unspecified)
                .collect(),
        )
    }

    pub fn all() -> Self {
        Self::new(Level::ALL)
    }

    pub fn contains(&self, level: Level) -> bool {
        self.0.contains(&level)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn levels(&self) -> impl Iterator<Item = Level> + '_ {
        self.0.iter().copied()
    }

    /// Parses a comma or whitespace separated list such as `A,AA`.
    pub fn parse_list(input: &str) -> Result<Self, String> {
        let levels = input
            .split(|c: char| c == ',' || c.is_whitespace())
            .filter(|part| !part.is_empty())
            .map(Level::from_str)
            .collect::<Result<Vec<_>, _>>()?;
        if levels.is_empty() {
            return Err("at least one level is required".into());
        }
        Ok(Self::new(levels))
    }
}

impl TryFrom<Vec<String>> for LevelFilter {
    type Error = String;

    fn try_from(names: Vec<String>) -> Result<Self, Self::Error> {
        let levels = names
            .iter()
            .map(|name| Level::from_str(name))
            .collect::<Result<Vec<_>, _>>()?;
        Ok(Self::new(levels))
    }
}

impl From<LevelFilter> for Vec<String> {
    fn from(filter: LevelFilter) -> Self {
        filter.levels().map(|level| level.as_str().to_string()).collect()
    }
}

impl Default for LevelFilter {
    fn default() -> Self {
        Self::new([Level::A, Level::AA])
    }
}

impl fmt::Display for LevelFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let joined = self
            .0
            .iter()
            .map(Level::as_str)
            .collect::<Vec<_>>()
            .join(", ");
        write!(f, "{joined}")
    }
}
