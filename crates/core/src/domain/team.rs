use serde::{Deserialize, Serialize};
use std::fmt;

/// Cosmetic affiliation used to pick decorative image variants.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Team {
    Red,
    Yellow,
    Blue,
}

pub const TEAMS: [Team; 3] = [Team::Red, Team::Yellow, Team::Blue];

impl Team {
    pub fn as_str(self) -> &'static str {
        match self {
            Team::Red => "RED",
            Team::Yellow => "YELLOW",
            Team::Blue => "BLUE",
        }
    }

    pub fn parse(s: &str) -> Option<Self> {
        TEAMS
            .into_iter()
            .find(|team| team.as_str().eq_ignore_ascii_case(s.trim()))
    }
}

impl fmt::Display for Team {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A team that may be explicitly unset, as stored on user records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(into = "String", from = "String")]
pub enum OptionalTeam {
    Known(Team),
    #[default]
    Unknown,
}

impl OptionalTeam {
    pub fn known(self) -> Option<Team> {
        match self {
            OptionalTeam::Known(team) => Some(team),
            OptionalTeam::Unknown => None,
        }
    }
}

impl From<Option<Team>> for OptionalTeam {
    fn from(team: Option<Team>) -> Self {
        team.map_or(OptionalTeam::Unknown, OptionalTeam::Known)
    }
}

impl From<String> for OptionalTeam {
    fn from(s: String) -> Self {
        Team::parse(&s).into()
    }
}

impl From<OptionalTeam> for String {
    fn from(team: OptionalTeam) -> Self {
        match team {
            OptionalTeam::Known(team) => team.as_str().to_string(),
            OptionalTeam::Unknown => "UNKNOWN".to_string(),
        }
    }
}
