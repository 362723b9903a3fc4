use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::team::{OptionalTeam, Team};

/// Blog post list item, passed through to renderers unchanged.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostSummary {
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub date: Option<NaiveDate>,
    #[serde(default)]
    pub banner_url: Option<String>,
    #[serde(default)]
    pub reads: Option<i64>,
}

impl PostSummary {
    pub fn path(&self) -> String {
        format!("/blog/{}", self.slug)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TeamRanking {
    pub team: Team,
    pub metric: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    pub id: Uuid,
    pub first_name: String,
    pub team: OptionalTeam,
}
