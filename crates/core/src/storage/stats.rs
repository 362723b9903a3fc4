use anyhow::Context;
use uuid::Uuid;

use crate::domain::post::{TeamRanking, User};
use crate::domain::team::{OptionalTeam, Team};
use crate::rankings::sort_rankings;

pub async fn user_for_session(pool: &sqlx::PgPool, session_id: &str) -> anyhow::Result<Option<User>> {
    let Ok(session_id) = Uuid::parse_str(session_id) else {
        return Ok(None);
    };

    let row = sqlx::query_as::<_, (Uuid, String, Option<String>)>(
        "SELECT u.id, u.first_name, u.team \
         FROM sessions s \
         JOIN users u ON u.id = s.user_id \
         WHERE s.id = $1 AND s.expiration_date > now() \
         LIMIT 1",
    )
    .bind(session_id)
    .fetch_optional(pool)
    .await
    .context("select session user failed")?;

    Ok(row.map(|(id, first_name, team)| User {
        id,
        first_name,
        team: team.map_or(OptionalTeam::Unknown, OptionalTeam::from),
    }))
}

pub async fn total_post_reads(pool: &sqlx::PgPool) -> anyhow::Result<i64> {
    let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM post_reads")
        .fetch_one(pool)
        .await
        .context("count post_reads failed")?;
    Ok(count)
}

/// Distinct signed-in users plus distinct anonymous clients.
pub async fn reader_count(pool: &sqlx::PgPool) -> anyhow::Result<i64> {
    let count: i64 = sqlx::query_scalar(
        "SELECT COUNT(DISTINCT COALESCE(user_id::text, client_id)) FROM post_reads",
    )
    .fetch_one(pool)
    .await
    .context("count readers failed")?;
    Ok(count)
}

/// Reads per team, most reads first; ties broken by team name.
pub async fn team_rankings(pool: &sqlx::PgPool) -> anyhow::Result<Vec<TeamRanking>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT upper(trim(u.team)) AS team, COUNT(*) AS reads \
         FROM post_reads pr \
         JOIN users u ON u.id = pr.user_id \
         WHERE u.team IS NOT NULL \
         GROUP BY upper(trim(u.team)) \
         ORDER BY reads DESC, team ASC",
    )
    .fetch_all(pool)
    .await
    .context("select team rankings failed")?;

    Ok(merge_rankings(rows))
}

/// Folds raw `(team, reads)` rows into one entry per known team, sorted like the query.
/// Spellings that differ only in case or whitespace count as the same team.
pub fn merge_rankings(rows: Vec<(String, i64)>) -> Vec<TeamRanking> {
    let mut rankings: Vec<TeamRanking> = Vec::new();
    for (raw, metric) in rows {
        let Some(team) = Team::parse(&raw) else {
            continue;
        };
        match rankings.iter_mut().find(|r| r.team == team) {
            Some(existing) => existing.metric += metric,
            None => rankings.push(TeamRanking { team, metric }),
        }
    }

    rankings.sort_by(|a, b| a.team.as_str().cmp(b.team.as_str()));
    sort_rankings(&mut rankings);
    rankings
}

/// Most-read slugs, skipping anything `exclude_reader` has already read.
pub async fn top_read_slugs(
    pool: &sqlx::PgPool,
    exclude_reader: Option<Uuid>,
    limit: i64,
) -> anyhow::Result<Vec<(String, i64)>> {
    let rows = sqlx::query_as::<_, (String, i64)>(
        "SELECT post_slug, COUNT(*) AS reads \
         FROM post_reads \
         WHERE $1::uuid IS NULL \
            OR post_slug NOT IN (SELECT post_slug FROM post_reads WHERE user_id = $1) \
         GROUP BY post_slug \
         ORDER BY reads DESC, post_slug ASC \
         LIMIT $2",
    )
    .bind(exclude_reader)
    .bind(limit)
    .fetch_all(pool)
    .await
    .context("select top read slugs failed")?;
    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::rankings::extract_leader;

    #[test]
    fn merges_team_spellings_before_ranking() {
        let rows = vec![
            ("BLUE".to_string(), 5),
            ("red".to_string(), 3),
            ("RED".to_string(), 4),
            ("Yellow ".to_string(), 1),
            ("green".to_string(), 99),
        ];

        let rankings = merge_rankings(rows);
        assert_eq!(
            rankings,
            vec![
                TeamRanking { team: Team::Red, metric: 7 },
                TeamRanking { team: Team::Blue, metric: 5 },
                TeamRanking { team: Team::Yellow, metric: 1 },
            ]
        );
        assert_eq!(extract_leader(&rankings), Some(Team::Red));
    }

    #[test]
    fn ties_are_broken_by_team_name() {
        let rows = vec![("YELLOW".to_string(), 2), ("BLUE".to_string(), 2)];
        let teams: Vec<_> = merge_rankings(rows).into_iter().map(|r| r.team).collect();
        assert_eq!(teams, vec![Team::Blue, Team::Yellow]);
    }
}
