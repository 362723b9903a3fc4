use anyhow::Context;
use uuid::Uuid;

use crate::domain::team::TEAMS;

/// One stub reader per team, with stable ids so reseeding is idempotent.
fn stub_user_id(team_idx: usize) -> Uuid {
    Uuid::from_u128(0x6b6f_735f_7374_7562_0000_0000_0000_0000 | (team_idx as u128 + 1))
}

pub async fn seed_stub_reads(
    pool: &sqlx::PgPool,
    slugs: &[String],
    size: usize,
) -> anyhow::Result<u64> {
    anyhow::ensure!(
        (1..=5000).contains(&size),
        "seed size must be 1..=5000 (got {size})"
    );
    anyhow::ensure!(!slugs.is_empty(), "at least one post slug is required to seed reads");

    let mut tx = pool.begin().await.context("begin transaction failed")?;

    for (idx, team) in TEAMS.iter().enumerate() {
        sqlx::query(
            "INSERT INTO users (id, first_name, team) VALUES ($1, $2, $3) \
             ON CONFLICT (id) DO NOTHING",
        )
        .bind(stub_user_id(idx))
        .bind(format!("Stub {}", team.as_str().to_lowercase()))
        .bind(team.as_str())
        .execute(&mut *tx)
        .await
        .context("insert stub user failed")?;
    }

    let mut inserted: u64 = 0;
    for i in 1..=size {
        let slug = &slugs[i % slugs.len()];

        // Every fourth read is anonymous.
        let (user_id, client_id) = if i % 4 == 0 {
            (None, Some(format!("client-{i:06}")))
        } else {
            (Some(stub_user_id(i % TEAMS.len())), None)
        };

        let res = sqlx::query(
            "INSERT INTO post_reads (post_slug, user_id, client_id) VALUES ($1, $2, $3)",
        )
        .bind(slug)
        .bind(user_id)
        .bind(client_id)
        .execute(&mut *tx)
        .await
        .context("insert post_reads failed")?;

        inserted += res.rows_affected();
    }

    tx.commit().await.context("commit transaction failed")?;
    Ok(inserted)
}
