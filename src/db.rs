use anyhow::Context;
use chrono::{DateTime, Duration, Utc};
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::{AttemptRecord, GameType};
use crate::scoring;

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

/// Score one completed game session and persist the attempt: blend the raw
/// factors into a 0-100 score, then append it to the history.
pub async fn record_attempt(
    pool: &PgPool,
    game_type: GameType,
    accuracy_factor: f64,
    time_factor: f64,
    accuracy_weight: f64,
) -> anyhow::Result<AttemptRecord> {
    let score = scoring::combine_score(accuracy_factor, time_factor, accuracy_weight);
    insert_attempt(pool, game_type, score).await
}

pub async fn insert_attempt(
    pool: &PgPool,
    game_type: GameType,
    score: f64,
) -> anyhow::Result<AttemptRecord> {
    let record = AttemptRecord {
        id: Uuid::new_v4(),
        game_type,
        score,
        recorded_at: Utc::now(),
    };

    sqlx::query(
        r#"
        INSERT INTO cognition_tracker.attempts (id, game_type, score, recorded_at)
        VALUES ($1, $2, $3, $4)
        "#,
    )
    .bind(record.id)
    .bind(record.game_type.as_str())
    .bind(record.score)
    .bind(record.recorded_at)
    .execute(pool)
    .await?;

    Ok(record)
}

/// Snapshot of the stored history in the order attempts were recorded.
pub async fn fetch_attempts(
    pool: &PgPool,
    game: Option<GameType>,
) -> anyhow::Result<Vec<AttemptRecord>> {
    let mut query = String::from(
        "SELECT id, game_type, score, recorded_at \
         FROM cognition_tracker.attempts",
    );

    if game.is_some() {
        query.push_str(" WHERE game_type = $1");
    }
    query.push_str(" ORDER BY seq");

    let mut rows = sqlx::query(&query);
    if let Some(value) = game {
        rows = rows.bind(value.as_str());
    }

    let records = rows.fetch_all(pool).await?;
    let mut attempts = Vec::new();

    for row in records {
        let raw: String = row.get("game_type");
        let game_type = raw
            .parse::<GameType>()
            .with_context(|| format!("stored attempt has unrecognized game type {raw:?}"))?;
        attempts.push(AttemptRecord {
            id: row.get("id"),
            game_type,
            score: row.get("score"),
            recorded_at: row.get("recorded_at"),
        });
    }

    Ok(attempts)
}

/// Bulk reset. Deleting from an already empty history is a no-op.
pub async fn clear_attempts(pool: &PgPool) -> anyhow::Result<u64> {
    let result = sqlx::query("DELETE FROM cognition_tracker.attempts")
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    let attempts = vec![
        ("seed-001", GameType::Memory, 72.5, 9),
        ("seed-002", GameType::Memory, 81.0, 6),
        ("seed-003", GameType::Reaction, 64.0, 6),
        ("seed-004", GameType::Stroop, 58.5, 4),
        ("seed-005", GameType::Math, 90.0, 3),
        ("seed-006", GameType::Pattern, 69.5, 2),
        ("seed-007", GameType::NumberRecall, 77.0, 1),
    ];

    for (source_key, game_type, score, days_ago) in attempts {
        let recorded_at = Utc::now() - Duration::days(days_ago);
        sqlx::query(
            r#"
            INSERT INTO cognition_tracker.attempts
            (id, game_type, score, recorded_at, source_key)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(game_type.as_str())
        .bind(score)
        .bind(recorded_at)
        .bind(source_key)
        .execute(pool)
        .await?;
    }

    Ok(())
}

/// Import previously exported attempts. Rows carry their own timestamps and
/// an optional source key used to skip duplicates on re-import.
pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        game_type: GameType,
        score: f64,
        recorded_at: DateTime<Utc>,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for result in reader.deserialize::<CsvRow>() {
        let row = result?;
        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let result = sqlx::query(
            r#"
            INSERT INTO cognition_tracker.attempts
            (id, game_type, score, recorded_at, source_key)
            VALUES ($1, $2, $3, $4, $5)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(Uuid::new_v4())
        .bind(row.game_type.as_str())
        .bind(row.score)
        .bind(row.recorded_at)
        .bind(source_key)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}
