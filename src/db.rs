use anyhow::{bail, Context};
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::categories::CategoryKind;
use crate::models::{Category, NewStory, ReadEvent, SaveEvent, Story};

const STORY_COLUMNS: &str =
    "id, title, author, hustle, body, rating, category, views, updated_at";

pub async fn init_db(pool: &PgPool) -> anyhow::Result<()> {
    sqlx::migrate!("./migrations").run(pool).await?;
    Ok(())
}

fn story_from_row(row: &PgRow) -> Story {
    Story {
        id: row.get("id"),
        title: row.get("title"),
        author: row.get("author"),
        hustle: row.get("hustle"),
        body: row.get("body"),
        rating: row.get("rating"),
        category: row.get("category"),
        views: row.get("views"),
        updated_at: row.get("updated_at"),
    }
}

pub async fn seed(pool: &PgPool) -> anyhow::Result<()> {
    for kind in CategoryKind::KNOWN {
        sqlx::query(
            r#"
            INSERT INTO side_hustle.categories (id, name)
            VALUES ($1, $2)
            ON CONFLICT (id) DO UPDATE SET name = EXCLUDED.name
            "#,
        )
        .bind(kind.key())
        .bind(kind.display_name())
        .execute(pool)
        .await?;
    }

    let stories = vec![
        (
            "seed-001",
            "From spare room to print shop",
            "Avery Lee",
            "Print-on-demand posters",
            "Avery turned a weekend design habit into a poster store that now covers rent.",
            5,
            CategoryKind::OnlineBusiness,
            420,
        ),
        (
            "seed-002",
            "Evenings writing API docs",
            "Jules Moreno",
            "Technical writing",
            "Jules picks up documentation contracts after the day job, two evenings a week.",
            4,
            CategoryKind::Freelancing,
            310,
        ),
        (
            "seed-003",
            "Ceramics at the Sunday market",
            "Kiara Patel",
            "Handmade mugs",
            "Kiara sells a small batch of mugs every weekend and takes custom orders online.",
            5,
            CategoryKind::Creative,
            275,
        ),
        (
            "seed-004",
            "A browser extension with paying users",
            "Tomás Reyes",
            "Micro SaaS",
            "A tab manager built for himself found 900 subscribers within a year.",
            4,
            CategoryKind::Tech,
            510,
        ),
        (
            "seed-005",
            "Dividends that pay for groceries",
            "Mei Tanaka",
            "Dividend investing",
            "Mei automated small monthly contributions and tracks the income in a spreadsheet.",
            3,
            CategoryKind::Investing,
            190,
        ),
        (
            "seed-006",
            "Bike repair on the block",
            "Oscar Lind",
            "Mobile bike repair",
            "Oscar fixes bikes in his neighbours' driveways and books jobs through a group chat.",
            4,
            CategoryKind::LocalServices,
            145,
        ),
    ];

    for (source_key, title, author, hustle, body, rating, category, views) in stories {
        sqlx::query(
            r#"
            INSERT INTO side_hustle.stories
            (title, author, hustle, body, rating, category, views, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(title)
        .bind(author)
        .bind(hustle)
        .bind(body)
        .bind(rating)
        .bind(category.key())
        .bind(views as i64)
        .bind(source_key)
        .execute(pool)
        .await?;
    }

    info!("seed data applied");
    Ok(())
}

pub async fn fetch_categories(pool: &PgPool) -> anyhow::Result<Vec<Category>> {
    let rows = sqlx::query("SELECT id, name FROM side_hustle.categories ORDER BY name")
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| Category {
            id: row.get("id"),
            name: row.get("name"),
            story_count: 0,
        })
        .collect())
}

/// Every story in id order. Category filtering happens in `catalog::filter_stories`.
pub async fn fetch_stories(pool: &PgPool) -> anyhow::Result<Vec<Story>> {
    let query = format!("SELECT {STORY_COLUMNS} FROM side_hustle.stories ORDER BY id");
    let records = sqlx::query(&query).fetch_all(pool).await?;
    debug!(count = records.len(), "stories fetched");
    Ok(records.iter().map(story_from_row).collect())
}

pub async fn fetch_read_events(
    pool: &PgPool,
    account_id: Uuid,
) -> anyhow::Result<Vec<ReadEvent>> {
    let rows = sqlx::query(
        r#"
        SELECT story_id, created_at
        FROM side_hustle.reads
        WHERE account_id = $1
        ORDER BY created_at DESC
        "#,
    )
    .bind(account_id)
    .fetch_all(pool)
    .await?;

    Ok(rows
        .iter()
        .map(|row| ReadEvent {
            story_id: row.get("story_id"),
            created_at: row.get("created_at"),
        })
        .collect())
}

/// Appends a read event and bumps the story's view count.
pub async fn record_read(
    pool: &PgPool,
    account_id: Uuid,
    story_id: i64,
) -> anyhow::Result<ReadEvent> {
    let mut tx = pool.begin().await?;

    let updated = sqlx::query("UPDATE side_hustle.stories SET views = views + 1 WHERE id = $1")
        .bind(story_id)
        .execute(&mut *tx)
        .await?;
    if updated.rows_affected() == 0 {
        bail!("story {story_id} does not exist");
    }

    let created_at: DateTime<Utc> = sqlx::query(
        r#"
        INSERT INTO side_hustle.reads (account_id, story_id)
        VALUES ($1, $2)
        RETURNING created_at
        "#,
    )
    .bind(account_id)
    .bind(story_id)
    .fetch_one(&mut *tx)
    .await?
    .get("created_at");

    tx.commit().await?;
    debug!(%account_id, story_id, "read recorded");

    Ok(ReadEvent {
        story_id,
        created_at,
    })
}

pub async fn fetch_saved(pool: &PgPool, account_id: Uuid) -> anyhow::Result<Vec<SaveEvent>> {
    let rows = sqlx::query("SELECT story_id FROM side_hustle.saves WHERE account_id = $1")
        .bind(account_id)
        .fetch_all(pool)
        .await?;

    Ok(rows
        .iter()
        .map(|row| SaveEvent {
            account_id,
            story_id: row.get("story_id"),
        })
        .collect())
}

/// Inserts or deletes the save row so the store matches `saved`.
pub async fn set_saved(
    pool: &PgPool,
    account_id: Uuid,
    story_id: i64,
    saved: bool,
) -> anyhow::Result<()> {
    let result = if saved {
        sqlx::query(
            r#"
            INSERT INTO side_hustle.saves (account_id, story_id)
            VALUES ($1, $2)
            ON CONFLICT (account_id, story_id) DO NOTHING
            "#,
        )
        .bind(account_id)
        .bind(story_id)
        .execute(pool)
        .await?
    } else {
        sqlx::query("DELETE FROM side_hustle.saves WHERE account_id = $1 AND story_id = $2")
            .bind(account_id)
            .bind(story_id)
            .execute(pool)
            .await?
    };

    if result.rows_affected() == 0 {
        warn!(%account_id, story_id, saved, "save state was already in place");
    }
    Ok(())
}

pub async fn submit_story(pool: &PgPool, story: &NewStory) -> anyhow::Result<Story> {
    let story = story.normalized();
    story.validate()?;

    let sql = format!(
        r#"
        INSERT INTO side_hustle.stories (title, author, hustle, body, rating, category)
        VALUES ($1, $2, $3, $4, $5, $6)
        RETURNING {STORY_COLUMNS}
        "#
    );
    let row = sqlx::query(&sql)
        .bind(&story.title)
        .bind(&story.author)
        .bind(&story.hustle)
        .bind(&story.body)
        .bind(story.rating)
        .bind(&story.category)
        .fetch_one(pool)
        .await
        .context("failed to insert story")?;

    let saved = story_from_row(&row);
    info!(id = saved.id, category = %saved.category, "story submitted");
    Ok(saved)
}

pub async fn import_csv(pool: &PgPool, csv_path: &std::path::Path) -> anyhow::Result<usize> {
    #[derive(serde::Deserialize)]
    struct CsvRow {
        title: String,
        author: String,
        hustle: String,
        body: String,
        rating: i32,
        category: String,
        #[serde(default)]
        views: i64,
        source_key: Option<String>,
    }

    let mut reader = csv::Reader::from_path(csv_path)?;
    let mut inserted = 0usize;

    for (line, result) in reader.deserialize::<CsvRow>().enumerate() {
        let row = result?;
        let story = NewStory {
            title: row.title,
            author: row.author,
            hustle: row.hustle,
            body: row.body,
            rating: row.rating,
            category: row.category,
        }
        .normalized();
        if let Err(err) = story.validate() {
            warn!(line = line + 2, %err, "skipping invalid story");
            continue;
        }

        let source_key = row
            .source_key
            .unwrap_or_else(|| format!("import-{}", Uuid::new_v4()));

        let result = sqlx::query(
            r#"
            INSERT INTO side_hustle.stories
            (title, author, hustle, body, rating, category, views, source_key)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8)
            ON CONFLICT (source_key) DO NOTHING
            "#,
        )
        .bind(&story.title)
        .bind(&story.author)
        .bind(&story.hustle)
        .bind(&story.body)
        .bind(story.rating)
        .bind(&story.category)
        .bind(row.views.max(0))
        .bind(source_key)
        .execute(pool)
        .await?;

        if result.rows_affected() > 0 {
            inserted += 1;
        }
    }

    Ok(inserted)
}
