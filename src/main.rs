use std::path::PathBuf;

use anyhow::Context;
use chrono::Utc;
use clap::{Parser, Subcommand};
use sqlx::postgres::PgPoolOptions;
use tracing::info;
use tracing_subscriber::EnvFilter;
use uuid::Uuid;

mod badges;
mod catalog;
mod categories;
mod config;
mod dashboard;
mod db;
mod error;
mod insights;
mod models;
mod report;
mod saved;
mod streak;

use crate::catalog::{SortOrder, StoryQuery};
use crate::config::AppConfig;
use crate::models::NewStory;
use crate::saved::SavedSet;

#[derive(Parser)]
#[command(name = "side-hustle-stories")]
#[command(about = "Side hustle story catalog with reading streaks and badges", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create or upgrade the database schema
    InitDb,
    /// Load categories and sample stories
    Seed,
    /// Import stories from a CSV file
    Import {
        #[arg(long)]
        csv: PathBuf,
    },
    /// List stories with optional search, category filter and sort
    Stories {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        search: Option<String>,
        #[arg(long, value_enum, default_value_t = SortOrder::Newest)]
        sort: SortOrder,
        #[arg(long, default_value_t = 20)]
        limit: usize,
        #[arg(long)]
        json: bool,
    },
    /// List categories with their story counts
    Categories,
    /// Record that an account read a story
    Read {
        #[arg(long)]
        account: Uuid,
        #[arg(long)]
        story: i64,
    },
    /// Toggle whether an account has saved a story
    Save {
        #[arg(long)]
        account: Uuid,
        #[arg(long)]
        story: i64,
    },
    /// Submit a new story
    Submit {
        #[arg(long)]
        title: String,
        #[arg(long)]
        author: String,
        #[arg(long)]
        hustle: String,
        #[arg(long)]
        body: String,
        #[arg(long)]
        rating: i32,
        #[arg(long)]
        category: String,
    },
    /// Show streak, stats and badges for an account
    Dashboard {
        #[arg(long)]
        account: Uuid,
        #[arg(long)]
        json: bool,
    },
    /// Show community insights and trending stories
    Insights {
        #[arg(long, default_value_t = 5)]
        limit: usize,
    },
    /// Generate a markdown reading report for an account
    Report {
        #[arg(long)]
        account: Uuid,
        #[arg(long, default_value_t = 5)]
        trending: usize,
        #[arg(long, default_value = "report.md")]
        out: PathBuf,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let config = AppConfig::from_env()?;

    let pool = PgPoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await
        .context("failed to connect to Postgres")?;

    let today = Utc::now().date_naive();

    match cli.command {
        Commands::InitDb => {
            db::init_db(&pool).await?;
            println!("Schema ready.");
        }
        Commands::Seed => {
            db::seed(&pool).await?;
            println!("Seed data inserted.");
        }
        Commands::Import { csv } => {
            let inserted = db::import_csv(&pool, &csv).await?;
            println!("Inserted {inserted} stories from {}.", csv.display());
        }
        Commands::Stories {
            category,
            search,
            sort,
            limit,
            json,
        } => {
            let stories = db::fetch_stories(&pool).await?;
            let query = StoryQuery {
                search,
                category,
                sort,
            };
            let mut listed = catalog::filter_stories(&stories, &query);
            listed.truncate(limit);

            if json {
                println!("{}", serde_json::to_string_pretty(&listed)?);
                return Ok(());
            }

            if listed.is_empty() {
                println!("No stories match.");
                return Ok(());
            }

            for story in listed {
                println!(
                    "#{} {} by {} [{}] {} views, rated {}/5",
                    story.id,
                    story.title,
                    story.author,
                    categories::label(&story.category),
                    story.views,
                    story.rating
                );
            }
        }
        Commands::Categories => {
            let stories = db::fetch_stories(&pool).await?;
            let listed = db::fetch_categories(&pool).await?;
            let counted = categories::category_counts(&listed, &stories);

            if counted.is_empty() {
                println!("No categories yet. Run `seed` first.");
                return Ok(());
            }

            for category in counted {
                let kind = categories::CategoryKind::from_key(&category.id);
                println!(
                    "{} {} ({}): {} stories",
                    kind.emoji(),
                    category.name,
                    category.id,
                    category.story_count
                );
            }
        }
        Commands::Read { account, story } => {
            let event = db::record_read(&pool, account, story).await?;
            let reads = db::fetch_read_events(&pool, account).await?;
            println!(
                "Read story #{} on {}. Current streak: {} days.",
                event.story_id,
                streak::day_key(event.created_at.date_naive()),
                streak::streak_for(&reads, today)
            );
        }
        Commands::Save { account, story } => {
            let events = db::fetch_saved(&pool, account).await?;
            let mut saved = SavedSet::from_events(account, &events);
            let was_saved = saved.is_saved(story);
            let now_saved = saved.toggle(story);
            db::set_saved(&pool, account, story, now_saved).await?;
            info!(%account, story, was_saved, now_saved, "save toggled");

            if now_saved {
                println!("Saved story #{story}. {} stories saved.", saved.len());
            } else {
                println!("Removed story #{story}. {} stories saved.", saved.len());
            }
        }
        Commands::Submit {
            title,
            author,
            hustle,
            body,
            rating,
            category,
        } => {
            let story = NewStory {
                title,
                author,
                hustle,
                body,
                rating,
                category,
            };
            let created = db::submit_story(&pool, &story).await?;
            println!("Story #{} published: {}.", created.id, created.title);
        }
        Commands::Dashboard { account, json } => {
            let stories = db::fetch_stories(&pool).await?;
            let listed = db::fetch_categories(&pool).await?;
            let reads = db::fetch_read_events(&pool, account).await?;
            let events = db::fetch_saved(&pool, account).await?;
            let saved = SavedSet::from_events(account, &events);
            let dashboard = dashboard::build_dashboard(&stories, &listed, &reads, &saved, today);

            if json {
                println!("{}", serde_json::to_string_pretty(&dashboard)?);
                return Ok(());
            }

            println!(
                "Stories read: {} | Streak: {} days | Saved: {}",
                dashboard.stories_read, dashboard.streak, dashboard.saved
            );
            println!(
                "Categories explored: {}/{} ({:.0}%)",
                dashboard.categories_explored,
                dashboard.total_categories,
                dashboard.explored_percent
            );
            println!("Badges:");
            for badge in dashboard.badges.iter() {
                let status = if badge.earned { "earned" } else { "locked" };
                println!("- {} {} ({status})", badge.icon, badge.name);
            }
        }
        Commands::Insights { limit } => {
            let stories = db::fetch_stories(&pool).await?;
            let listed = db::fetch_categories(&pool).await?;
            let community = insights::community_insights(&stories, &listed);

            match &community.most_viewed {
                Some(story) => println!(
                    "Most viewed: {} by {} ({} views)",
                    story.title, story.author, story.views
                ),
                None => println!("Most viewed: None yet"),
            }
            println!(
                "Top category: {}",
                community
                    .top_category
                    .as_deref()
                    .map(categories::label)
                    .unwrap_or_else(|| "None yet".to_string())
            );
            println!("Motivation meter: {} views", community.total_views);

            println!("Trending:");
            for story in insights::trending(&stories, limit) {
                println!("- #{} {} ({} views)", story.id, story.title, story.views);
            }
        }
        Commands::Report {
            account,
            trending,
            out,
        } => {
            let stories = db::fetch_stories(&pool).await?;
            let listed = db::fetch_categories(&pool).await?;
            let reads = db::fetch_read_events(&pool, account).await?;
            let events = db::fetch_saved(&pool, account).await?;
            let saved = SavedSet::from_events(account, &events);
            let dashboard = dashboard::build_dashboard(&stories, &listed, &reads, &saved, today);
            let top = insights::trending(&stories, trending);
            let report = report::build_report(account, today, &dashboard, &top);
            std::fs::write(&out, report)?;
            println!("Report written to {}.", out.display());
        }
    }

    Ok(())
}
