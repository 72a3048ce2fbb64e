//! Seeds the configured PostgreSQL database with the default tags and a demo
//! user. Safe to run repeatedly: existing rows are left alone.

use anyhow::{bail, Context};
use configs::Settings;
use domains::ports::SessionFactory;
use services::tags::{CreateTagCommand, CreateTagError, CreateTagHandler};
use services::users::{CreateUserCommand, CreateUserError, CreateUserHandler};
use storage_adapters::PostgresStore;
use tracing_subscriber::EnvFilter;

const DEFAULT_TAGS: &[&str] = &[
    "Breakfast",
    "Dessert",
    "Main Course",
    "Quick",
    "Side Dish",
    "Soup",
    "Vegan",
    "Vegetarian",
];

const DEMO_USER: &str = "Demo Cook";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let settings = Settings::load().context("failed to load configuration")?;
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log.filter)),
        )
        .init();

    let Some(url) = settings.database.url() else {
        bail!("database.url is required to seed (set COOKBOOK__DATABASE__URL)");
    };
    let store = PostgresStore::connect(url, settings.database.max_connections)
        .await
        .context("failed to connect to PostgreSQL")?;
    store.migrate().await.context("failed to run migrations")?;

    let created_tags = seed_tags(&store).await?;
    let created_user = seed_demo_user(&store).await?;
    tracing::info!(created_tags, created_user, "seed complete");
    Ok(())
}

async fn seed_tags(store: &PostgresStore) -> anyhow::Result<usize> {
    let mut created = 0;
    for name in DEFAULT_TAGS {
        let session = store.open_session();
        let command = CreateTagCommand {
            name: (*name).to_owned(),
            slug: None,
        };
        match CreateTagHandler::from_session(session.as_ref()).handle(command).await {
            Ok(tag) => {
                tracing::info!(slug = %tag.slug, "tag created");
                created += 1;
            }
            Err(CreateTagError::SlugAlreadyExists(slug)) => {
                tracing::debug!(%slug, "tag already present");
            }
            Err(err) => return Err(err).with_context(|| format!("failed to seed tag {name}")),
        }
    }
    Ok(created)
}

async fn seed_demo_user(store: &PostgresStore) -> anyhow::Result<bool> {
    let session = store.open_session();
    let command = CreateUserCommand {
        name: DEMO_USER.to_owned(),
    };
    match CreateUserHandler::from_session(session.as_ref()).handle(command).await {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "demo user created");
            Ok(true)
        }
        Err(CreateUserError::NameAlreadyExists(_)) => Ok(false),
        Err(err) => Err(err).context("failed to seed demo user"),
    }
}
