use std::{path::PathBuf, sync::Arc};

use anyhow::{Context, Result};
use catalog_core::{
    config::{load_settings_from, SETTINGS_FILE},
    CourseCatalog, HomeView, RouteResolver, SaveOutcome,
};
use clap::{Parser, Subcommand};
use shared::domain::{CourseCategory, CourseId};
use tracing_subscriber::EnvFilter;

mod dialog;
mod failure;
mod render;

use dialog::TerminalDialogHost;

#[derive(Parser, Debug)]
#[command(about = "Browse and edit the course catalog")]
struct Args {
    /// Settings file; defaults to ./catalog.toml
    #[arg(long)]
    config: Option<PathBuf>,
    /// Overrides the configured course api base url.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Load the catalog and list courses by category.
    List,
    /// Create a course; nothing is stored locally until the backend accepts it.
    Create {
        #[arg(long)]
        description: String,
        #[arg(long)]
        category: CourseCategory,
        #[arg(long)]
        long_description: String,
        #[arg(long)]
        url: String,
        #[arg(long)]
        icon_url: String,
        #[arg(long)]
        promo: bool,
    },
    /// Edit an existing course.
    Update {
        #[arg(long)]
        id: i64,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        category: Option<CourseCategory>,
        #[arg(long)]
        long_description: Option<String>,
        #[arg(long)]
        promo: Option<bool>,
    },
}

#[tokio::main]
async fn main() {
    let args = Args::parse();
    let settings_path = args
        .config
        .clone()
        .unwrap_or_else(|| PathBuf::from(SETTINGS_FILE));
    let mut settings = load_settings_from(&settings_path, |key| std::env::var(key).ok());
    if let Some(api_url) = args.api_url.clone() {
        settings.api_base_url = api_url;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&settings.log_filter)),
        )
        .init();

    let catalog = match CourseCatalog::from_settings(&settings) {
        Ok(catalog) => catalog,
        Err(err) => exit_with(&err),
    };
    let host = Arc::new(TerminalDialogHost::default());
    let home = catalog.home_view(host.clone());

    let result = run(args.command, &catalog, &home).await;
    if host.is_open() {
        tracing::warn!("dialog left open after command finished");
    }
    catalog.shutdown();

    if let Err(err) = result {
        exit_with(&err);
    }
}

fn exit_with(err: &anyhow::Error) -> ! {
    tracing::error!("{err:#}");
    eprintln!("{}", failure::describe(err));
    std::process::exit(1);
}

async fn run(command: Command, catalog: &CourseCatalog, home: &HomeView) -> Result<()> {
    match command {
        Command::List => {
            catalog.resolver().resolve().await?;
            print!("{}", render::render_home(&home.snapshot()));
        }
        Command::Create {
            description,
            category,
            long_description,
            url,
            icon_url,
            promo,
        } => {
            let mut dialog = home.on_add_course();
            let form = dialog.form_mut();
            form.description = description;
            form.category = Some(category);
            form.long_description = long_description;
            form.url = Some(url);
            form.icon_url = Some(icon_url);
            form.promo = promo;

            if let SaveOutcome::Created(course) = dialog.on_save().await? {
                println!("created {}", render::render_course(&course));
            }
        }
        Command::Update {
            id,
            description,
            category,
            long_description,
            promo,
        } => {
            catalog.resolver().resolve().await?;
            let course = catalog
                .store()
                .snapshot()
                .get(CourseId(id))
                .cloned()
                .with_context(|| format!("course {id} not found"))?;

            let mut dialog = home.on_edit_course(course);
            let form = dialog.form_mut();
            if let Some(description) = description {
                form.description = description;
            }
            if let Some(category) = category {
                form.category = Some(category);
            }
            if let Some(long_description) = long_description {
                form.long_description = long_description;
            }
            if let Some(promo) = promo {
                form.promo = promo;
            }

            if let SaveOutcome::Updated { course, persist } = dialog.on_save().await? {
                println!("updated {}", render::render_course(&course));
                println!("promo total: {}", home.snapshot().promo_total);
                // Let the background save finish before the runtime shuts down.
                persist.await.context("course persist task failed")?;
            }
        }
    }
    Ok(())
}
