//! Freshen CLI — drive the profile image workflow from a terminal.
//!
//! Reads FRESHEN_API_URL, FRESHEN_DATA_DIR, FRESHEN_UPLOAD_TIMEOUT_MS and
//! FRESHEN_LOCALE (or a `.env` file). The signed-in user and token are read
//! from the local store; seed them with `freshen session cache`.

use anyhow::Context;
use clap::{Parser, Subcommand};
use freshen_cli::init_tracing;
use freshen_cli::media::FileMediaLibrary;
use freshen_core::{ProfileConfig, Session, UserRecord};
use freshen_profile::{
    restore_session, store_login, FileResourceLoader, ProfileImageUpdater, ProfileView,
    Reconciler, Selector, TracingNoticeSink, Uploader, UserStore, WorkflowResult,
};
use freshen_storage::LocalKeyValueStore;
use std::path::PathBuf;
use std::sync::Arc;

#[derive(Parser)]
#[command(name = "freshen", about = "Freshen profile client")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Profile operations
    Profile {
        #[command(subcommand)]
        sub: ProfileCommands,
    },
    /// Local session cache
    Session {
        #[command(subcommand)]
        sub: SessionCommands,
    },
}

#[derive(Subcommand)]
enum ProfileCommands {
    /// Show the cached profile
    Show,
    /// Upload a new profile image
    SetImage {
        /// Path to the image file
        file: PathBuf,
    },
}

#[derive(Subcommand)]
enum SessionCommands {
    /// Cache a token and user record obtained at sign-in
    Cache {
        /// Bearer token
        #[arg(long, env = "FRESHEN_TOKEN")]
        token: String,
        /// Path to the user record JSON
        #[arg(long)]
        user: PathBuf,
    },
}

fn print_json(value: &serde_json::Value) -> anyhow::Result<()> {
    let out = serde_json::to_string_pretty(value).context("Serialize output")?;
    println!("{}", out);
    Ok(())
}

fn view_json(view: &ProfileView) -> serde_json::Value {
    serde_json::json!({
        "avatar_url": view.avatar_url,
        "display_name": view.display_name,
        "email": view.email,
        "phone": view.phone,
        "status": view.status_label,
    })
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_tracing();
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = ProfileConfig::from_env().context("Failed to load configuration")?;
    config.validate()?;

    let store = Arc::new(
        LocalKeyValueStore::new(&config.data_dir)
            .await
            .with_context(|| format!("Failed to open data dir {}", config.data_dir.display()))?,
    );
    let users = UserStore::new();
    let restored = restore_session(&*store, &users).await?;

    match cli.command {
        Commands::Profile { sub } => match sub {
            ProfileCommands::Show => {
                let user = restored
                    .user
                    .context("No cached user. Run `freshen session cache` first")?;
                let view = ProfileView::from_record(&user, &config.api_url, config.locale);
                print_json(&view_json(&view))?;
            }
            ProfileCommands::SetImage { file } => {
                let session = restored
                    .session
                    .context("No cached token. Run `freshen session cache` first")?;
                run_update(&config, store, users, session, file).await?;
            }
        },
        Commands::Session { sub } => match sub {
            SessionCommands::Cache { token, user } => {
                let raw = tokio::fs::read_to_string(&user)
                    .await
                    .with_context(|| format!("Failed to read {}", user.display()))?;
                let record = UserRecord::from_json(&raw).context("Invalid user record JSON")?;
                store_login(&*store, &users, &Session::new(token), record).await?;
                print_json(&serde_json::json!({ "success": true }))?;
            }
        },
    }

    Ok(())
}

async fn run_update(
    config: &ProfileConfig,
    store: Arc<LocalKeyValueStore>,
    users: UserStore,
    session: Session,
    file: PathBuf,
) -> anyhow::Result<()> {
    let notices = Arc::new(TracingNoticeSink::new(config.locale));
    let updater = ProfileImageUpdater::new(
        Selector::new(Arc::new(FileMediaLibrary::new(file))),
        Uploader::new(Arc::new(FileResourceLoader)).with_timeout(config.upload_timeout),
        Reconciler::new(store, users.clone(), notices.clone()),
        users,
        notices,
        config.api_url.clone(),
    );

    match updater.run(&session).await {
        WorkflowResult::Updated(record) => {
            let view = ProfileView::from_record(&record, &config.api_url, config.locale);
            print_json(&view_json(&view))
        }
        WorkflowResult::Cancelled => {
            print_json(&serde_json::json!({ "success": false, "reason": "cancelled" }))
        }
        WorkflowResult::PermissionDenied => Err(anyhow::anyhow!("Cannot read the selected file")),
        WorkflowResult::Busy => Err(anyhow::anyhow!("An upload is already in progress")),
        WorkflowResult::Failed(err) => Err(err).context("Profile image update failed"),
    }
}
