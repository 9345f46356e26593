use anyhow::Context;
use clap::{Parser, Subcommand};
use dialoguer::{Input, Password};
use dotenvy::dotenv;
use farmmarket_cli::{NewAdmin, create_admin, purge_expired_sessions};
use farmmarket_db::init_db_pool;

#[derive(Parser)]
#[command(name = "farmmarket-cli")]
#[command(about = "Farmmarket CLI - Administrative tools for Farmmarket", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new administrator account
    CreateAdmin {
        /// First name of the admin
        #[arg(short = 'f', long)]
        first_name: Option<String>,

        /// Last name of the admin
        #[arg(short = 'l', long)]
        last_name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Delete expired login sessions
    PurgeSessions,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;
    let pool = init_db_pool(&database_url)
        .await
        .context("Failed to connect to database")?;

    match cli.command {
        Commands::CreateAdmin {
            first_name,
            last_name,
            email,
            password,
        } => {
            let first_name = prompt_unless_given(first_name, "First name")?;
            let last_name = prompt_unless_given(last_name, "Last name")?;
            let email = prompt_unless_given(email, "Email address")?;
            let password = match password {
                Some(password) => password,
                None => Password::new()
                    .with_prompt("Password")
                    .with_confirmation("Confirm password", "Passwords don't match")
                    .interact()
                    .context("Failed to read password")?,
            };

            let admin = NewAdmin::new(&first_name, &last_name, &email, &password)?;
            let id = create_admin(&pool, &admin).await?;

            println!("\n✅ Admin created successfully!");
            println!("   ID: {}", id);
            println!("   Email: {}", admin.email());
            println!("   Name: {}", admin.full_name());
        }
        Commands::PurgeSessions => {
            let removed = purge_expired_sessions(&pool).await?;
            println!("✅ Removed {} expired session(s)", removed);
        }
    }

    Ok(())
}

fn prompt_unless_given(value: Option<String>, prompt: &str) -> anyhow::Result<String> {
    match value {
        Some(value) => Ok(value),
        None => Input::new()
            .with_prompt(prompt)
            .interact_text()
            .with_context(|| format!("Failed to read {}", prompt.to_lowercase())),
    }
}
