use anyhow::{Context, bail};
use clap::{Parser, Subcommand};
use dialoguer::{Confirm, Input, Password};
use dotenvy::dotenv;

use rollcall_cli::seeder;
use rollcall_config::{DatabaseConfig, PasswordConfig};
use rollcall_core::hash_password_with_cost;
use rollcall_db::{PgUserStore, UserStore, init_db_pool};
use rollcall_models::NewUser;

#[derive(Parser)]
#[command(name = "rollcall-cli")]
#[command(about = "Rollcall CLI - Administrative tools for the Rollcall user store", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a user account (use this to bootstrap the first login)
    CreateUser {
        /// Display name
        #[arg(short = 'n', long)]
        name: Option<String>,

        /// Email address
        #[arg(short = 'e', long)]
        email: Option<String>,

        /// Password (will be prompted securely if not provided)
        #[arg(short = 'p', long)]
        password: Option<String>,
    },
    /// Seed the store with fake users
    Seed {
        /// Number of users to create
        #[arg(short = 'c', long, default_value = "25")]
        count: usize,

        /// Password shared by every seeded user
        #[arg(long, default_value = "password123")]
        password: String,
    },
    /// Delete every user
    ClearUsers {
        /// Skip the confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenv().ok();

    let cli = Cli::parse();

    let database_config = DatabaseConfig::from_env();
    if database_config.url.is_none() {
        bail!("DATABASE_URL must be set");
    }
    let pool = init_db_pool(&database_config)
        .await
        .context("Failed to connect to database")?;
    let store = PgUserStore::new(pool);
    let password_config = PasswordConfig::from_env();

    match cli.command {
        Commands::CreateUser {
            name,
            email,
            password,
        } => handle_create_user(&store, &password_config, name, email, password).await,
        Commands::Seed { count, password } => {
            handle_seed(&store, &password_config, count, &password).await
        }
        Commands::ClearUsers { yes } => handle_clear_users(&store, yes).await,
    }
}

async fn handle_create_user(
    store: &dyn UserStore,
    password_config: &PasswordConfig,
    name: Option<String>,
    email: Option<String>,
    password: Option<String>,
) -> anyhow::Result<()> {
    let name = match name {
        Some(name) => name,
        None => Input::<String>::new().with_prompt("Name").interact_text()?,
    };

    let email = match email {
        Some(email) => email,
        None => Input::<String>::new().with_prompt("Email address").interact_text()?,
    };

    let password = match password {
        Some(password) => password,
        None => Password::new()
            .with_prompt("Password")
            .with_confirmation("Confirm password", "Passwords don't match")
            .interact()?,
    };

    if name.trim().is_empty() || email.trim().is_empty() || password.is_empty() {
        bail!("name, email and password are all required");
    }

    let password_hash = hash_password_with_cost(&password, password_config.cost)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let user = store
        .insert(NewUser {
            name,
            email,
            password_hash,
        })
        .await
        .context("Error creating user")?;

    println!("\n✅ User created successfully!");
    println!("   ID: {}", user.id);
    println!("   Email: {}", user.email);
    println!("   Name: {}", user.name);

    Ok(())
}

async fn handle_seed(
    store: &dyn UserStore,
    password_config: &PasswordConfig,
    count: usize,
    password: &str,
) -> anyhow::Result<()> {
    let password_hash = hash_password_with_cost(password, password_config.cost)
        .map_err(|e| anyhow::anyhow!("{}", e))?;

    let users = seeder::generate_users(count, &password_hash);
    let report = seeder::seed_users(store, users)
        .await
        .context("Seeding failed")?;

    println!("\n🎉 Seeding complete!");
    println!("   Inserted: {}", report.inserted);
    println!("   Skipped:  {}", report.skipped);
    println!("   Password: {}", password);

    Ok(())
}

async fn handle_clear_users(store: &dyn UserStore, yes: bool) -> anyhow::Result<()> {
    let confirmed = yes
        || Confirm::new()
            .with_prompt("Delete every user?")
            .default(false)
            .interact()?;

    if !confirmed {
        println!("Aborted.");
        return Ok(());
    }

    let removed = seeder::clear_users(store)
        .await
        .context("Failed to clear users")?;
    println!("🗑️  Removed {} users", removed);

    Ok(())
}
