use anyhow::Result;
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;

#[derive(Parser)]
#[command(name = "setu")]
#[command(about = "SkillSetu - job marketplace client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Create a new account
    Signup {
        #[arg(long)]
        name: String,
        #[arg(long)]
        phone: String,
        #[arg(long)]
        location: String,
        #[arg(long)]
        password: String,
        #[arg(long)]
        confirm_password: String,
        /// Account role: seeker or employer
        #[arg(long, default_value = "seeker")]
        role: String,
    },
    /// Log in and persist the session
    Login {
        phone: String,
        #[arg(long)]
        password: String,
    },
    /// Clear the persisted session
    Logout,
    /// Show who is logged in
    Whoami,
    /// Browse the job feed
    Jobs {
        /// Filter by title, employer or location
        #[arg(long)]
        query: Option<String>,
        /// How many pages to load
        #[arg(long, default_value_t = 1)]
        pages: usize,
    },
    /// Post a job listing (employers only)
    PostJob {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        location: String,
        /// Required skill id; repeat for several
        #[arg(long = "skill", value_name = "SKILL_ID")]
        skills: Vec<i64>,
    },
    /// Show or edit the profile
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
}

#[derive(Subcommand)]
enum ProfileAction {
    /// Show the profile and the skill catalog
    Show,
    /// Update basic fields; unset flags are left untouched
    Update {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long)]
        location: Option<String>,
        #[arg(long)]
        company: Option<String>,
    },
    /// Replace the skill selection with the given ids
    Skills {
        #[arg(value_name = "SKILL_ID")]
        ids: Vec<i64>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let cli = Cli::parse();
    let app = commands::App::bootstrap()?;

    match cli.command {
        Commands::Signup {
            name,
            phone,
            location,
            password,
            confirm_password,
            role,
        } => {
            app.signup(name, phone, location, password, confirm_password, &role)
                .await
        }
        Commands::Login { phone, password } => app.login(&phone, &password).await,
        Commands::Logout => app.logout(),
        Commands::Whoami => app.whoami(),
        Commands::Jobs { query, pages } => app.jobs(query, pages).await,
        Commands::PostJob {
            title,
            description,
            location,
            skills,
        } => app.post_job(title, description, location, skills).await,
        Commands::Profile { action } => match action {
            ProfileAction::Show => app.profile_show().await,
            ProfileAction::Update {
                name,
                phone,
                location,
                company,
            } => app.profile_update(name, phone, location, company).await,
            ProfileAction::Skills { ids } => app.profile_skills(ids).await,
        },
    }
}
