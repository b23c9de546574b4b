use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use teamctl::api::ApiClient;
use teamctl::config::ClientConfig;
use teamctl::session::{SessionStore, state_dir_from_env};

mod cmd;

#[derive(Parser)]
#[command(name = "teamctl")]
#[command(version, about = "Terminal client for the team. project tracker")]
pub struct Cli {
    /// Override the API base URL (also TEAMCTL_API_URL or config.toml)
    #[arg(long, global = true)]
    pub api_url: Option<String>,

    /// Override the submission service base URL (also TEAMCTL_SUBMIT_URL)
    #[arg(long, global = true)]
    pub submit_url: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Create an account
    Signup {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Sign in and store a session
    Login {
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        password: Option<String>,
    },
    /// Delete the stored session
    Logout,
    /// Show the signed-in user
    Whoami,
    /// Create and browse projects
    Project {
        #[command(subcommand)]
        command: ProjectCommands,
    },
    /// Create and browse issues
    Issue {
        #[command(subcommand)]
        command: IssueCommands,
    },
    /// Submit a link attestation for an issue
    Submit {
        /// Project id
        #[arg(long)]
        project: String,
        /// Issue id
        #[arg(long)]
        issue: String,
        /// Submission name (defaults to the existing submission's name)
        #[arg(long)]
        name: Option<String>,
        /// Material as <filename>=<sha256>
        #[arg(long = "material", value_name = "FILE=HASH")]
        materials: Vec<String>,
        /// Material hashed from a file on disk
        #[arg(long = "material-file", value_name = "PATH")]
        material_files: Vec<PathBuf>,
        /// Product as <filename>=<sha256>
        #[arg(long = "product", value_name = "FILE=HASH")]
        products: Vec<String>,
        /// Product hashed from a file on disk
        #[arg(long = "product-file", value_name = "PATH")]
        product_files: Vec<PathBuf>,
    },
    /// Show the milestone dashboard
    Milestones,
    /// View or initialize configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand)]
pub enum ProjectCommands {
    /// Create a new project
    Create {
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        organization: Option<String>,
        /// Contributor id (repeatable)
        #[arg(long = "contributor")]
        contributors: Vec<String>,
    },
    /// List your projects with their closest deadlines
    List,
}

#[derive(Subcommand)]
pub enum IssueCommands {
    /// Create a new issue on a project
    Create {
        /// Project id
        #[arg(long)]
        project: String,
        #[arg(long)]
        title: Option<String>,
        /// Deadline as YYYY-MM-DD
        #[arg(long)]
        deadline: Option<String>,
        /// Step name, e.g. "build-step"
        #[arg(long)]
        name: Option<String>,
        /// Label (repeatable)
        #[arg(long = "label")]
        labels: Vec<String>,
        /// Expected command line, split on whitespace
        #[arg(long)]
        command: Option<String>,
        /// Expected material as RULE:PATTERN, e.g. REQUIRE:*.cpp (repeatable)
        #[arg(long = "material", value_name = "RULE:PATTERN")]
        materials: Vec<String>,
        /// Expected product as RULE:PATTERN (repeatable)
        #[arg(long = "product", value_name = "RULE:PATTERN")]
        products: Vec<String>,
    },
    /// List a project's issues, optionally filtered by calendar day
    List {
        /// Project id
        #[arg(long)]
        project: String,
        /// Only issues due on this day (YYYY-MM-DD)
        #[arg(long, conflicts_with = "today")]
        due: Option<String>,
        /// Only issues due today
        #[arg(long)]
        today: bool,
    },
}

#[derive(Subcommand, Clone)]
pub enum ConfigCommands {
    /// Show effective configuration
    Show,
    /// Write a default config.toml
    Init,
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();
    let cli = Cli::parse();

    let state_dir = state_dir_from_env()?;
    let mut config = ClientConfig::load(&state_dir)?;
    if let Some(url) = &cli.api_url {
        config.server.api_url = url.clone();
    }
    if let Some(url) = &cli.submit_url {
        config.server.submit_url = url.clone();
    }

    let store = SessionStore::new(&state_dir);
    let client = ApiClient::new(&config);

    match cli.command {
        Commands::Signup {
            name,
            email,
            password,
        } => cmd::cmd_signup(&client, name, email, password).await?,
        Commands::Login { email, password } => {
            cmd::cmd_login(&client, &store, email, password).await?
        }
        Commands::Logout => cmd::cmd_logout(&store)?,
        Commands::Whoami => cmd::cmd_whoami(&store)?,
        Commands::Project { command } => match command {
            ProjectCommands::Create {
                name,
                organization,
                contributors,
            } => cmd::cmd_project_create(&client, &store, name, organization, contributors).await?,
            ProjectCommands::List => cmd::cmd_project_list(&client, &store).await?,
        },
        Commands::Issue { command } => match command {
            IssueCommands::Create {
                project,
                title,
                deadline,
                name,
                labels,
                command,
                materials,
                products,
            } => {
                cmd::cmd_issue_create(
                    &client, &store, &project, title, deadline, name, labels, command, materials,
                    products,
                )
                .await?
            }
            IssueCommands::List {
                project,
                due,
                today,
            } => cmd::cmd_issue_list(&client, &store, &project, due.as_deref(), today).await?,
        },
        Commands::Submit {
            project,
            issue,
            name,
            materials,
            material_files,
            products,
            product_files,
        } => {
            cmd::cmd_submit(
                &client,
                &project,
                &issue,
                name,
                materials,
                material_files,
                products,
                product_files,
            )
            .await?
        }
        Commands::Milestones => cmd::cmd_milestones(&client).await?,
        Commands::Config { command } => cmd::cmd_config(&state_dir, command)?,
    }

    Ok(())
}

fn init_tracing() {
    use tracing_subscriber::EnvFilter;
    use tracing_subscriber::filter::LevelFilter;

    let filter = EnvFilter::builder()
        .with_default_directive(LevelFilter::WARN.into())
        .with_env_var("TEAMCTL_LOG")
        .from_env_lossy();
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
