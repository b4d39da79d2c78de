use anyhow::Context;
use api::{RestClient, Settings};
use app::{App, LoginForm, SignUpForm, TracingNavigator};
use clap::{Args, Parser, Subcommand};
use store::{format_timestamp, Priority};
use tracing_subscriber::EnvFilter;

/// Headless client for the task backend.
#[derive(Debug, Parser)]
#[command(name = "taskdeck", version, about)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Args)]
struct Credentials {
    #[arg(long, env = "TASKDECK_EMAIL")]
    email: String,
    #[arg(long, env = "TASKDECK_PASSWORD", hide_env_values = true)]
    password: String,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Create an account and log into it
    Signup {
        #[command(flatten)]
        credentials: Credentials,
        /// Repeat the password
        #[arg(long)]
        confirm: String,
    },
    /// Log in and show the profile
    Login {
        #[command(flatten)]
        credentials: Credentials,
    },
    /// List your tasks
    Tasks {
        #[command(flatten)]
        credentials: Credentials,
        /// Only show tasks of this priority
        #[arg(long)]
        priority: Option<Priority>,
    },
    /// Create a task
    Add {
        #[command(flatten)]
        credentials: Credentials,
        #[arg(long)]
        description: String,
        #[arg(long)]
        priority: Priority,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    if let Err(e) = run(Cli::parse()).await {
        eprintln!("Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> anyhow::Result<()> {
    let settings = Settings::new().context("loading settings")?;
    let client = RestClient::from_settings(&settings)?;
    let app = App::new(client, TracingNavigator);

    match cli.command {
        Command::Signup {
            credentials,
            confirm,
        } => {
            let mut form = SignUpForm::default();
            form.set_email(credentials.email);
            form.set_password(credentials.password);
            form.set_confirm_password(confirm);
            if let Some(error) = form.error.take() {
                anyhow::bail!(error);
            }
            let user = app.auth.sign_up(&form.email, &form.password).await?;
            println!("User created successfully! Signed in as {}", user.email);
        }
        Command::Login { credentials } => {
            login(&app, credentials).await?;
            let profile = app.profile();
            println!("{} <{}>", profile.display_name, profile.email);
            if !profile.member_since.is_empty() {
                println!("Member since: {}", profile.member_since);
            }
            app.tasks.load_tasks(app.session.user().id).await;
            println!("Tasks: {}", app.profile().task_count);
        }
        Command::Tasks {
            credentials,
            priority,
        } => {
            let user = login(&app, credentials).await?;
            app.tasks.load_tasks(user.id).await;
            for task in app.tasks.visible_tasks(priority) {
                let when = task.created_at.map(format_timestamp).unwrap_or_default();
                println!("[{:<7}] {}  {}", task.priority, task.description, when);
            }
        }
        Command::Add {
            credentials,
            description,
            priority,
        } => {
            let user = login(&app, credentials).await?;
            app.tasks
                .create_task(&description, Some(priority), user.id)
                .await?;
            println!("Task created");
        }
    }
    Ok(())
}

async fn login(
    app: &App<RestClient, TracingNavigator>,
    credentials: Credentials,
) -> anyhow::Result<store::User> {
    let mut form = LoginForm::default();
    form.set_email(credentials.email);
    form.set_password(credentials.password);
    if let Some(error) = form.error.take() {
        anyhow::bail!(error);
    }
    Ok(app.auth.login(&form.email, &form.password).await?)
}
