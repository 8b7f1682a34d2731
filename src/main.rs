mod app;
mod domain;
mod persistence;
mod providers;
mod store;

use anyhow::Result;
use app::AppState;
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use domain::{partition_completed, Filter, Priority, Task};
use persistence::{ensure_data_dir, FileStore};
use providers::{HttpWeatherProvider, LocalAuthenticator};
use std::sync::Arc;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "taskdeck")]
#[command(about = "A local task tracker with filters, theming, and weather-aware task capture", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Log in with an email and password
    Login { email: String, password: String },
    /// Log out and clear the stored session
    Logout,
    /// Add a task
    Add {
        title: String,
        /// Priority: low, medium or high
        #[arg(short, long, default_value = "medium")]
        priority: String,
        /// Due date (YYYY-MM-DD format)
        #[arg(short, long)]
        due: Option<String>,
    },
    /// List tasks under the active (or given) filter
    List {
        /// Filter: all, today, important, planned or assigned
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Toggle a task between pending and done
    Toggle { id: String },
    /// Toggle a task's important flag
    Important { id: String },
    /// Delete a task
    Delete { id: String },
    /// Set the active filter
    Filter { value: String },
    /// Toggle dark mode
    Theme,
    /// Show session, filter and theme status
    Status,
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let data_dir = ensure_data_dir()?;
    let store = Arc::new(FileStore::new(data_dir));
    let mut app = AppState::load(
        store,
        Arc::new(LocalAuthenticator),
        Arc::new(HttpWeatherProvider::new()),
    );

    match cli.command {
        Commands::Login { email, password } => {
            app.auth.login(&email, &password).await;
            match app.auth.user() {
                Some(user) => println!("Logged in as {} <{}>", user.name, user.email),
                None => println!(
                    "Login failed: {}",
                    app.auth.error().unwrap_or("unknown error")
                ),
            }
        }
        Commands::Logout => {
            app.auth.logout();
            println!("Logged out");
        }
        Commands::Add {
            title,
            priority,
            due,
        } => {
            // Guard at the UI boundary; the container rejects it anyway
            if title.trim().is_empty() {
                anyhow::bail!("Task title cannot be empty");
            }
            let priority = Priority::from_arg(&priority)
                .ok_or_else(|| anyhow::anyhow!("Invalid priority: {}", priority))?;
            let due_date = due
                .map(|d| {
                    NaiveDate::parse_from_str(&d, "%Y-%m-%d")
                        .map_err(|e| anyhow::anyhow!("Invalid due date. Use YYYY-MM-DD: {}", e))
                })
                .transpose()?;

            let added = app.tasks.add_task(&title, priority, due_date).await.cloned();
            match added {
                Some(task) => {
                    println!("Added task {} - {}", task.id, task.title);
                    if let Some(weather) = &task.weather {
                        println!("  Weather: {}, {}°C", weather.condition, weather.temp);
                    }
                }
                None => println!(
                    "Could not add task: {}",
                    app.tasks.error().unwrap_or("unknown error")
                ),
            }
        }
        Commands::List { filter } => {
            let now = Local::now();
            let (filter, view) = match filter {
                Some(value) => {
                    let filter = Filter::from_arg(&value)
                        .ok_or_else(|| anyhow::anyhow!("Invalid filter: {}", value))?;
                    (filter, domain::filter_tasks(app.tasks.tasks(), filter, now))
                }
                None => (app.tasks.filter(), app.tasks.visible(now)),
            };
            let (pending, done) = partition_completed(&view);

            println!("Filter: {}", filter.label());
            println!();
            println!("Pending ({})", pending.len());
            for task in pending {
                print_task(task);
            }
            println!();
            println!("Done ({})", done.len());
            for task in done {
                print_task(task);
            }
        }
        Commands::Toggle { id } => {
            app.tasks.toggle_task(&id);
            println!("Toggled {}", id);
        }
        Commands::Important { id } => {
            app.tasks.toggle_important(&id);
            println!("Toggled importance of {}", id);
        }
        Commands::Delete { id } => {
            app.tasks.delete_task(&id);
            println!("Deleted {}", id);
        }
        Commands::Filter { value } => {
            let filter = Filter::from_arg(&value)
                .ok_or_else(|| anyhow::anyhow!("Invalid filter: {}", value))?;
            app.tasks.set_filter(filter);
            println!("Filter set to {}", filter.label());
        }
        Commands::Theme => {
            app.theme.toggle_dark_mode();
            println!(
                "Theme: {}",
                if app.theme.dark_mode() { "dark" } else { "light" }
            );
        }
        Commands::Status => {
            match app.auth.user() {
                Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
                None => println!("Not signed in"),
            }
            println!("Tasks: {}", app.tasks.tasks().len());
            println!("Filter: {}", app.tasks.filter().label());
            println!(
                "Theme: {}",
                if app.theme.dark_mode() { "dark" } else { "light" }
            );
        }
    }

    Ok(())
}

fn print_task(task: &Task) {
    let mark = if task.completed { "x" } else { " " };
    let star = if task.is_important { " *" } else { "" };
    let due = task
        .due_date
        .map(|d| format!(" due {}", d))
        .unwrap_or_default();
    let weather = task
        .weather
        .as_ref()
        .map(|w| format!(" [{} {}°C]", w.condition, w.temp))
        .unwrap_or_default();
    println!(
        "  [{}] {} {} ({}){}{}{}",
        mark,
        task.id,
        task.title,
        task.priority.label(),
        star,
        due,
        weather
    );
}
