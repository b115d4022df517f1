use crate::components::calendar::ViewMode;
use crate::components::management::PaymentStatus;
use crate::components::session::UserRole;
use crate::components::ApiClient;
use crate::config::Config;
use crate::error::AppResult;
use chrono::NaiveDate;
use chrono_tz::Tz;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

// Export submodules
pub mod account;
pub mod admin;
pub mod calendar;
pub mod render;
pub mod session;

/// Shared context for all commands
#[derive(Debug)]
pub struct CommandContext {
    pub config: Config,
    pub client: ApiClient,
    pub timezone: Tz,
}

/// Type alias for command result
pub type CommandResult = AppResult<()>;

/// Command line client for the EventSphere backend
#[derive(Debug, Parser)]
#[command(name = "eventsphere", version, about)]
pub struct Cli {
    /// Log requests and decisions to stderr
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Command,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Log in and store the session
    Login {
        #[arg(long)]
        login: String,
        #[arg(long, env = "EVENTSPHERE_PASSWORD", hide_env_values = true)]
        password: String,
    },
    /// Forget the stored session
    Logout,
    /// Show the logged-in user and their dashboard
    Whoami,
    /// Show events in a month, week or day view
    Calendar {
        #[arg(long, default_value_t = ViewMode::Month)]
        view: ViewMode,
        /// Focus date (YYYY-MM-DD), today when omitted
        #[arg(long)]
        date: Option<NaiveDate>,
        #[arg(long, conflicts_with = "next")]
        prev: bool,
        #[arg(long)]
        next: bool,
    },
    /// List the next events
    Upcoming {
        #[arg(long)]
        limit: Option<usize>,
    },
    /// Show dashboard figures
    Dashboard {
        /// Print stats and chart datasets as JSON
        #[arg(long)]
        json: bool,
    },
    /// Manage events
    Events {
        #[command(subcommand)]
        action: EventsAction,
    },
    /// List or manage users
    Users {
        #[command(subcommand)]
        action: Option<UsersAction>,
    },
    /// List payments or change a payment's status
    Payments {
        #[command(subcommand)]
        action: Option<PaymentsAction>,
    },
    /// List, process or submit coordinator requests
    Requests {
        #[command(subcommand)]
        action: Option<RequestsAction>,
    },
    /// Edit your own profile or password
    Profile {
        #[command(subcommand)]
        action: ProfileAction,
    },
    /// Register for an event
    Register { event_id: String },
    /// Calendar links and an ICS file for one event
    Links {
        event_id: String,
        /// Directory for the ICS file
        #[arg(long, default_value = ".")]
        dir: PathBuf,
    },
    /// Generate the analytics report as PDF
    Report {
        #[arg(long, default_value = "eventsphere-report.pdf")]
        out: PathBuf,
    },
}

#[derive(Debug, Subcommand)]
pub enum EventsAction {
    List,
    Create {
        /// JSON event draft
        #[arg(long)]
        file: PathBuf,
    },
    Update {
        id: String,
        #[arg(long)]
        file: PathBuf,
    },
    Delete {
        id: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum UsersAction {
    Update {
        id: String,
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        email: Option<String>,
        #[arg(long)]
        phone: Option<String>,
        #[arg(long, value_parser = parse_role)]
        role: Option<UserRole>,
    },
    Activate { id: String },
    Deactivate { id: String },
    Delete { id: String },
}

#[derive(Debug, Subcommand)]
pub enum PaymentsAction {
    /// Set to pending, completed or failed
    SetStatus { id: String, status: PaymentStatus },
}

#[derive(Debug, Subcommand)]
pub enum RequestsAction {
    Approve { id: String },
    Reject { id: String },
    /// Apply to become an event coordinator
    Submit {
        #[arg(long)]
        reason: String,
        #[arg(long)]
        experience: String,
    },
}

#[derive(Debug, Subcommand)]
pub enum ProfileAction {
    Update {
        #[arg(long)]
        first_name: Option<String>,
        #[arg(long)]
        last_name: Option<String>,
        #[arg(long)]
        phone: Option<String>,
    },
    Password {
        #[arg(long, env = "EVENTSPHERE_PASSWORD", hide_env_values = true)]
        current: String,
        #[arg(long = "new", env = "EVENTSPHERE_NEW_PASSWORD", hide_env_values = true)]
        new_password: String,
        #[arg(long, env = "EVENTSPHERE_CONFIRM_PASSWORD", hide_env_values = true)]
        confirm: String,
    },
}

fn parse_role(value: &str) -> Result<UserRole, String> {
    UserRole::parse(value).ok_or_else(|| format!("unknown role: {}", value))
}

/// Dispatch a parsed command
pub async fn execute(ctx: &CommandContext, command: Command) -> CommandResult {
    match command {
        Command::Login { login, password } => session::login(ctx, &login, &password).await,
        Command::Logout => session::logout(ctx).await,
        Command::Whoami => session::whoami(ctx).await,
        Command::Calendar {
            view,
            date,
            prev,
            next,
        } => calendar::show(ctx, view, date, calendar::direction(prev, next)).await,
        Command::Upcoming { limit } => calendar::upcoming(ctx, limit).await,
        Command::Links { event_id, dir } => calendar::links(ctx, &event_id, &dir).await,
        Command::Dashboard { json } => admin::dashboard(ctx, json).await,
        Command::Events { action } => admin::events(ctx, action).await,
        Command::Users { action } => admin::users(ctx, action).await,
        Command::Payments { action } => admin::payments(ctx, action).await,
        Command::Requests { action } => admin::requests(ctx, action).await,
        Command::Profile { action } => account::profile(ctx, action).await,
        Command::Register { event_id } => account::register(ctx, &event_id).await,
        Command::Report { out } => admin::report(ctx, &out).await,
    }
}
