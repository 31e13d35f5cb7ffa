//! CLI command definitions and handlers

use std::path::PathBuf;

use chrono::NaiveDate;
use clap::{Args, Parser, Subcommand};
pub use clap_complete::Shell;

pub mod admin;
pub mod airport;
pub mod args;
pub mod auth;
pub mod b2b;
pub mod baggage;
pub mod cache;
pub mod completions;
pub mod context;
pub mod dashboard;
pub mod handlers;
pub mod init;
pub mod meteo;
pub mod qr;
pub mod status;
pub mod subscription;
pub mod user;

pub use args::OutputFormat;
pub use context::CommandContext;

/// AeroCast CLI - terminal companion for the AeroCast weather and baggage platform
#[derive(Parser, Debug)]
#[command(name = "aerocast")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "AEROCAST_FORMAT",
        default_value = "pretty",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: OutputFormat,

    /// Override config file location
    #[arg(long, global = true, env = "AEROCAST_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "AEROCAST_DEBUG", hide_env = true)]
    pub debug: bool,

    /// Bypass cache, fetch fresh data from API
    #[arg(long, global = true, env = "AEROCAST_NO_CACHE", hide_env = true)]
    pub no_cache: bool,

    /// Sign in against the built-in offline mock instead of the API
    #[arg(long, global = true, env = "AEROCAST_MOCK", hide_env = true)]
    pub mock: bool,

    /// API base URL (e.g. http://localhost:3000)
    #[arg(long, global = true, env = "AEROCAST_API_BASE_URL", hide_env = true)]
    pub api_url: Option<String>,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Create or update the AeroCast configuration file
    Init,

    /// Sign in and start a session
    #[command(after_help = "EXAMPLES:\n  \
            aerocast login                                   # Prompt for email and password\n  \
            aerocast login --email admin@aerocast.com        # Prompt for password only\n  \
            aerocast login --redirect-to %2Fdashboard%2Fprofile")]
    Login(LoginArgs),

    /// Create an account and start a session
    Register(RegisterArgs),

    /// End the current session
    Logout,

    /// Show session and configuration status
    Status {
        /// Also ask the backend whether it still accepts the session
        #[arg(long)]
        verify: bool,
    },

    /// Extend the current session with a fresh token
    Refresh,

    /// Show the signed-in user's profile
    Profile,

    /// List the dashboard sections and the commands that open them
    Dashboard,

    /// Track, scan and register baggage
    #[command(subcommand)]
    Baggage(BaggageCommands),

    /// Weather forecasts and alerts
    #[command(subcommand)]
    Meteo(MeteoCommands),

    /// Airports and runways
    #[command(subcommand)]
    Airport(AirportCommands),

    /// Administration: statistics, logs, health, maintenance
    #[command(subcommand)]
    Admin(AdminCommands),

    /// Company subscriptions and billing
    #[command(subcommand)]
    Subscription(SubscriptionCommands),

    /// Partner batch endpoints
    #[command(subcommand)]
    B2b(B2bCommands),

    /// Baggage QR codes
    #[command(subcommand)]
    Qr(QrCommands),

    /// User permissions and roles
    #[command(subcommand)]
    User(UserCommands),

    /// Manage local response cache
    #[command(subcommand)]
    Cache(CacheCommands),

    /// Display version information
    Version,

    /// Generate shell completions
    #[command(after_help = "\
Examples:
  bash:   aerocast completion bash > /etc/bash_completion.d/aerocast
  zsh:    aerocast completion zsh > \"${fpath[1]}/_aerocast\"
  fish:   aerocast completion fish > ~/.config/fish/completions/aerocast.fish")]
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: Shell,
    },
}

/// Sign-in arguments
#[derive(Args, Debug, Default)]
pub struct LoginArgs {
    /// Account email (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "AEROCAST_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,

    /// Route to continue with after signing in, raw or percent-encoded
    #[arg(long)]
    pub redirect_to: Option<String>,
}

/// Registration arguments
#[derive(Args, Debug, Default)]
pub struct RegisterArgs {
    /// Full name (prompted when omitted)
    #[arg(long, short = 'n')]
    pub name: Option<String>,

    /// Account email (prompted when omitted)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Passport number (prompted when omitted)
    #[arg(long)]
    pub passport: Option<String>,

    /// Account password (prompted when omitted)
    #[arg(long, env = "AEROCAST_PASSWORD", hide_env_values = true)]
    pub password: Option<String>,
}

/// Baggage subcommands
#[derive(Subcommand, Debug)]
pub enum BaggageCommands {
    /// Show a bag and its route timeline
    #[command(visible_alias = "show")]
    Track {
        /// Baggage ID
        id: String,
    },

    /// Look up a bag by the content of its QR code
    Qr {
        /// QR code content
        code: String,
    },

    /// List the bags checked onto a flight
    Flight {
        /// Flight number (e.g. AF123)
        flight_number: String,
    },

    /// Record a bag passing a checkpoint
    Scan {
        /// QR code content
        #[arg(long)]
        qr: String,

        /// Checkpoint name
        #[arg(long)]
        station: String,

        /// Where the scan took place
        #[arg(long)]
        location: Option<String>,
    },

    /// Show the checkpoints a bag has passed
    History {
        /// Baggage ID
        id: String,
    },

    /// Report an incident on a bag
    Incident {
        /// Baggage ID
        id: String,

        /// What happened
        #[arg(long, short = 'd')]
        description: String,

        /// Incident kind (lost, damaged, delayed, ...)
        #[arg(long)]
        kind: Option<String>,
    },

    /// Baggage statistics for a flight
    Stats {
        /// Flight number
        flight_number: String,
    },

    /// Register a new bag
    Register {
        /// Flight number
        #[arg(long)]
        flight: String,

        /// Owner name
        #[arg(long)]
        owner: String,

        /// Weight in kilograms
        #[arg(long)]
        weight: Option<f64>,
    },
}

/// Weather subcommands
#[derive(Subcommand, Debug)]
pub enum MeteoCommands {
    /// Forecasts for one or more airports
    #[command(after_help = "EXAMPLES:\n  \
            aerocast meteo predictions CDG\n  \
            aerocast meteo predictions CDG ORY NCE        # Fetched concurrently\n  \
            aerocast meteo predictions CDG --runway 09L")]
    Predictions {
        /// Airport codes
        #[arg(required = true)]
        airports: Vec<String>,

        /// Forecast for one runway (single airport only)
        #[arg(long, short = 'r')]
        runway: Option<String>,
    },

    /// Active weather alerts for one or more airports
    Alerts {
        /// Airport codes
        #[arg(required = true)]
        airports: Vec<String>,
    },

    /// Compare forecasts across airports
    Compare {
        /// Airport codes (at least two)
        #[arg(required = true, num_args = 2..)]
        airports: Vec<String>,

        /// Forecast horizon in hours
        #[arg(long)]
        horizon: Option<u32>,
    },

    /// Ask the backend to refresh weather data
    Update,

    /// Progress of the last weather refresh
    Status,
}

/// Airport subcommands
#[derive(Subcommand, Debug)]
pub enum AirportCommands {
    /// List airports
    #[command(visible_alias = "ls")]
    List,

    /// Show one airport
    #[command(visible_alias = "show")]
    Get {
        /// Airport code
        code: String,
    },

    /// List an airport's runways
    Runways {
        /// Airport code
        code: String,
    },
}

/// Administration subcommands
#[derive(Subcommand, Debug)]
pub enum AdminCommands {
    /// Platform statistics for a date range
    Stats {
        /// First day (YYYY-MM-DD)
        #[arg(long)]
        from: Option<NaiveDate>,

        /// Last day (YYYY-MM-DD)
        #[arg(long)]
        to: Option<NaiveDate>,
    },

    /// Recent server logs
    Logs {
        /// Minimum level
        #[arg(long)]
        level: Option<String>,

        /// Maximum number of entries
        #[arg(long, short = 'l')]
        limit: Option<u32>,
    },

    /// Backend health report
    Health,

    /// Switch maintenance mode on or off
    Maintenance {
        #[command(flatten)]
        mode: MaintenanceMode,

        /// Message shown to users while in maintenance
        #[arg(long, short = 'm')]
        message: Option<String>,
    },
}

/// Exactly one of `--on` / `--off`
#[derive(Args, Debug)]
#[group(required = true, multiple = false)]
pub struct MaintenanceMode {
    /// Enter maintenance mode
    #[arg(long)]
    pub on: bool,

    /// Leave maintenance mode
    #[arg(long)]
    pub off: bool,
}

/// Subscription subcommands
#[derive(Subcommand, Debug)]
pub enum SubscriptionCommands {
    /// List subscription plans
    Plans,

    /// Subscribe a company to a plan
    Subscribe {
        /// Company ID
        #[arg(long)]
        company: String,

        /// Plan ID
        #[arg(long)]
        plan: String,
    },

    /// API usage for a company
    Usage {
        /// Company ID
        company: String,
    },

    /// Billing for a company
    Billing {
        /// Company ID
        company: String,
    },
}

/// Partner batch subcommands
#[derive(Subcommand, Debug)]
pub enum B2bCommands {
    /// Weather for many airports in one request
    Weather {
        /// Airport codes, comma-separated or repeated
        #[arg(required = true, value_delimiter = ',')]
        airports: Vec<String>,
    },

    /// Submit a batch of scans from a JSON file
    #[command(after_help = "The file holds an array of scans:\n  \
            [{\"qrCode\": \"BAG-2024-001\", \"station\": \"Security\", \"location\": \"T2E\"}]")]
    Scan {
        /// Path to the JSON file
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Partner API documentation
    Docs,

    /// Register a webhook
    Webhook {
        /// HTTPS endpoint receiving events
        #[arg(long)]
        url: String,

        /// Event names, comma-separated or repeated
        #[arg(long = "event", required = true, value_delimiter = ',')]
        events: Vec<String>,
    },
}

/// QR code subcommands
#[derive(Subcommand, Debug)]
pub enum QrCommands {
    /// Generate the QR code for a bag
    Generate {
        /// Baggage ID
        baggage_id: String,
    },

    /// Check a QR code
    Validate {
        /// QR code content
        code: String,
    },

    /// Download a QR code image
    Download {
        /// QR code content
        code: String,

        /// Output file (defaults to <code>.<ext> in the current directory)
        #[arg(long, short = 'o')]
        output: Option<PathBuf>,
    },
}

/// User administration subcommands
#[derive(Subcommand, Debug)]
pub enum UserCommands {
    /// Show a user's permissions
    Permissions {
        /// User ID
        user_id: String,
    },

    /// Change a user's role
    Role {
        /// User ID
        user_id: String,

        /// New role (user, admin, compagnie, atc)
        role: String,
    },
}

/// Cache management subcommands
#[derive(Subcommand, Debug)]
pub enum CacheCommands {
    /// Show cache statistics
    Status,
    /// Clear all cached data
    Clear,
    /// Print cache directory path
    Path,
}
