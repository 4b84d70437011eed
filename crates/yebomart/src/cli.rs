//! Clap derive structures for the `yebomart` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

use yebomart_core::{AnalyticsPeriod, DataSource, ReconcileStrategy};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// yebomart -- admin console for the YeboMart retail platform
#[derive(Debug, Parser)]
#[command(
    name = "yebomart",
    version,
    about = "Administer YeboMart shops, staff and subscriptions",
    long_about = "Command-line admin console for the YeboMart retail platform.\n\n\
        Lists and manages shops, staff users and subscriptions through the\n\
        admin API, with a built-in demo dataset for offline use.",
    propagate_version = true,
    subcommand_required = true,
    arg_required_else_help = true
)]
pub struct Cli {
    #[command(flatten)]
    pub global: GlobalOpts,

    #[command(subcommand)]
    pub command: Command,
}

// ── Global Options ───────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct GlobalOpts {
    /// Config profile to use
    #[arg(long, short = 'p', env = "YEBOMART_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Admin API root (overrides profile)
    #[arg(long, env = "YEBOMART_API_URL", global = true)]
    pub api_url: Option<String>,

    /// Where list and dashboard data comes from
    #[arg(long, short = 'd', env = "YEBOMART_DATA_SOURCE", global = true)]
    pub data_source: Option<DataSourceArg>,

    /// How detail views are refreshed after a change
    #[arg(long, global = true)]
    pub reconcile: Option<ReconcileArg>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "YEBOMART_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// When to use color output
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Increase verbosity (-v, -vv, -vvv)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-error output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Skip confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,

    /// Accept invalid TLS certificates (staging backends only)
    #[arg(long, short = 'k', env = "YEBOMART_INSECURE", global = true)]
    pub insecure: bool,

    /// Request timeout in seconds (overrides profile)
    #[arg(long, env = "YEBOMART_TIMEOUT", global = true)]
    pub timeout: Option<u64>,
}

// ── Value Enums ──────────────────────────────────────────────────────

#[derive(Debug, Clone, ValueEnum)]
pub enum OutputFormat {
    /// Pretty table (default, interactive)
    Table,
    /// Pretty-printed JSON
    Json,
    /// Compact single-line JSON
    JsonCompact,
    /// YAML
    Yaml,
    /// Plain text, one value per line (scripting)
    Plain,
}

#[derive(Debug, Clone, ValueEnum)]
pub enum ColorMode {
    /// Auto-detect (color if terminal is interactive)
    Auto,
    /// Always emit color codes
    Always,
    /// Never emit color codes
    Never,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum DataSourceArg {
    /// Backend only; failures are reported
    Live,
    /// Built-in demo dataset; no network traffic
    Demo,
    /// Backend first, demo dataset when it yields nothing
    Auto,
}

impl From<DataSourceArg> for DataSource {
    fn from(arg: DataSourceArg) -> Self {
        match arg {
            DataSourceArg::Live => Self::Live,
            DataSourceArg::Demo => Self::Demo,
            DataSourceArg::Auto => Self::Auto,
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum ReconcileArg {
    /// Merge the submitted change locally
    Optimistic,
    /// Re-read the entity from the backend
    Refetch,
}

impl From<ReconcileArg> for ReconcileStrategy {
    fn from(arg: ReconcileArg) -> Self {
        match arg {
            ReconcileArg::Optimistic => Self::Optimistic,
            ReconcileArg::Refetch => Self::Refetch,
        }
    }
}

#[derive(Debug, Clone, Copy, Default, ValueEnum)]
pub enum PeriodArg {
    Day,
    #[default]
    Week,
    Month,
}

impl From<PeriodArg> for AnalyticsPeriod {
    fn from(arg: PeriodArg) -> Self {
        match arg {
            PeriodArg::Day => Self::Day,
            PeriodArg::Week => Self::Week,
            PeriodArg::Month => Self::Month,
        }
    }
}

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Sign in to the admin API
    Login(LoginArgs),

    /// Forget the stored session
    Logout,

    /// Show the signed-in administrator
    Whoami,

    /// Manage shops
    #[command(alias = "shop", alias = "s")]
    Shops(ShopsArgs),

    /// Browse staff users
    #[command(alias = "user", alias = "u")]
    Users(UsersArgs),

    /// Manage subscriptions
    #[command(alias = "subs")]
    Subscriptions(SubscriptionsArgs),

    /// Show platform counters
    Dashboard,

    /// Show platform analytics
    Analytics {
        /// Aggregation period
        #[arg(long, default_value = "week")]
        period: PeriodArg,
    },

    /// Check backend health
    Health,

    /// Manage CLI configuration and profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared List Arguments ────────────────────────────────────────────

/// Paging and search arguments shared by every list command.
#[derive(Debug, Args)]
pub struct ListArgs {
    /// Page number (1-based)
    #[arg(long)]
    pub page: Option<u32>,

    /// Search text
    #[arg(long, short = 's')]
    pub search: Option<String>,

    /// Raw query string, e.g. "page=2&search=Fresh&status=active".
    /// Explicit flags override its values.
    #[arg(long)]
    pub query: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  AUTH
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct LoginArgs {
    /// Admin email (defaults to the profile's email, else prompts)
    #[arg(long, short = 'e')]
    pub email: Option<String>,

    /// Read the password from this environment variable instead of prompting
    #[arg(long, value_name = "VAR")]
    pub password_env: Option<String>,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SHOPS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ShopsArgs {
    #[command(subcommand)]
    pub command: ShopsCommand,
}

#[derive(Debug, Subcommand)]
pub enum ShopsCommand {
    /// List shops
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by status (active, inactive, suspended, pending, all)
        #[arg(long)]
        status: Option<String>,

        /// Filter by tier (FREE, Lite, Starter, Business, Pro, Enterprise, all)
        #[arg(long)]
        tier: Option<String>,
    },

    /// Show shop details
    Get {
        /// Shop ID
        id: String,
    },

    /// Move a shop to another subscription tier
    Tier {
        /// Shop ID
        id: String,

        /// Target tier
        tier: String,
    },

    /// Suspend an active shop
    Suspend {
        /// Shop ID
        id: String,
    },

    /// Reactivate a suspended shop
    Reactivate {
        /// Shop ID
        id: String,
    },

    /// Delete a shop and its data
    #[command(alias = "rm")]
    Delete {
        /// Shop ID
        id: String,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  USERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct UsersArgs {
    #[command(subcommand)]
    pub command: UsersCommand,
}

#[derive(Debug, Subcommand)]
pub enum UsersCommand {
    /// List staff users
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by role (owner, manager, cashier, all)
        #[arg(long)]
        role: Option<String>,
    },

    /// Show a staff user's sales activity
    Get {
        /// User ID
        id: String,

        /// Trailing window in days
        #[arg(long, default_value_t = yebomart_core::DEFAULT_ACTIVITY_DAYS)]
        days: u32,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  SUBSCRIPTIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct SubscriptionsArgs {
    #[command(subcommand)]
    pub command: SubscriptionsCommand,
}

#[derive(Debug, Subcommand)]
pub enum SubscriptionsCommand {
    /// List subscriptions
    #[command(alias = "ls")]
    List {
        #[command(flatten)]
        list: ListArgs,

        /// Filter by tier
        #[arg(long)]
        tier: Option<String>,

        /// Filter by status (active, expired, cancelled, all)
        #[arg(long)]
        status: Option<String>,
    },

    /// Count subscriptions per tier
    Tiers,

    /// Move the given subscriptions to another tier
    ChangeTier {
        /// Target tier
        #[arg(long, short = 't')]
        tier: String,

        /// Subscription IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Extend the given subscriptions by 30 days
    Renew {
        /// Subscription IDs
        #[arg(required = true)]
        ids: Vec<String>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG / COMPLETIONS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Create or update a profile with guided setup
    Init,

    /// Display the resolved configuration
    Show,

    /// Set a profile value
    Set {
        /// Key: api_url, email, data_source, reconcile, session_backend,
        /// timeout, insecure, ca_cert
        key: String,
        /// Value
        value: String,
    },

    /// List profiles; the default is marked with *
    Profiles,

    /// Make a profile the default
    Use {
        /// Profile name
        name: String,
    },

    /// Print the config file path
    Path,
}

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    pub shell: clap_complete::Shell,
}
