use clap::{Parser, Subcommand};

/// Command-line interface definition for rFellowship
#[derive(Parser)]
#[command(
    name = "rfellowship",
    version = env!("CARGO_PKG_VERSION"),
    about = "A church-community companion: feed, prayer wall, events countdown and membership",
    long_about = None
)]
pub struct Cli {
    /// Override database path (useful for tests or custom DB)
    #[arg(global = true, long = "db")]
    pub db: Option<String>,

    /// Run in test mode (no config file update)
    #[arg(global = true, long = "test", hide = true)]
    pub test: bool,

    /// Pin the current instant (RFC 3339 or "YYYY-MM-DD HH:MM" UTC)
    #[arg(global = true, long = "now", hide = true)]
    pub now: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize the database and configuration
    Init,

    /// Manage the configuration file (view or edit)
    Config {
        #[arg(long = "print", help = "Print the current configuration file")]
        print_config: bool,

        #[arg(long = "check", help = "Check configuration file for missing fields")]
        check: bool,

        #[arg(
            long = "edit",
            help = "Edit the configuration file (default editor: $EDITOR, or nano/notepad)"
        )]
        edit_config: bool,

        #[arg(
            long = "editor",
            help = "Specify the editor to use (vim, nano, or custom path)"
        )]
        editor: Option<String>,
    },

    /// Sign in with an email address or member id
    Login {
        /// Email, member id, or the `admin` / `clerk` shortcuts
        identifier: String,
    },

    /// Sign out of the current session
    Logout,

    /// Show the signed-in member, trial and subscription state
    Status {
        #[arg(long = "json", help = "Print the status as JSON")]
        json: bool,
    },

    /// Update the signed-in member's profile
    Profile {
        #[arg(long)]
        name: Option<String>,

        #[arg(long)]
        bio: Option<String>,

        #[arg(long)]
        church: Option<String>,

        #[arg(long)]
        phone: Option<String>,

        #[arg(long, value_delimiter = ',', help = "Comma-separated interests")]
        interests: Option<Vec<String>>,
    },

    /// Subscribe (simulated payment) to unlock interactive features
    Upgrade {
        #[arg(long = "plan", help = "Monthly plan amount (10 or 100)")]
        plan: Option<u32>,

        #[arg(long = "card", help = "Card number", conflicts_with_all = ["provider", "phone"])]
        card: Option<String>,

        #[arg(long = "provider", help = "Mobile money provider", requires = "phone")]
        provider: Option<String>,

        #[arg(long = "phone", help = "Mobile money phone number")]
        phone: Option<String>,
    },

    /// List events, RSVP, or show the countdown to the next one
    Events {
        #[arg(long = "calendar", help = "Show a month calendar instead of the list")]
        calendar: bool,

        #[arg(long = "rsvp", value_name = "EVENT_ID", help = "Toggle RSVP for an event")]
        rsvp: Option<String>,

        #[arg(long = "next", help = "Countdown to your next RSVP'd event")]
        next: bool,

        #[arg(
            long = "watch",
            value_name = "SECONDS",
            requires = "next",
            help = "Refresh the countdown every second for SECONDS seconds"
        )]
        watch: Option<u64>,
    },

    /// Read the community feed, like or publish posts
    Feed {
        #[arg(long = "like", value_name = "POST_ID", help = "Toggle like on a post")]
        like: Option<String>,

        #[arg(long = "post", value_name = "TEXT", help = "Publish a new post")]
        post: Option<String>,
    },

    /// Prayer wall: list, pray for, or share a request
    Pray {
        #[arg(long = "id", value_name = "PRAYER_ID", help = "Pray for a request")]
        id: Option<String>,

        #[arg(long = "request", value_name = "TEXT", help = "Share a prayer request")]
        request: Option<String>,

        #[arg(
            long = "category",
            default_value = "General",
            help = "Health, Family, Spiritual or General"
        )]
        category: String,

        #[arg(long = "anonymous", help = "Hide your name on the request")]
        anonymous: bool,

        #[arg(long = "filter", help = "Only list requests of this category")]
        filter: Option<String>,
    },

    /// Show the devotional of the day
    Devotional {
        #[arg(long = "refresh", help = "Ignore today's cached devotional")]
        refresh: bool,
    },

    /// Back-office: list, approve, reject or (de)activate member accounts
    Members {
        #[arg(long = "pending", help = "Only list applications awaiting approval")]
        pending: bool,

        #[arg(
            long = "approve",
            value_name = "USER_ID",
            conflicts_with_all = ["reject", "toggle_active"],
            help = "Approve a pending application"
        )]
        approve: Option<String>,

        #[arg(
            long = "reject",
            value_name = "USER_ID",
            conflicts_with = "toggle_active",
            help = "Reject (remove) a pending application"
        )]
        reject: Option<String>,

        #[arg(
            long = "toggle-active",
            value_name = "USER_ID",
            help = "Switch an account between active and inactive"
        )]
        toggle_active: Option<String>,
    },

    /// Print or manage the internal log table
    Log {
        #[arg(long = "print", help = "Print rows from the internal log table")]
        print: bool,
    },
}
