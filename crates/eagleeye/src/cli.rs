//! Clap derive structures for the `eagleeye` CLI.
//!
//! Defines the complete command tree, global flags, and shared types.

use clap::{Args, Parser, Subcommand, ValueEnum};

// ── Top-Level CLI ────────────────────────────────────────────────────

/// eagleeye -- fleet monitoring for EagleEye deployments
#[derive(Debug, Parser)]
#[command(
    name = "eagleeye",
    version,
    about = "Monitor and manage an EagleEye device fleet from the command line",
    long_about = "A CLI for the EagleEye IoT fleet-monitoring service.\n\n\
        Lists and watches devices, customers, and alarms; provisions devices;\n\
        and issues remote restart/relay commands and firmware-binary requests.",
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
    /// Deployment profile to use
    #[arg(long, short = 'p', env = "EAGLEEYE_PROFILE", global = true)]
    pub profile: Option<String>,

    /// Service base URL (overrides profile)
    #[arg(long, short = 's', env = "EAGLEEYE_SERVICE", global = true)]
    pub service: Option<String>,

    /// Monitor base URL (overrides profile; defaults to the service URL)
    #[arg(long, short = 'm', env = "EAGLEEYE_MONITOR", global = true)]
    pub monitor: Option<String>,

    /// Output format
    #[arg(
        long,
        short = 'o',
        env = "EAGLEEYE_OUTPUT",
        default_value = "table",
        global = true
    )]
    pub output: OutputFormat,

    /// Color mode
    #[arg(long, default_value = "auto", global = true)]
    pub color: ColorMode,

    /// Skip TLS certificate verification
    #[arg(long, short = 'k', global = true)]
    pub insecure: bool,

    /// Request timeout in seconds
    #[arg(long, default_value = "30", global = true)]
    pub timeout: u64,

    /// Poll cadence for watch views (humantime, e.g. "60s", "2m")
    #[arg(long, global = true)]
    pub poll_interval: Option<String>,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(long, short = 'v', action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Suppress non-essential output
    #[arg(long, short = 'q', global = true)]
    pub quiet: bool,

    /// Assume "yes" for confirmation prompts
    #[arg(long, short = 'y', global = true)]
    pub yes: bool,
}

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

// ── Top-Level Command Enum ───────────────────────────────────────────

#[derive(Debug, Subcommand)]
pub enum Command {
    /// List, inspect, watch, and provision devices
    #[command(alias = "dev", alias = "d")]
    Devices(DevicesArgs),

    /// List and inspect customers
    #[command(alias = "cust", alias = "c")]
    Customers(CustomersArgs),

    /// List, filter, and watch alarms
    #[command(alias = "al", alias = "a")]
    Alarms(AlarmsArgs),

    /// Send remote commands to a device
    #[command(alias = "cmd")]
    Command(RemoteArgs),

    /// Firmware binary generation
    #[command(alias = "bin")]
    Binary(BinaryArgs),

    /// Manage configuration profiles
    Config(ConfigArgs),

    /// Generate shell completions
    Completions(CompletionsArgs),
}

// ── Shared list options ──────────────────────────────────────────────

#[derive(Debug, Clone, Args)]
pub struct PageArgs {
    /// 1-based page to display
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Rows per page
    #[arg(long, default_value = "25")]
    pub page_size: i64,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  DEVICES
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct DevicesArgs {
    #[command(subcommand)]
    pub command: DevicesCommand,
}

#[derive(Debug, Clone, Args)]
pub struct DeviceListArgs {
    /// Filter value matched against --field
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// Field the filter matches (deviceId is exact, the rest substring)
    #[arg(long, default_value = "deviceId")]
    pub field: String,

    /// Keep only devices in this state
    #[arg(long, value_enum)]
    pub state: Option<StateFilter>,

    /// Show the complement of the filtered set instead
    #[arg(long)]
    pub hide_filtered: bool,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum StateFilter {
    Active,
    Inactive,
    Waiting,
}

#[derive(Debug, Subcommand)]
pub enum DevicesCommand {
    /// List monitored devices with summary counts
    #[command(alias = "ls")]
    List(DeviceListArgs),

    /// Re-render the device list on every poll tick
    Watch(DeviceListArgs),

    /// Get one device's details and latest telemetry
    Get {
        /// Device id or MAC address
        device: String,
    },

    /// Print a device's telemetry series (signal, NVS, SPIFFS)
    Telemetry {
        /// Device id or MAC address
        device: String,
    },

    /// List provisioned devices from the database service
    Provisioned(PageArgs),

    /// Provision a new device (fetches an SSID suggestion when --ssid is
    /// omitted)
    Add {
        /// MAC address of the new device
        mac: String,

        /// Default WiFi SSID for the device
        #[arg(long)]
        ssid: Option<String>,

        /// Default WiFi password
        #[arg(long, default_value = "homus123")]
        password: String,

        /// MQTT password
        #[arg(long, default_value = "mqttpassword")]
        mqtt_password: String,
    },

    /// Delete a provisioned device
    #[command(alias = "rm")]
    Delete {
        /// Database device id
        dev_id: i64,
    },

    /// Print the next suggested SSID
    Ssid,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CUSTOMERS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct CustomersArgs {
    #[command(subcommand)]
    pub command: CustomersCommand,
}

#[derive(Debug, Subcommand)]
pub enum CustomersCommand {
    /// List customers
    #[command(alias = "ls")]
    List {
        /// Filter value matched against --field
        #[arg(long, short = 'f')]
        filter: Option<String>,

        /// Field the filter matches (id is exact, the rest substring)
        #[arg(long, default_value = "name")]
        field: String,

        #[command(flatten)]
        page: PageArgs,
    },

    /// Get one customer with attached devices
    #[command(disable_version_flag = true)]
    Get {
        /// Customer id
        id: i64,

        /// Keep only attached devices with this exact firmware version
        #[arg(long)]
        version: Option<String>,

        /// Keep only attached devices with this connection state
        #[arg(long)]
        connected: Option<bool>,

        /// Keep only demo (or non-demo) attached devices
        #[arg(long)]
        demo: Option<bool>,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  ALARMS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct AlarmsArgs {
    #[command(subcommand)]
    pub command: AlarmsCommand,
}

#[derive(Debug, Clone, Args)]
pub struct AlarmListArgs {
    /// Filter value matched against --field
    #[arg(long, short = 'f')]
    pub filter: Option<String>,

    /// Field the filter matches (key, status, entityType, entityId)
    #[arg(long, default_value = "key")]
    pub field: String,

    /// Secondary filter on alarm status
    #[arg(long)]
    pub status: Option<String>,

    /// Show the complement of the filtered set instead
    #[arg(long)]
    pub hide_filtered: bool,

    /// Only alarms for this entity id
    #[arg(long)]
    pub entity: Option<i64>,

    #[command(flatten)]
    pub page: PageArgs,
}

#[derive(Debug, Subcommand)]
pub enum AlarmsCommand {
    /// List alarms, severity-ordered (error > warn > ok > info)
    #[command(alias = "ls")]
    List(AlarmListArgs),

    /// Re-render the alarm list on every poll tick
    Watch(AlarmListArgs),
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  REMOTE COMMANDS
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct RemoteArgs {
    #[command(subcommand)]
    pub command: RemoteCommand,
}

#[derive(Debug, Subcommand)]
pub enum RemoteCommand {
    /// Restart a device
    Restart {
        /// MAC address (underscores and whitespace are normalized)
        mac: String,
    },

    /// Toggle a device relay
    Relay {
        /// MAC address
        mac: String,

        /// Relay number (1-8)
        #[arg(long, short = 'r')]
        relay: u8,

        /// Desired relay state
        #[arg(long, value_enum)]
        state: RelayState,
    },
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum RelayState {
    On,
    Off,
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  BINARY GENERATOR
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct BinaryArgs {
    #[command(subcommand)]
    pub command: BinaryCommand,
}

#[derive(Debug, Subcommand)]
pub enum BinaryCommand {
    /// List available firmware versions
    Versions,

    /// Generate a firmware binary for a device
    #[command(alias = "gen", disable_version_flag = true)]
    Generate {
        /// Firmware version (see `binary versions`)
        version: String,

        /// Target device id
        device_id: i64,
    },
}

// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━
//  CONFIG
// ━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━━

#[derive(Debug, Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Debug, Subcommand)]
pub enum ConfigCommand {
    /// Print the config file path
    Path,

    /// Show the resolved configuration
    Show,

    /// Create or update a profile
    Init {
        /// Profile name
        #[arg(long, default_value = "default")]
        name: String,

        /// Service base URL
        #[arg(long)]
        service: String,

        /// Monitor base URL (defaults to the service URL)
        #[arg(long)]
        monitor: Option<String>,
    },
}

// ── Completions ──────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct CompletionsArgs {
    /// Shell to generate completions for
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}
