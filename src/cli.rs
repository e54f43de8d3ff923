use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use std::path::PathBuf;

use weightlog::models::WeightUnit;

#[derive(Parser)]
#[command(name = "weightlog", version, about = "Track weight, body fat, muscle mass and visceral fat")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output as human-readable text instead of JSON
    #[arg(long = "human", short = 'H', global = true)]
    pub human: bool,

    /// Unit for weight input and display (kg, lbs, stone); defaults to config
    #[arg(long, global = true)]
    pub unit: Option<WeightUnit>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Initialize config and data directory
    Init,

    /// Record a new entry
    Add {
        /// Body weight in the active unit
        #[arg(long, allow_hyphen_values = true)]
        weight: String,

        /// Muscle mass percentage (0-100)
        #[arg(long, allow_hyphen_values = true)]
        muscle: String,

        /// Body fat percentage (0-100)
        #[arg(long, allow_hyphen_values = true)]
        fat: String,

        /// Visceral fat level
        #[arg(long, allow_hyphen_values = true)]
        visceral: String,

        /// Entry date (YYYY-MM-DD); defaults to today
        #[arg(long)]
        date: Option<NaiveDate>,

        /// Photo to attach
        #[arg(long)]
        image: Option<PathBuf>,

        /// Replace an existing entry on the same day without asking
        #[arg(long, conflicts_with = "no")]
        yes: bool,

        /// Keep an existing entry on the same day without asking
        #[arg(long)]
        no: bool,
    },

    /// Edit an existing entry; omitted fields keep their values
    Edit {
        /// Entry ID
        id: String,

        #[arg(long, allow_hyphen_values = true)]
        weight: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        muscle: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        fat: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        visceral: Option<String>,

        #[arg(long)]
        date: Option<NaiveDate>,

        #[arg(long, conflicts_with = "clear_image")]
        image: Option<PathBuf>,

        /// Remove the attached photo
        #[arg(long)]
        clear_image: bool,
    },

    /// Delete entries by ID
    Delete {
        #[arg(required = true)]
        ids: Vec<String>,
    },

    /// Show the most recent entry
    Latest,

    /// List all entries, newest first
    History,

    /// Show the chart series
    Chart {
        /// Plot fat and muscle as weights; overrides chart.show_as_weight
        #[arg(long, conflicts_with = "as_percent")]
        as_weight: bool,

        /// Plot fat and muscle as percentages; overrides chart.show_as_weight
        #[arg(long)]
        as_percent: bool,
    },

    /// Export the photo attached to an entry
    Image {
        /// Entry ID
        id: String,

        /// File to write; raw bytes go to stdout when omitted
        #[arg(long)]
        out: Option<PathBuf>,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Print a shell completion script
    Completions {
        shell: Shell,
    },
}

#[derive(Subcommand)]
pub enum ConfigAction {
    /// Show current configuration
    Show,
    /// Set a config value
    Set {
        /// Config key (units.weight, chart.show_as_weight, limits.max_weight_kg)
        key: String,
        /// Config value
        value: String,
    },
}
