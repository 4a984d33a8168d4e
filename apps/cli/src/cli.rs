//! # Command Line
//!
//! clap definitions for `haul`. Each subcommand maps to one handler in
//! [`crate::commands`]; numeric job parameters arrive as raw text and are
//! coerced there, so a typo prices as zero instead of aborting the quote.

use clap::{Args, Parser, Subcommand, ValueEnum};
use haul_core::RateField;
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "haul",
    version,
    about = "가정 대형 폐기물 내림 서비스 견적 계산기"
)]
pub struct Cli {
    /// SQLite store path (overrides HAUL_DB_PATH)
    #[arg(long, value_name = "PATH", global = true)]
    pub db: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug, Clone)]
pub enum Commands {
    /// Price a job
    Quote(QuoteArgs),

    /// Rate table management
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },

    /// Line item management
    Items {
        #[command(subcommand)]
        action: ItemsCommands,
    },
}

/// Job parameters. Numbers that don't parse, or are negative, count as 0.
#[derive(Args, Debug, Clone, Default)]
pub struct QuoteArgs {
    /// Round-trip distance in km [default: 8]
    #[arg(long, value_name = "KM", allow_hyphen_values = true)]
    pub distance: Option<String>,

    /// Floors carried down [default: 1]
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub floors: Option<String>,

    /// No elevator: charge per floor
    #[arg(long)]
    pub no_elevator: bool,

    /// Extra helpers [default: 0]
    #[arg(long, value_name = "N", allow_hyphen_values = true)]
    pub helpers: Option<String>,

    /// Weekend or night job
    #[arg(long)]
    pub weekend: bool,

    /// Item quantity, repeatable (e.g. --item fridge=2)
    #[arg(long = "item", value_name = "ID=QTY")]
    pub items: Vec<String>,

    /// Print the customer-facing quote text
    #[arg(long, conflicts_with = "json")]
    pub summary: bool,

    /// Print request and breakdown as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Subcommand, Debug, Clone)]
pub enum ConfigCommands {
    /// Display the rate table
    Show,

    /// Write the rate table as pretty JSON
    Export {
        /// Output file (stdout if omitted)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },

    /// Replace the rate table with JSON from a file or stdin
    Import {
        /// Input file (stdin if omitted)
        #[arg(short, long)]
        input: Option<PathBuf>,
    },

    /// Restore the built-in sample rate table
    Reset,

    /// Set one numeric rate
    Set {
        /// Rate to change
        #[arg(value_enum)]
        field: FieldArg,

        /// New value (non-numeric or negative counts as 0)
        #[arg(allow_hyphen_values = true)]
        value: String,
    },

    /// Set business info printed on quotes
    Biz {
        /// Business name
        #[arg(long)]
        name: Option<String>,

        /// Contact phone
        #[arg(long)]
        phone: Option<String>,

        /// Contact email
        #[arg(long)]
        email: Option<String>,
    },
}

#[derive(Subcommand, Debug, Clone)]
pub enum ItemsCommands {
    /// List line items
    List,

    /// Add a line item
    Add {
        /// Display name [default: 새 품목]
        #[arg(long)]
        label: Option<String>,

        /// Unit price in won [default: 0]
        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,

        /// Counting word (대, 세트, 개) [default: 개]
        #[arg(long)]
        unit: Option<String>,

        /// Item id (generated if omitted)
        #[arg(long)]
        id: Option<String>,
    },

    /// Change label, price or unit of an item
    Update {
        /// Item id
        id: String,

        #[arg(long)]
        label: Option<String>,

        #[arg(long, allow_hyphen_values = true)]
        price: Option<String>,

        #[arg(long)]
        unit: Option<String>,
    },

    /// Remove an item
    Remove {
        /// Item id
        id: String,
    },
}

/// Command-line names of the editable rates.
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldArg {
    BaseFee,
    BaseDistanceKm,
    ExtraPerKm,
    NoElevatorPerFloor,
    WeekendRate,
    HelperFee,
}

impl From<FieldArg> for RateField {
    fn from(arg: FieldArg) -> Self {
        match arg {
            FieldArg::BaseFee => RateField::BaseFee,
            FieldArg::BaseDistanceKm => RateField::BaseDistanceKm,
            FieldArg::ExtraPerKm => RateField::ExtraPerKm,
            FieldArg::NoElevatorPerFloor => RateField::NoElevatorPerFloor,
            FieldArg::WeekendRate => RateField::WeekendRate,
            FieldArg::HelperFee => RateField::HelperFee,
        }
    }
}
