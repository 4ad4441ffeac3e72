use clap::{ArgAction, Args, Parser, Subcommand};
use creelapp::model::{parse_released, Field, LureType, WeightUnit};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(
    name = "creel",
    bin_name = "creel",
    version,
    disable_help_subcommand = true,
    about = "Fishing catch log: record, edit, filter and export your catches",
    long_about = None,
    after_help = "Catches are selected by position (as shown by `creel list`, starting at 0) or by id (#12)."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,

    /// Data directory (defaults to $CREEL_DATA, then the OS data directory)
    #[arg(long, global = true, value_name = "DIR", help_heading = "Options")]
    pub data: Option<PathBuf>,

    /// Verbose output (-v debug, -vv trace)
    #[arg(short, long, global = true, action = ArgAction::Count, help_heading = "Options")]
    pub verbose: u8,
}

pub fn parse_cli() -> Cli {
    Cli::parse()
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Log a new catch
    #[command(alias = "a", display_order = 1)]
    Add {
        #[command(flatten)]
        catch: CatchArgs,

        /// Photo to attach (.jpg, .jpeg or .png)
        #[arg(long, value_name = "FILE")]
        photo: Option<PathBuf>,
    },

    /// List catches
    #[command(alias = "ls", display_order = 2)]
    List {
        #[command(flatten)]
        filters: FilterArgs,

        /// Print JSON instead of a table
        #[arg(long)]
        json: bool,
    },

    /// Show one catch
    #[command(display_order = 3)]
    View {
        /// Position (e.g. 3) or id (e.g. #12)
        selector: String,
    },

    /// Change a catch; only the given fields are replaced
    #[command(display_order = 4)]
    Edit {
        /// Position (e.g. 3) or id (e.g. #12)
        selector: String,

        #[command(flatten)]
        catch: CatchArgs,

        /// Replace the photo (.jpg, .jpeg or .png)
        #[arg(long, value_name = "FILE")]
        photo: Option<PathBuf>,
    },

    /// Delete a catch (its photo file is kept)
    #[command(alias = "rm", display_order = 5)]
    Delete {
        /// Position (e.g. 3) or id (e.g. #12)
        selector: String,
    },

    /// Catch counts and mean length per spot and per lure type
    #[command(display_order = 10)]
    Stats,

    /// Catches with a photo, newest first
    #[command(alias = "gallery", display_order = 11)]
    Photos {
        #[command(flatten)]
        filters: FilterArgs,
    },

    /// Export every catch to a spreadsheet (.xlsx)
    #[command(display_order = 12)]
    Export {
        /// Output file
        #[arg(short, long, default_value = "catches.xlsx")]
        output: PathBuf,
    },

    /// Show configuration
    #[command(display_order = 20)]
    Config {
        #[command(subcommand)]
        action: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Print a sample creel.toml
    Gen,
}

/// Catch fields. Every field is optional: `add` fills gaps with defaults,
/// `edit` keeps the stored value.
#[derive(Args, Debug, Default, Clone)]
pub struct CatchArgs {
    /// Date (YYYY-MM-DD, DD/MM/YYYY or DD-MM-YYYY)
    #[arg(long)]
    pub date: Option<String>,

    /// Time (HH:MM)
    #[arg(long)]
    pub time: Option<String>,

    #[arg(long)]
    pub species: Option<String>,

    /// Length in centimeters
    #[arg(long = "length", value_name = "CM")]
    pub length_cm: Option<f64>,

    #[arg(long)]
    pub weight: Option<f64>,

    /// Weight unit: kg or g
    #[arg(long, value_parser = parse_unit)]
    pub unit: Option<WeightUnit>,

    #[arg(long)]
    pub spot: Option<String>,

    /// Stickbait, Jig, "Soft lure", Creature or Other
    #[arg(long, value_parser = parse_lure_type)]
    pub lure_type: Option<LureType>,

    #[arg(long)]
    pub lure_name: Option<String>,

    /// Tide, weather, wind...
    #[arg(long)]
    pub conditions: Option<String>,

    /// Released: yes or no
    #[arg(long, value_parser = parse_yes_no)]
    pub released: Option<bool>,

    #[arg(long)]
    pub comment: Option<String>,
}

#[derive(Args, Debug, Default, Clone)]
pub struct FilterArgs {
    /// Only these species (repeatable)
    #[arg(long = "species", value_name = "SPECIES")]
    pub species: Vec<String>,

    /// Only these spots (repeatable)
    #[arg(long = "spot", value_name = "SPOT")]
    pub spot: Vec<String>,

    /// Only these lure names (repeatable)
    #[arg(long = "lure-name", value_name = "NAME")]
    pub lure_name: Vec<String>,

    /// Any column, as FIELD=VALUE (repeatable)
    #[arg(long = "where", value_name = "FIELD=VALUE", value_parser = parse_where)]
    pub conditions: Vec<(Field, String)>,
}

fn parse_unit(s: &str) -> Result<WeightUnit, String> {
    s.parse().map_err(|e: creelapp::error::CreelError| e.to_string())
}

fn parse_lure_type(s: &str) -> Result<LureType, String> {
    s.parse().map_err(|e: creelapp::error::CreelError| e.to_string())
}

fn parse_yes_no(s: &str) -> Result<bool, String> {
    parse_released(s).map_err(|e| e.to_string())
}

fn parse_where(s: &str) -> Result<(Field, String), String> {
    let (field, value) = s
        .split_once('=')
        .ok_or_else(|| format!("expected FIELD=VALUE, got '{}'", s))?;
    let field = field.parse::<Field>().map_err(|e| e.to_string())?;
    Ok((field, value.to_string()))
}
