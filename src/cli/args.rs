use clap::{Args, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

use crate::models::{CitySelection, DateRange, FilterCriteria};
use crate::utils::constants::{DEFAULT_CONFIG_FILE, DEFAULT_CONTAINER_WIDTH, DEFAULT_SAMPLE_ROWS};

#[derive(Parser)]
#[command(name = "weather-dashboard")]
#[command(about = "Explore daily weather observations by city and date range")]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    #[arg(short, long, global = true, help = "Enable verbose logging")]
    pub verbose: bool,

    #[arg(long, global = true, help = "Log file path")]
    pub log_file: Option<PathBuf>,

    #[arg(
        long,
        global = true,
        default_value = DEFAULT_CONFIG_FILE,
        help = "Configuration file (TOML); ignored when absent"
    )]
    pub config: PathBuf,
}

/// City and date filters shared by the data commands.
#[derive(Args, Debug, Clone, Default)]
pub struct FilterArgs {
    #[arg(short, long, help = "Observation CSV file [default: from configuration]")]
    pub input: Option<PathBuf>,

    #[arg(short, long, help = "Only show this city (\"All\" for every city)")]
    pub city: Option<String>,

    #[arg(long, help = "First date to include (YYYY-MM-DD)")]
    pub start: Option<String>,

    #[arg(long, help = "Last date to include (YYYY-MM-DD)")]
    pub end: Option<String>,
}

impl FilterArgs {
    pub fn criteria(&self) -> FilterCriteria {
        FilterCriteria::new(
            CitySelection::from(self.city.clone()),
            DateRange::new(self.start.clone(), self.end.clone()),
        )
    }
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

#[derive(Copy, Clone, Debug, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    Csv,
    Json,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Render charts and the data table for the filtered observations
    Show {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(long, default_value = "0", help = "Scroll the table so this row is at the top")]
        row: usize,

        #[arg(long, default_value_t = DEFAULT_CONTAINER_WIDTH, help = "Container width shared by all charts")]
        width: u32,

        #[arg(short, long, value_enum, default_value = "text")]
        format: OutputFormat,
    },

    /// List the cities available for filtering
    Cities {
        #[arg(short, long, help = "Observation CSV file [default: from configuration]")]
        input: Option<PathBuf>,
    },

    /// Print summary statistics for the filtered observations
    Info {
        #[command(flatten)]
        filter: FilterArgs,
    },

    /// Write the filtered, date-ordered observations to a file
    Export {
        #[command(flatten)]
        filter: FilterArgs,

        #[arg(short, long, help = "Output file path")]
        output: PathBuf,

        #[arg(short, long, value_enum, default_value = "csv")]
        format: ExportFormat,
    },

    /// Generate a random sample observation file
    Generate {
        #[arg(short, long, help = "Output CSV path [default: from configuration]")]
        output: Option<PathBuf>,

        #[arg(short, long, default_value_t = DEFAULT_SAMPLE_ROWS)]
        rows: usize,

        #[arg(long, help = "Random seed for reproducible output")]
        seed: Option<u64>,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_show_with_filters() {
        let cli = Cli::try_parse_from([
            "weather-dashboard",
            "show",
            "--city",
            "Chicago",
            "--start",
            "2021-01-01",
            "--end",
            "2021-01-31",
            "--row",
            "40",
        ])
        .unwrap();

        match cli.command {
            Commands::Show { filter, row, width, format } => {
                let criteria = filter.criteria();
                assert_eq!(criteria.city, CitySelection::City("Chicago".to_string()));
                assert!(criteria.date_range.is_active());
                assert_eq!(row, 40);
                assert_eq!(width, DEFAULT_CONTAINER_WIDTH);
                assert_eq!(format, OutputFormat::Text);
            }
            _ => panic!("expected show command"),
        }
    }

    #[test]
    fn test_city_defaults_to_all() {
        let cli = Cli::try_parse_from(["weather-dashboard", "info"]).unwrap();
        match cli.command {
            Commands::Info { filter } => assert!(filter.criteria().city.is_all()),
            _ => panic!("expected info command"),
        }
        assert_eq!(cli.config, PathBuf::from(DEFAULT_CONFIG_FILE));
    }

    #[test]
    fn test_export_requires_output() {
        assert!(Cli::try_parse_from(["weather-dashboard", "export"]).is_err());
    }
}
