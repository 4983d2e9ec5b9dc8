use std::path::{Path, PathBuf};
use tracing::{info, warn};

use crate::analyzers::WeatherAnalyzer;
use crate::cli::args::{Cli, Commands, ExportFormat, FilterArgs, OutputFormat};
use crate::cli::render::render_frame;
use crate::config::DashboardConfig;
use crate::dashboard::Dashboard;
use crate::error::Result;
use crate::models::WeatherRecord;
use crate::readers::DataLoader;
use crate::store::{SharedStore, WeatherStore};
use crate::utils::logging::init_logging;
use crate::utils::progress::ProgressReporter;
use crate::writers::{write_csv, write_json, SampleGenerator};

pub async fn run(cli: Cli) -> Result<()> {
    init_logging(cli.verbose, cli.log_file.as_deref())?;
    let config = DashboardConfig::load(Some(cli.config.as_path()))?;

    match cli.command {
        Commands::Show {
            filter,
            row,
            width,
            format,
        } => {
            let store = load_store(&config, filter.input.as_deref(), true).await?;
            let mut dashboard = Dashboard::new(store, &config);
            dashboard.on_resize(width);
            apply_filter(&mut dashboard, &filter);
            dashboard.scroll_to_row(row);

            let frame = dashboard.frame();
            match format {
                OutputFormat::Text => print!("{}", render_frame(&frame)),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&frame)?),
            }
        }

        Commands::Cities { input } => {
            let store = load_store(&config, input.as_deref(), true).await?;
            let mut dashboard = Dashboard::new(store, &config);
            for city in dashboard.city_options() {
                println!("{}", city);
            }
        }

        Commands::Info { filter } => {
            let store = load_store(&config, filter.input.as_deref(), true).await?;
            let mut dashboard = Dashboard::new(store, &config);
            apply_filter(&mut dashboard, &filter);

            let stats = WeatherAnalyzer::new().analyze(dashboard.filtered_view());
            print!("{}", stats.summary());
        }

        Commands::Export {
            filter,
            output,
            format,
        } => {
            let store = load_store(&config, filter.input.as_deref(), false).await?;
            let mut dashboard = Dashboard::new(store, &config);
            apply_filter(&mut dashboard, &filter);
            let view = dashboard.filtered_view();

            if view.is_empty() {
                warn!("No records match the filter; writing an empty export");
            }
            export_records(view, &output, format)?;
            println!("Exported {} records to {}", view.len(), output.display());
        }

        Commands::Generate { output, rows, seed } => {
            let output = output.unwrap_or_else(|| config.data_path.clone());
            generate_sample(output, rows, seed).await?;
        }
    }

    Ok(())
}

/// Load the observation file into a fresh store.
///
/// A failed load is reported but not fatal when `tolerate_failure` is set:
/// the store keeps its failed state and views render empty.
async fn load_store(
    config: &DashboardConfig,
    input: Option<&Path>,
    tolerate_failure: bool,
) -> Result<SharedStore> {
    let path = input.unwrap_or(config.data_path.as_path());
    let store = WeatherStore::shared();
    let loader = DataLoader::new(path);

    let progress = ProgressReporter::new_spinner(&format!("Loading {}...", path.display()), false);
    match loader.load(&store).await {
        Ok(count) => progress.finish_with_message(&format!("Loaded {} records", count)),
        Err(e) if tolerate_failure => {
            progress.abandon_with_message(&format!("Load failed: {}", e));
        }
        Err(e) => {
            progress.abandon_with_message("Load failed");
            return Err(e);
        }
    }

    Ok(store)
}

fn apply_filter(dashboard: &mut Dashboard, filter: &FilterArgs) {
    let criteria = filter.criteria();
    if filter.start.is_some() != filter.end.is_some() {
        warn!("Date range needs both --start and --end; ignoring the partial range");
    }
    dashboard.set_city(criteria.city);
    dashboard.set_date_range(criteria.date_range);
}

fn export_records(records: &[WeatherRecord], output: &Path, format: ExportFormat) -> Result<()> {
    if let Some(parent) = output.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)?;
    }

    match format {
        ExportFormat::Csv => write_csv(records, output),
        ExportFormat::Json => write_json(records, output),
    }
}

async fn generate_sample(output: PathBuf, rows: usize, seed: Option<u64>) -> Result<()> {
    info!("Generating {} sample records", rows);

    tokio::task::spawn_blocking(move || -> Result<()> {
        let progress = ProgressReporter::new(rows as u64, "Generating sample data...", false);
        let mut generator = SampleGenerator::new(seed)?;
        generator.write_file(&output, rows, Some(&progress))?;
        progress.finish_with_message(&format!("Wrote {} records to {}", rows, output.display()));
        Ok(())
    })
    .await?
}
