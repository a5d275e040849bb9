use crate::error::CliError;
use clap::Parser;
use commands::Commands;
use connectors::csv::source::{self, CsvOptions};
use engine_filter::{pipeline::FilterPipeline, set::FilterSet};
use std::{collections::HashMap, path::Path};
use tracing::{Level, info};

mod commands;
mod error;
mod output;
mod parse;

#[derive(Parser)]
#[command(name = "sift", version = "0.1.0", about = "Tabular data filtering tool")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

fn main() -> Result<(), CliError> {
    // Initialize logger
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    let cli = Cli::parse();

    match cli.command {
        Commands::Filter {
            input,
            conditions,
            search,
            limit,
            delimiter,
            no_header,
            type_overrides,
            json,
        } => {
            let options = CsvOptions {
                delimiter: delimiter_byte(delimiter)?,
                has_header: !no_header,
            };
            let mut dataset = source::load(Path::new(&input), &options)?;

            let mut overrides = HashMap::new();
            for spec in &type_overrides {
                let (column, data_type) = parse::parse_type_override(spec)?;
                dataset
                    .override_type(&column, data_type)
                    .map_err(|_| CliError::UnknownColumn(column.clone()))?;
                overrides.insert(column.to_lowercase(), data_type);
            }

            let mut set = FilterSet::new();
            for expr in &conditions {
                let parsed = parse::parse_condition(expr)?;
                // A manual type override also hints the coercion inside
                // conditions on that column.
                let condition = match overrides.get(&parsed.condition.column().to_lowercase()) {
                    Some(tag) => parsed.condition.with_hint(*tag),
                    None => parsed.condition,
                };
                set.add_condition(condition, parsed.combinator);
            }

            let mut pipeline = FilterPipeline::new(set);
            if let Some(term) = &search {
                pipeline = pipeline.with_search(term);
            }

            let total = dataset.row_count();
            let outcome = pipeline.run(&dataset);
            info!(
                "{} of {} rows matched ({} condition warning(s))",
                outcome.dataset.row_count(),
                total,
                outcome.warnings.len()
            );

            if json {
                output::print_json(&outcome.dataset, limit)?;
            } else {
                output::print_table(&outcome.dataset, limit);
            }
        }
        Commands::Info {
            input,
            delimiter,
            no_header,
        } => {
            let options = CsvOptions {
                delimiter: delimiter_byte(delimiter)?,
                has_header: !no_header,
            };
            let metadata = source::inspect(Path::new(&input), &options)?;
            let json = serde_json::to_string_pretty(&metadata)?;
            println!("{json}");
        }
    }

    Ok(())
}

/// The csv reader takes a single-byte delimiter; anything wider is rejected
/// up front rather than silently truncated.
fn delimiter_byte(delimiter: char) -> Result<u8, CliError> {
    u8::try_from(delimiter).map_err(|_| CliError::InvalidDelimiter(delimiter))
}
