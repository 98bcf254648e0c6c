//! CLI command for data export

use clap::{Args, ValueEnum};
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::PathBuf;

use crate::error::{FinanceError, FinanceResult};
use crate::export::{write_expenses_csv, write_incomes_csv, write_records_json};
use crate::services::Dashboard;

/// Export format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportFormat {
    /// CSV, one record kind per file
    Csv,
    /// JSON, every record plus the budget goal
    Json,
}

/// Which records a CSV export contains
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ExportRecords {
    Expenses,
    Incomes,
}

/// Export arguments
#[derive(Args, Debug)]
pub struct ExportArgs {
    #[arg(short, long, value_enum, default_value = "json")]
    pub format: ExportFormat,

    /// Records to write in CSV mode
    #[arg(short, long, value_enum, default_value = "expenses")]
    pub records: ExportRecords,

    /// Output file path (stdout when omitted)
    #[arg(short, long)]
    pub output: Option<PathBuf>,
}

/// Handle the export command
pub fn handle_export_command(dashboard: &Dashboard, args: ExportArgs) -> FinanceResult<()> {
    let user = dashboard.session().require_user()?.clone();
    let records = dashboard.records();

    let mut writer: Box<dyn Write> = match &args.output {
        Some(path) => {
            let file = File::create(path).map_err(|e| {
                FinanceError::Export(format!("Failed to create file {}: {}", path.display(), e))
            })?;
            Box::new(BufWriter::new(file))
        }
        None => Box::new(io::stdout().lock()),
    };

    let count = match args.format {
        ExportFormat::Json => {
            write_records_json(user.as_str(), &records, dashboard.goal(), &mut writer)?;
            writeln!(writer).map_err(|e| FinanceError::Export(e.to_string()))?;
            records.expenses.len() + records.incomes.len()
        }
        ExportFormat::Csv => match args.records {
            ExportRecords::Expenses => {
                write_expenses_csv(&records.expenses, &mut writer)?;
                records.expenses.len()
            }
            ExportRecords::Incomes => {
                write_incomes_csv(&records.incomes, &mut writer)?;
                records.incomes.len()
            }
        },
    };
    writer
        .flush()
        .map_err(|e| FinanceError::Export(e.to_string()))?;

    if let Some(path) = &args.output {
        println!("Exported {} records to: {}", count, path.display());
    }
    tracing::info!(user = %user, records = count, "export finished");

    Ok(())
}
