use anyhow::{bail, Context, Result};
use chrono::{Local, NaiveDate};
use clap::{Parser, Subcommand};
use std::rc::Rc;

use finance_dashboard::cli::{
    handle_budget_command, handle_expense_command, handle_export_command, handle_income_command,
    handle_layout_command, handle_report_command, BudgetCommands, ExpenseCommands, ExportArgs,
    IncomeCommands, LayoutCommands, ReportCommands,
};
use finance_dashboard::config::{DashboardPaths, Settings};
use finance_dashboard::display::{format_category_table, DisplayOptions};
use finance_dashboard::models::Category;
use finance_dashboard::notify::ConsoleNotifier;
use finance_dashboard::seed::demo_records;
use finance_dashboard::services::{Dashboard, DashboardContext, Session, UserId};
use finance_dashboard::storage::{DocumentBackend, JsonFileBackend, MemoryBackend};
use finance_dashboard::{logging, FinanceError};

const DEMO_USER: &str = "demo";

#[derive(Parser)]
#[command(
    name = "findash",
    author = "Kaylee Beyene",
    version,
    about = "Personal finance dashboard",
    long_about = "findash tracks bills and income, shows where the money goes, \
                  and warns when spending approaches your budget goals."
)]
struct Cli {
    /// Signed-in user
    #[arg(short, long, global = true, env = "FINDASH_USER")]
    user: Option<String>,

    /// Use generated demo data kept in memory
    #[arg(long, global = true)]
    demo: bool,

    /// Pretend today is this date (YYYY-MM-DD)
    #[arg(long, global = true)]
    today: Option<NaiveDate>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Expense management commands
    #[command(subcommand, alias = "exp")]
    Expense(ExpenseCommands),

    /// Income management commands
    #[command(subcommand, alias = "inc")]
    Income(IncomeCommands),

    #[command(flatten)]
    Report(ReportCommands),

    /// Budget goal commands
    #[command(subcommand)]
    Budget(BudgetCommands),

    /// Dashboard layout commands
    #[command(subcommand)]
    Layout(LayoutCommands),

    /// List expense categories
    Categories,

    /// Export records
    Export(ExportArgs),

    /// Show current configuration and paths
    Config,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let paths = DashboardPaths::new()?;
    let mut settings = Settings::load_or_create(&paths)?;
    logging::init(&settings.log_level);

    let today = cli.today.unwrap_or_else(|| Local::now().date_naive());
    let options = DisplayOptions::from_settings(&settings, today);

    // Commands that never touch user documents
    let command = match cli.command {
        Some(Commands::Categories) => {
            println!("{}", format_category_table(&Category::defaults()));
            return Ok(());
        }
        Some(Commands::Layout(cmd)) => {
            handle_layout_command(&paths, &mut settings, cmd)?;
            return Ok(());
        }
        Some(Commands::Config) => {
            print_config(&paths, &settings);
            return Ok(());
        }
        None => {
            println!("findash - personal finance dashboard");
            println!();
            println!("Run 'findash --help' for usage information.");
            println!("Run 'findash --demo dashboard' to see it with sample data.");
            return Ok(());
        }
        Some(command) => command,
    };

    let user = cli
        .user
        .clone()
        .or_else(|| settings.default_user.clone())
        .or_else(|| cli.demo.then(|| DEMO_USER.to_string()))
        .map(|raw| raw.parse::<UserId>())
        .transpose()?;
    let session = match user {
        Some(user) => Session::signed_in(user),
        None => Session::signed_out(),
    };

    let backend: Box<dyn DocumentBackend> = match (cli.demo, session.user()) {
        (true, Some(user)) => Box::new(MemoryBackend::with_records(user, demo_records(today))),
        _ => Box::new(JsonFileBackend::new(paths.clone())),
    };

    let context = DashboardContext::from_settings(&settings, today);
    let mut dashboard = Dashboard::new(session, backend, Rc::new(ConsoleNotifier), context);

    match dashboard.load() {
        Err(FinanceError::Unauthenticated) => {
            bail!("Not signed in. Pass --user <name>, set FINDASH_USER, or set default_user in the config file.");
        }
        other => other.context("Failed to load documents")?,
    }

    let result = match command {
        Commands::Expense(cmd) => handle_expense_command(&mut dashboard, &options, cmd),
        Commands::Income(cmd) => handle_income_command(&mut dashboard, &options, cmd),
        Commands::Report(cmd) => handle_report_command(&dashboard, &settings, &options, cmd),
        Commands::Budget(cmd) => handle_budget_command(&mut dashboard, &options, cmd),
        Commands::Export(args) => handle_export_command(&dashboard, args),
        Commands::Categories | Commands::Layout(_) | Commands::Config => Ok(()),
    };

    if dashboard.pending_writes() > 0 {
        let report = dashboard.sync()?;
        if !report.is_clean() {
            bail!("{} of {} changes could not be saved", report.failed, report.applied + report.failed);
        }
    }

    result?;
    Ok(())
}

fn print_config(paths: &DashboardPaths, settings: &Settings) {
    println!("findash Configuration");
    println!("=====================");
    println!("Base directory:  {}", paths.base_dir().display());
    println!("Settings file:   {}", paths.settings_file().display());
    println!("Data directory:  {}", paths.data_dir().display());
    println!();
    println!("Settings:");
    println!("  Currency symbol: {}", settings.currency_symbol);
    println!("  Date format:     {}", settings.date_format);
    println!("  Warn threshold:  {}%", settings.warn_threshold);
    println!("  Due soon window: {} days", settings.due_soon_days);
    println!("  Trend months:    {}", settings.trend_months);
    println!(
        "  Default user:    {}",
        settings.default_user.as_deref().unwrap_or("(none)")
    );
    println!("  Log level:       {}", settings.log_level);
}
