use crossterm::style::Stylize;
use dd_table::config::config::Config;
use dd_table::ui::table_app::TableApp;
use std::fs;
use std::path::PathBuf;
use tracing::{error, info};

fn print_help() {
    println!("{}", "dd-table - Editable, reorderable table".blue().bold());
    println!();
    println!("{}", "Usage:".yellow());
    println!("  dd-table [OPTIONS]");
    println!();
    println!("{}", "Options:".yellow());
    println!("  {}            - Show this help", "--help".green());
    println!(
        "  {} - Write a commented config file to the default location",
        "--generate-config".green()
    );
    println!("  {}   - Use this config file", "--config <path>".green());
    println!("  {}        - Disable mouse capture", "--no-mouse".green());
    println!("  {}           - Start without the seed rows", "--empty".green());
    println!(
        "  {}       - Print the rows as JSON on exit",
        "--dump-json".green()
    );
    println!();
    println!("{}", "Keys:".yellow());
    println!("  {}  - Edit selected row", "e / Enter".green());
    println!("  {}  - Move selected row", "Shift+↑/↓".green());
    println!("  {}          - Add Row panel", "a".green());
    println!("  {}          - Add Column panel", "c".green());
    println!("  {}         - Help", "F1".green());
    println!("  {}          - Quit", "q".green());
}

fn main() {
    if let Err(e) = run() {
        eprintln!("{}", format!("Error: {:#}", e).red());
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let args: Vec<String> = std::env::args().collect();

    if args.iter().any(|a| a == "--help" || a == "-h") {
        print_help();
        return Ok(());
    }

    if args.contains(&"--generate-config".to_string()) {
        let path = Config::get_config_path()?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, Config::create_default_with_comments())?;
        println!("Configuration file created at: {:?}", path);
        println!("Edit this file to customize dd-table.");
        return Ok(());
    }

    dd_table::utils::logging::init_tracing_with_dual_logging();
    if let Some(dual_logger) = dd_table::utils::dual_logging::get_dual_logger() {
        eprintln!("📝 Debug logs will be written to:");
        eprintln!("   {}", dual_logger.log_path().display());
    }

    let config_path = args
        .iter()
        .position(|a| a == "--config")
        .map(|i| {
            args.get(i + 1)
                .map(PathBuf::from)
                .ok_or_else(|| anyhow::anyhow!("--config needs a file path"))
        })
        .transpose()?;

    let mut config = match config_path {
        Some(path) => Config::load_from(&path)?,
        None => Config::load().unwrap_or_else(|e| {
            error!(target: "config", "Falling back to default config: {:#}", e);
            Config::default()
        }),
    };

    if args.contains(&"--no-mouse".to_string()) {
        config.behavior.enable_mouse = false;
    }
    if args.contains(&"--empty".to_string()) {
        config.behavior.seed_rows = false;
    }
    let dump_json = args.contains(&"--dump-json".to_string());

    let app = TableApp::new(config).run()?;
    info!(target: "app", "Exited with {} rows", app.state().row_count());

    if dump_json {
        println!("{}", app.rows_json()?);
    }

    if let Some(dual_logger) = dd_table::utils::dual_logging::get_dual_logger() {
        dual_logger.flush();
    }

    Ok(())
}
