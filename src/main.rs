use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use tablepeek::{BookConfig, TableBook};

/// Extract a table from an Excel spreadsheet as JSON records.
#[derive(Parser)]
#[command(version, about)]
struct Args {
    /// Spreadsheet file (.xls or .xlsx)
    file: PathBuf,

    /// Layout config file; defaults to the spreadsheet's base name with a
    /// .yml/.yaml extension
    #[arg(long)]
    config: Option<PathBuf>,

    /// Sheet to extract, by 0-based index
    #[arg(long, default_value_t = 0)]
    sheet: usize,

    /// List sheet names and exit
    #[arg(long)]
    list_sheets: bool,

    /// Pretty-print the JSON output
    #[arg(long)]
    pretty: bool,
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    let mut book = match args.config {
        Some(path) => TableBook::load_with(&args.file, BookConfig::load(path)?)?,
        None => TableBook::load(&args.file)?,
    };

    if args.list_sheets {
        for (index, name) in book.sheet_names().iter().enumerate() {
            println!("{index}\t{name}");
        }
        return Ok(());
    }

    if args.sheet != 0 {
        book.select_sheet(args.sheet)?;
    }

    let records = book.records();
    let output = if args.pretty {
        serde_json::to_string_pretty(&records)?
    } else {
        serde_json::to_string(&records)?
    };
    println!("{output}");
    Ok(())
}
