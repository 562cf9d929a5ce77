use anyhow::{anyhow, bail, Context, Result};
use report_tables::config::config::Config;
use report_tables::data::csv_loader::CsvLoader;
use report_tables::data::document::Document;
use report_tables::utils::app_paths::AppPaths;
use report_tables::view::preference::{FilePreferenceStore, ViewPreference};
use report_tables::view::render::{render_text_table, theme_toggle};
use std::io::Write;
use std::path::PathBuf;
use tracing::info;

const USAGE: &str = "\
Usage: report-tables <file.csv> [options]

Options:
  --search TEXT         Show only rows containing TEXT (case-insensitive)
  --sort COL            Click the header of COL (index or label); repeatable
  --output PATH         Write the export to PATH
  --stdout              Write the export to standard output
  --no-header           Leave the header line out of the export
  --print               Print the visible rows as a table
  --toggle-dark-mode    Flip the saved dark-mode preference
  --generate-config     Write a commented config file and exit
  -v, --verbose         Debug logging
  -h, --help            Show this help";

#[derive(Debug, Default)]
struct Args {
    file: Option<PathBuf>,
    search: Option<String>,
    sorts: Vec<String>,
    output: Option<PathBuf>,
    stdout: bool,
    no_header: bool,
    print: bool,
    toggle_dark_mode: bool,
    generate_config: bool,
    verbose: bool,
    help: bool,
}

fn parse_args(raw: &[String]) -> Result<Args> {
    let mut args = Args::default();
    let mut iter = raw.iter();

    while let Some(arg) = iter.next() {
        let mut value = |flag: &str| {
            iter.next()
                .cloned()
                .ok_or_else(|| anyhow!("{} needs a value", flag))
        };
        match arg.as_str() {
            "--search" => args.search = Some(value("--search")?),
            "--sort" => args.sorts.push(value("--sort")?),
            "--output" => args.output = Some(PathBuf::from(value("--output")?)),
            "--stdout" => args.stdout = true,
            "--no-header" => args.no_header = true,
            "--print" => args.print = true,
            "--toggle-dark-mode" => args.toggle_dark_mode = true,
            "--generate-config" => args.generate_config = true,
            "-v" | "--verbose" => args.verbose = true,
            "-h" | "--help" => args.help = true,
            other if other.starts_with('-') => bail!("Unknown option: {}", other),
            other => {
                if args.file.is_some() {
                    bail!("Only one input file is supported");
                }
                args.file = Some(PathBuf::from(other));
            }
        }
    }

    Ok(args)
}

fn generate_config() -> Result<()> {
    let path = Config::get_config_path()?;
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Error creating config directory {}", parent.display()))?;
    }
    std::fs::write(&path, Config::create_default_with_comments())
        .with_context(|| format!("Error writing config file {}", path.display()))?;
    println!("Configuration file created at: {:?}", path);
    Ok(())
}

fn toggle_dark_mode() -> Result<()> {
    let mut store = FilePreferenceStore::open(AppPaths::preferences_file()?);
    let mut preference = ViewPreference::load(&store);
    let preference = preference.toggle_dark_mode(&mut store)?;
    let toggle = theme_toggle(preference);
    println!(
        "Dark mode {} (toggle now shows \"{}\")",
        if preference.dark_mode { "on" } else { "off" },
        toggle.label
    );
    Ok(())
}

/// `-v` wins; otherwise the config's `[logging] verbose` decides
fn wants_verbose(args: &Args, config: Option<&Config>) -> bool {
    args.verbose || config.is_some_and(|c| c.logging.verbose)
}

fn run(args: Args, mut config: Config) -> Result<()> {
    if args.toggle_dark_mode {
        toggle_dark_mode()?;
        if args.file.is_none() {
            return Ok(());
        }
    }

    let file = args
        .file
        .ok_or_else(|| anyhow!("No input file given\n\n{}", USAGE))?;

    if args.no_header {
        config.export.include_header = false;
    }

    let table_id = file
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("table")
        .to_string();
    let table = CsvLoader::load_csv(&file, &table_id)?;

    let mut document = Document::with_options(config.controller_options());
    document.insert_table(table)?;
    let controller = document.bind_table(&table_id)?;

    for column in &args.sorts {
        match column.parse::<usize>() {
            Ok(index) => {
                controller.sort_by_column(index);
            }
            Err(_) => {
                controller
                    .sort_by_column_name(column)
                    .ok_or_else(|| anyhow!("No column named '{}'", column))?;
            }
        }
    }

    if let Some(query) = &args.search {
        let visible = controller.search(query);
        info!("{} rows match {:?}", visible.len(), query);
    }

    if args.print {
        println!("{}", render_text_table(controller));
    }

    let export = controller.export_csv(&config.export.default_filename);
    if args.stdout {
        let mut out = std::io::stdout().lock();
        out.write_all(&export.bytes)?;
        if !export.bytes.is_empty() {
            writeln!(out)?;
        }
    } else if let Some(path) = &args.output {
        export.write_to(path)?;
    } else if !args.print {
        let path = export.write_to_dir(&std::env::current_dir()?)?;
        println!("Exported {} rows to {}", export.row_count, path.display());
    }

    Ok(())
}

fn main() {
    let raw: Vec<String> = std::env::args().skip(1).collect();
    let args = match parse_args(&raw) {
        Ok(args) => args,
        Err(e) => {
            eprintln!("Error: {}\n\n{}", e, USAGE);
            std::process::exit(2);
        }
    };

    if args.help {
        println!("{}", USAGE);
        return;
    }

    // Generating the config must work even when the existing file is broken
    if args.generate_config {
        report_tables::logging::init_tracing(wants_verbose(&args, None));
        if let Err(e) = generate_config() {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
        return;
    }

    let config = match Config::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Error: {:#}", e);
            std::process::exit(1);
        }
    };
    report_tables::logging::init_tracing(wants_verbose(&args, Some(&config)));

    if let Err(e) = run(args, config) {
        eprintln!("Error: {:#}", e);
        std::process::exit(1);
    }
}
