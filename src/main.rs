use clap::CommandFactory;
use clap::Parser;
use clsearch::cli::{Cli, Commands, OutputFormat};
use clsearch::error::{ClsearchError, Result as ClsearchResult};
use clsearch::output::formatter_for;
use clsearch::{Metrics, Record, RecordStore, SearchEngine, load_config};
use colored::*;
use env_logger::{Builder, Env, Target};
use log::info;
use std::fs;
use std::sync::Arc;
use std::time::Instant;

fn main() -> ClsearchResult<()> {
    let cli = Cli::parse();
    setup_logging(&cli)?;

    let start_time = Instant::now();
    let mut config = load_config();

    match &cli.command {
        Commands::Search {
            query,
            limit,
            all,
            format,
            strategy,
            status,
            category,
            scores,
        } => {
            if let Some(strategy) = strategy {
                config.search.strategy = *strategy;
            }
            if *scores {
                config.display.show_scores = true;
            }

            let store = load_store(&cli)?;
            let metrics = Arc::new(Metrics::new());
            let engine = SearchEngine::with_config(
                store.into_records(),
                config.search_config(),
                Arc::clone(&metrics),
            );

            let mut results = engine.search(query);
            info!("Query {query:?} matched {} records", results.len());

            // Filters narrow the ranked list; they never reorder it
            results.retain(|r| {
                status.map_or(true, |s| r.record.status == s)
                    && category.map_or(true, |c| r.record.category == Some(c))
            });

            let total = results.len();
            if !*all {
                results.truncate(limit.unwrap_or(config.display.page_size));
            }

            let formatter = formatter_for(*format, &config.display);
            print!("{}", formatter.format(&results, query, total));

            if cli.metrics {
                println!("\n{}", "Metrics:".green().bold());
                print!("{}", metrics.gather());
            }
        }

        Commands::List { format } => {
            let store = load_store(&cli)?;
            let records: Vec<&Record> = store.records().iter().collect();
            let formatter = formatter_for(*format, &config.display);
            print!("{}", formatter.format_records(&records));
        }

        Commands::Show { id } => {
            let store = load_store(&cli)?;
            let record = store
                .get(id)
                .ok_or_else(|| ClsearchError::UnknownRecord(id.clone()))?;
            let formatter = formatter_for(OutputFormat::Text, &config.display);
            print!("{}", formatter.format_detail(record));
        }

        Commands::Completions { shell } => {
            let mut cmd = Cli::command();
            clap_complete::generate(*shell, &mut cmd, "clsearch", &mut std::io::stdout());
        }
    }

    info!(
        "Finished. Total elapsed time: {:.2?}",
        start_time.elapsed()
    );
    Ok(())
}

fn load_store(cli: &Cli) -> ClsearchResult<RecordStore> {
    let store = match &cli.records {
        Some(path) => RecordStore::load(path)?,
        None => RecordStore::bundled()?,
    };
    info!("Loaded {} records", store.len());
    Ok(store)
}

fn setup_logging(cli: &Cli) -> ClsearchResult<()> {
    let default_level = if cli.verbose { "info" } else { "warn" };
    let mut builder = Builder::from_env(Env::default().default_filter_or(default_level));

    builder.format(|buf, record| {
        use std::io::Write;
        writeln!(
            buf,
            "{} [{}] [{}] {}",
            chrono::Local::now().format("%Y-%m-%d %H:%M:%S"),
            record.level(),
            record.module_path().unwrap_or("unknown"),
            record.args()
        )
    });

    if let Some(log_path) = &cli.log {
        if let Some(parent_dir) = log_path.parent() {
            if !parent_dir.as_os_str().is_empty() && !parent_dir.exists() {
                fs::create_dir_all(parent_dir).map_err(ClsearchError::Io)?;
            }
        }
        let log_file = fs::File::create(log_path).map_err(ClsearchError::Io)?;
        builder.target(Target::Pipe(Box::new(log_file)));
    } else {
        builder.target(Target::Stderr);
    }

    builder
        .try_init()
        .map_err(|e| ClsearchError::Other(e.to_string()))?;
    Ok(())
}
