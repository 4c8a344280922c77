// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use clap::Parser;
use tracing::Level;

use apidex::build::{rebuild, BuildReport};
use apidex::config::DataPaths;
use apidex::fetch::fetch_schema;
use apidex::search::{Limit, Query, SearchEngine};
use apidex::Result;

mod cli;
use cli::display;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_logging(cli.verbose, cli.quiet);

    if let Err(e) = run(&cli) {
        eprintln!("❌ {}", e);
        std::process::exit(e.exit_code());
    }
}

fn init_logging(verbose: u8, quiet: bool) {
    let level = match (quiet, verbose) {
        (true, _) => Level::ERROR,
        (false, 0) => Level::WARN,
        (false, 1) => Level::INFO,
        (false, _) => Level::DEBUG,
    };
    tracing_subscriber::fmt()
        .with_max_level(level)
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();
}

fn run(cli: &Cli) -> Result<()> {
    let paths = cli.paths();
    match &cli.command {
        Commands::Search {
            query,
            category,
            limit,
            all,
            hide_deprecated,
            json,
        } => {
            let limit = if *all { Limit::Unlimited } else { Limit::Top(*limit) };
            let mut request = Query::new(query.as_str())
                .limit(limit)
                .hide_deprecated(*hide_deprecated);
            request.category = category.clone();
            run_search(&paths, &request, *json)
        }
        Commands::ListEndpoints { category, json } => run_list(&paths, category.as_deref(), *json),
        Commands::Stats { json } => run_stats(&paths, *json),
        Commands::Rebuild => {
            let report = rebuild(&paths)?;
            print_build_report(&report);
            Ok(())
        }
        Commands::Fetch { source, no_rebuild } => {
            let meta = fetch_schema(source, &paths)?;
            eprintln!(
                "  ✓ stored {} (version {})",
                paths.schema.display(),
                meta.version
            );
            if !no_rebuild {
                let report = rebuild(&paths)?;
                print_build_report(&report);
            }
            Ok(())
        }
    }
}

fn run_search(paths: &DataPaths, query: &Query, json: bool) -> Result<()> {
    let engine = SearchEngine::open(&paths.index)?;
    let results = engine.search(query);

    if json {
        print_json(&results.records());
        return Ok(());
    }

    println!();
    println!(
        "Found {} endpoint(s) matching '{}'",
        results.total_matches, query.text
    );
    if let Some(category) = &query.category {
        println!("  (filtered by category: {})", category);
    }
    println!();

    if results.hits.is_empty() {
        println!("No matching endpoints found. Try:");
        println!("  - Different search terms");
        println!("  - Broader search (remove --category filter)");
        println!("  - List all endpoints: apidex list-endpoints");
        return Ok(());
    }

    let rendered: Vec<String> = results
        .hits
        .iter()
        .map(|hit| display::endpoint_detail(hit.record, Some(hit.score)))
        .collect();
    println!("{}", rendered.join("\n\n"));

    if results.truncated() > 0 {
        println!();
        println!("... and {} more result(s).", results.truncated());
        println!("Use --all to see all results, or refine your search.");
    }
    Ok(())
}

fn run_list(paths: &DataPaths, category: Option<&str>, json: bool) -> Result<()> {
    let engine = SearchEngine::open(&paths.index)?;
    let records = engine.list_all(category);

    if json {
        print_json(&records);
        return Ok(());
    }

    let meta = engine.metadata();
    println!("API: {} v{}", meta.title, meta.source_version);
    println!("Total endpoints: {}", records.len());
    println!();
    for record in records {
        println!("{}", display::endpoint_line(record));
    }
    Ok(())
}

fn run_stats(paths: &DataPaths, json: bool) -> Result<()> {
    let engine = SearchEngine::open(&paths.index)?;
    let stats = engine.stats();
    if json {
        print_json(&stats);
    } else {
        display::print_stats(&stats);
    }
    Ok(())
}

fn print_build_report(report: &BuildReport) {
    // Each duplicate was already logged by the builder
    if !report.warnings.is_empty() {
        eprintln!(
            "⚠️  {} duplicate endpoint declaration(s) collapsed, later declaration kept",
            report.warnings.len()
        );
    }
    eprintln!(
        "✅ Generated index with {} endpoints ({} tokens, source version {})",
        report.record_count, report.token_count, report.source_version
    );
    eprintln!("   Index saved to: {}", report.index_path.display());
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(text) => println!("{}", text),
        Err(e) => eprintln!("❌ failed to encode JSON: {}", e),
    }
}
