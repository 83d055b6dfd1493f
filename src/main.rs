// Copyright 2025-present Harīṣh Tummalachērla
// SPDX-License-Identifier: Apache-2.0

use std::fs;

use chrono::{DateTime, Utc};
use clap::Parser;
use tracing::debug;
use tracing_subscriber::EnvFilter;

use affinity::scoring::{recency_decay, star_boost};
use affinity::{
    boost, find_item, is_qualified_name, rerank, validate_boost_input, CancellationToken, Config,
    Error, JsonLinesSource, RankedHit, RankedResult, RelatednessEngine, Result, SearchHit,
};

mod cli;
use cli::display::*;
use cli::{Cli, Commands};

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    if let Err(e) = run(cli.command) {
        eprintln!("{} {}", error_label(), e);
        std::process::exit(1);
    }
}

/// `RUST_LOG` wins; otherwise `warn`, or `debug` with `-v`.
fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(command: Commands) -> Result<()> {
    match command {
        Commands::Related {
            target,
            items,
            limit,
            config,
            json,
        } => run_related(&target, &items, limit, config.as_deref(), json),
        Commands::Boost {
            score,
            stars,
            updated_at,
            now,
        } => run_boost(score, stars, updated_at, now.unwrap_or_else(Utc::now)),
        Commands::Rerank {
            hits,
            min_score,
            limit,
            config,
            now,
            json,
        } => run_rerank(
            &hits,
            min_score,
            limit,
            config.as_deref(),
            now.unwrap_or_else(Utc::now),
            json,
        ),
    }
}

fn load_config(path: Option<&str>) -> Result<Config> {
    match path {
        Some(path) => Config::from_file(path),
        None => Ok(Config::default()),
    }
}

// ============================================================================
// RELATED
// ============================================================================

fn run_related(target: &str, items: &str, limit: Option<u8>, config: Option<&str>, json: bool) -> Result<()> {
    if !is_qualified_name(target) {
        return Err(Error::InvalidTarget(format!(
            "'{}' is not of the form owner/name",
            target
        )));
    }

    let mut config = load_config(config)?;
    if let Some(limit) = limit {
        config.related.max_results = usize::from(limit);
    }
    let engine = RelatednessEngine::new(config.related)?;

    let target_view = find_item(items, target)
        .map_err(Error::Catalog)?
        .ok_or_else(|| Error::InvalidTarget(format!("'{}' not found in {}", target, items)))?;
    debug!(id = %target_view.id, "resolved target");

    let mut source = JsonLinesSource::open(items, Some(target_view.id.clone()))
        .map_err(Error::Catalog)?;
    let results = engine.find_related(&target_view, &mut source, &CancellationToken::new())?;

    if json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        print_related(&target_view.full_name, &results);
    }
    Ok(())
}

fn print_related(target: &str, results: &[RankedResult]) {
    section_top(&format!("RELATED TO {}", target));
    if results.is_empty() {
        row(&dim("  no related items above the threshold"));
    }
    for (i, result) in results.iter().enumerate() {
        row(&format!(
            " {} {} {}",
            rank_label(i + 1),
            pad_right(&truncate(&result.full_name, 48), 48),
            score_value(result.score)
        ));
        row(&format!(
            "      {}",
            dim(&truncate(&result.explanation.join("; "), BOX_WIDTH - 7))
        ));
    }
    section_bot();
}

// ============================================================================
// BOOST / RERANK
// ============================================================================

fn run_boost(score: f64, stars: u64, updated_at: DateTime<Utc>, now: DateTime<Utc>) -> Result<()> {
    validate_boost_input("input", score, updated_at, now)?;
    debug!(
        star_boost = star_boost(stars),
        recency = recency_decay(updated_at, now),
        "boost factors"
    );
    println!("{:.6}", boost(score, stars, updated_at, now));
    Ok(())
}

fn run_rerank(
    hits: &str,
    min_score: Option<f64>,
    limit: Option<usize>,
    config: Option<&str>,
    now: DateTime<Utc>,
    json: bool,
) -> Result<()> {
    let mut config = load_config(config)?;
    if let Some(min_score) = min_score {
        config.rerank.min_score = min_score;
    }
    if let Some(limit) = limit {
        config.rerank.limit = limit;
    }

    let hits: Vec<SearchHit> = serde_json::from_str(&fs::read_to_string(hits)?)?;
    debug!(hits = hits.len(), "loaded search hits");
    let ranked = rerank(hits, &config.rerank, now)?;

    if json {
        println!("{}", serde_json::to_string_pretty(&ranked)?);
    } else {
        print_ranked(&ranked);
    }
    Ok(())
}

fn print_ranked(ranked: &[RankedHit]) {
    section_top("RERANKED HITS");
    if ranked.is_empty() {
        row(&dim("  no hits above the threshold"));
    }
    for hit in ranked {
        row(&format!(
            " {} {} {} {}",
            rank_label(hit.rank),
            pad_right(&truncate(hit.id.as_str(), 48), 48),
            score_value(hit.score),
            dim(&format!("{:>8} stars", hit.stars))
        ));
    }
    section_bot();
}
