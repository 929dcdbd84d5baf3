//! EM Gallery - browse electron-microscopy datasets page by page.
//!
//! This binary exposes the address codec, the thumbnail renderer and the
//! paged table model on the command line.

use clap::Parser;
use serde_json::json;
use std::fs::File;
use std::io::BufReader;
use std::process::ExitCode;
use tracing::{error, info};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use em_gallery::{
    config::{Cli, Command, PageConfig, ParseConfig, ThumbnailConfig},
    parse_with_root, shared, ColumnsView, ImageFileSource, MemoryRowStore, PagedModel,
    PagedTableModel, RowStore, ThumbnailCache, ViewCoordinator,
};

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Command::Parse(config) => run_parse(config),
        Command::Thumbnail(config) => run_thumbnail(config),
        Command::Page(config) => run_page(config),
    }
}

// =============================================================================
// Parse Command
// =============================================================================

fn run_parse(config: ParseConfig) -> ExitCode {
    let address = match parse_with_root(&config.address, config.root.as_deref()) {
        Ok(address) => address,
        Err(e) => {
            eprintln!("Error: invalid address '{}': {}", config.address, e);
            return ExitCode::FAILURE;
        }
    };

    let output = json!({
        "address": address,
        "formatted": address.to_string(),
        "is_volume": address.is_volume(),
    });
    match serde_json::to_string_pretty(&output) {
        Ok(text) => {
            println!("{}", text);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            ExitCode::FAILURE
        }
    }
}

// =============================================================================
// Thumbnail Command
// =============================================================================

fn run_thumbnail(config: ThumbnailConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let cache_config = match config.cache_config() {
        Ok(c) => c,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let mut cache = ThumbnailCache::new(ImageFileSource::new(), cache_config);
    if let Some(root) = config.root.clone() {
        cache = cache.with_root(root);
    }

    let thumbnail = match cache.get_or_create_text(&config.address, cache_config.target_size()) {
        Ok(t) => t,
        Err(e) => {
            error!("Failed to render '{}': {}", config.address, e);
            return ExitCode::FAILURE;
        }
    };

    let Some(image) = thumbnail.to_gray_image() else {
        error!("Rendered thumbnail has inconsistent dimensions");
        return ExitCode::FAILURE;
    };

    if let Err(e) = image.save(&config.output) {
        error!("Failed to write {}: {}", config.output.display(), e);
        return ExitCode::FAILURE;
    }

    let (width, height) = thumbnail.dimensions();
    info!(
        "Wrote {}x{} thumbnail to {}",
        width,
        height,
        config.output.display()
    );
    ExitCode::SUCCESS
}

// =============================================================================
// Page Command
// =============================================================================

fn run_page(config: PageConfig) -> ExitCode {
    if let Err(e) = config.validate() {
        error!("Configuration error: {}", e);
        return ExitCode::FAILURE;
    }

    let paging = match config.paging_config() {
        Ok(p) => p,
        Err(e) => {
            error!("Configuration error: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let store = match File::open(&config.table)
        .map_err(|e| e.to_string())
        .and_then(|f| MemoryRowStore::from_json_reader(BufReader::new(f)).map_err(|e| e.to_string()))
    {
        Ok(store) => store,
        Err(e) => {
            error!("Failed to load {}: {}", config.table.display(), e);
            return ExitCode::FAILURE;
        }
    };

    let sort_column = match config.sort.as_deref() {
        Some(name) => match store.column_index(name) {
            Some(index) => Some(index),
            None => {
                error!("Unknown sort column '{}'", name);
                return ExitCode::FAILURE;
            }
        },
        None => None,
    };

    let mut model = PagedTableModel::new(shared(store), paging);
    if let Some(column) = sort_column {
        if let Err(e) = model.sort(column, config.desc) {
            error!("Sort failed: {}", e);
            return ExitCode::FAILURE;
        }
    }

    let mut coordinator = ViewCoordinator::new(model);
    coordinator.add_view(Box::new(ColumnsView::new(1, 0)));

    let moved = match config.row {
        Some(row) => coordinator.select_row(row),
        None => coordinator.go_to_page(config.page),
    };
    if !moved {
        error!(
            "Requested position is outside the table ({} rows, {} pages)",
            coordinator.model().total(),
            coordinator.model().page_count()
        );
        return ExitCode::FAILURE;
    }

    print_page(coordinator.model(), coordinator.current_row())
}

/// Print the page header followed by one JSON line per resident row.
fn print_page(model: &PagedTableModel<MemoryRowStore>, current_row: Option<usize>) -> ExitCode {
    let columns = model.columns();
    let header = json!({
        "page": model.page(),
        "page_count": model.page_count(),
        "page_size": model.page_size(),
        "total": model.total(),
        "current_row": current_row,
        "columns": columns.iter().map(|c| c.name()).collect::<Vec<_>>(),
    });
    println!("{}", header);

    let start = model.paging().current_range().start;
    for (offset, row) in model.window().iter().enumerate() {
        match serde_json::to_string(&json!({ "row": start + offset, "cells": row })) {
            Ok(line) => println!("{}", line),
            Err(e) => {
                error!("Failed to serialize row {}: {}", start + offset, e);
                return ExitCode::FAILURE;
            }
        }
    }

    ExitCode::SUCCESS
}

/// Initialize the tracing subscriber for logging.
fn init_logging(verbose: bool) {
    let env_filter = if verbose {
        "em_gallery=debug"
    } else {
        "em_gallery=info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| env_filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();
}
