//! datagrid-inspect - Main Entry Point
//!
//! Binds a JSON document to a data grid and prints its first page.
//!
//! Usage: `datagrid-inspect <data.json> [config.toml]`

use std::path::PathBuf;

use anyhow::{Context, bail};
use datagrid_source::constants::INSPECT_CELL_WIDTH;
use datagrid_source::grid::DataProvider;
use datagrid_source::helpers::pad_cell;
use datagrid_source::{DataGrid, GridConfig, ItemsSource};

fn main() -> anyhow::Result<()> {
    // Initialize tracing for logging
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive(tracing::Level::INFO.into()),
        )
        .init();

    let mut args = std::env::args_os().skip(1);
    let Some(data_path) = args.next().map(PathBuf::from) else {
        bail!("usage: datagrid-inspect <data.json> [config.toml]");
    };
    let config = match args.next().map(PathBuf::from) {
        Some(path) => GridConfig::load_from(&path)?,
        None => GridConfig::try_load()?,
    };

    let text = std::fs::read_to_string(&data_path)
        .with_context(|| format!("failed to read {}", data_path.display()))?;
    let source = ItemsSource::from_json_str(&text)
        .with_context(|| format!("failed to load {}", data_path.display()))?;

    let page_size = config.grid.page_size;
    let mut grid = DataGrid::new(config.grid);
    grid.set_property_definitions(config.columns);
    grid.set_items_source(source);

    tracing::info!(
        path = %data_path.display(),
        rows = grid.row_count(),
        columns = grid.column_count(),
        "Loaded items source"
    );

    let header: String = grid
        .property_definitions()
        .iter()
        .map(|pd| pad_cell(pd.display_name(), INSPECT_CELL_WIDTH))
        .collect();
    if grid.settings().items_in_rows && !header.trim().is_empty() {
        println!("{}", header.trim_end());
    }
    for row in grid.page(0, page_size) {
        let line: String = row
            .iter()
            .map(|value| pad_cell(&value.to_string(), INSPECT_CELL_WIDTH))
            .collect();
        println!("{}", line.trim_end());
    }
    if grid.page_count(page_size) > 1 {
        println!("... {} rows total", grid.row_count());
    }

    Ok(())
}
