//! Shared console fixtures.
#![allow(dead_code)]

use std::sync::Arc;

use chrono::NaiveDate;
use dterm::{
    CellMeasurer, Console, ConsoleBuilder, ConsoleConfig, FixedClock, RemoteLoader, catalog_with_clock,
};

/// Builder with a frozen clock, 10px cells, and the terminal open.
pub fn builder() -> ConsoleBuilder {
    let at = NaiveDate::from_ymd_opt(2024, 3, 9)
        .and_then(|d| d.and_hms_opt(14, 5, 9))
        .unwrap();
    Console::builder(catalog_with_clock(Arc::new(FixedClock::new(at, 0))))
        .measurer(Arc::new(CellMeasurer::new(10.0, 10.0)))
        .open(true)
}

/// Seeded console: `Tasks` (id 0) and `Clock` (id 1).
pub fn seeded() -> Console {
    builder().build()
}

/// Console with no widgets.
pub fn empty() -> Console {
    let mut config = ConsoleConfig::default();
    config.widgets.seed_defaults = false;
    builder().config(config).build()
}

pub fn with_loader(loader: impl RemoteLoader + 'static) -> Console {
    builder().loader(Arc::new(loader)).build()
}

/// Run `line` and return the block it appended, one record per line.
pub fn run(console: &mut Console, line: &str) -> String {
    let before = console.terminal().scrollback().len();
    console.execute(line);
    last_block(console, before)
}

/// Records appended since `before`, without the framing blanks.
pub fn last_block(console: &Console, before: usize) -> String {
    let records = &console.terminal().scrollback().records()[before..];
    match records {
        [] => String::new(),
        [_, body @ .., _] => body.join("\n"),
        [only] => only.clone(),
    }
}
