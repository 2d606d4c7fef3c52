#![forbid(unsafe_code)]

//! Runtime: the command protocol and the console controller.
//!
//! # Role in dterm
//! `dterm-runtime` routes a typed line to a core handler or to one widget's
//! handler and feeds the result back into the terminal scrollback.
//!
//! # Primary responsibilities
//! - **Widget contract**: [`Widget`] plus the [`WidgetCatalog`] of constructors.
//! - **Dashboard**: the ordered widget collection, layout, and JSON snapshots.
//! - **Registry**: [`CommandRegistry::rebuild`] merges the core table with
//!   every live widget's commands; it is rebuilt whole, never patched.
//! - **Dispatch**: [`dispatch::dispatch`] resolves targets by id or title and
//!   turns every failure into a reportable [`CommandError`].
//! - **Autocomplete**: [`complete::complete`] proposes command names and targets.
//! - **Deferred work**: [`TaskRunner`] settles `load-json` off the event path.
//! - **Console**: [`Console`] owns all of the above plus the terminal state and
//!   is the single writer for every event.

pub mod catalog;
pub mod commands;
pub mod complete;
pub mod config;
pub mod console;
pub mod dashboard;
pub mod dispatch;
pub mod error;
pub mod outcome;
pub mod persistence;
pub mod registry;
pub mod snapshot;
pub mod tasks;
pub mod widget;

#[cfg(test)]
pub(crate) mod testing;

pub use catalog::WidgetCatalog;
pub use commands::{CommandContext, CoreCommand, CoreTable};
pub use complete::{Completions, complete};
pub use config::ConsoleConfig;
pub use console::{Console, ConsoleBuilder, ConsoleEffect};
pub use dashboard::Dashboard;
pub use dispatch::{Invocation, dispatch};
pub use error::{CommandError, ConfigError, LoadError, SnapshotError, StorageError, WidgetError};
pub use outcome::{CommandOutcome, DeferredOp, PageDirection, PageMove};
pub use persistence::{FileStorage, MemoryStorage, Persistence};
pub use registry::{CommandRegistry, Route};
pub use snapshot::{DashboardSnapshot, LayoutSnapshot, WidgetSnapshot};
pub use tasks::{FileLoader, MemoryLoader, RemoteLoader, Settled, TaskRunner, UnavailableLoader};
pub use widget::{Widget, WidgetId};
