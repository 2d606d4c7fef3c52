//! Line dispatch.
//!
//! [`dispatch`] never panics and never lets an error escape as anything but
//! a [`CommandError`]; a panicking handler becomes [`CommandError::Panicked`].

use std::panic::{AssertUnwindSafe, catch_unwind};

use crate::commands::CommandContext;
use crate::error::CommandError;
use crate::outcome::CommandOutcome;
use crate::registry::{CommandRegistry, Route};

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    pub command: String,
    pub args: Vec<String>,
}

impl Invocation {
    /// Split on runs of whitespace. A blank line yields an empty command.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut tokens = line.split_whitespace().map(str::to_owned);
        let command = tokens.next().unwrap_or_default();
        Self {
            command,
            args: tokens.collect(),
        }
    }
}

/// Run one invocation against the registry.
pub fn dispatch(
    ctx: &mut CommandContext<'_>,
    registry: &CommandRegistry,
    invocation: &Invocation,
) -> Result<CommandOutcome, CommandError> {
    let name = invocation.command.as_str();
    let Some(route) = registry.route(name) else {
        tracing::debug!(target: "dterm.dispatch", command = name, "unknown command");
        return Err(CommandError::UnknownCommand(name.to_owned()));
    };

    let result = catch_unwind(AssertUnwindSafe(|| run_route(ctx, route, &invocation.args)))
        .unwrap_or_else(|_| Err(CommandError::Panicked(name.to_owned())));

    tracing::debug!(
        target: "dterm.dispatch",
        command = name,
        shape = route.shape(),
        ok = result.is_ok(),
        "dispatched"
    );
    result
}

fn run_route(
    ctx: &mut CommandContext<'_>,
    route: &Route,
    args: &[String],
) -> Result<CommandOutcome, CommandError> {
    match route {
        Route::Core(core) => (core.run)(ctx, args),
        Route::Direct { command, widget } => {
            let widget = ctx
                .dashboard
                .get_mut(*widget)
                .ok_or_else(|| CommandError::PluginNotFound(widget.to_string()))?;
            Ok(widget.run_command(command, args)?)
        }
        Route::Base { command } => {
            let (target, rest) = args
                .split_first()
                .ok_or_else(|| CommandError::usage(format!("{command} <id|name> [args...]")))?;
            let id = ctx
                .dashboard
                .resolve_target(target)
                .ok_or_else(|| CommandError::PluginNotFound(target.clone()))?;
            let widget = ctx
                .dashboard
                .get_mut(id)
                .ok_or_else(|| CommandError::PluginNotFound(target.clone()))?;
            if !widget.supports(command) {
                return Err(CommandError::Unsupported {
                    command: command.clone(),
                    kind: widget.kind().to_owned(),
                });
            }
            Ok(widget.run_command(command, rest)?)
        }
    }
}
