//! The registry of declared handlers and the registrar that walks it.

use crate::spec::{CommandSpec, SubcommandSpec};
use crate::{CommandError, CommandResult};
use std::collections::BTreeSet;
use std::sync::Arc;

/// Marker for instances that own command methods. The host's command
/// subsystem knows the concrete handler surface; the core only carries the
/// instance from declaration to registration.
pub trait CommandHandler: Send + Sync {}

struct CommandEntry {
    spec: CommandSpec,
    handler: Arc<dyn CommandHandler>,
    subcommands: Vec<SubcommandSpec>,
}

/// Accumulates declared command handlers in registration order.
#[derive(Default)]
pub struct CommandRegistry {
    entries: Vec<CommandEntry>,
    names: BTreeSet<String>,
}

impl CommandRegistry {
    /// Creates an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declares one command handler with its subcommand methods.
    ///
    /// Fails with [`CommandError::Duplicate`] when the command name (or one
    /// of its aliases) is already taken.
    pub fn register(
        &mut self,
        spec: CommandSpec,
        handler: Arc<dyn CommandHandler>,
        subcommands: Vec<SubcommandSpec>,
    ) -> CommandResult<()> {
        for name in std::iter::once(&spec.name).chain(spec.aliases.iter()) {
            if self.names.contains(name) {
                return Err(CommandError::Duplicate(name.clone()));
            }
        }
        self.names.insert(spec.name.clone());
        self.names.extend(spec.aliases.iter().cloned());
        self.entries.push(CommandEntry {
            spec,
            handler,
            subcommands,
        });
        Ok(())
    }

    /// Returns the number of declared commands.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns whether no commands are declared.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Walks every discovered subcommand and hands it to a registration
/// callback.
pub struct Registrar;

impl Registrar {
    /// Iterates all (subcommand, owning handler, command) triples in
    /// registration order, invoking `callback` once per subcommand method.
    pub fn register_all<F>(registry: &CommandRegistry, mut callback: F)
    where
        F: FnMut(&SubcommandSpec, &Arc<dyn CommandHandler>, &CommandSpec),
    {
        for entry in &registry.entries {
            for subcommand in &entry.subcommands {
                callback(subcommand, &entry.handler, &entry.spec);
            }
        }
    }
}
