//! Declared command metadata.

/// Metadata a command handler declares once: the primary name, usage line,
/// aliases, and description shown by the host's help surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub name: String,
    pub usage: String,
    pub aliases: Vec<String>,
    pub description: String,
}

impl CommandSpec {
    /// Declares a command with a name and usage line.
    pub fn new(name: impl Into<String>, usage: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            usage: usage.into(),
            aliases: Vec::new(),
            description: String::new(),
        }
    }

    /// Adds an alias.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.aliases.push(alias.into());
        self
    }

    /// Sets the description.
    #[must_use]
    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }
}

/// Metadata one subcommand method declares: its name, plus the permission
/// gate the host enforces before dispatching to it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SubcommandSpec {
    pub method: String,
    pub permission: Option<String>,
    pub permission_message: Option<String>,
}

impl SubcommandSpec {
    /// Declares an ungated subcommand method.
    pub fn new(method: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            permission: None,
            permission_message: None,
        }
    }

    /// Gates the subcommand behind a permission string, with the message
    /// shown on denial.
    #[must_use]
    pub fn with_permission(
        mut self,
        permission: impl Into<String>,
        message: impl Into<String>,
    ) -> Self {
        self.permission = Some(permission.into());
        self.permission_message = Some(message.into());
        self
    }
}
