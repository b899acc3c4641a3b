//! The call descriptor handed to a binding's route function.

use serde_json::Value;

/// One method invocation on a facade: the method name plus its positional
/// arguments, already lowered to JSON values.
#[derive(Debug, Clone, PartialEq)]
pub struct MethodCall {
    name: String,
    args: Vec<Value>,
}

impl MethodCall {
    /// Creates a zero-argument call.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            args: Vec::new(),
        }
    }

    /// Creates a call with a full argument list.
    pub fn with_args(name: impl Into<String>, args: Vec<Value>) -> Self {
        Self {
            name: name.into(),
            args,
        }
    }

    /// Appends one argument.
    #[must_use]
    pub fn arg(mut self, value: impl Into<Value>) -> Self {
        self.args.push(value.into());
        self
    }

    /// Returns the method name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns the positional arguments.
    #[must_use]
    pub fn args(&self) -> &[Value] {
        &self.args
    }

    /// Returns the number of arguments.
    #[must_use]
    pub fn arity(&self) -> usize {
        self.args.len()
    }
}
