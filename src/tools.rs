// Tool registry and core tool logic for time
use std::collections::HashMap;

use chrono::{DateTime, SecondsFormat, Utc};
use serde_json::Value;

use crate::error::ToolError;

/// A tool takes the opaque `args` value and produces the textual result.
pub type ToolFn = fn(&Value) -> Result<String, ToolError>;

pub const GET_SYSTEM_TIME: &str = "get_system_time";

/// Name-to-handler table, built once before the server starts accepting
/// connections and only read afterwards.
#[derive(Clone, Default)]
pub struct ToolRegistry {
    tools: HashMap<&'static str, ToolFn>,
}

impl ToolRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registry with every built-in tool.
    pub fn with_builtin_tools() -> Self {
        Self::new().register(GET_SYSTEM_TIME, get_system_time)
    }

    pub fn register(mut self, name: &'static str, tool: ToolFn) -> Self {
        self.tools.insert(name, tool);
        self
    }

    pub fn call(&self, name: &str, args: &Value) -> Result<String, ToolError> {
        match self.tools.get(name) {
            Some(tool) => tool(args),
            None => Err(ToolError::NotFound(name.to_string())),
        }
    }

    #[cfg(test)]
    fn names(&self) -> Vec<&'static str> {
        let mut names: Vec<_> = self.tools.keys().copied().collect();
        names.sort_unstable();
        names
    }
}

/// Current UTC time as RFC 3339 with whole seconds, e.g. `2024-01-15T10:30:00Z`.
/// `args` is ignored.
pub fn get_system_time(_args: &Value) -> Result<String, ToolError> {
    Ok(format_time(Utc::now()))
}

pub fn format_time(time: DateTime<Utc>) -> String {
    time.to_rfc3339_opts(SecondsFormat::Secs, true)
}
