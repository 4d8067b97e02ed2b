//! Helpful error types for CLI commands
//!
//! Every error includes:
//! - What went wrong
//! - Context about the situation
//! - Suggestions for how to fix it

use rowscope_core::InsertError;
use std::fmt;
use std::path::Path;

/// An error with helpful context and suggestions
#[derive(Debug)]
pub struct HelpfulError {
    /// The main error message
    pub message: String,
    /// Additional context about what was happening
    pub context: Option<String>,
    /// Suggestions for how to fix the error
    pub suggestions: Vec<String>,
}

impl HelpfulError {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
            context: None,
            suggestions: Vec::new(),
        }
    }

    pub fn with_context(mut self, context: impl Into<String>) -> Self {
        self.context = Some(context.into());
        self
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestions.push(suggestion.into());
        self
    }

    pub fn with_suggestions(mut self, suggestions: impl IntoIterator<Item = impl Into<String>>) -> Self {
        self.suggestions.extend(suggestions.into_iter().map(|s| s.into()));
        self
    }

    // === Common error constructors ===

    /// Snapshot file does not exist
    pub fn snapshot_not_found(path: &Path) -> Self {
        Self::new(format!("Snapshot not found: {}", path.display()))
            .with_context("Every command reads a JSON snapshot of types, columns and rows")
            .with_suggestions([
                format!("TRY: Check that the file exists: ls -la {}", path.display()),
                "TRY: Check for typos in the path".to_string(),
            ])
    }

    /// Snapshot file is not valid snapshot JSON
    pub fn invalid_snapshot(path: &Path, reason: impl fmt::Display) -> Self {
        Self::new(format!("Invalid snapshot: {}", path.display()))
            .with_context(reason.to_string())
            .with_suggestion(
                "TRY: A snapshot looks like {\"types\": {..}, \"tables\": {\"todo\": {\"columns\": {..}, \"rows\": [..]}}}",
            )
    }

    /// Config file given with --config does not exist
    pub fn config_not_found(path: &Path) -> Self {
        Self::new(format!("Config file not found: {}", path.display()))
            .with_suggestion("TRY: Drop --config to use $ROWSCOPE_HOME/config.toml or the defaults")
    }

    /// Table is not in the snapshot
    pub fn unknown_table(table: &str, available: &[&str]) -> Self {
        let err = Self::new(format!("Unknown table: {}", table));
        if available.is_empty() {
            return err.with_context("The snapshot has no tables");
        }
        err.with_context(format!("Tables in this snapshot: {}", available.join(", ")))
            .with_suggestion("TRY: List tables with: rowscope tables <snapshot>")
    }

    /// `--set` argument without `=`
    pub fn invalid_assignment(arg: &str) -> Self {
        Self::new(format!("Invalid --set value: {}", arg))
            .with_context("Expected COLUMN=VALUE")
            .with_suggestion(format!("TRY: --set {}=<value>", arg))
    }

    /// Input names a column the insert form does not have
    pub fn unknown_field(table: &str, field: &str, fields: &[&str]) -> Self {
        Self::new(format!("Table {} has no insertable column {}", table, field))
            .with_context(format!("Insertable columns: {}", fields.join(", ")))
            .with_suggestion(format!("TRY: Show the insert form with: rowscope fields <snapshot> {}", table))
    }
}

impl fmt::Display for HelpfulError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "ERROR: {}", self.message)?;

        if let Some(ctx) = &self.context {
            writeln!(f, "CONTEXT: {}", ctx)?;
        }

        if !self.suggestions.is_empty() {
            writeln!(f)?;
            for suggestion in &self.suggestions {
                writeln!(f, "  {}", suggestion)?;
            }
        }

        Ok(())
    }
}

impl std::error::Error for HelpfulError {}

/// JSON body reported for a failed command under `--json`.
pub fn json_error_payload(err: &anyhow::Error) -> serde_json::Value {
    if let Some(helpful) = err.downcast_ref::<HelpfulError>() {
        return serde_json::json!({
            "error": helpful.message,
            "context": helpful.context,
            "suggestions": helpful.suggestions,
        });
    }
    if let Some(insert) = err.downcast_ref::<InsertError>() {
        return serde_json::json!({
            "error": insert.to_string(),
            "field": insert.field(),
        });
    }
    serde_json::json!({ "error": format!("{:#}", err) })
}

pub fn print_json_error(err: &anyhow::Error) {
    let payload = json_error_payload(err);
    match serde_json::to_string_pretty(&payload) {
        Ok(text) => println!("{}", text),
        Err(_) => println!("{}", payload),
    }
}
