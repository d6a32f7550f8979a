//! Workflow inspection commands.
//!
//! # Usage
//!
//! ```bash
//! # Every internal status, or one phase
//! atelier statuses list
//! atelier statuses list --category production --format json
//!
//! # Where a ticket can go next
//! atelier statuses next quality-check
//!
//! # Validate a move (exit code 1 when not allowed)
//! atelier statuses check pending completed
//!
//! # Statuses waiting on staff
//! atelier statuses action-required --format yaml
//! ```

use clap::ValueEnum;
use serde::Serialize;
use tabled::settings::Style;
use tabled::{Table, Tabled};
use thiserror::Error;

use atelier_core::{ClientStatus, InternalStatus, StatusCategory, WorkflowEngine};

/// Errors from workflow inspection commands.
#[derive(Debug, Error)]
pub enum StatusCommandError {
    #[error("Unknown status: {0}")]
    UnknownStatus(String),

    #[error("Unknown category: {0}")]
    UnknownCategory(String),

    #[error("Transition not allowed: {from} -> {to}")]
    InvalidTransition {
        from: InternalStatus,
        to: InternalStatus,
    },

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Output format for status listings.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    #[default]
    Table,
    Json,
    Yaml,
}

/// One row of a status listing.
#[derive(Debug, Serialize, Tabled)]
pub struct StatusRow {
    #[tabled(rename = "STATUS")]
    pub status: InternalStatus,
    #[tabled(rename = "LABEL")]
    pub label: &'static str,
    #[tabled(rename = "PHASE")]
    pub category: StatusCategory,
    #[tabled(rename = "CLIENT STATUS")]
    pub client_status: ClientStatus,
    #[tabled(rename = "ACTION", display = "action_flag")]
    pub requires_action: bool,
}

#[allow(clippy::trivially_copy_pass_by_ref)]
fn action_flag(requires_action: &bool) -> String {
    if *requires_action { "yes" } else { "" }.to_owned()
}

impl StatusRow {
    fn new(engine: &WorkflowEngine, status: InternalStatus) -> Self {
        let info = engine.internal_info(status);
        Self {
            status,
            label: info.map_or("", |i| i.label),
            category: status.category(),
            client_status: engine.client_status(status),
            requires_action: info.is_some_and(|i| i.requires_action),
        }
    }
}

fn parse_status(slug: &str) -> Result<InternalStatus, StatusCommandError> {
    InternalStatus::from_slug(slug)
        .ok_or_else(|| StatusCommandError::UnknownStatus(slug.to_owned()))
}

fn rows(
    engine: &WorkflowEngine,
    statuses: impl IntoIterator<Item = InternalStatus>,
) -> Vec<StatusRow> {
    statuses
        .into_iter()
        .map(|s| StatusRow::new(engine, s))
        .collect()
}

/// Render rows in the requested format.
///
/// # Errors
///
/// Returns an error if serialization fails.
pub fn render(rows: &[StatusRow], format: OutputFormat) -> Result<String, StatusCommandError> {
    Ok(match format {
        OutputFormat::Table => render_table(rows),
        OutputFormat::Json => serde_json::to_string_pretty(rows)?,
        OutputFormat::Yaml => serde_yaml::to_string(rows)?,
    })
}

fn render_table(rows: &[StatusRow]) -> String {
    let mut table = Table::new(rows);
    table.with(Style::rounded());
    table.to_string()
}

/// Internal statuses, optionally restricted to one phase.
///
/// # Errors
///
/// Returns `UnknownCategory` for a phase name that does not exist.
pub fn list(
    engine: &WorkflowEngine,
    category: Option<&str>,
) -> Result<Vec<StatusRow>, StatusCommandError> {
    match category {
        Some(name) => {
            let category: StatusCategory = name
                .parse()
                .map_err(|_| StatusCommandError::UnknownCategory(name.to_owned()))?;
            Ok(rows(engine, engine.statuses_in(category).iter().copied()))
        }
        None => Ok(rows(engine, engine.all_internal_statuses().iter().copied())),
    }
}

/// Statuses reachable from `status`.
///
/// # Errors
///
/// Returns `UnknownStatus` if `status` is not an internal status.
pub fn next(engine: &WorkflowEngine, status: &str) -> Result<Vec<StatusRow>, StatusCommandError> {
    let current = parse_status(status)?;
    Ok(rows(engine, engine.next_statuses(current)))
}

/// Check a single move.
///
/// # Errors
///
/// Returns `UnknownStatus` for unknown slugs and `InvalidTransition` when the
/// workflow forbids the move.
pub fn check(engine: &WorkflowEngine, from: &str, to: &str) -> Result<(), StatusCommandError> {
    let from = parse_status(from)?;
    let to = parse_status(to)?;
    if engine.can_transition(from, to) {
        Ok(())
    } else {
        Err(StatusCommandError::InvalidTransition { from, to })
    }
}

/// Statuses waiting on staff.
#[must_use]
pub fn action_required(engine: &WorkflowEngine) -> Vec<StatusRow> {
    rows(engine, engine.action_required_statuses())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_list_by_category() {
        let rows = list(WorkflowEngine::standard(), Some("completion")).unwrap();
        let slugs: Vec<_> = rows.iter().map(|r| r.status.as_str()).collect();
        assert_eq!(
            slugs,
            vec!["ready-for-pickup", "shipped", "delivered", "completed"]
        );

        assert!(matches!(
            list(WorkflowEngine::standard(), Some("limbo")),
            Err(StatusCommandError::UnknownCategory(_))
        ));
    }

    #[test]
    fn test_check() {
        let engine = WorkflowEngine::standard();
        assert!(check(engine, "quality-check", "polishing").is_ok());
        assert!(matches!(
            check(engine, "pending", "completed"),
            Err(StatusCommandError::InvalidTransition { .. })
        ));
        assert!(matches!(
            check(engine, "pending", "melted"),
            Err(StatusCommandError::UnknownStatus(_))
        ));
    }

    #[test]
    fn test_next_terminal_is_empty() {
        assert!(next(WorkflowEngine::standard(), "refunded").unwrap().is_empty());
    }

    #[test]
    fn test_render_table() {
        let rows = next(WorkflowEngine::standard(), "cancelled").unwrap();
        let table = render(&rows, OutputFormat::Table).unwrap();

        let header = table.lines().find(|l| l.contains("STATUS")).unwrap();
        assert!(header.contains("CLIENT STATUS"));
        assert!(header.contains("ACTION"));

        let row = table.lines().find(|l| l.contains("refunded")).unwrap();
        assert!(row.contains("Refunded"));
        assert!(row.contains("special"));
        assert!(row.contains("cancelled"));
        assert!(!row.contains("yes"));
    }

    #[test]
    fn test_render_table_flags_action_required() {
        let rows = action_required(WorkflowEngine::standard());
        let table = render(&rows, OutputFormat::Table).unwrap();

        let row = table.lines().find(|l| l.contains("reviewing-request")).unwrap();
        assert!(row.contains("yes"));
        assert_eq!(table.lines().filter(|l| l.contains("yes")).count(), rows.len());
    }

    #[test]
    fn test_render_json() {
        let rows = next(WorkflowEngine::standard(), "cancelled").unwrap();
        let json = render(&rows, OutputFormat::Json).unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value[0]["status"], "refunded");
        assert_eq!(value[0]["client_status"], "cancelled");
        assert_eq!(value[0]["category"], "special");
    }
}
