//! Output Rendering
//!
//! Renders a `RunResult` as human-readable text or JSON. stdout carries the
//! report; logging goes to stderr.

use std::path::Path;

use crate::application::RunResult;
use crate::domain::services::SkipReason;

/// Output format for rendering
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for scripting
    Json,
}

/// Icons for output rendering
struct Icons {
    check: &'static str,
    cross: &'static str,
    write: &'static str,
    skip: &'static str,
    warn: &'static str,
    trash: &'static str,
}

impl Icons {
    fn unicode() -> Self {
        Self {
            check: "✓",
            cross: "✗",
            write: "→",
            skip: "○",
            warn: "!",
            trash: "-",
        }
    }

    fn ascii() -> Self {
        Self {
            check: "[OK]",
            cross: "[FAIL]",
            write: "->",
            skip: "[ ]",
            warn: "[!]",
            trash: "[DEL]",
        }
    }
}

/// Trait for rendering run results
pub trait RunResultRenderer {
    fn render(&self, result: &RunResult, project_root: &Path) -> String;
}

/// Text renderer for run results
pub struct TextRenderer {
    /// Whether to use unicode
    pub unicode: bool,
    /// Verbosity level
    pub verbose: u8,
}

impl Default for TextRenderer {
    fn default() -> Self {
        Self {
            unicode: true,
            verbose: 0,
        }
    }
}

impl TextRenderer {
    fn icons(&self) -> Icons {
        if self.unicode {
            Icons::unicode()
        } else {
            Icons::ascii()
        }
    }
}

impl RunResultRenderer for TextRenderer {
    fn render(&self, result: &RunResult, project_root: &Path) -> String {
        let icons = self.icons();
        let mut out = String::new();
        let mut line = |s: String| {
            out.push_str(&s);
            out.push('\n');
        };

        if !result.is_valid() {
            line(format!("{} Scaffold Refused", icons.cross));
            line(String::new());
            for conflict in &result.conflicts {
                line(format!("  {} conflict: {}", icons.cross, conflict));
            }
            for violation in &result.path_violations {
                line(format!("  {} {}", icons.cross, violation));
            }
            for error in &result.validation_errors {
                line(format!("  {} {}", icons.cross, error));
            }
            line(String::new());
            line("  Nothing was written.".to_string());
            return out;
        }

        if result.is_success() && !result.has_changes() && result.warnings.is_empty() {
            line(format!("{} Already Up-to-date", icons.check));
            line(String::new());
            line(format!("  {} files current", result.unchanged_count()));
            return out;
        }

        let title = match (result.dry_run, result.is_success()) {
            (true, _) => "Scaffold Preview (dry run)",
            (false, true) => "Scaffold Complete",
            (false, false) => "Scaffold Incomplete",
        };
        let icon = if result.is_success() {
            icons.check
        } else {
            icons.cross
        };
        line(format!("{} {}", icon, title));
        line(String::new());
        line(format!("  Project: {}", project_root.display()));
        line(format!(
            "  {} applied, {} unchanged, {} skipped, {} failed, {} deleted",
            result.applied_count(),
            result.unchanged_count(),
            result.skipped_count(),
            result.failed_count(),
            result.deleted_count()
        ));

        if !result.applied.is_empty() {
            line(String::new());
            let label = if result.dry_run { "Would write" } else { "Written" };
            line(format!("  {} ({}):", label, result.applied.len()));
            for path in &result.applied {
                line(format!("    {} {}", icons.write, path));
            }
        }

        let skipped: Vec<_> = result
            .skipped
            .iter()
            .filter(|s| self.verbose > 0 || s.reason.is_warning())
            .collect();
        if !skipped.is_empty() {
            line(String::new());
            line(format!("  Skipped ({}):", skipped.len()));
            for file in skipped {
                line(format!(
                    "    {} {} ({})",
                    icons.skip,
                    file.path,
                    short_reason(&file.reason)
                ));
            }
        }

        if !result.deleted.is_empty() {
            line(String::new());
            let label = if result.dry_run { "Would delete" } else { "Deleted" };
            line(format!("  {} ({}):", label, result.deleted.len()));
            for path in &result.deleted {
                line(format!("    {} {}", icons.trash, path));
            }
        }

        if !result.warnings.is_empty() {
            line(String::new());
            line(format!("  Warnings ({}):", result.warnings.len()));
            for warning in &result.warnings {
                line(format!("    {} {}", icons.warn, warning));
            }
        }

        if !result.failed.is_empty() {
            line(String::new());
            line(format!("  Errors ({}):", result.failed.len()));
            for failure in &result.failed {
                line(format!("    {} {}: {}", icons.cross, failure.path, failure.error));
            }
        }

        if result.was_cancelled() {
            line(String::new());
            line(format!(
                "  Cancelled: {} operations not attempted; manifest unchanged",
                result.cancelled
            ));
        }

        out
    }
}

fn short_reason(reason: &SkipReason) -> &'static str {
    match reason {
        SkipReason::Declared => "declared skip",
        SkipReason::Preserved => "exists, overwrite disabled",
        SkipReason::OverwriteRefused(_) => "not managed",
        SkipReason::ContentDrift(_) => "modified since last write",
    }
}

/// JSON renderer for run results
pub struct JsonRenderer;

impl RunResultRenderer for JsonRenderer {
    fn render(&self, result: &RunResult, project_root: &Path) -> String {
        let paths = |list: &[crate::domain::value_objects::DestinationPath]| {
            list.iter().map(|p| p.to_string()).collect::<Vec<_>>()
        };

        let json = serde_json::json!({
            "success": result.is_success(),
            "exit_code": result.exit_code(),
            "dry_run": result.dry_run,
            "project_root": project_root.display().to_string(),
            "counts": {
                "applied": result.applied_count(),
                "unchanged": result.unchanged_count(),
                "skipped": result.skipped_count(),
                "warned": result.warned_count(),
                "failed": result.failed_count(),
                "deleted": result.deleted_count(),
                "cancelled": result.cancelled,
            },
            "applied": paths(&result.applied),
            "unchanged": paths(&result.unchanged),
            "skipped": result.skipped.iter().map(|s| serde_json::json!({
                "path": s.path.to_string(),
                "reason": short_reason(&s.reason),
                "warning": s.reason.is_warning(),
            })).collect::<Vec<_>>(),
            "failed": result.failed.iter().map(|f| serde_json::json!({
                "path": f.path.to_string(),
                "error": f.error,
            })).collect::<Vec<_>>(),
            "deleted": paths(&result.deleted),
            "kept": paths(&result.kept),
            "conflicts": result.conflicts.iter().map(|c| serde_json::json!({
                "path": c.path().to_string(),
                "message": c.to_string(),
            })).collect::<Vec<_>>(),
            "path_violations": result.path_violations.iter().map(|v| serde_json::json!({
                "package": v.package,
                "path": v.declared,
                "message": v.error.to_string(),
            })).collect::<Vec<_>>(),
            "validation_errors": result.validation_errors,
            "warnings": result.warnings,
            "managed_paths": result.managed_paths,
        });

        let mut rendered = serde_json::to_string_pretty(&json).unwrap_or_default();
        rendered.push('\n');
        rendered
    }
}

/// Create a renderer based on format
pub fn create_renderer(format: OutputFormat, unicode: bool, verbose: u8) -> Box<dyn RunResultRenderer> {
    match format {
        OutputFormat::Text => Box::new(TextRenderer { unicode, verbose }),
        OutputFormat::Json => Box::new(JsonRenderer),
    }
}
