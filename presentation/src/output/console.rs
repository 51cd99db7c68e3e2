//! Console output formatter for command listings and project context

use artisan_application::BuildReport;
use artisan_domain::{CommandDescriptor, CommandOrigin, Diagnostic, ProjectContext, PropertyKey, Severity};
use colored::{ColoredString, Colorize};

/// Formats build results for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Command listing in table order, with origins and aliases
    pub fn format_listing(report: &BuildReport) -> String {
        let mut output = String::new();

        output.push_str(&Self::header(&report.context));
        output.push('\n');

        if report.table.is_empty() {
            output.push_str(&format!("{}\n", "No commands registered.".dimmed()));
            return output;
        }

        output.push_str(&format!("{}\n", "Available commands:".cyan().bold()));

        let labels: Vec<String> = report
            .table
            .iter()
            .map(|entry| {
                let aliases = report.aliases_for(&entry.name);
                if aliases.is_empty() {
                    entry.name.clone()
                } else {
                    format!("{} ({})", entry.name, aliases.join(", "))
                }
            })
            .collect();
        let width = labels.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        for (label, entry) in labels.iter().zip(report.table.iter()) {
            output.push_str(&format!(
                "  {:<width$}  {} {}\n",
                label.green(),
                entry.description,
                Self::origin_tag(entry.origin)
            ));
        }

        output
    }

    /// Source-only commands, which are listed but never run
    pub fn format_hints(hints: &[CommandDescriptor]) -> String {
        if hints.is_empty() {
            return String::new();
        }

        let mut output = format!(
            "\n{}\n",
            "Found in source only (not compiled into a command module):".yellow().bold()
        );
        for hint in hints {
            let source = hint
                .source
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_default();
            output.push_str(&format!("  {}  {}\n", hint.name, source.dimmed()));
        }
        output
    }

    /// Summary line plus one line per diagnostic
    pub fn format_diagnostics(diagnostics: &[Diagnostic]) -> String {
        let warnings = diagnostics.iter().filter(|d| d.is_warning()).count();
        if diagnostics.is_empty() {
            return String::new();
        }

        let mut output = format!(
            "\n{}\n",
            format!("{} warning(s), {} note(s)", warnings, diagnostics.len() - warnings)
                .yellow()
                .bold()
        );
        for diagnostic in diagnostics {
            let marker = match diagnostic.severity {
                Severity::Warning => "warning:".yellow(),
                Severity::Info => "note:".blue(),
            };
            output.push_str(&format!("  {} {}\n", marker, diagnostic));
        }
        output
    }

    /// Detected project context as aligned key/value lines
    pub fn format_context(context: &ProjectContext) -> String {
        let mut output = String::new();
        let mut line = |key: &str, value: String| {
            output.push_str(&format!("{:<20} {}\n", format!("{key}:").cyan().bold(), value));
        };

        line("Project type", context.project_type.to_string());
        line("Project path", context.project_path.display().to_string());
        line(
            "Manifest",
            context
                .manifest_path
                .as_ref()
                .map(|p| p.display().to_string())
                .unwrap_or_else(|| "(none)".to_string()),
        );
        for key in PropertyKey::all() {
            if let Some(value) = context.property(*key) {
                line(key.as_str(), value.to_string());
            }
        }
        line("Configuration files", Self::yes_no(context.has_configuration_files));
        line("Data context", Self::yes_no(context.has_data_context));
        line("Packages", context.available_packages.len().to_string());

        output
    }

    /// Format the project context as JSON
    pub fn format_context_json(context: &ProjectContext) -> String {
        serde_json::to_string_pretty(context).unwrap_or_else(|_| "{}".to_string())
    }

    fn header(context: &ProjectContext) -> String {
        let name = context.property(PropertyKey::Name).unwrap_or("artisan");
        format!("{} ({})\n", name.bold(), context.project_type)
    }

    fn origin_tag(origin: CommandOrigin) -> ColoredString {
        format!("[{origin}]").dimmed()
    }

    fn yes_no(value: bool) -> String {
        if value { "yes" } else { "no" }.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use artisan_domain::DiagnosticCode;
    use std::path::PathBuf;

    fn plain() {
        colored::control::set_override(false);
    }

    #[test]
    fn test_hints_and_diagnostics_are_empty_when_nothing_to_say() {
        assert!(ConsoleFormatter::format_hints(&[]).is_empty());
        assert!(ConsoleFormatter::format_diagnostics(&[]).is_empty());
    }

    #[test]
    fn test_hints_name_their_source() {
        plain();
        let hints = vec![CommandDescriptor::heuristic("SeedCommand", "src/console/commands/seed.rs")];
        let text = ConsoleFormatter::format_hints(&hints);
        assert!(text.contains("seed"));
        assert!(text.contains("src/console/commands/seed.rs"));
    }

    #[test]
    fn test_diagnostics_summary() {
        plain();
        let diagnostics = vec![
            Diagnostic::warning(DiagnosticCode::ModuleLoadFailed, "bad module").with_path("a.cmdmod"),
            Diagnostic::info(DiagnosticCode::DiscoveryIncomplete, "partial"),
        ];
        let text = ConsoleFormatter::format_diagnostics(&diagnostics);
        assert!(text.contains("1 warning(s), 1 note(s)"));
        assert!(text.contains("bad module"));
        assert!(text.contains("a.cmdmod"));
    }

    #[test]
    fn test_context_lines() {
        plain();
        let mut context = ProjectContext::generic("/srv/shop");
        context.manifest_path = Some(PathBuf::from("/srv/shop/Cargo.toml"));
        context.properties.insert("name".to_string(), "shop".to_string());

        let text = ConsoleFormatter::format_context(&context);
        assert!(text.contains("generic"));
        assert!(text.contains("/srv/shop/Cargo.toml"));
        assert!(text.contains("shop"));
        assert!(!text.contains("edition"));
    }

    #[test]
    fn test_context_json() {
        let context = ProjectContext::generic("/srv/shop");
        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_context_json(&context)).unwrap();
        assert_eq!(json["project_type"], "generic");
        assert_eq!(json["has_data_context"], false);
    }
}
