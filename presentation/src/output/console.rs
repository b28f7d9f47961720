//! Console output formatter for debate transcripts

use colored::Colorize;
use debate_domain::{PersonaRegistry, ShareRecord, TurnMessage, TurnRole};

/// Formats debates, share records and persona lists for console display
pub struct ConsoleFormatter;

impl ConsoleFormatter {
    /// Format a full transcript: seed, expert turns and verdict
    pub fn format_transcript(topic: &str, messages: &[TurnMessage]) -> String {
        let mut output = String::new();

        output.push_str(&Self::header("Expert Debate"));
        output.push('\n');
        output.push_str(&format!("{} {}\n", "Topic:".cyan().bold(), topic));

        output.push_str(&Self::section_header("Debate"));
        let mut turn = 0;
        for message in messages {
            match message.role {
                TurnRole::User => {}
                TurnRole::Assistant => {
                    turn += 1;
                    output.push_str(&Self::format_turn(turn, message));
                }
                TurnRole::Judge => {
                    output.push_str(&Self::section_header("Verdict"));
                    output.push_str(&format!("\n{}\n", message.content));
                }
            }
        }
        if turn == 0 {
            output.push_str(&format!("\n{}\n", "No expert spoke.".dimmed()));
        }

        output.push_str(&Self::footer());
        output
    }

    /// Format a shared debate
    pub fn format_record(record: &ShareRecord) -> String {
        let mut output = Self::format_transcript(&record.topic, &record.chat_history);
        if !record.chat_history.iter().any(TurnMessage::is_judge) {
            output.push_str(&format!(
                "{}\n{}\n",
                "Verdict:".cyan().bold(),
                record.final_verdict
            ));
        }
        let experts: Vec<&str> = record.branch_details.iter().map(|p| p.name()).collect();
        output.push_str(&format!(
            "{} {}\n",
            "Experts:".dimmed(),
            experts.join(", ")
        ));
        output
    }

    /// Format a share record as JSON
    pub fn format_json(record: &ShareRecord) -> String {
        record.to_json().unwrap_or_else(|_| "{}".to_string())
    }

    /// List built-in and custom personas
    pub fn format_personas(registry: &PersonaRegistry) -> String {
        let mut output = String::new();

        output.push_str(&Self::section_header("Built-in experts"));
        for persona in registry.builtin() {
            output.push_str(&format!(
                "  {:<16} {}\n",
                persona.id().as_str().green(),
                persona.name().bold()
            ));
        }

        output.push_str(&Self::section_header("Custom experts"));
        if registry.custom().is_empty() {
            output.push_str(&format!("  {}\n", "(none)".dimmed()));
        }
        for persona in registry.custom() {
            output.push_str(&format!(
                "  {:<16} {}\n{}\n",
                persona.id().as_str().yellow(),
                persona.name().bold(),
                Self::indent(persona.description(), "      ").dimmed()
            ));
        }

        output
    }

    fn format_turn(turn: usize, message: &TurnMessage) -> String {
        let name = message.persona_name.as_deref().unwrap_or("?");
        let title = format!("── {}. {} ──", turn, name);
        if message.is_fallback() {
            format!("\n{}\n{}\n", title.red().bold(), message.content.dimmed())
        } else {
            format!("\n{}\n{}\n", title.yellow().bold(), message.content)
        }
    }

    fn header(title: &str) -> String {
        let line = "=".repeat(60);
        format!("{}\n{:^60}\n{}", line.cyan(), title.bold(), line.cyan())
    }

    fn section_header(title: &str) -> String {
        format!("\n{}\n{}\n", title.cyan().bold(), "-".repeat(40))
    }

    fn footer() -> String {
        format!("\n{}\n", "=".repeat(60).cyan())
    }

    /// Indent a multi-line string
    pub fn indent(text: &str, prefix: &str) -> String {
        text.lines()
            .map(|line| format!("{}{}", prefix, line))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use debate_domain::{Persona, PersonaId};

    fn physicist() -> Persona {
        Persona::new("fizik", "Fizik", "Fizik perspektifi")
    }

    fn transcript() -> Vec<TurnMessage> {
        vec![
            TurnMessage::seed("Yapay zekâ tehlikeli mi?"),
            TurnMessage::assistant(&physicist(), "Enerji korunur."),
            TurnMessage::fallback(&Persona::new("felsefe", "Felsefe", "x")),
            TurnMessage::judge("Fizik argümanları daha güçlü. SONUÇ: Belirsiz"),
        ]
    }

    #[test]
    fn test_format_transcript_numbers_turns() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_transcript("Yapay zekâ tehlikeli mi?", &transcript());

        assert!(output.contains("Topic: Yapay zekâ tehlikeli mi?"));
        assert!(output.contains("── 1. Fizik ──"));
        assert!(output.contains("Enerji korunur."));
        assert!(output.contains("── 2. Felsefe ──"));
        assert!(output.contains("Verdict"));
        assert!(output.contains("SONUÇ: Belirsiz"));
    }

    #[test]
    fn test_format_transcript_without_turns() {
        colored::control::set_override(false);
        let output =
            ConsoleFormatter::format_transcript("topic", &[TurnMessage::seed("topic")]);
        assert!(output.contains("No expert spoke."));
    }

    #[test]
    fn test_format_record_lists_experts() {
        colored::control::set_override(false);
        let record = ShareRecord {
            topic: "Yapay zekâ tehlikeli mi?".to_string(),
            chat_history: transcript(),
            selected_branches: vec![PersonaId::new("fizik"), PersonaId::new("felsefe")],
            branch_details: vec![physicist(), Persona::new("felsefe", "Felsefe", "x")],
            final_verdict: "Fizik argümanları daha güçlü. SONUÇ: Belirsiz".to_string(),
            timestamp: 0,
        };
        let output = ConsoleFormatter::format_record(&record);
        assert!(output.contains("Experts: Fizik, Felsefe"));
        assert_eq!(output.matches("SONUÇ: Belirsiz").count(), 1);

        let json: serde_json::Value =
            serde_json::from_str(&ConsoleFormatter::format_json(&record)).unwrap();
        assert_eq!(json["topic"], "Yapay zekâ tehlikeli mi?");
    }

    #[test]
    fn test_format_personas_marks_empty_custom_set() {
        colored::control::set_override(false);
        let output = ConsoleFormatter::format_personas(&PersonaRegistry::new());
        assert!(output.contains("Built-in experts"));
        assert!(output.contains("fizik"));
        assert!(output.contains("(none)"));
    }

    #[test]
    fn test_indent() {
        assert_eq!(ConsoleFormatter::indent("a\nb", "  "), "  a\n  b");
    }
}
