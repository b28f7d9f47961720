//! Live progress reporting while a debate runs

use colored::Colorize;
use debate_application::ports::progress::DebateProgressNotifier;
use debate_domain::{Model, Persona, TurnMessage, TurnRole, Verdict, VerdictSource};
use indicatif::{ProgressBar, ProgressStyle};
use std::io::Write;
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

#[derive(Default)]
struct StreamState {
    turn_budget: usize,
    /// Chunks of the current attempt have been printed without a newline
    mid_line: bool,
    /// Any chunk was printed for the current turn
    streamed: bool,
}

/// Streams turns to the terminal as they are generated
pub struct DebateReporter {
    state: Mutex<StreamState>,
    spinner: Mutex<Option<ProgressBar>>,
}

impl DebateReporter {
    pub fn new() -> Self {
        Self {
            state: Mutex::new(StreamState::default()),
            spinner: Mutex::new(None),
        }
    }

    fn state(&self) -> MutexGuard<'_, StreamState> {
        self.state.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn spinner_style() -> ProgressStyle {
        ProgressStyle::default_spinner()
            .template("{spinner:.green} {prefix:.bold} {msg}")
            .unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn end_line(state: &mut StreamState) {
        if state.mid_line {
            println!();
            state.mid_line = false;
        }
    }

    /// "Turn 3/12 · Fizik (gemini-2.5-flash)"
    pub fn turn_header(turn_index: usize, turn_budget: usize, persona: &str, model: &Model) -> String {
        format!(
            "{} {} {}",
            format!("Turn {}/{}", turn_index + 1, turn_budget).cyan().bold(),
            "·".dimmed(),
            format!("{} ({})", persona.yellow().bold(), model.to_string().dimmed())
        )
    }

    pub fn retry_note(attempt: usize, reason: &str) -> String {
        format!("  ! attempt {} failed: {}, retrying", attempt, reason)
    }

    pub fn verdict_label(source: &VerdictSource) -> &'static str {
        match source {
            VerdictSource::Primary(_) => "Verdict",
            VerdictSource::Fallback(_) => "Verdict (fallback judge)",
            VerdictSource::NoOpinions => "Verdict (no opinions)",
            VerdictSource::Unavailable => "Verdict (unavailable)",
        }
    }
}

impl Default for DebateReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl DebateProgressNotifier for DebateReporter {
    fn on_debate_start(&self, topic: &str, personas: &[Persona], models: &[Model], turn_budget: usize) {
        self.state().turn_budget = turn_budget;

        let line = "=".repeat(60);
        println!("{}", line.cyan());
        println!("{} {}", "Topic:".cyan().bold(), topic);
        for (i, persona) in personas.iter().enumerate() {
            let model = models
                .get(i % models.len().max(1))
                .map(|m| m.to_string())
                .unwrap_or_default();
            println!("  {}. {} {}", i + 1, persona.name().bold(), format!("({})", model).dimmed());
        }
        println!("{}", line.cyan());
    }

    fn on_turn_start(&self, turn_index: usize, persona: &Persona, model: &Model) {
        let mut state = self.state();
        Self::end_line(&mut state);
        state.streamed = false;
        println!();
        println!(
            "{}",
            Self::turn_header(turn_index, state.turn_budget, persona.name(), model)
        );
    }

    fn on_turn_chunk(&self, _persona: &Persona, chunk: &str) {
        let mut state = self.state();
        print!("{}", chunk);
        let _ = std::io::stdout().flush();
        state.mid_line = true;
        state.streamed = true;
    }

    fn on_turn_retry(&self, _persona: &Persona, attempt: usize, reason: &str) {
        let mut state = self.state();
        Self::end_line(&mut state);
        state.streamed = false;
        println!("{}", Self::retry_note(attempt, reason).yellow().dimmed());
    }

    fn on_message_appended(&self, message: &TurnMessage) {
        if message.role != TurnRole::Assistant {
            return;
        }
        let mut state = self.state();
        Self::end_line(&mut state);
        if message.is_fallback() {
            println!("{}", message.content.red());
        } else if !state.streamed {
            println!("{}", message.content);
        }
        state.streamed = false;
    }

    fn on_adjudication_start(&self, model: &Model) {
        Self::end_line(&mut self.state());
        println!();

        let pb = ProgressBar::new_spinner();
        pb.set_style(Self::spinner_style());
        pb.set_prefix("Judge");
        pb.set_message(format!("{} is weighing the arguments...", model));
        pb.enable_steady_tick(Duration::from_millis(100));
        *self.spinner.lock().unwrap_or_else(|e| e.into_inner()) = Some(pb);
    }

    fn on_verdict(&self, verdict: &Verdict) {
        if let Some(pb) = self.spinner.lock().unwrap_or_else(|e| e.into_inner()).take() {
            pb.finish_and_clear();
        }

        let label = Self::verdict_label(verdict.source());
        let label = if verdict.source().is_ruling() {
            label.green().bold()
        } else {
            label.yellow().bold()
        };
        println!("{}\n{}", label, "-".repeat(40));
        println!("{}", verdict.content());
        println!("{}", "=".repeat(60).cyan());
    }
}
