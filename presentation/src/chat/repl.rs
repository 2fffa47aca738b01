//! REPL (Read-Eval-Print Loop) for interactive chat

use crate::config::ReplConfig;
use crate::output::console::{ConsoleFormatter, GraphFormat};
use crate::progress::reporter::{ProgressReporter, SimpleProgress};
use socratic_application::{TurnController, TurnNotifier, TurnOutcome};
use rustyline::error::ReadlineError;
use rustyline::{DefaultEditor, Result as RlResult};
use std::path::PathBuf;
use std::sync::Arc;

/// What the REPL should do after a slash command
#[derive(Debug, PartialEq, Eq)]
enum CommandResult {
    Continue,
    Exit,
}

/// Interactive chat REPL
pub struct ChatRepl {
    controller: Arc<TurnController>,
    show_progress: bool,
    history_file: Option<PathBuf>,
}

impl ChatRepl {
    /// Create a new ChatRepl
    pub fn new(controller: Arc<TurnController>) -> Self {
        Self {
            controller,
            show_progress: true,
            history_file: ReplConfig::default().resolved_history_file(),
        }
    }

    /// Apply REPL settings from configuration
    pub fn with_config(mut self, config: &ReplConfig) -> Self {
        self.show_progress = config.show_progress;
        self.history_file = config.resolved_history_file();
        self
    }

    /// Run the interactive REPL
    pub async fn run(&self) -> RlResult<()> {
        let mut rl = DefaultEditor::new()?;

        if let Some(ref path) = self.history_file {
            if let Some(parent) = path.parent() {
                let _ = std::fs::create_dir_all(parent);
            }
            let _ = rl.load_history(path);
        }

        self.print_welcome();

        let notifier: Box<dyn TurnNotifier> = if self.show_progress {
            Box::new(ProgressReporter::new())
        } else {
            Box::new(SimpleProgress::new())
        };

        loop {
            match rl.readline(">>> ") {
                Ok(line) => {
                    let line = line.trim();

                    if line.is_empty() {
                        continue;
                    }

                    if line.starts_with('/') {
                        if self.handle_command(line) == CommandResult::Exit {
                            break;
                        }
                        continue;
                    }

                    let _ = rl.add_history_entry(line);

                    self.process_input(line, notifier.as_ref()).await;
                }
                Err(ReadlineError::Interrupted) => {
                    println!("^C");
                    continue;
                }
                Err(ReadlineError::Eof) => {
                    println!("Bye!");
                    break;
                }
                Err(err) => {
                    eprintln!("Error: {:?}", err);
                    break;
                }
            }
        }

        if let Some(ref path) = self.history_file {
            let _ = rl.save_history(path);
        }

        Ok(())
    }

    fn print_welcome(&self) {
        println!();
        println!("╭─────────────────────────────────────────────╮");
        println!("│          Socratic Chat - Chat Mode          │");
        println!("╰─────────────────────────────────────────────╯");
        println!();
        let params = self.controller.params();
        println!("Model: {}", self.controller.model());
        println!(
            "Temperature: {}  Max tokens: {}",
            params.temperature, params.max_tokens
        );
        println!();
        Self::print_help();
    }

    fn print_help() {
        println!("Commands:");
        println!("  /help, /h, /?        - Show this help");
        println!("  /history             - Show the conversation so far");
        println!("  /graph [json|dot]    - Show the topic graph");
        println!("  /quit, /exit, /q     - Exit chat");
        println!();
    }

    /// Handle slash commands.
    fn handle_command(&self, line: &str) -> CommandResult {
        let (cmd, arg) = line.split_once(' ').unwrap_or((line, ""));

        match cmd {
            "/quit" | "/exit" | "/q" => {
                println!("Bye!");
                return CommandResult::Exit;
            }
            "/help" | "/h" | "/?" => {
                println!();
                Self::print_help();
            }
            "/history" => {
                let transcript = self
                    .controller
                    .with_session(|session| ConsoleFormatter::format_transcript(session.log()));
                println!("{}", transcript);
            }
            "/graph" => match GraphFormat::from_arg(arg) {
                Some(format) => {
                    let snapshot = self.controller.graph_snapshot();
                    println!("{}", ConsoleFormatter::format_graph(&snapshot, format));
                }
                None => {
                    println!("Unknown graph format: {}", arg.trim());
                    println!("Use /graph, /graph json or /graph dot");
                }
            },
            _ => {
                println!("Unknown command: {}", cmd);
                println!("Type /help for available commands");
            }
        }

        CommandResult::Continue
    }

    async fn process_input(&self, input: &str, notifier: &dyn TurnNotifier) {
        println!();

        match self.controller.on_user_input(input, notifier).await {
            Ok(TurnOutcome::Answered { .. }) | Ok(TurnOutcome::Failed(_)) => {}
            Ok(TurnOutcome::Dropped) => {
                println!("Still waiting for the previous response; input ignored.");
            }
            Ok(TurnOutcome::Ignored) => {}
            Err(e) => {
                eprintln!("Error: {}", e);
            }
        }
        println!();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_trait::async_trait;
    use socratic_application::{QueryClient, QueryError};
    use socratic_domain::{Model, ModelParams};

    struct Offline;

    #[async_trait]
    impl QueryClient for Offline {
        async fn query(
            &self,
            _text: &str,
            _model: &Model,
            _params: &ModelParams,
        ) -> Result<String, QueryError> {
            Err(QueryError::Transport("offline".to_string()))
        }
    }

    fn repl() -> ChatRepl {
        ChatRepl::new(Arc::new(TurnController::new(Arc::new(Offline))))
    }

    #[test]
    fn test_quit_commands_exit() {
        let repl = repl();
        for cmd in ["/quit", "/exit", "/q"] {
            assert_eq!(repl.handle_command(cmd), CommandResult::Exit);
        }
    }

    #[test]
    fn test_other_commands_continue() {
        let repl = repl();
        for cmd in ["/help", "/history", "/graph", "/graph json", "/graph dot", "/graph svg", "/nope"] {
            assert_eq!(repl.handle_command(cmd), CommandResult::Continue);
        }
    }
}
