//! Interactive chat mode.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::{kind_label, Formatter};
use crate::session::ChatSession;
use crate::view_state::ViewState;
use botornot_domain::Role;
use botornot_extractor::Extractor;
use botornot_sdk::BotOrNotClient;
use rustyline::error::ReadlineError;
use rustyline::DefaultEditor;
use std::path::PathBuf;

/// Run the interactive chat loop.
pub async fn run_repl(
    config: &Config,
    client: BotOrNotClient,
    extractor: Extractor,
    formatter: &Formatter,
) -> Result<()> {
    println!(
        "{}",
        formatter.info(&format!(
            "BotOrNot chat with {} - Type ':help' for commands, ':exit' to quit",
            client.base_url()
        ))
    );
    println!();

    let editor_config = rustyline::Config::builder()
        .max_history_size(config.settings.history_size)
        .map_err(editor_error)?
        .build();
    let mut editor = DefaultEditor::with_config(editor_config).map_err(editor_error)?;

    let history_path = get_history_path()?;
    let _ = editor.load_history(&history_path);

    let mut session = ChatSession::new(client, extractor);
    let mut view = ViewState::new();

    loop {
        match editor.readline("you> ") {
            Ok(line) => {
                let line = line.trim();

                if line.is_empty() {
                    continue;
                }

                editor.add_history_entry(line).ok();

                match parse_repl_command(line) {
                    Ok(ReplCommand::Exit) => {
                        println!("{}", formatter.info("Goodbye!"));
                        break;
                    }
                    Ok(ReplCommand::Help) => print_help(formatter),
                    Ok(cmd) => {
                        if let Err(e) = execute_repl_command(cmd, &mut session, &mut view, formatter).await {
                            eprintln!("{}", formatter.error(&e.to_string()));
                        }
                    }
                    Err(e) => {
                        eprintln!("{}", formatter.error(&e.to_string()));
                    }
                }
            }
            Err(ReadlineError::Interrupted) => {
                println!("{}", formatter.info("Use ':exit' to quit"));
            }
            Err(ReadlineError::Eof) => {
                break;
            }
            Err(err) => {
                eprintln!("{}", formatter.error(&format!("Error: {}", err)));
                break;
            }
        }
    }

    editor.save_history(&history_path).ok();

    Ok(())
}

/// REPL command type.
#[derive(Debug, PartialEq, Eq)]
enum ReplCommand {
    Ask(String),
    Sources,
    Highlight(Option<usize>),
    Audit,
    Experts,
    Expert(usize),
    History,
    Clear,
    Help,
    Exit,
}

/// Parse a REPL input line. Anything not starting with `:` is a question.
fn parse_repl_command(line: &str) -> Result<ReplCommand> {
    let Some(command) = line.strip_prefix(':') else {
        return Ok(ReplCommand::Ask(line.to_string()));
    };

    let parts: Vec<&str> = command.split_whitespace().collect();
    let Some(&name) = parts.first() else {
        return Err(CliError::InvalidInput("Empty command".to_string()));
    };

    match name {
        "exit" | "quit" | "q" => Ok(ReplCommand::Exit),
        "help" | "?" => Ok(ReplCommand::Help),
        "sources" | "s" => Ok(ReplCommand::Sources),
        "audit" | "a" => Ok(ReplCommand::Audit),
        "experts" | "e" => Ok(ReplCommand::Experts),
        "history" => Ok(ReplCommand::History),
        "clear" => Ok(ReplCommand::Clear),
        "highlight" | "h" => match parts.get(1) {
            None | Some(&"none") => Ok(ReplCommand::Highlight(None)),
            Some(n) => Ok(ReplCommand::Highlight(Some(parse_position(n, "highlight <n>|none")?))),
        },
        "expert" => match parts.get(1) {
            Some(n) => Ok(ReplCommand::Expert(parse_position(n, "expert <n>")?)),
            None => Err(CliError::InvalidInput("Usage: :expert <n>".to_string())),
        },
        _ => Err(CliError::InvalidInput(format!(
            "Unknown command: :{}. Type ':help' for available commands.",
            name
        ))),
    }
}

fn parse_position(value: &str, usage: &str) -> Result<usize> {
    value
        .parse()
        .map_err(|_| CliError::InvalidInput(format!("Usage: :{}", usage)))
}

/// Execute a REPL command.
async fn execute_repl_command(
    cmd: ReplCommand,
    session: &mut ChatSession<BotOrNotClient>,
    view: &mut ViewState,
    formatter: &Formatter,
) -> Result<()> {
    match cmd {
        ReplCommand::Ask(question) => {
            view.reset();
            if let Some(turn) = session.ask(&question).await {
                if turn.failed {
                    eprintln!("{}", formatter.error(&turn.reply.answer));
                } else {
                    let legend = turn.legend();
                    println!("{}", formatter.format_answer(&turn.analysis, &legend, None)?);
                }
            }
        }
        ReplCommand::Sources => {
            let turn = session.last_turn().ok_or(CliError::NoAnswer)?;
            for (i, source) in turn.legend().iter().enumerate() {
                println!("  [{}] {} ({})", i + 1, source, kind_label(source.kind()));
            }
        }
        ReplCommand::Highlight(position) => {
            let turn = session.last_turn().ok_or(CliError::NoAnswer)?;
            let legend = turn.legend();
            match position {
                Some(n) => {
                    view.highlight_nth(&legend, n)?;
                }
                None => view.clear_highlight(),
            }
            println!(
                "{}",
                formatter.format_answer(&turn.analysis, &legend, view.highlight())?
            );
        }
        ReplCommand::Audit => {
            let turn = session.last_turn().ok_or(CliError::NoAnswer)?;
            let audit = session.extractor().audit(turn.reply.trace(), view.highlight());
            println!(
                "{}",
                formatter.format_audit(&audit, turn.reply.trace_url.as_deref())?
            );
        }
        ReplCommand::Experts => {
            let turn = session.last_turn().ok_or(CliError::NoAnswer)?;
            println!("{}", formatter.format_experts(&turn.analysis.experts)?);
        }
        ReplCommand::Expert(n) => {
            let turn = session.last_turn().ok_or(CliError::NoAnswer)?;
            let experts = &turn.analysis.experts;
            view.toggle_expert(n, experts.len())?;
            match view.open_expert().and_then(|i| experts.get(i)) {
                Some(expert) => {
                    let link = session.extractor().expert_link(expert);
                    println!("{}", formatter.format_expert_detail(expert, &link)?);
                }
                None => println!("{}", formatter.info("Detail closed")),
            }
        }
        ReplCommand::History => {
            for message in session.history() {
                let speaker = match message.role {
                    Role::User => "you",
                    Role::Assistant => "agent",
                };
                println!("{}> {}", speaker, message.content);
            }
        }
        ReplCommand::Clear => {
            session.clear();
            view.reset();
            println!("{}", formatter.success("Conversation cleared"));
        }
        ReplCommand::Help | ReplCommand::Exit => {}
    }

    Ok(())
}

fn editor_error(e: ReadlineError) -> CliError {
    CliError::Io(std::io::Error::other(format!(
        "Failed to initialize editor: {}",
        e
    )))
}

fn get_history_path() -> Result<PathBuf> {
    let dir = Config::data_dir()?;
    std::fs::create_dir_all(&dir)?;
    Ok(dir.join("history.txt"))
}

fn print_help(formatter: &Formatter) {
    println!("{}", formatter.info("Type a question to ask the agent, or:"));
    println!();
    println!("  :sources, :s             - List the sources of the last answer");
    println!("  :highlight <n>|none      - Highlight text backed by source n");
    println!("  :audit, :a               - Show the transparency audit");
    println!("  :experts, :e             - List experts named in the last answer");
    println!("  :expert <n>              - Open or close the detail of expert n");
    println!("  :history                 - Show the conversation");
    println!("  :clear                   - Start a new conversation");
    println!("  :help, :?                - Show this help");
    println!("  :exit, :quit, :q         - Exit");
    println!();
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_text_is_a_question() {
        assert_eq!(
            parse_repl_command("Who makes sodium cells?").unwrap(),
            ReplCommand::Ask("Who makes sodium cells?".to_string())
        );
    }

    #[test]
    fn test_highlight_commands() {
        assert_eq!(
            parse_repl_command(":highlight 2").unwrap(),
            ReplCommand::Highlight(Some(2))
        );
        assert_eq!(
            parse_repl_command(":h none").unwrap(),
            ReplCommand::Highlight(None)
        );
        assert_eq!(
            parse_repl_command(":highlight").unwrap(),
            ReplCommand::Highlight(None)
        );
        assert!(parse_repl_command(":highlight two").is_err());
    }

    #[test]
    fn test_expert_command() {
        assert_eq!(parse_repl_command(":expert 3").unwrap(), ReplCommand::Expert(3));
        assert!(parse_repl_command(":expert").is_err());
    }

    #[test]
    fn test_simple_commands() {
        assert_eq!(parse_repl_command(":q").unwrap(), ReplCommand::Exit);
        assert_eq!(parse_repl_command(":sources").unwrap(), ReplCommand::Sources);
        assert_eq!(parse_repl_command(":audit").unwrap(), ReplCommand::Audit);
        assert_eq!(parse_repl_command(":clear").unwrap(), ReplCommand::Clear);
        assert_eq!(parse_repl_command(":history").unwrap(), ReplCommand::History);
    }

    #[test]
    fn test_unknown_command() {
        assert!(parse_repl_command(":connect").is_err());
        assert!(parse_repl_command(":").is_err());
    }
}
