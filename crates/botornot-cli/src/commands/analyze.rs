//! Analyze command implementation.

use super::render_reply;
use crate::cli::AnalyzeArgs;
use crate::error::Result;
use crate::output::Formatter;
use botornot_domain::AgentReply;
use botornot_extractor::{Extractor, ExtractorConfig, SegmentPolicy};
use std::fs;

/// Execute the analyze command.
pub fn execute_analyze(
    args: AnalyzeArgs,
    config: &ExtractorConfig,
    formatter: &Formatter,
) -> Result<()> {
    println!("{}", analyze_files(&args, config, formatter)?);
    Ok(())
}

/// Read the saved answer and trace named by `args` and render them.
pub fn analyze_files(
    args: &AnalyzeArgs,
    config: &ExtractorConfig,
    formatter: &Formatter,
) -> Result<String> {
    let answer = fs::read_to_string(&args.answer)?;
    let trace = match &args.trace {
        Some(path) => Some(fs::read_to_string(path)?),
        None => None,
    };

    let mut config = config.clone();
    if args.sentences {
        config.segment_policy = SegmentPolicy::Sentences;
    }
    let extractor = Extractor::new(config)?;

    let reply = AgentReply {
        answer,
        trace_url: None,
        trace_text: trace,
    };
    let analysis = extractor.analyze(&reply.answer, reply.trace());
    render_reply(&reply, &analysis, &extractor, args.highlight, formatter)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use crate::error::CliError;
    use std::path::Path;

    fn args(dir: &Path, answer: &str, trace: Option<&str>) -> AnalyzeArgs {
        let answer_path = dir.join("answer.md");
        fs::write(&answer_path, answer).unwrap();
        let trace_path = trace.map(|t| {
            let path = dir.join("trace.log");
            fs::write(&path, t).unwrap();
            path
        });
        AnalyzeArgs {
            answer: answer_path,
            trace: trace_path,
            highlight: None,
            sentences: false,
        }
    }

    #[test]
    fn test_analyze_with_trace() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(
            dir.path(),
            "Sodium cells are cheap.\nThey are heavy.",
            Some("Searching https://a.io/report\nUsing Wikipedia"),
        );
        args.highlight = Some(1);

        let formatter = Formatter::new(OutputFormat::Table, false);
        let output = analyze_files(&args, &ExtractorConfig::default(), &formatter).unwrap();

        assert!(output.contains("▌ Sodium cells are cheap. [1]"));
        assert!(output.contains("  They are heavy. [2]"));
        assert!(output.contains("> Searching https://a.io/report"));
        assert!(output.contains("Run a prompt to see the agent trace link."));
    }

    #[test]
    fn test_analyze_without_trace() {
        let dir = tempfile::tempdir().unwrap();
        let args = args(dir.path(), "Just an answer.", None);

        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = analyze_files(&args, &ExtractorConfig::default(), &formatter).unwrap();
        let json: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(
            json["analysis"]["sources"][0],
            "Internal knowledge (no external source)"
        );
        assert_eq!(json["analysis"]["segments"][0]["text"], "Just an answer.");
        assert!(json["trace_url"].is_null());
    }

    #[test]
    fn test_analyze_sentences() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), "One claim. Another claim.", None);
        args.sentences = true;

        let formatter = Formatter::new(OutputFormat::Quiet, false);
        let output = analyze_files(&args, &ExtractorConfig::default(), &formatter).unwrap();
        assert_eq!(output, "One claim.\nAnother claim.");
    }

    #[test]
    fn test_highlight_out_of_range() {
        let dir = tempfile::tempdir().unwrap();
        let mut args = args(dir.path(), "Answer.", None);
        args.highlight = Some(5);

        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = analyze_files(&args, &ExtractorConfig::default(), &formatter);
        assert!(matches!(result, Err(CliError::InvalidInput(_))));
    }

    #[test]
    fn test_missing_answer_file() {
        let dir = tempfile::tempdir().unwrap();
        let args = AnalyzeArgs {
            answer: dir.path().join("missing.md"),
            trace: None,
            highlight: None,
            sentences: false,
        };
        let formatter = Formatter::new(OutputFormat::Table, false);
        let result = analyze_files(&args, &ExtractorConfig::default(), &formatter);
        assert!(matches!(result, Err(CliError::Io(_))));
    }
}
