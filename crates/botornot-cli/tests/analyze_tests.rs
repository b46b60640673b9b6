//! End-to-end tests of the offline analysis path.

use botornot_cli::cli::AnalyzeArgs;
use botornot_cli::commands::analyze::analyze_files;
use botornot_cli::config::OutputFormat;
use botornot_cli::{Config, Formatter};
use std::fs;

const ANSWER: &str = "Solid-state cells are the main research direction.\n\
                      1. Dr. Jane Smith\n\
                      - Professor at MIT\n\
                      - Works on battery chemistry";

const TRACE: &str = "## Step 1\n\
                     **Action:** search\n\
                     **Tools:** Valyu Search\n\
                     Fetched https://example.org/paper\n\
                     Simple LLM Audit: no external tools required";

fn write_inputs(dir: &tempfile::TempDir) -> AnalyzeArgs {
    let answer = dir.path().join("answer.md");
    let trace = dir.path().join("trace.log");
    fs::write(&answer, ANSWER).unwrap();
    fs::write(&trace, TRACE).unwrap();
    AnalyzeArgs {
        answer,
        trace: Some(trace),
        highlight: None,
        sentences: false,
    }
}

#[test]
fn test_analyze_json_output() {
    let dir = tempfile::tempdir().unwrap();
    let args = write_inputs(&dir);
    let config = Config::default();
    let formatter = Formatter::new(OutputFormat::Json, false);

    let output = analyze_files(&args, &config.extractor, &formatter).unwrap();
    let json: serde_json::Value = serde_json::from_str(&output).unwrap();

    let sources = json["analysis"]["sources"].as_array().unwrap();
    assert_eq!(sources[0], "https://example.org/paper");
    assert_eq!(sources[1], "Source: Valyu Search");

    let experts = json["analysis"]["experts"].as_array().unwrap();
    assert_eq!(experts.len(), 1);
    assert_eq!(experts[0]["name"], "Jane Smith");
    assert_eq!(experts[0]["website"], "https://www.mit.edu");

    assert_eq!(json["analysis"]["segments"][1]["basis"], "expert_mention");
    assert_eq!(json["audit"]["summary"]["action"], "search");
}

#[test]
fn test_analyze_highlight_marks_trace_lines() {
    let dir = tempfile::tempdir().unwrap();
    let mut args = write_inputs(&dir);
    args.highlight = Some(1);
    let formatter = Formatter::new(OutputFormat::Table, false);

    let output = analyze_files(&args, &Config::default().extractor, &formatter).unwrap();

    assert!(output.contains("> Fetched https://example.org/paper"));
    assert!(output.contains("  Action: search"));
    assert!(!output.contains("no external tools required"));
    assert!(output.contains("[3] https://www.mit.edu"));
}

#[test]
fn test_config_file_drives_extraction() {
    let dir = tempfile::tempdir().unwrap();
    let config_path = dir.path().join("config.toml");
    fs::write(
        &config_path,
        "[extractor]\nknown_tools = [\"Semantic Scholar\"]\nfallback_source = \"Model memory\"\n",
    )
    .unwrap();
    let config = Config::load_from(&config_path).unwrap();

    let answer = dir.path().join("answer.md");
    let trace = dir.path().join("trace.log");
    fs::write(&answer, "An answer.").unwrap();
    fs::write(&trace, "Thinking without tools").unwrap();
    let args = AnalyzeArgs {
        answer,
        trace: Some(trace),
        highlight: None,
        sentences: false,
    };

    let formatter = Formatter::new(OutputFormat::Table, false);
    let output = analyze_files(&args, &config.extractor, &formatter).unwrap();
    assert!(output.contains("An answer. [1]"));
    assert!(output.contains("[1] Model memory"));
}
