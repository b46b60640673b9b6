//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use botornot_domain::{ExpertRecord, Source, SourceKind};
use botornot_extractor::{AnswerAnalysis, AuditView};
use colored::*;
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

const AUDIT_TITLE: &str = "Transparency Audit";
const AUDIT_INTRO: &str = "This log reveals the agent's process to ensure trust and verifiability.";
const AGENT_STACK: [&str; 3] = [
    "Core LLM: AWS Claude 3 Haiku",
    "Tool: Valyu AI Search",
    "Framework: LangGraph, Boto3 client",
];
const NO_TRACE_LINK: &str = "Run a prompt to see the agent trace link.";

/// Numbered source list for an answer: the extracted sources, then any
/// expert links segments were attributed to, in first-use order.
pub fn source_legend(analysis: &AnswerAnalysis) -> Vec<Source> {
    let mut legend = analysis.sources.clone();
    for segment in &analysis.segments {
        if !legend.contains(&segment.source) {
            legend.push(segment.source.clone());
        }
    }
    legend
}

/// Short description of what kind of evidence a source is.
pub fn kind_label(kind: SourceKind) -> &'static str {
    match kind {
        SourceKind::Url => "web",
        SourceKind::Tool => "research tool",
        SourceKind::InternalKnowledge => "model knowledge",
        SourceKind::AuditLog => "audit log",
        SourceKind::Other => "label",
    }
}

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Selected output format.
    pub fn format(&self) -> OutputFormat {
        self.format
    }

    /// Format an attributed answer.
    ///
    /// `legend` numbers the sources; segments attributed to `highlight` are
    /// emphasised.
    pub fn format_answer(
        &self,
        analysis: &AnswerAnalysis,
        legend: &[Source],
        highlight: Option<&Source>,
    ) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(analysis)?),
            OutputFormat::Table => Ok(self.format_answer_table(analysis, legend, highlight)),
            OutputFormat::Quiet => Ok(analysis
                .segments
                .iter()
                .map(|s| s.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_answer_table(
        &self,
        analysis: &AnswerAnalysis,
        legend: &[Source],
        highlight: Option<&Source>,
    ) -> String {
        let mut out = String::new();

        for segment in &analysis.segments {
            let marker = legend
                .iter()
                .position(|s| s == &segment.source)
                .map(|i| format!("[{}]", i + 1))
                .unwrap_or_default();

            let line = format!("{} {}", segment.text, marker);
            if highlight == Some(&segment.source) {
                out.push_str(&self.emphasise(&format!("▌ {}", line)));
            } else {
                out.push_str(&format!("  {}", line));
            }
            out.push('\n');
        }

        out.push('\n');
        out.push_str(&self.colorize("Sources:", "cyan"));
        out.push('\n');
        for (i, source) in legend.iter().enumerate() {
            let entry = format!("  [{}] {} ({})", i + 1, source, kind_label(source.kind()));
            if highlight == Some(source) {
                out.push_str(&self.emphasise(&entry));
            } else {
                out.push_str(&entry);
            }
            out.push('\n');
        }

        out.trim_end().to_string()
    }

    /// Format the transparency audit panel.
    pub fn format_audit(&self, view: &AuditView, trace_url: Option<&str>) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "summary": view.summary,
                "lines": view.lines,
                "trace_url": trace_url,
            }))?),
            OutputFormat::Quiet => Ok(view
                .lines
                .iter()
                .map(|l| l.text.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
            OutputFormat::Table => Ok(self.format_audit_text(view, trace_url)),
        }
    }

    fn format_audit_text(&self, view: &AuditView, trace_url: Option<&str>) -> String {
        let mut lines = vec![
            self.colorize(AUDIT_TITLE, "magenta"),
            AUDIT_INTRO.to_string(),
            String::new(),
        ];
        lines.extend(AGENT_STACK.iter().map(|s| format!("  {}", s)));
        lines.push(String::new());

        if let Some(summary) = &view.summary {
            if let Some(title) = &summary.title {
                lines.push(self.colorize(title, "cyan"));
            }
            for (label, value) in [
                ("Action", &summary.action),
                ("Tools", &summary.tools),
                ("Observation", &summary.observation),
            ] {
                if let Some(value) = value {
                    lines.push(format!("  {}: {}", label, value));
                }
            }
            lines.push(String::new());
        }

        for line in &view.lines {
            if line.relevant {
                lines.push(self.emphasise(&format!("> {}", line.text)));
            } else {
                lines.push(format!("  {}", line.text));
            }
        }

        lines.push(String::new());
        match trace_url {
            Some(url) => lines.push(format!("Full interactive trace: {}", url)),
            None => lines.push(self.colorize(NO_TRACE_LINK, "yellow")),
        }

        lines.join("\n")
    }

    /// Format the expert panel.
    pub fn format_experts(&self, experts: &[ExpertRecord]) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(experts)?),
            OutputFormat::Table => Ok(self.format_experts_table(experts)),
            OutputFormat::Quiet => Ok(experts
                .iter()
                .map(|e| e.name.as_str())
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    fn format_experts_table(&self, experts: &[ExpertRecord]) -> String {
        if experts.is_empty() {
            return self.colorize("No experts found.", "yellow");
        }

        let mut builder = Builder::default();
        builder.push_record(["#", "Name", "Title", "Affiliation", "Location"]);

        for (i, expert) in experts.iter().enumerate() {
            builder.push_record([
                (i + 1).to_string(),
                expert.name.clone(),
                expert.title.clone().unwrap_or_default(),
                expert.affiliation_or_independent().to_string(),
                expert.location.clone().unwrap_or_default(),
            ]);
        }

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        table.to_string()
    }

    /// Format the detail view of one expert.
    pub fn format_expert_detail(&self, expert: &ExpertRecord, link: &Source) -> Result<String> {
        if self.format == OutputFormat::Json {
            return Ok(serde_json::to_string_pretty(expert)?);
        }

        let mut lines = vec![self.colorize(&expert.name, "cyan")];

        let headline: Vec<&str> = [
            expert.title.as_deref(),
            Some(expert.affiliation_or_independent()),
            expert.location.as_deref(),
        ]
        .into_iter()
        .flatten()
        .collect();
        lines.push(headline.join(" • "));

        if let Some(summary) = &expert.summary {
            lines.push(String::new());
            lines.push(summary.clone());
        }
        if let Some(areas) = &expert.areas {
            lines.push(format!("Areas: {}", areas.join(", ")));
        }
        if let Some(email) = &expert.email {
            lines.push(format!("Email: {}", email));
        }
        lines.push(format!("Link: {}", link));

        Ok(lines.join("\n"))
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn emphasise(&self, text: &str) -> String {
        if self.color_enabled {
            text.bold().yellow().to_string()
        } else {
            text.to_string()
        }
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            "cyan" => text.cyan().to_string(),
            "magenta" => text.magenta().to_string(),
            _ => text.to_string(),
        }
    }
}
