use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;

use crate::domain::models::{AnalysisResult, BatchEntry};

#[derive(Parser)]
#[command(
    name = "adsense-readiness",
    version,
    about = "Score a website's readiness for AdSense approval"
)]
pub struct Cli {
    /// TOML configuration file
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Run the HTTP API
    Serve,
    /// Analyze one URL
    Analyze(AnalyzeCommand),
    /// Analyze several URLs one after another
    Batch(BatchCommand),
    /// Show recently persisted analyses
    History,
}

#[derive(Args)]
pub struct AnalyzeCommand {
    pub url: String,
    /// Print the full result as JSON
    #[arg(long)]
    pub json: bool,
}

#[derive(Args)]
pub struct BatchCommand {
    #[arg(required = true)]
    pub urls: Vec<String>,
}

/// Human-readable report for one analysis.
pub fn render_summary(result: &AnalysisResult) -> String {
    let mut out = format!(
        "{}\n  Overall: {}/100  Grade: {}  Percentile: {}th\n",
        result.url, result.overall_score, result.grade, result.percentile
    );

    for (category, scored) in result.categories.iter() {
        out.push_str(&format!(
            "  {:<24} {:>3}/{}\n",
            category.label(),
            scored.score,
            scored.max
        ));
    }

    if !result.recommendations.is_empty() {
        out.push_str("\nRecommendations:\n");
        for rec in &result.recommendations {
            out.push_str(&format!(
                "  [{}] {} ({})\n",
                rec.priority.as_str(),
                rec.action,
                rec.impact
            ));
        }
    }

    out.push_str(&format!("\nGemini: {}\n", result.gemini_insights));
    out.push_str(&format!("ChatGPT: {}\n", result.chatgpt_insights));
    out
}

pub fn render_batch_line(entry: &BatchEntry) -> String {
    match &entry.outcome {
        Ok(result) => format!(
            "ok    {:>3}/100 {:<2}  {}",
            result.overall_score,
            result.grade.as_str(),
            entry.url
        ),
        Err(message) => format!("fail  {}  ({})", entry.url, message),
    }
}
