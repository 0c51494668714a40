//! MoodPulse CLI
//!
//! Command-line client for a running MoodPulse server:
//! - Record check-ins
//! - Show analysis reports and the support snapshot
//! - List raw entries
//! - Check status

use anyhow::{bail, Context};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "moodpulse-cli")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Track how you feel and who you were with")]
#[command(long_about = "MoodPulse records mood check-ins with context tags.\nReview patterns over time and share a snapshot with people you trust.")]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// API server URL
    #[arg(long, default_value = "http://127.0.0.1:5000", global = true)]
    pub api_url: String,

    /// Output format (table, json)
    #[arg(short, long, default_value = "table", global = true)]
    pub format: String,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Record a check-in
    Checkin {
        /// Mood label (see `vocabulary`)
        mood: String,
        /// Intensity 1-10 (default: 5)
        #[arg(short, long)]
        intensity: Option<String>,
        /// Context tags, repeatable
        #[arg(short, long = "tag")]
        tags: Vec<String>,
        /// Free-text notes
        #[arg(short, long)]
        notes: Option<String>,
        /// When it happened (default: now). Supports: "now", "yesterday", ISO 8601
        #[arg(long)]
        time: Option<String>,
    },

    /// Show the pattern analysis for a window
    Report {
        /// Days to analyze (1-365, default: 7)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// Print the 7-day support snapshot
    Snapshot,

    /// List raw check-ins, newest first
    Entries {
        /// Days to list (1-365, default: 30)
        #[arg(short, long)]
        days: Option<u32>,
    },

    /// List allowed moods and context tags
    Vocabulary,

    /// Show server status
    Status,

    /// Generate default config file
    Config {
        /// Output path (default: stdout)
        #[arg(short, long)]
        output: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let client = reqwest::Client::new();

    match cli.command {
        Commands::Checkin {
            mood,
            intensity,
            tags,
            notes,
            time,
        } => {
            // Without --time the server stamps the check-in with its own clock
            let timestamp = match time.as_deref() {
                None | Some("now") => None,
                Some("yesterday") => Some(Utc::now() - Duration::days(1)),
                Some(s) => Some(
                    chrono::DateTime::parse_from_rfc3339(s)
                        .with_context(|| format!("Invalid timestamp format: {}", s))?
                        .with_timezone(&Utc),
                ),
            };

            let body = serde_json::json!({
                "mood": mood,
                "intensity": intensity,
                "context_tags": tags,
                "notes": notes,
                "timestamp": timestamp,
            });

            let response = client
                .post(format!("{}/api/v1/checkins", cli.api_url))
                .json(&body)
                .send()
                .await?;

            if !response.status().is_success() {
                let status = response.status();
                let text = response.text().await.unwrap_or_default();
                bail!("Check-in failed ({}): {}", status, text);
            }

            let record: serde_json::Value = response.json().await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&record)?);
            } else {
                println!(
                    "Recorded {} ({}/10) {}",
                    record["mood"].as_str().unwrap_or("-"),
                    record["intensity"].as_u64().unwrap_or(0),
                    format_tags(&record["context_tags"]),
                );
            }
        }

        Commands::Report { days } => {
            let mut request = client.get(format!("{}/api/v1/analysis", cli.api_url));
            if let Some(days) = days {
                request = request.query(&[("days", days)]);
            }
            let response = request.send().await?;

            if response.status() == reqwest::StatusCode::NOT_FOUND {
                println!("No mood data for this window yet.");
                return Ok(());
            }
            if !response.status().is_success() {
                bail!("Report failed: {}", response.status());
            }

            let analysis: serde_json::Value = response.json().await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&analysis)?);
            } else {
                print_report(&analysis);
            }
        }

        Commands::Snapshot => {
            let response = client
                .get(format!("{}/api/v1/snapshot", cli.api_url))
                .send()
                .await?;

            if !response.status().is_success() {
                bail!("Snapshot failed: {}", response.status());
            }
            println!("{}", response.text().await?);
        }

        Commands::Entries { days } => {
            let mut request = client.get(format!("{}/api/v1/entries", cli.api_url));
            if let Some(days) = days {
                request = request.query(&[("days", days)]);
            }
            let response = request.send().await?;

            if !response.status().is_success() {
                bail!("Failed to fetch entries: {}", response.status());
            }

            let entries: Vec<serde_json::Value> = response.json().await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&entries)?);
            } else {
                print_entries(&entries);
            }
        }

        Commands::Vocabulary => {
            let response = client
                .get(format!("{}/api/v1/vocabulary", cli.api_url))
                .send()
                .await?;

            if !response.status().is_success() {
                bail!("Failed to fetch vocabulary: {}", response.status());
            }

            let vocab: serde_json::Value = response.json().await?;
            if cli.format == "json" {
                println!("{}", serde_json::to_string_pretty(&vocab)?);
            } else {
                println!("Moods:        {}", join_strings(&vocab["moods"]));
                println!("Context tags: {}", join_strings(&vocab["context_tags"]));
                println!("With others:  {}", join_strings(&vocab["interaction_tags"]));
                println!("Alone tag:    {}", vocab["alone_tag"].as_str().unwrap_or("-"));
            }
        }

        Commands::Status => {
            let response = client
                .get(format!("{}/health", cli.api_url))
                .send()
                .await;

            match response {
                Ok(resp) if resp.status().is_success() => {
                    let health: serde_json::Value = resp.json().await?;

                    println!("MoodPulse v{}", env!("CARGO_PKG_VERSION"));
                    println!();
                    println!(
                        "API Status: {}",
                        health["status"].as_str().unwrap_or("unknown")
                    );
                    if let Some(count) = health["checkins"].as_u64() {
                        println!("Check-ins stored: {}", count);
                    }
                    if let Some(uptime) = health["uptime_seconds"].as_u64() {
                        println!("Uptime: {}", format_duration(uptime));
                    }
                }
                Ok(resp) => {
                    bail!("API returned error: {}", resp.status());
                }
                Err(e) => {
                    eprintln!("Cannot connect to MoodPulse API at {}", cli.api_url);
                    eprintln!();
                    eprintln!("Make sure the MoodPulse server is running:");
                    eprintln!("  cargo run --bin moodpulse");
                    return Err(e.into());
                }
            }
        }

        Commands::Config { output } => {
            let config = moodpulse::config::generate_default_config();

            match output {
                Some(path) => {
                    // Create parent directory if needed
                    if let Some(parent) = path.parent() {
                        std::fs::create_dir_all(parent)?;
                    }
                    std::fs::write(&path, &config)?;
                    println!("Config written to {:?}", path);
                }
                None => {
                    print!("{}", config);
                }
            }
        }
    }

    Ok(())
}

fn format_duration(seconds: u64) -> String {
    if seconds < 60 {
        format!("{}s", seconds)
    } else if seconds < 3600 {
        format!("{}m {}s", seconds / 60, seconds % 60)
    } else if seconds < 86400 {
        format!("{}h {}m", seconds / 3600, (seconds % 3600) / 60)
    } else {
        format!("{}d {}h", seconds / 86400, (seconds % 86400) / 3600)
    }
}

fn join_strings(value: &serde_json::Value) -> String {
    value
        .as_array()
        .map(|items| {
            items
                .iter()
                .filter_map(|v| v.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        })
        .unwrap_or_default()
}

fn format_tags(value: &serde_json::Value) -> String {
    let tags = join_strings(value);
    if tags.is_empty() {
        String::new()
    } else {
        format!("[{}]", tags)
    }
}

fn print_report(analysis: &serde_json::Value) {
    let impact = &analysis["interaction_impact"];

    println!(
        "Mood report, last {} days",
        analysis["window_days"].as_u64().unwrap_or(0)
    );
    println!();
    println!("Check-ins:          {}", analysis["total_entries"].as_u64().unwrap_or(0));
    println!(
        "Most common mood:   {} ({} times)",
        analysis["most_common_mood"]["mood"].as_str().unwrap_or("-"),
        analysis["most_common_mood"]["count"].as_u64().unwrap_or(0)
    );
    println!(
        "Average intensity:  {:.1}/10",
        analysis["avg_intensity"].as_f64().unwrap_or(0.0)
    );
    println!();
    println!(
        "With others: {:.1}   Alone: {:.1}   Difference: {:+.1}",
        impact["with_others_avg"].as_f64().unwrap_or(0.0),
        impact["alone_avg"].as_f64().unwrap_or(0.0),
        impact["difference"].as_f64().unwrap_or(0.0)
    );

    let contexts = match analysis["context_insights"].as_array() {
        Some(c) if !c.is_empty() => c,
        _ => return,
    };

    println!();
    println!("{:<22} {:>6} {:>9}  {}", "Context", "Count", "Avg", "Moods");
    println!("{}", "-".repeat(60));
    for context in contexts {
        let moods = context["mood_distribution"]
            .as_object()
            .map(|m| {
                m.iter()
                    .map(|(mood, n)| format!("{}:{}", mood, n.as_u64().unwrap_or(0)))
                    .collect::<Vec<_>>()
                    .join(" ")
            })
            .unwrap_or_default();

        println!(
            "{:<22} {:>6} {:>9.1}  {}",
            context["tag"].as_str().unwrap_or("-"),
            context["count"].as_u64().unwrap_or(0),
            context["avg_intensity"].as_f64().unwrap_or(0.0),
            moods
        );
    }
}

fn print_entries(entries: &[serde_json::Value]) {
    if entries.is_empty() {
        println!("No check-ins for the selected window");
        return;
    }

    println!("{:<17} {:<11} {:>4}  {}", "When", "Mood", "Int", "Context");
    println!("{}", "-".repeat(60));

    for entry in entries {
        let when = entry["timestamp"]
            .as_str()
            .and_then(|s| chrono::DateTime::parse_from_rfc3339(s).ok())
            .map(|dt| dt.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "{:<17} {:<11} {:>4}  {}",
            when,
            entry["mood"].as_str().unwrap_or("-"),
            entry["intensity"].as_u64().unwrap_or(0),
            join_strings(&entry["context_tags"])
        );

        if let Some(notes) = entry["notes"].as_str().filter(|n| !n.is_empty()) {
            println!("{:<17} {}", "", notes);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_format_duration() {
        assert_eq!(format_duration(42), "42s");
        assert_eq!(format_duration(125), "2m 5s");
        assert_eq!(format_duration(7260), "2h 1m");
        assert_eq!(format_duration(90000), "1d 1h");
    }

    #[test]
    fn test_format_tags() {
        assert_eq!(format_tags(&json!(["alone", "conflict"])), "[alone, conflict]");
        assert_eq!(format_tags(&json!([])), "");
        assert_eq!(format_tags(&json!(null)), "");
    }

    #[test]
    fn test_cli_parses_repeated_tags() {
        let cli = Cli::try_parse_from([
            "moodpulse-cli",
            "checkin",
            "happy",
            "-i",
            "8",
            "-t",
            "alone",
            "--tag",
            "conflict",
        ])
        .unwrap();

        match cli.command {
            Commands::Checkin { mood, intensity, tags, .. } => {
                assert_eq!(mood, "happy");
                assert_eq!(intensity.as_deref(), Some("8"));
                assert_eq!(tags, vec!["alone", "conflict"]);
            }
            _ => panic!("expected checkin"),
        }
    }
}
