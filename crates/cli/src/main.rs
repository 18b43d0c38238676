// ABOUTME: CLI for the readaloud scanner: find title regions in a page and play them.
// ABOUTME: Loads HTML from URL, file, or stdin; reports regions or drives the player.

use std::fs;
use std::io::{self, Read, Write};
use std::path::PathBuf;
use std::process::ExitCode;
use std::time::Instant;

use anyhow::{anyhow, Result};
use clap::Parser;
use scraper::Html;
use url::Url;

use readaloud_scan::{ClassifierPolicy, RegionReport, Scanner};
use readaloud_speech::{Player, SpeechBackend, UtteranceId};

/// Scan pages for title/content regions and read them aloud.
#[derive(Parser, Debug)]
#[command(name = "readaloud")]
#[command(about = "Find speakable title regions in HTML pages", long_about = None)]
struct Args {
    /// Page URL(s) (http/https) or local file paths. Use "-" to read one page from stdin.
    #[arg(required = true)]
    targets: Vec<String>,

    /// Output regions as JSON instead of a text report.
    #[arg(long)]
    json: bool,

    /// Play every region through the echo backend, in claim order.
    #[arg(long)]
    speak: bool,

    /// Locality policy for the title classifier: semantic or density.
    #[arg(long, default_value_t = ClassifierPolicy::Semantic)]
    policy: ClassifierPolicy,

    /// Maximum subtree height allowed after a title (semantic policy).
    #[arg(long, default_value_t = 3)]
    height_threshold: u32,

    /// Density margin over the document baseline (density policy).
    #[arg(long, default_value_t = 5.0)]
    density_margin: f64,

    /// Print elapsed time in ms to stderr.
    #[arg(long)]
    timing: bool,
}

/// Backend that narrates to stdout. Utterances "complete" as soon as the
/// driver asks, so a whole page plays through synchronously.
#[derive(Debug, Default)]
struct EchoBackend {
    next: u64,
}

impl SpeechBackend for EchoBackend {
    fn speak(&mut self, text: &str) -> UtteranceId {
        self.next += 1;
        println!("speaking: {}", text);
        UtteranceId(self.next)
    }

    fn cancel_all(&mut self) {}
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();

    let scanner = Scanner::builder()
        .policy(args.policy)
        .height_threshold(args.height_threshold)
        .density_margin(args.density_margin)
        .build();

    let start = Instant::now();
    let mut had_error = false;

    for target in &args.targets {
        match load_html(target) {
            Ok(html) => {
                let doc = Html::parse_document(&html);
                let result = scanner.scan(&doc);
                log::debug!(
                    "{}: {} candidate(s), {} region(s)",
                    target,
                    result.candidates().len(),
                    result.regions().len()
                );

                if args.speak {
                    play_all(&doc, &result);
                } else if args.json {
                    print_json(target, &result.reports(&doc), args.targets.len() > 1);
                } else {
                    print_report(target, &result.reports(&doc));
                }
            }
            Err(e) => {
                eprintln!("error loading {}: {}", target, e);
                had_error = true;
            }
        }
    }

    if args.timing {
        let _ = writeln!(io::stderr(), "elapsed: {}ms", start.elapsed().as_millis());
    }

    if had_error {
        ExitCode::from(1)
    } else {
        ExitCode::SUCCESS
    }
}

fn load_html(target: &str) -> Result<String> {
    if target == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        return Ok(buf);
    }

    if let Ok(parsed) = Url::parse(target) {
        if matches!(parsed.scheme(), "http" | "https") {
            let resp = reqwest::blocking::get(parsed)?.error_for_status()?;
            return Ok(resp.text()?);
        }
    }

    let path = PathBuf::from(target);
    if !path.exists() {
        return Err(anyhow!("file not found: {}", target));
    }
    Ok(fs::read_to_string(path)?)
}

/// Click through every region in claim order, pumping completions so the
/// title and content phases play back to back.
fn play_all(doc: &Html, result: &readaloud_scan::ScanResult) {
    let mut player = Player::from_scan(doc, result, Box::<EchoBackend>::default());

    for region in result.regions() {
        player.click(region.claim());
        while let Some(id) = player.active_utterance() {
            player.utterance_finished(id);
        }
    }
}

fn print_report(target: &str, reports: &[RegionReport]) {
    println!("{}: {} region(s)", target, reports.len());
    for report in reports {
        println!("  #{} {}", report.claim, report.title);
        match &report.content {
            Some(content) => println!("     {}", preview(content, 100)),
            None => println!("     (no content)"),
        }
    }
}

fn print_json(target: &str, reports: &[RegionReport], multiple: bool) {
    let output = if multiple {
        serde_json::json!({ "target": target, "regions": reports })
    } else {
        serde_json::json!(reports)
    };
    println!("{}", serde_json::to_string_pretty(&output).unwrap());
}

fn preview(text: &str, limit: usize) -> String {
    if text.chars().count() <= limit {
        return text.to_string();
    }
    let cut: String = text.chars().take(limit).collect();
    format!("{}...", cut.trim_end())
}
