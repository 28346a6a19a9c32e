//! Line-oriented shell for logging rounds and viewing the analysis.
//!
//! The shell owns the round store and passes it explicitly into the engine
//! on every cycle: one command, one full recomputation, one printout. All
//! decision logic lives in `studio-engine`; this binary only parses input
//! and formats output.

use std::fs;
use std::io::{self, BufRead, Write};

use anyhow::{bail, Context, Result};
use chrono::Utc;
use clap::Parser;
use studio_engine::{analyze, history_csv, render_report, Analysis, AnalyzerConfig, RoundStore};
use studio_types::{Outcome, Rank, Round, TableRules};
use tracing::warn;

/// CLI flags. Every engine threshold worth flipping per session is exposed
/// here; the rest keeps the canonical defaults.
#[derive(Parser, Debug)]
#[command(name = "studio", about = "Football Studio round logger and analyzer")]
struct Args {
    /// Rolling window for the probability estimator
    #[arg(long, default_value_t = 10)]
    window: usize,

    /// Break score at which betting is suspended
    #[arg(long, default_value_t = 50)]
    break_threshold: u8,

    /// Keep betting through high break scores (visibly annotated)
    #[arg(long)]
    aggressive: bool,

    /// Raise color thresholds when the manipulation level is high
    #[arg(long)]
    manipulation_modifier: bool,

    /// Map the home card to BLUE instead of RED in two-card entry
    #[arg(long)]
    home_is_blue: bool,

    /// Print the full analysis bundle as JSON after every change
    #[arg(long)]
    json: bool,
}

struct CommandDef {
    usage: &'static str,
    desc: &'static str,
}

const fn cmd(usage: &'static str, desc: &'static str) -> CommandDef {
    CommandDef { usage, desc }
}

const COMMANDS: &[CommandDef] = &[
    cmd("red <rank>", "Log a red win with the winning card"),
    cmd("blue <rank>", "Log a blue win with the winning card"),
    cmd("tie", "Log a tie round"),
    cmd(
        "pair <home|-> <away|->",
        "Log a two-card round; '-' leaves that side unset",
    ),
    cmd("undo", "Revert the last append"),
    cmd("reset", "Clear the whole history"),
    cmd("show [n]", "Print the last n rounds (default 10)"),
    cmd("analyze", "Recompute and print the analysis"),
    cmd("csv <path>", "Export the history as CSV"),
    cmd("report <path>", "Write the text report"),
    cmd("help", "Show this table"),
    cmd("quit", "Exit"),
];

fn build_config(args: &Args) -> AnalyzerConfig {
    let mut config = AnalyzerConfig::default();
    config.probability.window = args.window.max(1);
    config.suggestion.break_threshold = args.break_threshold;
    config.suggestion.aggressive_override = args.aggressive;
    config.suggestion.manipulation_modifier = args.manipulation_modifier;
    if args.home_is_blue {
        config.rules = TableRules {
            home_side: Outcome::Blue,
        };
    }
    config
}

fn parse_rank(token: &str) -> Result<Rank> {
    token
        .parse::<Rank>()
        .with_context(|| format!("'{token}' is not a card rank (A K Q J 10 9 .. 2)"))
}

/// '-' marks a side the user has not chosen yet.
fn parse_optional_rank(token: &str) -> Result<Option<Rank>> {
    if token == "-" {
        return Ok(None);
    }
    parse_rank(token).map(Some)
}

fn print_help() {
    for def in COMMANDS {
        println!("  {:<24} {}", def.usage, def.desc);
    }
}

fn print_analysis(analysis: &Analysis, json: bool) -> Result<()> {
    if json {
        println!(
            "{}",
            serde_json::to_string_pretty(analysis).context("serialize analysis")?
        );
        return Ok(());
    }

    let p = &analysis.probabilities;
    println!("RED {}% / BLUE {}% / TIE {}%  (confidence {}%)", p.red, p.blue, p.tie, p.confidence);
    println!("manipulation level: {}/9", analysis.manipulation_level);
    let names = analysis.patterns.names();
    if !names.is_empty() {
        println!("patterns: {}", names.join(", "));
    }
    if analysis.break_report.score > 0 {
        println!(
            "break score: {}% ({})",
            analysis.break_report.score,
            analysis.break_report.summary()
        );
    }
    println!("suggestion: {}", analysis.suggestion.text);
    Ok(())
}

fn show_rounds(store: &RoundStore, config: &AnalyzerConfig, n: usize) {
    if store.is_empty() {
        println!("no rounds yet");
        return;
    }
    for round in store.tail(n) {
        let outcome = round
            .outcome(&config.rules)
            .map(|o| o.as_str().to_uppercase())
            .unwrap_or_else(|| "incomplete".to_string());
        let card = round
            .winning_card(&config.rules)
            .map(|r| r.label())
            .unwrap_or("-");
        println!(
            "  {}  {:<10} card {:<2} ({})",
            round.timestamp.format("%H:%M:%S"),
            outcome,
            card,
            round.winning_class(&config.rules)
        );
    }
}

/// Execute one command line. Returns `false` when the shell should exit.
fn execute(line: &str, store: &mut RoundStore, config: &AnalyzerConfig, json: bool) -> Result<bool> {
    let tokens: Vec<&str> = line.split_whitespace().collect();
    let Some((&name, rest)) = tokens.split_first() else {
        return Ok(true);
    };

    let mut changed = false;
    match name {
        "red" | "blue" => {
            let [token] = rest else {
                bail!("usage: {name} <rank>");
            };
            let side = if name == "red" { Outcome::Red } else { Outcome::Blue };
            store.append(Round::single(Utc::now(), side, Some(parse_rank(token)?)));
            changed = true;
        }
        "tie" => {
            store.append(Round::tie(Utc::now()));
            changed = true;
        }
        "pair" => {
            let [home, away] = rest else {
                bail!("usage: pair <home|-> <away|->");
            };
            let round = Round::pair(
                Utc::now(),
                parse_optional_rank(home)?,
                parse_optional_rank(away)?,
            );
            if let Some(outcome) = round.outcome(&config.rules) {
                println!("outcome: {}", outcome.as_str().to_uppercase());
            } else {
                println!("round incomplete; it will not count until both cards are set");
            }
            store.append(round);
            changed = true;
        }
        "undo" => {
            if store.undo() {
                changed = true;
            } else {
                warn!("nothing to undo");
            }
        }
        "reset" => {
            store.reset();
            changed = true;
        }
        "show" => {
            let n = match rest {
                [] => 10,
                [token] => token
                    .parse::<usize>()
                    .with_context(|| format!("'{token}' is not a count"))?,
                _ => bail!("usage: show [n]"),
            };
            show_rounds(store, config, n);
        }
        "analyze" => {
            print_analysis(&analyze(store.rounds(), config), json)?;
        }
        "csv" => {
            let [path] = rest else {
                bail!("usage: csv <path>");
            };
            let csv = history_csv(store.rounds(), &config.rules);
            fs::write(path, csv).with_context(|| format!("write {path}"))?;
            println!("wrote {} rounds to {path}", store.len());
        }
        "report" => {
            let [path] = rest else {
                bail!("usage: report <path>");
            };
            let analysis = analyze(store.rounds(), config);
            let report = render_report(&analysis, store.rounds(), &config.rules, Utc::now());
            fs::write(path, report).with_context(|| format!("write {path}"))?;
            println!("wrote report to {path}");
        }
        "help" => print_help(),
        "quit" | "exit" => return Ok(false),
        other => {
            bail!("unknown command: {other} (try 'help')");
        }
    }

    if changed {
        print_analysis(&analyze(store.rounds(), config), json)?;
    }
    Ok(true)
}

fn main() -> Result<()> {
    tracing_subscriber::fmt().with_target(false).init();

    let args = Args::parse();
    let config = build_config(&args);
    let mut store = RoundStore::new();

    println!("studio analyzer (window {}); type 'help' for commands", config.probability.window);

    let stdin = io::stdin();
    let mut stdout = io::stdout();
    loop {
        print!("> ");
        stdout.flush().context("flush prompt")?;

        let mut line = String::new();
        if stdin.lock().read_line(&mut line).context("read stdin")? == 0 {
            break;
        }
        match execute(line.trim(), &mut store, &config, args.json) {
            Ok(true) => {}
            Ok(false) => break,
            Err(err) => println!("error: {err:#}"),
        }
    }

    Ok(())
}
