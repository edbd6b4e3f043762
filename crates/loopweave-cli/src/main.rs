//! loopweave demos: run the same nested loops under different execution orders.

mod demos;
mod logging;

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result, bail};
use clap::{Args, Parser, Subcommand};
use serde::Serialize;
use tracing::info;

use loopweave_core::{PolicyKind, QueueStats, Scheduler, SchedulerConfig};

use crate::demos::quicksort::MAX_ARRAY_SIZE;

#[derive(Parser)]
#[command(
    name = "loopweave",
    version,
    about = "Run independent loop iterations under alternate execution orders"
)]
struct Cli {
    #[command(flatten)]
    scheduler: SchedulerArgs,

    #[command(subcommand)]
    command: Command,
}

#[derive(Args)]
struct SchedulerArgs {
    /// JSON file with scheduler settings; flags below override it.
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// depth-first (df), breadth-first (bf) or random.
    #[arg(short, long, global = true)]
    policy: Option<PolicyKind>,

    /// Seed for the random policy (defaults to the current time).
    #[arg(short, long, global = true)]
    seed: Option<u64>,

    #[arg(long, global = true)]
    queue_capacity: Option<usize>,

    #[arg(long, global = true)]
    max_depth: Option<usize>,
}

#[derive(Subcommand)]
enum Command {
    /// Three nested two-iteration loops printing tasks A..G.
    Nested {
        /// Print lines and queue stats as JSON.
        #[arg(long)]
        json: bool,
    },
    /// Quicksort a seeded permutation, printing every recursive call.
    Quicksort {
        /// Number of elements (at most 100).
        size: usize,
        /// Seed for generating the input permutation.
        array_seed: u64,
    },
}

#[derive(Serialize)]
struct NestedReport {
    policy: PolicyKind,
    seed: u64,
    lines: Vec<String>,
    stats: QueueStats,
}

fn main() {
    logging::init();
    if let Err(err) = run() {
        eprintln!("{:#}", err);
        std::process::exit(1);
    }
}

fn run() -> Result<()> {
    let cli = Cli::parse();
    let config = build_config(&cli.scheduler)?;
    let mut scheduler = Scheduler::new(config);
    info!(
        policy = %scheduler.config().policy,
        seed = scheduler.seed(),
        queue_capacity = scheduler.config().queue_capacity,
        max_task_depth = scheduler.config().max_task_depth,
        "scheduler ready"
    );

    match cli.command {
        Command::Nested { json } => {
            if json {
                let lines =
                    demos::nested::run(&mut scheduler, |_| {}).context("nested demo failed")?;
                let report = NestedReport {
                    policy: scheduler.config().policy,
                    seed: scheduler.seed(),
                    lines,
                    stats: scheduler.stats(),
                };
                println!("{}", serde_json::to_string_pretty(&report)?);
            } else {
                demos::nested::run(&mut scheduler, |line| println!("{line}"))
                    .context("nested demo failed")?;
            }
        }
        Command::Quicksort { size, array_seed } => {
            if size > MAX_ARRAY_SIZE {
                bail!("arrays larger than {MAX_ARRAY_SIZE} elements will corrupt the printing format");
            }
            let input = demos::quicksort::gen_input(size, array_seed);
            let result =
                demos::quicksort::run(&mut scheduler, input).context("quicksort demo failed")?;
            for line in &result.lines {
                println!("{line}");
            }
            if !result.is_sorted() {
                bail!("result is not sorted: {:?}", result.output);
            }
        }
    }
    Ok(())
}

fn build_config(args: &SchedulerArgs) -> Result<SchedulerConfig> {
    let mut config = match &args.config {
        Some(path) => {
            let text = fs::read_to_string(path)
                .with_context(|| format!("failed to read {}", path.display()))?;
            SchedulerConfig::from_json_str(&text)
                .with_context(|| format!("failed to parse {}", path.display()))?
        }
        None => SchedulerConfig::default(),
    };

    if let Some(policy) = args.policy {
        config = config.with_policy(policy);
    }
    if let Some(seed) = args.seed {
        config = config.with_seed(seed);
    }
    if let Some(capacity) = args.queue_capacity {
        config = config.with_queue_capacity(capacity);
    }
    if let Some(depth) = args.max_depth {
        config = config.with_max_task_depth(depth);
    }
    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn flags_override_defaults() {
        let cli = Cli::parse_from([
            "loopweave", "--policy", "df", "--seed", "9", "--max-depth", "3", "nested",
        ]);
        let config = build_config(&cli.scheduler).unwrap();
        assert_eq!(config.policy, PolicyKind::DepthFirst);
        assert_eq!(config.seed, Some(9));
        assert_eq!(config.max_task_depth, 3);
        assert_eq!(config.queue_capacity, SchedulerConfig::DEFAULT_QUEUE_CAPACITY);
    }

    #[test]
    fn quicksort_takes_positional_args() {
        let cli = Cli::parse_from(["loopweave", "quicksort", "10", "3", "-p", "random"]);
        assert!(matches!(
            cli.command,
            Command::Quicksort {
                size: 10,
                array_seed: 3
            }
        ));
        assert_eq!(cli.scheduler.policy, Some(PolicyKind::Random));
    }

    #[test]
    fn unknown_policy_is_a_parse_error() {
        let parsed = Cli::try_parse_from(["loopweave", "--policy", "sideways", "nested"]);
        assert!(parsed.is_err());
    }

    #[test]
    fn missing_config_file_is_reported() {
        let args = SchedulerArgs {
            config: Some(PathBuf::from("/nonexistent/loopweave.json")),
            policy: None,
            seed: None,
            queue_capacity: None,
            max_depth: None,
        };
        let err = build_config(&args).unwrap_err();
        assert!(err.to_string().contains("failed to read"));
    }
}
