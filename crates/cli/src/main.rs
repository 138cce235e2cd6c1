use clap::{Parser, Subcommand};
use reaper_core::CleanerConfig;
use std::time::Duration;

mod demo;
mod logging;

#[derive(Parser)]
#[command(name = "reaper")]
#[command(about = "Run cleanup tasks when threads and resources are reclaimed", long_about = None)]
#[command(version)]
struct Cli {
    /// Default log level when RUST_LOG is not set
    #[arg(long, default_value = "info")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Spawn worker threads, let them exit, and report the reaper's work
    Demo {
        /// Number of worker threads
        #[arg(short, long, default_value_t = 4)]
        workers: usize,

        /// Cleanup tasks each worker registers against itself
        #[arg(short, long, default_value_t = 8)]
        tasks_per_worker: usize,

        /// Make every n-th task panic (0 disables)
        #[arg(long, default_value_t = 0)]
        fail_every: usize,

        /// Seconds to wait for the reaper
        #[arg(long, default_value_t = 10)]
        timeout: u64,
    },
    /// Print the cleaner configuration resolved from the environment
    Config,
}

fn main() -> eyre::Result<()> {
    let cli = Cli::parse();
    logging::init(&cli.log_level)?;

    match cli.command {
        Commands::Demo {
            workers,
            tasks_per_worker,
            fail_every,
            timeout,
        } => {
            let options = demo::DemoOptions {
                workers,
                tasks_per_worker,
                fail_every,
                timeout: Duration::from_secs(timeout),
            };
            let report = demo::run(reaper_cleaner::global()?, &options)?;

            println!("expected:  {}", report.expected);
            println!("completed: {}", report.completed);
            println!("failed:    {}", report.failed);
            println!("live:      {}", report.live);
            println!("elapsed:   {:?}", report.elapsed);

            if report.completed + report.failed != report.expected {
                eyre::bail!(
                    "reaper finished {} of {} cleanup tasks",
                    report.completed + report.failed,
                    report.expected
                );
            }
        }
        Commands::Config => {
            let config = CleanerConfig::from_env()?;
            println!("reaper_name:    {}", config.reaper_name);
            println!("poll_interval:  {:?}", config.poll_interval);
            println!("lower_priority: {}", config.lower_priority);
        }
    }

    Ok(())
}
