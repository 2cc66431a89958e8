mod config;
mod feed;
mod render;

use chrono::Utc;
use config::{DashboardConfig, DEFAULT_CONFIG_PATH};
use crossterm::{
    cursor::{Hide, MoveTo, Show},
    execute,
    terminal::{Clear, ClearType, EnterAlternateScreen, LeaveAlternateScreen},
};
use readiness_consensus::SnapshotProcessor;
use render::{BOLD, CYAN, RED, RESET, YELLOW};
use reqwest::blocking::Client;
use std::{
    io::{self, Write},
    sync::atomic::{AtomicBool, Ordering},
    sync::Arc,
    thread,
    time::Duration,
};

const CLEAR_LINE: &str = "\x1b[2K"; // Clear entire line

// Helper macro to print and clear rest of line
macro_rules! println_clear {
    ($($arg:tt)*) => {
        print!("{}", CLEAR_LINE);
        println!($($arg)*);
    };
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("warn")).init();

    let config_path = std::env::args()
        .nth(1)
        .unwrap_or_else(|| DEFAULT_CONFIG_PATH.to_string());
    let config = DashboardConfig::load(&config_path)?;

    let client = Client::builder()
        .timeout(Duration::from_secs(config.request_timeout_secs))
        .build()?;

    // Setup Ctrl+C handler
    let running = Arc::new(AtomicBool::new(true));
    let r = running.clone();

    ctrlc::set_handler(move || {
        r.store(false, Ordering::SeqCst);
    })?;

    // Enter alternate screen buffer and hide cursor
    execute!(io::stdout(), EnterAlternateScreen, Hide)?;

    let result = run_dashboard(&client, &config, running);

    // Cleanup: Leave alternate screen buffer and show cursor on exit
    execute!(io::stdout(), Show, LeaveAlternateScreen)?;

    println!("Dashboard stopped gracefully.");

    result
}

fn run_dashboard(
    client: &Client,
    config: &DashboardConfig,
    running: Arc<AtomicBool>,
) -> Result<(), Box<dyn std::error::Error>> {
    let processor = SnapshotProcessor::new(config.monitor.clone());

    while running.load(Ordering::SeqCst) {
        // Each refresh starts from a blank screen since the row count varies
        execute!(io::stdout(), Clear(ClearType::All), MoveTo(0, 0))?;

        println_clear!("{}{}╔═════════════════════════════════════════════════════╗{}", BOLD, CYAN, RESET);
        println_clear!("{}{}║         VALIDATOR READINESS DASHBOARD               ║{}", BOLD, CYAN, RESET);
        println_clear!("{}{}╚═════════════════════════════════════════════════════╝{}\n", BOLD, CYAN, RESET);

        match feed::fetch_report(client, &config.feed_url, &processor) {
            Ok(report) => {
                for line in render::render_report(&report) {
                    println_clear!("{}", line);
                }
            }
            Err(e) => {
                log::warn!("Refresh failed: {}", e);
                println_clear!("   {}⚠️  {}{}", RED, e, RESET);
            }
        }

        println_clear!();
        println_clear!("Last updated: {} UTC", Utc::now().format("%Y-%m-%d %H:%M:%S"));
        println_clear!("{}Press Ctrl+C to exit{}", YELLOW, RESET);

        io::stdout().flush()?;

        // Wait for the next refresh, but check running flag more frequently
        for _ in 0..config.refresh_interval_secs * 10 {
            if !running.load(Ordering::SeqCst) {
                break;
            }
            thread::sleep(Duration::from_millis(100));
        }
    }

    Ok(())
}
