//! Turns a report into dashboard lines

use chrono::{DateTime, Local, Utc};
use readiness_consensus::{ReadyCell, RecencyBand, Report, ValidatorView};

// ANSI color codes
pub const GREEN: &str = "\x1b[32m";
pub const ORANGE: &str = "\x1b[38;5;208m";
pub const RED: &str = "\x1b[31m";
pub const GREY: &str = "\x1b[90m";
pub const CYAN: &str = "\x1b[36m";
pub const YELLOW: &str = "\x1b[33m";
pub const RESET: &str = "\x1b[0m";
pub const BOLD: &str = "\x1b[1m";

/// Smallest units per display unit
const UNITS_PER_COIN: f64 = 1e5;
const CELL_WIDTH: usize = 21;
const ADDRESS_WIDTH: usize = 24;
const POPULAR_HASH_CHARS: usize = 50;

/// `NQ07 AAAA ... FFFF` becomes `NQ07...FFFF`
pub fn shorten_address(address: &str) -> String {
    let parts: Vec<&str> = address.split(' ').collect();
    match (parts.first(), parts.last()) {
        (Some(first), Some(last)) if parts.len() > 1 => format!("{}...{}", first, last),
        _ => address.to_string(),
    }
}

/// Rounded display amount with `'` as thousands separator
pub fn format_coins(amount: u64) -> String {
    let rounded = (amount as f64 / UNITS_PER_COIN).round() as u64;
    let digits = rounded.to_string();

    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push('\'');
        }
        out.push(c);
    }
    out
}

/// `a3f1...8f90` style abbreviation of a candidate hash
pub fn abbreviate_hash(hash: &str) -> String {
    match (hash.get(..4), hash.get(hash.len().saturating_sub(4)..)) {
        (Some(head), Some(tail)) if hash.len() > 8 => format!("{}...{}", head, tail),
        _ => hash.to_string(),
    }
}

pub fn format_ago(now: DateTime<Utc>, heartbeat_millis: i64) -> String {
    let minutes = now.timestamp_millis().saturating_sub(heartbeat_millis).max(0) / 60_000;
    match minutes {
        0 => "just now".to_string(),
        1 => "1 minute ago".to_string(),
        m if m < 60 => format!("{} minutes ago", m),
        m if m < 120 => "1 hour ago".to_string(),
        m if m < 60 * 24 => format!("{} hours ago", m / 60),
        m if m < 60 * 48 => "1 day ago".to_string(),
        m => format!("{} days ago", m / (60 * 24)),
    }
}

pub fn band_color(band: RecencyBand) -> &'static str {
    match band {
        RecencyBand::Fresh => GREEN,
        RecencyBand::Stale => ORANGE,
        RecencyBand::LikelyDown | RecencyBand::Offline => RED,
    }
}

fn pad(text: &str, width: usize) -> String {
    format!("{:<width$}", text, width = width)
}

fn online_line(view: &ValidatorView, now: DateTime<Utc>) -> String {
    let mut line = format!(
        "   {} with a stake of {} NIM ({:.2}%) ",
        shorten_address(&view.address),
        format_coins(view.total_stake),
        view.stake_portion
    );

    match view.online.last_heartbeat_millis {
        Some(hb) if view.online.is_online => {
            let local = DateTime::from_timestamp_millis(hb)
                .map(|t| t.with_timezone(&Local).format("%Y-%m-%d %H:%M:%S").to_string())
                .unwrap_or_default();
            line.push_str(&format!(
                "was {}{}online {}{} {}",
                BOLD,
                band_color(view.recency),
                format_ago(now, hb),
                RESET,
                local
            ));
        }
        _ => line.push_str(&format!("is {}{}offline{}", BOLD, RED, RESET)),
    }
    line
}

fn ready_cell_text(cell: ReadyCell<'_>) -> String {
    match cell {
        ReadyCell::NotReady => format!("{}{}{}", GREY, pad("Not ready", CELL_WIDTH), RESET),
        ReadyCell::Leading(vote) => format!(
            "{}{}{}",
            GREEN,
            pad(&abbreviate_hash(&vote.candidate_value), CELL_WIDTH),
            RESET
        ),
        ReadyCell::Dissenting(vote) => format!(
            "{}{}{}",
            RED,
            pad(&abbreviate_hash(&vote.candidate_value), CELL_WIDTH),
            RESET
        ),
    }
}

/// All dashboard lines for one report
pub fn render_report(report: &Report) -> Vec<String> {
    let now = DateTime::from_timestamp_millis(report.generated_at_millis).unwrap_or_else(Utc::now);
    let mut lines = Vec::new();

    lines.push(format!("   Consensus: {}", report.consensus));
    lines.push(format!("   Total stake: {} NIM", format_coins(report.total_stake)));
    lines.push(String::new());

    // Once readiness votes come in, the online list is no longer shown
    if !report.has_votes() {
        lines.push(format!("{}🟢 Validators online:{}", BOLD, RESET));
        for view in &report.validators {
            lines.push(online_line(view, now));
        }
        lines.push(format!(
            "   Online stake (fresh heartbeat): {:.2}%",
            report.online_percentage
        ));
        lines.push(String::new());
    }

    lines.push(format!("{}🗳️  Validators ready:{}", BOLD, RESET));
    let mut header = format!("   {}", pad("Validator", ADDRESS_WIDTH));
    for ranking in &report.windows {
        let label = format!("#{} - #{}", ranking.window.start, ranking.window.end);
        header.push_str(&pad(&label, CELL_WIDTH));
    }
    lines.push(header);

    for (vi, view) in report.validators.iter().enumerate() {
        let label = format!("{} ({:.2}%)", shorten_address(&view.address), view.stake_portion);
        let mut row = format!("   {}", pad(&label, ADDRESS_WIDTH));
        for wi in 0..report.windows.len() {
            row.push_str(&ready_cell_text(report.ready_cell(vi, wi)));
        }
        lines.push(row);
    }
    lines.push(String::new());

    lines.push(format!("{}📈 Candidate popularity:{}", BOLD, RESET));
    match report.latest_active_window() {
        Some(ranking) => {
            lines.push(format!(
                "   Window #{} - #{}",
                ranking.window.start, ranking.window.end
            ));
            for candidate in &ranking.candidates {
                let shown: String = candidate.candidate_value.chars().take(POPULAR_HASH_CHARS).collect();
                lines.push(format!(
                    "   {}... with {:.2}%",
                    shown, candidate.accumulated_portion
                ));
            }
        }
        None => lines.push(format!("   {}No readiness votes yet{}", GREY, RESET)),
    }
    lines.push(format!("   Ready stake: {:.2}%", report.ready_percentage()));

    lines
}

#[cfg(test)]
mod tests {
    use super::*;
    use readiness_consensus::SnapshotProcessor;
    use readiness_core::config::DEFAULT_BURN_ADDRESS;
    use readiness_core::{MonitorConfig, Snapshot, Transaction, Validator, Window};

    #[test]
    fn test_shorten_address() {
        assert_eq!(shorten_address("NQ07 AAAA BBBB CCCC"), "NQ07...CCCC");
        assert_eq!(shorten_address("single"), "single");
    }

    #[test]
    fn test_format_coins() {
        assert_eq!(format_coins(0), "0");
        assert_eq!(format_coins(12_345_678), "123");
        assert_eq!(format_coins(123_456_789_000), "1'234'568");
        assert_eq!(format_coins(100_000_000_000_000), "1'000'000'000");
    }

    #[test]
    fn test_abbreviate_hash() {
        let hash = format!("abcd{}wxyz", "0".repeat(56));
        assert_eq!(abbreviate_hash(&hash), "abcd...wxyz");
        assert_eq!(abbreviate_hash("short"), "short");
    }

    #[test]
    fn test_format_ago() {
        let now = DateTime::from_timestamp(1_000_000, 0).unwrap();
        let ago = |secs: i64| format_ago(now, (1_000_000 - secs) * 1000);
        assert_eq!(ago(10), "just now");
        assert_eq!(ago(60), "1 minute ago");
        assert_eq!(ago(600), "10 minutes ago");
        assert_eq!(ago(3_600), "1 hour ago");
        assert_eq!(ago(5 * 3_600), "5 hours ago");
        assert_eq!(ago(30 * 3_600), "1 day ago");
        assert_eq!(ago(72 * 3_600), "3 days ago");
        assert_eq!(ago(-600), "just now");
        assert_eq!(format_ago(now, i64::MIN), "106751991167 days ago");
    }

    #[test]
    fn test_band_colors() {
        assert_eq!(band_color(RecencyBand::Fresh), GREEN);
        assert_eq!(band_color(RecencyBand::Stale), ORANGE);
        assert_eq!(band_color(RecencyBand::LikelyDown), RED);
        assert_eq!(band_color(RecencyBand::Offline), RED);
    }

    fn report(with_votes: bool) -> Report {
        report_with_heartbeat_at(1_760_000_000 - 60, with_votes)
    }

    fn report_with_heartbeat_at(heartbeat_secs: i64, with_votes: bool) -> Report {
        let now = DateTime::from_timestamp(1_760_000_000, 0).unwrap();
        let candidate = "ab".repeat(32);
        let mut txs = vec![Transaction::new(
            "hb",
            DEFAULT_BURN_ADDRESS,
            150,
            heartbeat_secs,
            1,
            Some("6f6e6c696e65".to_string()),
        )];
        if with_votes {
            txs.push(Transaction::new("v", DEFAULT_BURN_ADDRESS, 150, 0, 1, Some(candidate)));
        }

        let config = MonitorConfig {
            online_floor_block_height: 100,
            windows: vec![Window::new(100, 200), Window::new(200, 300)],
            ..MonitorConfig::default()
        };
        let snapshot = Snapshot::new(
            "established",
            vec![
                Validator::new("NQ07 AAAA BBBB", 250_000_000, 0, 60.0, txs),
                Validator::new("NQ08 CCCC DDDD", 100_000_000, 0, 40.0, vec![]),
            ],
        );
        SnapshotProcessor::new(config).process(&snapshot, now)
    }

    #[test]
    fn test_render_online_section_before_votes() {
        let lines = render_report(&report(false)).join("\n");
        assert!(lines.contains("Total stake: 3'500 NIM"));
        assert!(lines.contains("NQ07...BBBB with a stake of 2'500 NIM (60.00%)"));
        assert!(lines.contains("online 1 minute ago"));
        assert!(lines.contains("offline"));
        assert!(lines.contains("Online stake (fresh heartbeat): 60.00%"));
        assert!(lines.contains("No readiness votes yet"));
        assert!(lines.contains("Ready stake: 0.00%"));
    }

    #[test]
    fn test_render_hides_online_section_once_voting() {
        let lines = render_report(&report(true)).join("\n");
        assert!(!lines.contains("Validators online"));
        assert!(lines.contains("#100 - #200"));
        assert!(lines.contains(&format!("{}abab...abab", GREEN)));
        assert!(lines.contains("Not ready"));
        assert!(lines.contains("Window #100 - #200"));
        assert!(lines.contains("Ready stake: 60.00%"));
    }

    #[test]
    fn test_render_heartbeat_outside_calendar_range() {
        let lines = render_report(&report_with_heartbeat_at(-9_300_000_000_000_000, false)).join("\n");
        assert!(lines.contains(&format!("{}{}online 106751991167 days ago", BOLD, RED)));
        assert!(lines.contains("Online stake (fresh heartbeat): 0.00%"));
    }
}
