use chrono::{DateTime, TimeZone};
use crossterm::style::{Color, Stylize};

use crate::model::report::Report;

/// Inner width of the report box, between the vertical borders.
pub const PANEL_WIDTH: usize = 68;
const LABEL_WIDTH: usize = 28;
const RULE_WIDTH: usize = 70;

#[derive(Debug, Clone)]
pub struct PanelRenderer {
    title: String,
    color: bool,
}

impl PanelRenderer {
    pub fn new(display_name: &str, color: bool) -> Self {
        Self {
            title: format!(
                "{} STOCK REAL-TIME MONITORING SYSTEM",
                display_name.trim().to_uppercase()
            ),
            color,
        }
    }

    pub fn header(&self) -> String {
        let rule = "=".repeat(RULE_WIDTH);
        format!("\n{rule}\n{:^width$}\n{rule}\n", self.title, width = RULE_WIDTH)
    }

    pub fn report<Tz: TimeZone>(&self, report: &Report, at: &DateTime<Tz>) -> String
    where
        Tz::Offset: std::fmt::Display,
    {
        let (color, arrow) = if report.is_gain() {
            (Color::Green, "▲")
        } else {
            (Color::Red, "▼")
        };
        let change = format!(
            "${:>+10.2} ({:>+6.2}%) {}",
            report.change, report.change_pct, arrow
        );

        let lines = [
            format!("┌{}┐", "─".repeat(PANEL_WIDTH)),
            row(&format!(
                "Timestamp: {}",
                at.format("%Y-%m-%d %H:%M:%S")
            )),
            divider(),
            row(&format!("{:^66}", "CURRENT MARKET DATA")),
            divider(),
            price_row("Current Price:", report.current),
            price_row("5-Day Moving Average:", report.sma_fast),
            price_row("10-Day Moving Average:", report.sma_slow),
            divider(),
            row(&format!("{:^66}", "PREDICTION & ANALYSIS")),
            divider(),
            price_row("Predicted Next Price:", report.predicted),
            self.styled_row("Expected Change:", &change, color),
            row(&format!(
                "{:<LABEL_WIDTH$}{} {}",
                "Market Trend:",
                report.trend.label(),
                report.trend.glyph()
            )),
            format!("└{}┘", "─".repeat(PANEL_WIDTH)),
        ];
        let mut out = String::new();
        for line in lines {
            out.push_str(&line);
            out.push('\n');
        }
        out
    }

    fn styled_row(&self, label: &str, value: &str, color: Color) -> String {
        let used = LABEL_WIDTH + value.chars().count();
        let pad = " ".repeat((PANEL_WIDTH - 2).saturating_sub(used));
        let value = if self.color {
            value.with(color).to_string()
        } else {
            value.to_string()
        };
        format!("│ {:<LABEL_WIDTH$}{}{} │", label, value, pad)
    }
}

fn row(content: &str) -> String {
    let pad = " ".repeat((PANEL_WIDTH - 2).saturating_sub(content.chars().count()));
    format!("│ {}{} │", content, pad)
}

fn price_row(label: &str, price: f64) -> String {
    row(&format!("{:<LABEL_WIDTH$}${:>10.2}", label, price))
}

fn divider() -> String {
    format!("├{}┤", "─".repeat(PANEL_WIDTH))
}

pub fn status_line(message: &str) -> String {
    format!("[STATUS] {message}")
}

pub fn info_line(refresh_secs: u64) -> String {
    format!("\n[INFO] Next update in {refresh_secs} seconds... (Press Ctrl+C to stop)")
}

pub fn waiting_line<Tz: TimeZone>(at: &DateTime<Tz>) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!(
        "[WARNING] {} - Waiting for sufficient data...",
        at.format("%H:%M:%S")
    )
}

pub fn error_line<Tz: TimeZone>(at: &DateTime<Tz>, message: &str) -> String
where
    Tz::Offset: std::fmt::Display,
{
    format!("[ERROR] {} - {}", at.format("%H:%M:%S"), message)
}

pub fn goodbye_line() -> &'static str {
    "\n\n[SYSTEM] Monitor stopped by user. Goodbye!"
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 3, 1, 9, 30, 5).unwrap()
    }

    #[test]
    fn plain_rows_share_one_width() {
        let renderer = PanelRenderer::new("tesla", false);
        let report = Report::new("TSLA", 100.0, 101.0, 99.0, 105.0);
        let out = renderer.report(&report, &at());
        for line in out.lines().filter(|l| !l.contains("Market Trend")) {
            assert_eq!(line.chars().count(), PANEL_WIDTH + 2, "{line:?}");
        }
    }

    #[test]
    fn header_names_the_display_symbol() {
        let header = PanelRenderer::new("tesla", false).header();
        assert!(header.contains("TESLA STOCK REAL-TIME MONITORING SYSTEM"));
        assert!(header.contains(&"=".repeat(70)));
    }

    #[test]
    fn negative_change_points_down() {
        let renderer = PanelRenderer::new("TSLA", true);
        let report = Report::new("TSLA", 100.0, 101.0, 99.0, 95.0);
        let out = renderer.report(&report, &at());
        let line = out.lines().find(|l| l.contains("Expected Change")).unwrap();
        assert!(line.contains("▼"));
        assert!(line.contains("-5.00"));
    }

    fn change_row(current: f64, predicted: f64) -> String {
        let renderer = PanelRenderer::new("TSLA", false);
        let report = Report::new("TSLA", current, 101.0, 99.0, predicted);
        let out = renderer.report(&report, &at());
        out.lines()
            .find(|l| l.contains("Expected Change"))
            .unwrap()
            .to_string()
    }

    #[test]
    fn five_percent_gain_points_up() {
        let line = change_row(100.0, 105.0);
        assert!(line.contains("$     +5.00 ( +5.00%) ▲"), "{line}");
        assert_eq!(line.chars().count(), PANEL_WIDTH + 2);
    }

    #[test]
    fn flat_projection_counts_as_gain() {
        let line = change_row(100.0, 100.0);
        assert!(line.contains("$     +0.00 ( +0.00%) ▲"), "{line}");
    }

    #[test]
    fn status_lines_carry_timestamps() {
        assert_eq!(
            waiting_line(&at()),
            "[WARNING] 09:30:05 - Waiting for sufficient data..."
        );
        assert_eq!(error_line(&at(), "boom"), "[ERROR] 09:30:05 - boom");
    }
}
