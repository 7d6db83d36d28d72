//! JSON, CSV and Markdown export.
//!
//! - **JSON**: the full `SimulationResult`, same shape as the HTTP response data
//! - **CSV**: the trade list (`date,type,price,ma1,ma2`)
//! - **Markdown**: a human-readable summary for the terminal

use std::path::Path;

use anyhow::{Context, Result};
use crosslab_core::domain::{Crossover, Trade};

use crate::result::SimulationResult;

// ─── JSON export ────────────────────────────────────────────────────

pub fn export_json(result: &SimulationResult) -> Result<String> {
    serde_json::to_string_pretty(result).context("failed to serialize SimulationResult to JSON")
}

pub fn import_json(json: &str) -> Result<SimulationResult> {
    serde_json::from_str(json).context("failed to deserialize SimulationResult from JSON")
}

/// Write the pretty JSON result to `path`, creating parent directories.
pub fn write_result_json(path: &Path, result: &SimulationResult) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, export_json(result)?)
        .with_context(|| format!("failed to write {}", path.display()))
}

// ─── CSV export ─────────────────────────────────────────────────────

/// Columns: date, type, price, ma1, ma2
pub fn trades_to_csv(trades: &[Trade]) -> Result<String> {
    let mut wtr = csv::Writer::from_writer(vec![]);
    wtr.write_record(["date", "type", "price", "ma1", "ma2"])?;

    for t in trades {
        wtr.write_record([
            &t.date.to_string(),
            kind_label(t.kind),
            &format!("{:.2}", t.price),
            &format!("{:.2}", t.ma_short_value),
            &format!("{:.2}", t.ma_long_value),
        ])?;
    }

    let data = wtr.into_inner().context("failed to flush CSV writer")?;
    String::from_utf8(data).context("CSV output is not valid UTF-8")
}

pub fn write_trades_csv(path: &Path, trades: &[Trade]) -> Result<()> {
    ensure_parent(path)?;
    std::fs::write(path, trades_to_csv(trades)?)
        .with_context(|| format!("failed to write {}", path.display()))
}

fn kind_label(kind: Crossover) -> &'static str {
    match kind {
        Crossover::Buy => "buy",
        Crossover::Sell => "sell",
    }
}

fn ensure_parent(path: &Path) -> Result<()> {
    match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => std::fs::create_dir_all(parent)
            .with_context(|| format!("failed to create {}", parent.display())),
        _ => Ok(()),
    }
}

// ─── Markdown summary ───────────────────────────────────────────────

pub fn generate_report(result: &SimulationResult) -> String {
    let m = &result.metrics;
    let mut md = String::new();

    md.push_str(&format!("# {} ({})\n\n", result.symbol, result.ma_windows));
    md.push_str(&format!("Period: {}\n\n", result.period));
    md.push_str(&format!("Bars: {}\n\n", result.chart_data.len()));

    md.push_str("## Performance Summary\n\n");
    md.push_str("| Metric | Value |\n");
    md.push_str("| --- | --- |\n");
    md.push_str(&format!("| Total Return | {:.2}% |\n", m.total_return));
    md.push_str(&format!("| Buy & Hold | {:.2}% |\n", m.buy_hold_return));
    md.push_str(&format!("| Sharpe | {:.2} |\n", m.sharpe_ratio));
    md.push_str(&format!("| Max Drawdown | {:.2}% |\n", m.max_drawdown));
    md.push_str(&format!("| Win Rate | {:.2}% |\n", m.win_rate));
    md.push_str(&format!(
        "| Trades | {} ({} buy / {} sell) |\n",
        m.total_trades,
        result.buy_count(),
        result.sell_count()
    ));

    if !result.trades.is_empty() {
        md.push_str("\n## Trades\n\n");
        md.push_str("| Date | Type | Price | MA short | MA long |\n");
        md.push_str("| --- | --- | ---: | ---: | ---: |\n");
        for t in &result.trades {
            md.push_str(&format!(
                "| {} | {} | {:.2} | {:.2} | {:.2} |\n",
                t.date,
                kind_label(t.kind).to_uppercase(),
                t.price,
                t.ma_short_value,
                t.ma_long_value
            ));
        }
    }

    md
}
