//! Network metric commands

use icpulse::format::{format_bytes, format_value};
use icpulse::HandlerError;

use crate::AppState;

/// `network_status` - headline network metrics in one message.
///
/// All four legs are best-effort: any leg that fails renders as N/A so a
/// single flaky metric endpoint never blanks the whole status.
pub async fn network_status(state: &AppState) -> Result<String, HandlerError> {
    let (block_rate, nodes, burn, memory) = tokio::join!(
        state.dashboard.latest_metric("block-rate"),
        state.dashboard.latest_metric("ic-nodes-count"),
        state.dashboard.latest_metric("cycle-burn-rate"),
        state.dashboard.latest_metric("ic-memory-total"),
    );
    combine_status_legs(block_rate, nodes, burn, memory)
}

type Leg = Result<f64, HandlerError>;

/// Merge the fan-out legs into one message. When every leg failed the last
/// error is propagated unchanged, so a timeout still reads as a timeout and a
/// status still lands in its bucket.
fn combine_status_legs(
    block_rate: Leg,
    nodes: Leg,
    burn: Leg,
    memory: Leg,
) -> Result<String, HandlerError> {
    let memory = match (&block_rate, &nodes, &burn, memory) {
        (Err(_), Err(_), Err(_), Err(e)) => return Err(e),
        (_, _, _, memory) => memory,
    };
    Ok(build_network_status(
        block_rate.ok(),
        nodes.ok(),
        burn.ok(),
        memory.ok(),
    ))
}

/// `cycle_burn` - current cycle burn rate with a 24h trend and a daily
/// projection.
pub async fn cycle_burn(state: &AppState) -> Result<String, HandlerError> {
    let series = state.dashboard.metric_series("cycle-burn-rate").await?;
    let (_, rate) = *series
        .last()
        .ok_or_else(|| HandlerError::Parse("empty burn rate series".to_string()))?;
    Ok(build_cycle_burn(rate, day_ago_value(&series)))
}

/// The series value closest to 24 hours before the latest point.
fn day_ago_value(series: &[(i64, f64)]) -> Option<f64> {
    let (latest_ts, _) = *series.last()?;
    let target = latest_ts - 86_400;
    series
        .iter()
        .min_by_key(|(ts, _)| (ts - target).abs())
        .map(|(_, v)| *v)
}

fn fmt_leg(value: Option<f64>, f: impl Fn(f64) -> String) -> String {
    value.map(f).unwrap_or_else(|| "N/A".to_string())
}

pub fn build_network_status(
    block_rate: Option<f64>,
    nodes: Option<f64>,
    burn_rate: Option<f64>,
    memory_bytes: Option<f64>,
) -> String {
    format!(
        "\u{1F310} **Internet Computer Status**\n\n\
         Block rate: {} blocks/s\n\
         Nodes: {}\n\
         Cycle burn: {} cycles/s\n\
         State memory: {}",
        fmt_leg(block_rate, |v| format!("{v:.1}")),
        fmt_leg(nodes, |v| format!("{v:.0}")),
        fmt_leg(burn_rate, format_value),
        fmt_leg(memory_bytes, format_bytes),
    )
}

pub fn build_cycle_burn(rate: f64, day_ago: Option<f64>) -> String {
    let daily = rate * 86_400.0;
    let mut msg = format!(
        "\u{1F525} **Cycle Burn Rate**\n\n\
         Current: {} cycles/s\n\
         Projected daily burn: {} cycles",
        format_value(rate),
        format_value(daily),
    );
    if let Some(previous) = day_ago {
        if previous > 0.0 {
            let change = (rate - previous) / previous * 100.0;
            msg.push_str(&format!("\n24h trend: {change:+.1}%"));
        }
    }
    msg
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_renders_all_legs() {
        let msg = build_network_status(
            Some(42.5),
            Some(561.0),
            Some(95_000_000_000.0),
            Some(1024.0 * 1024.0 * 1024.0 * 3.0),
        );
        assert!(msg.contains("42.5 blocks/s"));
        assert!(msg.contains("Nodes: 561"));
        assert!(msg.contains("95.00B cycles/s"));
        assert!(msg.contains("3.0 GB"));
    }

    #[test]
    fn failed_legs_render_na() {
        let msg = build_network_status(Some(42.5), None, None, None);
        assert!(msg.contains("Nodes: N/A"));
        assert!(msg.contains("Cycle burn: N/A"));
    }

    #[test]
    fn all_failed_legs_keep_the_error_variant() {
        let result = combine_status_legs(
            Err(HandlerError::UpstreamStatus(404)),
            Err(HandlerError::UpstreamStatus(404)),
            Err(HandlerError::UpstreamStatus(404)),
            Err(HandlerError::UpstreamStatus(404)),
        );
        assert!(matches!(result, Err(HandlerError::UpstreamStatus(404))));

        let result = combine_status_legs(
            Err(HandlerError::Timeout),
            Err(HandlerError::Timeout),
            Err(HandlerError::Timeout),
            Err(HandlerError::Timeout),
        );
        assert!(matches!(result, Err(HandlerError::Timeout)));
    }

    #[test]
    fn one_good_leg_still_builds_a_message() {
        let result = combine_status_legs(
            Err(HandlerError::Timeout),
            Err(HandlerError::Timeout),
            Err(HandlerError::Timeout),
            Ok(1024.0),
        );
        let msg = result.unwrap();
        assert!(msg.contains("Block rate: N/A"));
        assert!(msg.contains("State memory: 1.0 KB"));
    }

    #[test]
    fn zero_memory_renders_na() {
        let msg = build_network_status(None, None, None, Some(0.0));
        assert!(msg.contains("State memory: N/A"));
    }

    #[test]
    fn burn_includes_daily_projection() {
        let msg = build_cycle_burn(1_000_000_000.0, None);
        assert!(msg.contains("1.00B cycles/s"));
        // 1e9 * 86400 = 8.64e13
        assert!(msg.contains("86.40T cycles"));
        assert!(!msg.contains("24h trend"));
    }

    #[test]
    fn burn_trend_is_relative_to_day_ago() {
        let msg = build_cycle_burn(110.0, Some(100.0));
        assert!(msg.contains("24h trend: +10.0%"));
    }

    #[test]
    fn day_ago_picks_nearest_point() {
        let series = vec![
            (0, 1.0),
            (80_000, 2.0),
            (90_000, 3.0),
            (172_800, 4.0),
        ];
        // latest ts 172_800, target 86_400; nearest is 90_000.
        assert_eq!(day_ago_value(&series), Some(3.0));
        assert_eq!(day_ago_value(&[]), None);
    }
}
