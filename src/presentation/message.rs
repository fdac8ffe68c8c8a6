use crate::models::{PriceContext, ScoreResult};
use crate::signals::risk_notes;

/// Telegram rejects messages above 4096 characters; stay under it.
pub const MAX_MESSAGE_CHARS: usize = 4000;

const MAX_LEVELS: usize = 3;

fn join_levels(levels: &[f64]) -> String {
    levels
        .iter()
        .take(MAX_LEVELS)
        .map(|l| l.to_string())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Render a score into the Markdown chat layout.
pub fn render_signal_message(ctx: &PriceContext, result: &ScoreResult) -> String {
    let notes = risk_notes(&result.vetoes);
    let mut lines = vec![
        format!("📊 *{}* ({})", ctx.symbol, ctx.timeframe),
        format!(
            "🕒 Signal Time (UTC): `{}`",
            ctx.built_at.format("%Y-%m-%dT%H:%M:%SZ")
        ),
        format!(
            "📈 Action: *{}*   |   Confidence: *{}*",
            result.action, result.confidence_band
        ),
        format!(
            "📊 Score: {}/{} + {}/{}",
            result.technical_score,
            result.technical_total,
            result.fundamental_score,
            result.fundamental_total
        ),
        format!(
            "🧠 Reason: {}",
            if result.reasons.is_empty() {
                "mixed".to_string()
            } else {
                result.reasons.join(", ")
            }
        ),
        format!(
            "⚠️ Risk: {}",
            if notes.is_empty() {
                "normal".to_string()
            } else {
                notes.join(", ")
            }
        ),
    ];

    if let Some(spread) = ctx.spread_pips {
        lines.push(format!("📉 Spread: {:.1} pips", spread));
    }
    if !ctx.support.is_empty() {
        lines.push(format!("Support: {}", join_levels(&ctx.support)));
    }
    if !ctx.resistance.is_empty() {
        lines.push(format!("Resistance: {}", join_levels(&ctx.resistance)));
    }
    if let Some(source) = ctx.source.as_deref().filter(|s| !s.is_empty()) {
        lines.push(format!("Source: {}", source));
    }

    truncate_chars(&lines.join("\n"), MAX_MESSAGE_CHARS)
}

/// Cut to at most `max` characters without splitting a code point.
pub fn truncate_chars(text: &str, max: usize) -> String {
    match text.char_indices().nth(max) {
        Some((idx, _)) => text[..idx].to_string(),
        None => text.to_string(),
    }
}
