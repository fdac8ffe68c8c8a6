//! Score a JSON analysis payload offline.
//!
//! Reads the payload from the file named by the first argument, or from stdin
//! when there is none (or it is `-`). Prints the final JSON, a divider, then the
//! chat message. Input errors are printed as a JSON object.

use std::io::Read;

use dotenvy::dotenv;
use fxsignal::config::ScorerConfig;
use fxsignal::error::PayloadError;
use fxsignal::logging;
use fxsignal::payload::{divider, score_payload, SignalPayload};
use fxsignal::presentation::render_signal_message;
use fxsignal::signals::{DirectionalClassification, SignalScorer, VetoRules};
use serde_json::json;

fn read_input() -> std::io::Result<String> {
    match std::env::args().nth(1) {
        Some(path) if path != "-" => std::fs::read_to_string(path),
        _ => {
            let mut raw = String::new();
            std::io::stdin().read_to_string(&mut raw)?;
            Ok(raw)
        }
    }
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    dotenv().ok();
    logging::init_logging();

    let raw = read_input()?;
    let payload = match SignalPayload::parse(&raw) {
        Ok(payload) => payload,
        Err(PayloadError::MissingFields(fields)) => {
            println!("{}", json!({ "error": "missing_fields", "fields": fields }));
            return Ok(());
        }
        Err(e) => {
            println!("{}", json!({ "error": "invalid_payload", "detail": e.to_string() }));
            return Ok(());
        }
    };

    let scorer = SignalScorer::with_config(
        DirectionalClassification::standard(),
        VetoRules::standard(),
        ScorerConfig::from_env()?,
    );
    let (result, final_signal) = score_payload(&scorer, &payload);

    println!("{}", serde_json::to_string(&final_signal)?);
    println!("{}", divider());
    println!("{}", render_signal_message(&payload.price_context(), &result));
    Ok(())
}
