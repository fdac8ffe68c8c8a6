//! Unit tests for the economic calendar window

use chrono::{Duration, TimeZone, Utc};
use fxsignal::fundamentals::calendar::next_red_event;
use fxsignal::fundamentals::{country_currency, impact_of, pair_currencies, EconomicEvent, Impact};

#[test]
fn test_impact_keywords() {
    assert_eq!(impact_of("Core CPI MoM"), Impact::High);
    assert_eq!(impact_of("Nonfarm Payrolls"), Impact::High);
    assert_eq!(impact_of("BoE Interest Rate Decision"), Impact::High);
    assert_eq!(impact_of("GDP Growth Rate QoQ"), Impact::High);
    assert_eq!(impact_of("Manufacturing PMI"), Impact::Medium);
    assert_eq!(impact_of("FOMC Minutes"), Impact::Medium);
    assert_eq!(impact_of("Housing Starts"), Impact::Low);
}

#[test]
fn test_currencies() {
    assert_eq!(country_currency("us"), Some("USD"));
    assert_eq!(country_currency("DE"), Some("EUR"));
    assert_eq!(country_currency("UK"), Some("GBP"));
    assert_eq!(country_currency("BR"), None);

    assert_eq!(pair_currencies("eur/usd"), vec!["EUR", "USD"]);
    assert_eq!(pair_currencies("XAUUSD"), vec!["XAU", "USD"]);
    assert!(pair_currencies("SPX").is_empty());
}

#[test]
fn test_red_event_window() {
    let now = Utc.with_ymd_and_hms(2024, 3, 8, 10, 0, 0).unwrap();
    let at = |h, m| Utc.with_ymd_and_hms(2024, 3, 8, h, m, 0).unwrap();
    let pair = pair_currencies("GBPJPY");
    let window = Duration::minutes(60);

    let events = vec![
        EconomicEvent::new(at(10, 30), "US", "CPI YoY"),
        EconomicEvent::new(at(10, 30), "GB", "Services PMI"),
        EconomicEvent::new(at(11, 30), "JP", "GDP Growth Rate"),
    ];
    assert!(next_red_event(&events, &pair, now, window).is_none());

    let events = vec![EconomicEvent::new(at(9, 0), "JP", "BoJ Interest Rate Decision")];
    let hit = next_red_event(&events, &pair, now, window).expect("event inside window");
    assert_eq!(hit.country, "JP");

    let events = vec![EconomicEvent::new(at(8, 59), "JP", "BoJ Interest Rate Decision")];
    assert!(next_red_event(&events, &pair, now, window).is_none());
}
