use slipcheck::domain::odds;
use slipcheck::parsing::Classifier;
use slipcheck::weather::{RiskLevel, WeatherCategory};
use slipcheck::{Bet, Direction, Odds, SlipAnalyzer, SlipRequest, TeamResolver, WeatherModel, WeatherReading};

/// A plain moneyline slip resolves both teams and keeps the price.
#[test]
fn moneyline_slip() {
    let bet = slipcheck::classify("Yankees at Red Sox +150");
    let Bet::Moneyline { away, home, odds } = &bet else {
        panic!("expected moneyline, got {bet:?}");
    };
    assert_eq!(away.as_str(), "New York Yankees");
    assert_eq!(home.as_str(), "Boston Red Sox");
    assert_eq!(odds.american(), Some(150));
    let implied = odds.implied_probability().expect("known odds");
    assert!((implied - 0.40).abs() < 1e-9, "implied probability was {implied}");
}

/// A player prop is recognised ahead of any team-pair match.
#[test]
fn player_prop_slip() {
    let bet = slipcheck::classify("Aaron Judge Over 1.5 Hits -120");
    assert_eq!(
        bet,
        Bet::PlayerProp {
            player: "Aaron Judge".to_string(),
            direction: Direction::Over,
            threshold: 1.5,
            stat: "Hits".to_string(),
            odds: Odds::new(-120).expect("valid odds"),
        }
    );
    let implied = bet.pricing_odds().and_then(|o| o.implied_probability()).expect("priced");
    assert!((implied - 0.545).abs() < 0.001, "implied probability was {implied}");
}

/// Props plus a matchup become a parlay priced by the trailing token.
#[test]
fn same_game_parlay_slip() {
    let slip = "Ketel Marte 3+ Total Bases\nShohei Ohtani 2+ Hits\nArizona Diamondbacks at Colorado Rockies +450";
    let bet = slipcheck::classify(slip);
    let Bet::Parlay { legs, combined_odds } = &bet else {
        panic!("expected parlay, got {bet:?}");
    };
    assert!(legs.len() >= 2, "expected at least two legs, got {legs:?}");
    assert_eq!(*combined_odds, Odds::new(450));
    assert_eq!(bet.pricing_odds(), Odds::new(450));
}

/// OCR noise on the price and the spacing does not change the result.
#[test]
fn noisy_ocr_moneyline() {
    let bet = slipcheck::classify("  NYY\u{00A0}@ BOS \n\u{2022} \u{2212}135\u{200B} ");
    let Bet::Moneyline { away, home, odds } = &bet else {
        panic!("expected moneyline, got {bet:?}");
    };
    assert_eq!(away.as_str(), "New York Yankees");
    assert_eq!(home.as_str(), "Boston Red Sox");
    assert_eq!(odds.american(), Some(-135));
}

/// A short unsigned number is never a price; the field holds the sentinel.
#[test]
fn two_digit_token_is_not_odds() {
    assert!(!odds::validate("7"));
    assert!(!odds::validate("+7"));
    assert!(!odds::validate("-99"));
    assert!(odds::validate("+100"));

    let bet = slipcheck::classify("Yankees at Red Sox 7");
    let Bet::Moneyline { odds, .. } = bet else {
        panic!("expected moneyline with unknown odds");
    };
    assert_eq!(odds, Odds::UNKNOWN);
    assert_eq!(odds.to_string(), "N/A");
}

/// Two matchups in one slip are never read as a single moneyline.
#[test]
fn two_matchups_never_moneyline() {
    let slips = [
        "Yankees at Red Sox +150 Mets at Braves -120",
        "NYY @ BOS - Yankees ML (-150) NYM @ ATL - Mets ML (+110)",
        "Dodgers vs Giants -140\nCubs vs Cardinals +105",
    ];
    for slip in slips {
        let bet = slipcheck::classify(slip);
        assert_ne!(bet.kind(), "moneyline", "{slip:?} classified as {bet:?}");
    }
}

/// The cascade order is explicit data on the classifier.
#[test]
fn precedence_is_exposed() {
    let classifier = Classifier::default();
    assert_eq!(
        classifier.precedence(),
        vec!["multi_leg", "player_prop", "moneyline", "total"]
    );
}

/// Resolution is case-insensitive and idempotent on the seeded table.
#[test]
fn seeded_aliases_resolve() {
    let resolver = TeamResolver::seeded();
    let a = resolver.resolve("NYY");
    let b = resolver.resolve("Yankees");
    assert_eq!(a, b);
    assert_eq!(a.as_str(), "New York Yankees");
    assert_eq!(resolver.resolve(a.as_str()), a);
}

/// Hot, windy, humid, low-pressure day at altitude strongly favours hitters.
#[test]
fn coors_field_heat() {
    let reading = WeatherReading {
        temperature_f: Some(90.0),
        wind_speed_mph: Some(20.0),
        humidity_pct: Some(70.0),
        pressure_hpa: Some(1005.0),
        conditions: None,
    };
    let impact = WeatherModel::default().assess(&reading, Some("Coors Field"));
    assert!(impact.overall_factor > 1.05, "overall {}", impact.overall_factor);
    assert_eq!(impact.category, WeatherCategory::HeavyHitterFavor);
    assert_eq!(impact.risk_level, RiskLevel::High);
}

/// No readings at all is exactly neutral.
#[test]
fn empty_weather_is_neutral() {
    let impact = WeatherModel::default().assess(&WeatherReading::default(), None);
    assert_eq!(impact.overall_factor, 1.0);
    assert_eq!(impact.category, WeatherCategory::Neutral);
}

/// Full pipeline serialises to JSON with the tagged bet variant.
#[test]
fn analyze_report_serializes() {
    let analyzer = SlipAnalyzer::default();
    let report = analyzer
        .analyze(&SlipRequest::new("Aaron Judge Over 1.5 Hits -120").with_true_probability(0.60))
        .expect("probability in range");

    let json = serde_json::to_value(&report).expect("report serializes");
    assert_eq!(json["bet"]["kind"], "player_prop");
    assert_eq!(json["bet"]["odds"], -120);
    assert_eq!(json["edge"]["recommendation"], "bet");
    assert!(json["stake"].is_string(), "stake should serialise as a decimal string: {json}");
}
