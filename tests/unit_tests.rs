// Unit tests for KIBI Match

use chrono::{DateTime, NaiveDate, Utc};
use kibi_match::core::{
    scoring::{BriefProfile, ObjectiveFitTable},
    transport::DEFAULT_MAX_TOKEN_BYTES,
    BriefTransport, RankingSelector, ScoringEngine,
};
use kibi_match::models::{
    Asset, AssetKind, AssetType, Brief, Contact, Geography, Objective, ScoredAsset, Timeline,
};
use kibi_match::services::{AssetCatalog, InMemoryCatalog};
use kibi_match::RecommendationError;

fn create_test_brief(objective: Objective, sports: &[&str], geo: &[(&str, Option<&str>)]) -> Brief {
    Brief {
        brand_name: "Rally Foods".to_string(),
        industry_category: "FMCG".to_string(),
        objective,
        primary_geography: geo
            .iter()
            .map(|(state, city)| Geography {
                state: state.to_string(),
                city: city.map(str::to_string),
            })
            .collect(),
        sport_preferences: sports.iter().map(|s| s.to_string()).collect(),
        target_audience: vec!["Working Professionals".to_string()],
        budget_range: "$100k-$300k".to_string(),
        timeline: Timeline {
            from: NaiveDate::from_ymd_opt(2026, 6, 1).unwrap(),
            to: NaiveDate::from_ymd_opt(2026, 8, 31),
        },
        deliverable_types: vec!["Brand Ambassadorship".to_string()],
        primary_contact: Contact {
            name: "Meera Iyer".to_string(),
            email: "meera@rally.example".to_string(),
            phone: "9988776655".to_string(),
        },
    }
}

fn all_assets(catalog: &InMemoryCatalog) -> Vec<&Asset> {
    catalog
        .athletes()
        .iter()
        .chain(catalog.leagues())
        .chain(catalog.venues())
        .collect()
}

#[test]
fn test_scores_bounded_and_deterministic() {
    let catalog = InMemoryCatalog::seeded();
    let engine = ScoringEngine::with_defaults();

    for objective in Objective::ALL {
        let brief = create_test_brief(
            objective,
            &["Football", "Fitness"],
            &[("Karnataka", Some("Bengaluru")), ("Rajasthan", None)],
        );

        for asset in all_assets(&catalog) {
            let first = engine.score(&brief, asset);
            let second = engine.score(&brief, asset);

            assert!((0.0..=100.0).contains(&first), "{} scored {}", asset.id, first);
            assert_eq!(first, second);
            // One decimal place
            assert!(((first * 10.0).round() - first * 10.0).abs() < 1e-9);
        }
    }
}

#[test]
fn test_disjoint_assets_capped_at_thirty() {
    let catalog = InMemoryCatalog::seeded();
    let engine = ScoringEngine::with_defaults();
    let fit = ObjectiveFitTable::default();
    // No seeded asset plays Basketball or sits in Goa
    let brief = create_test_brief(Objective::Awareness, &["Basketball"], &[("Goa", Some("Panaji"))]);

    for asset in all_assets(&catalog) {
        let featured = if asset.featured { 1.0 } else { 0.0 };
        let bound = 100.0 * (0.20 * fit.lookup(brief.objective, asset.asset_type()) + 0.10 * featured);
        let score = engine.score(&brief, asset);

        assert!(score <= bound + 1e-9, "{} scored {} above {}", asset.id, score, bound);
        assert!(score <= 30.0);
    }
}

#[test]
fn test_state_match_with_many_cities_stays_partial() {
    let engine = ScoringEngine::with_defaults();
    let brief = create_test_brief(
        Objective::Consideration,
        &["Cricket"],
        &[
            ("Delhi NCR", Some("Gurgaon")),
            ("Delhi NCR", Some("Noida")),
            ("Delhi NCR", None),
        ],
    );
    let asset = Asset {
        id: "l_x".to_string(),
        name: "Capital Cricket League".to_string(),
        city: Some("Delhi".to_string()),
        state: "Delhi NCR".to_string(),
        featured: false,
        image: String::new(),
        kind: AssetKind::League {
            sport: "Cricket".to_string(),
            season: "Q3 2026".to_string(),
        },
    };

    let breakdown = engine.breakdown(&BriefProfile::new(&brief), &asset);
    assert_eq!(breakdown.geo_match, 0.7);
    // 0.4 + 0.21 + 0.16
    assert_eq!(engine.score(&brief, &asset), 77.0);
}

#[test]
fn test_objective_fit_table_defaults() {
    let table = ObjectiveFitTable::default();

    assert_eq!(table.lookup(Objective::Awareness, AssetType::League), 1.0);
    assert_eq!(table.lookup(Objective::Conversions, AssetType::Venue), 0.5);
    assert_eq!(table.lookup(Objective::Footfall, AssetType::Venue), 1.0);
    assert_eq!(table.lookup(Objective::AppInstalls, AssetType::Venue), 0.4);
}

#[test]
fn test_selector_output_properties() {
    let catalog = InMemoryCatalog::seeded();
    let engine = ScoringEngine::with_defaults();
    let selector = RankingSelector::default();
    let brief = create_test_brief(Objective::Trials, &["Fitness"], &[("Maharashtra", Some("Pune"))]);

    let scored: Vec<ScoredAsset> = catalog
        .athletes()
        .iter()
        .map(|a| ScoredAsset {
            match_score: engine.score(&brief, a),
            asset: a.clone(),
        })
        .collect();

    let cap = 3;
    let shortlist = selector.select(scored, cap);

    assert!(shortlist.len() <= cap);
    assert!(shortlist.iter().all(|s| s.match_score > 10.0));
    assert!(shortlist.windows(2).all(|w| w[0].match_score >= w[1].match_score));
    assert_eq!(shortlist[0].asset.id, "ath_2");
}

#[test]
fn test_round_trip_preserves_scoring_fields() {
    let transport = BriefTransport::new(b"unit-secret", 900, DEFAULT_MAX_TOKEN_BYTES);
    let brief = create_test_brief(
        Objective::Conversions,
        &["Tennis", "Badminton"],
        &[("Delhi NCR", Some("Gurgaon")), ("Maharashtra", None)],
    );
    let now = DateTime::<Utc>::from_timestamp(1_790_000_000, 0).unwrap();

    let submission = transport.encode_at("brf_rt", &brief, now).unwrap();
    let decoded = transport.decode_at(Some(submission.token.as_str()), now).unwrap();

    assert_eq!(decoded.brief.objective, brief.objective);
    assert_eq!(decoded.brief.sport_preferences, brief.sport_preferences);
    assert_eq!(decoded.brief.primary_geography, brief.primary_geography);
    assert_eq!(decoded.brief.primary_contact.email, brief.primary_contact.email);
    assert_eq!(decoded.brief.timeline, brief.timeline);
}

#[test]
fn test_absent_token_never_defaults() {
    let transport = BriefTransport::new(b"unit-secret", 900, DEFAULT_MAX_TOKEN_BYTES);

    assert_eq!(transport.decode(None), Err(RecommendationError::TransportNotFound));
    assert_eq!(transport.decode(Some("")), Err(RecommendationError::TransportNotFound));
}

#[test]
fn test_tampered_token_is_corrupt() {
    let transport = BriefTransport::new(b"unit-secret", 900, DEFAULT_MAX_TOKEN_BYTES);
    let brief = create_test_brief(Objective::Awareness, &["Cricket"], &[("Delhi NCR", None)]);
    let token = transport.encode("brf_t", &brief).unwrap().token.into_string();

    // Swap the signature for a different one
    let (unsigned, _) = token.rsplit_once('.').unwrap();
    let tampered = format!("{}.AAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAA", unsigned);

    assert!(matches!(
        transport.decode(Some(&tampered)),
        Err(RecommendationError::TransportCorrupt(_))
    ));
}
