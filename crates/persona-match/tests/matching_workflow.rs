//! Compatibility scenarios and range guarantees through the public crate API.

use persona_match::matching::{
    compatibility, compatibility_from_parts, CompatibilityProfile, MatchReport, Metric,
    PairingKind,
};
use persona_match::typology::{validate, TypologyCode};

fn code(raw: &str) -> Option<TypologyCode> {
    Some(validate(raw).expect("valid code"))
}

#[test]
fn opposite_scores_attract() {
    let result = compatibility_from_parts(90, 10, code("ENTJ"), code("ISFP"));
    assert!(result.attraction > 80);
    assert_eq!(result.attraction, 97);
}

#[test]
fn shared_axes_stabilise() {
    let result = compatibility_from_parts(70, 60, code("ESTJ"), code("ISTJ"));
    assert!(result.stability > 80);
    assert_eq!(result.stability, 90);
}

#[test]
fn lifestyle_clash_raises_conflict() {
    let result = compatibility_from_parts(80, 80, code("ESTJ"), code("ENTP"));
    assert!(result.conflict > 60);
    assert_eq!(result.conflict, 75);
}

#[test]
fn metrics_stay_in_range_across_all_code_pairs() {
    let percentages = [0u8, 29, 40, 50, 60, 71, 100];
    for own_code in TypologyCode::ALL {
        for other_code in TypologyCode::ALL {
            for own_pct in percentages {
                for other_pct in percentages {
                    let own = CompatibilityProfile::new(own_pct, Some(own_code)).expect("valid");
                    let other =
                        CompatibilityProfile::new(other_pct, Some(other_code)).expect("valid");
                    let result = compatibility(&own, &other);
                    assert!(result.attraction <= 100);
                    assert!(result.stability <= 100);
                    assert!(result.conflict <= 100);
                }
            }
        }
    }
}

#[test]
fn report_bundles_scores_with_content_keys() {
    let own = CompatibilityProfile::new(90, code("ENTJ")).expect("valid");
    let other = CompatibilityProfile::new(10, code("ISFP")).expect("valid");

    let report = MatchReport::build(&own, &other);

    assert_eq!(report.scores, compatibility(&own, &other));
    assert_eq!(report.pairing, PairingKind::Opposites);
    assert_eq!(report.code_distance, Some(4));
    let attraction = report
        .interpretation(Metric::Attraction)
        .expect("attraction interpreted");
    assert_eq!(attraction.score, 97);
}

#[test]
fn percentage_only_profiles_still_match() {
    let own = CompatibilityProfile::new(50, None).expect("valid");
    let other = CompatibilityProfile::new(55, None).expect("valid");

    let report = MatchReport::build(&own, &other);

    assert_eq!(report.pairing, PairingKind::BothMixed);
    assert!(report.code_distance.is_none());
    assert_eq!(report.scores.stability, 80);
}
