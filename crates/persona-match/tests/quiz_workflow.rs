//! End-to-end scoring and typology behaviour through the public crate API.

use std::collections::HashMap;

use persona_match::quiz::{score, PersonalityLabel, ScoreBand, DIAGNOSIS_QUESTIONS, QUESTIONNAIRE};
use persona_match::typology::{diagnose, validate, DiagnosisAnswer, TypologyCode, TIE_BREAKS};

/// Primary items come first in the questionnaire; Secondary items follow.
fn responses(primary: &[u8], secondary: &[u8]) -> Vec<u8> {
    assert_eq!(primary.len() + secondary.len(), QUESTIONNAIRE.len());
    primary.iter().chain(secondary).copied().collect()
}

#[test]
fn label_boundaries_on_the_full_questionnaire() {
    // 60 + 12 = 72 of 120 points.
    let mut secondary = vec![3u8; 12];
    secondary.extend([4, 4, 4]);
    let sixty = score(&responses(&[4; 15], &secondary));
    assert_eq!(sixty.percentage, 60);
    assert_eq!(sixty.label, PersonalityLabel::Primary);

    // 48 of 120 points.
    let mut primary = vec![4u8; 12];
    primary.extend([0, 0, 0]);
    let forty = score(&responses(&primary, &[4; 15]));
    assert_eq!(forty.percentage, 40);
    assert_eq!(forty.label, PersonalityLabel::Secondary);

    let fifty = score(&[2; 30]);
    assert_eq!(fifty.percentage, 50);
    assert_eq!(fifty.label, PersonalityLabel::Mixed);
    assert_eq!(ScoreBand::from_percentage(fifty.percentage), ScoreBand::Hybrid);
}

#[test]
fn percentage_stays_in_range_for_valid_responses() {
    for value in 0..=4u8 {
        for split in 0..=30usize {
            let mut answers = vec![value; split];
            answers.extend(vec![4 - value; 30 - split]);
            let result = score(&answers);
            assert!(result.percentage <= 100);
        }
    }
}

#[test]
fn scoring_is_idempotent() {
    let answers: Vec<u8> = (0..30).map(|index| (index * 7 % 5) as u8).collect();
    let first = score(&answers);
    let second = score(&answers);
    assert_eq!(first.percentage, second.percentage);
    assert_eq!(first.label, second.label);
    assert_eq!(first.raw_responses, answers);
}

#[test]
fn every_code_round_trips_through_the_validator() {
    for code in TypologyCode::ALL {
        let text = code.to_string();
        assert_eq!(validate(&text.to_lowercase()), Ok(code));
    }
    assert_eq!(validate("entp").map(|code| code.to_string()), Ok("ENTP".to_string()));
}

#[test]
fn validator_reasons_are_distinguishable() {
    let too_long = validate("ABCDE").expect_err("length five");
    let unknown = validate("ABCD").expect_err("unknown letters");
    assert_ne!(too_long.reason(), unknown.reason());
}

#[test]
fn evenly_split_diagnosis_resolves_to_tie_breaks() {
    // Four yes and four no per axis.
    let mut seen = HashMap::new();
    let answers: Vec<DiagnosisAnswer> = DIAGNOSIS_QUESTIONS
        .iter()
        .map(|question| {
            let count = seen.entry(question.letter).or_insert(0u32);
            *count += 1;
            DiagnosisAnswer::new(question.id, *count <= 4)
        })
        .collect();

    let code = diagnose(&answers, &DIAGNOSIS_QUESTIONS);
    assert_eq!(code.to_string(), "ISFP");
    assert_eq!(code.letters(), TIE_BREAKS);
}

#[test]
fn scored_result_carries_a_diagnosed_code() {
    let answers: Vec<DiagnosisAnswer> = DIAGNOSIS_QUESTIONS
        .iter()
        .map(|question| DiagnosisAnswer::new(question.id, true))
        .collect();
    let code = diagnose(&answers, &DIAGNOSIS_QUESTIONS);

    let result = score(&[3; 30]).with_typology(code);
    assert_eq!(result.typology.map(|code| code.to_string()).as_deref(), Some("ENTJ"));
}
