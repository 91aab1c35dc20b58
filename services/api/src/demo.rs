use crate::infra::{parse_responses, parse_typology, InMemoryEventStore, ResponseList};
use clap::Args;
use persona_match::error::AppError;
use persona_match::experiment::{
    AppEvent, EventKind, EventStore, ExperimentAssigner, FunnelMetrics,
};
use persona_match::matching::{Chemistry, CompatibilityProfile, MatchReport};
use persona_match::quiz::{
    estimate_percentage, score, Polarity, ScoreBand, ScoreResult, DIAGNOSIS_QUESTIONS,
    QUESTIONNAIRE,
};
use persona_match::typology::{diagnose, AxisLetter, DiagnosisAnswer, TypologyCode};
use std::sync::Arc;

#[derive(Args, Debug)]
pub(crate) struct ScoreArgs {
    /// Comma-separated responses (0-4), one per questionnaire item in order
    #[arg(long, value_parser = parse_responses)]
    pub(crate) responses: ResponseList,
    /// Optional four-letter typology code to attach to the result
    #[arg(long, value_parser = parse_typology)]
    pub(crate) typology: Option<TypologyCode>,
}

#[derive(Args, Debug)]
pub(crate) struct MatchArgs {
    /// Your questionnaire percentage (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) self_pct: u8,
    /// The other person's percentage (0-100)
    #[arg(long, value_parser = clap::value_parser!(u8).range(0..=100))]
    pub(crate) other_pct: u8,
    /// Your typology code
    #[arg(long, value_parser = parse_typology)]
    pub(crate) self_code: Option<TypologyCode>,
    /// The other person's typology code
    #[arg(long, value_parser = parse_typology)]
    pub(crate) other_code: Option<TypologyCode>,
}

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// User id used for experiment bucketing
    #[arg(long, default_value = "demo-user")]
    pub(crate) user_id: String,
}

pub(crate) fn run_score(args: ScoreArgs) -> Result<(), AppError> {
    let ScoreArgs {
        responses,
        typology,
    } = args;

    let mut result = score(&responses.0);
    if let Some(code) = typology {
        result = result.with_typology(code);
    }
    render_score(&result);
    Ok(())
}

pub(crate) fn run_match(args: MatchArgs) -> Result<(), AppError> {
    let own = CompatibilityProfile::new(args.self_pct, args.self_code)?;
    let other = CompatibilityProfile::new(args.other_pct, args.other_code)?;
    render_report(&MatchReport::build(&own, &other));
    Ok(())
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    println!("Persona matching demo");

    let result = score(&sample_responses()).with_typology(diagnose(
        &sample_diagnosis_answers(),
        &DIAGNOSIS_QUESTIONS,
    ));
    println!("\nYour questionnaire");
    render_score(&result);

    let partner_answers = sample_partner_answers();
    let partner_percentage = estimate_percentage(&partner_answers);
    println!(
        "\nPartner estimate from {} yes/no answers: {}% ({})",
        partner_answers.len(),
        partner_percentage,
        ScoreBand::from_percentage(partner_percentage).label()
    );

    let own = CompatibilityProfile::new(result.percentage, result.typology)?;
    let other = CompatibilityProfile::new(partner_percentage, None)?;
    println!();
    render_report(&MatchReport::build(&own, &other));

    let store = Arc::new(InMemoryEventStore::default());
    let assigner = ExperimentAssigner::new(store.clone());
    let assignment = assigner.enroll(&args.user_id)?;
    for kind in [
        EventKind::TestComplete,
        EventKind::ResultView,
        EventKind::ShareOpen,
        EventKind::ShareComplete,
    ] {
        store.record(AppEvent::new(kind).with("user_id", args.user_id.as_str()))?;
    }

    println!("\nExperiment assignment for {}", args.user_id);
    println!("  Bucket: {:?}", assignment.bucket);
    println!("  Palette: {:?}", assignment.palette);
    println!("  Call-to-action order: {:?}", assignment.cta_order());

    let events = store.all()?;
    let funnel = FunnelMetrics::from_events(events.iter().map(|event| &event.kind));
    println!("\nFunnel over {} events", events.len());
    println!("  Share rate: {:.2}", funnel.share_rate);
    println!("  Invite conversion: {:.2}", funnel.invite_conversion);
    println!("  Reward conversion: {:.2}", funnel.reward_conversion);
    println!("  Actions per event: {:.2}", funnel.actions_per_event);

    Ok(())
}

fn render_score(result: &ScoreResult) {
    println!(
        "Score: {}% ({}, {})",
        result.percentage,
        result.label.label(),
        ScoreBand::from_percentage(result.percentage).label()
    );
    if let Some(code) = result.typology {
        println!("Typology: {} ({})", code, code.temperament().label());
        println!(
            "Chemistry: {:?}",
            Chemistry::from_label_and_code(result.label, code)
        );
    }
    println!("Responses recorded: {}", result.raw_responses.len());
}

fn render_report(report: &MatchReport) {
    println!("Compatibility");
    println!("  Attraction: {}", report.scores.attraction);
    println!("  Stability: {}", report.scores.stability);
    println!("  Conflict: {}", report.scores.conflict);
    println!("  Pairing: {}", report.pairing.summary());
    if let Some(distance) = report.code_distance {
        println!("  Letters apart: {distance}");
    }
    for interpretation in &report.interpretations {
        println!(
            "  - {:?} ({:?}): {}",
            interpretation.metric, interpretation.tier, interpretation.headline
        );
    }
}

/// Leans Primary: strong agreement with Primary items, mild with Secondary.
fn sample_responses() -> Vec<u8> {
    QUESTIONNAIRE
        .iter()
        .enumerate()
        .map(|(index, item)| match item.polarity {
            Polarity::Primary => 3 + (index % 2) as u8,
            Polarity::Secondary => 1,
        })
        .collect()
}

/// Yes on Energy and Information items, no on Decision and Lifestyle: ENFP.
fn sample_diagnosis_answers() -> Vec<DiagnosisAnswer> {
    DIAGNOSIS_QUESTIONS
        .iter()
        .map(|question| {
            let is_yes = matches!(question.letter, AxisLetter::E | AxisLetter::N);
            DiagnosisAnswer::new(question.id, is_yes)
        })
        .collect()
}

fn sample_partner_answers() -> Vec<bool> {
    QUESTIONNAIRE
        .iter()
        .enumerate()
        .map(|(index, item)| match item.polarity {
            Polarity::Primary => index % 3 == 0,
            Polarity::Secondary => index % 2 == 0,
        })
        .collect()
}
