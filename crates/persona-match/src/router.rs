//! JSON endpoints over the quiz, typology, matching and experiment engines.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::error::AppError;
use crate::experiment::{
    AppEvent, Bucket, CallToAction, EventKind, EventStore, ExperimentAssigner, FunnelMetrics,
    Palette,
};
use crate::matching::{Chemistry, CompatibilityProfile, MatchReport};
use crate::quiz::{
    estimate_percentage, score, DiagnosisQuestion, PersonalityLabel, QuestionnaireItem, ScoreBand,
    ScoreResult, DIAGNOSIS_QUESTIONS, QUESTIONNAIRE,
};
use crate::typology::{
    diagnose, validate, DiagnosisAnswer, Temperament, TypologyCode, TypologyError,
};

/// Router builder exposing the engine. Experiment routes record through `S`.
pub fn engine_router<S>(assigner: Arc<ExperimentAssigner<S>>) -> Router
where
    S: EventStore + 'static,
{
    Router::new()
        .route("/api/v1/questionnaire", get(questionnaire_handler))
        .route("/api/v1/diagnosis/questions", get(diagnosis_questions_handler))
        .route("/api/v1/quiz/score", post(score_handler))
        .route("/api/v1/quiz/estimate", post(estimate_handler))
        .route("/api/v1/typology/validate", post(validate_handler))
        .route("/api/v1/typology/diagnose", post(diagnose_handler))
        .route("/api/v1/compatibility", post(compatibility_handler))
        .route(
            "/api/v1/experiment/assignments/:user_id",
            get(assignment_handler::<S>),
        )
        .route("/api/v1/experiment/metrics", get(funnel_handler::<S>))
        .route("/api/v1/events", post(event_handler::<S>))
        .with_state(assigner)
}

/// Blank input means the user skipped the code.
fn optional_code(raw: Option<&str>) -> Result<Option<TypologyCode>, TypologyError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(None),
        Some(code) => validate(code).map(Some),
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct ScoreRequest {
    pub responses: Vec<u8>,
    #[serde(default)]
    pub typology: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ScoreView {
    #[serde(flatten)]
    pub result: ScoreResult,
    pub band: ScoreBand,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub chemistry: Option<Chemistry>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EstimateRequest {
    pub answers: Vec<bool>,
}

#[derive(Debug, Clone, Serialize)]
pub struct EstimateView {
    pub percentage: u8,
    pub label: PersonalityLabel,
    pub band: ScoreBand,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ValidateRequest {
    pub code: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct ValidationView {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code: Option<TypologyCode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperament: Option<Temperament>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reason: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct DiagnoseRequest {
    pub answers: Vec<DiagnosisAnswer>,
}

#[derive(Debug, Clone, Serialize)]
pub struct DiagnosisView {
    pub code: TypologyCode,
    pub temperament: Temperament,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProfileInput {
    pub percentage: u8,
    #[serde(default)]
    pub typology: Option<String>,
}

impl ProfileInput {
    fn into_profile(self) -> Result<CompatibilityProfile, AppError> {
        let code = optional_code(self.typology.as_deref())?;
        Ok(CompatibilityProfile::new(self.percentage, code)?)
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct CompatibilityRequest {
    #[serde(rename = "self")]
    pub own: ProfileInput,
    pub other: ProfileInput,
}

#[derive(Debug, Clone, Serialize)]
pub struct AssignmentView {
    pub user_id: String,
    pub bucket: Bucket,
    pub palette: Palette,
    pub cta_order: [CallToAction; 3],
}

#[derive(Debug, Clone, Serialize)]
pub struct FunnelView {
    pub total_events: usize,
    #[serde(flatten)]
    pub metrics: FunnelMetrics,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EventRequest {
    pub kind: EventKind,
    #[serde(default)]
    pub data: BTreeMap<String, String>,
}

pub(crate) async fn questionnaire_handler() -> Json<&'static [QuestionnaireItem]> {
    Json(&QUESTIONNAIRE[..])
}

pub(crate) async fn diagnosis_questions_handler() -> Json<&'static [DiagnosisQuestion]> {
    Json(&DIAGNOSIS_QUESTIONS[..])
}

pub(crate) async fn score_handler(
    Json(request): Json<ScoreRequest>,
) -> Result<Json<ScoreView>, AppError> {
    let code = optional_code(request.typology.as_deref())?;
    let mut result = score(&request.responses);
    if let Some(code) = code {
        result = result.with_typology(code);
    }

    let band = ScoreBand::from_percentage(result.percentage);
    let chemistry = code.map(|code| Chemistry::from_label_and_code(result.label, code));
    info!(percentage = result.percentage, label = result.label.label(), "scored questionnaire");

    Ok(Json(ScoreView {
        result,
        band,
        chemistry,
    }))
}

pub(crate) async fn estimate_handler(Json(request): Json<EstimateRequest>) -> Json<EstimateView> {
    let percentage = estimate_percentage(&request.answers);
    Json(EstimateView {
        percentage,
        label: PersonalityLabel::from_percentage(percentage),
        band: ScoreBand::from_percentage(percentage),
    })
}

pub(crate) async fn validate_handler(Json(request): Json<ValidateRequest>) -> Json<ValidationView> {
    let view = match validate(&request.code) {
        Ok(code) => ValidationView {
            valid: true,
            code: Some(code),
            temperament: Some(code.temperament()),
            reason: None,
            message: None,
        },
        Err(err) => ValidationView {
            valid: false,
            code: None,
            temperament: None,
            reason: Some(err.reason()),
            message: Some(err.to_string()),
        },
    };
    Json(view)
}

pub(crate) async fn diagnose_handler(Json(request): Json<DiagnoseRequest>) -> Json<DiagnosisView> {
    let code = diagnose(&request.answers, &DIAGNOSIS_QUESTIONS);
    Json(DiagnosisView {
        code,
        temperament: code.temperament(),
    })
}

pub(crate) async fn compatibility_handler(
    Json(request): Json<CompatibilityRequest>,
) -> Result<Json<MatchReport>, AppError> {
    let own = request.own.into_profile()?;
    let other = request.other.into_profile()?;
    let report = MatchReport::build(&own, &other);
    info!(
        attraction = report.scores.attraction,
        stability = report.scores.stability,
        conflict = report.scores.conflict,
        "computed compatibility"
    );
    Ok(Json(report))
}

pub(crate) async fn assignment_handler<S>(
    State(assigner): State<Arc<ExperimentAssigner<S>>>,
    Path(user_id): Path<String>,
) -> Result<Json<AssignmentView>, AppError>
where
    S: EventStore + 'static,
{
    let assignment = assigner.enroll(&user_id)?;
    Ok(Json(AssignmentView {
        user_id,
        bucket: assignment.bucket,
        palette: assignment.palette,
        cta_order: assignment.cta_order(),
    }))
}

pub(crate) async fn funnel_handler<S>(
    State(assigner): State<Arc<ExperimentAssigner<S>>>,
) -> Result<Json<FunnelView>, AppError>
where
    S: EventStore + 'static,
{
    let events = assigner.store().all()?;
    let metrics = FunnelMetrics::from_events(events.iter().map(|event| &event.kind));
    Ok(Json(FunnelView {
        total_events: events.len(),
        metrics,
    }))
}

pub(crate) async fn event_handler<S>(
    State(assigner): State<Arc<ExperimentAssigner<S>>>,
    Json(request): Json<EventRequest>,
) -> Result<(StatusCode, Json<AppEvent>), AppError>
where
    S: EventStore + 'static,
{
    let mut event = AppEvent::new(request.kind);
    event.data = request.data;
    assigner.store().record(event.clone())?;
    Ok((StatusCode::ACCEPTED, Json(event)))
}
