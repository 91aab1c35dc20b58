use metrics_exporter_prometheus::PrometheusHandle;
use persona_match::experiment::{AppEvent, EventError, EventStore};
use persona_match::quiz::MAX_RESPONSE;
use persona_match::typology::{validate, TypologyCode};
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

#[derive(Default, Clone)]
pub(crate) struct InMemoryEventStore {
    events: Arc<Mutex<Vec<AppEvent>>>,
}

impl EventStore for InMemoryEventStore {
    fn record(&self, event: AppEvent) -> Result<(), EventError> {
        let mut guard = self.events.lock().expect("event store mutex poisoned");
        guard.push(event);
        Ok(())
    }

    fn all(&self) -> Result<Vec<AppEvent>, EventError> {
        let guard = self.events.lock().expect("event store mutex poisoned");
        Ok(guard.clone())
    }
}

/// Questionnaire answers given on the command line as `0,4,2,...`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct ResponseList(pub(crate) Vec<u8>);

pub(crate) fn parse_responses(raw: &str) -> Result<ResponseList, String> {
    raw.split(',')
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(|value| {
            let parsed = value
                .parse::<u8>()
                .map_err(|err| format!("failed to parse '{value}' as a response ({err})"))?;
            if parsed > MAX_RESPONSE {
                return Err(format!("response {parsed} is above {MAX_RESPONSE}"));
            }
            Ok(parsed)
        })
        .collect::<Result<Vec<_>, _>>()
        .map(ResponseList)
}

pub(crate) fn parse_typology(raw: &str) -> Result<TypologyCode, String> {
    validate(raw).map_err(|err| err.to_string())
}
