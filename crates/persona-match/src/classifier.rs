//! Handle around the external face-shape image classifier.
//!
//! The model is loaded at most once per handle. Callers construct the handle
//! with a [`ModelLoader`] and pass it to whatever needs predictions.

use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};
use tracing::info;

/// One class score returned by the classifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Prediction {
    pub class_name: String,
    pub probability: f32,
}

#[derive(Debug, thiserror::Error)]
pub enum ClassifierError {
    #[error("classifier model failed to load: {0}")]
    Load(String),
    #[error("classifier could not score image: {0}")]
    Prediction(String),
    #[error("classifier returned no predictions")]
    Empty,
    #[error("classifier handle lock poisoned")]
    Poisoned,
}

/// A loaded model able to score raw image bytes.
pub trait ImageClassifier: Send + Sync {
    fn predict(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifierError>;
}

/// Produces the classifier on first use.
pub trait ModelLoader: Send + Sync {
    type Model: ImageClassifier;

    fn load(&self) -> Result<Self::Model, ClassifierError>;
}

/// Face shape derived from the classifier's top class.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FaceType {
    Dog,
    Cat,
}

impl FaceType {
    /// Any class name mentioning "dog" maps to `Dog`; everything else is `Cat`.
    pub fn from_class_name(class_name: &str) -> Self {
        if class_name.to_lowercase().contains("dog") {
            FaceType::Dog
        } else {
            FaceType::Cat
        }
    }
}

pub struct ClassifierHandle<L: ModelLoader> {
    loader: L,
    model: Mutex<Option<Arc<L::Model>>>,
}

impl<L: ModelLoader> ClassifierHandle<L> {
    pub fn new(loader: L) -> Self {
        Self {
            loader,
            model: Mutex::new(None),
        }
    }

    /// Loads the model if it is not cached yet. Repeated calls return the same
    /// instance; a failed load leaves the handle empty so a later call can retry.
    pub fn initialize(&self) -> Result<Arc<L::Model>, ClassifierError> {
        let mut slot = self.model.lock().map_err(|_| ClassifierError::Poisoned)?;
        if let Some(model) = slot.as_ref() {
            return Ok(Arc::clone(model));
        }

        let model = Arc::new(self.loader.load()?);
        info!("image classifier loaded");
        *slot = Some(Arc::clone(&model));
        Ok(model)
    }

    pub fn is_loaded(&self) -> bool {
        self.model
            .lock()
            .map(|slot| slot.is_some())
            .unwrap_or(false)
    }

    /// All predictions, most probable first.
    pub fn predict(&self, image: &[u8]) -> Result<Vec<Prediction>, ClassifierError> {
        let model = self.initialize()?;
        let mut predictions = model.predict(image)?;
        predictions.sort_by(|a, b| b.probability.total_cmp(&a.probability));
        Ok(predictions)
    }

    pub fn top_prediction(&self, image: &[u8]) -> Result<Prediction, ClassifierError> {
        self.predict(image)?
            .into_iter()
            .next()
            .ok_or(ClassifierError::Empty)
    }

    pub fn face_type(&self, image: &[u8]) -> Result<(FaceType, f32), ClassifierError> {
        let top = self.top_prediction(image)?;
        Ok((FaceType::from_class_name(&top.class_name), top.probability))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct FixedModel(Vec<Prediction>);

    impl ImageClassifier for FixedModel {
        fn predict(&self, _image: &[u8]) -> Result<Vec<Prediction>, ClassifierError> {
            Ok(self.0.clone())
        }
    }

    #[derive(Default)]
    struct CountingLoader {
        loads: AtomicUsize,
        fail_first: bool,
    }

    impl ModelLoader for CountingLoader {
        type Model = FixedModel;

        fn load(&self) -> Result<FixedModel, ClassifierError> {
            let attempt = self.loads.fetch_add(1, Ordering::SeqCst);
            if self.fail_first && attempt == 0 {
                return Err(ClassifierError::Load("network unavailable".to_string()));
            }
            Ok(FixedModel(vec![
                Prediction {
                    class_name: "Cat face".to_string(),
                    probability: 0.3,
                },
                Prediction {
                    class_name: "Dog face".to_string(),
                    probability: 0.7,
                },
            ]))
        }
    }

    #[test]
    fn initialize_loads_once() {
        let handle = ClassifierHandle::new(CountingLoader::default());
        assert!(!handle.is_loaded());

        let first = handle.initialize().expect("loads");
        let second = handle.initialize().expect("cached");
        handle.top_prediction(&[]).expect("predicts");

        assert!(Arc::ptr_eq(&first, &second));
        assert_eq!(handle.loader.loads.load(Ordering::SeqCst), 1);
        assert!(handle.is_loaded());
    }

    #[test]
    fn failed_load_can_be_retried() {
        let handle = ClassifierHandle::new(CountingLoader {
            fail_first: true,
            ..CountingLoader::default()
        });

        assert!(matches!(handle.initialize(), Err(ClassifierError::Load(_))));
        assert!(handle.initialize().is_ok());
        assert_eq!(handle.loader.loads.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn top_prediction_maps_to_face_type() {
        let handle = ClassifierHandle::new(CountingLoader::default());
        let (face, confidence) = handle.face_type(&[1, 2, 3]).expect("classifies");
        assert_eq!(face, FaceType::Dog);
        assert_eq!(confidence, 0.7);
    }

    #[test]
    fn class_name_mapping_defaults_to_cat() {
        assert_eq!(FaceType::from_class_name("DOG"), FaceType::Dog);
        assert_eq!(FaceType::from_class_name("puppy-dog look"), FaceType::Dog);
        assert_eq!(FaceType::from_class_name("cat"), FaceType::Cat);
        assert_eq!(FaceType::from_class_name("unknown"), FaceType::Cat);
    }
}
