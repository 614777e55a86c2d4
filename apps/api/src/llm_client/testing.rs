//! Scripted in-memory backend for tests.

use std::collections::VecDeque;
use std::sync::Mutex;

use async_trait::async_trait;

use super::{BackendError, GenerationConfig, LlmBackend};

/// Replays scripted results in order; the last entry repeats once the script runs out.
pub struct ScriptedBackend {
    script: Mutex<VecDeque<Result<String, BackendError>>>,
    last: Mutex<Option<Result<String, BackendError>>>,
    prompts: Mutex<Vec<String>>,
}

impl ScriptedBackend {
    pub fn sequence(results: Vec<Result<String, BackendError>>) -> Self {
        Self {
            script: Mutex::new(results.into()),
            last: Mutex::new(None),
            prompts: Mutex::new(Vec::new()),
        }
    }

    pub fn always(result: Result<String, BackendError>) -> Self {
        Self::sequence(vec![result])
    }

    pub fn calls(&self) -> usize {
        self.prompts.lock().unwrap().len()
    }

    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }
}

#[async_trait]
impl LlmBackend for ScriptedBackend {
    async fn complete(
        &self,
        prompt: &str,
        _config: &GenerationConfig,
    ) -> Result<String, BackendError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        let next = self.script.lock().unwrap().pop_front();
        let mut last = self.last.lock().unwrap();
        match next {
            Some(result) => {
                *last = Some(result.clone());
                result
            }
            None => last
                .clone()
                .unwrap_or_else(|| Ok(String::from("scripted response"))),
        }
    }
}
