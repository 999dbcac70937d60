//! Integration with the generative-text service.
//!
//! Everything here is written against the narrow [`TextGenerator`] seam so
//! the generation and scoring pipelines can be exercised without network
//! access. No error from this module ever reaches a member-facing request:
//! course generation degrades to a static template and scoring to a fixed
//! default.

mod client;
pub use client::{GeminiClient, GenerationConfig, TextGenerator};

mod error;
pub use error::{AiError, AiResult};

mod course;
pub use course::{CourseOutline, LessonPlan, generate_course_content};

mod score;
pub use score::{DEFAULT_SCORE, evaluate_submission};

mod competition;
pub use competition::generate_competition_problem;

#[cfg(test)]
pub(crate) mod testing {
    use std::collections::VecDeque;
    use std::sync::Mutex;

    use async_trait::async_trait;

    use super::{AiError, AiResult, GenerationConfig, TextGenerator};

    /// Scripted generator: hands out queued replies and records every prompt
    /// it was asked.
    pub struct StubGenerator {
        replies: Mutex<VecDeque<AiResult<String>>>,
        prompts: Mutex<Vec<String>>,
    }

    impl StubGenerator {
        pub fn new(replies: Vec<AiResult<String>>) -> Self {
            Self {
                replies: Mutex::new(replies.into()),
                prompts: Mutex::new(Vec::new()),
            }
        }

        pub fn prompts(&self) -> Vec<String> {
            self.prompts.lock().unwrap().clone()
        }

        pub fn calls(&self) -> usize {
            self.prompts.lock().unwrap().len()
        }
    }

    #[async_trait]
    impl TextGenerator for StubGenerator {
        async fn generate(&self, prompt: &str, _config: &GenerationConfig) -> AiResult<String> {
            self.prompts.lock().unwrap().push(prompt.to_string());
            self.replies
                .lock()
                .unwrap()
                .pop_front()
                .unwrap_or(Err(AiError::EmptyReply))
        }
    }
}
