//! Math solver: one fixed prompt, one generation call, canned apology on
//! failure.

use std::sync::Arc;

use tracing::{error, info};

use crate::llm::{Sampling, TextGenerator};

pub const PROMPT_PREFIX: &str = "Solve the following mathematical or scientific problem step-by-step. \
Provide the answer in Bengali if the question is in Bengali, otherwise use English. \
Format clearly with markdown. Problem: ";

pub const APOLOGY: &str = "দুঃখিত, আমি সমস্যাটি সমাধান করতে পারছি না। অনুগ্রহ করে আবার চেষ্টা করুন। \
(Sorry, I couldn't solve that. Please try again.)";

/// Prompt sent for `problem`, embedded as typed.
#[must_use]
pub fn build_prompt(problem: &str) -> String {
    format!("{PROMPT_PREFIX}{problem}")
}

pub struct MathSolver {
    generator: Arc<dyn TextGenerator>,
    sampling: Sampling,
}

impl MathSolver {
    #[must_use]
    pub fn new(generator: Arc<dyn TextGenerator>) -> Self {
        Self { generator, sampling: Sampling::default() }
    }

    #[must_use]
    pub fn sampling(&self) -> Sampling {
        self.sampling
    }

    /// Solve `problem`. Returns `None` without sending anything when the
    /// problem is blank. Generation failures are logged and answered with
    /// [`APOLOGY`]; no retry.
    pub async fn solve(&self, problem: &str) -> Option<String> {
        if problem.trim().is_empty() {
            return None;
        }
        match self.generator.generate(&build_prompt(problem), &self.sampling).await {
            Ok(answer) => {
                info!(chars = answer.chars().count(), "solver: answered");
                Some(answer)
            }
            Err(e) => {
                error!(error = %e, "solver: generation failed");
                Some(APOLOGY.to_string())
            }
        }
    }
}

#[cfg(test)]
#[path = "solver_test.rs"]
mod tests;
