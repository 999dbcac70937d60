use tracing::warn;

use super::client::{GenerationConfig, TextGenerator};
use super::error::AiResult;

/// Score written when the service is unconfigured, unreachable or returns
/// something that is not a number.
pub const DEFAULT_SCORE: i32 = 75;

/// Scores a competition solution on a 0-100 scale. Total function: every
/// failure mode ends in [`DEFAULT_SCORE`], and an out-of-range reply is
/// clamped rather than trusted.
pub async fn evaluate_submission(
    generator: Option<&dyn TextGenerator>,
    problem_statement: &str,
    solution: &str,
) -> i32 {
    let Some(generator) = generator else {
        return DEFAULT_SCORE;
    };

    match request_score(generator, problem_statement, solution).await {
        Ok(score) => score.clamp(0, 100),
        Err(e) => {
            warn!("AI evaluation error: {e}, using default score");
            DEFAULT_SCORE
        }
    }
}

async fn request_score(
    generator: &dyn TextGenerator,
    problem_statement: &str,
    solution: &str,
) -> AiResult<i32> {
    let prompt = scoring_prompt(problem_statement, solution);
    let reply = generator.generate(&prompt, &GenerationConfig::default()).await?;
    let score = reply.trim().parse::<i32>()?;
    Ok(score)
}

fn scoring_prompt(problem_statement: &str, solution: &str) -> String {
    format!(
        r#"As an actuarial science professor, evaluate this student's solution to the following problem:

PROBLEM:
{problem_statement}

STUDENT'S SOLUTION:
{solution}

Please evaluate the solution on a scale of 0-100 based on:
1. Mathematical accuracy (40%)
2. Logical reasoning (30%)
3. Completeness (20%)
4. Clarity and presentation (10%)

Return only the numerical score without any explanation."#
    )
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ai::AiError;
    use crate::ai::testing::StubGenerator;

    #[tokio::test]
    async fn no_generator_returns_default_without_calls() {
        let score = evaluate_submission(None, "problem", "solution").await;
        assert_eq!(score, DEFAULT_SCORE);
    }

    #[tokio::test]
    async fn parses_and_clamps_scores() {
        for (reply, expected) in [("88", 88), (" 42 ", 42), ("150", 100), ("-20", 0), ("0", 0), ("100", 100)] {
            let stub = StubGenerator::new(vec![Ok(reply.to_string())]);
            let score = evaluate_submission(Some(&stub), "problem", "solution").await;
            assert_eq!(score, expected, "reply {reply:?}");
        }
    }

    #[tokio::test]
    async fn non_numeric_reply_defaults() {
        let stub = StubGenerator::new(vec![Ok("A solid effort, I'd say 80.".to_string())]);
        let score = evaluate_submission(Some(&stub), "problem", "solution").await;
        assert_eq!(score, DEFAULT_SCORE);
    }

    #[tokio::test]
    async fn transport_error_defaults() {
        let stub = StubGenerator::new(vec![Err(AiError::EmptyReply)]);
        let score = evaluate_submission(Some(&stub), "problem", "solution").await;
        assert_eq!(score, DEFAULT_SCORE);
    }

    #[tokio::test]
    async fn prompt_embeds_problem_and_solution() {
        let stub = StubGenerator::new(vec![Ok("90".to_string())]);
        let _ = evaluate_submission(Some(&stub), "price this annuity", "PV = 123.45").await;

        let prompts = stub.prompts();
        assert_eq!(prompts.len(), 1);
        assert!(prompts[0].contains("price this annuity"));
        assert!(prompts[0].contains("PV = 123.45"));
        assert!(prompts[0].contains("Mathematical accuracy (40%)"));
    }
}
