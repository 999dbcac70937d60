use super::client::{GenerationConfig, TextGenerator};
use super::error::AiResult;

const COMPETITION_PROMPT: &str = "\
Create an interesting and challenging actuarial science competition problem for university students.
The problem should:
1. Be related to practical actuarial applications
2. Require mathematical and statistical reasoning
3. Be solvable within 2-3 hours
4. Include clear evaluation criteria
5. Be appropriate for undergraduate actuarial students

Provide the problem statement and evaluation criteria.";

/// Asks the service for a fresh competition problem statement. Plain text,
/// no JSON handling; errors surface to the (admin) caller.
pub async fn generate_competition_problem(generator: &dyn TextGenerator) -> AiResult<String> {
    generator
        .generate(COMPETITION_PROMPT, &GenerationConfig::default())
        .await
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::ai::testing::StubGenerator;

    #[tokio::test]
    async fn returns_reply_verbatim() {
        let stub = StubGenerator::new(vec![Ok("Price a catastrophe bond.".to_string())]);
        let problem = generate_competition_problem(&stub).await.unwrap();
        assert_eq!(problem, "Price a catastrophe bond.");
        assert!(stub.prompts()[0].contains("competition problem"));
    }
}
