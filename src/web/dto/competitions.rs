use serde::{Deserialize, Serialize};

use crate::model::entity::{Competition, LeaderboardRow, Submission};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct CompetitionDetailResponse {
    pub competition: Competition,
    pub user_submission: Option<Submission>,
    pub leaderboard: Vec<LeaderboardRow>,
}

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct SubmitSolutionRequest {
    pub solution: String,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct SubmitSolutionResponse {
    /// Score assigned to this submission, 0-100.
    pub score: i32,
    /// Member's point total after the submission.
    pub total_points: i32,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct RecalculateResponse {
    /// Number of submissions that were re-scored.
    pub updated: usize,
}
