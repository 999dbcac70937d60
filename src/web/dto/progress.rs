use serde::Serialize;

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct ProgressResponse {
    total_points: i32,
    completed_courses: i64,
    submissions: i64,
}

impl ProgressResponse {
    pub fn new(total_points: i32, completed_courses: i64, submissions: i64) -> Self {
        Self {
            total_points,
            completed_courses,
            submissions,
        }
    }
}
