use serde::Deserialize;

#[derive(Debug, Deserialize, utoipa::ToSchema)]
pub struct GenerateCourseRequest {
    pub topic: String,
    #[serde(default)]
    pub level: Option<String>,
    #[serde(default)]
    pub duration: Option<String>,
}

impl GenerateCourseRequest {
    pub fn level(&self) -> &str {
        self.level.as_deref().unwrap_or("beginner")
    }

    pub fn duration(&self) -> &str {
        self.duration.as_deref().unwrap_or("4 weeks")
    }
}
