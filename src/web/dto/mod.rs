pub mod competitions;
pub mod courses;
pub mod gallery;
pub mod posts;
pub mod progress;
