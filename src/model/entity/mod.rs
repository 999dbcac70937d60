mod user;
pub use user::{Member, MemberCreateUpdate};

mod post;
pub use post::{BlogPost, BlogPostCreate, PostComment, PostCommentCreate};

mod project;
pub use project::{Project, ProjectCreate};

mod event;
pub use event::{Event, EventCreate};

mod gallery;
pub use gallery::{Album, AlbumCreate, Photo, PhotoCreate};

mod resource;
pub use resource::{Resource, ResourceCreate};

mod course;
pub use course::{Course, CourseCreate};

mod competition;
pub use competition::{Competition, CompetitionCreate};

mod submission;
pub use submission::{LeaderboardRow, Submission, SubmissionCreate};

mod user_progress;
pub use user_progress::UserProgress;
