use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::model::entity::{Album, Photo};

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct AlbumWithPhotos {
    id: Uuid,
    title: String,
    description: String,
    photos: Vec<PhotoResponse>,
}

#[derive(Debug, Serialize, utoipa::ToSchema)]
pub struct PhotoResponse {
    id: Uuid,
    caption: String,
    image_path: String,
    uploaded_at: DateTime<Utc>,
}

impl AlbumWithPhotos {
    pub fn from_entity(album: Album, photos: Vec<Photo>) -> Self {
        Self {
            id: album.id(),
            title: album.title().to_string(),
            description: album.description().to_string(),
            photos: photos.into_iter().map(PhotoResponse::from).collect(),
        }
    }
}

impl From<Photo> for PhotoResponse {
    fn from(photo: Photo) -> Self {
        Self {
            id: photo.id(),
            caption: photo.caption().to_string(),
            image_path: photo.image_path().to_string(),
            uploaded_at: photo.uploaded_at(),
        }
    }
}
