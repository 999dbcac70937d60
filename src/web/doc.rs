use utoipa::openapi::security::{ApiKey, ApiKeyValue, SecurityScheme};
use utoipa::{Modify, OpenApi};

pub struct CookieAuthModifier;

impl Modify for CookieAuthModifier {
    fn modify(&self, openapi: &mut utoipa::openapi::OpenApi) {
        if let Some(schema) = openapi.components.as_mut() {
            schema.add_security_scheme(
                "cookie",
                SecurityScheme::ApiKey(ApiKey::Cookie(ApiKeyValue::with_description(
                    "SID",
                    "JWT token for current member",
                ))),
            );
        }
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::web::routes::user::user_signup_handler,
        crate::web::routes::user::user_signin_handler,
        crate::web::routes::user::user_list_handler,
        crate::web::routes::user::user_update_handler,
        crate::web::routes::user::user_delete_handler,
        crate::web::routes::user::user_mark_verified_handler,
        crate::web::routes::posts::posts_list_handler,
        crate::web::routes::posts::posts_get_handler,
        crate::web::routes::posts::posts_create_handler,
        crate::web::routes::posts::posts_comment_handler,
        crate::web::routes::posts::posts_like_handler,
        crate::web::routes::posts::posts_share_handler,
        crate::web::routes::posts::posts_approve_handler,
        crate::web::routes::projects::projects_list_handler,
        crate::web::routes::projects::projects_get_handler,
        crate::web::routes::projects::projects_create_handler,
        crate::web::routes::projects::projects_like_handler,
        crate::web::routes::projects::projects_share_handler,
        crate::web::routes::events::events_list_handler,
        crate::web::routes::events::events_get_handler,
        crate::web::routes::events::events_create_handler,
        crate::web::routes::gallery::albums_list_handler,
        crate::web::routes::gallery::albums_get_handler,
        crate::web::routes::gallery::albums_create_handler,
        crate::web::routes::gallery::photos_add_handler,
        crate::web::routes::resources::resources_list_handler,
        crate::web::routes::resources::resources_get_handler,
        crate::web::routes::resources::resources_create_handler,
        crate::web::routes::resources::resources_download_handler,
        crate::web::routes::courses::courses_list_handler,
        crate::web::routes::courses::courses_get_handler,
        crate::web::routes::courses::courses_complete_handler,
        crate::web::routes::courses::courses_generate_handler,
        crate::web::routes::competitions::competitions_list_handler,
        crate::web::routes::competitions::competitions_get_handler,
        crate::web::routes::competitions::competitions_submit_handler,
        crate::web::routes::competitions::competitions_generate_handler,
        crate::web::routes::competitions::competitions_recalculate_handler,
        crate::web::routes::progress::progress_get_handler,
    ),
    modifiers(&CookieAuthModifier),
)]
pub struct ApiDoc;
