use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers::achievement;
use crate::state::AppState;

pub fn routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .nest("/achievements", achievement_routes())
        .nest("/students", student_routes())
}

fn achievement_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new()
        .routes(routes!(
            achievement::list_achievements,
            achievement::create_achievement
        ))
        .routes(routes!(
            achievement::get_achievement,
            achievement::replace_achievement,
            achievement::delete_achievement
        ))
}

fn student_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(achievement::student_summary))
}
