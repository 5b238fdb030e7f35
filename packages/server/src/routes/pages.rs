use axum::{Router, routing::get};

use crate::handlers::pages;
use crate::state::AppState;

pub fn page_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(pages::home))
        .route("/student", get(pages::student_menu))
        .route("/teacher", get(pages::teacher_menu))
        .route("/add", get(pages::add_form).post(pages::add_achievement))
        .route(
            "/student/view",
            get(pages::student_view_form).post(pages::student_view),
        )
        .route(
            "/student/report",
            get(pages::student_report_form).post(pages::student_report),
        )
        .route("/dashboard", get(pages::dashboard))
        .route("/delete/{id}", get(pages::delete_achievement))
        .route(
            "/edit/{id}",
            get(pages::edit_form).post(pages::edit_achievement),
        )
        .route("/teacher/report", get(pages::teacher_report))
}
