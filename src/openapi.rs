use utoipa::OpenApi;

use crate::models::{CourseInput, CourseSession, CourseTimeShare, MutationResponse, Period, Statistics};

#[derive(OpenApi)]
#[openapi(
    paths(
        crate::handlers::root,
        crate::handlers::healthz_live,
        crate::handlers::healthz_ready,
        crate::handlers::list_courses,
        crate::handlers::get_course,
        crate::handlers::create_course,
        crate::handlers::update_course,
        crate::handlers::delete_course,
        crate::handlers::upcoming_courses,
        crate::handlers::get_statistics,
        crate::handlers::get_periods,
        crate::handlers::get_ical
    ),
    components(schemas(
        CourseSession,
        CourseInput,
        CourseTimeShare,
        Statistics,
        Period,
        MutationResponse
    )),
    tags(
        (name = "courses", description = "Weekly course schedule operations")
    ),
)]
pub struct ApiDoc;
