//! Domain Service Wrappers
//!
//! One wrapper per backend resource group. Each method maps a domain
//! operation to exactly one HTTP request and returns the decoded response or
//! the unchanged [`ClientError`](crate::http::ClientError).
//!
//! - **auth**: `auth/login`, `auth/me`, `auth/register`
//! - **code exercises**: `/code-exercises*`
//! - **dashboards**: `/quizzes*`, `/dashboards/*`
//! - **study**: `/lectures/*search-google`, `/relevant-content/:id`

mod auth;
mod code_exercises;
mod dashboard;
pub mod models;
mod study;

pub use auth::AuthService;
pub use code_exercises::CodeExercisesService;
pub use dashboard::DashboardService;
pub use study::StudyService;

use crate::http::HttpClient;

/// All service wrappers over one shared client
#[derive(Clone, Debug)]
pub struct Services {
    pub auth: AuthService,
    pub code_exercises: CodeExercisesService,
    pub dashboard: DashboardService,
    pub study: StudyService,
}

impl Services {
    pub fn new(http: HttpClient) -> Self {
        Self {
            auth: AuthService::new(http.clone()),
            code_exercises: CodeExercisesService::new(http.clone()),
            dashboard: DashboardService::new(http.clone()),
            study: StudyService::new(http),
        }
    }
}
