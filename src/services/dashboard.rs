//! Dashboard service
//!
//! Quiz listings and the student/teacher dashboard aggregates. The backend
//! shapes these freely, so responses are handed back as raw JSON. Failures
//! are logged here before they propagate.

use crate::http::{ClientResult, HttpClient, RequestOptions};
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct DashboardService {
    http: HttpClient,
}

impl DashboardService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    pub async fn get_quizzes(&self, week_id: i64) -> ClientResult<Value> {
        self.fetch(&format!("/quizzes?week_id={}", week_id), "quizzes")
            .await
    }

    pub async fn get_upcoming_quizzes(&self) -> ClientResult<Value> {
        self.fetch("/quizzes/upcoming", "upcoming quizzes").await
    }

    pub async fn get_student_dashboard(&self) -> ClientResult<Value> {
        self.fetch("/dashboards/student_dashboard", "dashboard data")
            .await
    }

    /// Teacher overview, scoped to one week when `week_id` is given
    pub async fn get_teacher_dashboard(&self, week_id: Option<i64>) -> ClientResult<Value> {
        self.fetch(&teacher_dashboard_path(week_id), "teacher dashboard data")
            .await
    }

    pub async fn get_quizzes_for_week(&self, week_id: i64) -> ClientResult<Value> {
        self.fetch(
            &format!("/dashboards/quizzes_for_week/{}", week_id),
            "quizzes for week",
        )
        .await
    }

    pub async fn get_quiz_performance(&self, quiz_id: i64) -> ClientResult<Value> {
        self.fetch(
            &format!("/dashboards/quiz_performance/{}", quiz_id),
            "quiz performance data",
        )
        .await
    }

    async fn fetch(&self, path: &str, what: &str) -> ClientResult<Value> {
        self.http
            .get(path, RequestOptions::default())
            .await
            .map_err(|e| {
                tracing::error!(path = %path, error = %e, "Error fetching {}", what);
                e
            })
    }
}

fn teacher_dashboard_path(week_id: Option<i64>) -> String {
    match week_id {
        Some(week_id) => format!("/dashboards/teacher_dashboard?week_id={}", week_id),
        None => "/dashboards/teacher_dashboard".to_string(),
    }
}
