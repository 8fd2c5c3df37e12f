//! Study content service

use super::models::StudySearchRequest;
use crate::http::{ClientResult, HttpClient, RequestOptions};
use serde_json::Value;

#[derive(Clone, Debug)]
pub struct StudyService {
    http: HttpClient,
}

impl StudyService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// Search for study material related to a lecture
    ///
    /// An empty `query` lets the backend derive one from the lecture.
    pub async fn search_content(&self, lecture_id: i64, query: &str) -> ClientResult<Value> {
        let body = StudySearchRequest {
            lecture_id,
            query: query.to_string(),
        };

        self.http
            .post("/lectures/search-google", &body, RequestOptions::default())
            .await
    }

    /// Previously found search results for a lecture
    pub async fn fetch_content(&self, lecture_id: i64) -> ClientResult<Value> {
        self.http
            .get(
                &format!("/lectures/{}/search-google", lecture_id),
                RequestOptions::default(),
            )
            .await
    }

    pub async fn get_relevant_content(&self, lecture_id: i64) -> ClientResult<Value> {
        self.http
            .get(
                &format!("/relevant-content/{}", lecture_id),
                RequestOptions::default(),
            )
            .await
    }
}
