//! Code exercises service
//!
//! Exercises, generated test cases, submissions, tutoring chats and the
//! helper endpoints used by the coding view.

use super::models::*;
use crate::http::{ClientResult, HttpClient, RequestOptions};
use reqwest::multipart::{Form, Part};
use std::collections::HashMap;

#[derive(Clone, Debug)]
pub struct CodeExercisesService {
    http: HttpClient,
}

impl CodeExercisesService {
    pub fn new(http: HttpClient) -> Self {
        Self { http }
    }

    /// List exercises, optionally filtered by difficulty, category or lecture
    pub async fn get_exercises(&self, filters: &ExerciseFilters) -> ClientResult<Vec<CodeExercise>> {
        let options = RequestOptions::with_query(filters)?;
        self.http.get("/code-exercises", options).await
    }

    pub async fn get_exercise(&self, id: i64) -> ClientResult<CodeExercise> {
        self.http
            .get(&format!("/code-exercises/{}", id), RequestOptions::default())
            .await
    }

    pub async fn create_exercise(&self, data: &CodeExerciseInput) -> ClientResult<CodeExercise> {
        self.http
            .post("/code-exercises", data, RequestOptions::default())
            .await
    }

    pub async fn update_exercise(
        &self,
        id: i64,
        data: &CodeExerciseInput,
    ) -> ClientResult<CodeExercise> {
        self.http
            .put(&format!("/code-exercises/{}", id), data, RequestOptions::default())
            .await
    }

    /// Ask the backend to generate test cases for an exercise
    pub async fn generate_test_cases(
        &self,
        request: &TestCaseGenerationRequest,
    ) -> ClientResult<TestCaseGenerationResponse> {
        self.http
            .post(
                &format!("/code-exercises/{}/test-cases", request.code_exercise_id),
                request,
                RequestOptions::default(),
            )
            .await
    }

    pub async fn get_test_cases(&self, exercise_id: i64) -> ClientResult<Vec<TestCase>> {
        self.http
            .get(
                &format!("/code-exercises/{}/test-cases", exercise_id),
                RequestOptions::default(),
            )
            .await
    }

    /// Fetch the test case at `index`; past the end the backend answers 404
    pub async fn get_next_test_case(&self, exercise_id: i64, index: usize) -> ClientResult<TestCase> {
        self.http
            .get(
                &format!("/code-exercises/{}/test-cases/{}", exercise_id, index),
                RequestOptions::default(),
            )
            .await
    }

    pub async fn submit_code(&self, submission: &CodeSubmissionInput) -> ClientResult<CodeSubmission> {
        self.http
            .post("/code-exercises/submissions", submission, RequestOptions::default())
            .await
    }

    pub async fn get_submission(&self, id: i64) -> ClientResult<CodeSubmission> {
        self.http
            .get(
                &format!("/code-exercises/submissions/{}", id),
                RequestOptions::default(),
            )
            .await
    }

    /// Submissions of a user, optionally narrowed to one exercise
    pub async fn get_user_submissions(
        &self,
        user_id: i64,
        exercise_id: Option<i64>,
    ) -> ClientResult<Vec<CodeSubmission>> {
        self.http
            .get(
                &user_submissions_path(user_id, exercise_id),
                RequestOptions::default(),
            )
            .await
    }

    pub async fn create_chat(&self, chat: &NewCodeChat) -> ClientResult<CodeChat> {
        self.http
            .post("/code-exercises/chat", chat, RequestOptions::default())
            .await
    }

    pub async fn get_chat(&self, id: i64) -> ClientResult<CodeChat> {
        self.http
            .get(&format!("/code-exercises/chat/{}", id), RequestOptions::default())
            .await
    }

    pub async fn add_chat_message(
        &self,
        chat_id: i64,
        message: &NewChatMessage,
    ) -> ClientResult<CodeChatMessage> {
        self.http
            .post(
                &format!("/code-exercises/chat/{}/messages", chat_id),
                message,
                RequestOptions::default(),
            )
            .await
    }

    pub async fn get_user_chats(&self, user_id: i64) -> ClientResult<Vec<CodeChat>> {
        self.http
            .get(
                &format!("/code-exercises/chat/user/{}", user_id),
                RequestOptions::default(),
            )
            .await
    }

    /// Upload a question document; the backend answers with the extracted text
    pub async fn upload_question_file(
        &self,
        file_name: &str,
        contents: Vec<u8>,
    ) -> ClientResult<HashMap<String, String>> {
        let part = Part::bytes(contents).file_name(file_name.to_string());
        let form = Form::new().part("file", part);

        self.http
            .post_multipart("/code-exercises/upload-question", form, RequestOptions::default())
            .await
    }

    pub async fn generate_boilerplate(&self, request: &BoilerplateRequest) -> ClientResult<Boilerplate> {
        self.http
            .post(
                &format!("/code-exercises/{}/generate-boilerplate", request.exercise_id),
                request,
                RequestOptions::default(),
            )
            .await
    }

    pub async fn run_single_test(&self, request: &SingleTestRequest) -> ClientResult<SingleTestResult> {
        self.http
            .post("/code-exercises/run-single-test", request, RequestOptions::default())
            .await
    }

    /// Run several test cases; the backend's result document is returned as is
    pub async fn run_tests(&self, request: &RunTestsRequest) -> ClientResult<serde_json::Value> {
        self.http
            .post("/code-exercises/run-tests", request, RequestOptions::default())
            .await
    }

    /// Search the web for material related to an exercise
    pub async fn search_google(&self, exercise_id: i64) -> ClientResult<SearchResponse> {
        self.http
            .post(
                &format!("/code-exercises/{}/search-google", exercise_id),
                &serde_json::json!({ "exercise_id": exercise_id }),
                RequestOptions::default(),
            )
            .await
    }
}

fn user_submissions_path(user_id: i64, exercise_id: Option<i64>) -> String {
    let mut path = format!("/code-exercises/submissions/user/{}", user_id);
    if let Some(exercise_id) = exercise_id {
        path.push_str(&format!("?exercise_id={}", exercise_id));
    }
    path
}
