//! Request and response shapes of the backend API
//!
//! Response types keep every field the client does not strictly need as
//! optional, so backend additions pass through without breaking decoding.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// ============================================
// Auth
// ============================================

#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub name: String,
    pub role: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: i64,
}

// ============================================
// Code exercises
// ============================================

/// Optional filters for listing exercises
#[derive(Debug, Clone, Default, Serialize)]
pub struct ExerciseFilters {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecture_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TestCaseInput {
    pub input_data: String,
    pub expected_output: String,
    #[serde(default)]
    pub is_hidden: bool,
}

/// Body for creating or updating an exercise
#[derive(Debug, Clone, Default, Serialize)]
pub struct CodeExerciseInput {
    pub title: Option<String>,
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub difficulty: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lecture_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub boilerplate_code: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub test_cases: Option<Vec<TestCaseInput>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TestCase {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub code_exercise_id: Option<i64>,
    pub input_data: String,
    pub expected_output: String,
    #[serde(default)]
    pub is_hidden: bool,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CodeExercise {
    pub id: i64,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub difficulty: Option<String>,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub lecture_id: Option<i64>,
    #[serde(default)]
    pub boilerplate_code: Option<String>,
    #[serde(default)]
    pub language: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub test_cases: Option<Vec<TestCase>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct TestCaseGenerationRequest {
    pub code_exercise_id: i64,
    pub problem_description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sample_code: Option<String>,
    pub num_test_cases: u32,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct TestCaseGenerationResponse {
    pub test_cases: Vec<TestCaseInput>,
}

#[derive(Debug, Clone, Serialize)]
pub struct CodeSubmissionInput {
    pub user_id: i64,
    pub code_exercise_id: i64,
    pub code: String,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CodeSubmission {
    pub id: i64,
    pub user_id: i64,
    pub code_exercise_id: i64,
    pub code: String,
    pub language: String,
    pub status: String,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub execution_time: Option<i64>,
    #[serde(default)]
    pub memory_used: Option<i64>,
    #[serde(default)]
    pub results: Option<HashMap<String, serde_json::Value>>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewCodeChat {
    pub user_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_exercise_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_submission_id: Option<i64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct NewChatMessage {
    pub sender: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub code_snippet: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CodeChatMessage {
    pub id: i64,
    pub code_chat_id: i64,
    pub sender: String,
    pub message: String,
    #[serde(default)]
    pub code_snippet: Option<String>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct CodeChat {
    pub id: i64,
    pub user_id: i64,
    #[serde(default)]
    pub code_exercise_id: Option<i64>,
    #[serde(default)]
    pub code_submission_id: Option<i64>,
    #[serde(default)]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(default)]
    pub messages: Vec<CodeChatMessage>,
}

#[derive(Debug, Clone, Serialize)]
pub struct BoilerplateRequest {
    pub exercise_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub language: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Boilerplate {
    pub boilerplate_code: String,
    #[serde(default)]
    pub function_signature: Option<String>,
    #[serde(default)]
    pub parameters: Vec<String>,
    #[serde(default)]
    pub return_type: Option<String>,
}

/// Test case as sent to the test runner
#[derive(Debug, Clone, Serialize)]
pub struct RunnableTestCase {
    pub input_data: String,
    pub expected_output: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SingleTestRequest {
    pub code: String,
    pub test_case: RunnableTestCase,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SingleTestResult {
    pub passed: bool,
    #[serde(default)]
    pub actual_output: Option<String>,
    #[serde(default)]
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RunTestsRequest {
    pub code: String,
    pub language: String,
    pub test_cases: Vec<RunnableTestCase>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResult {
    pub title: String,
    pub link: String,
    #[serde(default)]
    pub snippet: Option<String>,
    #[serde(default)]
    pub source: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub results: Vec<SearchResult>,
}

// ============================================
// Study content
// ============================================

#[derive(Debug, Clone, Serialize)]
pub struct StudySearchRequest {
    pub lecture_id: i64,
    pub query: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_filters_omit_unset_fields() {
        let filters = ExerciseFilters {
            difficulty: Some("hard".to_string()),
            ..ExerciseFilters::default()
        };
        assert_eq!(
            serde_json::to_value(&filters).unwrap(),
            serde_json::json!({"difficulty": "hard"})
        );
    }

    #[test]
    fn test_exercise_decodes_backend_payload() {
        let exercise: CodeExercise = serde_json::from_value(serde_json::json!({
            "id": 3,
            "title": "Two Sum",
            "description": "Return indices of the two numbers adding up to target",
            "difficulty": "easy",
            "category": null,
            "lecture_id": 12,
            "created_at": "2025-03-10T14:00:00Z",
            "test_cases": [{
                "id": 1,
                "code_exercise_id": 3,
                "input_data": "[2,7,11,15], 9",
                "expected_output": "[0, 1]",
                "is_hidden": false,
                "created_at": "2025-03-10T14:00:00Z"
            }]
        }))
        .unwrap();

        assert_eq!(exercise.id, 3);
        assert_eq!(exercise.category, None);
        assert_eq!(exercise.test_cases.as_ref().map(Vec::len), Some(1));
        assert_eq!(exercise.language, None);
    }

    #[test]
    fn test_chat_without_messages() {
        let chat: CodeChat = serde_json::from_value(serde_json::json!({
            "id": 9,
            "user_id": 2,
            "code_exercise_id": 3
        }))
        .unwrap();
        assert!(chat.messages.is_empty());
        assert_eq!(chat.code_submission_id, None);
    }

    #[test]
    fn test_single_test_request_shape() {
        let request = SingleTestRequest {
            code: "def f(x): return x".to_string(),
            test_case: RunnableTestCase {
                input_data: "1".to_string(),
                expected_output: "1".to_string(),
                explanation: None,
            },
        };
        assert_eq!(
            serde_json::to_value(&request).unwrap(),
            serde_json::json!({
                "code": "def f(x): return x",
                "test_case": {"input_data": "1", "expected_output": "1"}
            })
        );
    }
}
