//! Stateless HTTP request builder and response parser for the exercise API.
//!
//! # Design
//! `ExerciseClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`; the caller executes the round trip.

use uuid::Uuid;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{Exercise, ExerciseInput};

/// Synchronous, stateless client for the `/exercises` resource.
#[derive(Debug, Clone)]
pub struct ExerciseClient {
    base_url: String,
}

impl ExerciseClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn build_list_exercises(&self) -> HttpRequest {
        self.request(HttpMethod::Get, format!("{}/exercises", self.base_url))
    }

    pub fn build_get_exercise(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Get, self.exercise_url(id))
    }

    pub fn build_create_exercise(&self, input: &ExerciseInput) -> Result<HttpRequest, ApiError> {
        let path = format!("{}/exercises", self.base_url);
        self.json_request(HttpMethod::Post, path, input)
    }

    pub fn build_update_exercise(
        &self,
        id: Uuid,
        input: &ExerciseInput,
    ) -> Result<HttpRequest, ApiError> {
        self.json_request(HttpMethod::Put, self.exercise_url(id), input)
    }

    pub fn build_delete_exercise(&self, id: Uuid) -> HttpRequest {
        self.request(HttpMethod::Delete, self.exercise_url(id))
    }

    pub fn parse_list_exercises(&self, response: HttpResponse) -> Result<Vec<Exercise>, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_get_exercise(&self, response: HttpResponse) -> Result<Exercise, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_create_exercise(&self, response: HttpResponse) -> Result<Exercise, ApiError> {
        check_status(&response, 201)?;
        decode(&response.body)
    }

    pub fn parse_update_exercise(&self, response: HttpResponse) -> Result<Exercise, ApiError> {
        check_status(&response, 200)?;
        decode(&response.body)
    }

    pub fn parse_delete_exercise(&self, response: HttpResponse) -> Result<(), ApiError> {
        check_status(&response, 204)
    }

    fn exercise_url(&self, id: Uuid) -> String {
        format!("{}/exercises/{id}", self.base_url)
    }

    fn request(&self, method: HttpMethod, path: String) -> HttpRequest {
        HttpRequest {
            method,
            path,
            headers: Vec::new(),
            body: None,
        }
    }

    fn json_request(
        &self,
        method: HttpMethod,
        path: String,
        input: &ExerciseInput,
    ) -> Result<HttpRequest, ApiError> {
        let body =
            serde_json::to_string(input).map_err(|e| ApiError::SerializationError(e.to_string()))?;
        Ok(HttpRequest {
            method,
            path,
            headers: vec![("content-type".to_string(), "application/json".to_string())],
            body: Some(body),
        })
    }
}

fn decode<T: serde::de::DeserializeOwned>(body: &str) -> Result<T, ApiError> {
    serde_json::from_str(body).map_err(|e| ApiError::DeserializationError(e.to_string()))
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        s if s == expected => Ok(()),
        404 => Err(ApiError::NotFound),
        400 => Err(ApiError::InvalidRequest),
        status => Err(ApiError::HttpError {
            status,
            body: response.body.clone(),
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Unit;

    const SQUAT_JSON: &str = r#"{"id":"00000000-0000-0000-0000-000000000001","name":"Squat","reps":5,"weight":100,"unit":"kgs","date":"01-01-25","revision":0}"#;

    fn client() -> ExerciseClient {
        ExerciseClient::new("http://localhost:3000")
    }

    fn squat_input() -> ExerciseInput {
        ExerciseInput {
            name: "Squat".to_string(),
            reps: 5,
            weight: 100,
            unit: Unit::Kgs,
            date: "01-01-25".to_string(),
        }
    }

    #[test]
    fn build_list_exercises_produces_correct_request() {
        let req = client().build_list_exercises();
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(req.path, "http://localhost:3000/exercises");
        assert!(req.body.is_none());
        assert!(req.headers.is_empty());
    }

    #[test]
    fn build_get_exercise_produces_correct_request() {
        let req = client().build_get_exercise(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Get);
        assert_eq!(
            req.path,
            "http://localhost:3000/exercises/00000000-0000-0000-0000-000000000000"
        );
        assert!(req.body.is_none());
    }

    #[test]
    fn build_create_exercise_sends_all_fields() {
        let req = client().build_create_exercise(&squat_input()).unwrap();
        assert_eq!(req.method, HttpMethod::Post);
        assert_eq!(req.path, "http://localhost:3000/exercises");
        assert_eq!(
            req.headers,
            vec![("content-type".to_string(), "application/json".to_string())]
        );
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(
            body,
            serde_json::json!({"name":"Squat","reps":5,"weight":100,"unit":"kgs","date":"01-01-25"})
        );
    }

    #[test]
    fn build_update_exercise_targets_id() {
        let req = client()
            .build_update_exercise(Uuid::nil(), &squat_input())
            .unwrap();
        assert_eq!(req.method, HttpMethod::Put);
        assert!(req.path.ends_with("/exercises/00000000-0000-0000-0000-000000000000"));
        let body: serde_json::Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
        assert_eq!(body["unit"], "kgs");
        assert!(body.get("id").is_none());
    }

    #[test]
    fn build_delete_exercise_produces_correct_request() {
        let req = client().build_delete_exercise(Uuid::nil());
        assert_eq!(req.method, HttpMethod::Delete);
        assert!(req.body.is_none());
    }

    #[test]
    fn parse_list_exercises_success() {
        let response = HttpResponse::new(200, format!("[{SQUAT_JSON}]"));
        let exercises = client().parse_list_exercises(response).unwrap();
        assert_eq!(exercises.len(), 1);
        assert_eq!(exercises[0].name, "Squat");
        assert_eq!(exercises[0].unit, Unit::Kgs);
    }

    #[test]
    fn parse_get_exercise_not_found() {
        let response = HttpResponse::new(404, r#"{"Error":"Not found"}"#);
        let err = client().parse_get_exercise(response).unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn parse_create_exercise_success() {
        let exercise = client()
            .parse_create_exercise(HttpResponse::new(201, SQUAT_JSON))
            .unwrap();
        assert_eq!(exercise.reps, 5);
        assert_eq!(ExerciseInput::from(&exercise), squat_input());
    }

    #[test]
    fn parse_create_exercise_invalid_request() {
        let response = HttpResponse::new(400, r#"{"Error":"Invalid request"}"#);
        let err = client().parse_create_exercise(response).unwrap_err();
        assert!(matches!(err, ApiError::InvalidRequest));
        assert_eq!(err.status(), Some(400));
    }

    #[test]
    fn parse_create_exercise_wrong_status() {
        let response = HttpResponse::new(500, "internal error");
        let err = client().parse_create_exercise(response).unwrap_err();
        assert!(matches!(err, ApiError::HttpError { status: 500, .. }));
    }

    #[test]
    fn parse_update_exercise_success() {
        let body = SQUAT_JSON.replace("\"reps\":5", "\"reps\":8");
        let exercise = client()
            .parse_update_exercise(HttpResponse::new(200, body))
            .unwrap();
        assert_eq!(exercise.reps, 8);
    }

    #[test]
    fn parse_delete_exercise_success() {
        assert!(client()
            .parse_delete_exercise(HttpResponse::new(204, ""))
            .is_ok());
    }

    #[test]
    fn parse_delete_exercise_not_found() {
        let err = client()
            .parse_delete_exercise(HttpResponse::new(404, ""))
            .unwrap_err();
        assert!(matches!(err, ApiError::NotFound));
    }

    #[test]
    fn trailing_slash_is_stripped() {
        let client = ExerciseClient::new("http://localhost:3000/");
        let req = client.build_list_exercises();
        assert_eq!(req.path, "http://localhost:3000/exercises");
    }

    #[test]
    fn parse_list_exercises_bad_json() {
        let err = client()
            .parse_list_exercises(HttpResponse::new(200, "not json"))
            .unwrap_err();
        assert!(matches!(err, ApiError::DeserializationError(_)));
    }
}
