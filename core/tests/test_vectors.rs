//! Verify build/parse methods against JSON test vectors stored in `test-vectors/`.
//!
//! Each vector file describes inputs, expected requests, simulated responses,
//! and expected parse results. Bodies are compared as parsed JSON so field
//! order does not matter.

use exercise_core::{
    ApiError, Exercise, ExerciseClient, ExerciseInput, HttpMethod, HttpRequest, HttpResponse,
};
use serde_json::Value;
use uuid::Uuid;

const BASE_URL: &str = "http://localhost:3000";

fn client() -> ExerciseClient {
    ExerciseClient::new(BASE_URL)
}

fn load(raw: &str) -> Vec<Value> {
    let vectors: Value = serde_json::from_str(raw).unwrap();
    vectors["cases"].as_array().unwrap().clone()
}

/// Parse the method string from test vectors into `HttpMethod`.
fn parse_method(s: &str) -> HttpMethod {
    match s {
        "GET" => HttpMethod::Get,
        "POST" => HttpMethod::Post,
        "PUT" => HttpMethod::Put,
        "DELETE" => HttpMethod::Delete,
        other => panic!("unknown method: {other}"),
    }
}

fn check_request(name: &str, req: &HttpRequest, expected: &Value) {
    assert_eq!(req.method, parse_method(expected["method"].as_str().unwrap()), "{name}: method");
    assert_eq!(
        req.path,
        format!("{BASE_URL}{}", expected["path"].as_str().unwrap()),
        "{name}: path"
    );

    match expected.get("body") {
        Some(body) => {
            let expected_headers: Vec<(String, String)> = expected["headers"]
                .as_array()
                .unwrap()
                .iter()
                .map(|h| {
                    let pair = h.as_array().unwrap();
                    (pair[0].as_str().unwrap().to_string(), pair[1].as_str().unwrap().to_string())
                })
                .collect();
            assert_eq!(req.headers, expected_headers, "{name}: headers");
            let req_body: Value = serde_json::from_str(req.body.as_deref().unwrap()).unwrap();
            assert_eq!(&req_body, body, "{name}: body");
        }
        None => assert!(req.body.is_none(), "{name}: body should be None"),
    }
}

fn simulated_response(case: &Value) -> HttpResponse {
    let sim = &case["simulated_response"];
    HttpResponse::new(
        sim["status"].as_u64().unwrap() as u16,
        sim["body"].as_str().unwrap(),
    )
}

fn check_error(name: &str, err: ApiError, expected: &Value) {
    match expected.as_str().unwrap() {
        "NotFound" => assert!(matches!(err, ApiError::NotFound), "{name}: expected NotFound"),
        "InvalidRequest" => assert!(
            matches!(err, ApiError::InvalidRequest),
            "{name}: expected InvalidRequest"
        ),
        other => panic!("{name}: unknown expected_error: {other}"),
    }
}

fn input_id(case: &Value) -> Uuid {
    case["input_id"].as_str().unwrap().parse().unwrap()
}

// ---------------------------------------------------------------------------
// Create
// ---------------------------------------------------------------------------

#[test]
fn create_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/create.json")) {
        let name = case["name"].as_str().unwrap();
        let input: ExerciseInput = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_create_exercise(&input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_create_exercise(simulated_response(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Exercise =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// List
// ---------------------------------------------------------------------------

#[test]
fn list_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/list.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_list_exercises();
        check_request(name, &req, &case["expected_request"]);

        let exercises = c.parse_list_exercises(simulated_response(&case)).unwrap();
        let expected: Vec<Exercise> =
            serde_json::from_value(case["expected_result"].clone()).unwrap();
        assert_eq!(exercises, expected, "{name}: parsed result");
    }
}

// ---------------------------------------------------------------------------
// Get
// ---------------------------------------------------------------------------

#[test]
fn get_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/get.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_get_exercise(input_id(&case));
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_get_exercise(simulated_response(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Exercise =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Update
// ---------------------------------------------------------------------------

#[test]
fn update_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/update.json")) {
        let name = case["name"].as_str().unwrap();
        let input: ExerciseInput = serde_json::from_value(case["input"].clone()).unwrap();

        let req = c.build_update_exercise(input_id(&case), &input).unwrap();
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_update_exercise(simulated_response(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => {
                let expected: Exercise =
                    serde_json::from_value(case["expected_result"].clone()).unwrap();
                assert_eq!(result.unwrap(), expected, "{name}: parsed result");
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Delete
// ---------------------------------------------------------------------------

#[test]
fn delete_test_vectors() {
    let c = client();
    for case in load(include_str!("../../test-vectors/delete.json")) {
        let name = case["name"].as_str().unwrap();

        let req = c.build_delete_exercise(input_id(&case));
        check_request(name, &req, &case["expected_request"]);

        let result = c.parse_delete_exercise(simulated_response(&case));
        match case.get("expected_error") {
            Some(expected) => check_error(name, result.unwrap_err(), expected),
            None => assert!(result.is_ok(), "{name}: expected success"),
        }
    }
}
