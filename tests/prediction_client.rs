mod support;

use std::time::Duration;

use damagecheck::prediction_api::{
    ModelSelection, PredictError, PredictionClient, PredictionInput, PredictionRequest,
};
use serde_json::json;
use support::mock_service::serve_once;
use tempfile::tempdir;

const WAIT: Duration = Duration::from_secs(5);

#[test]
fn series_request_hits_predict_with_json_body() {
    let (base, captured) = serve_once("200 OK", r#"{"model_used":"LSTM","prediction":"Damaged"}"#);
    let client = PredictionClient::new(&base).unwrap();
    let response = client
        .predict(&PredictionRequest {
            model: ModelSelection::Lstm,
            input: PredictionInput::Series(vec![1.0, 2.5, f64::INFINITY]),
        })
        .unwrap();

    assert_eq!(response.prediction.as_deref(), Some("Damaged"));
    assert_eq!(response.model_used.as_deref(), Some("LSTM"));
    let request = captured.recv_timeout(WAIT).unwrap();
    assert_eq!(request.request_line, "POST /predict HTTP/1.1");
    let body: serde_json::Value = serde_json::from_slice(&request.body).unwrap();
    assert_eq!(
        body,
        json!({ "model_name": "LSTM", "input_data": [1.0, 2.5, null] })
    );
}

#[test]
fn base_with_path_prefix_keeps_prefix() {
    let (base, captured) = serve_once("200 OK", r#"{"prediction":"Not Damaged"}"#);
    let client = PredictionClient::new(&format!("{base}/api")).unwrap();
    client
        .predict_series(ModelSelection::Cnn, &[0.0])
        .unwrap();
    let request = captured.recv_timeout(WAIT).unwrap();
    assert_eq!(request.request_line, "POST /api/predict HTTP/1.1");
}

#[test]
fn file_request_hits_predict_file_with_multipart() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("bridge.csv");
    std::fs::write(&path, "1,2,3\n").unwrap();
    let (base, captured) = serve_once("200 OK", r#"{"prediction":"Not Damaged"}"#);
    let client = PredictionClient::new(&base).unwrap();

    let response = client.predict_file(ModelSelection::CnnLstm, &path).unwrap();
    assert_eq!(response.prediction.as_deref(), Some("Not Damaged"));

    let request = captured.recv_timeout(WAIT).unwrap();
    assert_eq!(request.request_line, "POST /predict_file HTTP/1.1");
    assert!(
        request
            .content_type
            .as_deref()
            .is_some_and(|value| value.starts_with("multipart/form-data; boundary="))
    );
    let body = String::from_utf8(request.body).unwrap();
    assert!(body.contains("name=\"file\"; filename=\"bridge.csv\""));
    assert!(body.contains("Content-Type: text/csv\r\n\r\n1,2,3\n\r\n"));
    assert!(body.contains("name=\"model_name\"\r\n\r\nCNN+LSTM\r\n"));
}

#[test]
fn error_status_carries_detail() {
    let (base, _captured) = serve_once("422 Unprocessable Entity", r#"{"detail":"bad shape"}"#);
    let client = PredictionClient::new(&base).unwrap();
    let err = client
        .predict_series(ModelSelection::Lstm, &[1.0])
        .unwrap_err();
    match err {
        PredictError::Status { code, detail } => {
            assert_eq!(code, 422);
            assert_eq!(detail, "bad shape");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn non_json_success_body_has_no_prediction() {
    let (base, _captured) = serve_once("200 OK", "<html>sleeping</html>");
    let client = PredictionClient::new(&base).unwrap();
    let response = client
        .predict_series(ModelSelection::Lstm, &[1.0])
        .unwrap();
    assert_eq!(response.prediction, None);
}

#[test]
fn null_success_body_is_invalid_response() {
    let (base, _captured) = serve_once("200 OK", "null");
    let client = PredictionClient::new(&base).unwrap();
    let err = client
        .predict_series(ModelSelection::Lstm, &[1.0])
        .unwrap_err();
    assert!(matches!(err, PredictError::InvalidResponse(_)));
}

#[test]
fn hosted_client_targets_fixed_service() {
    let client = PredictionClient::hosted().unwrap();
    assert_eq!(
        client.predict_url(),
        "https://testing-interface-for-cnn-lstm-2.onrender.com/predict"
    );
    assert_eq!(
        client.predict_file_url(),
        "https://testing-interface-for-cnn-lstm-2.onrender.com/predict_file"
    );
}
