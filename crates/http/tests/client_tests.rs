//! Integration tests for the ARA HTTP client

#![cfg(feature = "client")]

use ara_core::Role;
use ara_http::client::{AraClient, endpoints, error::ClientError};
use ara_http::types::{LoginRequest, LogoutRequest, RefreshRequest};
use reqwest::Method;
use serde_json::{Value, json};
use wiremock::matchers::{body_json, header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn credentials() -> LoginRequest {
    LoginRequest {
        username: "teacher@example.com".to_string(),
        password: "hunter2".to_string(),
    }
}

#[tokio::test]
async fn test_client_builder() {
    let client = AraClient::builder()
        .base_url("http://127.0.0.1:8000/api/")
        .access_token("token")
        .build();

    assert!(client.is_ok());
    let client = client.unwrap();
    assert_eq!(client.base_url(), "http://127.0.0.1:8000/api");
    assert_eq!(client.access_token(), Some("token"));
    assert_eq!(client.with_access_token(None).access_token(), None);
}

#[tokio::test]
async fn test_client_builder_requires_base_url() {
    let result = AraClient::builder().build();
    assert!(matches!(result, Err(ClientError::Configuration(_))));
}

#[tokio::test]
async fn test_login_posts_credentials() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login/"))
        .and(body_json(json!({ "username": "teacher@example.com", "password": "hunter2" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "access": "access-1",
            "refresh": "refresh-1",
            "user": { "id": 3, "username": "teacher", "role": "TEACHER" }
        })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AraClient::new(format!("{}/api", mock_server.uri())).unwrap();
    let response = client.login(&credentials()).await.unwrap();
    let session = response.into_session().unwrap();
    assert_eq!(session.access_token, "access-1");
    assert_eq!(session.user.role, Role::Teacher);
}

#[tokio::test]
async fn test_login_error_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(
            ResponseTemplate::new(400).set_body_json(json!({ "error": "Invalid credentials" })),
        )
        .mount(&mock_server)
        .await;

    let client = AraClient::new(mock_server.uri()).unwrap();
    let err = client.login(&credentials()).await.unwrap_err();
    assert!(matches!(err, ClientError::BadRequest(_)));
    assert_eq!(err.to_string(), "Invalid credentials");
}

#[tokio::test]
async fn test_login_error_without_message() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/auth/login/"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&mock_server)
        .await;

    let client = AraClient::new(mock_server.uri()).unwrap();
    let err = client.login(&credentials()).await.unwrap_err();
    assert!(err.is_auth_expired());
    assert_eq!(err.to_string(), "Login failed");
}

#[tokio::test]
async fn test_bearer_token_attached() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path(endpoints::Resource::Children.path()))
        .and(header("authorization", "Bearer access-1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([{ "id": 1 }])))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AraClient::builder()
        .base_url(mock_server.uri())
        .access_token("access-1")
        .build()
        .unwrap();

    let request = client.request(Method::GET, endpoints::Resource::Children.path());
    let children: Value = client.execute(request).await.unwrap();
    assert_eq!(children[0]["id"], 1);
}

#[tokio::test]
async fn test_anonymous_request_has_no_authorization() {
    let mock_server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/specialists/"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([])))
        .mount(&mock_server)
        .await;

    let client = AraClient::new(mock_server.uri()).unwrap();
    let request = client.request(Method::GET, "/specialists/");
    let _: Value = client.execute(request).await.unwrap();

    let received = mock_server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
    assert!(!received[0].headers.contains_key("authorization"));
}

#[tokio::test]
async fn test_refresh_token_endpoint() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoints::AUTH_TOKEN_REFRESH))
        .and(body_json(json!({ "refresh": "refresh-1" })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "access": "access-2" })))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AraClient::new(mock_server.uri()).unwrap();
    let response = client
        .refresh_token(
            endpoints::AUTH_TOKEN_REFRESH,
            &RefreshRequest {
                refresh: "refresh-1".to_string(),
            },
        )
        .await
        .unwrap();
    assert_eq!(response.access, "access-2");
}

#[tokio::test]
async fn test_logout_ignores_body() {
    let mock_server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path(endpoints::AUTH_LOGOUT))
        .respond_with(ResponseTemplate::new(205))
        .expect(1)
        .mount(&mock_server)
        .await;

    let client = AraClient::new(mock_server.uri()).unwrap();
    let result = client
        .logout(&LogoutRequest {
            refresh: "refresh-1".to_string(),
        })
        .await;
    assert!(result.is_ok());
}

#[tokio::test]
async fn test_error_handling() {
    let mock_server = MockServer::start().await;

    Mock::given(method("DELETE"))
        .and(path("/children/9/"))
        .respond_with(ResponseTemplate::new(404).set_body_json(json!({ "detail": "Not found." })))
        .mount(&mock_server)
        .await;

    Mock::given(method("GET"))
        .and(path("/progress/"))
        .respond_with(ResponseTemplate::new(500).set_body_string("Internal Server Error"))
        .mount(&mock_server)
        .await;

    let client = AraClient::new(mock_server.uri()).unwrap();

    let request = client.request(Method::DELETE, &endpoints::Resource::Children.item(9));
    let result: Result<Value, _> = client.execute(request).await;
    let err = result.unwrap_err();
    assert!(matches!(err, ClientError::NotFound(_)));
    assert_eq!(err.to_string(), "Not found.");

    let request = client.request(Method::GET, endpoints::Resource::Progress.path());
    let result: Result<Value, _> = client.execute(request).await;
    let err = result.unwrap_err();
    assert_eq!(err.status(), Some(500));
    assert_eq!(err.to_string(), "HTTP Error: 500");
}

/// Serve one connection: a 200 that promises more body than it sends, then hang up
async fn truncated_server() -> String {
    use tokio::io::{AsyncReadExt, AsyncWriteExt};

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        let (mut socket, _) = listener.accept().await.unwrap();
        let mut request = Vec::new();
        let mut buf = [0u8; 1024];
        while !request.windows(4).any(|w| w == b"\r\n\r\n") {
            let n = socket.read(&mut buf).await.unwrap();
            if n == 0 {
                break;
            }
            request.extend_from_slice(&buf[..n]);
        }
        socket
            .write_all(
                b"HTTP/1.1 200 OK\r\nContent-Type: application/json\r\nContent-Length: 200\r\n\r\n[{\"id\":",
            )
            .await
            .unwrap();
        socket.flush().await.unwrap();
    });
    format!("http://{addr}")
}

#[tokio::test]
async fn test_truncated_body_is_transport_error() {
    let base_url = truncated_server().await;
    let client = AraClient::new(base_url).unwrap();

    let request = client.request(Method::GET, endpoints::Resource::Children.path());
    let result: Result<Value, _> = client.execute(request).await;

    let err = result.unwrap_err();
    assert!(matches!(err, ClientError::Request(_)));
    assert!(err.is_network());
}
