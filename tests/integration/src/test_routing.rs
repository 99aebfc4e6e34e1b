//! Routing and transport integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;

    use crate::{client, send_json, url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_json_404_for_unknown_path() {
        let client = client();
        let (status, body) = send_json(client.get(url("/profiles"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert!(body["error"].is_string());
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_405_with_allow_header() {
        let client = client();
        let resp = client.put(url("/profile/1")).send().await.unwrap();
        assert_eq!(resp.status(), StatusCode::METHOD_NOT_ALLOWED);
        assert_eq!(resp.headers()["allow"], "GET, DELETE");
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_set_json_content_type_and_request_id() {
        let client = client();
        let resp = client.get(url("/profile/0")).send().await.unwrap();
        assert_eq!(
            resp.headers()["content-type"],
            "application/json; charset=utf-8"
        );
        assert!(resp.headers().contains_key("x-request-id"));
    }
}
