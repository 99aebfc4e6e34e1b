//! Profile CRUD integration tests.

#[cfg(test)]
mod tests {
    use reqwest::StatusCode;
    use serde_json::json;

    use crate::{client, find_profile_ids, send_json, test_profile_name, url};

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_create_profile() {
        let client = client();
        let (status, body) =
            send_json(client.post(url("/profile")).body(r#"{ "name": "Blah" }"#)).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_unknown_field() {
        let client = client();
        let (status, body) =
            send_json(client.post(url("/profile")).body(r#"{ "invalid": "field" }"#)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "invalid request body"}));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_reject_empty_profile() {
        let client = client();
        let (status, body) = send_json(client.post(url("/profile")).body("{}")).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body, json!({"error": "invalid request body"}));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_return_not_found_for_unassigned_id() {
        let client = client();
        let (status, body) = send_json(client.get(url("/profile/999999999"))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "not found"}));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_delete_absent_profile() {
        let client = client();
        let (status, body) = send_json(client.delete(url("/profile/999999998"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_read_then_delete_created_profile() {
        let client = client();
        let name = test_profile_name("crud");
        let (status, _) = send_json(
            client
                .post(url("/profile"))
                .body(json!({ "name": name }).to_string()),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let ids = find_profile_ids(&client, std::slice::from_ref(&name)).await;
        let id = &ids[&name];
        let path = format!("/profile/{id}");

        let (status, body) = send_json(client.get(url(&path))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({"profile": {"id": id, "name": name}}));

        let (status, body) = send_json(client.delete(url(&path))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));

        let (status, body) = send_json(client.get(url(&path))).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body, json!({"error": "not found"}));

        let (status, body) = send_json(client.delete(url(&path))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, json!({}));
    }

    #[tokio::test]
    #[ignore = "requires running server"]
    async fn test_should_assign_distinct_ids_to_concurrent_creates() {
        const CALLERS: usize = 16;

        let client = client();
        let prefix = test_profile_name("concurrent");
        let names: Vec<String> = (0..CALLERS).map(|i| format!("{prefix}-{i}")).collect();

        let requests = names.iter().map(|name| {
            let client = client.clone();
            let body = json!({ "name": name }).to_string();
            async move { send_json(client.post(url("/profile")).body(body)).await }
        });
        for (status, body) in futures::future::join_all(requests).await {
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({}));
        }

        let ids = find_profile_ids(&client, &names).await;
        let mut distinct: Vec<u64> = ids.values().map(|id| id.parse().unwrap()).collect();
        distinct.sort_unstable();
        distinct.dedup();
        assert_eq!(distinct.len(), CALLERS);

        for name in &names {
            let id = &ids[name];
            let (status, body) = send_json(client.get(url(&format!("/profile/{id}")))).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(body, json!({"profile": {"id": id, "name": name}}));
        }
    }
}
