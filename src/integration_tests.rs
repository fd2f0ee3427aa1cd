#[cfg(test)]
mod tests {
    use crate::app_system::BookingSystem;
    use crate::clients::{OrderClient, ReviewClient, ServiceClient};
    use crate::config::AppConfig;
    use crate::domain::{Order, OrderOrigin, OrderSubmission, Review, Service};
    use crate::http::router;
    use crate::intake::{OrderIntake, PLACEHOLDER_TOTAL};
    use crate::mock_framework::{create_mock_client, expect_create, expect_get, FakeFallbackStore, RecordingNotifier};
    use crate::store::{ActorStore, ConnectionState, FallbackLocation, JsonFileStore};
    use axum::body::Body;
    use axum::http::{header, Request, StatusCode};
    use serde_json::{json, Value};
    use std::sync::atomic::Ordering;
    use std::sync::Arc;
    use tempfile::TempDir;
    use tower::ServiceExt;

    fn submission() -> OrderSubmission {
        OrderSubmission {
            user_name: Some("Ahmed".into()),
            user_phone: Some("01012345678".into()),
            user_address: Some("10 Tahrir St, Cairo".into()),
            service_ids: vec!["svc_1".into()],
            ..OrderSubmission::default()
        }
    }

    #[tokio::test]
    async fn test_unknown_service_price_uses_placeholder_total() {
        // 1. Setup Mocks
        let (service_inner, mut service_rx) = create_mock_client::<Service>(10);
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let (review_inner, _review_rx) = create_mock_client::<Review>(10);

        let store = Arc::new(ActorStore::new(
            ServiceClient::new(service_inner),
            OrderClient::new(order_inner),
            ReviewClient::new(review_inner),
            ConnectionState::new(true),
        ));
        let fallback = Arc::new(FakeFallbackStore::working());
        let intake = OrderIntake::new(
            store,
            fallback.clone(),
            Arc::new(RecordingNotifier::working()),
            "ops@local.com",
        );

        // 2. Execute submission in background
        let order_task = tokio::spawn(async move { intake.submit_order(submission()).await });

        // 3. Verify Interactions
        let (service_id, responder) = expect_get(&mut service_rx).await.expect("Expected Service Get");
        assert_eq!(service_id, "svc_1");
        responder.send(Ok(None)).unwrap();

        let (draft, responder) = expect_create(&mut order_rx).await.expect("Expected Order Create");
        assert_eq!(draft.total_amount, PLACEHOLDER_TOTAL);
        assert_eq!(draft.user_name, "Ahmed");
        responder
            .send(Ok(Order::from_draft("ord_test", draft, OrderOrigin::Primary)))
            .unwrap();

        // 4. Verify Result
        let order = order_task.await.unwrap().unwrap();
        assert_eq!(order.id, "ord_test");
        assert_eq!(fallback.append_calls.load(Ordering::SeqCst), 0);
    }

    #[tokio::test]
    async fn test_dropped_store_reply_marks_disconnected_and_falls_back() {
        let (service_inner, mut service_rx) = create_mock_client::<Service>(10);
        let (order_inner, mut order_rx) = create_mock_client::<Order>(10);
        let (review_inner, _review_rx) = create_mock_client::<Review>(10);

        let connection = ConnectionState::new(true);
        let store = Arc::new(ActorStore::new(
            ServiceClient::new(service_inner),
            OrderClient::new(order_inner),
            ReviewClient::new(review_inner),
            connection.clone(),
        ));
        let fallback = Arc::new(FakeFallbackStore::working());
        let intake = OrderIntake::new(
            store,
            fallback.clone(),
            Arc::new(RecordingNotifier::working()),
            "ops@local.com",
        );

        let order_task = tokio::spawn(async move { intake.submit_order(submission()).await });

        let (_, responder) = expect_get(&mut service_rx).await.expect("Expected Service Get");
        drop(responder);

        let order = order_task.await.unwrap().unwrap();
        assert_eq!(order.origin, OrderOrigin::Local);
        assert!(!connection.is_connected());
        assert_eq!(fallback.append_calls.load(Ordering::SeqCst), 1);
        assert!(order_rx.try_recv().is_err(), "primary create must not be attempted");
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let body = axum::body::to_bytes(response.into_body(), 1024 * 1024)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_offline_booking_lands_in_fallback_file_then_recovers() {
        let dir = TempDir::new().unwrap();
        let config = AppConfig {
            store_online: false,
            fallback_dir: Some(dir.path().to_path_buf()),
            admin_token: Some("secret".into()),
            ..AppConfig::default()
        };
        let system = BookingSystem::start(&config).await.unwrap();
        let app = router(system.state.clone(), &config.cors_origin);

        let booking = json!({
            "name": "Ahmed",
            "phone": "01012345678",
            "address": "10 Tahrir St, Cairo",
            "serviceId": "mock1"
        });
        let req = Request::builder()
            .method("POST")
            .uri("/api/orders")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(booking.to_string()))
            .unwrap();
        let resp = app.clone().oneshot(req).await.unwrap();
        assert_eq!(resp.status(), StatusCode::CREATED);
        let created = read_json(resp).await;
        let local_id = created["data"]["id"].as_str().unwrap().to_string();
        assert!(local_id.starts_with("local_"));
        assert_eq!(created["data"]["total_amount"], 500.0);

        let fallback_file = JsonFileStore::new(FallbackLocation::Persistent(dir.path().to_path_buf()));
        let file: Value = serde_json::from_slice(&std::fs::read(fallback_file.path()).unwrap()).unwrap();
        assert_eq!(file[0]["id"], local_id.as_str());
        assert_eq!(file[0]["status"], "new (local)");
        assert_eq!(file[0]["user_name"], "Ahmed");

        let list = || {
            Request::builder()
                .uri("/api/orders")
                .header(header::AUTHORIZATION, "Bearer secret")
                .body(Body::empty())
                .unwrap()
        };
        let listing = read_json(app.clone().oneshot(list()).await.unwrap()).await;
        assert_eq!(listing["degraded"], true);
        assert_eq!(listing["count"], 1);

        // Store comes back: new orders go to the primary tier again.
        system.connection.mark_connected();
        let req = Request::builder()
            .method("POST")
            .uri("/api/orders")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(booking.to_string()))
            .unwrap();
        let created = read_json(app.clone().oneshot(req).await.unwrap()).await;
        assert!(created["data"]["id"].as_str().unwrap().starts_with("ord_"));
        assert_eq!(created["data"]["status"], "new");

        let listing = read_json(app.oneshot(list()).await.unwrap()).await;
        assert_eq!(listing["degraded"], false);
        assert_eq!(listing["count"], 2);

        system.shutdown().await.unwrap();
    }
}
