mod common;

use serde_json::json;

#[tokio::test]
async fn test_request_accept_creates_symmetric_friendship() {
    let (addr, _tmp, db) = common::setup_test_app().await;
    common::create_user(&*db, "alice", "Alice").await;
    common::create_user(&*db, "bob", "Bob").await;

    let client = reqwest::Client::new();
    let base = format!("http://{addr}/api/v1");
    let auth = format!("Bearer {}", common::TEST_API_KEY);

    let res = client
        .post(format!("{base}/friend-requests"))
        .header("Authorization", &auth)
        .json(&json!({ "senderId": "alice", "receiverId": "bob" }))
        .send()
        .await
        .expect("send request");
    assert_eq!(res.status(), 201);
    let body: serde_json::Value = res.json().await.expect("send body");
    assert_eq!(body["data"]["status"], "pending");
    let request_id = body["data"]["requestId"].as_str().expect("request id").to_string();

    // Same pair again, in either direction, is a conflict.
    for (sender, receiver) in [("alice", "bob"), ("bob", "alice")] {
        let res = client
            .post(format!("{base}/friend-requests"))
            .header("Authorization", &auth)
            .json(&json!({ "senderId": sender, "receiverId": receiver }))
            .send()
            .await
            .expect("duplicate request");
        assert_eq!(res.status(), 409);
        let body: serde_json::Value = res.json().await.expect("duplicate body");
        assert_eq!(body["error"]["code"], "conflict");
    }

    // The request shows up in the receiver's inbox only.
    let res = client
        .get(format!("{base}/friend-requests/pending?userId=bob"))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("pending request");
    let body: serde_json::Value = res.json().await.expect("pending body");
    assert_eq!(body["data"]["requests"].as_array().expect("requests").len(), 1);

    let res = client
        .get(format!("{base}/friend-requests/pending?userId=alice"))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("sender pending request");
    let body: serde_json::Value = res.json().await.expect("sender pending body");
    assert!(body["data"]["requests"].as_array().expect("requests").is_empty());

    // Only the receiver may respond.
    let res = client
        .post(format!("{base}/friend-requests/{request_id}/accept"))
        .header("Authorization", &auth)
        .json(&json!({ "userId": "alice" }))
        .send()
        .await
        .expect("sender accept request");
    assert_eq!(res.status(), 403);

    let res = client
        .post(format!("{base}/friend-requests/{request_id}/accept"))
        .header("Authorization", &auth)
        .json(&json!({ "userId": "bob" }))
        .send()
        .await
        .expect("accept request");
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.expect("accept body");
    assert_eq!(body["data"]["status"], "accepted");
    assert!(body["data"]["respondedAt"].is_string());

    // Both sides now see each other.
    for (user, friend) in [("alice", "bob"), ("bob", "alice")] {
        let res = client
            .get(format!("{base}/friends?userId={user}"))
            .header("Authorization", &auth)
            .send()
            .await
            .expect("friends request");
        let body: serde_json::Value = res.json().await.expect("friends body");
        let friends = body["data"]["friends"].as_array().expect("friends array");
        assert_eq!(friends.len(), 1);
        assert_eq!(friends[0]["userId"], friend);
    }

    // Responding twice is a conflict, and so is a fresh request between
    // users who are already friends.
    let res = client
        .post(format!("{base}/friend-requests/{request_id}/accept"))
        .header("Authorization", &auth)
        .json(&json!({ "userId": "bob" }))
        .send()
        .await
        .expect("double accept request");
    assert_eq!(res.status(), 409);

    let res = client
        .post(format!("{base}/friend-requests"))
        .header("Authorization", &auth)
        .json(&json!({ "senderId": "bob", "receiverId": "alice" }))
        .send()
        .await
        .expect("already friends request");
    assert_eq!(res.status(), 409);
}

#[tokio::test]
async fn test_rejected_request_creates_no_friendship() {
    let (addr, _tmp, db) = common::setup_test_app().await;
    common::create_user(&*db, "alice", "Alice").await;
    common::create_user(&*db, "bob", "Bob").await;

    let client = reqwest::Client::new();
    let base = format!("http://{addr}/api/v1");
    let auth = format!("Bearer {}", common::TEST_API_KEY);

    let res = client
        .post(format!("{base}/friend-requests"))
        .header("Authorization", &auth)
        .json(&json!({ "senderId": "alice", "receiverId": "bob" }))
        .send()
        .await
        .expect("send request");
    let body: serde_json::Value = res.json().await.expect("send body");
    let request_id = body["data"]["requestId"].as_str().expect("request id").to_string();

    let res = client
        .post(format!("{base}/friend-requests/{request_id}/reject"))
        .header("Authorization", &auth)
        .json(&json!({ "userId": "bob" }))
        .send()
        .await
        .expect("reject request");
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.expect("reject body");
    assert_eq!(body["data"]["status"], "rejected");

    let friends = db.get_friends_by_user_id("alice").await.expect("friends");
    assert!(friends.is_empty());

    // A rejected request no longer blocks a new one.
    let res = client
        .post(format!("{base}/friend-requests"))
        .header("Authorization", &auth)
        .json(&json!({ "senderId": "alice", "receiverId": "bob" }))
        .send()
        .await
        .expect("retry request");
    assert_eq!(res.status(), 201);
}

#[tokio::test]
async fn test_remove_friend_both_directions() {
    let (addr, _tmp, db) = common::setup_test_app().await;
    common::create_user(&*db, "alice", "Alice").await;
    common::create_user(&*db, "bob", "Bob").await;
    common::befriend(&*db, "alice", "bob").await;

    let client = reqwest::Client::new();
    let base = format!("http://{addr}/api/v1");
    let auth = format!("Bearer {}", common::TEST_API_KEY);

    // The edge was stored as alice -> bob; bob removes it from his side.
    let res = client
        .delete(format!("{base}/friends/alice?userId=bob"))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("remove request");
    assert_eq!(res.status(), 200);
    let body: serde_json::Value = res.json().await.expect("remove body");
    assert_eq!(body["data"]["removed"], true);
    assert_eq!(body["data"]["friendId"], "alice");

    assert!(db.get_friends_by_user_id("alice").await.expect("friends").is_empty());
    assert!(db.get_friends_by_user_id("bob").await.expect("friends").is_empty());

    let res = client
        .delete(format!("{base}/friends/alice?userId=bob"))
        .header("Authorization", &auth)
        .send()
        .await
        .expect("second remove request");
    assert_eq!(res.status(), 404);
}

#[tokio::test]
async fn test_self_and_unknown_requests_are_rejected() {
    let (addr, _tmp, db) = common::setup_test_app().await;
    common::create_user(&*db, "alice", "Alice").await;

    let client = reqwest::Client::new();
    let base = format!("http://{addr}/api/v1");
    let auth = format!("Bearer {}", common::TEST_API_KEY);

    let res = client
        .post(format!("{base}/friend-requests"))
        .header("Authorization", &auth)
        .json(&json!({ "senderId": "alice", "receiverId": "alice" }))
        .send()
        .await
        .expect("self request");
    assert_eq!(res.status(), 400);
    let body: serde_json::Value = res.json().await.expect("self body");
    assert_eq!(body["error"]["code"], "invalid_request");

    let res = client
        .post(format!("{base}/friend-requests"))
        .header("Authorization", &auth)
        .json(&json!({ "senderId": "alice", "receiverId": "nobody" }))
        .send()
        .await
        .expect("unknown receiver request");
    assert_eq!(res.status(), 404);
}
