use axum::http::StatusCode;
use integration_tests::http::TestClient;
use integration_tests::store;
use serde_json::json;

#[tokio::test]
async fn created_ingredient_is_listed_as_active() {
    let client = TestClient::new(&store());

    let created = client.post("/api/ingredients", json!({ "name": "Onion" })).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.location(), format!("/api/ingredients/{}", created.body["id"]));

    let listed = client.get("/api/ingredients").await;
    assert_eq!(listed.status, StatusCode::OK);
    let onion = &listed.body[0];
    assert_eq!(onion["name"], "onion");
    assert_eq!(onion["isActive"], true);
}

#[tokio::test]
async fn duplicate_ingredient_is_a_conflict() {
    let client = TestClient::new(&store());
    client.post("/api/ingredients", json!({ "name": "Garlic" })).await;

    let duplicate = client.post("/api/ingredients", json!({ "name": " GARLIC" })).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);
    assert_eq!(duplicate.body["status"], 409);
}

#[tokio::test]
async fn overlong_name_fails_validation() {
    let client = TestClient::new(&store());
    let response = client
        .post("/api/ingredients", json!({ "name": "a".repeat(151) }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["errors"]["name"].is_array());
}

#[tokio::test]
async fn name_longer_after_lowercasing_is_a_bad_request() {
    let client = TestClient::new(&store());
    let response = client
        .post("/api/ingredients", json!({ "name": "İ".repeat(100) }))
        .await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["errors"]["name"].is_array());

    let listed = client.get("/api/ingredients").await;
    assert_eq!(listed.body, json!([]));
}

#[tokio::test]
async fn rename_answers_no_content_not_found_and_conflict() {
    let client = TestClient::new(&store());
    let basil = client.post("/api/ingredients", json!({ "name": "Basil" })).await;
    client.post("/api/ingredients", json!({ "name": "Mint" })).await;
    let uri = format!("{}/name", basil.location());

    let renamed = client.put(&uri, json!({ "name": "Thai basil" })).await;
    assert_eq!(renamed.status, StatusCode::NO_CONTENT);

    let clash = client.put(&uri, json!({ "name": "mint" })).await;
    assert_eq!(clash.status, StatusCode::CONFLICT);

    let missing = client.put("/api/ingredients/999/name", json!({ "name": "Dill" })).await;
    assert_eq!(missing.status, StatusCode::NOT_FOUND);

    let names: Vec<_> = client
        .get("/api/ingredients")
        .await
        .body
        .as_array()
        .unwrap()
        .iter()
        .map(|i| i["name"].as_str().unwrap().to_owned())
        .collect();
    assert_eq!(names, ["mint", "thai basil"]);
}
