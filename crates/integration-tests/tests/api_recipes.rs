use axum::http::StatusCode;
use integration_tests::http::TestClient;
use integration_tests::{seed_ingredient, seed_tag, seed_user, store};
use serde_json::{json, Value};

fn chili(author_id: impl std::fmt::Display) -> Value {
    json!({
        "authorId": author_id.to_string(),
        "title": "Chili",
        "description": "  ",
        "prepTimeMinutes": 15,
        "cookTimeMinutes": 90,
        "servings": 6,
        "difficulty": "Medium",
        "isPublished": true
    })
}

#[tokio::test]
async fn created_recipe_location_resolves_to_empty_details() {
    let store = store();
    let author = seed_user(&store, "Ada").await;
    let client = TestClient::new(&store);

    let created = client.post("/api/recipes", chili(author)).await;
    assert_eq!(created.status, StatusCode::CREATED);
    assert_eq!(created.location(), format!("/api/recipes/{}", created.body["id"]));

    let details = client.get(created.location()).await;
    assert_eq!(details.status, StatusCode::OK);
    assert_eq!(details.body["title"], "Chili");
    assert_eq!(details.body["authorName"], "Ada");
    assert_eq!(details.body["isPublished"], true);
    assert_eq!(details.body["description"], Value::Null);
    assert_eq!(details.body["ingredients"], json!([]));
    assert_eq!(details.body["steps"], json!([]));
    assert_eq!(details.body["tags"], json!([]));
}

#[tokio::test]
async fn ingredient_amounts_are_rounded_to_cents() {
    let store = store();
    let author = seed_user(&store, "Ada").await;
    let flour = seed_ingredient(&store, "Flour").await;
    let client = TestClient::new(&store);
    let recipe = client.post("/api/recipes", chili(author)).await;
    let uri = format!("{}/ingredients", recipe.location());

    let added = client
        .post(&uri, json!({ "ingredientId": flour.value(), "amount": 200.005, "unit": "Gram" }))
        .await;
    assert_eq!(added.status, StatusCode::CREATED);
    assert_eq!(
        added.location(),
        format!("{}/ingredients/{}", recipe.location(), added.body["id"])
    );
    assert_eq!(added.body["amount"], json!(200.01));
    assert_eq!(added.body["ingredientName"], "flour");

    let again = client
        .post(&uri, json!({ "ingredientId": flour.value(), "amount": 1, "unit": "Gram" }))
        .await;
    assert_eq!(again.status, StatusCode::CONFLICT);

    let details = client.get(recipe.location()).await;
    let ingredients = details.body["ingredients"].as_array().unwrap();
    assert_eq!(ingredients.len(), 1);
    assert_eq!(ingredients[0]["amount"], json!(200.01));
}

#[tokio::test]
async fn out_of_range_amounts_fail_validation() {
    let store = store();
    let author = seed_user(&store, "Ada").await;
    let flour = seed_ingredient(&store, "Flour").await;
    let client = TestClient::new(&store);
    let recipe = client.post("/api/recipes", chili(author)).await;
    let uri = format!("{}/ingredients", recipe.location());

    for amount in [json!(0), json!(-3), json!(100000.5)] {
        let response = client
            .post(&uri, json!({ "ingredientId": flour.value(), "amount": amount, "unit": "Gram" }))
            .await;
        assert_eq!(response.status, StatusCode::BAD_REQUEST, "amount {amount}");
        assert!(response.body["errors"]["amount"].is_array());
    }
}

#[tokio::test]
async fn tags_are_added_and_removed_over_http() {
    let store = store();
    let author = seed_user(&store, "Ada").await;
    let vegan = seed_tag(&store, "Vegan").await;
    let client = TestClient::new(&store);
    let recipe = client.post("/api/recipes", chili(author)).await;
    let tags_uri = format!("{}/tags", recipe.location());
    let tag_uri = format!("{tags_uri}/{}", vegan.value());

    let added = client.post(&tags_uri, json!({ "tagId": vegan.value() })).await;
    assert_eq!(added.status, StatusCode::NO_CONTENT);
    let duplicate = client.post(&tags_uri, json!({ "tagId": vegan.value() })).await;
    assert_eq!(duplicate.status, StatusCode::CONFLICT);

    let details = client.get(recipe.location()).await;
    assert_eq!(details.body["tags"][0]["name"], "Vegan");

    assert_eq!(client.delete(&tag_uri).await.status, StatusCode::NO_CONTENT);
    assert_eq!(client.get(recipe.location()).await.body["tags"], json!([]));
    assert_eq!(client.delete(&tag_uri).await.status, StatusCode::CONFLICT);

    let invalid = client.post(&tags_uri, json!({ "tagId": 0 })).await;
    assert_eq!(invalid.status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn invalid_recipe_requests_are_rejected() {
    let store = store();
    let author = seed_user(&store, "Ada").await;
    let client = TestClient::new(&store);

    let mut no_servings = chili(author);
    no_servings["servings"] = json!(0);
    let response = client.post("/api/recipes", no_servings).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert!(response.body["errors"]["servings"].is_array());

    let mut long_prep = chili(author);
    long_prep["prepTimeMinutes"] = json!(1441);
    assert_eq!(
        client.post("/api/recipes", long_prep).await.status,
        StatusCode::BAD_REQUEST
    );

    let unknown_author = client
        .post("/api/recipes", chili("6f1c2a4e-3b1d-4f7a-9c3e-2d5b8a7e9f01"))
        .await;
    assert_eq!(unknown_author.status, StatusCode::BAD_REQUEST);

    assert_eq!(client.get("/api/recipes").await.body, json!([]));
}

#[tokio::test]
async fn deleted_recipe_is_gone() {
    let store = store();
    let author = seed_user(&store, "Ada").await;
    let client = TestClient::new(&store);
    let recipe = client.post("/api/recipes", chili(author)).await;

    assert_eq!(client.delete(recipe.location()).await.status, StatusCode::NO_CONTENT);
    assert_eq!(client.get(recipe.location()).await.status, StatusCode::NOT_FOUND);
    assert_eq!(client.delete(recipe.location()).await.status, StatusCode::NOT_FOUND);
}
