mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn todo_crud_cycle() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let data = common::register(server, &client, "alice.crud@x.com", "acme-crud").await?;
    let token = data["token"].as_str().unwrap();
    let user_id = data["user"]["id"].as_str().unwrap();

    // Create
    let res = client
        .post(format!("{}/todos", server.base_url))
        .bearer_auth(token)
        .json(&json!({ "title": "buy milk", "description": "2%" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::CREATED);
    let created = res.json::<serde_json::Value>().await?;
    let todo = &created["data"];
    assert_eq!(todo["title"], "buy milk");
    assert_eq!(todo["completed"], false);
    assert_eq!(todo["ownerId"], user_id);
    let todo_id = todo["id"].as_str().unwrap().to_string();

    // List returns exactly that todo
    let res = client
        .get(format!("{}/todos", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let listed = res.json::<serde_json::Value>().await?;
    let items = listed["data"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["id"], todo_id.as_str());

    // Get
    let res = client
        .get(format!("{}/todos/{}", server.base_url, todo_id))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    // Update replaces title/description and keeps completed
    let res = client
        .put(format!("{}/todos/{}", server.base_url, todo_id))
        .bearer_auth(token)
        .json(&json!({ "title": "buy oat milk", "description": "barista" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let updated = res.json::<serde_json::Value>().await?;
    assert_eq!(updated["data"]["title"], "buy oat milk");
    assert_eq!(updated["data"]["completed"], false);

    // Complete, twice - second call still succeeds and stays completed
    for _ in 0..2 {
        let res = client
            .put(format!("{}/todos/{}/complete", server.base_url, todo_id))
            .bearer_auth(token)
            .send()
            .await?;
        assert_eq!(res.status(), StatusCode::OK);
        let completed = res.json::<serde_json::Value>().await?;
        assert_eq!(completed["data"]["completed"], true);
    }

    // Delete, then the id is gone
    let res = client
        .delete(format!("{}/todos/{}", server.base_url, todo_id))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);

    let res = client
        .get(format!("{}/todos/{}", server.base_url, todo_id))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    Ok(())
}

#[tokio::test]
async fn create_rejects_blank_title() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let data = common::register(server, &client, "alice.blank@x.com", "acme-blank").await?;
    let token = data["token"].as_str().unwrap();

    let res = client
        .post(format!("{}/todos", server.base_url))
        .bearer_auth(token)
        .json(&json!({ "title": "   ", "description": "2%" }))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR", "unexpected body: {}", body);

    // Nothing was created
    let res = client
        .get(format!("{}/todos", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;
    let listed = res.json::<serde_json::Value>().await?;
    assert_eq!(listed["data"], json!([]));
    Ok(())
}

#[tokio::test]
async fn todo_routes_require_a_valid_token() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    // No credential at all
    let res = client
        .get(format!("{}/todos", server.base_url))
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Unauthorized");

    // A tampered token fails with the same message
    let data = common::register(server, &client, "alice.tamper@x.com", "acme-tamper").await?;
    let mut token = data["token"].as_str().unwrap().to_string();
    let flipped = if token.ends_with('A') { 'B' } else { 'A' };
    token.pop();
    token.push(flipped);

    let res = client
        .get(format!("{}/todos", server.base_url))
        .bearer_auth(&token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["message"], "Unauthorized");
    Ok(())
}

#[tokio::test]
async fn unknown_and_malformed_todo_ids_are_not_found() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let data = common::register(server, &client, "alice.ids@x.com", "acme-ids").await?;
    let token = data["token"].as_str().unwrap();

    let res = client
        .get(format!(
            "{}/todos/00000000-0000-0000-0000-000000000000",
            server.base_url
        ))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);

    let res = client
        .get(format!("{}/todos/not-a-uuid", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::NOT_FOUND);
    Ok(())
}
