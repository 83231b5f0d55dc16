mod common;

use anyhow::Result;
use reqwest::StatusCode;
use serde_json::json;

#[tokio::test]
async fn health_endpoint_responds() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .get(format!("{}/health", server.base_url))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK, "unexpected status: {}", res.status());

    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"]["status"], "ok", "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn register_creates_user_tenant_and_session() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let data = common::register(server, &client, "alice.reg@x.com", "acme-reg").await?;

    // Tenant is bound to the canonical subdomain origin
    let expected_domain = format!("https://acme-reg.{}", common::ROOT_DOMAIN);
    assert_eq!(data["tenant"]["domains"], json!([expected_domain]));

    // User is returned without any credential material
    assert_eq!(data["user"]["email"], "alice.reg@x.com");
    assert!(data["user"].get("password").is_none(), "body leaks credentials: {}", data);
    assert!(data["user"].get("passwordHash").is_none(), "body leaks credentials: {}", data);

    // Redirect embeds the issued token as a one-time URL parameter
    let token = data["token"].as_str().expect("token missing");
    let redirect = data["redirectUrl"].as_str().expect("redirectUrl missing");
    assert_eq!(redirect, format!("{}/todos?auth={}", expected_domain, token));

    // The token's claim actually resolves: a todos listing succeeds
    let res = client
        .get(format!("{}/todos", server.base_url))
        .bearer_auth(token)
        .send()
        .await?;
    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["data"], json!([]));

    Ok(())
}

#[tokio::test]
async fn duplicate_email_registration_conflicts() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    common::register(server, &client, "alice.dup@x.com", "acme-dup").await?;

    let res = client
        .post(format!("{}/register", server.base_url))
        .json(&json!({
            "email": "alice.dup@x.com",
            "password": "other-password",
            "tenantName": "Other",
            "domains": "other-dup"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::CONFLICT);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "CONFLICT", "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn register_rejects_invalid_subdomain() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let res = client
        .post(format!("{}/register", server.base_url))
        .json(&json!({
            "email": "mallory@x.com",
            "password": "pw",
            "tenantName": "Mallory",
            "domains": "not a subdomain!"
        }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body = res.json::<serde_json::Value>().await?;
    assert_eq!(body["code"], "VALIDATION_ERROR", "unexpected body: {}", body);
    Ok(())
}

#[tokio::test]
async fn login_mints_a_tenant_scoped_session() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    let registered = common::register(server, &client, "alice.login@x.com", "acme-login").await?;

    let res = client
        .post(format!("{}/login", server.base_url))
        .json(&json!({ "email": "alice.login@x.com", "password": "password-1" }))
        .send()
        .await?;

    assert_eq!(res.status(), StatusCode::OK);
    let body = res.json::<serde_json::Value>().await?;
    let data = &body["data"];

    assert_eq!(data["tenant"]["id"], registered["tenant"]["id"]);
    let token = data["token"].as_str().expect("token missing");
    let redirect = data["redirectUrl"].as_str().expect("redirectUrl missing");
    assert_eq!(
        redirect,
        format!("https://acme-login.{}/todos?auth={}", common::ROOT_DOMAIN, token)
    );
    Ok(())
}

#[tokio::test]
async fn login_failures_are_indistinguishable() -> Result<()> {
    let server = common::ensure_server().await?;
    let client = reqwest::Client::new();

    common::register(server, &client, "alice.creds@x.com", "acme-creds").await?;

    let wrong_pw = client
        .post(format!("{}/login", server.base_url))
        .json(&json!({ "email": "alice.creds@x.com", "password": "wrong" }))
        .send()
        .await?;
    assert_eq!(wrong_pw.status(), StatusCode::UNAUTHORIZED);
    let wrong_pw_body = wrong_pw.json::<serde_json::Value>().await?;

    let unknown = client
        .post(format!("{}/login", server.base_url))
        .json(&json!({ "email": "nobody@x.com", "password": "password-1" }))
        .send()
        .await?;
    assert_eq!(unknown.status(), StatusCode::UNAUTHORIZED);
    let unknown_body = unknown.json::<serde_json::Value>().await?;

    // Same message either way; existence of the account is not revealed
    assert_eq!(wrong_pw_body["message"], unknown_body["message"]);
    Ok(())
}
