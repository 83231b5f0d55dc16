use std::process::{Child, Command, Stdio};
use std::sync::OnceLock;
use std::time::{Duration, Instant};

use anyhow::{Context, Result};
use reqwest::StatusCode;

/// Root domain the spawned server is configured with; tenant subdomains in
/// assertions hang off this.
pub const ROOT_DOMAIN: &str = "todo.test";

static SERVER: OnceLock<TestServer> = OnceLock::new();

pub struct TestServer {
    pub port: u16,
    pub base_url: String,
    child: Child,
}

impl TestServer {
    fn spawn() -> Result<Self> {
        // Pick an unused port for isolation
        let port = portpicker::pick_unused_port().context("failed to pick free port")?;
        let base_url = format!("http://127.0.0.1:{}", port);

        // Spawn the already-built binary to keep start fast during tests
        // Assumes debug profile; adjust if you run tests with --release
        let mut cmd = Command::new("target/debug/todo-api-rust");
        cmd.env("TODO_API_PORT", port.to_string())
            .env("ROOT_DOMAIN", ROOT_DOMAIN)
            .env("JWT_SECRET", "integration-test-secret")
            .stdin(Stdio::null())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit());

        let child = cmd.spawn().context("failed to spawn server binary")?;

        Ok(Self { port, base_url, child })
    }

    async fn wait_ready(&self, timeout: Duration) -> Result<()> {
        let client = reqwest::Client::new();
        let deadline = Instant::now() + timeout;
        loop {
            if Instant::now() > deadline { break; }
            let url = format!("{}/health", self.base_url);
            match client.get(&url).send().await {
                Ok(resp) => {
                    if resp.status() == StatusCode::OK {
                        return Ok(());
                    }
                }
                Err(_) => {}
            }
            tokio::time::sleep(Duration::from_millis(150)).await;
        }
        anyhow::bail!("server did not become ready on {} within {:?}", self.base_url, timeout)
    }
}

pub async fn ensure_server() -> Result<&'static TestServer> {
    // Use stable get_or_init and convert init errors into a panic with context.
    let server = SERVER.get_or_init(|| TestServer::spawn().expect("failed to spawn server binary"));
    server.wait_ready(Duration::from_secs(10)).await?;
    Ok(server)
}

/// Register a user with a fresh tenant and return the response data object
/// (token, user, tenant, redirectUrl).
#[allow(dead_code)]
pub async fn register(
    server: &TestServer,
    client: &reqwest::Client,
    email: &str,
    subdomain: &str,
) -> Result<serde_json::Value> {
    let res = client
        .post(format!("{}/register", server.base_url))
        .json(&serde_json::json!({
            "email": email,
            "password": "password-1",
            "tenantName": subdomain,
            "domains": subdomain
        }))
        .send()
        .await?;

    anyhow::ensure!(
        res.status() == StatusCode::CREATED,
        "registration failed with status {}",
        res.status()
    );

    let body = res.json::<serde_json::Value>().await?;
    anyhow::ensure!(body["success"] == true, "unexpected body: {}", body);
    Ok(body["data"].clone())
}
