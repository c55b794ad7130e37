//! HTTP-level tests: a real server on an ephemeral port, driven with reqwest.
//! Redirects are not followed so every guard decision is observable.

use std::sync::Arc;
use std::time::Duration;

use anyhow::Result;
use reqwest::{redirect, Client, StatusCode};
use tempfile::TempDir;

use edumanage::config::Config;
use edumanage::context::AppContext;

struct TestServer {
    base: String,
    client: Client,
    ctx: Arc<AppContext>,
    _tmp: TempDir,
}

impl TestServer {
    async fn start() -> Result<Self> {
        let tmp = tempfile::tempdir()?;
        let config = Config { data_dir: tmp.path().to_path_buf(), login_delay: Duration::ZERO, ..Config::default() };
        let ctx = AppContext::bootstrap(config)?;
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let served = ctx.clone();
        tokio::spawn(async move {
            if let Err(e) = edumanage::server::serve(served, listener).await {
                panic!("server error: {e}");
            }
        });
        let client = Client::builder().redirect(redirect::Policy::none()).build()?;
        Ok(Self { base: format!("http://{}", addr), client, ctx, _tmp: tmp })
    }

    fn url(&self, path: &str) -> String { format!("{}{}", self.base, path) }

    async fn get(&self, path: &str) -> Result<reqwest::Response> { Ok(self.client.get(self.url(path)).send().await?) }

    async fn form_login(&self, email: &str, password: &str) -> Result<reqwest::Response> {
        Ok(self.client.post(self.url("/login")).form(&[("email", email), ("password", password)]).send().await?)
    }
}

fn location(resp: &reqwest::Response) -> Option<String> {
    resp.headers().get("location").and_then(|v| v.to_str().ok()).map(|s| s.to_string())
}

#[tokio::test]
async fn anonymous_dashboard_request_redirects_to_login() -> Result<()> {
    let srv = TestServer::start().await?;
    let resp = srv.get("/dashboard/student").await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/login"));

    let resp = srv.get("/").await?;
    assert_eq!(location(&resp).as_deref(), Some("/login"));

    let resp = srv.get("/login").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await?.contains("action=\"/login\""));
    assert_eq!(srv.get("/register").await?.status(), StatusCode::OK);
    Ok(())
}

#[tokio::test]
async fn form_login_lands_on_role_home_and_guards_other_sections() -> Result<()> {
    let srv = TestServer::start().await?;
    let resp = srv.form_login("teacher@example.com", "password").await?;
    assert_eq!(resp.status(), StatusCode::SEE_OTHER);
    assert_eq!(location(&resp).as_deref(), Some("/dashboard/teacher"));

    let resp = srv.get("/dashboard/admin").await?;
    assert_eq!(location(&resp).as_deref(), Some("/dashboard/teacher"));

    let resp = srv.get("/login").await?;
    assert_eq!(location(&resp).as_deref(), Some("/dashboard/teacher"));

    let resp = srv.get("/dashboard/teacher").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await?;
    assert!(html.contains("<h1>Teacher Dashboard</h1>"));
    assert!(html.contains("<span class=\"avatar\">TU</span>"));
    assert!(html.contains("teacher-theme"));
    assert!(html.contains("href=\"/dashboard/teacher/analytics\""));
    assert!(!html.contains("/dashboard/admin/schools"));
    Ok(())
}

#[tokio::test]
async fn bad_credentials_return_to_login_with_error() -> Result<()> {
    let srv = TestServer::start().await?;
    let resp = srv.form_login("teacher@example.com", "nope").await?;
    assert_eq!(location(&resp).as_deref(), Some("/login?error=1"));
    let html = srv.get("/login?error=1").await?.text().await?;
    assert!(html.contains("Invalid email or password"));
    assert_eq!(srv.ctx.current(), None);
    Ok(())
}

#[tokio::test]
async fn section_pages_render_nav_titles_and_unknown_pages_404() -> Result<()> {
    let srv = TestServer::start().await?;
    srv.form_login("schooladmin@example.com", "password").await?;

    let resp = srv.get("/dashboard/school-admin/manage-students").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let html = resp.text().await?;
    assert!(html.contains("<h1>Manage Students</h1>"));
    assert!(html.contains("<a class=\"nav-item active\" href=\"/dashboard/school-admin/manage-students\""));

    let resp = srv.get("/dashboard/school-admin/payroll").await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);

    let resp = srv.get("/calendar").await?;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(resp.text().await?.contains("<h1>Calendar</h1>"));
    Ok(())
}

#[tokio::test]
async fn logout_form_clears_session() -> Result<()> {
    let srv = TestServer::start().await?;
    srv.form_login("admin@example.com", "password").await?;
    let resp = srv.client.post(srv.url("/logout")).send().await?;
    assert_eq!(location(&resp).as_deref(), Some("/login"));
    assert_eq!(srv.ctx.current(), None);
    let resp = srv.get("/dashboard/admin").await?;
    assert_eq!(location(&resp).as_deref(), Some("/login"));
    Ok(())
}

#[tokio::test]
async fn json_api_login_session_and_navigation() -> Result<()> {
    let srv = TestServer::start().await?;

    let resp = srv.client.post(srv.url("/api/login"))
        .json(&serde_json::json!({"email":"student@example.com","password":"wrong"}))
        .send().await?;
    assert_eq!(resp.status(), StatusCode::UNAUTHORIZED);

    let nav: serde_json::Value = srv.get("/api/navigation").await?.json().await?;
    assert_eq!(nav["role"], serde_json::Value::Null);
    assert_eq!(nav["entries"].as_array().map(|a| a.len()), Some(2));

    let resp = srv.client.post(srv.url("/api/login"))
        .json(&serde_json::json!({"email":"student@example.com","password":"password"}))
        .send().await?;
    assert_eq!(resp.status(), StatusCode::OK);
    let identity: serde_json::Value = resp.json().await?;
    assert_eq!(identity, serde_json::json!({"id":3,"name":"Student User","email":"student@example.com","role":"student"}));

    let session: serde_json::Value = srv.get("/api/session").await?.json().await?;
    assert_eq!(session["user"]["role"], "student");
    assert_eq!(session["pending"], false);

    let nav: serde_json::Value = srv.get("/api/navigation?path=/dashboard/student/homeworks").await?.json().await?;
    let labels: Vec<&str> = nav["entries"].as_array().unwrap().iter().filter_map(|e| e["label"].as_str()).collect();
    assert_eq!(labels, ["Dashboard", "Calendar", "My Subjects", "Homeworks"]);
    assert_eq!(nav["entries"][3]["active"], true);
    assert_eq!(nav["entries"][3]["icon"], "file-text");

    let out: serde_json::Value = srv.client.post(srv.url("/api/logout")).send().await?.json().await?;
    assert_eq!(out["status"], "ok");
    let session: serde_json::Value = srv.get("/api/session").await?.json().await?;
    assert!(session["user"].is_null());
    Ok(())
}

#[tokio::test]
async fn api_errors_are_tagged_json() -> Result<()> {
    let srv = TestServer::start().await?;

    let resp = srv.get("/api/grades").await?;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["status"], "error");
    assert_eq!(body["type"], "not_found");
    assert_eq!(body["code"], "no_such_endpoint");

    let resp = srv.client.post(srv.url("/api/login"))
        .header("content-type", "application/json")
        .body("{\"email\":\"admin@example.com\"}")
        .send().await?;
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
    let body: serde_json::Value = resp.json().await?;
    assert_eq!(body["type"], "user_input");
    assert_eq!(body["code"], "invalid_body");
    assert_eq!(srv.ctx.current(), None);

    // unknown page paths stay behind the guard and answer with HTML
    let resp = srv.get("/grades").await?;
    assert_eq!(location(&resp).as_deref(), Some("/login"));
    Ok(())
}
