use card_renderer::card::assets::AssetCache;
use card_renderer::card::emoji::DEFAULT_EMOJI_BASE_URL;
use card_renderer::card::renderer::{RenderingEngine, Viewport};
use card_renderer::card::template::CardTemplate;
use card_renderer::settings::Config;
use card_renderer::{AppState, init_openapi_route};
use poem::http::StatusCode;
use poem::test::TestClient;
use serde_json::Value;
use std::sync::Arc;

fn config(prefix: Option<&str>) -> Config {
    Config {
        env: "server".to_string(),
        host: "127.0.0.1".to_string(),
        port: 0,
        prefix: prefix.map(str::to_string),
        asset_dir: String::new(),
        emoji_base_url: DEFAULT_EMOJI_BASE_URL.to_string(),
        html_debug: true,
        viewport_width: 1200,
        viewport_height: 630,
    }
}

fn app_state(config: &Config) -> Arc<AppState> {
    let assets = AssetCache::load_with(|_| Ok(vec![0, 1, 2])).expect("in-memory fonts");
    Arc::new(AppState {
        template: CardTemplate::new(Arc::new(assets), config.emoji_base_url.clone()),
        engine: Arc::new(RenderingEngine::new(config.viewport()).expect("launch options")),
        html_debug: config.html_debug,
    })
}

#[tokio::test]
async fn serves_card_markup_in_debug_mode() {
    let config = config(None);
    let cli = TestClient::new(init_openapi_route(app_state(&config), &config));

    let resp = cli
        .get("/Hello%20%2A%2AWorld%2A%2A.png?theme=dark&md=1&images=a&images=b&widths=100")
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(body.starts_with("<!DOCTYPE html>"));
    assert!(body.contains("Hello <strong>World</strong>"));
    assert!(body.contains("background: #4A6B7B;"));
    assert!(body.contains(r#"src="a" width="100" height="200""#));
    assert!(body.contains(r#"src="b" width="auto" height="200""#));
}

#[tokio::test]
async fn escapes_injected_markup() {
    let config = config(None);
    let cli = TestClient::new(init_openapi_route(app_state(&config), &config));

    let resp = cli
        .get("/%3Cscript%3Ex%3C%2Fscript%3E.png?md=0&images=%22%3E%3Cscript%3E")
        .send()
        .await;
    resp.assert_status_is_ok();

    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(!body.contains("<script>"));
    assert!(body.contains("&lt;script&gt;x&lt;/script&gt;"));
}

#[tokio::test]
async fn honours_prefix() {
    let config = config(Some("/api"));
    let cli = TestClient::new(init_openapi_route(app_state(&config), &config));

    let resp = cli.get("/api/Prefixed.jpeg").send().await;
    resp.assert_status_is_ok();
    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(body.contains(r#"<div class="heading">Prefixed</div>"#));
}

#[tokio::test]
async fn undecodable_escapes_still_render() {
    let config = config(None);
    let cli = TestClient::new(init_openapi_route(app_state(&config), &config));

    for path in ["/%FF%FEok.png", "/%E0%A4%A.png"] {
        let resp = cli.get(path).send().await;
        resp.assert_status_is_ok();

        let body = resp.0.into_body().into_string().await.unwrap();
        assert!(body.starts_with("<!DOCTYPE html>"), "{path}");
        assert!(body.contains('\u{FFFD}'), "{path}");
    }

    let resp = cli.get("/%FF%FEok.png").send().await;
    let body = resp.0.into_body().into_string().await.unwrap();
    assert!(body.contains("\u{FFFD}\u{FFFD}ok"));
}

#[tokio::test]
async fn prefixed_api_routes() {
    let config = config(Some("/cards/"));
    let cli = TestClient::new(init_openapi_route(app_state(&config), &config));

    cli.get("/cards/Hi.png").send().await.assert_status_is_ok();
    cli.get("/cards/api/themes").send().await.assert_status_is_ok();
    cli.get("/cards/api/health").send().await.assert_status_is_ok();
    cli.get("/Hi.png").send().await.assert_status(StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn lists_themes() {
    let config = config(None);
    let cli = TestClient::new(init_openapi_route(app_state(&config), &config));

    let resp = cli.get("/api/themes").send().await;
    resp.assert_status_is_ok();

    let body = resp.0.into_body().into_string().await.unwrap();
    let listing: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(listing["themes"], serde_json::json!(["light", "dark"]));
    assert_eq!(listing["layouts"], serde_json::json!(["stacked", "side-by-side"]));
}

#[tokio::test]
async fn reports_health() {
    let config = config(None);
    let cli = TestClient::new(init_openapi_route(app_state(&config), &config));

    let resp = cli.get("/api/health").send().await;
    resp.assert_status_is_ok();

    let body = resp.0.into_body().into_string().await.unwrap();
    let health: Value = serde_json::from_str(&body).unwrap();
    assert_eq!(health["status"], "healthy");
    assert_eq!(health["assets"]["fonts"], 3);
    assert_eq!(health["browser"]["running"], false);
    assert_eq!(health["browser"]["viewport"], serde_json::json!([1200, 630]));
}
