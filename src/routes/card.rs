use std::sync::Arc;

use poem::{Request, handler, web::Data};
use poem_openapi::{
    OpenApi, Tags,
    payload::{Attachment, Html, Json},
};

use crate::{
    AppState,
    card::request::{CardRequest, FileType, Layout, Theme},
    schemas::{
        card::{CardResponse, ListThemesResponse, ThemeListing},
        common::InternalServerErrorResponse,
    },
};

/// Render Card
///
/// Render a card image from its URL. The last path segment is the
/// percent-encoded headline followed by `.png` or `.jpeg`. The segment is read
/// from the raw request path, so escapes that do not decode to UTF-8 still
/// reach the lossy headline decoder instead of being rejected by the router.
///
/// # Query Parameters
/// - `theme`: `light` (default) or `dark`
/// - `layout`: `stacked` (default) or `side-by-side`
/// - `md`: `1` to read the headline as markdown
/// - `fontSize`: CSS length, default `48px`
/// - `images`, `widths`, `heights`: repeated, index-aligned
///
/// # Example
/// `/Hello%20**World**.png?theme=dark&md=1&images=https%3A%2F%2Fx%2Fa.svg&widths=100`
#[handler]
pub async fn card(req: &Request, state: Data<&Arc<AppState>>) -> CardResponse {
    let uri = req.uri();
    let raw_segment = uri.path().rsplit('/').next().unwrap_or_default();
    let card = CardRequest::from_uri_parts(raw_segment, uri.query());

    tracing::info!(
        "Rendering card: file={}, theme={}, layout={}, type={}, images={}",
        raw_segment,
        card.theme.as_str(),
        card.layout.as_str(),
        card.file_type.as_str(),
        card.images.len()
    );

    let html = state.template.render(&card);

    if state.html_debug {
        return CardResponse::Html(Html(html));
    }

    let result = match state.engine.screenshot(html, card.file_type).await {
        Ok(res) => res,
        Err(e) => {
            tracing::error!("Screenshot error: {}", e);
            return CardResponse::InternalServerError(Json(InternalServerErrorResponse::new(
                "route.card",
                "card",
                "Screenshot failed",
                &e.to_string(),
            )));
        }
    };

    tracing::info!("Card rendered successfully, size: {} bytes", result.len());

    match card.file_type {
        FileType::Png => CardResponse::Png(Attachment::new(result)),
        FileType::Jpeg => CardResponse::Jpeg(Attachment::new(result)),
    }
}

#[derive(Tags)]
enum ApiCardTags {
    Card,
}

pub struct ApiCard;

#[OpenApi()]
impl ApiCard {
    /// List Themes
    ///
    /// Get the themes and layouts a card can be rendered with
    #[oai(path = "/themes", method = "get", tag = "ApiCardTags::Card")]
    async fn list_themes(&self) -> ListThemesResponse {
        let listing = ThemeListing {
            themes: [Theme::Light, Theme::Dark]
                .iter()
                .map(|t| t.as_str().to_string())
                .collect(),
            layouts: [Layout::Stacked, Layout::SideBySide]
                .iter()
                .map(|l| l.as_str().to_string())
                .collect(),
        };

        ListThemesResponse::Ok(Json(listing))
    }

    #[oai(path = "/health", method = "get")]
    async fn health(&self, state: Data<&Arc<AppState>>) -> Json<serde_json::Value> {
        let viewport = state.engine.viewport();

        Json(serde_json::json!({
            "status": "healthy",
            "assets": {
                "fonts": state.template.assets().fonts().len()
            },
            "browser": {
                "running": state.engine.is_browser_running(),
                "viewport": [viewport.width, viewport.height]
            },
            "html_debug": state.html_debug
        }))
    }
}
