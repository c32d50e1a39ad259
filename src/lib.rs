use std::sync::Arc;

use poem::{
    EndpointExt, Route, get,
    middleware::{AddData, AddDataEndpoint, Cors, CorsEndpoint},
};
use poem_openapi::OpenApiService;

use crate::card::renderer::RenderingEngine;
use crate::card::template::CardTemplate;
use crate::settings::Config;

use crate::routes::card::{ApiCard, card as card_handler};

pub mod card;
pub mod routes;
pub mod schemas;
pub mod settings;

pub struct AppState {
    pub template: CardTemplate,
    pub engine: Arc<RenderingEngine>,
    /// Serve the card markup instead of a screenshot.
    pub html_debug: bool,
}

pub fn init_openapi_route(
    app_state: Arc<AppState>,
    config: &Config,
) -> CorsEndpoint<AddDataEndpoint<Route, Arc<AppState>>> {
    let prefix = config.prefix.clone().unwrap_or("/".to_string());
    let base = prefix.trim_end_matches('/');
    let api_path = format!("{base}/api");

    // The card is a plain handler: its raw path segment must reach the lossy
    // decoder even when it is not valid UTF-8.
    let openapi_route =
        OpenApiService::new(ApiCard, "Card Renderer API", "1.0").server(api_path.clone());

    let openapi_json_endpoint = openapi_route.spec_endpoint();
    let ui = openapi_route.swagger_ui();
    Route::new()
        .at(format!("{base}/:file"), get(card_handler))
        .nest(api_path, openapi_route)
        .nest("/docs", ui)
        .at("openapi.json", openapi_json_endpoint)
        .with(AddData::new(app_state))
        .with(Cors::new())
}
