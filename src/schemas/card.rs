use poem_openapi::{
    ApiResponse, Object,
    payload::{Attachment, Html, Json},
};

use super::common::InternalServerErrorResponse;

#[derive(Object, Debug, Clone)]
pub struct ThemeListing {
    /// Accepted values of the `theme` query parameter
    pub themes: Vec<String>,

    /// Accepted values of the `layout` query parameter
    pub layouts: Vec<String>,
}

#[derive(ApiResponse)]
pub enum CardResponse {
    /// PNG Image
    #[oai(status = 200, content_type = "image/png")]
    Png(Attachment<Vec<u8>>),

    /// JPEG Image
    #[oai(status = 200, content_type = "image/jpeg")]
    Jpeg(Attachment<Vec<u8>>),

    /// Card markup, served instead of an image when HTML debugging is on
    #[oai(status = 200)]
    Html(Html<String>),

    #[oai(status = 500)]
    InternalServerError(Json<InternalServerErrorResponse>),
}

#[derive(ApiResponse)]
pub enum ListThemesResponse {
    #[oai(status = 200, content_type = "application/json")]
    Ok(Json<ThemeListing>),
}
