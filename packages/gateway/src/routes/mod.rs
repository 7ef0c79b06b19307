use utoipa_axum::router::OpenApiRouter;
use utoipa_axum::routes;

use crate::handlers;
use crate::state::AppState;

/// Routes mounted under `/api`.
pub fn api_routes() -> OpenApiRouter<AppState> {
    let upload = OpenApiRouter::new()
        .routes(routes!(handlers::thumbnail::upload_thumbnail))
        .layer(handlers::thumbnail::thumbnail_upload_body_limit());

    OpenApiRouter::new()
        .routes(routes!(handlers::video::get_video))
        .merge(upload)
}

/// Public retrieval routes for stored assets.
pub fn asset_routes() -> OpenApiRouter<AppState> {
    OpenApiRouter::new().routes(routes!(handlers::assets::serve_asset))
}
