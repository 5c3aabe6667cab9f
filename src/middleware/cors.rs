//! Middleware de CORS

use tower_http::cors::CorsLayer;

/// CORS permisivo - la app se sirve junto con su frontend
pub fn cors_middleware() -> CorsLayer {
    CorsLayer::very_permissive()
}
