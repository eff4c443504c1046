// HTTP surface: routing, handlers and the shapes they exchange
pub mod extract;
pub mod handlers;
pub mod mapper;
pub mod models;
pub mod routes;

pub use handlers::AppState;
pub use routes::create_router;
