pub mod config;
pub mod handlers;
pub mod render;
pub mod routes;

pub use config::Config;
pub use handlers::AppState;
pub use routes::create_router;
