pub mod handlers;
pub mod routes;
pub mod templates;

pub use routes::page_routes;
