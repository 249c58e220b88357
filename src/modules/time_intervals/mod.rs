pub mod handlers;
pub mod routes;

pub use routes::time_interval_routes;
