mod session_repository;
mod time_interval_repository;
mod user_repository;

pub use session_repository::SessionRepository;
pub use time_interval_repository::TimeIntervalRepository;
pub use user_repository::UserRepository;
