mod user;
mod session;
mod time_interval;

pub use user::*;
pub use session::*;
pub use time_interval::*;
