mod session;

pub use session::{AuthSession, MaybeAuthSession};
