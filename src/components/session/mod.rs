//! Session bootstrapping: token claims, role routing and persistence.

mod handle;
pub mod models;
pub mod store;

pub use handle::SessionHandle;
pub use models::{decode_claims, landing_route, Claims, Session, SessionUser, UserRole};
pub use store::{FileSessionStore, MemorySessionStore, SessionStore};
