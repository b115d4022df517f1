// Export components
pub mod api;
pub mod calendar;
pub mod dashboard;
pub mod management;
pub mod report;
pub mod session;

// Re-export the handles every command needs
pub use api::ApiClient;
pub use session::SessionHandle;
