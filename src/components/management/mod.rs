//! Data layer behind the admin tables and the account forms: users,
//! payments, coordinator requests, profile and the event form.

pub mod actions;
pub mod currency;
pub mod draft;
pub mod forms;
pub mod models;

pub use actions::{
    change_password, create_event, delete_event, delete_user, list_payments, list_requests,
    list_users, process_request, register_for_event, set_user_active, submit_coordinator_request,
    update_event, update_payment_status, update_profile, update_user, Decision,
};
pub use currency::format_currency;
pub use draft::EventDraft;
pub use forms::{CoordinatorApplication, PasswordChange, ProfileUpdate, UserUpdate};
pub use models::{
    normalize_all, normalize_coordinator_request, normalize_payment, normalize_user,
    CoordinatorRequestRecord, PaymentRecord, PaymentStatus, RequestStatus, UserRecord,
};
