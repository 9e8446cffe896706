//! Auth feature: durable session store, session state and guards, the
//! signup → email-verification → approval-code pipeline, and the six-digit
//! code entry model. Authentication state lives here, not in the UI; the
//! backend remains the authority on access control.
//!
//! Flow overview: signup parks a pending-verification email in the store and
//! routes through the redirect and pending screens; an emailed link confirms
//! the address; after admin approval, sign-in answers `approval_code_required`
//! and the code screen completes the login.

pub(crate) mod client;
pub(crate) mod code;
pub(crate) mod guards;
pub(crate) mod state;
pub(crate) mod store;
pub(crate) mod types;
