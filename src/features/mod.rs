pub(crate) mod admin;
pub(crate) mod audits;
pub(crate) mod auth;
pub(crate) mod me;
