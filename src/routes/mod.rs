mod admin_dashboard;
mod audit_execution;
mod code_verification;
mod dashboard;
mod home;
mod not_found;
mod profile;
mod signin;
mod signup;
mod signup_success;
mod verification_pending;
mod verify_email;

pub(crate) use admin_dashboard::AdminDashboardPage;
pub(crate) use audit_execution::AuditExecutionPage;
pub(crate) use code_verification::CodeVerificationPage;
pub(crate) use dashboard::DashboardPage;
pub(crate) use home::HomePage;
pub(crate) use not_found::NotFoundPage;
pub(crate) use profile::ProfilePage;
pub(crate) use signin::SignInPage;
pub(crate) use signup::SignUpPage;
pub(crate) use signup_success::SignupSuccessPage;
pub(crate) use verification_pending::VerificationPendingPage;
pub(crate) use verify_email::VerifyEmailPage;

use leptos::prelude::*;
use leptos_router::components::{Route, Routes};
use leptos_router::path;

pub(crate) mod paths {
    pub const HOME: &str = "/";
    pub const SIGNIN: &str = "/signin";
    pub const SIGNUP: &str = "/signup";
    pub const SIGNUP_SUCCESS: &str = "/signup-success";
    pub const VERIFICATION_PENDING: &str = "/verification-pending";
    pub const CODE_VERIFICATION: &str = "/code-verification";
    pub const VERIFY_EMAIL: &str = "/verification";
    pub const DASHBOARD: &str = "/dashboard";
    pub const ADMIN_DASHBOARD: &str = "/admin-dashboard";
    pub const PROFILE: &str = "/profile";
}

#[component]
pub fn AppRoutes() -> impl IntoView {
    view! {
        <Routes fallback=|| view! { <NotFoundPage /> }>
            <Route path=path!("/") view=HomePage />
            <Route path=path!("/signin") view=SignInPage />
            <Route path=path!("/signup") view=SignUpPage />
            <Route path=path!("/signup-success") view=SignupSuccessPage />
            <Route path=path!("/verification-pending") view=VerificationPendingPage />
            <Route path=path!("/code-verification") view=CodeVerificationPage />
            <Route path=path!("/verification/:token") view=VerifyEmailPage />
            <Route path=path!("/dashboard") view=DashboardPage />
            <Route path=path!("/audits/:id") view=AuditExecutionPage />
            <Route path=path!("/admin-dashboard") view=AdminDashboardPage />
            <Route path=path!("/profile") view=ProfilePage />
        </Routes>
    }
}
