// Simplepin state managers
// Managers own the stateful screens: the in-app browser view and the login form.

pub mod browser_session;
pub mod browser_view;
pub mod login_form;
