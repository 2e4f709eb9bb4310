//! HTML template rendering handlers for the web dashboard.

mod login;
mod profile;

pub use login::login_handler;
pub use profile::{
    FormAction, ProfileForm, ProfilePageQuery, ProfileTemplate, profile_page_handler,
    update_profile_page_handler,
};
