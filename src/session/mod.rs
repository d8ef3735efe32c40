pub mod csrf;

use actix_session::Session;

use crate::registration::SignupForm;

const FLASH_KEY: &str = "flash";
const FORM_KEY: &str = "signup_form";

pub fn set_flash(session: &Session, message: &str) {
    if let Err(e) = session.insert(FLASH_KEY, message) {
        log::warn!("Could not store flash message: {e}");
    }
}

pub fn take_flash(session: &Session) -> Option<String> {
    let flash = session.get::<String>(FLASH_KEY).unwrap_or(None);
    if flash.is_some() {
        session.remove(FLASH_KEY);
    }
    flash
}

/// The sign-up form as the user last left it, or the defaults.
pub fn load_form(session: &Session) -> SignupForm {
    session
        .get::<SignupForm>(FORM_KEY)
        .unwrap_or(None)
        .unwrap_or_default()
}

pub fn save_form(session: &Session, form: &SignupForm) {
    if let Err(e) = session.insert(FORM_KEY, form) {
        log::warn!("Could not store sign-up form: {e}");
    }
}
