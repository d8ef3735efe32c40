// Template context structures for Askama templates.

mod board;

use actix_session::Session;

use crate::session::{csrf, take_flash};

pub use self::board::{
    BoardTemplate, EventPanel, FormView, PollCard, RosterRow, SpecialEventCard, board_link,
};

/// Common context shared by all pages.
/// Templates access these as `ctx.app_name`, `ctx.flash`, etc.
pub struct PageContext {
    pub app_name: String,
    pub flash: Option<String>,
    pub csrf_token: String,
}

impl PageContext {
    pub fn build(session: &Session, app_name: &str) -> Self {
        Self {
            app_name: app_name.to_string(),
            flash: take_flash(session),
            csrf_token: csrf::get_or_create_token(session),
        }
    }
}
