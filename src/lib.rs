//! fitonomics - Telegram fitness and nutrition tracking bot

pub mod bot;
pub mod content;
pub mod db;
pub mod i18n;
pub mod sched;
pub mod sleep;
pub mod tips;

pub use db::Database;
