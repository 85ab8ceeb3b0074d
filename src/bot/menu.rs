//! Main menu - persistent reply keyboard and button routing

use teloxide::prelude::*;
use teloxide::types::{KeyboardButton, KeyboardMarkup};

use super::{Db, HandlerResult};
use crate::i18n::{Lang, t};

/// Sections reachable from the persistent keyboard.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Workouts,
    Meals,
    Sleep,
    Progress,
    Profile,
    Settings,
    Reminders,
    Help,
    BackToMain,
}

const MENU_KEYS: &[(&str, MenuAction)] = &[
    ("menu.workouts", MenuAction::Workouts),
    ("menu.meals", MenuAction::Meals),
    ("menu.sleep", MenuAction::Sleep),
    ("menu.progress", MenuAction::Progress),
    ("menu.profile", MenuAction::Profile),
    ("menu.settings", MenuAction::Settings),
    ("menu.reminders", MenuAction::Reminders),
    ("menu.help", MenuAction::Help),
    ("menu.back_to_main", MenuAction::BackToMain),
];

/// Match a message against the menu labels of every language, since the
/// keyboard on screen may predate a language switch.
pub fn action_for(text: &str) -> Option<MenuAction> {
    for lang in [Lang::Ru, Lang::Uz, Lang::En] {
        for (key, action) in MENU_KEYS {
            if t(lang, key) == text {
                return Some(*action);
            }
        }
    }
    None
}

/// Persistent main menu keyboard, 8 buttons in 4 rows.
pub fn main_menu_kb(lang: Lang) -> KeyboardMarkup {
    KeyboardMarkup::new(vec![
        vec![
            KeyboardButton::new(t(lang, "menu.workouts")),
            KeyboardButton::new(t(lang, "menu.meals")),
        ],
        vec![
            KeyboardButton::new(t(lang, "menu.sleep")),
            KeyboardButton::new(t(lang, "menu.progress")),
        ],
        vec![
            KeyboardButton::new(t(lang, "menu.profile")),
            KeyboardButton::new(t(lang, "menu.settings")),
        ],
        vec![
            KeyboardButton::new(t(lang, "menu.reminders")),
            KeyboardButton::new(t(lang, "menu.help")),
        ],
    ])
    .resize_keyboard()
    .persistent()
}

pub async fn send_main_menu(bot: &Bot, chat_id: ChatId, lang: Lang) -> HandlerResult {
    bot.send_message(chat_id, t(lang, "menu.welcome"))
        .reply_markup(main_menu_kb(lang))
        .await?;
    Ok(())
}

pub async fn send_help(bot: &Bot, chat_id: ChatId, lang: Lang) -> HandlerResult {
    bot.send_message(
        chat_id,
        format!("{}\n\n{}", t(lang, "help.title"), t(lang, "help.body")),
    )
    .await?;
    Ok(())
}

pub async fn handle_action(bot: Bot, msg: Message, db: Db, action: MenuAction) -> HandlerResult {
    let chat_id = msg.chat.id;
    let lang = super::user_lang(&db, chat_id.0).await;

    match action {
        MenuAction::Workouts => super::workouts::open_menu(&bot, chat_id, lang, &db).await,
        MenuAction::Meals => super::meals::open_menu(&bot, chat_id, lang).await,
        MenuAction::Sleep => super::sleep::open_menu(&bot, chat_id, lang).await,
        MenuAction::Progress => super::progress::show_summary(&bot, chat_id, lang, &db).await,
        MenuAction::Profile => super::profile::show(&bot, chat_id, lang, &db).await,
        MenuAction::Settings => super::settings::open_menu(&bot, chat_id, lang).await,
        MenuAction::Reminders => super::reminders::open_menu(&bot, chat_id, lang, &db).await,
        MenuAction::Help => send_help(&bot, chat_id, lang).await,
        MenuAction::BackToMain => send_main_menu(&bot, chat_id, lang).await,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_action_for_matches_every_language() {
        assert_eq!(action_for("🏋️ Тренировки"), Some(MenuAction::Workouts));
        assert_eq!(action_for("🏋️ Mashqlar"), Some(MenuAction::Workouts));
        assert_eq!(action_for("🏋️ Workouts"), Some(MenuAction::Workouts));
        assert_eq!(action_for("❓ Help"), Some(MenuAction::Help));
    }

    #[test]
    fn test_action_for_ignores_free_text() {
        assert_eq!(action_for("hello"), None);
        assert_eq!(action_for(""), None);
    }
}
