//! /start - language selection and explicit user reset

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{
    InlineKeyboardButton, InlineKeyboardMarkup, KeyboardButton, KeyboardMarkup, KeyboardRemove,
};
use tracing::info;

use super::{BotConfig, Db, HandlerResult, Jobs, MyDialogue, menu, onboarding};
use crate::i18n::{Lang, t};

const LANG_BUTTONS: &[(&str, Lang)] = &[
    ("🇷🇺 Русский", Lang::Ru),
    ("🇺🇿 O‘zbekcha", Lang::Uz),
    ("🇺🇸 English", Lang::En),
];

pub fn lang_for_button(text: &str) -> Option<Lang> {
    LANG_BUTTONS
        .iter()
        .find(|(label, _)| *label == text)
        .map(|(_, lang)| *lang)
}

fn language_kb() -> KeyboardMarkup {
    let row = LANG_BUTTONS
        .iter()
        .map(|(label, _)| KeyboardButton::new(*label))
        .collect::<Vec<_>>();
    KeyboardMarkup::new(vec![row]).resize_keyboard()
}

pub async fn send_language_prompt(bot: &Bot, chat_id: ChatId) -> HandlerResult {
    bot.send_message(chat_id, t(Lang::Ru, "start.choose_language"))
        .reply_markup(language_kb())
        .await?;
    Ok(())
}

/// /start: a fresh chat goes straight to language selection, an existing
/// user has to confirm the reset first.
pub async fn cmd_start(bot: Bot, msg: Message, dialogue: MyDialogue, db: Db) -> HandlerResult {
    dialogue.reset().await?;
    let existing = { db.lock().await.get_user(msg.chat.id.0)? };

    match existing {
        Some(user) => {
            let lang = user.language;
            let kb = InlineKeyboardMarkup::new([vec![
                InlineKeyboardButton::callback(t(lang, "btn.yes"), "start:reset:yes"),
                InlineKeyboardButton::callback(t(lang, "btn.no"), "start:reset:no"),
            ]]);
            bot.send_message(
                msg.chat.id,
                format!(
                    "{}\n{}",
                    t(lang, "start.reset_title"),
                    t(lang, "start.reset_desc")
                ),
            )
            .reply_markup(kb)
            .await?;
        }
        None => send_language_prompt(&bot, msg.chat.id).await?,
    }
    Ok(())
}

/// A language button was pressed: persist the choice and open the
/// channel gate in that language.
pub async fn set_language(
    bot: Bot,
    msg: Message,
    db: Db,
    config: Arc<BotConfig>,
    lang: Lang,
) -> HandlerResult {
    let tg_id = msg.chat.id.0;
    {
        let db = db.lock().await;
        db.ensure_user(tg_id)?;
        db.set_language(tg_id, lang)?;
    }
    bot.send_message(msg.chat.id, t(lang, "start.lang_chosen"))
        .reply_markup(KeyboardRemove::new())
        .await?;
    onboarding::send_gate(&bot, msg.chat.id, lang, &config, false).await
}

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    data: &str,
    dialogue: MyDialogue,
    db: Db,
    registry: Jobs,
) -> HandlerResult {
    let tg_id = q.from.id.0 as i64;

    match data {
        "start:reset:no" => {
            let lang = super::user_lang(&db, tg_id).await;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "menu.welcome"))
                    .await?;
                menu::send_main_menu(&bot, msg.chat().id, lang).await?;
            }
        }
        "start:reset:yes" => {
            {
                let db = db.lock().await;
                db.delete_user(tg_id)?;
            }
            registry.cancel_all(tg_id);
            dialogue.reset().await?;
            info!("user {} reset profile", tg_id);
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(
                    msg.chat().id,
                    msg.id(),
                    t(Lang::Ru, "start.choose_language"),
                )
                .await?;
                send_language_prompt(&bot, msg.chat().id).await?;
            }
        }
        _ => {}
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_for_button() {
        assert_eq!(lang_for_button("🇷🇺 Русский"), Some(Lang::Ru));
        assert_eq!(lang_for_button("🇺🇿 O‘zbekcha"), Some(Lang::Uz));
        assert_eq!(lang_for_button("🇺🇸 English"), Some(Lang::En));
        assert_eq!(lang_for_button("Deutsch"), None);
    }
}
