//! Reminders menu - master switch and an overview of configured times

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::{Db, HandlerResult, Jobs};
use crate::i18n::{Lang, t};

async fn status_text(lang: Lang, db: &Db, tg_id: i64) -> Result<String, anyhow::Error> {
    let (enabled, workout_pref, settings) = {
        let db = db.lock().await;
        let user = db.ensure_user(tg_id)?;
        (user.reminders_enabled, user.workout_pref, db.get_settings(tg_id)?)
    };

    let mut text = format!(
        "{}\n\n{}",
        t(lang, "reminders.title"),
        if enabled {
            t(lang, "reminders.enabled")
        } else {
            t(lang, "reminders.disabled")
        },
    );
    if let Some(pref) = workout_pref {
        text.push_str(&format!(
            "\n\n{}: {}",
            t(lang, "settings.workout_time"),
            t(lang, pref.i18n_key()),
        ));
    }
    if let Some(settings) = settings {
        let lines = [
            ("settings.time.sleep", settings.sleep_time),
            ("settings.time.wake", settings.wake_time),
            ("settings.time.breakfast", settings.breakfast_time),
            ("settings.time.lunch", settings.lunch_time),
            ("settings.time.dinner", settings.dinner_time),
        ];
        for (key, value) in lines {
            if let Some(value) = value {
                text.push_str(&format!("\n{}: {}", t(lang, key), value));
            }
        }
    }
    Ok(text)
}

fn toggle_kb(lang: Lang, enabled: bool) -> InlineKeyboardMarkup {
    let (label, data) = if enabled {
        (t(lang, "reminders.turn_off"), "rem:off")
    } else {
        (t(lang, "reminders.turn_on"), "rem:on")
    };
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(label, data)]])
}

pub async fn open_menu(bot: &Bot, chat_id: ChatId, lang: Lang, db: &Db) -> HandlerResult {
    let tg_id = chat_id.0;
    let enabled = { db.lock().await.ensure_user(tg_id)?.reminders_enabled };
    bot.send_message(chat_id, status_text(lang, db, tg_id).await?)
        .reply_markup(toggle_kb(lang, enabled))
        .await?;
    Ok(())
}

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    data: &str,
    db: Db,
    registry: Jobs,
) -> HandlerResult {
    let tg_id = q.from.id.0 as i64;
    let lang = super::user_lang(&db, tg_id).await;

    let enabled = match data {
        "rem:on" => true,
        "rem:off" => false,
        _ => {
            bot.answer_callback_query(q.id).await?;
            return Ok(());
        }
    };

    db.lock().await.set_reminders_enabled(tg_id, enabled)?;
    if enabled {
        super::reschedule_user(&db, &registry, tg_id).await?;
    } else {
        registry.cancel_all(tg_id);
    }

    if let Some(msg) = q.message.as_ref() {
        bot.edit_message_text(msg.chat().id, msg.id(), status_text(lang, &db, tg_id).await?)
            .reply_markup(toggle_kb(lang, enabled))
            .await?;
    }
    bot.answer_callback_query(q.id).await?;
    Ok(())
}
