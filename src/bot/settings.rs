//! Settings - language, budget, workout slot and reminder times
//!
//! Every change that affects a trigger reschedules the user's jobs right
//! away, replacing the old ones.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::{Db, HandlerResult, Jobs, MyDialogue, State};
use crate::content::{Budget, TimeOfDay};
use crate::db::{TimeField, UserSettings};
use crate::i18n::{Lang, t};
use crate::sleep::{format_hhmm, parse_hhmm};

const TIME_FIELDS: &[(TimeField, &str)] = &[
    (TimeField::Sleep, "settings.time.sleep"),
    (TimeField::Wake, "settings.time.wake"),
    (TimeField::Breakfast, "settings.time.breakfast"),
    (TimeField::Lunch, "settings.time.lunch"),
    (TimeField::Dinner, "settings.time.dinner"),
];

fn menu_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback(
            t(lang, "settings.language"),
            "settings:lang",
        )],
        vec![InlineKeyboardButton::callback(
            t(lang, "settings.budget"),
            "settings:budget",
        )],
        vec![InlineKeyboardButton::callback(
            t(lang, "settings.workout_time"),
            "settings:workout",
        )],
        vec![InlineKeyboardButton::callback(
            t(lang, "settings.times"),
            "settings:times",
        )],
    ])
}

fn language_kb() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback("🇷🇺 Русский", "lang:ru")],
        vec![InlineKeyboardButton::callback("🇺🇿 O‘zbekcha", "lang:uz")],
        vec![InlineKeyboardButton::callback("🇺🇸 English", "lang:en")],
    ])
}

fn budget_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([Budget::Low, Budget::Mid, Budget::High].map(|b| {
        vec![InlineKeyboardButton::callback(
            t(lang, b.i18n_key()),
            format!("set:budget:{}", b.key()),
        )]
    }))
}

fn workout_time_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        [TimeOfDay::Morning, TimeOfDay::Day, TimeOfDay::Evening].map(|p| {
            vec![InlineKeyboardButton::callback(
                t(lang, p.i18n_key()),
                format!("set:workout:{}", p.key()),
            )]
        }),
    )
}

fn time_fields_kb(lang: Lang) -> InlineKeyboardMarkup {
    let rows = TIME_FIELDS
        .iter()
        .map(|(field, key)| {
            vec![InlineKeyboardButton::callback(
                t(lang, *key),
                format!("set:time:{}", field.key()),
            )]
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(rows)
}

/// Configured times, one line per field, "—" when unset.
fn times_overview(lang: Lang, settings: Option<&UserSettings>) -> String {
    let value = |v: Option<&String>| v.map(String::as_str).unwrap_or("—").to_string();
    let empty = UserSettings::default();
    let s = settings.unwrap_or(&empty);
    TIME_FIELDS
        .iter()
        .map(|(field, key)| {
            let v = match field {
                TimeField::Sleep => s.sleep_time.as_ref(),
                TimeField::Wake => s.wake_time.as_ref(),
                TimeField::Breakfast => s.breakfast_time.as_ref(),
                TimeField::Lunch => s.lunch_time.as_ref(),
                TimeField::Dinner => s.dinner_time.as_ref(),
            };
            format!("{}: {}", t(lang, key), value(v))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub async fn open_menu(bot: &Bot, chat_id: ChatId, lang: Lang) -> HandlerResult {
    bot.send_message(chat_id, t(lang, "settings.title"))
        .reply_markup(menu_kb(lang))
        .await?;
    Ok(())
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
    let lang = super::user_lang(&db, tg_id).await;
    let Some(msg) = q.message.as_ref() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };
    let (chat_id, msg_id) = (msg.chat().id, msg.id());

    match data {
        "settings:lang" => {
            bot.edit_message_text(chat_id, msg_id, t(lang, "settings.choose_language"))
                .reply_markup(language_kb())
                .await?;
        }
        "settings:budget" => {
            bot.edit_message_text(chat_id, msg_id, t(lang, "settings.choose_budget"))
                .reply_markup(budget_kb(lang))
                .await?;
        }
        "settings:workout" => {
            bot.edit_message_text(chat_id, msg_id, t(lang, "settings.choose_workout_time"))
                .reply_markup(workout_time_kb(lang))
                .await?;
        }
        "settings:times" => {
            let settings = { db.lock().await.get_settings(tg_id)? };
            let text = format!(
                "{}\n\n{}",
                t(lang, "settings.choose_time_field"),
                times_overview(lang, settings.as_ref()),
            );
            bot.edit_message_text(chat_id, msg_id, text)
                .reply_markup(time_fields_kb(lang))
                .await?;
        }
        _ => {
            if let Some(code) = data.strip_prefix("lang:") {
                let new_lang = Lang::from_code(code);
                db.lock().await.set_language(tg_id, new_lang)?;
                bot.edit_message_text(chat_id, msg_id, t(new_lang, "settings.title"))
                    .reply_markup(menu_kb(new_lang))
                    .await?;
                bot.answer_callback_query(q.id)
                    .text(t(new_lang, "settings.saved"))
                    .await?;
                return Ok(());
            }
            if let Some(key) = data.strip_prefix("set:budget:") {
                if let Some(budget) = Budget::from_key(key) {
                    db.lock().await.set_budget(tg_id, budget)?;
                }
                bot.edit_message_text(chat_id, msg_id, t(lang, "settings.title"))
                    .reply_markup(menu_kb(lang))
                    .await?;
                bot.answer_callback_query(q.id)
                    .text(t(lang, "settings.saved"))
                    .await?;
                return Ok(());
            }
            if let Some(key) = data.strip_prefix("set:workout:") {
                if let Some(pref) = TimeOfDay::from_key(key) {
                    db.lock().await.set_workout_pref(tg_id, pref)?;
                    super::reschedule_user(&db, &registry, tg_id).await?;
                }
                bot.edit_message_text(chat_id, msg_id, t(lang, "settings.title"))
                    .reply_markup(menu_kb(lang))
                    .await?;
                bot.answer_callback_query(q.id)
                    .text(t(lang, "settings.saved"))
                    .await?;
                return Ok(());
            }
            if let Some(key) = data.strip_prefix("set:time:") {
                if let Some(field) = TimeField::from_key(key) {
                    dialogue.update(State::TimeSetting(field)).await?;
                    bot.edit_message_text(chat_id, msg_id, t(lang, "settings.enter_time"))
                        .await?;
                }
            }
        }
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

/// Manual "HH:MM" entry for one reminder time. Valid input stores the
/// value and replaces the derived job; invalid input re-prompts.
pub async fn handle_time_text(
    bot: Bot,
    msg: Message,
    text: &str,
    dialogue: MyDialogue,
    db: Db,
    registry: Jobs,
    field: TimeField,
) -> HandlerResult {
    let tg_id = msg.chat.id.0;
    let lang = super::user_lang(&db, tg_id).await;

    let Some((hour, minute)) = parse_hhmm(text) else {
        bot.send_message(msg.chat.id, t(lang, "invalid.time")).await?;
        return Ok(());
    };

    let value = format_hhmm(hour, minute);
    {
        let db = db.lock().await;
        db.ensure_user(tg_id)?;
        db.set_time(tg_id, field, &value)?;
    }
    super::reschedule_user(&db, &registry, tg_id).await?;
    dialogue.reset().await?;

    let settings = { db.lock().await.get_settings(tg_id)? };
    let confirmation = format!(
        "{}\n\n{}",
        t(lang, "settings.saved"),
        times_overview(lang, settings.as_ref()),
    );
    bot.send_message(msg.chat.id, confirmation)
        .reply_markup(time_fields_kb(lang))
        .await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_times_overview_marks_unset_fields() {
        let overview = times_overview(Lang::En, None);
        assert_eq!(overview.matches('—').count(), TIME_FIELDS.len());
    }

    #[test]
    fn test_times_overview_shows_values() {
        let settings = UserSettings {
            tg_id: 1,
            sleep_time: Some("23:00".to_string()),
            wake_time: None,
            breakfast_time: Some("08:30".to_string()),
            lunch_time: None,
            dinner_time: None,
        };
        let overview = times_overview(Lang::En, Some(&settings));
        assert!(overview.contains("23:00"));
        assert!(overview.contains("08:30"));
        assert_eq!(overview.matches('—').count(), 3);
    }
}
