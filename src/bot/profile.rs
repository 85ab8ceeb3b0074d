//! Profile - view and re-collect the survey answers
//!
//! The edit flow reuses the onboarding validators, so both flows accept
//! the same ranges.

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::onboarding::{parse_age, parse_height, parse_weight};
use super::{Db, HandlerResult, MyDialogue, ProfileStep, State};
use crate::content::Budget;
use crate::db::User;
use crate::i18n::{Lang, t};

fn edit_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
        t(lang, "profile.edit"),
        "profile:edit",
    )]])
}

fn budget_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([Budget::Low, Budget::Mid, Budget::High].map(|b| {
        vec![InlineKeyboardButton::callback(
            t(lang, b.i18n_key()),
            format!("profile:budget:{}", b.key()),
        )]
    }))
}

fn profile_text(lang: Lang, user: &User) -> String {
    let not_set = t(lang, "profile.not_set");
    let field = |value: Option<String>| value.unwrap_or_else(|| not_set.to_string());
    format!(
        "{}\n\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}\n{}: {}",
        t(lang, "profile.title"),
        t(lang, "profile.field.name"),
        field(user.name.clone()),
        t(lang, "profile.field.age"),
        field(user.age.map(|v| v.to_string())),
        t(lang, "profile.field.height"),
        field(user.height.map(|v| format!("{} cm", v))),
        t(lang, "profile.field.weight"),
        field(user.weight.map(|v| format!("{} kg", v))),
        t(lang, "profile.field.budget"),
        field(user.budget.map(|b| t(lang, b.i18n_key()).to_string())),
        t(lang, "profile.field.language"),
        user.language.code(),
    )
}

pub async fn show(bot: &Bot, chat_id: ChatId, lang: Lang, db: &Db) -> HandlerResult {
    let user = { db.lock().await.ensure_user(chat_id.0)? };
    bot.send_message(chat_id, profile_text(lang, &user))
        .reply_markup(edit_kb(lang))
        .await?;
    Ok(())
}

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    data: &str,
    dialogue: MyDialogue,
    db: Db,
) -> HandlerResult {
    let tg_id = q.from.id.0 as i64;
    let lang = super::user_lang(&db, tg_id).await;

    if data == "profile:edit" {
        dialogue
            .update(State::ProfileEdit(ProfileStep::Name))
            .await?;
        if let Some(msg) = q.message.as_ref() {
            bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "onb.q_name").replace("{step}", "1 | 5"))
                .await?;
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if let Some(choice) = data.strip_prefix("profile:budget:") {
        let state = dialogue.get().await?.unwrap_or_default();
        if !matches!(state, State::ProfileEdit(ProfileStep::Budget)) {
            bot.answer_callback_query(q.id)
                .text(t(lang, "error.state_lost"))
                .await?;
            dialogue.reset().await?;
            return Ok(());
        }
        if let Some(budget) = Budget::from_key(choice) {
            db.lock().await.set_budget(tg_id, budget)?;
            dialogue.reset().await?;
            let user = { db.lock().await.ensure_user(tg_id)? };
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(
                    msg.chat().id,
                    msg.id(),
                    format!("{}\n\n{}", t(lang, "profile.saved"), profile_text(lang, &user)),
                )
                .reply_markup(edit_kb(lang))
                .await?;
            }
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

pub async fn handle_text(
    bot: Bot,
    msg: Message,
    text: &str,
    dialogue: MyDialogue,
    db: Db,
    step: ProfileStep,
) -> HandlerResult {
    let tg_id = msg.chat.id.0;
    let lang = super::user_lang(&db, tg_id).await;

    match step {
        ProfileStep::Name => {
            let name = text.trim();
            if name.is_empty() {
                bot.send_message(msg.chat.id, t(lang, "onb.invalid_name"))
                    .await?;
                return Ok(());
            }
            db.lock().await.set_name(tg_id, name)?;
            dialogue.update(State::ProfileEdit(ProfileStep::Age)).await?;
            bot.send_message(msg.chat.id, t(lang, "onb.q_age").replace("{step}", "2 | 5"))
                .await?;
        }
        ProfileStep::Age => {
            let Some(age) = parse_age(text) else {
                bot.send_message(msg.chat.id, t(lang, "onb.invalid_age"))
                    .await?;
                return Ok(());
            };
            db.lock().await.set_age(tg_id, age)?;
            dialogue
                .update(State::ProfileEdit(ProfileStep::Height))
                .await?;
            bot.send_message(msg.chat.id, t(lang, "onb.q_height").replace("{step}", "3 | 5"))
                .await?;
        }
        ProfileStep::Height => {
            let Some(height) = parse_height(text) else {
                bot.send_message(msg.chat.id, t(lang, "onb.invalid_height"))
                    .await?;
                return Ok(());
            };
            db.lock().await.set_height(tg_id, height)?;
            dialogue
                .update(State::ProfileEdit(ProfileStep::Weight))
                .await?;
            bot.send_message(msg.chat.id, t(lang, "onb.q_weight").replace("{step}", "4 | 5"))
                .await?;
        }
        ProfileStep::Weight => {
            let Some(weight) = parse_weight(text) else {
                bot.send_message(msg.chat.id, t(lang, "onb.invalid_weight"))
                    .await?;
                return Ok(());
            };
            db.lock().await.set_weight(tg_id, weight.round() as i64)?;
            dialogue
                .update(State::ProfileEdit(ProfileStep::Budget))
                .await?;
            bot.send_message(msg.chat.id, t(lang, "settings.choose_budget"))
                .reply_markup(budget_kb(lang))
                .await?;
        }
        ProfileStep::Budget => {
            bot.send_message(msg.chat.id, t(lang, "settings.choose_budget"))
                .reply_markup(budget_kb(lang))
                .await?;
        }
    }
    Ok(())
}
