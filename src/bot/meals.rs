//! Meals - budget pack browsing, custom meal logging, reminder reactions

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::{Db, HandlerResult, MealStep, MyDialogue, State};
use crate::content::{Budget, HealthRating, MealCatalog, MealPack, MealType};
use crate::i18n::{Lang, t};

/// Packs shown in the quick-log list after a reminder.
const QUICK_PACKS: usize = 3;

fn category_kb(lang: Lang) -> InlineKeyboardMarkup {
    let mut rows = [MealType::Breakfast, MealType::Lunch, MealType::Dinner]
        .map(|m| {
            vec![InlineKeyboardButton::callback(
                t(lang, m.i18n_key()),
                format!("meals:cat:{}", m.key()),
            )]
        })
        .to_vec();
    rows.push(vec![InlineKeyboardButton::callback(
        t(lang, "meals.category.custom"),
        "meals:cat:custom",
    )]);
    InlineKeyboardMarkup::new(rows)
}

fn custom_category_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        [MealType::Breakfast, MealType::Lunch, MealType::Dinner].map(|m| {
            vec![InlineKeyboardButton::callback(
                t(lang, m.i18n_key()),
                format!("meals:customcat:{}", m.key()),
            )]
        }),
    )
}

fn rating_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        [
            HealthRating::Healthy,
            HealthRating::Normal,
            HealthRating::Unhealthy,
        ]
        .map(|r| {
            vec![InlineKeyboardButton::callback(
                t(lang, r.i18n_key()),
                format!("meals:health:{}", r.key()),
            )]
        }),
    )
}

fn pack_list_kb(lang: Lang, packs: &[&MealPack]) -> InlineKeyboardMarkup {
    let mut rows = packs
        .iter()
        .map(|p| {
            vec![InlineKeyboardButton::callback(
                format!("📦 {} {}: {}", t(lang, "meals.pack"), p.pack_number, p.name),
                format!("meals:pack:{}", p.id),
            )]
        })
        .collect::<Vec<_>>();
    rows.push(vec![InlineKeyboardButton::callback(
        t(lang, "menu.back"),
        "meals:back",
    )]);
    InlineKeyboardMarkup::new(rows)
}

fn pack_card(lang: Lang, pack: &MealPack) -> String {
    format!(
        "📦 {} {}: {}\n📌 {}: {}\n💰 {}: ~{} {}\n🔥 {}: ~{} kcal\n🕒 {}: {} min",
        t(lang, "meals.pack"),
        pack.pack_number,
        pack.name,
        t(lang, "meals.ingredients"),
        pack.ingredients,
        t(lang, "meals.price"),
        pack.price,
        pack.currency,
        t(lang, "meals.calories"),
        pack.calories,
        t(lang, "meals.prep_time"),
        pack.prep_time_min,
    )
}

async fn user_budget(db: &Db, tg_id: i64) -> Budget {
    db.lock()
        .await
        .get_user(tg_id)
        .ok()
        .flatten()
        .and_then(|u| u.budget)
        .unwrap_or(Budget::Mid)
}

pub async fn open_menu(bot: &Bot, chat_id: ChatId, lang: Lang) -> HandlerResult {
    let text = format!(
        "{}\n\n{}\n\n{}",
        t(lang, "meals.title"),
        t(lang, "meals.section_desc"),
        t(lang, "meals.choose_category"),
    );
    bot.send_message(chat_id, text)
        .reply_markup(category_kb(lang))
        .await?;
    Ok(())
}

pub async fn handle_text(
    bot: Bot,
    msg: Message,
    text: &str,
    dialogue: MyDialogue,
    db: Db,
    step: MealStep,
) -> HandlerResult {
    let tg_id = msg.chat.id.0;
    let lang = super::user_lang(&db, tg_id).await;

    match step {
        MealStep::Description { meal_type } => {
            let description = text.trim();
            if description.is_empty() {
                bot.send_message(msg.chat.id, t(lang, "meals.custom.what_ate"))
                    .await?;
                return Ok(());
            }
            dialogue
                .update(State::MealLog(MealStep::Rating {
                    meal_type,
                    description: description.to_string(),
                }))
                .await?;
            bot.send_message(msg.chat.id, t(lang, "meals.custom.health_rating"))
                .reply_markup(rating_kb(lang))
                .await?;
        }
        // the rating arrives as a callback; repeat the keyboard for text
        MealStep::Rating { .. } => {
            bot.send_message(msg.chat.id, t(lang, "meals.custom.health_rating"))
                .reply_markup(rating_kb(lang))
                .await?;
        }
    }
    Ok(())
}

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    data: &str,
    dialogue: MyDialogue,
    db: Db,
    catalog: Arc<MealCatalog>,
) -> HandlerResult {
    let tg_id = q.from.id.0 as i64;
    let lang = super::user_lang(&db, tg_id).await;

    if let Some(key) = data.strip_prefix("meals:cat:") {
        if key == "custom" {
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "meals.choose_category"))
                    .reply_markup(custom_category_kb(lang))
                    .await?;
            }
        } else if let Some(meal_type) = MealType::from_key(key) {
            let budget = user_budget(&db, tg_id).await;
            let packs = catalog.packs_for(budget, meal_type);
            if let Some(msg) = q.message.as_ref() {
                if packs.is_empty() {
                    bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "meals.no_packs"))
                        .await?;
                } else {
                    bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "meals.choose_pack"))
                        .reply_markup(pack_list_kb(lang, &packs))
                        .await?;
                }
            }
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if let Some(key) = data.strip_prefix("meals:customcat:") {
        if let Some(meal_type) = MealType::from_key(key) {
            dialogue
                .update(State::MealLog(MealStep::Description { meal_type }))
                .await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "meals.custom.what_ate"))
                    .await?;
            }
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if let Some(rating_key) = data.strip_prefix("meals:health:") {
        let Some(State::MealLog(MealStep::Rating {
            meal_type,
            description,
        })) = dialogue.get().await?
        else {
            bot.answer_callback_query(q.id)
                .text(t(lang, "error.state_lost"))
                .await?;
            dialogue.reset().await?;
            return Ok(());
        };
        if let Some(rating) = HealthRating::from_key(rating_key) {
            db.lock()
                .await
                .add_custom_meal_log(tg_id, meal_type, &description, rating)?;
            dialogue.reset().await?;
            if let Some(msg) = q.message.as_ref() {
                let confirmation = format!(
                    "✅ {}\n\n🍽️ {}\n{}",
                    t(lang, "meals.logged"),
                    description,
                    t(lang, rating.i18n_key()),
                );
                bot.edit_message_text(msg.chat().id, msg.id(), confirmation)
                    .await?;
            }
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if let Some(pack_id) = data.strip_prefix("meals:pack:") {
        match catalog.find(pack_id) {
            Some(pack) => {
                let kb = InlineKeyboardMarkup::new([
                    vec![InlineKeyboardButton::callback(
                        t(lang, "meals.done_btn"),
                        format!("meals:done:{}", pack.id),
                    )],
                    vec![InlineKeyboardButton::callback(
                        t(lang, "menu.back"),
                        "meals:back",
                    )],
                ]);
                if let Some(msg) = q.message.as_ref() {
                    bot.edit_message_text(msg.chat().id, msg.id(), pack_card(lang, pack))
                        .reply_markup(kb)
                        .await?;
                }
                bot.answer_callback_query(q.id).await?;
            }
            None => {
                bot.answer_callback_query(q.id)
                    .text(t(lang, "meals.pack_not_found"))
                    .await?;
            }
        }
        return Ok(());
    }

    if let Some(pack_id) = data.strip_prefix("meals:done:") {
        match catalog.find(pack_id) {
            Some(pack) => {
                db.lock().await.add_meal_pack_log(tg_id, pack)?;
                if let Some(msg) = q.message.as_ref() {
                    let confirmation = format!(
                        "✅ {}\n\n📦 {}\n🔥 {} kcal",
                        t(lang, "meals.logged"),
                        pack.name,
                        pack.calories,
                    );
                    bot.edit_message_text(msg.chat().id, msg.id(), confirmation)
                        .await?;
                }
                bot.answer_callback_query(q.id).await?;
            }
            None => {
                bot.answer_callback_query(q.id)
                    .text(t(lang, "meals.pack_not_found"))
                    .await?;
            }
        }
        return Ok(());
    }

    if data == "meals:back" {
        if let Some(msg) = q.message.as_ref() {
            bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "meals.choose_category"))
                .reply_markup(category_kb(lang))
                .await?;
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    // reactions to a meal reminder; the kind rides in the callback data
    if let Some(rest) = data.strip_prefix("meals:reminder:") {
        if let Some((action, kind)) = rest.split_once(':') {
            match action {
                "log" => {
                    db.lock().await.log_notification(tg_id, kind, Some("logged"))?;
                    if let Some(meal_type) = MealType::from_key(kind) {
                        let budget = user_budget(&db, tg_id).await;
                        let packs = catalog.packs_for(budget, meal_type);
                        let quick: Vec<_> = packs.into_iter().take(QUICK_PACKS).collect();
                        if let Some(msg) = q.message.as_ref() {
                            if quick.is_empty() {
                                dialogue
                                    .update(State::MealLog(MealStep::Description { meal_type }))
                                    .await?;
                                bot.edit_message_text(
                                    msg.chat().id,
                                    msg.id(),
                                    t(lang, "meals.custom.what_ate"),
                                )
                                .await?;
                            } else {
                                bot.edit_message_text(
                                    msg.chat().id,
                                    msg.id(),
                                    t(lang, "meals.choose_pack"),
                                )
                                .reply_markup(pack_list_kb(lang, &quick))
                                .await?;
                            }
                        }
                    }
                    bot.answer_callback_query(q.id).await?;
                }
                "later" => {
                    db.lock().await.log_notification(tg_id, kind, Some("later"))?;
                    bot.answer_callback_query(q.id)
                        .text(t(lang, "notif.later_ok"))
                        .await?;
                }
                "skip" => {
                    db.lock()
                        .await
                        .log_notification(tg_id, kind, Some("skipped"))?;
                    bot.answer_callback_query(q.id)
                        .text(t(lang, "notif.skipped"))
                        .await?;
                }
                _ => {
                    bot.answer_callback_query(q.id).await?;
                }
            }
            return Ok(());
        }
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}
