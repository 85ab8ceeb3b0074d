//! Onboarding - channel gate and the six-step profile survey
//!
//! Every valid answer is persisted immediately; invalid input re-prompts
//! the same step with no retry limit. A partial profile is a valid state.

use std::sync::Arc;
use std::time::Duration;

use teloxide::prelude::*;
use teloxide::types::{
    ChatMemberStatus, InlineKeyboardButton, InlineKeyboardMarkup, Recipient, UserId,
};
use tracing::info;

use super::{BotConfig, Db, HandlerResult, Jobs, MyDialogue, OnbStep, State, menu};
use crate::content::{Budget, TimeOfDay};
use crate::i18n::{Lang, t};

const TOTAL_STEPS: u8 = 6;

pub fn parse_age(text: &str) -> Option<i64> {
    let age: i64 = text.trim().parse().ok()?;
    (1..=120).contains(&age).then_some(age)
}

pub fn parse_height(text: &str) -> Option<i64> {
    let height: i64 = text.trim().parse().ok()?;
    (80..=250).contains(&height).then_some(height)
}

/// Comma is accepted as the decimal separator.
pub fn parse_weight(text: &str) -> Option<f64> {
    let weight: f64 = text.trim().replace(',', ".").parse().ok()?;
    (20.0..=400.0).contains(&weight).then_some(weight)
}

pub fn bmi(weight_kg: f64, height_cm: i64) -> f64 {
    if height_cm <= 0 {
        return 0.0;
    }
    let height_m = height_cm as f64 / 100.0;
    (weight_kg / (height_m * height_m) * 10.0).round() / 10.0
}

/// WHO-style categories, continuous over the whole range.
pub fn bmi_category_key(bmi: f64) -> &'static str {
    if bmi < 18.5 {
        "onb.bmi_under"
    } else if bmi < 25.0 {
        "onb.bmi_normal"
    } else if bmi < 30.0 {
        "onb.bmi_over"
    } else {
        "onb.bmi_other"
    }
}

fn step_text(lang: Lang, key: &str, step: u8) -> String {
    t(lang, key).replace("{step}", &format!("{} | {}", step, TOTAL_STEPS))
}

fn budget_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([Budget::Low, Budget::Mid, Budget::High].map(|b| {
        vec![InlineKeyboardButton::callback(
            t(lang, b.i18n_key()),
            format!("onb:budget:{}", b.key()),
        )]
    }))
}

fn workout_time_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new(
        [TimeOfDay::Morning, TimeOfDay::Day, TimeOfDay::Evening].map(|p| {
            vec![InlineKeyboardButton::callback(
                t(lang, p.i18n_key()),
                format!("onb:workout:{}", p.key()),
            )]
        }),
    )
}

fn gate_kb(
    lang: Lang,
    channel: &str,
) -> Result<InlineKeyboardMarkup, Box<dyn std::error::Error + Send + Sync>> {
    let url = format!("https://t.me/{}", channel.trim_start_matches('@')).parse()?;
    Ok(InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::url(t(lang, "gate.join"), url)],
        vec![InlineKeyboardButton::callback(
            t(lang, "gate.joined"),
            "gate:joined",
        )],
    ]))
}

/// Welcome message with the join-channel gate.
pub async fn send_gate(
    bot: &Bot,
    chat_id: ChatId,
    lang: Lang,
    config: &BotConfig,
    need_join: bool,
) -> HandlerResult {
    let text = if need_join {
        t(lang, "gate.need_join").to_string()
    } else {
        format!(
            "{}\n{}",
            t(lang, "gate.welcome_title"),
            t(lang, "gate.welcome_body")
        )
    };
    bot.send_message(chat_id, text)
        .reply_markup(gate_kb(lang, &config.channel)?)
        .await?;
    Ok(())
}

async fn is_channel_member(bot: &Bot, channel: &str, user_id: UserId) -> bool {
    match bot
        .get_chat_member(Recipient::ChannelUsername(channel.to_string()), user_id)
        .await
    {
        Ok(member) => matches!(
            member.status(),
            ChatMemberStatus::Owner | ChatMemberStatus::Administrator | ChatMemberStatus::Member
        ),
        Err(_) => false,
    }
}

/// Text answers for the four free-input steps.
pub async fn handle_text(
    bot: Bot,
    msg: Message,
    text: &str,
    dialogue: MyDialogue,
    db: Db,
    step: OnbStep,
) -> HandlerResult {
    let tg_id = msg.chat.id.0;
    let lang = super::user_lang(&db, tg_id).await;

    match step {
        OnbStep::Name => {
            let name = text.trim();
            if name.is_empty() {
                bot.send_message(msg.chat.id, t(lang, "onb.invalid_name"))
                    .await?;
                return Ok(());
            }
            db.lock().await.set_name(tg_id, name)?;
            dialogue.update(State::Onboarding(OnbStep::Age)).await?;
            bot.send_message(msg.chat.id, step_text(lang, "onb.q_age", 2))
                .await?;
        }
        OnbStep::Age => {
            let Some(age) = parse_age(text) else {
                bot.send_message(msg.chat.id, t(lang, "onb.invalid_age"))
                    .await?;
                return Ok(());
            };
            db.lock().await.set_age(tg_id, age)?;
            dialogue.update(State::Onboarding(OnbStep::Height)).await?;
            bot.send_message(msg.chat.id, step_text(lang, "onb.q_height", 3))
                .await?;
        }
        OnbStep::Height => {
            let Some(height) = parse_height(text) else {
                bot.send_message(msg.chat.id, t(lang, "onb.invalid_height"))
                    .await?;
                return Ok(());
            };
            db.lock().await.set_height(tg_id, height)?;
            dialogue.update(State::Onboarding(OnbStep::Weight)).await?;
            bot.send_message(msg.chat.id, step_text(lang, "onb.q_weight", 4))
                .await?;
        }
        OnbStep::Weight => {
            let Some(weight) = parse_weight(text) else {
                bot.send_message(msg.chat.id, t(lang, "onb.invalid_weight"))
                    .await?;
                return Ok(());
            };
            db.lock().await.set_weight(tg_id, weight.round() as i64)?;
            dialogue.update(State::Onboarding(OnbStep::Budget)).await?;
            bot.send_message(msg.chat.id, step_text(lang, "onb.q_budget", 5))
                .reply_markup(budget_kb(lang))
                .await?;
        }
        // budget and workout time come in as callbacks; stray text
        // re-prompts the same step
        OnbStep::Budget => {
            bot.send_message(msg.chat.id, step_text(lang, "onb.q_budget", 5))
                .reply_markup(budget_kb(lang))
                .await?;
        }
        OnbStep::WorkoutTime => {
            bot.send_message(msg.chat.id, step_text(lang, "onb.q_workout_time", 6))
                .reply_markup(workout_time_kb(lang))
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
    registry: Jobs,
    config: Arc<BotConfig>,
) -> HandlerResult {
    let tg_id = q.from.id.0 as i64;
    let lang = super::user_lang(&db, tg_id).await;

    if data == "gate:joined" {
        if is_channel_member(&bot, &config.channel, q.from.id).await {
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "gate.ok"))
                    .await?;
                dialogue.update(State::Onboarding(OnbStep::Name)).await?;
                bot.send_message(msg.chat().id, step_text(lang, "onb.q_name", 1))
                    .await?;
            }
        } else if let Some(msg) = q.message.as_ref() {
            bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "gate.need_join"))
                .reply_markup(gate_kb(lang, &config.channel)?)
                .await?;
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if let Some(choice) = data.strip_prefix("onb:budget:") {
        let state = dialogue.get().await?.unwrap_or_default();
        if !matches!(state, State::Onboarding(OnbStep::Budget)) {
            bot.answer_callback_query(q.id)
                .text(t(lang, "error.state_lost"))
                .await?;
            dialogue.reset().await?;
            return Ok(());
        }
        if let Some(budget) = Budget::from_key(choice) {
            db.lock().await.set_budget(tg_id, budget)?;
            dialogue
                .update(State::Onboarding(OnbStep::WorkoutTime))
                .await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(
                    msg.chat().id,
                    msg.id(),
                    step_text(lang, "onb.q_workout_time", 6),
                )
                .reply_markup(workout_time_kb(lang))
                .await?;
            }
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if let Some(choice) = data.strip_prefix("onb:workout:") {
        let state = dialogue.get().await?.unwrap_or_default();
        if !matches!(state, State::Onboarding(OnbStep::WorkoutTime)) {
            bot.answer_callback_query(q.id)
                .text(t(lang, "error.state_lost"))
                .await?;
            dialogue.reset().await?;
            return Ok(());
        }
        if let Some(pref) = TimeOfDay::from_key(choice) {
            db.lock().await.set_workout_pref(tg_id, pref)?;
            bot.answer_callback_query(q.id.clone()).await?;
            finish(&bot, &q, &dialogue, &db, &registry, lang).await?;
            return Ok(());
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

/// Last answer is in: show the BMI summary, register the reminder jobs
/// and hand over to the main menu.
async fn finish(
    bot: &Bot,
    q: &CallbackQuery,
    dialogue: &MyDialogue,
    db: &Db,
    registry: &Jobs,
    lang: Lang,
) -> HandlerResult {
    let tg_id = q.from.id.0 as i64;
    let Some(msg) = q.message.as_ref() else {
        return Ok(());
    };

    bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "onb.calculating"))
        .await?;
    tokio::time::sleep(Duration::from_secs(2)).await;

    let user = { db.lock().await.get_user(tg_id)? };
    let Some(user) = user else {
        dialogue.reset().await?;
        return Ok(());
    };

    let value = bmi(
        user.weight.unwrap_or_default() as f64,
        user.height.unwrap_or_default(),
    );
    let name = user.name.clone().unwrap_or_default();
    let summary = format!(
        "{}\n\n{}\n{}",
        t(lang, "onb.final").replace("{name}", &name),
        t(lang, "onb.bmi_title").replace("{bmi}", &value.to_string()),
        t(lang, bmi_category_key(value)),
    );
    bot.edit_message_text(msg.chat().id, msg.id(), summary)
        .await?;

    super::reschedule_user(db, registry, tg_id).await?;
    info!("user {} completed onboarding", tg_id);

    dialogue.reset().await?;
    menu::send_main_menu(bot, msg.chat().id, lang).await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_age_bounds() {
        assert_eq!(parse_age("17"), Some(17));
        assert_eq!(parse_age(" 120 "), Some(120));
        assert_eq!(parse_age("0"), None);
        assert_eq!(parse_age("200"), None);
        assert_eq!(parse_age("abc"), None);
    }

    #[test]
    fn test_parse_height_bounds() {
        assert_eq!(parse_height("180"), Some(180));
        assert_eq!(parse_height("80"), Some(80));
        assert_eq!(parse_height("250"), Some(250));
        assert_eq!(parse_height("79"), None);
        assert_eq!(parse_height("251"), None);
    }

    #[test]
    fn test_parse_weight_accepts_comma() {
        assert_eq!(parse_weight("70"), Some(70.0));
        assert_eq!(parse_weight("70,5"), Some(70.5));
        assert_eq!(parse_weight("70.5"), Some(70.5));
        assert_eq!(parse_weight("19.9"), None);
        assert_eq!(parse_weight("401"), None);
    }

    #[test]
    fn test_bmi_formula() {
        // 70 kg at 180 cm: 70 / 1.8^2 = 21.6
        assert_eq!(bmi(70.0, 180), 21.6);
        assert_eq!(bmi(70.0, 0), 0.0);
    }

    #[test]
    fn test_bmi_categories_are_continuous() {
        assert_eq!(bmi_category_key(17.0), "onb.bmi_under");
        // the 18.0..18.5 band is underweight, not a silent gap
        assert_eq!(bmi_category_key(18.2), "onb.bmi_under");
        assert_eq!(bmi_category_key(18.5), "onb.bmi_normal");
        assert_eq!(bmi_category_key(21.6), "onb.bmi_normal");
        assert_eq!(bmi_category_key(27.0), "onb.bmi_over");
        assert_eq!(bmi_category_key(31.0), "onb.bmi_other");
    }
}
