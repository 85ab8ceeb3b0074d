//! Sleep - logging flow (bed time, wake time, electronics, quality) and tips

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::{Db, HandlerResult, MyDialogue, SleepStep, State};
use crate::db::SleepLogEntry;
use crate::i18n::{Lang, t};
use crate::sleep::{duration_hours, evaluate, format_hhmm, parse_hhmm};
use crate::tips::random_tip;

fn menu_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback(
            t(lang, "sleep.log_btn"),
            "sleep:menu:log",
        )],
        vec![InlineKeyboardButton::callback(
            t(lang, "sleep.tip_btn"),
            "sleep:tip",
        )],
    ])
}

fn bed_time_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![
            InlineKeyboardButton::callback("21:00", "sleep:bed:21:00"),
            InlineKeyboardButton::callback("22:00", "sleep:bed:22:00"),
            InlineKeyboardButton::callback("23:00", "sleep:bed:23:00"),
        ],
        vec![InlineKeyboardButton::callback(
            t(lang, "sleep.manual"),
            "sleep:bed:manual",
        )],
    ])
}

fn wake_time_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![
            InlineKeyboardButton::callback("06:00", "sleep:wake:06:00"),
            InlineKeyboardButton::callback("07:00", "sleep:wake:07:00"),
            InlineKeyboardButton::callback("08:00", "sleep:wake:08:00"),
        ],
        vec![InlineKeyboardButton::callback(
            t(lang, "sleep.manual"),
            "sleep:wake:manual",
        )],
    ])
}

fn electronics_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([vec![
        InlineKeyboardButton::callback(t(lang, "btn.yes"), "sleep:elec:yes"),
        InlineKeyboardButton::callback(t(lang, "btn.no"), "sleep:elec:no"),
    ]])
}

fn quality_kb() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([(1..=5)
        .map(|n| InlineKeyboardButton::callback(n.to_string(), format!("sleep:q:{}", n)))
        .collect::<Vec<_>>()])
}

fn section_text(lang: Lang) -> String {
    format!(
        "{}\n\n{}",
        t(lang, "sleep.section_title"),
        t(lang, "sleep.section_desc"),
    )
}

pub async fn open_menu(bot: &Bot, chat_id: ChatId, lang: Lang) -> HandlerResult {
    bot.send_message(chat_id, section_text(lang))
        .reply_markup(menu_kb(lang))
        .await?;
    Ok(())
}

/// Final summary after the quality rating: persists the night and reports
/// duration plus electronics feedback.
async fn finish(
    bot: &Bot,
    q: &CallbackQuery,
    dialogue: &MyDialogue,
    db: &Db,
    lang: Lang,
    sleep_time: String,
    wake_time: String,
    electronics: bool,
    quality: i64,
) -> HandlerResult {
    let tg_id = q.from.id.0 as i64;
    // both times went through parse_hhmm when they were collected
    let (Some(bed), Some(wake)) = (parse_hhmm(&sleep_time), parse_hhmm(&wake_time)) else {
        dialogue.reset().await?;
        return Ok(());
    };
    let duration = duration_hours(bed, wake);
    let evaluation = evaluate(bed, wake);

    db.lock().await.add_sleep_log(
        tg_id,
        &SleepLogEntry {
            sleep_time,
            wake_time,
            duration_hours: duration,
            evaluation: evaluation.key().to_string(),
            electronics_used: electronics,
            quality_rating: quality,
        },
    )?;
    dialogue.reset().await?;

    let feedback_key = if electronics {
        "sleep.electronics_yes"
    } else {
        "sleep.electronics_no"
    };
    let summary = format!(
        "{}\n\n{}\n{} {}/5\n\n{}",
        t(lang, "sleep.recorded"),
        t(lang, "sleep.duration").replace("{duration}", &format!("{:.1}", duration)),
        "⭐",
        quality,
        t(lang, feedback_key),
    );
    if let Some(msg) = q.message.as_ref() {
        bot.edit_message_text(msg.chat().id, msg.id(), summary)
            .await?;
    }
    Ok(())
}

pub async fn handle_text(
    bot: Bot,
    msg: Message,
    text: &str,
    dialogue: MyDialogue,
    db: Db,
    step: SleepStep,
) -> HandlerResult {
    let lang = super::user_lang(&db, msg.chat.id.0).await;

    match step {
        SleepStep::BedTimeManual => match parse_hhmm(text) {
            Some((h, m)) => {
                dialogue
                    .update(State::SleepLog(SleepStep::WakeChoice {
                        sleep_time: format_hhmm(h, m),
                    }))
                    .await?;
                bot.send_message(msg.chat.id, t(lang, "sleep.when_wake"))
                    .reply_markup(wake_time_kb(lang))
                    .await?;
            }
            None => {
                bot.send_message(msg.chat.id, t(lang, "invalid.time")).await?;
            }
        },
        SleepStep::WakeTimeManual { sleep_time } => match parse_hhmm(text) {
            Some((h, m)) => {
                dialogue
                    .update(State::SleepLog(SleepStep::Electronics {
                        sleep_time,
                        wake_time: format_hhmm(h, m),
                    }))
                    .await?;
                bot.send_message(msg.chat.id, t(lang, "sleep.electronics_q"))
                    .reply_markup(electronics_kb(lang))
                    .await?;
            }
            None => {
                bot.send_message(msg.chat.id, t(lang, "invalid.time")).await?;
            }
        },
        // remaining steps are button-driven; repeat the current question
        SleepStep::WakeChoice { .. } => {
            bot.send_message(msg.chat.id, t(lang, "sleep.when_wake"))
                .reply_markup(wake_time_kb(lang))
                .await?;
        }
        SleepStep::Electronics { .. } => {
            bot.send_message(msg.chat.id, t(lang, "sleep.electronics_q"))
                .reply_markup(electronics_kb(lang))
                .await?;
        }
        SleepStep::Quality { .. } => {
            bot.send_message(msg.chat.id, t(lang, "sleep.quality_q"))
                .reply_markup(quality_kb())
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
) -> HandlerResult {
    let tg_id = q.from.id.0 as i64;
    let lang = super::user_lang(&db, tg_id).await;

    // reactions to sleep reminders carry the originating kind
    if let Some(rest) = data.strip_prefix("sleep:notif:") {
        if let Some((action, kind)) = rest.split_once(':') {
            match action {
                "log" => {
                    db.lock().await.log_notification(tg_id, kind, Some("logged"))?;
                    if let Some(msg) = q.message.as_ref() {
                        dialogue
                            .update(State::SleepLog(SleepStep::BedTimeManual))
                            .await?;
                        bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "sleep.when_sleep"))
                            .reply_markup(bed_time_kb(lang))
                            .await?;
                    }
                    bot.answer_callback_query(q.id).await?;
                }
                "no" => {
                    db.lock()
                        .await
                        .log_notification(tg_id, kind, Some("skipped"))?;
                    bot.answer_callback_query(q.id)
                        .text(t(lang, "sleep.morning_no"))
                        .await?;
                }
                _ => {
                    bot.answer_callback_query(q.id).await?;
                }
            }
            return Ok(());
        }
    }

    match data {
        "sleep:menu:log" => {
            dialogue
                .update(State::SleepLog(SleepStep::BedTimeManual))
                .await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "sleep.when_sleep"))
                    .reply_markup(bed_time_kb(lang))
                    .await?;
            }
            bot.answer_callback_query(q.id).await?;
            return Ok(());
        }
        "sleep:tip" => {
            let kb = InlineKeyboardMarkup::new([
                vec![InlineKeyboardButton::callback(
                    t(lang, "sleep.another_tip"),
                    "sleep:tip",
                )],
                vec![InlineKeyboardButton::callback(
                    t(lang, "menu.back"),
                    "sleep:menu",
                )],
            ]);
            if let Some(msg) = q.message.as_ref() {
                let text = format!("{}\n\n{}", t(lang, "sleep.tip_title"), random_tip(lang));
                bot.edit_message_text(msg.chat().id, msg.id(), text)
                    .reply_markup(kb)
                    .await?;
            }
            bot.answer_callback_query(q.id).await?;
            return Ok(());
        }
        "sleep:menu" => {
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), section_text(lang))
                    .reply_markup(menu_kb(lang))
                    .await?;
            }
            bot.answer_callback_query(q.id).await?;
            return Ok(());
        }
        _ => {}
    }

    if let Some(choice) = data.strip_prefix("sleep:bed:") {
        if choice == "manual" {
            dialogue
                .update(State::SleepLog(SleepStep::BedTimeManual))
                .await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "sleep.ask_sleep_manual"))
                    .await?;
            }
        } else if parse_hhmm(choice).is_some() {
            dialogue
                .update(State::SleepLog(SleepStep::WakeChoice {
                    sleep_time: choice.to_string(),
                }))
                .await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "sleep.when_wake"))
                    .reply_markup(wake_time_kb(lang))
                    .await?;
            }
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if let Some(choice) = data.strip_prefix("sleep:wake:") {
        let Some(State::SleepLog(step)) = dialogue.get().await? else {
            bot.answer_callback_query(q.id)
                .text(t(lang, "error.state_lost"))
                .await?;
            dialogue.reset().await?;
            return Ok(());
        };
        let sleep_time = match step {
            SleepStep::WakeChoice { sleep_time } | SleepStep::WakeTimeManual { sleep_time } => {
                sleep_time
            }
            _ => {
                bot.answer_callback_query(q.id)
                    .text(t(lang, "error.state_lost"))
                    .await?;
                dialogue.reset().await?;
                return Ok(());
            }
        };

        if choice == "manual" {
            dialogue
                .update(State::SleepLog(SleepStep::WakeTimeManual { sleep_time }))
                .await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "sleep.ask_wake_manual"))
                    .await?;
            }
        } else if parse_hhmm(choice).is_some() {
            dialogue
                .update(State::SleepLog(SleepStep::Electronics {
                    sleep_time,
                    wake_time: choice.to_string(),
                }))
                .await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "sleep.electronics_q"))
                    .reply_markup(electronics_kb(lang))
                    .await?;
            }
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if let Some(choice) = data.strip_prefix("sleep:elec:") {
        let Some(State::SleepLog(SleepStep::Electronics {
            sleep_time,
            wake_time,
        })) = dialogue.get().await?
        else {
            bot.answer_callback_query(q.id)
                .text(t(lang, "error.state_lost"))
                .await?;
            dialogue.reset().await?;
            return Ok(());
        };
        dialogue
            .update(State::SleepLog(SleepStep::Quality {
                sleep_time,
                wake_time,
                electronics: choice == "yes",
            }))
            .await?;
        if let Some(msg) = q.message.as_ref() {
            bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "sleep.quality_q"))
                .reply_markup(quality_kb())
                .await?;
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if let Some(rating) = data.strip_prefix("sleep:q:") {
        let Some(State::SleepLog(SleepStep::Quality {
            sleep_time,
            wake_time,
            electronics,
        })) = dialogue.get().await?
        else {
            bot.answer_callback_query(q.id)
                .text(t(lang, "error.state_lost"))
                .await?;
            dialogue.reset().await?;
            return Ok(());
        };
        let quality = rating.parse::<i64>().unwrap_or(3).clamp(1, 5);
        bot.answer_callback_query(q.id.clone()).await?;
        finish(
            &bot, &q, &dialogue, &db, lang, sleep_time, wake_time, electronics, quality,
        )
        .await?;
        return Ok(());
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}
