//! Workouts - muscle group choice and a guided exercise run

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::{Db, HandlerResult, MyDialogue, State};
use crate::content::{MuscleGroup, exercises_for};
use crate::i18n::{Lang, t};

fn group_kb(lang: Lang) -> InlineKeyboardMarkup {
    let rows = MuscleGroup::all()
        .iter()
        .map(|g| {
            vec![InlineKeyboardButton::callback(
                t(lang, g.i18n_key()),
                format!("w:group:{}", g.key()),
            )]
        })
        .collect::<Vec<_>>();
    InlineKeyboardMarkup::new(rows)
}

fn nav_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback(
            t(lang, "workouts.next"),
            "w:next",
        )],
        vec![InlineKeyboardButton::callback(
            t(lang, "workouts.done"),
            "w:done",
        )],
    ])
}

fn exercise_text(lang: Lang, group: MuscleGroup, index: usize) -> String {
    let exercises = exercises_for(group);
    let total = exercises.len();
    let index = index.min(total.saturating_sub(1));
    let ex = exercises[index];
    format!(
        "{}\n{}\n\n{}",
        ex.title(lang),
        ex.volume,
        t(lang, "workouts.step")
            .replace("{i}", &(index + 1).to_string())
            .replace("{n}", &total.to_string()),
    )
}

async fn choose_group_text(lang: Lang, db: &Db, tg_id: i64) -> String {
    let last = { db.lock().await.last_workout_group(tg_id).ok().flatten() };
    match last.as_deref().and_then(MuscleGroup::from_key) {
        Some(group) => format!(
            "{}\n{}",
            t(lang, "workouts.choose_group"),
            t(lang, "workouts.last_group").replace("{last}", t(lang, group.i18n_key())),
        ),
        None => t(lang, "workouts.choose_group").to_string(),
    }
}

pub async fn open_menu(bot: &Bot, chat_id: ChatId, lang: Lang, db: &Db) -> HandlerResult {
    let text = choose_group_text(lang, db, chat_id.0).await;
    bot.send_message(chat_id, text)
        .reply_markup(group_kb(lang))
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

    if data == "w:start_workout" {
        // user reacted to a workout reminder
        db.lock()
            .await
            .log_notification(tg_id, "workout", Some("logged"))?;
        if let Some(msg) = q.message.as_ref() {
            let text = choose_group_text(lang, &db, tg_id).await;
            bot.edit_message_text(msg.chat().id, msg.id(), text)
                .reply_markup(group_kb(lang))
                .await?;
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if let Some(key) = data.strip_prefix("w:group:") {
        if let Some(group) = MuscleGroup::from_key(key) {
            if exercises_for(group).is_empty() {
                if let Some(msg) = q.message.as_ref() {
                    bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "workouts.empty"))
                        .await?;
                }
                bot.answer_callback_query(q.id).await?;
                return Ok(());
            }
            dialogue
                .update(State::WorkoutRun { group, index: 0 })
                .await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), exercise_text(lang, group, 0))
                    .reply_markup(nav_kb(lang))
                    .await?;
            }
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    if data == "w:next" || data == "w:done" {
        let Some(State::WorkoutRun { group, index }) = dialogue.get().await? else {
            bot.answer_callback_query(q.id)
                .text(t(lang, "error.state_lost"))
                .await?;
            dialogue.reset().await?;
            return Ok(());
        };

        let next = index + 1;
        if data == "w:next" && next < exercises_for(group).len() {
            dialogue
                .update(State::WorkoutRun { group, index: next })
                .await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), exercise_text(lang, group, next))
                    .reply_markup(nav_kb(lang))
                    .await?;
            }
        } else {
            // done, or stepped past the last exercise
            db.lock().await.add_workout_log(tg_id, group.key())?;
            dialogue.reset().await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), t(lang, "workouts.finished"))
                    .await?;
            }
        }
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_exercise_text_counts_steps() {
        let text = exercise_text(Lang::En, MuscleGroup::Legs, 0);
        assert!(text.contains("Exercise 1 of"));
    }

    #[test]
    fn test_exercise_text_clamps_index() {
        // out-of-range index falls back to the last exercise
        let total = exercises_for(MuscleGroup::Chest).len();
        let text = exercise_text(Lang::En, MuscleGroup::Chest, 99);
        assert!(text.contains(&format!("of {}", total)));
    }
}
