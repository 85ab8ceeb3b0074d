//! Progress - 7-day aggregation over workouts, meals and sleep

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};

use super::{Db, HandlerResult};
use crate::content::MuscleGroup;
use crate::db::{MealStats, SleepStats, WorkoutStats};
use crate::i18n::{Lang, t};

fn details_kb(lang: Lang) -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![
            InlineKeyboardButton::callback(
                t(lang, "progress.workouts"),
                "progress:details:workouts",
            ),
            InlineKeyboardButton::callback(t(lang, "progress.sleep"), "progress:details:sleep"),
        ],
        vec![
            InlineKeyboardButton::callback(t(lang, "progress.meals"), "progress:details:meals"),
            InlineKeyboardButton::callback(
                t(lang, "progress.weight.current"),
                "progress:details:weight",
            ),
        ],
    ])
}

fn summary_text(
    lang: Lang,
    workouts: &WorkoutStats,
    meals: &MealStats,
    sleep: &SleepStats,
) -> String {
    let mut text = format!("{}\n", t(lang, "progress.title"));

    text.push_str(&format!("\n😴 {}:\n", t(lang, "progress.sleep")));
    if sleep.nights > 0 {
        text.push_str(&format!(
            "   • {} {:.1} h\n   • {}: {}/{}\n",
            t(lang, "progress.sleep.avg"),
            sleep.avg_duration,
            t(lang, "progress.sleep.optimal"),
            sleep.optimal_nights,
            sleep.nights,
        ));
    } else {
        text.push_str(&format!("   • {}\n", t(lang, "progress.sleep.none")));
    }

    text.push_str(&format!(
        "\n🏋️ {}:\n   • {}: {}\n   • {}: {}\n",
        t(lang, "progress.workouts"),
        t(lang, "progress.workouts.week"),
        workouts.this_week,
        t(lang, "progress.workouts.total"),
        workouts.total,
    ));

    text.push_str(&format!(
        "\n🍽️ {}:\n   • {}: {}\n   • {}: {}\n   • {}: {}\n   • {}: {}%\n",
        t(lang, "progress.meals"),
        t(lang, "progress.meals.healthy"),
        meals.healthy,
        t(lang, "progress.meals.unsure"),
        meals.unsure,
        t(lang, "progress.meals.unhealthy"),
        meals.unhealthy,
        t(lang, "progress.meals.score"),
        meals.healthiness_pct(),
    ));

    text
}

pub async fn show_summary(bot: &Bot, chat_id: ChatId, lang: Lang, db: &Db) -> HandlerResult {
    let tg_id = chat_id.0;
    let (workouts, meals, sleep) = {
        let db = db.lock().await;
        (
            db.workout_stats(tg_id)?,
            db.meal_stats(tg_id, 7)?,
            db.sleep_stats(tg_id, 7)?,
        )
    };

    if workouts.total == 0 && meals.total == 0 && sleep.nights == 0 {
        bot.send_message(chat_id, t(lang, "progress.no_data")).await?;
        return Ok(());
    }

    bot.send_message(chat_id, summary_text(lang, &workouts, &meals, &sleep))
        .reply_markup(details_kb(lang))
        .await?;
    Ok(())
}

pub async fn handle_callback(bot: Bot, q: CallbackQuery, data: &str, db: Db) -> HandlerResult {
    let tg_id = q.from.id.0 as i64;
    let lang = super::user_lang(&db, tg_id).await;

    let Some(detail) = data.strip_prefix("progress:details:") else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    let text = match detail {
        "workouts" => {
            let stats = { db.lock().await.workout_stats(tg_id)? };
            let mut text = format!(
                "🏋️ {}\n\n{}: {}\n{}: {}\n",
                t(lang, "progress.workouts"),
                t(lang, "progress.workouts.week"),
                stats.this_week,
                t(lang, "progress.workouts.total"),
                stats.total,
            );
            for (group, count) in &stats.by_group {
                let label = MuscleGroup::from_key(group)
                    .map(|g| t(lang, g.i18n_key()))
                    .unwrap_or(group);
                text.push_str(&format!("   • {}: {}\n", label, count));
            }
            text
        }
        "sleep" => {
            let stats = { db.lock().await.sleep_stats(tg_id, 7)? };
            if stats.nights == 0 {
                format!("😴 {}", t(lang, "progress.sleep.none"))
            } else {
                format!(
                    "😴 {}\n\n{} {:.1} h\n{}: {}/{}",
                    t(lang, "progress.sleep"),
                    t(lang, "progress.sleep.avg"),
                    stats.avg_duration,
                    t(lang, "progress.sleep.optimal"),
                    stats.optimal_nights,
                    stats.nights,
                )
            }
        }
        "meals" => {
            let stats = { db.lock().await.meal_stats(tg_id, 7)? };
            format!(
                "🍽️ {}\n\n{}: {}\n{}: {}\n{}: {}\n{}: {}%",
                t(lang, "progress.meals"),
                t(lang, "progress.meals.healthy"),
                stats.healthy,
                t(lang, "progress.meals.unsure"),
                stats.unsure,
                t(lang, "progress.meals.unhealthy"),
                stats.unhealthy,
                t(lang, "progress.meals.score"),
                stats.healthiness_pct(),
            )
        }
        "weight" => {
            let user = { db.lock().await.get_user(tg_id)? };
            match user.and_then(|u| u.weight) {
                Some(weight) => {
                    format!("⚖️ {}: {} kg", t(lang, "progress.weight.current"), weight)
                }
                None => t(lang, "progress.no_data").to_string(),
            }
        }
        _ => t(lang, "progress.no_data").to_string(),
    };

    if let Some(msg) = q.message.as_ref() {
        bot.edit_message_text(msg.chat().id, msg.id(), text)
            .reply_markup(details_kb(lang))
            .await?;
    }
    bot.answer_callback_query(q.id).await?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_text_shows_all_sections() {
        let workouts = WorkoutStats {
            total: 10,
            this_week: 3,
            by_group: vec![("chest".to_string(), 6)],
        };
        let meals = MealStats {
            total: 4,
            healthy: 3,
            unsure: 1,
            unhealthy: 0,
        };
        let sleep = SleepStats {
            nights: 5,
            avg_duration: 7.4,
            optimal_nights: 4,
        };
        let text = summary_text(Lang::En, &workouts, &meals, &sleep);
        assert!(text.contains("7.4"));
        assert!(text.contains("4/5"));
        assert!(text.contains("75%"));
        assert!(text.contains("this week: 3"));
    }

    #[test]
    fn test_summary_text_without_sleep_data() {
        let text = summary_text(
            Lang::En,
            &WorkoutStats::default(),
            &MealStats::default(),
            &SleepStats::default(),
        );
        assert!(text.contains("No sleep logged yet"));
    }
}
