//! Admin panel - statistics and mass broadcast (Russian-only surface)

use std::sync::Arc;

use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use tracing::{info, warn};

use super::{BotConfig, Db, HandlerResult, Jobs, MyDialogue, State};

const NO_ACCESS: &str = "❌ У вас нет прав доступа к админ-панели.";

async fn is_admin(db: &Db, config: &BotConfig, tg_id: i64) -> bool {
    if config.super_admin == Some(tg_id) {
        return true;
    }
    db.lock().await.is_admin(tg_id).unwrap_or(false)
}

fn panel_kb() -> InlineKeyboardMarkup {
    InlineKeyboardMarkup::new([
        vec![InlineKeyboardButton::callback(
            "📢 Массовая отправка",
            "admin:broadcast",
        )],
        vec![InlineKeyboardButton::callback(
            "🔄 Обновить статистику",
            "admin:stats",
        )],
    ])
}

async fn stats_text(db: &Db, registry: &Jobs) -> Result<String, anyhow::Error> {
    let stats = { db.lock().await.bot_stats()? };
    Ok(format!(
        "🛡️ Админ-панель\n\n\
         👥 Пользователи: {}\n\
         📈 Новых за неделю: +{}\n\
         🔔 Активных напоминаний: {}\n\
         📬 Отправлено уведомлений: {}\n\
         💬 Ответов на уведомления: {}",
        stats.total_users,
        stats.users_this_week,
        registry.job_count(),
        stats.notifications_sent,
        stats.notifications_responded,
    ))
}

pub async fn cmd_admin(
    bot: Bot,
    msg: Message,
    db: Db,
    registry: Jobs,
    config: Arc<BotConfig>,
) -> HandlerResult {
    let tg_id = msg.chat.id.0;
    if !is_admin(&db, &config, tg_id).await {
        bot.send_message(msg.chat.id, NO_ACCESS).await?;
        return Ok(());
    }

    bot.send_message(msg.chat.id, stats_text(&db, &registry).await?)
        .reply_markup(panel_kb())
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
    config: Arc<BotConfig>,
) -> HandlerResult {
    let tg_id = q.from.id.0 as i64;
    if !is_admin(&db, &config, tg_id).await {
        bot.answer_callback_query(q.id).text(NO_ACCESS).await?;
        return Ok(());
    }

    match data {
        "admin:stats" => {
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(msg.chat().id, msg.id(), stats_text(&db, &registry).await?)
                    .reply_markup(panel_kb())
                    .await?;
            }
        }
        "admin:broadcast" => {
            dialogue.update(State::Broadcast).await?;
            if let Some(msg) = q.message.as_ref() {
                bot.edit_message_text(
                    msg.chat().id,
                    msg.id(),
                    "📢 Введите текст рассылки. Он будет отправлен всем пользователям.",
                )
                .await?;
            }
        }
        _ => {}
    }

    bot.answer_callback_query(q.id).await?;
    Ok(())
}

/// Broadcast the collected text to every user. A failed delivery is
/// counted and logged, never aborts the run.
pub async fn handle_broadcast_text(
    bot: Bot,
    msg: Message,
    text: &str,
    dialogue: MyDialogue,
    db: Db,
) -> HandlerResult {
    dialogue.reset().await?;
    let users = { db.lock().await.all_users()? };

    let mut sent = 0usize;
    let mut failed = 0usize;
    for user in &users {
        match bot.send_message(ChatId(user.tg_id), text).await {
            Ok(_) => sent += 1,
            Err(err) => {
                failed += 1;
                warn!("broadcast to user={} failed: {}", user.tg_id, err);
            }
        }
    }
    info!("broadcast finished: sent={} failed={}", sent, failed);

    bot.send_message(
        msg.chat.id,
        format!("📢 Рассылка завершена.\nОтправлено: {}\nОшибок: {}", sent, failed),
    )
    .await?;
    Ok(())
}
