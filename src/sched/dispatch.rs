//! Reminder dispatch - renders and delivers a firing job
//!
//! The messaging collaborator is injected through the [`Notify`] trait, so
//! the dispatcher never reaches for a process-global bot handle and tests
//! can observe or fail deliveries.

use std::future::Future;
use std::sync::Arc;

use anyhow::Result;
use teloxide::prelude::*;
use teloxide::types::{ChatId, InlineKeyboardButton, InlineKeyboardMarkup};
use tokio::sync::Mutex;
use tracing::{error, info, warn};

use super::JobKind;
use crate::db::Database;
use crate::i18n::{Lang, t};

/// Outbound messaging seam for scheduled sends.
pub trait Notify: Send + Sync + 'static {
    fn send(
        &self,
        chat_id: i64,
        text: String,
        keyboard: InlineKeyboardMarkup,
    ) -> impl Future<Output = Result<()>> + Send;
}

impl Notify for Bot {
    async fn send(&self, chat_id: i64, text: String, keyboard: InlineKeyboardMarkup) -> Result<()> {
        self.send_message(ChatId(chat_id), text)
            .reply_markup(keyboard)
            .await?;
        Ok(())
    }
}

/// Renders a localized reminder and delivers it when a trigger fires.
pub struct Dispatcher<N> {
    notifier: N,
    db: Arc<Mutex<Database>>,
}

impl<N: Notify> Dispatcher<N> {
    pub fn new(notifier: N, db: Arc<Mutex<Database>>) -> Self {
        Self { notifier, db }
    }

    pub fn db(&self) -> Arc<Mutex<Database>> {
        Arc::clone(&self.db)
    }

    /// Deliver one firing job. The language and settings snapshot is taken
    /// at fire time, not at registration time. A delivery failure is logged
    /// and does not cancel the underlying job; the send attempt is recorded
    /// in the notification log either way.
    pub async fn dispatch(&self, tg_id: i64, kind: JobKind) {
        let lang = {
            let db = self.db.lock().await;
            match db.get_user(tg_id) {
                Ok(Some(user)) => user.language,
                Ok(None) => {
                    warn!("reminder {} fired for unknown user={}", kind.as_str(), tg_id);
                    return;
                }
                Err(err) => {
                    error!("failed to load user={} for reminder: {}", tg_id, err);
                    return;
                }
            }
        };

        let (text, keyboard) = render_reminder(lang, kind);
        match self.notifier.send(tg_id, text, keyboard).await {
            Ok(()) => info!("sent {} reminder to user={}", kind.as_str(), tg_id),
            Err(err) => warn!(
                "failed to send {} reminder to user={}: {}",
                kind.as_str(),
                tg_id,
                err
            ),
        }

        let db = self.db.lock().await;
        if let Err(err) = db.log_notification(tg_id, kind.as_str(), None) {
            error!("failed to log {} notification: {}", kind.as_str(), err);
        }
    }
}

/// Localized text plus the action keyboard for one reminder kind.
pub fn render_reminder(lang: Lang, kind: JobKind) -> (String, InlineKeyboardMarkup) {
    match kind {
        JobKind::Workout => (
            t(lang, "notif.workout").to_string(),
            InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
                t(lang, "notif.start_workout"),
                "w:start_workout",
            )]]),
        ),
        JobKind::SleepEvening => (
            t(lang, "notif.sleep_evening").to_string(),
            InlineKeyboardMarkup::new([[InlineKeyboardButton::callback(
                t(lang, "sleep.log_btn"),
                "sleep:notif:log:sleep_evening",
            )]]),
        ),
        JobKind::SleepMorning => (
            t(lang, "notif.sleep_morning").to_string(),
            InlineKeyboardMarkup::new([vec![
                InlineKeyboardButton::callback(t(lang, "btn.yes"), "sleep:notif:log:sleep_morning"),
                InlineKeyboardButton::callback(t(lang, "btn.no"), "sleep:notif:no:sleep_morning"),
            ]]),
        ),
        JobKind::Breakfast | JobKind::Lunch | JobKind::Dinner => {
            let text_key = match kind {
                JobKind::Breakfast => "notif.breakfast",
                JobKind::Lunch => "notif.lunch",
                _ => "notif.dinner",
            };
            (
                t(lang, text_key).to_string(),
                InlineKeyboardMarkup::new([
                    vec![InlineKeyboardButton::callback(
                        t(lang, "notif.mark_now"),
                        format!("meals:reminder:log:{}", kind.as_str()),
                    )],
                    vec![InlineKeyboardButton::callback(
                        t(lang, "notif.later"),
                        format!("meals:reminder:later:{}", kind.as_str()),
                    )],
                    vec![InlineKeyboardButton::callback(
                        t(lang, "notif.skip"),
                        format!("meals:reminder:skip:{}", kind.as_str()),
                    )],
                ]),
            )
        }
    }
}

#[cfg(test)]
pub mod tests {
    use super::*;
    use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};

    /// Delivery counters shared with the test body.
    #[derive(Default)]
    pub struct MockState {
        pub sent: AtomicUsize,
        pub fail: AtomicBool,
    }

    /// Records sends and can be told to fail, standing in for Telegram.
    #[derive(Default, Clone)]
    pub struct MockNotifier(pub Arc<MockState>);

    impl Notify for MockNotifier {
        async fn send(
            &self,
            _chat_id: i64,
            _text: String,
            _keyboard: InlineKeyboardMarkup,
        ) -> Result<()> {
            if self.0.fail.load(Ordering::SeqCst) {
                anyhow::bail!("delivery refused");
            }
            self.0.sent.fetch_add(1, Ordering::SeqCst);
            Ok(())
        }
    }

    pub fn mock_dispatcher() -> (Dispatcher<MockNotifier>, Arc<MockState>) {
        let notifier = MockNotifier::default();
        let inner = Arc::clone(&notifier.0);
        let db = Arc::new(Mutex::new(Database::open_in_memory().unwrap()));
        (Dispatcher::new(notifier, db), inner)
    }

    #[tokio::test]
    async fn test_dispatch_sends_and_logs() {
        let (dispatcher, notifier) = mock_dispatcher();
        {
            let db = dispatcher.db();
            let db = db.lock().await;
            db.ensure_user(100).unwrap();
        }
        dispatcher.dispatch(100, JobKind::Breakfast).await;

        assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
        let db = dispatcher.db();
        let db = db.lock().await;
        assert_eq!(db.notification_count(100, "breakfast").unwrap(), 1);
    }

    #[tokio::test]
    async fn test_delivery_failure_still_logs_one_row() {
        let (dispatcher, notifier) = mock_dispatcher();
        {
            let db = dispatcher.db();
            let db = db.lock().await;
            db.ensure_user(100).unwrap();
        }
        notifier.fail.store(true, Ordering::SeqCst);
        dispatcher.dispatch(100, JobKind::Breakfast).await;

        assert_eq!(notifier.sent.load(Ordering::SeqCst), 0);
        {
            let db = dispatcher.db();
            let db = db.lock().await;
            assert_eq!(db.notification_count(100, "breakfast").unwrap(), 1);
        }

        // next fire goes through once delivery recovers
        notifier.fail.store(false, Ordering::SeqCst);
        dispatcher.dispatch(100, JobKind::Breakfast).await;
        assert_eq!(notifier.sent.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_unknown_user_is_skipped_without_log() {
        let (dispatcher, notifier) = mock_dispatcher();
        dispatcher.dispatch(404, JobKind::Lunch).await;

        assert_eq!(notifier.sent.load(Ordering::SeqCst), 0);
        let db = dispatcher.db();
        let db = db.lock().await;
        assert_eq!(db.notification_count(404, "lunch").unwrap(), 0);
    }

    #[test]
    fn test_render_uses_fire_time_language() {
        let (ru_text, _) = render_reminder(Lang::Ru, JobKind::Dinner);
        let (en_text, _) = render_reminder(Lang::En, JobKind::Dinner);
        assert_ne!(ru_text, en_text);
    }
}
