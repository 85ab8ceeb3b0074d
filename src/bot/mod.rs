//! Telegram bot module - update routing and conversation state

pub mod admin;
pub mod meals;
pub mod menu;
pub mod onboarding;
pub mod profile;
pub mod progress;
pub mod reminders;
pub mod settings;
pub mod sleep;
pub mod start;
pub mod workouts;

use std::sync::Arc;

use teloxide::{
    dispatching::dialogue::{Dialogue, InMemStorage},
    prelude::*,
    utils::command::BotCommands,
};
use tokio::sync::Mutex;

use crate::content::{MealCatalog, MealType, MuscleGroup};
use crate::db::{Database, TimeField};
use crate::i18n::Lang;
use crate::sched::Registry;

pub type MyDialogue = Dialogue<State, InMemStorage<State>>;
pub type HandlerResult = Result<(), Box<dyn std::error::Error + Send + Sync>>;
pub type Db = Arc<Mutex<Database>>;
pub type Jobs = Arc<Registry<Bot>>;

/// Runtime configuration handlers need beside the database.
#[derive(Debug, Clone)]
pub struct BotConfig {
    /// Gated channel users must join, e.g. "@fitonomics_uz".
    pub channel: String,
    /// Super admin bypasses the admins table.
    pub super_admin: Option<i64>,
}

/// Conversation state, one tagged union per flow. Ephemeral by design:
/// a restart drops it and the user restarts the flow.
#[derive(Clone, Default)]
pub enum State {
    #[default]
    Idle,
    Onboarding(OnbStep),
    ProfileEdit(ProfileStep),
    WorkoutRun {
        group: MuscleGroup,
        index: usize,
    },
    MealLog(MealStep),
    SleepLog(SleepStep),
    TimeSetting(TimeField),
    Broadcast,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum OnbStep {
    Name,
    Age,
    Height,
    Weight,
    Budget,
    WorkoutTime,
}

#[derive(Clone, Copy, PartialEq, Eq)]
pub enum ProfileStep {
    Name,
    Age,
    Height,
    Weight,
    Budget,
}

#[derive(Clone)]
pub enum MealStep {
    Description {
        meal_type: MealType,
    },
    Rating {
        meal_type: MealType,
        description: String,
    },
}

#[derive(Clone)]
pub enum SleepStep {
    BedTimeManual,
    WakeChoice {
        sleep_time: String,
    },
    WakeTimeManual {
        sleep_time: String,
    },
    Electronics {
        sleep_time: String,
        wake_time: String,
    },
    Quality {
        sleep_time: String,
        wake_time: String,
        electronics: bool,
    },
}

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase", description = "Команды бота:")]
pub enum Command {
    #[command(description = "Начать заново")]
    Start,
    #[command(description = "Главное меню")]
    Menu,
    #[command(description = "Помощь")]
    Help,
    #[command(description = "Админ-панель")]
    Admin,
}

/// Start the bot: wire the dialogue storage and the three update routes.
pub async fn run_bot(
    bot: Bot,
    db: Db,
    registry: Jobs,
    catalog: Arc<MealCatalog>,
    config: Arc<BotConfig>,
) -> anyhow::Result<()> {
    let handler = dptree::entry()
        .enter_dialogue::<Update, InMemStorage<State>, State>()
        .branch(
            Update::filter_message()
                .filter_command::<Command>()
                .endpoint(handle_command),
        )
        .branch(Update::filter_message().endpoint(handle_message))
        .branch(Update::filter_callback_query().endpoint(handle_callback));

    Dispatcher::builder(bot, handler)
        .dependencies(dptree::deps![
            InMemStorage::<State>::new(),
            db,
            registry,
            catalog,
            config
        ])
        .enable_ctrlc_handler()
        .build()
        .dispatch()
        .await;

    Ok(())
}

pub async fn user_lang(db: &Db, tg_id: i64) -> Lang {
    db.lock().await.user_lang(tg_id)
}

/// Recompute one user's reminder jobs from the stored profile/settings.
pub async fn reschedule_user(db: &Db, registry: &Jobs, tg_id: i64) -> anyhow::Result<()> {
    let db = db.lock().await;
    if let Some(user) = db.get_user(tg_id)? {
        let settings = db.get_settings(tg_id)?;
        registry.schedule_user(&user, settings.as_ref());
    }
    Ok(())
}

async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    dialogue: MyDialogue,
    db: Db,
    registry: Jobs,
    config: Arc<BotConfig>,
) -> HandlerResult {
    match cmd {
        Command::Start => start::cmd_start(bot, msg, dialogue, db).await,
        Command::Menu => {
            let lang = user_lang(&db, msg.chat.id.0).await;
            menu::send_main_menu(&bot, msg.chat.id, lang).await
        }
        Command::Help => {
            let lang = user_lang(&db, msg.chat.id.0).await;
            menu::send_help(&bot, msg.chat.id, lang).await
        }
        Command::Admin => admin::cmd_admin(bot, msg, db, registry, config).await,
    }
}

async fn handle_message(
    bot: Bot,
    msg: Message,
    dialogue: MyDialogue,
    db: Db,
    registry: Jobs,
    config: Arc<BotConfig>,
) -> HandlerResult {
    let Some(text) = msg.text().map(str::to_owned) else {
        return Ok(());
    };
    let state = dialogue.get().await?.unwrap_or_default();

    match state {
        State::Onboarding(step) => {
            onboarding::handle_text(bot, msg, &text, dialogue, db, step).await
        }
        State::ProfileEdit(step) => profile::handle_text(bot, msg, &text, dialogue, db, step).await,
        State::MealLog(step) => meals::handle_text(bot, msg, &text, dialogue, db, step).await,
        State::SleepLog(step) => sleep::handle_text(bot, msg, &text, dialogue, db, step).await,
        State::TimeSetting(field) => {
            settings::handle_time_text(bot, msg, &text, dialogue, db, registry, field).await
        }
        State::Broadcast => admin::handle_broadcast_text(bot, msg, &text, dialogue, db).await,
        // the workout run is button-driven; stray text is ignored
        State::WorkoutRun { .. } => Ok(()),
        State::Idle => {
            if let Some(lang) = start::lang_for_button(&text) {
                return start::set_language(bot, msg, db, config, lang).await;
            }
            if let Some(action) = menu::action_for(&text) {
                return menu::handle_action(bot, msg, db, action).await;
            }
            // no profile yet means the user never picked a language
            let user = { db.lock().await.get_user(msg.chat.id.0)? };
            match user {
                Some(user) => {
                    bot.send_message(msg.chat.id, crate::i18n::t(user.language, "menu.welcome"))
                        .reply_markup(menu::main_menu_kb(user.language))
                        .await?;
                }
                None => start::send_language_prompt(&bot, msg.chat.id).await?,
            }
            Ok(())
        }
    }
}

async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    dialogue: MyDialogue,
    db: Db,
    registry: Jobs,
    catalog: Arc<MealCatalog>,
    config: Arc<BotConfig>,
) -> HandlerResult {
    let Some(data) = q.data.clone() else {
        bot.answer_callback_query(q.id).await?;
        return Ok(());
    };

    if data.starts_with("start:") {
        start::handle_callback(bot, q, &data, dialogue, db, registry).await
    } else if data.starts_with("gate:") || data.starts_with("onb:") {
        onboarding::handle_callback(bot, q, &data, dialogue, db, registry, config).await
    } else if data.starts_with("w:") {
        workouts::handle_callback(bot, q, &data, dialogue, db).await
    } else if data.starts_with("meals:") {
        meals::handle_callback(bot, q, &data, dialogue, db, catalog).await
    } else if data.starts_with("sleep:") {
        sleep::handle_callback(bot, q, &data, dialogue, db).await
    } else if data.starts_with("progress:") {
        progress::handle_callback(bot, q, &data, db).await
    } else if data.starts_with("settings:") || data.starts_with("lang:") || data.starts_with("set:")
    {
        settings::handle_callback(bot, q, &data, dialogue, db, registry).await
    } else if data.starts_with("profile:") {
        profile::handle_callback(bot, q, &data, dialogue, db).await
    } else if data.starts_with("rem:") {
        reminders::handle_callback(bot, q, &data, db, registry).await
    } else if data.starts_with("admin:") {
        admin::handle_callback(bot, q, &data, dialogue, db, registry, config).await
    } else {
        bot.answer_callback_query(q.id).await?;
        Ok(())
    }
}
