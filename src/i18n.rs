//! Localization table - ru is the default and the fallback

/// Supported interface languages.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Lang {
    #[default]
    Ru,
    Uz,
    En,
}

impl Lang {
    pub fn code(self) -> &'static str {
        match self {
            Lang::Ru => "ru",
            Lang::Uz => "uz",
            Lang::En => "en",
        }
    }

    /// Unknown codes fall back to Russian (policy, not error).
    pub fn from_code(code: &str) -> Self {
        match code {
            "uz" => Lang::Uz,
            "en" => Lang::En,
            _ => Lang::Ru,
        }
    }
}

/// Translate a key. Unknown keys are returned as-is; unknown languages
/// resolve to Russian.
pub fn t<'a>(lang: Lang, key: &'a str) -> &'a str {
    match entry(key) {
        Some([ru, uz, en]) => match lang {
            Lang::Ru => ru,
            Lang::Uz => uz,
            Lang::En => en,
        },
        None => key,
    }
}

fn entry(key: &str) -> Option<[&'static str; 3]> {
    let e = match key {
        // start / language / reset
        "start.choose_language" => [
            "Привет! 👋 Я твой Fitonomics бот. Выбери язык:",
            "Salom! 👋 Men sizning Fitonomics botingizman. Tilni tanlang:",
            "Hi! 👋 I'm your Fitonomics bot. Choose your language:",
        ],
        "start.lang_chosen" => [
            "Язык установлен на Русский 🇷🇺",
            "Til O‘zbekcha 🇺🇿 ga o‘rnatildi",
            "Language set to English 🇺🇸",
        ],
        "start.reset_title" => [
            "Начать заново?",
            "Qaytadan boshlaymizmi?",
            "Start over?",
        ],
        "start.reset_desc" => [
            "Твой профиль и напоминания будут удалены.",
            "Profilingiz va eslatmalaringiz o‘chiriladi.",
            "Your profile and reminders will be deleted.",
        ],
        "btn.yes" => ["✅ Да", "✅ Ha", "✅ Yes"],
        "btn.no" => ["❌ Нет", "❌ Yo‘q", "❌ No"],

        // channel gate
        "gate.welcome_title" => [
            "Добро пожаловать в Fitonomics! 💪",
            "Fitonomics'ga xush kelibsiz! 💪",
            "Welcome to Fitonomics! 💪",
        ],
        "gate.welcome_body" => [
            "Чтобы продолжить, подпишись на наш канал.",
            "Davom etish uchun kanalimizga obuna bo‘ling.",
            "To continue, join our channel.",
        ],
        "gate.join" => ["📣 Подписаться", "📣 Obuna bo‘lish", "📣 Join channel"],
        "gate.joined" => ["✅ Я подписался", "✅ Obuna bo‘ldim", "✅ I joined"],
        "gate.need_join" => [
            "Похоже, ты ещё не в канале. Подпишись и нажми кнопку ещё раз.",
            "Siz hali kanalda emassiz. Obuna bo‘lib, tugmani yana bosing.",
            "Looks like you haven't joined yet. Join and press the button again.",
        ],
        "gate.ok" => [
            "Отлично, ты с нами! 🎉",
            "Ajoyib, siz biz bilansiz! 🎉",
            "Great, you're in! 🎉",
        ],

        // onboarding
        "onb.q_name" => [
            "Шаг {step}. Как тебя зовут?",
            "{step}-qadam. Ismingiz nima?",
            "Step {step}. What's your name?",
        ],
        "onb.q_age" => [
            "Шаг {step}. Сколько тебе лет?",
            "{step}-qadam. Yoshingiz nechida?",
            "Step {step}. How old are you?",
        ],
        "onb.q_height" => [
            "Шаг {step}. Твой рост в сантиметрах?",
            "{step}-qadam. Bo‘yingiz necha santimetr?",
            "Step {step}. Your height in centimeters?",
        ],
        "onb.q_weight" => [
            "Шаг {step}. Твой вес в килограммах?",
            "{step}-qadam. Vazningiz necha kilogramm?",
            "Step {step}. Your weight in kilograms?",
        ],
        "onb.q_budget" => [
            "Шаг {step}. Какой у тебя бюджет на еду?",
            "{step}-qadam. Ovqatga byudjetingiz qancha?",
            "Step {step}. What's your food budget?",
        ],
        "onb.q_workout_time" => [
            "Шаг {step}. Когда тебе удобнее тренироваться?",
            "{step}-qadam. Qachon mashq qilish qulay?",
            "Step {step}. When do you prefer to work out?",
        ],
        "onb.invalid_name" => ["✏️ Введи имя текстом", "✏️ Ismingizni yozing", "✏️ Type your name"],
        "onb.invalid_age" => [
            "Возраст должен быть числом от 1 до 120",
            "Yosh 1 dan 120 gacha son bo‘lishi kerak",
            "Age must be a number from 1 to 120",
        ],
        "onb.invalid_height" => [
            "Рост должен быть числом от 80 до 250 см",
            "Bo‘y 80 dan 250 sm gacha bo‘lishi kerak",
            "Height must be a number from 80 to 250 cm",
        ],
        "onb.invalid_weight" => [
            "Вес должен быть числом от 20 до 400 кг",
            "Vazn 20 dan 400 kg gacha bo‘lishi kerak",
            "Weight must be a number from 20 to 400 kg",
        ],
        "onb.calculating" => [
            "Считаю твой план... ⏳",
            "Rejangizni hisoblayapman... ⏳",
            "Calculating your plan... ⏳",
        ],
        "onb.final" => [
            "{name}, твой профиль готов! 🎉",
            "{name}, profilingiz tayyor! 🎉",
            "{name}, your profile is ready! 🎉",
        ],
        "onb.bmi_title" => [
            "Твой ИМТ: {bmi}",
            "Sizning TVI: {bmi}",
            "Your BMI: {bmi}",
        ],
        "onb.bmi_under" => [
            "Ниже нормы — добавим калорийные приёмы пищи.",
            "Me'yordan past — kaloriyali ovqatlar qo‘shamiz.",
            "Below normal — we'll add calorie-dense meals.",
        ],
        "onb.bmi_normal" => [
            "В норме — поддерживаем форму!",
            "Me'yorda — formani saqlaymiz!",
            "Normal — let's keep it up!",
        ],
        "onb.bmi_over" => [
            "Выше нормы — сделаем упор на активность.",
            "Me'yordan yuqori — faollikka urg‘u beramiz.",
            "Above normal — we'll focus on activity.",
        ],
        "onb.bmi_other" => [
            "Сильно выше нормы — начнём с лёгких тренировок.",
            "Me'yordan ancha yuqori — yengil mashqlardan boshlaymiz.",
            "Well above normal — we'll start with light workouts.",
        ],
        "invalid.time" => [
            "Введи время в формате ЧЧ:ММ, например 22:30",
            "Vaqtni SS:DD formatida kiriting, masalan 22:30",
            "Enter time as HH:MM, e.g. 22:30",
        ],
        "error.state_lost" => [
            "Что-то пошло не так, начни заново из меню.",
            "Nimadir xato ketdi, menyudan qayta boshlang.",
            "Something went wrong, start again from the menu.",
        ],

        // budget / workout-time choices
        "budget.low" => ["🔘 До 200 000 UZS", "🔘 200 000 so‘mdan kam", "🔘 Under 200,000 UZS"],
        "budget.mid" => ["🔘 200 000–800 000 UZS", "🔘 200 000–800 000 so‘m", "🔘 200,000–800,000 UZS"],
        "budget.high" => ["🔘 800 000+ UZS", "🔘 800 000+ so‘m", "🔘 800,000+ UZS"],
        "workout_time.morning" => ["🌅 Утро", "🌅 Ertalab", "🌅 Morning"],
        "workout_time.day" => ["☀️ День", "☀️ Kunduzi", "☀️ Afternoon"],
        "workout_time.evening" => ["🌆 Вечер", "🌆 Kechqurun", "🌆 Evening"],

        // main menu
        "menu.welcome" => [
            "Главное меню. Чем займёмся?",
            "Asosiy menyu. Nima qilamiz?",
            "Main menu. What shall we do?",
        ],
        "menu.workouts" => ["🏋️ Тренировки", "🏋️ Mashqlar", "🏋️ Workouts"],
        "menu.meals" => ["🍽️ Питание", "🍽️ Ovqatlanish", "🍽️ Meals"],
        "menu.sleep" => ["😴 Сон", "😴 Uyqu", "😴 Sleep"],
        "menu.progress" => ["📈 Прогресс", "📈 Taraqqiyot", "📈 Progress"],
        "menu.profile" => ["👤 Профиль", "👤 Profil", "👤 Profile"],
        "menu.settings" => ["⚙️ Настройки", "⚙️ Sozlamalar", "⚙️ Settings"],
        "menu.reminders" => ["🔔 Напоминания", "🔔 Eslatmalar", "🔔 Reminders"],
        "menu.help" => ["❓ Помощь", "❓ Yordam", "❓ Help"],
        "menu.back_to_main" => ["🏠 Главное меню", "🏠 Asosiy menyu", "🏠 Main menu"],
        "menu.back" => ["⬅️ Назад", "⬅️ Orqaga", "⬅️ Back"],

        // workouts
        "workouts.choose_group" => [
            "Выбери группу мышц:",
            "Mushak guruhini tanlang:",
            "Choose a muscle group:",
        ],
        "workouts.last_group" => [
            "Прошлый раз: {last}",
            "O‘tgan safar: {last}",
            "Last time: {last}",
        ],
        "workouts.next" => ["➡️ Дальше", "➡️ Keyingi", "➡️ Next"],
        "workouts.done" => ["✅ Закончил", "✅ Tugatdim", "✅ Done"],
        "workouts.step" => [
            "Упражнение {i} из {n}",
            "Mashq {i} / {n}",
            "Exercise {i} of {n}",
        ],
        "workouts.finished" => [
            "Тренировка записана! 💪",
            "Mashg‘ulot yozib olindi! 💪",
            "Workout logged! 💪",
        ],
        "workouts.empty" => [
            "Для этой группы пока нет упражнений.",
            "Bu guruh uchun hozircha mashqlar yo‘q.",
            "No exercises for this group yet.",
        ],
        "group.full" => ["Всё тело", "Butun tana", "Full body"],
        "group.chest" => ["Грудь", "Ko‘krak", "Chest"],
        "group.arms" => ["Руки", "Qo‘llar", "Arms"],
        "group.legs" => ["Ноги", "Oyoqlar", "Legs"],
        "group.shoulders" => ["Плечи", "Yelkalar", "Shoulders"],
        "group.back" => ["Спина", "Orqa", "Back"],

        // meals
        "meals.title" => ["🍽️ Питание", "🍽️ Ovqatlanish", "🍽️ Meals"],
        "meals.section_desc" => [
            "Готовые наборы под твой бюджет или свой вариант.",
            "Byudjetingizga mos tayyor to‘plamlar yoki o‘z variantingiz.",
            "Ready-made packs for your budget, or your own meal.",
        ],
        "meals.choose_category" => [
            "Выбери приём пищи:",
            "Ovqat turini tanlang:",
            "Choose a meal:",
        ],
        "meals.choose_pack" => ["Выбери набор:", "To‘plamni tanlang:", "Choose a pack:"],
        "meals.category.breakfast" => ["🌅 Завтрак", "🌅 Nonushta", "🌅 Breakfast"],
        "meals.category.lunch" => ["☀️ Обед", "☀️ Tushlik", "☀️ Lunch"],
        "meals.category.dinner" => ["🌙 Ужин", "🌙 Kechki ovqat", "🌙 Dinner"],
        "meals.category.custom" => ["✍️ Свой вариант", "✍️ O‘z variantim", "✍️ My own meal"],
        "meals.pack" => ["Набор", "To‘plam", "Pack"],
        "meals.ingredients" => ["Состав", "Tarkibi", "Ingredients"],
        "meals.price" => ["Цена", "Narxi", "Price"],
        "meals.calories" => ["Калории", "Kaloriya", "Calories"],
        "meals.prep_time" => ["Готовка", "Tayyorlash", "Prep time"],
        "meals.done_btn" => ["✅ Я это съел", "✅ Men buni yedim", "✅ I ate this"],
        "meals.logged" => ["Приём пищи записан!", "Ovqat yozib olindi!", "Meal logged!"],
        "meals.no_packs" => [
            "Наборы не найдены.",
            "To‘plamlar topilmadi.",
            "No packs found.",
        ],
        "meals.pack_not_found" => ["Набор не найден", "To‘plam topilmadi", "Pack not found"],
        "meals.custom.what_ate" => [
            "Что ты съел? Опиши коротко.",
            "Nima yedingiz? Qisqacha yozing.",
            "What did you eat? Describe it briefly.",
        ],
        "meals.custom.health_rating" => [
            "Насколько это было полезно?",
            "Bu qanchalik foydali edi?",
            "How healthy was it?",
        ],
        "meals.health.healthy" => ["🍎 Полезно", "🍎 Foydali", "🍎 Healthy"],
        "meals.health.normal" => ["😐 Нормально", "😐 O‘rtacha", "😐 Normal"],
        "meals.health.unhealthy" => ["🍔 Вредно", "🍔 Zararli", "🍔 Unhealthy"],

        // meal reminders
        "notif.breakfast" => [
            "☀️ Время завтрака! Не пропускай первый приём пищи.",
            "☀️ Nonushta vaqti! Birinchi ovqatni o‘tkazib yubormang.",
            "☀️ Breakfast time! Don't skip your first meal.",
        ],
        "notif.lunch" => [
            "☀️ Время обеда! Заправься энергией.",
            "☀️ Tushlik vaqti! Energiya oling.",
            "☀️ Lunch time! Refuel your energy.",
        ],
        "notif.dinner" => [
            "🌙 Время ужина! Лёгкий ужин — хороший сон.",
            "🌙 Kechki ovqat vaqti! Yengil ovqat — yaxshi uyqu.",
            "🌙 Dinner time! A light dinner means good sleep.",
        ],
        "notif.mark_now" => ["✅ Отметить сейчас", "✅ Hozir belgilash", "✅ Log now"],
        "notif.later" => ["⏰ Позже", "⏰ Keyinroq", "⏰ Later"],
        "notif.skip" => ["⏭️ Пропустить", "⏭️ O‘tkazib yuborish", "⏭️ Skip"],
        "notif.later_ok" => [
            "Хорошо, напомню в следующий раз!",
            "Yaxshi, keyingi safar eslataman!",
            "Okay, I'll remind you next time!",
        ],
        "notif.skipped" => ["Пропущено.", "O‘tkazib yuborildi.", "Skipped."],
        "notif.workout" => [
            "💪 Время тренировки!\nВыбери, что будем качать сегодня.",
            "💪 Mashq vaqti!\nBugun nimani mashq qilamiz?",
            "💪 Workout time!\nPick what we're training today.",
        ],
        "notif.start_workout" => ["🏋️ Начать тренировку", "🏋️ Mashqni boshlash", "🏋️ Start workout"],
        "notif.sleep_evening" => [
            "🌙 Через час пора спать. Отложи телефон и начни готовиться ко сну.",
            "🌙 Bir soatdan keyin uxlash vaqti. Telefonni qo‘yib, uyquga tayyorlaning.",
            "🌙 Bedtime is in an hour. Put the phone away and start winding down.",
        ],
        "notif.sleep_morning" => [
            "🌅 Доброе утро! Запишем, как ты спал?",
            "🌅 Xayrli tong! Qanday uxlaganingizni yozamizmi?",
            "🌅 Good morning! Shall we log how you slept?",
        ],

        // sleep
        "sleep.section_title" => ["😴 Сон", "😴 Uyqu", "😴 Sleep"],
        "sleep.section_desc" => [
            "Отслеживай сон и получай советы для восстановления.",
            "Uyquni kuzating va tiklanish uchun maslahatlar oling.",
            "Track your sleep and get recovery tips.",
        ],
        "sleep.log_btn" => ["📝 Записать сон", "📝 Uyquni yozish", "📝 Log sleep"],
        "sleep.tip_btn" => ["💡 Совет дня", "💡 Kun maslahati", "💡 Daily tip"],
        "sleep.when_sleep" => [
            "Во сколько ты лёг спать?",
            "Soat nechada uxladingiz?",
            "What time did you go to bed?",
        ],
        "sleep.when_wake" => [
            "Во сколько проснулся?",
            "Soat nechada uyg‘ondingiz?",
            "What time did you wake up?",
        ],
        "sleep.manual" => ["⌨️ Ввести вручную", "⌨️ Qo‘lda kiritish", "⌨️ Enter manually"],
        "sleep.ask_sleep_manual" => [
            "Введи время отбоя (ЧЧ:ММ):",
            "Uxlash vaqtini kiriting (SS:DD):",
            "Enter your bedtime (HH:MM):",
        ],
        "sleep.ask_wake_manual" => [
            "Введи время подъёма (ЧЧ:ММ):",
            "Uyg‘onish vaqtini kiriting (SS:DD):",
            "Enter your wake time (HH:MM):",
        ],
        "sleep.electronics_q" => [
            "Пользовался телефоном за час до сна?",
            "Uxlashdan bir soat oldin telefon ishlatdingizmi?",
            "Did you use your phone within an hour of bed?",
        ],
        "sleep.quality_q" => [
            "Оцени качество сна от 1 до 5:",
            "Uyqu sifatini 1 dan 5 gacha baholang:",
            "Rate your sleep quality from 1 to 5:",
        ],
        "sleep.recorded" => ["Сон записан! 😴", "Uyqu yozib olindi! 😴", "Sleep logged! 😴"],
        "sleep.duration" => [
            "Длительность: {duration} ч",
            "Davomiyligi: {duration} soat",
            "Duration: {duration} h",
        ],
        "sleep.electronics_yes" => [
            "📵 Экран перед сном мешает засыпать — попробуй отложить телефон пораньше.",
            "📵 Uxlashdan oldin ekran uyquga xalaqit beradi — telefonni ertaroq qo‘ying.",
            "📵 Screens before bed hurt your sleep — try putting the phone down earlier.",
        ],
        "sleep.electronics_no" => [
            "🌟 Отлично, что без телефона перед сном!",
            "🌟 Uxlashdan oldin telefonsiz — ajoyib!",
            "🌟 Great job staying off the phone before bed!",
        ],
        "sleep.tip_title" => ["💡 Совет по сну", "💡 Uyqu bo‘yicha maslahat", "💡 Sleep tip"],
        "sleep.another_tip" => ["🔄 Ещё совет", "🔄 Yana maslahat", "🔄 Another tip"],
        "sleep.morning_no" => [
            "Хорошо, в другой раз!",
            "Yaxshi, boshqa safar!",
            "Okay, maybe next time!",
        ],

        // progress
        "progress.title" => ["📈 Твой прогресс за неделю", "📈 Haftalik taraqqiyot", "📈 Your week in review"],
        "progress.sleep" => ["Сон", "Uyqu", "Sleep"],
        "progress.sleep.avg" => ["в среднем", "o‘rtacha", "average"],
        "progress.sleep.optimal" => ["оптимальных ночей", "optimal tunlar", "optimal nights"],
        "progress.sleep.none" => ["Сон ещё не записан", "Uyqu hali yozilmagan", "No sleep logged yet"],
        "progress.workouts" => ["Тренировки", "Mashqlar", "Workouts"],
        "progress.workouts.week" => ["за неделю", "hafta davomida", "this week"],
        "progress.workouts.total" => ["всего", "jami", "total"],
        "progress.meals" => ["Питание", "Ovqatlanish", "Meals"],
        "progress.meals.healthy" => ["полезных", "foydali", "healthy"],
        "progress.meals.unsure" => ["нейтральных", "o‘rtacha", "neutral"],
        "progress.meals.unhealthy" => ["вредных", "zararli", "unhealthy"],
        "progress.meals.score" => ["индекс полезности", "foydalilik indeksi", "healthiness score"],
        "progress.weight.current" => ["Текущий вес", "Hozirgi vazn", "Current weight"],
        "progress.no_data" => [
            "Данных пока нет — начни записывать!",
            "Hozircha ma'lumot yo‘q — yozishni boshlang!",
            "No data yet — start logging!",
        ],

        // profile
        "profile.title" => ["👤 Твой профиль", "👤 Sizning profilingiz", "👤 Your profile"],
        "profile.field.name" => ["Имя", "Ism", "Name"],
        "profile.field.age" => ["Возраст", "Yosh", "Age"],
        "profile.field.height" => ["Рост", "Bo‘y", "Height"],
        "profile.field.weight" => ["Вес", "Vazn", "Weight"],
        "profile.field.budget" => ["Бюджет", "Byudjet", "Budget"],
        "profile.field.language" => ["Язык", "Til", "Language"],
        "profile.not_set" => ["не указано", "kiritilmagan", "not set"],
        "profile.edit" => ["✏️ Обновить данные", "✏️ Ma'lumotni yangilash", "✏️ Update profile"],
        "profile.saved" => ["Профиль сохранён ✅", "Profil saqlandi ✅", "Profile saved ✅"],

        // settings
        "settings.title" => ["⚙️ Настройки", "⚙️ Sozlamalar", "⚙️ Settings"],
        "settings.language" => ["🌐 Язык", "🌐 Til", "🌐 Language"],
        "settings.budget" => ["💰 Бюджет", "💰 Byudjet", "💰 Budget"],
        "settings.workout_time" => ["🏋️ Время тренировок", "🏋️ Mashq vaqti", "🏋️ Workout time"],
        "settings.times" => ["🕒 Время напоминаний", "🕒 Eslatma vaqtlari", "🕒 Reminder times"],
        "settings.saved" => ["Сохранено ✅", "Saqlandi ✅", "Saved ✅"],
        "settings.choose_language" => ["Выбери язык:", "Tilni tanlang:", "Choose a language:"],
        "settings.choose_budget" => ["Выбери бюджет:", "Byudjetni tanlang:", "Choose a budget:"],
        "settings.choose_workout_time" => [
            "Когда напоминать о тренировке?",
            "Mashq haqida qachon eslatay?",
            "When should I remind you to work out?",
        ],
        "settings.choose_time_field" => [
            "Какое время настроим?",
            "Qaysi vaqtni sozlaymiz?",
            "Which time shall we set?",
        ],
        "settings.enter_time" => [
            "Введи время (ЧЧ:ММ):",
            "Vaqtni kiriting (SS:DD):",
            "Enter the time (HH:MM):",
        ],
        "settings.time.sleep" => ["🌙 Отбой", "🌙 Uxlash", "🌙 Bedtime"],
        "settings.time.wake" => ["🌅 Подъём", "🌅 Uyg‘onish", "🌅 Wake up"],
        "settings.time.breakfast" => ["🌅 Завтрак", "🌅 Nonushta", "🌅 Breakfast"],
        "settings.time.lunch" => ["☀️ Обед", "☀️ Tushlik", "☀️ Lunch"],
        "settings.time.dinner" => ["🌙 Ужин", "🌙 Kechki ovqat", "🌙 Dinner"],

        // reminders menu
        "reminders.title" => ["🔔 Напоминания", "🔔 Eslatmalar", "🔔 Reminders"],
        "reminders.enabled" => [
            "Напоминания включены ✅",
            "Eslatmalar yoqilgan ✅",
            "Reminders are on ✅",
        ],
        "reminders.disabled" => [
            "Напоминания выключены 🔕",
            "Eslatmalar o‘chirilgan 🔕",
            "Reminders are off 🔕",
        ],
        "reminders.turn_on" => ["🔔 Включить", "🔔 Yoqish", "🔔 Turn on"],
        "reminders.turn_off" => ["🔕 Выключить", "🔕 O‘chirish", "🔕 Turn off"],

        // help
        "help.title" => ["❓ Помощь", "❓ Yordam", "❓ Help"],
        "help.body" => [
            "Я помогаю следить за тренировками, питанием и сном.\n\nКоманды:\n/menu — главное меню\n/start — начать заново\n\nВопросы: @fitonomics_support",
            "Men mashqlar, ovqatlanish va uyquni kuzatishga yordam beraman.\n\nBuyruqlar:\n/menu — asosiy menyu\n/start — qaytadan boshlash\n\nSavollar: @fitonomics_support",
            "I help you track workouts, meals and sleep.\n\nCommands:\n/menu — main menu\n/start — start over\n\nQuestions: @fitonomics_support",
        ],
        _ => return None,
    };
    Some(e)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_lang_roundtrip() {
        assert_eq!(Lang::from_code("ru"), Lang::Ru);
        assert_eq!(Lang::from_code("uz"), Lang::Uz);
        assert_eq!(Lang::from_code("en"), Lang::En);
    }

    #[test]
    fn test_unknown_lang_falls_back_to_russian() {
        assert_eq!(Lang::from_code("de"), Lang::Ru);
        assert_eq!(Lang::from_code(""), Lang::Ru);
    }

    #[test]
    fn test_translation_per_language() {
        assert_eq!(t(Lang::Ru, "btn.yes"), "✅ Да");
        assert_eq!(t(Lang::Uz, "btn.yes"), "✅ Ha");
        assert_eq!(t(Lang::En, "btn.yes"), "✅ Yes");
    }

    #[test]
    fn test_unknown_key_returned_as_is() {
        assert_eq!(t(Lang::En, "no.such.key"), "no.such.key");
    }

    #[test]
    fn test_menu_labels_unique_within_language() {
        let keys = [
            "menu.workouts",
            "menu.meals",
            "menu.sleep",
            "menu.progress",
            "menu.profile",
            "menu.settings",
            "menu.reminders",
            "menu.help",
        ];
        for lang in [Lang::Ru, Lang::Uz, Lang::En] {
            let labels: Vec<_> = keys.iter().map(|k| t(lang, k)).collect();
            let mut dedup = labels.clone();
            dedup.sort();
            dedup.dedup();
            assert_eq!(labels.len(), dedup.len(), "duplicate labels for {:?}", lang);
        }
    }
}
