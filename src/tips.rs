//! Sleep tips - советы по гигиене сна

use rand::seq::SliceRandom;

use crate::i18n::Lang;

pub struct SleepTip {
    pub ru: &'static str,
    pub uz: &'static str,
    pub en: &'static str,
}

impl SleepTip {
    pub fn text(&self, lang: Lang) -> &'static str {
        match lang {
            Lang::Ru => self.ru,
            Lang::Uz => self.uz,
            Lang::En => self.en,
        }
    }
}

pub const SLEEP_TIPS: &[SleepTip] = &[
    SleepTip {
        ru: "Ложись и вставай в одно и то же время — телу проще высыпаться по расписанию.",
        uz: "Har kuni bir xil vaqtda yotib, bir xil vaqtda turing — tanaga jadval bilan uxlash osonroq.",
        en: "Go to bed and wake up at the same time — your body sleeps better on a schedule.",
    },
    SleepTip {
        ru: "Убери телефон за час до сна: синий свет экрана сбивает выработку мелатонина.",
        uz: "Uxlashdan bir soat oldin telefonni qo‘ying: ekranning ko‘k nuri melatoninni buzadi.",
        en: "Put the phone away an hour before bed: blue light disrupts melatonin.",
    },
    SleepTip {
        ru: "Проветри комнату перед сном — прохладный воздух помогает заснуть быстрее.",
        uz: "Uxlashdan oldin xonani shamollatib oling — salqin havo tezroq uxlashga yordam beradi.",
        en: "Air out the room before bed — cool air helps you fall asleep faster.",
    },
    SleepTip {
        ru: "Не пей кофе после обеда: кофеин держится в крови до 6 часов.",
        uz: "Tushlikdan keyin kofe ichmang: kofein qonda 6 soatgacha saqlanadi.",
        en: "Skip coffee after lunch: caffeine stays in your blood for up to 6 hours.",
    },
    SleepTip {
        ru: "Лёгкий ужин за 2-3 часа до сна — тяжёлая еда мешает глубокому сну.",
        uz: "Uxlashdan 2-3 soat oldin yengil kechki ovqat — og‘ir taom chuqur uyquga xalaqit beradi.",
        en: "Have a light dinner 2-3 hours before bed — heavy food hurts deep sleep.",
    },
    SleepTip {
        ru: "Тренируйся днём, а не поздно вечером: поздняя нагрузка перевозбуждает нервную систему.",
        uz: "Kunduzi mashq qiling, kech emas: kechki yuklama asab tizimini qo‘zg‘atadi.",
        en: "Train during the day, not late at night: late workouts overstimulate your nervous system.",
    },
    SleepTip {
        ru: "Полная темнота и тишина — лучшие условия для восстановления.",
        uz: "To‘liq qorong‘ulik va sukunat — tiklanish uchun eng yaxshi sharoit.",
        en: "Full darkness and silence are the best conditions for recovery.",
    },
    SleepTip {
        ru: "Если не можешь заснуть 20 минут — встань и почитай при тусклом свете, потом вернись.",
        uz: "20 daqiqada uxlay olmasangiz — turib, xira chiroqda kitob o‘qing, keyin qayting.",
        en: "Can't fall asleep in 20 minutes? Get up, read in dim light, then come back.",
    },
];

/// Pick a random tip in the requested language.
pub fn random_tip(lang: Lang) -> &'static str {
    let mut rng = rand::thread_rng();
    SLEEP_TIPS
        .choose(&mut rng)
        .map(|tip| tip.text(lang))
        .unwrap_or("")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tips_not_empty() {
        assert!(!SLEEP_TIPS.is_empty());
        for tip in SLEEP_TIPS {
            assert!(!tip.ru.is_empty());
            assert!(!tip.uz.is_empty());
            assert!(!tip.en.is_empty());
        }
    }

    #[test]
    fn test_random_tip_comes_from_pool() {
        let tip = random_tip(Lang::En);
        assert!(SLEEP_TIPS.iter().any(|t| t.en == tip));
    }
}
