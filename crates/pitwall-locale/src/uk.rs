//! Ukrainian message table. Missing keys fall back to English.

pub(crate) fn lookup(key: &str) -> Option<&'static str> {
    Some(match key {
        "welcome" => {
            "Вітаємо у Pitwall! 🏎️\n\n\
             Доступні команди:\n\
             /schedule - Переглянути розклад перегонів\n\
             /driverstandings - Поточні позиції пілотів\n\
             /constructorstandings - Поточні позиції конструкторів\n\
             /settimezone - Встановити часовий пояс\n\
             /remind - Встановити нагадування\n\
             /reminders - Керувати нагадуваннями\n\
             /live - Інформація про наступні перегони\n\
             /pitstops - Переглянути результати останніх перегонів\n\
             /driver - Інформація про пілота (наприклад: /driver Hamilton)\n\
             /results - Результати останніх перегонів\n\
             /apistatus - Перевірити або змінити джерело даних\n\
             /language - Налаштування мови"
        }

        // Schedule command
        "schedule_title" => "🏁 Сезон F1 {year} - Розклад",
        "upcoming_races" => "🔜 Майбутні перегони:",
        "no_upcoming_races" => "⚠️ Немає запланованих перегонів до кінця сезону.",
        "schedule_not_released" => "⚠️ Розклад F1 на {year} рік ще не опубліковано.",
        "past_races" => "📅 Нещодавні перегони:",
        "no_past_races" => "⚠️ В цьому сезоні ще не було перегонів.",
        "no_races" => "❌ Розклад перегонів для сезону F1 {year} недоступний. Спробуйте пізніше.",
        "race_round" => "🏁 Етап {round}: {raceName}",
        "race_location" => "📍 {locality}, {country}",
        "race_circuit" => "🏎️ {circuitName}",
        "race_time" => "⏰ {date} {timezone}",
        "race_date" => "📅 {date}",
        "fp1" => "🔹 Перше тренування: {time}",
        "fp2" => "🔹 Друге тренування: {time}",
        "fp3" => "🔹 Третє тренування: {time}",
        "sprint" => "🔹 Спринт: {time}",
        "qualifying" => "🔹 Кваліфікація: {time}",

        // Driver standings
        "driver_standings_title" => "🏆 Поточні позиції пілотів:",
        "driver_standings_entry" => {
            "{position}. {firstName} {lastName}\n   Очки: {points} | Перемоги: {wins}\n   Команда: {team}"
        }

        // Constructor standings
        "constructor_standings_title" => "🏭 Поточні позиції конструкторів:",
        "constructor_standings_entry" => "{position}. {name}\n   Очки: {points} | Перемоги: {wins}",

        // Set timezone
        "timezone_invalid" => {
            "Будь ласка, вкажіть правильний часовий пояс. Приклад:\n/settimezone Europe/Kyiv\n\n\
             Знайдіть свій часовий пояс тут: https://en.wikipedia.org/wiki/List_of_tz_database_time_zones"
        }
        "timezone_updated" => "Часовий пояс успішно встановлено на {timezone}",

        // Results
        "results_title" => "🏁 {raceName}\n📅 {date}\n⏰ {time} {timezone}",
        "results_entry" => "{position}. {firstName} {lastName}\n   Час: {time}\n   Очки: {points}",
        "no_results" => "Результати перегонів не знайдено. Спробуйте пізніше.",

        // Live
        "next_race_title" => "🏎️ Сезон F1 {year}\n📅 Наступні перегони: {raceName}",
        "next_race_location" => "📍 {locality}, {country}",
        "next_race_circuit" => "🏁 {circuitName}",
        "next_race_date" => "⏰ Перегони: {date} {timezone}",
        "countdown" => "Зворотній відлік: {days} днів, {hours} годин, {minutes} хвилин",
        "standings_top" => "📊 Поточні позиції (Топ-3):",
        "standings_top_entry" => "{position}. {firstName} {lastName} - {points} очок",
        "no_upcoming_race" => "Не знайдено майбутніх перегонів для сезону {year}.",

        // Pit stops / last race classification
        "pitstops_title" => "🔧 Сезон F1 {year} - Результати {raceName}:",
        "result_entry" => "{position}. {name} ({team}) - {time}",
        "no_pitstops" => "Дані про результати цих перегонів відсутні.",

        // Driver info
        "driver_info_title" => "👤 Сезон F1 {year}\n🏎️ {firstName} {lastName}",
        "driver_info_team" => "🏢 {team}",
        "driver_info_number" => "🔢 {number}",
        "driver_info_nationality" => "🌍 {nationality}",
        "driver_info_position" => "📊 Позиція: {position}",
        "driver_info_points" => "💯 Очки: {points}",
        "driver_info_wins" => "🏆 Перемоги: {wins}",
        "driver_info_more" => "ℹ️ Детальніше: {url}",
        "driver_info_not_found" => "Пілота не знайдено у сезоні F1 {year}.",
        "driver_info_usage" => {
            "Будь ласка, вкажіть ім'я пілота або номер. Приклад:\n/driver Hamilton\nабо\n/driver 44"
        }

        // API status
        "api_status" => "📊 Стан джерел даних F1:\n\n🏎️ Сезон F1: {year}\n🔄 {status}",
        "api_switched" => "✅ Перемкнено на {source}",
        "api_usage" => {
            "Команди:\n\
             • /apistatus - Показати поточний стан\n\
             • /apistatus alt - Перемкнутися на альтернативне джерело\n\
             • /apistatus primary - Перемкнутися на основне джерело\n\
             • /apistatus stats - Статистика використання"
        }
        "api_stats" => {
            "📊 Статистика використання API ({year}):\n\n\
             Всього запитів: {total}\n\
             Успішних: {success} ({successRate})\n\
             Невдалих: {failed}\n\n\
             Основне джерело: {primary} запитів\n\
             Резервне джерело: {fallback} запитів"
        }

        // Language
        "language_current" => "Поточна мова: {language}",
        "language_set" => "Мову встановлено на українську",
        "language_options" => "Доступні мови:\n- Англійська (/language en)\n- Українська (/language uk)",
        "language_invalid" => {
            "Неправильний код мови. Доступні варіанти:\n- Англійська (/language en)\n- Українська (/language uk)"
        }

        // Reminders
        "reminder_pick_race" => "⏰ Виберіть перегони, про які нагадати:",
        "reminder_options" => "Коли ви хочете отримати нагадування перед {race_name}?",
        "reminder_1h" => "За 1 годину",
        "reminder_3h" => "За 3 години",
        "reminder_1d" => "За 1 день",
        "reminder_time_1h" => "одну годину",
        "reminder_time_3h" => "три години",
        "reminder_time_1d" => "один день",
        "reminder_set" => {
            "Нагадування для {race_name} встановлено. Ви отримаєте сповіщення за {time_before} до початку перегонів."
        }
        "reminder_delete" => "Нагадування видалено.",
        "reminder_none" => "У вас немає активних нагадувань.",
        "reminder_list_title" => "Ваші активні нагадування:",
        "reminder_list_entry" => "{race_name} - за {reminder_time} до перегонів",
        "reminder_delete_instruction" => "Натисніть на нагадування, щоб видалити його.",
        "reminder_notification" => {
            "🏁 НАГАДУВАННЯ: {race_name} починається через {time_left}! 🏁\n\n\
             Місце: {location}\nЧас початку: {race_time}"
        }
        "reminder_invalid" => "Вибір застарів. Використайте /remind, щоб почати знову.",

        // General errors
        "error_general" => "На жаль, сталася помилка. Спробуйте пізніше.",
        "error_schedule" => "На жаль, не вдалося отримати розклад. Спробуйте пізніше.",
        "error_driver_standings" => {
            "На жаль, виникла помилка при отриманні позицій пілотів. Спробуйте пізніше."
        }
        "error_constructor_standings" => {
            "На жаль, виникла помилка при отриманні позицій конструкторів. Спробуйте пізніше."
        }
        "error_timezone" => "На жаль, сталася помилка при оновленні часового поясу. Спробуйте пізніше.",
        "error_results" => "На жаль, виникла помилка при отриманні результатів перегонів. Спробуйте пізніше.",
        "error_live" => "На жаль, не вдалося отримати інформацію про наступну гонку. Спробуйте пізніше.",
        "error_pitstops" => "На жаль, не вдалося отримати дані про перегони. Спробуйте пізніше.",
        "error_driver_info" => "На жаль, не вдалося знайти інформацію про цього пілота. Спробуйте пізніше.",
        "error_reminder" => "На жаль, сталася помилка при обробці нагадування. Спробуйте пізніше.",

        _ => return None,
    })
}
