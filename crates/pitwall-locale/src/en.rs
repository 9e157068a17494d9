//! English message table (the fallback language).

pub(crate) fn lookup(key: &str) -> Option<&'static str> {
    Some(match key {
        "welcome" => {
            "Welcome to Pitwall! 🏎️\n\n\
             Available commands:\n\
             /schedule - View upcoming races\n\
             /driverstandings - Current driver standings\n\
             /constructorstandings - Current constructor standings\n\
             /settimezone - Set your timezone\n\
             /remind - Set race reminders\n\
             /reminders - Manage your reminders\n\
             /live - Get next race information\n\
             /pitstops - View last race results\n\
             /driver - Get driver info (use: /driver Hamilton)\n\
             /results - Get last race results\n\
             /apistatus - Check or change data source\n\
             /language - Change language"
        }

        // Schedule command
        "schedule_title" => "📅 F1 {year} Season Schedule",
        "upcoming_races" => "🔜 Upcoming Races:",
        "no_upcoming_races" => "⚠️ No upcoming races scheduled for the rest of the season.",
        "schedule_not_released" => "⚠️ The {year} F1 schedule has not been released yet.",
        "past_races" => "📅 Recent Past Races:",
        "no_past_races" => "⚠️ No races have taken place this season yet.",
        "no_races" => "❌ No race schedule available for the {year} F1 season. Please try again later.",
        "race_round" => "🏁 Round {round}: {raceName}",
        "race_location" => "📍 {locality}, {country}",
        "race_circuit" => "🏎️ {circuitName}",
        "race_time" => "⏰ {date} {timezone}",
        "race_date" => "📅 {date}",
        "fp1" => "🔹 FP1: {time}",
        "fp2" => "🔹 FP2: {time}",
        "fp3" => "🔹 FP3: {time}",
        "sprint" => "🔹 Sprint: {time}",
        "qualifying" => "🔹 Quali: {time}",

        // Driver standings
        "driver_standings_title" => "🏆 Current Driver Standings:",
        "driver_standings_entry" => {
            "{position}. {firstName} {lastName}\n   Points: {points} | Wins: {wins}\n   Team: {team}"
        }

        // Constructor standings
        "constructor_standings_title" => "🏭 Current Constructor Standings:",
        "constructor_standings_entry" => "{position}. {name}\n   Points: {points} | Wins: {wins}",

        // Set timezone
        "timezone_invalid" => {
            "Please provide a valid timezone. Example:\n/settimezone Europe/London\n\n\
             Find your timezone here: https://en.wikipedia.org/wiki/List_of_tz_database_time_zones"
        }
        "timezone_updated" => "Timezone successfully set to {timezone}",

        // Results
        "results_title" => "🏁 {raceName}\n📅 {date}\n⏰ {time} {timezone}",
        "results_entry" => "{position}. {firstName} {lastName}\n   Time: {time}\n   Points: {points}",
        "no_results" => "No race results found. Please try again later.",

        // Live
        "next_race_title" => "🏎️ {year} F1 Season\n📅 Next Race: {raceName}",
        "next_race_location" => "📍 {locality}, {country}",
        "next_race_circuit" => "🏁 {circuitName}",
        "next_race_date" => "⏰ Race: {date} {timezone}",
        "countdown" => "Countdown: {days} days, {hours} hours, {minutes} minutes",
        "standings_top" => "📊 Current Standings (Top 3):",
        "standings_top_entry" => "{position}. {firstName} {lastName} - {points} points",
        "no_upcoming_race" => "No upcoming races found for the {year} season.",

        // Pit stops / last race classification
        "pitstops_title" => "🔧 {year} F1 Season - {raceName} Results:",
        "result_entry" => "{position}. {name} ({team}) - {time}",
        "no_pitstops" => "No results data available for this race.",

        // Driver info
        "driver_info_title" => "👤 {year} F1 Season\n🏎️ {firstName} {lastName}",
        "driver_info_team" => "🏢 {team}",
        "driver_info_number" => "🔢 {number}",
        "driver_info_nationality" => "🌍 {nationality}",
        "driver_info_position" => "📊 Position: {position}",
        "driver_info_points" => "💯 Points: {points}",
        "driver_info_wins" => "🏆 Wins: {wins}",
        "driver_info_more" => "ℹ️ More info: {url}",
        "driver_info_not_found" => "Driver not found in {year} F1 season.",
        "driver_info_usage" => {
            "Please provide a driver name or number. Examples:\n/driver Hamilton\n/driver 44"
        }

        // API status
        "api_status" => "📊 F1 Data APIs Status:\n\n🏎️ F1 Season: {year}\n🔄 {status}",
        "api_switched" => "✅ Switched to {source}",
        "api_usage" => {
            "Commands:\n\
             • /apistatus - Show current API status\n\
             • /apistatus alt - Switch to alternative API\n\
             • /apistatus primary - Switch to primary API\n\
             • /apistatus stats - View API usage statistics"
        }
        "api_stats" => {
            "📊 F1 Data API Usage Stats ({year}):\n\n\
             Total API calls: {total}\n\
             Successful calls: {success} ({successRate})\n\
             Failed calls: {failed}\n\n\
             Primary API: {primary} calls\n\
             Fallback API: {fallback} calls"
        }

        // Language
        "language_current" => "Current language: {language}",
        "language_set" => "Language has been set to English",
        "language_options" => "Available languages:\n- English (/language en)\n- Ukrainian (/language uk)",
        "language_invalid" => {
            "Invalid language code. Available options:\n- English (/language en)\n- Ukrainian (/language uk)"
        }

        // Reminders
        "reminder_pick_race" => "⏰ Select a race to set a reminder for:",
        "reminder_options" => "When do you want to be reminded before {race_name}?",
        "reminder_1h" => "1 hour before",
        "reminder_3h" => "3 hours before",
        "reminder_1d" => "1 day before",
        "reminder_time_1h" => "one hour",
        "reminder_time_3h" => "three hours",
        "reminder_time_1d" => "one day",
        "reminder_set" => {
            "Reminder set for {race_name}. You will be notified {time_before} before the race starts."
        }
        "reminder_delete" => "Reminder deleted.",
        "reminder_none" => "You have no active reminders.",
        "reminder_list_title" => "Your active reminders:",
        "reminder_list_entry" => "{race_name} - {reminder_time} before the race",
        "reminder_delete_instruction" => "Tap a reminder to delete it.",
        "reminder_notification" => {
            "🏁 REMINDER: {race_name} starts in {time_left}! 🏁\n\n\
             Location: {location}\nStart time: {race_time}"
        }
        "reminder_invalid" => "That selection has expired. Use /remind to start again.",

        // General errors
        "error_general" => "Sorry, an error occurred. Please try again later.",
        "error_schedule" => "Sorry, there was an error fetching the schedule. Please try again later.",
        "error_driver_standings" => {
            "Sorry, there was an error fetching the driver standings. Please try again later."
        }
        "error_constructor_standings" => {
            "Sorry, there was an error fetching the constructor standings. Please try again later."
        }
        "error_timezone" => "Sorry, there was an error setting your timezone. Please try again later.",
        "error_results" => "Sorry, there was an error fetching the race results. Please try again later.",
        "error_live" => "Sorry, there was an error fetching live data. Please try again later.",
        "error_pitstops" => "Sorry, there was an error fetching race data. Please try again later.",
        "error_driver_info" => "Sorry, there was an error fetching driver data. Please try again later.",
        "error_reminder" => "Sorry, there was an error handling the reminder. Please try again later.",

        _ => return None,
    })
}
