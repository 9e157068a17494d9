//! Bot commands and their handlers, registered in the teloxide Dispatcher.

use std::sync::Arc;

use chrono::Utc;
use chrono_tz::Tz;
use pitwall_core::types::Lang;
use pitwall_data::RaceFeed;
use pitwall_locale::render;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup};
use teloxide::utils::command::BotCommands;
use tracing::{info, warn};

use crate::context::AppContext;
use crate::format;
use crate::send;

#[derive(BotCommands, Clone)]
#[command(rename_rule = "lowercase")]
pub enum Command {
    #[command(description = "Start the bot")]
    Start,
    #[command(description = "View upcoming races")]
    Schedule,
    #[command(description = "Current driver standings")]
    DriverStandings,
    #[command(description = "Current constructor standings")]
    ConstructorStandings,
    #[command(description = "Get next race information")]
    Live,
    #[command(description = "View last race results")]
    PitStops,
    #[command(description = "Get driver info (use: /driver Hamilton)")]
    Driver(String),
    #[command(description = "Get last race results")]
    Results,
    #[command(description = "Set your timezone")]
    SetTimezone(String),
    #[command(description = "Set race reminders")]
    Remind,
    #[command(description = "Manage your reminders")]
    Reminders,
    #[command(description = "View or change data source")]
    ApiStatus(String),
    #[command(description = "Language settings")]
    Language(String),
}

/// A handler's reply: plain text (chunked if long) or text with an inline
/// keyboard (reminder flows).
enum Reply {
    Text(String),
    Keyboard(String, InlineKeyboardMarkup),
}

pub async fn handle_command(
    bot: Bot,
    msg: Message,
    cmd: Command,
    ctx: Arc<AppContext>,
) -> ResponseResult<()> {
    let Some(from) = msg.from.as_ref() else {
        return Ok(());
    };
    if from.is_bot {
        return Ok(());
    }
    let user_id = from.id.0 as i64;
    let chat_id = msg.chat.id;
    let (lang, tz) = ctx.prefs(chat_id.0);

    info!(user_id, chat_id = chat_id.0, command = %command_name(&cmd), "command received");

    let reply = match cmd {
        Command::Start => start(&ctx, user_id, chat_id.0, lang),
        Command::Schedule => schedule(&ctx, lang, tz).await,
        Command::DriverStandings => driver_standings(&ctx, lang).await,
        Command::ConstructorStandings => constructor_standings(&ctx, lang).await,
        Command::Live => live(&ctx, lang, tz).await,
        Command::PitStops => pit_stops(&ctx, lang).await,
        Command::Driver(query) => driver_info(&ctx, lang, &query).await,
        Command::Results => results(&ctx, lang, tz).await,
        Command::SetTimezone(timezone) => set_timezone(&ctx, user_id, chat_id.0, lang, &timezone),
        Command::Remind => remind(&ctx, lang).await,
        Command::Reminders => reminders(&ctx, user_id, lang).await,
        Command::ApiStatus(subcommand) => api_status(&ctx, lang, &subcommand),
        Command::Language(code) => language(&ctx, user_id, chat_id.0, lang, &code),
    };

    match reply {
        Reply::Text(text) => send::send_response(&bot, chat_id, &text).await,
        Reply::Keyboard(text, markup) => {
            bot.send_message(chat_id, text).reply_markup(markup).await?;
        }
    }
    Ok(())
}

fn command_name(cmd: &Command) -> &'static str {
    match cmd {
        Command::Start => "start",
        Command::Schedule => "schedule",
        Command::DriverStandings => "driverstandings",
        Command::ConstructorStandings => "constructorstandings",
        Command::Live => "live",
        Command::PitStops => "pitstops",
        Command::Driver(_) => "driver",
        Command::Results => "results",
        Command::SetTimezone(_) => "settimezone",
        Command::Remind => "remind",
        Command::Reminders => "reminders",
        Command::ApiStatus(_) => "apistatus",
        Command::Language(_) => "language",
    }
}

fn start(ctx: &AppContext, user_id: i64, chat_id: i64, lang: Lang) -> Reply {
    if let Err(e) = ctx.users.ensure(user_id, chat_id) {
        warn!(user_id, chat_id, "user registration failed: {e}");
        return Reply::Text(render(lang, "error_general", &[]));
    }
    Reply::Text(render(lang, "welcome", &[]))
}

async fn schedule(ctx: &AppContext, lang: Lang, tz: Tz) -> Reply {
    match ctx.feed.season_schedule(ctx.season).await {
        Ok(races) => Reply::Text(format::schedule_message(
            lang,
            tz,
            ctx.season,
            &races,
            Utc::now(),
        )),
        Err(e) => {
            warn!("schedule fetch failed: {e}");
            Reply::Text(render(lang, "error_schedule", &[]))
        }
    }
}

async fn driver_standings(ctx: &AppContext, lang: Lang) -> Reply {
    let rows = match ctx.feed.driver_standings(ctx.season).await {
        Ok(standings) => format::driver_rows_from_feed(&standings),
        Err(e) => {
            warn!("driver standings fetch failed, trying cache: {e}");
            match ctx.cache.driver_standings(ctx.season as i64) {
                Ok(cached) if !cached.is_empty() => format::driver_rows_from_cache(&cached),
                _ => return Reply::Text(render(lang, "error_driver_standings", &[])),
            }
        }
    };
    Reply::Text(format::driver_standings_message(lang, &rows))
}

async fn constructor_standings(ctx: &AppContext, lang: Lang) -> Reply {
    let rows = match ctx.feed.constructor_standings(ctx.season).await {
        Ok(standings) => format::constructor_rows_from_feed(&standings),
        Err(e) => {
            warn!("constructor standings fetch failed, trying cache: {e}");
            match ctx.cache.constructor_standings(ctx.season as i64) {
                Ok(cached) if !cached.is_empty() => format::constructor_rows_from_cache(&cached),
                _ => return Reply::Text(render(lang, "error_constructor_standings", &[])),
            }
        }
    };
    Reply::Text(format::constructor_standings_message(lang, &rows))
}

async fn live(ctx: &AppContext, lang: Lang, tz: Tz) -> Reply {
    let races = match ctx.feed.season_schedule(ctx.season).await {
        Ok(races) => races,
        Err(e) => {
            warn!("live fetch failed: {e}");
            return Reply::Text(render(lang, "error_live", &[]));
        }
    };
    let now = Utc::now();
    let Some(race) = pitwall_data::next_race(&races, now) else {
        return Reply::Text(render(
            lang,
            "no_upcoming_race",
            &[("year", &ctx.season.to_string())],
        ));
    };
    // Standings are a nice-to-have on this card; ignore a feed hiccup.
    let top_drivers = ctx.feed.driver_standings(ctx.season).await.unwrap_or_default();
    Reply::Text(format::live_message(
        lang,
        tz,
        ctx.season,
        race,
        &top_drivers,
        now,
    ))
}

async fn pit_stops(ctx: &AppContext, lang: Lang) -> Reply {
    match ctx.feed.last_race_results().await {
        Ok(Some(race)) => Reply::Text(format::pitstops_message(lang, ctx.season, &race)),
        Ok(None) => Reply::Text(render(lang, "no_pitstops", &[])),
        Err(e) => {
            warn!("last race fetch failed: {e}");
            Reply::Text(render(lang, "error_pitstops", &[]))
        }
    }
}

async fn driver_info(ctx: &AppContext, lang: Lang, query: &str) -> Reply {
    if query.trim().is_empty() {
        return Reply::Text(render(lang, "driver_info_usage", &[]));
    }
    let standings = match ctx.feed.driver_standings(ctx.season).await {
        Ok(standings) => standings,
        Err(e) => {
            warn!("driver standings fetch failed: {e}");
            return Reply::Text(render(lang, "error_driver_info", &[]));
        }
    };
    match format::find_driver(&standings, query) {
        Some(standing) => Reply::Text(format::driver_info_message(lang, ctx.season, standing)),
        None => Reply::Text(render(
            lang,
            "driver_info_not_found",
            &[("year", &ctx.season.to_string())],
        )),
    }
}

async fn results(ctx: &AppContext, lang: Lang, tz: Tz) -> Reply {
    match ctx.feed.last_race_results().await {
        Ok(Some(race)) => Reply::Text(format::results_message(lang, tz, &race)),
        Ok(None) => Reply::Text(render(lang, "no_results", &[])),
        Err(e) => {
            warn!("last race fetch failed: {e}");
            Reply::Text(render(lang, "error_results", &[]))
        }
    }
}

fn set_timezone(
    ctx: &AppContext,
    user_id: i64,
    chat_id: i64,
    lang: Lang,
    timezone: &str,
) -> Reply {
    let timezone = timezone.trim();
    if timezone.parse::<Tz>().is_err() {
        return Reply::Text(render(lang, "timezone_invalid", &[]));
    }
    match ctx.users.set_timezone(user_id, chat_id, timezone) {
        Ok(()) => {
            info!(chat_id, timezone, "timezone updated");
            Reply::Text(render(lang, "timezone_updated", &[("timezone", timezone)]))
        }
        Err(e) => {
            warn!(chat_id, "timezone update failed: {e}");
            Reply::Text(render(lang, "error_timezone", &[]))
        }
    }
}

/// `/remind` step one: pick an upcoming race.
async fn remind(ctx: &AppContext, lang: Lang) -> Reply {
    let upcoming = ctx.upcoming_races().await;
    if upcoming.is_empty() {
        return Reply::Text(render(lang, "no_upcoming_races", &[]));
    }
    let rows: Vec<Vec<InlineKeyboardButton>> = upcoming
        .iter()
        .take(8)
        .map(|race| {
            vec![InlineKeyboardButton::callback(
                race.name.clone(),
                format!("rem:evt:{}", race.event_id),
            )]
        })
        .collect();
    Reply::Keyboard(
        render(lang, "reminder_pick_race", &[]),
        InlineKeyboardMarkup::new(rows),
    )
}

/// `/reminders`: list the user's reminders with tap-to-delete buttons.
async fn reminders(ctx: &AppContext, user_id: i64, lang: Lang) -> Reply {
    let reminders = match ctx.reminders.for_user(user_id) {
        Ok(reminders) => reminders,
        Err(e) => {
            warn!(user_id, "reminder list failed: {e}");
            return Reply::Text(render(lang, "error_reminder", &[]));
        }
    };
    if reminders.is_empty() {
        return Reply::Text(render(lang, "reminder_none", &[]));
    }

    // Resolve event ids to race names; a dormant event keeps its raw id.
    let known = ctx.upcoming_races().await;
    let name_of = |event_id: &str| {
        known
            .iter()
            .find(|race| race.event_id == event_id)
            .map(|race| race.name.clone())
            .unwrap_or_else(|| event_id.to_string())
    };

    let mut text = render(lang, "reminder_list_title", &[]);
    text.push('\n');
    text.push_str(&render(lang, "reminder_delete_instruction", &[]));

    let rows: Vec<Vec<InlineKeyboardButton>> = reminders
        .iter()
        .map(|reminder| {
            let label = render(
                lang,
                "reminder_list_entry",
                &[
                    ("race_name", &name_of(&reminder.event_id)),
                    (
                        "reminder_time",
                        &render(lang, reminder.remind_before.label_key(), &[]),
                    ),
                ],
            );
            vec![InlineKeyboardButton::callback(
                label,
                format!("rem:del:{}", reminder.id),
            )]
        })
        .collect();

    Reply::Keyboard(text, InlineKeyboardMarkup::new(rows))
}

fn api_status(ctx: &AppContext, lang: Lang, subcommand: &str) -> Reply {
    match subcommand.trim().to_lowercase().as_str() {
        "alt" | "alternative" => {
            ctx.feed.prefer_secondary(true);
            info!("feed pinned to alternative endpoint");
            Reply::Text(render(lang, "api_switched", &[("source", &ctx.feed.active_label())]))
        }
        "primary" | "main" => {
            ctx.feed.prefer_secondary(false);
            info!("feed pinned to primary endpoint");
            Reply::Text(render(lang, "api_switched", &[("source", &ctx.feed.active_label())]))
        }
        "stats" => Reply::Text(format::api_stats_message(
            lang,
            ctx.season,
            ctx.metrics.snapshot(),
        )),
        _ => {
            let mut text = render(
                lang,
                "api_status",
                &[
                    ("year", &ctx.season.to_string()),
                    ("status", &ctx.feed.status_line()),
                ],
            );
            text.push_str("\n\n");
            text.push_str(&render(lang, "api_usage", &[]));
            Reply::Text(text)
        }
    }
}

fn language(ctx: &AppContext, user_id: i64, chat_id: i64, lang: Lang, code: &str) -> Reply {
    let code = code.trim();
    if code.is_empty() {
        let mut text = render(lang, "language_current", &[("language", lang.name())]);
        text.push_str("\n\n");
        text.push_str(&render(lang, "language_options", &[]));
        return Reply::Text(text);
    }
    let Ok(new_lang) = code.to_lowercase().parse::<Lang>() else {
        return Reply::Text(render(lang, "language_invalid", &[]));
    };
    match ctx.users.set_language(user_id, chat_id, new_lang.as_str()) {
        Ok(()) => {
            info!(chat_id, language = %new_lang, "language updated");
            // Confirm in the language just selected.
            Reply::Text(render(new_lang, "language_set", &[]))
        }
        Err(e) => {
            warn!(chat_id, "language update failed: {e}");
            Reply::Text(render(lang, "error_general", &[]))
        }
    }
}
