//! Callback-query handler for the inline-keyboard reminder flows.
//!
//! Callback data format:
//!
//! | Data                | Meaning                                  |
//! |---------------------|------------------------------------------|
//! | `rem:evt:{event_id}`| Race picked — offer lead-time offsets    |
//! | `rem:off:{minutes}` | Offset picked — upsert the reminder      |
//! | `rem:del:{id}`      | Delete one of the user's reminders       |

use std::sync::Arc;

use pitwall_core::types::{Lang, RemindBefore};
use pitwall_locale::render;
use teloxide::prelude::*;
use teloxide::types::{InlineKeyboardButton, InlineKeyboardMarkup, MessageId};
use tracing::{info, warn};

use crate::context::AppContext;

pub async fn handle_callback(
    bot: Bot,
    q: CallbackQuery,
    ctx: Arc<AppContext>,
) -> ResponseResult<()> {
    // Always ack first so the client stops showing the loading spinner.
    bot.answer_callback_query(q.id.clone()).await?;

    let Some(data) = q.data.as_deref() else {
        return Ok(());
    };
    let Some(message) = q.message.as_ref() else {
        return Ok(());
    };
    let chat_id = message.chat().id;
    let message_id = message.id();
    let user_id = q.from.id.0 as i64;
    let (lang, _) = ctx.prefs(chat_id.0);

    if let Some(event_id) = data.strip_prefix("rem:evt:") {
        race_picked(&bot, &ctx, lang, chat_id, message_id, event_id).await?;
    } else if let Some(minutes) = data.strip_prefix("rem:off:") {
        offset_picked(&bot, &ctx, lang, user_id, chat_id, message_id, minutes).await?;
    } else if let Some(id) = data.strip_prefix("rem:del:") {
        delete_picked(&bot, &ctx, lang, user_id, chat_id, message_id, id).await?;
    }
    Ok(())
}

/// Step two of `/remind`: remember the race, swap the keyboard for offsets.
async fn race_picked(
    bot: &Bot,
    ctx: &AppContext,
    lang: Lang,
    chat_id: ChatId,
    message_id: MessageId,
    event_id: &str,
) -> ResponseResult<()> {
    let upcoming = ctx.upcoming_races().await;
    let Some(race) = upcoming.iter().find(|race| race.event_id == event_id) else {
        // Race started (or vanished from the feed) since the list was shown.
        bot.edit_message_text(chat_id, message_id, render(lang, "reminder_invalid", &[]))
            .await?;
        return Ok(());
    };

    ctx.selection
        .insert(chat_id.0, race.event_id.clone(), race.name.clone());

    let buttons: Vec<Vec<InlineKeyboardButton>> = RemindBefore::ALL
        .iter()
        .map(|offset| {
            vec![InlineKeyboardButton::callback(
                render(lang, offset.button_key(), &[]),
                format!("rem:off:{}", offset.minutes()),
            )]
        })
        .collect();

    bot.edit_message_text(
        chat_id,
        message_id,
        render(lang, "reminder_options", &[("race_name", &race.name)]),
    )
    .reply_markup(InlineKeyboardMarkup::new(buttons))
    .await?;
    Ok(())
}

/// Final step of `/remind`: upsert the reminder for the remembered race.
async fn offset_picked(
    bot: &Bot,
    ctx: &AppContext,
    lang: Lang,
    user_id: i64,
    chat_id: ChatId,
    message_id: MessageId,
    minutes: &str,
) -> ResponseResult<()> {
    let offset = minutes
        .parse::<i64>()
        .ok()
        .and_then(|m| RemindBefore::try_from(m).ok());
    let selection = ctx.selection.take(chat_id.0);

    let text = match (offset, selection) {
        (Some(offset), Some(selection)) => {
            // The user may never have sent /start; make sure the row exists.
            if let Err(e) = ctx.users.ensure(user_id, chat_id.0) {
                warn!(user_id, "user registration failed: {e}");
            }
            match ctx
                .reminders
                .upsert(user_id, chat_id.0, &selection.event_id, offset)
            {
                Ok(reminder_id) => {
                    info!(
                        reminder_id,
                        user_id,
                        event_id = %selection.event_id,
                        minutes = offset.minutes(),
                        "reminder registered"
                    );
                    render(
                        lang,
                        "reminder_set",
                        &[
                            ("race_name", selection.race_name.as_str()),
                            ("time_before", &render(lang, offset.label_key(), &[])),
                        ],
                    )
                }
                Err(e) => {
                    warn!(user_id, "reminder upsert failed: {e}");
                    render(lang, "error_reminder", &[])
                }
            }
        }
        // Selection expired, or the offset was not one of ours.
        _ => render(lang, "reminder_invalid", &[]),
    };

    bot.edit_message_text(chat_id, message_id, text).await?;
    Ok(())
}

/// `/reminders` delete button. Scoped to the tapping user so nobody deletes
/// someone else's reminder by replaying ids.
async fn delete_picked(
    bot: &Bot,
    ctx: &AppContext,
    lang: Lang,
    user_id: i64,
    chat_id: ChatId,
    message_id: MessageId,
    id: &str,
) -> ResponseResult<()> {
    let text = match id.parse::<i64>() {
        Ok(id) => match ctx.reminders.delete_by_id_and_user(id, user_id) {
            Ok(true) => {
                info!(reminder_id = id, user_id, "reminder deleted by user");
                render(lang, "reminder_delete", &[])
            }
            Ok(false) => render(lang, "reminder_invalid", &[]),
            Err(e) => {
                warn!(reminder_id = id, "reminder delete failed: {e}");
                render(lang, "error_reminder", &[])
            }
        },
        Err(_) => render(lang, "reminder_invalid", &[]),
    };

    bot.edit_message_text(chat_id, message_id, text).await?;
    Ok(())
}
