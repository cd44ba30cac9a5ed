use {
    secrecy::ExposeSecret,
    std::{future::Future, time::Duration},
    teloxide::{Bot, RequestError, payloads::SendMessageSetters, requests::Requester, types as tg},
    tracing::{debug, info, warn},
};

use {
    tgpanel_common::{ChatId, MessageId, ThreadId},
    tgpanel_config::TelegramConfig,
    tgpanel_sessions::{PanelMessage, SessionRecord, SessionStore},
};

use crate::{
    error::{Error, Result},
    event::PanelEvent,
};

/// Sends panel replies into the right chat and forum topic.
pub struct PanelOutbound {
    bot: Bot,
    config: TelegramConfig,
}

impl PanelOutbound {
    pub fn new(bot: Bot, config: TelegramConfig) -> Self {
        Self { bot, config }
    }

    /// Build a bot from the configured token.
    pub fn from_config(config: TelegramConfig) -> Result<Self> {
        if !config.has_token() {
            return Err(Error::message("telegram token is not configured"));
        }
        let bot = Bot::new(config.token.expose_secret());
        Ok(Self::new(bot, config))
    }

    /// Topic a reply to `event` should go to.
    pub fn reply_thread(
        &self,
        event: &PanelEvent,
        session: Option<&SessionRecord>,
    ) -> Option<ThreadId> {
        event.reply_thread(&self.config, session)
    }

    /// Send a text reply for `event`, returning the new message id.
    pub async fn send_reply(
        &self,
        event: &PanelEvent,
        session: Option<&SessionRecord>,
        text: &str,
    ) -> Result<MessageId> {
        let thread = self.reply_thread(event, session);
        self.send_text(event.chat_id, thread, text).await
    }

    /// Render a panel for the event's sender and remember it in `store`.
    ///
    /// The stored panel records the chat and topic the message actually
    /// went to, so later replies from the same chat land next to it.
    pub async fn send_panel(
        &self,
        store: &dyn SessionStore,
        event: &PanelEvent,
        panel_id: &str,
        text: &str,
    ) -> Result<SessionRecord> {
        let user_id = event
            .user_id
            .ok_or_else(|| Error::message("cannot render a panel for an event without a sender"))?;

        let session = store.get(user_id).await?;
        let thread = self.reply_thread(event, session.as_ref());
        let message_id = self.send_text(event.chat_id, thread, text).await?;

        let record = store
            .record_panel(user_id, PanelMessage {
                chat_id: event.chat_id,
                message_id,
                panel_id: panel_id.to_string(),
                message_thread_id: thread,
            })
            .await?;

        info!(
            %user_id,
            chat_id = %event.chat_id,
            %message_id,
            thread_id = ?thread,
            panel_id,
            "panel rendered"
        );
        Ok(record)
    }

    async fn send_text(
        &self,
        chat_id: ChatId,
        thread: Option<ThreadId>,
        text: &str,
    ) -> Result<MessageId> {
        debug!(%chat_id, thread_id = ?thread, text_len = text.len(), "telegram send start");
        let message = self
            .run_with_retry(chat_id, "send message", || {
                let mut req = self.bot.send_message(tg::ChatId(chat_id.0), text);
                if let Some(thread) = thread {
                    req = req.message_thread_id(tg::ThreadId(tg::MessageId(thread.0)));
                }
                async move { req.await }
            })
            .await?;
        Ok(MessageId(message.id.0))
    }

    async fn run_with_retry<T, F, Fut>(
        &self,
        chat_id: ChatId,
        operation: &'static str,
        mut request: F,
    ) -> std::result::Result<T, RequestError>
    where
        F: FnMut() -> Fut,
        Fut: Future<Output = std::result::Result<T, RequestError>>,
    {
        let max_retries = self.config.retry_after_max_retries;
        let mut retries = 0usize;

        loop {
            match request().await {
                Ok(value) => return Ok(value),
                Err(err) => {
                    let Some(wait) = retry_after_duration(&err) else {
                        return Err(err);
                    };

                    if retries >= max_retries {
                        warn!(
                            %chat_id,
                            operation,
                            retries,
                            max_retries,
                            retry_after_secs = wait.as_secs(),
                            "telegram rate limit persisted after retries"
                        );
                        return Err(err);
                    }

                    retries += 1;
                    warn!(
                        %chat_id,
                        operation,
                        retries,
                        max_retries,
                        retry_after_secs = wait.as_secs(),
                        "telegram rate limited, waiting before retry"
                    );
                    tokio::time::sleep(wait).await;
                },
            }
        }
    }
}

fn retry_after_duration(error: &RequestError) -> Option<Duration> {
    match error {
        RequestError::RetryAfter(wait) => Some(wait.duration()),
        _ => None,
    }
}
