//! Telegram bot.
//!
//! The bot is thin glue: it maps chat commands onto the ledger core and
//! formats the replies. Every group chat gets its own ledger group, keyed by
//! the chat id; the whole registry is persisted to a JSON snapshot after
//! each mutation.

use std::path::PathBuf;

use teloxide::{prelude::*, types::ChatId};

use crate::commands::{AdminCommands, LedgerCommands};

mod commands;
mod handlers;
mod state;

const DEFAULT_STATE_PATH: &str = "config/ledger.json";

#[derive(Clone)]
pub struct ConfigParameters {
    allowed_users: Option<Vec<UserId>>,
    private_chat: ChatId,
    store: state::LedgerStore,
}

pub struct Bot {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    private_chat: i64,
    state_path: PathBuf,
}

impl Bot {
    pub fn builder() -> BotBuilder {
        BotBuilder::default()
    }

    /// Run the telegram bot until interrupted.
    pub async fn run(&self) {
        tracing::info!("Starting telegram bot...");

        let bot = teloxide::Bot::new(&self.token);
        let store = state::LedgerStore::load_or_empty(self.state_path.clone());

        let parameters = ConfigParameters {
            allowed_users: self.allowed_users.clone(),
            private_chat: ChatId(self.private_chat),
            store,
        };

        let handler = Update::filter_message()
            .branch(
                dptree::filter(|cfg: ConfigParameters, msg: Message| {
                    handlers::is_allowed(&cfg, &msg)
                })
                .filter_command::<LedgerCommands>()
                .endpoint(handlers::handle_ledger_command),
            )
            .branch(
                dptree::entry()
                    .filter_command::<AdminCommands>()
                    .endpoint(handlers::handle_admin_command),
            )
            // Commands that did not parse above still deserve an answer, as
            // the classic bot gave one. Plain chat messages stay untouched.
            .branch(
                dptree::filter(|cfg: ConfigParameters, msg: Message| {
                    handlers::is_allowed(&cfg, &msg)
                        && msg.text().is_some_and(|text| text.starts_with('/'))
                })
                .endpoint(handlers::handle_unparsed_command),
            );

        Dispatcher::builder(bot, handler)
            .dependencies(dptree::deps![parameters])
            .default_handler(|upd| async move {
                tracing::warn!("Unhandled update {:?}", upd);
            })
            .error_handler(LoggingErrorHandler::with_custom_text(
                "An error has occurred in the dispatcher",
            ))
            .enable_ctrlc_handler()
            .build()
            .dispatch()
            .await;
    }
}

#[derive(Default, Debug)]
pub struct BotBuilder {
    token: String,
    allowed_users: Option<Vec<UserId>>,
    private_chat: i64,
    state_path: Option<PathBuf>,
}

impl BotBuilder {
    pub fn token(mut self, token: &str) -> BotBuilder {
        self.token = token.to_string();
        self
    }

    pub fn allowed_users(mut self, allowed_users: Vec<UserId>) -> BotBuilder {
        if !allowed_users.is_empty() {
            self.allowed_users = Some(allowed_users);
        }
        self
    }

    /// Chat id allowed to run the export/import commands.
    pub fn private_chat(mut self, chat_id: i64) -> BotBuilder {
        self.private_chat = chat_id;
        self
    }

    pub fn state_path(mut self, path: impl Into<PathBuf>) -> BotBuilder {
        self.state_path = Some(path.into());
        self
    }

    pub fn build(self) -> Bot {
        tracing::info!("Initializing telegram bot...");
        Bot {
            token: self.token,
            allowed_users: self.allowed_users,
            private_chat: self.private_chat,
            state_path: self
                .state_path
                .unwrap_or_else(|| PathBuf::from(DEFAULT_STATE_PATH)),
        }
    }
}
