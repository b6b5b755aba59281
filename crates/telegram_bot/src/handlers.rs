//! Command handler functions.

use ledger::{Entry, Group, LedgerError, MoneyCents, Registry, settle};
use teloxide::{
    Bot,
    prelude::*,
    utils::command::{BotCommands, ParseError},
};

use crate::{
    ConfigParameters,
    commands::{AdminCommands, LedgerCommands},
};

/// Whether the sender may use the ledger commands.
pub(crate) fn is_allowed(cfg: &ConfigParameters, msg: &Message) -> bool {
    msg.from
        .as_ref()
        .map(|user| match &cfg.allowed_users {
            None => true,
            Some(ids) => ids.contains(&user.id),
        })
        .unwrap_or_default()
}

pub(crate) async fn handle_ledger_command(
    bot: Bot,
    cfg: ConfigParameters,
    msg: Message,
    cmd: LedgerCommands,
) -> ResponseResult<()> {
    let chat_id = msg.chat.id;

    let reply = match cmd {
        LedgerCommands::Help => LedgerCommands::descriptions().to_string(),
        LedgerCommands::Start => {
            let existed = cfg.store.update(|registry| registry.recreate(chat_id.0)).await;
            if existed {
                "Recreated group".to_string()
            } else {
                "Added new group".to_string()
            }
        }
        LedgerCommands::AddAccount { name } => {
            cfg.store
                .update(|registry| {
                    let (group, _) = registry.get_or_create(chat_id.0);
                    match group.add_account(&name) {
                        Ok(()) => format!("Added account {name}"),
                        Err(err) => err.to_string(),
                    }
                })
                .await
        }
        LedgerCommands::Expense {
            amount,
            payer,
            participants,
        } => {
            let entry = match amount.parse::<MoneyCents>() {
                Ok(amount) => {
                    // The payer is implicitly the first participant.
                    let mut names = vec![payer.clone()];
                    names.extend(participants.split_whitespace().map(str::to_string));
                    Entry::shared_expense(amount, &payer, &names)
                }
                Err(err) => {
                    bot.send_message(chat_id, err.to_string()).await?;
                    return Ok(());
                }
            };
            apply_and_report(&cfg, chat_id.0, entry, "Expense was added").await
        }
        LedgerCommands::Transfer {
            amount,
            source,
            destination,
        } => {
            let entry = match amount.parse::<MoneyCents>() {
                Ok(amount) => Entry::direct_transfer(amount, &source, &destination),
                Err(err) => {
                    bot.send_message(chat_id, err.to_string()).await?;
                    return Ok(());
                }
            };
            apply_and_report(&cfg, chat_id.0, entry, "Transfer was done").await
        }
        LedgerCommands::Balances => {
            cfg.store
                .read(|registry| balances_text(registry.get(chat_id.0)))
                .await
        }
        LedgerCommands::Balancing => {
            cfg.store
                .read(|registry| match registry.get(chat_id.0) {
                    Some(group) => plan_text(group),
                    None => NO_GROUP.to_string(),
                })
                .await
        }
        LedgerCommands::SettleUp => {
            cfg.store
                .update(|registry| match registry.get(chat_id.0) {
                    Some(_) => settle_up(registry, chat_id.0),
                    None => NO_GROUP.to_string(),
                })
                .await
        }
        LedgerCommands::Easter => "This is a easter egg!".to_string(),
    };

    bot.send_message(chat_id, reply).await?;
    Ok(())
}

pub(crate) async fn handle_admin_command(
    bot: Bot,
    cfg: ConfigParameters,
    msg: Message,
    cmd: AdminCommands,
) -> ResponseResult<()> {
    // Export/import operate on the whole registry; only the configured
    // private chat may trigger them.
    if msg.chat.id != cfg.private_chat {
        return Ok(());
    }

    let reply = match cmd {
        AdminCommands::Export => match cfg.store.save().await {
            Ok(()) => "Export done".to_string(),
            Err(err) => {
                tracing::error!("export failed: {err}");
                format!("Export failed: {err}")
            }
        },
        AdminCommands::Import => match cfg.store.reload().await {
            Ok(()) => "Import done".to_string(),
            Err(err) => {
                tracing::error!("import failed: {err}");
                format!("Import failed: {err}")
            }
        },
    };

    bot.send_message(msg.chat.id, reply).await?;
    Ok(())
}

/// Answers commands that failed to parse or are unknown.
///
/// The dispatcher branches above consume every well-formed command, so
/// whatever command-shaped text lands here gets the parse error (for example
/// `/expense 30` missing its payer) or the catch-all apology.
pub(crate) async fn handle_unparsed_command(bot: Bot, msg: Message) -> ResponseResult<()> {
    let Some(text) = msg.text() else {
        return Ok(());
    };
    bot.send_message(msg.chat.id, unparsed_reply(text)).await?;
    Ok(())
}

const NO_GROUP: &str = "No ledger for this chat yet. Send /start first.";
const UNKNOWN_COMMAND: &str = "Sorry, I did not understand that command. Send /help for the list.";

fn unparsed_reply(text: &str) -> String {
    let err = match LedgerCommands::parse(text, "") {
        Ok(_) => return UNKNOWN_COMMAND.to_string(),
        Err(err) => err,
    };

    match err {
        ParseError::Custom(err) | ParseError::IncorrectFormat(err) => err.to_string(),
        ParseError::TooFewArguments {
            expected, found, ..
        } => format!("This command requires {expected} argument(s), got {found}"),
        ParseError::TooManyArguments {
            expected, found, ..
        } => format!("This command takes {expected} argument(s), got {found}"),
        ParseError::UnknownCommand(_) | ParseError::WrongBotName(_) => {
            UNKNOWN_COMMAND.to_string()
        }
    }
}

/// Applies `entry` to the chat's group and reports the updated balances, or
/// the ledger error when the entry is rejected.
async fn apply_and_report(
    cfg: &ConfigParameters,
    chat_id: i64,
    entry: Entry,
    done: &str,
) -> String {
    cfg.store
        .update(|registry| {
            let (group, _) = registry.get_or_create(chat_id);
            match group.apply(entry) {
                Ok(()) => format!("{done}\n{group}"),
                Err(err) => err.to_string(),
            }
        })
        .await
}

fn balances_text(group: Option<&Group>) -> String {
    match group {
        Some(group) if !group.is_empty() => group.to_string(),
        Some(_) => "No accounts yet. Add one with /addaccount".to_string(),
        None => NO_GROUP.to_string(),
    }
}

/// Renders the settlement plan without applying it.
fn plan_text(group: &Group) -> String {
    match settle(&group.balances()) {
        Ok(plan) if plan.is_empty() => "Everyone is settled up".to_string(),
        Ok(plan) => plan
            .iter()
            .map(|transfer| transfer.to_string())
            .collect::<Vec<_>>()
            .join("\n"),
        Err(err) => imbalance_text(&err),
    }
}

/// Computes the settlement plan and applies every transfer to the ledger, so
/// the history records how the group was zeroed.
fn settle_up(registry: &mut Registry, chat_id: i64) -> String {
    let (group, _) = registry.get_or_create(chat_id);

    let plan = match settle(&group.balances()) {
        Ok(plan) => plan,
        Err(err) => return imbalance_text(&err),
    };
    if plan.is_empty() {
        return "Everyone is settled up".to_string();
    }

    let mut lines = vec!["All account balances were set back to zero".to_string()];
    for transfer in plan {
        if let Err(err) = group.apply(Entry::direct_transfer(
            transfer.amount,
            &transfer.source,
            &transfer.destination,
        )) {
            // Cannot happen for a plan computed from the same snapshot.
            tracing::error!("settle-up transfer rejected: {err}");
            return err.to_string();
        }
        lines.push(transfer.to_string());
    }
    lines.join("\n")
}

fn imbalance_text(err: &LedgerError) -> String {
    // A non-zero sum means an apply-time invariant broke; be loud about it.
    tracing::error!("settlement refused: {err}");
    err.to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn group_with_debt() -> Group {
        let mut group = Group::new(1);
        for name in ["anna", "ben", "carl"] {
            group.add_account(name).unwrap();
        }
        let names: Vec<String> = ["anna", "ben", "carl"].map(String::from).to_vec();
        group
            .apply(Entry::shared_expense(MoneyCents::new(3000), "anna", &names))
            .unwrap();
        group
    }

    #[test]
    fn plan_text_lists_transfers() {
        let text = plan_text(&group_with_debt());
        assert_eq!(text, "ben -> anna: 10.00€\ncarl -> anna: 10.00€");
    }

    #[test]
    fn plan_text_for_settled_group() {
        let group = Group::new(1);
        assert_eq!(plan_text(&group), "Everyone is settled up");
    }

    #[test]
    fn settle_up_zeroes_and_records_history() {
        let mut registry = Registry::new();
        let (group, _) = registry.get_or_create(1);
        *group = group_with_debt();

        let text = settle_up(&mut registry, 1);
        assert!(text.starts_with("All account balances were set back to zero"));

        let group = registry.get(1).unwrap();
        for account in group.accounts() {
            assert!(account.balance.is_zero());
        }
        // Original expense plus two settlement transfers.
        assert_eq!(group.history().len(), 3);
    }

    #[test]
    fn balances_text_reports_missing_group() {
        assert_eq!(balances_text(None), NO_GROUP);
    }

    #[test]
    fn unparsed_expense_surfaces_the_parse_error() {
        assert_eq!(
            unparsed_reply("/expense 30"),
            "This command requires at least two arguments"
        );
    }

    #[test]
    fn unparsed_missing_argument_is_counted() {
        assert_eq!(
            unparsed_reply("/addaccount"),
            "This command requires 1 argument(s), got 0"
        );
        assert_eq!(
            unparsed_reply("/transfer 10 anna"),
            "This command requires 3 argument(s), got 2"
        );
    }

    #[test]
    fn unknown_command_gets_the_apology() {
        assert_eq!(unparsed_reply("/frobnicate"), UNKNOWN_COMMAND);
    }
}
