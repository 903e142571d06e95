//! Subcommand dispatch.

use chrono::{Local, NaiveDate};
use ledger::{
    DocumentStore, Ledger, LedgerError, Pacer, Recorded, SplitCmd, SplitLineCmd, TransactionCmd,
    TransferCmd,
};
use serde_json::{Value, json};

use crate::{
    config::{Command, SplitArgs, TransactionArgs, TransferArgs},
    error::{AppError, Result},
};

/// Parse a split line given as `VALUE:CATEGORY:PAYEE[:MEMO]`.
pub fn parse_split_line(input: &str) -> std::result::Result<SplitLineCmd, String> {
    let mut parts = input.splitn(4, ':');
    let (Some(value), Some(category), Some(payee)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(format!(
            "invalid split line '{input}': expected VALUE:CATEGORY:PAYEE[:MEMO]"
        ));
    };
    let value = value
        .trim()
        .parse::<i64>()
        .map_err(|err| format!("invalid split value '{value}': {err}"))?;
    let (category, payee) = (category.trim(), payee.trim());
    if category.is_empty() || payee.is_empty() {
        return Err(format!(
            "invalid split line '{input}': category and payee must not be empty"
        ));
    }

    let line = SplitLineCmd::new(value, category, payee);
    Ok(match parts.next().map(str::trim).filter(|memo| !memo.is_empty()) {
        Some(memo) => line.memo(memo),
        None => line,
    })
}

pub async fn run<S: DocumentStore, P: Pacer>(
    ledger: &mut Ledger<S, P>,
    budget: &str,
    command: Command,
) -> Result<Value> {
    match command {
        Command::Budgets => Ok(serde_json::to_value(ledger.budgets().await?)?),
        Command::Accounts => {
            connect(ledger, budget).await?;
            Ok(serde_json::to_value(ledger.accounts().await?)?)
        }
        Command::Transaction(args) => {
            connect(ledger, budget).await?;
            transaction(ledger, args).await
        }
        Command::Split(args) => {
            connect(ledger, budget).await?;
            split(ledger, args).await
        }
        Command::Transfer(args) => {
            connect(ledger, budget).await?;
            transfer(ledger, args).await
        }
    }
}

async fn connect<S: DocumentStore, P: Pacer>(
    ledger: &mut Ledger<S, P>,
    budget: &str,
) -> Result<()> {
    if budget.is_empty() {
        return Err(AppError::Usage(
            "budget is required (set `budget` or pass --budget)".to_string(),
        ));
    }
    ledger.connect_budget(budget).await?;
    Ok(())
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

async fn transaction<S: DocumentStore, P: Pacer>(
    ledger: &mut Ledger<S, P>,
    args: TransactionArgs,
) -> Result<Value> {
    let mut cmd = TransactionCmd::new(
        args.account,
        args.payee,
        args.value,
        args.date.unwrap_or_else(today),
    );
    cmd.category = args.category;
    cmd.memo = args.memo;
    cmd.id = args.id;

    let recorded = ledger.record_transaction(cmd).await?;
    Ok(serde_json::to_value(recorded)?)
}

async fn split<S: DocumentStore, P: Pacer>(
    ledger: &mut Ledger<S, P>,
    args: SplitArgs,
) -> Result<Value> {
    let mut cmd = SplitCmd::new(
        args.account,
        args.payee,
        args.value,
        args.date.unwrap_or_else(today),
    )
    .lines(args.lines);
    cmd.memo = args.memo;
    cmd.id = args.id;

    let recorded = ledger.record_split(cmd).await?;
    Ok(serde_json::to_value(recorded)?)
}

async fn transfer<S: DocumentStore, P: Pacer>(
    ledger: &mut Ledger<S, P>,
    args: TransferArgs,
) -> Result<Value> {
    let mut cmd = TransferCmd::new(
        args.from,
        args.to,
        args.value,
        args.date.unwrap_or_else(today),
    );
    cmd.memo = args.memo;
    cmd.from_category = args.from_category;
    cmd.ids = args.from_id.zip(args.to_id);

    let outcome = ledger.record_transfer(cmd).await?;
    Ok(json!({
        "from": leg_outcome(outcome.from)?,
        "to": leg_outcome(outcome.to)?,
    }))
}

fn leg_outcome(leg: std::result::Result<Recorded, LedgerError>) -> Result<Value> {
    match leg {
        Ok(recorded) => Ok(serde_json::to_value(recorded)?),
        Err(err) => Ok(json!({"status": "failed", "error": err.to_string()})),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_line_with_memo_containing_colons() {
        let line = parse_split_line("250:Rent/Mortgage:Landlord:note: march").unwrap();
        assert_eq!(
            line,
            SplitLineCmd::new(250, "Rent/Mortgage", "Landlord").memo("note: march")
        );
    }

    #[test]
    fn parses_line_without_memo() {
        let line = parse_split_line("-30:incomeNextMonth:Employer").unwrap();
        assert_eq!(line, SplitLineCmd::new(-30, "incomeNextMonth", "Employer"));
        assert!(line.memo.is_none());
    }

    #[test]
    fn rejects_malformed_lines() {
        assert!(parse_split_line("250:Rent").is_err());
        assert!(parse_split_line("abc:Rent:Landlord").is_err());
        assert!(parse_split_line("10: :Landlord").is_err());
    }

    #[test]
    fn failed_leg_is_reported_inline() {
        let value = leg_outcome(Err(LedgerError::NoActiveBudget)).unwrap();
        assert_eq!(value["status"], "failed");
        assert!(value["error"].as_str().unwrap().contains("No active budget"));

        let value = leg_outcome(Ok(Recorded::AlreadyRecorded {
            id: "b_1_transaction_2".to_string(),
        }))
        .unwrap();
        assert_eq!(
            value,
            json!({"status": "already_recorded", "id": "b_1_transaction_2"})
        );
    }
}
