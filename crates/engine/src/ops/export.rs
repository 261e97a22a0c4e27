use chrono::{DateTime, Utc};
use sea_orm::TransactionTrait;
use serde::Serialize;
use uuid::Uuid;

use crate::{EngineError, Expense, ResultEngine};

use super::{Engine, with_tx};

#[derive(Serialize)]
struct ExportRow<'a> {
    id: String,
    payer: &'a str,
    amount: String,
    category: &'a str,
    description: &'a str,
    split_type: &'a str,
    created_at: String,
}

impl<'a> From<&'a Expense> for ExportRow<'a> {
    fn from(expense: &'a Expense) -> Self {
        Self {
            id: expense.id.to_string(),
            payer: &expense.payer,
            amount: expense.amount.to_string(),
            category: &expense.category,
            description: expense.description.as_deref().unwrap_or_default(),
            split_type: expense.split_type.as_str(),
            created_at: expense.created_at.to_rfc3339(),
        }
    }
}

fn write_csv(expenses: &[Expense]) -> ResultEngine<Vec<u8>> {
    let mut writer = csv::Writer::from_writer(Vec::new());
    for expense in expenses {
        writer.serialize(ExportRow::from(expense))?;
    }
    if expenses.is_empty() {
        writer.write_record([
            "id",
            "payer",
            "amount",
            "category",
            "description",
            "split_type",
            "created_at",
        ])?;
    }
    writer
        .into_inner()
        .map_err(|err| EngineError::Csv(err.into_error().into()))
}

impl Engine {
    /// Render every expense of a group as CSV, oldest first.
    pub async fn export_expenses_csv(
        &self,
        group_id: Uuid,
        now: DateTime<Utc>,
    ) -> ResultEngine<Vec<u8>> {
        let expenses = with_tx!(self, |db_tx| {
            let (expenses, _) = self.group_history(&db_tx, group_id, now).await?;
            Ok::<_, EngineError>(expenses)
        })?;
        write_csv(&expenses)
    }
}

#[cfg(test)]
mod tests {
    use chrono::TimeZone;

    use super::*;
    use crate::{MoneyCents, Split, SplitType};

    #[test]
    fn header_is_written_for_empty_export() {
        let bytes = write_csv(&[]).unwrap();
        assert_eq!(
            String::from_utf8(bytes).unwrap(),
            "id,payer,amount,category,description,split_type,created_at\n"
        );
    }

    #[test]
    fn amounts_are_exported_as_decimals() {
        let created_at = Utc.with_ymd_and_hms(2026, 3, 4, 10, 0, 0).unwrap();
        let expense = Expense::new(
            Uuid::new_v4(),
            "alice".to_string(),
            MoneyCents::new(1250),
            "food".to_string(),
            SplitType::Equal,
            vec![
                Split::new("alice", MoneyCents::new(625)),
                Split::new("bob", MoneyCents::new(625)),
            ],
            created_at,
        )
        .unwrap()
        .description(Some("pizza, large".to_string()));

        let text = String::from_utf8(write_csv(&[expense.clone()]).unwrap()).unwrap();
        let mut lines = text.lines();
        assert_eq!(
            lines.next(),
            Some("id,payer,amount,category,description,split_type,created_at")
        );
        assert_eq!(
            lines.next(),
            Some(
                format!(
                    "{},alice,12.50,food,\"pizza, large\",equal,2026-03-04T10:00:00+00:00",
                    expense.id
                )
                .as_str()
            )
        );
    }
}
