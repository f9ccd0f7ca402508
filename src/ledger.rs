//! The link ledger: one spreadsheet row per live Drive file, column A holding
//! the shareable view link.
//!
//! Appends go at the end of the range; removal blanks the first row whose
//! value matches exactly, without deleting or shifting rows. Mutations are
//! not synchronized across requests; the sheet is treated as best-effort
//! bookkeeping, same as the deployment this replaces.

use crate::google::sheets::{SheetsClient, SheetsError};
use tracing::{debug, warn};

pub struct LinkLedger {
    sheets: SheetsClient,
    /// Full column range, e.g. `Sheet1!A:A`.
    range: String,
    sheet_name: String,
    column: String,
}

impl LinkLedger {
    pub fn new(sheets: SheetsClient, range: String) -> Self {
        let (sheet_name, column_part) = match range.split_once('!') {
            Some((sheet, columns)) => (sheet.to_string(), columns),
            None => ("Sheet1".to_string(), range.as_str()),
        };
        let column = column_part
            .split(':')
            .next()
            .unwrap_or("A")
            .to_string();
        Self {
            sheets,
            range: range.clone(),
            sheet_name,
            column,
        }
    }

    pub async fn append_link(&self, link: &str) -> Result<(), SheetsError> {
        self.sheets.append_row(&self.range, link).await
    }

    /// Blank the first row whose value equals `link`. A link with no matching
    /// row is a silent no-op; the file may predate the ledger or the row may
    /// already have been cleared.
    pub async fn remove_link(&self, link: &str) -> Result<(), SheetsError> {
        let rows = self.sheets.read_range(&self.range).await?;
        let row_index = rows
            .iter()
            .position(|row| row.first().map(String::as_str) == Some(link));

        match row_index {
            Some(index) => {
                // Sheets rows are 1-based.
                let cell = format!("{}!{}{}", self.sheet_name, self.column, index + 1);
                debug!(%cell, "blanking ledger row");
                self.sheets.update_cell(&cell, "").await
            }
            None => {
                warn!(%link, "no ledger row matched link; nothing to remove");
                Ok(())
            }
        }
    }
}
