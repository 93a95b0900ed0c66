use crate::error::ViewError;
use crate::models::{HistoryData, Record, RecordKind, UserData};
use crate::money;

/// Raw values of one registration form.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FormInput {
    pub amount: String,
    pub description: String,
}

/// Everything the controller is allowed to do to the page.
pub trait View {
    /// Replaces the main container with the server-rendered fragment.
    fn render_home(&self, html: &str) -> Result<(), ViewError>;

    fn render_user_data(&self, user: &UserData) -> Result<(), ViewError>;

    /// Inserts `record` as the first row of the history table.
    fn append_record(&self, record: &Record) -> Result<(), ViewError>;

    /// Each record goes on top of the previous one, so the last record of
    /// `history` ends up as the first row.
    fn render_history(&self, history: &HistoryData) -> Result<(), ViewError> {
        for record in &history.history {
            self.append_record(record)?;
        }
        Ok(())
    }

    fn render_balance(&self, balance: f64) -> Result<(), ViewError>;

    fn read_form(&self, kind: RecordKind) -> Result<FormInput, ViewError>;

    fn set_amount(&self, kind: RecordKind, value: &str) -> Result<(), ViewError>;

    /// Puts the form back to `R$ 0,00` and an empty description.
    fn reset_form(&self, kind: RecordKind) -> Result<(), ViewError>;

    fn set_field_invalid(&self, kind: RecordKind, invalid: bool) -> Result<(), ViewError>;

    fn set_busy(&self, kind: RecordKind, busy: bool) -> Result<(), ViewError>;

    /// `kind` is `None` for page-level failures.
    fn show_error(&self, kind: Option<RecordKind>, message: &str) -> Result<(), ViewError>;
}

/// Inner HTML of a history row. `data-*` attributes are set by the caller.
pub fn record_row_html(record: &Record) -> String {
    format!(
        r#"
    <td>{amount}</td>
    <td>{description}</td>
    <td>{date}</td>
    <td>
      <div class="button-container">
        <button class="button is-small is-info">Editar</button>
        <button class="button is-small is-danger">Apagar</button>
      </div>
    </td>
  "#,
        amount = money::format_record_amount(record.amount),
        description = escape_html(&record.description),
        date = money::format_record_date(&record.created_at),
    )
}

pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(description: &str) -> Record {
        Record {
            id: 1,
            user_id: "1".to_string(),
            amount: 10.5,
            description: description.to_string(),
            created_at: "2024-10-14T12:00:00".to_string(),
        }
    }

    #[test]
    fn row_shows_amount_description_and_date() {
        let html = record_row_html(&record("Salary"));
        assert!(html.contains("<td>R$ 10,50</td>"));
        assert!(html.contains("<td>Salary</td>"));
        assert!(html.contains("<td>14/10/2024</td>"));
        assert!(html.contains("Editar"));
        assert!(html.contains("Apagar"));
    }

    #[test]
    fn row_escapes_description_markup() {
        let html = record_row_html(&record("<img src=x onerror=\"alert(1)\">"));
        assert!(!html.contains("<img"));
        assert!(html.contains("&lt;img src=x onerror=&quot;alert(1)&quot;&gt;"));
    }

    #[test]
    fn escape_leaves_plain_text_alone() {
        assert_eq!(escape_html("Mercado & padaria"), "Mercado &amp; padaria");
        assert_eq!(escape_html("Aluguel"), "Aluguel");
    }
}
