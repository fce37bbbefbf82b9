//! Income-statement records returned by the backend.
//!
//! Rows are deserialized from camelCase JSON and never modified afterwards.

use serde::{Deserialize, Deserializer};

/// Number of columns the table renders for each row.
pub const COLUMN_COUNT: usize = 6;

/// One income-statement record.
///
/// Numeric fields are optional: the backend may omit a figure or send `null`,
/// which renders as an empty cell.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IncomeStatement {
    /// Reporting date (a year such as `"2020"` or a full date)
    #[serde(default, deserialize_with = "deserialize_date")]
    pub date: String,
    /// Total revenue
    #[serde(default)]
    pub revenue: Option<f64>,
    /// Net income
    #[serde(default)]
    pub net_income: Option<f64>,
    /// Gross profit
    #[serde(default)]
    pub gross_profit: Option<f64>,
    /// Earnings per share
    #[serde(default)]
    pub eps: Option<f64>,
    /// Operating income
    #[serde(default)]
    pub operating_income: Option<f64>,
}

impl IncomeStatement {
    /// Format the row as the six table cells, in column order.
    ///
    /// # Returns
    /// * `[String; COLUMN_COUNT]` - Date, revenue, net income, gross profit, EPS, operating income
    pub fn cells(&self) -> [String; COLUMN_COUNT] {
        [
            self.date.clone(),
            format_amount(self.revenue),
            format_amount(self.net_income),
            format_amount(self.gross_profit),
            format_amount(self.eps),
            format_amount(self.operating_income),
        ]
    }
}

/// Format a figure in its shortest decimal form (`394328000000`, `1.2`).
///
/// Missing figures render as an empty string.
pub fn format_amount(value: Option<f64>) -> String {
    value.map(|v| v.to_string()).unwrap_or_default()
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawDate {
    Text(String),
    Number(serde_json::Number),
}

/// Accept the date as a string or a bare JSON number (`2020`).
fn deserialize_date<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<RawDate>::deserialize(deserializer)? {
        Some(RawDate::Text(text)) => text,
        Some(RawDate::Number(number)) => number.to_string(),
        None => String::new(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_deserialize_camel_case_row() {
        let json = r#"{
            "date": "2020",
            "revenue": 100,
            "netIncome": 10,
            "grossProfit": 50,
            "eps": 1.2,
            "operatingIncome": 20
        }"#;
        let row: IncomeStatement = serde_json::from_str(json).unwrap();
        assert_eq!(row.date, "2020");
        assert_eq!(row.revenue, Some(100.0));
        assert_eq!(row.net_income, Some(10.0));
        assert_eq!(row.gross_profit, Some(50.0));
        assert_eq!(row.eps, Some(1.2));
        assert_eq!(row.operating_income, Some(20.0));
    }

    #[test]
    fn test_deserialize_numeric_date_and_missing_fields() {
        let json = r#"{"date": 2019, "revenue": null, "eps": -0.5}"#;
        let row: IncomeStatement = serde_json::from_str(json).unwrap();
        assert_eq!(row.date, "2019");
        assert_eq!(row.revenue, None);
        assert_eq!(row.net_income, None);
        assert_eq!(row.eps, Some(-0.5));
    }

    #[test]
    fn test_cells_format_shortest_form() {
        let row = IncomeStatement {
            date: "2023-09-30".to_string(),
            revenue: Some(383_285_000_000.0),
            net_income: Some(96_995_000_000.0),
            gross_profit: None,
            eps: Some(6.16),
            operating_income: Some(114_301_000_000.0),
        };
        assert_eq!(
            row.cells(),
            [
                "2023-09-30".to_string(),
                "383285000000".to_string(),
                "96995000000".to_string(),
                String::new(),
                "6.16".to_string(),
                "114301000000".to_string(),
            ]
        );
    }
}
