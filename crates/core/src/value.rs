use chrono::NaiveDate;
use thiserror::Error;

/// Currency symbol used for every monetary column.
pub const CURRENCY_SYMBOL: &str = "₹";

/// A single database cell, as delivered by the backend before any
/// presentation formatting is applied.
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
    Null,
}

/// The type a query parameter must parse into before it may be bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Int,
    Float,
    Text,
    Date,
}

/// A validated, typed query parameter.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Int(i64),
    Float(f64),
    Text(String),
    Date(NaiveDate),
}

impl ParamValue {
    #[must_use]
    pub fn kind(&self) -> ParamKind {
        match self {
            Self::Int(_) => ParamKind::Int,
            Self::Float(_) => ParamKind::Float,
            Self::Text(_) => ParamKind::Text,
            Self::Date(_) => ParamKind::Date,
        }
    }
}

/// Raised at the input layer, before any statement is attempted.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("a value is required")]
    Empty,
    #[error("`{raw}` is not a valid whole number")]
    InvalidInt { raw: String },
    #[error("`{raw}` is not a valid amount")]
    InvalidFloat { raw: String },
    #[error("`{raw}` is not a valid date (expected YYYY-MM-DD)")]
    InvalidDate { raw: String },
}

/// Parses user-supplied text into the parameter type a report declares.
/// Rejection here means the database is never contacted.
pub fn parse_param(kind: ParamKind, raw: &str) -> Result<ParamValue, ValidationError> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Err(ValidationError::Empty);
    }

    match kind {
        ParamKind::Int => trimmed
            .parse::<i64>()
            .map(ParamValue::Int)
            .map_err(|_| ValidationError::InvalidInt {
                raw: trimmed.to_string(),
            }),
        ParamKind::Float => trimmed
            .parse::<f64>()
            .map(ParamValue::Float)
            .map_err(|_| ValidationError::InvalidFloat {
                raw: trimmed.to_string(),
            }),
        ParamKind::Text => Ok(ParamValue::Text(trimmed.to_string())),
        ParamKind::Date => NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
            .map(ParamValue::Date)
            .map_err(|_| ValidationError::InvalidDate {
                raw: trimmed.to_string(),
            }),
    }
}

/// Presentation rule for one output column.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ColumnFormat {
    Plain,
    /// Currency symbol prefix, exactly two decimals.
    Currency,
    /// Two decimals, trailing percent sign.
    Percent,
}

/// Renders one cell for the results grid. `Currency` and `Percent` apply
/// to any numeric value, negative included; a textual cell that parses as
/// a number (DECIMAL columns arrive as text from the wire) is formatted
/// the same way, anything else passes through untouched.
#[must_use]
pub fn render_value(value: &SqlValue, format: ColumnFormat) -> String {
    match value {
        SqlValue::Null => "NULL".to_string(),
        SqlValue::Int(v) => render_numeric(*v as f64, || v.to_string(), format),
        SqlValue::Float(v) => render_numeric(*v, || v.to_string(), format),
        SqlValue::Date(v) => v.format("%Y-%m-%d").to_string(),
        SqlValue::Text(v) => match (format, v.parse::<f64>()) {
            (ColumnFormat::Plain, _) | (_, Err(_)) => v.clone(),
            (_, Ok(parsed)) => render_numeric(parsed, || v.clone(), format),
        },
    }
}

fn render_numeric(value: f64, plain: impl FnOnce() -> String, format: ColumnFormat) -> String {
    match format {
        ColumnFormat::Plain => plain(),
        ColumnFormat::Currency => format!("{CURRENCY_SYMBOL}{value:.2}"),
        ColumnFormat::Percent => format!("{value:.2}%"),
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;

    use super::{
        parse_param, render_value, ColumnFormat, ParamKind, ParamValue, SqlValue, ValidationError,
    };

    #[test]
    fn parses_each_parameter_kind() {
        assert_eq!(parse_param(ParamKind::Int, " 42 "), Ok(ParamValue::Int(42)));
        assert_eq!(
            parse_param(ParamKind::Float, "19.5"),
            Ok(ParamValue::Float(19.5))
        );
        assert_eq!(
            parse_param(ParamKind::Text, " gold "),
            Ok(ParamValue::Text("gold".to_string()))
        );
        assert_eq!(
            parse_param(ParamKind::Date, "2026-02-14"),
            Ok(ParamValue::Date(
                NaiveDate::from_ymd_opt(2026, 2, 14).expect("valid date")
            ))
        );
    }

    #[test]
    fn rejects_unparseable_input_before_any_query() {
        assert_eq!(parse_param(ParamKind::Int, ""), Err(ValidationError::Empty));
        assert!(matches!(
            parse_param(ParamKind::Int, "ten"),
            Err(ValidationError::InvalidInt { .. })
        ));
        assert!(matches!(
            parse_param(ParamKind::Float, "12,50"),
            Err(ValidationError::InvalidFloat { .. })
        ));
        assert!(matches!(
            parse_param(ParamKind::Date, "14-02-2026"),
            Err(ValidationError::InvalidDate { .. })
        ));
    }

    #[test]
    fn currency_format_is_stable_for_negative_values() {
        assert_eq!(
            render_value(&SqlValue::Float(25000.0), ColumnFormat::Currency),
            "₹25000.00"
        );
        assert_eq!(
            render_value(&SqlValue::Float(-150.5), ColumnFormat::Currency),
            "₹-150.50"
        );
        assert_eq!(
            render_value(&SqlValue::Int(7), ColumnFormat::Currency),
            "₹7.00"
        );
    }

    #[test]
    fn percent_format_appends_suffix_with_two_decimals() {
        assert_eq!(
            render_value(&SqlValue::Float(12.345), ColumnFormat::Percent),
            "12.35%"
        );
        assert_eq!(
            render_value(&SqlValue::Float(-40.0), ColumnFormat::Percent),
            "-40.00%"
        );
    }

    #[test]
    fn decimal_text_cells_are_formatted_like_numbers() {
        assert_eq!(
            render_value(
                &SqlValue::Text("1234.5".to_string()),
                ColumnFormat::Currency
            ),
            "₹1234.50"
        );
        assert_eq!(
            render_value(&SqlValue::Text("gold".to_string()), ColumnFormat::Currency),
            "gold"
        );
    }

    #[test]
    fn null_and_dates_render_plainly() {
        assert_eq!(render_value(&SqlValue::Null, ColumnFormat::Currency), "NULL");
        let date = NaiveDate::from_ymd_opt(2026, 1, 31).expect("valid date");
        assert_eq!(
            render_value(&SqlValue::Date(date), ColumnFormat::Plain),
            "2026-01-31"
        );
    }
}
