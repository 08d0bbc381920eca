//! Validation of incoming transaction write requests.
//!
//! Both the JSON API and the HTML form endpoints funnel their raw request
//! fields through this module before anything touches the database. The
//! functions here are pure: they check the input against the category
//! registry and the required-field rules and hand back either a structure
//! ready for persistence or a typed [Error].
//!
//! Sign convention: expenses are stored as negated magnitudes, but that is
//! the caller's responsibility. The validator accepts whatever sign it is
//! given and never inverts it.

use serde::Deserialize;
use time::{Date, format_description::BorrowedFormatItem, macros::format_description};

use crate::{Error, category::is_valid_category};

const DATE_FORMAT: &[BorrowedFormatItem<'_>] = format_description!("[year]-[month]-[day]");

/// A raw amount as it arrives off the wire.
///
/// JSON bodies carry amounts as numbers while urlencoded forms carry them as
/// strings, so both shapes are accepted here and resolved during validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum RawAmount {
    /// An amount that was already a number in the request body.
    Number(f64),
    /// An amount submitted as text, e.g. from a form input.
    Text(String),
}

/// The raw fields of a transaction write request, before validation.
///
/// Every field is optional so that the same type can describe both full
/// create requests and partial update requests.
#[derive(Debug, Default, Clone, Deserialize)]
pub struct TransactionInput {
    /// The value of the transaction in dollars.
    pub amount: Option<RawAmount>,
    /// Text detailing the transaction.
    pub description: Option<String>,
    /// The expense category label.
    pub category: Option<String>,
    /// The date the expense occurred, as YYYY-MM-DD.
    pub date: Option<String>,
}

/// A fully validated transaction, ready to be persisted.
#[derive(Debug, Clone, PartialEq)]
pub struct ValidatedTransaction {
    /// The value of the transaction in dollars, sign preserved from the input.
    pub amount: f64,
    /// The date the expense occurred.
    pub date: Date,
    /// Text detailing the transaction.
    pub description: String,
    /// The expense category label, guaranteed to be in the registry.
    pub category: String,
}

/// A validated partial update. Fields left as `None` are not touched by the
/// repository merge.
#[derive(Debug, Default, Clone, PartialEq)]
pub struct TransactionPatch {
    /// The new amount, if the request included one.
    pub amount: Option<f64>,
    /// The new date, if the request included one.
    pub date: Option<Date>,
    /// The new description, if the request included one.
    pub description: Option<String>,
    /// The new category, if the request included one.
    pub category: Option<String>,
}

/// Validate the input for creating a transaction.
///
/// # Errors
/// This function will return a:
/// - [Error::InvalidCategory] if the category is absent or not in the registry,
/// - [Error::MissingField] if the description is absent or empty, or the
///   amount or date is absent,
/// - [Error::InvalidAmount] if the amount is not a finite number,
/// - or [Error::InvalidDate] if the date is not a calendar date.
pub fn validate_create(input: TransactionInput) -> Result<ValidatedTransaction, Error> {
    let category = match input.category {
        Some(category) if is_valid_category(&category) => category,
        Some(category) => return Err(Error::InvalidCategory(category)),
        None => return Err(Error::InvalidCategory(String::new())),
    };

    let description = match input.description {
        Some(description) if !description.is_empty() => description,
        _ => return Err(Error::MissingField("description")),
    };

    let amount = match input.amount {
        Some(raw) => parse_amount(raw)?,
        None => return Err(Error::MissingField("amount")),
    };

    let date = match input.date {
        Some(raw) => parse_date(&raw)?,
        None => return Err(Error::MissingField("date")),
    };

    Ok(ValidatedTransaction {
        amount,
        date,
        description,
        category,
    })
}

/// Validate the input for a partial update.
///
/// The per-field rules are the same as [validate_create], but only applied to
/// the fields that are present. An update either fully validates or is
/// rejected wholesale.
///
/// # Errors
/// See [validate_create]; absent fields never error.
pub fn validate_update(input: TransactionInput) -> Result<TransactionPatch, Error> {
    let category = match input.category {
        Some(category) if is_valid_category(&category) => Some(category),
        Some(category) => return Err(Error::InvalidCategory(category)),
        None => None,
    };

    let description = match input.description {
        Some(description) if description.is_empty() => {
            return Err(Error::MissingField("description"));
        }
        description => description,
    };

    let amount = input.amount.map(parse_amount).transpose()?;
    let date = input.date.as_deref().map(parse_date).transpose()?;

    Ok(TransactionPatch {
        amount,
        date,
        description,
        category,
    })
}

fn parse_amount(raw: RawAmount) -> Result<f64, Error> {
    let amount = match raw {
        RawAmount::Number(amount) => amount,
        RawAmount::Text(text) => text
            .trim()
            .parse::<f64>()
            .map_err(|_| Error::InvalidAmount(text.clone()))?,
    };

    if amount.is_finite() {
        Ok(amount)
    } else {
        Err(Error::InvalidAmount(amount.to_string()))
    }
}

fn parse_date(raw: &str) -> Result<Date, Error> {
    Date::parse(raw, DATE_FORMAT).map_err(|_| Error::InvalidDate(raw.to_owned()))
}

#[cfg(test)]
mod validate_create_tests {
    use time::macros::date;

    use crate::{
        Error,
        validation::{RawAmount, TransactionInput, validate_create},
    };

    fn valid_input() -> TransactionInput {
        TransactionInput {
            amount: Some(RawAmount::Number(-42.5)),
            description: Some("Weekly groceries".to_owned()),
            category: Some("Food & Dining".to_owned()),
            date: Some("2024-03-15".to_owned()),
        }
    }

    #[test]
    fn accepts_valid_input() {
        let validated = validate_create(valid_input()).expect("input should validate");

        assert_eq!(validated.amount, -42.5);
        assert_eq!(validated.description, "Weekly groceries");
        assert_eq!(validated.category, "Food & Dining");
        assert_eq!(validated.date, date!(2024 - 03 - 15));
    }

    #[test]
    fn category_is_preserved_exactly() {
        let input = TransactionInput {
            category: Some("Bills & Utilities".to_owned()),
            ..valid_input()
        };

        let validated = validate_create(input).unwrap();

        assert_eq!(validated.category, "Bills & Utilities");
    }

    #[test]
    fn rejects_unknown_category() {
        let input = TransactionInput {
            category: Some("Groceries".to_owned()),
            ..valid_input()
        };

        let result = validate_create(input);

        assert_eq!(result, Err(Error::InvalidCategory("Groceries".to_owned())));
    }

    #[test]
    fn rejects_missing_category() {
        let input = TransactionInput {
            category: None,
            ..valid_input()
        };

        assert!(matches!(
            validate_create(input),
            Err(Error::InvalidCategory(_))
        ));
    }

    #[test]
    fn rejects_empty_description() {
        let input = TransactionInput {
            description: Some(String::new()),
            ..valid_input()
        };

        assert_eq!(
            validate_create(input),
            Err(Error::MissingField("description"))
        );
    }

    #[test]
    fn rejects_missing_amount() {
        let input = TransactionInput {
            amount: None,
            ..valid_input()
        };

        assert_eq!(validate_create(input), Err(Error::MissingField("amount")));
    }

    #[test]
    fn rejects_unparseable_amount() {
        let input = TransactionInput {
            amount: Some(RawAmount::Text("twelve".to_owned())),
            ..valid_input()
        };

        assert_eq!(
            validate_create(input),
            Err(Error::InvalidAmount("twelve".to_owned()))
        );
    }

    #[test]
    fn rejects_non_finite_amount() {
        let input = TransactionInput {
            amount: Some(RawAmount::Text("inf".to_owned())),
            ..valid_input()
        };

        assert!(matches!(
            validate_create(input),
            Err(Error::InvalidAmount(_))
        ));
    }

    #[test]
    fn parses_amount_from_text() {
        let input = TransactionInput {
            amount: Some(RawAmount::Text("-19.99".to_owned())),
            ..valid_input()
        };

        assert_eq!(validate_create(input).unwrap().amount, -19.99);
    }

    #[test]
    fn rejects_invalid_date() {
        let input = TransactionInput {
            date: Some("15/03/2024".to_owned()),
            ..valid_input()
        };

        assert_eq!(
            validate_create(input),
            Err(Error::InvalidDate("15/03/2024".to_owned()))
        );
    }

    #[test]
    fn validation_is_idempotent_on_valid_input() {
        let first = validate_create(valid_input()).unwrap();
        let reinput = TransactionInput {
            amount: Some(RawAmount::Number(first.amount)),
            description: Some(first.description.clone()),
            category: Some(first.category.clone()),
            date: Some(first.date.to_string()),
        };

        let second = validate_create(reinput).unwrap();

        assert_eq!(first, second);
    }
}
