//! Typed values for the `bulk` command

use crate::pkginfo::date::{is_valid_date, parse_install_date, to_plist_date};
use plist::Value;

/// What `bulk` should do with a key.
#[derive(Debug, Clone, PartialEq)]
pub enum BulkValue {
    Set(Value),
    Remove,
}

/// Interpret a command-line value.
///
/// `-` removes the key. Otherwise the first match wins: boolean
/// (`true`/`false`, any case), install date, 64-bit integer, string.
pub fn parse_bulk_value(raw: &str) -> BulkValue {
    if raw == "-" {
        return BulkValue::Remove;
    }
    if raw.eq_ignore_ascii_case("true") {
        return BulkValue::Set(Value::Boolean(true));
    }
    if raw.eq_ignore_ascii_case("false") {
        return BulkValue::Set(Value::Boolean(false));
    }
    if is_valid_date(raw) {
        if let Ok(Some(date)) = parse_install_date(raw) {
            return BulkValue::Set(Value::Date(to_plist_date(date)));
        }
    }
    if let Ok(int) = raw.parse::<i64>() {
        return BulkValue::Set(Value::Integer(int.into()));
    }
    BulkValue::Set(Value::String(raw.to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn dash_removes() {
        assert_eq!(parse_bulk_value("-"), BulkValue::Remove);
    }

    #[test]
    fn infers_scalar_types() {
        assert_eq!(parse_bulk_value("True"), BulkValue::Set(Value::Boolean(true)));
        assert_eq!(parse_bulk_value("false"), BulkValue::Set(Value::Boolean(false)));
        assert_eq!(parse_bulk_value("42"), BulkValue::Set(Value::Integer(42i64.into())));
        assert_eq!(parse_bulk_value("-3"), BulkValue::Set(Value::Integer((-3i64).into())));
        assert_eq!(
            parse_bulk_value("Utilities"),
            BulkValue::Set(Value::String("Utilities".to_string()))
        );
    }

    #[test]
    fn recognizes_install_dates() {
        match parse_bulk_value("2011-08-03T13:00:00Z") {
            BulkValue::Set(Value::Date(_)) => {}
            other => panic!("expected a date, got {:?}", other),
        }
        assert_eq!(
            parse_bulk_value("2011-08-03"),
            BulkValue::Set(Value::String("2011-08-03".to_string()))
        );
        assert_eq!(
            parse_bulk_value("2011-08-03T13:00:60Z"),
            BulkValue::Set(Value::String("2011-08-03T13:00:60Z".to_string()))
        );
    }
}
