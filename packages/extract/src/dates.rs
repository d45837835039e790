//! Date resolution from template parameter values.
//!
//! Biographical dates are written as nested templates, e.g.
//! `birth_date = {{birth date and age|1990|5|4|df=y}}`. The resolver
//! re-parses the raw parameter value and reads the first three
//! positional fields of the first template it finds as year, month,
//! and day.

use chrono::NaiveDate;

use wikiharvest_shared::{Result, WikiHarvestError};
use wikiharvest_wikitext::{Template, parse};

/// Resolve a raw parameter value to a calendar date.
///
/// Fails with [`WikiHarvestError::MissingDateTemplate`] when the value
/// contains no template at all, and with
/// [`WikiHarvestError::InvalidDateField`] when any of the first three
/// positional fields is absent, non-integer, or the triple is not a
/// real date.
pub fn resolve_date(raw: &str) -> Result<NaiveDate> {
    let doc = parse(raw);
    let template = doc
        .templates()
        .next()
        .ok_or(WikiHarvestError::MissingDateTemplate)?;

    let year: i32 = positional_int(template, 1)?;
    let month: u32 = positional_int(template, 2)?;
    let day: u32 = positional_int(template, 3)?;

    NaiveDate::from_ymd_opt(year, month, day).ok_or_else(|| {
        WikiHarvestError::invalid_date(format!("{year}-{month}-{day} is not a calendar date"))
    })
}

/// Read the nth positional field as an integer.
fn positional_int<T: std::str::FromStr>(template: &Template, n: usize) -> Result<T> {
    let raw = template
        .get_positional(n)
        .ok_or_else(|| WikiHarvestError::invalid_date(format!("missing positional field {n}")))?;

    let trimmed = raw.trim();
    trimmed.parse().map_err(|_| {
        WikiHarvestError::invalid_date(format!("field {n} is not an integer: '{trimmed}'"))
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn resolves_plain_date_template() {
        let date = resolve_date("{{birth date|1990|5|4}}").expect("resolve");
        assert_eq!(date, NaiveDate::from_ymd_opt(1990, 5, 4).unwrap());
    }

    #[test]
    fn named_params_do_not_shift_positionals() {
        let date = resolve_date("{{birth date and age|1987|6|24|df=y}}").expect("resolve");
        assert_eq!(date, NaiveDate::from_ymd_opt(1987, 6, 24).unwrap());
    }

    #[test]
    fn tolerates_whitespace_around_fields() {
        let date = resolve_date("{{birth date| 1990 | 5 | 4 }}").expect("resolve");
        assert_eq!(date, NaiveDate::from_ymd_opt(1990, 5, 4).unwrap());
    }

    #[test]
    fn first_template_wins() {
        let date =
            resolve_date("{{birth date|1990|5|4}} later {{death date|2020|1|1}}").expect("resolve");
        assert_eq!(date, NaiveDate::from_ymd_opt(1990, 5, 4).unwrap());
    }

    #[test]
    fn surrounding_prose_is_ignored() {
        let date = resolve_date("born {{birth date|1990|5|4}} in Berlin").expect("resolve");
        assert_eq!(date, NaiveDate::from_ymd_opt(1990, 5, 4).unwrap());
    }

    #[test]
    fn no_template_fails() {
        let err = resolve_date("4 May 1990").unwrap_err();
        assert!(matches!(err, WikiHarvestError::MissingDateTemplate));
    }

    #[test]
    fn non_integer_field_fails() {
        let err = resolve_date("{{birth date|1990|May|4}}").unwrap_err();
        assert!(matches!(err, WikiHarvestError::InvalidDateField(_)));
    }

    #[test]
    fn missing_field_fails() {
        let err = resolve_date("{{birth date|1990|5}}").unwrap_err();
        assert!(matches!(err, WikiHarvestError::InvalidDateField(_)));
    }

    #[test]
    fn impossible_date_fails() {
        let err = resolve_date("{{birth date|1990|13|4}}").unwrap_err();
        assert!(matches!(err, WikiHarvestError::InvalidDateField(_)));

        let err = resolve_date("{{birth date|1990|2|30}}").unwrap_err();
        assert!(matches!(err, WikiHarvestError::InvalidDateField(_)));
    }
}
