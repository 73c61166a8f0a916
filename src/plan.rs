use std::collections::HashSet;

use thiserror::Error;

use crate::calendar::{Month, TimeOfDay, Weekday};

/// Argument lists exactly as they arrived on the command line.
#[derive(Clone, Debug, Default)]
pub struct RawSelection {
    pub months: Vec<String>,
    pub ranges: Vec<String>,
    pub times_of_day: Vec<String>,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Nie podano miesięcy")]
    NoMonths,
    #[error(
        "Podano niepoprawną nazwę miesiąca: {0}\n\
         Nazwę podajemy z małej litery i z polskimi znakami, np. styczeń"
    )]
    UnknownMonth(String),
    #[error(
        "Podano niepoprawną nazwę miesiąca: {0}\n\
         Nazwę danego miesiąca można podać tylko raz."
    )]
    DuplicateMonth(String),
    #[error(
        "Błąd: Ilość zakresów dni tygodnia ({ranges}) nie odpowiada ilości podanych miesięcy ({months}).\n\
         Należy podać tyle zakresów ile zostało podanych miesięcy."
    )]
    RangeCountMismatch { months: usize, ranges: usize },
    #[error(
        "Błąd: Podano niepoprawny format zakresu tygodnia: {0}\n\
         Dostępne dni to: pn, wt, sr, cw, pt, sb, nd\n\
         Dni w zakresie rozdzielamy znakiem -\n\
         np. pn-pt"
    )]
    InvalidRange(String),
    #[error(
        "Błąd: Podano niepoprawną ilość pór dnia ({given}, liczba dni: {slots}).\n\
         Na każdy podany dzień w każdym miesiącu przypada jedna pora dnia"
    )]
    TooManyTimesOfDay { given: usize, slots: usize },
    #[error(
        "Błąd: Możliwe pory dnia to: r, w.\n\
         Podano niepoprawną porę dnia: {0}"
    )]
    UnknownTimeOfDay(String),
}

/// One directory of the tree: `Month/Weekday/TimeOfDay`.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Leaf {
    pub month: Month,
    pub weekday: Weekday,
    pub time_of_day: TimeOfDay,
}

/// Fully expanded selection, leaves in month order then weekday order.
#[derive(Clone, Debug, Default, Eq, PartialEq)]
pub struct Plan {
    leaves: Vec<Leaf>,
}

impl Plan {
    pub fn leaves(&self) -> &[Leaf] {
        &self.leaves
    }

    pub fn len(&self) -> usize {
        self.leaves.len()
    }
}

/// Validate the raw lists and cross-expand them into a [`Plan`].
pub fn build(raw: &RawSelection) -> Result<Plan, ValidationError> {
    let months = parse_months(&raw.months)?;

    if raw.ranges.len() != months.len() {
        return Err(ValidationError::RangeCountMismatch {
            months: months.len(),
            ranges: raw.ranges.len(),
        });
    }

    let days = raw
        .ranges
        .iter()
        .map(|token| expand_range(token))
        .collect::<Result<Vec<_>, _>>()?;

    let slots: usize = days.iter().map(Vec::len).sum();
    let times = assign_times_of_day(&raw.times_of_day, slots)?;

    let mut times = times.into_iter();
    let mut leaves = Vec::with_capacity(slots);
    for (month, weekdays) in months.into_iter().zip(days) {
        for weekday in weekdays {
            let time_of_day = times.next().unwrap_or_default();
            leaves.push(Leaf {
                month,
                weekday,
                time_of_day,
            });
        }
    }

    Ok(Plan { leaves })
}

fn parse_months(tokens: &[String]) -> Result<Vec<Month>, ValidationError> {
    if tokens.is_empty() {
        return Err(ValidationError::NoMonths);
    }

    let months = tokens
        .iter()
        .map(|token| {
            token
                .parse::<Month>()
                .map_err(|_| ValidationError::UnknownMonth(token.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut seen = HashSet::new();
    for month in &months {
        if !seen.insert(*month) {
            return Err(ValidationError::DuplicateMonth(month.to_string()));
        }
    }

    Ok(months)
}

/// Expand `pn-pt` style tokens; a bare code yields a single day.
pub fn expand_range(token: &str) -> Result<Vec<Weekday>, ValidationError> {
    let invalid = || ValidationError::InvalidRange(token.to_owned());
    let parse = |code: &str| code.parse::<Weekday>().map_err(|_| invalid());

    match token.split_once('-') {
        None => Ok(vec![parse(token)?]),
        Some((start, end)) => {
            if end.contains('-') {
                return Err(invalid());
            }
            Ok(parse(start)?.through(parse(end)?))
        }
    }
}

/// Parse time-of-day codes and pad them with the default up to `slots`.
pub fn assign_times_of_day(
    tokens: &[String],
    slots: usize,
) -> Result<Vec<TimeOfDay>, ValidationError> {
    if tokens.len() > slots {
        return Err(ValidationError::TooManyTimesOfDay {
            given: tokens.len(),
            slots,
        });
    }

    let mut times = tokens
        .iter()
        .map(|token| {
            token
                .parse::<TimeOfDay>()
                .map_err(|_| ValidationError::UnknownTimeOfDay(token.clone()))
        })
        .collect::<Result<Vec<_>, _>>()?;
    times.resize(slots, TimeOfDay::default());
    Ok(times)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn strings(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| (*s).to_owned()).collect()
    }

    fn selection(months: &[&str], ranges: &[&str], times: &[&str]) -> RawSelection {
        RawSelection {
            months: strings(months),
            ranges: strings(ranges),
            times_of_day: strings(times),
        }
    }

    #[test]
    fn single_month_range_defaults_to_morning() {
        let plan = build(&selection(&["styczeń"], &["pn-sr"], &[])).unwrap();
        let days: Vec<_> = plan.leaves().iter().map(|leaf| leaf.weekday).collect();
        assert_eq!(days, vec![Weekday::Pn, Weekday::Wt, Weekday::Sr]);
        assert!(
            plan.leaves()
                .iter()
                .all(|leaf| leaf.month == Month::Styczen && leaf.time_of_day == TimeOfDay::Rano)
        );
    }

    #[test]
    fn times_of_day_are_consumed_across_months_in_order() {
        let plan = build(&selection(
            &["luty", "maj"],
            &["sb-pn", "cw"],
            &["w", "r", "w", "w"],
        ))
        .unwrap();
        let got: Vec<_> = plan
            .leaves()
            .iter()
            .map(|leaf| (leaf.month, leaf.weekday, leaf.time_of_day))
            .collect();
        assert_eq!(
            got,
            vec![
                (Month::Luty, Weekday::Sb, TimeOfDay::Wieczor),
                (Month::Luty, Weekday::Nd, TimeOfDay::Rano),
                (Month::Luty, Weekday::Pn, TimeOfDay::Wieczor),
                (Month::Maj, Weekday::Cw, TimeOfDay::Wieczor),
            ]
        );
    }

    #[test]
    fn short_time_list_is_padded_with_default() {
        let plan = build(&selection(&["maj"], &["pn-pt"], &["w"])).unwrap();
        let times: Vec<_> = plan.leaves().iter().map(|leaf| leaf.time_of_day).collect();
        assert_eq!(
            times,
            vec![
                TimeOfDay::Wieczor,
                TimeOfDay::Rano,
                TimeOfDay::Rano,
                TimeOfDay::Rano,
                TimeOfDay::Rano,
            ]
        );
    }

    #[test]
    fn rejects_empty_months() {
        assert_eq!(
            build(&selection(&[], &[], &[])),
            Err(ValidationError::NoMonths)
        );
    }

    #[test]
    fn rejects_unknown_month_before_duplicates() {
        assert_eq!(
            build(&selection(&["maj", "maj", "Maj"], &["pn", "pn", "pn"], &[])),
            Err(ValidationError::UnknownMonth("Maj".to_owned()))
        );
    }

    #[test]
    fn rejects_duplicate_months() {
        assert_eq!(
            build(&selection(&["maj", "luty", "maj"], &["pn", "wt", "sr"], &[])),
            Err(ValidationError::DuplicateMonth("maj".to_owned()))
        );
    }

    #[test]
    fn rejects_range_count_mismatch() {
        assert_eq!(
            build(&selection(&["maj", "luty"], &["pn-pt"], &[])),
            Err(ValidationError::RangeCountMismatch {
                months: 2,
                ranges: 1
            })
        );
    }

    #[test]
    fn rejects_malformed_ranges() {
        for token in ["pn-xx", "pon", "pn-", "-pt", "pn-wt-sr", ""] {
            assert_eq!(
                expand_range(token),
                Err(ValidationError::InvalidRange(token.to_owned())),
                "token {token:?}"
            );
        }
    }

    #[test]
    fn rejects_too_many_times_of_day() {
        assert_eq!(
            build(&selection(&["maj"], &["pn-wt"], &["r", "w", "r"])),
            Err(ValidationError::TooManyTimesOfDay { given: 3, slots: 2 })
        );
    }

    #[test]
    fn rejects_unknown_time_of_day() {
        assert_eq!(
            build(&selection(&["maj"], &["pn-wt"], &["r", "noc"])),
            Err(ValidationError::UnknownTimeOfDay("noc".to_owned()))
        );
    }

    #[test]
    fn messages_are_polish() {
        let err = ValidationError::InvalidRange("pn-xx".to_owned());
        assert!(err.to_string().contains("Dostępne dni to: pn, wt, sr, cw, pt, sb, nd"));
        assert_eq!(ValidationError::NoMonths.to_string(), "Nie podano miesięcy");
    }
}
