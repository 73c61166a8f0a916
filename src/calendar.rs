use std::fmt;
use std::str::FromStr;

/// Calendar month, parsed from its lower-case Polish name.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash, Ord, PartialOrd)]
pub enum Month {
    Styczen,
    Luty,
    Marzec,
    Kwiecien,
    Maj,
    Czerwiec,
    Lipiec,
    Sierpien,
    Wrzesien,
    Pazdziernik,
    Listopad,
    Grudzien,
}

impl Month {
    pub const ALL: [Month; 12] = [
        Month::Styczen,
        Month::Luty,
        Month::Marzec,
        Month::Kwiecien,
        Month::Maj,
        Month::Czerwiec,
        Month::Lipiec,
        Month::Sierpien,
        Month::Wrzesien,
        Month::Pazdziernik,
        Month::Listopad,
        Month::Grudzien,
    ];

    /// Token accepted on the command line.
    pub fn as_str(&self) -> &'static str {
        match self {
            Month::Styczen => "styczeń",
            Month::Luty => "luty",
            Month::Marzec => "marzec",
            Month::Kwiecien => "kwiecień",
            Month::Maj => "maj",
            Month::Czerwiec => "czerwiec",
            Month::Lipiec => "lipiec",
            Month::Sierpien => "sierpień",
            Month::Wrzesien => "wrzesień",
            Month::Pazdziernik => "październik",
            Month::Listopad => "listopad",
            Month::Grudzien => "grudzień",
        }
    }

    /// Capitalized name used for the month directory.
    pub fn dir_name(&self) -> String {
        let name = self.as_str();
        let mut chars = name.chars();
        match chars.next() {
            Some(first) => first.to_uppercase().chain(chars).collect(),
            None => String::new(),
        }
    }
}

impl FromStr for Month {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Month::ALL
            .into_iter()
            .find(|month| month.as_str() == s)
            .ok_or(())
    }
}

impl fmt::Display for Month {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Day of the week in the fixed cyclic order `pn`..`nd`.
#[derive(Clone, Copy, Debug, Eq, PartialEq, Hash)]
pub enum Weekday {
    Pn,
    Wt,
    Sr,
    Cw,
    Pt,
    Sb,
    Nd,
}

impl Weekday {
    pub const ALL: [Weekday; 7] = [
        Weekday::Pn,
        Weekday::Wt,
        Weekday::Sr,
        Weekday::Cw,
        Weekday::Pt,
        Weekday::Sb,
        Weekday::Nd,
    ];

    pub fn code(&self) -> &'static str {
        match self {
            Weekday::Pn => "pn",
            Weekday::Wt => "wt",
            Weekday::Sr => "sr",
            Weekday::Cw => "cw",
            Weekday::Pt => "pt",
            Weekday::Sb => "sb",
            Weekday::Nd => "nd",
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            Weekday::Pn => "poniedziałek",
            Weekday::Wt => "wtorek",
            Weekday::Sr => "środa",
            Weekday::Cw => "czwartek",
            Weekday::Pt => "piątek",
            Weekday::Sb => "sobota",
            Weekday::Nd => "niedziela",
        }
    }

    /// Position in the cyclic order, `pn` being 0.
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Inclusive run of days from `self` to `end`, wrapping past `nd`.
    pub fn through(self, end: Weekday) -> Vec<Weekday> {
        let start = self.index();
        let len = (end.index() + Weekday::ALL.len() - start) % Weekday::ALL.len() + 1;
        Weekday::ALL
            .iter()
            .cycle()
            .skip(start)
            .take(len)
            .copied()
            .collect()
    }
}

impl FromStr for Weekday {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Weekday::ALL
            .into_iter()
            .find(|day| day.code() == s)
            .ok_or(())
    }
}

impl fmt::Display for Weekday {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}

#[derive(Clone, Copy, Debug, Default, Eq, PartialEq)]
pub enum TimeOfDay {
    #[default]
    Rano,
    Wieczor,
}

impl TimeOfDay {
    pub const ALL: [TimeOfDay; 2] = [TimeOfDay::Rano, TimeOfDay::Wieczor];

    pub fn code(&self) -> &'static str {
        match self {
            TimeOfDay::Rano => "r",
            TimeOfDay::Wieczor => "w",
        }
    }

    pub fn dir_name(&self) -> &'static str {
        match self {
            TimeOfDay::Rano => "rano",
            TimeOfDay::Wieczor => "wieczór",
        }
    }
}

impl FromStr for TimeOfDay {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TimeOfDay::ALL
            .into_iter()
            .find(|time| time.code() == s)
            .ok_or(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn month_tokens_round_trip_and_capitalize() {
        assert_eq!("październik".parse::<Month>(), Ok(Month::Pazdziernik));
        assert_eq!(Month::Styczen.dir_name(), "Styczeń");
        assert_eq!(Month::Pazdziernik.dir_name(), "Październik");
        assert!("Styczeń".parse::<Month>().is_err());
        assert!("styczen".parse::<Month>().is_err());
    }

    #[test]
    fn through_wraps_past_sunday() {
        assert_eq!(
            Weekday::Pt.through(Weekday::Wt),
            vec![Weekday::Pt, Weekday::Sb, Weekday::Nd, Weekday::Pn, Weekday::Wt]
        );
        assert_eq!(Weekday::Sr.through(Weekday::Sr), vec![Weekday::Sr]);
        assert_eq!(Weekday::Pn.through(Weekday::Nd).len(), 7);
    }

    #[test]
    fn through_length_is_cyclic_distance_plus_one() {
        for start in Weekday::ALL {
            for end in Weekday::ALL {
                let distance = (end.index() as isize - start.index() as isize).rem_euclid(7);
                let run = start.through(end);
                assert_eq!(run.len() as isize, distance + 1);
                assert_eq!(run.first(), Some(&start));
                assert_eq!(run.last(), Some(&end));
            }
        }
    }

    #[test]
    fn time_of_day_codes() {
        assert_eq!("w".parse::<TimeOfDay>(), Ok(TimeOfDay::Wieczor));
        assert_eq!(TimeOfDay::default().dir_name(), "rano");
        assert!("x".parse::<TimeOfDay>().is_err());
    }
}
