use chrono::Duration;

#[derive(Debug, PartialEq)]
pub enum Error {
    Empty,
    InvalidNumber,
    UnknownUnit(char),
    NotPositive,
    OutOfRange,
}

/// Parses token lifetimes such as `86400`, `30s`, `15m`, `12h` or `1d`.
/// A bare number is read as seconds. Lifetimes must be positive.
pub fn parse_duration(raw: &str) -> Result<Duration, Error> {
    let raw = raw.trim();
    let last = raw.chars().last().ok_or(Error::Empty)?;

    let (amount, unit) = match last.is_ascii_digit() {
        true => (raw, 's'),
        false => (&raw[..raw.len() - last.len_utf8()], last),
    };

    let amount = amount
        .trim()
        .parse::<i64>()
        .map_err(|_| Error::InvalidNumber)?;

    let duration = match unit {
        's' => Duration::try_seconds(amount),
        'm' => Duration::try_minutes(amount),
        'h' => Duration::try_hours(amount),
        'd' => Duration::try_days(amount),
        unit => return Err(Error::UnknownUnit(unit)),
    }
    .ok_or(Error::OutOfRange)?;

    match duration > Duration::zero() {
        true => Ok(duration),
        false => Err(Error::NotPositive),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bare_numbers_are_seconds() {
        assert_eq!(parse_duration("86400"), Ok(Duration::days(1)));
    }

    #[test]
    fn suffixed_units() {
        assert_eq!(parse_duration("30s"), Ok(Duration::seconds(30)));
        assert_eq!(parse_duration("15m"), Ok(Duration::minutes(15)));
        assert_eq!(parse_duration("12h"), Ok(Duration::hours(12)));
        assert_eq!(parse_duration(" 1d "), Ok(Duration::days(1)));
    }

    #[test]
    fn rejects_garbage() {
        assert_eq!(parse_duration(""), Err(Error::Empty));
        assert_eq!(parse_duration("d"), Err(Error::InvalidNumber));
        assert_eq!(parse_duration("1w"), Err(Error::UnknownUnit('w')));
        assert_eq!(parse_duration("one day"), Err(Error::InvalidNumber));
    }

    #[test]
    fn rejects_lifetimes_that_are_not_positive() {
        assert_eq!(parse_duration("0"), Err(Error::NotPositive));
        assert_eq!(parse_duration("-1d"), Err(Error::NotPositive));
        assert_eq!(parse_duration("-30s"), Err(Error::NotPositive));
    }

    #[test]
    fn rejects_lifetimes_chrono_cannot_hold() {
        assert_eq!(parse_duration("9999999999999999d"), Err(Error::OutOfRange));
        assert_eq!(parse_duration("9223372036854775807h"), Err(Error::OutOfRange));
    }
}
