//! # clockmark
//!
//! Text-transform core for live clock widgets and math-aware markdown
//! previews. Two independent, stateless components:
//!
//! 1. **Delta-time codec** (this module): parses and re-serializes the
//!    clock display grammar and advances a displayed value one signed
//!    step with odometer-style rollover.
//! 2. **Math-notation escaper** ([`math`]): shields math spans inside
//!    markdown source from the markdown renderer by backslash-escaping
//!    the formatting characters they contain.
//!
//! The display grammar is `H:M:S` or `D:H:M:S`:
//! - `hours`, `minutes`, `seconds` are zero-padded to two digits on
//!   output; any non-negative decimal value is accepted on input.
//! - `days` is emitted unpadded and **omitted entirely** (separator
//!   included) when zero.
//! - **Whitespace** around the `:` separators is ignored on input.
//!
//! Rollover bounds on stepping:
//! - `seconds`: `0..=59`, `minutes`: `0..=59`, `hours`: `0..=23`
//! - `days`: no upper bound; borrowing below zero days parks the field
//!   at the expired sentinel, rendered as the fixed string `"00:00:00"`.
//!
//! Parsing performs no range validation; `"99:99:99"` is accepted as
//! given. Only the field count and numeric shape are checked; errors are
//! categorised in [`ErrorKind`].
//!
//! ## Example
//! ```rust
//! use clockmark::{step, total_seconds};
//!
//! assert_eq!(step("23:59:59", 1).unwrap(), "1:00:00:00");
//! assert_eq!(step("00:00:01", -1).unwrap(), "00:00:00");
//! assert_eq!(total_seconds("1:00:00:00").unwrap(), 86_400);
//!
//! let guarded = clockmark::math::escape("See $x_1$ for details.");
//! assert_eq!(guarded, "See $x\\_1$ for details.");
//! ```

use core::fmt;

pub mod editor;
pub mod math;

/// Sentinel value for the `days` field meaning "borrowed past zero".
/// Produced by [`step`], consumed only by the [`Duration`] formatter.
const EXPIRED_DAYS: i64 = -1;

/// The fixed display form of an expired duration.
const EXPIRED_DISPLAY: &str = "00:00:00";

/// Rollover ceilings, most significant field first. The `days` entry is
/// the expired sentinel rather than a ceiling: a borrow out of zero days
/// parks the field there, and `days` has no upper bound, so only the
/// three clock fields wrap.
const FIELD_CEILING: [i64; 4] = [EXPIRED_DAYS, 23, 59, 59];

/// A clock value as displayed: days, hours, minutes, seconds.
///
/// Produced and consumed within a single call; plain by-value data. In
/// normalized form every field is non-negative, with `days == -1` as the
/// single out-of-band state: [`step`] uses it to record that a countdown
/// borrowed past zero days, and the formatter renders it as the fixed
/// expired string. Nothing else assigns it meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Duration {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
}

impl Duration {
    /// Total seconds represented, counting days at 86 400.
    pub fn total_seconds(&self) -> i64 {
        self.days * 86_400 + self.hours * 3600 + self.minutes * 60 + self.seconds
    }
}

impl fmt::Display for Duration {
    /// Canonical display form.
    ///
    /// Negative `days` always renders as `"00:00:00"`. A zero `days`
    /// field is omitted together with its separator, so a parsed
    /// `"0:01:02:03"` re-displays as `"01:02:03"`; a known
    /// non-round-trip case, not a defect.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.days < 0 {
            return f.write_str(EXPIRED_DISPLAY);
        }

        if self.days == 0 {
            write!(f, "{:02}:{:02}:{:02}", self.hours, self.minutes, self.seconds)
        } else {
            write!(
                f,
                "{}:{:02}:{:02}:{:02}",
                self.days, self.hours, self.minutes, self.seconds
            )
        }
    }
}

/// Error type with granular categories.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum ErrorKind {
    /// Token count other than 3 (`H:M:S`) or 4 (`D:H:M:S`).
    WrongFieldCount(usize),
    /// A token that is not a plain non-negative decimal integer.
    NonNumericField,
}

impl fmt::Display for ErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ErrorKind::WrongFieldCount(count) => {
                write!(f, "wrong number of clock fields (expected 3 or 4, got {count})")
            }
            ErrorKind::NonNumericField => {
                f.write_str("clock field is not a non-negative integer")
            }
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Error {
    pub kind: ErrorKind,
    pub context: String,
}

impl Error {
    fn new(kind: ErrorKind, context: impl Into<String>) -> Self {
        Self {
            kind,
            context: context.into(),
        }
    }
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.context.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{} ({})", self.kind, self.context)
        }
    }
}

impl std::error::Error for Error {}

/// Parse a displayed clock value.
///
/// Splits on `:` with whitespace around separators ignored. Three tokens
/// are read as `0:H:M:S`, four as `D:H:M:S`; any other count fails.
/// Leading zeros are stripped by the numeric conversion. No range
/// checks beyond non-negativity.
pub fn parse(text: &str) -> Result<Duration, Error> {
    let tokens: Vec<&str> = text.split(':').map(str::trim).collect();

    let fields: [i64; 4] = match tokens.len() {
        3 => [0, field(tokens[0])?, field(tokens[1])?, field(tokens[2])?],
        4 => [
            field(tokens[0])?,
            field(tokens[1])?,
            field(tokens[2])?,
            field(tokens[3])?,
        ],
        n => return Err(Error::new(ErrorKind::WrongFieldCount(n), text)),
    };

    Ok(Duration {
        days: fields[0],
        hours: fields[1],
        minutes: fields[2],
        seconds: fields[3],
    })
}

fn field(token: &str) -> Result<i64, Error> {
    // u32 keeps the grammar honest: signs, empty tokens, and stray
    // characters are all rejected in one place.
    match token.parse::<u32>() {
        Ok(v) => Ok(i64::from(v)),
        Err(_) => Err(Error::new(ErrorKind::NonNumericField, token)),
    }
}

/// Total seconds represented by a displayed clock value.
pub fn total_seconds(text: &str) -> Result<i64, Error> {
    Ok(parse(text)?.total_seconds())
}

/// Advance a displayed clock value by one signed step.
///
/// Walks the fields least-significant first, applying `delta` to the
/// seconds field and carrying: a field driven below zero is parked at
/// its rollover ceiling (`days` at the expired sentinel) and the borrow
/// continues; a field driven past its ceiling is zeroed and the carry
/// continues; an in-range result stops the walk. A positive carry into
/// `days` always lands in range, so counting up past `23:59:59` opens a
/// days field rather than wrapping.
///
/// `delta` is expected to be `+1` or `-1`; other magnitudes are applied
/// verbatim at every visited field, so they do not add exact
/// multi-second amounts. Callers wanting that should loop single steps.
pub fn step(text: &str, delta: i64) -> Result<String, Error> {
    let d = parse(text)?;
    let mut fields = [d.days, d.hours, d.minutes, d.seconds];

    for i in (0..fields.len()).rev() {
        fields[i] += delta;
        if fields[i] < 0 {
            fields[i] = FIELD_CEILING[i];
        } else if i > 0 && fields[i] > FIELD_CEILING[i] {
            fields[i] = 0;
        } else {
            break;
        }
    }

    let stepped = Duration {
        days: fields[0],
        hours: fields[1],
        minutes: fields[2],
        seconds: fields[3],
    };

    Ok(stepped.to_string())
}

/// Outcome of advancing a clock widget by one tick.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum TickOutcome {
    /// Write the new display; keep ticking.
    Running(String),
    /// Write the new display; disable the widget.
    Stopped(String),
}

impl TickOutcome {
    /// The display text to write back, whichever way the tick went.
    pub fn display(&self) -> &str {
        match self {
            TickOutcome::Running(text) | TickOutcome::Stopped(text) => text,
        }
    }
}

/// One tick of a clock widget: read `display`, step it by `delta`, and
/// decide whether the widget stays live.
///
/// The widget stops when a countdown (`delta < 0`) reaches zero total
/// seconds, when a count-up (`delta > 0`) reaches or passes `ceiling`
/// (a total-seconds bound), or when the step produced no visible change
/// (the guard that keeps an expired or stuck value from ticking
/// forever). Malformed display text propagates the codec error; callers
/// should disable the widget on error too.
///
/// Scheduling stays with the caller: run one `tick` per visible widget
/// per second and stop the timer once every widget has stopped.
pub fn tick(display: &str, delta: i64, ceiling: Option<i64>) -> Result<TickOutcome, Error> {
    let next = step(display, delta)?;

    let finished = if next == display {
        true
    } else if delta < 0 {
        total_seconds(&next)? == 0
    } else {
        matches!(ceiling, Some(cap) if total_seconds(&next)? >= cap)
    };

    Ok(if finished {
        TickOutcome::Stopped(next)
    } else {
        TickOutcome::Running(next)
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    // -----------------------
    // Helpers
    // -----------------------

    fn ok(input: &str) -> Duration {
        parse(input).expect("should parse")
    }

    fn err(input: &str) -> ErrorKind {
        match parse(input) {
            Ok(_) => panic!("expected error"),
            Err(e) => e.kind,
        }
    }

    fn dhms(days: i64, hours: i64, minutes: i64, seconds: i64) -> Duration {
        Duration {
            days,
            hours,
            minutes,
            seconds,
        }
    }

    // -----------------------
    // Parsing
    // -----------------------

    #[test]
    fn parses_three_and_four_field_forms() {
        assert_eq!(ok("01:02:03"), dhms(0, 1, 2, 3));
        assert_eq!(ok("2:03:04:05"), dhms(2, 3, 4, 5));
    }

    #[test]
    fn strips_leading_zeros_and_surrounding_whitespace() {
        assert_eq!(ok("00:00:07"), dhms(0, 0, 0, 7));
        assert_eq!(ok(" 1 : 02 : 03 "), dhms(0, 1, 2, 3));
    }

    #[test]
    fn accepts_out_of_range_fields_as_given() {
        // Shape and numeracy only; no range validation.
        assert_eq!(ok("99:99:99"), dhms(0, 99, 99, 99));
    }

    #[test]
    fn rejects_wrong_field_counts() {
        assert!(matches!(err("bad"), ErrorKind::WrongFieldCount(1)));
        assert!(matches!(err("bad:input"), ErrorKind::WrongFieldCount(2)));
        assert!(matches!(err("1:2:3:4:5"), ErrorKind::WrongFieldCount(5)));
    }

    #[test]
    fn rejects_non_numeric_fields() {
        assert!(matches!(err("aa:bb:cc"), ErrorKind::NonNumericField));
        assert!(matches!(err("-1:00:00"), ErrorKind::NonNumericField));
        assert!(matches!(err("1::3"), ErrorKind::NonNumericField));
        assert!(matches!(err("01:02:3h"), ErrorKind::NonNumericField));
    }

    // -----------------------
    // Formatting
    // -----------------------

    #[test]
    fn round_trips_padded_display_forms() {
        assert_eq!(ok("01:02:03").to_string(), "01:02:03");
        assert_eq!(ok("2:03:04:05").to_string(), "2:03:04:05");
    }

    #[test]
    fn pads_unpadded_input_on_display() {
        assert_eq!(ok("1:2:3").to_string(), "01:02:03");
    }

    #[test]
    fn omits_a_zero_days_field() {
        // The documented non-round-trip case.
        assert_eq!(ok("0:01:02:03").to_string(), "01:02:03");
    }

    #[test]
    fn renders_negative_days_as_the_expired_string() {
        assert_eq!(dhms(-1, 23, 59, 59).to_string(), "00:00:00");
    }

    // -----------------------
    // Total seconds
    // -----------------------

    #[test]
    fn totals_both_display_forms() {
        assert_eq!(total_seconds("00:01:00").unwrap(), 60);
        assert_eq!(total_seconds("1:00:00:00").unwrap(), 86_400);
        assert_eq!(total_seconds("2:01:01:01").unwrap(), 176_461);
    }

    #[test]
    fn totals_propagate_parse_errors() {
        assert!(total_seconds("not a clock").is_err());
    }

    // -----------------------
    // Stepping
    // -----------------------

    #[test]
    fn steps_down_within_a_field() {
        assert_eq!(step("00:00:01", -1).unwrap(), "00:00:00");
    }

    #[test]
    fn steps_down_past_zero_to_the_expired_form() {
        let expired = step("00:00:00", -1).unwrap();
        assert_eq!(expired, "00:00:00");
        // And stepping the expired form again stays put.
        assert_eq!(step(&expired, -1).unwrap(), "00:00:00");
    }

    #[test]
    fn borrows_across_all_fields() {
        assert_eq!(step("1:00:00:00", -1).unwrap(), "23:59:59");
        assert_eq!(step("01:00:00", -1).unwrap(), "00:59:59");
    }

    #[test]
    fn carries_up_into_a_new_days_field() {
        assert_eq!(step("23:59:59", 1).unwrap(), "1:00:00:00");
        assert_eq!(step("00:59:59", 1).unwrap(), "01:00:00");
    }

    #[test]
    fn step_rejects_malformed_input() {
        assert!(step("nonsense", -1).is_err());
        assert!(step("1:2", 1).is_err());
    }

    // -----------------------
    // Ticking
    // -----------------------

    #[test]
    fn countdown_keeps_running_above_zero() {
        assert_eq!(
            tick("00:00:05", -1, None).unwrap(),
            TickOutcome::Running("00:00:04".to_string())
        );
    }

    #[test]
    fn countdown_stops_on_reaching_zero() {
        assert_eq!(
            tick("00:00:01", -1, None).unwrap(),
            TickOutcome::Stopped("00:00:00".to_string())
        );
    }

    #[test]
    fn unchanged_display_stops_the_widget() {
        // An already-expired value steps to itself.
        assert_eq!(
            tick("00:00:00", -1, None).unwrap(),
            TickOutcome::Stopped("00:00:00".to_string())
        );
    }

    #[test]
    fn count_up_stops_at_its_ceiling() {
        assert_eq!(
            tick("00:59:59", 1, Some(3600)).unwrap(),
            TickOutcome::Stopped("01:00:00".to_string())
        );
        assert_eq!(
            tick("00:59:59", 1, Some(7200)).unwrap(),
            TickOutcome::Running("01:00:00".to_string())
        );
    }

    #[test]
    fn count_up_without_a_ceiling_crosses_day_boundaries() {
        assert_eq!(
            tick("23:59:59", 1, None).unwrap(),
            TickOutcome::Running("1:00:00:00".to_string())
        );
    }

    #[test]
    fn tick_propagates_codec_errors() {
        assert!(tick("garbage", -1, None).is_err());
    }

    #[test]
    fn tick_outcome_exposes_its_display() {
        let outcome = tick("00:00:05", -1, None).unwrap();
        assert_eq!(outcome.display(), "00:00:04");
    }
}
