use std::fmt;
use std::time::Duration;

use url::Url;

use super::types::Phase;

const DURATION_FLAG: &str = "-z";
const CONCURRENCY_FLAG: &str = "-c";
const RATE_FLAG: &str = "-q";

const NANOS_PER_MICRO: u128 = 1_000;
const NANOS_PER_MILLI: u128 = 1_000_000;
const NANOS_PER_SECOND: u128 = 1_000_000_000;
const SECONDS_PER_MINUTE: u64 = 60;
const SECONDS_PER_HOUR: u64 = 3_600;

/// Fully resolved command line for one phase.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Invocation {
    program: String,
    args: Vec<String>,
}

impl Invocation {
    /// Encodes `phase` as `-z <duration> [-c <n>] [-q <n>] <url>`.
    ///
    /// Flag order is fixed so the logged command line reproduces the run.
    #[must_use]
    pub fn for_phase(program: &str, phase: &Phase, target: &Url) -> Self {
        let mut args = vec![DURATION_FLAG.to_owned(), format_duration(phase.duration)];
        if let Some(connections) = phase.connections {
            args.push(CONCURRENCY_FLAG.to_owned());
            args.push(connections.to_string());
        }
        if let Some(rate) = phase.rate {
            args.push(RATE_FLAG.to_owned());
            args.push(rate.to_string());
        }
        args.push(target.as_str().to_owned());

        Self {
            program: program.to_owned(),
            args,
        }
    }

    #[must_use]
    pub fn program(&self) -> &str {
        &self.program
    }

    #[must_use]
    pub fn args(&self) -> &[String] {
        &self.args
    }
}

impl fmt::Display for Invocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.program)?;
        for arg in &self.args {
            write!(f, " {}", arg)?;
        }
        Ok(())
    }
}

/// Formats a duration the way Go's `time.Duration` prints it (`1m30s`,
/// `1h0m0s`, `1.5s`, `250ms`), which is what `hey -z` parses.
#[must_use]
pub fn format_duration(duration: Duration) -> String {
    let total_nanos = duration.as_nanos();
    if total_nanos == 0 {
        return "0s".to_owned();
    }

    if total_nanos < NANOS_PER_SECOND {
        if total_nanos < NANOS_PER_MICRO {
            return format!("{}ns", total_nanos);
        }
        if total_nanos < NANOS_PER_MILLI {
            return format!("{}µs", decimal(total_nanos, NANOS_PER_MICRO, 3));
        }
        return format!("{}ms", decimal(total_nanos, NANOS_PER_MILLI, 6));
    }

    let secs = duration.as_secs();
    let hours = secs / SECONDS_PER_HOUR;
    let minutes = (secs % SECONDS_PER_HOUR) / SECONDS_PER_MINUTE;
    let seconds = decimal(
        u128::from(secs % SECONDS_PER_MINUTE)
            .saturating_mul(NANOS_PER_SECOND)
            .saturating_add(u128::from(duration.subsec_nanos())),
        NANOS_PER_SECOND,
        9,
    );

    if hours > 0 {
        format!("{}h{}m{}s", hours, minutes, seconds)
    } else if minutes > 0 {
        format!("{}m{}s", minutes, seconds)
    } else {
        format!("{}s", seconds)
    }
}

/// Renders `value / scale` with up to `precision` fractional digits, trailing zeros dropped.
fn decimal(value: u128, scale: u128, precision: usize) -> String {
    let whole = value.checked_div(scale).unwrap_or_default();
    let fraction = value.checked_rem(scale).unwrap_or_default();
    if fraction == 0 {
        return whole.to_string();
    }
    let digits = format!("{:0width$}", fraction, width = precision);
    format!("{}.{}", whole, digits.trim_end_matches('0'))
}
