//! Parser for quantifier strings such as `{2}`, `{1,3}`, `{2,}` and `{,4}`.

use fql_foundation::{CountProblem, CountRange, Error, Result};

/// Parses a count string into a [`CountRange`].
///
/// | input   | range        |
/// |---------|--------------|
/// | `{n}`   | `n..=n`      |
/// | `{n,m}` | `n..=m`      |
/// | `{n,}`  | `n..`        |
/// | `{,m}`  | `0..=m`      |
///
/// Whitespace around the numbers is ignored.
///
/// # Errors
///
/// Returns an `InvalidCount` error if the braces are missing, the string
/// has more than one comma, a component is not an integer, nothing is
/// declared at all, or the lower bound exceeds the upper bound.
///
/// # Examples
///
/// ```
/// use fql_foundation::CountRange;
/// use fql_language::parse_count;
///
/// assert_eq!(parse_count("{2,}").unwrap(), CountRange::at_least(2));
/// assert_eq!(parse_count("{,4}").unwrap(), CountRange::new(0, 4));
/// ```
pub fn parse_count(input: &str) -> Result<CountRange> {
    let fail = |reason| Error::invalid_count(input, reason);

    let inner = input
        .trim()
        .strip_prefix('{')
        .and_then(|rest| rest.strip_suffix('}'))
        .ok_or_else(|| fail(CountProblem::MissingBraces))?;

    let parts: Vec<&str> = inner.split(',').map(str::trim).collect();
    let range = match parts.as_slice() {
        [single] => {
            let n = parse_bound(single)
                .map_err(fail)?
                .ok_or_else(|| fail(CountProblem::Empty))?;
            CountRange::exactly(n)
        }
        [lower, upper] => {
            let min = parse_bound(lower).map_err(fail)?.unwrap_or(0);
            match parse_bound(upper).map_err(fail)? {
                Some(max) => CountRange::new(min, max),
                None => CountRange::at_least(min),
            }
        }
        _ => return Err(fail(CountProblem::TooManyCommas)),
    };

    if !range.satisfies_max(range.min) {
        return Err(fail(CountProblem::Inverted));
    }
    Ok(range)
}

/// An empty component is an omitted bound.
fn parse_bound(part: &str) -> std::result::Result<Option<usize>, CountProblem> {
    if part.is_empty() {
        return Ok(None);
    }
    if !part.bytes().all(|b| b.is_ascii_digit()) {
        return Err(CountProblem::OnlyIntegers);
    }
    part.parse()
        .map(Some)
        .map_err(|_| CountProblem::OnlyIntegers)
}
