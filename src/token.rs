//! Token equality with numeric tolerance.
//!
//! Two tokens are equal when their text is identical, or when both read as
//! numbers whose difference is within the configured tolerance:
//!
//! ```text
//! |a - b| <= aeps + reps * |b|
//! ```
//!
//! The relative term scales with the second operand only, so the accepted
//! band depends on operand order. The second token is treated as the
//! reference value. This asymmetry is deliberate and must not be
//! symmetrized: `("90", "100")` can be equal while `("100", "90")` is not.
//!
//! # Examples
//!
//! ```
//! use numdiff_rs::options::ComparisonOptions;
//! use numdiff_rs::token::tokens_equal;
//!
//! let options = ComparisonOptions::default();
//! assert!(tokens_equal("1.00000000001", "1", &options));
//! assert!(tokens_equal("2.5E+03", "2500", &options));
//! assert!(!tokens_equal("1.1", "1.2", &options));
//! assert!(!tokens_equal("abc", "abd", &options));
//! ```

use crate::options::ComparisonOptions;

/// How a pair of tokens was judged.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenVerdict {
    /// The text is identical
    Literal,
    /// Different text, same number within tolerance
    Tolerated,
    /// Not equal
    Differ,
}

impl TokenVerdict {
    pub fn is_equal(&self) -> bool {
        !matches!(self, TokenVerdict::Differ)
    }
}

/// Compares tokens with the tolerances of one [`ComparisonOptions`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TokenComparator {
    pub aeps: f64,
    pub reps: f64,
    /// Trim surrounding whitespace before the literal comparison
    pub trim: bool,
}

impl TokenComparator {
    pub fn new(options: &ComparisonOptions) -> Self {
        Self {
            aeps: options.aeps,
            reps: options.reps,
            trim: options.ignore_space_change,
        }
    }

    pub fn compare(&self, first: &str, second: &str) -> TokenVerdict {
        let (first, second) = if self.trim {
            (first.trim(), second.trim())
        } else {
            (first, second)
        };

        if first == second {
            return TokenVerdict::Literal;
        }

        if looks_like_float(first) || looks_like_float(second) {
            if let (Ok(a), Ok(b)) = (first.trim().parse::<f64>(), second.trim().parse::<f64>()) {
                return self.verdict(a, b);
            }
        }

        if looks_like_integer(first) || looks_like_integer(second) {
            if let (Ok(a), Ok(b)) = (first.trim().parse::<i128>(), second.trim().parse::<i128>()) {
                return self.verdict(a as f64, b as f64);
            }
        }

        TokenVerdict::Differ
    }

    pub fn equals(&self, first: &str, second: &str) -> bool {
        self.compare(first, second).is_equal()
    }

    fn verdict(&self, a: f64, b: f64) -> TokenVerdict {
        if within_tolerance(a, b, self.aeps, self.reps) {
            TokenVerdict::Tolerated
        } else {
            TokenVerdict::Differ
        }
    }
}

/// Compares two tokens using the tolerances in `options`.
pub fn tokens_equal(first: &str, second: &str, options: &ComparisonOptions) -> bool {
    TokenComparator::new(options).equals(first, second)
}

/// The tolerance test. `b` is the reference value.
///
/// ```
/// use numdiff_rs::token::within_tolerance;
///
/// assert!(within_tolerance(90.0, 100.0, 0.0, 0.105));
/// assert!(!within_tolerance(100.0, 90.0, 0.0, 0.105));
/// ```
pub fn within_tolerance(a: f64, b: f64, aeps: f64, reps: f64) -> bool {
    // Equal infinities have an undefined difference.
    if a == b {
        return true;
    }
    if a.is_infinite() || b.is_infinite() {
        return false;
    }
    (a - b).abs() <= aeps + reps * b.abs()
}

/// True if the token starts like a floating point literal:
/// `\s*[-+]?(\d+(\.\d*)?|\d*\.\d+)([eE][-+]?\d+)?`. Only the start of the
/// token is matched.
pub fn looks_like_float(token: &str) -> bool {
    let rest = skip_sign(token.trim_start());
    let mut chars = rest.chars();
    match chars.next() {
        Some(c) if c.is_ascii_digit() => true,
        Some('.') => chars.next().is_some_and(|c| c.is_ascii_digit()),
        _ => false,
    }
}

/// True if the token starts like an integer literal: `\s*[-+]?\d+` not
/// followed by `.`, `e` or `E`. A run of two or more digits always matches,
/// because a shorter run is followed by a digit.
pub fn looks_like_integer(token: &str) -> bool {
    let rest = skip_sign(token.trim_start());
    let digits = rest.chars().take_while(|c| c.is_ascii_digit()).count();
    match digits {
        0 => false,
        1 => !matches!(rest[1..].chars().next(), Some('.' | 'e' | 'E')),
        _ => true,
    }
}

fn skip_sign(s: &str) -> &str {
    s.strip_prefix(['-', '+']).unwrap_or(s)
}
