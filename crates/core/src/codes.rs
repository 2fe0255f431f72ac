//! 6-digit code generation and the triviality filter.
//!
//! Activity join PINs and user access codes share the same shape: a uniform
//! random draw from `100000..=999999`, redrawn while the result is a trivial
//! sequence. Uniqueness against the owning namespace is the caller's job
//! (see `tally-store::codes`).

use rand::Rng;

/// Inclusive bounds of the usable code range.
const CODE_MIN: u32 = 100_000;
const CODE_MAX: u32 = 999_999;

/// Draw a random 6-digit code, redrawing until it passes the triviality
/// filter. The redraw loop terminates quickly: trivial sequences make up a
/// negligible fraction of the range.
pub fn generate_code<R: Rng + ?Sized>(rng: &mut R) -> String {
    loop {
        let code = rng.random_range(CODE_MIN..=CODE_MAX).to_string();
        if !is_trivial_code(&code) {
            return code;
        }
    }
}

/// A code is trivial when all six digits are identical (`111111`), or the
/// digits step by exactly +1 (`123456`) or -1 (`654321`) from left to right.
/// `112233` is not trivial.
pub fn is_trivial_code(code: &str) -> bool {
    let bytes = code.as_bytes();
    if bytes.len() != 6 || !bytes.iter().all(u8::is_ascii_digit) {
        return false;
    }
    let all_same = bytes.windows(2).all(|w| w[1] == w[0]);
    let ascending = bytes.windows(2).all(|w| w[1] == w[0] + 1);
    let descending = bytes.windows(2).all(|w| w[1] + 1 == w[0]);
    all_same || ascending || descending
}

/// Whether `code` is exactly six ASCII digits.
pub fn is_valid_code_format(code: &str) -> bool {
    code.len() == 6 && code.bytes().all(|b| b.is_ascii_digit())
}
