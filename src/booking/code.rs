//! Booking code generation

use chrono::Utc;
use rand::Rng;

const CODE_ALPHABET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Generate a booking code candidate: the last 8 digits of the unix-millis
/// timestamp followed by random uppercase alphanumerics up to `length`.
/// The timestamp prefix makes same-millisecond collisions the only ones the
/// caller has to probe the database for.
pub fn generate_code(length: usize) -> String {
    let millis = Utc::now().timestamp_millis().to_string();
    let ts_part: String = if millis.len() > 8 {
        millis[millis.len() - 8..].to_string()
    } else {
        millis
    };

    let random_len = length.saturating_sub(ts_part.len());
    format!("{}{}", ts_part, random_tail(random_len))
}

/// Extend a colliding code with extra random characters
pub fn extend_code(code: &str) -> String {
    format!("{}{}", code, random_tail(4))
}

fn random_tail(len: usize) -> String {
    let mut rng = rand::thread_rng();
    (0..len)
        .map(|_| CODE_ALPHABET[rng.gen_range(0..CODE_ALPHABET.len())] as char)
        .collect()
}
