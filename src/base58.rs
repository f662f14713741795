//! Base58 encoder and decoder over the Bitcoin alphabet
//!
//! Leading zero bytes map one-to-one to leading `'1'` characters; the rest
//! of the input is treated as a big-endian unsigned integer and converted
//! positionally.

use crate::constants::BASE58_ALPHABET;
use crate::error::{CodecError, Result};
use num_bigint::BigUint;
use num_traits::{ToPrimitive, Zero};

const BASE: u32 = 58;

/// Reverse lookup from ASCII byte to digit value
static BASE58_DIGITS: [Option<u8>; 128] = build_digits();

const fn build_digits() -> [Option<u8>; 128] {
    let mut digits = [None; 128];
    let mut i = 0;
    while i < BASE58_ALPHABET.len() {
        digits[BASE58_ALPHABET[i] as usize] = Some(i as u8);
        i += 1;
    }
    digits
}

fn digit_value(c: u8) -> Option<u32> {
    BASE58_DIGITS
        .get(c as usize)
        .copied()
        .flatten()
        .map(u32::from)
}

/// Encode bytes as base58
pub fn encode(data: &[u8]) -> String {
    let zeros = data.iter().take_while(|&&b| b == 0).count();

    let mut n = BigUint::from_bytes_be(data);
    let base = BigUint::from(BASE);
    let mut digits = Vec::new();
    while !n.is_zero() {
        let rem = (&n % &base).to_usize().unwrap_or(0);
        n /= &base;
        digits.push(BASE58_ALPHABET[rem]);
    }

    let mut out = String::with_capacity(zeros + digits.len());
    out.extend(std::iter::repeat(BASE58_ALPHABET[0] as char).take(zeros));
    out.extend(digits.iter().rev().map(|&d| d as char));
    out
}

/// Decode a base58 string
pub fn decode(s: &str) -> Result<Vec<u8>> {
    let zero_symbol = BASE58_ALPHABET[0] as char;
    let zeros = s.chars().take_while(|&c| c == zero_symbol).count();

    let mut n = BigUint::zero();
    for c in s.chars().skip(zeros) {
        let digit = u8::try_from(c)
            .ok()
            .and_then(digit_value)
            .ok_or(CodecError::InvalidCharacter(c))?;
        n = n * BASE + digit;
    }

    let mut out = vec![0u8; zeros];
    if !n.is_zero() {
        out.extend(n.to_bytes_be());
    }
    Ok(out)
}
