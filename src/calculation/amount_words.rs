//! Amount-to-words conversion.
//!
//! Spells a monetary amount in English words for the "in words" line of a
//! payslip: the whole units as words, followed by the cents as a fraction
//! (`and 56/100`) when they are non-zero.

use crate::models::Money;

const ONES: [&str; 10] = [
    "", "One", "Two", "Three", "Four", "Five", "Six", "Seven", "Eight", "Nine",
];

const TEENS: [&str; 10] = [
    "Ten",
    "Eleven",
    "Twelve",
    "Thirteen",
    "Fourteen",
    "Fifteen",
    "Sixteen",
    "Seventeen",
    "Eighteen",
    "Nineteen",
];

const TENS: [&str; 10] = [
    "", "", "Twenty", "Thirty", "Forty", "Fifty", "Sixty", "Seventy", "Eighty", "Ninety",
];

/// Scale words for successive base-1000 groups, enough for any `u128`.
const SCALES: [&str; 13] = [
    "",
    "Thousand",
    "Million",
    "Billion",
    "Trillion",
    "Quadrillion",
    "Quintillion",
    "Sextillion",
    "Septillion",
    "Octillion",
    "Nonillion",
    "Decillion",
    "Undecillion",
];

/// Converts a monetary amount to English words.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::amount_to_words;
/// use payslip_engine::models::Money;
/// use std::str::FromStr;
///
/// assert_eq!(amount_to_words(Money::zero()), "Zero");
/// assert_eq!(
///     amount_to_words(Money::from_str("1234.56").unwrap()),
///     "One Thousand Two Hundred Thirty Four and 56/100"
/// );
/// ```
pub fn amount_to_words(amount: Money) -> String {
    let whole = whole_to_words(amount.whole_units());
    let mut words = if amount.is_negative() {
        format!("Negative {}", whole)
    } else {
        whole
    };

    let cents = amount.cents();
    if cents > 0 {
        words.push_str(&format!(" and {:02}/100", cents));
    }
    words
}

/// Converts a signed integer to English words.
///
/// # Examples
///
/// ```
/// use payslip_engine::calculation::integer_to_words;
///
/// assert_eq!(integer_to_words(0), "Zero");
/// assert_eq!(integer_to_words(115), "One Hundred Fifteen");
/// assert_eq!(integer_to_words(-42), "Negative Forty Two");
/// ```
pub fn integer_to_words(n: i128) -> String {
    if n < 0 {
        format!("Negative {}", whole_to_words(n.unsigned_abs()))
    } else {
        whole_to_words(n.unsigned_abs())
    }
}

fn whole_to_words(mut n: u128) -> String {
    if n == 0 {
        return "Zero".to_string();
    }

    let mut groups: Vec<String> = Vec::new();
    let mut scale = 0;
    while n > 0 {
        let group = (n % 1000) as u32;
        if group != 0 {
            let mut words = group_to_words(group);
            if scale > 0 {
                words.push(' ');
                words.push_str(SCALES[scale]);
            }
            groups.push(words);
        }
        n /= 1000;
        scale += 1;
    }

    groups.reverse();
    groups.join(" ")
}

/// Spells a group in 1..=999.
fn group_to_words(group: u32) -> String {
    let mut parts: Vec<&str> = Vec::with_capacity(3);

    let hundreds = (group / 100) as usize;
    if hundreds > 0 {
        parts.push(ONES[hundreds]);
        parts.push("Hundred");
    }

    let remainder = (group % 100) as usize;
    match remainder {
        20..=99 => {
            parts.push(TENS[remainder / 10]);
            if remainder % 10 > 0 {
                parts.push(ONES[remainder % 10]);
            }
        }
        10..=19 => parts.push(TEENS[remainder - 10]),
        1..=9 => parts.push(ONES[remainder]),
        _ => {}
    }

    parts.join(" ")
}
