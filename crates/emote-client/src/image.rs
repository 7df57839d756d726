//! Preview image selection.

use crate::models::ImageVariant;

/// Leading integer of a size label (`"4x"` -> 4).
///
/// Leading whitespace and a sign are accepted; labels that do not start with
/// a digit have no rank.
fn size_rank(label: &str) -> Option<i64> {
    let s = label.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };

    let digits = rest.split(|c: char| !c.is_ascii_digit()).next()?;
    if digits.is_empty() {
        return None;
    }

    let value = digits.bytes().fold(0i64, |acc, d| {
        acc.saturating_mul(10).saturating_add(i64::from(d - b'0'))
    });
    Some(if negative { -value } else { value })
}

/// Pick the variant with the largest numeric size label.
///
/// Ties keep the earliest variant. Unranked labels lose to any ranked one.
pub fn best_variant(variants: &[ImageVariant]) -> Option<&ImageVariant> {
    let mut best: Option<(&ImageVariant, Option<i64>)> = None;
    for variant in variants {
        let rank = size_rank(&variant.size_label);
        match best {
            Some((_, current)) if rank <= current => {}
            _ => best = Some((variant, rank)),
        }
    }
    best.map(|(variant, _)| variant)
}
