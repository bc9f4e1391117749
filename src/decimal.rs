//! Exact expansion of scientific notation into fixed-point text.
//!
//! Spreadsheet and text exports abbreviate long digit strings as
//! `4.123456789012345e+15`. Expanding through `f64` would round anything past
//! 17 significant digits, so the decimal point is shifted on the digits
//! themselves instead.

/// Longest expansion we are willing to build. Nothing this long can be a card.
pub const MAX_EXPANDED_LEN: usize = 64;

/// Expands `text` (mantissa, `e`/`E`, signed exponent) into fixed-point form.
///
/// Returns `None` when either part is not a plain number (for example when it
/// carries the internal hyphens or spaces the coarse numeric check tolerates)
/// or when the result would exceed [`MAX_EXPANDED_LEN`].
pub fn expand_exponential(text: &str) -> Option<String> {
    let (mantissa, exponent) = text.split_once(['e', 'E'])?;
    let exponent: i64 = exponent.parse().ok()?;

    let mantissa = mantissa.trim_start_matches(' ');
    let (negative, mantissa) = match mantissa.as_bytes().first().copied()? {
        b'-' => (true, &mantissa[1..]),
        b'+' => (false, &mantissa[1..]),
        _ => (false, mantissa),
    };

    let (int_part, frac_part) = mantissa.split_once('.').unwrap_or((mantissa, ""));
    if int_part.is_empty() && frac_part.is_empty() {
        return None;
    }
    if !int_part.bytes().chain(frac_part.bytes()).all(|b| b.is_ascii_digit()) {
        return None;
    }

    let digits = format!("{int_part}{frac_part}");
    let leading_zeros = digits.bytes().take_while(|&b| b == b'0').count();
    let significant = digits[leading_zeros..].trim_end_matches('0');

    let sign = if negative { "-" } else { "" };
    if significant.is_empty() {
        return Some(format!("{sign}0"));
    }

    // Position of the decimal point relative to the start of `significant`.
    let point = (int_part.len() as i64)
        .checked_sub(leading_zeros as i64)?
        .checked_add(exponent)?;

    let len = significant.len() as u64;
    let expanded_len = if point <= 0 {
        point.unsigned_abs().saturating_add(2 + len)
    } else if point as u64 >= len {
        point as u64
    } else {
        len + 1
    };
    if expanded_len > MAX_EXPANDED_LEN as u64 {
        return None;
    }

    let expanded = if point <= 0 {
        format!("0.{}{significant}", "0".repeat(point.unsigned_abs() as usize))
    } else {
        let point = point as usize;
        if point >= significant.len() {
            format!("{significant}{}", "0".repeat(point - significant.len()))
        } else {
            format!("{}.{}", &significant[..point], &significant[point..])
        }
    };

    Some(format!("{sign}{expanded}"))
}
