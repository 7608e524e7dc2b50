//! Value filters applied to accepted payloads before storage

/// Decimal places kept on currency amounts
pub const CURRENCY_DECIMALS: u32 = 2;

/// Round a number to `decimals` places, halves away from zero
///
/// Rounding works on the shortest decimal representation of `num`, so a
/// value written as `9.995` rounds to `10.0` even though its binary
/// approximation lies slightly below the half.
pub fn round_decimals(num: f64, decimals: u32) -> f64 {
    if !num.is_finite() {
        return num;
    }

    let repr = num.abs().to_string();
    let (int_part, frac_part) = repr.split_once('.').unwrap_or((repr.as_str(), ""));
    let decimals = decimals as usize;
    if frac_part.len() <= decimals {
        return num;
    }

    let kept = format!("{int_part}{}", &frac_part[..decimals]);
    let Ok(mut scaled) = kept.parse::<u128>() else {
        return num;
    };
    if frac_part.as_bytes()[decimals] >= b'5' {
        scaled += 1;
    }

    let rounded = scaled as f64 / 10_f64.powi(decimals as i32);
    rounded.copysign(num)
}

/// Round a currency amount to 2 decimal places
pub fn round_currency(amount: f64) -> f64 {
    round_decimals(amount, CURRENCY_DECIMALS)
}
