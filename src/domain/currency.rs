use rust_decimal::Decimal;
use rust_decimal_macros::dec;
use std::collections::HashMap;

/// All prices are stored in this currency; conversion happens only for
/// per-user display.
pub const BASE_CURRENCY: &str = "USD";

/// Fallback exchange rates (units of target currency per one base unit),
/// used when the user has not supplied an override.
fn default_rate(code: &str) -> Option<Decimal> {
    let rate = match code {
        "MWK" => dec!(1750),
        "ZMW" => dec!(27),
        "TZS" => dec!(2600),
        "UGX" => dec!(3700),
        "KES" => dec!(129),
        "NGN" => dec!(1550),
        "GHS" => dec!(15.5),
        "RWF" => dec!(1350),
        "ZAR" => dec!(18),
        _ => return None,
    };
    Some(rate)
}

/// Currencies with no minor unit in common usage; rendered without decimals.
fn is_whole_number(code: &str) -> bool {
    matches!(code, "MWK" | "TZS" | "UGX" | "RWF" | "XOF" | "XAF")
}

fn symbol(code: &str) -> &str {
    match code {
        "USD" => "$",
        "MWK" => "K",
        "ZMW" => "ZK",
        "TZS" => "TSh",
        "UGX" => "USh",
        "KES" => "KSh",
        "NGN" => "₦",
        "GHS" => "GH₵",
        "RWF" => "FRw",
        "ZAR" => "R",
        code => code,
    }
}

/// Converts a base-currency amount into `target`. User-supplied rates win
/// over the default table. An unknown currency returns the amount unchanged
/// rather than failing: display conversion must never block a page.
pub fn convert(amount: Decimal, target: &str, user_rates: &HashMap<String, Decimal>) -> Decimal {
    if target == BASE_CURRENCY {
        return amount;
    }
    if let Some(rate) = user_rates.get(target) {
        return amount * rate;
    }
    match default_rate(target) {
        Some(rate) => amount * rate,
        None => amount,
    }
}

/// Renders a display string for `amount` in `code`: grouped thousands, two
/// decimals for minor-unit currencies, none for whole-number ones. Midpoints
/// round to even (`rust_decimal`'s default strategy).
pub fn format(amount: Decimal, code: &str) -> String {
    let symbol = symbol(code);
    if is_whole_number(code) {
        let rounded = amount.round_dp(0);
        format!("{symbol}{}", group_digits(&rounded.trunc().to_string()))
    } else {
        let rounded = amount.round_dp(2);
        let rendered = format!("{rounded:.2}");
        let (integral, fraction) = rendered
            .split_once('.')
            .unwrap_or((rendered.as_str(), "00"));
        format!("{symbol}{}.{fraction}", group_digits(integral))
    }
}

/// Inserts a comma every three digits, counting from the right. Keeps a
/// leading minus sign intact.
fn group_digits(integral: &str) -> String {
    let (sign, digits) = match integral.strip_prefix('-') {
        Some(rest) => ("-", rest),
        None => ("", integral),
    };
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }
    format!("{sign}{grouped}")
}
