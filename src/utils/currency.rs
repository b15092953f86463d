use rust_decimal::{Decimal, RoundingStrategy};

const CURRENCY_SYMBOL: &str = "₹";

/// Formats an amount as Indian rupees: `₹1,23,456.50`.
pub fn format_price(amount: Decimal) -> String {
    let mut value = amount
        .round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero)
        .abs();
    value.rescale(2);

    let text = value.to_string();
    let (whole, fraction) = text.split_once('.').unwrap_or((text.as_str(), "00"));

    let sign = if amount.is_sign_negative() && !value.is_zero() {
        "-"
    } else {
        ""
    };

    format!("{}{}{}.{}", sign, CURRENCY_SYMBOL, group_indian(whole), fraction)
}

/// Last three digits form one group, every group before that has two.
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups: Vec<&str> = Vec::new();
    let mut end = head.len();
    while end > 0 {
        let start = end.saturating_sub(2);
        groups.push(&head[start..end]);
        end = start;
    }
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
