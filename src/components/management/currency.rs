/// Format an amount in rupees with Indian digit grouping and no decimals,
/// e.g. `₹5,00,000`.
pub fn format_currency(amount: f64) -> String {
    if !amount.is_finite() {
        return "₹0".to_string();
    }

    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    format!("{}₹{}", sign, group_indian(&digits))
}

// Last three digits form one group, the rest are grouped in pairs
fn group_indian(digits: &str) -> String {
    if digits.len() <= 3 {
        return digits.to_string();
    }

    let (head, tail) = digits.split_at(digits.len() - 3);
    let mut groups = Vec::new();
    let mut rest = head;
    while rest.len() > 2 {
        let (front, pair) = rest.split_at(rest.len() - 2);
        groups.push(pair);
        rest = front;
    }
    groups.push(rest);
    groups.reverse();

    format!("{},{}", groups.join(","), tail)
}
