/// Parses clinical "years;months" notation into months.
///
/// Anything that is not exactly two non-negative integers separated by `;`
/// yields 0.
pub fn parse_age_months(input: &str) -> u32 {
    let mut parts = input.split(';');
    let (Some(years), Some(months), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0;
    };

    match (years.trim().parse::<u32>(), months.trim().parse::<u32>()) {
        (Ok(years), Ok(months)) => years.saturating_mul(12).saturating_add(months),
        _ => 0,
    }
}

pub fn format_age(age_months: u32) -> String {
    format!("{};{}", age_months / 12, age_months % 12)
}
