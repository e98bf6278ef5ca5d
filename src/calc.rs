//! Eleven-year investment projection for a resort unit.
//!
//! The projection combines two income streams for every year from 2025 to 2035: capital growth of
//! the unit value and, from 2028 on, net rental income.  [`report_record`] turns a projection into
//! the display strings consumed by [`crate::builder`].

use std::fmt::Write as _;

use crate::record::{InputRecord, YearRecord};

/// First projected year.
pub const FIRST_YEAR: u16 = 2025;
/// Last projected year.
pub const LAST_YEAR: u16 = 2035;
/// Share of gross rental income consumed by operating expenses.
pub const EXPENSES_SHARE: f64 = 0.50;

const RENTAL_START: u16 = 2028;

/// Nightly rate per square metre for the rental years.
fn rate_per_m2(year: u16) -> f64 {
    match year {
        2028 => 501.0,
        2029 => 546.0,
        2030 => 594.0,
        2031 => 648.0,
        2032 => 704.0,
        2033 => 766.0,
        2034 => 834.0,
        2035 => 907.0,
        _ => 0.0,
    }
}

/// Occupancy in percent.
fn occupancy(year: u16) -> f64 {
    match year {
        2028 => 40.0,
        2029 => 60.0,
        2030..=2035 => 70.0,
        _ => 0.0,
    }
}

fn days_in_year(year: u16) -> f64 {
    match year {
        2028 | 2032 => 366.0,
        _ => 365.0,
    }
}

/// Growth rate applied to the value accumulated so far.
fn growth_rate(year: u16) -> f64 {
    match year {
        2025 => 0.18,
        2026 | 2027 => 0.20,
        2028 => 0.10,
        _ => 0.088,
    }
}

/// One projected year.
#[derive(Clone, Debug, PartialEq)]
pub struct ProjectedYear {
    pub year: u16,
    /// Net rental income, truncated to whole roubles.
    pub rental_profit: i64,
    /// Value growth, truncated to whole roubles.
    pub growth_profit: i64,
    pub cumulative_profit: i64,
    /// Unit value at the end of the year.
    pub current_value: i64,
    pub rental_pct: f64,
    pub growth_pct: f64,
    pub total_pct: f64,
}

/// Full projection for one unit.
#[derive(Clone, Debug, PartialEq)]
pub struct Projection {
    pub area: f64,
    pub price_m2: u64,
    /// Purchase cost, `area × price_m2`.
    pub cost: i64,
    pub years: Vec<ProjectedYear>,
    pub total_rental: i64,
    pub total_growth: i64,
    pub total_profit: i64,
    pub final_value: i64,
    pub avg_annual_pct: f64,
    pub roi_pct: f64,
}

/// Derives the price per square metre from a total price, truncating to whole roubles.
pub fn price_m2_from_total(price: u64, area: f64) -> u64 {
    if area > 0.0 {
        (price as f64 / area) as u64
    } else {
        0
    }
}

/// Projects the returns of a unit of `area` square metres bought at `price_m2` per metre.
pub fn calculate(area: f64, price_m2: u64) -> Projection {
    let cost = area * price_m2 as f64;
    let share_of_cost = |value: f64| if cost > 0.0 { value / cost * 100.0 } else { 0.0 };

    let mut accumulated_growth = 0.0;
    let mut cumulative_profit = 0.0;
    let mut years = Vec::with_capacity(usize::from(LAST_YEAR - FIRST_YEAR + 1));

    for year in FIRST_YEAR..=LAST_YEAR {
        let growth = (cost + accumulated_growth) * growth_rate(year);
        accumulated_growth += growth;

        let rental = if year >= RENTAL_START {
            let gross = days_in_year(year) * rate_per_m2(year) * area / 100.0 * occupancy(year);
            gross * (1.0 - EXPENSES_SHARE)
        } else {
            0.0
        };

        cumulative_profit = cumulative_profit + rental + growth;
        let rental_pct = share_of_cost(rental);
        let growth_pct = share_of_cost(growth);

        years.push(ProjectedYear {
            year,
            rental_profit: rental as i64,
            growth_profit: growth as i64,
            cumulative_profit: cumulative_profit as i64,
            current_value: (cost + accumulated_growth) as i64,
            rental_pct,
            growth_pct,
            total_pct: rental_pct + growth_pct,
        });
    }

    let total_rental = years
        .iter()
        .fold(0_i64, |sum, y| sum.saturating_add(y.rental_profit));
    let total_growth = years
        .iter()
        .fold(0_i64, |sum, y| sum.saturating_add(y.growth_profit));
    let total_profit = total_rental.saturating_add(total_growth);
    let avg_annual_pct = years.iter().map(|y| y.total_pct).sum::<f64>() / years.len() as f64;

    Projection {
        area,
        price_m2,
        cost: cost as i64,
        total_rental,
        total_growth,
        total_profit,
        final_value: (cost + accumulated_growth) as i64,
        avg_annual_pct,
        roi_pct: share_of_cost(total_profit as f64),
        years,
    }
}

/// Groups digits by thousands with spaces, e.g. `21 726 000`.
pub fn group_thousands(value: i64) -> String {
    let digits = value.unsigned_abs().to_string();
    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3 + 1);
    if value < 0 {
        grouped.push('-');
    }
    for (index, digit) in digits.chars().enumerate() {
        if index > 0 && (digits.len() - index) % 3 == 0 {
            grouped.push(' ');
        }
        grouped.push(digit);
    }
    grouped
}

fn roubles(value: i64) -> String {
    format!("{} ₽", group_thousands(value))
}

/// Prices above `i64::MAX` are clamped rather than wrapped.
fn price_roubles(price: u64) -> String {
    roubles(i64::try_from(price).unwrap_or(i64::MAX))
}

/// Normalizes a unit code: trimmed, upper-cased, with Cyrillic letters that look like Latin ones
/// replaced by their Latin twins, so `в200` becomes `B200`.
pub fn latin_code(code: &str) -> String {
    code.trim()
        .to_uppercase()
        .chars()
        .map(|c| match c {
            'А' => 'A',
            'В' => 'B',
            'Е' => 'E',
            'К' => 'K',
            'М' => 'M',
            'Н' => 'H',
            'О' => 'O',
            'Р' => 'P',
            'С' => 'S',
            'Т' => 'T',
            other => other,
        })
        .collect()
}

/// Formats an area the way it is printed on price lists: always with a fractional part.
pub fn format_area(area: f64) -> String {
    if area.fract() == 0.0 && area.is_finite() {
        format!("{area:.1}")
    } else {
        area.to_string()
    }
}

/// Converts a projection into the input record of the report for unit `code`.
pub fn report_record(code: &str, projection: &Projection) -> InputRecord {
    let area = format_area(projection.area);
    let years = projection
        .years
        .iter()
        .map(|year| YearRecord {
            year: year.year.to_string(),
            rental: if year.rental_profit > 0 {
                roubles(year.rental_profit)
            } else {
                "—".to_string()
            },
            growth: roubles(year.growth_profit),
            total_pct: format!("{:.1}%", year.total_pct),
        })
        .collect();

    InputRecord {
        title: format!("Лот {code} ({area} м²)"),
        area: format!("{area} м²"),
        price_m2: price_roubles(projection.price_m2),
        price: roubles(projection.cost),
        years,
        total_rental: roubles(projection.total_rental),
        total_growth: roubles(projection.total_growth),
        total_profit: roubles(projection.total_profit),
        roi_pct: format!("{:.0}%", projection.roi_pct),
        avg_annual_pct: format!("{:.1}%", projection.avg_annual_pct),
        final_value: roubles(projection.final_value),
    }
}

/// Short plain-text summary of a projection, suitable for a chat message or a terminal.
pub fn summary_text(code: &str, projection: &Projection) -> String {
    let mut text = String::new();
    // Writing into a String cannot fail.
    let _ = writeln!(text, "Инвестиционный расчёт: {code}");
    let _ = writeln!(text);
    let _ = writeln!(text, "Площадь: {} м²", format_area(projection.area));
    let _ = writeln!(text, "Цена за м²: {}", price_roubles(projection.price_m2));
    let _ = writeln!(text, "Стоимость: {}", roubles(projection.cost));
    let _ = writeln!(text);
    let _ = writeln!(text, "Итого за 11 лет ({FIRST_YEAR}-{LAST_YEAR}):");
    let _ = writeln!(text, "- Прибыль от аренды: {}", roubles(projection.total_rental));
    let _ = writeln!(text, "- Прибыль от роста: {}", roubles(projection.total_growth));
    let _ = writeln!(text, "- Общая прибыль: {}", roubles(projection.total_profit));
    let _ = writeln!(text);
    let _ = writeln!(text, "Доходность: {:.0}% за 11 лет", projection.roi_pct);
    let _ = writeln!(text, "Средняя годовая: {:.1}%", projection.avg_annual_pct);
    let _ = write!(
        text,
        "Стоимость в {LAST_YEAR}: ~{}",
        roubles(projection.final_value)
    );
    text
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn groups_thousands_with_spaces() {
        assert_eq!(group_thousands(0), "0");
        assert_eq!(group_thousands(999), "999");
        assert_eq!(group_thousands(1000), "1 000");
        assert_eq!(group_thousands(21_726_000), "21 726 000");
        assert_eq!(group_thousands(-1_234_567), "-1 234 567");
    }

    #[test]
    fn area_keeps_a_fractional_part() {
        assert_eq!(format_area(40.0), "40.0");
        assert_eq!(format_area(35.5), "35.5");
    }

    #[test]
    fn projection_covers_eleven_years() {
        let projection = calculate(10.0, 100);
        let years: Vec<u16> = projection.years.iter().map(|y| y.year).collect();
        assert_eq!(years, (2025..=2035).collect::<Vec<_>>());
        assert_eq!(projection.cost, 1000);
    }

    #[test]
    fn rental_starts_in_2028() {
        let projection = calculate(35.5, 612_000);
        for year in &projection.years {
            if year.year < 2028 {
                assert_eq!(year.rental_profit, 0, "{}", year.year);
            } else {
                assert!(year.rental_profit > 0, "{}", year.year);
            }
        }
    }

    #[test]
    fn growth_compounds_on_accumulated_value() {
        let projection = calculate(10.0, 100);
        assert_eq!(projection.years[0].growth_profit, 180);
        assert_eq!(projection.years[1].growth_profit, 236);
        assert_eq!(projection.years[2].growth_profit, 283);
    }

    #[test]
    fn totals_are_consistent() {
        let projection = calculate(35.5, 612_000);
        let rental: i64 = projection.years.iter().map(|y| y.rental_profit).sum();
        let growth: i64 = projection.years.iter().map(|y| y.growth_profit).sum();
        assert_eq!(projection.total_rental, rental);
        assert_eq!(projection.total_growth, growth);
        assert_eq!(projection.total_profit, rental + growth);
        assert!(projection.final_value >= projection.cost + growth);
        assert!(projection.roi_pct > 0.0);

        let last = projection.years.last().expect("eleven years");
        assert_eq!(last.current_value, projection.final_value);
    }

    #[test]
    fn zero_cost_yields_zero_percentages() {
        let projection = calculate(0.0, 0);
        assert_eq!(projection.roi_pct, 0.0);
        assert!(projection.years.iter().all(|y| y.growth_pct == 0.0));
    }

    #[test]
    fn price_per_metre_is_truncated() {
        assert_eq!(price_m2_from_total(1000, 3.0), 333);
        assert_eq!(price_m2_from_total(1000, 0.0), 0);
    }

    #[test]
    fn report_record_formats_display_strings() {
        let projection = calculate(35.5, 612_000);
        let record = report_record("B200", &projection);

        assert_eq!(record.title, "Лот B200 (35.5 м²)");
        assert_eq!(record.area, "35.5 м²");
        assert_eq!(record.price_m2, "612 000 ₽");
        assert_eq!(record.price, "21 726 000 ₽");
        assert_eq!(record.years.len(), 11);
        assert_eq!(record.years[0].year, "2025");
        assert_eq!(record.years[0].rental, "—");
        assert!(record.years[3].rental.ends_with(" ₽"));
        assert_eq!(record.years[0].total_pct, "18.0%");
        assert!(record.roi_pct.ends_with('%'));
    }

    #[test]
    fn oversized_price_is_clamped_instead_of_wrapping() {
        let projection = calculate(1.0, u64::MAX);
        let record = report_record("X1", &projection);
        assert_eq!(record.price_m2, "9 223 372 036 854 775 807 ₽");
        assert!(!record.price.starts_with('-'));
        assert!(!record.total_profit.starts_with('-'));
        assert!(summary_text("X1", &projection).contains("Цена за м²: 9 223 372 036 854 775 807 ₽"));
    }

    #[test]
    fn cyrillic_codes_become_latin() {
        assert_eq!(latin_code("В200"), "B200");
        assert_eq!(latin_code(" в200 "), "B200");
        assert_eq!(latin_code("КМ-12"), "KM-12");
        assert_eq!(latin_code("a7"), "A7");
    }

    #[test]
    fn summary_mentions_the_key_figures() {
        let projection = calculate(35.5, 612_000);
        let text = summary_text("B200", &projection);
        assert!(text.starts_with("Инвестиционный расчёт: B200"));
        assert!(text.contains("Стоимость: 21 726 000 ₽"));
        assert!(text.contains("Итого за 11 лет (2025-2035):"));
    }
}
