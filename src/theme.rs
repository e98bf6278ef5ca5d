//! Fixed visual style of the investment report.
//!
//! The report has exactly one look, so the palette, borders, margins, column grids and labels live
//! in a single immutable [`Theme`] value.  [`theme()`] hands out the process-wide instance; callers
//! that need a variation (tests, mostly) can build their own `Theme` and pass it to
//! [`crate::builder::ReportBuilder::with_theme`].

use std::sync::OnceLock;

use crate::model::{CellBorder, CellBorders, PageMargins};
use crate::richtext::Color;

/// Colors used by the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Palette {
    /// Dark green used for headings, header rows and accent values.
    pub green: Color,
    /// Gold accent of the grand-total row.
    pub gold: Color,
    /// Ivory fill of label cells.
    pub ivory: Color,
    pub black: Color,
    /// Footer text.
    pub gray: Color,
    /// Header row text.
    pub white: Color,
}

impl Palette {
    pub const BRAND: Palette = Palette {
        green: Color::rgb(0x31, 0x3D, 0x20),
        gold: Color::rgb(0xDC, 0xB7, 0x64),
        ivory: Color::rgb(0xF6, 0xF0, 0xE3),
        black: Color::rgb(0x00, 0x00, 0x00),
        gray: Color::rgb(0x66, 0x66, 0x66),
        white: Color::rgb(0xFF, 0xFF, 0xFF),
    };
}

/// Font sizes in half-points.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FontSizes {
    pub resort: usize,
    pub title: usize,
    pub heading: usize,
    pub footer: usize,
}

/// Fixed text of the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Labels {
    pub resort: &'static str,
    /// Prefix of the title heading, followed by the record title.
    pub title_prefix: &'static str,
    pub parameters_heading: &'static str,
    pub parameters: [&'static str; 3],
    pub years_heading: &'static str,
    pub year_columns: [&'static str; 4],
    pub totals_heading: &'static str,
    pub invested: &'static str,
    pub total_rental: &'static str,
    pub total_growth: &'static str,
    pub total_profit: &'static str,
    pub roi: &'static str,
    pub avg_annual: &'static str,
    pub final_value: &'static str,
}

impl Labels {
    pub const RU: Labels = Labels {
        resort: "RIZALTA RESORT BELOKURIKHA",
        title_prefix: "Инвестиционный расчёт: ",
        parameters_heading: "Параметры",
        parameters: ["Площадь", "Цена за м²", "Стоимость"],
        years_heading: "Прогноз прибыли по годам",
        year_columns: ["Год", "Аренда", "Рост стоим.", "Доход %"],
        totals_heading: "Итого за 11 лет (2025-2035)",
        invested: "Сумма вложений",
        total_rental: "Прибыль от аренды",
        total_growth: "Прибыль от роста",
        total_profit: "ОБЩАЯ ПРИБЫЛЬ",
        roi: "Доходность за 11 лет",
        avg_annual: "Средняя годовая",
        final_value: "Стоимость в 2035",
    };
}

/// Immutable style configuration of the report.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Theme {
    pub palette: Palette,
    pub fonts: FontSizes,
    pub labels: Labels,
    /// Border applied to all four sides of every table cell.
    pub cell_border: CellBorder,
    pub margins: PageMargins,
    pub parameters_columns: [u32; 2],
    pub years_columns: [u32; 4],
    pub totals_columns: [u32; 2],
}

impl Theme {
    /// Returns the borders applied to every table cell.
    pub fn cell_borders(&self) -> CellBorders {
        CellBorders::uniform(self.cell_border)
    }
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            palette: Palette::BRAND,
            fonts: FontSizes {
                resort: 28,
                title: 36,
                heading: 26,
                footer: 18,
            },
            labels: Labels::RU,
            cell_border: CellBorder {
                size: 1,
                color: Color::rgb(0xCC, 0xCC, 0xCC),
            },
            margins: PageMargins::uniform(800),
            parameters_columns: [4000, 4000],
            years_columns: [1800, 2400, 2400, 1800],
            totals_columns: [4000, 4000],
        }
    }
}

/// Returns the process-wide report theme.
pub fn theme() -> &'static Theme {
    static THEME: OnceLock<Theme> = OnceLock::new();
    THEME.get_or_init(Theme::default)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn palette_matches_brand_hex_values() {
        let palette = theme().palette;
        assert_eq!(palette.green.to_hex(), "313D20");
        assert_eq!(palette.gold.to_hex(), "DCB764");
        assert_eq!(palette.ivory.to_hex(), "F6F0E3");
        assert_eq!(palette.gray.to_hex(), "666666");
    }

    #[test]
    fn theme_is_initialized_once() {
        assert!(std::ptr::eq(theme(), theme()));
    }

    #[test]
    fn column_grids_fill_the_same_width() {
        let theme = theme();
        let parameters: u32 = theme.parameters_columns.iter().sum();
        let years: u32 = theme.years_columns.iter().sum();
        let totals: u32 = theme.totals_columns.iter().sum();
        assert_eq!(parameters, 8000);
        assert_eq!(years, 8400);
        assert_eq!(totals, 8000);
    }
}
