//! Report construction for the roi_report crate.
//!
//! [`build_report`] maps an [`InputRecord`] onto the fixed report layout: a title block, the
//! parameters table, the year-by-year projection, the totals summary and a footer.  The mapping is
//! pure; packing the tree into DOCX bytes happens in [`crate::docx`] and is reachable through
//! [`ReportBuilder::render`].

use log::debug;

use crate::docx;
use crate::error::ReportError;
use crate::model::{
    Block, Document, HorizontalAlignment, RichParagraph, Section, Spacing, Table, TableCell,
    TableRow,
};
use crate::record::{InputRecord, YearRecord};
use crate::richtext::Span;
use crate::theme::{self, Theme};

/// Alignment of the year table columns: year, rental, growth, total %.
const YEAR_ALIGNMENT: [HorizontalAlignment; 4] = [
    HorizontalAlignment::Center,
    HorizontalAlignment::Right,
    HorizontalAlignment::Right,
    HorizontalAlignment::Center,
];

/// Result of [`ReportBuilder::render`].
#[derive(Clone, Debug)]
pub struct RenderedDocument {
    /// The packed DOCX archive.
    pub bytes: Vec<u8>,
}

/// Builder that turns an input record into a report document.
pub struct ReportBuilder<'a> {
    record: &'a InputRecord,
    theme: &'a Theme,
}

impl<'a> ReportBuilder<'a> {
    /// Creates a builder for `record` using the process-wide theme.
    pub fn new(record: &'a InputRecord) -> Self {
        Self {
            record,
            theme: theme::theme(),
        }
    }

    /// Replaces the theme used for styling.
    pub fn with_theme(mut self, theme: &'a Theme) -> Self {
        self.theme = theme;
        self
    }

    /// Builds the element tree.
    pub fn build(&self) -> Document {
        Layout::new(self.theme).document(self.record)
    }

    /// Builds the element tree and packs it into DOCX bytes.
    pub fn render(&self) -> Result<RenderedDocument, ReportError> {
        let document = self.build();
        let bytes = docx::pack(&document)?;
        debug!("Packed report into {} bytes", bytes.len());
        Ok(RenderedDocument { bytes })
    }
}

/// Builds the report element tree for `record` with the process-wide theme.
pub fn build_report(record: &InputRecord) -> Document {
    ReportBuilder::new(record).build()
}

/// Region builders sharing one theme.
struct Layout<'a> {
    theme: &'a Theme,
}

impl<'a> Layout<'a> {
    fn new(theme: &'a Theme) -> Self {
        Self { theme }
    }

    fn document(&self, record: &InputRecord) -> Document {
        debug!(
            "Building report for {:?} with {} projection rows",
            record.title,
            record.years.len()
        );

        let mut blocks = self.title_block(&record.title);
        blocks.extend(self.parameters(record));
        blocks.extend(self.projection(&record.years));
        blocks.extend(self.totals(record));
        blocks.push(self.footer());

        let section = Section::new()
            .with_margins(self.theme.margins)
            .with_blocks(blocks);
        Document::new().with_section(section)
    }

    fn title_block(&self, title: &str) -> Vec<Block> {
        let palette = &self.theme.palette;
        let fonts = &self.theme.fonts;
        let labels = &self.theme.labels;

        let resort = RichParagraph::single(
            Span::new(labels.resort)
                .bold()
                .sized(fonts.resort)
                .colored(palette.green),
        )
        .with_alignment(HorizontalAlignment::Center)
        .with_spacing(Spacing::after(200));

        let heading = RichParagraph::single(
            Span::new(format!("{}{}", labels.title_prefix, title))
                .bold()
                .sized(fonts.title)
                .colored(palette.black),
        )
        .with_alignment(HorizontalAlignment::Center)
        .with_spacing(Spacing::after(300));

        vec![Block::Paragraph(resort), Block::Paragraph(heading)]
    }

    fn parameters(&self, record: &InputRecord) -> [Block; 2] {
        let [area, price_m2, price] = self.theme.labels.parameters;
        let table = Table::new(self.theme.parameters_columns).with_rows([
            self.label_row(area, self.plain_value(&record.area)),
            self.label_row(price_m2, self.plain_value(&record.price_m2)),
            self.label_row(price, self.plain_value(&record.price)),
        ]);

        [
            self.heading(self.theme.labels.parameters_heading, 200),
            Block::Table(table),
        ]
    }

    fn projection(&self, years: &[YearRecord]) -> [Block; 2] {
        let table = Table::new(self.theme.years_columns)
            .with_row(self.projection_header())
            .with_rows(years.iter().map(|year| self.projection_row(year)));

        [
            self.heading(self.theme.labels.years_heading, 300),
            Block::Table(table),
        ]
    }

    fn projection_header(&self) -> TableRow {
        let palette = &self.theme.palette;
        let cells: Vec<TableCell> = self
            .theme
            .labels
            .year_columns
            .iter()
            .map(|label| {
                self.cell(
                    RichParagraph::single(Span::new(*label).bold().colored(palette.white))
                        .with_alignment(HorizontalAlignment::Center),
                )
                .with_shading(palette.green)
            })
            .collect();
        TableRow::new(cells)
    }

    fn projection_row(&self, year: &YearRecord) -> TableRow {
        let last = YEAR_ALIGNMENT.len() - 1;
        let cells: Vec<TableCell> = year
            .cells()
            .into_iter()
            .enumerate()
            .map(|(column, text)| {
                let mut span = Span::new(text);
                if column == last {
                    span = span.bold().colored(self.theme.palette.green);
                }
                self.cell(RichParagraph::single(span).with_alignment(YEAR_ALIGNMENT[column]))
                    .with_width(self.theme.years_columns[column])
            })
            .collect();
        TableRow::new(cells)
    }

    fn totals(&self, record: &InputRecord) -> [Block; 2] {
        let labels = &self.theme.labels;

        let table = Table::new(self.theme.totals_columns).with_rows([
            self.label_row(labels.invested, self.plain_value(&record.price)),
            self.label_row(labels.total_rental, self.plain_value(&record.total_rental)),
            self.label_row(labels.total_growth, self.plain_value(&record.total_growth)),
            self.grand_total_row(labels.total_profit, &record.total_profit),
            self.label_row(labels.roi, self.accent_value(&record.roi_pct)),
            self.label_row(labels.avg_annual, self.accent_value(&record.avg_annual_pct)),
            self.label_row(labels.final_value, self.plain_value(&record.final_value)),
        ]);

        [
            self.heading(labels.totals_heading, 300),
            Block::Table(table),
        ]
    }

    fn grand_total_row(&self, label: &str, value: &str) -> TableRow {
        let gold = self.theme.palette.gold;
        TableRow::new(vec![
            self.cell(RichParagraph::single(Span::new(label).bold()))
                .with_shading(gold),
            self.cell(RichParagraph::single(Span::new(value).bold()))
                .with_shading(gold),
        ])
    }

    fn footer(&self) -> Block {
        let paragraph = RichParagraph::single(
            Span::new(self.theme.labels.resort)
                .sized(self.theme.fonts.footer)
                .colored(self.theme.palette.gray),
        )
        .with_alignment(HorizontalAlignment::Center)
        .with_spacing(Spacing::before(400));
        Block::Paragraph(paragraph)
    }

    fn heading(&self, text: &str, before: u32) -> Block {
        Block::Paragraph(
            RichParagraph::single(
                Span::new(text)
                    .bold()
                    .sized(self.theme.fonts.heading)
                    .colored(self.theme.palette.green),
            )
            .with_spacing(Spacing::before(before)),
        )
    }

    /// Ivory bold label on the left, `value` on the right.
    fn label_row(&self, label: &str, value: TableCell) -> TableRow {
        let label = self
            .cell(RichParagraph::single(Span::new(label).bold()))
            .with_shading(self.theme.palette.ivory);
        TableRow::new(vec![label, value])
    }

    fn plain_value(&self, value: &str) -> TableCell {
        self.cell(RichParagraph::single(Span::new(value)))
    }

    fn accent_value(&self, value: &str) -> TableCell {
        self.cell(RichParagraph::single(
            Span::new(value).bold().colored(self.theme.palette.green),
        ))
    }

    fn cell(&self, paragraph: RichParagraph) -> TableCell {
        TableCell::new(paragraph).with_borders(self.theme.cell_borders())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tables(document: &Document) -> Vec<&Table> {
        document.sections()[0].tables().collect()
    }

    fn sample_record() -> InputRecord {
        InputRecord {
            title: "Villa A".into(),
            area: "35.5 м²".into(),
            price_m2: "612 000 ₽".into(),
            price: "21 726 000 ₽".into(),
            years: vec![
                YearRecord::new("2025", "—", "3 910 680 ₽", "18.0%"),
                YearRecord::new("2026", "—", "5 127 336 ₽", "23.6%"),
                YearRecord::new("2027", "—", "6 152 803 ₽", "28.3%"),
            ],
            total_rental: "1 000 ₽".into(),
            total_growth: "2 000 ₽".into(),
            total_profit: "3 000 ₽".into(),
            roi_pct: "14%".into(),
            avg_annual_pct: "23.3%".into(),
            final_value: "36 916 819 ₽".into(),
        }
    }

    #[test]
    fn document_has_five_regions_in_order() {
        let document = build_report(&sample_record());
        assert_eq!(document.sections().len(), 1);
        let blocks = document.sections()[0].blocks();

        let kinds: Vec<&str> = blocks
            .iter()
            .map(|block| match block {
                Block::Paragraph(_) => "p",
                Block::Table(_) => "t",
            })
            .collect();
        assert_eq!(kinds, ["p", "p", "p", "t", "p", "t", "p", "t", "p"]);

        let first = blocks[0].as_paragraph().expect("resort heading");
        assert_eq!(first.text(), "RIZALTA RESORT BELOKURIKHA");
        assert_eq!(first.alignment(), HorizontalAlignment::Center);

        let title = blocks[1].as_paragraph().expect("title heading");
        assert_eq!(title.text(), "Инвестиционный расчёт: Villa A");

        let footer = blocks.last().and_then(Block::as_paragraph).expect("footer");
        assert_eq!(footer.text(), "RIZALTA RESORT BELOKURIKHA");
        assert_eq!(footer.spans()[0].color(), Some(theme::theme().palette.gray));
        assert_eq!(footer.spans()[0].size(), Some(18));
    }

    #[test]
    fn section_uses_fixed_margins() {
        let document = build_report(&sample_record());
        assert_eq!(
            document.sections()[0].margins(),
            Some(crate::model::PageMargins::uniform(800))
        );
    }

    #[test]
    fn parameters_table_shades_labels_and_copies_values() {
        let document = build_report(&sample_record());
        let parameters = tables(&document)[0];
        let ivory = theme::theme().palette.ivory;

        assert_eq!(parameters.column_widths(), [4000, 4000]);
        assert_eq!(parameters.rows().len(), 3);
        let values: Vec<String> = parameters
            .rows()
            .iter()
            .map(|row| row.cells()[1].text())
            .collect();
        assert_eq!(values, ["35.5 м²", "612 000 ₽", "21 726 000 ₽"]);

        for row in parameters.rows() {
            let label = &row.cells()[0];
            assert_eq!(label.shading(), Some(ivory));
            assert!(label.paragraph().spans()[0].is_bold());
            assert_eq!(row.cells()[1].shading(), None);
        }
    }

    #[test]
    fn projection_has_header_plus_one_row_per_year_in_order() {
        let record = sample_record();
        let document = build_report(&record);
        let projection = tables(&document)[1];

        assert_eq!(projection.rows().len(), record.years.len() + 1);
        for (index, year) in record.years.iter().enumerate() {
            let texts = projection.rows()[index + 1].texts();
            assert_eq!(texts, year.cells());
        }
    }

    #[test]
    fn empty_years_leave_only_the_header() {
        let record = InputRecord::default();
        let document = build_report(&record);
        let projection = tables(&document)[1];

        assert_eq!(projection.rows().len(), 1);
        assert_eq!(
            projection.rows()[0].texts(),
            ["Год", "Аренда", "Рост стоим.", "Доход %"]
        );
    }

    #[test]
    fn projection_header_is_dark_with_white_bold_text() {
        let document = build_report(&sample_record());
        let header = &tables(&document)[1].rows()[0];
        let palette = theme::theme().palette;

        for cell in header.cells() {
            assert_eq!(cell.shading(), Some(palette.green));
            let span = &cell.paragraph().spans()[0];
            assert!(span.is_bold());
            assert_eq!(span.color(), Some(palette.white));
        }
    }

    #[test]
    fn projection_rows_follow_column_alignment_and_widths() {
        let document = build_report(&sample_record());
        let row = &tables(&document)[1].rows()[1];
        let green = theme::theme().palette.green;

        let alignments: Vec<_> = row
            .cells()
            .iter()
            .map(|cell| cell.paragraph().alignment())
            .collect();
        assert_eq!(alignments, YEAR_ALIGNMENT);

        let widths: Vec<_> = row.cells().iter().map(TableCell::width).collect();
        assert_eq!(widths, [Some(1800), Some(2400), Some(2400), Some(1800)]);

        let last = &row.cells()[3].paragraph().spans()[0];
        assert!(last.is_bold());
        assert_eq!(last.color(), Some(green));
        assert!(!row.cells()[0].paragraph().spans()[0].is_bold());
    }

    #[test]
    fn totals_highlight_grand_total_and_accent_rows() {
        let document = build_report(&sample_record());
        let totals = tables(&document)[2];
        let palette = theme::theme().palette;

        assert_eq!(totals.rows().len(), 7);
        let gold_rows: Vec<usize> = totals
            .rows()
            .iter()
            .enumerate()
            .filter(|(_, row)| row.cells().iter().any(|cell| cell.shading() == Some(palette.gold)))
            .map(|(index, _)| index)
            .collect();
        assert_eq!(gold_rows, [3]);

        let grand_total = &totals.rows()[3];
        assert_eq!(grand_total.texts(), ["ОБЩАЯ ПРИБЫЛЬ", "3 000 ₽"]);
        assert!(grand_total
            .cells()
            .iter()
            .all(|cell| cell.shading() == Some(palette.gold)));

        for index in [4, 5] {
            let value = &totals.rows()[index].cells()[1].paragraph().spans()[0];
            assert!(value.is_bold());
            assert_eq!(value.color(), Some(palette.green));
        }
        for index in [0, 1, 2, 6] {
            let value = &totals.rows()[index].cells()[1].paragraph().spans()[0];
            assert!(!value.is_bold());
            assert_eq!(value.color(), None);
        }
    }

    #[test]
    fn grand_total_is_gold_even_when_empty() {
        let document = build_report(&InputRecord::default());
        let grand_total = &tables(&document)[2].rows()[3];
        let gold = theme::theme().palette.gold;

        assert_eq!(grand_total.cells()[1].text(), "");
        assert!(grand_total
            .cells()
            .iter()
            .all(|cell| cell.shading() == Some(gold)));
    }

    #[test]
    fn missing_fields_render_as_empty_cells() {
        let document = build_report(&InputRecord::default());
        let tables = tables(&document);
        for table in [tables[0], tables[2]] {
            for row in table.rows() {
                assert_eq!(row.cells()[1].text(), "");
            }
        }
    }

    #[test]
    fn every_cell_carries_the_thin_border() {
        let document = build_report(&sample_record());
        let expected = theme::theme().cell_borders();
        for table in tables(&document) {
            for row in table.rows() {
                for cell in row.cells() {
                    assert_eq!(cell.borders(), &expected);
                }
            }
        }
    }

    #[test]
    fn custom_theme_changes_labels() {
        let mut custom = Theme::default();
        custom.labels.resort = "TEST RESORT";
        let record = sample_record();
        let document = ReportBuilder::new(&record).with_theme(&custom).build();
        let first = document.sections()[0].blocks()[0]
            .as_paragraph()
            .expect("resort heading");
        assert_eq!(first.text(), "TEST RESORT");
    }
}
