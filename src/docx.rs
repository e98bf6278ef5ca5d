//! Packing of the element tree into a DOCX archive using `docx-rs`.
//!
//! The mapping is one-to-one: every [`Block`] becomes a `docx-rs` paragraph or table, every
//! [`Span`] a run.  Nothing here decides layout; all styling decisions are already present in the
//! tree produced by [`crate::builder`].

use std::io::Cursor;

use docx_rs::{
    AlignmentType, BorderType, Docx, LineSpacing, PageMargin, Paragraph, Run, ShdType, Shading,
    Table as DocxTable, TableCell as DocxCell, TableCellBorder, TableCellBorderPosition,
    TableCellBorders, TableRow as DocxRow, WidthType,
};
use log::debug;

use crate::error::ReportError;
use crate::model::{
    Block, CellBorder, CellBorders, Document, HorizontalAlignment, PageMargins, RichParagraph,
    Table, TableCell, TableRow,
};
use crate::richtext::Span;

/// Converts the element tree into a `docx-rs` document.
///
/// Only the margins of the first section are applied, since `docx-rs` exposes a single body
/// section.
pub fn to_docx(document: &Document) -> Docx {
    let mut docx = Docx::new();

    if let Some(margins) = document.sections().first().and_then(|s| s.margins()) {
        docx = docx.page_margin(page_margin(margins));
    }

    for section in document.sections() {
        for block in section.blocks() {
            docx = match block {
                Block::Paragraph(paragraph) => docx.add_paragraph(paragraph_to_docx(paragraph)),
                Block::Table(table) => docx.add_table(table_to_docx(table)),
            };
        }
    }

    docx
}

/// Packs the element tree into DOCX bytes.
pub fn pack(document: &Document) -> Result<Vec<u8>, ReportError> {
    let mut buffer = Cursor::new(Vec::new());
    to_docx(document)
        .build()
        .pack(&mut buffer)
        .map_err(|err| ReportError::Pack(err.to_string()))?;
    let bytes = buffer.into_inner();
    debug!("Packed DOCX archive of {} bytes", bytes.len());
    Ok(bytes)
}

fn page_margin(margins: PageMargins) -> PageMargin {
    PageMargin::new()
        .top(margins.top)
        .right(margins.right)
        .bottom(margins.bottom)
        .left(margins.left)
}

fn alignment(alignment: HorizontalAlignment) -> AlignmentType {
    match alignment {
        HorizontalAlignment::Left => AlignmentType::Left,
        HorizontalAlignment::Center => AlignmentType::Center,
        HorizontalAlignment::Right => AlignmentType::Right,
    }
}

fn run(span: &Span) -> Run {
    let mut run = Run::new().add_text(span.text());
    if span.is_bold() {
        run = run.bold();
    }
    if let Some(color) = span.color() {
        run = run.color(color.to_hex());
    }
    if let Some(size) = span.size() {
        run = run.size(size);
    }
    run
}

fn paragraph_to_docx(paragraph: &RichParagraph) -> Paragraph {
    let mut docx_paragraph = paragraph
        .spans()
        .iter()
        .fold(Paragraph::new(), |p, span| p.add_run(run(span)));

    if paragraph.alignment() != HorizontalAlignment::Left {
        docx_paragraph = docx_paragraph.align(alignment(paragraph.alignment()));
    }

    let spacing = paragraph.spacing();
    if !spacing.is_empty() {
        let mut line_spacing = LineSpacing::new();
        if let Some(before) = spacing.before {
            line_spacing = line_spacing.before(before);
        }
        if let Some(after) = spacing.after {
            line_spacing = line_spacing.after(after);
        }
        docx_paragraph = docx_paragraph.line_spacing(line_spacing);
    }

    docx_paragraph
}

fn border(position: TableCellBorderPosition, border: CellBorder) -> TableCellBorder {
    TableCellBorder::new(position)
        .border_type(BorderType::Single)
        .size(border.size)
        .color(border.color.to_hex())
}

fn borders(cell_borders: &CellBorders) -> TableCellBorders {
    let sides = [
        (TableCellBorderPosition::Top, cell_borders.top),
        (TableCellBorderPosition::Bottom, cell_borders.bottom),
        (TableCellBorderPosition::Left, cell_borders.left),
        (TableCellBorderPosition::Right, cell_borders.right),
    ];

    sides
        .into_iter()
        .filter_map(|(position, side)| side.map(|side| border(position, side)))
        .fold(TableCellBorders::with_empty(), TableCellBorders::set)
}

fn cell_to_docx(cell: &TableCell) -> DocxCell {
    let mut docx_cell = DocxCell::new()
        .add_paragraph(paragraph_to_docx(cell.paragraph()))
        .set_borders(borders(cell.borders()));

    if let Some(fill) = cell.shading() {
        docx_cell = docx_cell.shading(
            Shading::new()
                .shd_type(ShdType::Clear)
                .color("auto")
                .fill(fill.to_hex()),
        );
    }
    if let Some(width) = cell.width() {
        docx_cell = docx_cell.width(width as usize, WidthType::Dxa);
    }

    docx_cell
}

fn row_to_docx(row: &TableRow) -> DocxRow {
    DocxRow::new(row.cells().iter().map(cell_to_docx).collect())
}

fn table_to_docx(table: &Table) -> DocxTable {
    let rows = table.rows().iter().map(row_to_docx).collect();
    let grid = table
        .column_widths()
        .iter()
        .map(|width| *width as usize)
        .collect();
    DocxTable::new(rows).set_grid(grid)
}
