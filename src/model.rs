//! Data structures describing the logical content of a report document.
//!
//! The types in this module form the element tree handed to the serializer: a document holds
//! sections, a section holds ordered blocks (paragraphs and tables), tables hold rows of cells and
//! every cell wraps a styled paragraph.  They intentionally avoid referencing `docx-rs` so the tree
//! can be built and inspected without pulling in the packing layer.
//!
//! All lengths are stored in twentieths of a point (twips, `DXA` in WordprocessingML) unless noted
//! otherwise.

use crate::richtext::{self, Color, Span};

/// Horizontal alignment of a paragraph.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum HorizontalAlignment {
    /// Left aligned content.
    #[default]
    Left,
    /// Center aligned content.
    Center,
    /// Right aligned content.
    Right,
}

/// Vertical space around a paragraph, in twips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct Spacing {
    /// Space above the paragraph.
    pub before: Option<u32>,
    /// Space below the paragraph.
    pub after: Option<u32>,
}

impl Spacing {
    /// Spacing with only a leading gap.
    pub fn before(before: u32) -> Self {
        Self {
            before: Some(before),
            after: None,
        }
    }

    /// Spacing with only a trailing gap.
    pub fn after(after: u32) -> Self {
        Self {
            before: None,
            after: Some(after),
        }
    }

    /// Returns `true` when neither side carries a gap.
    pub fn is_empty(&self) -> bool {
        self.before.is_none() && self.after.is_none()
    }
}

/// Rich text paragraph carrying inline styling information, alignment and spacing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RichParagraph {
    spans: Vec<Span>,
    alignment: HorizontalAlignment,
    spacing: Spacing,
}

impl RichParagraph {
    /// Creates a paragraph from the provided spans using left alignment.
    pub fn new(spans: impl Into<Vec<Span>>) -> Self {
        Self {
            spans: spans.into(),
            ..Self::default()
        }
    }

    /// Creates a paragraph holding a single span.
    pub fn single(span: Span) -> Self {
        Self::new(vec![span])
    }

    /// Returns the spans that make up the paragraph.
    pub fn spans(&self) -> &[Span] {
        &self.spans
    }

    /// Returns the unstyled text of the paragraph.
    pub fn text(&self) -> String {
        richtext::plain_text(&self.spans)
    }

    /// Returns the configured alignment.
    pub fn alignment(&self) -> HorizontalAlignment {
        self.alignment
    }

    /// Returns the configured spacing.
    pub fn spacing(&self) -> Spacing {
        self.spacing
    }

    /// Sets the alignment and returns the updated paragraph.
    pub fn with_alignment(mut self, alignment: HorizontalAlignment) -> Self {
        self.alignment = alignment;
        self
    }

    /// Sets the spacing and returns the updated paragraph.
    pub fn with_spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }
}

/// A single-line cell border.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellBorder {
    /// Stroke width in eighths of a point.
    pub size: usize,
    /// Stroke color.
    pub color: Color,
}

/// Borders on the four sides of a table cell.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct CellBorders {
    pub top: Option<CellBorder>,
    pub bottom: Option<CellBorder>,
    pub left: Option<CellBorder>,
    pub right: Option<CellBorder>,
}

impl CellBorders {
    /// Applies the same border to all four sides.
    pub fn uniform(border: CellBorder) -> Self {
        Self {
            top: Some(border),
            bottom: Some(border),
            left: Some(border),
            right: Some(border),
        }
    }
}

/// A table cell wrapping one paragraph.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableCell {
    paragraph: RichParagraph,
    shading: Option<Color>,
    width: Option<u32>,
    borders: CellBorders,
}

impl TableCell {
    /// Creates a cell holding the given paragraph.
    pub fn new(paragraph: RichParagraph) -> Self {
        Self {
            paragraph,
            ..Self::default()
        }
    }

    /// Returns the cell paragraph.
    pub fn paragraph(&self) -> &RichParagraph {
        &self.paragraph
    }

    /// Returns the unstyled text of the cell.
    pub fn text(&self) -> String {
        self.paragraph.text()
    }

    /// Returns the background fill, if any.
    pub fn shading(&self) -> Option<Color> {
        self.shading
    }

    /// Returns the preferred width in twips, if any.
    pub fn width(&self) -> Option<u32> {
        self.width
    }

    /// Returns the cell borders.
    pub fn borders(&self) -> &CellBorders {
        &self.borders
    }

    /// Sets the background fill and returns the updated cell.
    pub fn with_shading(mut self, shading: impl Into<Option<Color>>) -> Self {
        self.shading = shading.into();
        self
    }

    /// Sets the preferred width and returns the updated cell.
    pub fn with_width(mut self, width: impl Into<Option<u32>>) -> Self {
        self.width = width.into();
        self
    }

    /// Sets the borders and returns the updated cell.
    pub fn with_borders(mut self, borders: CellBorders) -> Self {
        self.borders = borders;
        self
    }
}

/// An ordered row of cells.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TableRow {
    cells: Vec<TableCell>,
}

impl TableRow {
    /// Creates a row from the given cells.
    pub fn new(cells: impl Into<Vec<TableCell>>) -> Self {
        Self {
            cells: cells.into(),
        }
    }

    /// Returns the cells of the row.
    pub fn cells(&self) -> &[TableCell] {
        &self.cells
    }

    /// Returns the unstyled text of every cell, in column order.
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(TableCell::text).collect()
    }
}

/// A table with a fixed column grid.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Table {
    column_widths: Vec<u32>,
    rows: Vec<TableRow>,
}

impl Table {
    /// Creates a table with the given column grid and no rows.
    pub fn new(column_widths: impl Into<Vec<u32>>) -> Self {
        Self {
            column_widths: column_widths.into(),
            rows: Vec::new(),
        }
    }

    /// Returns the column grid in twips.
    pub fn column_widths(&self) -> &[u32] {
        &self.column_widths
    }

    /// Returns the rows of the table.
    pub fn rows(&self) -> &[TableRow] {
        &self.rows
    }

    /// Appends a row and returns the updated table.
    pub fn with_row(mut self, row: TableRow) -> Self {
        self.rows.push(row);
        self
    }

    /// Extends the table with additional rows and returns the updated instance.
    pub fn with_rows<I>(mut self, rows: I) -> Self
    where
        I: IntoIterator<Item = TableRow>,
    {
        self.rows.extend(rows);
        self
    }
}

/// Individual content blocks that make up a section.
#[derive(Clone, Debug, PartialEq)]
pub enum Block {
    /// Styled paragraph content.
    Paragraph(RichParagraph),
    /// Table content.
    Table(Table),
}

impl Block {
    /// Convenience helper for building a paragraph block.
    pub fn paragraph(spans: impl Into<Vec<Span>>) -> Self {
        Self::Paragraph(RichParagraph::new(spans))
    }

    /// Returns the table if this block is one.
    pub fn as_table(&self) -> Option<&Table> {
        match self {
            Self::Table(table) => Some(table),
            Self::Paragraph(_) => None,
        }
    }

    /// Returns the paragraph if this block is one.
    pub fn as_paragraph(&self) -> Option<&RichParagraph> {
        match self {
            Self::Paragraph(paragraph) => Some(paragraph),
            Self::Table(_) => None,
        }
    }
}

/// Page margins in twips.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct PageMargins {
    pub top: i32,
    pub right: i32,
    pub bottom: i32,
    pub left: i32,
}

impl PageMargins {
    /// Uses the same margin on every edge.
    pub const fn uniform(margin: i32) -> Self {
        Self {
            top: margin,
            right: margin,
            bottom: margin,
            left: margin,
        }
    }
}

/// Logical representation of a document section.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Section {
    margins: Option<PageMargins>,
    blocks: Vec<Block>,
}

impl Section {
    /// Creates an empty section.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the page margins, if any.
    pub fn margins(&self) -> Option<PageMargins> {
        self.margins
    }

    /// Returns the blocks contained in the section.
    pub fn blocks(&self) -> &[Block] {
        &self.blocks
    }

    /// Returns the tables of the section in document order.
    pub fn tables(&self) -> impl Iterator<Item = &Table> {
        self.blocks.iter().filter_map(Block::as_table)
    }

    /// Sets the page margins and returns the updated section.
    pub fn with_margins(mut self, margins: impl Into<Option<PageMargins>>) -> Self {
        self.margins = margins.into();
        self
    }

    /// Appends a block and returns the updated section.
    pub fn with_block(mut self, block: Block) -> Self {
        self.blocks.push(block);
        self
    }

    /// Extends the section with additional blocks and returns the updated instance.
    pub fn with_blocks<I>(mut self, blocks: I) -> Self
    where
        I: IntoIterator<Item = Block>,
    {
        self.blocks.extend(blocks);
        self
    }
}

/// The complete element tree handed to the serializer.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Document {
    sections: Vec<Section>,
}

impl Document {
    /// Creates an empty document.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the sections of the document.
    pub fn sections(&self) -> &[Section] {
        &self.sections
    }

    /// Appends a section and returns the updated document.
    pub fn with_section(mut self, section: Section) -> Self {
        self.sections.push(section);
        self
    }
}
