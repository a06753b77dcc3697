//! Paginated table export on lopdf.
//!
//! Layout is computed first ([`layout`]) so pagination can be inspected
//! without parsing PDF bytes; [`write_pdf`] only draws what the layout says.

use lopdf::content::{Content, Operation};
use lopdf::{Document, Object, Stream, dictionary};

use super::RenderError;
use crate::report::{Orientation, ReportResult, cell_text};

const MARGIN: f32 = 28.0;
/// Top of the table on the first page, below a one-line heading.
const TABLE_TOP: f32 = 57.0;
const HEADING_SIZE: f32 = 16.0;
const CELL_PAD: f32 = 3.0;
const LINE_SPACING: f32 = 1.15;
/// Average Helvetica glyph width as a fraction of the font size.
const AVG_CHAR_EM: f32 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PageSize {
    pub width: f32,
    pub height: f32,
}

impl PageSize {
    /// A4 in points.
    pub fn a4(orientation: Orientation) -> Self {
        match orientation {
            Orientation::Portrait => PageSize { width: 595.0, height: 842.0 },
            Orientation::Landscape => PageSize { width: 842.0, height: 595.0 },
        }
    }
}

/// One table row; each cell is already wrapped to the column width.
#[derive(Debug, Clone, PartialEq)]
pub struct TableRow {
    pub cells: Vec<Vec<String>>,
    pub height: f32,
}

impl TableRow {
    /// Cell text with wrapped lines re-joined.
    pub fn texts(&self) -> Vec<String> {
        self.cells.iter().map(|lines| lines.join(" ")).collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct TableLayout {
    /// Heading wrapped to the page width.
    pub heading: Vec<String>,
    /// Distance from the top edge to the table on the first page.
    pub table_top: f32,
    pub page: PageSize,
    pub font_size: f32,
    pub column_width: f32,
    /// Repeated at the top of every page.
    pub header: TableRow,
    pub pages: Vec<Vec<TableRow>>,
}

/// Lays the rows of `result` out as a table, in column order, split across
/// as many pages as needed.
pub fn layout(result: &ReportResult, heading: &str) -> TableLayout {
    let kind = result.kind;
    let page = PageSize::a4(kind.orientation());
    let font_size = kind.font_size();
    let columns = kind.columns();
    let column_width = (page.width - 2.0 * MARGIN) / columns.len().max(1) as f32;
    let max_chars = ((column_width - 2.0 * CELL_PAD) / (font_size * AVG_CHAR_EM))
        .floor()
        .max(1.0) as usize;

    let make_row = |texts: Vec<String>| -> TableRow {
        let cells: Vec<Vec<String>> = texts.iter().map(|t| wrap(t, max_chars)).collect();
        let lines = cells.iter().map(Vec::len).max().unwrap_or(1);
        TableRow {
            cells,
            height: lines as f32 * font_size * LINE_SPACING + 2.0 * CELL_PAD,
        }
    };

    let heading_chars = ((page.width - 2.0 * MARGIN) / (HEADING_SIZE * AVG_CHAR_EM)).floor() as usize;
    let heading = wrap(heading, heading_chars.max(1));
    let table_top = TABLE_TOP + (heading.len() - 1) as f32 * HEADING_SIZE * LINE_SPACING;

    let header = make_row(columns.iter().map(|c| c.header.to_string()).collect());
    let body: Vec<TableRow> = result
        .rows
        .iter()
        .map(|row| make_row(columns.iter().map(|c| cell_text(row, c.key)).collect()))
        .collect();

    let mut pages = Vec::new();
    let mut current: Vec<TableRow> = Vec::new();
    let mut available = page.height - table_top - MARGIN - header.height;
    for row in body {
        if row.height > available && !current.is_empty() {
            pages.push(std::mem::take(&mut current));
            available = page.height - 2.0 * MARGIN - header.height;
        }
        available -= row.height;
        current.push(row);
    }
    pages.push(current);

    TableLayout {
        heading,
        table_top,
        page,
        font_size,
        column_width,
        header,
        pages,
    }
}

/// Word-wraps `text` to at most `max_chars` per line, hard-splitting words
/// that are longer than a line. Always yields at least one line.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut lines = Vec::new();
    let mut current = String::new();

    for word in text.split_whitespace() {
        let mut word = word;
        while word.chars().count() > max_chars {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let split = word
                .char_indices()
                .nth(max_chars)
                .map(|(i, _)| i)
                .unwrap_or(word.len());
            lines.push(word[..split].to_string());
            word = &word[split..];
        }
        if word.is_empty() {
            continue;
        }

        let width = current.chars().count();
        if width > 0 && width + 1 + word.chars().count() > max_chars {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(word);
    }

    if !current.is_empty() || lines.is_empty() {
        lines.push(current);
    }
    lines
}

/// Draws `layout` into a PDF document and returns its bytes.
pub fn write_pdf(layout: &TableLayout) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let regular = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let bold = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => regular,
            "F2" => bold,
        },
    });

    let mut kids: Vec<Object> = Vec::with_capacity(layout.pages.len());
    for (index, rows) in layout.pages.iter().enumerate() {
        let content = page_content(layout, index, rows);
        let encoded = content.encode().map_err(|e| RenderError::Pdf(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let count = kids.len() as i64;
    let media_box: Vec<Object> = vec![
        0.into(),
        0.into(),
        layout.page.width.into(),
        layout.page.height.into(),
    ];
    let pages = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => count,
        "Resources" => resources_id,
        "MediaBox" => media_box,
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut bytes = Vec::new();
    doc.save_to(&mut bytes).map_err(|e| RenderError::Pdf(e.to_string()))?;
    Ok(bytes)
}

fn page_content(layout: &TableLayout, index: usize, rows: &[TableRow]) -> Content {
    let mut ops = Vec::new();
    let height = layout.page.height;

    let mut top = if index == 0 {
        let first_baseline = height - MARGIN - HEADING_SIZE * 0.2;
        for (n, line) in layout.heading.iter().enumerate() {
            let baseline = first_baseline - n as f32 * HEADING_SIZE * LINE_SPACING;
            text(&mut ops, "F2", HEADING_SIZE, MARGIN, baseline, line);
        }
        height - layout.table_top
    } else {
        height - MARGIN
    };

    ops.push(Operation::new("w", vec![0.5f32.into()]));
    draw_row(&mut ops, layout, &layout.header, top, true);
    top -= layout.header.height;
    for row in rows {
        draw_row(&mut ops, layout, row, top, false);
        top -= row.height;
    }

    Content { operations: ops }
}

fn draw_row(ops: &mut Vec<Operation>, layout: &TableLayout, row: &TableRow, top: f32, header: bool) {
    let bottom = top - row.height;
    let line_height = layout.font_size * LINE_SPACING;

    for (column, lines) in row.cells.iter().enumerate() {
        let x = MARGIN + column as f32 * layout.column_width;
        let rect = || -> Vec<Object> {
            vec![
                x.into(),
                bottom.into(),
                layout.column_width.into(),
                row.height.into(),
            ]
        };

        if header {
            ops.push(Operation::new("q", vec![]));
            ops.push(Operation::new("g", vec![0.85f32.into()]));
            ops.push(Operation::new("re", rect()));
            ops.push(Operation::new("f", vec![]));
            ops.push(Operation::new("Q", vec![]));
        }
        ops.push(Operation::new("re", rect()));
        ops.push(Operation::new("S", vec![]));

        let font = if header { "F2" } else { "F1" };
        for (n, line) in lines.iter().enumerate() {
            if line.is_empty() {
                continue;
            }
            let baseline = top - CELL_PAD - layout.font_size - n as f32 * line_height;
            text(ops, font, layout.font_size, x + CELL_PAD, baseline, line);
        }
    }
}

fn text(ops: &mut Vec<Operation>, font: &str, size: f32, x: f32, y: f32, s: &str) {
    ops.push(Operation::new("BT", vec![]));
    ops.push(Operation::new("Tf", vec![font.into(), size.into()]));
    ops.push(Operation::new("Td", vec![x.into(), y.into()]));
    ops.push(Operation::new("Tj", vec![Object::string_literal(win_ansi(s))]));
    ops.push(Operation::new("ET", vec![]));
}

/// Standard fonts only cover Latin-1 here; anything else prints as `?`.
fn win_ansi(s: &str) -> Vec<u8> {
    s.chars()
        .map(|c| u8::try_from(u32::from(c)).unwrap_or(b'?'))
        .collect()
}
