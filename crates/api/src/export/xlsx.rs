//! Single-sheet XLSX (SpreadsheetML) workbooks, zipped in memory.

use std::io::{Cursor, Write};

use studio_core::report::{FinancialReport, REPORT_HEADERS};
use studio_core::types::Money;
use zip::write::SimpleFileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::export::documents::format_date;

#[derive(Debug, thiserror::Error)]
pub enum XlsxError {
    #[error("Failed to write workbook archive: {0}")]
    Zip(#[from] zip::result::ZipError),

    #[error("Failed to write workbook part: {0}")]
    Io(#[from] std::io::Error),
}

/// Cell style indices into `cellXfs` in [`STYLES_XML`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Plain = 0,
    Bold = 1,
    Amount = 2,
    BoldAmount = 3,
}

#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Empty,
    Text(String, CellStyle),
    Number(Money, CellStyle),
}

impl Cell {
    pub fn text(value: impl Into<String>) -> Self {
        Cell::Text(value.into(), CellStyle::Plain)
    }

    pub fn amount(value: Money) -> Self {
        Cell::Number(value, CellStyle::Amount)
    }
}

/// `0 -> A`, `25 -> Z`, `26 -> AA`.
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(b'A' + rem as u8);
        n = (n - 1) / 26;
    }
    letters.reverse();
    String::from_utf8_lossy(&letters).into_owned()
}

fn xml_escape(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for c in value.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            // Control characters are not allowed in XML 1.0.
            c if c.is_control() && !matches!(c, '\t' | '\n' | '\r') => {}
            c => out.push(c),
        }
    }
    out
}

fn sheet_xml(rows: &[Vec<Cell>]) -> String {
    let mut xml = String::from(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<worksheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><sheetData>"#,
    );
    for (r, row) in rows.iter().enumerate() {
        let row_number = r + 1;
        xml.push_str(&format!(r#"<row r="{row_number}">"#));
        for (c, cell) in row.iter().enumerate() {
            let reference = format!("{}{row_number}", column_letter(c));
            match cell {
                Cell::Empty => {}
                Cell::Text(value, style) => xml.push_str(&format!(
                    r#"<c r="{reference}" t="inlineStr" s="{}"><is><t xml:space="preserve">{}</t></is></c>"#,
                    *style as u8,
                    xml_escape(value)
                )),
                Cell::Number(value, style) => xml.push_str(&format!(
                    r#"<c r="{reference}" s="{}"><v>{value}</v></c>"#,
                    *style as u8
                )),
            }
        }
        xml.push_str("</row>");
    }
    xml.push_str("</sheetData></worksheet>");
    xml
}

const CONTENT_TYPES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Types xmlns="http://schemas.openxmlformats.org/package/2006/content-types"><Default Extension="rels" ContentType="application/vnd.openxmlformats-package.relationships+xml"/><Default Extension="xml" ContentType="application/xml"/><Override PartName="/xl/workbook.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.sheet.main+xml"/><Override PartName="/xl/worksheets/sheet1.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.worksheet+xml"/><Override PartName="/xl/styles.xml" ContentType="application/vnd.openxmlformats-officedocument.spreadsheetml.styles+xml"/></Types>"#;

const ROOT_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument" Target="xl/workbook.xml"/></Relationships>"#;

const WORKBOOK_RELS_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<Relationships xmlns="http://schemas.openxmlformats.org/package/2006/relationships"><Relationship Id="rId1" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/worksheet" Target="worksheets/sheet1.xml"/><Relationship Id="rId2" Type="http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles" Target="styles.xml"/></Relationships>"#;

/// Fonts: regular, bold. `cellXfs` follow [`CellStyle`]; amounts use the
/// built-in `#,##0.00` format (id 4).
const STYLES_XML: &str = r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<styleSheet xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main"><fonts count="2"><font><sz val="11"/><name val="Calibri"/></font><font><b/><sz val="11"/><name val="Calibri"/></font></fonts><fills count="2"><fill><patternFill patternType="none"/></fill><fill><patternFill patternType="gray125"/></fill></fills><borders count="1"><border><left/><right/><top/><bottom/><diagonal/></border></borders><cellStyleXfs count="1"><xf numFmtId="0" fontId="0" fillId="0" borderId="0"/></cellStyleXfs><cellXfs count="4"><xf numFmtId="0" fontId="0" fillId="0" borderId="0" xfId="0"/><xf numFmtId="0" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1"/><xf numFmtId="4" fontId="0" fillId="0" borderId="0" xfId="0" applyNumberFormat="1"/><xf numFmtId="4" fontId="1" fillId="0" borderId="0" xfId="0" applyFont="1" applyNumberFormat="1"/></cellXfs></styleSheet>"#;

fn workbook_xml(sheet_name: &str) -> String {
    format!(
        r#"<?xml version="1.0" encoding="UTF-8" standalone="yes"?>
<workbook xmlns="http://schemas.openxmlformats.org/spreadsheetml/2006/main" xmlns:r="http://schemas.openxmlformats.org/officeDocument/2006/relationships"><sheets><sheet name="{}" sheetId="1" r:id="rId1"/></sheets></workbook>"#,
        xml_escape(sheet_name)
    )
}

/// Zip a single worksheet into an `.xlsx` package.
pub fn write_workbook(sheet_name: &str, rows: &[Vec<Cell>]) -> Result<Vec<u8>, XlsxError> {
    let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    let parts: [(&str, String); 5] = [
        ("[Content_Types].xml", CONTENT_TYPES_XML.to_string()),
        ("_rels/.rels", ROOT_RELS_XML.to_string()),
        ("xl/workbook.xml", workbook_xml(sheet_name)),
        ("xl/_rels/workbook.xml.rels", WORKBOOK_RELS_XML.to_string()),
        ("xl/styles.xml", STYLES_XML.to_string()),
    ];
    for (name, body) in &parts {
        zip.start_file(*name, options)?;
        zip.write_all(body.as_bytes())?;
    }

    zip.start_file("xl/worksheets/sheet1.xml", options)?;
    zip.write_all(sheet_xml(rows).as_bytes())?;

    Ok(zip.finish()?.into_inner())
}

/// Header row, one row per order, a blank row, then the TOTAL row.
pub fn report_rows(report: &FinancialReport) -> Vec<Vec<Cell>> {
    let mut rows = Vec::with_capacity(report.rows.len() + 3);
    rows.push(
        REPORT_HEADERS
            .iter()
            .map(|h| Cell::Text((*h).to_string(), CellStyle::Bold))
            .collect(),
    );
    for row in &report.rows {
        rows.push(vec![
            Cell::text(row.order_number.as_str()),
            Cell::text(row.customer_name.as_str()),
            Cell::text(row.event_type.as_str()),
            Cell::amount(row.amount),
            Cell::amount(row.expenses),
            Cell::amount(row.profit),
            Cell::text(format_date(row.created_at.date_naive())),
        ]);
    }
    rows.push(Vec::new());
    rows.push(vec![
        Cell::Text("TOTAL".to_string(), CellStyle::Bold),
        Cell::Empty,
        Cell::Empty,
        Cell::Number(report.summary.total_revenue, CellStyle::BoldAmount),
        Cell::Number(report.summary.total_expenses, CellStyle::BoldAmount),
        Cell::Number(report.summary.net_profit, CellStyle::BoldAmount),
        Cell::Empty,
    ]);
    rows
}

/// The financial report as an `.xlsx` workbook with a single "Report" sheet.
pub fn report_workbook(report: &FinancialReport) -> Result<Vec<u8>, XlsxError> {
    write_workbook("Report", &report_rows(report))
}
