//! Page layouts for the quotation and financial report PDFs.

use chrono::NaiveDate;
use studio_core::money::{format_amount, format_inr};
use studio_core::pricing::{AdditionalService, CoverageService};
use studio_core::report::{FinancialReport, REPORT_HEADERS};
use studio_db::models::quotation::Quotation;

use crate::config::StudioBranding;
use crate::export::pdf::{
    truncate, wrap, Font, Page, PdfDocument, Rgb, TextStyle, PAGE_HEIGHT_MM, PAGE_WIDTH_MM,
};

const MARGIN: f32 = 15.0;
const CONTENT_RIGHT: f32 = PAGE_WIDTH_MM - MARGIN;
const CENTER: f32 = PAGE_WIDTH_MM / 2.0;
/// Rows stop here; below is reserved for the footer.
const CONTENT_BOTTOM: f32 = PAGE_HEIGHT_MM - 30.0;
const FOOTER_Y: f32 = PAGE_HEIGHT_MM - 15.0;

const LETTERHEAD_HEIGHT: f32 = 40.0;
const CONTINUATION_HEIGHT: f32 = 25.0;

const TITLE: TextStyle = TextStyle::new(Font::Bold, 18.0);
const HEADING: TextStyle = TextStyle::new(Font::Bold, 12.0);
const LABEL: TextStyle = TextStyle::new(Font::Bold, 10.0);
const BODY: TextStyle = TextStyle::new(Font::Regular, 10.0);
const TABLE_HEAD: TextStyle = TextStyle::new(Font::Bold, 9.0);
const TABLE_CELL: TextStyle = TextStyle::new(Font::Regular, 8.0);
const FOOTER: TextStyle = TextStyle::new(Font::Italic, 8.0);

fn letterhead_fill() -> Rgb {
    Rgb::from_u8(50, 50, 50)
}

/// `dd/mm/yyyy`, the format printed on every document.
pub fn format_date(date: NaiveDate) -> String {
    date.format("%d/%m/%Y").to_string()
}

/// `10/02/2026 – 12/02/2026`, or the single date for one-day events.
pub fn format_event_dates(start: NaiveDate, end: Option<NaiveDate>) -> String {
    match end {
        Some(end) if end != start => {
            format!("{} \u{2013} {}", format_date(start), format_date(end))
        }
        _ => format_date(start),
    }
}

fn draw_letterhead(page: &mut Page, studio: &StudioBranding) {
    page.fill_rect(0.0, 0.0, PAGE_WIDTH_MM, LETTERHEAD_HEIGHT, letterhead_fill());
    page.text_center(
        CENTER,
        20.0,
        TextStyle::new(Font::Bold, 22.0).color(Rgb::WHITE),
        &studio.name,
    );
    page.text_center(
        CENTER,
        30.0,
        TextStyle::new(Font::Regular, 11.0).color(Rgb::WHITE),
        &studio.tagline,
    );
}

fn draw_continuation_header(page: &mut Page, studio: &StudioBranding, title: &str) {
    page.fill_rect(0.0, 0.0, PAGE_WIDTH_MM, CONTINUATION_HEIGHT, letterhead_fill());
    page.text_center(
        CENTER,
        15.0,
        TextStyle::new(Font::Bold, 14.0).color(Rgb::WHITE),
        &format!("{} - {title} (Continued)", studio.name),
    );
}

/// Footer note and `Page n of m` on every page, once the page count is known.
fn draw_footers(doc: &mut PdfDocument, note: &str, studio: &StudioBranding) {
    let total = doc.page_count();
    for (i, page) in doc.pages_mut().enumerate() {
        page.line(MARGIN, FOOTER_Y - 5.0, CONTENT_RIGHT, FOOTER_Y - 5.0, 0.2);
        page.text(MARGIN, FOOTER_Y, FOOTER, note);
        page.text_right(
            CONTENT_RIGHT,
            FOOTER_Y,
            FOOTER,
            &format!("Page {} of {total}", i + 1),
        );
        page.text_center(CENTER, FOOTER_Y + 5.0, FOOTER, &studio.name);
    }
}

// ---------------------------------------------------------------------------
// Quotation
// ---------------------------------------------------------------------------

/// One priced row of the quotation table.
struct ServiceLine {
    service: String,
    details: String,
    rate: String,
}

fn coverage_line(category: &str, item: &CoverageService) -> ServiceLine {
    let cameras = match item.camera_count {
        1 => "1 camera".to_string(),
        n => format!("{n} cameras"),
    };
    ServiceLine {
        service: format!("{category} - {}", item.kind.label()),
        details: format!("{}, {cameras}, {}", item.stage.label(), item.session.label()),
        rate: format_inr(item.rate),
    }
}

fn additional_line(item: &AdditionalService) -> ServiceLine {
    let details = if item.quantity > 1 {
        format!("{}, qty {}", item.session.label(), item.quantity)
    } else {
        item.session.label().to_string()
    };
    ServiceLine {
        service: item.display_name().to_string(),
        details,
        rate: format_inr(item.rate),
    }
}

fn service_lines(quotation: &Quotation) -> Vec<ServiceLine> {
    let services = &quotation.services;
    services
        .photography
        .iter()
        .map(|s| coverage_line("Photography", s))
        .chain(
            services
                .videography
                .iter()
                .map(|s| coverage_line("Videography", s)),
        )
        .chain(services.additional.iter().map(additional_line))
        .collect()
}

const SERVICE_COL: f32 = MARGIN;
const DETAILS_COL: f32 = 80.0;

fn draw_service_header(page: &mut Page, y: f32) -> f32 {
    page.text(SERVICE_COL, y, TABLE_HEAD, "Service");
    page.text(DETAILS_COL, y, TABLE_HEAD, "Details");
    page.text_right(CONTENT_RIGHT, y, TABLE_HEAD, "Rate");
    page.line(MARGIN, y + 2.0, CONTENT_RIGHT, y + 2.0, 0.3);
    y + 8.0
}

/// Render a quotation as a letterhead PDF.
pub fn quotation_pdf(studio: &StudioBranding, quotation: &Quotation, customer_name: &str) -> Vec<u8> {
    const TITLE_TEXT: &str = "Quotation";
    let mut doc = PdfDocument::new(format!("Quotation {}", quotation.quotation_number));
    let mut page = doc.add_page();
    draw_letterhead(page, studio);
    page.text_center(CENTER, 55.0, TITLE, "QUOTATION");

    let details = [
        ("Quotation No:", quotation.quotation_number.clone()),
        ("Date:", format_date(quotation.created_at.date_naive())),
        ("Client Name:", customer_name.to_string()),
        ("Event:", quotation.event_type.clone()),
        (
            "Event Dates:",
            format_event_dates(quotation.event_date_start, quotation.event_date_end),
        ),
        ("Location:", quotation.location.clone()),
        (
            "Package:",
            format!("{} ({})", quotation.package_type, quotation.session_type),
        ),
    ];
    let mut y = 68.0;
    for (label, value) in &details {
        page.text(MARGIN, y, LABEL, label);
        page.text(55.0, y, BODY, &truncate(value, BODY.font, BODY.size, CONTENT_RIGHT - 55.0));
        y += 7.0;
    }

    y += 5.0;
    page.text(MARGIN, y, HEADING, "Services");
    y = draw_service_header(page, y + 8.0);

    let lines = service_lines(quotation);
    if lines.is_empty() {
        page.text(MARGIN, y, BODY, "No itemised services");
        y += 7.0;
    }

    let details_width = CONTENT_RIGHT - DETAILS_COL - 35.0;
    for line in &lines {
        let detail_rows = wrap(&line.details, TABLE_CELL.font, TABLE_CELL.size, details_width);
        let height = 6.0 * detail_rows.len().max(1) as f32;
        if y + height > CONTENT_BOTTOM {
            page = doc.add_page();
            draw_continuation_header(page, studio, TITLE_TEXT);
            y = draw_service_header(page, 38.0);
        }
        let service = truncate(
            &line.service,
            TABLE_CELL.font,
            TABLE_CELL.size,
            DETAILS_COL - SERVICE_COL - 3.0,
        );
        page.text(SERVICE_COL, y, TABLE_CELL, &service);
        page.text_right(CONTENT_RIGHT, y, TABLE_CELL, &line.rate);
        for (i, row) in detail_rows.iter().enumerate() {
            page.text(DETAILS_COL, y + 6.0 * i as f32, TABLE_CELL, row);
        }
        y += height;
    }

    // Total block (plus other works) needs room on the current page.
    let other_works = quotation
        .other_works()
        .map(|text| wrap(text, BODY.font, BODY.size, CONTENT_RIGHT - MARGIN))
        .unwrap_or_default();
    let mut needed = 20.0;
    if !other_works.is_empty() {
        needed += 12.0 + 6.0 * other_works.len() as f32;
    }
    if y + needed > CONTENT_BOTTOM {
        page = doc.add_page();
        draw_continuation_header(page, studio, TITLE_TEXT);
        y = 38.0;
    }

    page.line(MARGIN, y, CONTENT_RIGHT, y, 0.5);
    y += 8.0;
    page.text(MARGIN, y, HEADING, "Total Amount");
    page.text_right(CONTENT_RIGHT, y, HEADING, &format_inr(quotation.effective_total()));
    y += 12.0;

    if !other_works.is_empty() {
        page.text(MARGIN, y, LABEL, "Other Works:");
        y += 6.0;
        for row in &other_works {
            page.text(MARGIN, y, BODY, row);
            y += 6.0;
        }
    }

    draw_footers(&mut doc, "This is a computer-generated quotation", studio);
    doc.to_bytes()
}

// ---------------------------------------------------------------------------
// Financial report
// ---------------------------------------------------------------------------

/// Column widths in millimetres, matching [`REPORT_HEADERS`].
const REPORT_COLUMNS: [f32; 7] = [28.0, 34.0, 27.0, 24.0, 24.0, 24.0, 19.0];
/// Amount, Expenses, and Profit are right-aligned.
const NUMERIC_COLUMNS: [bool; 7] = [false, false, false, true, true, true, false];
const ROW_HEIGHT: f32 = 6.0;

fn draw_report_header(page: &mut Page, y: f32) -> f32 {
    draw_report_row(page, y, TABLE_HEAD, &REPORT_HEADERS.map(str::to_string));
    page.line(MARGIN, y + 2.0, CONTENT_RIGHT, y + 2.0, 0.5);
    y + 8.0
}

fn draw_report_row(page: &mut Page, y: f32, style: TextStyle, cells: &[String; 7]) {
    let mut x = MARGIN;
    for ((cell, width), numeric) in cells.iter().zip(REPORT_COLUMNS).zip(NUMERIC_COLUMNS) {
        let text = truncate(cell, style.font, style.size, width - 2.0);
        if numeric {
            page.text_right(x + width - 2.0, y, style, &text);
        } else {
            page.text(x, y, style, &text);
        }
        x += width;
    }
}

/// Render a financial report as a paginated PDF.
pub fn report_pdf(studio: &StudioBranding, report: &FinancialReport) -> Vec<u8> {
    const TITLE_TEXT: &str = "Financial Report";
    let mut doc = PdfDocument::new(format!("{TITLE_TEXT} ({})", report.period.label()));
    let mut page = doc.add_page();
    draw_letterhead(page, studio);
    page.text_center(CENTER, 52.0, TITLE, "FINANCIAL REPORT");

    let meta_y = 62.0;
    page.text(
        MARGIN,
        meta_y,
        BODY,
        &format!("Report Period: {}", report.period.label()),
    );
    page.text_center(CENTER, meta_y, BODY, &format!("Category: {}", report.category));
    page.text_right(
        CONTENT_RIGHT,
        meta_y,
        BODY,
        &format!("Generated: {}", format_date(report.generated_on)),
    );

    let mut y = draw_report_header(page, meta_y + 14.0);

    if report.rows.is_empty() {
        page.text(MARGIN, y, BODY, "No orders in this period");
        y += ROW_HEIGHT;
    }

    for row in &report.rows {
        if y + ROW_HEIGHT > CONTENT_BOTTOM {
            page = doc.add_page();
            draw_continuation_header(page, studio, TITLE_TEXT);
            y = draw_report_header(page, 35.0);
        }
        let cells = [
            row.order_number.clone(),
            row.customer_name.clone(),
            row.event_type.clone(),
            format_amount(row.amount),
            format_amount(row.expenses),
            format_amount(row.profit),
            format_date(row.created_at.date_naive()),
        ];
        draw_report_row(page, y, TABLE_CELL, &cells);
        y += ROW_HEIGHT;
    }

    let summary_height = 40.0;
    y += 10.0;
    if y + summary_height > CONTENT_BOTTOM {
        page = doc.add_page();
        draw_continuation_header(page, studio, TITLE_TEXT);
        y = 38.0;
    }

    let summary = &report.summary;
    page.text(MARGIN, y, HEADING, "Summary:");
    y += 8.0;
    let lines = [
        (BODY, format!("Total Records: {}", summary.record_count)),
        (BODY, format!("Total Revenue: {}", format_inr(summary.total_revenue))),
        (BODY, format!("Total Expenses: {}", format_inr(summary.total_expenses))),
        (LABEL, format!("Net Profit: {}", format_inr(summary.net_profit))),
    ];
    for (style, text) in &lines {
        page.text(MARGIN + 5.0, y, *style, text);
        y += 6.0;
    }

    draw_footers(&mut doc, "This is a computer-generated financial report", studio);
    doc.to_bytes()
}
