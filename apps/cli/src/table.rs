//! Plain-text table output for `render --format table`.

use utilreport_shared::DisplayRow;

const HEADERS: [&str; 7] = [
    "Person",
    "Past 12 Months",
    "Y2D",
    "June",
    "July",
    "August",
    "Net Earnings Prev Month",
];

/// Gap between columns.
const SEPARATOR: &str = "  ";

fn cells(row: &DisplayRow) -> [&str; 7] {
    [
        row.person.as_str(),
        row.past12_months.as_str(),
        row.y2d.as_str(),
        row.june.as_str(),
        row.july.as_str(),
        row.august.as_str(),
        row.net_earnings_prev_month.as_str(),
    ]
}

/// Render rows as left-aligned, space-padded columns under a header line.
/// Widths are measured in chars so the placeholder dash lines up.
pub(crate) fn render(rows: &[DisplayRow]) -> String {
    let mut widths = HEADERS.map(|h| h.chars().count());
    for row in rows {
        for (width, cell) in widths.iter_mut().zip(cells(row)) {
            *width = (*width).max(cell.chars().count());
        }
    }

    let mut out = String::new();
    push_line(&mut out, HEADERS, &widths);
    let rule = widths.map(|w| "-".repeat(w));
    push_line(&mut out, rule.each_ref().map(String::as_str), &widths);
    for row in rows {
        push_line(&mut out, cells(row), &widths);
    }
    out
}

fn push_line(out: &mut String, cells: [&str; 7], widths: &[usize; 7]) {
    let mut line = String::new();
    for (i, (cell, width)) in cells.iter().zip(widths).enumerate() {
        if i > 0 {
            line.push_str(SEPARATOR);
        }
        line.push_str(cell);
        let pad = width - cell.chars().count();
        line.extend(std::iter::repeat_n(' ', pad));
    }
    out.push_str(line.trim_end());
    out.push('\n');
}
