//! Static HTML export of a ledger snapshot.

use core::fmt::Write as _;

use crate::snapshot::LedgerSnapshot;

const HEADERS: [&str; 6] = ["Product", "Initial", "Production", "Shipment", "Returns", "Final"];

const STYLE: &str = "\
        body { font-family: Tahoma, sans-serif; }
        table { width: 100%; border-collapse: collapse; }
        th, td { border: 1px solid black; padding: 8px; text-align: center; }
        th { background-color: #f2f2f2; }
        tr.negative td.final { color: #c62828; font-weight: bold; }
        tr.total td { font-weight: bold; background-color: #fafafa; }";

/// Render the snapshot as a standalone HTML document.
///
/// One row per product in catalog order, then a total row. Rows whose final
/// stock is negative carry the `negative` class.
pub fn render_html(snapshot: &LedgerSnapshot) -> String {
    let date = snapshot.date.format("%Y-%m-%d");
    let mut html = String::new();

    let _ = write!(
        html,
        "<!DOCTYPE html>\n\
         <html lang=\"fa\" dir=\"rtl\">\n\
         <head>\n    \
             <meta charset=\"UTF-8\">\n    \
             <title>Kebab inventory report - {date}</title>\n    \
             <style>\n{STYLE}\n    </style>\n\
         </head>\n\
         <body>\n    \
             <h1>Kebab inventory report - {date}</h1>\n    \
             <table>\n        <tr>"
    );
    for header in HEADERS {
        let _ = write!(html, "<th>{header}</th>");
    }
    html.push_str("</tr>");

    for row in &snapshot.rows {
        let class = if row.is_negative() { " class=\"negative\"" } else { "" };
        let _ = write!(
            html,
            "\n        <tr{class}>\
             <td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"final\">{}</td>\
             </tr>",
            escape_html(&row.product),
            row.initial,
            row.production,
            row.shipment,
            row.returns,
            row.final_stock,
        );
    }

    let t = &snapshot.totals;
    let _ = write!(
        html,
        "\n        <tr class=\"total\">\
         <td>Total</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td class=\"final\">{}</td>\
         </tr>\n    </table>\n</body>\n</html>\n",
        t.initial, t.production, t.shipment, t.returns, t.final_stock,
    );

    html
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Catalog, Ledger, TableKind};
    use chrono::NaiveDate;

    fn sample() -> LedgerSnapshot {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let mut ledger = Ledger::with_date(Catalog::new(["A", "B"]).unwrap(), date);
        ledger.apply_edits(TableKind::Initial, [("A", "10"), ("B", "5")]).unwrap();
        ledger.apply_edits(TableKind::Production, [("A", "2")]).unwrap();
        ledger.apply_edits(TableKind::Shipment, [("A", "3"), ("B", "8")]).unwrap();
        ledger.snapshot()
    }

    #[test]
    fn title_carries_the_session_date() {
        let html = render_html(&sample());
        assert!(html.starts_with("<!DOCTYPE html>\n<html lang=\"fa\" dir=\"rtl\">\n"));
        assert!(html.contains("<title>Kebab inventory report - 2024-01-01</title>"));
        assert!(html.contains("<meta charset=\"UTF-8\">"));
    }

    #[test]
    fn header_then_rows_in_catalog_order_then_total() {
        let html = render_html(&sample());
        assert!(html.contains(
            "<tr><th>Product</th><th>Initial</th><th>Production</th><th>Shipment</th><th>Returns</th><th>Final</th></tr>"
        ));

        let a = html.find("<td>A</td>").unwrap();
        let b = html.find("<td>B</td>").unwrap();
        let total = html.find("<td>Total</td>").unwrap();
        assert!(a < b && b < total);

        assert!(html.contains(
            "<tr><td>A</td><td>10</td><td>2</td><td>3</td><td>0</td><td class=\"final\">9</td></tr>"
        ));
        assert!(html.contains(
            "<tr class=\"total\"><td>Total</td><td>15</td><td>2</td><td>11</td><td>0</td><td class=\"final\">6</td></tr>"
        ));
        assert!(html.trim_end().ends_with("</html>"));
    }

    #[test]
    fn negative_final_stock_is_flagged() {
        let html = render_html(&sample());
        assert!(html.contains("<tr class=\"negative\"><td>B</td>"));
        assert_eq!(html.matches("class=\"negative\"").count(), 1);
    }

    #[test]
    fn product_names_are_escaped() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 1).unwrap();
        let ledger = Ledger::with_date(Catalog::new(["<b>Kofta & co</b>"]).unwrap(), date);
        let html = render_html(&ledger.snapshot());
        assert!(html.contains("<td>&lt;b&gt;Kofta &amp; co&lt;/b&gt;</td>"));
    }

    #[test]
    fn rendering_is_deterministic() {
        assert_eq!(render_html(&sample()), render_html(&sample()));
    }
}
