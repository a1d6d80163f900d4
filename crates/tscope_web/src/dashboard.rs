//! Read-only HTML view of the `summaries` table.

use tscope_storage::StoredSummary;

fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// One table row per stored summary, in the order given.
pub fn render_dashboard(records: &[StoredSummary]) -> String {
    let mut html = String::from("<!DOCTYPE html>\n<html>\n<head>\n");
    html.push_str("  <meta charset=\"utf-8\">\n");
    html.push_str("  <title>TechScope Dashboard</title>\n");
    html.push_str("</head>\n<body>\n");
    html.push_str(&format!("  <h1>TechScope Dashboard</h1>\n  <p>{} stored summaries</p>\n", records.len()));

    if records.is_empty() {
        html.push_str("  <p>No summaries yet.</p>\n");
    } else {
        html.push_str("  <table>\n");
        html.push_str("    <tr><th>Summary</th><th>Credibility</th><th>Keywords</th><th>Created</th></tr>\n");
        for record in records {
            let credibility = record
                .credibility
                .map(|c| format!("{:.2}", c))
                .unwrap_or_else(|| "-".to_string());
            html.push_str(&format!(
                "    <tr id=\"{}\"><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape_html(&record.id),
                escape_html(record.summary.as_deref().unwrap_or_default()),
                credibility,
                escape_html(&record.keywords.join(", ")),
                escape_html(&record.created_at),
            ));
        }
        html.push_str("  </table>\n");
    }

    html.push_str("</body>\n</html>\n");
    html
}
