//! HTML report generator.
//!
//! One page template, one row template: every difference becomes an escaped
//! table row, and the joined rows are substituted into the page at the
//! `@TABLE_BODY` placeholder.

use std::fmt::Write;

use super::escape::escape_html;
use super::{ReportError, ReportFormat, ReportGenerator, ReportMeta};
use crate::diff::{DiffResult, Difference};

const PAGE_TEMPLATE: &str = r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>@TITLE</title>
    <style>
        :root {
            --bg-color: #1e1e2e;
            --text-color: #cdd6f4;
            --accent-color: #89b4fa;
            --old-color: #f38ba8;
            --new-color: #a6e3a1;
            --border-color: #45475a;
            --card-bg: #313244;
        }
        body {
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
            background-color: var(--bg-color);
            color: var(--text-color);
            margin: 0;
            padding: 20px;
            line-height: 1.6;
        }
        .container { max-width: 1100px; margin: 0 auto; }
        h1 { color: var(--accent-color); }
        .header {
            border-bottom: 2px solid var(--border-color);
            padding-bottom: 20px;
            margin-bottom: 30px;
        }
        .meta { color: #a6adc8; font-size: 0.9em; }
        .card {
            background-color: var(--card-bg);
            border-radius: 8px;
            padding: 14px 20px;
            border: 1px solid var(--border-color);
            display: inline-block;
            margin-bottom: 30px;
        }
        .card-value { font-size: 1.6em; font-weight: bold; }
        table {
            width: 100%;
            border-collapse: collapse;
            background-color: var(--card-bg);
            border-radius: 8px;
            overflow: hidden;
        }
        th, td {
            padding: 10px 14px;
            text-align: left;
            border-bottom: 1px solid var(--border-color);
            vertical-align: top;
        }
        th { background-color: #45475a; font-weight: 600; }
        tr:hover { background-color: #3b3d4d; }
        td.path { font-family: ui-monospace, SFMono-Regular, Menlo, monospace; }
        td.old { color: var(--old-color); }
        td.new { color: var(--new-color); }
        td.identical { color: #a6adc8; text-align: center; }
        .footer {
            margin-top: 40px;
            padding-top: 20px;
            border-top: 1px solid var(--border-color);
            font-size: 0.9em;
            color: #a6adc8;
        }
    </style>
</head>
<body>
<div class="container">
    <div class="header">
        <h1>@TITLE</h1>
        <p>@OLD &rarr; @NEW</p>
        <p class="meta">Generated by flver-diff v@VERSION on @GENERATED</p>
    </div>
    <div class="card">
        <div class="meta">Differences</div>
        <div class="card-value">@COUNT</div>
    </div>
    <table>
        <thead>
            <tr>
                <th>Path</th>
                <th>Old</th>
                <th>New</th>
            </tr>
        </thead>
        <tbody>
@TABLE_BODY
        </tbody>
    </table>
    <div class="footer">
        <p>@SKIPPED</p>
    </div>
</div>
</body>
</html>
"##;

/// HTML report generator
pub struct HtmlReporter;

impl HtmlReporter {
    pub fn new() -> Self {
        Self
    }

    fn table_row(difference: &Difference) -> String {
        format!(
            "            <tr>\n                <td class=\"path\">{}</td>\n                <td class=\"old\">{}</td>\n                <td class=\"new\">{}</td>\n            </tr>",
            escape_html(&difference.path),
            escape_html(&difference.left),
            escape_html(&difference.right),
        )
    }
}

impl Default for HtmlReporter {
    fn default() -> Self {
        Self::new()
    }
}

impl ReportGenerator for HtmlReporter {
    fn generate(&self, result: &DiffResult, meta: &ReportMeta) -> Result<String, ReportError> {
        let mut body = String::new();
        if result.is_empty() {
            writeln!(
                body,
                "            <tr><td colspan=\"3\" class=\"identical\">No differences found.</td></tr>"
            )?;
        } else {
            for difference in result {
                writeln!(body, "{}", Self::table_row(difference))?;
            }
        }

        let skipped = if result.skipped_members.is_empty() {
            String::new()
        } else {
            format!(
                "{} unreadable member(s) skipped during comparison.",
                result.skipped_members.len()
            )
        };

        Ok(PAGE_TEMPLATE
            .replace("@TABLE_BODY", body.trim_end())
            .replace("@TITLE", "FLVER Diff Report")
            .replace("@OLD", &escape_html(&meta.left))
            .replace("@NEW", &escape_html(&meta.right))
            .replace("@VERSION", &escape_html(&meta.tool_version))
            .replace(
                "@GENERATED",
                &meta.generated_at.format("%Y-%m-%d %H:%M:%S UTC").to_string(),
            )
            .replace("@COUNT", &result.len().to_string())
            .replace("@SKIPPED", &skipped))
    }

    fn format(&self) -> ReportFormat {
        ReportFormat::Html
    }
}
