//! Matrix HTML Renderer
//!
//! Renders `ModuleMatrices` as a self-contained HTML document with two
//! stacked heat-tables: "Provider" above "Dependencies".

use std::path::{Path, PathBuf};

use tracing::info;

use crate::domain::matrix::{BinaryMatrix, ModuleMatrices};
use crate::ports::MatrixRenderer;

pub struct HtmlMatrixRenderer;

impl MatrixRenderer for HtmlMatrixRenderer {
    fn render(&self, matrices: &ModuleMatrices, out_dir: &Path) -> std::io::Result<PathBuf> {
        let path = out_dir.join(format!("{}.html", matrices.module));
        let content = Self::to_html(matrices)?;
        std::fs::write(&path, content)?;
        info!(module = %matrices.module, path = %path.display(), "Wrote matrix document");
        Ok(path)
    }
}

impl HtmlMatrixRenderer {
    /// Convert matrices to an HTML document string.
    pub fn to_html(matrices: &ModuleMatrices) -> std::io::Result<String> {
        let title = Self::escape(&matrices.module);
        let mut lines = Vec::new();

        lines.push("<!DOCTYPE html>".to_string());
        lines.push("<html lang=\"en\">".to_string());
        lines.push("<head>".to_string());
        lines.push("<meta charset=\"utf-8\">".to_string());
        lines.push(format!("<title>{}</title>", title));
        lines.push("<style>".to_string());
        lines.push("  body { font-family: Helvetica, Arial, sans-serif; margin: 2em; }".to_string());
        lines.push("  table { border-collapse: collapse; margin-bottom: 2em; }".to_string());
        lines.push("  th, td { border: 1px solid #5c5f77; padding: 4px 8px; text-align: center; }".to_string());
        lines.push("  th.row { text-align: right; }".to_string());
        lines.push(format!("  td.on {{ background: {}; color: #ffffff; }}", Self::cell_color(true)));
        lines.push(format!("  td.off {{ background: {}; }}", Self::cell_color(false)));
        lines.push("</style>".to_string());
        lines.push("</head>".to_string());
        lines.push("<body>".to_string());
        lines.push(format!("<h1>{}</h1>", title));

        Self::push_panel(&mut lines, "Provider", matrices, &matrices.provider);
        Self::push_panel(&mut lines, "Dependencies", matrices, &matrices.dependencies);

        // Machine-readable copy for downstream tools.
        let json = serde_json::to_string(matrices)?.replace("</", "<\\/");
        lines.push("<script type=\"application/json\" id=\"matrices\">".to_string());
        lines.push(json);
        lines.push("</script>".to_string());

        lines.push("</body>".to_string());
        lines.push("</html>".to_string());

        Ok(lines.join("\n"))
    }

    fn push_panel(
        lines: &mut Vec<String>,
        title: &str,
        matrices: &ModuleMatrices,
        matrix: &BinaryMatrix,
    ) {
        lines.push("<section>".to_string());
        lines.push(format!("<h2>{}</h2>", title));
        lines.push("<table>".to_string());

        let header: String = matrices
            .column_labels
            .iter()
            .map(|c| format!("<th>{}</th>", Self::escape(c)))
            .collect();
        lines.push(format!("<tr><th></th>{}</tr>", header));

        for (row, label) in matrices.row_labels.iter().enumerate() {
            let cells: String = matrix
                .row(row)
                .iter()
                .map(|v| {
                    let class = if *v == 1 { "on" } else { "off" };
                    format!("<td class=\"{}\">{}</td>", class, v)
                })
                .collect();
            lines.push(format!(
                "<tr><th class=\"row\">{}</th>{}</tr>",
                Self::escape(label),
                cells
            ));
        }

        lines.push("</table>".to_string());
        lines.push("</section>".to_string());
    }

    fn cell_color(on: bool) -> &'static str {
        if on {
            "#d20f39" // Hot
        } else {
            "#fff7e6"
        }
    }

    fn escape(label: &str) -> String {
        label
            .replace('&', "&amp;")
            .replace('<', "&lt;")
            .replace('>', "&gt;")
            .replace('"', "&quot;")
    }
}
