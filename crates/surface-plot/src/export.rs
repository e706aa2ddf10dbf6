//! Standalone interactive HTML documents.

use std::path::{Path, PathBuf};

use chrono::Utc;
use tracing::info;
use uuid::Uuid;

use crate::errors::ExportError;
use crate::scene::Scene;

const PLOTLY_CDN: &str = "https://cdn.plot.ly/plotly-2.35.2.min.js";

/// Render `scene` as an HTML page that draws it with plotly.js.
pub fn to_html(scene: &Scene) -> Result<String, ExportError> {
    let figure =
        serde_json::to_string(scene).map_err(|e| ExportError::Serialization(e.to_string()))?;
    // Keep the JSON from closing the surrounding script tag.
    let figure = figure.replace("</", "<\\/");

    let div_id = format!("plot-{}", Uuid::new_v4().simple());
    let title = escape_html(&scene.layout.title.text);
    let generated = Utc::now().to_rfc3339();

    Ok(format!(
        r#"<!DOCTYPE html>
<!-- generated {generated} -->
<html>
<head>
<meta charset="utf-8">
<title>{title}</title>
<script src="{PLOTLY_CDN}" charset="utf-8"></script>
</head>
<body style="margin:0">
<div id="{div_id}" style="width:{width}px;height:{height}px;"></div>
<script type="text/javascript">
const figure = {figure};
Plotly.newPlot("{div_id}", figure.data, figure.layout, {{"responsive": true}});
</script>
</body>
</html>
"#,
        width = scene.layout.width,
        height = scene.layout.height,
    ))
}

/// Write `<output_dir>/<identifier>.html`, creating the directory if needed.
pub fn write_html(
    scene: &Scene,
    output_dir: &Path,
    identifier: &str,
) -> Result<PathBuf, ExportError> {
    validate_identifier(identifier)?;

    std::fs::create_dir_all(output_dir).map_err(|e| ExportError::Io {
        path: output_dir.to_path_buf(),
        reason: e.to_string(),
    })?;

    let path = output_dir.join(format!("{identifier}.html"));
    let html = to_html(scene)?;
    std::fs::write(&path, html).map_err(|e| ExportError::Io {
        path: path.clone(),
        reason: e.to_string(),
    })?;

    info!(path = %path.display(), "wrote interactive document");
    Ok(path)
}

fn validate_identifier(identifier: &str) -> Result<(), ExportError> {
    let bad = identifier.is_empty()
        || identifier == "."
        || identifier == ".."
        || identifier.contains(['/', '\\']);
    if bad {
        return Err(ExportError::InvalidIdentifier(identifier.to_string()));
    }
    Ok(())
}

fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            _ => out.push(c),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identifiers_cannot_escape_output_dir() {
        for bad in ["", ".", "..", "a/b", "..\\x"] {
            assert_eq!(
                validate_identifier(bad),
                Err(ExportError::InvalidIdentifier(bad.to_string()))
            );
        }
        assert!(validate_identifier("skull").is_ok());
    }

    #[test]
    fn title_is_escaped() {
        assert_eq!(escape_html("a<b> & \"c\""), "a&lt;b&gt; &amp; &quot;c&quot;");
    }
}
