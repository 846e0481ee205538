// src/export/print.rs
use tracing::info;

use super::{download_filename, ExportArtifact};
use crate::preview::{self, html};
use crate::types::Portfolio;

const PRINT_STYLE: &str = r#"
  * { margin: 0; padding: 0; box-sizing: border-box; }
  body { font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, 'Helvetica Neue', Arial, sans-serif; line-height: 1.6; color: #000; background: #fff; padding: 20px; }
  h1 { font-size: 28px; margin-bottom: 4px; }
  h2 { font-size: 18px; font-weight: bold; margin: 15px 0 10px; border-bottom: 2px solid #333; }
  h3 { font-size: 14px; font-weight: bold; margin: 10px 0 5px; }
  p { margin: 5px 0; }
  img.profile { width: 128px; height: 128px; object-fit: cover; border-radius: 8px; float: left; margin-right: 24px; }
  .identity { overflow: hidden; padding-bottom: 16px; border-bottom: 2px solid #e5e7eb; }
  .contact-info { display: flex; gap: 20px; flex-wrap: wrap; list-style: none; font-size: 13px; }
  .project-item { margin-bottom: 15px; padding-left: 12px; border-left: 4px solid #3b82f6; }
  .project-tags { display: flex; gap: 5px; flex-wrap: wrap; margin-top: 5px; }
  .tag { background: #e0e0e0; padding: 2px 6px; border-radius: 3px; font-size: 12px; }
  .meta, .detail { color: #555; font-size: 13px; }
  @media print {
    body { margin: 0; }
    .section { page-break-inside: avoid; }
  }
"#;

/// Standalone HTML page that opens the print dialog once loaded.
#[derive(Debug, Clone, Copy, Default)]
pub struct PrintExporter;

impl PrintExporter {
    pub fn render(&self, portfolio: &Portfolio) -> String {
        let document = preview::render(portfolio);
        let title = document.header.name.as_deref().unwrap_or("Portfolio");
        format!(
            "<!DOCTYPE html>\n<html>\n<head>\n<meta charset=\"utf-8\">\n<title>{}</title>\n<style>{}</style>\n</head>\n<body>\n{}<script>window.addEventListener(\"load\", function () {{ window.focus(); window.print(); }});</script>\n</body>\n</html>\n",
            html::escape(title),
            PRINT_STYLE,
            html::to_html(&document)
        )
    }

    pub fn export(&self, portfolio: &Portfolio) -> ExportArtifact {
        let page = self.render(portfolio);
        info!("Prepared print job ({} bytes)", page.len());
        ExportArtifact {
            filename: download_filename(&portfolio.name, "html"),
            content_type: "text/html; charset=utf-8",
            bytes: page.into_bytes(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_print_page_invokes_dialog() {
        let page = PrintExporter.render(&Portfolio {
            name: "Ada & Co".to_string(),
            ..Portfolio::default()
        });
        assert!(page.starts_with("<!DOCTYPE html>"));
        assert!(page.contains("<title>Ada &amp; Co</title>"));
        assert!(page.contains("window.print()"));
        assert!(page.contains("@media print"));
    }

    #[test]
    fn test_untitled_print_job() {
        let artifact = PrintExporter.export(&Portfolio::default());
        assert_eq!(artifact.filename, "portfolio.html");
        let page = String::from_utf8(artifact.bytes).unwrap();
        assert!(page.contains("<title>Portfolio</title>"));
    }
}
