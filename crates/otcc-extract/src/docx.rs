//! Word (DOCX) text extraction.
//!
//! A DOCX file is a ZIP container; the body lives in `word/document.xml`.
//! Paragraph text is the concatenation of its `<w:t>` runs. Inside a
//! `<w:r>` run, `<w:tab/>` is a tab and `<w:br/>`/`<w:cr/>` a line break.
//! Paragraphs are joined with `\n`.
//!
//! Legacy binary `.doc` files are not ZIP containers and fail here with
//! [`ExtractError::Decode`].

use std::fs::File;
use std::io::Read;
use std::path::Path;

use otcc_core::ExtractError;

const DOCUMENT_PART: &str = "word/document.xml";

pub(crate) fn extract(path: &Path) -> Result<String, ExtractError> {
    let file = File::open(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let decode = |reason: String| ExtractError::Decode {
        path: path.to_path_buf(),
        reason,
    };

    let mut archive = zip::ZipArchive::new(file).map_err(|e| decode(format!("not a DOCX container: {e}")))?;
    let mut part = archive
        .by_name(DOCUMENT_PART)
        .map_err(|e| decode(format!("missing {DOCUMENT_PART}: {e}")))?;

    let mut xml = String::new();
    part.read_to_string(&mut xml)
        .map_err(|e| decode(format!("unreadable {DOCUMENT_PART}: {e}")))?;

    Ok(document_text(&xml))
}

/// Plain text of a WordprocessingML body.
pub(crate) fn document_text(xml: &str) -> String {
    let mut paragraphs: Vec<String> = Vec::new();
    let mut current = String::new();
    let mut in_text = false;
    // `w:tab` also defines tab stops under `w:pPr`; only run content counts.
    let mut run_depth = 0usize;
    let mut rest = xml;

    while let Some(open) = rest.find('<') {
        if in_text {
            current.push_str(&unescape(&rest[..open]));
        }
        let Some(close) = rest[open..].find('>') else {
            break;
        };
        let tag = &rest[open + 1..open + close];
        rest = &rest[open + close + 1..];

        let self_closing = tag.ends_with('/');
        let name = tag
            .trim_start_matches('/')
            .trim_end_matches('/')
            .split_whitespace()
            .next()
            .unwrap_or("");

        match (name, tag.starts_with('/')) {
            ("w:t", false) => in_text = !self_closing,
            ("w:t", true) => in_text = false,
            ("w:r", false) if !self_closing => run_depth += 1,
            ("w:r", true) => run_depth = run_depth.saturating_sub(1),
            ("w:tab", false) if run_depth > 0 => current.push('\t'),
            ("w:br" | "w:cr", false) if run_depth > 0 => current.push('\n'),
            ("w:p", true) => paragraphs.push(std::mem::take(&mut current)),
            ("w:p", false) if self_closing => paragraphs.push(String::new()),
            _ => {}
        }
    }
    if !current.is_empty() {
        paragraphs.push(current);
    }
    paragraphs.join("\n")
}

/// Decode the five predefined XML entities and numeric character references.
fn unescape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    let mut rest = raw;
    while let Some(amp) = rest.find('&') {
        out.push_str(&rest[..amp]);
        let after = &rest[amp..];
        let Some(semi) = after.find(';') else {
            out.push_str(after);
            return out;
        };
        let entity = &after[1..semi];
        match decode_entity(entity) {
            Some(c) => out.push(c),
            None => out.push_str(&after[..=semi]),
        }
        rest = &after[semi + 1..];
    }
    out.push_str(rest);
    out
}

fn decode_entity(entity: &str) -> Option<char> {
    match entity {
        "amp" => Some('&'),
        "lt" => Some('<'),
        "gt" => Some('>'),
        "quot" => Some('"'),
        "apos" => Some('\''),
        _ => {
            let code = if let Some(hex) = entity.strip_prefix("#x").or_else(|| entity.strip_prefix("#X")) {
                u32::from_str_radix(hex, 16).ok()?
            } else {
                entity.strip_prefix('#')?.parse().ok()?
            };
            char::from_u32(code)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn paragraphs_are_joined_with_newlines() {
        let xml = r#"<?xml version="1.0"?><w:document><w:body>
            <w:p><w:r><w:t>Firewall rules</w:t></w:r><w:r><w:t xml:space="preserve"> are reviewed.</w:t></w:r></w:p>
            <w:p><w:r><w:t>Second</w:t><w:tab/><w:t>para</w:t></w:r></w:p>
            </w:body></w:document>"#;
        assert_eq!(document_text(xml), "Firewall rules are reviewed.\nSecond\tpara");
    }

    #[test]
    fn tab_stop_definitions_are_not_text() {
        let xml = r#"<w:p><w:pPr><w:tabs><w:tab w:val="left" w:pos="720"/><w:tab w:val="right" w:pos="9360"/></w:tabs></w:pPr><w:r><w:t>Asset</w:t><w:tab/><w:t>Owner</w:t></w:r></w:p>"#;
        assert_eq!(document_text(xml), "Asset\tOwner");
    }

    #[test]
    fn entities_are_decoded() {
        let xml = "<w:p><w:r><w:t>IT &amp; OT &lt;zones&gt; &#233;t&#xE9; &bogus;</w:t></w:r></w:p>";
        assert_eq!(document_text(xml), "IT & OT <zones> été &bogus;");
    }

    #[test]
    fn text_outside_runs_is_ignored() {
        let xml = "<w:p><w:r><w:instrText>PAGE</w:instrText><w:t>body</w:t></w:r></w:p>";
        assert_eq!(document_text(xml), "body");
    }

    #[test]
    fn empty_paragraphs_are_kept() {
        let xml = "<w:p><w:r><w:t>a</w:t></w:r></w:p><w:p/><w:p><w:r><w:t>b</w:t></w:r></w:p>";
        assert_eq!(document_text(xml), "a\n\nb");
    }

    #[test]
    fn line_breaks_inside_paragraph() {
        let xml = "<w:p><w:r><w:t>one</w:t><w:br/><w:t>two</w:t></w:r></w:p>";
        assert_eq!(document_text(xml), "one\ntwo");
    }
}
