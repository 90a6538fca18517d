//! # otcc-extract — Document Text Extraction
//!
//! [`FileTextExtractor`] is the production [`TextExtractor`]: it dispatches
//! on the file extension via [`DocumentFormat`] and returns the plain text
//! the assessment engine scans.
//!
//! | Extension | Reader |
//! |---|---|
//! | `.txt`, `.md` | UTF-8, invalid sequences replaced |
//! | `.pdf` | `pdf-extract` |
//! | `.docx`, `.doc` | ZIP container, `word/document.xml` |
//!
//! Every failure is an [`ExtractError`] carrying the offending path. The PDF
//! reader can panic on malformed files; that panic is caught here and
//! reported as [`ExtractError::Decode`].

mod docx;

use std::any::Any;
use std::panic::{self, AssertUnwindSafe};
use std::path::Path;

use otcc_core::{extension_of, DocumentFormat, ExtractError, TextExtractor};

/// Reads document files from the local filesystem.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileTextExtractor;

impl FileTextExtractor {
    pub fn new() -> Self {
        Self
    }
}

impl TextExtractor for FileTextExtractor {
    fn extract_text(&self, path: &Path) -> Result<String, ExtractError> {
        let format = DocumentFormat::from_path(path).ok_or_else(|| ExtractError::UnsupportedFormat {
            path: path.to_path_buf(),
            extension: extension_of(path),
        })?;

        let text = match format {
            DocumentFormat::PlainText => read_plain(path)?,
            DocumentFormat::Pdf => read_pdf(path)?,
            DocumentFormat::Word => docx::extract(path)?,
        };
        tracing::debug!(file = %path.display(), ?format, chars = text.chars().count(), "extracted text");
        Ok(text)
    }
}

fn read_plain(path: &Path) -> Result<String, ExtractError> {
    let bytes = std::fs::read(path).map_err(|source| ExtractError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}

fn read_pdf(path: &Path) -> Result<String, ExtractError> {
    if !path.is_file() {
        return Err(ExtractError::Io {
            path: path.to_path_buf(),
            source: std::io::Error::new(std::io::ErrorKind::NotFound, "file not found"),
        });
    }
    match panic::catch_unwind(AssertUnwindSafe(|| pdf_extract::extract_text(path))) {
        Ok(Ok(text)) => Ok(text),
        Ok(Err(e)) => Err(ExtractError::Decode {
            path: path.to_path_buf(),
            reason: e.to_string(),
        }),
        Err(payload) => {
            let reason = format!("PDF reader panicked: {}", panic_message(&*payload));
            tracing::warn!(file = %path.display(), %reason, "recovered from PDF reader panic");
            Err(ExtractError::Decode {
                path: path.to_path_buf(),
                reason,
            })
        }
    }
}

fn panic_message(payload: &(dyn Any + Send)) -> &str {
    if let Some(s) = payload.downcast_ref::<&str>() {
        s
    } else if let Some(s) = payload.downcast_ref::<String>() {
        s.as_str()
    } else {
        "unknown panic"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn write_docx(path: &Path, xml: &str) {
        let file = std::fs::File::create(path).unwrap();
        let mut zip = zip::ZipWriter::new(file);
        let options = zip::write::SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Stored);
        zip.start_file("word/document.xml", options).unwrap();
        zip.write_all(xml.as_bytes()).unwrap();
        zip.finish().unwrap();
    }

    #[test]
    fn reads_plain_text_and_markdown() {
        let dir = tempfile::tempdir().unwrap();
        let txt = dir.path().join("policy.txt");
        let md = dir.path().join("README.MD");
        std::fs::write(&txt, "The firewall shall be configured.").unwrap();
        std::fs::write(&md, "# Backup procedure\n").unwrap();

        let extractor = FileTextExtractor::new();
        assert_eq!(
            extractor.extract_text(&txt).unwrap(),
            "The firewall shall be configured."
        );
        assert_eq!(extractor.extract_text(&md).unwrap(), "# Backup procedure\n");
    }

    #[test]
    fn invalid_utf8_is_replaced() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("log.txt");
        std::fs::write(&path, b"SIEM \xff alert").unwrap();
        let text = FileTextExtractor.extract_text(&path).unwrap();
        assert_eq!(text, "SIEM \u{FFFD} alert");
    }

    #[test]
    fn unsupported_extension_is_reported() {
        let err = FileTextExtractor
            .extract_text(Path::new("/tmp/sheet.xlsx"))
            .unwrap_err();
        match err {
            ExtractError::UnsupportedFormat { extension, .. } => assert_eq!(extension, "xlsx"),
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn missing_file_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["gone.txt", "gone.pdf", "gone.docx"] {
            let err = FileTextExtractor.extract_text(&dir.path().join(name)).unwrap_err();
            assert!(matches!(err, ExtractError::Io { .. }), "{name}: {err}");
        }
    }

    #[test]
    fn reads_docx_body() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("network_diagram.docx");
        write_docx(
            &path,
            "<w:document><w:body>\
             <w:p><w:r><w:t>DMZ between IT and OT</w:t></w:r></w:p>\
             <w:p><w:r><w:t>Firewall rules attached</w:t></w:r></w:p>\
             </w:body></w:document>",
        );
        assert_eq!(
            FileTextExtractor.extract_text(&path).unwrap(),
            "DMZ between IT and OT\nFirewall rules attached"
        );
    }

    #[test]
    fn legacy_doc_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("old_policy.doc");
        let mut f = std::fs::File::create(&path).unwrap();
        f.write_all(&[0xD0, 0xCF, 0x11, 0xE0, 0xA1, 0xB1, 0x1A, 0xE1]).unwrap();
        let err = FileTextExtractor.extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Decode { .. }), "{err}");
    }

    /// A PDF whose `/Encrypt` dictionary carries a one-byte `/U` entry.
    fn short_key_encrypted_pdf() -> Vec<u8> {
        let objects = [
            "<< /Type /Catalog /Pages 2 0 R >>",
            "<< /Type /Pages /Kids [3 0 R] /Count 1 >>",
            "<< /Type /Page /Parent 2 0 R /MediaBox [0 0 612 792] >>",
            "<< /Filter /Standard /V 1 /R 2 /O (x) /U (y) /P -4 >>",
        ];
        let mut pdf = b"%PDF-1.4\n".to_vec();
        let mut offsets = Vec::new();
        for (i, body) in objects.iter().enumerate() {
            offsets.push(pdf.len());
            pdf.extend_from_slice(format!("{} 0 obj\n{body}\nendobj\n", i + 1).as_bytes());
        }
        let xref = pdf.len();
        pdf.extend_from_slice(format!("xref\n0 {}\n0000000000 65535 f \n", objects.len() + 1).as_bytes());
        for offset in offsets {
            pdf.extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        pdf.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root 1 0 R /Encrypt 4 0 R /ID [(a) (a)] >>\nstartxref\n{xref}\n%%EOF\n",
                objects.len() + 1
            )
            .as_bytes(),
        );
        pdf
    }

    #[test]
    fn corrupt_encryption_pdf_is_a_decode_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scan.pdf");
        std::fs::write(&path, short_key_encrypted_pdf()).unwrap();
        let err = FileTextExtractor.extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Decode { .. }), "{err}");
    }

    #[test]
    fn panic_payloads_are_described() {
        let caught = panic::catch_unwind(|| panic!("key too short")).unwrap_err();
        assert_eq!(panic_message(&*caught), "key too short");
        let caught = panic::catch_unwind(|| panic!("{} bytes", 1)).unwrap_err();
        assert_eq!(panic_message(&*caught), "1 bytes");
    }

    #[test]
    fn garbage_pdf_fails_to_decode() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.pdf");
        std::fs::write(&path, b"not a pdf at all").unwrap();
        let err = FileTextExtractor.extract_text(&path).unwrap_err();
        assert!(matches!(err, ExtractError::Decode { .. }), "{err}");
    }
}
