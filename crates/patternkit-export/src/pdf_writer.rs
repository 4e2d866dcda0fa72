//! Minimal PDF 1.4 writer.
//!
//! Builds a PDF as a flat list of numbered objects plus the xref table
//! and trailer. Only what the tiled exporter needs: page trees,
//! uncompressed content streams, and the built-in Helvetica font.
//! Platform-agnostic by construction: everything is appended to an
//! in-memory byte buffer.

/// Points per millimeter (PDF user space is 1/72 inch).
pub const MM_TO_PT: f64 = 72.0 / 25.4;

/// Converts millimeters to PDF points.
pub fn mm(v: f64) -> f64 {
    v * MM_TO_PT
}

/// An in-progress PDF document.
pub struct PdfWriter {
    /// Object bodies, index 0 holding object number 1.
    objects: Vec<Vec<u8>>,
}

impl PdfWriter {
    pub fn new() -> Self {
        Self { objects: Vec::new() }
    }

    /// Adds a finished object, returning its object number.
    pub fn add_object(&mut self, body: Vec<u8>) -> usize {
        self.objects.push(body);
        self.objects.len()
    }

    /// Reserves an object number to be filled in later (needed for
    /// parent references that must be known before their children).
    pub fn reserve(&mut self) -> usize {
        self.objects.push(Vec::new());
        self.objects.len()
    }

    /// Fills a previously reserved object.
    pub fn set_object(&mut self, id: usize, body: Vec<u8>) {
        self.objects[id - 1] = body;
    }

    /// Adds a content stream object wrapping the given operators.
    pub fn add_stream(&mut self, content: &str) -> usize {
        let bytes = content.as_bytes();
        let mut body = format!("<< /Length {} >>\nstream\n", bytes.len()).into_bytes();
        body.extend_from_slice(bytes);
        body.extend_from_slice(b"\nendstream");
        self.add_object(body)
    }

    /// Serializes the document with the given catalog object as root.
    pub fn finish(self, root_id: usize) -> Vec<u8> {
        let mut out = b"%PDF-1.4\n".to_vec();

        let mut offsets = Vec::with_capacity(self.objects.len());
        for (i, body) in self.objects.iter().enumerate() {
            offsets.push(out.len());
            out.extend_from_slice(format!("{} 0 obj\n", i + 1).as_bytes());
            out.extend_from_slice(body);
            out.extend_from_slice(b"\nendobj\n");
        }

        let xref_offset = out.len();
        out.extend_from_slice(format!("xref\n0 {}\n", self.objects.len() + 1).as_bytes());
        out.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &offsets {
            out.extend_from_slice(format!("{:010} 00000 n \n", offset).as_bytes());
        }
        out.extend_from_slice(
            format!(
                "trailer\n<< /Size {} /Root {} 0 R >>\nstartxref\n{}\n%%EOF\n",
                self.objects.len() + 1,
                root_id,
                xref_offset
            )
            .as_bytes(),
        );
        out
    }
}

impl Default for PdfWriter {
    fn default() -> Self {
        Self::new()
    }
}

/// Escapes a string for a PDF literal string `( ... )`.
pub fn escape_text(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '(' => out.push_str("\\("),
            ')' => out.push_str("\\)"),
            '\\' => out.push_str("\\\\"),
            c if c.is_ascii() => out.push(c),
            // Helvetica/WinAnsi only; anything exotic degrades politely.
            _ => out.push('?'),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn finished_document_has_header_xref_and_trailer() {
        let mut w = PdfWriter::new();
        let stream = w.add_stream("0 0 m 10 10 l S");
        let pages = w.reserve();
        let page = w.add_object(
            format!(
                "<< /Type /Page /Parent {} 0 R /MediaBox [0 0 100 100] /Contents {} 0 R >>",
                pages, stream
            )
            .into_bytes(),
        );
        w.set_object(
            pages,
            format!("<< /Type /Pages /Kids [{} 0 R] /Count 1 >>", page).into_bytes(),
        );
        let catalog = w.add_object(format!("<< /Type /Catalog /Pages {} 0 R >>", pages).into_bytes());
        let bytes = w.finish(catalog);

        assert!(bytes.starts_with(b"%PDF-1.4\n"));
        assert!(bytes.ends_with(b"%%EOF\n"));
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("xref\n0 5\n"));
        assert!(text.contains("/Root 4 0 R"));
    }

    #[test]
    fn stream_length_matches_content() {
        let mut w = PdfWriter::new();
        w.add_stream("BT ET");
        let bytes = w.finish(1);
        let text = String::from_utf8_lossy(&bytes);
        assert!(text.contains("/Length 5"));
        assert!(text.contains("stream\nBT ET\nendstream"));
    }

    #[test]
    fn text_escaping() {
        assert_eq!(escape_text("a(b)c\\d"), "a\\(b\\)c\\\\d");
        assert_eq!(escape_text("café"), "caf?");
    }

    #[test]
    fn mm_conversion() {
        assert!((mm(25.4) - 72.0).abs() < 1e-9);
    }
}
