//! End-to-end smoke test through the facade crate: a live session
//! produces a document and both exporters write it to disk.

use std::time::Duration;

use tokio::time::timeout;

use patternkit::{
    spawn_session, write_dxf, write_tiled_pdf, BrandStyle, DesignParameters, PageFormat,
    SessionConfig,
};

#[tokio::test]
async fn session_document_exports_to_both_formats() {
    let mut config = SessionConfig::new("Oversized Denim Jacket", BrandStyle::Atelier);
    config.params = DesignParameters::new(70.0, 20.0, 0.0);
    config.debounce = Duration::from_millis(10);
    let session = spawn_session(config);

    let mut rx = session.documents();
    let doc = timeout(Duration::from_secs(5), rx.wait_for(|doc| doc.is_some()))
        .await
        .expect("timed out waiting for first document")
        .expect("session closed before publishing")
        .clone()
        .expect("slot holds a document after wait_for");

    assert!(!doc.pieces.is_empty());

    let dir = tempfile::tempdir().expect("tempdir");
    let dxf_path = write_dxf(&doc, dir.path()).expect("dxf export");
    let pdf_path = write_tiled_pdf(&doc, PageFormat::A4, dir.path()).expect("pdf export");

    let dxf = std::fs::read_to_string(&dxf_path).expect("read dxf");
    assert!(dxf.starts_with("0\nSECTION"));
    assert!(dxf.trim_end().ends_with("EOF"));

    let pdf = std::fs::read(&pdf_path).expect("read pdf");
    assert!(pdf.starts_with(b"%PDF-1.4"));

    session.shutdown().expect("shutdown");
}
