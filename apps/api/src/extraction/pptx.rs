//! PPTX text reader: slides in presentation order, one line per shape paragraph.

use std::collections::HashMap;
use std::io::{Cursor, Read, Seek};

use quick_xml::events::Event;
use quick_xml::Reader;
use tracing::warn;
use zip::ZipArchive;

use super::ExtractionError;

const PRESENTATION_PATH: &str = "ppt/presentation.xml";
const PRESENTATION_RELS_PATH: &str = "ppt/_rels/presentation.xml.rels";

/// Concatenates the text of every shape on every slide. Each shape ends with a newline.
/// Any archive part that inflates past `max_part_bytes` aborts extraction.
pub fn extract_text(data: &[u8], max_part_bytes: u64) -> Result<String, ExtractionError> {
    let mut archive = ZipArchive::new(Cursor::new(data))
        .map_err(|e| ExtractionError::Pptx(format!("Failed to open archive: {e}")))?;

    let mut text = String::new();
    for slide_path in slide_order(&mut archive, max_part_bytes)? {
        let xml = read_entry(&mut archive, &slide_path, max_part_bytes)?;
        for shape in shape_texts(&xml) {
            text.push_str(&shape);
            text.push('\n');
        }
    }
    Ok(text)
}

/// Slide part paths in deck order. `sldIdLst` in presentation.xml is authoritative; when it is
/// missing the slide number in the part name decides.
fn slide_order<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    max_part_bytes: u64,
) -> Result<Vec<String>, ExtractionError> {
    let rels = read_entry(archive, PRESENTATION_RELS_PATH, max_part_bytes)?;
    let targets = slide_relationships(&rels)?;

    let listed = match read_entry(archive, PRESENTATION_PATH, max_part_bytes) {
        Ok(xml) => slide_ids(&xml)?,
        Err(e @ ExtractionError::PartTooLarge { .. }) => return Err(e),
        Err(_) => Vec::new(),
    };

    if !listed.is_empty() {
        return Ok(listed
            .iter()
            .filter_map(|id| targets.get(id).cloned())
            .collect());
    }

    let mut paths: Vec<String> = targets.into_values().collect();
    paths.sort_by_key(|p| (slide_number(p), p.clone()));
    Ok(paths)
}

/// Maps relationship id to archive path for every slide relationship.
fn slide_relationships(xml: &str) -> Result<HashMap<String, String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut slides = HashMap::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"Relationship" =>
            {
                let mut rel_type = String::new();
                let mut target = String::new();
                let mut id = String::new();

                for attr in e.attributes().flatten() {
                    let value = String::from_utf8_lossy(&attr.value).to_string();
                    match attr.key.as_ref() {
                        b"Type" => rel_type = value,
                        b"Target" => target = value,
                        b"Id" => id = value,
                        _ => {}
                    }
                }

                if rel_type.ends_with("/slide") {
                    slides.insert(id, part_path(&target));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Pptx(format!(
                    "Error parsing relationships: {e}"
                )))
            }
            _ => {}
        }
    }

    Ok(slides)
}

/// Relationship ids from `p:sldIdLst`, in order.
fn slide_ids(xml: &str) -> Result<Vec<String>, ExtractionError> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(true);
    let mut ids = Vec::new();

    loop {
        match reader.read_event() {
            Ok(Event::Empty(ref e)) | Ok(Event::Start(ref e))
                if local_name(e.name().as_ref()) == b"sldId" =>
            {
                // The plain `id` attribute is numeric; the relationship id is namespaced.
                let rel_id = e
                    .attributes()
                    .flatten()
                    .find(|a| a.key.as_ref().ends_with(b":id"))
                    .map(|a| String::from_utf8_lossy(&a.value).to_string());
                if let Some(rel_id) = rel_id {
                    ids.push(rel_id);
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                return Err(ExtractionError::Pptx(format!(
                    "Error parsing presentation: {e}"
                )))
            }
            _ => {}
        }
    }

    Ok(ids)
}

/// Text of each shape on a slide. Paragraphs are joined with `\n`; empty shapes are skipped.
fn shape_texts(xml: &str) -> Vec<String> {
    let mut reader = Reader::from_str(xml);
    reader.trim_text(false);

    let mut shapes = Vec::new();
    let mut current: Option<String> = None;
    let mut paragraphs = 0usize;
    let mut in_run_text = false;

    loop {
        match reader.read_event() {
            Ok(Event::Start(ref e)) => match local_name(e.name().as_ref()) {
                b"sp" => {
                    current = Some(String::new());
                    paragraphs = 0;
                }
                b"p" => start_paragraph(&mut current, &mut paragraphs),
                b"t" => in_run_text = true,
                _ => {}
            },
            Ok(Event::Empty(ref e)) => match local_name(e.name().as_ref()) {
                // `<a:p/>` is a blank line, not a missing paragraph.
                b"p" => start_paragraph(&mut current, &mut paragraphs),
                b"br" => {
                    if let Some(text) = current.as_mut() {
                        text.push('\n');
                    }
                }
                _ => {}
            },
            Ok(Event::Text(ref e)) if in_run_text => {
                if let Some(text) = current.as_mut() {
                    text.push_str(&e.unescape().unwrap_or_default());
                }
            }
            Ok(Event::End(ref e)) => match local_name(e.name().as_ref()) {
                b"t" => in_run_text = false,
                b"sp" => {
                    if let Some(text) = current.take() {
                        if !text.trim().is_empty() {
                            shapes.push(text);
                        }
                    }
                }
                _ => {}
            },
            Ok(Event::Eof) => break,
            Err(e) => {
                warn!(error = %e, "slide XML error, keeping text read so far");
                break;
            }
            _ => {}
        }
    }

    shapes
}

fn start_paragraph(current: &mut Option<String>, paragraphs: &mut usize) {
    if let Some(text) = current.as_mut() {
        if *paragraphs > 0 {
            text.push('\n');
        }
        *paragraphs += 1;
    }
}

/// Reads one part as text. The declared size is checked first; the read itself stops one byte
/// past the limit whatever the archive claims.
fn read_entry<R: Read + Seek>(
    archive: &mut ZipArchive<R>,
    path: &str,
    max_bytes: u64,
) -> Result<String, ExtractionError> {
    let mut file = archive
        .by_name(path)
        .map_err(|e| ExtractionError::Pptx(format!("Missing part '{path}': {e}")))?;

    let too_large = || ExtractionError::PartTooLarge {
        part: path.to_string(),
        limit: max_bytes,
    };
    if file.size() > max_bytes {
        return Err(too_large());
    }

    let mut raw = Vec::new();
    (&mut file)
        .take(max_bytes.saturating_add(1))
        .read_to_end(&mut raw)
        .map_err(|e| ExtractionError::Pptx(format!("Failed to read '{path}': {e}")))?;
    if raw.len() as u64 > max_bytes {
        return Err(too_large());
    }

    String::from_utf8(raw)
        .map_err(|e| ExtractionError::Pptx(format!("Part '{path}' is not UTF-8: {e}")))
}

/// Resolves a relationship target against the `ppt/` directory.
fn part_path(target: &str) -> String {
    match target.strip_prefix('/') {
        Some(absolute) => absolute.to_string(),
        None => format!("ppt/{target}"),
    }
}

fn local_name(name: &[u8]) -> &[u8] {
    match name.iter().position(|&b| b == b':') {
        Some(pos) => &name[pos + 1..],
        None => name,
    }
}

/// `ppt/slides/slide12.xml` → 12.
fn slide_number(path: &str) -> Option<usize> {
    let stem = path.rsplit('/').next()?.trim_end_matches(".xml");
    let digits: String = stem
        .chars()
        .rev()
        .take_while(|c| c.is_ascii_digit())
        .collect::<Vec<_>>()
        .into_iter()
        .rev()
        .collect();
    digits.parse().ok()
}

#[cfg(test)]
pub(crate) mod tests {
    use std::io::Write;

    use zip::write::FileOptions;
    use zip::ZipWriter;

    use super::*;

    const SLIDE_REL: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slide";
    const LAYOUT_REL: &str =
        "http://schemas.openxmlformats.org/officeDocument/2006/relationships/slideLayout";
    const TEST_PART_LIMIT: u64 = 1024 * 1024;

    fn slide_xml(shapes: &[&[&str]]) -> String {
        let mut body = String::new();
        for paragraphs in shapes {
            body.push_str("<p:sp><p:txBody>");
            for p in *paragraphs {
                body.push_str(&format!("<a:p><a:r><a:t>{p}</a:t></a:r></a:p>"));
            }
            body.push_str("</p:txBody></p:sp>");
        }
        format!(
            r#"<?xml version="1.0" encoding="UTF-8"?><p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree>{body}</p:spTree></p:cSld></p:sld>"#
        )
    }

    /// Builds a deck whose presentation lists slides in `order` (relationship ids).
    pub(crate) fn build_pptx(slides: &[(&str, String)], order: &[&str]) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();

        let mut rels = String::from(r#"<?xml version="1.0"?><Relationships>"#);
        rels.push_str(&format!(
            r#"<Relationship Id="rId99" Type="{LAYOUT_REL}" Target="slideLayouts/slideLayout1.xml"/>"#
        ));
        for (i, (id, _)) in slides.iter().enumerate() {
            rels.push_str(&format!(
                r#"<Relationship Id="{id}" Type="{SLIDE_REL}" Target="slides/slide{}.xml"/>"#,
                i + 1
            ));
        }
        rels.push_str("</Relationships>");

        let mut presentation =
            String::from(r#"<?xml version="1.0"?><p:presentation xmlns:p="p" xmlns:r="r"><p:sldIdLst>"#);
        for (n, id) in order.iter().enumerate() {
            presentation.push_str(&format!(r#"<p:sldId id="{}" r:id="{id}"/>"#, 256 + n));
        }
        presentation.push_str("</p:sldIdLst></p:presentation>");

        writer.start_file(PRESENTATION_RELS_PATH, options).unwrap();
        writer.write_all(rels.as_bytes()).unwrap();
        writer.start_file(PRESENTATION_PATH, options).unwrap();
        writer.write_all(presentation.as_bytes()).unwrap();
        for (i, (_, xml)) in slides.iter().enumerate() {
            writer
                .start_file(format!("ppt/slides/slide{}.xml", i + 1), options)
                .unwrap();
            writer.write_all(xml.as_bytes()).unwrap();
        }
        writer.finish().unwrap().into_inner()
    }

    pub(crate) fn sample_pptx() -> Vec<u8> {
        build_pptx(
            &[
                ("rId2", slide_xml(&[&["The Problem"], &["Support is slow", "and costly"]])),
                ("rId3", slide_xml(&[&["Our Team"]])),
            ],
            &["rId2", "rId3"],
        )
    }

    #[test]
    fn test_extracts_shapes_in_slide_order() {
        let text = extract_text(&sample_pptx(), TEST_PART_LIMIT).unwrap();
        assert_eq!(text, "The Problem\nSupport is slow\nand costly\nOur Team\n");
    }

    #[test]
    fn test_presentation_order_wins_over_part_names() {
        let data = build_pptx(
            &[
                ("rId2", slide_xml(&[&["first part"]])),
                ("rId3", slide_xml(&[&["second part"]])),
            ],
            &["rId3", "rId2"],
        );
        let text = extract_text(&data, TEST_PART_LIMIT).unwrap();
        assert_eq!(text, "second part\nfirst part\n");
    }

    #[test]
    fn test_missing_slide_list_sorts_by_number() {
        let data = build_pptx(
            &[
                ("rId7", slide_xml(&[&["one"]])),
                ("rId3", slide_xml(&[&["two"]])),
            ],
            &[],
        );
        let text = extract_text(&data, TEST_PART_LIMIT).unwrap();
        assert_eq!(text, "one\ntwo\n");
    }

    #[test]
    fn test_escaped_text_is_unescaped() {
        let data = build_pptx(&[("rId2", slide_xml(&[&["R&amp;D &lt;fast&gt;"]]))], &["rId2"]);
        assert_eq!(extract_text(&data, TEST_PART_LIMIT).unwrap(), "R&D <fast>\n");
    }

    #[test]
    fn test_empty_paragraphs_are_blank_lines() {
        let xml = r#"<p:sld xmlns:a="a" xmlns:p="p"><p:cSld><p:spTree><p:sp><p:txBody><a:p><a:r><a:t>Ask</a:t></a:r></a:p><a:p/><a:p><a:r><a:t>$2M seed</a:t></a:r></a:p></p:txBody></p:sp></p:spTree></p:cSld></p:sld>"#;
        assert_eq!(shape_texts(xml), vec!["Ask\n\n$2M seed".to_string()]);
    }

    /// An archive whose relationships part is mostly whitespace: tiny compressed, large inflated.
    fn padded_rels_pptx(padding: usize) -> Vec<u8> {
        let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
        let options = FileOptions::default();
        writer.start_file(PRESENTATION_RELS_PATH, options).unwrap();
        writer.write_all(b"<Relationships>").unwrap();
        writer.write_all(&vec![b' '; padding]).unwrap();
        writer.write_all(b"</Relationships>").unwrap();
        writer.finish().unwrap().into_inner()
    }

    #[test]
    fn test_oversized_part_is_rejected_before_parsing() {
        let data = padded_rels_pptx(4 * 1024 * 1024);
        assert!(data.len() < 64 * 1024);

        match extract_text(&data, 64 * 1024) {
            Err(ExtractionError::PartTooLarge { part, limit }) => {
                assert_eq!(part, PRESENTATION_RELS_PATH);
                assert_eq!(limit, 64 * 1024);
            }
            other => panic!("expected PartTooLarge, got {other:?}"),
        }
    }

    #[test]
    fn test_oversized_slide_is_rejected() {
        let long_run = "x".repeat(8 * 1024);
        let big_slide = slide_xml(&[&[long_run.as_str()]]);
        let data = build_pptx(&[("rId2", big_slide)], &["rId2"]);

        assert!(matches!(
            extract_text(&data, 4 * 1024),
            Err(ExtractionError::PartTooLarge { .. })
        ));
        assert!(extract_text(&data, TEST_PART_LIMIT).is_ok());
    }

    #[test]
    fn test_not_a_zip_is_an_error() {
        assert!(extract_text(b"definitely not a zip", TEST_PART_LIMIT).is_err());
    }

    #[test]
    fn test_slide_number() {
        assert_eq!(slide_number("ppt/slides/slide12.xml"), Some(12));
        assert_eq!(slide_number("ppt/slides/title.xml"), None);
    }

    #[test]
    fn test_part_path() {
        assert_eq!(part_path("slides/slide1.xml"), "ppt/slides/slide1.xml");
        assert_eq!(part_path("/ppt/slides/slide1.xml"), "ppt/slides/slide1.xml");
    }

    #[test]
    fn test_layout_relationships_are_ignored() {
        let rels = format!(
            r#"<Relationships><Relationship Id="rId1" Type="{LAYOUT_REL}" Target="x.xml"/><Relationship Id="rId2" Type="{SLIDE_REL}" Target="slides/slide1.xml"/></Relationships>"#
        );
        let map = slide_relationships(&rels).unwrap();
        assert_eq!(map.len(), 1);
        assert_eq!(map["rId2"], "ppt/slides/slide1.xml");
    }
}
