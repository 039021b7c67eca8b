//! Word-processor documents (`.docx`).
//!
//! Only top-level body paragraphs are read. Each paragraph's `pStyle` id is
//! resolved to the style's display name through `word/styles.xml`.

use crate::core::normalizer::{InputKind, RawInput, StyledUnit};
use crate::error::Result;
use crate::extract::Extractor;
use memmap2::Mmap;
use roxmltree::{Document, Node};
use std::collections::HashMap;
use std::fs::File;
use std::io::{Cursor, Read, Seek};
use std::path::Path;
use zip::ZipArchive;

const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";

/// Archives above this size are memory-mapped instead of read into memory.
const MMAP_THRESHOLD: u64 = 10 * 1024 * 1024;

/// Style id → display name, plus the default paragraph style.
#[derive(Debug, Clone, Default)]
pub struct StyleTable {
    names: HashMap<String, String>,
    default_paragraph: Option<String>,
}

impl StyleTable {
    pub fn from_xml(xml: &str) -> Result<Self> {
        let doc = Document::parse(xml)?;
        let mut table = StyleTable::default();

        for style in doc
            .root_element()
            .children()
            .filter(|n| n.is_element() && n.tag_name().name() == "style")
        {
            let Some(style_id) = style.attribute((W_NS, "styleId")) else {
                continue;
            };
            let name = style
                .children()
                .find(|n| n.tag_name().name() == "name")
                .and_then(|n| n.attribute((W_NS, "val")))
                .unwrap_or(style_id);

            let is_paragraph = style.attribute((W_NS, "type")) == Some("paragraph");
            let is_default = matches!(style.attribute((W_NS, "default")), Some("1" | "true"));
            if is_paragraph && is_default {
                table.default_paragraph = Some(style_id.to_string());
            }

            table
                .names
                .insert(style_id.to_string(), display_style_name(name));
        }
        Ok(table)
    }

    /// Display name for a paragraph's style id; unknown or missing ids use
    /// the default paragraph style.
    pub fn name_for(&self, style_id: Option<&str>) -> Option<&str> {
        style_id
            .and_then(|id| self.names.get(id))
            .or_else(|| {
                self.default_paragraph
                    .as_deref()
                    .and_then(|id| self.names.get(id))
            })
            .map(String::as_str)
    }
}

/// Word stores built-in style names in lower case (`heading 1`); present
/// them the way the UI shows them (`Heading 1`).
fn display_style_name(name: &str) -> String {
    const BUILT_IN: [&str; 4] = ["heading", "title", "subtitle", "normal"];
    let lower = name.to_ascii_lowercase();
    let is_built_in = BUILT_IN
        .iter()
        .any(|b| lower == *b || lower.starts_with(&format!("{} ", b)));

    if is_built_in && name.chars().next().is_some_and(|c| c.is_ascii_lowercase()) {
        let mut chars = name.chars();
        chars
            .next()
            .map(|first| first.to_ascii_uppercase().to_string() + chars.as_str())
            .unwrap_or_default()
    } else {
        name.to_string()
    }
}

pub struct DocxExtractor;

impl DocxExtractor {
    pub fn new() -> Self {
        Self
    }

    pub fn parse_archive<R: Read + Seek>(&self, reader: R) -> Result<Vec<StyledUnit>> {
        let mut archive = ZipArchive::new(reader)?;

        let styles = match archive.by_name("word/styles.xml") {
            Ok(mut file) => {
                let mut styles_xml = String::new();
                file.read_to_string(&mut styles_xml)?;
                StyleTable::from_xml(&styles_xml)?
            }
            Err(_) => {
                log::debug!("No word/styles.xml; style ids are used as names");
                StyleTable::default()
            }
        };

        let mut doc_xml = String::new();
        archive
            .by_name("word/document.xml")?
            .read_to_string(&mut doc_xml)?;

        parse_document_xml(&doc_xml, &styles)
    }
}

impl Default for DocxExtractor {
    fn default() -> Self {
        Self::new()
    }
}

impl Extractor for DocxExtractor {
    fn kind(&self) -> InputKind {
        InputKind::Structured
    }

    fn extract(&self, path: &Path) -> Result<RawInput> {
        let file = File::open(path)?;
        let file_size = file.metadata()?.len();

        let units = if file_size > MMAP_THRESHOLD {
            log::debug!("Memory-mapping {} ({} bytes)", path.display(), file_size);
            // SAFETY: the mapping is read-only and does not outlive `file`.
            let mmap = unsafe { Mmap::map(&file)? };
            self.parse_archive(Cursor::new(&mmap[..]))?
        } else {
            let mut bytes = Vec::with_capacity(file_size as usize);
            (&file).read_to_end(&mut bytes)?;
            self.parse_archive(Cursor::new(bytes))?
        };

        log::debug!("Read {} paragraphs from {}", units.len(), path.display());
        Ok(RawInput::Structured(units))
    }
}

/// Paragraphs of `word/document.xml` with their resolved style names.
pub fn parse_document_xml(xml: &str, styles: &StyleTable) -> Result<Vec<StyledUnit>> {
    let doc = Document::parse(xml)?;
    let Some(body) = doc
        .root_element()
        .children()
        .find(|n| n.is_element() && n.tag_name().name() == "body")
    else {
        return Ok(Vec::new());
    };

    let units = body
        .children()
        .filter(|n| n.is_element() && n.tag_name().name() == "p")
        .map(|para| {
            let style_id = paragraph_style_id(&para);
            let style_name = styles
                .name_for(style_id)
                .map(str::to_string)
                .or_else(|| style_id.map(str::to_string));
            StyledUnit {
                text: paragraph_text(&para),
                style_name,
            }
        })
        .collect();
    Ok(units)
}

fn paragraph_style_id<'a>(para: &Node<'a, '_>) -> Option<&'a str> {
    para.children()
        .find(|n| n.tag_name().name() == "pPr")
        .and_then(|ppr| ppr.children().find(|n| n.tag_name().name() == "pStyle"))
        .and_then(|ps| ps.attribute((W_NS, "val")))
}

/// Text of the paragraph's own runs, including runs inside hyperlinks.
/// Drawings and text boxes nested in a run are not part of it.
fn paragraph_text(para: &Node) -> String {
    let mut text = String::new();
    for child in para.children().filter(|n| n.is_element()) {
        match child.tag_name().name() {
            "r" => push_run_text(&child, &mut text),
            "hyperlink" => {
                for run in child
                    .children()
                    .filter(|n| n.is_element() && n.tag_name().name() == "r")
                {
                    push_run_text(&run, &mut text);
                }
            }
            _ => {}
        }
    }
    text
}

fn push_run_text(run: &Node, text: &mut String) {
    for node in run.children().filter(|n| n.is_element()) {
        match node.tag_name().name() {
            "t" => text.push_str(node.text().unwrap_or_default()),
            "tab" => text.push('\t'),
            "br" | "cr" => text.push('\n'),
            _ => {}
        }
    }
}
