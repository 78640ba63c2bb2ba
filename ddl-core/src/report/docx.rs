//! 最小化的 WordprocessingML (docx) 输出
//!
//! 只生成文档正文、样式、包关系和核心属性几个部件，足够 Word / WPS / LibreOffice 打开。

use super::ReportSink;
use super::style::{StyledBlock, StyledDocument, StyledTable};
use crate::config::ReportConfig;
use crate::constants::style::FALLBACK_COLUMN_WIDTH_PT;
use crate::error::Result;
use chrono::{DateTime, Utc};
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesEnd, BytesStart, BytesText, Event};
use std::io::{Cursor, Write};
use zip::ZipWriter;
use zip::write::SimpleFileOptions;

const NS_W: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const NS_PACKAGE_RELS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const NS_CONTENT_TYPES: &str = "http://schemas.openxmlformats.org/package/2006/content-types";
const NS_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/metadata/core-properties";

const REL_OFFICE_DOCUMENT: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument";
const REL_CORE_PROPS: &str =
    "http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties";
const REL_STYLES: &str =
    "http://schemas.openxmlformats.org/officeDocument/2006/relationships/styles";

const CT_RELS: &str = "application/vnd.openxmlformats-package.relationships+xml";
const CT_DOCUMENT: &str =
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml";
const CT_STYLES: &str = "application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml";
const CT_CORE_PROPS: &str = "application/vnd.openxmlformats-package.core-properties+xml";

/// 1 磅 = 20 twip (dxa)
const TWIPS_PER_POINT: f32 = 20.0;

/// A4 纸张，2.54cm 页边距
const PAGE_WIDTH: &str = "11906";
const PAGE_HEIGHT: &str = "16838";
const PAGE_MARGIN: &str = "1440";

const HEADING_STYLE: &str = "Heading1";

/// 生成 docx 文件
#[derive(Debug, Clone)]
pub struct DocxSink {
    config: ReportConfig,
}

impl DocxSink {
    pub fn new(config: ReportConfig) -> Self {
        Self { config }
    }

    /// 打包为 docx 字节流，`created` 写入核心属性
    pub fn build_package(&self, document: &StyledDocument, created: DateTime<Utc>) -> Result<Vec<u8>> {
        let options = SimpleFileOptions::default()
            .compression_method(zip::CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));

        let parts: [(&str, Vec<u8>); 6] = [
            ("[Content_Types].xml", content_types_xml()?),
            ("_rels/.rels", package_rels_xml()?),
            ("docProps/core.xml", core_props_xml(created)?),
            ("word/_rels/document.xml.rels", document_rels_xml()?),
            ("word/styles.xml", styles_xml(document, &self.config)?),
            ("word/document.xml", document_xml(document)?),
        ];

        for (name, content) in parts {
            zip.start_file(name, options)?;
            zip.write_all(&content)?;
        }

        Ok(zip.finish()?.into_inner())
    }
}

impl ReportSink for DocxSink {
    fn config(&self) -> &ReportConfig {
        &self.config
    }

    fn render(&self, document: &StyledDocument) -> Result<Vec<u8>> {
        self.build_package(document, Utc::now())
    }
}

type XmlWriter = Writer<Vec<u8>>;

fn new_xml_writer() -> Result<XmlWriter> {
    let mut writer = Writer::new(Vec::new());
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), Some("yes"))))?;
    Ok(writer)
}

fn start(writer: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
    writer.write_event(Event::Start(elem))?;
    Ok(())
}

fn end(writer: &mut XmlWriter, name: &str) -> Result<()> {
    writer.write_event(Event::End(BytesEnd::new(name)))?;
    Ok(())
}

fn empty(writer: &mut XmlWriter, name: &str, attrs: &[(&str, &str)]) -> Result<()> {
    let elem = BytesStart::new(name).with_attributes(attrs.iter().copied());
    writer.write_event(Event::Empty(elem))?;
    Ok(())
}

/// <name>text</name>，文本会被转义
fn text_element(writer: &mut XmlWriter, name: &str, attrs: &[(&str, &str)], text: &str) -> Result<()> {
    start(writer, name, attrs)?;
    writer.write_event(Event::Text(BytesText::new(text)))?;
    end(writer, name)
}

fn twips(points: f32) -> String {
    ((points * TWIPS_PER_POINT).round() as i64).to_string()
}

fn content_types_xml() -> Result<Vec<u8>> {
    let mut w = new_xml_writer()?;
    start(&mut w, "Types", &[("xmlns", NS_CONTENT_TYPES)])?;
    empty(&mut w, "Default", &[("Extension", "rels"), ("ContentType", CT_RELS)])?;
    empty(&mut w, "Default", &[("Extension", "xml"), ("ContentType", "application/xml")])?;
    empty(&mut w, "Override", &[("PartName", "/word/document.xml"), ("ContentType", CT_DOCUMENT)])?;
    empty(&mut w, "Override", &[("PartName", "/word/styles.xml"), ("ContentType", CT_STYLES)])?;
    empty(&mut w, "Override", &[("PartName", "/docProps/core.xml"), ("ContentType", CT_CORE_PROPS)])?;
    end(&mut w, "Types")?;
    Ok(w.into_inner())
}

fn package_rels_xml() -> Result<Vec<u8>> {
    let mut w = new_xml_writer()?;
    start(&mut w, "Relationships", &[("xmlns", NS_PACKAGE_RELS)])?;
    empty(
        &mut w,
        "Relationship",
        &[("Id", "rId1"), ("Type", REL_OFFICE_DOCUMENT), ("Target", "word/document.xml")],
    )?;
    empty(
        &mut w,
        "Relationship",
        &[("Id", "rId2"), ("Type", REL_CORE_PROPS), ("Target", "docProps/core.xml")],
    )?;
    end(&mut w, "Relationships")?;
    Ok(w.into_inner())
}

fn document_rels_xml() -> Result<Vec<u8>> {
    let mut w = new_xml_writer()?;
    start(&mut w, "Relationships", &[("xmlns", NS_PACKAGE_RELS)])?;
    empty(
        &mut w,
        "Relationship",
        &[("Id", "rId1"), ("Type", REL_STYLES), ("Target", "styles.xml")],
    )?;
    end(&mut w, "Relationships")?;
    Ok(w.into_inner())
}

fn core_props_xml(created: DateTime<Utc>) -> Result<Vec<u8>> {
    let timestamp = created.format("%Y-%m-%dT%H:%M:%SZ").to_string();

    let mut w = new_xml_writer()?;
    start(
        &mut w,
        "cp:coreProperties",
        &[
            ("xmlns:cp", NS_CORE_PROPS),
            ("xmlns:dc", "http://purl.org/dc/elements/1.1/"),
            ("xmlns:dcterms", "http://purl.org/dc/terms/"),
            ("xmlns:xsi", "http://www.w3.org/2001/XMLSchema-instance"),
        ],
    )?;
    text_element(&mut w, "dc:creator", &[], env!("CARGO_PKG_NAME"))?;
    text_element(&mut w, "dcterms:created", &[("xsi:type", "dcterms:W3CDTF")], &timestamp)?;
    text_element(&mut w, "dcterms:modified", &[("xsi:type", "dcterms:W3CDTF")], &timestamp)?;
    end(&mut w, "cp:coreProperties")?;
    Ok(w.into_inner())
}

/// 字体同时设置西文与东亚字体，否则中文仍会使用 Word 的默认字体
fn run_fonts(w: &mut XmlWriter, font: &str) -> Result<()> {
    empty(
        w,
        "w:rFonts",
        &[("w:ascii", font), ("w:hAnsi", font), ("w:eastAsia", font), ("w:cs", font)],
    )
}

fn styles_xml(document: &StyledDocument, config: &ReportConfig) -> Result<Vec<u8>> {
    // 字号单位是半磅
    let half_points = ((document.font_size * 2.0).round() as i64).to_string();
    let table_style = config.style.table_style.as_str();

    let mut w = new_xml_writer()?;
    start(&mut w, "w:styles", &[("xmlns:w", NS_W)])?;

    start(&mut w, "w:docDefaults", &[])?;
    start(&mut w, "w:rPrDefault", &[])?;
    start(&mut w, "w:rPr", &[])?;
    run_fonts(&mut w, &document.font)?;
    empty(&mut w, "w:sz", &[("w:val", half_points.as_str())])?;
    empty(&mut w, "w:szCs", &[("w:val", half_points.as_str())])?;
    empty(&mut w, "w:lang", &[("w:eastAsia", "zh-CN")])?;
    end(&mut w, "w:rPr")?;
    end(&mut w, "w:rPrDefault")?;
    end(&mut w, "w:docDefaults")?;

    start(&mut w, "w:style", &[("w:type", "paragraph"), ("w:default", "1"), ("w:styleId", "Normal")])?;
    empty(&mut w, "w:name", &[("w:val", "Normal")])?;
    start(&mut w, "w:rPr", &[])?;
    run_fonts(&mut w, &document.font)?;
    empty(&mut w, "w:sz", &[("w:val", half_points.as_str())])?;
    end(&mut w, "w:rPr")?;
    end(&mut w, "w:style")?;

    start(&mut w, "w:style", &[("w:type", "paragraph"), ("w:styleId", HEADING_STYLE)])?;
    empty(&mut w, "w:name", &[("w:val", "heading 1")])?;
    empty(&mut w, "w:basedOn", &[("w:val", "Normal")])?;
    empty(&mut w, "w:next", &[("w:val", "Normal")])?;
    empty(&mut w, "w:qFormat", &[])?;
    start(&mut w, "w:pPr", &[])?;
    empty(&mut w, "w:keepNext", &[])?;
    empty(&mut w, "w:spacing", &[("w:before", "240"), ("w:after", "120")])?;
    empty(&mut w, "w:outlineLvl", &[("w:val", "0")])?;
    end(&mut w, "w:pPr")?;
    start(&mut w, "w:rPr", &[])?;
    empty(&mut w, "w:b", &[])?;
    empty(&mut w, "w:sz", &[("w:val", "32")])?;
    end(&mut w, "w:rPr")?;
    end(&mut w, "w:style")?;

    start(&mut w, "w:style", &[("w:type", "table"), ("w:default", "1"), ("w:styleId", "TableNormal")])?;
    empty(&mut w, "w:name", &[("w:val", "Normal Table")])?;
    start(&mut w, "w:tblPr", &[])?;
    empty(&mut w, "w:tblInd", &[("w:w", "0"), ("w:type", "dxa")])?;
    start(&mut w, "w:tblCellMar", &[])?;
    empty(&mut w, "w:left", &[("w:w", "108"), ("w:type", "dxa")])?;
    empty(&mut w, "w:right", &[("w:w", "108"), ("w:type", "dxa")])?;
    end(&mut w, "w:tblCellMar")?;
    end(&mut w, "w:tblPr")?;
    end(&mut w, "w:style")?;

    start(&mut w, "w:style", &[("w:type", "table"), ("w:styleId", table_style)])?;
    empty(&mut w, "w:name", &[("w:val", table_style)])?;
    empty(&mut w, "w:basedOn", &[("w:val", "TableNormal")])?;
    start(&mut w, "w:tblPr", &[])?;
    start(&mut w, "w:tblBorders", &[])?;
    for side in ["w:top", "w:left", "w:bottom", "w:right", "w:insideH", "w:insideV"] {
        empty(
            &mut w,
            side,
            &[("w:val", "single"), ("w:sz", "4"), ("w:space", "0"), ("w:color", "auto")],
        )?;
    }
    end(&mut w, "w:tblBorders")?;
    end(&mut w, "w:tblPr")?;
    end(&mut w, "w:style")?;

    end(&mut w, "w:styles")?;
    Ok(w.into_inner())
}

fn paragraph(w: &mut XmlWriter, style: Option<&str>, text: &str) -> Result<()> {
    start(w, "w:p", &[])?;
    if let Some(style) = style {
        start(w, "w:pPr", &[])?;
        empty(w, "w:pStyle", &[("w:val", style)])?;
        end(w, "w:pPr")?;
    }
    if !text.is_empty() {
        start(w, "w:r", &[])?;
        text_element(w, "w:t", &[("xml:space", "preserve")], text)?;
        end(w, "w:r")?;
    }
    end(w, "w:p")
}

fn table(w: &mut XmlWriter, table: &StyledTable, fallback_width: f32) -> Result<()> {
    let widths: Vec<String> = table
        .column_widths
        .iter()
        .map(|width| twips(width.unwrap_or(fallback_width)))
        .collect();
    let layout = if table.autofit { "autofit" } else { "fixed" };

    start(w, "w:tbl", &[])?;
    start(w, "w:tblPr", &[])?;
    empty(w, "w:tblStyle", &[("w:val", table.style_name.as_str())])?;
    empty(w, "w:tblW", &[("w:w", "0"), ("w:type", "auto")])?;
    empty(w, "w:tblLayout", &[("w:type", layout)])?;
    empty(w, "w:tblLook", &[("w:val", "04A0")])?;
    end(w, "w:tblPr")?;

    start(w, "w:tblGrid", &[])?;
    for width in &widths {
        empty(w, "w:gridCol", &[("w:w", width.as_str())])?;
    }
    end(w, "w:tblGrid")?;

    for (row_index, row) in table.grid.rows.iter().enumerate() {
        start(w, "w:tr", &[])?;
        for (col_index, text) in row.iter().enumerate() {
            if table.is_covered(row_index, col_index) {
                continue;
            }

            start(w, "w:tc", &[])?;
            start(w, "w:tcPr", &[])?;
            match table.merge_at(row_index, col_index) {
                Some(merge) => {
                    let merged_width: f32 = table.column_widths[merge.first_col..=merge.last_col]
                        .iter()
                        .map(|width| width.unwrap_or(fallback_width))
                        .sum();
                    empty(w, "w:tcW", &[("w:w", twips(merged_width).as_str()), ("w:type", "dxa")])?;
                    empty(w, "w:gridSpan", &[("w:val", merge.span().to_string().as_str())])?;
                }
                None => {
                    empty(w, "w:tcW", &[("w:w", widths[col_index].as_str()), ("w:type", "dxa")])?;
                }
            }
            end(w, "w:tcPr")?;
            paragraph(w, None, text)?;
            end(w, "w:tc")?;
        }
        end(w, "w:tr")?;
    }

    end(w, "w:tbl")
}

fn document_xml(document: &StyledDocument) -> Result<Vec<u8>> {
    let mut w = new_xml_writer()?;
    start(&mut w, "w:document", &[("xmlns:w", NS_W)])?;
    start(&mut w, "w:body", &[])?;

    for block in &document.blocks {
        match block {
            StyledBlock::Heading(text) => paragraph(&mut w, Some(HEADING_STYLE), text)?,
            StyledBlock::Table(styled) => table(&mut w, styled, FALLBACK_COLUMN_WIDTH_PT)?,
            StyledBlock::Paragraph(text) => paragraph(&mut w, None, text)?,
        }
    }

    start(&mut w, "w:sectPr", &[])?;
    empty(&mut w, "w:pgSz", &[("w:w", PAGE_WIDTH), ("w:h", PAGE_HEIGHT)])?;
    empty(
        &mut w,
        "w:pgMar",
        &[
            ("w:top", PAGE_MARGIN),
            ("w:right", PAGE_MARGIN),
            ("w:bottom", PAGE_MARGIN),
            ("w:left", PAGE_MARGIN),
            ("w:header", "851"),
            ("w:footer", "992"),
            ("w:gutter", "0"),
        ],
    )?;
    end(&mut w, "w:sectPr")?;

    end(&mut w, "w:body")?;
    end(&mut w, "w:document")?;
    Ok(w.into_inner())
}
