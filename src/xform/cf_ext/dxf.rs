//! `x14:dxf`（差分書式）
//!
//! 拡張ルールの書式は、スタイルシートへの参照ではなくルール内に直接埋め込まれます。
//! フォント、数値書式、塗りつぶしのみを扱い、それ以外の子要素は読み飛ばします。

use std::io::Write;

use super::color::ColorXform;
use crate::error::XlsxExtError;
use crate::types::{Dxf, DxfFill, DxfFont, NumFmt};
use crate::xform::{bool_attr, number_attr, Xform};
use crate::xml::{Attributes, Node, XmlEvent, XmlReader, XmlStream};

const FONT_COLOR: ColorXform = ColorXform::new("color");
const FG_COLOR: ColorXform = ColorXform::new("fgColor");
const BG_COLOR: ColorXform = ColorXform::new("bgColor");

/// `<b/>`、`<i/>`などのフラグ要素を書き出す
fn render_flag<W: Write>(
    stream: &mut XmlStream<W>,
    tag: &str,
    value: Option<bool>,
) -> Result<(), XlsxExtError> {
    match value {
        Some(true) => stream.leaf_node(tag, Attributes::new(), None),
        Some(false) => stream.leaf_node(tag, Attributes::new().with("val", "0"), None),
        None => Ok(()),
    }
}

struct FontXform;

impl Xform for FontXform {
    type Model = DxfFont;

    fn tag(&self) -> &'static str {
        "font"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &DxfFont,
    ) -> Result<(), XlsxExtError> {
        stream.open_node(self.tag(), Attributes::new())?;
        render_flag(stream, "b", model.bold)?;
        render_flag(stream, "i", model.italic)?;
        render_flag(stream, "strike", model.strike)?;
        if let Some(underline) = &model.underline {
            let val = (underline != "single").then_some(underline.as_str());
            let attributes = Attributes::new().with_opt("val", val);
            stream.leaf_node("u", attributes, None)?;
        }
        FONT_COLOR.render_opt(stream, model.color.as_ref())?;
        stream.close_node()
    }

    fn create_model(&self, _node: &Node) -> Result<DxfFont, XlsxExtError> {
        Ok(DxfFont::default())
    }

    fn on_child(
        &self,
        model: &mut DxfFont,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        // フラグ要素は`val`属性がなければ真
        let flag = || bool_attr(child, "val").unwrap_or(true);
        match child.name.as_str() {
            "b" => model.bold = Some(flag()),
            "i" => model.italic = Some(flag()),
            "strike" => model.strike = Some(flag()),
            "u" => model.underline = Some(child.attr("val").unwrap_or("single").to_string()),
            "color" => {
                model.color = Some(FONT_COLOR.parse(reader, child)?);
                return Ok(());
            }
            _ => {}
        }
        reader.skip(child)
    }
}

struct NumFmtXform;

impl Xform for NumFmtXform {
    type Model = NumFmt;

    fn tag(&self) -> &'static str {
        "numFmt"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &NumFmt,
    ) -> Result<(), XlsxExtError> {
        stream.leaf_node(
            self.tag(),
            Attributes::new()
                .with("numFmtId", model.id.to_string())
                .with("formatCode", model.format_code.as_str()),
            None,
        )
    }

    fn create_model(&self, node: &Node) -> Result<NumFmt, XlsxExtError> {
        let id = number_attr(node, "numFmtId")?
            .ok_or_else(|| XlsxExtError::malformed(self.tag(), "missing 'numFmtId' attribute"))?;
        Ok(NumFmt {
            id,
            format_code: node.attr("formatCode").unwrap_or_default().to_string(),
        })
    }
}

struct FillXform;

impl FillXform {
    fn parse_pattern_fill(
        model: &mut DxfFill,
        reader: &mut XmlReader<'_>,
        node: &Node,
    ) -> Result<(), XlsxExtError> {
        model.pattern_type = node.attr("patternType").map(str::to_string);
        if node.is_empty {
            return Ok(());
        }
        loop {
            match reader.next_event()? {
                XmlEvent::Open(child) => match child.name.as_str() {
                    "fgColor" => model.fg_color = Some(FG_COLOR.parse(reader, &child)?),
                    "bgColor" => model.bg_color = Some(BG_COLOR.parse(reader, &child)?),
                    _ => reader.skip(&child)?,
                },
                XmlEvent::Close(_) => return Ok(()),
                XmlEvent::Text(_) => {}
                XmlEvent::Eof => {
                    return Err(XlsxExtError::UnexpectedEof(node.name.clone()))
                }
            }
        }
    }
}

impl Xform for FillXform {
    type Model = DxfFill;

    fn tag(&self) -> &'static str {
        "fill"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &DxfFill,
    ) -> Result<(), XlsxExtError> {
        stream.open_node(self.tag(), Attributes::new())?;
        stream.open_node(
            "patternFill",
            Attributes::new().with_opt("patternType", model.pattern_type.as_deref()),
        )?;
        FG_COLOR.render_opt(stream, model.fg_color.as_ref())?;
        BG_COLOR.render_opt(stream, model.bg_color.as_ref())?;
        stream.close_node()?;
        stream.close_node()
    }

    fn create_model(&self, _node: &Node) -> Result<DxfFill, XlsxExtError> {
        Ok(DxfFill::default())
    }

    fn on_child(
        &self,
        model: &mut DxfFill,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        if child.name == "patternFill" {
            Self::parse_pattern_fill(model, reader, child)
        } else {
            reader.skip(child)
        }
    }
}

/// `x14:dxf`
pub(crate) struct DxfXform;

impl Xform for DxfXform {
    type Model = Dxf;

    fn tag(&self) -> &'static str {
        "x14:dxf"
    }

    fn render<W: Write>(&self, stream: &mut XmlStream<W>, model: &Dxf) -> Result<(), XlsxExtError> {
        stream.open_node(self.tag(), Attributes::new())?;
        if let Some(font) = &model.font {
            FontXform.render(stream, font)?;
        }
        if let Some(num_fmt) = &model.num_fmt {
            NumFmtXform.render(stream, num_fmt)?;
        }
        if let Some(fill) = &model.fill {
            FillXform.render(stream, fill)?;
        }
        stream.close_node()
    }

    fn create_model(&self, _node: &Node) -> Result<Dxf, XlsxExtError> {
        Ok(Dxf::default())
    }

    fn on_child(
        &self,
        model: &mut Dxf,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        match child.name.as_str() {
            "font" => model.font = Some(FontXform.parse(reader, child)?),
            "numFmt" => model.num_fmt = Some(NumFmtXform.parse(reader, child)?),
            "fill" => model.fill = Some(FillXform.parse(reader, child)?),
            _ => reader.skip(child)?,
        }
        Ok(())
    }
}
