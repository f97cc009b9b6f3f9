//! 色要素（`x14:borderColor`、`x14:axisColor`、`color`、`bgColor`など）

use std::io::Write;

use crate::error::XlsxExtError;
use crate::types::Color;
use crate::xform::{bool_attr, number_attr, Xform};
use crate::xml::{Attributes, Node, XmlStream};

/// 色要素の変換器
///
/// 要素名のみが異なる複数の色要素で共有します。
pub(crate) struct ColorXform {
    tag: &'static str,
}

impl ColorXform {
    pub const fn new(tag: &'static str) -> Self {
        Self { tag }
    }

    /// 色が設定されている場合のみ書き出す
    pub fn render_opt<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: Option<&Color>,
    ) -> Result<(), XlsxExtError> {
        match model {
            Some(color) if !color.is_empty() => self.render(stream, color),
            _ => Ok(()),
        }
    }
}

impl Xform for ColorXform {
    type Model = Color;

    fn tag(&self) -> &'static str {
        self.tag
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &Color,
    ) -> Result<(), XlsxExtError> {
        let attributes = Attributes::new()
            .with_opt("rgb", model.rgb.as_deref())
            .with_opt("theme", model.theme.map(|t| t.to_string()))
            .with_opt("tint", model.tint.map(|t| t.to_string()))
            .with_opt("indexed", model.indexed.map(|i| i.to_string()))
            .with_opt("auto", model.auto.map(|a| if a { "1" } else { "0" }));
        stream.leaf_node(self.tag, attributes, None)
    }

    fn create_model(&self, node: &Node) -> Result<Color, XlsxExtError> {
        Ok(Color {
            rgb: node.attr("rgb").map(str::to_string),
            theme: number_attr(node, "theme")?,
            tint: number_attr(node, "tint")?,
            indexed: number_attr(node, "indexed")?,
            auto: bool_attr(node, "auto"),
        })
    }
}
