//! `x14:iconSet`（アイコンセット）と`x14:cfIcon`

use std::io::Write;

use super::cfvo::CfvoXform;
use crate::error::XlsxExtError;
use crate::types::{CfIcon, IconSet, DEFAULT_ICON_SET};
use crate::xform::{bool_attr, bool_value, number_attr, Xform};
use crate::xml::{Attributes, Node, XmlReader, XmlStream};

/// 拡張スキーマにのみ存在するアイコンセット
pub(crate) const EXT_ICON_SETS: [&str; 3] = ["3Triangles", "3Stars", "5Boxes"];

/// `x14:cfIcon`
pub(crate) struct CfIconXform;

impl Xform for CfIconXform {
    type Model = CfIcon;

    fn tag(&self) -> &'static str {
        "x14:cfIcon"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &CfIcon,
    ) -> Result<(), XlsxExtError> {
        stream.leaf_node(
            self.tag(),
            Attributes::new()
                .with("iconSet", model.icon_set.as_str())
                .with("iconId", model.icon_id.to_string()),
            None,
        )
    }

    fn create_model(&self, node: &Node) -> Result<CfIcon, XlsxExtError> {
        Ok(CfIcon {
            icon_set: node.attr("iconSet").unwrap_or(DEFAULT_ICON_SET).to_string(),
            icon_id: number_attr(node, "iconId")?.unwrap_or(0),
        })
    }
}

/// `x14:iconSet`
pub(crate) struct IconSetXform;

impl IconSetXform {
    /// アイコンセットが拡張形式を必要とするかどうか
    pub fn is_ext(model: &IconSet) -> bool {
        model.custom || EXT_ICON_SETS.contains(&model.name.as_str())
    }
}

impl Xform for IconSetXform {
    type Model = IconSet;

    fn tag(&self) -> &'static str {
        "x14:iconSet"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &IconSet,
    ) -> Result<(), XlsxExtError> {
        let attributes = Attributes::new()
            .with_opt(
                "iconSet",
                (model.name != DEFAULT_ICON_SET).then_some(model.name.as_str()),
            )
            .with_opt("reverse", bool_value(model.reverse, false))
            .with_opt("showValue", bool_value(model.show_value, true))
            .with_opt("custom", bool_value(model.custom, false));

        stream.open_node(self.tag(), attributes)?;
        for cfvo in &model.cfvo {
            CfvoXform.render(stream, cfvo)?;
        }
        for icon in &model.icons {
            CfIconXform.render(stream, icon)?;
        }
        stream.close_node()
    }

    fn create_model(&self, node: &Node) -> Result<IconSet, XlsxExtError> {
        Ok(IconSet {
            name: node.attr("iconSet").unwrap_or(DEFAULT_ICON_SET).to_string(),
            reverse: bool_attr(node, "reverse").unwrap_or(false),
            show_value: bool_attr(node, "showValue").unwrap_or(true),
            custom: bool_attr(node, "custom").unwrap_or(false),
            cfvo: Vec::new(),
            icons: Vec::new(),
        })
    }

    fn on_child(
        &self,
        model: &mut IconSet,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        match child.name.as_str() {
            "x14:cfvo" => model.cfvo.push(CfvoXform.parse(reader, child)?),
            "x14:cfIcon" => model.icons.push(CfIconXform.parse(reader, child)?),
            _ => reader.skip(child)?,
        }
        Ok(())
    }
}
