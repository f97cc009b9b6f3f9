//! `x14:dataBar`（データバー）

use std::io::Write;

use super::cfvo::CfvoXform;
use super::color::ColorXform;
use crate::error::XlsxExtError;
use crate::types::{AxisPosition, DataBar, DataBarDirection};
use crate::xform::{bool_attr, bool_value, number_attr, Xform};
use crate::xml::{Attributes, Node, XmlReader, XmlStream};

const FILL_COLOR: ColorXform = ColorXform::new("x14:fillColor");
const BORDER_COLOR: ColorXform = ColorXform::new("x14:borderColor");
const NEGATIVE_FILL_COLOR: ColorXform = ColorXform::new("x14:negativeFillColor");
const NEGATIVE_BORDER_COLOR: ColorXform = ColorXform::new("x14:negativeBorderColor");
const AXIS_COLOR: ColorXform = ColorXform::new("x14:axisColor");

/// `x14:dataBar`の子要素
enum DataBarChild {
    Cfvo,
    FillColor,
    BorderColor,
    NegativeFillColor,
    NegativeBorderColor,
    AxisColor,
}

impl DataBarChild {
    fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "x14:cfvo" => DataBarChild::Cfvo,
            "x14:fillColor" => DataBarChild::FillColor,
            "x14:borderColor" => DataBarChild::BorderColor,
            "x14:negativeFillColor" => DataBarChild::NegativeFillColor,
            "x14:negativeBorderColor" => DataBarChild::NegativeBorderColor,
            "x14:axisColor" => DataBarChild::AxisColor,
            _ => return None,
        })
    }
}

pub(crate) struct DataBarXform;

impl DataBarXform {
    /// データバーが従来形式で表現できない設定を含むかどうか
    ///
    /// 単色塗り、枠線、負の値・軸の色、軸の位置、方向は拡張スキーマにのみ存在します。
    pub fn is_ext(model: &DataBar) -> bool {
        !model.gradient
            || model.border
            || !model.negative_bar_color_same_as_positive
            || !model.negative_bar_border_color_same_as_positive
            || model.negative_fill_color.is_some()
            || model.negative_border_color.is_some()
            || model.axis_color.is_some()
            || model.axis_position != AxisPosition::Automatic
            || model.direction != DataBarDirection::Context
    }
}

impl Xform for DataBarXform {
    type Model = DataBar;

    fn tag(&self) -> &'static str {
        "x14:dataBar"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &DataBar,
    ) -> Result<(), XlsxExtError> {
        let attributes = Attributes::new()
            .with("minLength", model.min_length.to_string())
            .with("maxLength", model.max_length.to_string())
            .with_opt("border", bool_value(model.border, false))
            .with_opt("gradient", bool_value(model.gradient, true))
            .with_opt(
                "negativeBarColorSameAsPositive",
                bool_value(model.negative_bar_color_same_as_positive, true),
            )
            .with_opt(
                "negativeBarBorderColorSameAsPositive",
                bool_value(model.negative_bar_border_color_same_as_positive, true),
            )
            .with_opt(
                "axisPosition",
                (model.axis_position != AxisPosition::Automatic)
                    .then(|| model.axis_position.as_str()),
            )
            .with_opt(
                "direction",
                (model.direction != DataBarDirection::Context).then(|| model.direction.as_str()),
            );

        stream.open_node(self.tag(), attributes)?;
        for cfvo in &model.cfvo {
            CfvoXform.render(stream, cfvo)?;
        }
        FILL_COLOR.render_opt(stream, model.fill_color.as_ref())?;
        BORDER_COLOR.render_opt(stream, model.border_color.as_ref())?;
        NEGATIVE_FILL_COLOR.render_opt(stream, model.negative_fill_color.as_ref())?;
        NEGATIVE_BORDER_COLOR.render_opt(stream, model.negative_border_color.as_ref())?;
        AXIS_COLOR.render_opt(stream, model.axis_color.as_ref())?;
        stream.close_node()
    }

    fn create_model(&self, node: &Node) -> Result<DataBar, XlsxExtError> {
        let defaults = DataBar::default();

        let axis_position = match node.attr("axisPosition") {
            None => defaults.axis_position,
            Some(raw) => AxisPosition::parse(raw).ok_or_else(|| {
                XlsxExtError::malformed(self.tag(), format!("unknown axisPosition '{}'", raw))
            })?,
        };
        let direction = match node.attr("direction") {
            None => defaults.direction,
            Some(raw) => DataBarDirection::parse(raw).ok_or_else(|| {
                XlsxExtError::malformed(self.tag(), format!("unknown direction '{}'", raw))
            })?,
        };

        Ok(DataBar {
            min_length: number_attr(node, "minLength")?.unwrap_or(defaults.min_length),
            max_length: number_attr(node, "maxLength")?.unwrap_or(defaults.max_length),
            border: bool_attr(node, "border").unwrap_or(defaults.border),
            gradient: bool_attr(node, "gradient").unwrap_or(defaults.gradient),
            negative_bar_color_same_as_positive: bool_attr(node, "negativeBarColorSameAsPositive")
                .unwrap_or(defaults.negative_bar_color_same_as_positive),
            negative_bar_border_color_same_as_positive: bool_attr(
                node,
                "negativeBarBorderColorSameAsPositive",
            )
            .unwrap_or(defaults.negative_bar_border_color_same_as_positive),
            axis_position,
            direction,
            ..defaults
        })
    }

    fn on_child(
        &self,
        model: &mut DataBar,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        let Some(kind) = DataBarChild::from_tag(&child.name) else {
            return reader.skip(child);
        };
        match kind {
            DataBarChild::Cfvo => model.cfvo.push(CfvoXform.parse(reader, child)?),
            DataBarChild::FillColor => model.fill_color = Some(FILL_COLOR.parse(reader, child)?),
            DataBarChild::BorderColor => {
                model.border_color = Some(BORDER_COLOR.parse(reader, child)?)
            }
            DataBarChild::NegativeFillColor => {
                model.negative_fill_color = Some(NEGATIVE_FILL_COLOR.parse(reader, child)?)
            }
            DataBarChild::NegativeBorderColor => {
                model.negative_border_color = Some(NEGATIVE_BORDER_COLOR.parse(reader, child)?)
            }
            DataBarChild::AxisColor => model.axis_color = Some(AXIS_COLOR.parse(reader, child)?),
        }
        Ok(())
    }
}
