//! `x14:cfvo`（閾値）

use std::io::Write;

use super::formula::FormulaXform;
use crate::error::XlsxExtError;
use crate::types::{Cfvo, CfvoType};
use crate::xform::{bool_attr, bool_value, Xform};
use crate::xml::{Attributes, Node, XmlReader, XmlStream};

pub(crate) struct CfvoXform;

impl Xform for CfvoXform {
    type Model = Cfvo;

    fn tag(&self) -> &'static str {
        "x14:cfvo"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &Cfvo,
    ) -> Result<(), XlsxExtError> {
        stream.open_node(
            self.tag(),
            Attributes::new()
                .with("type", model.cfvo_type.as_str())
                .with_opt("gte", bool_value(model.gte, true)),
        )?;
        if let Some(value) = &model.value {
            FormulaXform.render(stream, value)?;
        }
        stream.close_node()
    }

    fn create_model(&self, node: &Node) -> Result<Cfvo, XlsxExtError> {
        let raw = node
            .attr("type")
            .ok_or_else(|| XlsxExtError::malformed(self.tag(), "missing 'type' attribute"))?;
        let cfvo_type = CfvoType::parse(raw)
            .ok_or_else(|| XlsxExtError::malformed(self.tag(), format!("unknown type '{}'", raw)))?;

        Ok(Cfvo {
            cfvo_type,
            value: None,
            gte: bool_attr(node, "gte").unwrap_or(true),
        })
    }

    fn on_child(
        &self,
        model: &mut Cfvo,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        if child.name == FormulaXform.tag() {
            model.value = Some(FormulaXform.parse(reader, child)?);
            Ok(())
        } else {
            reader.skip(child)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::xform::test_support::{parse_str, render_to_string};

    #[test]
    fn test_render_without_value() {
        let xml = render_to_string(&CfvoXform, &Cfvo::new(CfvoType::AutoMin));
        assert_eq!(xml, r#"<x14:cfvo type="autoMin"/>"#);
    }

    #[test]
    fn test_render_with_value_and_gte() {
        let mut cfvo = Cfvo::with_value(CfvoType::Percent, "33");
        cfvo.gte = false;
        let xml = render_to_string(&CfvoXform, &cfvo);
        assert_eq!(xml, r#"<x14:cfvo type="percent" gte="0"><xm:f>33</xm:f></x14:cfvo>"#);
        assert_eq!(parse_str(&CfvoXform, &xml).unwrap(), cfvo);
    }

    #[test]
    fn test_parse_unknown_type_fails() {
        let result = parse_str(&CfvoXform, r#"<x14:cfvo type="median"/>"#);
        match result {
            Err(XlsxExtError::Malformed { element, message }) => {
                assert_eq!(element, "x14:cfvo");
                assert!(message.contains("median"));
            }
            other => panic!("Expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_parse_missing_type_fails() {
        assert!(parse_str(&CfvoXform, "<x14:cfvo/>").is_err());
    }
}
