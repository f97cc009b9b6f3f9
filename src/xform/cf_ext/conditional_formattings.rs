//! `x14:conditionalFormattings`（条件付き書式の拡張ブロック）

use std::io::Write;

use super::cf_rule::CfRuleExtXform;
use crate::error::XlsxExtError;
use crate::types::ConditionalFormatting;
use crate::xform::{Xform, XM_NAMESPACE};
use crate::xml::{Attributes, Node, XmlReader, XmlStream};

/// `xm:sqref`（適用範囲）
struct SqrefXform;

impl Xform for SqrefXform {
    type Model = String;

    fn tag(&self) -> &'static str {
        "xm:sqref"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &String,
    ) -> Result<(), XlsxExtError> {
        stream.leaf_node(self.tag(), Attributes::new(), Some(model.as_str()))
    }

    fn create_model(&self, _node: &Node) -> Result<String, XlsxExtError> {
        Ok(String::new())
    }

    fn on_text(&self, model: &mut String, text: &str) {
        model.push_str(text);
    }
}

/// `x14:conditionalFormatting`
///
/// 拡張形式が必要なルールを一つも含まない範囲は出力しません。
struct ConditionalFormattingExtXform {
    rule: CfRuleExtXform,
}

impl ConditionalFormattingExtXform {
    fn has_content(model: &ConditionalFormatting) -> bool {
        model.rules.iter().any(CfRuleExtXform::is_ext)
    }
}

impl Xform for ConditionalFormattingExtXform {
    type Model = ConditionalFormatting;

    fn tag(&self) -> &'static str {
        "x14:conditionalFormatting"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &ConditionalFormatting,
    ) -> Result<(), XlsxExtError> {
        if !Self::has_content(model) {
            return Ok(());
        }

        stream.open_node(self.tag(), Attributes::new().with("xmlns:xm", XM_NAMESPACE))?;
        for rule in model.rules.iter().filter(|rule| CfRuleExtXform::is_ext(rule)) {
            self.rule.render(stream, rule)?;
        }
        SqrefXform.render(stream, &model.sqref)?;
        stream.close_node()
    }

    fn create_model(&self, _node: &Node) -> Result<ConditionalFormatting, XlsxExtError> {
        Ok(ConditionalFormatting::default())
    }

    fn on_child(
        &self,
        model: &mut ConditionalFormatting,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        match child.name.as_str() {
            "x14:cfRule" => model.rules.push(self.rule.parse(reader, child)?),
            "xm:sqref" => model.sqref = SqrefXform.parse(reader, child)?,
            _ => {
                tracing::debug!(
                    element = %child.name,
                    "skipping unrecognised conditionalFormatting child"
                );
                reader.skip(child)?
            }
        }
        Ok(())
    }
}

/// `x14:conditionalFormattings`
pub(crate) struct ConditionalFormattingsExtXform {
    formatting: ConditionalFormattingExtXform,
}

impl ConditionalFormattingsExtXform {
    pub fn new(rule: CfRuleExtXform) -> Self {
        Self {
            formatting: ConditionalFormattingExtXform { rule },
        }
    }

    /// 拡張形式が必要なルールが一つでもあるかどうか
    pub fn has_content(model: &[ConditionalFormatting]) -> bool {
        model.iter().any(ConditionalFormattingExtXform::has_content)
    }

    /// すべてのルールに拡張識別子の割り当てを行う
    pub fn prepare(&self, model: &mut [ConditionalFormatting]) {
        for formatting in model.iter_mut() {
            for rule in formatting.rules.iter_mut() {
                self.formatting.rule.prepare(rule);
            }
        }
    }
}

impl Xform for ConditionalFormattingsExtXform {
    type Model = Vec<ConditionalFormatting>;

    fn tag(&self) -> &'static str {
        "x14:conditionalFormattings"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &Vec<ConditionalFormatting>,
    ) -> Result<(), XlsxExtError> {
        if !Self::has_content(model) {
            return Ok(());
        }

        stream.open_node(self.tag(), Attributes::new())?;
        for formatting in model {
            self.formatting.render(stream, formatting)?;
        }
        stream.close_node()
    }

    fn create_model(&self, _node: &Node) -> Result<Vec<ConditionalFormatting>, XlsxExtError> {
        Ok(Vec::new())
    }

    fn on_child(
        &self,
        model: &mut Vec<ConditionalFormatting>,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        if child.name == self.formatting.tag() {
            model.push(self.formatting.parse(reader, child)?);
            Ok(())
        } else {
            tracing::debug!(
                element = %child.name,
                "skipping unrecognised conditionalFormattings child"
            );
            reader.skip(child)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::IdStrategy;
    use crate::types::{CfRule, CfRuleType, DataBar, IconSet};
    use crate::xform::test_support::{parse_str, render_to_string};

    fn xform() -> ConditionalFormattingsExtXform {
        ConditionalFormattingsExtXform::new(CfRuleExtXform::new(IdStrategy::Sequential))
    }

    fn solid_bar() -> CfRule {
        CfRule::with_data_bar(DataBar {
            gradient: false,
            ..DataBar::default()
        })
    }

    #[test]
    fn test_has_content() {
        assert!(!ConditionalFormattingsExtXform::has_content(&[]));

        let plain = vec![ConditionalFormatting::new(
            "A1:A10",
            vec![CfRule::with_formulae(["A1>0"]), CfRule::with_icon_set(IconSet::named("3Arrows"))],
        )];
        assert!(!ConditionalFormattingsExtXform::has_content(&plain));

        let mixed = vec![
            plain[0].clone(),
            ConditionalFormatting::new("B1:B10", vec![solid_bar()]),
        ];
        assert!(ConditionalFormattingsExtXform::has_content(&mixed));
    }

    #[test]
    fn test_render_nothing_without_content() {
        let model = vec![ConditionalFormatting::new("A1", vec![CfRule::with_formulae(["TRUE"])])];
        assert!(render_to_string(&xform(), &model).is_empty());
    }

    #[test]
    fn test_render_filters_formattings_and_rules() {
        let mut model = vec![
            ConditionalFormatting::new("A1:A5", vec![CfRule::with_formulae(["A1>0"])]),
            ConditionalFormatting::new(
                "B1:B5",
                vec![CfRule::with_formulae(["B1>0"]).priority(1), solid_bar()],
            ),
        ];
        let x = xform();
        x.prepare(&mut model);
        let id = model[1].rules[1].extension_id.clone().unwrap();

        let xml = render_to_string(&x, &model);
        assert_eq!(
            xml,
            format!(
                concat!(
                    r#"<x14:conditionalFormattings>"#,
                    r#"<x14:conditionalFormatting xmlns:xm="http://schemas.microsoft.com/office/excel/2006/main">"#,
                    r#"<x14:cfRule type="dataBar" id="{}"><x14:dataBar minLength="0" maxLength="100" gradient="0"/></x14:cfRule>"#,
                    r#"<xm:sqref>B1:B5</xm:sqref>"#,
                    r#"</x14:conditionalFormatting></x14:conditionalFormattings>"#
                ),
                id
            )
        );
    }

    #[test]
    fn test_prepare_touches_every_rule() {
        let mut model = vec![
            ConditionalFormatting::new("A1", vec![solid_bar(), CfRule::with_formulae(["A1"])]),
            ConditionalFormatting::new("B1", vec![CfRule::with_icon_set(IconSet::named("3Stars"))]),
        ];
        xform().prepare(&mut model);
        assert!(model[0].rules[0].extension_id.is_some());
        assert!(model[0].rules[1].extension_id.is_none());
        assert!(model[1].rules[0].extension_id.is_some());
    }

    #[test]
    fn test_parse() {
        let xml = concat!(
            r#"<x14:conditionalFormattings>"#,
            r#"<x14:conditionalFormatting xmlns:xm="http://schemas.microsoft.com/office/excel/2006/main">"#,
            r#"<x14:cfRule type="expression" priority="2" id="{A}"><xm:f>A1=1</xm:f></x14:cfRule>"#,
            r#"<x14:cfRule type="iconSet" priority="1" id="{B}"><x14:iconSet iconSet="5Boxes"/></x14:cfRule>"#,
            r#"<xm:sqref>A1:C3 E5</xm:sqref>"#,
            r#"</x14:conditionalFormatting>"#,
            r#"<x14:unknown/>"#,
            r#"</x14:conditionalFormattings>"#
        );
        let model = parse_str(&xform(), xml).unwrap();
        assert_eq!(model.len(), 1);
        assert_eq!(model[0].sqref, "A1:C3 E5");
        assert_eq!(model[0].rules.len(), 2);
        assert_eq!(model[0].rules[0].rule_type, CfRuleType::Expression);
        assert_eq!(model[0].rules[1].icon_set.as_ref().unwrap().name, "5Boxes");
    }
}
