//! `x14:cfRule`（拡張形式の条件付き書式ルール）
//!
//! ルールが拡張形式を必要とするかの判定、拡張識別子の割り当て、
//! ルールの種類に応じた子要素の書き出し・読み込みを担当します。

use std::io::Write;

use super::data_bar::DataBarXform;
use super::dxf::DxfXform;
use super::formula::FormulaXform;
use super::icon_set::IconSetXform;
use crate::api::IdStrategy;
use crate::error::XlsxExtError;
use crate::types::{CfRule, CfRuleType, DataBar, Dxf, IconSet};
use crate::xform::{lenient_int_attr, Xform};
use crate::xml::{Attributes, Node, XmlReader, XmlStream};

/// `x14:cfRule`の子要素
enum CfRuleChild {
    DataBar,
    IconSet,
    Formula,
    Dxf,
}

impl CfRuleChild {
    fn from_tag(tag: &str) -> Option<Self> {
        Some(match tag {
            "x14:dataBar" => CfRuleChild::DataBar,
            "x14:iconSet" => CfRuleChild::IconSet,
            "xm:f" => CfRuleChild::Formula,
            "x14:dxf" => CfRuleChild::Dxf,
            _ => return None,
        })
    }
}

/// 子要素の読み込み結果
enum CfRuleFragment {
    DataBar(DataBar),
    IconSet(IconSet),
    Formula(String),
    Dxf(Dxf),
}

#[derive(Debug, Clone, Copy)]
pub(crate) struct CfRuleExtXform {
    ids: IdStrategy,
}

impl CfRuleExtXform {
    pub fn new(ids: IdStrategy) -> Self {
        Self { ids }
    }

    /// ルールが拡張形式を必要とするかどうか
    ///
    /// 拡張識別子を持つルールは常に対象です（一度拡張形式になったルールは戻らない）。
    /// それ以外は、データバーとアイコンセットのみ設定内容によって判定します。
    pub fn is_ext(rule: &CfRule) -> bool {
        if rule.extension_id.is_some() {
            return true;
        }
        match rule.rule_type {
            CfRuleType::DataBar => rule.data_bar.as_ref().is_some_and(DataBarXform::is_ext),
            CfRuleType::IconSet => rule.icon_set.as_ref().is_some_and(IconSetXform::is_ext),
            CfRuleType::Expression | CfRuleType::Other(_) => false,
        }
    }

    /// 拡張形式が必要で識別子を持たないルールに、新しい識別子を割り当てる
    ///
    /// 既に識別子を持つルールは変更しません。
    pub fn prepare(&self, rule: &mut CfRule) {
        if rule.extension_id.is_none() && Self::is_ext(rule) {
            let id = self.ids.next_id();
            tracing::trace!(rule_type = rule.rule_type.as_str(), id = %id, "assigned extension id");
            rule.extension_id = Some(id);
        }
    }

    fn render_data_bar<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &CfRule,
    ) -> Result<(), XlsxExtError> {
        if model.extension_id.is_none() {
            tracing::warn!("data bar rule rendered before an extension id was assigned");
        }
        stream.open_node(
            self.tag(),
            Attributes::new()
                .with("type", "dataBar")
                .with_opt("id", model.extension_id.as_deref()),
        )?;

        match &model.data_bar {
            Some(data_bar) => DataBarXform.render(stream, data_bar)?,
            None => DataBarXform.render(stream, &DataBar::default())?,
        }

        stream.close_node()
    }

    fn render_icon_set<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &CfRule,
    ) -> Result<(), XlsxExtError> {
        // 準備処理を経ていない場合でも、識別子なしの要素は出力しない
        let id = match &model.extension_id {
            Some(id) => id.clone(),
            None => self.ids.next_id(),
        };
        stream.open_node(
            self.tag(),
            Attributes::new()
                .with("type", "iconSet")
                .with_opt("priority", model.priority.map(|p| p.to_string()))
                .with("id", id),
        )?;

        match &model.icon_set {
            Some(icon_set) => IconSetXform.render(stream, icon_set)?,
            None => IconSetXform.render(stream, &IconSet::default())?,
        }

        stream.close_node()
    }

    fn render_expression<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &CfRule,
    ) -> Result<(), XlsxExtError> {
        stream.open_node(
            self.tag(),
            Attributes::new()
                .with("type", "expression")
                .with_opt("id", model.extension_id.as_deref())
                .with_opt("priority", model.priority.map(|p| p.to_string())),
        )?;

        for formula in model.formulae.iter().flatten() {
            FormulaXform.render(stream, formula)?;
        }

        // 書式は任意（ない場合は何も出力しない）
        if let Some(style) = &model.style {
            DxfXform.render(stream, style)?;
        }

        stream.close_node()
    }

    fn merge(model: &mut CfRule, fragment: CfRuleFragment) {
        match fragment {
            CfRuleFragment::DataBar(data_bar) => model.data_bar = Some(data_bar),
            CfRuleFragment::IconSet(icon_set) => model.icon_set = Some(icon_set),
            CfRuleFragment::Formula(formula) => {
                model.formulae.get_or_insert_with(Vec::new).push(formula)
            }
            CfRuleFragment::Dxf(style) => model.style = Some(style),
        }
    }
}

impl Xform for CfRuleExtXform {
    type Model = CfRule;

    fn tag(&self) -> &'static str {
        "x14:cfRule"
    }

    /// 拡張形式が必要なルールのみを書き出す
    ///
    /// 拡張スキーマが扱わない種類のルールは、識別子を持っていても出力しません。
    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &CfRule,
    ) -> Result<(), XlsxExtError> {
        if !Self::is_ext(model) {
            return Ok(());
        }

        match &model.rule_type {
            CfRuleType::DataBar => self.render_data_bar(stream, model),
            CfRuleType::IconSet => self.render_icon_set(stream, model),
            CfRuleType::Expression => self.render_expression(stream, model),
            CfRuleType::Other(rule_type) => {
                tracing::debug!(
                    rule_type = %rule_type,
                    "skipping rule type without an extension form"
                );
                Ok(())
            }
        }
    }

    fn create_model(&self, node: &Node) -> Result<CfRule, XlsxExtError> {
        let rule_type = CfRuleType::from(node.attr("type").unwrap_or_default());
        Ok(CfRule {
            extension_id: node.attr("id").map(str::to_string),
            priority: lenient_int_attr(node, "priority"),
            ..CfRule::new(rule_type)
        })
    }

    fn on_child(
        &self,
        model: &mut CfRule,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        let Some(kind) = CfRuleChild::from_tag(&child.name) else {
            tracing::debug!(element = %child.name, "skipping unrecognised cfRule child");
            return reader.skip(child);
        };
        let fragment = match kind {
            CfRuleChild::DataBar => CfRuleFragment::DataBar(DataBarXform.parse(reader, child)?),
            CfRuleChild::IconSet => CfRuleFragment::IconSet(IconSetXform.parse(reader, child)?),
            CfRuleChild::Formula => CfRuleFragment::Formula(FormulaXform.parse(reader, child)?),
            CfRuleChild::Dxf => CfRuleFragment::Dxf(DxfXform.parse(reader, child)?),
        };
        Self::merge(model, fragment);
        Ok(())
    }
}
