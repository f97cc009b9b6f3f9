//! `extLst`（ワークシートの拡張リスト）
//!
//! 条件付き書式とデータの入力規則、それぞれの拡張ブロック（`ext`）を
//! 内容がある場合のみ出力します。どちらも空であれば`extLst`自体を出力しません。

use std::io::Write;

use super::cf_ext::{CfRuleExtXform, ConditionalFormattingsExtXform};
use super::data_validations::DataValidationsExtXform;
use super::{Xform, CONDITIONAL_FORMATTINGS_URI, DATA_VALIDATIONS_URI, X14_NAMESPACE};
use crate::error::XlsxExtError;
use crate::types::ExtLstModel;
use crate::xml::{Attributes, Node, XmlEvent, XmlReader, XmlStream};

/// `ext`要素
///
/// 一つの`ext`要素は一種類の拡張ブロックのみを含みます。読み込み時は
/// 子要素のタグで種類を判別し、モデルの該当する項目のみを埋めます。
struct ExtXform {
    conditional_formattings: ConditionalFormattingsExtXform,
}

impl ExtXform {
    fn has_content(model: &ExtLstModel) -> bool {
        ConditionalFormattingsExtXform::has_content(&model.conditional_formattings)
            || DataValidationsExtXform::has_content(&model.data_validations)
    }
}

impl Xform for ExtXform {
    type Model = ExtLstModel;

    fn tag(&self) -> &'static str {
        "ext"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &ExtLstModel,
    ) -> Result<(), XlsxExtError> {
        if ConditionalFormattingsExtXform::has_content(&model.conditional_formattings) {
            stream.open_node(
                self.tag(),
                Attributes::new()
                    .with("uri", CONDITIONAL_FORMATTINGS_URI)
                    .with("xmlns:x14", X14_NAMESPACE),
            )?;
            self.conditional_formattings
                .render(stream, &model.conditional_formattings)?;
            stream.close_node()?;
        }

        if DataValidationsExtXform::has_content(&model.data_validations) {
            stream.open_node(
                self.tag(),
                Attributes::new()
                    .with("uri", DATA_VALIDATIONS_URI)
                    .with("xmlns:x14", X14_NAMESPACE),
            )?;
            DataValidationsExtXform.render(stream, &model.data_validations)?;
            stream.close_node()?;
        }

        Ok(())
    }

    fn create_model(&self, _node: &Node) -> Result<ExtLstModel, XlsxExtError> {
        Ok(ExtLstModel::default())
    }

    fn on_child(
        &self,
        model: &mut ExtLstModel,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        match child.name.as_str() {
            "x14:conditionalFormattings" => {
                model.conditional_formattings = self.conditional_formattings.parse(reader, child)?
            }
            "x14:dataValidations" => {
                model.data_validations = DataValidationsExtXform.parse(reader, child)?
            }
            _ => {
                tracing::debug!(element = %child.name, "skipping unsupported ext block");
                reader.skip(child)?
            }
        }
        Ok(())
    }
}

/// `extLst`
pub(crate) struct ExtLstXform {
    ext: ExtXform,
}

impl ExtLstXform {
    pub fn new(rule: CfRuleExtXform) -> Self {
        Self {
            ext: ExtXform {
                conditional_formattings: ConditionalFormattingsExtXform::new(rule),
            },
        }
    }

    /// 出力すべき内容があるかどうか
    pub fn has_content(model: &ExtLstModel) -> bool {
        ExtXform::has_content(model)
    }

    /// 書き出し前の準備（拡張識別子の割り当て）
    pub fn prepare(&self, model: &mut ExtLstModel) {
        self.ext
            .conditional_formattings
            .prepare(&mut model.conditional_formattings);
    }

    /// ワークシート全体から、ルート要素直下の`extLst`を探して読み込む
    ///
    /// `extLst`がない場合は空のモデルを返します。`cfRule`などの内側にある
    /// `extLst`は対象外です。
    pub fn parse_worksheet(&self, reader: &mut XmlReader<'_>) -> Result<ExtLstModel, XlsxExtError> {
        let root = loop {
            match reader.next_event()? {
                XmlEvent::Open(node) => break node,
                XmlEvent::Eof => return Ok(ExtLstModel::default()),
                XmlEvent::Text(_) | XmlEvent::Close(_) => {}
            }
        };
        if root.is_empty {
            return Ok(ExtLstModel::default());
        }

        let mut model = ExtLstModel::default();
        loop {
            match reader.next_event()? {
                XmlEvent::Open(child) if child.name == self.tag() => {
                    let found = self.parse(reader, &child)?;
                    merge(&mut model, found);
                }
                XmlEvent::Open(child) => reader.skip(&child)?,
                XmlEvent::Text(_) => {}
                XmlEvent::Close(_) => return Ok(model),
                XmlEvent::Eof => return Err(XlsxExtError::UnexpectedEof(root.name)),
            }
        }
    }
}

/// 読み込んだ拡張ブロックの内容を追加する
fn merge(model: &mut ExtLstModel, other: ExtLstModel) {
    model
        .conditional_formattings
        .extend(other.conditional_formattings);
    model.data_validations.extend(other.data_validations);
}

impl Xform for ExtLstXform {
    type Model = ExtLstModel;

    fn tag(&self) -> &'static str {
        "extLst"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &ExtLstModel,
    ) -> Result<(), XlsxExtError> {
        if !Self::has_content(model) {
            return Ok(());
        }

        stream.open_node(self.tag(), Attributes::new())?;
        self.ext.render(stream, model)?;
        stream.close_node()
    }

    fn create_model(&self, _node: &Node) -> Result<ExtLstModel, XlsxExtError> {
        Ok(ExtLstModel::default())
    }

    fn on_child(
        &self,
        model: &mut ExtLstModel,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        if child.name == self.ext.tag() {
            let block = self.ext.parse(reader, child)?;
            merge(model, block);
            Ok(())
        } else {
            reader.skip(child)
        }
    }
}
