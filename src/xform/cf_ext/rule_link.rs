//! 従来形式の`cfRule`に埋め込む、拡張ルールへの参照
//!
//! ```xml
//! <extLst>
//!   <ext uri="{B025F937-C7B1-47D3-B67F-A62EFF666E3E}" xmlns:x14="...">
//!     <x14:id>{...}</x14:id>
//!   </ext>
//! </extLst>
//! ```

use std::io::Write;

use crate::error::XlsxExtError;
use crate::xform::{Xform, RULE_LINK_URI, X14_NAMESPACE};
use crate::xml::{Attributes, Node, XmlReader, XmlStream};

/// `x14:id`
struct RuleIdXform;

impl Xform for RuleIdXform {
    type Model = String;

    fn tag(&self) -> &'static str {
        "x14:id"
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

/// 参照ブロックの`ext`要素
struct RuleLinkExtXform;

impl Xform for RuleLinkExtXform {
    type Model = Option<String>;

    fn tag(&self) -> &'static str {
        "ext"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &Option<String>,
    ) -> Result<(), XlsxExtError> {
        let Some(id) = model else {
            return Ok(());
        };
        stream.open_node(
            self.tag(),
            Attributes::new()
                .with("uri", RULE_LINK_URI)
                .with("xmlns:x14", X14_NAMESPACE),
        )?;
        RuleIdXform.render(stream, id)?;
        stream.close_node()
    }

    fn create_model(&self, _node: &Node) -> Result<Option<String>, XlsxExtError> {
        Ok(None)
    }

    fn on_child(
        &self,
        model: &mut Option<String>,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        if child.name == RuleIdXform.tag() {
            *model = Some(RuleIdXform.parse(reader, child)?);
            Ok(())
        } else {
            reader.skip(child)
        }
    }
}

/// 従来形式のルール内の`extLst`
///
/// モデルは参照先の拡張識別子です。`None`の場合は何も出力しません。
pub(crate) struct RuleLinkXform;

impl Xform for RuleLinkXform {
    type Model = Option<String>;

    fn tag(&self) -> &'static str {
        "extLst"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &Option<String>,
    ) -> Result<(), XlsxExtError> {
        if model.is_none() {
            return Ok(());
        }
        stream.open_node(self.tag(), Attributes::new())?;
        RuleLinkExtXform.render(stream, model)?;
        stream.close_node()
    }

    fn create_model(&self, _node: &Node) -> Result<Option<String>, XlsxExtError> {
        Ok(None)
    }

    fn on_child(
        &self,
        model: &mut Option<String>,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        if child.name == RuleLinkExtXform.tag() && child.attr("uri") == Some(RULE_LINK_URI) {
            if let Some(id) = RuleLinkExtXform.parse(reader, child)? {
                *model = Some(id);
            }
            Ok(())
        } else {
            tracing::debug!(
                element = %child.name,
                uri = ?child.attr("uri"),
                "skipping unrelated ext block"
            );
            reader.skip(child)
        }
    }
}
