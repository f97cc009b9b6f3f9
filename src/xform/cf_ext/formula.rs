//! `xm:f`（数式テキスト）

use std::io::Write;

use crate::error::XlsxExtError;
use crate::xform::Xform;
use crate::xml::{Attributes, Node, XmlStream};

pub(crate) struct FormulaXform;

impl Xform for FormulaXform {
    type Model = String;

    fn tag(&self) -> &'static str {
        "xm:f"
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
