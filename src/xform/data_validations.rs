//! `x14:dataValidations`（データの入力規則の拡張ブロック）
//!
//! 他シートを参照するリストなど、数式を`xm:f`で保持する入力規則を扱います。

use std::io::Write;

use super::cf_ext::FormulaXform;
use super::{bool_attr, bool_value, Xform, XM_NAMESPACE};
use crate::error::XlsxExtError;
use crate::types::DataValidation;
use crate::xml::{Attributes, Node, XmlReader, XmlStream};

/// `x14:formula1`/`x14:formula2`（`xm:f`を一つ含む）
struct DvFormulaXform {
    tag: &'static str,
}

impl Xform for DvFormulaXform {
    type Model = String;

    fn tag(&self) -> &'static str {
        self.tag
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &String,
    ) -> Result<(), XlsxExtError> {
        stream.open_node(self.tag, Attributes::new())?;
        FormulaXform.render(stream, model)?;
        stream.close_node()
    }

    fn create_model(&self, _node: &Node) -> Result<String, XlsxExtError> {
        Ok(String::new())
    }

    fn on_child(
        &self,
        model: &mut String,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        if child.name == FormulaXform.tag() {
            *model = FormulaXform.parse(reader, child)?;
            Ok(())
        } else {
            reader.skip(child)
        }
    }
}

const FORMULA1: DvFormulaXform = DvFormulaXform { tag: "x14:formula1" };
const FORMULA2: DvFormulaXform = DvFormulaXform { tag: "x14:formula2" };

/// `x14:dataValidation`
struct DataValidationExtXform;

impl Xform for DataValidationExtXform {
    type Model = DataValidation;

    fn tag(&self) -> &'static str {
        "x14:dataValidation"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &DataValidation,
    ) -> Result<(), XlsxExtError> {
        let attributes = Attributes::new()
            .with_opt("type", model.validation_type.as_deref())
            .with_opt("errorStyle", model.error_style.as_deref())
            .with_opt("operator", model.operator.as_deref())
            .with_opt("allowBlank", bool_value(model.allow_blank, false))
            .with_opt("showDropDown", bool_value(model.show_drop_down, false))
            .with_opt("showInputMessage", bool_value(model.show_input_message, false))
            .with_opt("showErrorMessage", bool_value(model.show_error_message, false))
            .with_opt("errorTitle", model.error_title.as_deref())
            .with_opt("error", model.error.as_deref())
            .with_opt("promptTitle", model.prompt_title.as_deref())
            .with_opt("prompt", model.prompt.as_deref());

        stream.open_node(self.tag(), attributes)?;
        if let Some(formula) = &model.formula1 {
            FORMULA1.render(stream, formula)?;
        }
        if let Some(formula) = &model.formula2 {
            FORMULA2.render(stream, formula)?;
        }
        stream.leaf_node("xm:sqref", Attributes::new(), Some(model.sqref.as_str()))?;
        stream.close_node()
    }

    fn create_model(&self, node: &Node) -> Result<DataValidation, XlsxExtError> {
        let text = |key: &str| node.attr(key).map(str::to_string);
        Ok(DataValidation {
            validation_type: text("type"),
            error_style: text("errorStyle"),
            operator: text("operator"),
            allow_blank: bool_attr(node, "allowBlank").unwrap_or(false),
            show_drop_down: bool_attr(node, "showDropDown").unwrap_or(false),
            show_input_message: bool_attr(node, "showInputMessage").unwrap_or(false),
            show_error_message: bool_attr(node, "showErrorMessage").unwrap_or(false),
            error_title: text("errorTitle"),
            error: text("error"),
            prompt_title: text("promptTitle"),
            prompt: text("prompt"),
            ..DataValidation::default()
        })
    }

    fn on_child(
        &self,
        model: &mut DataValidation,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        match child.name.as_str() {
            "x14:formula1" => model.formula1 = Some(FORMULA1.parse(reader, child)?),
            "x14:formula2" => model.formula2 = Some(FORMULA2.parse(reader, child)?),
            "xm:sqref" => model.sqref = FormulaXform.parse(reader, child)?,
            _ => reader.skip(child)?,
        }
        Ok(())
    }
}

/// `x14:dataValidations`
pub(crate) struct DataValidationsExtXform;

impl DataValidationsExtXform {
    pub fn has_content(model: &[DataValidation]) -> bool {
        !model.is_empty()
    }
}

impl Xform for DataValidationsExtXform {
    type Model = Vec<DataValidation>;

    fn tag(&self) -> &'static str {
        "x14:dataValidations"
    }

    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &Vec<DataValidation>,
    ) -> Result<(), XlsxExtError> {
        if !Self::has_content(model) {
            return Ok(());
        }

        stream.open_node(
            self.tag(),
            Attributes::new()
                .with("count", model.len().to_string())
                .with("xmlns:xm", XM_NAMESPACE),
        )?;
        for validation in model {
            DataValidationExtXform.render(stream, validation)?;
        }
        stream.close_node()
    }

    fn create_model(&self, _node: &Node) -> Result<Vec<DataValidation>, XlsxExtError> {
        Ok(Vec::new())
    }

    fn on_child(
        &self,
        model: &mut Vec<DataValidation>,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        if child.name == DataValidationExtXform.tag() {
            model.push(DataValidationExtXform.parse(reader, child)?);
            Ok(())
        } else {
            reader.skip(child)
        }
    }
}
