//! Transform Module
//!
//! モデルとXML要素を相互に変換する「xform」群。
//!
//! 各xformは一つの要素（タグ）を担当し、書き出し（`render`）と
//! 読み込み（`parse`）の両方を実装します。読み込みは、開始タグで空のモデルを
//! 生成し（`create_model`）、子要素が閉じるたびにその結果をマージし
//! （`on_child`）、自身の終了タグでモデルを確定させる（`finish`）流れです。
//! モデルは`parse`のスタック上にのみ存在し、要素の範囲外には残りません。

mod cf_ext;
mod data_validations;
mod ext_lst;

use std::io::Write;
use std::str::FromStr;

use crate::error::XlsxExtError;
use crate::xml::{Node, XmlEvent, XmlReader, XmlStream};

pub(crate) use cf_ext::{CfRuleExtXform, RuleLinkXform};
pub(crate) use ext_lst::ExtLstXform;

/// x14拡張スキーマの名前空間
pub(crate) const X14_NAMESPACE: &str =
    "http://schemas.microsoft.com/office/spreadsheetml/2009/9/main";

/// `xm:`（数式・範囲参照）の名前空間
pub(crate) const XM_NAMESPACE: &str = "http://schemas.microsoft.com/office/excel/2006/main";

/// 条件付き書式の拡張ブロックを識別するURI
pub(crate) const CONDITIONAL_FORMATTINGS_URI: &str = "{78C0D931-6437-407d-A8EE-F0AAD7539E65}";

/// データの入力規則の拡張ブロックを識別するURI
pub(crate) const DATA_VALIDATIONS_URI: &str = "{CCE6A557-97BC-4b89-ADB6-D9C93CAAB3DF}";

/// 従来形式の`cfRule`から拡張ルールを参照するブロックのURI
pub(crate) const RULE_LINK_URI: &str = "{B025F937-C7B1-47D3-B67F-A62EFF666E3E}";

/// 要素単位の変換器
pub(crate) trait Xform {
    type Model;

    /// 担当する要素名
    fn tag(&self) -> &'static str;

    /// モデルを要素として書き出す
    fn render<W: Write>(
        &self,
        stream: &mut XmlStream<W>,
        model: &Self::Model,
    ) -> Result<(), XlsxExtError>;

    /// 開始タグの属性から空のモデルを生成する
    fn create_model(&self, node: &Node) -> Result<Self::Model, XlsxExtError>;

    /// 子要素を読み込み、モデルにマージする
    ///
    /// 既定では未知の要素として読み飛ばします。
    fn on_child(
        &self,
        _model: &mut Self::Model,
        reader: &mut XmlReader<'_>,
        child: &Node,
    ) -> Result<(), XlsxExtError> {
        tracing::debug!(
            parent = self.tag(),
            element = %child.name,
            "skipping unrecognised element"
        );
        reader.skip(child)
    }

    /// テキストを受け取る
    fn on_text(&self, _model: &mut Self::Model, _text: &str) {}

    /// 終了タグでモデルを確定させる
    fn finish(&self, model: Self::Model) -> Result<Self::Model, XlsxExtError> {
        Ok(model)
    }

    /// 開始タグ`node`を読み込んだ直後から、対応する終了タグまでを読み込む
    fn parse(&self, reader: &mut XmlReader<'_>, node: &Node) -> Result<Self::Model, XlsxExtError> {
        let mut model = self.create_model(node)?;
        if !node.is_empty {
            loop {
                match reader.next_event()? {
                    XmlEvent::Open(child) => self.on_child(&mut model, reader, &child)?,
                    // 要素間の改行やインデントのみのテキストは無視
                    XmlEvent::Text(text) if text.trim().is_empty() => {}
                    XmlEvent::Text(text) => self.on_text(&mut model, &text),
                    XmlEvent::Close(_) => break,
                    XmlEvent::Eof => return Err(XlsxExtError::UnexpectedEof(node.name.clone())),
                }
            }
        }
        self.finish(model)
    }
}

/// 真偽値属性を解釈する（`1`/`true`/`0`/`false`）
///
/// 解釈できない値や属性がない場合は`None`を返します。
pub(crate) fn bool_attr(node: &Node, key: &str) -> Option<bool> {
    match node.attr(key)? {
        "1" | "true" => Some(true),
        "0" | "false" => Some(false),
        _ => None,
    }
}

/// 数値属性を厳密に解釈する
///
/// 値が数値として解釈できない場合は`Malformed`エラーになります。
pub(crate) fn number_attr<T: FromStr>(node: &Node, key: &str) -> Result<Option<T>, XlsxExtError> {
    match node.attr(key) {
        None => Ok(None),
        Some(raw) => raw.trim().parse().map(Some).map_err(|_| {
            XlsxExtError::malformed(
                &node.name,
                format!("attribute {}='{}' is not a number", key, raw),
            )
        }),
    }
}

/// 数値属性を寛容に解釈する
///
/// 先頭の整数部分のみを読み取ります（`"2.0"`は`2`）。先頭が数字でない場合は`None`です。
pub(crate) fn lenient_int_attr(node: &Node, key: &str) -> Option<i32> {
    let raw = node.attr(key)?.trim_start();
    let sign = usize::from(raw.starts_with(['-', '+']));
    let digits = raw[sign..].bytes().take_while(u8::is_ascii_digit).count();
    if digits == 0 {
        return None;
    }
    raw[..sign + digits].parse().ok()
}

/// 既定値と異なる場合のみ真偽値属性を出力する
pub(crate) fn bool_value(value: bool, default: bool) -> Option<&'static str> {
    if value == default {
        None
    } else if value {
        Some("1")
    } else {
        Some("0")
    }
}
