//! Document Writer
//!
//! 開始・終了ノードの呼び出し列をXMLバイト列に変換するストリームライター。
//! 子要素もテキストも持たない要素は自己終了タグ（`<tag/>`）として出力します。

use std::borrow::Cow;
use std::io::Write;

use quick_xml::events::{BytesEnd, BytesStart, BytesText, Event};
use quick_xml::Writer;

use crate::api::OutputStyle;
use crate::error::XlsxExtError;

/// 要素の属性リスト
///
/// 値が`None`の属性は出力時に省略されます。
#[derive(Debug, Default, Clone)]
pub(crate) struct Attributes<'a> {
    items: Vec<(&'a str, Cow<'a, str>)>,
}

impl<'a> Attributes<'a> {
    pub fn new() -> Self {
        Self { items: Vec::new() }
    }

    /// 属性を追加
    pub fn with(mut self, key: &'a str, value: impl Into<Cow<'a, str>>) -> Self {
        self.items.push((key, value.into()));
        self
    }

    /// 値が`Some`の場合のみ属性を追加
    pub fn with_opt<V: Into<Cow<'a, str>>>(self, key: &'a str, value: Option<V>) -> Self {
        match value {
            Some(v) => self.with(key, v),
            None => self,
        }
    }

    #[cfg(test)]
    pub fn len(&self) -> usize {
        self.items.len()
    }
}

/// XMLストリームライター
pub(crate) struct XmlStream<W: Write> {
    writer: Writer<W>,
    /// 開いている要素名のスタック
    open: Vec<String>,
    /// まだ書き出していない開始タグ（子要素が来るまで保留）
    pending: Option<BytesStart<'static>>,
}

impl<W: Write> XmlStream<W> {
    pub fn new(inner: W, style: OutputStyle) -> Self {
        let writer = match style {
            OutputStyle::Compact => Writer::new(inner),
            OutputStyle::Indented { width } => Writer::new_with_indent(inner, b' ', width),
        };
        Self {
            writer,
            open: Vec::new(),
            pending: None,
        }
    }

    /// 要素を開く
    pub fn open_node(&mut self, tag: &str, attributes: Attributes<'_>) -> Result<(), XlsxExtError> {
        self.flush_pending()?;

        let mut start = BytesStart::new(tag.to_string());
        for (key, value) in &attributes.items {
            start.push_attribute((*key, value.as_ref()));
        }
        self.pending = Some(start);
        self.open.push(tag.to_string());
        Ok(())
    }

    /// 現在の要素にテキストを書き込む（エスケープされます）
    pub fn write_text(&mut self, text: &str) -> Result<(), XlsxExtError> {
        if self.open.is_empty() {
            return Err(XlsxExtError::Writer(
                "text written outside of any element".to_string(),
            ));
        }
        self.flush_pending()?;
        self.writer.write_event(Event::Text(BytesText::new(text)))?;
        Ok(())
    }

    /// テキストのみを持つ要素（または空要素）を書き込む
    pub fn leaf_node(
        &mut self,
        tag: &str,
        attributes: Attributes<'_>,
        text: Option<&str>,
    ) -> Result<(), XlsxExtError> {
        self.open_node(tag, attributes)?;
        if let Some(text) = text {
            self.write_text(text)?;
        }
        self.close_node()
    }

    /// 直近に開いた要素を閉じる
    pub fn close_node(&mut self) -> Result<(), XlsxExtError> {
        let tag = self.open.pop().ok_or_else(|| {
            XlsxExtError::Writer("close_node called with no open element".to_string())
        })?;

        match self.pending.take() {
            Some(start) => self.writer.write_event(Event::Empty(start))?,
            None => self.writer.write_event(Event::End(BytesEnd::new(tag)))?,
        }
        Ok(())
    }

    /// 書き込みを終了し、内部のライターを返す
    pub fn finish(self) -> Result<W, XlsxExtError> {
        if let Some(tag) = self.open.last() {
            return Err(XlsxExtError::Writer(format!(
                "element <{}> was never closed",
                tag
            )));
        }
        Ok(self.writer.into_inner())
    }

    fn flush_pending(&mut self) -> Result<(), XlsxExtError> {
        if let Some(start) = self.pending.take() {
            self.writer.write_event(Event::Start(start))?;
        }
        Ok(())
    }
}
