//! Document Reader
//!
//! quick-xmlのイベント列を、開始ノード・テキスト・終了ノードの呼び出し列に
//! 変換するカーソル。自己終了タグは`is_empty`付きの開始ノードとして通知し、
//! 対応する終了ノードは通知しません。

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::error::XlsxExtError;
use crate::security::ParseLimits;

/// 開始タグの情報
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) struct Node {
    /// 修飾名（例: `x14:cfRule`）
    pub name: String,
    /// 属性（出現順、値はアンエスケープ済み）
    pub attributes: Vec<(String, String)>,
    /// 自己終了タグかどうか
    pub is_empty: bool,
}

impl Node {
    /// 属性値を取得
    pub fn attr(&self, key: &str) -> Option<&str> {
        self.attributes
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }
}

/// 読み込みイベント
#[derive(Debug, Clone, PartialEq, Eq)]
pub(crate) enum XmlEvent {
    Open(Node),
    Text(String),
    Close(String),
    Eof,
}

/// XMLドキュメントリーダー
pub(crate) struct XmlReader<'a> {
    reader: Reader<&'a [u8]>,
    limits: ParseLimits,
    depth: usize,
}

impl<'a> XmlReader<'a> {
    /// 文字列からリーダーを生成
    ///
    /// 入力サイズの上限はここで検証します。
    pub fn new(xml: &'a str, limits: ParseLimits) -> Result<Self, XlsxExtError> {
        limits.check_input_size(xml.len())?;

        let mut reader = Reader::from_str(xml);
        reader.trim_text(false);

        Ok(Self {
            reader,
            limits,
            depth: 0,
        })
    }

    /// 現在のネスト深さ（開いている要素の数）
    #[cfg(test)]
    pub fn depth(&self) -> usize {
        self.depth
    }

    /// 次のイベントを読み込む
    pub fn next_event(&mut self) -> Result<XmlEvent, XlsxExtError> {
        loop {
            match self.reader.read_event()? {
                Event::Start(e) => {
                    let node = self.read_node(&e, false)?;
                    self.depth += 1;
                    self.limits.check_depth(self.depth, &node.name)?;
                    return Ok(XmlEvent::Open(node));
                }
                Event::Empty(e) => {
                    let node = self.read_node(&e, true)?;
                    self.limits.check_depth(self.depth + 1, &node.name)?;
                    return Ok(XmlEvent::Open(node));
                }
                Event::End(e) => {
                    self.depth = self.depth.saturating_sub(1);
                    let qname = e.name();
                    let name = self.reader.decoder().decode(qname.as_ref())?;
                    return Ok(XmlEvent::Close(name.into_owned()));
                }
                Event::Text(e) => {
                    let text = e.unescape()?;
                    if !text.is_empty() {
                        return Ok(XmlEvent::Text(text.into_owned()));
                    }
                }
                Event::CData(e) => {
                    let text = self.reader.decoder().decode(&e)?;
                    return Ok(XmlEvent::Text(text.into_owned()));
                }
                Event::DocType(_) => {
                    return Err(XlsxExtError::SecurityViolation(
                        "DOCTYPE declarations are not allowed".to_string(),
                    ));
                }
                Event::Eof => return Ok(XmlEvent::Eof),
                // 宣言、コメント、処理命令は無視
                _ => {}
            }
        }
    }

    /// 指定した要素の残り（子孫と終了タグ）を読み飛ばす
    pub fn skip(&mut self, node: &Node) -> Result<(), XlsxExtError> {
        if node.is_empty {
            return Ok(());
        }
        let mut level = 1usize;
        loop {
            match self.next_event()? {
                XmlEvent::Open(child) if !child.is_empty => level += 1,
                XmlEvent::Close(_) => {
                    level -= 1;
                    if level == 0 {
                        return Ok(());
                    }
                }
                XmlEvent::Eof => return Err(XlsxExtError::UnexpectedEof(node.name.clone())),
                _ => {}
            }
        }
    }

    fn read_node(
        &self,
        start: &quick_xml::events::BytesStart<'_>,
        is_empty: bool,
    ) -> Result<Node, XlsxExtError> {
        let decoder = self.reader.decoder();
        let name = decoder.decode(start.name().as_ref())?.into_owned();

        let mut attributes = Vec::new();
        for attr in start.attributes() {
            let attr = attr.map_err(|e| {
                XlsxExtError::malformed(&name, format!("XML attribute error: {}", e))
            })?;
            let key = decoder.decode(attr.key.as_ref())?.into_owned();
            let value = attr.unescape_value()?.into_owned();
            attributes.push((key, value));
        }

        Ok(Node {
            name,
            attributes,
            is_empty,
        })
    }
}
