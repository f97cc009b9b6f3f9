//! XML Stream Module
//!
//! quick-xmlを使用したドキュメントライター・リーダーの実装。
//! 変換処理（xform）はこのモジュールの開始・終了ノード単位のAPIのみを使用します。

mod reader;
mod writer;

pub(crate) use reader::{Node, XmlEvent, XmlReader};
pub(crate) use writer::{Attributes, XmlStream};
