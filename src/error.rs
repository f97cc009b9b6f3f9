//! Error Types Module
//!
//! クレート全体で使用する構造化エラー型を定義するモジュール。
//! `thiserror`を使用して、エラーの自動変換とメッセージフォーマットを実現する。

use thiserror::Error;

/// xlsxextクレート全体で使用するエラー型
///
/// 拡張リスト（`extLst`）の書き出し・読み込み処理中に発生する
/// すべてのエラーを統一的に扱うために使用されます。
///
/// # エラーの種類
///
/// - `Io`: 出力先への書き込み、入力の読み込みに失敗した
/// - `Xml`: quick-xml由来の低レベルなXMLエラー
/// - `Malformed`: 子要素（データバー、アイコンセットなど）の内容が不正
/// - `Config`: ビルダー設定の検証に失敗した
/// - `SecurityViolation`: 解析時の制限を超えた
///
/// 優先度（`priority`）の数値変換失敗はエラーにならず、`None`として扱われます。
///
/// # 使用例
///
/// ```rust,no_run
/// use xlsxext::{ExtLstSerializerBuilder, XlsxExtError};
///
/// fn load(xml: &str) -> Result<(), XlsxExtError> {
///     let serializer = ExtLstSerializerBuilder::new().build()?;
///     let model = serializer.parse_str(xml)?;
///     println!("{} formattings", model.conditional_formattings.len());
///     Ok(())
/// }
/// ```
#[derive(Error, Debug)]
pub enum XlsxExtError {
    /// I/O操作中に発生したエラー
    ///
    /// `#[from]`属性により、`std::io::Error`から自動的に変換されます。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// XMLの読み書き中に発生したエラー（quick-xml由来）
    #[error("XML error: {0}")]
    Xml(#[from] quick_xml::Error),

    /// UTF-8文字列の変換エラー
    ///
    /// 入力バイト列、または書き出し結果を文字列に変換できなかった場合に発生します。
    #[error("UTF-8 conversion error: {0}")]
    Utf8(#[from] std::string::FromUtf8Error),

    /// 要素の内容が不正
    ///
    /// データバー、アイコンセット、cfvoなどの子要素の属性値が解釈できない場合に
    /// 発生します。このエラーは回復されず、処理全体が中断されます。
    #[error("Malformed <{element}>: {message}")]
    Malformed {
        /// 問題のあった要素名
        element: String,
        /// エラーの詳細メッセージ
        message: String,
    },

    /// 要素が閉じられる前に入力が終了した
    #[error("Unexpected end of document inside <{0}>")]
    UnexpectedEof(String),

    /// ドキュメントライターの使用方法が不正（開始・終了タグの不整合）
    #[error("Writer error: {0}")]
    Writer(String),

    /// 設定の検証に失敗したエラー
    ///
    /// `ExtLstSerializerBuilder::build()`時に設定を検証し、無効な設定が検出された
    /// 場合に発生します。
    ///
    /// # 例
    ///
    /// ```rust,no_run
    /// use xlsxext::{ExtLstSerializerBuilder, XlsxExtError};
    ///
    /// let result = ExtLstSerializerBuilder::new().with_max_depth(0).build();
    ///
    /// match result {
    ///     Err(XlsxExtError::Config(msg)) => {
    ///         println!("設定エラー: {}", msg);
    ///     }
    ///     _ => {}
    /// }
    /// ```
    #[error("Configuration error: {0}")]
    Config(String),

    /// セキュリティ制限に違反したエラー
    ///
    /// 入力サイズ・ネスト深さの上限超過、DOCTYPE宣言の検出時に発生します。
    #[error("Security violation: {0}")]
    SecurityViolation(String),
}

impl XlsxExtError {
    /// `Malformed`エラーを生成するヘルパー
    pub(crate) fn malformed(element: &str, message: impl Into<String>) -> Self {
        XlsxExtError::Malformed {
            element: element.to_string(),
            message: message.into(),
        }
    }
}
