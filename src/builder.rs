//! Builder Module
//!
//! Fluent Builder APIを提供し、`ExtLstSerializer`インスタンスを段階的に構築する。

use std::io::{Read, Write};

use crate::api::{IdStrategy, OutputStyle};
use crate::error::XlsxExtError;
use crate::security::ParseLimits;
use crate::types::{CfRule, ExtLstModel};
use crate::xform::{CfRuleExtXform, ExtLstXform, RuleLinkXform, Xform};
use crate::xml::{Node, XmlEvent, XmlReader, XmlStream};

/// インデント幅の上限
const MAX_INDENT_WIDTH: usize = 8;

/// シリアライザーの設定を保持する内部構造体
#[derive(Debug, Clone)]
pub(crate) struct SerializerConfig {
    /// 拡張識別子の生成方式
    pub id_strategy: IdStrategy,

    /// XML出力のスタイル
    pub output_style: OutputStyle,

    /// 解析時の制限
    pub limits: ParseLimits,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            id_strategy: IdStrategy::RandomUuid,
            output_style: OutputStyle::Compact,
            limits: ParseLimits::default(),
        }
    }
}

/// Fluent Builder APIを提供する構造体
///
/// `ExtLstSerializer`インスタンスを段階的に構築するためのビルダーです。
/// すべての設定項目にデフォルト値が設定されており、必要な設定のみをオーバーライドできます。
///
/// # 使用例
///
/// ```rust
/// use xlsxext::{ExtLstSerializerBuilder, IdStrategy, OutputStyle};
///
/// # fn main() -> Result<(), xlsxext::XlsxExtError> {
/// let serializer = ExtLstSerializerBuilder::new()
///     .with_id_strategy(IdStrategy::Sequential)
///     .with_output_style(OutputStyle::Indented { width: 2 })
///     .build()?;
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtLstSerializerBuilder {
    /// 内部設定（構築中）
    config: SerializerConfig,
}

impl Default for ExtLstSerializerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl ExtLstSerializerBuilder {
    /// デフォルト設定を持つビルダーインスタンスを生成する
    ///
    /// # デフォルト設定
    ///
    /// - 識別子: ランダムなUUID
    /// - 出力スタイル: 改行・インデントなし
    /// - 入力サイズの上限: 64MB
    /// - ネスト深さの上限: 64
    pub fn new() -> Self {
        Self {
            config: SerializerConfig::default(),
        }
    }

    /// 拡張識別子の生成方式を指定する
    ///
    /// # 使用例
    ///
    /// ```rust
    /// use xlsxext::{ExtLstSerializerBuilder, IdStrategy};
    ///
    /// // 出力を比較しやすくするため連番を使用
    /// let builder = ExtLstSerializerBuilder::new()
    ///     .with_id_strategy(IdStrategy::Sequential);
    /// ```
    pub fn with_id_strategy(mut self, strategy: IdStrategy) -> Self {
        self.config.id_strategy = strategy;
        self
    }

    /// XML出力のスタイルを指定する
    ///
    /// # 制約
    ///
    /// * `OutputStyle::Indented { width }`の`width`は1〜8でなければならない
    /// * 制約違反の場合、`build()`時に`XlsxExtError::Config`を返す
    pub fn with_output_style(mut self, style: OutputStyle) -> Self {
        self.config.output_style = style;
        self
    }

    /// 解析時の要素の最大ネスト深さを指定する（0は不可）
    pub fn with_max_depth(mut self, depth: usize) -> Self {
        self.config.limits.max_depth = depth;
        self
    }

    /// 解析時の入力の最大サイズ（バイト）を指定する（0は不可）
    pub fn with_max_input_size(mut self, size: usize) -> Self {
        self.config.limits.max_input_size = size;
        self
    }

    /// 設定を検証し、`ExtLstSerializer`インスタンスを生成する
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxExtError::Config(String)`: 設定の検証に失敗した場合
    ///   * インデント幅が範囲外
    ///   * 最大ネスト深さ、最大入力サイズが0
    pub fn build(self) -> Result<ExtLstSerializer, XlsxExtError> {
        // 1. 出力スタイルの検証
        if let OutputStyle::Indented { width } = self.config.output_style {
            if width == 0 || width > MAX_INDENT_WIDTH {
                return Err(XlsxExtError::Config(format!(
                    "Invalid indent width: {} (expected 1..={})",
                    width, MAX_INDENT_WIDTH
                )));
            }
        }

        // 2. 解析時の制限の検証
        if self.config.limits.max_depth == 0 {
            return Err(XlsxExtError::Config(
                "Invalid max depth: must be greater than 0".to_string(),
            ));
        }
        if self.config.limits.max_input_size == 0 {
            return Err(XlsxExtError::Config(
                "Invalid max input size: must be greater than 0".to_string(),
            ));
        }

        Ok(ExtLstSerializer::new(self.config))
    }
}

/// 拡張リストの書き出し・読み込みのファサード
///
/// ワークシートの`extLst`要素と、従来形式のルールに埋め込む参照ブロックを扱う
/// メインエントリーポイントです。
///
/// 書き出しは二段階です。`prepare`で拡張形式が必要なルールに識別子を割り当て、
/// その後`render`で出力します。識別子は従来形式のルール側の参照
/// （`render_rule_link`）と一致させる必要があるため、同じモデルを使ってください。
///
/// # 使用例
///
/// ```rust
/// use xlsxext::{CfRule, ConditionalFormatting, DataBar, ExtLstModel, ExtLstSerializerBuilder};
///
/// # fn main() -> Result<(), xlsxext::XlsxExtError> {
/// let serializer = ExtLstSerializerBuilder::new().build()?;
///
/// let bar = DataBar { gradient: false, ..DataBar::default() };
/// let mut model = ExtLstModel {
///     conditional_formattings: vec![ConditionalFormatting::new(
///         "A1:A10",
///         vec![CfRule::with_data_bar(bar).priority(1)],
///     )],
///     data_validations: Vec::new(),
/// };
///
/// serializer.prepare(&mut model);
/// let ext_lst = serializer.render_to_string(&model)?;
/// let link = serializer.render_rule_link(&model.conditional_formattings[0].rules[0])?;
/// assert!(ext_lst.starts_with("<extLst>"));
/// assert!(link.contains("<x14:id>"));
/// # Ok(())
/// # }
/// ```
#[derive(Debug)]
pub struct ExtLstSerializer {
    /// シリアライザー設定
    config: SerializerConfig,
}

impl ExtLstSerializer {
    pub(crate) fn new(config: SerializerConfig) -> Self {
        Self { config }
    }

    fn rule_xform(&self) -> CfRuleExtXform {
        CfRuleExtXform::new(self.config.id_strategy)
    }

    fn ext_lst_xform(&self) -> ExtLstXform {
        ExtLstXform::new(self.rule_xform())
    }

    /// 拡張形式が必要で識別子を持たないルールに、識別子を割り当てる
    ///
    /// 既に識別子を持つルールは変更されないため、何度呼び出しても結果は同じです。
    pub fn prepare(&self, model: &mut ExtLstModel) {
        let before = count_ids(model);
        self.ext_lst_xform().prepare(model);
        tracing::debug!(assigned = count_ids(model) - before, "prepared extension list");
    }

    /// 出力すべき内容があるかどうか
    ///
    /// `false`の場合、`render`は何も出力しません。
    pub fn has_content(&self, model: &ExtLstModel) -> bool {
        ExtLstXform::has_content(model)
    }

    /// `extLst`要素を書き出す
    ///
    /// 識別子の割り当ては行いません。事前に`prepare`を呼び出してください。
    pub fn render<W: Write>(&self, model: &ExtLstModel, output: W) -> Result<(), XlsxExtError> {
        let mut stream = XmlStream::new(output, self.config.output_style);
        self.ext_lst_xform().render(&mut stream, model)?;
        stream.finish()?.flush()?;
        Ok(())
    }

    /// `extLst`要素を文字列として書き出す
    pub fn render_to_string(&self, model: &ExtLstModel) -> Result<String, XlsxExtError> {
        let mut buffer = Vec::new();
        self.render(model, &mut buffer)?;
        Ok(String::from_utf8(buffer)?)
    }

    /// 識別子の割り当てと書き出しを続けて行う
    pub fn write<W: Write>(&self, model: &mut ExtLstModel, output: W) -> Result<(), XlsxExtError> {
        self.prepare(model);
        self.render(model, output)
    }

    /// `extLst`要素を読み込む
    ///
    /// 空の入力は空のモデルになります。
    ///
    /// # 発生し得るエラー
    ///
    /// * `XlsxExtError::Malformed`: ルート要素が`extLst`でない、または子要素の内容が不正
    /// * `XlsxExtError::SecurityViolation`: 解析時の制限を超えた
    pub fn parse_str(&self, xml: &str) -> Result<ExtLstModel, XlsxExtError> {
        let xform = self.ext_lst_xform();
        let mut reader = XmlReader::new(xml, self.config.limits)?;
        match first_element(&mut reader)? {
            Some(root) => {
                expect_tag(&root, xform.tag())?;
                xform.parse(&mut reader, &root)
            }
            None => Ok(ExtLstModel::default()),
        }
    }

    /// リーダーから`extLst`要素を読み込む
    pub fn parse<R: Read>(&self, input: R) -> Result<ExtLstModel, XlsxExtError> {
        let xml = self.read_input(input)?;
        self.parse_str(&xml)
    }

    /// ワークシートXML全体から拡張リストを読み込む
    ///
    /// ルート要素直下の`extLst`のみを対象とし、見つからない場合は空のモデルを返します。
    pub fn parse_worksheet_str(&self, xml: &str) -> Result<ExtLstModel, XlsxExtError> {
        let mut reader = XmlReader::new(xml, self.config.limits)?;
        self.ext_lst_xform().parse_worksheet(&mut reader)
    }

    /// 従来形式の`cfRule`に埋め込む、拡張ルールへの参照ブロックを書き出す
    ///
    /// 拡張形式が不要なルール、識別子が割り当てられていないルールは空文字列になります。
    pub fn render_rule_link(&self, rule: &CfRule) -> Result<String, XlsxExtError> {
        let link = if CfRuleExtXform::is_ext(rule) {
            rule.extension_id.clone()
        } else {
            None
        };

        let mut stream = XmlStream::new(Vec::new(), self.config.output_style);
        RuleLinkXform.render(&mut stream, &link)?;
        Ok(String::from_utf8(stream.finish()?)?)
    }

    /// 参照ブロック（`extLst`）から拡張識別子を読み込む
    pub fn parse_rule_link(&self, xml: &str) -> Result<Option<String>, XlsxExtError> {
        let mut reader = XmlReader::new(xml, self.config.limits)?;
        match first_element(&mut reader)? {
            Some(root) => {
                expect_tag(&root, RuleLinkXform.tag())?;
                RuleLinkXform.parse(&mut reader, &root)
            }
            None => Ok(None),
        }
    }

    fn read_input<R: Read>(&self, input: R) -> Result<String, XlsxExtError> {
        let max = self.config.limits.max_input_size;
        let mut buffer = Vec::new();
        input.take(max as u64 + 1).read_to_end(&mut buffer)?;
        self.config.limits.check_input_size(buffer.len())?;
        Ok(String::from_utf8(buffer)?)
    }
}

/// 最初の要素の開始タグまで読み進める
fn first_element(reader: &mut XmlReader<'_>) -> Result<Option<Node>, XlsxExtError> {
    loop {
        match reader.next_event()? {
            XmlEvent::Open(node) => return Ok(Some(node)),
            XmlEvent::Eof => return Ok(None),
            XmlEvent::Text(_) | XmlEvent::Close(_) => {}
        }
    }
}

fn expect_tag(node: &Node, tag: &str) -> Result<(), XlsxExtError> {
    if node.name == tag {
        Ok(())
    } else {
        Err(XlsxExtError::malformed(
            tag,
            format!("unexpected root element <{}>", node.name),
        ))
    }
}

fn count_ids(model: &ExtLstModel) -> usize {
    model
        .conditional_formattings
        .iter()
        .flat_map(|cf| &cf.rules)
        .filter(|rule| rule.extension_id.is_some())
        .count()
}
