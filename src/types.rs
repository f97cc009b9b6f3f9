//! Types Module
//!
//! 拡張リストのモデル（条件付き書式ルール、データの入力規則など）を定義するモジュール。

use serde::{Deserialize, Serialize};

/// 条件付き書式ルールの種類
///
/// 拡張形式で扱うのは`DataBar`、`IconSet`、`Expression`の3種類です。
/// それ以外の種類は`Other`として文字列のまま保持されます
/// （読み込み時は保持され、書き出し時は拡張ブロックに出力されません）。
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum CfRuleType {
    /// データバー（`dataBar`）
    DataBar,
    /// アイコンセット（`iconSet`）
    IconSet,
    /// 数式（`expression`）
    Expression,
    /// その他の種類（例: `cellIs`、`top10`）
    Other(String),
}

impl CfRuleType {
    /// XML属性値としての文字列
    pub fn as_str(&self) -> &str {
        match self {
            CfRuleType::DataBar => "dataBar",
            CfRuleType::IconSet => "iconSet",
            CfRuleType::Expression => "expression",
            CfRuleType::Other(s) => s,
        }
    }
}

impl From<&str> for CfRuleType {
    fn from(value: &str) -> Self {
        match value {
            "dataBar" => CfRuleType::DataBar,
            "iconSet" => CfRuleType::IconSet,
            "expression" => CfRuleType::Expression,
            other => CfRuleType::Other(other.to_string()),
        }
    }
}

impl From<String> for CfRuleType {
    fn from(value: String) -> Self {
        CfRuleType::from(value.as_str())
    }
}

impl From<CfRuleType> for String {
    fn from(value: CfRuleType) -> Self {
        value.as_str().to_string()
    }
}

/// 条件付き書式ルール
///
/// 拡張形式が必要なルールは、書き出し前の準備処理で`extension_id`が割り当てられ、
/// 従来形式のルールと拡張ブロック内のルールがこの識別子で結び付けられます。
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfRule {
    /// ルールの種類
    #[serde(rename = "type")]
    pub rule_type: CfRuleType,
    /// 優先度（小さいほど先に評価される）
    pub priority: Option<i32>,
    /// 拡張識別子（`{XXXXXXXX-XXXX-...}`形式、大文字）
    pub extension_id: Option<String>,
    /// 数式（`Expression`のみ、順序に意味がある）
    pub formulae: Option<Vec<String>>,
    /// データバーの設定
    pub data_bar: Option<DataBar>,
    /// アイコンセットの設定
    pub icon_set: Option<IconSet>,
    /// 差分書式
    pub style: Option<Dxf>,
}

impl CfRule {
    /// 指定した種類の空のルールを生成
    pub fn new(rule_type: CfRuleType) -> Self {
        Self {
            rule_type,
            priority: None,
            extension_id: None,
            formulae: None,
            data_bar: None,
            icon_set: None,
            style: None,
        }
    }

    /// データバーのルールを生成
    pub fn with_data_bar(data_bar: DataBar) -> Self {
        Self {
            data_bar: Some(data_bar),
            ..Self::new(CfRuleType::DataBar)
        }
    }

    /// アイコンセットのルールを生成
    pub fn with_icon_set(icon_set: IconSet) -> Self {
        Self {
            icon_set: Some(icon_set),
            ..Self::new(CfRuleType::IconSet)
        }
    }

    /// 数式のルールを生成
    pub fn with_formulae<I, S>(formulae: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let formulae: Vec<String> = formulae.into_iter().map(Into::into).collect();
        Self {
            formulae: if formulae.is_empty() { None } else { Some(formulae) },
            ..Self::new(CfRuleType::Expression)
        }
    }

    /// 優先度を設定
    pub fn priority(mut self, priority: i32) -> Self {
        self.priority = Some(priority);
        self
    }

    /// 拡張識別子を設定
    pub fn extension_id(mut self, id: impl Into<String>) -> Self {
        self.extension_id = Some(id.into());
        self
    }

    /// 差分書式を設定
    pub fn style(mut self, style: Dxf) -> Self {
        self.style = Some(style);
        self
    }

    /// このルールが拡張形式での出力を必要とするかどうか
    ///
    /// 一度拡張識別子が割り当てられたルールは、種類や設定に関わらず常に`true`です。
    pub fn needs_extension(&self) -> bool {
        crate::xform::CfRuleExtXform::is_ext(self)
    }
}

/// cfvo（条件付き書式の閾値）の種類
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum CfvoType {
    Num,
    Percent,
    Max,
    Min,
    Formula,
    Percentile,
    AutoMin,
    AutoMax,
}

impl CfvoType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CfvoType::Num => "num",
            CfvoType::Percent => "percent",
            CfvoType::Max => "max",
            CfvoType::Min => "min",
            CfvoType::Formula => "formula",
            CfvoType::Percentile => "percentile",
            CfvoType::AutoMin => "autoMin",
            CfvoType::AutoMax => "autoMax",
        }
    }

    /// 属性値から種類を判定（未知の値は`None`）
    pub fn parse(value: &str) -> Option<Self> {
        Some(match value {
            "num" => CfvoType::Num,
            "percent" => CfvoType::Percent,
            "max" => CfvoType::Max,
            "min" => CfvoType::Min,
            "formula" => CfvoType::Formula,
            "percentile" => CfvoType::Percentile,
            "autoMin" => CfvoType::AutoMin,
            "autoMax" => CfvoType::AutoMax,
            _ => return None,
        })
    }
}

/// 条件付き書式の閾値
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cfvo {
    #[serde(rename = "type")]
    pub cfvo_type: CfvoType,
    /// 値（数値・数式）
    pub value: Option<String>,
    /// 閾値を含む（>=）かどうか。デフォルト: true
    pub gte: bool,
}

impl Cfvo {
    pub fn new(cfvo_type: CfvoType) -> Self {
        Self {
            cfvo_type,
            value: None,
            gte: true,
        }
    }

    pub fn with_value(cfvo_type: CfvoType, value: impl Into<String>) -> Self {
        Self {
            value: Some(value.into()),
            ..Self::new(cfvo_type)
        }
    }
}

/// 色
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Color {
    /// ARGB（例: `FF638EC6`）
    pub rgb: Option<String>,
    /// テーマカラーのインデックス
    pub theme: Option<u32>,
    /// 明度の調整（-1.0〜1.0）
    pub tint: Option<f64>,
    /// インデックスカラー
    pub indexed: Option<u32>,
    /// 自動色
    pub auto: Option<bool>,
}

impl Color {
    /// ARGB値から色を生成
    pub fn rgb(argb: impl Into<String>) -> Self {
        Self {
            rgb: Some(argb.into()),
            ..Self::default()
        }
    }

    /// すべての属性が未設定かどうか
    pub fn is_empty(&self) -> bool {
        self.rgb.is_none()
            && self.theme.is_none()
            && self.tint.is_none()
            && self.indexed.is_none()
            && self.auto.is_none()
    }
}

/// データバーの軸の位置
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum AxisPosition {
    #[default]
    Automatic,
    Middle,
    None,
}

impl AxisPosition {
    pub fn as_str(&self) -> &'static str {
        match self {
            AxisPosition::Automatic => "automatic",
            AxisPosition::Middle => "middle",
            AxisPosition::None => "none",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "automatic" => Some(AxisPosition::Automatic),
            "middle" => Some(AxisPosition::Middle),
            "none" => Some(AxisPosition::None),
            _ => None,
        }
    }
}

/// データバーの方向
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DataBarDirection {
    #[default]
    Context,
    LeftToRight,
    RightToLeft,
}

impl DataBarDirection {
    pub fn as_str(&self) -> &'static str {
        match self {
            DataBarDirection::Context => "context",
            DataBarDirection::LeftToRight => "leftToRight",
            DataBarDirection::RightToLeft => "rightToLeft",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "context" => Some(DataBarDirection::Context),
            "leftToRight" => Some(DataBarDirection::LeftToRight),
            "rightToLeft" => Some(DataBarDirection::RightToLeft),
            _ => None,
        }
    }
}

/// データバーの設定
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataBar {
    /// バーの最小長（%）。デフォルト: 0
    pub min_length: u32,
    /// バーの最大長（%）。デフォルト: 100
    pub max_length: u32,
    /// 枠線を表示するか。デフォルト: false
    pub border: bool,
    /// グラデーションで塗りつぶすか。デフォルト: true
    pub gradient: bool,
    /// 負の値のバーを正の値と同じ色にするか。デフォルト: true
    pub negative_bar_color_same_as_positive: bool,
    /// 負の値の枠線を正の値と同じ色にするか。デフォルト: true
    pub negative_bar_border_color_same_as_positive: bool,
    pub axis_position: AxisPosition,
    pub direction: DataBarDirection,
    /// 最小値・最大値の閾値
    pub cfvo: Vec<Cfvo>,
    pub fill_color: Option<Color>,
    pub border_color: Option<Color>,
    pub negative_fill_color: Option<Color>,
    pub negative_border_color: Option<Color>,
    pub axis_color: Option<Color>,
}

impl Default for DataBar {
    fn default() -> Self {
        Self {
            min_length: 0,
            max_length: 100,
            border: false,
            gradient: true,
            negative_bar_color_same_as_positive: true,
            negative_bar_border_color_same_as_positive: true,
            axis_position: AxisPosition::default(),
            direction: DataBarDirection::default(),
            cfvo: Vec::new(),
            fill_color: None,
            border_color: None,
            negative_fill_color: None,
            negative_border_color: None,
            axis_color: None,
        }
    }
}

/// アイコンセット名の既定値
pub const DEFAULT_ICON_SET: &str = "3TrafficLights1";

/// アイコンセットの設定
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IconSet {
    /// アイコンセット名（例: `3Arrows`、`3Triangles`）
    pub name: String,
    /// アイコンの順序を反転するか
    pub reverse: bool,
    /// セルの値を表示するか。デフォルト: true
    pub show_value: bool,
    /// アイコンを個別に指定するか
    pub custom: bool,
    /// 閾値
    pub cfvo: Vec<Cfvo>,
    /// 個別指定のアイコン（`custom`の場合）
    pub icons: Vec<CfIcon>,
}

impl Default for IconSet {
    fn default() -> Self {
        Self {
            name: DEFAULT_ICON_SET.to_string(),
            reverse: false,
            show_value: true,
            custom: false,
            cfvo: Vec::new(),
            icons: Vec::new(),
        }
    }
}

impl IconSet {
    /// 名前を指定してアイコンセットを生成
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Self::default()
        }
    }
}

/// 個別指定のアイコン
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CfIcon {
    /// アイコンの属するセット名
    pub icon_set: String,
    /// セット内のアイコン番号（0始まり）
    pub icon_id: u32,
}

/// 差分書式（dxf）
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Dxf {
    pub font: Option<DxfFont>,
    pub num_fmt: Option<NumFmt>,
    pub fill: Option<DxfFill>,
}

/// 差分書式のフォント
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DxfFont {
    pub bold: Option<bool>,
    pub italic: Option<bool>,
    pub strike: Option<bool>,
    /// 下線の種類（例: `single`、`double`）
    pub underline: Option<String>,
    pub color: Option<Color>,
}

/// 数値書式
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NumFmt {
    pub id: u32,
    pub format_code: String,
}

/// 差分書式の塗りつぶし
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DxfFill {
    /// パターンの種類（例: `solid`）
    pub pattern_type: Option<String>,
    pub fg_color: Option<Color>,
    pub bg_color: Option<Color>,
}

/// セル範囲に適用される条件付き書式
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConditionalFormatting {
    /// 適用範囲（例: `A1:A10 C1:C10`）
    pub sqref: String,
    pub rules: Vec<CfRule>,
}

impl ConditionalFormatting {
    pub fn new(sqref: impl Into<String>, rules: Vec<CfRule>) -> Self {
        Self {
            sqref: sqref.into(),
            rules,
        }
    }
}

/// 拡張形式のデータの入力規則
///
/// 他シートを参照するリストなど、従来形式で表現できない入力規則に使用されます。
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataValidation {
    /// 適用範囲
    pub sqref: String,
    /// 種類（例: `list`、`whole`、`custom`）
    #[serde(rename = "type")]
    pub validation_type: Option<String>,
    /// エラーの種類（例: `stop`、`warning`）
    pub error_style: Option<String>,
    /// 比較演算子（例: `between`）
    pub operator: Option<String>,
    pub allow_blank: bool,
    pub show_drop_down: bool,
    pub show_input_message: bool,
    pub show_error_message: bool,
    pub error_title: Option<String>,
    pub error: Option<String>,
    pub prompt_title: Option<String>,
    pub prompt: Option<String>,
    pub formula1: Option<String>,
    pub formula2: Option<String>,
}

/// ワークシートの拡張リスト全体のモデル
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExtLstModel {
    pub conditional_formattings: Vec<ConditionalFormatting>,
    pub data_validations: Vec<DataValidation>,
}

impl ExtLstModel {
    pub fn new() -> Self {
        Self::default()
    }
}
