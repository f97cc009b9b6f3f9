//! Public API Types
//!
//! 公開APIで使用する設定用の列挙型を定義するモジュール。

/// 拡張識別子の生成方式
///
/// 拡張対象のルールに割り当てる識別子（`{XXXXXXXX-XXXX-...}`形式）の
/// 生成方法を指定します。いずれの方式でも、同一プロセス内で同じ値が
/// 二度生成されることはありません。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum IdStrategy {
    /// ランダムなUUID（v4）を使用（デフォルト）
    ///
    /// 例: `{3F2504E0-4F89-41D3-9A0C-0305E82C3301}`
    #[default]
    RandomUuid,

    /// プロセス全体で共有するカウンタから連番で生成
    ///
    /// UUIDと同じ形状の文字列を返します。生成順が決定的になるため、
    /// 出力の差分比較やテストで有用です。
    ///
    /// 例: `{00000000-0000-0000-0000-000000000001}`
    Sequential,
}

/// XML出力のスタイル
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[non_exhaustive]
pub enum OutputStyle {
    /// 改行・インデントなしで出力（デフォルト）
    ///
    /// ワークシートXMLに直接埋め込む用途に適しています。
    #[default]
    Compact,

    /// 要素ごとに改行し、指定幅の空白でインデントして出力
    ///
    /// `width`は1〜8の範囲で指定します。
    Indented {
        /// インデント幅（空白の数）
        width: usize,
    },
}
