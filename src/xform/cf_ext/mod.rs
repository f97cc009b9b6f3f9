//! Conditional Formatting Extension Module
//!
//! 条件付き書式の拡張形式（x14）を扱うxform群。
//!
//! - `cf_rule`: 拡張ルール本体と、拡張形式が必要かどうかの判定
//! - `conditional_formattings`: 範囲ごとのルールをまとめた拡張ブロック
//! - `rule_link`: 従来形式のルールから拡張ルールへの参照
//! - その他: ルールの子要素（データバー、アイコンセット、書式など）

mod cf_rule;
mod cfvo;
mod color;
mod conditional_formattings;
mod data_bar;
mod dxf;
mod formula;
mod icon_set;
mod rule_link;

pub(crate) use cf_rule::CfRuleExtXform;
pub(crate) use conditional_formattings::ConditionalFormattingsExtXform;
pub(crate) use formula::FormulaXform;
pub(crate) use rule_link::RuleLinkXform;
