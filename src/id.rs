//! Identifier Generator Module
//!
//! 拡張ルールと従来ルールを結び付ける識別子を生成するモジュール。

use std::sync::atomic::{AtomicU64, Ordering};

use uuid::Uuid;

use crate::api::IdStrategy;

/// `IdStrategy::Sequential`用のプロセス共通カウンタ
static SEQUENCE: AtomicU64 = AtomicU64::new(0);

impl IdStrategy {
    /// 新しい識別子を生成する
    ///
    /// 戻り値は波括弧で囲まれた大文字の文字列です。
    pub(crate) fn next_id(&self) -> String {
        let uuid = match self {
            IdStrategy::RandomUuid => Uuid::new_v4(),
            IdStrategy::Sequential => {
                let n = SEQUENCE.fetch_add(1, Ordering::Relaxed) + 1;
                Uuid::from_u128(u128::from(n))
            }
        };
        format_token(&uuid)
    }
}

/// UUIDを`{XXXXXXXX-XXXX-XXXX-XXXX-XXXXXXXXXXXX}`形式に整形
fn format_token(uuid: &Uuid) -> String {
    format!("{{{}}}", uuid.hyphenated()).to_uppercase()
}
