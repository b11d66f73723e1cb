//! User-facing speech and card text. The external services cover Japanese
//! libraries, so the skill speaks Japanese.

use crate::domain::model::{LoanableBranch, SearchReport};

pub const LAUNCH: &str =
    "あなたが読みたい本が、近くの図書館で借りられるかを調べます。借りたい本のタイトルを教えてください。";

pub const HELP: &str = "あなたが読みたい本が、近くの図書館で借りられるか調べます。\
スキルの利用には住所情報の設定が必要です。\
図書館の検索には最大で1分ほどかかる場合があります。借りたい本のタイトルを教えてください。";

pub const GOODBYE: &str = "また、使ってくださいね！";

pub const PERMISSION_REQUIRED: &str =
    "住所情報の利用が許可されていません。アレクサアプリに表示されたカードから利用を許可してください。";

pub const ADDRESS_INCOMPLETE: &str =
    "住所情報に郵便番号が設定されていません。アレクサアプリから郵便番号を設定してください。";

pub const ADDRESS_FETCH_FAILED: &str =
    "住所情報の取得に失敗しました。アレクサアプリから設定を確認してください。";

pub const ASK_TITLE: &str = "本のタイトルを教えてください。";

pub const AREA_UNSUPPORTED: &str = "すみません、設定されている住所には対応していません。";

pub const GENERIC_TROUBLE: &str =
    "すみません、検索中に問題が発生しました。しばらくしてからもう一度お試しください。";

pub fn not_found(title: &str) -> String {
    format!("{}、に当てはまる本は見つかりませんでした。", title)
}

pub fn no_availability(title: &str) -> String {
    format!("{}、が借りられる近くの図書館は見つかりませんでした。", title)
}

/// Branch names are read out in the order the directory returned them.
pub fn available(report: &SearchReport) -> String {
    let mut speech = format!("{}、が借りられる近くの図書館は、", report.title);
    for branch in &report.loanable {
        speech.push_str(&branch.formal_name);
        speech.push('、');
    }
    speech.push_str("です。詳しい情報はアレクサアプリに表示されたURLを確認してください。");
    speech
}

pub fn card_title(title: &str) -> String {
    format!("{}　が借りられる図書館", title)
}

pub fn card_body(branches: &[LoanableBranch]) -> String {
    branches
        .iter()
        .map(|branch| format!("{}:{}\n\n", branch.formal_name, branch.reserve_url))
        .collect()
}
