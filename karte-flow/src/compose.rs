use crate::{shop::Shop, treatment::GeneratedContent};

/// Greeting that opens every message
const GREETING: &str =
    "本日はご来店ありがとうございました！今日の施術カルテをまとめましたので次回の参考にどうぞ！";

/// Build the shareable message for one visit.
///
/// Four parts joined by blank lines: greeting, itemized treatment summary,
/// review-request line with the shop's URL, then the proposal text. Line
/// labels and ordering are fixed; customers copy this text as-is.
pub fn compose_message(shop: &Shop, content: &GeneratedContent) -> String {
    let info = &content.treatment_info;
    let summary = format!(
        "・利用したサービス：{}\n・リクエストしたスタイル：{}\n・特殊技術：{}\n・髪のタイプ：{}\n・担当スタイリスト：{}",
        info.services_display(),
        info.style,
        info.tech,
        info.hair_type,
        info.stylist
    );
    let review = format!(
        "こちらのURLから口コミも書いていただけると嬉しいです！（{}）",
        shop.url
    );
    format!(
        "{}\n\n{}\n\n{}\n\n{}",
        GREETING, summary, review, content.ai_proposal
    )
}
