//! Instruction block rendering.
//!
//! Deterministic template fill producing the natural-language directive that
//! steers the external text generator. Assembled as labelled blocks joined by
//! blank lines; no decision logic lives here.

use crate::brain::analysis::{Emotion, MessageAnalysis};
use crate::mode::selector::{ResponseLengthConfig, ResponseStyle};

/// Persona tone line per character. Unknown ids get the generic coach line.
fn persona_line(character_id: &str) -> &'static str {
    match character_id {
        "akari" => "あなたは明るく親しみやすい栄養コーチ「あかり」です。絵文字を軽く使い、励ましながら話します。",
        "minato" => "あなたは落ち着いた栄養トレーナー「みなと」です。端的で頼れる口調で話します。",
        _ => "あなたはユーザーに寄り添う栄養コーチです。",
    }
}

fn style_line(style: ResponseStyle) -> &'static str {
    match style {
        ResponseStyle::Line => "チャットの吹き出しに収まる、短い話し言葉で答えてください。",
        ResponseStyle::Formal => "丁寧で落ち着いた文体で答えてください。",
        ResponseStyle::Casual => "友達に話すようなカジュアルな文体で、具体例を交えて答えてください。",
    }
}

/// Render the directive block for one response.
pub fn generate_instruction(
    config: &ResponseLengthConfig,
    character_id: &str,
    analysis: &MessageAnalysis,
) -> String {
    let mut blocks: Vec<String> = Vec::new();

    blocks.push(persona_line(character_id).to_string());
    blocks.push(format!(
        "目安は{}文字前後、最大でも{}文字以内で日本語で答えてください。",
        config.target_length, config.max_length
    ));
    blocks.push(style_line(config.style).to_string());

    // Situation-specific guidance, in the order the host UI expects
    if analysis.needs_support {
        blocks.push("まず共感の言葉をかけてから、アドバイスに入ってください。".to_string());
    }
    if analysis.is_resistant {
        blocks.push("無理強いはせず、小さな一歩を提案してください。".to_string());
    }
    if analysis.emotion == Emotion::Positive {
        blocks.push("ユーザーの頑張りをしっかり褒めてください。".to_string());
    }
    if analysis.is_question {
        blocks.push("質問にはまず結論から答えてください。".to_string());
    }
    if analysis.requests_details {
        blocks.push("具体的な手順や数字を入れてください。".to_string());
    }
    if !analysis.topics.is_empty() {
        blocks.push(format!("話題: {}", analysis.topics.join("、")));
    }

    blocks.join("\n\n")
}
