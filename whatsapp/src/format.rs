//! Assistant text → WhatsApp markup.

use regex::Regex;
use std::sync::LazyLock;

/// `【...】` citation markers emitted by file search. Non-greedy, single line.
static CITATION: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"【.*?】").expect("citation pattern"));

/// Markdown bold `**x**`.
static DOUBLE_BOLD: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\*\*(.*?)\*\*").expect("bold pattern"));

/// Removes citation markers, then rewrites `**x**` as WhatsApp bold `*x*`.
///
/// Surrounding whitespace is preserved: `"**bold** text 【cite】"` becomes `"*bold* text "`.
pub fn process_text_for_whatsapp(text: &str) -> String {
    let without_citations = CITATION.replace_all(text, "");
    DOUBLE_BOLD
        .replace_all(&without_citations, "*$1*")
        .into_owned()
}
