//! Free-text sanitization for provider fields with restricted charsets.
//!
//! Hosted-checkout providers reject or mangle order descriptions containing
//! accented characters and most punctuation. Sanitization folds Vietnamese
//! diacritics to ASCII, drops everything outside `[A-Za-z0-9 ]`, collapses
//! whitespace runs, and truncates to the provider's maximum length.

/// Sanitize `input` for a provider free-text field of at most `max_len`
/// bytes.
///
/// `"Gói VIP – 1 tháng!"` becomes `"Goi VIP 1 thang"`.
pub fn sanitize_text(input: &str, max_len: usize) -> String {
    let mut out = String::with_capacity(input.len().min(max_len));
    let mut pending_space = false;

    for c in input.chars() {
        let folded = fold_diacritic(c);
        if folded.is_ascii_alphanumeric() {
            if pending_space && !out.is_empty() {
                out.push(' ');
            }
            out.push(folded);
            pending_space = false;
        } else if folded.is_whitespace() {
            pending_space = true;
        }
        // Everything else (punctuation, symbols, non-Latin) is dropped.
    }

    // Output is pure ASCII, so byte truncation cannot split a character.
    out.truncate(max_len);
    if out.ends_with(' ') {
        out.pop();
    }
    out
}

/// Fold a Vietnamese accented character to its base ASCII letter.
///
/// Characters outside the Vietnamese alphabet pass through unchanged.
fn fold_diacritic(c: char) -> char {
    match c {
        'à' | 'á' | 'ả' | 'ã' | 'ạ' | 'ă' | 'ằ' | 'ắ' | 'ẳ' | 'ẵ' | 'ặ' | 'â' | 'ầ' | 'ấ'
        | 'ẩ' | 'ẫ' | 'ậ' => 'a',
        'À' | 'Á' | 'Ả' | 'Ã' | 'Ạ' | 'Ă' | 'Ằ' | 'Ắ' | 'Ẳ' | 'Ẵ' | 'Ặ' | 'Â' | 'Ầ' | 'Ấ'
        | 'Ẩ' | 'Ẫ' | 'Ậ' => 'A',
        'è' | 'é' | 'ẻ' | 'ẽ' | 'ẹ' | 'ê' | 'ề' | 'ế' | 'ể' | 'ễ' | 'ệ' => 'e',
        'È' | 'É' | 'Ẻ' | 'Ẽ' | 'Ẹ' | 'Ê' | 'Ề' | 'Ế' | 'Ể' | 'Ễ' | 'Ệ' => 'E',
        'ì' | 'í' | 'ỉ' | 'ĩ' | 'ị' => 'i',
        'Ì' | 'Í' | 'Ỉ' | 'Ĩ' | 'Ị' => 'I',
        'ò' | 'ó' | 'ỏ' | 'õ' | 'ọ' | 'ô' | 'ồ' | 'ố' | 'ổ' | 'ỗ' | 'ộ' | 'ơ' | 'ờ' | 'ớ'
        | 'ở' | 'ỡ' | 'ợ' => 'o',
        'Ò' | 'Ó' | 'Ỏ' | 'Õ' | 'Ọ' | 'Ô' | 'Ồ' | 'Ố' | 'Ổ' | 'Ỗ' | 'Ộ' | 'Ơ' | 'Ờ' | 'Ớ'
        | 'Ở' | 'Ỡ' | 'Ợ' => 'O',
        'ù' | 'ú' | 'ủ' | 'ũ' | 'ụ' | 'ư' | 'ừ' | 'ứ' | 'ử' | 'ữ' | 'ự' => 'u',
        'Ù' | 'Ú' | 'Ủ' | 'Ũ' | 'Ụ' | 'Ư' | 'Ừ' | 'Ứ' | 'Ử' | 'Ữ' | 'Ự' => 'U',
        'ỳ' | 'ý' | 'ỷ' | 'ỹ' | 'ỵ' => 'y',
        'Ỳ' | 'Ý' | 'Ỷ' | 'Ỹ' | 'Ỵ' => 'Y',
        'đ' => 'd',
        'Đ' => 'D',
        other => other,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn folds_diacritics_and_strips_punctuation() {
        assert_eq!(sanitize_text("Gói VIP – 1 tháng!", 255), "Goi VIP 1 thang");
    }

    #[test]
    fn folds_uppercase_and_d_bar() {
        assert_eq!(
            sanitize_text("Đơn hàng THÁNG MƯỜI", 255),
            "Don hang THANG MUOI"
        );
    }

    #[test]
    fn collapses_whitespace_runs() {
        assert_eq!(sanitize_text("a   b \t c", 255), "a b c");
    }

    #[test]
    fn trims_leading_and_trailing_separators() {
        assert_eq!(sanitize_text("  -- Goi VIP --  ", 255), "Goi VIP");
    }

    #[test]
    fn truncates_to_max_len() {
        let long = "a".repeat(300);
        assert_eq!(sanitize_text(&long, 255).len(), 255);
    }

    #[test]
    fn truncation_does_not_leave_trailing_space() {
        // 'ab' + space + more; cut lands right after the space.
        assert_eq!(sanitize_text("ab cd", 3), "ab");
    }

    #[test]
    fn non_latin_characters_are_dropped() {
        assert_eq!(sanitize_text("Nạp 金 100k", 255), "Nap 100k");
    }

    #[test]
    fn empty_input_stays_empty() {
        assert_eq!(sanitize_text("", 255), "");
        assert_eq!(sanitize_text("!!!", 255), "");
    }
}
