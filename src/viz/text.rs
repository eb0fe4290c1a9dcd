//! Label measurement and truncation.

/// Heuristic: estimate pixel width of text (no font metrics at layout time).
pub fn estimate_text_width_px(text: &str, font_px: u32) -> u32 {
    ((text.chars().count() as f32) * (font_px as f32) * 0.60).ceil() as u32
}

/// Truncate to fit `max_px` and add a single ellipsis if needed.
pub fn truncate_to_width(text: &str, font_px: u32, max_px: u32) -> String {
    if estimate_text_width_px(text, font_px) <= max_px {
        return text.to_string();
    }
    let mut out = String::new();
    for ch in text.chars() {
        out.push(ch);
        if estimate_text_width_px(&out, font_px) + estimate_text_width_px("…", font_px) > max_px {
            out.pop();
            break;
        }
    }
    out.push('…');
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_labels_are_untouched() {
        assert_eq!(truncate_to_width("Ohio", 11, 80), "Ohio");
    }

    #[test]
    fn long_labels_end_with_ellipsis_and_fit() {
        let t = truncate_to_width("District of Columbia", 11, 60);
        assert!(t.ends_with('…'));
        assert!(estimate_text_width_px(&t, 11) <= 60);
    }
}
