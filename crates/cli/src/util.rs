use unicode_width::UnicodeWidthStr;

/// Display width of a string, accounting for CJK double-width, emoji, etc.
pub(crate) fn display_width(s: &str) -> usize {
    UnicodeWidthStr::width(s)
}

/// Truncate a string to fit within `width` display columns, adding ".." if truncated.
pub(crate) fn truncate_display(s: &str, width: usize) -> String {
    if display_width(s) <= width {
        return s.to_string();
    }
    if width < 3 {
        return s
            .chars()
            .scan(0usize, |used, ch| {
                *used += unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
                (*used <= width).then_some(ch)
            })
            .collect();
    }

    let budget = width - 2;
    let mut used = 0;
    let mut out = String::new();
    for ch in s.chars() {
        let cw = unicode_width::UnicodeWidthChar::width(ch).unwrap_or(0);
        if used + cw > budget {
            break;
        }
        used += cw;
        out.push(ch);
    }
    out.push_str("..");
    out
}

/// Left and right text on one row of `width` columns, right side winning
/// when they collide.
pub(crate) fn spread(left: &str, right: &str, width: usize) -> String {
    let right_w = display_width(right);
    if right_w >= width {
        return truncate_display(right, width);
    }
    let left = truncate_display(left, width - right_w);
    let pad = width - right_w - display_width(&left);
    format!("{}{}{}", left, " ".repeat(pad), right)
}

/// Digits needed to print `n` (at least one).
pub(crate) fn digit_count(n: usize) -> usize {
    let mut digits = 1;
    let mut n = n / 10;
    while n > 0 {
        digits += 1;
        n /= 10;
    }
    digits
}
