// Fixed-width text helpers for the console report
//
// Widths count characters, not bytes, so box-drawing and status symbols
// occupy one column each. Overflow is cut hard at the width, no ellipsis.

/// Pad with spaces on the right to `width`, or cut to exactly `width`
pub fn pad_right(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        value.chars().take(width).collect()
    } else {
        let mut out = String::with_capacity(value.len() + (width - len));
        out.push_str(value);
        out.extend(std::iter::repeat_n(' ', width - len));
        out
    }
}

/// Centre within `width`; extra padding goes to the right
pub fn center(value: &str, width: usize) -> String {
    let len = value.chars().count();
    if len >= width {
        return value.chars().take(width).collect();
    }
    let total = width - len;
    let left = total / 2;
    format!("{}{}{}", " ".repeat(left), value, " ".repeat(total - left))
}

/// `850ms` below one second, `1.25s` from one second up
pub fn format_duration(ms: u64) -> String {
    if ms < 1000 {
        format!("{}ms", ms)
    } else {
        format!("{:.2}s", ms as f64 / 1000.0)
    }
}

pub fn format_percent(rate: f64) -> String {
    format!("{:.2}%", rate)
}

pub fn rule(ch: char, width: usize) -> String {
    std::iter::repeat_n(ch, width).collect()
}
