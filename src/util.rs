// Slightly adjusted macro from https://docs.rs/once_cell/latest/once_cell/#lazily-compiled-regex:
#[macro_export]
macro_rules! once_cell_regex {
    ($re:expr $(,)?) => {{
        static RE: std::sync::OnceLock<regex_lite::Regex> = std::sync::OnceLock::new();
        RE.get_or_init(|| regex_lite::Regex::new($re).unwrap())
    }};
}

// Returns `part / whole * 100`, or zero when there is nothing to divide by.
pub fn percentage(part: u32, whole: u32) -> f64 {
    if whole == 0 { 0.0 } else { part as f64 / whole as f64 * 100.0 }
}

// Three-dart average: points per dart scaled to a full visit.
pub fn three_dart_average(points: u32, darts: usize) -> f64 {
    if darts == 0 { 0.0 } else { points as f64 / darts as f64 * 3.0 }
}
