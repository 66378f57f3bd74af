//! Text processing, extraction and scoring

pub mod analyzer;
pub mod document;
pub mod docx;
pub mod entities;
pub mod jd_parser;
pub mod matcher;
pub mod pdf;
pub mod resume_scorer;
pub mod skills;
pub mod text_processor;

/// Round half away from zero to `places` decimals.
pub(crate) fn round_to(value: f64, places: i32) -> f64 {
    let factor = 10f64.powi(places);
    (value * factor).round() / factor
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_round_to() {
        assert_eq!(round_to(72.345, 1), 72.3);
        assert_eq!(round_to(0.666, 2), 0.67);
        assert_eq!(round_to(65.0, 1), 65.0);
    }
}
