use crate::core::CompressionOptions;
use crate::utils::{CompressorResult, CompressorError, format_from_mime};

/// Validates a resolved options record before it reaches the engine.
pub fn validate_options(options: &CompressionOptions) -> CompressorResult<()> {
    if !(options.max_size_mb > 0.0) {
        return Err(CompressorError::validation(format!(
            "Invalid maxSizeMB value: {}. Must be greater than 0",
            options.max_size_mb
        )));
    }

    if options.max_width_or_height == 0 {
        return Err(CompressorError::validation(
            "maxWidthOrHeight cannot be 0",
        ));
    }

    // This will validate the output MIME type
    format_from_mime(&options.file_type)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_defaults() {
        assert!(validate_options(&CompressionOptions::default()).is_ok());
    }

    #[test]
    fn rejects_zero_bounds() {
        let mut options = CompressionOptions::default();
        options.max_size_mb = 0.0;
        assert!(validate_options(&options).is_err());

        let mut options = CompressionOptions::default();
        options.max_width_or_height = 0;
        assert!(validate_options(&options).is_err());
    }

    #[test]
    fn rejects_unknown_file_type() {
        let mut options = CompressionOptions::default();
        options.file_type = "video/mp4".to_string();
        assert!(validate_options(&options).is_err());
    }
}
