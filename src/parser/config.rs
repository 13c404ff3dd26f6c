use super::ParserError;

/// Limits applied to a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Largest accepted input, in bytes.
    pub text_size_limit: usize,
    /// How deeply lists, objects and list types may nest.
    pub depth_limit: usize,
}

impl Default for ParserConfig {
    fn default() -> Self {
        ParserConfig {
            text_size_limit: 4 * 1024 * 1024,
            depth_limit: 64,
        }
    }
}

impl ParserConfig {
    pub fn with_text_size_limit(mut self, limit: usize) -> Self {
        self.text_size_limit = limit;
        self
    }

    pub fn with_depth_limit(mut self, limit: usize) -> Self {
        self.depth_limit = limit;
        self
    }

    pub(crate) fn check_text_size(&self, text: &str) -> Result<(), ParserError> {
        if text.len() > self.text_size_limit {
            return Err(ParserError::TextSizeLimitExceeded {
                limit: self.text_size_limit,
                text_size: text.len(),
            });
        }
        Ok(())
    }
}
