use crate::canvas::{PixImage, WHITE};

// ============================================================================
// NEW IMAGE FORM
// ============================================================================

/// Model behind the "New" dialog: two free-text fields the shell renders as
/// entries, validated here with a digits-only pattern before anything is
/// allocated. Confirming a valid form yields a blank white canvas.
#[derive(Clone, Debug, Default)]
pub struct NewImageForm {
    pub width: String,
    pub height: String,
}

/// Which form field failed validation, with a user-presentable message.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum FormError {
    Width(&'static str),
    Height(&'static str),
}

impl std::fmt::Display for FormError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FormError::Width(msg) => write!(f, "Width {}", msg),
            FormError::Height(msg) => write!(f, "Height {}", msg),
        }
    }
}

impl NewImageForm {
    pub fn new() -> Self {
        Self::default()
    }

    /// Validate both fields and return the parsed dimensions.
    /// Width is reported first when both fields are bad, matching the
    /// top-to-bottom order the form is displayed in.
    pub fn validate(&self) -> Result<(u32, u32), FormError> {
        let width = parse_dimension(&self.width).map_err(FormError::Width)?;
        let height = parse_dimension(&self.height).map_err(FormError::Height)?;
        Ok((width, height))
    }

    /// Confirm the form: validation followed by canvas creation.
    pub fn create(&self) -> Result<PixImage, FormError> {
        let (width, height) = self.validate()?;
        Ok(PixImage::blank(width, height, WHITE))
    }
}

/// Digits-only positive integer, the same acceptance rule as the original
/// dialog's `\d+` entry validators plus a zero / overflow rejection.
fn parse_dimension(text: &str) -> Result<u32, &'static str> {
    if text.is_empty() {
        return Err("must not be empty");
    }
    if !text.chars().all(|c| c.is_ascii_digit()) {
        return Err("must be a number");
    }
    match text.parse::<u32>() {
        Ok(0) => Err("must be at least 1"),
        Ok(n) => Ok(n),
        Err(_) => Err("is too large"),
    }
}
