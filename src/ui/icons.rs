//! Status vocabulary for summaries.

use super::theme::XShotTheme;

/// Canonical status kinds used in summaries.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum StatusKind {
    /// Completed.
    Success,
    /// Completed with an advisory.
    Warning,
    /// Skipped by flag, config or because there was nothing to do.
    Skipped,
    /// Failed fatally.
    Failed,
}

impl StatusKind {
    /// Unicode icon for TTY output.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Success => "✓",
            Self::Warning => "⚠",
            Self::Skipped => "○",
            Self::Failed => "✗",
        }
    }

    /// Bracketed text for non-TTY output.
    pub fn bracketed(self) -> &'static str {
        match self {
            Self::Success => "[ok]",
            Self::Warning => "[warn]",
            Self::Skipped => "[skip]",
            Self::Failed => "[FAIL]",
        }
    }

    /// Styled icon string using the given theme.
    pub fn styled(self, theme: &XShotTheme) -> String {
        let icon = self.icon();
        match self {
            Self::Success => theme.success.apply_to(icon).to_string(),
            Self::Warning => theme.warning.apply_to(icon).to_string(),
            Self::Skipped => theme.dim.apply_to(icon).to_string(),
            Self::Failed => theme.error.apply_to(icon).to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn icons_are_distinct() {
        let all = [
            StatusKind::Success,
            StatusKind::Warning,
            StatusKind::Skipped,
            StatusKind::Failed,
        ];
        for (i, a) in all.iter().enumerate() {
            for b in &all[i + 1..] {
                assert_ne!(a.icon(), b.icon());
                assert_ne!(a.bracketed(), b.bracketed());
            }
        }
    }

    #[test]
    fn plain_theme_styles_to_bare_icon() {
        let theme = XShotTheme::plain();
        assert_eq!(StatusKind::Success.styled(&theme), "✓");
        assert_eq!(StatusKind::Failed.styled(&theme), "✗");
    }
}
