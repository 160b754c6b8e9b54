use std::{env, fmt};

use tracing::debug;

// POSIX precedence for the numeric category.
const LOCALE_VARS: [&str; 3] = ["LC_ALL", "LC_NUMERIC", "LANG"];

// Languages whose default decimal separator is a comma.
const COMMA_LANGUAGES: &[&str] = &[
    "az", "be", "bg", "ca", "cs", "da", "de", "el", "es", "et", "eu", "fi", "fo", "fr", "gl",
    "hr", "hu", "id", "is", "it", "ka", "kk", "lt", "lv", "mk", "nb", "nl", "nn", "no", "pl",
    "pt", "ro", "ru", "sk", "sl", "sq", "sr", "sv", "tr", "uk", "uz", "vi",
];

// Regions that use a dot although their language usually takes a comma.
const DOT_REGIONS: &[(&str, &str)] = &[
    ("de", "CH"),
    ("de", "LI"),
    ("it", "CH"),
    ("es", "MX"),
    ("es", "US"),
    ("es", "PR"),
];

/// Decimal and digit-group separators of the host locale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NumberFormat {
    pub decimal_separator: char,
    pub group_separator: Option<char>,
}

impl Default for NumberFormat {
    fn default() -> Self {
        Self::invariant()
    }
}

impl NumberFormat {
    pub const fn invariant() -> Self {
        Self {
            decimal_separator: '.',
            group_separator: None,
        }
    }

    /// Format of the locale named by `LC_ALL`, `LC_NUMERIC` or `LANG`,
    /// whichever is set first; invariant when none names a known locale.
    pub fn from_env() -> Self {
        Self::from_env_with(|name| env::var(name).ok())
    }

    pub(crate) fn from_env_with(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let locale = LOCALE_VARS
            .iter()
            .find_map(|name| lookup(*name).filter(|value| !value.is_empty()));
        match locale {
            Some(locale) => {
                let format = Self::from_locale_name(&locale);
                debug!(%locale, separator = %format.decimal_separator, "host locale");
                format
            }
            None => Self::invariant(),
        }
    }

    /// Decimal separator for a POSIX locale name such as `de_DE.UTF-8` or a
    /// tag such as `pt-BR`. Unknown names, `C` and `POSIX` are invariant.
    pub fn from_locale_name(name: &str) -> Self {
        let base = name.split(['.', '@']).next().unwrap_or_default();
        let mut parts = base.split(['_', '-']);
        let language = parts.next().unwrap_or_default().to_ascii_lowercase();
        let region = parts.next().unwrap_or_default().to_ascii_uppercase();

        let dot_region = DOT_REGIONS
            .iter()
            .any(|(lang, reg)| *lang == language && *reg == region);
        if COMMA_LANGUAGES.contains(&language.as_str()) && !dot_region {
            Self::invariant().with_decimal_separator(',')
        } else {
            Self::invariant()
        }
    }

    pub fn with_decimal_separator(mut self, separator: char) -> Self {
        self.decimal_separator = separator;
        self
    }

    pub fn with_group_separator(mut self, separator: Option<char>) -> Self {
        self.group_separator = separator;
        self
    }

    /// Parse `text` as a finite number written in this format.
    pub fn parse(&self, text: &str) -> Result<f64, ParseNumberError> {
        let fail = || ParseNumberError {
            input: text.to_string(),
            separator: self.decimal_separator,
        };

        let trimmed = text.trim();
        if trimmed.is_empty() {
            return Err(fail());
        }

        let mut canonical = String::with_capacity(trimmed.len());
        for ch in trimmed.chars() {
            if Some(ch) == self.group_separator {
                continue;
            }
            if ch == self.decimal_separator {
                canonical.push('.');
            } else if ch == '.' {
                return Err(fail());
            } else {
                canonical.push(ch);
            }
        }

        match canonical.parse::<f64>() {
            Ok(value) if value.is_finite() => Ok(value),
            _ => Err(fail()),
        }
    }

    /// Render `value` so that [`NumberFormat::parse`] reads it back unchanged.
    pub fn format(&self, value: f64) -> String {
        // -0 renders as "-0"; fold it into plain zero.
        let value = if value == 0.0 { 0.0 } else { value };
        let rendered = value.to_string();
        if self.decimal_separator == '.' {
            rendered
        } else {
            rendered.replace('.', &self.decimal_separator.to_string())
        }
    }
}

/// Text that does not read as a number under the active [`NumberFormat`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseNumberError {
    pub input: String,
    pub separator: char,
}

impl fmt::Display for ParseNumberError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "'{}' is not a number (decimal separator is \"{}\")",
            self.input, self.separator
        )
    }
}

impl std::error::Error for ParseNumberError {}
