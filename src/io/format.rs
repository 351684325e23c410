use std::{fmt, str::FromStr};

/// Serialization formats a submission payload can be exported as.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DocumentFormat {
    #[default]
    Json,
    #[cfg(feature = "yaml")]
    Yaml,
    #[cfg(feature = "toml")]
    Toml,
}

impl DocumentFormat {
    /// Formats compiled into this build.
    pub fn available_formats() -> Vec<DocumentFormat> {
        #[allow(unused_mut)]
        let mut formats = vec![DocumentFormat::Json];
        #[cfg(feature = "yaml")]
        formats.push(DocumentFormat::Yaml);
        #[cfg(feature = "toml")]
        formats.push(DocumentFormat::Toml);
        formats
    }
}

impl fmt::Display for DocumentFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DocumentFormat::Json => write!(f, "json"),
            #[cfg(feature = "yaml")]
            DocumentFormat::Yaml => write!(f, "yaml"),
            #[cfg(feature = "toml")]
            DocumentFormat::Toml => write!(f, "toml"),
        }
    }
}

impl FromStr for DocumentFormat {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        let normalized = if normalized == "yml" {
            "yaml".to_string()
        } else {
            normalized
        };
        DocumentFormat::available_formats()
            .into_iter()
            .find(|format| format.to_string() == normalized)
            .ok_or_else(|| {
                let names = DocumentFormat::available_formats()
                    .iter()
                    .map(ToString::to_string)
                    .collect::<Vec<_>>()
                    .join(", ");
                format!("unsupported format '{raw}' (this build supports {names})")
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn json_is_always_available() {
        assert_eq!("JSON".parse::<DocumentFormat>(), Ok(DocumentFormat::Json));
        assert_eq!(DocumentFormat::default(), DocumentFormat::Json);
    }

    #[test]
    fn unknown_formats_list_alternatives() {
        let err = "xml".parse::<DocumentFormat>().unwrap_err();
        assert!(err.contains("json"), "{err}");
    }

    #[cfg(feature = "yaml")]
    #[test]
    fn yml_alias_maps_to_yaml() {
        assert_eq!("yml".parse::<DocumentFormat>(), Ok(DocumentFormat::Yaml));
    }
}
