use thiserror::Error;
use threedi::engine::config::PartnerStrategy;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ParseError {
    #[error("Unknown partner strategy '{0}'. Expected 'kd-tree' or 'brute-force'.")]
    UnknownPartnerStrategy(String),

    #[error(
        "Invalid codebook name '{0}'. Expected letters, digits, '-', '_' or '.' (e.g., '3di')."
    )]
    InvalidCodebookName(String),

    #[error("Component '{component}' cannot be empty in logical name '{name}'.")]
    EmptyComponent {
        component: &'static str,
        name: String,
    },
}

/// A codebook referred to by name rather than by path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodebookName {
    pub name: String,
}

pub fn parse_partner_strategy(value: &str) -> Result<PartnerStrategy, ParseError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "kd-tree" | "kdtree" => Ok(PartnerStrategy::KdTree),
        "brute-force" | "bruteforce" => Ok(PartnerStrategy::BruteForce),
        _ => Err(ParseError::UnknownPartnerStrategy(value.to_string())),
    }
}

pub fn parse_codebook_name(value: &str) -> Result<CodebookName, ParseError> {
    let name = value.trim();
    if name.is_empty() {
        return Err(ParseError::EmptyComponent {
            component: "name",
            name: value.to_string(),
        });
    }
    if name == "."
        || name == ".."
        || !name
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.'))
    {
        return Err(ParseError::InvalidCodebookName(value.to_string()));
    }
    Ok(CodebookName {
        name: name.to_string(),
    })
}

/// Whether a user value should be treated as a filesystem path rather than a
/// logical name.
pub fn looks_like_path(value: &str) -> bool {
    value.contains(['/', '\\']) || value.ends_with(".toml")
}
