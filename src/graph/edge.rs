use std::str::FromStr;

use crate::error::Error;

/// How the catalog resolved a dependency between two objects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResolutionKind {
    /// Resolved by stable object identifier.
    ById,
    /// Resolved by name lookup.
    ByName,
    /// Resolved by both name and identifier.
    ByNameAndId,
}

impl ResolutionKind {
    /// Every kind, in the order edge lists are emitted.
    pub const ALL: [ResolutionKind; 3] = [
        ResolutionKind::ById,
        ResolutionKind::ByName,
        ResolutionKind::ByNameAndId,
    ];

    /// DOT line style communicating resolution confidence: dotted for id-only,
    /// dashed for name-only, solid when both agreed.
    pub fn dot_style(self) -> &'static str {
        match self {
            ResolutionKind::ById => "dotted",
            ResolutionKind::ByName => "dashed",
            ResolutionKind::ByNameAndId => "solid",
        }
    }
}

impl FromStr for ResolutionKind {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Error> {
        match s {
            "BY_ID" => Ok(ResolutionKind::ById),
            "BY_NAME" => Ok(ResolutionKind::ByName),
            "BY_NAME_AND_ID" => Ok(ResolutionKind::ByNameAndId),
            other => Err(Error::MalformedRow(format!(
                "unknown dependency type '{other}'"
            ))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_catalog_strings() {
        assert_eq!(
            "BY_ID".parse::<ResolutionKind>().unwrap(),
            ResolutionKind::ById
        );
        assert_eq!(
            "BY_NAME".parse::<ResolutionKind>().unwrap(),
            ResolutionKind::ByName
        );
        assert_eq!(
            "BY_NAME_AND_ID".parse::<ResolutionKind>().unwrap(),
            ResolutionKind::ByNameAndId
        );
        assert!("by_id".parse::<ResolutionKind>().is_err());
    }

    #[test]
    fn test_styles_are_distinct() {
        let styles: Vec<_> = ResolutionKind::ALL.iter().map(|k| k.dot_style()).collect();
        assert_eq!(styles, vec!["dotted", "dashed", "solid"]);
    }
}
