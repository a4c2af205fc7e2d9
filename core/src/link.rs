//! Resolution of the resource links returned by create operations.
//!
//! Create endpoints answer with a link such as
//! `/papi/v1/cpcodes/123?contractId=ctr_1&groupId=grp_1` instead of a bare
//! identifier. The identifier is the last segment of the link's path.

use std::num::ParseIntError;

use url::Url;

/// Links are usually relative, so they are resolved against this base.
const LINK_BASE: &str = "https://papi.invalid/";

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LinkError {
    #[error("parse {link:?}: {reason}")]
    Malformed { link: String, reason: &'static str },

    #[error("parse {link:?}: {source}")]
    Url {
        link: String,
        #[source]
        source: url::ParseError,
    },

    #[error("no identifier in {link:?}")]
    MissingIdentifier { link: String },

    #[error("{id:?} is not a number")]
    NotANumber {
        id: String,
        #[source]
        source: ParseIntError,
    },
}

/// Return the trailing path segment of `link`.
pub fn parse_link(link: &str) -> Result<String, LinkError> {
    check_reference(link)?;

    let url = Url::parse(LINK_BASE)
        .and_then(|base| base.join(link))
        .map_err(|source| LinkError::Url {
            link: link.to_string(),
            source,
        })?;

    url.path_segments()
        .and_then(|mut segments| segments.next_back())
        .filter(|segment| !segment.is_empty())
        .map(str::to_string)
        .ok_or_else(|| LinkError::MissingIdentifier {
            link: link.to_string(),
        })
}

/// [`parse_link`] for resources whose identifier is an integer.
pub fn parse_numeric_link(link: &str) -> Result<i64, LinkError> {
    let id = parse_link(link)?;
    id.parse()
        .map_err(|source| LinkError::NotANumber { id, source })
}

/// Reject references whose first segment holds a colon but no usable
/// scheme. The WHATWG parser treats these as relative paths, but they are
/// not valid URI references.
fn check_reference(link: &str) -> Result<(), LinkError> {
    let head = link.split(['/', '?', '#']).next().unwrap_or_default();
    let Some(colon) = head.find(':') else {
        return Ok(());
    };
    let scheme = &head[..colon];
    let malformed = |reason| LinkError::Malformed {
        link: link.to_string(),
        reason,
    };
    if scheme.is_empty() {
        return Err(malformed("missing protocol scheme"));
    }
    let mut chars = scheme.chars();
    let valid = chars.next().is_some_and(|c| c.is_ascii_alphabetic())
        && chars.all(|c| c.is_ascii_alphanumeric() || matches!(c, '+' | '-' | '.'));
    if !valid {
        return Err(malformed("first path segment in URL cannot contain colon"));
    }
    Ok(())
}
