//! Org Chart Domain Concerns

pub mod collaborators;
pub mod companies;
pub mod sites;

/// Treat blank optional text as absent.
pub(crate) fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}
