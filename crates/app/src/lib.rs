//! Organization chart builder: companies, collaborators and their published
//! org-chart sites.

pub mod config;
pub mod context;
pub mod database;
pub mod domain;
pub mod logging;
pub mod uploads;

#[cfg(test)]
mod test;

mod uuids;
