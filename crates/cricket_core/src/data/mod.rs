pub mod teams;

pub use teams::{default_teams, find_team};
