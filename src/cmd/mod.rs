//! CLI command implementations.
//!
//! Each submodule owns one command family:
//!
//! | Module    | Commands handled                        |
//! |-----------|------------------------------------------|
//! | `auth`    | `Signup`, `Login`, `Logout`, `Whoami`   |
//! | `project` | `Project create`, `Project list`        |
//! | `issue`   | `Issue create`, `Issue list`            |
//! | `submit`  | `Submit`                                |
//! | `board`   | `Milestones`                            |
//! | `config`  | `Config`                                |

pub mod auth;
pub mod board;
pub mod config;
pub mod issue;
pub mod project;
pub mod submit;

pub use auth::{cmd_login, cmd_logout, cmd_signup, cmd_whoami};
pub use board::cmd_milestones;
pub use config::cmd_config;
pub use issue::{cmd_issue_create, cmd_issue_list};
pub use project::{cmd_project_create, cmd_project_list};
pub use submit::cmd_submit;
