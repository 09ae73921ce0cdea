pub mod cmds;
pub mod overlay;
pub mod settings;

use anyhow::Error;
use serde::Serialize;
use std::fmt::Display;

pub type Result<T = (), E = Error> = anyhow::Result<T, E>;

#[derive(Debug, Serialize)]
pub enum Msg {
    Success(String),
    Error(String),
}

impl Msg {
    pub fn ok(msg: String) -> Result<Self> {
        Ok(Self::Success(msg))
    }

    pub fn into_inner(self) -> String {
        match self {
            Msg::Success(s) => s,
            Msg::Error(s) => s,
        }
    }
}

impl Display for Msg {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Msg::Success(msg) => write!(f, "{msg}"),
            Msg::Error(msg) => write!(f, "\u{2717} {msg}"),
        }
    }
}

pub trait PrettyJson {
    fn pretty_json(&self) -> Result<String>;
}

impl<S: ?Sized + serde::Serialize> PrettyJson for S {
    fn pretty_json(&self) -> Result<String> {
        serde_json::to_string_pretty(&self).map_err(|e| e.into())
    }
}
