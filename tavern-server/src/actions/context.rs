//! Inputs shared by every action effect.

use chrono::{DateTime, Utc};
use serde::{Serialize, Deserialize};

use crate::config::GameConfig;
use crate::game::enemies::EnemyCatalog;

/// Client-supplied action parameters.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionParams {
    /// Enemy to fight. A random one when absent.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub enemy_id: Option<String>,
}

impl ActionParams {
    /// No parameters.
    pub fn none() -> Self {
        Self::default()
    }

    /// Fight a specific enemy.
    pub fn enemy(id: impl Into<String>) -> Self {
        Self { enemy_id: Some(id.into()) }
    }
}

/// Read-only environment of one dispatch.
#[derive(Clone, Copy, Debug)]
pub(crate) struct ActionContext<'a> {
    pub config: &'a GameConfig,
    pub catalog: &'a EnemyCatalog,
    pub params: &'a ActionParams,
    /// Single timestamp used for checks, effect and deduction.
    pub now: DateTime<Utc>,
}
