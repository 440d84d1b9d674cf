use serde::{Deserialize, Serialize};

use marker_core::io::ext_repr::{ExtInstance, ExtSolution};

use crate::config::LFConfig;

#[derive(Serialize, Deserialize, Clone)]
pub struct Output {
    #[serde(flatten)]
    pub instance: ExtInstance,
    pub solution: ExtSolution,
    pub config: LFConfig,
}
