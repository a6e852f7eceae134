//! Pluggable ruleset registry: a process-wide name → `RuleHandler` table,
//! populated once at startup. Grounded on `app/domain/rules/registry.py` and
//! `app/domain/rules/base_ruleset.py`; the validator/applier pair in the
//! source becomes a single trait with two methods, per the redesign guidance
//! for languages with interfaces instead of duck-typed closures.

pub mod season1;

use std::collections::HashMap;
use std::sync::OnceLock;

use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

use crate::broadcaster::Broadcaster;
use crate::error::CoreResult;
use crate::store::Session;

/// Explicit context value threaded into every rule invocation — the Rust
/// analogue of the ad-hoc `context` dict in the source service layer.
pub struct RuleContext<'a, 'b> {
    pub session: &'a mut Session<'b>,
    pub broadcaster: &'a dyn Broadcaster,
    pub tick: i64,
    pub actor_id: Uuid,
}

/// One applied-action descriptor, returned in apply order by the action service.
#[derive(Debug, Clone, serde::Serialize)]
pub struct AppliedDescriptor {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub action_type: String,
    pub payload: Value,
    pub result: Value,
}

/// A registered action type's behavior: validate, then apply.
#[async_trait]
pub trait RuleHandler: Send + Sync {
    /// Checks the payload is well-formed for this action type. Returns a
    /// validation error if not; never mutates state.
    async fn validate(&self, payload: &Value) -> CoreResult<()>;

    /// Performs the domain mutation and returns the JSON result recorded in
    /// the applied-action descriptor.
    async fn apply(&self, ctx: &mut RuleContext<'_, '_>, payload: &Value) -> CoreResult<Value>;
}

pub struct RulesetRegistry {
    handlers: HashMap<&'static str, Box<dyn RuleHandler>>,
}

impl RulesetRegistry {
    pub fn get(&self, action_type: &str) -> Option<&dyn RuleHandler> {
        self.handlers.get(action_type).map(|b| b.as_ref())
    }
}

static REGISTRY: OnceLock<RulesetRegistry> = OnceLock::new();

/// Builds and installs the default ruleset (`work`, `list_item`, `buy_item`,
/// `cancel_listing`) exactly once. Subsequent calls are no-ops; the registry
/// is process-wide immutable state after this point.
pub fn install_default_ruleset() {
    REGISTRY.get_or_init(season1::build_registry);
}

/// Returns the process-wide registry, installing the default ruleset on
/// first use if it has not been installed yet.
pub fn registry() -> &'static RulesetRegistry {
    install_default_ruleset();
    REGISTRY.get().expect("registry installed by install_default_ruleset")
}

impl RulesetRegistry {
    pub(crate) fn from_handlers(handlers: HashMap<&'static str, Box<dyn RuleHandler>>) -> Self {
        Self { handlers }
    }
}
