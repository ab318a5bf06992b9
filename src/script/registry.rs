use crate::error::ScriptError;
use crate::script::Script;
use ahash::AHashMap;
use tracing::warn;

/// The named scripts a controller can select from, with a designated default.
///
/// An unknown flow id is a configuration error: lookups log a warning and
/// fall back to the default flow rather than crashing. Callers must not rely
/// on the fallback as normal behavior.
pub struct ScriptRegistry {
    flows: AHashMap<String, Script>,
    default_id: String,
}

impl ScriptRegistry {
    /// Creates a registry seeded with its default flow.
    pub fn new(default_id: impl Into<String>, default_script: Script) -> Self {
        let default_id = default_id.into();
        let mut flows = AHashMap::new();
        flows.insert(default_id.clone(), default_script);
        Self { flows, default_id }
    }

    /// Registers (or replaces) a flow under the given id.
    pub fn insert(&mut self, id: impl Into<String>, script: Script) {
        self.flows.insert(id.into(), script);
    }

    pub fn contains(&self, id: &str) -> bool {
        self.flows.contains_key(id)
    }

    pub fn default_id(&self) -> &str {
        &self.default_id
    }

    /// All registered flow ids, sorted for stable presentation.
    pub fn ids(&self) -> Vec<&str> {
        let mut ids: Vec<&str> = self.flows.keys().map(String::as_str).collect();
        ids.sort_unstable();
        ids
    }

    /// Resolves a requested id to a registered one, falling back to the
    /// default flow when the id is unknown. The returned id borrows the
    /// registry, not the query.
    pub fn resolve(&self, id: &str) -> &str {
        match self.flows.get_key_value(id) {
            Some((key, _)) => key.as_str(),
            None => {
                warn!(requested = id, fallback = %self.default_id, "unknown flow id, falling back to default");
                &self.default_id
            }
        }
    }

    /// The script registered under `id`, or the default flow when `id` is
    /// unknown.
    pub fn get(&self, id: &str) -> &Script {
        &self.flows[self.resolve(id)]
    }

    /// The three built-in flows shipped with the crate, validated at load.
    /// `rescue` is the default.
    pub fn builtin() -> Result<Self, ScriptError> {
        let mut registry = Self::new("rescue", load(include_str!("../../data/rescue.json"))?);
        registry.insert("explore", load(include_str!("../../data/explore.json"))?);
        registry.insert("cook", load(include_str!("../../data/cook.json"))?);
        Ok(registry)
    }
}

fn load(json: &str) -> Result<Script, ScriptError> {
    let script = Script::from_json(json)?;
    script.validate()?;
    Ok(script)
}
