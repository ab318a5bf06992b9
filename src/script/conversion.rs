use crate::error::ScriptConversionError;
use crate::script::Script;
use serde_json::Value;

/// Converts a custom authored format into the canonical [`Script`] model.
///
/// The engine only ever operates on the canonical flat schema; implement this
/// trait to provide a translation layer from whatever shape your authoring
/// tool produces.
pub trait IntoScript {
    fn into_script(self) -> Result<Script, ScriptConversionError>;
}

impl IntoScript for Script {
    fn into_script(self) -> Result<Script, ScriptConversionError> {
        Ok(self)
    }
}

/// Step records in the legacy nested shape, where presentational fields live
/// under a `content` object (`step.content.description`) instead of on the
/// record itself.
///
/// Older scripts mixed both shapes; the canonical schema is flat, so this
/// migrator lifts nested fields to the top level once at load time instead of
/// branching on shape at runtime. A plain-string `content` is already
/// canonical and is left in place. Top-level fields win on collision.
pub struct LegacyRecords(pub Vec<Value>);

impl IntoScript for LegacyRecords {
    fn into_script(self) -> Result<Script, ScriptConversionError> {
        let steps: Vec<Value> = self.0.into_iter().map(flatten_record).collect::<Result<_, _>>()?;
        serde_json::from_value(Value::Array(steps))
            .map_err(|e| ScriptConversionError::ValidationError(e.to_string()))
    }
}

fn flatten_record(record: Value) -> Result<Value, ScriptConversionError> {
    let Value::Object(mut fields) = record else {
        return Err(ScriptConversionError::ValidationError(format!(
            "expected a step object, found {record}"
        )));
    };

    match fields.remove("content") {
        Some(Value::Object(nested)) => {
            for (key, value) in nested {
                fields.entry(key).or_insert(value);
            }
        }
        Some(canonical) => {
            fields.insert("content".to_string(), canonical);
        }
        None => {}
    }

    Ok(Value::Object(fields))
}
