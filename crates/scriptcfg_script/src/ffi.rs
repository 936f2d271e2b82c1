//! FFI layer between Rust and scripts
//!
//! Values move across as JSON text through the engine's own `JSON` object.
//! Before a value is stringified it is checked to be plain data: finite
//! numbers, strings, booleans, null, and arrays or objects built from them.
//! Anything `JSON.stringify` would drop or rewrite is rejected by name.

use crate::error::{ScriptError, Thrown};
use rquickjs::{CatchResultExt, CaughtError, Ctx, Function, Object, Value};

/// Deepest nesting accepted in a stored value; deeper graphs are treated as cyclic
const MAX_DEPTH: usize = 64;

/// Build the object a script sees, pre-filled with `entries`.
pub fn seed_object<'js>(
    ctx: &Ctx<'js>,
    entries: Vec<(String, serde_json::Value)>,
) -> Result<Object<'js>, ScriptError> {
    let object = Object::new(ctx.clone())?;
    for (name, value) in entries {
        let value = ctx.json_parse(value.to_string())?;
        object.set(name, value)?;
    }
    Ok(object)
}

/// Reads a script's binding back into Rust values.
///
/// Holds the engine's own `Object.getPrototypeOf` and the plain prototypes,
/// captured before the script runs so a script rebinding them changes nothing.
pub struct Harvester<'js> {
    ctx: Ctx<'js>,
    get_prototype_of: Function<'js>,
    object_prototype: Value<'js>,
    array_prototype: Value<'js>,
}

impl<'js> Harvester<'js> {
    pub fn new(ctx: &Ctx<'js>) -> Result<Self, ScriptError> {
        let globals = ctx.globals();
        let object: Object = globals.get("Object")?;
        let array: Object = globals.get("Array")?;

        Ok(Self {
            ctx: ctx.clone(),
            get_prototype_of: object.get("getPrototypeOf")?,
            object_prototype: object.get("prototype")?,
            array_prototype: array.get("prototype")?,
        })
    }

    /// Read back every own enumerable property of `object`.
    ///
    /// A property the script defined with a throwing getter surfaces as an
    /// execution error.
    pub fn harvest(
        &self,
        object: &Object<'js>,
    ) -> Result<Vec<(String, serde_json::Value)>, ScriptError> {
        let mut entries = Vec::new();

        for prop in object.props::<String, Value>() {
            let (name, value) = self.thrown(prop.catch(&self.ctx))?;
            self.check_plain(&name, &value, 0)?;
            let value = self.to_json(&name, value)?;
            entries.push((name, value));
        }

        Ok(entries)
    }

    fn check_plain(&self, name: &str, value: &Value<'js>, depth: usize) -> Result<(), ScriptError> {
        if depth > MAX_DEPTH {
            return Err(unsupported(
                name,
                format!("value is cyclic or nested deeper than {MAX_DEPTH} levels"),
            ));
        }

        if value.is_null() || value.is_bool() || value.is_int() || value.is_string() {
            return Ok(());
        }

        if let Some(number) = value.as_float() {
            if number.is_finite() {
                return Ok(());
            }
            return Err(unsupported(name, format!("{number} is not a finite number")));
        }

        if let Some(array) = value.as_array() {
            self.check_prototype(name, value, &self.array_prototype)?;
            for item in array.iter::<Value>() {
                let item = self.thrown(item.catch(&self.ctx))?;
                self.check_plain(name, &item, depth + 1)?;
            }
            return Ok(());
        }

        if value.is_function() {
            return Err(unsupported(name, "function values have no data representation"));
        }

        if let Some(object) = value.as_object() {
            self.check_prototype(name, value, &self.object_prototype)?;
            for prop in object.props::<String, Value>() {
                let (_, item) = self.thrown(prop.catch(&self.ctx))?;
                self.check_plain(name, &item, depth + 1)?;
            }
            return Ok(());
        }

        Err(unsupported(
            name,
            format!("{} values have no data representation", value.type_name()),
        ))
    }

    /// Objects must come straight from `{}`/`[]` (or `Object.create(null)`).
    fn check_prototype(
        &self,
        name: &str,
        value: &Value<'js>,
        expected: &Value<'js>,
    ) -> Result<(), ScriptError> {
        let prototype = self.thrown(
            self.get_prototype_of
                .call::<_, Value>((value.clone(),))
                .catch(&self.ctx),
        )?;

        if prototype == *expected || prototype.is_null() {
            Ok(())
        } else {
            Err(unsupported(
                name,
                "only plain objects and arrays can be stored, not class instances like Map",
            ))
        }
    }

    fn to_json(&self, name: &str, value: Value<'js>) -> Result<serde_json::Value, ScriptError> {
        let type_name = value.type_name();

        let text = self
            .ctx
            .json_stringify(value)
            .catch(&self.ctx)
            .map_err(|caught| unsupported(name, Thrown::from_caught(caught).message))?
            .ok_or_else(|| {
                unsupported(name, format!("{type_name} values have no data representation"))
            })?
            .to_string()?;

        serde_json::from_str(&text).map_err(|err| unsupported(name, err.to_string()))
    }

    /// Script exceptions raised while reading values count as execution errors.
    fn thrown<T>(&self, result: Result<T, CaughtError<'js>>) -> Result<T, ScriptError> {
        result.map_err(|caught| ScriptError::Execution(Thrown::from_caught(caught).into()))
    }
}

fn unsupported(name: &str, reason: impl Into<String>) -> ScriptError {
    ScriptError::Unsupported {
        name: name.to_string(),
        reason: reason.into(),
    }
}
