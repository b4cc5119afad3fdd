use serde_json::Value;

/// The type tag a field's value must satisfy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum FieldType {
    String,
    Integer,
    Number,
    Boolean,
    Object,
    Array { max_items: Option<usize> },
    /// One of a fixed set of string literals.
    Enum(&'static [&'static str]),
}

#[derive(Debug, Clone, Copy)]
pub struct Field {
    pub name: &'static str,
    pub required: bool,
    pub kind: FieldType,
}

impl Field {
    pub const fn required(name: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            required: true,
            kind,
        }
    }

    pub const fn optional(name: &'static str, kind: FieldType) -> Self {
        Self {
            name,
            required: false,
            kind,
        }
    }
}

/// A declarative parameter schema checked before the handler runs. Unknown
/// fields are ignored; optional fields may be omitted or null.
#[derive(Debug, Clone, Copy)]
pub struct Schema {
    pub fields: &'static [Field],
}

impl Schema {
    pub const fn new(fields: &'static [Field]) -> Self {
        Self { fields }
    }

    /// Validates a params value, collecting one message per violation.
    pub fn validate(&self, params: &Value) -> Result<(), Vec<String>> {
        let object = match params {
            // Absent params are treated as an empty object.
            Value::Null => {
                let missing: Vec<String> = self
                    .fields
                    .iter()
                    .filter(|f| f.required)
                    .map(|f| format!("missing required field `{}`", f.name))
                    .collect();
                return if missing.is_empty() {
                    Ok(())
                } else {
                    Err(missing)
                };
            }
            Value::Object(map) => map,
            _ => return Err(vec!["params must be an object".to_string()]),
        };

        let mut violations = Vec::new();
        for field in self.fields {
            match object.get(field.name) {
                None | Some(Value::Null) => {
                    if field.required {
                        violations.push(format!("missing required field `{}`", field.name));
                    }
                }
                Some(value) => {
                    if let Some(violation) = check_type(field, value) {
                        violations.push(violation);
                    }
                }
            }
        }

        if violations.is_empty() {
            Ok(())
        } else {
            Err(violations)
        }
    }
}

fn check_type(field: &Field, value: &Value) -> Option<String> {
    let name = field.name;
    match field.kind {
        FieldType::String => {
            (!value.is_string()).then(|| format!("field `{name}` must be a string"))
        }
        FieldType::Integer => {
            (!value.is_i64() && !value.is_u64())
                .then(|| format!("field `{name}` must be an integer"))
        }
        FieldType::Number => {
            (!value.is_number()).then(|| format!("field `{name}` must be a number"))
        }
        FieldType::Boolean => {
            (!value.is_boolean()).then(|| format!("field `{name}` must be a boolean"))
        }
        FieldType::Object => {
            (!value.is_object()).then(|| format!("field `{name}` must be an object"))
        }
        FieldType::Array { max_items } => match value.as_array() {
            None => Some(format!("field `{name}` must be an array")),
            Some(items) => match max_items {
                Some(max) if items.len() > max => {
                    Some(format!("field `{name}` must have at most {max} items"))
                }
                _ => None,
            },
        },
        FieldType::Enum(literals) => match value.as_str() {
            Some(s) if literals.contains(&s) => None,
            _ => Some(format!(
                "field `{name}` must be one of [{}]",
                literals.join(", ")
            )),
        },
    }
}
