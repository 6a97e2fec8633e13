//! Parameter validation shared by the tool methods

use serde_json::{json, Map, Value};

use crate::mcp::rpc::{json_type_name, RpcError};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParamKind {
    Integer,
    String,
}

impl ParamKind {
    pub fn schema_type(self) -> &'static str {
        match self {
            Self::Integer => "integer",
            Self::String => "string",
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub struct ParamSpec {
    pub name: &'static str,
    pub kind: ParamKind,
    pub description: &'static str,
}

/// Accepts absent or null params as an empty mapping, rejects anything but an object.
pub fn normalize_params(params: Option<Value>) -> Result<Map<String, Value>, RpcError> {
    match params {
        None | Some(Value::Null) => Ok(Map::new()),
        Some(Value::Object(map)) => Ok(map),
        Some(other) => Err(RpcError::invalid_params(json!({
            "expected": "object",
            "actual": json_type_name(&other),
        }))),
    }
}

/// Fails naming every declared key that is absent from `params`.
pub fn ensure_required(params: &Map<String, Value>, specs: &[ParamSpec]) -> Result<(), RpcError> {
    let missing = specs
        .iter()
        .filter(|spec| !params.contains_key(spec.name))
        .map(|spec| spec.name)
        .collect::<Vec<_>>();

    if missing.is_empty() {
        Ok(())
    } else {
        Err(RpcError::invalid_params(json!({ "missing": missing })))
    }
}

pub fn required_i32(params: &Map<String, Value>, key: &str) -> Result<i32, RpcError> {
    let value = required_value(params, key)?;
    let mismatch = || wrong_type(key, ParamKind::Integer, value);

    let Value::Number(number) = value else {
        return Err(mismatch());
    };

    if let Some(integer) = number.as_i64() {
        return i32::try_from(integer).map_err(|_| out_of_range(key));
    }
    if number.as_u64().is_some() {
        return Err(out_of_range(key));
    }

    // Exponent forms and integral floats; non-finite means the literal overflowed f64.
    let Some(float) = number.as_f64() else {
        return Err(out_of_range(key));
    };
    if float.fract() != 0.0 {
        return Err(mismatch());
    }
    if float < f64::from(i32::MIN) || float > f64::from(i32::MAX) {
        return Err(out_of_range(key));
    }

    Ok(float as i32)
}

pub fn required_str<'a>(params: &'a Map<String, Value>, key: &str) -> Result<&'a str, RpcError> {
    let value = required_value(params, key)?;
    value
        .as_str()
        .ok_or_else(|| wrong_type(key, ParamKind::String, value))
}

fn required_value<'a>(params: &'a Map<String, Value>, key: &str) -> Result<&'a Value, RpcError> {
    params
        .get(key)
        .ok_or_else(|| RpcError::invalid_params(json!({ "missing": [key] })))
}

fn out_of_range(key: &str) -> RpcError {
    RpcError::invalid_params(json!({
        "param": key,
        "expected": ParamKind::Integer.schema_type(),
        "actual": "number",
        "reason": "out of range",
    }))
}

fn wrong_type(key: &str, expected: ParamKind, actual: &Value) -> RpcError {
    RpcError::invalid_params(json!({
        "param": key,
        "expected": expected.schema_type(),
        "actual": json_type_name(actual),
    }))
}

#[cfg(test)]
mod tests {
    use serde_json::{json, Map, Value};

    use super::{
        ensure_required, normalize_params, required_i32, required_str, ParamKind, ParamSpec,
    };

    fn object(value: Value) -> Map<String, Value> {
        value.as_object().cloned().expect("object fixture")
    }

    #[test]
    fn absent_and_null_params_become_empty() {
        assert!(normalize_params(None).expect("absent params").is_empty());
        assert!(normalize_params(Some(Value::Null))
            .expect("null params")
            .is_empty());
    }

    #[test]
    fn positional_params_are_rejected_with_type() {
        for (params, actual) in [
            (json!([2025, 5]), "array"),
            (json!("x"), "string"),
            (json!(42), "number"),
            (json!(false), "boolean"),
        ] {
            let error = normalize_params(Some(params)).expect_err("non-object params");
            let details = error.into_error_object();

            assert_eq!(details.code.code(), -32602);
            assert_eq!(details.data, Some(json!({"expected": "object", "actual": actual})));
        }
    }

    #[test]
    fn reports_all_missing_keys_in_order() {
        let specs = [
            ParamSpec {
                name: "year",
                kind: ParamKind::Integer,
                description: "",
            },
            ParamSpec {
                name: "month",
                kind: ParamKind::Integer,
                description: "",
            },
        ];

        let error = ensure_required(&Map::new(), &specs).expect_err("missing keys");
        assert_eq!(
            error.into_error_object().data,
            Some(json!({"missing": ["year", "month"]}))
        );
    }

    #[test]
    fn coerces_integral_floats() {
        let params = object(json!({"year": 2025.0}));

        assert_eq!(required_i32(&params, "year").expect("integral float"), 2025);
    }

    #[test]
    fn rejects_fractional_and_string_numbers() {
        let params = object(json!({"fraction": 5.5, "text": "2025"}));

        let fraction = required_i32(&params, "fraction").expect_err("fractional");
        let text = required_i32(&params, "text").expect_err("string");

        assert_eq!(fraction.code().code(), -32602);
        assert_eq!(
            text.into_error_object().data,
            Some(json!({"param": "text", "expected": "integer", "actual": "string"}))
        );
    }

    #[test]
    fn rejects_integers_outside_i32() {
        let params = object(json!({"year": 9_000_000_000_i64}));

        let error = required_i32(&params, "year").expect_err("out of range");
        assert_eq!(error.code().code(), -32602);
    }

    #[test]
    fn oversized_numbers_report_out_of_range() {
        let params: Map<String, Value> = serde_json::from_str(
            r#"{"big": 10000000000000000000, "exp": 1e19, "huge": 12345678901234567890123, "i64": 9000000000}"#,
        )
        .expect("object fixture");

        for key in ["big", "exp", "huge", "i64"] {
            let error = required_i32(&params, key).expect_err("out of range");
            assert_eq!(
                error.into_error_object().data,
                Some(json!({
                    "param": key,
                    "expected": "integer",
                    "actual": "number",
                    "reason": "out of range",
                })),
                "key {key}"
            );
        }
    }

    #[test]
    fn exponent_form_within_range_is_accepted() {
        let params: Map<String, Value> =
            serde_json::from_str(r#"{"month": 5e0}"#).expect("object fixture");

        assert_eq!(required_i32(&params, "month").expect("integral exponent"), 5);
    }

    #[test]
    fn string_param_rejects_non_strings() {
        let params = object(json!({"query": 42, "id": "1"}));

        assert!(required_str(&params, "query").is_err());
        assert_eq!(required_str(&params, "id").expect("string id"), "1");
    }
}
