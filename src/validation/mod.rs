//! Ordered request validation.
//!
//! A [`Pipeline`] runs its stages in the order they were added and stops at
//! the first one that rejects. Stages are pure: they only look at the request
//! context they are given.

pub mod dishes;
pub mod orders;

use serde_json::{Map, Value};

use crate::errors::ApiError;

pub trait Validator<C: ?Sized>: Send + Sync {
    fn validate(&self, ctx: &C) -> Result<(), ApiError>;
}

impl<C: ?Sized, F> Validator<C> for F
where
    F: Fn(&C) -> Result<(), ApiError> + Send + Sync,
{
    fn validate(&self, ctx: &C) -> Result<(), ApiError> {
        self(ctx)
    }
}

pub struct Pipeline<C: ?Sized> {
    stages: Vec<(&'static str, Box<dyn Validator<C>>)>,
}

impl<C: ?Sized> Default for Pipeline<C> {
    fn default() -> Self {
        Self { stages: Vec::new() }
    }
}

impl<C: ?Sized> Pipeline<C> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn stage<V>(mut self, name: &'static str, v: V) -> Self
    where
        V: Validator<C> + 'static,
    {
        self.stages.push((name, Box::new(v)));
        self
    }

    pub fn stage_names(&self) -> Vec<&'static str> {
        self.stages.iter().map(|(n, _)| *n).collect()
    }

    pub fn run(&self, ctx: &C) -> Result<(), ApiError> {
        for (name, v) in &self.stages {
            if let Err(e) = v.validate(ctx) {
                tracing::debug!(stage = *name, reason = %e, "request rejected");
                return Err(e);
            }
        }
        Ok(())
    }
}

/// Presence test used by every field check: `null`, `false`, `0` and `""`
/// count as missing, as does an absent key.
pub fn is_present(v: Option<&Value>) -> bool {
    match v {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

pub fn non_empty_str<'a>(body: &'a Map<String, Value>, key: &str) -> Option<&'a str> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

/// A JSON number strictly greater than zero, as stored.
pub fn positive_number(v: Option<&Value>) -> Option<f64> {
    let Value::Number(n) = v? else {
        return None;
    };
    n.as_f64().filter(|f| *f > 0.0)
}

/// Renders a body value for an error message: strings bare, anything else as JSON.
pub fn display_value(v: &Value) -> String {
    match v {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// A body `id` conflicts when it is present and differs from the route id.
pub fn id_conflicts(body: &Map<String, Value>, route_id: &str) -> Option<String> {
    let id = body.get("id");
    if !is_present(id) {
        return None;
    }
    match id {
        Some(Value::String(s)) if s == route_id => None,
        Some(other) => Some(display_value(other)),
        None => None,
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn always(msg: &'static str) -> impl Fn(&u32) -> Result<(), ApiError> + Send + Sync {
        move |_| Err(ApiError::BadRequest(msg.into()))
    }

    #[test]
    fn first_rejection_wins() {
        let p = Pipeline::<u32>::new()
            .stage("ok", |_: &u32| -> Result<(), ApiError> { Ok(()) })
            .stage("first", always("first"))
            .stage("second", always("second"));
        assert_eq!(p.run(&1), Err(ApiError::BadRequest("first".into())));
        assert_eq!(p.stage_names(), ["ok", "first", "second"]);
    }

    #[test]
    fn later_stages_do_not_run_after_rejection() {
        use std::sync::atomic::{AtomicUsize, Ordering};
        use std::sync::Arc;

        let calls = Arc::new(AtomicUsize::new(0));
        let c = calls.clone();
        let p = Pipeline::<u32>::new()
            .stage("reject", always("no"))
            .stage("count", move |_: &u32| -> Result<(), ApiError> {
                c.fetch_add(1, Ordering::SeqCst);
                Ok(())
            });
        assert!(p.run(&0).is_err());
        assert_eq!(calls.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn empty_pipeline_accepts() {
        assert_eq!(Pipeline::<u32>::new().run(&0), Ok(()));
    }

    #[test]
    fn presence_follows_truthiness() {
        for missing in [json!(null), json!(false), json!(0), json!(0.0), json!("")] {
            assert!(!is_present(Some(&missing)), "{missing} should be missing");
        }
        assert!(!is_present(None));
        for present in [json!(true), json!(-1), json!("x"), json!([]), json!({})] {
            assert!(is_present(Some(&present)), "{present} should be present");
        }
    }

    #[test]
    fn positive_number_accepts_any_positive_magnitude() {
        assert_eq!(positive_number(Some(&json!(5))), Some(5.0));
        assert_eq!(positive_number(Some(&json!(0.5))), Some(0.5));
        assert_eq!(positive_number(Some(&json!(1e29))), Some(1e29));
        assert_eq!(positive_number(Some(&json!(1e300))), Some(1e300));
        assert_eq!(positive_number(Some(&json!(1e-30))), Some(1e-30));
        assert_eq!(
            positive_number(Some(&json!(1.0000000000000002))),
            Some(1.0000000000000002)
        );
        assert_eq!(positive_number(Some(&json!(u64::MAX))), Some(u64::MAX as f64));
        for bad in [json!(0), json!(-1), json!(-0.01), json!("5"), json!(true), json!(null)] {
            assert_eq!(positive_number(Some(&bad)), None, "{bad} accepted");
        }
        assert_eq!(positive_number(None), None);
    }

    #[test]
    fn id_conflicts_ignores_absent_and_matching_ids() {
        let route = "abc";
        let body = |v: Value| json!({ "id": v }).as_object().cloned().unwrap();
        assert_eq!(id_conflicts(&Map::new(), route), None);
        assert_eq!(id_conflicts(&body(json!("")), route), None);
        assert_eq!(id_conflicts(&body(json!(null)), route), None);
        assert_eq!(id_conflicts(&body(json!("abc")), route), None);
        assert_eq!(id_conflicts(&body(json!("xyz")), route), Some("xyz".into()));
        assert_eq!(id_conflicts(&body(json!(7)), route), Some("7".into()));
    }
}
