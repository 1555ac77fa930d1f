use serde_json::{Map, Value};

use super::{id_conflicts, is_present, non_empty_str, positive_number, Pipeline};
use crate::entities::dish::NewDish;
use crate::errors::ApiError;

pub struct DishRequest<'a> {
    pub body: &'a Map<String, Value>,
    /// Id of the dish being updated; `None` on create.
    pub route_id: Option<&'a str>,
}

fn bad(msg: impl Into<String>) -> ApiError {
    ApiError::BadRequest(msg.into())
}

// Field extractors. Each one owns its rule and message; the pipeline stages
// and `parse` both go through them.

fn text_field(body: &Map<String, Value>, key: &str) -> Result<String, ApiError> {
    non_empty_str(body, key)
        .map(str::to_owned)
        .ok_or_else(|| bad(format!("Dish must include a {key}")))
}

fn price_field(body: &Map<String, Value>) -> Result<f64, ApiError> {
    let raw = body.get("price");
    if !is_present(raw) {
        return Err(bad("Dish must include a price"));
    }
    positive_number(raw)
        .ok_or_else(|| bad("Dish must have a price that is an integer greater than 0"))
}

fn name(req: &DishRequest<'_>) -> Result<(), ApiError> {
    text_field(req.body, "name").map(drop)
}

fn description(req: &DishRequest<'_>) -> Result<(), ApiError> {
    text_field(req.body, "description").map(drop)
}

fn price(req: &DishRequest<'_>) -> Result<(), ApiError> {
    price_field(req.body).map(drop)
}

fn image_url(req: &DishRequest<'_>) -> Result<(), ApiError> {
    text_field(req.body, "image_url").map(drop)
}

fn id_matches_route(req: &DishRequest<'_>) -> Result<(), ApiError> {
    let Some(route_id) = req.route_id else {
        return Ok(());
    };
    match id_conflicts(req.body, route_id) {
        Some(body_id) => Err(bad(format!(
            "Dish id does not match route id. Dish: {body_id}, Route: {route_id}"
        ))),
        None => Ok(()),
    }
}

fn field_checks<'a>() -> Pipeline<DishRequest<'a>> {
    Pipeline::new()
        .stage("name", name)
        .stage("description", description)
        .stage("price", price)
        .stage("image_url", image_url)
}

pub fn create_pipeline<'a>() -> Pipeline<DishRequest<'a>> {
    field_checks()
}

pub fn update_pipeline<'a>() -> Pipeline<DishRequest<'a>> {
    field_checks().stage("id", id_matches_route)
}

/// Typed fields of a body that passed a dish pipeline.
pub fn parse(body: &Map<String, Value>) -> Result<NewDish, ApiError> {
    Ok(NewDish {
        name: text_field(body, "name")?,
        description: text_field(body, "description")?,
        price: price_field(body)?,
        image_url: text_field(body, "image_url")?,
    })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn body(v: Value) -> Map<String, Value> {
        v.as_object().cloned().unwrap()
    }

    fn valid() -> Map<String, Value> {
        body(json!({
            "name": "Taco",
            "description": "Spicy",
            "price": 5,
            "image_url": "http://x"
        }))
    }

    fn create_err(b: &Map<String, Value>) -> String {
        let req = DishRequest { body: b, route_id: None };
        create_pipeline().run(&req).unwrap_err().to_string()
    }

    fn update_err(b: &Map<String, Value>, route: &str) -> Option<String> {
        let req = DishRequest {
            body: b,
            route_id: Some(route),
        };
        update_pipeline().run(&req).err().map(|e| e.to_string())
    }

    #[test]
    fn valid_body_passes_and_parses() {
        let b = valid();
        let req = DishRequest { body: &b, route_id: None };
        assert!(create_pipeline().run(&req).is_ok());
        let new = parse(&b).unwrap();
        assert_eq!(new.name, "Taco");
        assert_eq!(new.price, 5.0);
    }

    #[test]
    fn extreme_positive_prices_are_kept_exactly() {
        for p in [1e29, 1e300, 1e-30, 1.0000000000000002, 123456789.12345679] {
            let mut b = valid();
            b.insert("price".into(), json!(p));
            let req = DishRequest { body: &b, route_id: None };
            assert!(create_pipeline().run(&req).is_ok(), "price {p} rejected");
            assert_eq!(parse(&b).unwrap().price, p);
        }
    }

    #[test]
    fn parse_reports_the_same_error_as_the_pipeline() {
        for (key, v) in [("name", json!("")), ("price", json!(-2)), ("price", json!(0))] {
            let mut b = valid();
            b.insert(key.into(), v);
            assert_eq!(parse(&b).unwrap_err().to_string(), create_err(&b));
        }
    }

    #[test]
    fn stage_order() {
        assert_eq!(
            create_pipeline().stage_names(),
            ["name", "description", "price", "image_url"]
        );
        assert_eq!(
            update_pipeline().stage_names(),
            ["name", "description", "price", "image_url", "id"]
        );
    }

    #[test]
    fn missing_fields_reported_in_order() {
        assert_eq!(create_err(&Map::new()), "Dish must include a name");

        let mut b = valid();
        b.insert("name".into(), json!(""));
        b.remove("description");
        assert_eq!(create_err(&b), "Dish must include a name");

        let mut b = valid();
        b.remove("description");
        b.remove("image_url");
        assert_eq!(create_err(&b), "Dish must include a description");

        let mut b = valid();
        b.insert("image_url".into(), json!(""));
        assert_eq!(create_err(&b), "Dish must include a image_url");
    }

    #[test]
    fn non_string_name_is_rejected() {
        let mut b = valid();
        b.insert("name".into(), json!(42));
        assert_eq!(create_err(&b), "Dish must include a name");
    }

    #[test]
    fn falsy_price_is_missing() {
        for p in [json!(0), json!(null), json!(""), json!(false)] {
            let mut b = valid();
            b.insert("price".into(), p.clone());
            assert_eq!(create_err(&b), "Dish must include a price", "price {p}");
        }
    }

    #[test]
    fn non_positive_or_non_numeric_price_is_invalid() {
        for p in [json!(-1), json!(-0.5), json!("5"), json!(true), json!([5]), json!({})] {
            let mut b = valid();
            b.insert("price".into(), p.clone());
            assert_eq!(
                create_err(&b),
                "Dish must have a price that is an integer greater than 0",
                "price {p}"
            );
            assert_eq!(
                update_err(&b, "abc").as_deref(),
                Some("Dish must have a price that is an integer greater than 0")
            );
        }
    }

    #[test]
    fn update_rejects_mismatched_id() {
        for (body_id, shown) in [(json!("xyz"), "xyz"), (json!(12), "12")] {
            let mut b = valid();
            b.insert("id".into(), body_id);
            assert_eq!(
                update_err(&b, "abc").as_deref(),
                Some(format!("Dish id does not match route id. Dish: {shown}, Route: abc").as_str())
            );
        }
    }

    #[test]
    fn update_accepts_matching_or_absent_id() {
        let mut b = valid();
        assert_eq!(update_err(&b, "abc"), None);
        b.insert("id".into(), json!("abc"));
        assert_eq!(update_err(&b, "abc"), None);
        b.insert("id".into(), json!(""));
        assert_eq!(update_err(&b, "abc"), None);
    }

    #[test]
    fn field_errors_win_over_id_mismatch() {
        let mut b = valid();
        b.remove("price");
        b.insert("id".into(), json!("xyz"));
        assert_eq!(
            update_err(&b, "abc").as_deref(),
            Some("Dish must include a price")
        );
    }
}
