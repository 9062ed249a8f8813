#![no_main]
use jsontree::{JsonParser, JsonValue, Object, SerdeJsonParser, SonicParser};
use libfuzzer_sys::fuzz_target;

/// Fields as `serde_json` keeps them: the last duplicate wins at the first one's position.
fn last_wins(object: &Object) -> Vec<(&str, &JsonValue)> {
    let mut fields: Vec<(&str, &JsonValue)> = Vec::with_capacity(object.len());
    for (key, value) in object.iter() {
        match fields.iter_mut().find(|(existing, _)| *existing == key) {
            Some(field) => field.1 = value,
            None => fields.push((key, value)),
        }
    }
    fields
}

/// Structural equality that ignores how each backend typed its numbers and duplicate keys.
fn same_shape(lhs: &JsonValue, rhs: &JsonValue) -> bool {
    match (lhs, rhs) {
        (JsonValue::Number(_), JsonValue::Number(_)) => true,
        (JsonValue::Array(l), JsonValue::Array(r)) => {
            l.len() == r.len() && l.iter().zip(r).all(|(l, r)| same_shape(l, r))
        }
        (JsonValue::Object(l), JsonValue::Object(r)) => {
            let (l, r) = (last_wins(l), last_wins(r));
            l.len() == r.len()
                && l
                    .iter()
                    .zip(&r)
                    .all(|((lk, lv), (rk, rv))| lk == rk && same_shape(lv, rv))
        }
        _ => lhs == rhs,
    }
}

fuzz_target!(|data: &[u8]| {
    let tree = SerdeJsonParser::default().parse_slice(data);
    let graph = SonicParser::default().parse_slice(data);
    if let (Ok(tree), Ok(graph)) = (tree, graph) {
        assert!(same_shape(&tree, &graph), "{tree:?} != {graph:?}");
    }
});
