use serde_json::Value;

/// Pull the record list out of a collection response.
///
/// The backend answers with a bare array, a paginated `{"results": [...]}`
/// object, or an object holding the list under some other key. For objects
/// the lookup order is `results`, then the collection name (`coordinator-requests`
/// also matches `coordinator_requests`), then the first array-valued key in
/// key order.
pub fn extract_records(payload: Value, collection: &str) -> Vec<Value> {
    match payload {
        Value::Array(items) => items,
        Value::Object(mut map) => {
            let snake = collection.replace('-', "_");
            for key in ["results", collection, snake.as_str()] {
                if matches!(map.get(key), Some(Value::Array(_))) {
                    if let Some(Value::Array(items)) = map.remove(key) {
                        return items;
                    }
                }
            }
            map.into_iter()
                .find_map(|(_, value)| match value {
                    Value::Array(items) => Some(items),
                    _ => None,
                })
                .unwrap_or_default()
        }
        _ => Vec::new(),
    }
}
