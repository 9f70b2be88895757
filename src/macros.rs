#[macro_export]
macro_rules! flat {
    // Handle empty array
    ([]) => {
        $crate::FlatValue::Array(vec![])
    };

    // Handle non-empty array
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::FlatValue::Array(vec![$($crate::flat!($elem)),*])
    };

    // Handle empty object
    ({}) => {
        $crate::FlatValue::Object($crate::FlatMap::new())
    };

    // Handle non-empty object
    ({ $($key:literal : $value:tt),* $(,)? }) => {{
        let mut object = $crate::FlatMap::new();
        $(
            object.insert($key.to_string(), $crate::flat!($value));
        )*
        $crate::FlatValue::Object(object)
    }};

    // Fallback: anything serializable becomes its scalar/tree form
    ($other:expr) => {{
        $crate::to_value(&$other).unwrap_or_else(|_| $crate::FlatValue::Leaf(String::new()))
    }};
}

#[cfg(test)]
mod tests {
    use crate::{FlatMap, FlatValue};

    #[test]
    fn flat_macro_scalars() {
        assert_eq!(flat!("hello"), FlatValue::Leaf("hello".to_string()));
        assert_eq!(flat!(42), FlatValue::Leaf("42".to_string()));
        assert_eq!(flat!(true), FlatValue::Leaf("true".to_string()));
    }

    #[test]
    fn flat_macro_arrays() {
        assert_eq!(flat!([]), FlatValue::Array(vec![]));

        let arr = flat!([1, 2, 3]);
        match arr {
            FlatValue::Array(items) => {
                assert_eq!(items.len(), 3);
                assert_eq!(items[0], FlatValue::Leaf("1".to_string()));
                assert_eq!(items[2], FlatValue::Leaf("3".to_string()));
            }
            _ => panic!("Expected array"),
        }
    }

    #[test]
    fn flat_macro_objects() {
        assert_eq!(flat!({}), FlatValue::Object(FlatMap::new()));

        let obj = flat!({
            "name": "Alice",
            "tags": ["a", "b"]
        });

        match obj {
            FlatValue::Object(map) => {
                assert_eq!(map.len(), 2);
                assert_eq!(
                    map.get("name"),
                    Some(&FlatValue::Leaf("Alice".to_string()))
                );
                assert!(map.get("tags").is_some_and(FlatValue::is_array));
            }
            _ => panic!("Expected object"),
        }
    }

    #[test]
    fn flat_macro_nested() {
        let obj = flat!({
            "server": {
                "host": "db1",
                "port": 5432
            }
        });

        let server = obj.get("server").unwrap();
        assert_eq!(server.get("host").and_then(|v| v.as_str()), Some("db1"));
        assert_eq!(server.get("port").and_then(|v| v.as_str()), Some("5432"));
    }
}
