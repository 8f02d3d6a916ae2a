#[macro_export]
macro_rules! value {
    // Handle null
    (null) => {
        $crate::Value::Null
    };

    // Handle true
    (true) => {
        $crate::Value::Bool(true)
    };

    // Handle false
    (false) => {
        $crate::Value::Bool(false)
    };

    // Handle empty list
    ([]) => {
        $crate::Value::list(vec![])
    };

    // Handle non-empty list
    ([ $($elem:tt),* $(,)? ]) => {
        $crate::Value::list(vec![$($crate::value!($elem)),*])
    };

    // Handle empty map
    ({}) => {
        $crate::Value::map(vec![])
    };

    // Handle non-empty map with literal keys
    ({ $($key:literal : $val:tt),* $(,)? }) => {
        $crate::Value::map(vec![
            $(($crate::Value::from($key), $crate::value!($val))),*
        ])
    };

    // Fallback for any expression with a From conversion
    ($expr:expr) => {
        $crate::Value::from($expr)
    };
}

#[cfg(test)]
mod tests {
    use crate::value::{Int, IntWidth, SeqKind};
    use crate::Value;

    #[test]
    fn test_value_macro_primitives() {
        assert_eq!(value!(null), Value::Null);
        assert_eq!(value!(true), Value::Bool(true));
        assert_eq!(value!(false), Value::Bool(false));
        assert_eq!(value!(42), Value::Int(Int::new(42, IntWidth::I32)));
        assert_eq!(value!(3.5), Value::from(3.5f64));
        assert_eq!(value!("hello"), Value::Str("hello".to_string()));
    }

    #[test]
    fn test_value_macro_lists() {
        assert_eq!(value!([]), Value::list(vec![]));

        let list = value!([1, 2, 3]);
        match list {
            Value::Seq(seq) => {
                assert_eq!(seq.kind, SeqKind::List);
                assert_eq!(seq.items.len(), 3);
                assert_eq!(seq.items[0], Value::from(1));
            }
            _ => panic!("Expected list"),
        }
    }

    #[test]
    fn test_value_macro_maps() {
        assert_eq!(value!({}), Value::map(vec![]));

        let map = value!({
            "name": "Alice",
            "age": 30
        });

        match map {
            Value::Map(map) => {
                assert_eq!(map.entries.len(), 2);
                assert_eq!(map.entries[0].0, Value::from("name"));
                assert_eq!(map.entries[0].1, Value::from("Alice"));
                assert_eq!(map.entries[1].1, Value::from(30));
            }
            _ => panic!("Expected map"),
        }
    }

    #[test]
    fn test_value_macro_nesting() {
        let nested = value!([1, [2, 3], {"k": true}]);
        match nested {
            Value::Seq(seq) => {
                assert_eq!(seq.items.len(), 3);
                assert!(matches!(&seq.items[1], Value::Seq(_)));
                assert!(matches!(&seq.items[2], Value::Map(_)));
            }
            _ => panic!("Expected list"),
        }
    }
}
